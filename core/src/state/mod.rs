//! Fetch-cached state containers.
//!
//! RULE: a fetch never propagates an error. Failures are logged, the
//! collection is reset to empty and the message kept for an error banner.
//!
//! Fetch cycle: Idle -> Loading -> { Populated | EmptyOnError }.
//! A new fetch restarts the cycle from whatever state the container is in.
//! Each begin_fetch() hands out a ticket; only the newest ticket may
//! commit, and detach() invalidates every outstanding ticket so a view
//! that has gone away never receives a late update.

pub mod auth;
pub mod company;
pub mod data;
pub mod investment;
pub mod selection;

use crate::{
    error::DashResult,
    model::{Company, Investment, InvestorInvestment, User},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchState {
    Idle,
    Loading,
    Populated,
    EmptyOnError,
}

/// Proof that a fetch was started. Stale tickets are refused at commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Records addressable by id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for User               { fn key(&self) -> &str { &self.id } }
impl Keyed for Company            { fn key(&self) -> &str { &self.id } }
impl Keyed for Investment         { fn key(&self) -> &str { &self.id } }
impl Keyed for InvestorInvestment { fn key(&self) -> &str { &self.id } }

/// One cached collection and its fetch state.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    name:       &'static str,
    items:      Vec<T>,
    state:      FetchState,
    last_error: Option<String>,
    generation: u64,
}

impl<T: Keyed + Clone> Resource<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            items:      Vec::new(),
            state:      FetchState::Idle,
            last_error: None,
            generation: 0,
        }
    }

    pub fn items(&self) -> &[T]              { &self.items }
    pub fn state(&self) -> FetchState        { self.state }
    pub fn is_loading(&self) -> bool         { self.state == FetchState::Loading }
    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = FetchState::Loading;
        FetchTicket(self.generation)
    }

    /// Commit a fetch result. Returns false (and changes nothing) when the
    /// ticket has been superseded or the container was detached.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: DashResult<Vec<T>>) -> bool {
        if ticket.0 != self.generation {
            log::debug!("{}: dropping stale fetch #{}", self.name, ticket.0);
            return false;
        }
        match result {
            Ok(items) => {
                log::debug!("{}: fetched {} records", self.name, items.len());
                self.items = items;
                self.state = FetchState::Populated;
                self.last_error = None;
            }
            Err(e) => {
                log::error!("{}: fetch failed: {e}", self.name);
                self.items.clear();
                self.state = FetchState::EmptyOnError;
                self.last_error = Some(e.user_message());
            }
        }
        true
    }

    pub fn fetch_with<F>(&mut self, fetch: F) -> bool
    where
        F: FnOnce() -> DashResult<Vec<T>>,
    {
        let ticket = self.begin_fetch();
        self.complete_fetch(ticket, fetch())
    }

    /// Invalidate outstanding tickets. Cached items are kept.
    pub fn detach(&mut self) {
        self.generation += 1;
        if self.state == FetchState::Loading {
            self.state = FetchState::Idle;
        }
    }

    /// Replace the record with the same id, or append it.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.key() == item.key()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.items.iter().position(|item| item.key() == id)?;
        Some(self.items.remove(idx))
    }
}
