//! investdash-core: the headless core of the investment dashboard.
//!
//! Raw records (demo data or API) flow through `analytics` into derived
//! metrics and chart series, which `views` assembles per role. The
//! `state` containers cache what the API returns.

pub mod analytics;
pub mod api;
pub mod config;
pub mod demo_data;
pub mod error;
pub mod model;
pub mod performance;
pub mod rng;
pub mod state;
pub mod types;
pub mod validation;
pub mod views;
