//! Distribution breakdown tests.

use investdash_core::{
    analytics::{asset_distribution, company_distribution, distribution_by, portfolio_distribution},
    config::DashboardConfig,
    demo_data::demo_dataset,
};

fn palette() -> Vec<String> {
    DashboardConfig::default_test().palette
}

#[derive(Clone)]
struct Holding {
    kind:  &'static str,
    value: f64,
}

fn holdings() -> Vec<Holding> {
    vec![
        Holding { kind: "Stocks", value: 100.0 },
        Holding { kind: "Bonds", value: 50.0 },
        Holding { kind: "Stocks", value: 25.0 },
        Holding { kind: "Crypto", value: 10.0 },
        Holding { kind: "Bonds", value: 5.0 },
    ]
}

/// Colors follow first-seen order of the groups.
#[test]
fn colors_assigned_in_first_seen_order() {
    let palette = palette();
    let slices = distribution_by(&holdings(), |h| h.kind.to_string(), |h| h.value, &palette);

    let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Stocks", "Bonds", "Crypto"]);
    assert_eq!(slices[0].color, palette[0]);
    assert_eq!(slices[1].color, palette[1]);
    assert_eq!(slices[2].color, palette[2]);
    assert_eq!(slices[0].value, 125.0);
    assert_eq!(slices[1].value, 55.0);
    assert_eq!(slices[2].value, 10.0);
}

/// Reordering the input changes colors but never the group totals.
#[test]
fn group_totals_independent_of_order() {
    let palette = palette();
    let forward = distribution_by(&holdings(), |h| h.kind.to_string(), |h| h.value, &palette);
    let mut reversed_input = holdings();
    reversed_input.reverse();
    let reversed = distribution_by(&reversed_input, |h| h.kind.to_string(), |h| h.value, &palette);

    assert_eq!(forward.len(), reversed.len());
    for slice in &forward {
        let other = reversed
            .iter()
            .find(|s| s.name == slice.name)
            .expect("same groups");
        assert_eq!(slice.value, other.value, "total for {}", slice.name);
    }
    // Reversed, Bonds is seen first.
    assert_eq!(reversed[0].name, "Bonds");
    assert_eq!(reversed[0].color, palette[0]);
}

#[test]
fn palette_wraps_around() {
    let palette = vec!["#111".to_string(), "#222".to_string()];
    let kinds = ["a", "b", "c", "d", "e"];

    let slices = distribution_by(&kinds, |k| k.to_string(), |_| 1.0, &palette);

    let colors: Vec<&str> = slices.iter().map(|s| s.color.as_str()).collect();
    assert_eq!(colors, vec!["#111", "#222", "#111", "#222", "#111"]);
}

#[test]
fn empty_input_gives_no_slices() {
    assert!(asset_distribution(&[], &palette()).is_empty());
}

#[test]
fn demo_asset_distribution() {
    let data = demo_dataset();
    let slices = asset_distribution(&data.investments, &palette());

    let pairs: Vec<(&str, f64)> = slices.iter().map(|s| (s.name.as_str(), s.value)).collect();
    assert_eq!(
        pairs,
        vec![
            ("Stocks", 470_500.0),
            ("Private Equity", 348_000.0),
            ("Bonds", 437_000.0),
            ("Real Estate", 250_000.0),
        ]
    );
}

#[test]
fn demo_company_distribution_uses_names() {
    let data = demo_dataset();
    let slices = company_distribution(&data.investments, &data.companies, &palette());

    let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["TechCorp Solutions", "GreenEnergy Ltd", "HealthPlus Medical", "Urban Realty Group"]
    );
    assert_eq!(slices[1].value, 509_000.0);
}

#[test]
fn portfolio_distribution_groups_by_asset_type() {
    let data = demo_dataset();
    let portfolio = data.get_investor_portfolio("u-005");

    let slices = portfolio_distribution(&portfolio, &palette());

    let pairs: Vec<(&str, f64)> = slices.iter().map(|s| (s.name.as_str(), s.value)).collect();
    assert_eq!(pairs, vec![("Stocks", 100_940.0), ("Bonds", 38_180.0)]);
}
