use serde::{Deserialize, Serialize};

/// Default chart palette. Groups take colors in first-seen order.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042",
    "#8884D8", "#82CA9D", "#FFC658", "#FF6B6B",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceConfig {
    /// Days of history to synthesize; the series has `days + 1` points.
    pub days: u32,
    /// Half-width of the uniform perturbation, as a fraction (0.05 = ±5%).
    pub perturbation_band: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            days:              90,
            perturbation_band: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    pub master_seed:     u64,
    pub currency_symbol: String,
    pub palette:         Vec<String>,
    #[serde(default)]
    pub performance:     PerformanceConfig,
    /// Relative directory holding a JSON dataset to use instead of the
    /// built-in demo data. Resolved against the data dir.
    #[serde(default)]
    pub dataset_dir:     Option<String>,
}

impl DashboardConfig {
    /// Load from the data/ directory.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/dashboard.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;

        if config.performance.days == 0 {
            anyhow::bail!("{path}: performance.days must be at least 1");
        }
        if !(0.0..1.0).contains(&config.performance.perturbation_band) {
            anyhow::bail!(
                "{path}: performance.perturbation_band {} outside [0, 1)",
                config.performance.perturbation_band
            );
        }
        log::debug!(
            "Loaded dashboard config: seed={} days={} band={}",
            config.master_seed,
            config.performance.days,
            config.performance.perturbation_band
        );
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            master_seed:     42,
            currency_symbol: "$".into(),
            palette:         DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            performance:     PerformanceConfig::default(),
            dataset_dir:     None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::default_test()
    }
}
