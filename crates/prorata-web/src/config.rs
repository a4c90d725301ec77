use prorata_calculator::{InputBounds, ProrationCalculator, ProrationError, RateSchedule, YearMonth};
use serde::Deserialize;
use std::{fs, io};
use tracing::{info, warn};

/// Address the server binds to.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Rate schedule and currency shown in the panels.
#[derive(Deserialize, Debug, Clone)]
pub struct RatesConfig {
    /// Per-area monthly rate of the pre-paid deposit.
    #[serde(default = "default_old_rate")]
    pub old_rate: f64,
    /// Per-area monthly rate from the changeover.
    #[serde(default = "default_new_rate")]
    pub new_rate: f64,
    /// Symbol prefixed to every amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            old_rate: default_old_rate(),
            new_rate: default_new_rate(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Month the new rate takes effect.
#[derive(Deserialize, Debug, Clone)]
pub struct ChangeoverConfig {
    /// Month number, 1 to 12.
    #[serde(default = "default_changeover_month")]
    pub month: u32,
    /// Calendar year.
    #[serde(default = "default_changeover_year")]
    pub year: i32,
}

impl Default for ChangeoverConfig {
    fn default() -> Self {
        Self { month: default_changeover_month(), year: default_changeover_year() }
    }
}

/// Limits applied to form and API input.
#[derive(Deserialize, Debug, Clone)]
pub struct BoundsConfig {
    /// Earliest accepted move-in year.
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    /// Latest accepted move-in year.
    #[serde(default = "default_max_year")]
    pub max_year: i32,
    /// Smallest accepted area.
    #[serde(default = "default_min_area")]
    pub min_area: f64,
    /// Largest accepted area.
    #[serde(default = "default_max_area")]
    pub max_area: f64,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
            min_area: default_min_area(),
            max_area: default_max_area(),
        }
    }
}

/// Values the form is pre-filled with.
#[derive(Deserialize, Debug, Clone)]
pub struct FormConfig {
    /// Area shown when the form first loads.
    #[serde(default = "default_form_area")]
    pub default_area: f64,
    /// Move-in year shown when the form first loads.
    #[serde(default = "default_changeover_year")]
    pub default_year: i32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self { default_area: default_form_area(), default_year: default_changeover_year() }
    }
}

/// Top-level configuration, one field per TOML section.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProrataConfig {
    /// Listen address.
    #[serde(default)]
    pub server: ServerConfig,
    /// Rates and currency.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Changeover month.
    #[serde(default)]
    pub changeover: ChangeoverConfig,
    /// Input limits.
    #[serde(default)]
    pub bounds: BoundsConfig,
    /// Form defaults.
    #[serde(default)]
    pub form: FormConfig,
}

impl ProrataConfig {
    /// Loads the TOML file named by `PRORATA_CONFIG_PATH` (default `prorata.toml`).
    ///
    /// A missing file falls back to the built-in defaults; a malformed one is an error.
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var("PRORATA_CONFIG_PATH").unwrap_or_else(|_| "prorata.toml".to_string());

        match fs::read_to_string(&config_path) {
            Ok(config_str) => {
                info!("Loaded configuration from '{}'.", config_path);
                Self::from_toml_str(&config_str)
                    .map_err(|e| anyhow::anyhow!("Failed to parse '{}': {}", config_path, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Configuration file '{}' not found. Using default configuration.",
                    config_path
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!("Failed to read '{}': {}", config_path, e)),
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(config_str)
    }

    /// Applies `PRORATA_*` environment overrides.
    pub fn apply_profile(mut self) -> Self {
        // Environment overrides
        if let Ok(host) = std::env::var("PRORATA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_override("PRORATA_PORT") {
            self.server.port = port;
        }
        if let Some(old_rate) = env_override("PRORATA_OLD_RATE") {
            self.rates.old_rate = old_rate;
        }
        if let Some(new_rate) = env_override("PRORATA_NEW_RATE") {
            self.rates.new_rate = new_rate;
        }

        info!(
            old_rate = self.rates.old_rate,
            new_rate = self.rates.new_rate,
            changeover_month = self.changeover.month,
            changeover_year = self.changeover.year,
            "Applied configuration profile"
        );
        self
    }

    /// Configured rates as a [`RateSchedule`].
    pub fn rate_schedule(&self) -> RateSchedule {
        RateSchedule { old_rate: self.rates.old_rate, new_rate: self.rates.new_rate }
    }

    /// Configured changeover month, validated.
    pub fn changeover(&self) -> Result<YearMonth, ProrationError> {
        YearMonth::new(self.changeover.year, self.changeover.month).map_err(|_| {
            ProrationError::invalid(
                "changeover.month",
                format!("expected a month between 1 and 12, got {}", self.changeover.month),
            )
        })
    }

    /// Form limits as [`InputBounds`].
    pub fn input_bounds(&self) -> InputBounds {
        InputBounds {
            min_year: self.bounds.min_year,
            max_year: self.bounds.max_year,
            min_area: Some(self.bounds.min_area),
            max_area: Some(self.bounds.max_area),
        }
    }

    /// Builds the calculator this configuration describes.
    pub fn calculator(&self) -> Result<ProrationCalculator, ProrationError> {
        ProrationCalculator::new(self.rate_schedule(), self.changeover()?)?
            .with_bounds(self.input_bounds())
    }
}

fn env_override<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: '{}' is not a valid value.", name, raw);
            None
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_old_rate() -> f64 {
    RateSchedule::default().old_rate
}
fn default_new_rate() -> f64 {
    RateSchedule::default().new_rate
}
fn default_currency_symbol() -> String {
    "₹".to_string()
}
fn default_changeover_month() -> u32 {
    prorata_calculator::default_changeover().month()
}
fn default_changeover_year() -> i32 {
    prorata_calculator::default_changeover().year()
}
fn default_min_year() -> i32 {
    InputBounds::default().min_year
}
fn default_max_year() -> i32 {
    InputBounds::default().max_year
}
fn default_min_area() -> f64 {
    100.0
}
fn default_max_area() -> f64 {
    10_000.0
}
fn default_form_area() -> f64 {
    1410.0
}
