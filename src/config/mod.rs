use dirs::home_dir;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::{ProjectionError, Result};
use crate::projection::normalizer::{
    PayoutTiming, DEFAULT_ASSUMED_SETTLEMENT_DAYS, DEFAULT_FORECAST_TRANSFER_LAG_DAYS,
};

const DEFAULT_DIR_NAME: &str = ".cashflow_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_HORIZON_DAYS: u32 = 90;

/// Per-run projection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Balance that discretionary spending must never cut into.
    #[serde(default)]
    pub reserve_amount: Decimal,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default)]
    pub exclude_today_events: bool,
    /// Seed from the available balance (net of holds) instead of the ledger balance.
    #[serde(default = "default_true")]
    pub use_available_balance: bool,
    #[serde(default = "default_assumed_settlement_days")]
    pub assumed_settlement_days: u32,
    #[serde(default = "default_forecast_transfer_lag_days")]
    pub forecast_transfer_lag_days: u32,
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

fn default_true() -> bool {
    true
}

fn default_assumed_settlement_days() -> u32 {
    DEFAULT_ASSUMED_SETTLEMENT_DAYS
}

fn default_forecast_transfer_lag_days() -> u32 {
    DEFAULT_FORECAST_TRANSFER_LAG_DAYS
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            reserve_amount: Decimal::ZERO,
            horizon_days: DEFAULT_HORIZON_DAYS,
            exclude_today_events: false,
            use_available_balance: true,
            assumed_settlement_days: DEFAULT_ASSUMED_SETTLEMENT_DAYS,
            forecast_transfer_lag_days: DEFAULT_FORECAST_TRANSFER_LAG_DAYS,
        }
    }
}

impl ProjectionConfig {
    pub fn with_reserve(mut self, reserve_amount: Decimal) -> Self {
        self.reserve_amount = reserve_amount;
        self
    }

    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(ProjectionError::InvalidInput(
                "horizon_days must be greater than zero".into(),
            ));
        }
        if self.reserve_amount < Decimal::ZERO {
            return Err(ProjectionError::InvalidInput(format!(
                "reserve_amount must not be negative (got {})",
                self.reserve_amount
            )));
        }
        Ok(())
    }

    pub fn payout_timing(&self) -> PayoutTiming {
        PayoutTiming {
            assumed_settlement_days: self.assumed_settlement_days,
            forecast_transfer_lag_days: self.forecast_transfer_lag_days,
        }
    }
}

/// Loads and stores [`ProjectionConfig`] as JSON under the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `CASHFLOW_CORE_HOME` when set, `~/.cashflow_core` otherwise.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored config, falling back to defaults when none exists yet.
    pub fn load(&self) -> Result<ProjectionConfig> {
        if !self.path.exists() {
            return Ok(ProjectionConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ProjectionConfig = serde_json::from_str(&data)
            .map_err(|err| ProjectionError::ConfigError(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ProjectionConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("CASHFLOW_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
