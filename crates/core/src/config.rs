use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Tax and rebate deduction applied to every bid unless the bid carries its own rate.
pub const DEFAULT_TAX_AND_REBATE_RATE: Decimal = dec!(0.20);

/// Divisor used by the dashboard to show amounts in units of ten thousand.
pub const DEFAULT_DISPLAY_UNIT_DIVISOR: Decimal = dec!(10000);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub calibration: CalibrationConfig,
    pub report: ReportConfig,
    pub narrative: NarrativeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Fallback tax and rebate rate (as decimal, e.g., 0.20 for 20%).
    pub tax_and_rebate_rate: Decimal,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            tax_and_rebate_rate: DEFAULT_TAX_AND_REBATE_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Amounts are divided by this before display.
    pub display_unit_divisor: Decimal,
    pub display_unit_label: String,
    pub currency_symbol: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            display_unit_divisor: DEFAULT_DISPLAY_UNIT_DIVISOR,
            display_unit_label: "x10k".to_string(),
            currency_symbol: "¥".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// Base URL of the generative-text API.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}
