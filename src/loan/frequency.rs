//! Payment frequency for the periodic view of a schedule

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How months are grouped for display and installment scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    /// One month per period
    #[default]
    Monthly,
    /// Three months per period
    Quarterly,
    /// Six months per period
    HalfYearly,
}

impl Frequency {
    /// Number of underlying months in one period
    pub fn months_per_period(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::HalfYearly => 6,
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        12 / self.months_per_period()
    }

    /// Short installment label (equated monthly/quarterly/half-yearly installment)
    pub fn installment_label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "EMI",
            Frequency::Quarterly => "EQI",
            Frequency::HalfYearly => "EHI",
        }
    }

    pub fn period_noun(&self) -> &'static str {
        match self {
            Frequency::Monthly => "per month",
            Frequency::Quarterly => "per quarter",
            Frequency::HalfYearly => "per half-year",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::HalfYearly => "half-yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "half-yearly" | "halfyearly" | "half_yearly" => Ok(Frequency::HalfYearly),
            other => Err(format!("unknown frequency: {}", other)),
        }
    }
}
