use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Interest compounding frequency for fixed-income holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compounding {
    Annually,
    Monthly,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionCadence {
    Monthly,
    Annually,
}

/// Scheduled top-up into a holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub amount: f64,
    pub cadence: ContributionCadence,
}

/// A manually tracked holding.
///
/// `rate`, `compounding` and `contribution` are recorded for reference only; the
/// projection engine works from [`Asset::current_value`] totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub total_cost: f64,
    pub current_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compounding: Option<Compounding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution: Option<Contribution>,
    #[serde(default)]
    pub note: String,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(name: impl Into<String>, total_cost: f64, current_value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: String::new(),
            total_cost,
            current_value,
            rate: None,
            compounding: None,
            contribution: None,
            note: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn profit(&self) -> f64 {
        self.current_value - self.total_cost
    }

    /// Profit relative to cost, `None` when nothing was invested.
    pub fn profit_ratio(&self) -> Option<f64> {
        (self.total_cost != 0.0).then(|| self.profit() / self.total_cost)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Asset creation payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAsset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub compounding: Option<Compounding>,
    #[serde(default)]
    pub contribution: Option<Contribution>,
    #[serde(default)]
    pub note: Option<String>,
}
