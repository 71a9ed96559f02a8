use serde::{Deserialize, Serialize};

use crate::ledger::Month;

/// Projection request as received at the boundary; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionRequest {
    #[serde(default)]
    pub years: Option<i64>,
    #[serde(default)]
    pub annual_return: Option<f64>,
    #[serde(default)]
    pub start_value: Option<f64>,
    #[serde(default)]
    pub start_month: Option<String>,
}

/// Resolved parameters echoed back with the projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub years: u32,
    pub annual_return: f64,
    pub start_value: f64,
    pub start_month: Month,
}

impl ProjectionParams {
    /// Simulated horizon in months, never less than one.
    pub fn months(&self) -> u32 {
        self.years.saturating_mul(12).max(1)
    }
}

/// End-of-month state of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: Month,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub wealth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub params: ProjectionParams,
    pub points: Vec<ProjectionPoint>,
}

impl Projection {
    pub fn final_wealth(&self) -> f64 {
        self.points
            .last()
            .map(|point| point.wealth)
            .unwrap_or(self.params.start_value)
    }
}
