use crate::config::catalog::{Fuel, FuelMap, Sector, SectorMap};

/// Quantities one fuel delivers to each sector, in dataset energy units.
pub type SectorBreakdown = SectorMap<f64>;

/// One validated year of the dataset. Immutable once built.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EnergyRecord {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    /// Enables the per-capita readout when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    #[serde(flatten)]
    flows: FuelMap<SectorBreakdown>,
}

impl EnergyRecord {
    pub fn new(year: i32, flows: FuelMap<SectorBreakdown>) -> Self {
        Self {
            year,
            milestone: None,
            population: None,
            flows,
        }
    }

    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        self.milestone = Some(milestone.into());
        self
    }

    pub fn with_population(mut self, population: f64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn value(&self, fuel: Fuel, sector: Sector) -> f64 {
        self.flows[fuel][sector]
    }

    pub fn breakdown(&self, fuel: Fuel) -> &SectorBreakdown {
        &self.flows[fuel]
    }
}
