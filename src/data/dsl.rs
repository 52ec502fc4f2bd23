use crate::{
    config::catalog::{Fuel, FuelMap, Sector},
    data::record::{EnergyRecord, SectorBreakdown},
    foundation::error::{SankeyError, SankeyResult},
};

/// Programmatic construction of [`EnergyRecord`]s; unspecified quantities are zero.
pub struct RecordBuilder {
    year: i32,
    milestone: Option<String>,
    population: Option<f64>,
    flows: FuelMap<SectorBreakdown>,
}

impl RecordBuilder {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            milestone: None,
            population: None,
            flows: FuelMap::default(),
        }
    }

    pub fn flow(mut self, fuel: Fuel, sector: Sector, value: f64) -> Self {
        self.flows[fuel][sector] = value;
        self
    }

    pub fn milestone(mut self, text: impl Into<String>) -> Self {
        self.milestone = Some(text.into());
        self
    }

    pub fn population(mut self, population: f64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn build(self) -> SankeyResult<EnergyRecord> {
        for (fuel, breakdown) in self.flows.iter() {
            for (sector, v) in breakdown.iter() {
                if !v.is_finite() || *v < 0.0 {
                    return Err(SankeyError::validation(format!(
                        "year {}: '{}.{}' must be finite and >= 0",
                        self.year,
                        fuel.key(),
                        sector.key()
                    )));
                }
            }
        }
        let mut record = EnergyRecord::new(self.year, self.flows);
        record.milestone = self.milestone;
        record.population = self.population;
        Ok(record)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dsl.rs"]
mod tests;
