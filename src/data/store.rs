use std::io::Read;

use anyhow::Context as _;

use crate::{
    config::catalog::{Catalog, Fuel, Sector},
    data::{record::EnergyRecord, validate::validate_records},
    foundation::error::{SankeyError, SankeyResult},
};

/// A year that carries descriptive text in the dataset.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Milestone {
    pub year: i32,
    pub index: usize,
    pub text: String,
}

/// Chronologically sorted, immutable dataset.
#[derive(Clone, Debug)]
pub struct DataStore {
    records: Vec<EnergyRecord>,
    catalog: Catalog,
}

impl DataStore {
    /// Build a store from already-typed records.
    ///
    /// Records are sorted by year; empty input, duplicate years and heat quantities in a
    /// heat-less catalog are rejected.
    pub fn from_records(mut records: Vec<EnergyRecord>, catalog: Catalog) -> SankeyResult<Self> {
        if records.is_empty() {
            return Err(SankeyError::validation(
                "dataset must contain at least one record",
            ));
        }
        records.sort_by_key(|r| r.year);
        if let Some(w) = records.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(SankeyError::validation(format!(
                "duplicate year {}",
                w[0].year
            )));
        }
        if !catalog.heat {
            for r in &records {
                let heat_used = Sector::ALL.iter().any(|s| r.value(Fuel::Heat, *s) != 0.0)
                    || Fuel::ALL.iter().any(|f| r.value(*f, Sector::Heat) != 0.0);
                if heat_used {
                    return Err(SankeyError::validation(format!(
                        "year {}: heat quantities present but heat is disabled",
                        r.year
                    )));
                }
            }
        }
        Ok(Self { records, catalog })
    }

    pub fn from_json_values(raw: &[serde_json::Value]) -> SankeyResult<Self> {
        let (records, catalog) = validate_records(raw)?;
        Self::from_records(records, catalog)
    }

    pub fn from_json_str(s: &str) -> SankeyResult<Self> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(s)?;
        Self::from_json_values(&raw)
    }

    pub fn from_reader(r: impl Read) -> SankeyResult<Self> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_reader(r).context("parse energy dataset JSON")?;
        Self::from_json_values(&raw)
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn first_year(&self) -> i32 {
        self.records[0].year
    }

    pub fn last_year(&self) -> i32 {
        self.records[self.records.len() - 1].year
    }

    pub fn year_index(&self, year: i32) -> Option<usize> {
        self.records.binary_search_by_key(&year, |r| r.year).ok()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.year_index(year).is_some()
    }

    pub fn record_by_index(&self, index: usize) -> Option<&EnergyRecord> {
        self.records.get(index)
    }

    pub fn record_by_year(&self, year: i32) -> Option<&EnergyRecord> {
        self.year_index(year).map(|i| &self.records[i])
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(index, r)| {
                r.milestone.as_ref().map(|text| Milestone {
                    year: r.year,
                    index,
                    text: text.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/store.rs"]
mod tests;
