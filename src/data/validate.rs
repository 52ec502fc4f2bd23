//! Strict conversion of loosely-typed JSON records into [`EnergyRecord`]s.

use std::collections::BTreeSet;

use crate::{
    config::catalog::{Catalog, Fuel, FuelMap, SectorMap},
    data::record::{EnergyRecord, SectorBreakdown},
    foundation::error::{SankeyError, SankeyResult},
};

/// Validate raw records and return them sorted by year together with the detected catalog.
///
/// Every active fuel (plus `waste`) must be an object carrying every active sector as a finite,
/// non-negative number. Heat is detected from the first record in input order and is then
/// required everywhere.
#[tracing::instrument(skip(raw), fields(records = raw.len()))]
pub fn validate_records(raw: &[serde_json::Value]) -> SankeyResult<(Vec<EnergyRecord>, Catalog)> {
    let Some(first) = raw.first() else {
        return Err(SankeyError::validation("dataset must contain at least one record"));
    };
    let catalog = Catalog::new(first.get(Fuel::Heat.key()).is_some());

    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(raw.len());
    for (idx, value) in raw.iter().enumerate() {
        let record = validate_record(value, catalog)
            .map_err(|e| SankeyError::validation(format!("record #{idx}: {e}")))?;
        if !seen.insert(record.year) {
            return Err(SankeyError::validation(format!(
                "record #{idx}: duplicate year {}",
                record.year
            )));
        }
        records.push(record);
    }

    records.sort_by_key(|r| r.year);
    Ok((records, catalog))
}

fn validate_record(value: &serde_json::Value, catalog: Catalog) -> Result<EnergyRecord, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "record must be a JSON object".to_string())?;

    let year = obj
        .get("year")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| "missing or non-integer 'year'".to_string())?;
    let year = i32::try_from(year).map_err(|_| format!("year {year} out of range"))?;

    if !catalog.heat && obj.contains_key(Fuel::Heat.key()) {
        return Err(format!(
            "year {year}: 'heat' present but absent from the first record"
        ));
    }

    let mut flows = FuelMap::<SectorBreakdown>::default();
    for fuel in catalog.input_fuels() {
        flows[fuel] = validate_breakdown(obj.get(fuel.key()), fuel, catalog)
            .map_err(|e| format!("year {year}: {e}"))?;
    }

    let milestone = match obj.get("milestone") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(format!("year {year}: 'milestone' must be a string")),
    };

    let population = match obj.get("population") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => match v.as_f64() {
            Some(p) if p.is_finite() && p > 0.0 => Some(p),
            _ => return Err(format!("year {year}: 'population' must be a positive number")),
        },
    };

    let mut record = EnergyRecord::new(year, flows);
    record.milestone = milestone;
    record.population = population;
    Ok(record)
}

fn validate_breakdown(
    value: Option<&serde_json::Value>,
    fuel: Fuel,
    catalog: Catalog,
) -> Result<SectorBreakdown, String> {
    let obj = value
        .ok_or_else(|| format!("missing fuel '{}'", fuel.key()))?
        .as_object()
        .ok_or_else(|| format!("fuel '{}' must be an object", fuel.key()))?;

    let mut out = SectorMap::<f64>::default();
    for sector in catalog.sectors() {
        let v = obj
            .get(sector.key())
            .ok_or_else(|| format!("missing '{}.{}'", fuel.key(), sector.key()))?
            .as_f64()
            .ok_or_else(|| format!("'{}.{}' must be a number", fuel.key(), sector.key()))?;
        if !v.is_finite() || v < 0.0 {
            return Err(format!(
                "'{}.{}' must be finite and >= 0, got {v}",
                fuel.key(),
                sector.key()
            ));
        }
        out[sector] = v;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/data/validate.rs"]
mod tests;
