use serde_json::{Value, json};

use super::*;
use crate::config::catalog::Sector;

fn breakdown(v: f64) -> Value {
    json!({ "elec": v, "res": v, "ag": v, "indus": v, "trans": v })
}

fn breakdown_with_heat(v: f64) -> Value {
    json!({ "elec": v, "heat": v, "res": v, "ag": v, "indus": v, "trans": v })
}

fn record(year: i64, heat: bool) -> Value {
    let mut obj = serde_json::Map::new();
    obj.insert("year".into(), json!(year));
    for fuel in Catalog::new(heat).input_fuels() {
        let b = if heat {
            breakdown_with_heat(1.0)
        } else {
            breakdown(1.0)
        };
        obj.insert(fuel.key().into(), b);
    }
    Value::Object(obj)
}

#[test]
fn accepts_complete_records_and_sorts_by_year() {
    let raw = vec![record(1952, false), record(1950, false), record(1951, false)];
    let (records, catalog) = validate_records(&raw).unwrap();
    assert!(!catalog.heat);
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![1950, 1951, 1952]);
    assert_eq!(records[0].value(Fuel::Gas, Sector::Residential), 1.0);
}

#[test]
fn rejects_empty_dataset() {
    assert!(validate_records(&[]).is_err());
}

#[test]
fn rejects_missing_sector_key() {
    let mut r = record(1950, false);
    r["coal"].as_object_mut().unwrap().remove("indus");
    let err = validate_records(&[r]).unwrap_err().to_string();
    assert!(err.contains("coal.indus"), "{err}");
}

#[test]
fn rejects_missing_waste_block() {
    let mut r = record(1950, false);
    r.as_object_mut().unwrap().remove("waste");
    assert!(validate_records(&[r]).is_err());
}

#[test]
fn rejects_non_numeric_and_negative_values() {
    let mut r = record(1950, false);
    r["gas"]["res"] = json!("lots");
    assert!(validate_records(&[r]).is_err());

    let mut r = record(1950, false);
    r["gas"]["res"] = json!(-1.0);
    assert!(validate_records(&[r]).is_err());
}

#[test]
fn rejects_duplicate_years() {
    let raw = vec![record(1950, false), record(1950, false)];
    let err = validate_records(&raw).unwrap_err().to_string();
    assert!(err.contains("duplicate year"), "{err}");
}

#[test]
fn heat_is_all_or_nothing() {
    let (_, catalog) = validate_records(&[record(1950, true), record(1951, true)]).unwrap();
    assert!(catalog.heat);

    assert!(validate_records(&[record(1950, true), record(1951, false)]).is_err());
    assert!(validate_records(&[record(1950, false), record(1951, true)]).is_err());
}

#[test]
fn optional_fields_are_parsed() {
    let mut r = record(1950, false);
    r["milestone"] = json!("Interstate highways");
    r["population"] = json!(151_000_000.0);
    let (records, _) = validate_records(&[r]).unwrap();
    assert_eq!(records[0].milestone.as_deref(), Some("Interstate highways"));
    assert_eq!(records[0].population, Some(151_000_000.0));

    let mut r = record(1950, false);
    r["population"] = json!(0);
    assert!(validate_records(&[r]).is_err());
}
