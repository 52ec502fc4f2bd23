use super::*;
use crate::data::dsl::RecordBuilder;

fn store(years: &[i32]) -> DataStore {
    let records = years
        .iter()
        .map(|y| {
            RecordBuilder::new(*y)
                .flow(Fuel::Coal, Sector::Industrial, f64::from(*y - 1900))
                .build()
                .unwrap()
        })
        .collect();
    DataStore::from_records(records, Catalog::default()).unwrap()
}

#[test]
fn records_are_sorted_and_bounded() {
    let s = store(&[1952, 1950, 1951]);
    assert_eq!(s.years(), vec![1950, 1951, 1952]);
    assert_eq!(s.first_year(), 1950);
    assert_eq!(s.last_year(), 1952);
    assert_eq!(s.len(), 3);
}

#[test]
fn index_lookup_round_trips() {
    let s = store(&[1800, 1850, 1900, 1950]);
    for i in 0..s.len() {
        let year = s.record_by_index(i).unwrap().year;
        assert_eq!(s.year_index(year), Some(i));
    }
    assert_eq!(s.year_index(1851), None);
    assert!(s.record_by_index(4).is_none());
    assert!(!s.contains_year(2022));
}

#[test]
fn rejects_empty_and_duplicates() {
    assert!(DataStore::from_records(vec![], Catalog::default()).is_err());
    let a = RecordBuilder::new(1950).build().unwrap();
    let b = RecordBuilder::new(1950).build().unwrap();
    assert!(DataStore::from_records(vec![a, b], Catalog::default()).is_err());
}

#[test]
fn rejects_heat_quantities_without_heat_catalog() {
    let r = RecordBuilder::new(1950)
        .flow(Fuel::Gas, Sector::Heat, 3.0)
        .build()
        .unwrap();
    assert!(DataStore::from_records(vec![r.clone()], Catalog::default()).is_err());
    assert!(DataStore::from_records(vec![r], Catalog::new(true)).is_ok());
}

#[test]
fn milestones_carry_year_and_index() {
    let records = vec![
        RecordBuilder::new(1900).build().unwrap(),
        RecordBuilder::new(1950).milestone("Post-war boom").build().unwrap(),
    ];
    let s = DataStore::from_records(records, Catalog::default()).unwrap();
    let m = s.milestones();
    assert_eq!(m.len(), 1);
    assert_eq!(m[0].year, 1950);
    assert_eq!(m[0].index, 1);
    assert_eq!(m[0].text, "Post-war boom");
}
