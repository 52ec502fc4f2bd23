use super::*;

#[test]
fn unset_flows_default_to_zero() {
    let r = RecordBuilder::new(1960)
        .flow(Fuel::Coal, Sector::Industrial, 12.5)
        .build()
        .unwrap();
    assert_eq!(r.year, 1960);
    assert_eq!(r.value(Fuel::Coal, Sector::Industrial), 12.5);
    assert_eq!(r.value(Fuel::Gas, Sector::Residential), 0.0);
    assert!(r.milestone.is_none());
    assert!(r.population.is_none());
}

#[test]
fn later_flow_overrides_earlier() {
    let r = RecordBuilder::new(1960)
        .flow(Fuel::Gas, Sector::Residential, 1.0)
        .flow(Fuel::Gas, Sector::Residential, 2.0)
        .milestone("first pipeline")
        .population(180.0)
        .build()
        .unwrap();
    assert_eq!(r.value(Fuel::Gas, Sector::Residential), 2.0);
    assert_eq!(r.milestone.as_deref(), Some("first pipeline"));
    assert_eq!(r.population, Some(180.0));
}

#[test]
fn negative_or_nan_flows_are_rejected() {
    let err = RecordBuilder::new(1960)
        .flow(Fuel::Petroleum, Sector::Transportation, -1.0)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("petro.trans"), "{err}");

    assert!(
        RecordBuilder::new(1960)
            .flow(Fuel::Wind, Sector::Electricity, f64::NAN)
            .build()
            .is_err()
    );
}
