use super::*;

#[test]
fn defaults_match_documented_values() {
    let o = SankeyOptions::default();
    assert_eq!(o.animation_speed, 200);
    assert!(o.show_waste_heat);
    assert!(!o.auto_play);
    assert!(!o.loop_animation);
    o.validate().unwrap();
}

#[test]
fn json_uses_camel_case_and_fills_defaults() {
    let o = SankeyOptions::from_json_str(
        r#"{ "country": "Atlantis", "animationSpeed": 50, "loopAnimation": true }"#,
    )
    .unwrap();
    assert_eq!(o.country, "Atlantis");
    assert_eq!(o.animation_speed, 50);
    assert!(o.loop_animation);
    assert_eq!(o.width, 1200);
}

#[test]
fn zero_speed_and_empty_canvas_are_rejected() {
    assert!(SankeyOptions::from_json_str(r#"{ "animationSpeed": 0 }"#).is_err());
    assert!(SankeyOptions::from_json_str(r#"{ "width": 0 }"#).is_err());
}

#[test]
fn transition_is_a_fixed_fraction_of_the_interval() {
    assert!((transition_ms(200) - 180.0).abs() < 1e-9);
}
