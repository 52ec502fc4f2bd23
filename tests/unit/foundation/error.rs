use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SankeyError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SankeyError::navigation("x")
            .to_string()
            .contains("navigation error:")
    );
    assert!(SankeyError::render("x").to_string().contains("render error:"));
    assert!(SankeyError::encode("x").to_string().contains("encode error:"));
    assert!(
        SankeyError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SankeyError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: SankeyError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, SankeyError::Serde(_)));
}
