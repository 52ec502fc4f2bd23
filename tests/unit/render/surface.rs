use super::*;

#[test]
fn numbers_get_thousands_separators() {
    assert_eq!(format_number(0.0, 0), "0");
    assert_eq!(format_number(999.0, 0), "999");
    assert_eq!(format_number(1234.5, 1), "1,234.5");
    assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    assert_eq!(format_number(-1234.0, 0), "-1,234");
    assert_eq!(format_number(-0.0001, 2), "0.00");
}

#[test]
fn text_content_joins_caption_and_value() {
    let t = TextPrimitive::new(0.0, 0.0, "Residential").with_value(1500.0, 0);
    assert_eq!(t.content(), "Residential 1,500");
    let year = TextPrimitive::new(0.0, 0.0, "")
        .with_value(1950.4, 0)
        .ungrouped();
    assert_eq!(year.content(), "1950");
    let plain = TextPrimitive::new(0.0, 0.0, "Energy flows");
    assert_eq!(plain.content(), "Energy flows");
}
