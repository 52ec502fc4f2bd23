use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(
        Canvas::new(1200, 800).unwrap(),
        Canvas {
            width: 1200,
            height: 800
        }
    );
}

#[test]
fn rgba_hex_is_lowercase_six_digits() {
    assert_eq!(Rgba8::rgb(255, 0, 16).to_hex(), "#ff0010");
    assert_eq!(Rgba8::rgb(1, 2, 3).alpha_f64(), 1.0);
}
