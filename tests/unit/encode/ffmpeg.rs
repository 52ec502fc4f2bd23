use super::*;

#[test]
fn config_rejects_zero_and_odd_sizes() {
    assert!(VideoConfig::new("out.mp4", 0, 10, 30).validate().is_err());
    assert!(VideoConfig::new("out.mp4", 11, 10, 30).validate().is_err());
    assert!(VideoConfig::new("out.mp4", 10, 10, 0).validate().is_err());
    assert!(VideoConfig::new("out.mp4", 1200, 800, 30).validate().is_ok());
}

#[test]
fn args_describe_raw_rgba_input_and_end_with_output() {
    let mut cfg = VideoConfig::new("target/out.mp4", 64, 32, 25);
    let args = cfg.ffmpeg_args();
    assert_eq!(args.first().map(String::as_str), Some("-y"));
    assert_eq!(args.last().map(String::as_str), Some("target/out.mp4"));
    let joined = args.join(" ");
    assert!(joined.contains("-s 64x32"));
    assert!(joined.contains("-r 25"));
    assert!(joined.contains("-c:v libx264"));

    cfg.overwrite = false;
    assert_eq!(cfg.ffmpeg_args()[0], "-n");
}

#[test]
fn flatten_composites_over_background() {
    let bg = Rgba8::rgb(255, 255, 255);
    let mut dst = [0u8; 8];
    // Opaque red, then half-transparent black (premultiplied).
    let src = [255, 0, 0, 255, 0, 0, 0, 128];
    flatten_onto(&mut dst, &src, true, bg).unwrap();
    assert_eq!(&dst[..4], &[255, 0, 0, 255]);
    assert_eq!(&dst[4..], &[127, 127, 127, 255]);
}

#[test]
fn flatten_handles_straight_alpha() {
    let bg = Rgba8::rgb(0, 0, 0);
    let mut dst = [0u8; 4];
    flatten_onto(&mut dst, &[200, 100, 0, 0], false, bg).unwrap();
    assert_eq!(dst, [0, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    let err = flatten_onto(&mut dst, &[0u8; 4], true, Rgba8::rgb(0, 0, 0)).unwrap_err();
    assert!(matches!(err, SankeyError::Encode(_)));
}
