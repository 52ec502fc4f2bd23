pub mod ease;
/// Per-attribute tweens toward per-year targets.
pub mod tween;
