use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    render::surface::{Attr, PrimitiveId, RenderSurface},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for crate::foundation::core::Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

/// One animated attribute of one primitive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AttrKey {
    pub id: PrimitiveId,
    pub attr: Attr,
}

impl AttrKey {
    pub fn new(id: PrimitiveId, attr: Attr) -> Self {
        Self { id, attr }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl<T: Lerp + Clone> Tween<T> {
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_ms: f64) -> T {
        let t = self.ease.apply(self.progress(now_ms));
        T::lerp(&self.from, &self.to, t)
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

#[derive(Clone, Debug)]
struct Track {
    /// Last value written to the surface.
    shown: f64,
    tween: Option<Tween<f64>>,
}

impl Track {
    fn current(&self, now_ms: f64) -> f64 {
        self.tween.map_or(self.shown, |t| t.sample(now_ms))
    }

    fn target(&self) -> f64 {
        self.tween.map_or(self.shown, |t| t.to)
    }
}

/// Drives numeric surface attributes toward per-year targets.
///
/// Every `retarget` call starts its tweens at the same instant with the same duration. A track
/// holds at most one tween, so a new call replaces an in-flight one and starts from whatever the
/// old tween would show at that instant.
#[derive(Clone, Debug, Default)]
pub struct TransitionEngine {
    ease: Ease,
    tracks: BTreeMap<AttrKey, Track>,
}

impl TransitionEngine {
    pub fn new(ease: Ease) -> Self {
        Self {
            ease,
            tracks: BTreeMap::new(),
        }
    }

    /// Record a value that is already on the surface, cancelling any tween on it.
    pub fn seed(&mut self, key: AttrKey, value: f64) {
        self.tracks.insert(
            key,
            Track {
                shown: value,
                tween: None,
            },
        );
    }

    /// Start a transition for every `(key, target)` pair. Unknown keys start at their target.
    ///
    /// Returns the number of tweens started.
    pub fn retarget(
        &mut self,
        now_ms: f64,
        duration_ms: f64,
        targets: impl IntoIterator<Item = (AttrKey, f64)>,
    ) -> usize {
        let mut started = 0;
        for (key, to) in targets {
            let track = self.tracks.entry(key).or_insert(Track {
                shown: to,
                tween: None,
            });
            let from = track.current(now_ms);
            track.shown = from;
            track.tween = Some(Tween {
                from,
                to,
                start_ms: now_ms,
                duration_ms: duration_ms.max(0.0),
                ease: self.ease,
            });
            started += 1;
        }
        started
    }

    /// Write the value of every running tween at `now_ms` to `surface`.
    ///
    /// Returns whether any tween is still running afterwards.
    pub fn step<S: RenderSurface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> bool {
        let mut running = false;
        for (key, track) in &mut self.tracks {
            let Some(tween) = track.tween else {
                continue;
            };
            let done = tween.is_done(now_ms);
            track.shown = if done { tween.to } else { tween.sample(now_ms) };
            surface.set_attr(key.id, key.attr, track.shown);
            if done {
                track.tween = None;
            } else {
                running = true;
            }
        }
        running
    }

    /// Jump every running tween to its end value.
    pub fn finish<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        for (key, track) in &mut self.tracks {
            if let Some(tween) = track.tween.take() {
                track.shown = tween.to;
                surface.set_attr(key.id, key.attr, tween.to);
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tracks.values().any(|t| t.tween.is_some())
    }

    /// Last value written for `key`.
    pub fn value(&self, key: AttrKey) -> Option<f64> {
        self.tracks.get(&key).map(|t| t.shown)
    }

    pub fn target(&self, key: AttrKey) -> Option<f64> {
        self.tracks.get(&key).map(Track::target)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
