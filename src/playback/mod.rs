//! Playback state machine on a virtual clock.

pub mod controller;
pub mod event_loop;
