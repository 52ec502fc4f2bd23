//! Animated Sankey diagram of national energy flows, one frame per year.
//!
//! A dataset of yearly [`EnergyRecord`]s is aggregated into per-year [`YearTotals`], laid out into
//! flow geometry ([`GraphData`]) for every year up front, and projected onto an injected
//! [`RenderSurface`]. [`EnergySankey`] owns playback: year navigation, timed auto-advance and the
//! numeric transitions between years.
//!
//! - Load and validate records into a [`DataStore`]
//! - Create an [`EnergySankey`] over any [`RenderSurface`] ([`SvgSurface`] ships with the crate)
//! - Drive it with `set_year`/`play`/`pause` and advance its clock with `advance`
//!
//! The layout layer ([`Totals`], [`FlowGeometry`]) is pure and usable without any surface.
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod data;
pub mod encode;
pub mod events;
pub mod foundation;
pub mod layout;
pub mod pipeline;
pub mod playback;
pub mod render;

pub use crate::animation::{
    ease::Ease,
    tween::{AttrKey, Lerp, TransitionEngine, Tween},
};
pub use crate::config::{
    catalog::{Catalog, Fuel, FuelMap, Sector, SectorMap},
    constants::SCALE,
    options::SankeyOptions,
};
pub use crate::data::{
    dsl::RecordBuilder,
    record::EnergyRecord,
    store::{DataStore, Milestone},
};
pub use crate::encode::ffmpeg::{FfmpegEncoder, VideoConfig, is_ffmpeg_on_path};
pub use crate::events::bus::{
    EventBus, EventKind, SankeyEvent, StopReason, SubscriptionId,
};
pub use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{SankeyError, SankeyResult};
pub use crate::layout::{
    geometry::{FlowGeometry, FlowId, GraphData, GraphStroke},
    totals::{Totals, YearTotals},
};
pub use crate::pipeline::{
    ExportStats, render_playback_mp4, render_year_png, render_year_svg,
};
pub use crate::playback::{
    controller::{EnergySankey, PlaybackState},
    event_loop::{EventLoop, TimerId},
};
pub use crate::render::{
    projection::Projection,
    raster::{FrameRGBA, Rasterizer},
    surface::{Attr, Primitive, PrimitiveId, RenderSurface, Tooltip},
    svg::SvgSurface,
};
