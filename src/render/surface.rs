//! The drawing capability the visualization is given.
//!
//! The layout core never touches a surface; only [`crate::Projection`] and the transition engine
//! do, through this trait. Hosts plug in whatever scene graph they have (DOM, canvas, a test
//! recorder); [`crate::SvgSurface`] is the in-crate implementation.

use crate::{
    config::catalog::{Fuel, Sector},
    foundation::core::{BezPath, Rect, Rgba8},
    layout::geometry::FlowId,
};

/// Stable identity of a drawable element across years.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PrimitiveId {
    /// Rectangle of an end-use sector or hub box.
    Box(Sector),
    /// Name and total of a box.
    BoxLabel(Sector),
    /// Waste heat delivered into an end-use sector.
    WasteLabel(Sector),
    /// Left-column fuel name and total.
    FuelLabel(Fuel),
    Flow(FlowId),
    Title,
    YearLabel,
    TotalLabel,
    PerCapitaLabel,
    MilestoneLabel,
}

/// Numeric attributes the transition engine can drive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Attr {
    X,
    Y,
    Width,
    Height,
    StrokeWidth,
    Opacity,
    /// Numeric part of a text label.
    Value,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub fill: Rgba8,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlowPrimitive {
    pub path: BezPath,
    pub stroke_width: f64,
    pub color: Rgba8,
    pub opacity: f64,
}

/// A label made of a fixed caption and an optional animated number.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPrimitive {
    pub x: f64,
    pub y: f64,
    pub caption: String,
    pub value: Option<f64>,
    pub decimals: usize,
    /// Insert thousands separators into the number.
    pub grouped: bool,
    pub size: f64,
    pub anchor: TextAnchor,
    pub color: Rgba8,
    pub opacity: f64,
}

impl TextPrimitive {
    pub fn new(x: f64, y: f64, caption: impl Into<String>) -> Self {
        Self {
            x,
            y,
            caption: caption.into(),
            value: None,
            decimals: 0,
            grouped: true,
            size: 12.0,
            anchor: TextAnchor::Start,
            color: crate::config::constants::TEXT_COLOR,
            opacity: 1.0,
        }
    }

    pub fn with_value(mut self, value: f64, decimals: usize) -> Self {
        self.value = Some(value);
        self.decimals = decimals;
        self
    }

    /// Plain digits, for years.
    pub fn ungrouped(mut self) -> Self {
        self.grouped = false;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Displayed string: caption and number separated by a space.
    pub fn content(&self) -> String {
        let Some(v) = self.value else {
            return self.caption.clone();
        };
        let number = if self.grouped {
            format_number(v, self.decimals)
        } else {
            format!("{:.*}", self.decimals, v)
        };
        if self.caption.is_empty() {
            number
        } else {
            format!("{} {number}", self.caption)
        }
    }
}

/// Fixed-point rendering with thousands separators.
pub fn format_number(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value.abs());
    let (int, frac) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && s.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Rect(RectPrimitive),
    Flow(FlowPrimitive),
    Text(TextPrimitive),
}

/// Hover payload for a single flow.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tooltip {
    pub flow: FlowId,
    pub value: f64,
    pub text: String,
}

/// Scene graph operations needed by the projection and the transition engine.
pub trait RenderSurface {
    /// Add a primitive, replacing any existing one with the same id.
    fn create(&mut self, id: PrimitiveId, primitive: Primitive);

    /// Set a numeric attribute. Attributes a primitive does not have are ignored.
    fn set_attr(&mut self, id: PrimitiveId, attr: Attr, value: f64);

    /// Currently displayed value of a numeric attribute.
    fn attr(&self, id: PrimitiveId, attr: Attr) -> Option<f64>;

    fn set_path(&mut self, id: PrimitiveId, path: &BezPath);

    /// Replace the caption of a text primitive.
    fn set_caption(&mut self, id: PrimitiveId, caption: &str);

    fn set_visible(&mut self, id: PrimitiveId, visible: bool);

    fn set_tooltip(&mut self, tooltip: Option<Tooltip>);

    /// Drop every primitive.
    fn clear(&mut self);
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
