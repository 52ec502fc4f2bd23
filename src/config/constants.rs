//! Geometric calibration and routing tables.
//!
//! These are part of the visual contract of the diagram: changing them changes every rendered
//! frame, so none of them is exposed as a user option.

use crate::config::catalog::{Catalog, Fuel, Sector};
use crate::foundation::core::{Point, Rgba8};

/// Energy units to pixels.
pub const SCALE: f64 = 0.02;

/// Diagonal steepness of every flow (rise over run), `sqrt(3)`, i.e. 60 degrees.
pub const SLOPE: f64 = 1.732_050_807_568_877_2;

/// Top of the left fuel column and of the first sector box.
pub const TOP_Y: f64 = 100.0;

/// X of the left fuel labels.
pub const LEFT_X: f64 = 10.0;

/// X where left-column flows start.
pub const LEFT_FLOW_X: f64 = 130.0;

/// Vertical gap between stacked fuel bands in the left column.
pub const LEFT_GAP: f64 = 20.0;

/// Left edge of the sector boxes.
pub const BOX_X: f64 = 1000.0;

pub const BOX_WIDTH: f64 = 120.0;

/// Vertical gap between consecutive sector boxes.
pub const BOX_GAP: f64 = 40.0;

/// Top-left anchor of the electricity hub box.
pub const ELEC_BOX: Point = Point::new(560.0, 140.0);

/// Top-left anchor of the heat hub box.
pub const HEAT_BOX: Point = Point::new(460.0, 40.0);

pub const HUB_WIDTH: f64 = 40.0;

/// Distance between a target's left edge and the first flow's turn into it.
pub const ANCHOR_OFFSET: f64 = 40.0;

/// Rightmost turn x of the end-use flow bundle after global spacing.
pub const RIGHT_MARGIN_X: f64 = BOX_X - ANCHOR_OFFSET;

/// Upper bound for the rounding applied at each bend of a flow.
pub const CORNER_RADIUS: f64 = 14.0;

/// Transition length as a fraction of the per-year playback interval.
pub const TRANSITION_FACTOR: f64 = 0.9;

pub const DEFAULT_SPEED_MS: u64 = 200;

pub const FLOW_OPACITY: f64 = 0.85;

/// Opacity of flows that do not belong to the hovered fuel.
pub const DIM_OPACITY: f64 = 0.1;

/// Sector-entry order of fuels. Electricity flows are followed directly by their waste clones.
pub const ARRIVAL_ORDER: [Fuel; Fuel::COUNT] = [
    Fuel::Electricity,
    Fuel::Waste,
    Fuel::Heat,
    Fuel::Solar,
    Fuel::Nuclear,
    Fuel::Hydro,
    Fuel::Wind,
    Fuel::Geothermal,
    Fuel::Gas,
    Fuel::Coal,
    Fuel::Biomass,
    Fuel::Petroleum,
];

/// Position of a (target, fuel) pair in the fan-out ordering of that target.
pub fn precedence(sector: Sector, fuel: Fuel) -> (usize, usize) {
    let rank = ARRIVAL_ORDER
        .iter()
        .position(|f| *f == fuel)
        .unwrap_or(ARRIVAL_ORDER.len());
    (sector.index(), rank)
}

const THERMAL_ROUTE: [Sector; 6] = [
    Sector::Heat,
    Sector::Electricity,
    Sector::Residential,
    Sector::Agricultural,
    Sector::Industrial,
    Sector::Transportation,
];

const DIRECT_ROUTE: [Sector; 6] = [
    Sector::Electricity,
    Sector::Heat,
    Sector::Residential,
    Sector::Agricultural,
    Sector::Industrial,
    Sector::Transportation,
];

/// Order in which one fuel's band is split across its targets, top to bottom.
///
/// Combustion fuels feed the heat hub first; everything else goes to electricity first. Self-loops
/// and categories missing from the catalog are removed.
pub fn route(fuel: Fuel, catalog: Catalog) -> Vec<Sector> {
    let table = match fuel {
        Fuel::Geothermal | Fuel::Gas | Fuel::Coal | Fuel::Biomass | Fuel::Petroleum => {
            &THERMAL_ROUTE
        }
        _ => &DIRECT_ROUTE,
    };
    table
        .iter()
        .copied()
        .filter(|s| catalog.has_sector(*s))
        .filter(|s| fuel.hub_sector() != Some(*s))
        .collect()
}

pub fn fuel_color(fuel: Fuel) -> Rgba8 {
    match fuel {
        Fuel::Electricity => Rgba8::rgb(0xe4, 0x9a, 0x2c),
        Fuel::Heat => Rgba8::rgb(0xd9, 0x5f, 0x3b),
        Fuel::Solar => Rgba8::rgb(0xf7, 0xd0, 0x2c),
        Fuel::Nuclear => Rgba8::rgb(0xc0, 0x39, 0x2b),
        Fuel::Hydro => Rgba8::rgb(0x2e, 0x86, 0xc1),
        Fuel::Wind => Rgba8::rgb(0x85, 0xc1, 0xe9),
        Fuel::Geothermal => Rgba8::rgb(0x8e, 0x5b, 0x3c),
        Fuel::Gas => Rgba8::rgb(0x48, 0xa9, 0xa6),
        Fuel::Coal => Rgba8::rgb(0x3d, 0x3d, 0x3d),
        Fuel::Biomass => Rgba8::rgb(0x5d, 0xa0, 0x4b),
        Fuel::Petroleum => Rgba8::rgb(0x6c, 0x3f, 0x8c),
        Fuel::Waste => Rgba8::rgb(0xb0, 0xb0, 0xb0),
    }
}

pub const BOX_COLOR: Rgba8 = Rgba8::rgb(0x33, 0x33, 0x33);

pub const TEXT_COLOR: Rgba8 = Rgba8::rgb(0x22, 0x22, 0x22);

#[cfg(test)]
#[path = "../../tests/unit/config/constants.rs"]
mod tests;
