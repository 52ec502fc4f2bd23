//! Flow geometry for every year of the dataset.
//!
//! Each flow is a horizontal run out of its source, a diagonal of fixed steepness ([`SLOPE`]) and
//! a horizontal run into its target:
//!
//! ```text
//!  a ──── b
//!          ╲
//!           ╲
//!            c ──── d
//! ```
//!
//! `a` and `d` come from stacking flows along their source and target edges. Only the x of the
//! turn (`c`, and with it `b`) is free; the passes below choose it so flows converging on one
//! box fan out instead of crossing.

use crate::{
    config::{
        catalog::{Catalog, Fuel, FuelMap, Sector, SectorMap},
        constants::{
            ANCHOR_OFFSET, BOX_X, CORNER_RADIUS, ELEC_BOX, HEAT_BOX, HUB_WIDTH, LEFT_FLOW_X,
            RIGHT_MARGIN_X, SCALE, SLOPE, precedence, route,
        },
    },
    data::{record::EnergyRecord, store::DataStore},
    foundation::core::{BezPath, Point},
    layout::totals::{Totals, YearTotals},
};

/// Identity of a flow across years.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FlowId {
    pub fuel: Fuel,
    pub sector: Sector,
}

/// One directed flow with its control geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GraphStroke {
    /// Column or hub the flow leaves from.
    pub source: Fuel,
    /// Styling tag. Equals `source` except for split waste-heat flows.
    pub fuel: Fuel,
    pub sector: Sector,
    pub value: f64,
    /// Always `value * SCALE`.
    pub stroke: f64,
    pub a: Point,
    pub b: Point,
    pub c: Point,
    pub d: Point,
    /// Turn point as placed by the per-target fan-out, before global spacing.
    pub cc: Point,
}

impl GraphStroke {
    fn new(source: Fuel, sector: Sector, value: f64, a: Point, d: Point) -> Self {
        let mut stroke = Self {
            source,
            fuel: source,
            sector,
            value,
            stroke: value * SCALE,
            a,
            b: a,
            c: d,
            d,
            cc: d,
        };
        stroke.set_turn_x(d.x - ANCHOR_OFFSET);
        stroke.cc = stroke.c;
        stroke
    }

    /// Waste-heat counterpart of an electricity delivery.
    ///
    /// Shares source, target and routing with `self`; only the quantity and the band it occupies
    /// differ. The fuel tag stays electricity until the split pass.
    fn waste_counterpart(&self, value: f64, a: Point, d: Point) -> Self {
        Self::new(self.source, self.sector, value, a, d)
    }

    pub fn id(&self) -> FlowId {
        FlowId {
            fuel: self.fuel,
            sector: self.sector,
        }
    }

    /// The flow rises toward its target.
    pub fn is_up(&self) -> bool {
        self.a.y > self.d.y
    }

    pub fn rise(&self) -> f64 {
        (self.d.y - self.a.y).abs()
    }

    /// Place the end of the diagonal at `x` and derive its start from the slope.
    fn set_turn_x(&mut self, x: f64) {
        let x = x.clamp(self.a.x, self.d.x.max(self.a.x));
        self.c = Point::new(x, self.d.y);
        self.b = Point::new((x - self.rise() / SLOPE).max(self.a.x), self.a.y);
    }

    /// Centre line of the flow, with each bend rounded.
    pub fn path(&self) -> BezPath {
        let pts = [self.a, self.b, self.c, self.d];
        let mut path = BezPath::new();
        path.move_to(self.a);
        for i in 1..3 {
            let (prev, corner, next) = (pts[i - 1], pts[i], pts[i + 1]);
            let v_in = corner - prev;
            let v_out = next - corner;
            let (len_in, len_out) = (v_in.hypot(), v_out.hypot());
            let r = CORNER_RADIUS.min(len_in / 2.0).min(len_out / 2.0);
            if r <= 1e-9 {
                path.line_to(corner);
                continue;
            }
            path.line_to(corner - v_in * (r / len_in));
            path.quad_to(corner, corner + v_out * (r / len_out));
        }
        path.line_to(self.d);
        path
    }
}

/// Space consumed along each source and target edge while stacking flows.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Offsets {
    pub sectors: SectorMap<f64>,
    pub fuels: FuelMap<f64>,
}

/// Everything needed to draw one year.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GraphData {
    pub year: i32,
    pub graph: Vec<GraphStroke>,
    pub totals: YearTotals,
    pub offsets: Offsets,
}

impl GraphData {
    pub fn stroke(&self, fuel: Fuel, sector: Sector) -> Option<&GraphStroke> {
        self.graph
            .iter()
            .find(|s| s.fuel == fuel && s.sector == sector)
    }
}

/// Left edge of a flow target.
pub fn target_left(sector: Sector) -> f64 {
    match sector {
        Sector::Electricity => ELEC_BOX.x,
        Sector::Heat => HEAT_BOX.x,
        _ => BOX_X,
    }
}

/// Start of a fuel's band: hub boxes emit from their right edge, everything else from the left
/// column at its stacked top.
pub fn source_anchor(fuel: Fuel, totals: &YearTotals) -> Point {
    match fuel {
        Fuel::Electricity => Point::new(ELEC_BOX.x + HUB_WIDTH, ELEC_BOX.y),
        Fuel::Heat => Point::new(HEAT_BOX.x + HUB_WIDTH, HEAT_BOX.y),
        _ => Point::new(LEFT_FLOW_X, totals.fuel_tops[fuel]),
    }
}

pub struct FlowGeometry;

impl FlowGeometry {
    /// Geometry for every year, in dataset order.
    #[tracing::instrument(skip(store, totals), fields(years = store.len()))]
    pub fn build(store: &DataStore, totals: &Totals) -> Vec<GraphData> {
        store
            .records()
            .iter()
            .zip(&totals.years)
            .map(|(record, year_totals)| {
                Self::build_year(record, year_totals, &totals.box_tops, store.catalog())
            })
            .collect()
    }

    pub fn build_year(
        record: &EnergyRecord,
        totals: &YearTotals,
        box_tops: &SectorMap<f64>,
        catalog: Catalog,
    ) -> GraphData {
        let (mut graph, offsets) = assign_y(record, totals, box_tops, catalog);
        refine_x(&mut graph, catalog);
        space_globally(&mut graph);
        split_waste(&mut graph);
        GraphData {
            year: record.year,
            graph,
            totals: totals.clone(),
            offsets,
        }
    }
}

/// Pass 1: stack every flow along its source and target edges.
fn assign_y(
    record: &EnergyRecord,
    totals: &YearTotals,
    box_tops: &SectorMap<f64>,
    catalog: Catalog,
) -> (Vec<GraphStroke>, Offsets) {
    let mut offsets = Offsets::default();
    let mut graph = Vec::new();

    let claim = |offsets: &mut Offsets, fuel: Fuel, sector: Sector, stroke: f64| {
        let origin = source_anchor(fuel, totals);
        offsets.fuels[fuel] += stroke / 2.0;
        let a = Point::new(origin.x, origin.y + offsets.fuels[fuel]);
        offsets.fuels[fuel] += stroke / 2.0;

        offsets.sectors[sector] += stroke / 2.0;
        let d = Point::new(
            target_left(sector),
            box_tops[sector] + offsets.sectors[sector],
        );
        offsets.sectors[sector] += stroke / 2.0;
        (a, d)
    };

    for fuel in catalog.flow_fuels() {
        for sector in route(fuel, catalog) {
            let value = record.value(fuel, sector);
            let (a, d) = claim(&mut offsets, fuel, sector, value * SCALE);
            let base = GraphStroke::new(fuel, sector, value, a, d);

            if fuel == Fuel::Electricity {
                let lost = record.value(Fuel::Waste, sector);
                let (a, d) = claim(&mut offsets, fuel, sector, lost * SCALE);
                let clone = base.waste_counterpart(lost, a, d);
                graph.push(base);
                graph.push(clone);
            } else {
                graph.push(base);
            }
        }
    }

    (graph, offsets)
}

/// Pass 2: fan out flows converging on the same target.
///
/// Falling flows ("downs") and rising flows ("ups") nest in opposite directions, so each group
/// is ordered on its own. The first flow turns a fixed distance before the target; each later
/// one turns further left by its vertical distance from the first over the slope.
fn refine_x(graph: &mut [GraphStroke], catalog: Catalog) {
    for sector in catalog.sectors() {
        for up in [false, true] {
            let mut group: Vec<usize> = (0..graph.len())
                .filter(|&i| graph[i].sector == sector && graph[i].is_up() == up)
                .collect();
            if group.is_empty() {
                continue;
            }
            group.sort_by_key(|&i| precedence(graph[i].sector, graph[i].fuel));
            if up {
                group.reverse();
            }

            let anchor = target_left(sector) - ANCHOR_OFFSET;
            let first_y = graph[group[0]].d.y;
            for &i in &group {
                let s = &mut graph[i];
                s.set_turn_x(anchor - (s.d.y - first_y).abs() / SLOPE);
                s.cc = s.c;
            }
        }
    }
}

/// Pass 3: keep a stroke-proportional horizontal gap between all end-use flows, then pin the
/// bundle's rightmost turn to [`RIGHT_MARGIN_X`].
fn space_globally(graph: &mut [GraphStroke]) {
    let mut order: Vec<usize> = (0..graph.len())
        .filter(|&i| graph[i].sector.is_end_use())
        .collect();
    if order.is_empty() {
        return;
    }
    order.sort_by(|&i, &j| {
        graph[j]
            .cc
            .x
            .total_cmp(&graph[i].cc.x)
            .then_with(|| {
                precedence(graph[i].sector, graph[i].fuel)
                    .cmp(&precedence(graph[j].sector, graph[j].fuel))
            })
    });

    let mut shift = 0.0;
    let mut prev: Option<(f64, f64)> = None;
    let mut placed = Vec::with_capacity(order.len());
    for &i in &order {
        let mut x = graph[i].cc.x - shift;
        if let Some((prev_x, prev_stroke)) = prev {
            let min_gap = (prev_stroke + graph[i].stroke) / (2.0 * SLOPE);
            if prev_x - x < min_gap {
                shift += min_gap - (prev_x - x);
                x = prev_x - min_gap;
            }
        }
        prev = Some((x, graph[i].stroke));
        placed.push((i, x));
    }

    let rightmost = placed
        .iter()
        .map(|(_, x)| *x)
        .fold(f64::NEG_INFINITY, f64::max);
    let delta = RIGHT_MARGIN_X - rightmost;
    for (i, x) in placed {
        graph[i].set_turn_x(x + delta);
    }
}

/// Pass 4: tag every second electricity flow per target as waste heat and lay it directly
/// alongside its electricity partner.
fn split_waste(graph: &mut [GraphStroke]) {
    let mut elec: Vec<usize> = (0..graph.len())
        .filter(|&i| graph[i].source == Fuel::Electricity)
        .collect();
    elec.sort_by_key(|&i| graph[i].sector);

    for pair in elec.chunks_exact(2) {
        let (e, w) = (pair[0], pair[1]);
        let offset = (graph[e].stroke + graph[w].stroke) / (2.0 * SLOPE);
        let turn = if graph[e].is_up() {
            graph[e].c.x + offset
        } else {
            graph[e].c.x - offset
        };
        let waste = &mut graph[w];
        waste.fuel = Fuel::Waste;
        waste.set_turn_x(turn);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
