//! Maps one year of [`GraphData`] onto a [`RenderSurface`].
//!
//! The scene is created once; later years only change attribute values (driven through the
//! transition engine), flow paths, captions and visibility.

use crate::{
    animation::tween::AttrKey,
    config::{
        catalog::{Catalog, Fuel, Sector, SectorMap},
        constants::{
            BOX_COLOR, BOX_WIDTH, BOX_X, DIM_OPACITY, ELEC_BOX, FLOW_OPACITY, HEAT_BOX, HUB_WIDTH,
            LEFT_X, SCALE, fuel_color,
        },
        options::SankeyOptions,
    },
    foundation::core::{Canvas, Rect},
    layout::{
        geometry::{FlowId, GraphData},
        totals::YearTotals,
    },
    render::surface::{
        Attr, FlowPrimitive, Primitive, PrimitiveId, RectPrimitive, RenderSurface, TextAnchor,
        TextPrimitive, Tooltip,
    },
};

const LABEL_SIZE: f64 = 12.0;
const SMALL_LABEL_SIZE: f64 = 10.0;
const PER_CAPITA_DECIMALS: usize = 2;

pub struct Projection {
    catalog: Catalog,
    box_tops: SectorMap<f64>,
    country: String,
    canvas: Canvas,
}

impl Projection {
    pub fn new(catalog: Catalog, box_tops: SectorMap<f64>, options: &SankeyOptions) -> Self {
        Self {
            catalog,
            box_tops,
            country: options.country.clone(),
            canvas: options.canvas(),
        }
    }

    fn box_rect(&self, sector: Sector, totals: &YearTotals) -> Rect {
        match sector {
            Sector::Electricity => hub_rect(
                ELEC_BOX.x,
                ELEC_BOX.y,
                totals.sectors[sector].max(totals.supply[Fuel::Electricity]),
            ),
            Sector::Heat => hub_rect(
                HEAT_BOX.x,
                HEAT_BOX.y,
                totals.sectors[sector].max(totals.supply[Fuel::Heat]),
            ),
            _ => {
                let top = self.box_tops[sector];
                Rect::new(
                    BOX_X,
                    top,
                    BOX_X + BOX_WIDTH,
                    top + totals.box_load(sector) * SCALE,
                )
            }
        }
    }

    fn box_label(&self, sector: Sector, totals: &YearTotals) -> TextPrimitive {
        let rect = self.box_rect(sector, totals);
        let value = match sector {
            Sector::Electricity => totals.fuels[Fuel::Electricity],
            Sector::Heat => totals.fuels[Fuel::Heat],
            _ => totals.sectors[sector],
        };
        TextPrimitive::new(rect.x0, rect.y0 - 4.0, sector.label()).with_value(value, 0)
    }

    fn fuel_label_y(fuel: Fuel, totals: &YearTotals) -> f64 {
        totals.fuel_tops[fuel] + totals.supply[fuel] * SCALE / 2.0 + LABEL_SIZE / 3.0
    }

    fn hubs(&self) -> impl Iterator<Item = Sector> + '_ {
        [Sector::Electricity, Sector::Heat]
            .into_iter()
            .filter(|s| self.catalog.has_sector(*s))
    }

    /// Replace the surface contents with the scene for `graph`.
    ///
    /// Returns the number of primitives created.
    pub fn draw<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        graph: &GraphData,
        milestone: Option<&str>,
        show_waste: bool,
    ) -> usize {
        surface.clear();
        let totals = &graph.totals;
        let mut created = 0;
        let mut add = |surface: &mut S, id: PrimitiveId, primitive: Primitive| {
            surface.create(id, primitive);
            created += 1;
        };

        for stroke in &graph.graph {
            add(
                surface,
                PrimitiveId::Flow(stroke.id()),
                Primitive::Flow(FlowPrimitive {
                    path: stroke.path(),
                    stroke_width: stroke.stroke,
                    color: fuel_color(stroke.fuel),
                    opacity: FLOW_OPACITY,
                }),
            );
        }

        for sector in self.hubs().chain(Sector::END_USE) {
            add(
                surface,
                PrimitiveId::Box(sector),
                Primitive::Rect(RectPrimitive {
                    rect: self.box_rect(sector, totals),
                    fill: BOX_COLOR,
                    opacity: 1.0,
                }),
            );
            add(
                surface,
                PrimitiveId::BoxLabel(sector),
                Primitive::Text(self.box_label(sector, totals)),
            );
        }

        for sector in Sector::END_USE {
            let top = self.box_tops[sector];
            add(
                surface,
                PrimitiveId::WasteLabel(sector),
                Primitive::Text(
                    TextPrimitive::new(BOX_X + BOX_WIDTH + 4.0, top + SMALL_LABEL_SIZE, "waste")
                        .with_value(totals.waste_by_sector[sector], 0)
                        .with_size(SMALL_LABEL_SIZE),
                ),
            );
        }

        for fuel in Fuel::PRIMARY {
            add(
                surface,
                PrimitiveId::FuelLabel(fuel),
                Primitive::Text(
                    TextPrimitive::new(LEFT_X, Self::fuel_label_y(fuel, totals), fuel.label())
                        .with_value(totals.supply[fuel], 0),
                ),
            );
        }

        let centre = f64::from(self.canvas.width) / 2.0;
        add(
            surface,
            PrimitiveId::Title,
            Primitive::Text(
                TextPrimitive::new(centre, 30.0, format!("{} energy flows", self.country))
                    .with_size(18.0)
                    .with_anchor(TextAnchor::Middle),
            ),
        );
        add(
            surface,
            PrimitiveId::YearLabel,
            Primitive::Text(
                TextPrimitive::new(BOX_X + BOX_WIDTH, 40.0, "")
                    .with_value(f64::from(graph.year), 0)
                    .ungrouped()
                    .with_size(28.0)
                    .with_anchor(TextAnchor::End),
            ),
        );
        add(
            surface,
            PrimitiveId::TotalLabel,
            Primitive::Text(
                TextPrimitive::new(LEFT_X, 50.0, "Primary energy").with_value(totals.primary, 0),
            ),
        );
        add(
            surface,
            PrimitiveId::PerCapitaLabel,
            Primitive::Text(
                TextPrimitive::new(LEFT_X, 66.0, "Per capita")
                    .with_value(totals.per_capita.unwrap_or(0.0), PER_CAPITA_DECIMALS),
            ),
        );
        add(
            surface,
            PrimitiveId::MilestoneLabel,
            Primitive::Text(TextPrimitive::new(
                LEFT_X,
                f64::from(self.canvas.height) - 20.0,
                milestone.unwrap_or_default(),
            )),
        );

        surface.set_visible(PrimitiveId::PerCapitaLabel, totals.per_capita.is_some());
        self.set_waste_visible(surface, graph, show_waste);
        tracing::debug!(year = graph.year, primitives = created, "scene drawn");
        created
    }

    /// Animated attribute values for `graph`.
    pub fn targets(&self, graph: &GraphData) -> Vec<(AttrKey, f64)> {
        let totals = &graph.totals;
        let mut out = Vec::with_capacity(graph.graph.len() + 64);
        let mut push = |id: PrimitiveId, attr: Attr, value: f64| {
            out.push((AttrKey::new(id, attr), value));
        };

        for stroke in &graph.graph {
            push(PrimitiveId::Flow(stroke.id()), Attr::StrokeWidth, stroke.stroke);
        }
        for sector in self.hubs().chain(Sector::END_USE) {
            let rect = self.box_rect(sector, totals);
            push(PrimitiveId::Box(sector), Attr::Y, rect.y0);
            push(PrimitiveId::Box(sector), Attr::Height, rect.height());
            let label = self.box_label(sector, totals);
            push(PrimitiveId::BoxLabel(sector), Attr::Y, label.y);
            if let Some(v) = label.value {
                push(PrimitiveId::BoxLabel(sector), Attr::Value, v);
            }
        }
        for sector in Sector::END_USE {
            push(
                PrimitiveId::WasteLabel(sector),
                Attr::Value,
                totals.waste_by_sector[sector],
            );
        }
        for fuel in Fuel::PRIMARY {
            push(
                PrimitiveId::FuelLabel(fuel),
                Attr::Y,
                Self::fuel_label_y(fuel, totals),
            );
            push(PrimitiveId::FuelLabel(fuel), Attr::Value, totals.supply[fuel]);
        }
        push(PrimitiveId::YearLabel, Attr::Value, f64::from(graph.year));
        push(PrimitiveId::TotalLabel, Attr::Value, totals.primary);
        if let Some(pc) = totals.per_capita {
            push(PrimitiveId::PerCapitaLabel, Attr::Value, pc);
        }
        out
    }

    /// Swap in the flow curves and captions of `graph`; these are not interpolated.
    pub fn swap_paths<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        graph: &GraphData,
        milestone: Option<&str>,
    ) {
        for stroke in &graph.graph {
            surface.set_path(PrimitiveId::Flow(stroke.id()), &stroke.path());
        }
        surface.set_caption(PrimitiveId::MilestoneLabel, milestone.unwrap_or_default());
        surface.set_visible(PrimitiveId::PerCapitaLabel, graph.totals.per_capita.is_some());
    }

    pub fn set_waste_visible<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        graph: &GraphData,
        visible: bool,
    ) {
        for stroke in graph.graph.iter().filter(|s| s.fuel == Fuel::Waste) {
            surface.set_visible(PrimitiveId::Flow(stroke.id()), visible);
        }
        for sector in Sector::END_USE {
            surface.set_visible(PrimitiveId::WasteLabel(sector), visible);
        }
    }

    /// Emphasise every flow of `fuel`; `None` restores the resting opacity.
    pub fn highlight<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        graph: &GraphData,
        fuel: Option<Fuel>,
    ) {
        for stroke in &graph.graph {
            let opacity = match fuel {
                Some(f) if f != stroke.fuel => DIM_OPACITY,
                _ => FLOW_OPACITY,
            };
            surface.set_attr(PrimitiveId::Flow(stroke.id()), Attr::Opacity, opacity);
        }
    }

    pub fn tooltip(graph: &GraphData, flow: FlowId) -> Option<Tooltip> {
        let stroke = graph.stroke(flow.fuel, flow.sector)?;
        Some(Tooltip {
            flow,
            value: stroke.value,
            text: format!(
                "{} to {}: {}",
                flow.fuel.label(),
                flow.sector.label(),
                crate::render::surface::format_number(stroke.value, 1)
            ),
        })
    }
}

fn hub_rect(x: f64, y: f64, value: f64) -> Rect {
    Rect::new(x, y, x + HUB_WIDTH, y + value * SCALE)
}

#[cfg(test)]
#[path = "../../tests/unit/render/projection.rs"]
mod tests;
