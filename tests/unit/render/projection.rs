use super::*;
use crate::{
    data::{dsl::RecordBuilder, store::DataStore},
    layout::{geometry::FlowGeometry, totals::Totals},
    render::svg::SvgSurface,
};

fn sample() -> (Projection, Vec<GraphData>) {
    let records = [1990, 1991]
        .into_iter()
        .enumerate()
        .map(|(i, year)| {
            let k = 1.0 + i as f64;
            RecordBuilder::new(year)
                .flow(Fuel::Gas, Sector::Residential, 400.0 * k)
                .flow(Fuel::Coal, Sector::Electricity, 900.0)
                .flow(Fuel::Petroleum, Sector::Transportation, 1200.0 * k)
                .flow(Fuel::Electricity, Sector::Residential, 300.0)
                .flow(Fuel::Waste, Sector::Residential, 600.0)
                .population(if i == 0 { 250.0 } else { 260.0 })
                .build()
                .unwrap()
        })
        .collect();
    let store = DataStore::from_records(records, Catalog::default()).unwrap();
    let totals = Totals::aggregate(&store);
    let graph = FlowGeometry::build(&store, &totals);
    let projection = Projection::new(
        store.catalog(),
        totals.box_tops.clone(),
        &SankeyOptions::default(),
    );
    (projection, graph)
}

fn flow(fuel: Fuel, sector: Sector) -> PrimitiveId {
    PrimitiveId::Flow(FlowId { fuel, sector })
}

#[test]
fn draw_creates_one_path_per_stroke_and_one_box_per_sector() {
    let (projection, graph) = sample();
    let mut surface = SvgSurface::new(SankeyOptions::default().canvas());
    let created = projection.draw(&mut surface, &graph[0], None, true);
    assert_eq!(created, surface.len());

    for stroke in &graph[0].graph {
        match surface.get(PrimitiveId::Flow(stroke.id())) {
            Some(Primitive::Flow(f)) => assert_eq!(f.stroke_width, stroke.stroke),
            other => panic!("missing flow {:?}: {other:?}", stroke.id()),
        }
    }
    for sector in Sector::END_USE {
        assert!(surface.get(PrimitiveId::Box(sector)).is_some());
    }
    assert!(surface.get(PrimitiveId::Box(Sector::Electricity)).is_some());
    assert!(surface.get(PrimitiveId::Box(Sector::Heat)).is_none());
}

#[test]
fn box_height_tracks_sector_total() {
    let (projection, graph) = sample();
    let mut surface = SvgSurface::new(SankeyOptions::default().canvas());
    projection.draw(&mut surface, &graph[0], None, true);
    let id = PrimitiveId::Box(Sector::Residential);
    let expected = graph[0].totals.sectors[Sector::Residential] * SCALE;
    let h = surface.attr(id, Attr::Height).unwrap();
    assert!((h - expected).abs() < 1e-9);
}

#[test]
fn text_labels_show_year_and_totals() {
    let (projection, graph) = sample();
    let mut surface = SvgSurface::new(SankeyOptions::default().canvas());
    projection.draw(&mut surface, &graph[1], Some("Oil shock"), true);
    assert_eq!(surface.text(PrimitiveId::YearLabel).unwrap(), "1991");
    assert_eq!(
        surface.text(PrimitiveId::BoxLabel(Sector::Residential)).unwrap(),
        "Residential 1,700"
    );
    assert_eq!(
        surface.text(PrimitiveId::MilestoneLabel).unwrap(),
        "Oil shock"
    );
    assert!(surface.is_visible(PrimitiveId::PerCapitaLabel));
}

#[test]
fn targets_cover_every_flow_width() {
    let (projection, graph) = sample();
    let targets = projection.targets(&graph[1]);
    for stroke in &graph[1].graph {
        let key = AttrKey::new(PrimitiveId::Flow(stroke.id()), Attr::StrokeWidth);
        let hit = targets.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
        assert_eq!(hit, Some(stroke.stroke));
    }
    let year = AttrKey::new(PrimitiveId::YearLabel, Attr::Value);
    assert!(targets.contains(&(year, 1991.0)));
}

#[test]
fn waste_visibility_follows_the_flag() {
    let (projection, graph) = sample();
    let mut surface = SvgSurface::new(SankeyOptions::default().canvas());
    projection.draw(&mut surface, &graph[0], None, false);
    let waste = flow(Fuel::Waste, Sector::Residential);
    assert!(!surface.is_visible(waste));
    assert!(!surface.is_visible(PrimitiveId::WasteLabel(Sector::Residential)));
    assert!(surface.is_visible(flow(Fuel::Electricity, Sector::Residential)));

    projection.set_waste_visible(&mut surface, &graph[0], true);
    assert!(surface.is_visible(waste));
}

#[test]
fn highlight_dims_other_fuels_and_restores() {
    let (projection, graph) = sample();
    let mut surface = SvgSurface::new(SankeyOptions::default().canvas());
    projection.draw(&mut surface, &graph[0], None, true);

    projection.highlight(&mut surface, &graph[0], Some(Fuel::Gas));
    let gas = flow(Fuel::Gas, Sector::Residential);
    let petro = flow(Fuel::Petroleum, Sector::Transportation);
    assert_eq!(surface.attr(gas, Attr::Opacity), Some(FLOW_OPACITY));
    assert_eq!(surface.attr(petro, Attr::Opacity), Some(DIM_OPACITY));

    projection.highlight(&mut surface, &graph[0], None);
    assert_eq!(surface.attr(petro, Attr::Opacity), Some(FLOW_OPACITY));
}

#[test]
fn tooltip_reports_flow_value() {
    let (_, graph) = sample();
    let id = FlowId {
        fuel: Fuel::Gas,
        sector: Sector::Residential,
    };
    let tip = Projection::tooltip(&graph[0], id).unwrap();
    assert_eq!(tip.value, 400.0);
    assert_eq!(tip.text, "Gas to Residential: 400.0");
    let missing = FlowId {
        fuel: Fuel::Heat,
        sector: Sector::Residential,
    };
    assert!(Projection::tooltip(&graph[0], missing).is_none());
}

#[test]
fn swap_paths_replaces_curves_and_milestone() {
    let (projection, graph) = sample();
    let mut surface = SvgSurface::new(SankeyOptions::default().canvas());
    projection.draw(&mut surface, &graph[0], Some("start"), true);
    projection.swap_paths(&mut surface, &graph[1], None);

    let stroke = graph[1].stroke(Fuel::Gas, Sector::Residential).unwrap();
    match surface.get(flow(Fuel::Gas, Sector::Residential)) {
        Some(Primitive::Flow(f)) => assert_eq!(f.path, stroke.path()),
        other => panic!("{other:?}"),
    }
    assert_eq!(surface.text(PrimitiveId::MilestoneLabel).unwrap(), "");
}
