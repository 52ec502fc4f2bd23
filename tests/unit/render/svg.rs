use super::*;
use crate::{
    config::catalog::{Fuel, Sector},
    foundation::core::{Point, Rect},
    layout::geometry::FlowId,
    render::surface::{FlowPrimitive, RectPrimitive},
};

fn canvas() -> Canvas {
    Canvas::new(200, 100).unwrap()
}

fn gas_res() -> PrimitiveId {
    PrimitiveId::Flow(FlowId {
        fuel: Fuel::Gas,
        sector: Sector::Residential,
    })
}

fn line() -> BezPath {
    let mut p = BezPath::new();
    p.move_to(Point::new(0.0, 10.0));
    p.line_to(Point::new(100.0, 10.0));
    p
}

#[test]
fn attributes_read_back_after_set() {
    let mut s = SvgSurface::new(canvas());
    let id = PrimitiveId::Box(Sector::Industrial);
    s.create(
        id,
        Primitive::Rect(RectPrimitive {
            rect: Rect::new(10.0, 20.0, 30.0, 60.0),
            fill: Rgba8::rgb(0, 0, 0),
            opacity: 1.0,
        }),
    );
    assert_eq!(s.attr(id, Attr::Height), Some(40.0));
    s.set_attr(id, Attr::Y, 25.0);
    assert_eq!(s.attr(id, Attr::Height), Some(40.0));
    s.set_attr(id, Attr::Height, 12.5);
    assert_eq!(s.attr(id, Attr::Y), Some(25.0));
    assert_eq!(s.attr(id, Attr::Height), Some(12.5));
    // Rects have no stroke width.
    s.set_attr(id, Attr::StrokeWidth, 3.0);
    assert_eq!(s.attr(id, Attr::StrokeWidth), None);
}

#[test]
fn unknown_ids_are_ignored() {
    let mut s = SvgSurface::new(canvas());
    s.set_attr(PrimitiveId::Title, Attr::Value, 1.0);
    s.set_visible(PrimitiveId::Title, false);
    assert!(s.is_empty());
    assert_eq!(s.attr(PrimitiveId::Title, Attr::Value), None);
}

#[test]
fn recreate_keeps_paint_order() {
    let mut s = SvgSurface::new(canvas());
    s.create(PrimitiveId::Title, Primitive::Text(TextPrimitive::new(0.0, 0.0, "a")));
    s.create(PrimitiveId::YearLabel, Primitive::Text(TextPrimitive::new(0.0, 0.0, "b")));
    s.create(PrimitiveId::Title, Primitive::Text(TextPrimitive::new(0.0, 0.0, "c")));
    let ids: Vec<_> = s.ids().collect();
    assert_eq!(ids, vec![PrimitiveId::Title, PrimitiveId::YearLabel]);
    assert_eq!(s.text(PrimitiveId::Title).unwrap(), "c");
}

#[test]
fn svg_document_contains_visible_primitives_only() {
    let mut s = SvgSurface::new(canvas());
    s.create(
        gas_res(),
        Primitive::Flow(FlowPrimitive {
            path: line(),
            stroke_width: 4.0,
            color: Rgba8::rgb(0x12, 0x34, 0x56),
            opacity: 0.5,
        }),
    );
    s.create(
        PrimitiveId::Title,
        Primitive::Text(TextPrimitive::new(5.0, 5.0, "Fish & <Chips>")),
    );
    let doc = s.to_svg();
    assert!(doc.starts_with("<svg"));
    assert!(doc.trim_end().ends_with("</svg>"));
    assert!(doc.contains(r##"stroke="#123456""##));
    assert!(doc.contains(r#"stroke-width="4.000""#));
    assert!(doc.contains("Fish &amp; &lt;Chips&gt;"));

    s.set_visible(gas_res(), false);
    assert!(!s.to_svg().contains("<path"));
}

#[test]
fn zero_width_flows_are_not_painted() {
    let mut s = SvgSurface::new(canvas());
    s.create(
        gas_res(),
        Primitive::Flow(FlowPrimitive {
            path: line(),
            stroke_width: 0.0,
            color: Rgba8::rgb(0, 0, 0),
            opacity: 1.0,
        }),
    );
    assert!(s.is_visible(gas_res()));
    assert!(!s.to_svg().contains("<path"));
}

#[test]
fn tooltip_is_painted_and_cleared() {
    let mut s = SvgSurface::new(canvas());
    s.set_tooltip(Some(Tooltip {
        flow: FlowId {
            fuel: Fuel::Gas,
            sector: Sector::Residential,
        },
        value: 5.0,
        text: "Gas to Residential: 5.0".to_string(),
    }));
    assert!(s.to_svg().contains("Gas to Residential: 5.0"));
    s.clear();
    assert!(s.tooltip().is_none());
    assert!(s.is_empty());
}
