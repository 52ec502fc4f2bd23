use std::{collections::BTreeMap, fmt::Write as _};

use crate::{
    config::constants::LEFT_X,
    foundation::core::{BezPath, Canvas, Rgba8},
    render::surface::{
        Attr, Primitive, PrimitiveId, RenderSurface, TextAnchor, TextPrimitive, Tooltip,
    },
};

#[derive(Clone, Debug)]
struct Node {
    primitive: Primitive,
    visible: bool,
}

/// In-memory scene that serialises to a standalone SVG document.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    canvas: Canvas,
    background: Rgba8,
    nodes: BTreeMap<PrimitiveId, Node>,
    /// Paint order: creation order.
    order: Vec<PrimitiveId>,
    tooltip: Option<Tooltip>,
}

impl SvgSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            background: Rgba8::rgb(0xff, 0xff, 0xff),
            nodes: BTreeMap::new(),
            order: Vec::new(),
            tooltip: None,
        }
    }

    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.nodes.get(&id).map(|n| &n.primitive)
    }

    pub fn is_visible(&self, id: PrimitiveId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.visible)
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Ids in paint order.
    pub fn ids(&self) -> impl Iterator<Item = PrimitiveId> + '_ {
        self.order.iter().copied()
    }

    /// Displayed string of a text primitive.
    pub fn text(&self, id: PrimitiveId) -> Option<String> {
        match self.get(id)? {
            Primitive::Text(t) => Some(t.content()),
            _ => None,
        }
    }

    pub fn to_svg(&self) -> String {
        let (w, h) = (self.canvas.width, self.canvas.height);
        let mut out = String::with_capacity(256 + self.nodes.len() * 160);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = writeln!(
            out,
            r#"<rect width="{w}" height="{h}" fill="{}"/>"#,
            self.background.to_hex()
        );

        for id in &self.order {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            match &node.primitive {
                Primitive::Flow(f) => {
                    if f.stroke_width <= 0.0 {
                        continue;
                    }
                    let _ = writeln!(
                        out,
                        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.3}" stroke-opacity="{:.3}"/>"#,
                        f.path.to_svg(),
                        f.color.to_hex(),
                        f.stroke_width,
                        f.opacity * f.color.alpha_f64(),
                    );
                }
                Primitive::Rect(r) => {
                    let _ = writeln!(
                        out,
                        r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}" fill-opacity="{:.3}"/>"#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width().max(0.0),
                        r.rect.height().max(0.0),
                        r.fill.to_hex(),
                        r.opacity * r.fill.alpha_f64(),
                    );
                }
                Primitive::Text(t) => write_text(&mut out, t),
            }
        }

        if let Some(tip) = &self.tooltip {
            let tip_text = TextPrimitive::new(LEFT_X, f64::from(h) - 40.0, tip.text.as_str());
            write_text(&mut out, &tip_text);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_text(out: &mut String, t: &TextPrimitive) {
    let content = t.content();
    if content.is_empty() {
        return;
    }
    let anchor = match t.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = writeln!(
        out,
        r#"<text x="{:.3}" y="{:.3}" font-family="sans-serif" font-size="{}" text-anchor="{anchor}" fill="{}" fill-opacity="{:.3}">{}</text>"#,
        t.x,
        t.y,
        t.size,
        t.color.to_hex(),
        t.opacity * t.color.alpha_f64(),
        escape_xml(&content),
    );
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl RenderSurface for SvgSurface {
    fn create(&mut self, id: PrimitiveId, primitive: Primitive) {
        let node = Node {
            primitive,
            visible: true,
        };
        if self.nodes.insert(id, node).is_none() {
            self.order.push(id);
        }
    }

    fn set_attr(&mut self, id: PrimitiveId, attr: Attr, value: f64) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        match (&mut node.primitive, attr) {
            (Primitive::Rect(r), Attr::X) => r.rect = r.rect.with_origin((value, r.rect.y0)),
            (Primitive::Rect(r), Attr::Y) => r.rect = r.rect.with_origin((r.rect.x0, value)),
            (Primitive::Rect(r), Attr::Width) => r.rect.x1 = r.rect.x0 + value,
            (Primitive::Rect(r), Attr::Height) => r.rect.y1 = r.rect.y0 + value,
            (Primitive::Rect(r), Attr::Opacity) => r.opacity = value,
            (Primitive::Flow(f), Attr::StrokeWidth) => f.stroke_width = value,
            (Primitive::Flow(f), Attr::Opacity) => f.opacity = value,
            (Primitive::Text(t), Attr::X) => t.x = value,
            (Primitive::Text(t), Attr::Y) => t.y = value,
            (Primitive::Text(t), Attr::Value) => t.value = Some(value),
            (Primitive::Text(t), Attr::Opacity) => t.opacity = value,
            _ => {}
        }
    }

    fn attr(&self, id: PrimitiveId, attr: Attr) -> Option<f64> {
        match (&self.nodes.get(&id)?.primitive, attr) {
            (Primitive::Rect(r), Attr::X) => Some(r.rect.x0),
            (Primitive::Rect(r), Attr::Y) => Some(r.rect.y0),
            (Primitive::Rect(r), Attr::Width) => Some(r.rect.width()),
            (Primitive::Rect(r), Attr::Height) => Some(r.rect.height()),
            (Primitive::Rect(r), Attr::Opacity) => Some(r.opacity),
            (Primitive::Flow(f), Attr::StrokeWidth) => Some(f.stroke_width),
            (Primitive::Flow(f), Attr::Opacity) => Some(f.opacity),
            (Primitive::Text(t), Attr::X) => Some(t.x),
            (Primitive::Text(t), Attr::Y) => Some(t.y),
            (Primitive::Text(t), Attr::Value) => t.value,
            (Primitive::Text(t), Attr::Opacity) => Some(t.opacity),
            _ => None,
        }
    }

    fn set_path(&mut self, id: PrimitiveId, path: &BezPath) {
        if let Some(Node {
            primitive: Primitive::Flow(f),
            ..
        }) = self.nodes.get_mut(&id)
        {
            f.path = path.clone();
        }
    }

    fn set_caption(&mut self, id: PrimitiveId, caption: &str) {
        if let Some(Node {
            primitive: Primitive::Text(t),
            ..
        }) = self.nodes.get_mut(&id)
        {
            t.caption = caption.to_string();
        }
    }

    fn set_visible(&mut self, id: PrimitiveId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.visible = visible;
        }
    }

    fn set_tooltip(&mut self, tooltip: Option<Tooltip>) {
        self.tooltip = tooltip;
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.tooltip = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
