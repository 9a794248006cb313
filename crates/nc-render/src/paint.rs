//! Scene → display list → Vello drawing commands.
//!
//! [`build_display_list`] is a pure projection of canvas state into flat,
//! back-to-front items. [`paint_scene`] turns those items into Vello fills
//! and strokes under the viewport transform.

use nc_core::id::{ConnectionId, NodeId};
use nc_core::model::{
    Bounds, CanvasNode, LayoutMode, NodeKind, Paint, PathCmd, Point, ResizeHandle, TextAlign,
    TextAutoResize,
};
use nc_core::records::{LinkSource, link_title};
use nc_core::scene::Scene;
use nc_core::viewport::Viewport;
use kurbo::{Affine, BezPath, Ellipse, Line, Rect, RoundedRect, Stroke};
use peniko::{Color, Fill};

/// Placeholder drawn for empty text nodes.
pub const TEXT_PLACEHOLDER: &str = "Type something...";

pub const SELECTION_COLOR: &str = "#3b82f6";
pub const CONTAINER_BORDER: &str = "#525252";
pub const CONNECTION_COLOR: &str = "#525252";

/// Side of a resize handle in screen pixels.
const HANDLE_PX: f64 = 10.0;

// ─── Display list ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Text node content (or its placeholder).
    Content,
    /// Resolved note/project title.
    LinkTitle,
    /// Container caption (`Frame`, `Group`, `Stack ↓`, `Stack →`).
    Caption,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub kind: LabelKind,
    pub placeholder: bool,
    pub color: Paint,
    pub font_size: f32,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemShape {
    Rect,
    Ellipse,
    Image { source: String },
    Path { commands: Vec<PathCmd>, closed: bool },
}

/// A node resolved for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeItem {
    pub id: NodeId,
    pub shape: ItemShape,
    pub bounds: Bounds,
    pub fill: Paint,
    pub stroke: Paint,
    pub stroke_width: f32,
    pub corner_radius: f32,
    /// Containers draw a dashed outline.
    pub dashed: bool,
    pub selected: bool,
    /// Draw corner resize handles (sole, resizable selection).
    pub handles: bool,
    pub label: Option<Label>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    /// Dashed line between two node centres. Always beneath nodes.
    Connection { id: ConnectionId, from: Point, to: Point },
    Node(NodeItem),
    /// Live marquee rectangle.
    Marquee(Bounds),
    /// In-progress pen path.
    PenPreview(Vec<Point>),
}

/// Project the scene into back-to-front display items.
///
/// Connections come first, then nodes in render order. Link titles are
/// resolved through `links` on every call.
pub fn build_display_list(scene: &Scene, links: &dyn LinkSource, selected: &[NodeId]) -> Vec<DisplayItem> {
    let mut items = Vec::with_capacity(scene.len() + scene.connections().len());

    for conn in scene.connections() {
        if let (Some(from), Some(to)) = (scene.node(conn.from), scene.node(conn.to)) {
            items.push(DisplayItem::Connection {
                id: conn.id,
                from: from.center(),
                to: to.center(),
            });
        }
    }

    let sole = selected.len() == 1;
    for node in scene.render_order() {
        let is_selected = selected.contains(&node.id);
        items.push(DisplayItem::Node(node_item(node, links, is_selected, sole)));
    }
    items
}

fn node_item(node: &CanvasNode, links: &dyn LinkSource, selected: bool, sole: bool) -> NodeItem {
    let style = &node.style;
    let selection = Paint::hex(SELECTION_COLOR);

    let shape = match &node.kind {
        NodeKind::Circle => ItemShape::Ellipse,
        NodeKind::Image { source } => ItemShape::Image {
            source: source.clone(),
        },
        NodeKind::Path { commands, closed } => ItemShape::Path {
            commands: commands.clone(),
            closed: *closed,
        },
        _ => ItemShape::Rect,
    };

    let (fill, stroke, stroke_width, dashed) = match &node.kind {
        NodeKind::Text { .. } => (style.background, Paint::Transparent, 0.0, false),
        NodeKind::Path { .. } => (style.background, style.border_color, style.border_width, false),
        NodeKind::Frame { .. } if !selected && style.border_width == 0.0 => {
            (style.background, Paint::Transparent, 0.0, false)
        }
        NodeKind::Group { .. } | NodeKind::Frame { .. } => {
            let color = if selected {
                selection
            } else {
                Paint::hex(CONTAINER_BORDER)
            };
            (style.background, color, 1.0, true)
        }
        _ => {
            let color = if selected { selection } else { style.border_color };
            (style.background, color, style.border_width, false)
        }
    };

    let resizable = !matches!(
        node.kind.text_auto_resize(),
        Some(TextAutoResize::Auto)
    );

    NodeItem {
        id: node.id,
        shape,
        bounds: node.bounds,
        fill,
        stroke,
        stroke_width,
        corner_radius: style.corner_radius,
        dashed,
        selected,
        handles: selected && sole && resizable,
        label: label(node, links),
    }
}

fn label(node: &CanvasNode, links: &dyn LinkSource) -> Option<Label> {
    let style = &node.style;
    let make = |text: String, kind: LabelKind, placeholder: bool| Label {
        text,
        kind,
        placeholder,
        color: style.text_color,
        font_size: style.font_size,
        align: style.text_align,
    };

    match &node.kind {
        NodeKind::Text { content, .. } if content.is_empty() => {
            Some(make(TEXT_PLACEHOLDER.into(), LabelKind::Content, true))
        }
        NodeKind::Text { content, .. } => Some(make(content.clone(), LabelKind::Content, false)),
        NodeKind::NoteLink { .. } | NodeKind::ProjectLink { .. } => {
            link_title(node, links).map(|t| make(t.to_string(), LabelKind::LinkTitle, false))
        }
        NodeKind::Frame { .. } => Some(make("Frame".into(), LabelKind::Caption, false)),
        NodeKind::Group { layout } => {
            let caption = match layout.mode {
                LayoutMode::None => "Group",
                LayoutMode::Vertical => "Stack ↓",
                LayoutMode::Horizontal => "Stack →",
            };
            Some(make(caption.into(), LabelKind::Caption, false))
        }
        _ => None,
    }
}

// ─── Painting ────────────────────────────────────────────────────────────────

/// Paint a display list into a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`. Geometry is in world
/// units; the viewport supplies the world → screen affine.
pub fn paint_scene(scene: &mut vello::Scene, items: &[DisplayItem], viewport: &Viewport) {
    let transform = Affine::translate((viewport.offset.x as f64, viewport.offset.y as f64))
        * Affine::scale(viewport.scale as f64);
    // Overlay strokes keep a constant on-screen width.
    let px = 1.0 / viewport.scale.max(f32::EPSILON) as f64;

    for item in items {
        match item {
            DisplayItem::Connection { from, to, .. } => {
                let line = Line::new(kpoint(*from), kpoint(*to));
                let stroke = Stroke::new(2.0).with_dashes(0.0, [5.0, 5.0]);
                scene.stroke(&stroke, transform, solid(CONNECTION_COLOR), None, &line);
            }
            DisplayItem::Node(node) => paint_node(scene, node, transform, px),
            DisplayItem::Marquee(b) => {
                let rect = krect(b);
                let fill = Color::from_rgba8(59, 130, 246, 26);
                scene.fill(Fill::NonZero, transform, fill, None, &rect);
                scene.stroke(&Stroke::new(px), transform, solid(SELECTION_COLOR), None, &rect);
            }
            DisplayItem::PenPreview(points) => paint_pen_preview(scene, points, transform, px),
        }
    }
}

fn paint_node(scene: &mut vello::Scene, node: &NodeItem, transform: Affine, px: f64) {
    let rect = krect(&node.bounds);
    match &node.shape {
        ItemShape::Rect | ItemShape::Image { .. } => {
            let radius = (node.corner_radius as f64).min(rect.width().min(rect.height()) / 2.0);
            let shape: RoundedRect = rect.to_rounded_rect(radius);
            fill_shape(scene, &shape, node.fill, transform);
            stroke_shape(scene, &shape, node, transform);
        }
        ItemShape::Ellipse => {
            let shape = Ellipse::from_rect(rect);
            fill_shape(scene, &shape, node.fill, transform);
            stroke_shape(scene, &shape, node, transform);
        }
        ItemShape::Path { commands, .. } => {
            let bez = to_bez(commands, &node.bounds);
            fill_shape(scene, &bez, node.fill, transform);
            stroke_shape(scene, &bez, node, transform);
            if node.selected {
                scene.stroke(&Stroke::new(px), transform, solid(SELECTION_COLOR), None, &rect);
            }
        }
    }

    if let Some(label) = &node.label {
        // Glyph shaping needs a font context; hosts draw labels themselves.
        log::trace!(
            "LABEL {} {:?} {:?} at ({}, {})",
            node.id,
            label.kind,
            label.text,
            node.bounds.x,
            node.bounds.y
        );
    }
    if let ItemShape::Image { source } = &node.shape {
        log::trace!("IMAGE {} {source}", node.id);
    }

    if node.handles {
        let side = HANDLE_PX * px;
        for h in ResizeHandle::ALL {
            let c = h.position(&node.bounds);
            let square = Rect::from_center_size(kpoint(c), (side, side));
            scene.fill(Fill::NonZero, transform, Color::from_rgba8(255, 255, 255, 255), None, &square);
            scene.stroke(&Stroke::new(px), transform, solid(SELECTION_COLOR), None, &square);
        }
    }
}

fn paint_pen_preview(scene: &mut vello::Scene, points: &[Point], transform: Affine, px: f64) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let mut bez = BezPath::new();
    bez.move_to(kpoint(*first));
    for p in rest {
        bez.line_to(kpoint(*p));
    }
    let dashed = Stroke::new(2.0 * px).with_dashes(0.0, [4.0 * px, 4.0 * px]);
    scene.stroke(&dashed, transform, solid(SELECTION_COLOR), None, &bez);

    for p in points {
        let dot = kurbo::Circle::new(kpoint(*p), 3.0 * px);
        scene.fill(Fill::NonZero, transform, Color::from_rgba8(255, 255, 255, 255), None, &dot);
        scene.stroke(&Stroke::new(px), transform, solid(SELECTION_COLOR), None, &dot);
    }
}

// ─── Fill and stroke ─────────────────────────────────────────────────────────

fn fill_shape<S: kurbo::Shape>(scene: &mut vello::Scene, shape: &S, paint: Paint, transform: Affine) {
    if let Some(color) = to_color(paint) {
        scene.fill(Fill::NonZero, transform, color, None, shape);
    }
}

fn stroke_shape<S: kurbo::Shape>(scene: &mut vello::Scene, shape: &S, node: &NodeItem, transform: Affine) {
    let Some(color) = to_color(node.stroke) else {
        return;
    };
    if node.stroke_width <= 0.0 {
        return;
    }
    let mut stroke = Stroke::new(node.stroke_width as f64);
    if node.dashed {
        stroke = stroke.with_dashes(0.0, [4.0, 4.0]);
    }
    scene.stroke(&stroke, transform, color, None, shape);
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn kpoint(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x as f64, p.y as f64)
}

fn krect(b: &Bounds) -> Rect {
    Rect::new(b.x as f64, b.y as f64, b.right() as f64, b.bottom() as f64)
}

/// Path commands are relative to the node's top-left corner.
fn to_bez(commands: &[PathCmd], origin: &Bounds) -> BezPath {
    let (dx, dy) = (origin.x as f64, origin.y as f64);
    let mut bez = BezPath::new();
    for cmd in commands {
        match *cmd {
            PathCmd::MoveTo(x, y) => bez.move_to((dx + x as f64, dy + y as f64)),
            PathCmd::LineTo(x, y) => bez.line_to((dx + x as f64, dy + y as f64)),
            PathCmd::Close => bez.close_path(),
        }
    }
    bez
}

fn to_color(paint: Paint) -> Option<Color> {
    let [r, g, b, a] = paint.color()?.to_rgba8();
    Some(Color::from_rgba8(r, g, b, a))
}

fn solid(hex: &str) -> Color {
    to_color(Paint::hex(hex)).unwrap_or(Color::from_rgba8(0, 0, 0, 255))
}
