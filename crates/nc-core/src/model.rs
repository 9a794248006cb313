//! Core data model for the design canvas.
//!
//! Nodes live in world (logical) coordinates with a top-left origin. The
//! hierarchy is not stored here: parent/child links belong to the
//! [`Scene`](crate::scene::Scene) arena so nodes never carry child arrays.

use crate::id::{ConnectionId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest width or height any node may have, in world units.
pub const MIN_NODE_SIZE: f32 = 20.0;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A 2D point. Screen or world space depending on context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned box (top-left + size).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized box spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive containment on all four edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Grow by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Bounds {
        Bounds {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }
}

// ─── Colors & Paint ──────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let byte = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => {
                let short = |i: usize| -> Option<f32> { Some((hex_val(bytes[i])? * 17) as f32 / 255.0) };
                Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0))
            }
            6 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Emit as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// A fill or border color, or the `transparent` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Paint {
    #[default]
    Transparent,
    Solid(Color),
}

impl Paint {
    /// Parse a CSS-ish color value: `transparent` or a hex color.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("transparent") {
            return Some(Paint::Transparent);
        }
        Color::from_hex(value).map(Paint::Solid)
    }

    /// Shorthand for a solid hex color known to be valid at the call site.
    /// Falls back to transparent on malformed input.
    pub fn hex(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Paint::Transparent => None,
            Paint::Solid(c) => Some(*c),
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::Transparent => f.write_str("transparent"),
            Paint::Solid(c) => f.write_str(&c.to_hex()),
        }
    }
}

// ─── Style ───────────────────────────────────────────────────────────────

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Visual style of a node. Values never inherit from the parent node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub background: Paint,
    pub border_color: Paint,
    pub border_width: f32,
    pub corner_radius: f32,
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub italic: bool,
    pub text_align: TextAlign,
    pub text_color: Paint,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Paint::hex("#1a1a1a"),
            border_color: Paint::hex("#2e2e2e"),
            border_width: 1.0,
            corner_radius: 8.0,
            font_family: "Inter".into(),
            font_size: 16.0,
            font_weight: 400,
            italic: false,
            text_align: TextAlign::Left,
            text_color: Paint::hex("#e5e5e5"),
        }
    }
}

impl Style {
    /// Creation-time defaults for a given node kind.
    pub fn for_kind(kind: &NodeKind) -> Self {
        let base = Style::default();
        match kind {
            NodeKind::Text { .. } => Style {
                background: Paint::Transparent,
                border_color: Paint::Transparent,
                border_width: 0.0,
                ..base
            },
            NodeKind::Circle => Style {
                corner_radius: 999.0,
                ..base
            },
            NodeKind::Path { .. } => Style {
                background: Paint::Transparent,
                border_color: Paint::hex("#e5e5e5"),
                border_width: 2.0,
                ..base
            },
            NodeKind::Group { .. } | NodeKind::Frame { .. } => Style {
                background: Paint::Transparent,
                border_color: Paint::hex("#525252"),
                ..base
            },
            _ => base,
        }
    }

    /// Whether two styles measure text differently.
    pub fn metrics_differ(&self, other: &Style) -> bool {
        self.font_family != other.font_family
            || self.font_size != other.font_size
            || self.font_weight != other.font_weight
            || self.italic != other.italic
    }
}

// ─── Path data ───────────────────────────────────────────────────────────

/// A pen-tool path command, relative to the node's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Close,
}

/// Render a command list as an SVG path descriptor (`M 0 0 L 10 5 Z`).
pub fn path_to_svg(commands: &[PathCmd]) -> String {
    let mut parts = Vec::with_capacity(commands.len());
    for cmd in commands {
        parts.push(match cmd {
            PathCmd::MoveTo(x, y) => format!("M {x} {y}"),
            PathCmd::LineTo(x, y) => format!("L {x} {y}"),
            PathCmd::Close => "Z".to_string(),
        });
    }
    parts.join(" ")
}

// ─── Auto layout ─────────────────────────────────────────────────────────

/// Primary axis of a stack, or `None` for free positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Whether a stack sizes itself from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutSizing {
    Hug,
    #[default]
    Fixed,
}

/// Auto-layout settings carried by `group` and `frame` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub mode: LayoutMode,
    pub sizing: LayoutSizing,
    /// Only effective with `Fixed` sizing in horizontal mode.
    pub wrap: bool,
    pub gap: f32,
    pub padding: f32,
}

impl Layout {
    /// A hugging stack along `mode`.
    pub fn stack(mode: LayoutMode, gap: f32, padding: f32) -> Self {
        Self {
            mode,
            sizing: LayoutSizing::Hug,
            wrap: false,
            gap,
            padding,
        }
    }

    pub fn is_stack(&self) -> bool {
        self.mode != LayoutMode::None
    }

    /// Clamp gap and padding to be non-negative.
    pub fn sanitized(mut self) -> Self {
        self.gap = self.gap.max(0.0);
        self.padding = self.padding.max(0.0);
        self
    }
}

/// Text box sizing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAutoResize {
    /// Size follows content and font metrics.
    #[default]
    Auto,
    /// The user owns the box; content wraps.
    Fixed,
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// What a node is. The variant is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Rectangle,
    Circle,
    Text {
        content: String,
        auto_resize: TextAutoResize,
    },
    /// Live link to an external note, resolved by id at render time.
    NoteLink { reference_id: String },
    /// Live link to an external project, resolved by id at render time.
    ProjectLink { reference_id: String },
    Image { source: String },
    /// Container. Free by default, a stack when its layout mode is set.
    Group { layout: Layout },
    /// Container drawn with a visible, clipping box.
    Frame { layout: Layout },
    /// Pen tool output.
    Path { commands: Vec<PathCmd>, closed: bool },
}

impl NodeKind {
    /// Lowercase kind name (`rectangle`, `note-link`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Rectangle => "rectangle",
            NodeKind::Circle => "circle",
            NodeKind::Text { .. } => "text",
            NodeKind::NoteLink { .. } => "note-link",
            NodeKind::ProjectLink { .. } => "project-link",
            NodeKind::Image { .. } => "image",
            NodeKind::Group { .. } => "group",
            NodeKind::Frame { .. } => "frame",
            NodeKind::Path { .. } => "path",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Group { .. } | NodeKind::Frame { .. })
    }

    pub fn layout(&self) -> Option<&Layout> {
        match self {
            NodeKind::Group { layout } | NodeKind::Frame { layout } => Some(layout),
            _ => None,
        }
    }

    pub fn layout_mut(&mut self) -> Option<&mut Layout> {
        match self {
            NodeKind::Group { layout } | NodeKind::Frame { layout } => Some(layout),
            _ => None,
        }
    }

    pub fn is_stack(&self) -> bool {
        self.layout().is_some_and(Layout::is_stack)
    }

    pub fn text_auto_resize(&self) -> Option<TextAutoResize> {
        match self {
            NodeKind::Text { auto_resize, .. } => Some(*auto_resize),
            _ => None,
        }
    }
}

/// A positioned, styled scene element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub bounds: Bounds,
    pub style: Style,
    /// Render order key; ties fall back to `seq`.
    pub z_index: i32,
    /// Insertion sequence, assigned by the scene.
    pub seq: u64,
}

impl CanvasNode {
    /// New node with kind-appropriate default style.
    pub fn new(id: NodeId, kind: NodeKind, bounds: Bounds) -> Self {
        let style = Style::for_kind(&kind);
        Self {
            id,
            kind,
            bounds,
            style,
            z_index: 0,
            seq: 0,
        }
    }

    pub fn with_z(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn is_stack(&self) -> bool {
        self.kind.is_stack()
    }
}

/// An arrow between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
}

impl Connection {
    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }
}

/// Corner resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::Nw,
        ResizeHandle::Ne,
        ResizeHandle::Sw,
        ResizeHandle::Se,
    ];

    pub fn moves_west(self) -> bool {
        matches!(self, ResizeHandle::Nw | ResizeHandle::Sw)
    }

    pub fn moves_north(self) -> bool {
        matches!(self, ResizeHandle::Nw | ResizeHandle::Ne)
    }

    /// The handle's anchor point on a box.
    pub fn position(self, b: &Bounds) -> Point {
        let x = if self.moves_west() { b.x } else { b.right() };
        let y = if self.moves_north() { b.y } else { b.bottom() };
        Point::new(x, y)
    }
}
