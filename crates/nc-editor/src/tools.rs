//! Tool kinds and the nodes each creation tool produces.
//!
//! ## Lifetime of a tool
//!
//! | Tool | After one use |
//! |------|---------------|
//! | Rectangle, Circle, Text | back to Select, new node selected |
//! | NoteLink, ProjectLink | picker opens; back to Select once a record is chosen |
//! | Pen | stays until the path is finished (Enter / Escape / close click) |
//! | Connect | stays until a connection completes or is abandoned |

use nc_core::config::CanvasConfig;
use nc_core::id::NodeId;
use nc_core::model::*;

/// The active tool determines how pointer-down is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Text,
    Pen,
    NoteLink,
    ProjectLink,
    Connect,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Text => "text",
            Self::Pen => "pen",
            Self::NoteLink => "note-link",
            Self::ProjectLink => "project-link",
            Self::Connect => "connect",
        }
    }

    /// Which record picker this tool opens, if any.
    pub fn link_target(self) -> Option<LinkTarget> {
        match self {
            Self::NoteLink => Some(LinkTarget::Note),
            Self::ProjectLink => Some(LinkTarget::Project),
            _ => None,
        }
    }
}

/// The kind of record a link picker should list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Note,
    Project,
}

/// Default-sized shape centred on `at`. `None` for non-shape tools.
pub fn shape_node(tool: ToolKind, at: Point, config: &CanvasConfig) -> Option<CanvasNode> {
    let kind = match tool {
        ToolKind::Rectangle => NodeKind::Rectangle,
        ToolKind::Circle => NodeKind::Circle,
        _ => return None,
    };
    Some(centred(kind, "shape", at, config))
}

/// Link card centred on `at`, pointing at `reference_id`.
pub fn link_node(target: LinkTarget, reference_id: &str, at: Point, config: &CanvasConfig) -> CanvasNode {
    let reference_id = reference_id.to_string();
    let kind = match target {
        LinkTarget::Note => NodeKind::NoteLink { reference_id },
        LinkTarget::Project => NodeKind::ProjectLink { reference_id },
    };
    centred(kind, "link", at, config)
}

fn centred(kind: NodeKind, prefix: &str, at: Point, config: &CanvasConfig) -> CanvasNode {
    let (w, h) = (config.shape_width, config.shape_height);
    CanvasNode::new(
        NodeId::with_prefix(prefix),
        kind,
        Bounds::new(at.x - w / 2.0, at.y - h / 2.0, w, h),
    )
}

/// Empty auto-width text with its top-left at `at` (text-tool click).
pub fn text_node(at: Point, config: &CanvasConfig) -> CanvasNode {
    CanvasNode::new(
        NodeId::with_prefix("text"),
        NodeKind::Text {
            content: String::new(),
            auto_resize: TextAutoResize::Auto,
        },
        Bounds::new(at.x, at.y, config.text_width, config.text_height),
    )
}

/// Fixed-size text box spanning a drag (text-tool drag).
pub fn text_box(area: Bounds, config: &CanvasConfig) -> CanvasNode {
    CanvasNode::new(
        NodeId::with_prefix("text"),
        NodeKind::Text {
            content: String::new(),
            auto_resize: TextAutoResize::Fixed,
        },
        Bounds::new(
            area.x,
            area.y,
            area.width.max(MIN_NODE_SIZE),
            area.height.max(config.min_text_box_height),
        ),
    )
}

/// Path node through `points`, with commands relative to its top-left.
///
/// Returns `None` for fewer than two points.
pub fn path_node(points: &[Point], closed: bool) -> Option<CanvasNode> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.x, first.y);
    for p in rest {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let mut commands = Vec::with_capacity(points.len() + 1);
    commands.push(PathCmd::MoveTo(first.x - min_x, first.y - min_y));
    commands.extend(rest.iter().map(|p| PathCmd::LineTo(p.x - min_x, p.y - min_y)));
    if closed {
        commands.push(PathCmd::Close);
    }

    Some(CanvasNode::new(
        NodeId::with_prefix("path"),
        NodeKind::Path { commands, closed },
        Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y),
    ))
}
