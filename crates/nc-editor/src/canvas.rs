//! The canvas controller.
//!
//! `Canvas` owns the scene, viewport, selection, active tool, and current
//! interaction mode. Hosts feed it [`InputEvent`]s (or call the named
//! commands directly) and get back the [`CanvasEvent`]s they should react
//! to: redraw, open a picker, focus a text editor.
//!
//! Everything runs to completion on the caller's thread; a handler never
//! leaves the scene half-updated.

use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::interaction::Interaction;
use crate::selection::Selection;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{self, LinkTarget, ToolKind};
use nc_core::arrange::{self, Alignment};
use nc_core::config::CanvasConfig;
use nc_core::id::{ConnectionId, NodeId};
use nc_core::model::{Bounds, CanvasNode, Layout, NodeKind, Point, ResizeHandle, Style, TextAutoResize};
use nc_core::records::Records;
use nc_core::scene::Scene;
use nc_core::text::{ApproxTextMetrics, TextMeasure};
use nc_core::viewport::{Viewport, WheelInput};
use nc_render::{DisplayItem, build_display_list, container_at, hit_test, hit_test_handle, marquee_select};

/// Multiplier applied by the zoom-in / zoom-out shortcuts.
pub const ZOOM_STEP: f32 = 1.25;

/// What changed as a result of an input, for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    NodeCreated(NodeId),
    NodesDeleted(Vec<NodeId>),
    /// Geometry, hierarchy, style, or content changed.
    SceneChanged,
    SelectionChanged,
    ConnectionCreated(ConnectionId),
    /// Show a note or project picker; answer with
    /// [`Canvas::complete_link`] or [`Canvas::cancel_link`].
    LinkPickerRequested(LinkTarget),
    TextEditStarted(NodeId),
    TextEditEnded(NodeId),
    ToolChanged(ToolKind),
    ViewportChanged,
}

/// A link placement waiting on the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingLink {
    target: LinkTarget,
    at: Point,
}

pub struct Canvas {
    scene: Scene,
    viewport: Viewport,
    selection: Selection,
    tool: ToolKind,
    interaction: Interaction,
    pending_link: Option<PendingLink>,
    records: Records,
    config: CanvasConfig,
    measure: Box<dyn TextMeasure>,
    /// Size of the host's canvas element, for centre-anchored zoom.
    view_size: (f32, f32),
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default(), Records::default())
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("nodes", &self.scene.len())
            .field("tool", &self.tool)
            .field("interaction", &self.interaction.name())
            .field("selection", &self.selection)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// An invalid `config` is replaced by the defaults.
    pub fn new(config: CanvasConfig, records: Records) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("canvas: {err}; using default config");
                CanvasConfig::default()
            }
        };
        Self {
            scene: Scene::new(),
            viewport: Viewport::with_limits(config.min_scale, config.max_scale),
            selection: Selection::new(),
            tool: ToolKind::Select,
            interaction: Interaction::Idle,
            pending_link: None,
            records,
            config,
            measure: Box::new(ApproxTextMetrics),
            view_size: (0.0, 0.0),
        }
    }

    /// Use a host text shaper instead of the approximate metrics.
    pub fn with_text_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Replace the note/project records. Link titles resolve against the
    /// new set on the next display list.
    pub fn set_records(&mut self, records: Records) {
        self.records = records;
    }

    pub fn set_view_size(&mut self, width: f32, height: f32) {
        self.view_size = (width, height);
    }

    /// Everything to draw this frame, overlays included.
    pub fn display_list(&self) -> Vec<DisplayItem> {
        let mut items = build_display_list(&self.scene, &self.records, self.selection.as_slice());
        if self.interaction.editing().is_some() {
            for item in &mut items {
                if let DisplayItem::Node(node) = item {
                    node.handles = false;
                }
            }
        }
        if let Some(rect) = self.interaction.rubber_band() {
            items.push(DisplayItem::Marquee(rect));
        }
        if let Interaction::DrawingPath { points } = &self.interaction
            && !points.is_empty()
        {
            items.push(DisplayItem::PenPreview(points.clone()));
        }
        items
    }

    // ─── Input dispatch ──────────────────────────────────────────────────

    pub fn handle(&mut self, event: &InputEvent) -> Vec<CanvasEvent> {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(Point::new(*x, *y), *button, *modifiers),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(Point::new(*x, *y)),
            InputEvent::DoubleClick { x, y } => self.double_click(Point::new(*x, *y)),
            InputEvent::Wheel {
                x,
                y,
                dx,
                dy,
                modifiers,
            } => self.wheel(Point::new(*x, *y), *dx, *dy, *modifiers),
            InputEvent::Key { key, modifiers } => self.key_down(key, *modifiers),
        }
    }

    /// Pointer pressed at `screen`.
    pub fn pointer_down(&mut self, screen: Point, button: PointerButton, modifiers: Modifiers) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let world = self.viewport.to_world(screen);
        let hit = hit_test(&self.scene, world);

        if !self.interaction.persists() {
            log::debug!("dropping stale {} gesture", self.interaction.name());
            self.interaction = Interaction::Idle;
        }

        if let Some(editing) = self.interaction.editing() {
            if hit == Some(editing) {
                // Caret placement inside the edited text.
                return events;
            }
            self.interaction = Interaction::Idle;
            events.push(CanvasEvent::TextEditEnded(editing));
        }

        if button == PointerButton::Middle {
            if self.interaction.is_idle() {
                self.interaction = Interaction::Panning { last: screen };
            }
            return events;
        }

        match self.tool {
            ToolKind::Pen => self.pen_click(world, &mut events),
            ToolKind::Text => {
                self.interaction = Interaction::SizingText {
                    start: world,
                    current: world,
                };
            }
            ToolKind::Rectangle | ToolKind::Circle => {
                if let Some(node) = tools::shape_node(self.tool, world, &self.config) {
                    self.place(node, &mut events);
                }
            }
            ToolKind::NoteLink | ToolKind::ProjectLink => {
                if let Some(target) = self.tool.link_target() {
                    self.pending_link = Some(PendingLink { target, at: world });
                    events.push(CanvasEvent::LinkPickerRequested(target));
                }
            }
            ToolKind::Connect => {
                if let Some(node) = hit {
                    self.connect_click(node, &mut events);
                }
            }
            ToolKind::Select => {
                if let Some((node, handle)) = self.handle_under(world) {
                    self.interaction = Interaction::Resizing {
                        node,
                        handle,
                        last: screen,
                    };
                } else if let Some(node) = hit {
                    self.press_node(node, screen, modifiers, &mut events);
                } else if button == PointerButton::Primary && !modifiers.shift {
                    self.interaction = Interaction::MarqueeSelecting {
                        start: world,
                        current: world,
                    };
                    if self.selection.clear() {
                        events.push(CanvasEvent::SelectionChanged);
                    }
                } else {
                    self.interaction = Interaction::Panning { last: screen };
                }
            }
        }
        events
    }

    /// Pointer moved to `screen`.
    pub fn pointer_move(&mut self, screen: Point) -> Vec<CanvasEvent> {
        let world = self.viewport.to_world(screen);
        let scale = self.viewport.scale;
        let threshold = self.config.drag_threshold;

        match &mut self.interaction {
            Interaction::Panning { last } => {
                let (dx, dy) = (screen.x - last.x, screen.y - last.y);
                *last = screen;
                self.viewport.pan(dx, dy);
                vec![CanvasEvent::ViewportChanged]
            }
            Interaction::DraggingSelection {
                anchor, last, moved, ..
            } => {
                if !*moved {
                    if anchor.distance(screen) <= threshold {
                        return Vec::new();
                    }
                    *moved = true;
                }
                let (dx, dy) = ((screen.x - last.x) / scale, (screen.y - last.y) / scale);
                *last = screen;
                self.scene.translate(self.selection.as_slice(), dx, dy);
                vec![CanvasEvent::SceneChanged]
            }
            Interaction::Resizing { node, handle, last } => {
                let (dx, dy) = ((screen.x - last.x) / scale, (screen.y - last.y) / scale);
                *last = screen;
                if self.scene.resize(*node, *handle, dx, dy) {
                    vec![CanvasEvent::SceneChanged]
                } else {
                    Vec::new()
                }
            }
            Interaction::MarqueeSelecting { current, .. } | Interaction::SizingText { current, .. } => {
                *current = world;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Pointer released at `screen`. Commits the active gesture.
    pub fn pointer_up(&mut self, screen: Point) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let world = self.viewport.to_world(screen);

        let state = std::mem::take(&mut self.interaction);
        match state {
            Interaction::DraggingSelection { moved: true, .. } => {
                self.reparent_dragged();
                events.push(CanvasEvent::SceneChanged);
            }
            Interaction::DraggingSelection {
                moved: false,
                target: Some(target),
                ..
            } => {
                if self.scene.contains(target) && self.selection.select_only(target) {
                    events.push(CanvasEvent::SelectionChanged);
                }
            }
            Interaction::Resizing { node, .. } => {
                if let Some(parent) = self.scene.parent_of(node)
                    && self.scene.relayout(parent)
                {
                    events.push(CanvasEvent::SceneChanged);
                }
            }
            Interaction::MarqueeSelecting { start, .. } => {
                let picked = marquee_select(&self.scene, Bounds::from_corners(start, world));
                log::debug!("marquee picked {} node(s)", picked.len());
                if self.selection.replace_with(picked) {
                    events.push(CanvasEvent::SelectionChanged);
                }
            }
            Interaction::SizingText { start, .. } => self.commit_text(start, world, &mut events),
            Interaction::DraggingSelection { .. } | Interaction::Panning { .. } | Interaction::Idle => {}
            persistent => self.interaction = persistent,
        }
        events
    }

    /// Double-click drills into the clicked node and starts editing text.
    pub fn double_click(&mut self, screen: Point) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        if self.tool != ToolKind::Select {
            return events;
        }
        let world = self.viewport.to_world(screen);
        let Some(hit) = hit_test(&self.scene, world) else {
            return events;
        };
        if self.interaction.editing() == Some(hit) {
            return events;
        }

        if self.selection.select_only(hit) {
            events.push(CanvasEvent::SelectionChanged);
        }
        if let Some(node) = self.scene.node(hit)
            && matches!(node.kind, NodeKind::Text { .. })
        {
            self.interaction = Interaction::EditingText { node: hit };
            events.push(CanvasEvent::TextEditStarted(hit));
        }
        events
    }

    /// Wheel or trackpad scroll at `screen`. Ignored while editing text.
    pub fn wheel(&mut self, screen: Point, dx: f32, dy: f32, modifiers: Modifiers) -> Vec<CanvasEvent> {
        if self.interaction.editing().is_some() {
            return Vec::new();
        }
        let input = WheelInput {
            dx,
            dy,
            zoom_modifier: modifiers.command(),
        };
        if self.viewport.apply_wheel(input, screen, self.config.zoom_sensitivity) {
            vec![CanvasEvent::ViewportChanged]
        } else {
            Vec::new()
        }
    }

    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> Vec<CanvasEvent> {
        let action = ShortcutMap::resolve(key, modifiers.ctrl, modifiers.shift, modifiers.alt, modifiers.meta);

        if let Some(node) = self.interaction.editing() {
            // Keys belong to the text editor; only Escape leaves it.
            if action == Some(ShortcutAction::Deselect) {
                self.interaction = Interaction::Idle;
                return vec![CanvasEvent::TextEditEnded(node)];
            }
            return Vec::new();
        }

        if matches!(self.interaction, Interaction::DrawingPath { .. }) {
            match action {
                Some(ShortcutAction::Confirm) => return self.finish_path(true),
                Some(ShortcutAction::Deselect) => return self.finish_path(false),
                _ => {}
            }
        }

        let Some(action) = action else {
            return Vec::new();
        };
        log::trace!("shortcut {action:?}");
        match action {
            ShortcutAction::ToolSelect => self.set_tool(ToolKind::Select),
            ShortcutAction::ToolRectangle => self.set_tool(ToolKind::Rectangle),
            ShortcutAction::ToolCircle => self.set_tool(ToolKind::Circle),
            ShortcutAction::ToolText => self.set_tool(ToolKind::Text),
            ShortcutAction::ToolPen => self.set_tool(ToolKind::Pen),
            ShortcutAction::ToolConnect => self.set_tool(ToolKind::Connect),
            ShortcutAction::Delete => {
                if self.tool == ToolKind::Select {
                    self.delete_selection()
                } else {
                    Vec::new()
                }
            }
            ShortcutAction::SelectAll => self.select_all(),
            ShortcutAction::Duplicate => self.duplicate(),
            ShortcutAction::Group => self.group(),
            ShortcutAction::Ungroup => self.ungroup(),
            ShortcutAction::ZoomIn => self.zoom_by(ZOOM_STEP),
            ShortcutAction::ZoomOut => self.zoom_by(1.0 / ZOOM_STEP),
            ShortcutAction::BringToFront => self.bring_to_front(),
            ShortcutAction::SendToBack => self.send_to_back(),
            ShortcutAction::Confirm => Vec::new(),
            ShortcutAction::Deselect => {
                let mut events = Vec::new();
                if matches!(self.interaction, Interaction::Connecting { .. }) {
                    self.interaction = Interaction::Idle;
                }
                if self.selection.clear() {
                    events.push(CanvasEvent::SelectionChanged);
                }
                events
            }
        }
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Switch tools. Abandons an unfinished path or connection.
    pub fn set_tool(&mut self, tool: ToolKind) -> Vec<CanvasEvent> {
        if tool == self.tool {
            return Vec::new();
        }
        match &self.interaction {
            Interaction::DrawingPath { points } => {
                log::debug!("abandoning path with {} point(s)", points.len());
                self.interaction = Interaction::Idle;
            }
            Interaction::Connecting { from } => {
                log::debug!("abandoning connection from {from}");
                self.interaction = Interaction::Idle;
            }
            _ => {}
        }
        self.pending_link = None;
        log::debug!("tool {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        vec![CanvasEvent::ToolChanged(tool)]
    }

    /// Place the link node the picker was opened for.
    pub fn complete_link(&mut self, reference_id: &str) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let Some(PendingLink { target, at }) = self.pending_link.take() else {
            return events;
        };
        let node = tools::link_node(target, reference_id, at, &self.config);
        self.place(node, &mut events);
        events
    }

    /// The picker was dismissed without a choice.
    pub fn cancel_link(&mut self) {
        self.pending_link = None;
    }

    /// Replace the content of the text node being edited.
    pub fn edit_text(&mut self, content: &str) -> Vec<CanvasEvent> {
        match self.interaction.editing() {
            Some(node) if self.scene.set_text(node, content, self.measure.as_ref()) => {
                vec![CanvasEvent::SceneChanged]
            }
            _ => Vec::new(),
        }
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Delete the selection and everything beneath it.
    pub fn delete_selection(&mut self) -> Vec<CanvasEvent> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let removed = self.scene.remove(self.selection.as_slice());
        self.selection.clear();
        if let Some(node) = self.interaction.editing()
            && !self.scene.contains(node)
        {
            self.interaction = Interaction::Idle;
        }
        log::debug!("deleted {} node(s)", removed.len());
        vec![CanvasEvent::NodesDeleted(removed), CanvasEvent::SelectionChanged]
    }

    pub fn bring_to_front(&mut self) -> Vec<CanvasEvent> {
        self.with_selection(|scene, ids| {
            scene.bring_to_front(ids);
            !ids.is_empty()
        })
    }

    pub fn send_to_back(&mut self) -> Vec<CanvasEvent> {
        self.with_selection(|scene, ids| {
            scene.send_to_back(ids);
            !ids.is_empty()
        })
    }

    pub fn align(&mut self, alignment: Alignment) -> Vec<CanvasEvent> {
        self.with_selection(|scene, ids| arrange::align(scene, ids, alignment))
    }

    pub fn group(&mut self) -> Vec<CanvasEvent> {
        let group = arrange::group(&mut self.scene, self.selection.as_slice());
        self.select_created(group)
    }

    pub fn wrap_in_stack(&mut self) -> Vec<CanvasEvent> {
        let stack = arrange::wrap_in_stack(&mut self.scene, self.selection.as_slice(), &self.config);
        self.select_created(stack)
    }

    pub fn ungroup(&mut self) -> Vec<CanvasEvent> {
        let released = arrange::ungroup(&mut self.scene, self.selection.as_slice());
        let changed = self.selection.prune(&self.scene);
        if !changed && released.is_empty() {
            return Vec::new();
        }
        self.selection.replace_with(released);
        vec![CanvasEvent::SceneChanged, CanvasEvent::SelectionChanged]
    }

    pub fn duplicate(&mut self) -> Vec<CanvasEvent> {
        let copies = arrange::duplicate(&mut self.scene, self.selection.as_slice());
        if copies.is_empty() {
            return Vec::new();
        }
        let mut events: Vec<CanvasEvent> = copies.iter().copied().map(CanvasEvent::NodeCreated).collect();
        self.selection.replace_with(copies);
        events.push(CanvasEvent::SelectionChanged);
        events
    }

    /// New empty stack with its top-left at the screen point.
    pub fn create_stack(&mut self, screen: Point) -> Vec<CanvasEvent> {
        let at = self.viewport.to_world(screen);
        let stack = arrange::create_stack(&mut self.scene, at, &self.config);
        self.select_created(Some(stack))
    }

    /// New empty frame with its top-left at the screen point.
    pub fn create_frame(&mut self, screen: Point) -> Vec<CanvasEvent> {
        let at = self.viewport.to_world(screen);
        let frame = arrange::create_frame(&mut self.scene, at, &self.config);
        self.select_created(Some(frame))
    }

    /// Select every top-level node.
    pub fn select_all(&mut self) -> Vec<CanvasEvent> {
        let roots: Vec<NodeId> = self
            .scene
            .nodes()
            .into_iter()
            .filter(|n| self.scene.parent_of(n.id).is_none())
            .map(|n| n.id)
            .collect();
        if self.selection.replace_with(roots) {
            vec![CanvasEvent::SelectionChanged]
        } else {
            Vec::new()
        }
    }

    /// Edit a node's style from the property panel.
    pub fn update_style(&mut self, id: NodeId, edit: impl FnOnce(&mut Style)) -> Vec<CanvasEvent> {
        if self.scene.set_style(id, edit, self.measure.as_ref()) {
            vec![CanvasEvent::SceneChanged]
        } else {
            Vec::new()
        }
    }

    pub fn set_layout(&mut self, id: NodeId, layout: Layout) -> Vec<CanvasEvent> {
        if self.scene.set_layout(id, layout) {
            vec![CanvasEvent::SceneChanged]
        } else {
            Vec::new()
        }
    }

    pub fn set_text_auto_resize(&mut self, id: NodeId, mode: TextAutoResize) -> Vec<CanvasEvent> {
        if self.scene.set_text_auto_resize(id, mode, self.measure.as_ref()) {
            vec![CanvasEvent::SceneChanged]
        } else {
            Vec::new()
        }
    }

    pub fn disconnect(&mut self, id: ConnectionId) -> Vec<CanvasEvent> {
        if self.scene.disconnect(id) {
            vec![CanvasEvent::SceneChanged]
        } else {
            Vec::new()
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────

    /// Insert a freshly created node on top, select it, and return to the
    /// select tool.
    fn place(&mut self, node: CanvasNode, events: &mut Vec<CanvasEvent>) -> NodeId {
        let z = self.scene.next_z_index();
        let id = self.scene.insert(node.with_z(z));
        log::debug!("created {id}");
        events.push(CanvasEvent::NodeCreated(id));
        if self.selection.select_only(id) {
            events.push(CanvasEvent::SelectionChanged);
        }
        if self.tool != ToolKind::Select {
            self.tool = ToolKind::Select;
            events.push(CanvasEvent::ToolChanged(ToolKind::Select));
        }
        id
    }

    fn select_created(&mut self, created: Option<NodeId>) -> Vec<CanvasEvent> {
        let Some(id) = created else {
            return Vec::new();
        };
        self.selection.select_only(id);
        vec![
            CanvasEvent::NodeCreated(id),
            CanvasEvent::SceneChanged,
            CanvasEvent::SelectionChanged,
        ]
    }

    fn with_selection(&mut self, op: impl FnOnce(&mut Scene, &[NodeId]) -> bool) -> Vec<CanvasEvent> {
        self.selection.prune(&self.scene);
        if op(&mut self.scene, self.selection.as_slice()) {
            vec![CanvasEvent::SceneChanged]
        } else {
            Vec::new()
        }
    }

    /// Resize handle of the sole selected node under `world`, if any.
    fn handle_under(&self, world: Point) -> Option<(NodeId, ResizeHandle)> {
        let id = self.selection.sole()?;
        let node = self.scene.node(id)?;
        if node.kind.text_auto_resize() == Some(TextAutoResize::Auto) {
            return None;
        }
        let size = self.config.handle_size / self.viewport.scale;
        hit_test_handle(node, world, size).map(|h| (id, h))
    }

    /// Select-tool press on a node: update the selection and arm a drag.
    fn press_node(&mut self, hit: NodeId, screen: Point, modifiers: Modifiers, events: &mut Vec<CanvasEvent>) {
        let root = self.scene.root_ancestor(hit);
        let drilled = modifiers.command() || self.selection.contains(hit);
        let target = if drilled { hit } else { root };

        let click = if modifiers.shift {
            self.selection.toggle(hit);
            events.push(CanvasEvent::SelectionChanged);
            None
        } else if !self.selection.contains(target) {
            self.selection.select_only(target);
            events.push(CanvasEvent::SelectionChanged);
            Some(target)
        } else if target != hit {
            // Second click on a child of a selected group drills in.
            Some(hit)
        } else {
            Some(target)
        };

        self.interaction = Interaction::DraggingSelection {
            anchor: screen,
            last: screen,
            moved: false,
            target: click,
        };
    }

    /// After a drag, move every dragged node into the container under its
    /// centre (or out to the top level) and relayout affected stacks.
    fn reparent_dragged(&mut self) {
        let selected = self.selection.as_slice().to_vec();
        let dragged: Vec<NodeId> = selected
            .iter()
            .copied()
            .filter(|id| self.scene.contains(*id))
            .filter(|id| !selected.iter().any(|other| self.scene.is_ancestor_of(*other, *id)))
            .collect();

        let mut affected: Vec<NodeId> = Vec::new();
        for id in dragged {
            let Some(center) = self.scene.node(id).map(CanvasNode::center) else {
                continue;
            };
            let mut excluded = selected.clone();
            excluded.extend(self.scene.descendants(id));
            let target = container_at(&self.scene, center, &excluded);
            let old = self.scene.parent_of(id);

            if target == old {
                affected.extend(target);
                continue;
            }
            match self.scene.attach(id, target) {
                Ok(_) => {
                    log::debug!("{id} dropped into {target:?}");
                    affected.extend(old);
                    affected.extend(target);
                }
                Err(err) => log::warn!("drop of {id} rejected: {err}"),
            }
        }

        let mut seen = Vec::new();
        for parent in affected {
            if !seen.contains(&parent) {
                seen.push(parent);
                self.scene.relayout(parent);
            }
        }
    }

    fn commit_text(&mut self, start: Point, end: Point, events: &mut Vec<CanvasEvent>) {
        let node = if start.distance(end) > self.config.text_drag_threshold {
            tools::text_box(Bounds::from_corners(start, end), &self.config)
        } else {
            tools::text_node(start, &self.config)
        };
        let id = self.place(node, events);
        self.interaction = Interaction::EditingText { node: id };
        events.push(CanvasEvent::TextEditStarted(id));
    }

    fn pen_click(&mut self, world: Point, events: &mut Vec<CanvasEvent>) {
        let radius = self.config.pen_close_radius;
        let closes = match &self.interaction {
            Interaction::DrawingPath { points } => points.len() >= 3 && points[0].distance(world) < radius,
            _ => false,
        };
        if closes {
            events.extend(self.finish_path(true));
        } else if let Interaction::DrawingPath { points } = &mut self.interaction {
            points.push(world);
        } else {
            self.interaction = Interaction::DrawingPath { points: vec![world] };
        }
    }

    /// End the pen path. Fewer than two points are dropped silently.
    fn finish_path(&mut self, closed: bool) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let Interaction::DrawingPath { points } = std::mem::take(&mut self.interaction) else {
            return events;
        };
        match tools::path_node(&points, closed) {
            Some(node) => {
                self.place(node, &mut events);
            }
            None => log::debug!("discarding path with {} point(s)", points.len()),
        }
        events
    }

    fn connect_click(&mut self, node: NodeId, events: &mut Vec<CanvasEvent>) {
        let Interaction::Connecting { from } = self.interaction else {
            self.interaction = Interaction::Connecting { from: node };
            return;
        };
        self.interaction = Interaction::Idle;
        if from != node
            && let Some(id) = self.scene.connect(from, node)
        {
            log::debug!("connected {from} -> {node}");
            events.push(CanvasEvent::ConnectionCreated(id));
        }
        events.extend(self.set_tool(ToolKind::Select));
    }

    fn zoom_by(&mut self, factor: f32) -> Vec<CanvasEvent> {
        let centre = Point::new(self.view_size.0 / 2.0, self.view_size.1 / 2.0);
        if self.viewport.zoom_at(centre, self.viewport.scale * factor) {
            vec![CanvasEvent::ViewportChanged]
        } else {
            Vec::new()
        }
    }
}
