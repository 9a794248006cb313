//! Read-only note and project records supplied by the host application.
//!
//! Link nodes only store a reference id. Titles are looked up here at render
//! time, so renames show up live and deleted records degrade to a placeholder.

use crate::model::{CanvasNode, NodeKind};
use serde::{Deserialize, Serialize};

/// Title shown for a link whose record no longer exists.
pub const UNKNOWN_TITLE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
}

/// Lookup seam between link nodes and whatever owns the records.
pub trait LinkSource {
    fn note_title(&self, id: &str) -> Option<&str>;
    fn project_title(&self, id: &str) -> Option<&str>;
}

/// In-memory record collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Records {
    pub notes: Vec<NoteRecord>,
    pub projects: Vec<ProjectRecord>,
}

impl Records {
    pub fn new(notes: Vec<NoteRecord>, projects: Vec<ProjectRecord>) -> Self {
        Self { notes, projects }
    }
}

impl LinkSource for Records {
    fn note_title(&self, id: &str) -> Option<&str> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.title.as_str())
    }

    fn project_title(&self, id: &str) -> Option<&str> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.title.as_str())
    }
}

/// Resolve the display title of a link node.
///
/// Returns `None` for nodes that are not links, and [`UNKNOWN_TITLE`] for
/// dangling references.
pub fn link_title<'a>(node: &CanvasNode, source: &'a dyn LinkSource) -> Option<&'a str> {
    let title = match &node.kind {
        NodeKind::NoteLink { reference_id } => source.note_title(reference_id),
        NodeKind::ProjectLink { reference_id } => source.project_title(reference_id),
        _ => return None,
    };
    Some(title.unwrap_or(UNKNOWN_TITLE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::Bounds;

    fn link(kind: NodeKind) -> CanvasNode {
        CanvasNode::new(NodeId::with_prefix("link"), kind, Bounds::new(0.0, 0.0, 150.0, 100.0))
    }

    #[test]
    fn titles_resolve_live() {
        let mut records = Records::new(
            vec![NoteRecord {
                id: "n1".into(),
                title: "Reading notes".into(),
            }],
            vec![ProjectRecord {
                id: "p1".into(),
                title: "Garden".into(),
            }],
        );
        let note = link(NodeKind::NoteLink {
            reference_id: "n1".into(),
        });
        let project = link(NodeKind::ProjectLink {
            reference_id: "p1".into(),
        });
        assert_eq!(link_title(&note, &records), Some("Reading notes"));
        assert_eq!(link_title(&project, &records), Some("Garden"));

        records.notes[0].title = "Renamed".into();
        assert_eq!(link_title(&note, &records), Some("Renamed"));
    }

    #[test]
    fn dangling_reference_is_unknown() {
        let records = Records::default();
        let note = link(NodeKind::NoteLink {
            reference_id: "gone".into(),
        });
        assert_eq!(link_title(&note, &records), Some(UNKNOWN_TITLE));
        assert_eq!(link_title(&link(NodeKind::Rectangle), &records), None);
    }
}
