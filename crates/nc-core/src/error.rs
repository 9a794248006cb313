use crate::id::NodeId;
use std::fmt;

/// Structural errors raised by the scene store.
///
/// Interaction code treats all of these as recoverable: a rejected reparent
/// simply leaves the node where it was.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    NodeNotFound(NodeId),
    ParentNotFound(NodeId),
    /// The requested parent is neither a `group` nor a `frame`.
    NotAContainer(NodeId),
    SelfParent(NodeId),
    /// The requested parent lives inside the node's own subtree.
    Cycle { node: NodeId, parent: NodeId },
    /// Reported by [`Scene::validate`](crate::scene::Scene::validate).
    InvariantViolation(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NodeNotFound(id) => write!(f, "node {id} does not exist"),
            SceneError::ParentNotFound(id) => write!(f, "parent {id} does not exist"),
            SceneError::NotAContainer(id) => {
                write!(f, "node {id} is not a group or frame")
            }
            SceneError::SelfParent(id) => write!(f, "node {id} cannot be its own parent"),
            SceneError::Cycle { node, parent } => {
                write!(f, "cannot move {node} into its own descendant {parent}")
            }
            SceneError::InvariantViolation(msg) => write!(f, "invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {}

/// Failure to load a [`CanvasConfig`](crate::config::CanvasConfig).
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    /// A value parsed but is out of range (e.g. `min_scale > max_scale`).
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "invalid canvas config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid canvas config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
