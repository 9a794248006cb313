pub mod arrange;
pub mod config;
pub mod error;
pub mod id;
pub mod layout;
pub mod model;
pub mod records;
pub mod scene;
pub mod text;
pub mod viewport;

pub use arrange::Alignment;
pub use config::CanvasConfig;
pub use error::{ConfigError, SceneError};
pub use id::{ConnectionId, NodeId};
pub use layout::apply_auto_layout;
pub use model::*;
pub use records::{LinkSource, NoteRecord, ProjectRecord, Records, UNKNOWN_TITLE, link_title};
pub use scene::Scene;
pub use text::{ApproxTextMetrics, TextMeasure};
pub use viewport::{Viewport, WheelInput};
