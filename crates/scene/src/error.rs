//! Error types for scene construction and animation.

use thiserror::Error;

/// Error type for scene graph operations.
///
/// Every variant is a configuration problem detected while building or
/// rewiring the graph; per-frame propagation itself cannot fail.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A node required by name is not registered in the scene.
    #[error("Scene node '{0}' not found")]
    MissingNode(String),

    /// Two nodes were registered under the same name.
    #[error("Scene node name '{0}' is already in use")]
    DuplicateName(String),

    /// A handle that does not belong to this graph (or was never inserted).
    #[error("Scene node handle is not part of this graph")]
    UnknownNode,

    /// Reparenting would make a node its own ancestor.
    #[error("Parenting '{node}' under '{parent}' would create a cycle")]
    Cycle {
        /// Node being reparented.
        node: String,
        /// Requested parent.
        parent: String,
    },

    /// A scene description could not be parsed.
    #[error("Invalid scene description: {0}")]
    Description(#[from] serde_json::Error),
}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
