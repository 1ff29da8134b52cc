//! Scene loading errors and warnings
//!
//! Fatal problems abort the load with a [`SceneError`]. Problems with a safe
//! substitute are collected as [`SceneWarning`]s on the loaded graph.

use thiserror::Error;

/// Fatal scene load failures
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Scene description has no root component id")]
    MissingRoot,

    #[error("Root component '{0}' is not declared")]
    UnknownRoot(String),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Component '{parent}' references unknown component '{child}'")]
    DanglingComponentRef { parent: String, child: String },

    #[error("Component '{parent}' references unknown primitive '{child}'")]
    DanglingPrimitiveRef { parent: String, child: String },

    /// The component graph reachable from the root contains a cycle
    #[error("Cycle in component graph: '{0}' contains itself")]
    Cycle(String),

    #[error("Invalid primitive '{id}': {reason}")]
    InvalidPrimitive { id: String, reason: String },

    #[error("Invalid animation '{id}': {reason}")]
    InvalidAnimation { id: String, reason: String },

    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Non-fatal load problems and the default substituted for each
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneWarning {
    #[error("Component '{component}': unknown material '{material}', using inherit")]
    DanglingMaterial { component: String, material: String },

    #[error("Component '{component}': unknown texture '{texture}', using none")]
    DanglingTexture { component: String, texture: String },

    #[error("Component '{component}': unknown transformation '{transformation}', using identity")]
    DanglingTransformation {
        component: String,
        transformation: String,
    },

    #[error("Component '{component}': unknown animation '{animation}', ignored")]
    DanglingAnimation { component: String, animation: String },

    #[error("Component '{component}': texture scale must be positive, using 1.0")]
    InvalidTextureScale { component: String },

    #[error("Component '{component}': highlight scale must be positive, using 1.0")]
    InvalidHighlightScale { component: String },

    #[error("Component '{component}': empty material list, using inherit")]
    EmptyMaterials { component: String },

    #[error("Component '{component}' has no children")]
    NoChildren { component: String },

    #[error("Component '{component}' is not reachable from the root")]
    UnreachableComponent { component: String },
}
