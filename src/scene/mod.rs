//! Scene graph
//!
//! A declarative scene of components and primitives, loaded from a
//! [`SceneDescription`] and drawn through a [`SceneContext`].
//!
//! # Module Organization
//!
//! - `description` - serde model of a parsed scene
//! - `loader` - two-pass build with cycle detection
//! - `graph` - [`SceneGraph`] ownership, traversal and animation ticks
//! - `node` - [`SceneNode`] with material / texture inheritance
//! - `primitive` - [`Shape`] validation and the default [`Primitive`] drawable
//! - `context` - [`SceneContext`] and [`Drawable`] capabilities
//! - `appearance` - materials, textures, the per-traversal appearance stack
//! - `keyframe` - keyframe animations
//! - `trace` - a recording [`SceneContext`]
//! - `error` - [`SceneError`] (fatal) and [`SceneWarning`] (tolerated)

pub mod appearance;
pub mod context;
pub mod description;
pub mod error;
pub mod graph;
pub mod keyframe;
pub mod loader;
pub mod node;
pub mod primitive;
pub mod trace;


pub use appearance::{Appearance, Material, Texture};
pub use context::{Drawable, HighlightMode, PickTarget, SceneContext};
pub use description::SceneDescription;
pub use error::{SceneError, SceneResult, SceneWarning};
pub use graph::{walk_components, SceneGraph};
pub use keyframe::{Keyframe, KeyframeAnimation};
pub use node::{Highlight, MaterialRef, SceneNode, TextureRef};
pub use primitive::{DrawableFactory, Primitive, Shape, ShapeFactory};
pub use trace::{TraceContext, TraceEvent};
