//! Capabilities the scene graph draws through
//!
//! The graph never talks to a graphics API. A renderer implements
//! [`SceneContext`] (matrix stack, appearance, highlight mode, picking and
//! a clock) and every leaf shape implements [`Drawable`].

use bevy::math::Mat4;
use std::fmt;

use crate::scene::appearance::Appearance;
use crate::scene::primitive::Shape;

/// What a pick id resolves to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PickTarget {
    /// A scene component by id
    Component(String),
    /// A board tile
    Tile { x: u8, y: u8 },
    /// A checkers piece by its stable id
    Piece(u8),
}

impl fmt::Display for PickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickTarget::Component(id) => write!(f, "component '{id}'"),
            PickTarget::Tile { x, y } => write!(f, "tile ({x}, {y})"),
            PickTarget::Piece(id) => write!(f, "piece #{id}"),
        }
    }
}

/// Highlight rendering mode for a component's primitives
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightMode {
    pub color: [f32; 4],
    /// Current pulse scale, between 1 and the declared scale
    pub scale: f32,
}

/// Rendering services consumed by the traversal
pub trait SceneContext {
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    /// Post-multiply the current matrix
    fn multiply_matrix(&mut self, matrix: &Mat4);
    fn apply_appearance(&mut self, appearance: &Appearance);
    /// Switch highlight mode on (`Some`) or off (`None`)
    fn set_highlight(&mut self, highlight: Option<&HighlightMode>);
    fn draw_shape(&mut self, id: &str, shape: &Shape, length_s: f32, length_t: f32);
    /// Attribute subsequent draws to `target` for picking
    fn register_for_pick(&mut self, pick_id: u32, target: PickTarget);
    fn clear_pick_registration(&mut self);
    /// Monotonic time in seconds
    fn now(&self) -> f64;
}

/// A leaf the scene graph can draw
pub trait Drawable: Send + Sync + fmt::Debug {
    fn display(&self, ctx: &mut dyn SceneContext);

    /// Texture repeat factors in effect for the next display
    fn update_tex_coords(&mut self, length_s: f32, length_t: f32);
}
