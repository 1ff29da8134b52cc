//! Materials, textures and the appearance applied while drawing

use serde::{Deserialize, Serialize};

/// Lighting coefficients of a surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub shininess: f32,
    pub emission: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl Default for Material {
    /// Appearance used when no ancestor supplies a material
    fn default() -> Self {
        Self {
            shininess: 10.0,
            emission: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.1, 0.1, 0.1, 1.0],
            diffuse: [0.6, 0.6, 0.6, 1.0],
            specular: [0.6, 0.6, 0.6, 1.0],
        }
    }
}

/// An image a component can be textured with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    pub id: String,
    pub file: String,
}

/// The material, texture and texture scale in effect for drawing
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    pub material: Material,
    pub texture: Option<Texture>,
    pub length_s: f32,
    pub length_t: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            material: Material::default(),
            texture: None,
            length_s: 1.0,
            length_t: 1.0,
        }
    }
}

/// Appearance frames pushed during one traversal
///
/// The bottom frame is the default appearance and is never popped.
#[derive(Debug, Default)]
pub(crate) struct AppearanceStack {
    base: Appearance,
    frames: Vec<Appearance>,
}

impl AppearanceStack {
    pub(crate) fn top(&self) -> &Appearance {
        self.frames.last().unwrap_or(&self.base)
    }

    pub(crate) fn push(&mut self, appearance: Appearance) {
        self.frames.push(appearance);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}
