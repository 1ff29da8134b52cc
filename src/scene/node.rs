//! Scene graph components

use bevy::math::Mat4;

/// A component's material slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaterialRef {
    /// Material declared under this id
    Explicit(String),
    /// Whatever material the parent has in effect
    Inherit,
}

/// A component's texture
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TextureRef {
    /// Texture declared under this id, repeated by the component's own scale
    Explicit(String),
    /// The parent's texture and texture scale
    #[default]
    Inherit,
    /// Untextured
    None,
}

/// Pulsing highlight drawn over a component's own primitives
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    pub color: [f32; 4],
    /// Peak scale reached by the pulse
    pub scale: f32,
    pub active: bool,
}

/// A composite node of the scene graph
///
/// Children are indices into the owning graph's component and primitive
/// tables, kept in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub(crate) id: String,
    pub(crate) component_children: Vec<usize>,
    pub(crate) primitive_children: Vec<usize>,
    pub(crate) transformation: Option<Mat4>,
    pub(crate) materials: Vec<MaterialRef>,
    pub(crate) current_material: usize,
    pub(crate) texture: TextureRef,
    pub(crate) length_s: f32,
    pub(crate) length_t: f32,
    pub(crate) highlight: Option<Highlight>,
    pub(crate) animation: Option<usize>,
    pub(crate) pick_id: Option<u32>,
}

impl SceneNode {
    /// A childless component inheriting everything from its parent
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_children: Vec::new(),
            primitive_children: Vec::new(),
            transformation: None,
            materials: vec![MaterialRef::Inherit],
            current_material: 0,
            texture: TextureRef::Inherit,
            length_s: 1.0,
            length_t: 1.0,
            highlight: None,
            animation: None,
            pick_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transformation(&self) -> Option<&Mat4> {
        self.transformation.as_ref()
    }

    pub fn materials(&self) -> &[MaterialRef] {
        &self.materials
    }

    /// The selected material slot
    pub fn material(&self) -> &MaterialRef {
        self.materials
            .get(self.current_material)
            .unwrap_or(&MaterialRef::Inherit)
    }

    pub fn current_material_index(&self) -> usize {
        self.current_material
    }

    /// Select the next material, wrapping around
    pub fn next_material(&mut self) {
        if !self.materials.is_empty() {
            self.current_material = (self.current_material + 1) % self.materials.len();
        }
    }

    pub fn texture(&self) -> &TextureRef {
        &self.texture
    }

    /// Texture repeat factors currently in effect for this component
    pub fn texture_scale(&self) -> (f32, f32) {
        (self.length_s, self.length_t)
    }

    /// Adopt the parent's texture scale if the texture is inherited
    pub fn update_tex_coords(&mut self, length_s: f32, length_t: f32) {
        if self.texture == TextureRef::Inherit {
            self.length_s = length_s;
            self.length_t = length_t;
        }
    }

    /// Whether displaying this node leaves the active appearance unchanged
    pub fn is_fully_inherited(&self) -> bool {
        *self.material() == MaterialRef::Inherit && self.texture == TextureRef::Inherit
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn pick_id(&self) -> Option<u32> {
        self.pick_id
    }

    pub fn component_child_count(&self) -> usize {
        self.component_children.len()
    }

    pub fn primitive_child_count(&self) -> usize {
        self.primitive_children.len()
    }
}
