//! Serde model of an already-parsed scene
//!
//! The `"inherit"` and `"none"` markers of material and texture references
//! are turned into [`MaterialSpec`] / [`TextureSpec`] variants during
//! deserialization; nothing past this module compares against strings.

use bevy::math::{Mat4, Vec3};
use serde::Deserialize;
use std::path::Path;

use crate::scene::appearance::{Material, Texture};
use crate::scene::error::SceneResult;
use crate::scene::keyframe::Keyframe;
use crate::scene::primitive::Shape;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SceneDescription {
    pub root: String,
    #[serde(default)]
    pub materials: Vec<MaterialDescription>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    #[serde(default)]
    pub transformations: Vec<TransformationDescription>,
    #[serde(default)]
    pub animations: Vec<AnimationDescription>,
    #[serde(default)]
    pub primitives: Vec<PrimitiveDescription>,
    #[serde(default)]
    pub components: Vec<ComponentDescription>,
}

impl SceneDescription {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MaterialDescription {
    pub id: String,
    #[serde(flatten)]
    pub material: Material,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TransformationDescription {
    pub id: String,
    pub ops: Vec<TransformOp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// One step of a transformation; angles in degrees
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformOp {
    Translate([f32; 3]),
    Rotate { axis: Axis, angle: f32 },
    Scale([f32; 3]),
}

impl TransformOp {
    pub fn matrix(&self) -> Mat4 {
        match self {
            TransformOp::Translate(v) => Mat4::from_translation(Vec3::from_array(*v)),
            TransformOp::Rotate { axis, angle } => {
                Mat4::from_axis_angle(axis.unit(), angle.to_radians())
            }
            TransformOp::Scale(v) => Mat4::from_scale(Vec3::from_array(*v)),
        }
    }
}

/// Compose ops left to right, each post-multiplied onto the previous ones
pub fn compose(ops: &[TransformOp]) -> Mat4 {
    ops.iter().fold(Mat4::IDENTITY, |m, op| m * op.matrix())
}

#[derive(Clone, Debug, Deserialize)]
pub struct AnimationDescription {
    pub id: String,
    pub keyframes: Vec<Keyframe>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PrimitiveDescription {
    pub id: String,
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformationSpec {
    /// A named transformation
    Ref(String),
    /// Ops declared on the component itself
    Inline(Vec<TransformOp>),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MaterialSpec {
    Inherit,
    Id(String),
}

impl From<String> for MaterialSpec {
    fn from(value: String) -> Self {
        if value == "inherit" {
            MaterialSpec::Inherit
        } else {
            MaterialSpec::Id(value)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum TextureSpec {
    #[default]
    Inherit,
    None,
    Id(String),
}

impl From<String> for TextureSpec {
    fn from(value: String) -> Self {
        match value.as_str() {
            "inherit" => TextureSpec::Inherit,
            "none" => TextureSpec::None,
            _ => TextureSpec::Id(value),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TextureDescription {
    #[serde(default)]
    pub id: TextureSpec,
    pub length_s: Option<f32>,
    pub length_t: Option<f32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChildrenDescription {
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub primitives: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct HighlightDescription {
    pub color: [f32; 4],
    pub scale: f32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ComponentDescription {
    pub id: String,
    #[serde(default)]
    pub transformation: Option<TransformationSpec>,
    #[serde(default)]
    pub materials: Vec<MaterialSpec>,
    #[serde(default)]
    pub texture: TextureDescription,
    #[serde(default)]
    pub children: ChildrenDescription,
    #[serde(default)]
    pub highlight: Option<HighlightDescription>,
    #[serde(default)]
    pub animation: Option<String>,
    #[serde(default)]
    pub pick_id: Option<u32>,
}
