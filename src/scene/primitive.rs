//! Leaf shapes
//!
//! Shapes are only described and validated here; tessellation belongs to
//! whatever [`SceneContext`] draws them.

use serde::{Deserialize, Serialize};

use crate::scene::context::{Drawable, SceneContext};

/// Geometry of a primitive and its parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Triangle {
        p1: [f32; 3],
        p2: [f32; 3],
        p3: [f32; 3],
    },
    Cylinder {
        base: f32,
        top: f32,
        height: f32,
        slices: u32,
        stacks: u32,
    },
    Sphere {
        radius: f32,
        slices: u32,
        stacks: u32,
    },
    Torus {
        inner: f32,
        outer: f32,
        slices: u32,
        loops: u32,
    },
    Patch {
        degree_u: u32,
        degree_v: u32,
        parts_u: u32,
        parts_v: u32,
        control_points: Vec<[f32; 3]>,
    },
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rectangle { .. } => "rectangle",
            Shape::Triangle { .. } => "triangle",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Sphere { .. } => "sphere",
            Shape::Torus { .. } => "torus",
            Shape::Patch { .. } => "patch",
        }
    }

    /// Reject parameters no renderer could tessellate
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Shape::Rectangle { x1, y1, x2, y2 } => {
                if x1 == x2 || y1 == y2 {
                    return Err("rectangle has zero area".to_string());
                }
            }
            Shape::Triangle { p1, p2, p3 } => {
                let a = sub(*p2, *p1);
                let b = sub(*p3, *p1);
                let cross = [
                    a[1] * b[2] - a[2] * b[1],
                    a[2] * b[0] - a[0] * b[2],
                    a[0] * b[1] - a[1] * b[0],
                ];
                if cross.iter().all(|c| c.abs() < f32::EPSILON) {
                    return Err("triangle vertices are collinear".to_string());
                }
            }
            Shape::Cylinder {
                base,
                top,
                height,
                slices,
                stacks,
            } => {
                if *base < 0.0 || *top < 0.0 || (*base == 0.0 && *top == 0.0) {
                    return Err("cylinder radii must be non-negative and not both zero".to_string());
                }
                if *height <= 0.0 {
                    return Err("cylinder height must be positive".to_string());
                }
                if *slices < 3 || *stacks < 1 {
                    return Err("cylinder needs at least 3 slices and 1 stack".to_string());
                }
            }
            Shape::Sphere {
                radius,
                slices,
                stacks,
            } => {
                if *radius <= 0.0 {
                    return Err("sphere radius must be positive".to_string());
                }
                if *slices < 3 || *stacks < 2 {
                    return Err("sphere needs at least 3 slices and 2 stacks".to_string());
                }
            }
            Shape::Torus {
                inner,
                outer,
                slices,
                loops,
            } => {
                if *inner <= 0.0 || *outer <= 0.0 {
                    return Err("torus radii must be positive".to_string());
                }
                if *slices < 3 || *loops < 3 {
                    return Err("torus needs at least 3 slices and 3 loops".to_string());
                }
            }
            Shape::Patch {
                degree_u,
                degree_v,
                parts_u,
                parts_v,
                control_points,
            } => {
                if *degree_u < 1 || *degree_v < 1 {
                    return Err("patch degrees must be at least 1".to_string());
                }
                if *parts_u < 1 || *parts_v < 1 {
                    return Err("patch needs at least 1 part in each direction".to_string());
                }
                let expected = degree_u
                    .checked_add(1)
                    .zip(degree_v.checked_add(1))
                    .and_then(|(u, v)| u.checked_mul(v))
                    .ok_or_else(|| format!("patch degree {degree_u}x{degree_v} is too large"))?;
                if control_points.len() as u64 != u64::from(expected) {
                    return Err(format!(
                        "patch of degree {degree_u}x{degree_v} needs {expected} control points, got {}",
                        control_points.len()
                    ));
                }
            }
        }
        Ok(())
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// A shape drawn with the texture scale pushed down by its parent component
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    id: String,
    shape: Shape,
    length_s: f32,
    length_t: f32,
}

impl Primitive {
    pub fn new(id: impl Into<String>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            shape,
            length_s: 1.0,
            length_t: 1.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn texture_scale(&self) -> (f32, f32) {
        (self.length_s, self.length_t)
    }
}

impl Drawable for Primitive {
    fn display(&self, ctx: &mut dyn SceneContext) {
        ctx.draw_shape(&self.id, &self.shape, self.length_s, self.length_t);
    }

    fn update_tex_coords(&mut self, length_s: f32, length_t: f32) {
        self.length_s = length_s;
        self.length_t = length_t;
    }
}

/// Builds the drawable for each declared primitive
pub trait DrawableFactory {
    fn create(&mut self, id: &str, shape: &Shape) -> Box<dyn Drawable>;
}

/// Factory producing plain [`Primitive`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapeFactory;

impl DrawableFactory for ShapeFactory {
    fn create(&mut self, id: &str, shape: &Shape) -> Box<dyn Drawable> {
        Box::new(Primitive::new(id, shape.clone()))
    }
}
