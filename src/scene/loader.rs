//! Building a [`SceneGraph`] from a [`SceneDescription`]
//!
//! Definitions (materials, textures, transformations, animations,
//! primitives) are loaded first. Components are then declared in one pass
//! and wired in a second, so a component may reference one declared after
//! it. Cycle detection runs once, after wiring.

use bevy::math::Mat4;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use crate::scene::appearance::{Material, Texture};
use crate::scene::description::{
    compose, ComponentDescription, MaterialSpec, SceneDescription, TextureSpec,
    TransformationSpec,
};
use crate::scene::error::{SceneError, SceneResult, SceneWarning};
use crate::scene::graph::{walk_components, PrimitiveEntry, SceneGraph, DEFAULT_HIGHLIGHT_PERIOD};
use crate::scene::keyframe::KeyframeAnimation;
use crate::scene::node::{Highlight, MaterialRef, SceneNode, TextureRef};
use crate::scene::primitive::{DrawableFactory, ShapeFactory};

fn fatal(err: SceneError) -> SceneError {
    error!("[SCENE] Load failed: {}", err);
    err
}

fn insert_unique<T>(
    map: &mut HashMap<String, T>,
    kind: &'static str,
    id: &str,
    value: T,
) -> SceneResult<()> {
    if map.insert(id.to_string(), value).is_some() {
        return Err(fatal(SceneError::DuplicateId {
            kind,
            id: id.to_string(),
        }));
    }
    Ok(())
}

impl SceneGraph {
    /// Load a scene whose primitives are plain shapes
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        Self::from_description_with(desc, &mut ShapeFactory)
    }

    /// Load a scene, building each primitive's drawable with `factory`
    pub fn from_description_with(
        desc: &SceneDescription,
        factory: &mut dyn DrawableFactory,
    ) -> SceneResult<Self> {
        if desc.root.trim().is_empty() {
            return Err(fatal(SceneError::MissingRoot));
        }

        let mut materials = HashMap::new();
        for m in &desc.materials {
            insert_unique(&mut materials, "material", &m.id, m.material)?;
        }

        let mut textures = HashMap::new();
        for t in &desc.textures {
            insert_unique(&mut textures, "texture", &t.id, t.clone())?;
        }

        let mut transformations = HashMap::new();
        for t in &desc.transformations {
            insert_unique(&mut transformations, "transformation", &t.id, compose(&t.ops))?;
        }

        let mut animations = Vec::with_capacity(desc.animations.len());
        let mut animation_index = HashMap::new();
        for a in &desc.animations {
            let animation = KeyframeAnimation::new(a.keyframes.clone()).map_err(|reason| {
                fatal(SceneError::InvalidAnimation {
                    id: a.id.clone(),
                    reason,
                })
            })?;
            insert_unique(&mut animation_index, "animation", &a.id, animations.len())?;
            animations.push(animation);
        }

        let mut primitives = Vec::with_capacity(desc.primitives.len());
        let mut primitive_index = HashMap::new();
        for p in &desc.primitives {
            p.shape.validate().map_err(|reason| {
                fatal(SceneError::InvalidPrimitive {
                    id: p.id.clone(),
                    reason,
                })
            })?;
            insert_unique(&mut primitive_index, "primitive", &p.id, primitives.len())?;
            primitives.push(PrimitiveEntry {
                id: p.id.clone(),
                drawable: factory.create(&p.id, &p.shape),
            });
        }

        let mut warnings = Vec::new();

        // Pass 1: declare components
        let mut nodes = Vec::with_capacity(desc.components.len());
        let mut node_index = HashMap::new();
        for c in &desc.components {
            insert_unique(&mut node_index, "component", &c.id, nodes.len())?;
            nodes.push(declare_component(
                c,
                &materials,
                &textures,
                &transformations,
                &animation_index,
                &mut warnings,
            ));
        }

        let Some(&root) = node_index.get(&desc.root) else {
            return Err(fatal(SceneError::UnknownRoot(desc.root.clone())));
        };

        // Pass 2: wire children
        for (index, c) in desc.components.iter().enumerate() {
            for child in &c.children.components {
                let &child_index = node_index.get(child).ok_or_else(|| {
                    fatal(SceneError::DanglingComponentRef {
                        parent: c.id.clone(),
                        child: child.clone(),
                    })
                })?;
                nodes[index].component_children.push(child_index);
            }
            for child in &c.children.primitives {
                let &child_index = primitive_index.get(child).ok_or_else(|| {
                    fatal(SceneError::DanglingPrimitiveRef {
                        parent: c.id.clone(),
                        child: child.clone(),
                    })
                })?;
                nodes[index].primitive_children.push(child_index);
            }
            if c.children.components.is_empty() && c.children.primitives.is_empty() {
                warnings.push(SceneWarning::NoChildren {
                    component: c.id.clone(),
                });
            }
        }

        let edges: Vec<Vec<usize>> = nodes.iter().map(|n| n.component_children.clone()).collect();
        let reach = walk_components(root, &edges);
        if let Some(at) = reach.cycle_at {
            return Err(fatal(SceneError::Cycle(nodes[at].id.clone())));
        }
        for (node, reached) in nodes.iter().zip(&reach.visited) {
            if !reached {
                warnings.push(SceneWarning::UnreachableComponent {
                    component: node.id.clone(),
                });
            }
        }

        for warning in &warnings {
            warn!("[SCENE] {}", warning);
        }
        info!(
            "[SCENE] Loaded scene '{}': {} components, {} primitives, {} warnings",
            desc.root,
            nodes.len(),
            primitives.len(),
            warnings.len()
        );

        Ok(SceneGraph {
            root,
            nodes,
            node_index,
            primitives,
            primitive_index,
            materials,
            textures,
            animations,
            warnings,
            highlight_period: DEFAULT_HIGHLIGHT_PERIOD,
            time: 0.0,
        })
    }
}

/// Build a component's node, substituting defaults for dangling references
fn declare_component(
    c: &ComponentDescription,
    materials: &HashMap<String, Material>,
    textures: &HashMap<String, Texture>,
    transformations: &HashMap<String, Mat4>,
    animations: &HashMap<String, usize>,
    warnings: &mut Vec<SceneWarning>,
) -> SceneNode {
    let mut node = SceneNode::new(c.id.clone());

    node.transformation = match &c.transformation {
        None => None,
        Some(TransformationSpec::Inline(ops)) => Some(compose(ops)),
        Some(TransformationSpec::Ref(id)) => match transformations.get(id) {
            Some(matrix) => Some(*matrix),
            None => {
                warnings.push(SceneWarning::DanglingTransformation {
                    component: c.id.clone(),
                    transformation: id.clone(),
                });
                None
            }
        },
    };

    if c.materials.is_empty() {
        warnings.push(SceneWarning::EmptyMaterials {
            component: c.id.clone(),
        });
    } else {
        node.materials = c
            .materials
            .iter()
            .map(|m| match m {
                MaterialSpec::Inherit => MaterialRef::Inherit,
                MaterialSpec::Id(id) if materials.contains_key(id) => MaterialRef::Explicit(id.clone()),
                MaterialSpec::Id(id) => {
                    warnings.push(SceneWarning::DanglingMaterial {
                        component: c.id.clone(),
                        material: id.clone(),
                    });
                    MaterialRef::Inherit
                }
            })
            .collect();
    }

    node.texture = match &c.texture.id {
        TextureSpec::Inherit => TextureRef::Inherit,
        TextureSpec::None => TextureRef::None,
        TextureSpec::Id(id) if textures.contains_key(id) => TextureRef::Explicit(id.clone()),
        TextureSpec::Id(id) => {
            warnings.push(SceneWarning::DanglingTexture {
                component: c.id.clone(),
                texture: id.clone(),
            });
            TextureRef::None
        }
    };
    if matches!(node.texture, TextureRef::Explicit(_)) {
        let s = c.texture.length_s.unwrap_or(1.0);
        let t = c.texture.length_t.unwrap_or(1.0);
        if s > 0.0 && t > 0.0 {
            node.length_s = s;
            node.length_t = t;
        } else {
            warnings.push(SceneWarning::InvalidTextureScale {
                component: c.id.clone(),
            });
        }
    }

    node.highlight = c.highlight.map(|h| {
        let scale = if h.scale > 0.0 {
            h.scale
        } else {
            warnings.push(SceneWarning::InvalidHighlightScale {
                component: c.id.clone(),
            });
            1.0
        };
        Highlight {
            color: h.color,
            scale,
            active: false,
        }
    });

    node.animation = c.animation.as_ref().and_then(|id| {
        let found = animations.get(id).copied();
        if found.is_none() {
            warnings.push(SceneWarning::DanglingAnimation {
                component: c.id.clone(),
                animation: id.clone(),
            });
        }
        found
    });

    node.pick_id = c.pick_id;
    debug!("[SCENE] Declared component '{}'", c.id);
    node
}
