//! Scene graph ownership and traversal
//!
//! ## Display traversal
//!
//! For each component, starting at the root:
//! 1. Push an appearance frame unless material and texture are both inherited
//! 2. Push a matrix frame if there is a transformation or an active animation,
//!    then apply the transformation followed by the animation
//! 3. Push the texture scale in effect down to each component child, then
//!    display it, in declaration order
//! 4. Register for picking, switch highlight mode on if the component has an
//!    active highlight and direct primitives
//! 5. Push the texture scale down to and display each direct primitive
//! 6. Undo 4, pop the matrix frame, pop the appearance frame and re-apply the
//!    parent's appearance
//!
//! The appearance stack belongs to a single [`SceneGraph::display_scene`] call.

use bevy::math::Mat4;
use bevy::prelude::Resource;
use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::scene::appearance::{Appearance, AppearanceStack, Material, Texture};
use crate::scene::context::{Drawable, HighlightMode, PickTarget, SceneContext};
use crate::scene::error::SceneWarning;
use crate::scene::keyframe::KeyframeAnimation;
use crate::scene::node::{Highlight, MaterialRef, SceneNode, TextureRef};

/// Default period of the highlight pulse, in seconds
pub const DEFAULT_HIGHLIGHT_PERIOD: f64 = 1.0;

#[derive(Debug)]
pub(crate) struct PrimitiveEntry {
    pub(crate) id: String,
    pub(crate) drawable: Box<dyn Drawable>,
}

/// Result of walking the component graph from the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    /// Component at which a cycle closes, if any
    pub cycle_at: Option<usize>,
    /// Components reached from the root
    pub visited: Vec<bool>,
}

/// Depth-first walk over component edges from `root`
///
/// `edges[i]` lists the component children of component `i`. A child that
/// is still on the recursion stack closes a cycle; fully visited children
/// are not explored again. Stops at the first cycle found.
pub fn walk_components(root: usize, edges: &[Vec<usize>]) -> Reachability {
    let mut visiting = vec![false; edges.len()];
    let mut visited = vec![false; edges.len()];
    let mut cycle_at = None;
    if root < edges.len() {
        dfs(root, edges, &mut visiting, &mut visited, &mut cycle_at);
    }
    Reachability { cycle_at, visited }
}

fn dfs(
    node: usize,
    edges: &[Vec<usize>],
    visiting: &mut [bool],
    visited: &mut [bool],
    cycle_at: &mut Option<usize>,
) {
    if cycle_at.is_some() {
        return;
    }
    if visiting[node] {
        *cycle_at = Some(node);
        return;
    }
    if visited[node] {
        return;
    }
    visited[node] = true;
    visiting[node] = true;
    for &child in &edges[node] {
        dfs(child, edges, visiting, visited, cycle_at);
        if cycle_at.is_some() {
            break;
        }
    }
    visiting[node] = false;
}

/// A loaded, acyclic scene
#[derive(Debug, Resource)]
pub struct SceneGraph {
    pub(crate) root: usize,
    pub(crate) nodes: Vec<SceneNode>,
    pub(crate) node_index: HashMap<String, usize>,
    pub(crate) primitives: Vec<PrimitiveEntry>,
    pub(crate) primitive_index: HashMap<String, usize>,
    pub(crate) materials: HashMap<String, Material>,
    pub(crate) textures: HashMap<String, Texture>,
    pub(crate) animations: Vec<KeyframeAnimation>,
    pub(crate) warnings: Vec<SceneWarning>,
    pub(crate) highlight_period: f64,
    pub(crate) time: f64,
}

impl SceneGraph {
    pub fn root(&self) -> &SceneNode {
        &self.nodes[self.root]
    }

    pub fn component(&self, id: &str) -> Option<&SceneNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn component_mut(&mut self, id: &str) -> Option<&mut SceneNode> {
        let index = *self.node_index.get(id)?;
        self.nodes.get_mut(index)
    }

    pub fn primitive(&self, id: &str) -> Option<&dyn Drawable> {
        self.primitive_index
            .get(id)
            .map(|&i| self.primitives[i].drawable.as_ref())
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Problems tolerated while loading
    pub fn warnings(&self) -> &[SceneWarning] {
        &self.warnings
    }

    /// Time passed to the last [`Self::update`]
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_highlight_period(&mut self, period: f64) {
        if period > 0.0 {
            self.highlight_period = period;
        }
    }

    pub(crate) fn component_edges(&self) -> Vec<Vec<usize>> {
        self.nodes
            .iter()
            .map(|n| n.component_children.clone())
            .collect()
    }

    pub fn has_cycle(&self) -> bool {
        walk_components(self.root, &self.component_edges())
            .cycle_at
            .is_some()
    }

    /// Cycle every component to its next material
    pub fn next_material(&mut self) {
        for node in &mut self.nodes {
            node.next_material();
        }
    }

    /// Turn a component's highlight on or off
    ///
    /// Returns false if the component is unknown or declares no highlight.
    pub fn set_highlight_active(&mut self, id: &str, active: bool) -> bool {
        match self.component_mut(id).and_then(|n| n.highlight.as_mut()) {
            Some(highlight) => {
                highlight.active = active;
                true
            }
            None => false,
        }
    }

    /// Sample the keyframe animations of every component reachable from the root
    pub fn update(&mut self, t: f64) {
        self.time = t;
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            if std::mem::replace(&mut seen[index], true) {
                continue;
            }
            let node = &self.nodes[index];
            if let Some(animation) = node.animation {
                self.animations[animation].update(t);
            }
            stack.extend(self.nodes[index].component_children.iter().rev());
        }
    }

    /// Draw the whole scene from the root
    pub fn display_scene(&mut self, ctx: &mut dyn SceneContext) {
        let mut appearances = AppearanceStack::default();
        ctx.apply_appearance(appearances.top());
        self.display_node(self.root, ctx, &mut appearances);
        debug_assert_eq!(appearances.depth(), 0, "appearance stack left unbalanced");
    }

    fn display_node(
        &mut self,
        index: usize,
        ctx: &mut dyn SceneContext,
        appearances: &mut AppearanceStack,
    ) {
        let pushed_appearance = match self.resolve_appearance(&self.nodes[index], appearances.top()) {
            Some(appearance) => {
                appearances.push(appearance);
                ctx.apply_appearance(appearances.top());
                true
            }
            None => false,
        };

        let node = &self.nodes[index];
        let transformation = node.transformation;
        let animation = node
            .animation
            .and_then(|a| self.animations.get(a))
            .and_then(KeyframeAnimation::current);
        let pushed_matrix = transformation.is_some() || animation.is_some();
        if pushed_matrix {
            ctx.push_matrix();
            if let Some(matrix) = transformation {
                ctx.multiply_matrix(&matrix);
            }
            if let Some(matrix) = animation {
                ctx.multiply_matrix(&matrix);
            }
        }

        let (length_s, length_t) = node.texture_scale();
        let highlight = node
            .highlight
            .filter(|h| h.active && !node.primitive_children.is_empty());
        let pick = node
            .pick_id
            .map(|pick_id| (pick_id, PickTarget::Component(node.id.clone())));

        for i in 0..self.nodes[index].component_children.len() {
            let child = self.nodes[index].component_children[i];
            self.nodes[child].update_tex_coords(length_s, length_t);
            self.display_node(child, ctx, appearances);
        }

        let picked = pick.is_some();
        if let Some((pick_id, target)) = pick {
            ctx.register_for_pick(pick_id, target);
        }
        if let Some(highlight) = highlight {
            let mode = self.highlight_mode(&highlight, ctx.now());
            ctx.set_highlight(Some(&mode));
        }
        for i in 0..self.nodes[index].primitive_children.len() {
            let primitive = self.nodes[index].primitive_children[i];
            let drawable = &mut self.primitives[primitive].drawable;
            drawable.update_tex_coords(length_s, length_t);
            drawable.display(ctx);
        }
        if highlight.is_some() {
            ctx.set_highlight(None);
        }
        if picked {
            ctx.clear_pick_registration();
        }

        if pushed_matrix {
            ctx.pop_matrix();
        }
        if pushed_appearance {
            appearances.pop();
            ctx.apply_appearance(appearances.top());
        }
    }

    /// The appearance `node` puts in effect, or `None` if it changes nothing
    fn resolve_appearance(&self, node: &SceneNode, parent: &Appearance) -> Option<Appearance> {
        if node.is_fully_inherited() {
            return None;
        }
        let material = match node.material() {
            MaterialRef::Explicit(id) => self.materials.get(id).copied().unwrap_or(parent.material),
            MaterialRef::Inherit => parent.material,
        };
        let texture = match node.texture() {
            TextureRef::Explicit(id) => self.textures.get(id).cloned(),
            TextureRef::Inherit => parent.texture.clone(),
            TextureRef::None => None,
        };
        let (length_s, length_t) = node.texture_scale();
        Some(Appearance {
            material,
            texture,
            length_s,
            length_t,
        })
    }

    fn highlight_mode(&self, highlight: &Highlight, now: f64) -> HighlightMode {
        let wave = 0.5 + 0.5 * (TAU * now / self.highlight_period).sin();
        HighlightMode {
            color: highlight.color,
            scale: 1.0 + (highlight.scale - 1.0) * wave as f32,
        }
    }

    /// Transformation of a component as loaded, identity if it has none
    pub fn local_matrix(&self, id: &str) -> Option<Mat4> {
        self.component(id)
            .map(|n| n.transformation.unwrap_or(Mat4::IDENTITY))
    }
}
