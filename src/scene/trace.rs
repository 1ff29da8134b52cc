//! A scene context that records what it is asked to do
//!
//! Used by `xfcheckers check` to print a traversal and by tests to inspect
//! one. It keeps its own matrix stack so every draw carries the world
//! matrix it was issued under.

use bevy::math::Mat4;
use std::fmt;

use crate::scene::appearance::{Appearance, Material};
use crate::scene::context::{HighlightMode, PickTarget, SceneContext};
use crate::scene::primitive::Shape;

#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    PushMatrix,
    PopMatrix,
    Multiply(Mat4),
    Appearance {
        material: Material,
        texture: Option<String>,
        length_s: f32,
        length_t: f32,
    },
    Highlight(Option<HighlightMode>),
    Draw {
        id: String,
        kind: &'static str,
        length_s: f32,
        length_t: f32,
        world: Mat4,
        pick_id: Option<u32>,
    },
    Pick { pick_id: u32, target: PickTarget },
    ClearPick,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::PushMatrix => write!(f, "push matrix"),
            TraceEvent::PopMatrix => write!(f, "pop matrix"),
            TraceEvent::Multiply(m) => write!(f, "multiply translation={}", m.w_axis.truncate()),
            TraceEvent::Appearance {
                texture,
                length_s,
                length_t,
                ..
            } => write!(
                f,
                "appearance texture={} scale=({length_s}, {length_t})",
                texture.as_deref().unwrap_or("none")
            ),
            TraceEvent::Highlight(Some(mode)) => write!(f, "highlight on scale={:.3}", mode.scale),
            TraceEvent::Highlight(None) => write!(f, "highlight off"),
            TraceEvent::Draw {
                id,
                kind,
                length_s,
                length_t,
                world,
                ..
            } => write!(
                f,
                "draw {kind} '{id}' scale=({length_s}, {length_t}) at {}",
                world.w_axis.truncate()
            ),
            TraceEvent::Pick { pick_id, target } => write!(f, "pick {pick_id} -> {target}"),
            TraceEvent::ClearPick => write!(f, "clear pick"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TraceContext {
    events: Vec<TraceEvent>,
    stack: Vec<Mat4>,
    current: Mat4,
    pick_id: Option<u32>,
    now: f64,
}

impl TraceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_time(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Draw events only
    pub fn draws(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Draw { .. }))
    }

    /// The draw event of the primitive `id`, if it was drawn
    pub fn draw_of(&self, id: &str) -> Option<&TraceEvent> {
        self.draws()
            .find(|e| matches!(e, TraceEvent::Draw { id: drawn, .. } if drawn == id))
    }

    /// Current matrix stack depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self) {
        *self = Self::at_time(self.now);
    }
}

impl SceneContext for TraceContext {
    fn push_matrix(&mut self) {
        self.stack.push(self.current);
        self.events.push(TraceEvent::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.current = self.stack.pop().unwrap_or(Mat4::IDENTITY);
        self.events.push(TraceEvent::PopMatrix);
    }

    fn multiply_matrix(&mut self, matrix: &Mat4) {
        self.current *= *matrix;
        self.events.push(TraceEvent::Multiply(*matrix));
    }

    fn apply_appearance(&mut self, appearance: &Appearance) {
        self.events.push(TraceEvent::Appearance {
            material: appearance.material,
            texture: appearance.texture.as_ref().map(|t| t.id.clone()),
            length_s: appearance.length_s,
            length_t: appearance.length_t,
        });
    }

    fn set_highlight(&mut self, highlight: Option<&HighlightMode>) {
        self.events.push(TraceEvent::Highlight(highlight.copied()));
    }

    fn draw_shape(&mut self, id: &str, shape: &Shape, length_s: f32, length_t: f32) {
        self.events.push(TraceEvent::Draw {
            id: id.to_string(),
            kind: shape.kind(),
            length_s,
            length_t,
            world: self.current,
            pick_id: self.pick_id,
        });
    }

    fn register_for_pick(&mut self, pick_id: u32, target: PickTarget) {
        self.pick_id = Some(pick_id);
        self.events.push(TraceEvent::Pick { pick_id, target });
    }

    fn clear_pick_registration(&mut self) {
        self.pick_id = None;
        self.events.push(TraceEvent::ClearPick);
    }

    fn now(&self) -> f64 {
        self.now
    }
}
