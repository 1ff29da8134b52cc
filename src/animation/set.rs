//! The set of running animations
//!
//! Completion is reported as data: [`AnimationSet::update`] returns
//! [`AnimationEvent`]s that the game state machine consumes on the same
//! tick. Finished animations leave the set when their event is emitted;
//! interrupted ones leave it silently.

use std::collections::BTreeMap;
use tracing::trace;

use crate::animation::chain::{ChainStep, EventAnimationChain};
use crate::animation::event::{EventAnimation, PeriodicAnimation};

/// Handle to an animation in an [`AnimationSet`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Animation {
    Event(EventAnimation),
    Periodic(PeriodicAnimation),
    Chain(EventAnimationChain),
}

/// Something an update observed
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationEvent {
    /// A chain moved on to link `link`
    ChainAdvanced { id: AnimationId, link: usize },
    /// An event animation or chain completed; `deadline` is its end time
    Finished { id: AnimationId, deadline: f64 },
}

impl AnimationEvent {
    pub fn finished_id(&self) -> Option<AnimationId> {
        match self {
            AnimationEvent::Finished { id, .. } => Some(*id),
            AnimationEvent::ChainAdvanced { .. } => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnimationSet {
    next_id: u64,
    active: BTreeMap<AnimationId, Animation>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, animation: Animation) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.active.insert(id, animation);
        id
    }

    pub fn start_event(&mut self, animation: EventAnimation) -> AnimationId {
        self.insert(Animation::Event(animation))
    }

    pub fn start_periodic(&mut self, animation: PeriodicAnimation) -> AnimationId {
        self.insert(Animation::Periodic(animation))
    }

    pub fn start_chain(&mut self, chain: EventAnimationChain) -> AnimationId {
        self.insert(Animation::Chain(chain))
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.active.get(&id)
    }

    pub fn is_active(&self, id: AnimationId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Progress of an event animation at `t`
    pub fn event_progress(&self, id: AnimationId, t: f64) -> Option<f32> {
        match self.active.get(&id)? {
            Animation::Event(animation) => Some(animation.progress(t)),
            _ => None,
        }
    }

    /// Progress of link `link` of a chain at `t`
    pub fn link_progress(&self, id: AnimationId, link: usize, t: f64) -> Option<f32> {
        match self.active.get(&id)? {
            Animation::Chain(chain) => Some(chain.link_progress(link, t)),
            _ => None,
        }
    }

    /// Phase of a periodic animation at `t`
    pub fn phase(&self, id: AnimationId, t: f64) -> Option<f32> {
        match self.active.get(&id)? {
            Animation::Periodic(animation) => Some(animation.phase(t)),
            _ => None,
        }
    }

    /// Stop an animation without a completion event
    ///
    /// Returns whether the animation was still active.
    pub fn interrupt(&mut self, id: AnimationId) -> bool {
        match self.active.remove(&id) {
            Some(mut animation) => {
                match &mut animation {
                    Animation::Event(a) => a.interrupt(),
                    Animation::Periodic(a) => a.interrupt(),
                    Animation::Chain(c) => c.interrupt(),
                }
                trace!("[ANIM] Interrupted animation {}", id.0);
                true
            }
            None => false,
        }
    }

    /// Drop every animation without completion events
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Sample every animation at `t`
    ///
    /// Completions are returned in the order their deadlines were crossed,
    /// ties broken by start order.
    pub fn update(&mut self, t: f64) -> Vec<AnimationEvent> {
        let mut events = Vec::new();
        let mut finished: Vec<(f64, AnimationId)> = Vec::new();

        for (id, animation) in self.active.iter_mut() {
            match animation {
                Animation::Event(a) => {
                    if a.is_over(t) {
                        finished.push((a.end_time(), *id));
                    }
                }
                Animation::Periodic(_) => {}
                Animation::Chain(chain) => match chain.advance(t) {
                    ChainStep::Running => {}
                    ChainStep::Advanced => events.push(AnimationEvent::ChainAdvanced {
                        id: *id,
                        link: chain.current_index(),
                    }),
                    ChainStep::Finished => {
                        finished.push((chain.end_time().unwrap_or(t), *id));
                    }
                },
            }
        }

        finished.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        for (deadline, id) in finished {
            self.active.remove(&id);
            events.push(AnimationEvent::Finished { id, deadline });
        }
        events
    }
}
