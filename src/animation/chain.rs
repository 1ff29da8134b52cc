//! Sequential event animations
//!
//! Links run strictly one after another. A link only starts once
//! [`EventAnimationChain::advance`] has observed the previous link's
//! completion, so the start time of link `n + 1` is the tick at which link
//! `n` was seen to be over, not its nominal end time.

use crate::animation::event::EventAnimation;

/// What a call to [`EventAnimationChain::advance`] observed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainStep {
    /// The current link is still running
    Running,
    /// One or more links completed and a later link is now current
    Advanced,
    /// The last link completed
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventAnimationChain {
    links: Vec<EventAnimation>,
    current: usize,
    finished: bool,
}

impl EventAnimationChain {
    /// Chain of links with the given durations, the first starting at `start`
    pub fn new(start: f64, durations: impl IntoIterator<Item = f64>) -> Self {
        let links = durations
            .into_iter()
            .map(|duration| EventAnimation::new(start, duration))
            .collect();
        Self {
            links,
            current: 0,
            finished: false,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Index of the running link; equals `len()` once finished
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_link(&self) -> Option<&EventAnimation> {
        self.links.get(self.current)
    }

    /// Nominal end of the last link, given the start times observed so far
    pub fn end_time(&self) -> Option<f64> {
        self.links.last().map(EventAnimation::end_time)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Progress of link `index` at `t`: 0 before it starts, 1 once it is done
    pub fn link_progress(&self, index: usize, t: f64) -> f32 {
        if index < self.current {
            1.0
        } else if index > self.current {
            0.0
        } else {
            self.links.get(index).map_or(1.0, |link| link.progress(t))
        }
    }

    /// Observe completions at `t`, starting the next link where one ended
    pub fn advance(&mut self, t: f64) -> ChainStep {
        if self.finished {
            return ChainStep::Finished;
        }
        let mut advanced = false;
        loop {
            let Some(link) = self.links.get(self.current) else {
                self.finished = true;
                return ChainStep::Finished;
            };
            if !link.is_over(t) {
                break;
            }
            self.current += 1;
            advanced = true;
            if let Some(next) = self.links.get_mut(self.current) {
                next.restart_at(t);
            }
        }
        if advanced {
            ChainStep::Advanced
        } else {
            ChainStep::Running
        }
    }

    pub fn interrupt(&mut self) {
        if let Some(link) = self.links.get_mut(self.current) {
            link.interrupt();
        }
        self.finished = true;
    }
}
