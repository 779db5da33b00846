use std::collections::VecDeque;

use crate::alignment::compute_edit_script;
use crate::tour::{Leg, Tour};
use crate::types::{EditScript, Word};

/// Circular queue over a tour: each step takes the front leg and puts it back
/// at the end, so the rotation never runs dry.
#[derive(Debug)]
pub struct Playback<'a, T> {
    queue: VecDeque<Leg<'a, T>>,
}

impl<'a, T: Word> Playback<'a, T> {
    pub fn new(tour: Tour<'a, T>) -> Self {
        Self {
            queue: tour.legs.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Script that brings the first sentence on screen from nothing.
    pub fn intro(&self) -> Option<EditScript<'a, T>> {
        let first = self.queue.front()?;
        let nothing: &'a [T] = Default::default();
        Some(compute_edit_script(nothing, first.script.from))
    }

    /// The leg to play now.
    pub fn advance(&mut self) -> Option<&Leg<'a, T>> {
        let leg = self.queue.pop_front()?;
        self.queue.push_back(leg);
        self.queue.back()
    }
}
