//! The input boundary: events a frontend delivers to a session.

use std::collections::VecDeque;

use crate::map::direction::Direction;

/// A single player intent, decoded from whatever the frontend listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Turn the player, if the maze allows it.
    Move(Direction),
    /// A key without a bound action. Still restarts a finished session.
    AnyKey,
    /// The host asked to close.
    Quit,
}

/// A source of input events, polled between ticks.
pub trait InputSource {
    /// Returns the next pending event, or `None` once the queue is drained for now.
    fn poll(&mut self) -> Option<InputEvent>;
}

/// A queue of events fed by hand. Useful for replays and headless runs.
#[derive(Debug, Default, Clone)]
pub struct QueuedInput {
    events: VecDeque<InputEvent>,
}

impl QueuedInput {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputSource for QueuedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}
