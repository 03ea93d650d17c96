//! Event System
//!
//! The session stays free of audio and graphics: anything the outer game
//! loop should react to (sounds, logging) is queued here during the update
//! and drained by the owner afterwards.

use macroquad::prelude::Vec2;

use super::collision::Contact;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a session update can report
#[derive(Debug, Default)]
pub struct Events {
    /// A bomb went off
    pub explosion: EventQueue<ExplosionEvent>,
    /// Player touched an enemy
    pub contact: EventQueue<ContactEvent>,
    /// An enemy reached the finish line
    pub finish: EventQueue<FinishEvent>,
    /// An enemy was spawned
    pub spawn: EventQueue<SpawnEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues
    pub fn clear_all(&mut self) {
        self.explosion.clear();
        self.contact.clear();
        self.finish.clear();
        self.spawn.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionEvent {
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub contact: Contact,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishEvent {
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEvent {
    pub position: Vec2,
    pub radius: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();
        events.explosion.send(ExplosionEvent { position: Vec2::ZERO });
        events.contact.send(ContactEvent { contact: Contact::Eaten, position: Vec2::ONE });
        assert_eq!(events.explosion.len(), 1);
        assert_eq!(events.contact.iter().next().map(|e| e.contact), Some(Contact::Eaten));

        events.clear_all();
        assert!(events.explosion.is_empty());
        assert!(events.contact.is_empty());
    }
}
