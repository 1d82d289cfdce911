use std::collections::VecDeque;

use super::frame::DropMessage;

/// Bounded FIFO of outbound drops. When full, the oldest drop is discarded
/// to make room for the newest.
#[derive(Debug, Clone)]
pub struct DropQueue {
    drops: VecDeque<DropMessage>,
    capacity: usize,
}

impl DropQueue {
    pub fn new(capacity: usize) -> Self {
        DropQueue {
            drops: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, drop: DropMessage) {
        if self.capacity == 0 {
            log::warn!("drop queue has no capacity, discarding '{}'", drop.name);
            return;
        }
        while self.drops.len() >= self.capacity {
            if let Some(old) = self.drops.pop_front() {
                log::warn!("drop queue full, discarding '{}'", old.name);
            }
        }
        self.drops.push_back(drop);
    }

    pub fn pop(&mut self) -> Option<DropMessage> {
        self.drops.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = DropMessage> + '_ {
        self.drops.drain(..)
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> DropMessage {
        DropMessage::new(name, Vec::new())
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = DropQueue::new(4);
        queue.push(named("a"));
        queue.push(named("b"));
        assert_eq!(queue.pop().map(|d| d.name), Some("a".to_string()));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_full_queue_drops_oldest() {
        let mut queue = DropQueue::new(2);
        queue.push(named("a"));
        queue.push(named("b"));
        queue.push(named("c"));
        let names: Vec<_> = queue.drain().map(|d| d.name).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut queue = DropQueue::new(0);
        queue.push(named("a"));
        assert!(queue.is_empty());
    }
}
