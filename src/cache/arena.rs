//! Entry Arena Module
//!
//! Stores entries in a slab of nodes threaded onto two doubly-linked lists
//! at once: recency order and age (insertion) order. Links are slot indices,
//! so unlink and relink are O(1) without shared ownership.
//!
//! Slots 0 and 1 are permanent sentinels anchoring both lists, which means
//! no link operation ever has to special-case an empty list or an end node.

use crate::cache::entry::Entry;

/// Slot of the head sentinel (front of both lists)
pub(crate) const HEAD: usize = 0;
/// Slot of the tail sentinel (back of both lists)
pub(crate) const TAIL: usize = 1;

// == Order ==
/// Selects which of the two lists an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Order {
    /// Most recently used at the front
    Recency,
    /// Most recently inserted at the front
    Age,
}

#[derive(Debug, Clone, Copy)]
struct Link {
    prev: usize,
    next: usize,
}

#[derive(Debug)]
struct Node<K, V> {
    /// None for sentinels and free slots
    entry: Option<Entry<K, V>>,
    recency: Link,
    age: Link,
}

impl<K, V> Node<K, V> {
    fn detached(entry: Option<Entry<K, V>>) -> Self {
        let link = Link {
            prev: HEAD,
            next: TAIL,
        };
        Self {
            entry,
            recency: link,
            age: link,
        }
    }

    fn link(&self, order: Order) -> Link {
        match order {
            Order::Recency => self.recency,
            Order::Age => self.age,
        }
    }

    fn link_mut(&mut self, order: Order) -> &mut Link {
        match order {
            Order::Recency => &mut self.recency,
            Order::Age => &mut self.age,
        }
    }
}

// == Arena ==
#[derive(Debug)]
pub(crate) struct Arena<K, V> {
    nodes: Vec<Node<K, V>>,
    free_list: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    /// Creates an empty arena with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node::detached(None));
        nodes.push(Node::detached(None));
        Self {
            nodes,
            free_list: Vec::new(),
        }
    }

    /// Stores `entry` and links it at the front of both lists.
    pub fn insert(&mut self, entry: Entry<K, V>) -> usize {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx].entry = Some(entry);
                idx
            }
            None => {
                self.nodes.push(Node::detached(Some(entry)));
                self.nodes.len() - 1
            }
        };

        self.push_front(idx, Order::Recency);
        self.push_front(idx, Order::Age);
        idx
    }

    /// Unlinks slot `idx` from both lists and frees it.
    ///
    /// Returns None for sentinels and slots that hold no entry.
    pub fn remove(&mut self, idx: usize) -> Option<Entry<K, V>> {
        if idx == HEAD || idx == TAIL {
            return None;
        }
        let entry = self.nodes.get_mut(idx)?.entry.take()?;

        self.unlink(idx, Order::Recency);
        self.unlink(idx, Order::Age);
        self.free_list.push(idx);
        Some(entry)
    }

    /// Returns the entry stored in slot `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.nodes.get(idx).and_then(|node| node.entry.as_ref())
    }

    /// Moves slot `idx` to the front of one list, leaving the other untouched.
    pub fn move_to_front(&mut self, idx: usize, order: Order) {
        if self.nodes[HEAD].link(order).next == idx {
            return;
        }
        self.unlink(idx, order);
        self.push_front(idx, order);
    }

    /// Returns the slot at the back of a list, or None if the list is empty.
    pub fn back(&self, order: Order) -> Option<usize> {
        let last = self.nodes[TAIL].link(order).prev;
        (last != HEAD).then_some(last)
    }

    /// Walks a list from front to back.
    pub fn iter(&self, order: Order) -> Walk<'_, K, V> {
        Walk {
            arena: self,
            order,
            cursor: self.nodes[HEAD].link(order).next,
            reverse: false,
        }
    }

    /// Walks a list from back to front.
    pub fn iter_rev(&self, order: Order) -> Walk<'_, K, V> {
        Walk {
            arena: self,
            order,
            cursor: self.nodes[TAIL].link(order).prev,
            reverse: true,
        }
    }

    /// Drops every entry and resets both lists.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD] = Node::detached(None);
        self.nodes[TAIL] = Node::detached(None);
        self.free_list.clear();
    }

    fn unlink(&mut self, idx: usize, order: Order) {
        let Link { prev, next } = self.nodes[idx].link(order);
        self.nodes[prev].link_mut(order).next = next;
        self.nodes[next].link_mut(order).prev = prev;
    }

    fn push_front(&mut self, idx: usize, order: Order) {
        let first = self.nodes[HEAD].link(order).next;
        *self.nodes[idx].link_mut(order) = Link {
            prev: HEAD,
            next: first,
        };
        self.nodes[first].link_mut(order).prev = idx;
        self.nodes[HEAD].link_mut(order).next = idx;
    }
}

// == Walk ==
/// Iterator over `(slot, entry)` pairs along one list.
pub(crate) struct Walk<'a, K, V> {
    arena: &'a Arena<K, V>,
    order: Order,
    cursor: usize,
    reverse: bool,
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = (usize, &'a Entry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == HEAD || self.cursor == TAIL {
            return None;
        }
        let idx = self.cursor;
        let node = &self.arena.nodes[idx];
        let link = node.link(self.order);
        self.cursor = if self.reverse { link.prev } else { link.next };
        node.entry.as_ref().map(|entry| (idx, entry))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn entry(key: &'static str) -> Entry<&'static str, u32> {
        Entry::new(key, 0, Duration::ZERO, Instant::now())
    }

    fn keys(arena: &Arena<&'static str, u32>, order: Order) -> Vec<&'static str> {
        arena.iter(order).map(|(_, e)| e.key).collect()
    }

    #[test]
    fn test_arena_empty() {
        let arena: Arena<&str, u32> = Arena::with_capacity(4);
        assert_eq!(arena.back(Order::Recency), None);
        assert_eq!(arena.back(Order::Age), None);
        assert_eq!(arena.iter(Order::Age).count(), 0);
        assert_eq!(arena.iter_rev(Order::Recency).count(), 0);
    }

    #[test]
    fn test_arena_insert_links_front_of_both_lists() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.insert(entry("a"));
        arena.insert(entry("b"));
        arena.insert(entry("c"));

        assert_eq!(keys(&arena, Order::Recency), vec!["c", "b", "a"]);
        assert_eq!(keys(&arena, Order::Age), vec!["c", "b", "a"]);
        assert_eq!(arena.back(Order::Age), Some(a));
    }

    #[test]
    fn test_arena_move_to_front_only_touches_one_list() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.insert(entry("a"));
        arena.insert(entry("b"));
        arena.insert(entry("c"));

        arena.move_to_front(a, Order::Recency);

        assert_eq!(keys(&arena, Order::Recency), vec!["a", "c", "b"]);
        assert_eq!(keys(&arena, Order::Age), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_arena_move_to_front_when_already_front() {
        let mut arena = Arena::with_capacity(4);
        arena.insert(entry("a"));
        let b = arena.insert(entry("b"));

        arena.move_to_front(b, Order::Recency);

        assert_eq!(keys(&arena, Order::Recency), vec!["b", "a"]);
    }

    #[test]
    fn test_arena_remove_middle() {
        let mut arena = Arena::with_capacity(4);
        arena.insert(entry("a"));
        let b = arena.insert(entry("b"));
        arena.insert(entry("c"));

        let removed = arena.remove(b).unwrap();

        assert_eq!(removed.key, "b");
        assert!(arena.get(b).is_none());
        assert_eq!(keys(&arena, Order::Recency), vec!["c", "a"]);
        assert_eq!(keys(&arena, Order::Age), vec!["c", "a"]);
    }

    #[test]
    fn test_arena_remove_sentinel_or_free_slot() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.insert(entry("a"));

        assert!(arena.remove(HEAD).is_none());
        assert!(arena.remove(TAIL).is_none());
        assert!(arena.remove(a).is_some());
        assert!(arena.remove(a).is_none());
        assert!(arena.remove(42).is_none());
        assert_eq!(arena.back(Order::Recency), None);
    }

    #[test]
    fn test_arena_reuses_freed_slots() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.insert(entry("a"));
        arena.remove(a);

        let b = arena.insert(entry("b"));

        assert_eq!(a, b);
        assert_eq!(keys(&arena, Order::Age), vec!["b"]);
    }

    #[test]
    fn test_arena_iter_rev_matches_reverse() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.insert(entry("a"));
        arena.insert(entry("b"));
        arena.insert(entry("c"));
        arena.move_to_front(a, Order::Recency);

        let forward = keys(&arena, Order::Recency);
        let mut backward: Vec<_> = arena
            .iter_rev(Order::Recency)
            .map(|(_, e)| e.key)
            .collect();
        backward.reverse();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_arena_clear() {
        let mut arena = Arena::with_capacity(4);
        arena.insert(entry("a"));
        arena.insert(entry("b"));

        arena.clear();

        assert_eq!(arena.back(Order::Age), None);
        assert_eq!(keys(&arena, Order::Recency), Vec::<&str>::new());
        let c = arena.insert(entry("c"));
        assert_eq!(arena.back(Order::Recency), Some(c));
    }
}
