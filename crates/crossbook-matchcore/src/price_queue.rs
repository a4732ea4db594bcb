//! Side-specific priority queue of resting orders.
//!
//! A binary heap over [`Order`] with an injected comparator:
//! - **Bids**: highest price first, then earliest `sequence`
//! - **Asks**: lowest price first, then earliest `sequence`
//!
//! An auxiliary `HashMap<OrderId, slot>` lets [`PriceQueue::remove`] find
//! an arbitrary order and re-heapify in O(log N).

use std::cmp::Ordering;
use std::collections::HashMap;

use crossbook_types::{CrossbookError, Order, OrderId, OrderSide, Result};

/// Orders `a` before `b` when it returns [`Ordering::Less`].
///
/// Must only look at fields the matcher never mutates (price, sequence).
pub type Priority = fn(&Order, &Order) -> Ordering;

/// Bid priority: higher price first, FIFO within a price.
pub fn bid_priority(a: &Order, b: &Order) -> Ordering {
    b.price.cmp(&a.price).then(a.sequence.cmp(&b.sequence))
}

/// Ask priority: lower price first, FIFO within a price.
pub fn ask_priority(a: &Order, b: &Order) -> Ordering {
    a.price.cmp(&b.price).then(a.sequence.cmp(&b.sequence))
}

/// A binary heap of orders for one side of the book.
#[derive(Debug, Clone)]
pub struct PriceQueue {
    side: OrderSide,
    heap: Vec<Order>,
    /// `OrderId -> index into heap`.
    slots: HashMap<OrderId, usize>,
    priority: Priority,
}

impl PriceQueue {
    /// Create an empty queue for `side` ordered by `priority`.
    #[must_use]
    pub fn new(side: OrderSide, priority: Priority) -> Self {
        Self {
            side,
            heap: Vec::new(),
            slots: HashMap::new(),
            priority,
        }
    }

    #[must_use]
    pub fn bids() -> Self {
        Self::new(OrderSide::Buy, bid_priority)
    }

    #[must_use]
    pub fn asks() -> Self {
        Self::new(OrderSide::Sell, ask_priority)
    }

    #[must_use]
    pub fn side(&self) -> OrderSide {
        self.side
    }

    // =================================================================
    // Heap operations
    // =================================================================

    /// Insert an order. O(log N).
    pub fn push(&mut self, order: Order) -> Result<()> {
        if order.side != self.side {
            return Err(CrossbookError::InvalidOrder {
                reason: format!("{} order pushed onto {} queue", order.side, self.side),
            });
        }
        if self.slots.contains_key(&order.id) {
            return Err(CrossbookError::DuplicateOrder(order.id));
        }

        let slot = self.heap.len();
        self.slots.insert(order.id, slot);
        self.heap.push(order);
        self.sift_up(slot);
        Ok(())
    }

    /// The highest-priority order, without removing it.
    #[must_use]
    pub fn peek_best(&self) -> Option<&Order> {
        self.heap.first()
    }

    /// Mutable access to the best order for fill bookkeeping.
    ///
    /// Callers may only touch fields the priority ignores.
    pub(crate) fn peek_best_mut(&mut self) -> Option<&mut Order> {
        self.heap.first_mut()
    }

    /// Remove and return the highest-priority order.
    pub fn pop_best(&mut self) -> Result<Order> {
        if self.heap.is_empty() {
            return Err(CrossbookError::EmptyQueue);
        }
        Ok(self.remove_at(0))
    }

    /// Remove an arbitrary order by ID, wherever it sits.
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        let slot = *self.slots.get(order_id)?;
        Some(self.remove_at(slot))
    }

    // =================================================================
    // Queries
    // =================================================================

    #[must_use]
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.slots.get(order_id).map(|&slot| &self.heap[slot])
    }

    #[must_use]
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.slots.contains_key(order_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Iterate in heap (not priority) order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.heap.iter()
    }

    /// All orders in priority order. O(N log N); meant for snapshots.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.heap.iter().collect();
        orders.sort_by(|a, b| (self.priority)(a, b));
        orders
    }

    // =================================================================
    // Internals
    // =================================================================

    fn ranks_ahead(&self, a: usize, b: usize) -> bool {
        (self.priority)(&self.heap[a], &self.heap[b]) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].id, a);
        self.slots.insert(self.heap[b].id, b);
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.ranks_ahead(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut best = slot;
            if left < len && self.ranks_ahead(left, best) {
                best = left;
            }
            if right < len && self.ranks_ahead(right, best) {
                best = right;
            }
            if best == slot {
                return slot;
            }
            self.swap(slot, best);
            slot = best;
        }
    }

    fn remove_at(&mut self, slot: usize) -> Order {
        let last = self.heap.len() - 1;
        if slot != last {
            self.swap(slot, last);
        }
        let removed = self.heap.pop().expect("slot was in bounds");
        self.slots.remove(&removed.id);

        // The element moved into `slot` may belong above or below it.
        if slot < self.heap.len() && self.sift_down(slot) == slot {
            self.sift_up(slot);
        }
        removed
    }
}
