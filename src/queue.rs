//! Per-category priority queues for arriving, leaving, and emergency ships
//! (spec §4.1).
//!
//! Each direction is realized as a flat, insertion-only array of requests
//! plus, per category, an ordered index array recording positions into that
//! array in push order, the representation spec §3 calls out so that
//! category-filtered dequeues are O(1) and aging a stale head is cheap.
//! Index 0 of each flat array is left unused in the original wire format
//! (spec §9 open question (c)); emptiness is tracked explicitly via the
//! push/pop pointers instead.

use crate::ids::{Category, Timestep};
use crate::ship::ShipRequest;

/// Fixed capacity of a flat request array (spec §9: "part of the wire
/// contract; keep them as fixed-size").
pub const INCOMING_OUTGOING_CAPACITY: usize = 1000;
pub const EMERGENCY_CAPACITY: usize = 150;
const CATEGORY_COUNT: usize = Category::MAX as usize + 1;

/// One direction's worth of queued requests: a flat array plus, per
/// category, an index array with an independent pop pointer.
pub struct CategoryQueue {
    requests: Vec<ShipRequest>,
    /// `indices[c]` holds, in push order, positions into `requests` for
    /// category `c`.
    indices: [Vec<usize>; CATEGORY_COUNT],
    pop_pointers: [usize; CATEGORY_COUNT],
    capacity: usize,
}

impl CategoryQueue {
    fn new(capacity: usize) -> Self {
        Self {
            requests: Vec::new(),
            indices: std::array::from_fn(|_| Vec::new()),
            pop_pointers: [0; CATEGORY_COUNT],
            capacity,
        }
    }

    /// Append `req` to the flat array and to its category's index array.
    pub fn push(&mut self, req: ShipRequest) {
        assert!(
            self.requests.len() < self.capacity,
            "queue exceeded its fixed wire capacity of {}",
            self.capacity
        );
        let category = req.category.get();
        let position = self.requests.len();
        self.requests.push(req);
        self.indices[category].push(position);
    }

    /// The request at the current pop pointer for `category`, if any.
    pub fn peek(&self, category: Category) -> Option<&ShipRequest> {
        let c = category.get();
        let pop = self.pop_pointers[c];
        self.indices[c]
            .get(pop)
            .map(|&position| &self.requests[position])
    }

    /// Advance the pop pointer for `category` past its current head.
    pub fn pop(&mut self, category: Category) {
        let c = category.get();
        if self.pop_pointers[c] < self.indices[c].len() {
            self.pop_pointers[c] += 1;
        }
    }

    pub fn has_eligible(&self, category: Category) -> bool {
        let c = category.get();
        self.pop_pointers[c] < self.indices[c].len()
    }

    /// Skip past every head request in `category` whose waiting-time budget
    /// has expired as of `now`. Idempotent: calling it again with the same
    /// `now` is a no-op once the head is fresh or the category is empty.
    pub fn age_expired(&mut self, category: Category, now: Timestep) {
        loop {
            let Some(head) = self.peek(category) else {
                break;
            };
            if head.incoming_expired(now) {
                self.pop(category);
            } else {
                break;
            }
        }
    }
}

/// The three logical queues named in spec §3: incoming, outgoing, emergency.
pub struct QueueStore {
    pub incoming: CategoryQueue,
    pub outgoing: CategoryQueue,
    pub emergency: CategoryQueue,
}

impl QueueStore {
    pub fn new() -> Self {
        Self {
            incoming: CategoryQueue::new(INCOMING_OUTGOING_CAPACITY),
            outgoing: CategoryQueue::new(INCOMING_OUTGOING_CAPACITY),
            emergency: CategoryQueue::new(EMERGENCY_CAPACITY),
        }
    }

    /// Apply `age_expired` to every incoming category. Called once per
    /// timestep before docking (spec §4.7 step 3).
    pub fn age_expire_all_incoming(&mut self, now: Timestep) {
        for c in 0..CATEGORY_COUNT {
            self.incoming.age_expired(Category(c as u8), now);
        }
    }
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new()
    }
}


