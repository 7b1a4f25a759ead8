//! Open-chained hash set of `u64` subset sums.
//!
//! Collision chains are built from nodes drawn out of an arena so that the
//! set can hand detached nodes back to a free list on removal instead of
//! dropping them. A fresh [`SumSet`] pre-allocates 1024 such nodes up front,
//! which keeps the first wave of insertions from hammering the global
//! allocator one node at a time.

const INITIAL_BUCKETS: usize = 4096;
const INITIAL_FREE_NODES: usize = 1024;
const MAX_LOAD_FACTOR: f64 = 0.75;

struct Node {
    value: u64,
    next: Option<u32>,
}

/// A hash set over `u64` values, used to track the sums realisable as the
/// sum of some subset of the elements pushed so far.
pub struct SumSet {
    buckets: Vec<Option<u32>>,
    arena: Vec<Node>,
    free_head: Option<u32>,
    len: usize,
}

impl SumSet {
    /// Builds an empty set with `INITIAL_BUCKETS` buckets and a pool of
    /// `INITIAL_FREE_NODES` reusable nodes.
    pub fn new() -> Self {
        let mut arena = Vec::with_capacity(INITIAL_FREE_NODES);
        let mut free_head = None;
        for _ in 0..INITIAL_FREE_NODES {
            arena.push(Node {
                value: 0,
                next: free_head,
            });
            free_head = Some((arena.len() - 1) as u32);
        }

        SumSet {
            buckets: vec![None; INITIAL_BUCKETS],
            arena,
            free_head,
            len: 0,
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `value` is present in the set.
    pub fn contains(&self, value: u64) -> bool {
        let bucket = self.bucket_for(value, self.buckets.len());
        let mut cur = self.buckets[bucket];
        while let Some(idx) = cur {
            let node = &self.arena[idx as usize];
            if node.value == value {
                return true;
            }
            cur = node.next;
        }
        false
    }

    /// Inserts `value`, returning `false` if it was already present.
    pub fn add(&mut self, value: u64) -> bool {
        let bucket = self.bucket_for(value, self.buckets.len());
        let mut cur = self.buckets[bucket];
        while let Some(idx) = cur {
            let node = &self.arena[idx as usize];
            if node.value == value {
                return false;
            }
            cur = node.next;
        }

        let head = self.buckets[bucket];
        let idx = self.alloc_node(value, head);
        self.buckets[bucket] = Some(idx);
        self.len += 1;
        self.maybe_grow();
        true
    }

    /// Removes `value`, returning `false` if it was not present.
    pub fn remove(&mut self, value: u64) -> bool {
        let bucket = self.bucket_for(value, self.buckets.len());
        let mut cur = self.buckets[bucket];
        let mut prev: Option<u32> = None;
        while let Some(idx) = cur {
            let next = self.arena[idx as usize].next;
            if self.arena[idx as usize].value == value {
                match prev {
                    Some(p) => self.arena[p as usize].next = next,
                    None => self.buckets[bucket] = next,
                }
                self.free_node(idx);
                self.len -= 1;
                return true;
            }
            prev = Some(idx);
            cur = next;
        }
        false
    }

    /// Iterates over every value currently stored, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.buckets.iter().flat_map(move |head| {
            let mut cur = *head;
            std::iter::from_fn(move || {
                let idx = cur?;
                let node = &self.arena[idx as usize];
                cur = node.next;
                Some(node.value)
            })
        })
    }

    fn bucket_for(&self, value: u64, bucket_count: usize) -> usize {
        (mix(value) as usize) % bucket_count
    }

    fn alloc_node(&mut self, value: u64, next: Option<u32>) -> u32 {
        match self.free_head.take() {
            Some(idx) => {
                self.free_head = self.arena[idx as usize].next;
                self.arena[idx as usize].value = value;
                self.arena[idx as usize].next = next;
                idx
            }
            None => {
                self.arena.push(Node { value, next });
                (self.arena.len() - 1) as u32
            }
        }
    }

    fn free_node(&mut self, idx: u32) {
        self.arena[idx as usize].next = self.free_head;
        self.free_head = Some(idx);
    }

    fn maybe_grow(&mut self) {
        if self.len as f64 / self.buckets.len() as f64 <= MAX_LOAD_FACTOR {
            return;
        }

        let new_count = self.buckets.len() * 2;
        let mut new_buckets = vec![None; new_count];

        for i in 0..self.buckets.len() {
            let mut cur = self.buckets[i];
            while let Some(idx) = cur {
                let next = self.arena[idx as usize].next;
                let new_bucket = (mix(self.arena[idx as usize].value) as usize) % new_count;
                self.arena[idx as usize].next = new_buckets[new_bucket];
                new_buckets[new_bucket] = Some(idx);
                cur = next;
            }
        }

        self.buckets = new_buckets;
    }
}

impl Default for SumSet {
    fn default() -> Self {
        Self::new()
    }
}

/// 64-bit avalanche mix (the MurmurHash3 finalizer), used to scatter the
/// small, densely-clustered subset sums this set stores across buckets.
fn mix(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51afd7ed558ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ceb9fe1a85ec53);
    x ^= x >> 33;
    x
}
