//! Maintains the set of elements chosen so far together with whatever state
//! is needed to test a candidate element for a subset-sum collision.
//!
//! Two implementations live behind one [`SumManager`] façade: a fast mode
//! that keeps an explicit [`SumSet`] of realised sums and undoes pushes via
//! [`RollbackHistory`], and an iterative mode that recomputes collisions
//! from scratch with a bitmask enumeration over the element list. Fast mode
//! is the one actually used by the search; iterative mode exists as the
//! ground truth it's checked against, and as a fallback that needs no O(|S|)
//! auxiliary memory.

use crate::error::ManagerError;
use crate::history::RollbackHistory;
use crate::sumset::SumSet;

/// Maximum element count iterative mode can check: its bitmask enumeration
/// addresses subsets with a `u64`, so sequences of more than 62 elements
/// cannot be fully enumerated.
pub const ITERATIVE_MAX_ELEMENTS: usize = 62;

/// Which collision-detection strategy a [`SumManager`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerKind {
    /// O(|S|)-amortised push/pop backed by a `SumSet` and an undo log.
    Fast,
    /// O(N * 4^N) from-scratch bitmask check, no auxiliary sum set.
    Iterative,
}

enum ManagerState {
    Fast {
        sums: SumSet,
        history: RollbackHistory,
    },
    Iterative,
}

/// The element sequence `E` plus whatever collision-detection state its
/// [`ManagerKind`] requires.
pub struct SumManager {
    state: ManagerState,
    elements: Vec<u64>,
}

impl SumManager {
    /// Builds an empty manager of the given kind.
    pub fn new(kind: ManagerKind) -> Self {
        let state = match kind {
            ManagerKind::Fast => ManagerState::Fast {
                sums: SumSet::new(),
                history: RollbackHistory::new(),
            },
            ManagerKind::Iterative => ManagerState::Iterative,
        };
        SumManager {
            state,
            elements: Vec::new(),
        }
    }

    /// Attempts to push `v` onto the element sequence.
    ///
    /// Returns `Ok(true)` if `v` was accepted (no subset-sum collision with
    /// the existing elements), `Ok(false)` if it collided. `Err` is only
    /// possible in iterative mode, when the element count already exceeds
    /// [`ITERATIVE_MAX_ELEMENTS`].
    pub fn try_push(&mut self, v: u64) -> Result<bool, ManagerError> {
        match &mut self.state {
            ManagerState::Fast { sums, history } => Ok(try_push_fast(sums, history, &mut self.elements, v)),
            ManagerState::Iterative => try_push_iterative(&mut self.elements, v),
        }
    }

    /// Pops the most recently pushed element, undoing its effect on any
    /// auxiliary collision-detection state. A no-op if the sequence is
    /// empty.
    pub fn pop(&mut self) {
        if self.elements.is_empty() {
            return;
        }
        if let ManagerState::Fast { sums, history } = &mut self.state {
            let frame = history.pop_frame();
            for &s in frame.values() {
                sums.remove(s);
            }
        }
        self.elements.pop();
    }

    /// Number of elements pushed so far, `|E|`.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    /// The `i`th pushed element. Panics if `i >= size()`.
    pub fn get(&self, i: usize) -> u64 {
        self.elements[i]
    }

    /// Copies the current element sequence into `out`, replacing its
    /// contents.
    pub fn snapshot(&self, out: &mut Vec<u64>) {
        out.clear();
        out.extend_from_slice(&self.elements);
    }

    /// The elements pushed so far, in push order.
    pub fn elements(&self) -> &[u64] {
        &self.elements
    }

    /// Builds a manager whose element sequence is seeded directly, bypassing
    /// `try_push`'s collision checks entirely. Test-only: it lets a test
    /// exercise iterative mode's `ITERATIVE_MAX_ELEMENTS` guard clause
    /// without first paying for the O(3^n) bitmask enumeration that a real
    /// sequence of that length would cost to build up one push at a time.
    #[cfg(test)]
    pub(crate) fn seeded(kind: ManagerKind, elements: Vec<u64>) -> Self {
        let mut mgr = SumManager::new(kind);
        mgr.elements = elements;
        mgr
    }
}

fn try_push_fast(
    sums: &mut SumSet,
    history: &mut RollbackHistory,
    elements: &mut Vec<u64>,
    v: u64,
) -> bool {
    if sums.contains(v) {
        return false;
    }

    // Materialise S before mutating it: we need the snapshot to compute
    // v + s for every s already present, and inserting into sums while
    // iterating would both collide with itself and seed spurious future
    // collisions.
    let current_sums: Vec<u64> = sums.iter().collect();

    for &s in &current_sums {
        match v.checked_add(s) {
            Some(sum) => {
                if sums.contains(sum) {
                    return false;
                }
            }
            // v + s overflows u64: there's no way to represent this sum, so
            // treat it the same as a collision rather than silently
            // admitting an element whose subset sums can't all be tracked.
            None => return false,
        }
    }

    let frame = history.push_frame();
    sums.add(v);
    frame.push(v);
    for &s in &current_sums {
        let sum = v + s;
        sums.add(sum);
        frame.push(sum);
    }

    elements.push(v);
    true
}

fn try_push_iterative(elements: &mut Vec<u64>, v: u64) -> Result<bool, ManagerError> {
    let n = elements.len();
    if n > ITERATIVE_MAX_ELEMENTS {
        return Err(ManagerError::TooManyElements { count: n });
    }

    let full: u64 = if n == 0 { 0 } else { (1u64 << n) - 1 };

    // Test B: v collides if v + sum(E[m1]) == sum(E[m2]) for some disjoint
    // m1, m2 with m2 nonempty. m1 == 0 (Test A) is covered as the m1 == 0
    // case of this same enumeration.
    let mut m1 = 0u64;
    loop {
        if let Some(total) = v.checked_add(subset_sum(elements, m1)) {
            let complement = full & !m1;
            let mut m2 = complement;
            while m2 != 0 {
                if total == subset_sum(elements, m2) {
                    return Ok(false);
                }
                m2 = (m2 - 1) & complement;
            }
        }
        if m1 == full {
            break;
        }
        m1 += 1;
    }

    elements.push(v);
    Ok(true)
}

fn subset_sum(elements: &[u64], mask: u64) -> u64 {
    let mut total = 0u64;
    let mut m = mask;
    while m != 0 {
        let i = m.trailing_zeros() as usize;
        total = total.wrapping_add(elements[i]);
        m &= m - 1;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(kind: ManagerKind) {
        let mut mgr = SumManager::new(kind);
        assert!(mgr.try_push(1).unwrap());
        assert!(mgr.try_push(2).unwrap());
        // 3 collides: 1 + 2 == 3
        assert!(!mgr.try_push(3).unwrap());
        assert!(mgr.try_push(4).unwrap());
        assert_eq!(mgr.elements(), &[1, 2, 4]);

        mgr.pop();
        assert_eq!(mgr.elements(), &[1, 2]);
        assert!(mgr.try_push(4).unwrap());
        assert_eq!(mgr.elements(), &[1, 2, 4]);
    }

    #[test]
    fn fast_mode_matches_expected_sidon_progression() {
        exercise(ManagerKind::Fast);
    }

    #[test]
    fn iterative_mode_matches_expected_sidon_progression() {
        exercise(ManagerKind::Iterative);
    }

    #[test]
    fn fast_and_iterative_agree_on_a_longer_sequence() {
        let candidates = [1u64, 2, 3, 4, 5, 8, 13, 21, 34, 55];
        let mut fast = SumManager::new(ManagerKind::Fast);
        let mut iterative = SumManager::new(ManagerKind::Iterative);

        for &c in &candidates {
            let accepted_fast = fast.try_push(c).unwrap();
            let accepted_iter = iterative.try_push(c).unwrap();
            assert_eq!(accepted_fast, accepted_iter, "disagreement on {c}");
        }
        assert_eq!(fast.elements(), iterative.elements());
    }

    #[test]
    fn iterative_mode_rejects_past_bitmask_limit() {
        // Seeding the element sequence directly (rather than pushing all 63
        // values through `try_push`) skips 63 real O(3^n) bitmask
        // enumerations and exercises only the guard clause this test cares
        // about: the one real call, at n = 63, past the limit.
        let elements: Vec<u64> = (0..63u32).map(|i| 1u64 << i).collect();
        let mut mgr = SumManager::seeded(ManagerKind::Iterative, elements);
        assert_eq!(mgr.size(), ITERATIVE_MAX_ELEMENTS + 1);

        let err = mgr.try_push(1u64 << 63).unwrap_err();
        assert_eq!(err, ManagerError::TooManyElements { count: 63 });
    }

    #[test]
    fn pop_on_empty_manager_is_noop() {
        let mut mgr = SumManager::new(ManagerKind::Fast);
        mgr.pop();
        assert_eq!(mgr.size(), 0);
    }

    #[test]
    fn snapshot_copies_current_elements() {
        let mut mgr = SumManager::new(ManagerKind::Fast);
        mgr.try_push(1).unwrap();
        mgr.try_push(2).unwrap();
        let mut out = vec![99];
        mgr.snapshot(&mut out);
        assert_eq!(out, vec![1, 2]);
    }
}
