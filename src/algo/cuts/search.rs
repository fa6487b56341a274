//! State containers and the recursive search of the Provan–Shier
//! enumeration.
//!
//! The enumeration walks a binary tree over partial assignments `(S, T)`:
//! `S` is the insertion-ordered set of vertices committed to the source
//! side, `T` the stack of vertices committed to the target side. Both need
//! O(1) membership tests; `S` additionally needs to undo a whole batch of
//! insertions when the search returns from a right branch.

use fixedbitset::FixedBitSet;

use crate::algo::AlgoError;

/// An insertion-ordered vertex set with O(1) membership and batched undo.
///
/// Batch boundaries nest: [`pop_batch`](BatchQueue::pop_batch) removes
/// exactly the vertices pushed since the matching
/// [`start_batch`](BatchQueue::start_batch). A vertex may be in the set at
/// most once.
#[derive(Clone, Debug)]
pub(crate) struct BatchQueue {
    items: Vec<usize>,
    marks: FixedBitSet,
    batches: Vec<usize>,
}

impl BatchQueue {
    pub(crate) fn new(n: usize) -> Self {
        BatchQueue {
            items: Vec::new(),
            marks: FixedBitSet::with_capacity(n),
            batches: Vec::new(),
        }
    }

    /// Open a new batch; later pushes belong to it until it is popped.
    pub(crate) fn start_batch(&mut self) {
        self.batches.push(self.items.len());
    }

    /// Append a vertex. The vertex must not be in the set.
    pub(crate) fn push(&mut self, v: usize) {
        debug_assert!(!self.marks.contains(v));
        self.marks.insert(v);
        self.items.push(v);
    }

    /// Remove the vertices pushed since the last `start_batch`.
    pub(crate) fn pop_batch(&mut self) {
        let mark = self
            .batches
            .pop()
            .expect("pop_batch without a matching start_batch");
        while self.items.len() > mark {
            let v = self.items.pop().expect("batch mark within bounds");
            self.marks.set(v, false);
        }
    }

    pub(crate) fn contains(&self, v: usize) -> bool {
        self.marks.contains(v)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The vertices in insertion order.
    pub(crate) fn as_slice(&self) -> &[usize] {
        &self.items
    }
}

/// A vertex stack with an O(1) membership test. A vertex is either absent
/// or present exactly once.
#[derive(Clone, Debug)]
pub(crate) struct MarkedStack {
    items: Vec<usize>,
    marks: FixedBitSet,
}

impl MarkedStack {
    pub(crate) fn new(n: usize) -> Self {
        MarkedStack {
            items: Vec::new(),
            marks: FixedBitSet::with_capacity(n),
        }
    }

    /// Push a vertex. The vertex must not be on the stack.
    pub(crate) fn push(&mut self, v: usize) {
        debug_assert!(!self.marks.contains(v));
        self.marks.insert(v);
        self.items.push(v);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        let v = self.items.pop()?;
        self.marks.set(v, false);
        Some(v)
    }

    pub(crate) fn contains(&self, v: usize) -> bool {
        self.marks.contains(v)
    }
}

/// The recursive binary search of Provan and Shier, generic over the pivot.
///
/// At every node the pivot either produces `(v, I(S, v))`, in which case
/// the search branches — left with `v` committed to the target side, right
/// with `I(S, v)` absorbed into `S` — or produces `None`, in which case `S`
/// is emitted as a source-side partition when it is a proper non-empty
/// subset of the vertex set.
///
/// The pivot contract guarantees termination: `v ∉ T` grows `T` on the
/// left, and `v ∈ I(S, v) ⊄ S` grows `S` on the right, so the recursion
/// depth is bounded by `2n`.
pub(crate) fn enumerate<F>(
    n: usize,
    s: &mut BatchQueue,
    t: &mut MarkedStack,
    pivot: &mut F,
    partitions: &mut Vec<Vec<usize>>,
) -> Result<(), AlgoError>
where
    F: FnMut(&BatchQueue, &MarkedStack) -> Result<Option<(usize, Vec<usize>)>, AlgoError>,
{
    match pivot(s, t)? {
        None => {
            if !s.is_empty() && s.len() < n {
                partitions.push(s.as_slice().to_vec());
            }
        }
        Some((v, isv)) => {
            debug_assert!(!t.contains(v));
            // left branch: v goes to the target side
            t.push(v);
            enumerate(n, s, t, pivot, partitions)?;
            t.pop();

            // right branch: I(S, v) joins the source side
            s.start_batch();
            for &u in &isv {
                if !s.contains(u) {
                    s.push(u);
                }
            }
            enumerate(n, s, t, pivot, partitions)?;
            s.pop_batch();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{BatchQueue, MarkedStack};

    #[test]
    fn batch_queue_nests() {
        let mut q = BatchQueue::new(6);
        q.start_batch();
        q.push(3);
        q.push(1);
        q.start_batch();
        q.push(5);
        assert!(q.contains(5));
        assert_eq!(q.as_slice(), &[3, 1, 5]);
        q.pop_batch();
        assert!(!q.contains(5));
        assert!(q.contains(3));
        assert_eq!(q.len(), 2);
        q.pop_batch();
        assert!(q.is_empty());
        assert!(!q.contains(3));
    }

    #[test]
    fn batch_queue_empty_batch() {
        let mut q = BatchQueue::new(2);
        q.push(0);
        q.start_batch();
        q.pop_batch();
        assert_eq!(q.as_slice(), &[0]);
    }

    #[test]
    fn marked_stack_tracks_membership() {
        let mut t = MarkedStack::new(4);
        t.push(2);
        t.push(0);
        assert!(t.contains(2));
        assert_eq!(t.pop(), Some(0));
        assert!(!t.contains(0));
        assert_eq!(t.pop(), Some(2));
        assert_eq!(t.pop(), None);
    }
}
