use std::ops::Range;

use log::trace;

use crate::error::RangeError;
use crate::node::{Link, Node};
use crate::policy::RangeSum;
use crate::rng::PriorityRng;
use crate::treap::Treap;

type SumTreap = Treap<RangeSum>;

/// A range operation over the original sequence. Bounds are 1-based and
/// inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Exchange every adjacent pair `(x[l], x[l+1]), (x[l+2], x[l+3]), ...`
    /// that lies fully inside the range.
    Swap { l: usize, r: usize },
    /// Report the sum of `x[l..=r]`. The sequence is left as it was.
    SwapAndReport { l: usize, r: usize },
}

/// Rank ranges of the middle segment in each tree.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Segments {
    even: Range<usize>,
    odd: Range<usize>,
}

impl Segments {
    /// `start` is the 0-based first position of the range. The parity class
    /// owning `start` takes `leading` elements from rank `start / 2`, the
    /// other class takes `trailing` elements from rank `(start + 1) / 2`.
    fn new(start: usize, leading: usize, trailing: usize) -> Self {
        let lead = start / 2..start / 2 + leading;
        let trail = (start + 1) / 2..(start + 1) / 2 + trailing;
        if start % 2 == 0 {
            Self {
                even: lead,
                odd: trail,
            }
        } else {
            Self {
                even: trail,
                odd: lead,
            }
        }
    }
}

/// The original sequence stored as two implicit treaps: elements at even
/// 0-based positions in `even`, odd positions in `odd`, each in order.
///
/// Both trees draw priorities from one generator, seeded once.
#[derive(Debug)]
pub struct DualTreap {
    even: SumTreap,
    odd: SumTreap,
    rng: PriorityRng,
}

impl DualTreap {
    pub fn build<I>(values: I, rng: PriorityRng) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut dual = Self {
            even: Treap::new(),
            odd: Treap::new(),
            rng,
        };
        dual.fill(values);
        dual
    }

    pub fn with_seed<I>(values: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self::build(values, PriorityRng::with_seed(seed))
    }

    fn fill<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = i64>,
    {
        for (position, value) in values.into_iter().enumerate() {
            let node = Treap::singleton(value, self.rng.next_priority());
            if position % 2 == 0 {
                self.even.append(node);
            } else {
                self.odd.append(node);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.even.len() + self.odd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.even.is_empty() && self.odd.is_empty()
    }

    pub fn even(&self) -> &SumTreap {
        &self.even
    }

    pub fn odd(&self) -> &SumTreap {
        &self.odd
    }

    /// The current sequence in original-position order.
    pub fn to_vec(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        let mut odd = self.odd.iter();
        for &value in self.even.iter() {
            out.push(value);
            if let Some(&value) = odd.next() {
                out.push(value);
            }
        }
        out
    }

    /// Releases both trees and rebuilds from `values`. The priority stream
    /// continues where it left off.
    pub fn reset<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.teardown();
        self.fill(values);
    }

    /// Releases every node of both trees. Returns the number released.
    pub fn teardown(&mut self) -> usize {
        self.even.teardown() + self.odd.teardown()
    }

    pub fn apply(&mut self, op: Operation) -> Result<Option<i64>, RangeError> {
        match op {
            Operation::Swap { l, r } => self.apply_swap(l, r).map(|()| None),
            Operation::SwapAndReport { l, r } => self.apply_swap_and_report(l, r).map(Some),
        }
    }

    pub fn apply_swap(&mut self, l: usize, r: usize) -> Result<(), RangeError> {
        let (start, len) = self.validate(l, r)?;
        let segments = Segments::new(start, len / 2, len / 2);
        trace!("swap [{l}, {r}]: even {:?}, odd {:?}", segments.even, segments.odd);

        let (head, middle, tail) = isolate(self.even.root.take(), segments.even);
        let (head2, middle2, tail2) = isolate(self.odd.root.take(), segments.odd);

        self.even.root = SumTreap::merge_links(head, SumTreap::merge_links(middle2, tail));
        self.odd.root = SumTreap::merge_links(head2, SumTreap::merge_links(middle, tail2));
        Ok(())
    }

    pub fn apply_swap_and_report(&mut self, l: usize, r: usize) -> Result<i64, RangeError> {
        let (start, len) = self.validate(l, r)?;
        let segments = Segments::new(start, len.div_ceil(2), len / 2);
        trace!("report [{l}, {r}]: even {:?}, odd {:?}", segments.even, segments.odd);

        let (head, middle, tail) = isolate(self.even.root.take(), segments.even);
        let (head2, middle2, tail2) = isolate(self.odd.root.take(), segments.odd);
        let reported = Node::agg(&middle) + Node::agg(&middle2);

        self.even.root = SumTreap::merge_links(head, SumTreap::merge_links(middle, tail));
        self.odd.root = SumTreap::merge_links(head2, SumTreap::merge_links(middle2, tail2));
        Ok(reported)
    }

    /// Checks `1 <= l <= r <= len` and returns the 0-based start and length.
    fn validate(&self, l: usize, r: usize) -> Result<(usize, usize), RangeError> {
        if l == 0 || l > r {
            return Err(RangeError::InvalidRange { l, r });
        }
        let len = self.len();
        if r > len {
            return Err(RangeError::OutOfBounds { l, r, len });
        }
        Ok((l - 1, r - l + 1))
    }
}

/// Cuts `root` into the part before `ranks`, the part inside, and the part
/// after.
fn isolate(
    root: Link<RangeSum>,
    ranks: Range<usize>,
) -> (Link<RangeSum>, Link<RangeSum>, Link<RangeSum>) {
    debug_assert!(ranks.end <= Node::size(&root) as usize);
    let (rest, tail) = SumTreap::split_link(root, ranks.end);
    let (head, middle) = SumTreap::split_link(rest, ranks.start);
    (head, middle, tail)
}
