use std::fmt;
use std::ops::{Bound, RangeBounds};

use crate::error::TreapError;
use crate::node::{Link, Node};
use crate::policy::Aggregate;
use crate::rng::PriorityRng;

/// Owning handle to an implicit-key treap.
///
/// Elements are ordered by position only; no key is stored, the rank of a
/// node is `1 + size(left)` relative to its subtree. The handle is
/// move-only, and every split/merge consumes the trees it is given.
pub struct Treap<P: Aggregate> {
    pub(crate) root: Link<P>,
}

impl<P: Aggregate> Treap<P> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn singleton(key: P::Key, priority: u32) -> Self {
        Self {
            root: Some(Box::new(Node::new(key, priority))),
        }
    }

    /// Builds a tree holding `values` in order by merging one singleton per
    /// value onto the right end.
    pub fn from_values<I>(values: I, rng: &mut PriorityRng) -> Self
    where
        I: IntoIterator<Item = P::Key>,
    {
        let mut tree = Self::new();
        for key in values {
            tree.append(Self::singleton(key, rng.next_priority()));
        }
        tree
    }

    pub fn len(&self) -> usize {
        Node::size(&self.root) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Aggregate over the whole tree.
    pub fn sum(&self) -> P::Agg {
        Node::agg(&self.root)
    }

    pub fn merge(mut self, mut right: Self) -> Self {
        let root = Self::merge_links(self.root.take(), right.root.take());
        Self { root }
    }

    pub fn append(&mut self, mut right: Self) {
        self.root = Self::merge_links(self.root.take(), right.root.take());
    }

    /// Keeps the first `index` elements in `self` and returns the rest.
    pub fn split_off(&mut self, index: usize) -> Result<Self, TreapError> {
        let len = self.len();
        if index > len {
            return Err(TreapError::SplitOutOfRange { index, len });
        }
        let (left, right) = Self::split_link(self.root.take(), index);
        self.root = left;
        Ok(Self { root: right })
    }

    /// Key at 0-based position `index`, walking down by `left_size`.
    pub fn get(&self, index: usize) -> Option<&P::Key> {
        let mut node = self.root.as_deref()?;
        let mut index = index;
        loop {
            let left_size = node.left_size as usize;
            if index < left_size {
                node = node.left.as_deref()?;
            } else if index == left_size {
                return Some(&node.key);
            } else {
                index -= left_size + 1;
                node = node.right.as_deref()?;
            }
        }
    }

    /// Aggregate over `range`, or `None` if the range does not fit the tree.
    pub fn fold<R: RangeBounds<usize>>(&self, range: R) -> Option<P::Agg> {
        let (start, end) = normalize_range(range, self.len())?;
        Some(Self::fold_range(&self.root, start, end))
    }

    pub fn iter(&self) -> Iter<'_, P> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    pub fn to_vec(&self) -> Vec<P::Key>
    where
        P::Key: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn root_priority(&self) -> Option<u32> {
        self.root.as_ref().map(|node| node.prio)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        deepest
    }

    /// Releases every node and leaves the handle empty. Returns the number
    /// of nodes released.
    pub fn teardown(&mut self) -> usize {
        let mut released = 0;
        let mut stack: Vec<Box<Node<P>>> = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
            released += 1;
        }
        released
    }

    /// Concatenates two trees. Every element of `left` ends up before every
    /// element of `right`. On equal priorities `right` becomes the root.
    pub(crate) fn merge_links(left: Link<P>, right: Link<P>) -> Link<P> {
        match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (Some(mut left), Some(mut right)) => {
                if left.prio > right.prio {
                    left.right = Self::merge_links(left.right.take(), Some(right));
                    left.recalc();
                    Some(left)
                } else {
                    right.left = Self::merge_links(Some(left), right.left.take());
                    right.recalc();
                    Some(right)
                }
            }
        }
    }

    /// Splits off the first `left_count` elements. The caller guarantees
    /// `left_count <= size(root)`.
    pub(crate) fn split_link(root: Link<P>, left_count: usize) -> (Link<P>, Link<P>) {
        let mut node = match root {
            Some(node) => node,
            None => return (None, None),
        };
        debug_assert!(left_count <= node.size as usize);
        if left_count == 0 {
            return (None, Some(node));
        }
        if left_count >= node.size as usize {
            return (Some(node), None);
        }

        let left_size = node.left_size as usize;
        if left_count <= left_size {
            let (left, right) = Self::split_link(node.left.take(), left_count);
            node.left = right;
            node.recalc();
            (left, Some(node))
        } else {
            let (left, right) = Self::split_link(node.right.take(), left_count - left_size - 1);
            node.right = left;
            node.recalc();
            (Some(node), right)
        }
    }

    fn fold_range(node: &Link<P>, start: usize, end: usize) -> P::Agg {
        if start >= end {
            return P::unit();
        }
        let Some(node_ref) = node.as_deref() else {
            return P::unit();
        };
        if start == 0 && end == node_ref.size as usize {
            return node_ref.agg.clone();
        }

        let left_size = node_ref.left_size as usize;
        if end <= left_size {
            return Self::fold_range(&node_ref.left, start, end);
        }
        if start > left_size {
            return Self::fold_range(&node_ref.right, start - left_size - 1, end - left_size - 1);
        }

        let left_agg = Self::fold_range(&node_ref.left, start, left_size);
        let right_agg = Self::fold_range(&node_ref.right, 0, end - left_size - 1);
        P::combine(&left_agg, &node_ref.key, &right_agg)
    }
}

fn normalize_range<R: RangeBounds<usize>>(range: R, len: usize) -> Option<(usize, usize)> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.checked_add(1)?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1)?,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    if start > end || end > len {
        return None;
    }

    Some((start, end))
}

impl<P: Aggregate> Default for Treap<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Aggregate> Drop for Treap<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<P> fmt::Debug for Treap<P>
where
    P: Aggregate,
    P::Key: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// In-order iterator over the keys of a [`Treap`].
pub struct Iter<'a, P: Aggregate> {
    stack: Vec<&'a Node<P>>,
}

impl<'a, P: Aggregate> Iter<'a, P> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<P>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, P: Aggregate> Iterator for Iter<'a, P> {
    type Item = &'a P::Key;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .stack
            .iter()
            .map(|node| 1 + Node::size(&node.right) as usize)
            .sum();
        (remaining, Some(remaining))
    }
}

impl<'a, P: Aggregate> IntoIterator for &'a Treap<P> {
    type Item = &'a P::Key;
    type IntoIter = Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
