use crate::policy::Aggregate;

pub(crate) type Link<P> = Option<Box<Node<P>>>;

/// One sequence element plus the cached facts about its subtree.
///
/// `size`, `left_size` and `agg` are derived and only valid after
/// [`Node::recalc`] has run on every node whose children changed,
/// bottom-up. `prio` is fixed at creation.
pub(crate) struct Node<P: Aggregate> {
    pub(crate) key: P::Key,
    pub(crate) agg: P::Agg,
    pub(crate) size: u32,
    pub(crate) left_size: u32,
    pub(crate) prio: u32,
    pub(crate) left: Link<P>,
    pub(crate) right: Link<P>,
}

impl<P: Aggregate> Node<P> {
    pub(crate) fn new(key: P::Key, prio: u32) -> Self {
        let agg = P::from_key(&key);
        Self {
            key,
            agg,
            size: 1,
            left_size: 0,
            prio,
            left: None,
            right: None,
        }
    }

    pub(crate) fn size(node: &Link<P>) -> u32 {
        node.as_ref().map(|n| n.size).unwrap_or(0)
    }

    pub(crate) fn agg(node: &Link<P>) -> P::Agg {
        node.as_ref()
            .map(|n| n.agg.clone())
            .unwrap_or_else(P::unit)
    }

    pub(crate) fn recalc(&mut self) {
        let left_size = Self::size(&self.left);
        let right_size = Self::size(&self.right);

        self.left_size = left_size;
        self.size = 1 + left_size + right_size;
        self.agg = P::combine(&Self::agg(&self.left), &self.key, &Self::agg(&self.right));
    }
}
