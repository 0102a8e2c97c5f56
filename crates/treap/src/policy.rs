/// Subtree aggregate carried by every node.
///
/// `combine` must be associative in the sense that folding a sequence in
/// any tree shape gives the same result, since split/merge reshape freely.
pub trait Aggregate {
    type Key;
    type Agg: Clone;

    fn unit() -> Self::Agg;
    fn from_key(key: &Self::Key) -> Self::Agg;
    fn combine(left: &Self::Agg, key: &Self::Key, right: &Self::Agg) -> Self::Agg;
}

pub struct SizeOnly;

impl Aggregate for SizeOnly {
    type Key = i64;
    type Agg = ();

    fn unit() -> Self::Agg {}

    fn from_key(_key: &Self::Key) -> Self::Agg {}

    fn combine(_left: &Self::Agg, _key: &Self::Key, _right: &Self::Agg) -> Self::Agg {}
}

pub struct RangeSum;

impl Aggregate for RangeSum {
    type Key = i64;
    type Agg = i64;

    fn unit() -> Self::Agg {
        0
    }

    fn from_key(key: &Self::Key) -> Self::Agg {
        *key
    }

    fn combine(left: &Self::Agg, key: &Self::Key, right: &Self::Agg) -> Self::Agg {
        left + key + right
    }
}
