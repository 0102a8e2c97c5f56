//! Implicit-key treap with sum aggregates, and a two-tree layout of a
//! sequence split by position parity that supports adjacent-pair swaps and
//! range sums over the original positions.

mod dual;
mod error;
mod node;
mod policy;
mod rng;
mod treap;

pub use dual::{DualTreap, Operation};
pub use error::{RangeError, TreapError};
pub use policy::{Aggregate, RangeSum, SizeOnly};
pub use rng::PriorityRng;
pub use treap::{Iter, Treap};
