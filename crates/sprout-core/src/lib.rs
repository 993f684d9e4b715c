#![forbid(unsafe_code)]
//! The invariant-bearing core of Sprout.
//!
//! Everything here is pure: the List Manager computes the persistence
//! calls a structural change requires and hands them to the store; it
//! never performs I/O itself. The one invariant that matters is that
//! each strictly-ordered collection keeps `order_index` unique and
//! contiguous over `0..N-1`, with inactive entities staying in the
//! sequence.

mod badges;
mod capacity;
mod carousel;
mod ordering;

pub use badges::normalize_badges;
pub use capacity::{ensure_capacity, CapacityError};
pub use carousel::{advance, rewind};
pub use ordering::{
    append_index, is_contiguous, plan_delete, plan_move, DeletePlan, MoveDirection, OrderUpdate,
    OrderingError, Ranked, RepackPolicy,
};

pub const CRATE_NAME: &str = "sprout-core";
