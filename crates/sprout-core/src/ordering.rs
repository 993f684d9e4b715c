// SPDX-License-Identifier: Apache-2.0

use sprout_model::{Article, EntityId, HeroSlide, NewsClipping, Top10Item};
use std::fmt::{Display, Formatter};

/// Anything that occupies a slot in an ordered collection.
///
/// The List Manager only ever needs identity and rank; field schemas
/// stay with the concrete entities. This is the seam that lets the
/// four collections share one move/append/delete implementation.
pub trait Ranked {
    fn id(&self) -> EntityId;
    fn order_index(&self) -> u32;
}

impl Ranked for HeroSlide {
    fn id(&self) -> EntityId {
        self.id
    }
    fn order_index(&self) -> u32 {
        self.order_index
    }
}

impl Ranked for NewsClipping {
    fn id(&self) -> EntityId {
        self.id
    }
    fn order_index(&self) -> u32 {
        self.order_index
    }
}

impl Ranked for Top10Item {
    fn id(&self) -> EntityId {
        self.id
    }
    fn order_index(&self) -> u32 {
        self.order_index
    }
}

impl Ranked for Article {
    fn id(&self) -> EntityId {
        self.id
    }
    fn order_index(&self) -> u32 {
        self.order_index.unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// One row-level persistence call: set this row's `order_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderUpdate {
    pub id: EntityId,
    pub order_index: u32,
}

/// What a delete must persist besides the delete itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    pub id: EntityId,
    pub reindex: Vec<OrderUpdate>,
}

/// Whether a delete closes the gap it leaves. TOP-10 re-packs; hero
/// slides and news clippings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepackPolicy {
    Repack,
    LeaveGap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderingError {
    UnknownId(EntityId),
}

impl Display for OrderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownId(id) => write!(f, "no entity with id {id} in the loaded list"),
        }
    }
}

impl std::error::Error for OrderingError {}

fn position_of<T: Ranked>(list: &[T], id: EntityId) -> Result<usize, OrderingError> {
    list.iter()
        .position(|row| row.id() == id)
        .ok_or(OrderingError::UnknownId(id))
}

/// Plans a one-step move of `id` within `list`, which must already be
/// sorted ascending by `order_index`.
///
/// Boundary moves (first row up, last row down) are a silent no-op and
/// return no updates. Interior moves return exactly two updates
/// swapping the neighbours' `order_index` values; the store issues
/// them as two independent row updates with no transaction, so the
/// caller must re-fetch afterwards rather than trust local state.
pub fn plan_move<T: Ranked>(
    list: &[T],
    id: EntityId,
    direction: MoveDirection,
) -> Result<Vec<OrderUpdate>, OrderingError> {
    let index = position_of(list, id)?;
    let neighbour = match direction {
        MoveDirection::Up => {
            if index == 0 {
                return Ok(Vec::new());
            }
            index - 1
        }
        MoveDirection::Down => {
            if index + 1 >= list.len() {
                return Ok(Vec::new());
            }
            index + 1
        }
    };
    Ok(vec![
        OrderUpdate {
            id: list[index].id(),
            order_index: list[neighbour].order_index(),
        },
        OrderUpdate {
            id: list[neighbour].id(),
            order_index: list[index].order_index(),
        },
    ])
}

/// Index a freshly appended entity receives: the current length.
#[must_use]
pub const fn append_index(list_len: usize) -> u32 {
    list_len as u32
}

/// Plans deletion of `id` from `list` (sorted ascending by
/// `order_index`). Under `Repack` the survivors are renumbered to
/// `0..N-2` in their existing relative order; only rows whose index
/// actually changes produce an update.
pub fn plan_delete<T: Ranked>(
    list: &[T],
    id: EntityId,
    policy: RepackPolicy,
) -> Result<DeletePlan, OrderingError> {
    position_of(list, id)?;
    let reindex = match policy {
        RepackPolicy::LeaveGap => Vec::new(),
        RepackPolicy::Repack => list
            .iter()
            .filter(|row| row.id() != id)
            .enumerate()
            .filter_map(|(expected, row)| {
                let expected = expected as u32;
                (row.order_index() != expected).then_some(OrderUpdate {
                    id: row.id(),
                    order_index: expected,
                })
            })
            .collect(),
    };
    Ok(DeletePlan { id, reindex })
}

/// True when `order_index` values are exactly `0..N-1` in list order.
#[must_use]
pub fn is_contiguous<T: Ranked>(list: &[T]) -> bool {
    list.iter()
        .enumerate()
        .all(|(position, row)| row.order_index() == position as u32)
}
