// SPDX-License-Identifier: Apache-2.0

use sprout_model::TOP10_CAPACITY;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct CapacityError {
    pub len: usize,
    pub capacity: usize,
}

impl Display for CapacityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "collection already holds {} of {} members",
            self.len, self.capacity
        )
    }
}

impl std::error::Error for CapacityError {}

/// Precondition for a TOP-10 create: refuses once membership reaches
/// the cap. Active and inactive members both count.
///
/// Checked against a freshly read count; two operators racing past the
/// same count can still overfill the collection, which the store does
/// not prevent (row-level last-write-wins, no server-side constraint).
pub fn ensure_capacity(len: usize) -> Result<(), CapacityError> {
    if len >= TOP10_CAPACITY {
        return Err(CapacityError {
            len,
            capacity: TOP10_CAPACITY,
        });
    }
    Ok(())
}
