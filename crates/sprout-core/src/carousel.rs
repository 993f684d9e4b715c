// SPDX-License-Identifier: Apache-2.0

//! Rolling index arithmetic for the public hero rotation. Read-side
//! only; never touches persisted order.

/// Next slide index, wrapping at `len`. An empty carousel pins to 0.
#[must_use]
pub const fn advance(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current + 1) % len
}

/// Previous slide index, wrapping below 0. An empty carousel pins to 0.
#[must_use]
pub const fn rewind(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current + len - 1) % len
}
