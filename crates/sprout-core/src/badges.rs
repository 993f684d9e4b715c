// SPDX-License-Identifier: Apache-2.0

use sprout_model::Badge;

/// Converts an operator-entered comma-separated string into badge
/// objects: split on `,`, trim each piece, drop empties, keep order.
/// Every badge gets the constant default style class.
#[must_use]
pub fn normalize_badges(input: &str) -> Vec<Badge> {
    input
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(Badge::new)
        .collect()
}
