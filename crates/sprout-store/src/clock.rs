// SPDX-License-Identifier: Apache-2.0

//! UTC timestamp strings without a calendar dependency. RFC3339 with
//! second precision; lexicographic order equals chronological order,
//! which is what every expiry/window comparison here relies on.

use std::time::{SystemTime, UNIX_EPOCH};

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// Civil-from-days conversion (Howard Hinnant's algorithm).
const fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let year = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

fn format_rfc3339(unix_secs: u64) -> String {
    let days = (unix_secs / 86_400) as i64;
    let rem = unix_secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Current instant as `YYYY-MM-DDTHH:MM:SSZ`.
#[must_use]
pub fn now_rfc3339() -> String {
    format_rfc3339(unix_now())
}

/// An instant `secs` from now, same format.
#[must_use]
pub fn rfc3339_in(secs: u64) -> String {
    format_rfc3339(unix_now() + secs)
}

/// Current UTC date as `YYYY-MM-DD`.
#[must_use]
pub fn today_utc() -> String {
    let (year, month, day) = civil_from_days((unix_now() / 86_400) as i64);
    format!("{year:04}-{month:02}-{day:02}")
}

/// An instant `secs` ago, same format as [`now_rfc3339`].
#[must_use]
pub fn rfc3339_ago(secs: u64) -> String {
    format_rfc3339(unix_now().saturating_sub(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_epoch_offsets_format_correctly() {
        assert_eq!(format_rfc3339(0), "1970-01-01T00:00:00Z");
        // 2024-02-29 00:00:00 UTC (leap day)
        assert_eq!(format_rfc3339(1_709_164_800), "2024-02-29T00:00:00Z");
        assert_eq!(format_rfc3339(1_709_164_800 + 3661), "2024-02-29T01:01:01Z");
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(format_rfc3339(100) < format_rfc3339(101));
        assert!(rfc3339_ago(60) < now_rfc3339());
        assert!(now_rfc3339() < rfc3339_in(60));
    }

    #[test]
    fn today_is_a_prefix_of_now() {
        assert!(now_rfc3339().starts_with(&today_utc()));
    }
}
