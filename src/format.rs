// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Formatting rules shared by every rendered section.
//!
//! The rules are fixed so output stays byte-identical for identical input:
//! counts of four or more digits get `,` thousands separators, percentages
//! round to one decimal, and usage bars are a 20-glyph run of filled and
//! empty block characters.

use chrono::NaiveDate;

/// Width of a usage bar in glyphs.
const BAR_WIDTH: usize = 20;
/// Glyph used for the filled portion of a usage bar.
const BAR_FILLED: char = '█';
/// Glyph used for the empty portion of a usage bar.
const BAR_EMPTY: char = '░';

/// Formats a count with thousands separators.
///
/// Counts below 1,000 render unchanged.
///
/// # Examples
///
/// ```
/// use octostats::format_count;
///
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(999), "999");
/// ```
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Formats a percentage with one decimal and a trailing `%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Renders a fixed-width usage bar proportional to a percentage.
///
/// The filled glyph count is `percentage / 100 * 20` rounded half-up and
/// clamped to the bar width, so out-of-range input still produces a
/// well-formed bar.
///
/// # Examples
///
/// ```
/// use octostats::usage_bar;
///
/// assert_eq!(usage_bar(37.4), "███████░░░░░░░░░░░░░");
/// ```
pub fn usage_bar(percentage: f64) -> String {
    let filled = (percentage / 100.0 * BAR_WIDTH as f64).round();
    let filled = if filled.is_sign_negative() {
        0
    } else {
        (filled as usize).min(BAR_WIDTH)
    };

    let mut bar = String::with_capacity(BAR_WIDTH * BAR_FILLED.len_utf8());
    for _ in 0..filled {
        bar.push(BAR_FILLED);
    }
    for _ in filled..BAR_WIDTH {
        bar.push(BAR_EMPTY);
    }

    bar
}

/// Formats a repository size reported in KiB as megabytes.
pub fn format_disk_usage(kib: u64) -> String {
    format!("{:.2} MB", kib as f64 / 1024.0)
}

/// Formats an account creation date for the profile section.
pub fn format_join_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Renders a boolean flag the way the profile section words it.
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::{format_count, format_disk_usage, format_join_date, format_percentage, usage_bar,
        yes_no};

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234), "1,234");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(10_000_000), "10,000,000");
    }

    proptest! {
        #[test]
        fn format_count_round_trips_through_separator_removal(value in 0u64..=u64::MAX) {
            let formatted = format_count(value);
            let stripped: String = formatted.chars().filter(|ch| *ch != ',').collect();
            prop_assert_eq!(stripped.parse::<u64>().expect("digits"), value);
            prop_assert!(!formatted.starts_with(','));
            prop_assert!(!formatted.contains(",,"));
        }
    }

    #[test]
    fn format_percentage_keeps_one_decimal() {
        assert_eq!(format_percentage(37.4), "37.4%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(100.0), "100.0%");
        assert_eq!(format_percentage(12.35), "12.3%");
        assert_eq!(format_percentage(12.55), "12.6%");
    }

    #[test]
    fn usage_bar_is_proportional() {
        assert_eq!(usage_bar(37.4), "███████░░░░░░░░░░░░░");
        assert_eq!(usage_bar(0.0), "░".repeat(20));
        assert_eq!(usage_bar(100.0), "█".repeat(20));
        assert_eq!(usage_bar(50.0), format!("{}{}", "█".repeat(10), "░".repeat(10)));
    }

    #[test]
    fn usage_bar_clamps_out_of_range_input() {
        assert_eq!(usage_bar(250.0), "█".repeat(20));
        assert_eq!(usage_bar(-5.0), "░".repeat(20));
    }

    #[test]
    fn usage_bar_always_spans_the_fixed_width() {
        for tenth in 0..=1000 {
            let bar = usage_bar(f64::from(tenth) / 10.0);
            assert_eq!(bar.chars().count(), 20, "bar width drifted at {tenth}");
        }
    }

    #[test]
    fn format_disk_usage_converts_kib_to_megabytes() {
        assert_eq!(format_disk_usage(0), "0.00 MB");
        assert_eq!(format_disk_usage(1024), "1.00 MB");
        assert_eq!(format_disk_usage(12_345), "12.06 MB");
    }

    #[test]
    fn format_join_date_spells_out_the_month() {
        let date = NaiveDate::from_ymd_opt(2015, 3, 1).expect("valid date");
        assert_eq!(format_join_date(date), "March 01, 2015");
    }

    #[test]
    fn yes_no_maps_flags_to_words() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }
}
