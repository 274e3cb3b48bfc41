// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Contribution calendar for the trailing seven days.
//!
//! Each day is bucketed into one of five intensity levels and rendered as a
//! heat square inside a one-row markdown table, oldest day first. The
//! summary line below the table condenses the week into a single sentence.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

/// Number of days covered by the calendar.
pub const CALENDAR_DAYS: u64 = 7;

/// Maps an event count to its intensity glyph.
///
/// Buckets: none, 1-3, 4-6, 7-9, 10 and above.
fn intensity_glyph(count: u64,) -> &'static str
{
    match count {
        0 => "⬜",
        1..=3 => "🟩",
        4..=6 => "🟨",
        7..=9 => "🟧",
        _ => "🟥",
    }
}

/// Renders the trailing seven days as a markdown table ending at `today`.
///
/// Day columns run oldest to newest. Days absent from the map render as
/// zero-intensity squares, so a quiet week still produces a full row.
pub fn calendar_table(daily: &BTreeMap<NaiveDate, u64,>, today: NaiveDate,) -> String
{
    let mut headers = Vec::with_capacity(CALENDAR_DAYS as usize,);
    let mut cells = Vec::with_capacity(CALENDAR_DAYS as usize,);

    for offset in (0..CALENDAR_DAYS).rev() {
        let date = today - Days::new(offset,);
        let count = daily.get(&date,).copied().unwrap_or(0,);
        headers.push(date.format("%a",).to_string(),);
        cells.push(intensity_glyph(count,).to_string(),);
    }

    let separator = vec![":---:"; CALENDAR_DAYS as usize];

    format!(
        "| {} |\n| {} |\n| {} |",
        headers.join(" | "),
        separator.join(" | "),
        cells.join(" | ")
    )
}

/// Condenses the week's event total into a one-line summary.
pub fn contribution_summary(total: u64,) -> String
{
    match total {
        0 => "No contributions in the last 7 days".to_owned(),
        1..=5 => format!("{total} contributions - Light activity this week"),
        6..=15 => format!("{total} contributions - Moderate activity this week"),
        _ => format!("{total} contributions - High activity this week"),
    }
}

#[cfg(test)]
mod tests
{
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::{calendar_table, contribution_summary, intensity_glyph};

    fn wednesday() -> NaiveDate
    {
        // 2025-01-15 is a Wednesday.
        NaiveDate::from_ymd_opt(2025, 1, 15,).expect("valid date",)
    }

    #[test]
    fn intensity_buckets_match_thresholds()
    {
        assert_eq!(intensity_glyph(0,), "⬜");
        assert_eq!(intensity_glyph(1,), "🟩");
        assert_eq!(intensity_glyph(3,), "🟩");
        assert_eq!(intensity_glyph(4,), "🟨");
        assert_eq!(intensity_glyph(6,), "🟨");
        assert_eq!(intensity_glyph(7,), "🟧");
        assert_eq!(intensity_glyph(9,), "🟧");
        assert_eq!(intensity_glyph(10,), "🟥");
        assert_eq!(intensity_glyph(250,), "🟥");
    }

    #[test]
    fn calendar_orders_days_oldest_first()
    {
        let table = calendar_table(&BTreeMap::new(), wednesday(),);
        let header = table.lines().next().expect("header row",);

        assert_eq!(header, "| Thu | Fri | Sat | Sun | Mon | Tue | Wed |");
    }

    #[test]
    fn calendar_renders_empty_week_as_zero_squares()
    {
        let table = calendar_table(&BTreeMap::new(), wednesday(),);
        let cells = table.lines().nth(2,).expect("cell row",);

        assert_eq!(cells, "| ⬜ | ⬜ | ⬜ | ⬜ | ⬜ | ⬜ | ⬜ |");
    }

    #[test]
    fn calendar_places_counts_on_their_days()
    {
        let mut daily = BTreeMap::new();
        daily.insert(wednesday(), 12,);
        daily.insert(
            NaiveDate::from_ymd_opt(2025, 1, 13,).expect("valid date",),
            2,
        );

        let table = calendar_table(&daily, wednesday(),);
        let cells = table.lines().nth(2,).expect("cell row",);

        // Monday the 13th, Wednesday the 15th.
        assert_eq!(cells, "| ⬜ | ⬜ | ⬜ | ⬜ | 🟩 | ⬜ | 🟥 |");
    }

    #[test]
    fn calendar_ignores_days_outside_the_window()
    {
        let mut daily = BTreeMap::new();
        daily.insert(
            NaiveDate::from_ymd_opt(2025, 1, 1,).expect("valid date",),
            9,
        );

        let table = calendar_table(&daily, wednesday(),);
        let cells = table.lines().nth(2,).expect("cell row",);

        assert_eq!(cells, "| ⬜ | ⬜ | ⬜ | ⬜ | ⬜ | ⬜ | ⬜ |");
    }

    #[test]
    fn summary_wording_tracks_activity_bands()
    {
        assert_eq!(contribution_summary(0,), "No contributions in the last 7 days");
        assert_eq!(contribution_summary(5,), "5 contributions - Light activity this week");
        assert_eq!(contribution_summary(6,), "6 contributions - Moderate activity this week");
        assert_eq!(contribution_summary(15,), "15 contributions - Moderate activity this week");
        assert_eq!(contribution_summary(16,), "16 contributions - High activity this week");
    }
}
