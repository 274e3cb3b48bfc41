// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

/// Pure markdown renderer for the statistics document.
///
/// Sections are emitted in a fixed order with fixed internal ordering, so
/// identical `(config, snapshot, today)` input always yields byte-identical
/// output. Disabled flags remove lines; missing data renders as zero-valued
/// lines instead of disappearing, which keeps "disabled by config" and
/// "present but zero" distinguishable in the final document.
use chrono::NaiveDate;

use crate::{
    calendar::{calendar_table, contribution_summary},
    config::{
        ActivityConfig, CalendarConfig, CommunityConfig, MetadataConfig, ProfileConfig,
        RepositoryConfig, StatsConfig
    },
    format::{
        format_count, format_disk_usage, format_join_date, format_percentage, usage_bar, yes_no
    },
    snapshot::{LanguageUsage, StatsSnapshot}
};

/// Fixed document title preceding the sections.
const DOCUMENT_TITLE: &str = "# GitHub Stats";

/// Renders the full README document for one run.
///
/// The six sections appear in fixed order: profile, calendar, activity,
/// community, repository, metadata. A section disabled in its entirety is
/// omitted together with its header. The renderer cannot fail: absent
/// optional data degrades to neutral placeholders.
pub fn render_readme(
    config: &StatsConfig,
    snapshot: &StatsSnapshot,
    today: NaiveDate
) -> String {
    let mut sections = vec![DOCUMENT_TITLE.to_owned()];

    sections.extend(profile_section(&config.profile, snapshot));
    sections.extend(calendar_section(&config.calendar, snapshot, today));
    sections.extend(activity_section(&config.activity_stats, snapshot));
    sections.extend(community_section(&config.community_stats, snapshot));
    sections.extend(repository_section(&config.repository_stats, snapshot));
    sections.extend(metadata_section(&config.metadata, snapshot));

    let mut document = sections.join("\n\n");
    document.push('\n');
    document
}

fn profile_section(config: &ProfileConfig, snapshot: &StatsSnapshot) -> Option<String> {
    if !config.any_enabled() {
        return None;
    }

    let mut parts = Vec::new();

    if config.name {
        let display = snapshot.name.as_deref().unwrap_or(&snapshot.username);
        parts.push(format!("### {display}"));
    }

    let mut items = Vec::new();
    if config.joined_date {
        let joined = snapshot
            .joined
            .map_or_else(|| "unknown".to_owned(), format_join_date);
        items.push(format!("- 📅 **Joined:** {joined}"));
    }
    if config.followers {
        items.push(format!(
            "- 👥 **Followers:** {}",
            format_count(snapshot.followers)
        ));
    }
    if config.available_for_hire {
        items.push(format!(
            "- 💼 **Available for hire:** {}",
            yes_no(snapshot.hireable)
        ));
    }

    if !items.is_empty() {
        parts.push(items.join("\n"));
    }

    Some(parts.join("\n\n"))
}

fn calendar_section(
    config: &CalendarConfig,
    snapshot: &StatsSnapshot,
    today: NaiveDate
) -> Option<String> {
    if !config.enabled {
        return None;
    }

    let table = calendar_table(&snapshot.daily_contributions, today);
    let summary = contribution_summary(snapshot.total_contributions());

    Some(format!("### 📆 Last 7 Days\n\n{table}\n\n*{summary}*"))
}

fn activity_section(config: &ActivityConfig, snapshot: &StatsSnapshot) -> Option<String> {
    if !config.any_enabled() {
        return None;
    }

    let mut items = Vec::new();
    if config.commits {
        items.push(format!("- 📝 **Commits (7d):** {}", format_count(snapshot.commits)));
    }
    if config.pr_reviews {
        items.push(format!("- 👀 **PR Reviews:** {}", format_count(snapshot.pr_reviews)));
    }
    if config.prs_opened {
        items.push(format!("- 🔀 **PRs Opened:** {}", format_count(snapshot.prs_opened)));
    }
    if config.issues_open {
        items.push(format!("- ⚠️ **Issues Open:** {}", format_count(snapshot.issues_open)));
    }
    if config.issue_comments {
        items.push(format!(
            "- 💬 **Issue Comments:** {}",
            format_count(snapshot.issue_comments)
        ));
    }

    Some(format!("### ⚡ Activity Stats\n\n{}", items.join("\n")))
}

fn community_section(config: &CommunityConfig, snapshot: &StatsSnapshot) -> Option<String> {
    if !config.any_enabled() {
        return None;
    }

    let mut items = Vec::new();
    if config.organizations {
        items.push(format!(
            "- 🏢 **Organizations:** {}",
            format_count(snapshot.organizations)
        ));
    }
    if config.following {
        items.push(format!("- ➕ **Following:** {}", format_count(snapshot.following)));
    }
    if config.starred {
        items.push(format!("- ⭐ **Starred:** {}", format_count(snapshot.starred)));
    }
    if config.watching {
        items.push(format!("- 👀 **Watching:** {}", format_count(snapshot.watching)));
    }

    Some(format!("### 👥 Community Stats\n\n{}", items.join("\n")))
}

fn repository_section(config: &RepositoryConfig, snapshot: &StatsSnapshot) -> Option<String> {
    if !config.any_enabled() {
        return None;
    }

    let mut parts = vec!["### 📁 Repository Stats".to_owned()];

    let mut items = Vec::new();
    if config.total_repos {
        items.push(format!(
            "- 📂 **Total Repos:** {}",
            format_count(snapshot.total_repos)
        ));
    }
    if config.license {
        let license = snapshot.license.as_deref().unwrap_or("None");
        items.push(format!("- ⚖️ **License:** {license}"));
    }
    if config.releases {
        items.push(format!("- 🚀 **Releases:** {}", format_count(snapshot.releases)));
    }
    if config.packages {
        items.push(format!("- 📦 **Packages:** {}", format_count(snapshot.packages)));
    }
    if config.disk_usage {
        items.push(format!("- 💾 **Disk:** {}", format_disk_usage(snapshot.disk_usage)));
    }

    if !items.is_empty() {
        parts.push(items.join("\n"));
    }

    if config.languages {
        parts.push(languages_block(&snapshot.languages));
    }

    Some(parts.join("\n\n"))
}

fn languages_block(languages: &[LanguageUsage]) -> String {
    if languages.is_empty() {
        return "**Top Languages**\n\n- No language data yet".to_owned();
    }

    let rows: Vec<String> = languages
        .iter()
        .map(|usage| {
            format!(
                "- `{}` {} {}",
                usage_bar(usage.percentage),
                usage.name,
                format_percentage(usage.percentage)
            )
        })
        .collect();

    format!("**Top Languages**\n\n{}", rows.join("\n"))
}

fn metadata_section(config: &MetadataConfig, snapshot: &StatsSnapshot) -> Option<String> {
    if !config.any_enabled() {
        return None;
    }

    let mut items = Vec::new();
    if config.stargazers {
        items.push(format!("- ⭐ **Stargazers:** {}", format_count(snapshot.stargazers)));
    }
    if config.forkers {
        items.push(format!("- 🍴 **Forkers:** {}", format_count(snapshot.forkers)));
    }
    if config.watchers {
        items.push(format!("- 👀 **Watchers:** {}", format_count(snapshot.watchers)));
    }

    Some(format!("### 🏅 Metadata\n\n{}", items.join("\n")))
}
