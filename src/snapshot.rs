// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Per-run snapshot of the fetched account statistics.
//!
//! A [`StatsSnapshot`] is assembled fresh on every run and discarded
//! afterwards; nothing is persisted between runs. Fields are keyed like the
//! configuration leaves so the renderer can gate them one-to-one. The
//! `Default` value is the all-zero snapshot, which the renderer accepts
//! without error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Share of one primary language across the account's repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
pub struct LanguageUsage
{
    /// Language name as reported by the API.
    pub name:       String,
    /// Share of repositories reporting this language, in percent.
    pub percentage: f64,
}

/// Flat bag of account statistics retrieved for a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize,)]
pub struct StatsSnapshot
{
    /// Login of the account the statistics belong to.
    pub username: String,

    /// Display name; falls back to the login when unset on the profile.
    pub name: Option<String,>,

    /// Whether the profile advertises availability for hire.
    pub hireable: bool,

    /// Date the account was created, when the profile reports one.
    pub joined: Option<NaiveDate,>,

    pub followers: u64,
    pub following: u64,

    /// Events per UTC day inside the reporting window. Ordered keys keep
    /// rendering deterministic.
    pub daily_contributions: BTreeMap<NaiveDate, u64,>,

    /// Push events inside the reporting window.
    pub commits:        u64,
    pub pr_reviews:     u64,
    pub prs_opened:     u64,
    pub issues_open:    u64,
    pub issue_comments: u64,

    pub organizations: u64,
    pub starred:       u64,
    pub watching:      u64,

    pub total_repos: u64,
    /// Most common license key across owned repositories.
    pub license:     Option<String,>,
    pub releases:    u64,
    pub packages:    u64,
    /// Combined repository size in KiB, as reported by the API.
    pub disk_usage:  u64,

    pub stargazers: u64,
    pub forkers:    u64,
    pub watchers:   u64,

    /// Primary-language shares, largest first.
    pub languages: Vec<LanguageUsage,>,
}

impl StatsSnapshot
{
    /// Total number of events across the reporting window.
    pub fn total_contributions(&self,) -> u64
    {
        self.daily_contributions.values().sum()
    }

    /// Number of events recorded for the provided UTC day.
    pub fn contributions_on(&self, date: NaiveDate,) -> u64
    {
        self.daily_contributions.get(&date,).copied().unwrap_or(0,)
    }
}
