// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

/// GitHub REST fetcher that assembles the per-run statistics snapshot.
///
/// The fetch is a linear pipeline over the public REST API: profile,
/// repositories, the recent event feed, organization membership, collection
/// counts, and search totals. Raw routes are decoded as JSON values; the
/// aggregation helpers below are pure and unit-tested without a network.
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use octocrab::Octocrab;
use regex::Regex;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    error::Error,
    retry::{RetryPolicy, retry_with_backoff},
    snapshot::{LanguageUsage, StatsSnapshot}
};

/// Days of event history contributing to the activity stats.
const EVENT_WINDOW_DAYS: i64 = 7;
/// Upper bound on event feed pages; the API caps the feed anyway.
const MAX_EVENT_PAGES: u32 = 10;
/// Page size for list endpoints.
const PER_PAGE: u32 = 100;
/// Number of repositories probed for release counts.
const RELEASE_SCAN_LIMIT: usize = 10;
/// Maximum language rows carried into the snapshot.
const LANGUAGE_LIMIT: usize = 8;
/// REST endpoint base, matching the public API.
const API_BASE: &str = "https://api.github.com";
/// Extracts the final page number from a pagination `Link` header.
const LAST_PAGE_PATTERN: &str = r#"page=(\d+)>; rel="last""#;

/// Totals derived from the owned repository list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryTotals {
    /// Most common license key, when any repository declares one.
    pub license:    Option<String>,
    pub stargazers: u64,
    pub forkers:    u64,
    pub watchers:   u64,
    /// Combined repository size in KiB.
    pub disk_usage: u64,
    /// Primary-language shares over non-fork repositories, largest first.
    pub languages:  Vec<LanguageUsage>
}

/// Totals derived from the recent event feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityTotals {
    pub commits:    u64,
    pub prs_opened: u64,
    pub pr_reviews: u64,
    /// Events per UTC day.
    pub daily_contributions: BTreeMap<NaiveDate, u64>
}

/// Client bound to the authenticated account whose stats are rendered.
pub struct StatsClient {
    octocrab: Octocrab,
    username: String,
    retry:    RetryPolicy
}

impl StatsClient {
    /// Builds the API client and resolves the authenticated username.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the client cannot be constructed or the
    /// token does not resolve to a user.
    pub async fn connect(token: &str) -> Result<Self, Error> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_owned())
            .build()
            .map_err(|error| Error::api(format!("failed to initialize GitHub client: {error}")))?;

        let user = octocrab.current().user().await.map_err(|error| {
            Error::api(format!("failed to resolve authenticated user: {error}"))
        })?;

        debug!("authenticated as {}", user.login);

        Ok(Self {
            octocrab,
            username: user.login,
            retry: RetryPolicy::default()
        })
    }

    /// Login of the account the client is bound to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Fetches and aggregates everything the renderer consumes.
    ///
    /// Stages run sequentially, each behind the retry policy. Release
    /// counting is the one lenient stage: per-repository failures are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when a required stage keeps failing after
    /// retries.
    pub async fn fetch_snapshot(&self) -> Result<StatsSnapshot, Error> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("valid template")
        );

        spinner.set_message(format!("Fetching stats for {}...", self.username));
        let profile = retry_with_backoff(&self.retry, "fetch profile", || async move {
            self.fetch_profile().await
        })
        .await?;

        spinner.set_message("Fetching repositories...");
        let repositories = retry_with_backoff(&self.retry, "fetch repositories", || async move {
            self.fetch_repositories().await
        })
        .await?;

        spinner.set_message("Fetching recent events...");
        let cutoff = Utc::now() - Duration::days(EVENT_WINDOW_DAYS);
        let events = retry_with_backoff(&self.retry, "fetch events", || async move {
            self.fetch_recent_events(cutoff).await
        })
        .await?;

        spinner.set_message("Analyzing repositories...");
        let repository_totals = analyze_repositories(&repositories);

        spinner.set_message("Analyzing activity...");
        let activity = analyze_events(&events);

        spinner.set_message("Fetching community stats...");
        let organizations = retry_with_backoff(&self.retry, "fetch organizations", || async move {
            self.fetch_org_count().await
        })
        .await?;
        let starred = retry_with_backoff(&self.retry, "count starred", || async move {
            self.linked_count(&format!("/users/{}/starred", self.username)).await
        })
        .await?;
        let watching = retry_with_backoff(&self.retry, "count watching", || async move {
            self.linked_count(&format!("/users/{}/subscriptions", self.username)).await
        })
        .await?;
        let issues_open = retry_with_backoff(&self.retry, "count open issues", || async move {
            self.search_total(&format!("author:{} type:issue is:open", self.username)).await
        })
        .await?;
        let issue_comments = retry_with_backoff(&self.retry, "count issue comments", || async move {
            self.search_total(&format!("commenter:{}", self.username)).await
        })
        .await?;

        spinner.set_message("Counting releases...");
        let releases = self.count_releases(&repositories).await;

        spinner.finish_with_message(format!("Stats for {} ready", self.username));

        Ok(StatsSnapshot {
            username: self.username.clone(),
            name: profile.get("name").and_then(Value::as_str).map(str::to_owned),
            hireable: profile.get("hireable").and_then(Value::as_bool).unwrap_or(false),
            joined: profile
                .get("created_at")
                .and_then(Value::as_str)
                .and_then(|stamp| DateTime::parse_from_rfc3339(stamp).ok())
                .map(|stamp| stamp.with_timezone(&Utc).date_naive()),
            followers: count_field(&profile, "followers"),
            following: count_field(&profile, "following"),
            daily_contributions: activity.daily_contributions,
            commits: activity.commits,
            pr_reviews: activity.pr_reviews,
            prs_opened: activity.prs_opened,
            issues_open,
            issue_comments,
            organizations,
            starred,
            watching,
            total_repos: count_field(&profile, "public_repos"),
            license: repository_totals.license,
            releases,
            // The packages API needs token scopes a workflow token lacks.
            packages: 0,
            disk_usage: repository_totals.disk_usage,
            stargazers: repository_totals.stargazers,
            forkers: repository_totals.forkers,
            watchers: repository_totals.watchers,
            languages: repository_totals.languages
        })
    }

    async fn fetch_profile(&self) -> Result<Value, Error> {
        self.octocrab
            .get(format!("/users/{}", self.username), None::<&()>)
            .await
            .map_err(|error| Error::api(format!("failed to fetch profile: {error}")))
    }

    async fn fetch_repositories(&self) -> Result<Vec<Value>, Error> {
        let mut repositories = Vec::new();
        let mut page = 1u32;

        loop {
            let batch: Vec<Value> = self
                .octocrab
                .get(
                    format!("/users/{}/repos", self.username),
                    Some(&json!({"per_page": PER_PAGE, "page": page, "type": "owner"}))
                )
                .await
                .map_err(|error| Error::api(format!("failed to fetch repositories: {error}")))?;

            if batch.is_empty() {
                break;
            }

            repositories.extend(batch);
            page += 1;
        }

        debug!("fetched {} repositories", repositories.len());
        Ok(repositories)
    }

    async fn fetch_recent_events(&self, cutoff: DateTime<Utc>) -> Result<Vec<Value>, Error> {
        let mut events = Vec::new();
        let mut page = 1u32;

        // The feed arrives newest-first; the first event past the cutoff
        // ends the scan.
        while page <= MAX_EVENT_PAGES {
            let batch: Vec<Value> = self
                .octocrab
                .get(
                    format!("/users/{}/events", self.username),
                    Some(&json!({"per_page": PER_PAGE, "page": page}))
                )
                .await
                .map_err(|error| Error::api(format!("failed to fetch events: {error}")))?;

            if batch.is_empty() {
                break;
            }

            for event in batch {
                if let Some(stamp) = event_timestamp(&event)
                    && stamp < cutoff
                {
                    return Ok(events);
                }
                events.push(event);
            }

            page += 1;
        }

        Ok(events)
    }

    async fn fetch_org_count(&self) -> Result<u64, Error> {
        let organizations: Vec<Value> = self
            .octocrab
            .get("/user/orgs", None::<&()>)
            .await
            .map_err(|error| Error::api(format!("failed to fetch organizations: {error}")))?;

        Ok(organizations.len() as u64)
    }

    /// Derives a collection size from the `rel="last"` pagination link,
    /// falling back to counting one page when the header is absent.
    async fn linked_count(&self, route: &str) -> Result<u64, Error> {
        let response = self
            .octocrab
            ._get(format!("{API_BASE}{route}?per_page=1"))
            .await
            .map_err(|error| Error::api(format!("failed to fetch {route}: {error}")))?;

        let link_header = response
            .headers()
            .get("link")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        if let Some(count) = last_page_number(link_header) {
            return Ok(count);
        }

        // No rel="last" with per_page=1 means the collection fits one page.
        let items: Vec<Value> = self
            .octocrab
            .get(route, Some(&json!({"per_page": PER_PAGE})))
            .await
            .map_err(|error| Error::api(format!("failed to fetch {route}: {error}")))?;

        Ok(items.len() as u64)
    }

    async fn search_total(&self, query: &str) -> Result<u64, Error> {
        let results = self
            .octocrab
            .search()
            .issues_and_pull_requests(query)
            .per_page(1)
            .send()
            .await
            .map_err(|error| Error::api(format!("search '{query}' failed: {error}")))?;

        Ok(results.total_count.unwrap_or(0))
    }

    /// Counts releases across the first few repositories. Failures are
    /// logged and skipped so one flaky repository cannot fail the run.
    async fn count_releases(&self, repositories: &[Value]) -> u64 {
        let mut releases = 0u64;

        for repository in repositories.iter().take(RELEASE_SCAN_LIMIT) {
            let Some(name) = repository.get("name").and_then(Value::as_str) else {
                continue;
            };

            let route = format!("/repos/{}/{}/releases", self.username, name);
            match self
                .octocrab
                .get::<Vec<Value>, _, _>(&route, Some(&json!({"per_page": PER_PAGE})))
                .await
            {
                Ok(list) => releases += list.len() as u64,
                Err(error) => warn!("failed to fetch releases for {name}: {error}")
            }
        }

        releases
    }
}

/// Aggregates repository facts: license consensus, audience totals, disk
/// usage, and primary-language shares.
///
/// The license pick is deterministic: highest count first, lexicographically
/// smallest key on ties. Forks are excluded from language shares so mirrored
/// code does not skew the profile.
pub fn analyze_repositories(repositories: &[Value]) -> RepositoryTotals {
    let mut totals = RepositoryTotals::default();
    let mut license_counts: HashMap<String, u64> = HashMap::new();
    let mut language_counts: HashMap<String, u64> = HashMap::new();

    for repository in repositories {
        if let Some(key) = repository.pointer("/license/key").and_then(Value::as_str) {
            *license_counts.entry(key.to_owned()).or_insert(0) += 1;
        }

        totals.stargazers += count_field(repository, "stargazers_count");
        totals.forkers += count_field(repository, "forks_count");
        totals.watchers += count_field(repository, "watchers_count");
        totals.disk_usage += count_field(repository, "size");

        let is_fork = repository.get("fork").and_then(Value::as_bool).unwrap_or(false);
        if !is_fork
            && let Some(language) = repository.get("language").and_then(Value::as_str)
        {
            *language_counts.entry(language.to_owned()).or_insert(0) += 1;
        }
    }

    totals.license = license_counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(key, _)| key);

    let language_total: u64 = language_counts.values().sum();
    if language_total > 0 {
        let mut ranked: Vec<(String, u64)> = language_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(LANGUAGE_LIMIT);

        totals.languages = ranked
            .into_iter()
            .map(|(name, count)| LanguageUsage {
                name,
                percentage: count as f64 / language_total as f64 * 100.0
            })
            .collect();
    }

    totals
}

/// Aggregates the event feed into activity totals and per-day counts.
///
/// Commits are push events, PRs opened are pull-request events with the
/// `opened` action, reviews are review events. Every event contributes to
/// its UTC day regardless of type.
pub fn analyze_events(events: &[Value]) -> ActivityTotals {
    let mut totals = ActivityTotals::default();

    for event in events {
        match event.get("type").and_then(Value::as_str).unwrap_or("") {
            "PushEvent" => totals.commits += 1,
            "PullRequestEvent" => {
                let action = event.pointer("/payload/action").and_then(Value::as_str);
                if action == Some("opened") {
                    totals.prs_opened += 1;
                }
            }
            "PullRequestReviewEvent" => totals.pr_reviews += 1,
            _ => {}
        }

        if let Some(stamp) = event_timestamp(event) {
            *totals
                .daily_contributions
                .entry(stamp.date_naive())
                .or_insert(0) += 1;
        }
    }

    totals
}

fn event_timestamp(event: &Value) -> Option<DateTime<Utc>> {
    let created = event.get("created_at").and_then(Value::as_str)?;
    DateTime::parse_from_rfc3339(created)
        .ok()
        .map(|stamp| stamp.with_timezone(&Utc))
}

fn count_field(value: &Value, field: &str) -> u64 {
    value.get(field).and_then(Value::as_u64).unwrap_or(0)
}

fn last_page_number(link_header: &str) -> Option<u64> {
    let pattern = Regex::new(LAST_PAGE_PATTERN).ok()?;
    pattern
        .captures(link_header)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
