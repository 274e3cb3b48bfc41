//! Display configuration for the rendered statistics document.
//!
//! The types in this module mirror the structure of the user-supplied
//! configuration document. Every leaf is a boolean display flag that
//! defaults to `true`: absence of a key always means "enabled", never
//! "disabled", so a partial document only ever switches items off. Unknown
//! keys are ignored to stay forward-compatible.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;

/// Root configuration document with the six fixed display categories.
///
/// # Examples
///
/// ```
/// use octostats::parse_config;
///
/// let config = parse_config(r#"{"calendar": {"enabled": false}}"#,).expect("valid document",);
/// assert!(!config.calendar.enabled);
/// assert!(config.profile.followers);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default)]
pub struct StatsConfig
{
    /// Profile header flags.
    pub profile:          ProfileConfig,
    /// Contribution calendar flags.
    pub calendar:         CalendarConfig,
    /// Recent activity flags.
    pub activity_stats:   ActivityConfig,
    /// Community involvement flags.
    pub community_stats:  CommunityConfig,
    /// Repository aggregate flags.
    pub repository_stats: RepositoryConfig,
    /// Repository audience flags.
    pub metadata:         MetadataConfig,
}

impl Default for StatsConfig
{
    fn default() -> Self
    {
        Self {
            profile:          ProfileConfig::default(),
            calendar:         CalendarConfig::default(),
            activity_stats:   ActivityConfig::default(),
            community_stats:  CommunityConfig::default(),
            repository_stats: RepositoryConfig::default(),
            metadata:         MetadataConfig::default(),
        }
    }
}

/// Flags controlling the profile header section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default)]
pub struct ProfileConfig
{
    pub name:               bool,
    pub joined_date:        bool,
    pub followers:          bool,
    pub available_for_hire: bool,
}

impl Default for ProfileConfig
{
    fn default() -> Self
    {
        Self {
            name: true, joined_date: true, followers: true, available_for_hire: true,
        }
    }
}

impl ProfileConfig
{
    /// Returns `true` when at least one profile line is enabled.
    pub fn any_enabled(&self,) -> bool
    {
        self.name || self.joined_date || self.followers || self.available_for_hire
    }
}

/// Flags controlling the contribution calendar section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default)]
pub struct CalendarConfig
{
    pub enabled: bool,
}

impl Default for CalendarConfig
{
    fn default() -> Self
    {
        Self {
            enabled: true,
        }
    }
}

/// Flags controlling the recent activity section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default)]
pub struct ActivityConfig
{
    pub commits:        bool,
    pub pr_reviews:     bool,
    pub prs_opened:     bool,
    pub issues_open:    bool,
    pub issue_comments: bool,
}

impl Default for ActivityConfig
{
    fn default() -> Self
    {
        Self {
            commits:        true,
            pr_reviews:     true,
            prs_opened:     true,
            issues_open:    true,
            issue_comments: true,
        }
    }
}

impl ActivityConfig
{
    /// Returns `true` when at least one activity line is enabled.
    pub fn any_enabled(&self,) -> bool
    {
        self.commits || self.pr_reviews || self.prs_opened || self.issues_open
            || self.issue_comments
    }
}

/// Flags controlling the community involvement section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default)]
pub struct CommunityConfig
{
    pub organizations: bool,
    pub following:     bool,
    pub starred:       bool,
    pub watching:      bool,
}

impl Default for CommunityConfig
{
    fn default() -> Self
    {
        Self {
            organizations: true, following: true, starred: true, watching: true,
        }
    }
}

impl CommunityConfig
{
    /// Returns `true` when at least one community line is enabled.
    pub fn any_enabled(&self,) -> bool
    {
        self.organizations || self.following || self.starred || self.watching
    }
}

/// Flags controlling the repository aggregates section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default)]
pub struct RepositoryConfig
{
    pub total_repos: bool,
    pub license:     bool,
    pub releases:    bool,
    pub packages:    bool,
    pub disk_usage:  bool,
    pub languages:   bool,
}

impl Default for RepositoryConfig
{
    fn default() -> Self
    {
        Self {
            total_repos: true,
            license:     true,
            releases:    true,
            packages:    true,
            disk_usage:  true,
            languages:   true,
        }
    }
}

impl RepositoryConfig
{
    /// Returns `true` when at least one repository line is enabled.
    pub fn any_enabled(&self,) -> bool
    {
        self.total_repos || self.license || self.releases || self.packages || self.disk_usage
            || self.languages
    }
}

/// Flags controlling the repository audience section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default)]
pub struct MetadataConfig
{
    pub stargazers: bool,
    pub forkers:    bool,
    pub watchers:   bool,
}

impl Default for MetadataConfig
{
    fn default() -> Self
    {
        Self {
            stargazers: true, forkers: true, watchers: true,
        }
    }
}

impl MetadataConfig
{
    /// Returns `true` when at least one audience line is enabled.
    pub fn any_enabled(&self,) -> bool
    {
        self.stargazers || self.forkers || self.watchers
    }
}

/// Parses a configuration document, accepting JSON or YAML.
///
/// JSON is attempted first; on failure the document is retried as YAML.
/// Missing leaves and categories fall back to enabled, and unknown keys are
/// ignored.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the document decodes as neither format.
pub fn parse_config(contents: &str,) -> Result<StatsConfig, Error,>
{
    match serde_json::from_str(contents,) {
        Ok(config,) => Ok(config,),
        Err(json_error,) => serde_yaml::from_str(contents,).map_err(|yaml_error| Error::Parse {
            message: format!(
                "document is neither valid JSON ({json_error}) nor valid YAML ({yaml_error})"
            ),
        },),
    }
}

/// Resolves the configuration for a run, never failing.
///
/// A missing file, an unreadable file, and an unparsable document all
/// degrade to the all-enabled default. The degradation is logged but never
/// surfaced as an error: a partially customized README beats a failed
/// unattended run.
pub fn load_config(path: &Path,) -> StatsConfig
{
    if !path.exists() {
        debug!("no configuration at {}, using defaults", path.display());
        return StatsConfig::default();
    }

    let contents = match fs::read_to_string(path,) {
        Ok(contents,) => contents,
        Err(error,) => {
            warn!(
                "failed to read configuration at {}: {error}; using defaults",
                path.display()
            );
            return StatsConfig::default();
        }
    };

    match parse_config(&contents,) {
        Ok(config,) => config,
        Err(error,) => {
            warn!("{}; using defaults", error.to_display_string());
            StatsConfig::default()
        }
    }
}
