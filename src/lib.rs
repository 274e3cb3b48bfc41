//! Building blocks for rendering GitHub account statistics into a README.
//!
//! The library is a linear pipeline: a lenient configuration resolver, a
//! GitHub REST fetcher that assembles a per-run [`StatsSnapshot`], and a pure
//! renderer that turns configuration plus snapshot into one deterministic
//! markdown document. Public APIs document their defaults and error
//! semantics so the CLI stays thin glue.

mod calendar;
mod config;
mod error;
mod format;
mod github;
mod readme;
mod render;
pub mod retry;
mod snapshot;

pub use calendar::{calendar_table, contribution_summary};
pub use config::{
    ActivityConfig, CalendarConfig, CommunityConfig, MetadataConfig, ProfileConfig,
    RepositoryConfig, StatsConfig, load_config, parse_config
};
pub use error::{Error, io_error};
pub use format::{
    format_count, format_disk_usage, format_join_date, format_percentage, usage_bar, yes_no
};
pub use github::{ActivityTotals, RepositoryTotals, StatsClient, analyze_events,
    analyze_repositories};
pub use readme::sync_readme;
pub use render::render_readme;
pub use snapshot::{LanguageUsage, StatsSnapshot};
