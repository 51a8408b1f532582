// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Release End-of-Life Library
//!
//! This library determines which minor release lines of a repository are
//! currently supported under a time-based end-of-life policy. Release data
//! comes from the GitHub CLI; the pipeline groups tagged releases into minor
//! lines, applies the support windows and formats a per-repository report.

pub mod client;
pub mod humanize;
pub mod policy;
pub mod release;
pub mod report;
pub mod version;

// Re-export commonly used items at the crate root for convenience
pub use client::{GhClient, ReleaseClient, extract_image};
pub use humanize::duration_ago;
pub use policy::{Decision, SupportPolicy};
pub use release::{Release, ReleaseGroups, parse_timestamp};
pub use report::{ReportOptions, Reporter, RepositoryReport, SupportedRelease};
pub use version::{MinorLine, Version};
