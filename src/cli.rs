// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for release-eol
//
// Separated from main.rs so that build.rs can include this file
// to generate the man page via clap_mangen.

use clap::Parser;

/// CLI argument parser - bools required for clap flag parsing
#[derive(Parser)]
#[command(
    name = "release-eol",
    version,
    about = "Get the currently supported versions for GitHub repositories",
    after_help = "\
A minor line is supported while it is the newest one, while its first release is younger than \
--max-age days, or while its latest patch release is younger than --patch-window days.

Example:
  release-eol -R kubernetes-csi/external-attacher -R kubernetes-csi/external-provisioner --doc"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Repository in the format owner/repo; repeat to query several repositories
    #[arg(short = 'R', long = "repo", value_name = "OWNER/REPO", required = true, value_parser = parse_repo)]
    pub repos: Vec<String>,

    /// Display supported versions with their release dates (default)
    #[arg(short = 'd', long = "display", default_value_t = true)]
    pub display: bool,

    /// Do not display supported versions with their release dates
    #[arg(long = "no-display")]
    pub no_display: bool,

    /// Print the docker image of each supported version
    #[arg(short = 'D', long = "doc")]
    pub doc: bool,

    /// Print the results as JSON instead of text
    #[arg(long = "json")]
    pub json: bool,

    /// Maximum number of releases to fetch per repository
    #[arg(short = 'L', long = "limit", value_name = "N")]
    pub limit: Option<u32>,

    /// Days a minor line is supported after its first release
    #[arg(long = "max-age", value_name = "DAYS", default_value_t = 365)]
    pub max_age: u32,

    /// Days an older minor line stays supported after its latest patch release
    #[arg(long = "patch-window", value_name = "DAYS", default_value_t = 90)]
    pub patch_window: u32,

    /// Make the operation more talkative
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether the date and age listing should be printed
    #[must_use]
    pub fn display(&self) -> bool {
        self.display && !self.no_display
    }
}

fn parse_repo(s: &str) -> Result<String, String> {
    // gh also accepts HOST/OWNER/REPO
    let parts: Vec<&str> = s.split('/').collect();
    if (2..=3).contains(&parts.len()) && parts.iter().all(|part| !part.is_empty()) {
        Ok(s.to_string())
    } else {
        Err(format!("invalid repository: {s} (expected OWNER/REPO)"))
    }
}
