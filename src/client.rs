// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Access to release metadata hosted on GitHub
//!
//! Release data is obtained through the GitHub CLI (`gh`), which is expected
//! to be installed and already authenticated. The [`ReleaseClient`] trait is
//! the seam used by the reporter, so tests can substitute canned listings.

use std::error::Error;
use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

/// Name of the GitHub CLI binary looked up on `PATH`
pub const GH_BIN: &str = "gh";

#[allow(clippy::unwrap_used)]
static DOCKER_PULL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`docker pull (.*)`").unwrap());

/// Source of release listings and release descriptions
pub trait ReleaseClient {
    /// Tab-delimited release listing, newest first
    ///
    /// # Errors
    /// Returns error if the listing cannot be obtained
    fn list_releases(&self, repo: &str) -> Result<String, Box<dyn Error>>;

    /// Free-text view of a single release
    ///
    /// # Errors
    /// Returns error if the release cannot be obtained
    fn view_release(&self, repo: &str, tag: &str) -> Result<String, Box<dyn Error>>;
}

/// [`ReleaseClient`] backed by the `gh` command line tool
#[derive(Debug, Clone)]
pub struct GhClient {
    program: PathBuf,
    limit: Option<u32>,
    verbose: bool,
}

impl GhClient {
    /// Locate `gh` on `PATH`
    ///
    /// # Errors
    /// Returns error with installation instructions if `gh` cannot be found
    pub fn locate() -> Result<Self, Box<dyn Error>> {
        let program = which::which(GH_BIN).map_err(|_| {
            format!(
                "Error: The `{GH_BIN}` command is not available in the PATH.\n\
                 Please install the GitHub CLI (https://cli.github.com/) and try again."
            )
        })?;
        Ok(Self {
            program,
            limit: None,
            verbose: false,
        })
    }

    /// Maximum number of releases requested per listing
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn run(&self, args: &[String]) -> Result<String, Box<dyn Error>> {
        if self.verbose {
            eprintln!("Running: {} {}", self.program.display(), args.join(" "));
        }

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| format!("Failed to run '{GH_BIN}': {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "'{GH_BIN} {}' failed ({}):\n{}",
                args.join(" "),
                output.status,
                stderr.trim_end()
            )
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ReleaseClient for GhClient {
    fn list_releases(&self, repo: &str) -> Result<String, Box<dyn Error>> {
        let mut args = vec![
            "release".to_string(),
            "-R".to_string(),
            repo.to_string(),
            "list".to_string(),
        ];
        if let Some(limit) = self.limit {
            args.push("-L".to_string());
            args.push(limit.to_string());
        }
        self.run(&args)
    }

    fn view_release(&self, repo: &str, tag: &str) -> Result<String, Box<dyn Error>> {
        let args = [
            "release".to_string(),
            "-R".to_string(),
            repo.to_string(),
            "view".to_string(),
            tag.to_string(),
        ];
        self.run(&args)
    }
}

/// Extract the container image from a release description
///
/// Looks for the first `` `docker pull <image>` `` snippet.
///
/// # Errors
/// Returns error if the description contains no such snippet
///
/// # Examples
/// ```
/// use release_eol::client::extract_image;
/// let notes = "Images:\n`docker pull registry.k8s.io/sig-storage/csi-attacher:v4.3.0`\n";
/// assert_eq!(
///     extract_image(notes).unwrap(),
///     "registry.k8s.io/sig-storage/csi-attacher:v4.3.0"
/// );
/// assert!(extract_image("no image here").is_err());
/// ```
pub fn extract_image(description: &str) -> Result<String, Box<dyn Error>> {
    DOCKER_PULL_RE
        .captures(description)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| "No `docker pull <image>` snippet found in release description".into())
}
