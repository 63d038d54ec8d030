//! Release check against GitHub.
//!
//! Runs once in a background thread so a slow network never stalls the
//! animation. The menu only reads the resulting status.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use serde::Deserialize;

/// Latest release endpoint of the project repository.
const LATEST_RELEASE_URL: &str = "https://api.github.com/repos/Cyclolysis/glyphrain/releases/latest";

/// Fallback page shown when the API omits the release URL.
const RELEASES_PAGE: &str = "https://github.com/Cyclolysis/glyphrain/releases/latest";

/// Timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of the release check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// No check has been started.
    NotChecked,
    Checking,
    UpToDate,
    Available { version: String, url: String },
    Failed(String),
}

impl UpdateStatus {
    /// One-line description for the menu.
    pub fn message(&self) -> String {
        match self {
            UpdateStatus::NotChecked => "Update check not run. Press u to check.".to_string(),
            UpdateStatus::Checking => "Checking for updates...".to_string(),
            UpdateStatus::UpToDate => "No update available.".to_string(),
            UpdateStatus::Available { version, url } => {
                format!("Update available: {version}. Get it at {url}")
            }
            UpdateStatus::Failed(reason) => format!("Update check failed: {reason}"),
        }
    }
}

/// Partial GitHub release payload.
#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
    html_url: Option<String>,
}

/// Fetches the latest release in a background thread.
#[derive(Debug)]
pub struct UpdateMonitor {
    /// Version of the running binary.
    current_version: String,
    /// Result shared with the fetch thread.
    status: Arc<RwLock<UpdateStatus>>,
}

impl UpdateMonitor {
    pub fn new(current_version: impl Into<String>) -> Self {
        Self {
            current_version: current_version.into(),
            status: Arc::new(RwLock::new(UpdateStatus::NotChecked)),
        }
    }

    /// Start a check unless one is already in flight.
    pub fn start(&self) {
        let Ok(mut status) = self.status.write() else {
            log::warn!("update status lock poisoned, not checking");
            return;
        };
        if *status == UpdateStatus::Checking {
            return;
        }
        *status = UpdateStatus::Checking;
        drop(status);

        let status = self.status.clone();
        let current_version = self.current_version.clone();

        thread::spawn(move || {
            let resolved = match fetch_latest_release() {
                Ok(release) => resolve_status(&current_version, release),
                Err(e) => {
                    log::warn!("update check failed: {e}");
                    UpdateStatus::Failed(e)
                }
            };
            log::info!("update check: {resolved:?}");
            if let Ok(mut status) = status.write() {
                *status = resolved;
            }
        });
    }

    /// Current status.
    /// Uses try_read so a write in progress never blocks a frame.
    pub fn status(&self) -> UpdateStatus {
        self.status
            .try_read()
            .map(|status| status.clone())
            .unwrap_or(UpdateStatus::Checking)
    }
}

/// Fetch the latest release description.
fn fetch_latest_release() -> Result<LatestRelease, String> {
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .new_agent();

    agent
        .get(LATEST_RELEASE_URL)
        .header("Accept", "application/vnd.github+json")
        .header(
            "User-Agent",
            concat!("glyphrain/", env!("CARGO_PKG_VERSION")),
        )
        .call()
        .map_err(|e| format!("HTTP error: {e}"))?
        .body_mut()
        .read_json()
        .map_err(|e| format!("JSON parse error: {e}"))
}

fn resolve_status(current_version: &str, release: LatestRelease) -> UpdateStatus {
    if is_newer(&release.tag_name, current_version) {
        UpdateStatus::Available {
            version: release.tag_name,
            url: release
                .html_url
                .unwrap_or_else(|| RELEASES_PAGE.to_string()),
        }
    } else {
        UpdateStatus::UpToDate
    }
}

/// Parse `v1.2.3` or `1.2` into numeric components.
fn parse_version(version: &str) -> Option<Vec<u64>> {
    let version = version.trim().trim_start_matches(['v', 'V']);
    let core = version.split(['-', '+']).next()?;
    core.split('.').map(|part| part.parse().ok()).collect()
}

/// Whether `candidate` is a strictly higher version than `current`.
/// Missing components count as zero; unparsable versions are never newer.
fn is_newer(candidate: &str, current: &str) -> bool {
    let (Some(candidate), Some(current)) = (parse_version(candidate), parse_version(current))
    else {
        return false;
    };
    let len = candidate.len().max(current.len());
    let pad = |v: &[u64]| (0..len).map(|i| v.get(i).copied().unwrap_or(0)).collect::<Vec<_>>();
    pad(&candidate) > pad(&current)
}
