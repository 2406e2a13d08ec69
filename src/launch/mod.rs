use anyhow::{Context, Result};
use std::process::{Command, Stdio};

pub const TARGET_BLANK: &str = "_blank";
/// Isolation policy for documents opened from the view: the new context must
/// get no opener handle and no referrer. Any opener implementation has to
/// pass this through verbatim.
pub const FEATURES_ISOLATED: &str = "noopener,noreferrer";

/// One activation of a document control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub url: String,
    pub target: String,
    pub features: String,
}

impl OpenRequest {
    pub fn isolated(url: &str) -> Self {
        Self {
            url: url.to_string(),
            target: TARGET_BLANK.to_string(),
            features: FEATURES_ISOLATED.to_string(),
        }
    }
}

/// Boundary for handing a URL to the host system. The only side-effecting
/// call this application makes.
pub trait LinkOpener: Send + Sync {
    fn open(&self, request: &OpenRequest) -> Result<()>;
}

/// Opens URLs through the platform launcher. The launcher is a separate
/// process with no handle back to us, which satisfies the noopener,noreferrer
/// contract by construction.
pub struct SystemOpener;

impl SystemOpener {
    #[cfg(target_os = "linux")]
    fn command(url: &str) -> Command {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }

    #[cfg(target_os = "macos")]
    fn command(url: &str) -> Command {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    }

    #[cfg(target_os = "windows")]
    fn command(url: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, request: &OpenRequest) -> Result<()> {
        log::debug!(
            "opening {} (target={}, features={})",
            request.url,
            request.target,
            request.features
        );
        Self::command(&request.url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("could not open {}", request.url))?;
        Ok(())
    }
}

/// Test double that records every request instead of touching the system.
#[cfg(test)]
pub struct RecordingOpener {
    pub calls: std::sync::Mutex<Vec<OpenRequest>>,
}

#[cfg(test)]
impl RecordingOpener {
    pub fn new() -> Self {
        Self {
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl LinkOpener for RecordingOpener {
    fn open(&self, request: &OpenRequest) -> Result<()> {
        self.calls.lock().unwrap().push(request.clone());
        Ok(())
    }
}
