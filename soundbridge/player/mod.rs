pub mod request;

use crate::config::Config;
use crate::notify::Notifier;
use crate::player::request::PlayRequest;
use log::{error, info, warn};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use tokio::fs;
use tokio::process::Command;

/// Per-request outcome counts. A file that launched but exited non-zero
/// still counts as played; `failed` means the player process could not be
/// started at all.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub played: usize,
    pub missing: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} played, {} missing, {} rejected, {} failed",
            self.played, self.missing, self.rejected, self.failed
        )
    }
}

enum Outcome {
    Played,
    Missing,
    Rejected,
    Failed,
}

#[derive(Clone)]
pub struct Player {
    config: Arc<Config>,
    notifier: Notifier,
}

impl Player {
    pub fn new(config: Arc<Config>, notifier: Notifier) -> Self {
        Self { config, notifier }
    }

    /// Plays every file in the request strictly in order, waiting for each
    /// player process to exit before starting the next. A bad file never
    /// aborts the rest of the request.
    pub async fn play_all(&self, request: &PlayRequest) -> Summary {
        let mut summary = Summary::default();
        for name in &request.files {
            match self.play_one(name).await {
                Outcome::Played => summary.played += 1,
                Outcome::Missing => summary.missing += 1,
                Outcome::Rejected => summary.rejected += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }
        summary
    }

    async fn play_one(&self, name: &str) -> Outcome {
        if !is_safe_filename(name) {
            error!("Rejecting unsafe filename from payload: {name:?}");
            return Outcome::Rejected;
        }

        let path = Path::new(&self.config.music_dir).join(name);
        let is_file = fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            error!("Audio file missing: {}", path.display());
            self.notifier
                .alert(&format!("Audio file missing: {}", path.display()))
                .await;
            return Outcome::Missing;
        }

        info!("Playing {}", path.display());
        let mut command = Command::new(&self.config.player_bin);
        if let Some(device) = &self.config.audio_device {
            command.arg("-ao").arg(device);
        }
        command.arg(&path).stdout(Stdio::null());

        match command.status().await {
            Ok(status) if status.success() => Outcome::Played,
            Ok(status) => {
                // Launched but unhappy; logged only, the next file still plays.
                warn!("Player exited with {status} for {}", path.display());
                Outcome::Played
            }
            Err(e) => {
                error!("Failed to start player for {}: {e}", path.display());
                self.notifier
                    .alert(&format!("Failed to start player for {}: {e}", path.display()))
                    .await;
                Outcome::Failed
            }
        }
    }
}

/// Filenames come straight from the broker payload; anything that could
/// escape the music root is rejected before touching the filesystem.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && name != "." && name != ".."
}
