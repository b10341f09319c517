//! Watch-rebuild loop.
//!
//! Turns file changes into compiles and compiles into channel messages.
//! Rebuilds never overlap: changes that arrive while a compile runs are
//! drained after it and answered with a single follow-up rebuild. A burst of
//! changes is settled by waiting out the debounce window after the first
//! one, so the compile always sees the latest save.

use crate::assets::AssetSync;
use crate::dev::channel::LiveChannel;
use crate::dev::watcher::FileChange;
use crate::error::{BuildError, Result};
use crate::ui;
use lume_bundler::{BuildMode, BuildOutcome, Compiler};
use lume_runtime::ChannelMessage;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Initial build succeeded; reacting to changes.
    Watching,
    /// Initial build failed; the loop never starts.
    Dead,
}

pub struct RebuildLoop {
    compiler: Arc<dyn Compiler>,
    assets: AssetSync,
    channel: Arc<LiveChannel>,
    cwd: PathBuf,
    debounce: Duration,
    state: LoopState,
}

impl RebuildLoop {
    pub fn new(
        compiler: Arc<dyn Compiler>,
        assets: AssetSync,
        channel: Arc<LiveChannel>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compiler,
            assets,
            channel,
            cwd: cwd.into(),
            debounce: Duration::ZERO,
            state: LoopState::Watching,
        }
    }

    /// Wait this long after a change before compiling.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// First compile of the session. A failure here is fatal.
    pub async fn initial_build(&mut self) -> Result<()> {
        let start = Instant::now();
        let outcome = self.compiler.compile(BuildMode::Development).await;
        // The page must be servable before the server starts.
        if let Err(err) = self.sync_assets().await {
            tracing::warn!(error = %err, "asset sync task failed");
        }

        match outcome {
            BuildOutcome::Success { .. } => {
                ui::success(&format!(
                    "Initial build completed in {}",
                    ui::format_duration(start.elapsed())
                ));
                Ok(())
            }
            BuildOutcome::Failure { diagnostics } => {
                self.state = LoopState::Dead;
                Err(BuildError::Failed {
                    diagnostics,
                    cwd: self.cwd.clone(),
                }
                .into())
            }
        }
    }

    /// Process changes until the sender side is dropped.
    pub async fn run(&mut self, mut changes: mpsc::Receiver<FileChange>) {
        if self.state == LoopState::Dead {
            tracing::debug!("rebuild loop not started after failed initial build");
            return;
        }

        while let Some(change) = changes.recv().await {
            if !self.debounce.is_zero() {
                tokio::time::sleep(self.debounce).await;
            }
            let pending = drain(&mut changes);
            tracing::debug!(
                path = %change.path().display(),
                coalesced = pending,
                "change detected"
            );
            ui::info(&format!("File changed: {}", change.path().display()));
            self.rebuild().await;
        }
    }

    /// Compile once, refresh assets, tell every client.
    ///
    /// Asset placement runs on the blocking pool and does not hold up the
    /// broadcast.
    pub async fn rebuild(&self) -> ChannelMessage {
        let start = Instant::now();
        let outcome = self.compiler.compile(BuildMode::Development).await;
        drop(self.sync_assets());

        let message = match outcome.error_payload() {
            None => {
                ui::success(&format!(
                    "Rebuild completed in {}",
                    ui::format_duration(start.elapsed())
                ));
                ChannelMessage::Update
            }
            Some(payload) => {
                ui::error(&format!("Rebuild failed:\n{payload}"));
                ChannelMessage::error(payload)
            }
        };

        let report = self.channel.broadcast(&message);
        tracing::debug!(
            delivered = report.delivered,
            dropped = report.dropped.len(),
            "rebuild result broadcast"
        );
        message
    }

    fn sync_assets(&self) -> JoinHandle<crate::assets::SyncReport> {
        let assets = self.assets.clone();
        tokio::task::spawn_blocking(move || assets.sync())
    }
}

/// Discard queued changes, returning how many there were.
fn drain(changes: &mut mpsc::Receiver<FileChange>) -> usize {
    let mut count = 0;
    while changes.try_recv().is_ok() {
        count += 1;
    }
    count
}
