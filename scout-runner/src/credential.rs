//! Credential watcher
//!
//! Publishes the session cookie read from a file through a watch channel
//! and republishes it whenever the file's modification time changes, so an
//! operator can log in again in a browser and paste a fresh cookie without
//! restarting the run.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use scout_core::domain::credential::SessionCredential;
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info, warn};

/// Watches a cookie file and publishes its contents
pub struct CredentialWatcher {
    path: PathBuf,
    check_interval: Duration,
    sender: watch::Sender<SessionCredential>,
    last_modified: Option<SystemTime>,
}

impl CredentialWatcher {
    /// Reads the initial credential
    ///
    /// Fails if the file cannot be read; an empty file is accepted with a
    /// warning since it can be filled in later.
    pub async fn load(
        path: impl Into<PathBuf>,
        check_interval: Duration,
    ) -> Result<(Self, watch::Receiver<SessionCredential>)> {
        let path = path.into();
        let credential = read_credential(&path)
            .await
            .with_context(|| format!("Failed to read credential file {}", path.display()))?;
        if credential.is_empty() {
            warn!("Credential file {} is empty", path.display());
        }

        let last_modified = modified(&path).await;
        let (sender, receiver) = watch::channel(credential);

        Ok((
            Self {
                path,
                check_interval,
                sender,
                last_modified,
            },
            receiver,
        ))
    }

    /// Checks the file once, republishing if it changed
    ///
    /// Returns whether a new credential was published.
    pub async fn check_once(&mut self) -> bool {
        let current = modified(&self.path).await;
        if current.is_none() || current == self.last_modified {
            return false;
        }

        match read_credential(&self.path).await {
            Ok(credential) => {
                self.last_modified = current;
                let changed = self.sender.send_if_modified(|existing| {
                    if *existing == credential {
                        false
                    } else {
                        *existing = credential;
                        true
                    }
                });
                if changed {
                    info!("Session credential reloaded from {}", self.path.display());
                }
                changed
            }
            Err(e) => {
                warn!("Failed to reload credential, keeping previous value: {:#}", e);
                false
            }
        }
    }

    /// Spawns the background polling loop
    ///
    /// The loop ends once every receiver has been dropped.
    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval(self.check_interval);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if self.sender.is_closed() {
                    debug!("No credential readers left, stopping watcher");
                    return;
                }
                self.check_once().await;
            }
        })
    }
}

async fn read_credential(path: &Path) -> Result<SessionCredential> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(SessionCredential::new(raw))
}

async fn modified(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.ok()?.modified().ok()
}
