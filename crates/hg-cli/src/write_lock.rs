//! Single-writer guard for the state file.
//!
//! A mutating command creates `state.json.lock` next to the state file and
//! writes a [`LockOwner`] record into it. Other writers wait for it to go
//! away; readers never look at it. The lock is removed when the guard drops.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(60);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(250);

/// No hgd command runs this long; an older lock was left by a crash.
const STALE_AFTER_MINUTES: i64 = 10;

/// Who holds the lock, as written into the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockOwner {
    pub pid: u32,
    pub command: String,
    pub acquired_at: DateTime<Utc>,
}

impl LockOwner {
    fn current(command: &str) -> Self {
        Self {
            pid: std::process::id(),
            command: command.to_string(),
            acquired_at: Utc::now(),
        }
    }

    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        if self.pid == std::process::id() {
            return false;
        }
        let expired = now - self.acquired_at > TimeDelta::minutes(STALE_AFTER_MINUTES);
        expired || !process_exists(self.pid)
    }
}

impl std::fmt::Display for LockOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'hgd {}' (pid {}, since {})",
            self.command,
            self.pid,
            self.acquired_at.format("%H:%M:%S")
        )
    }
}

#[derive(Debug)]
pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), "could not remove write lock: {e}");
        }
    }
}

/// `state.json` locks through `state.json.lock` in the same directory.
fn lock_path_for(state_path: &Path) -> PathBuf {
    let mut name = state_path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(|| "state".into());
    name.push(".lock");
    state_path.with_file_name(name)
}

/// Take the write lock for `state_path` on behalf of `command`, waiting up
/// to a minute for a live holder to finish.
pub async fn acquire_for_state(state_path: &Path, command: &str) -> anyhow::Result<WriteLockGuard> {
    let lock_path = lock_path_for(state_path);
    let started = Instant::now();

    loop {
        let waiting_on = match try_acquire(&lock_path, command)? {
            Attempt::Acquired(guard) => return Ok(guard),
            Attempt::Stale(owner) => {
                tracing::info!(path = %lock_path.display(), "clearing write lock left by {owner}");
                remove_if_present(&lock_path)?;
                continue;
            }
            Attempt::Held(owner) => format!("{owner} holds the write lock"),
            Attempt::Unreadable(reason) => {
                format!("lock file {} is unreadable ({reason})", lock_path.display())
            }
        };

        if started.elapsed() >= LOCK_WAIT_TIMEOUT {
            anyhow::bail!(
                "{waiting_on}; gave up after {}s. Remove {} if no hgd process is running",
                LOCK_WAIT_TIMEOUT.as_secs(),
                lock_path.display()
            );
        }
        tracing::debug!("{waiting_on}; retrying");
        tokio::time::sleep(LOCK_RETRY_DELAY).await;
    }
}

#[derive(Debug)]
enum Attempt {
    Acquired(WriteLockGuard),
    Held(LockOwner),
    Stale(LockOwner),
    /// The file exists but holds no owner record, e.g. mid-write.
    Unreadable(String),
}

fn try_acquire(lock_path: &Path, command: &str) -> anyhow::Result<Attempt> {
    if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match OpenOptions::new().create_new(true).write(true).open(lock_path) {
        Ok(mut file) => {
            // The guard exists before the write so a failed write still
            // removes the file.
            let guard = WriteLockGuard {
                path: lock_path.to_path_buf(),
            };
            serde_json::to_writer(&mut file, &LockOwner::current(command))?;
            file.flush()?;
            Ok(Attempt::Acquired(guard))
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(read_owner(lock_path)),
        Err(err) => Err(anyhow::anyhow!(
            "cannot create write lock {}: {err}",
            lock_path.display()
        )),
    }
}

fn read_owner(lock_path: &Path) -> Attempt {
    let text = match std::fs::read_to_string(lock_path) {
        Ok(text) => text,
        Err(e) => return Attempt::Unreadable(e.to_string()),
    };
    match serde_json::from_str::<LockOwner>(&text) {
        Ok(owner) if owner.is_stale(Utc::now()) => Attempt::Stale(owner),
        Ok(owner) => Attempt::Held(owner),
        Err(e) => Attempt::Unreadable(e.to_string()),
    }
}

fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(target_os = "linux")]
fn process_exists(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

/// Without a process table to consult, only the age check applies.
#[cfg(not(target_os = "linux"))]
const fn process_exists(_pid: u32) -> bool {
    true
}
