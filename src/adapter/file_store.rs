//! File-based capacity service
//!
//! One JSON document per event under `<data_dir>/registrations/`. Every
//! write holds an exclusive `flock` on a sibling `.lock` file across load,
//! capacity check and persist, so instances in other tasks or other
//! processes see each other's registrations before deciding a status.
//! Readers take no lock: ledgers are replaced by rename, so a read sees
//! either the old or the new document.

use std::{
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant}
};

use async_trait::async_trait;
use chrono::Utc;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};
use uuid::Uuid;

use crate::{
    domain::{
        capacity::CapacitySnapshot,
        constant::capacity,
        error::SignupError,
        registration::{Registration, RegistrationRequest, RegistrationStatus}
    },
    port::capacity::CapacityService
};

const LOCK_TIMEOUT: Duration = Duration::from_secs(10);
const LOCK_RETRY: Duration = Duration::from_millis(5);

/// On-disk shape of one event's registrations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RegistrationLedger {
    /// Bumped on every write
    version:       u64,
    registrations: Vec<Registration>
}

/// File-based implementation of CapacityService
pub struct FileCapacityService {
    root:         PathBuf,
    lock_timeout: Duration
}

impl FileCapacityService {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { root: data_dir.into().join("registrations"), lock_timeout: LOCK_TIMEOUT }
    }

    /// How long a writer waits for another writer of the same event
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    fn ledger_path(&self, event_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_file_stem(event_id)))
    }

    fn lock_path(&self, event_id: &str) -> PathBuf {
        self.root.join(format!("{}.lock", encode_file_stem(event_id)))
    }

    async fn load(&self, path: &Path) -> Result<RegistrationLedger, SignupError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let ledger: RegistrationLedger = serde_json::from_str(&content)?;
                event!(Level::TRACE, event = capacity::STORE_LOADED, path = %path.display(),
                       version = ledger.version);
                Ok(ledger)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RegistrationLedger::default()),
            Err(e) => {
                event!(Level::ERROR, event = capacity::STORE_FAILED, path = %path.display(), error = %e);
                Err(SignupError::storage_failed("read registrations", e))
            }
        }
    }

    /// Write to a temp file unique to this call, then rename over the ledger
    async fn persist(&self, path: &Path, ledger: &RegistrationLedger) -> Result<(), SignupError> {
        let content = serde_json::to_string_pretty(ledger)?;
        let tmp_path = path.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));

        tokio::fs::write(&tmp_path, content).await.map_err(|e| SignupError::storage_failed("write registrations", e))?;
        if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(SignupError::storage_failed("replace registrations", e));
        }

        event!(Level::DEBUG, event = capacity::STORE_PERSISTED, path = %path.display(), version = ledger.version);
        Ok(())
    }

    /// Exclusive lock on the event's lock file, released when the file is dropped
    ///
    /// Gives up with [`SignupError::CapacityRace`] when another writer holds
    /// the lock for longer than the configured timeout.
    async fn lock_exclusive(&self, event_id: &str) -> Result<File, SignupError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| SignupError::storage_failed("create registrations directory", e))?;

        let lock_path = self.lock_path(event_id);
        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| SignupError::storage_failed("open registrations lock", e))?;

        let deadline = Instant::now() + self.lock_timeout;
        loop {
            match FileExt::try_lock_exclusive(&lock_file) {
                Ok(()) => return Ok(lock_file),
                Err(e) if is_contended(&e) => {
                    if Instant::now() >= deadline {
                        event!(Level::WARN, event = capacity::STORE_FAILED, path = %lock_path.display(),
                               error = "lock timeout");
                        return Err(SignupError::CapacityRace { event_id: event_id.to_string() });
                    }
                    tokio::time::sleep(LOCK_RETRY).await;
                }
                Err(e) => return Err(SignupError::storage_failed("lock registrations", e))
            }
        }
    }
}

fn is_contended(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::WouldBlock
        || error.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Injective file stem for an event id
///
/// Lowercase ASCII letters, digits, `-` and `_` are kept; every other byte
/// becomes `%XX` with uppercase hex. Distinct ids map to distinct stems, also
/// on case-insensitive filesystems.
fn encode_file_stem(event_id: &str) -> String {
    let mut stem = String::with_capacity(event_id.len());
    for byte in event_id.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => stem.push(byte as char),
            other => stem.push_str(&format!("%{:02X}", other))
        }
    }
    stem
}

#[async_trait]
impl CapacityService for FileCapacityService {
    async fn capacity_state(&self, event_id: &str) -> Result<CapacitySnapshot, SignupError> {
        let ledger = self.load(&self.ledger_path(event_id)).await?;
        let snapshot = CapacitySnapshot::from_registrations(&ledger.registrations);

        event!(Level::TRACE, event = capacity::SNAPSHOT_READ, event_id = %event_id,
               booked = snapshot.booked, waitlisted = snapshot.waitlisted);
        Ok(snapshot)
    }

    async fn create_registration(
        &self,
        event_id: &str,
        capacity: u32,
        request: RegistrationRequest
    ) -> Result<Registration, SignupError> {
        let request = request.normalized();
        request.validate()?;

        let lock = self.lock_exclusive(event_id).await?;
        let path = self.ledger_path(event_id);

        let mut ledger = self.load(&path).await?;
        let snapshot = CapacitySnapshot::from_registrations(&ledger.registrations);
        let status = snapshot.status_for(capacity, request.party_size);
        let registration = Registration::new(event_id, request, status, Utc::now());

        ledger.registrations.push(registration.clone());
        ledger.version += 1;
        self.persist(&path, &ledger).await?;
        drop(lock);

        let event_name = match status {
            RegistrationStatus::Confirmed => capacity::SEAT_RESERVED,
            RegistrationStatus::Waitlist => capacity::WAITLIST_ASSIGNED
        };
        event!(Level::DEBUG, event = event_name, event_id = %event_id,
               registration_id = %registration.id, seats = registration.seats());

        Ok(registration)
    }

    async fn list_registrations(&self, event_id: &str) -> Result<Vec<Registration>, SignupError> {
        Ok(self.load(&self.ledger_path(event_id)).await?.registrations)
    }
}
