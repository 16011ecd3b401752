use crate::backend::BookingStore;
use crate::errors::StoreError;
use crate::types::{default_services, Booking, Service};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::error;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    services: Vec<Service>,
    bookings: Vec<Booking>,
}

/// Persistent store backed by a single JSON file. Every operation re-reads
/// the file, so edits made by another process show up on the next request;
/// concurrent writers can still lose updates to each other, the same way
/// two tabs sharing one localStorage could.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl JsonStore {
    /// Opens the data file, creating it with the default catalog when it
    /// does not exist yet.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if !path.exists() {
            let initial = StoreFile {
                services: default_services(),
                bookings: Vec::new(),
            };
            fs::write(&path, serde_json::to_vec_pretty(&initial)?)?;
        }
        Ok(Self {
            path: Arc::new(path),
            lock: Arc::new(Mutex::new(())),
        })
    }

    fn read_file(&self) -> StoreFile {
        let _guard = self.lock.lock().unwrap();
        let raw = match fs::read(self.path.as_ref()) {
            Ok(raw) => raw,
            Err(err) => {
                error!(?err, path = %self.path.display(), "Failed to read data file");
                return StoreFile::default();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(file) => file,
            Err(err) => {
                error!(?err, path = %self.path.display(), "Data file is corrupt, serving nothing");
                StoreFile::default()
            }
        }
    }

    fn write_file(&self, file: &StoreFile) {
        let _guard = self.lock.lock().unwrap();
        let raw = match serde_json::to_vec_pretty(file) {
            Ok(raw) => raw,
            Err(err) => {
                error!(?err, "Failed to serialize data file");
                return;
            }
        };
        if let Err(err) = fs::write(self.path.as_ref(), raw) {
            error!(?err, path = %self.path.display(), "Failed to write data file");
        }
    }
}

impl BookingStore for JsonStore {
    fn load_services(&self) -> Vec<Service> {
        self.read_file().services
    }

    fn load_bookings(&self) -> Vec<Booking> {
        self.read_file().bookings
    }

    fn save_bookings(&self, bookings: Vec<Booking>) {
        let mut file = self.read_file();
        file.bookings = bookings;
        self.write_file(&file);
    }
}
