use crate::backend::BookingStore;
use crate::types::{default_services, Booking, Service};
use std::sync::{Arc, Mutex};

/// Impersistent store, used when no data file is configured and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    services: Arc<Mutex<Vec<Service>>>,
    bookings: Arc<Mutex<Vec<Booking>>>,
}

impl MemoryStore {
    pub fn with_default_catalog() -> Self {
        let store = Self::default();
        *store.services.lock().unwrap() = default_services();
        store
    }

    pub fn with_services(services: Vec<Service>) -> Self {
        let store = Self::default();
        *store.services.lock().unwrap() = services;
        store
    }
}

impl BookingStore for MemoryStore {
    fn load_services(&self) -> Vec<Service> {
        self.services.lock().unwrap().clone()
    }

    fn load_bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }

    fn save_bookings(&self, bookings: Vec<Booking>) {
        *self.bookings.lock().unwrap() = bookings;
    }
}
