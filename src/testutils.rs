use crate::backend::BookingStore;
use crate::types::{default_services, Booking, BookingRequest, Service};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use futures::StreamExt;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use tokio_stream::wrappers::WatchStream;
use uuid::Uuid;

pub fn example_booking(date: &str, time: &str, dur: u32, town: &str, price: f64) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        fullname: "Jane Doe".into(),
        address: "1 Main St".into(),
        town: town.into(),
        phone: "555-0101".into(),
        service_id: "s1".into(),
        service_name: "General osteopathy".into(),
        dur,
        price,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

pub fn example_request(date: &str, time: &str, service_id: &str) -> BookingRequest {
    BookingRequest {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        fullname: "Jane Doe".into(),
        address: "1 Main St".into(),
        town: "Springfield".into(),
        phone: "555-0101".into(),
        service_id: service_id.into(),
    }
}

pub async fn read_from_booking_stream(stream: &mut WatchStream<Vec<Booking>>) -> Vec<Booking> {
    stream.next().await.unwrap()
}

pub struct MockBookingStoreInner {
    pub calls_to_load_services: AtomicU64,
    pub calls_to_load_bookings: AtomicU64,
    pub calls_to_save_bookings: AtomicU64,
    pub services: Mutex<Vec<Service>>,
    pub bookings: Mutex<Vec<Booking>>,
}

#[derive(Clone)]
pub struct MockBookingStore(pub Arc<MockBookingStoreInner>);

impl MockBookingStore {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingStoreInner {
            calls_to_load_services: AtomicU64::default(),
            calls_to_load_bookings: AtomicU64::default(),
            calls_to_save_bookings: AtomicU64::default(),
            services: Mutex::new(default_services()),
            bookings: Mutex::default(),
        }))
    }

    pub fn set_bookings(&self, bookings: Vec<Booking>) {
        *self.0.bookings.lock().unwrap() = bookings;
    }
}

impl BookingStore for MockBookingStore {
    fn load_services(&self) -> Vec<Service> {
        self.0
            .calls_to_load_services
            .fetch_add(1, Ordering::SeqCst);
        self.0.services.lock().unwrap().clone()
    }

    fn load_bookings(&self) -> Vec<Booking> {
        self.0
            .calls_to_load_bookings
            .fetch_add(1, Ordering::SeqCst);
        self.0.bookings.lock().unwrap().clone()
    }

    fn save_bookings(&self, bookings: Vec<Booking>) {
        self.0
            .calls_to_save_bookings
            .fetch_add(1, Ordering::SeqCst);
        *self.0.bookings.lock().unwrap() = bookings;
    }
}
