use crate::errors::BookingError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Appointment length in minutes.
    pub dur: u32,
    pub price: f64,
}

/// Catalog written on first run when the store is still empty.
pub fn default_services() -> Vec<Service> {
    vec![
        Service {
            id: "s1".into(),
            name: "General osteopathy".into(),
            dur: 60,
            price: 60.0,
        },
        Service {
            id: "s2".into(),
            name: "Sports massage".into(),
            dur: 50,
            price: 55.0,
        },
        Service {
            id: "s3".into(),
            name: "Relaxing massage".into(),
            dur: 45,
            price: 45.0,
        },
        Service {
            id: "s4".into(),
            name: "Neck treatment".into(),
            dur: 30,
            price: 35.0,
        },
    ]
}

/// A confirmed appointment. `service_name`, `dur` and `price` are copied
/// from the service at creation time, so later catalog edits never change
/// bookings that already exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub fullname: String,
    pub address: String,
    pub town: String,
    pub phone: String,
    pub service_id: String,
    pub service_name: String,
    pub dur: u32,
    #[serde(default)]
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// What a client submits from the booking form. Becomes a [`Booking`] once
/// validated and checked against the current calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub fullname: String,
    pub address: String,
    pub town: String,
    pub phone: String,
    pub service_id: String,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), BookingError> {
        for (field, value) in [
            ("fullname", &self.fullname),
            ("address", &self.address),
            ("town", &self.town),
            ("phone", &self.phone),
            ("service_id", &self.service_id),
        ] {
            if value.trim().is_empty() {
                return Err(BookingError::Validation(field));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TownGroup {
    pub town: String,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
    pub total: f64,
}

/// Times go over the wire and into the store as zero-padded "HH:MM",
/// which sorts lexicographically in chronological order.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}
