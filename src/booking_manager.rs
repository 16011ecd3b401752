use crate::backend::BookingStore;
use crate::errors::BookingError;
use crate::schedule;
use crate::types::{Booking, BookingRequest, DaySchedule, Service, TownGroup};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::watch::{self, Sender};
use tokio_stream::wrappers::WatchStream;
use tracing::{info, warn};
use uuid::Uuid;

/// Runs every booking operation against the current store content: each
/// call loads the full collection, computes, and writes the full collection
/// back. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct BookingManager<B: BookingStore> {
    store: B,
    /// When set, rescheduling re-checks for collisions like a submission
    /// would. Off by default: the operator moving an appointment is trusted
    /// to know about the clash.
    strict_reschedule: bool,
    sender: Sender<Vec<Booking>>,
}

impl<B: BookingStore> BookingManager<B> {
    pub fn new(store: B, strict_reschedule: bool) -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self {
            store,
            strict_reschedule,
            sender,
        }
    }

    pub fn services(&self) -> Vec<Service> {
        self.store.load_services()
    }

    /// Open start times for one service on one date, as of `now`.
    pub fn available_slots(
        &self,
        service_id: &str,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<Vec<NaiveTime>, BookingError> {
        let service = self.find_service(service_id)?;
        let bookings = self.store.load_bookings();
        Ok(schedule::generate_slots(&service, date, &bookings, now))
    }

    /// Validates the request and books the slot, unless someone else took
    /// it since the slot list was generated.
    pub fn submit_booking(&self, request: BookingRequest) -> Result<Booking, BookingError> {
        request.validate()?;
        let service = self.find_service(&request.service_id)?;

        // Conflict check runs against a fresh load; the slots shown to the
        // client may already be outdated.
        let mut bookings = self.store.load_bookings();
        if schedule::has_conflict(request.date, request.time, service.dur, &bookings) {
            warn!(date = %request.date, time = %request.time, "Slot taken in the meantime");
            return Err(BookingError::SlotTaken);
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            date: request.date,
            time: request.time,
            fullname: request.fullname,
            address: request.address,
            town: request.town,
            phone: request.phone,
            service_id: service.id,
            service_name: service.name,
            dur: service.dur,
            price: service.price,
            created_at: Utc::now(),
        };
        bookings.push(booking.clone());
        self.store.save_bookings(bookings);
        info!(id = %booking.id, date = %booking.date, time = %booking.time, "Booked");
        self.send_bookings();
        Ok(booking)
    }

    /// Removes the booking if it still exists. Cancelling an id twice is
    /// fine, the second call does nothing.
    pub fn cancel_booking(&self, id: Uuid) {
        let mut bookings = self.store.load_bookings();
        let before = bookings.len();
        bookings.retain(|booking| booking.id != id);
        if bookings.len() == before {
            info!(%id, "Nothing to cancel");
            return;
        }
        self.store.save_bookings(bookings);
        info!(%id, "Cancelled");
        self.send_bookings();
    }

    /// Moves an existing booking to a new date and time.
    pub fn reschedule_booking(
        &self,
        id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Booking, BookingError> {
        let mut bookings = self.store.load_bookings();
        let index = bookings
            .iter()
            .position(|booking| booking.id == id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

        if self.strict_reschedule {
            // The booking being moved must not count as its own collision.
            let others: Vec<Booking> = bookings
                .iter()
                .filter(|booking| booking.id != id)
                .cloned()
                .collect();
            let clashes = schedule::conflicting(date, time, bookings[index].dur, &others);
            if !clashes.is_empty() {
                warn!(%id, clashing = clashes.len(), "Refusing reschedule onto occupied slot");
                return Err(BookingError::SlotTaken);
            }
        }

        let booking = &mut bookings[index];
        booking.date = date;
        booking.time = time;
        let updated = booking.clone();
        self.store.save_bookings(bookings);
        info!(%id, date = %date, time = %time, "Rescheduled");
        self.send_bookings();
        Ok(updated)
    }

    /// All bookings, soonest first.
    pub fn list_upcoming(&self) -> Vec<Booking> {
        let mut bookings = self.store.load_bookings();
        bookings.sort_by_key(|booking| (booking.date, booking.time));
        bookings
    }

    /// Bookings partitioned by town (exact match), towns in lexicographic
    /// order, soonest first within each town.
    pub fn list_by_town(&self) -> Vec<TownGroup> {
        let mut grouped: BTreeMap<String, Vec<Booking>> = BTreeMap::new();
        for booking in self.store.load_bookings() {
            grouped.entry(booking.town.clone()).or_default().push(booking);
        }
        grouped
            .into_iter()
            .map(|(town, mut bookings)| {
                bookings.sort_by_key(|booking| (booking.date, booking.time));
                TownGroup { town, bookings }
            })
            .collect()
    }

    /// One day's bookings in time order, with the revenue total.
    pub fn day_schedule(&self, date: NaiveDate) -> DaySchedule {
        let mut bookings: Vec<Booking> = self
            .store
            .load_bookings()
            .into_iter()
            .filter(|booking| booking.date == date)
            .collect();
        bookings.sort_by_key(|booking| booking.time);
        let total = bookings.iter().map(|booking| booking.price).sum();
        DaySchedule {
            date,
            bookings,
            total,
        }
    }

    /// Live view of the upcoming list; re-emitted after every mutation.
    pub fn booking_stream(&self) -> WatchStream<Vec<Booking>> {
        let stream = WatchStream::new(self.sender.subscribe());
        self.send_bookings();
        stream
    }

    fn find_service(&self, service_id: &str) -> Result<Service, BookingError> {
        self.store
            .load_services()
            .into_iter()
            .find(|service| service.id == service_id)
            .ok_or_else(|| BookingError::NotFound(service_id.to_string()))
    }

    fn send_bookings(&self) {
        self.sender.send_replace(self.list_upcoming());
    }
}
