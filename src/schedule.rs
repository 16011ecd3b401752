use crate::types::{Booking, Service};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const OPENING_HOUR: u32 = 9;
pub const CLOSING_HOUR: u32 = 19;
pub const BREAK_START_HOUR: u32 = 14;
pub const BREAK_END_HOUR: u32 = 16;
pub const SLOT_STEP_MINUTES: u32 = 15;

/// All start times at which `service` could still be booked on `date`.
///
/// Candidates are 15-minute boundaries between opening and closing. A
/// candidate is dropped when the appointment would run past closing, start
/// inside the lunch break, straddle into it, collide with an existing
/// booking on that date, or start at/before `now`. The result is ascending;
/// an empty result means the day is fully booked (or already over) and the
/// caller is expected to say so instead of rendering an empty picker.
pub fn generate_slots(
    service: &Service,
    date: NaiveDate,
    bookings: &[Booking],
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    let opening = OPENING_HOUR * 60;
    let closing = CLOSING_HOUR * 60;
    let break_start = BREAK_START_HOUR * 60;
    let break_end = BREAK_END_HOUR * 60;

    let mut slots = Vec::new();
    for start in (opening..closing).step_by(SLOT_STEP_MINUTES as usize) {
        let end = start + service.dur;
        if (break_start..break_end).contains(&start) {
            continue;
        }
        // Ending exactly at break start or closing time is fine, running
        // a single minute past either is not.
        if start < break_start && end > break_start {
            continue;
        }
        if end > closing {
            continue;
        }

        let time = NaiveTime::from_hms_opt(start / 60, start % 60, 0).unwrap();
        if date.and_time(time) <= now {
            continue;
        }
        if has_conflict(date, time, service.dur, bookings) {
            continue;
        }
        slots.push(time);
    }
    slots
}

/// True when a booking of `dur` minutes at `date`/`time` would overlap any
/// existing booking. Used once while generating slots and again right
/// before a submission is persisted, since the calendar may have changed
/// in between.
pub fn has_conflict(date: NaiveDate, time: NaiveTime, dur: u32, bookings: &[Booking]) -> bool {
    bookings
        .iter()
        .any(|booking| overlaps(date, time, dur, booking))
}

/// The bookings a candidate would collide with.
pub fn conflicting(
    date: NaiveDate,
    time: NaiveTime,
    dur: u32,
    bookings: &[Booking],
) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|booking| overlaps(date, time, dur, booking))
        .collect()
}

fn overlaps(date: NaiveDate, time: NaiveTime, dur: u32, booking: &Booking) -> bool {
    if booking.date != date {
        return false;
    }
    let start = date.and_time(time);
    let end = start + Duration::minutes(i64::from(dur));
    let booked_start = booking.start();
    let booked_end = booked_start + Duration::minutes(i64::from(booking.dur));
    // Half-open intervals: a shared boundary point alone is not a collision.
    start < booked_end && booked_start < end
}
