use crate::types::{Booking, Service};

/// Storage seam for the catalog and the booking collection.
///
/// `save_bookings` replaces the entire collection; there is no partial
/// update. Nothing here locks across load/save, so a caller that is about
/// to do a conflict-sensitive write must re-load immediately before it
/// instead of reusing an earlier snapshot.
pub trait BookingStore: Clone + Send + Sync + 'static {
    fn load_services(&self) -> Vec<Service>;
    fn load_bookings(&self) -> Vec<Booking>;
    fn save_bookings(&self, bookings: Vec<Booking>);
}
