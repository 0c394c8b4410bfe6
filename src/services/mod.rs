pub mod booking;

pub use booking::{BookingError, BookingService};
