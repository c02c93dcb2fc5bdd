pub mod booking;
pub mod extraction;

pub use booking::{BookingRecord, BookingStatus};
pub use extraction::ExtractedFields;
