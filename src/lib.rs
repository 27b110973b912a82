//! Proximity model for SiKembang, the posyandu finder and child-development journal.
//!
//! The crate turns posyandu records fetched from a backend into what the app shows:
//! distance and travel time from the user, open/closed status, today's hours and
//! map links. None of that touches the network, records come in through a
//! [`source::FacilityStore`] and the user's location is a plain argument.

pub mod journal;
pub mod proximity;
pub mod repository;
pub mod shared;
pub mod source;

pub mod prelude {
    pub use crate::journal::{JournalEntry, JournalStore, MemoryJournal, day_bounds};
    pub use crate::proximity::{
        Color, Locale, Presenter, Proximity, Theme, format_distance, format_eta,
        hours_for_day, navigation_uri, preview_uri, status_color, status_label,
    };
    pub use crate::repository::{
        Address, Contact, Facility, Hours, OperatingHours, Rating, Repository, Status,
    };
    pub use crate::shared::{Coordinate, Day, Distance, Duration, MAX_DISTANCE};
    pub use crate::source::{FacilityStore, Snapshot};
}
