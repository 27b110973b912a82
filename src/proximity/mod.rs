//! Distance, travel time and display helpers for a posyandu as seen from the user.
//!
//! Everything in here is pure. A missing coordinate, on either side, never turns
//! into a number: it resolves to [`Proximity::Unavailable`] and to the matching
//! "not available" strings of the [`Presenter`].

pub mod format;
pub mod status;
pub mod theme;

pub use format::*;
pub use status::*;
pub use theme::*;

use crate::{
    repository::Facility,
    shared::{Coordinate, Distance, time::Duration},
};

/// Assumed average travel speed used for every estimate.
pub const AVERAGE_SPEED_KMH: f64 = 40.0;

/// Distance between a facility and the observer.
/// `None` when either location is unknown.
pub fn distance(facility: Option<Coordinate>, observer: Option<Coordinate>) -> Option<Distance> {
    Some(facility?.distance(&observer?))
}

/// Estimated travel time at [`AVERAGE_SPEED_KMH`], truncated to whole minutes.
pub fn eta(distance: Option<Distance>) -> Option<Duration> {
    let kilometers = distance?.as_kilometers();
    if !kilometers.is_finite() || kilometers < 0.0 {
        return None;
    }
    // `as` saturates, past u64::MAX minutes the estimate stops growing.
    let minutes = ((kilometers / AVERAGE_SPEED_KMH) * 60.0).floor();
    Some(Duration::from_minutes(minutes as u64))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Proximity {
    Unavailable,
    Known { distance: Distance, eta: Duration },
}

impl Proximity {
    pub fn between(facility: Option<Coordinate>, observer: Option<Coordinate>) -> Self {
        let distance = self::distance(facility, observer);
        match (distance, eta(distance)) {
            (Some(distance), Some(eta)) => Self::Known { distance, eta },
            _ => Self::Unavailable,
        }
    }

    pub fn distance(&self) -> Option<Distance> {
        match self {
            Proximity::Unavailable => None,
            Proximity::Known { distance, .. } => Some(*distance),
        }
    }

    pub fn eta(&self) -> Option<Duration> {
        match self {
            Proximity::Unavailable => None,
            Proximity::Known { eta, .. } => Some(*eta),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Proximity::Known { .. })
    }
}

impl Facility {
    pub fn proximity(&self, observer: Option<Coordinate>) -> Proximity {
        Proximity::between(self.coordinate, observer)
    }
}

#[cfg(test)]
const FACILITY: Coordinate = Coordinate::new(-6.914744, 107.609810);
#[cfg(test)]
const OBSERVER: Coordinate = Coordinate::new(-6.920000, 107.610000);

#[test]
fn bandung_scenario() {
    let proximity = Proximity::between(Some(FACILITY), Some(OBSERVER));
    let km = proximity.distance().unwrap().as_kilometers();
    assert!((km - 0.59).abs() < 0.05, "distance was {km}");
    assert_eq!(proximity.eta().unwrap().as_minutes(), 0);
}

#[test]
fn missing_coordinate_is_unavailable() {
    assert_eq!(Proximity::between(None, Some(OBSERVER)), Proximity::Unavailable);
    assert_eq!(Proximity::between(Some(FACILITY), None), Proximity::Unavailable);
    assert_eq!(distance(None, None), None);
    assert_eq!(eta(None), None);
}

#[test]
fn eta_truncates() {
    // 1.49 km at 40 km/h is 2.235 minutes.
    let eta = eta(Some(Distance::from_kilometers(1.49))).unwrap();
    assert_eq!(eta.as_minutes(), 2);
    let eta = self::eta(Some(Distance::from_kilometers(40.0))).unwrap();
    assert_eq!(eta.as_minutes(), 60);
}

#[test]
fn eta_rejects_garbage_distance() {
    assert_eq!(eta(Some(Distance::from_kilometers(f64::NAN))), None);
    assert_eq!(eta(Some(Distance::from_kilometers(-1.0))), None);
}

#[test]
fn zero_distance_is_zero_minutes_not_unavailable() {
    let proximity = Proximity::between(Some(FACILITY), Some(FACILITY));
    assert!(proximity.is_available());
    assert_eq!(proximity.eta(), Some(Duration::from_minutes(0)));
}

#[test]
fn eta_is_total_for_huge_distances() {
    let eta = self::eta(Some(Distance::from_kilometers(50_000_000.0))).unwrap();
    assert_eq!(eta.as_minutes(), 75_000_000);
    let eta = self::eta(Some(Distance::from_meters(f64::MAX))).unwrap();
    assert_eq!(eta.as_minutes(), u64::MAX / 60);
    assert_eq!(self::eta(Some(Distance::from_meters(f64::INFINITY))), None);
}
