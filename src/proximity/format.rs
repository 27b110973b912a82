use urlencoding::encode;

use crate::{
    proximity::{
        Proximity,
        status::{status_color, status_label},
        theme::{Color, Locale, Theme},
    },
    repository::{Facility, Hours, Status},
    shared::{Coordinate, Day, Distance, time::Duration},
};

pub const ETA_NOT_AVAILABLE: &str = "-";

pub fn format_distance(distance: Option<Distance>, locale: Locale) -> String {
    match distance {
        // Halves round up, 0.25 km reads "0.3 km".
        Some(distance) => {
            let tenths = (distance.as_kilometers() * 10.0).round();
            format!("{:.1} km", tenths / 10.0)
        }
        None => locale.not_available().to_string(),
    }
}

pub fn format_eta(eta: Option<Duration>) -> String {
    match eta {
        Some(eta) => format!("{} min", eta.as_minutes()),
        None => ETA_NOT_AVAILABLE.to_string(),
    }
}

/// Turn-by-turn directions to the coordinate.
pub fn navigation_uri(coordinate: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        encode(&coordinate.latitude.to_string()),
        encode(&coordinate.longitude.to_string())
    )
}

/// A `geo:` pin labelled with the facility name.
pub fn preview_uri(coordinate: Coordinate, name: &str) -> String {
    let latitude = coordinate.latitude.to_string();
    let longitude = coordinate.longitude.to_string();
    let (latitude, longitude) = (encode(&latitude), encode(&longitude));
    format!(
        "geo:{latitude},{longitude}?q={latitude},{longitude}({})",
        encode(name)
    )
}

impl Facility {
    pub fn navigation_uri(&self) -> Option<String> {
        self.coordinate.map(navigation_uri)
    }

    pub fn preview_uri(&self) -> Option<String> {
        self.coordinate
            .map(|coordinate| preview_uri(coordinate, &self.name))
    }
}

/// Turns proximity and status values into display strings for one theme and locale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Presenter {
    pub theme: Theme,
    pub locale: Locale,
}

impl Presenter {
    pub fn new(theme: Theme, locale: Locale) -> Self {
        Self { theme, locale }
    }

    pub fn distance(&self, proximity: &Proximity) -> String {
        format_distance(proximity.distance(), self.locale)
    }

    pub fn eta(&self, proximity: &Proximity) -> String {
        format_eta(proximity.eta())
    }

    pub fn status_label(&self, status: Status) -> &'static str {
        status_label(status, self.locale)
    }

    pub fn status_color(&self, status: Status) -> Color {
        status_color(status, &self.theme)
    }

    pub fn day(&self, day: Day) -> &'static str {
        match self.locale {
            Locale::Indonesian => day.indonesian_name(),
            Locale::English => day.english_name(),
        }
    }

    pub fn hours<'a>(&self, hours: &'a Hours) -> &'a str {
        match hours {
            Hours::Closed => self.locale.closed(),
            Hours::Open(hours) => hours,
        }
    }
}

#[test]
fn distance_one_decimal() {
    let text = format_distance(Some(Distance::from_meters(585.0)), Locale::Indonesian);
    assert_eq!(text, "0.6 km");
    let text = format_distance(Some(Distance::from_kilometers(12.34)), Locale::English);
    assert_eq!(text, "12.3 km");
}

#[test]
fn unavailable_strings() {
    let presenter = Presenter::default();
    assert_eq!(presenter.distance(&Proximity::Unavailable), "Tidak tersedia");
    assert_eq!(presenter.eta(&Proximity::Unavailable), "-");
    let presenter = Presenter::new(Theme::default(), Locale::English);
    assert_eq!(presenter.distance(&Proximity::Unavailable), "Not available");
}

#[test]
fn eta_string() {
    assert_eq!(format_eta(Some(Duration::from_minutes(17))), "17 min");
    assert_eq!(format_eta(Some(Duration::from_minutes(0))), "0 min");
}

#[test]
fn navigation_link() {
    let uri = navigation_uri(Coordinate::new(-6.914744, 107.60981));
    assert_eq!(
        uri,
        "https://www.google.com/maps/dir/?api=1&destination=-6.914744,107.60981"
    );
}

#[test]
fn preview_link_encodes_name() {
    let uri = preview_uri(
        Coordinate::new(-6.914744, 107.60981),
        "Posyandu Melati & Mawar (RW 03)",
    );
    assert_eq!(
        uri,
        "geo:-6.914744,107.60981?q=-6.914744,107.60981(Posyandu%20Melati%20%26%20Mawar%20%28RW%2003%29)"
    );
}

#[test]
fn closed_hours_follow_locale() {
    let presenter = Presenter::new(Theme::default(), Locale::English);
    assert_eq!(presenter.hours(&Hours::Closed), "Closed");
    assert_eq!(presenter.hours(&Hours::parse("08:00 - 11:00")), "08:00 - 11:00");
}

#[test]
fn distance_halves_round_up() {
    let text = format_distance(Some(Distance::from_kilometers(0.25)), Locale::Indonesian);
    assert_eq!(text, "0.3 km");
    let text = format_distance(Some(Distance::from_kilometers(1.45)), Locale::Indonesian);
    assert_eq!(text, "1.5 km");
    let text = format_distance(Some(Distance::from_kilometers(0.24)), Locale::Indonesian);
    assert_eq!(text, "0.2 km");
}

#[test]
fn day_names_follow_locale() {
    assert_eq!(Presenter::default().day(Day::Monday), "Senin");
    let presenter = Presenter::new(Theme::default(), Locale::English);
    assert_eq!(presenter.day(Day::Sunday), "Sunday");
}
