use sikembang::{
    prelude::*,
    proximity::{self, AVERAGE_SPEED_KMH},
};

fn melati() -> Facility {
    Facility {
        id: "7".into(),
        name: "Posyandu Melati".into(),
        coordinate: Some(Coordinate::new(-6.9147, 107.6098)),
        status: Status::parse("AKTIF"),
        hours: OperatingHours {
            monday: "08:00 - 12:00".into(),
            tuesday: "Tutup".into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn bandung() -> Option<Coordinate> {
    Some(Coordinate::new(-6.9175, 107.6191))
}

#[test]
fn eta_follows_average_speed() {
    for km in [0.0, 0.3, 0.66, 1.0, 2.5, 13.37, 40.0, 399.9, 20015.0, 5.0e7, 1.0e12] {
        let eta = proximity::eta(Some(Distance::from_kilometers(km))).unwrap();
        let expected = (km / AVERAGE_SPEED_KMH * 60.0).floor() as u64;
        assert_eq!(eta.as_minutes(), expected, "{km} km");
    }
}

#[test]
fn eta_without_distance() {
    assert_eq!(proximity::eta(None), None);
}

#[test]
fn facility_card_with_location() {
    let facility = melati();
    let proximity = facility.proximity(bandung());
    let distance = proximity.distance().unwrap().as_kilometers();
    assert!((distance - 1.07).abs() < 0.05);
    assert_eq!(proximity.eta().unwrap().as_minutes(), 1);

    let presenter = Presenter::default();
    assert_eq!(presenter.distance(&proximity), "1.1 km");
    assert_eq!(presenter.eta(&proximity), "1 min");
    assert_eq!(presenter.status_label(facility.status), "Buka");
    assert_eq!(presenter.status_color(facility.status).argb(), 0xFF4CAF50);
}

#[test]
fn facility_card_without_location() {
    let facility = melati();
    let proximity = facility.proximity(None);
    assert_eq!(proximity, Proximity::Unavailable);
    let presenter = Presenter::default();
    assert_eq!(presenter.distance(&proximity), "Tidak tersedia");
    assert_eq!(presenter.eta(&proximity), "-");
}

#[test]
fn facility_without_coordinate() {
    let facility = Facility {
        coordinate: None,
        ..melati()
    };
    assert!(!facility.proximity(bandung()).is_available());
    assert_eq!(facility.navigation_uri(), None);
    assert_eq!(facility.preview_uri(), None);
}

#[test]
fn inactive_facility_is_red() {
    let theme = Theme::default();
    assert_eq!(status_label(Status::parse("NONAKTIF"), Locale::Indonesian), "Tutup");
    assert_eq!(status_color(Status::parse("NONAKTIF"), &theme), Color::RED);
    assert_eq!(status_color(Status::parse("whatever"), &theme), Color::RED);
    assert_eq!(status_color(Status::parse("AKTIF"), &theme), Color(0xFF4CAF50));
}

#[test]
fn hours_by_day_name() {
    let facility = melati();
    assert_eq!(hours_for_day(&facility.hours, "Senin").as_str(), "08:00 - 12:00");
    assert_eq!(hours_for_day(&facility.hours, "monday").as_str(), "08:00 - 12:00");
    assert!(hours_for_day(&facility.hours, "selasa").is_closed());
    assert!(hours_for_day(&facility.hours, "Rabu").is_closed());
    assert!(hours_for_day(&facility.hours, "someday").is_closed());
}

#[test]
fn map_links() {
    let facility = melati();
    assert_eq!(
        facility.navigation_uri().unwrap(),
        "https://www.google.com/maps/dir/?api=1&destination=-6.9147,107.6098"
    );
    assert_eq!(
        facility.preview_uri().unwrap(),
        "geo:-6.9147,107.6098?q=-6.9147,107.6098(Posyandu%20Melati)"
    );
}

#[test]
fn distance_text_rounds_to_one_decimal() {
    assert_eq!(
        format_distance(Some(Distance::from_meters(590.0)), Locale::Indonesian),
        "0.6 km"
    );
    assert_eq!(format_distance(None, Locale::English), "Not available");
    assert_eq!(format_eta(Some(Duration::from_minutes(0))), "0 min");
}
