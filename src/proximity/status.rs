use crate::{
    proximity::theme::{Color, Locale, Theme},
    repository::{Hours, OperatingHours, Status},
};

pub fn status_label(status: Status, locale: Locale) -> &'static str {
    match status {
        Status::Active => locale.open(),
        Status::Inactive => locale.closed(),
    }
}

pub fn status_color(status: Status, theme: &Theme) -> Color {
    match status {
        Status::Active => theme.open,
        Status::Inactive => theme.closed,
    }
}

/// Label for a status exactly as a backend stored it.
pub fn raw_status_label(status: &str, locale: Locale) -> &'static str {
    status_label(Status::parse(status), locale)
}

pub fn raw_status_color(status: &str, theme: &Theme) -> Color {
    status_color(Status::parse(status), theme)
}

pub fn hours_for_day<'a>(schedule: &'a OperatingHours, day_name: &str) -> &'a Hours {
    schedule.hours_for_day(day_name)
}

#[test]
fn active_is_open_and_green() {
    let theme = Theme::default();
    assert_eq!(raw_status_label("AKTIF", Locale::Indonesian), "Buka");
    assert_eq!(raw_status_label("AKTIF", Locale::English), "Open");
    assert_eq!(raw_status_color("AKTIF", &theme).argb(), 0xFF4CAF50);
}

#[test]
fn anything_else_is_closed_and_red() {
    let theme = Theme::default();
    for raw in ["NONAKTIF", "", "tutup", "AKTIF_LAMA", "\u{0}"] {
        assert_eq!(raw_status_label(raw, Locale::Indonesian), "Tutup");
        assert_eq!(raw_status_label(raw, Locale::English), "Closed");
        assert_eq!(raw_status_color(raw, &theme).argb(), 0xFFF44336);
    }
}

#[test]
fn custom_theme_is_respected() {
    let theme = Theme {
        open: Color(0xFF0000FF),
        closed: Color(0xFF000000),
    };
    assert_eq!(status_color(Status::Active, &theme), Color(0xFF0000FF));
    assert_eq!(status_color(Status::Inactive, &theme), Color(0xFF000000));
}
