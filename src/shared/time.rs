use std::{fmt::Display, ops::Add};

use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Duration(u64);

impl From<u64> for Duration {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Duration {
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs)
    }

    /// Saturates instead of overflowing.
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes.saturating_mul(60))
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self(hours.saturating_mul(60 * 60))
    }

    pub const fn as_seconds(&self) -> u64 {
        self.0
    }

    /// Whole minutes, remaining seconds are dropped.
    pub const fn as_minutes(&self) -> u64 {
        self.0 / 60
    }
}

/// Day of the week, the key of a weekly operating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Monday first, the order schedules are listed in.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Accepts either the Indonesian or the English day name, in any case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "senin" | "monday" => Some(Self::Monday),
            "selasa" | "tuesday" => Some(Self::Tuesday),
            "rabu" | "wednesday" => Some(Self::Wednesday),
            "kamis" | "thursday" => Some(Self::Thursday),
            "jumat" | "friday" => Some(Self::Friday),
            "sabtu" | "saturday" => Some(Self::Saturday),
            "minggu" | "sunday" => Some(Self::Sunday),
            _ => None,
        }
    }

    pub fn today() -> Self {
        Local::now().weekday().into()
    }

    pub const fn indonesian_name(&self) -> &'static str {
        match self {
            Day::Monday => "Senin",
            Day::Tuesday => "Selasa",
            Day::Wednesday => "Rabu",
            Day::Thursday => "Kamis",
            Day::Friday => "Jumat",
            Day::Saturday => "Sabtu",
            Day::Sunday => "Minggu",
        }
    }

    pub const fn english_name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for Day {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.indonesian_name())
    }
}

#[test]
fn duration_minutes_truncate() {
    assert_eq!(Duration::from_seconds(119).as_minutes(), 1);
    assert_eq!(Duration::from_minutes(45).as_seconds(), 2700);
    assert_eq!(Duration::from_hours(1).as_minutes(), 60);
}

#[test]
fn parse_both_languages() {
    assert_eq!(Day::parse("senin"), Some(Day::Monday));
    assert_eq!(Day::parse("Monday"), Some(Day::Monday));
    assert_eq!(Day::parse("JUMAT"), Some(Day::Friday));
    assert_eq!(Day::parse(" sunday "), Some(Day::Sunday));
}

#[test]
fn parse_unknown_day() {
    assert_eq!(Day::parse(""), None);
    assert_eq!(Day::parse("mon"), None);
    assert_eq!(Day::parse("besok"), None);
}

#[test]
fn parse_names_round_trip() {
    for day in Day::ALL {
        assert_eq!(Day::parse(day.indonesian_name()), Some(day));
        assert_eq!(Day::parse(day.english_name()), Some(day));
    }
}

#[test]
fn weekday_mapping() {
    assert_eq!(Day::from(Weekday::Mon), Day::Monday);
    assert_eq!(Day::from(Weekday::Sun), Day::Sunday);
}

#[test]
fn duration_saturates() {
    assert_eq!(Duration::from_minutes(u64::MAX).as_seconds(), u64::MAX);
    assert_eq!(
        (Duration::from_seconds(u64::MAX) + Duration::from_seconds(1)).as_seconds(),
        u64::MAX
    );
}
