use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{Coordinate, Day, Identifiable};

/// Whether a posyandu is currently serving.
///
/// Backends store this either as an enum or as a bare string, both go through
/// [`Status::parse`] so anything that is not recognised as active reads as inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("aktif") || value.eq_ignore_ascii_case("active") {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "AKTIF",
            Status::Inactive => "NONAKTIF",
        }
    }

    pub const fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        value.as_str().to_string()
    }
}

/// Opening hours of a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Hours {
    #[default]
    Closed,
    /// Free text as entered by the posyandu, e.g. "08:00 - 12:00".
    Open(Arc<str>),
}

impl Hours {
    /// How a closed day is stored.
    pub const CLOSED: &'static str = "Tutup";

    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case(Self::CLOSED)
            || value.eq_ignore_ascii_case("closed")
        {
            Self::Closed
        } else {
            Self::Open(value.into())
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Hours::Closed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Hours::Closed => Self::CLOSED,
            Hours::Open(hours) => hours,
        }
    }
}

impl From<&str> for Hours {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Option<String>> for Hours {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<Hours> for String {
    fn from(value: Hours) -> Self {
        value.as_str().to_string()
    }
}

static CLOSED: Hours = Hours::Closed;

/// Weekly schedule, one entry per day. Every day defaults to closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingHours {
    #[serde(rename = "senin")]
    pub monday: Hours,
    #[serde(rename = "selasa")]
    pub tuesday: Hours,
    #[serde(rename = "rabu")]
    pub wednesday: Hours,
    #[serde(rename = "kamis")]
    pub thursday: Hours,
    #[serde(rename = "jumat")]
    pub friday: Hours,
    #[serde(rename = "sabtu")]
    pub saturday: Hours,
    #[serde(rename = "minggu")]
    pub sunday: Hours,
}

impl OperatingHours {
    pub fn get(&self, day: Day) -> &Hours {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }

    /// Looks a day up by its Indonesian or English name, ignoring case.
    /// Names that are not a day resolve to closed.
    pub fn hours_for_day(&self, name: &str) -> &Hours {
        match Day::parse(name) {
            Some(day) => self.get(day),
            None => &CLOSED,
        }
    }

    pub fn today(&self) -> &Hours {
        self.get(Day::today())
    }

    /// The whole week, Monday first.
    pub fn week(&self) -> impl Iterator<Item = (Day, &Hours)> {
        Day::ALL.into_iter().map(|day| (day, self.get(day)))
    }

    pub fn is_closed_all_week(&self) -> bool {
        self.week().all(|(_, hours)| hours.is_closed())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    /// Street line, "alamat lengkap".
    pub street: Arc<str>,
    /// Kelurahan.
    pub sub_district: Arc<str>,
    /// Kecamatan.
    pub district: Arc<str>,
    pub city: Arc<str>,
    pub province: Arc<str>,
    pub postal_code: Arc<str>,
}

impl Address {
    pub fn full(&self) -> String {
        format!(
            "{}, {}, {}, {}, {} {}",
            self.street,
            self.sub_district,
            self.district,
            self.city,
            self.province,
            self.postal_code
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub phone: Arc<str>,
    pub email: Arc<str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub reviews: u32,
}

impl Rating {
    pub fn formatted(&self) -> String {
        format!("{:.1}", self.average)
    }
}

/// A community health post (posyandu).
#[derive(Debug, Clone, Default)]
pub struct Facility {
    /// Position inside the owning [`Repository`](crate::repository::Repository).
    pub index: u32,
    /// Backend id. Numeric ids are kept in their decimal form.
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub normalized_name: Arc<str>,
    /// Unknown when the backend is missing either half of the location.
    pub coordinate: Option<Coordinate>,
    pub address: Address,
    pub contact: Contact,
    pub responsible_person: Arc<str>,
    pub notes: Arc<str>,
    pub recent_activity: Arc<str>,
    pub amenities: Arc<[Arc<str>]>,
    pub status: Status,
    pub hours: OperatingHours,
    pub rating: Rating,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for Facility {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

#[test]
fn status_parse_is_total() {
    assert_eq!(Status::parse("AKTIF"), Status::Active);
    assert_eq!(Status::parse("aktif"), Status::Active);
    assert_eq!(Status::parse("active"), Status::Active);
    assert_eq!(Status::parse("NONAKTIF"), Status::Inactive);
    assert_eq!(Status::parse(""), Status::Inactive);
    assert_eq!(Status::parse("¯\\_(ツ)_/¯"), Status::Inactive);
}

#[test]
fn hours_sentinel() {
    assert!(Hours::parse("Tutup").is_closed());
    assert!(Hours::parse("TUTUP").is_closed());
    assert!(Hours::parse("closed").is_closed());
    assert!(Hours::parse("  ").is_closed());
    assert_eq!(Hours::parse("08:00 - 12:00").as_str(), "08:00 - 12:00");
    assert_eq!(Hours::Closed.as_str(), "Tutup");
}

#[test]
fn hours_for_day_accepts_both_languages() {
    let schedule = OperatingHours {
        monday: "08:00 - 12:00".into(),
        ..Default::default()
    };
    assert_eq!(schedule.hours_for_day("monday").as_str(), "08:00 - 12:00");
    assert_eq!(schedule.hours_for_day("SENIN"), &schedule.monday);
    assert_eq!(schedule.hours_for_day("Monday"), &schedule.monday);
    assert!(schedule.hours_for_day("selasa").is_closed());
    assert!(schedule.hours_for_day("someday").is_closed());
}

#[test]
fn week_is_ordered_from_monday() {
    let schedule = OperatingHours {
        sunday: "07:00 - 09:00".into(),
        ..Default::default()
    };
    let week: Vec<_> = schedule.week().collect();
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].0, Day::Monday);
    assert_eq!(week[6], (Day::Sunday, &Hours::Open("07:00 - 09:00".into())));
    assert!(!schedule.is_closed_all_week());
    assert!(OperatingHours::default().is_closed_all_week());
}

#[test]
fn full_address() {
    let address = Address {
        street: "Jl. Merdeka No. 1".into(),
        sub_district: "Braga".into(),
        district: "Sumur Bandung".into(),
        city: "Bandung".into(),
        province: "Jawa Barat".into(),
        postal_code: "40111".into(),
    };
    assert_eq!(
        address.full(),
        "Jl. Merdeka No. 1, Braga, Sumur Bandung, Bandung, Jawa Barat 40111"
    );
}

#[test]
fn rating_one_decimal() {
    let rating = Rating {
        average: 4.46,
        reviews: 12,
    };
    assert_eq!(rating.formatted(), "4.5");
}
