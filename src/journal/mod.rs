//! Child-development journal entries and the storage they are kept in.

mod memory;
pub use memory::*;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Journal entry {0} does not exist")]
    NotFound(String),
    #[error("Journal description is empty")]
    EmptyDescription,
    #[error("Journal photo is empty")]
    EmptyPhoto,
}

/// One dated observation.
///
/// Field names follow the `jurnal_sikembang` table, including the historical
/// `cretedAt` column. The older document store used `photoUrl` and `createdAt`,
/// both are accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Start of the observed day.
    #[serde(rename = "tanggal")]
    pub date: DateTime<Utc>,
    /// The observed day as `YYYY-MM-DD`.
    #[serde(rename = "tanggalString", alias = "dateString")]
    pub date_string: String,
    #[serde(rename = "deskripsi")]
    pub description: String,
    #[serde(rename = "fotoURL", alias = "photoUrl")]
    pub photo_url: String,
    #[serde(rename = "cretedAt", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.date.with_timezone(tz).date_naive()
    }
}

/// The instant range `[start, end)` covering `date` in the given time zone.
pub fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(date, tz);
    let end = date
        .succ_opt()
        .map(|next| start_of_day(next, tz))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        // Midnight skipped by a DST jump, the day starts an hour later.
        .or_else(|| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Remote row/document store holding the journal and its photos.
pub trait JournalStore {
    /// Stores the photo and returns its public URL.
    fn upload_photo(&mut self, bytes: &[u8]) -> Result<String, Error>;

    /// Persists the entry and returns its new id.
    fn insert(&mut self, entry: JournalEntry) -> Result<String, Error>;

    /// Entries dated inside `[start, end)`, newest date first.
    fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, Error>;

    /// Every entry, most recently created first.
    fn all(&self) -> Result<Vec<JournalEntry>, Error>;

    fn delete(&mut self, id: &str) -> Result<(), Error>;

    fn update_description(&mut self, id: &str, description: &str) -> Result<(), Error>;

    /// Uploads the photo and records a new entry for `date`.
    fn save<Tz: TimeZone>(
        &mut self,
        date: NaiveDate,
        tz: &Tz,
        description: &str,
        photo: &[u8],
    ) -> Result<String, Error>
    where
        Self: Sized,
    {
        if description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }
        if photo.is_empty() {
            return Err(Error::EmptyPhoto);
        }
        let photo_url = self.upload_photo(photo)?;
        let entry = JournalEntry {
            id: None,
            date: start_of_day(date, tz),
            date_string: date.format("%Y-%m-%d").to_string(),
            description: description.to_string(),
            photo_url,
            created_at: Utc::now(),
        };
        self.insert(entry)
    }

    /// Entries observed on `date` in the given time zone.
    fn by_date<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Result<Vec<JournalEntry>, Error>
    where
        Self: Sized,
    {
        let (start, end) = day_bounds(date, tz);
        self.by_date_range(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn day_bounds_follow_time_zone() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
        let (start, end) = day_bounds(date, &wib());
        assert_eq!(start.to_rfc3339(), "2025-12-09T17:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-12-10T17:00:00+00:00");
    }

    #[test]
    fn reads_both_schema_revisions() {
        let supabase = r#"{
            "id": "b7f0",
            "tanggal": "2025-12-09T17:00:00Z",
            "tanggalString": "2025-12-10",
            "deskripsi": "Bisa duduk sendiri",
            "fotoURL": "https://example.com/a.jpg",
            "cretedAt": "2025-12-10T03:00:00Z"
        }"#;
        let firebase = r#"{
            "tanggal": "2025-12-09T17:00:00Z",
            "dateString": "2025-12-10",
            "deskripsi": "Bisa duduk sendiri",
            "photoUrl": "https://example.com/a.jpg",
            "createdAt": "2025-12-10T03:00:00Z"
        }"#;
        let a: JournalEntry = serde_json::from_str(supabase).unwrap();
        let b: JournalEntry = serde_json::from_str(firebase).unwrap();
        assert_eq!(a.id.as_deref(), Some("b7f0"));
        assert_eq!(b.id, None);
        assert_eq!(a.description, b.description);
        assert_eq!(a.photo_url, b.photo_url);
        assert_eq!(a.local_date(&wib()), NaiveDate::from_ymd_opt(2025, 12, 10).unwrap());
    }

    #[test]
    fn writes_current_column_names() {
        let entry = JournalEntry {
            id: None,
            date: Utc.with_ymd_and_hms(2025, 12, 9, 17, 0, 0).unwrap(),
            date_string: "2025-12-10".into(),
            description: "Tengkurap".into(),
            photo_url: "https://example.com/b.jpg".into(),
            created_at: Utc.with_ymd_and_hms(2025, 12, 10, 3, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["tanggalString"], "2025-12-10");
        assert_eq!(value["fotoURL"], "https://example.com/b.jpg");
        assert!(value.get("cretedAt").is_some());
    }
}
