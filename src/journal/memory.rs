use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::journal::{Error, JournalEntry, JournalStore};

const PHOTO_BUCKET: &str = "foto_jurnal";

/// Journal store kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryJournal {
    entries: Vec<JournalEntry>,
    photos: HashMap<String, Box<[u8]>>,
    next_id: u64,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Default::default()
    }

    /// Seeds the store with entries that already carry an id, e.g. from a snapshot.
    /// Entries without one are given a fresh id.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = JournalEntry>,
    {
        entries.into_iter().for_each(|mut entry| {
            if entry.id.is_none() {
                entry.id = Some(self.fresh_id());
            }
            self.entries.push(entry);
        });
        self
    }

    pub fn photo(&self, url: &str) -> Option<&[u8]> {
        self.photos.get(url).map(|bytes| bytes.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("mem-{}", self.next_id)
    }

    fn position(&self, id: &str) -> Result<usize, Error> {
        self.entries
            .iter()
            .position(|entry| entry.id.as_deref() == Some(id))
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

impl JournalStore for MemoryJournal {
    fn upload_photo(&mut self, bytes: &[u8]) -> Result<String, Error> {
        if bytes.is_empty() {
            return Err(Error::EmptyPhoto);
        }
        let id = self.fresh_id();
        let url = format!("memory://{PHOTO_BUCKET}/journal_photos/{id}.jpg");
        self.photos.insert(url.clone(), bytes.into());
        debug!("Stored {} byte photo at {url}", bytes.len());
        Ok(url)
    }

    fn insert(&mut self, mut entry: JournalEntry) -> Result<String, Error> {
        let id = match entry.id.take() {
            Some(id) => id,
            None => self.fresh_id(),
        };
        entry.id = Some(id.clone());
        self.entries.push(entry);
        Ok(id)
    }

    fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, Error> {
        let mut found: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.date >= start && entry.date < end)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }

    fn all(&self) -> Result<Vec<JournalEntry>, Error> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    fn delete(&mut self, id: &str) -> Result<(), Error> {
        let position = self.position(id)?;
        self.entries.remove(position);
        Ok(())
    }

    fn update_description(&mut self, id: &str, description: &str) -> Result<(), Error> {
        if description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }
        let position = self.position(id)?;
        self.entries[position].description = description.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    #[test]
    fn save_then_query_by_date() {
        let mut journal = MemoryJournal::new();
        let id = journal.save(day(10), &wib(), "Mulai merangkak", b"jpeg").unwrap();
        journal.save(day(11), &wib(), "Bisa berdiri", b"jpeg").unwrap();

        let found = journal.by_date(day(10), &wib()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_deref(), Some(id.as_str()));
        assert_eq!(found[0].date_string, "2025-12-10");
        assert_eq!(journal.photo(&found[0].photo_url), Some(&b"jpeg"[..]));
        assert!(journal.by_date(day(12), &wib()).unwrap().is_empty());
    }

    #[test]
    fn save_rejects_incomplete_form() {
        let mut journal = MemoryJournal::new();
        assert_eq!(
            journal.save(day(10), &wib(), "   ", b"jpeg"),
            Err(Error::EmptyDescription)
        );
        assert_eq!(
            journal.save(day(10), &wib(), "Tengkurap", b""),
            Err(Error::EmptyPhoto)
        );
        assert!(journal.is_empty());
    }

    #[test]
    fn update_and_delete() {
        let mut journal = MemoryJournal::new();
        let id = journal.save(day(10), &wib(), "Tengkurap", b"jpeg").unwrap();
        journal.update_description(&id, "Tengkurap sendiri").unwrap();
        assert_eq!(journal.all().unwrap()[0].description, "Tengkurap sendiri");

        journal.delete(&id).unwrap();
        assert!(journal.is_empty());
        assert_eq!(journal.delete(&id), Err(Error::NotFound(id.clone())));
        assert_eq!(
            journal.update_description(&id, "x"),
            Err(Error::NotFound(id))
        );
    }

    #[test]
    fn range_is_newest_first() {
        let mut journal = MemoryJournal::new();
        journal.save(day(1), &wib(), "a", b"1").unwrap();
        journal.save(day(3), &wib(), "c", b"3").unwrap();
        journal.save(day(2), &wib(), "b", b"2").unwrap();
        let (start, _) = crate::journal::day_bounds(day(1), &wib());
        let (_, end) = crate::journal::day_bounds(day(3), &wib());
        let found = journal.by_date_range(start, end).unwrap();
        let descriptions: Vec<_> = found.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, ["c", "b", "a"]);
    }
}
