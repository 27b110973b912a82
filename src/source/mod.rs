use serde::de::DeserializeOwned;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Instant,
};
use thiserror::Error;
use tracing::{debug, warn};
use zip::{ZipArchive, read::ZipFile};

mod config;
pub mod models;
pub use config::*;
use models::*;

use crate::{
    journal::JournalEntry,
    repository::{Facility, Repository},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Invalid {table} row: {reason}")]
    InvalidRow { table: String, reason: String },
}

/// Supplies facility records, the only thing the proximity code reads from a backend.
pub trait FacilityStore {
    fn facilities(&self) -> Result<Vec<Facility>, self::Error>;

    fn facility(&self, id: &str) -> Result<Option<Facility>, self::Error> {
        Ok(self
            .facilities()?
            .into_iter()
            .find(|facility| &*facility.id == id))
    }
}

impl FacilityStore for Repository {
    fn facilities(&self) -> Result<Vec<Facility>, self::Error> {
        Ok(self.facilities.to_vec())
    }

    fn facility(&self, id: &str) -> Result<Option<Facility>, self::Error> {
        Ok(self.facility_by_id(id).cloned())
    }
}

impl Repository {
    pub fn load<S: FacilityStore>(self, store: &S) -> Result<Self, self::Error> {
        Ok(self.with_facilities(store.facilities()?))
    }
}

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// A table export of the backend, either zipped or unpacked in a directory.
#[derive(Default)]
pub struct Snapshot {
    config: Config,
    storage: StorageType,
}

impl Snapshot {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.as_ref().to_path_buf());
        self
    }

    pub fn from_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Directory(path.as_ref().to_path_buf());
        self
    }

    /// Streams every facility row that maps cleanly, rows that don't are logged and skipped.
    pub fn stream_facilities<F>(&self, mut f: F) -> Result<(), self::Error>
    where
        F: FnMut(Facility),
    {
        self.stream::<SupabaseFacilityRow, _>(&self.config.facilities_file_name, |(i, row)| {
            match SupabaseFacility::try_from(row).and_then(Facility::try_from) {
                Ok(facility) => f(facility),
                Err(err) => warn!("Skipping posyandu row {i}: {err}"),
            }
        })
    }

    pub fn stream_journal<F>(&self, mut f: F) -> Result<(), self::Error>
    where
        F: FnMut(JournalEntry),
    {
        self.stream::<JournalEntry, _>(&self.config.journal_file_name, |(_, entry)| f(entry))
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => stream_from_zip::<T, F>(path, file_name, f),
            StorageType::Directory(path) => {
                let path = path.join(file_name);
                if !path.exists() {
                    return Err(self::Error::FileNotFound(file_name.to_string()));
                }
                stream_from_reader::<T, F, _>(File::open(path)?, file_name, f)
            }
        }
    }
}

impl FacilityStore for Snapshot {
    fn facilities(&self) -> Result<Vec<Facility>, self::Error> {
        debug!("Loading facilities...");
        let now = Instant::now();
        let mut facilities = Vec::new();
        self.stream_facilities(|facility| facilities.push(facility))?;
        debug!(
            "Loaded {} facilities in {:?}",
            facilities.len(),
            now.elapsed()
        );
        Ok(facilities)
    }
}

fn stream_from_zip<T, F>(zip_path: &Path, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    let file = get_file(&mut archive, file_name)?;
    stream_from_reader::<T, F, _>(file, file_name, f)
}

fn stream_from_reader<T, F, R>(reader: R, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
    R: Read,
{
    let mut reader = csv::Reader::from_reader(reader);
    reader
        .deserialize()
        .enumerate()
        .filter_map(|(i, row)| match row {
            Ok(row) => Some((i, row)),
            Err(err) => {
                warn!("Skipping {file_name} line {}: {err}", i + 2);
                None
            }
        })
        .for_each(f);
    Ok(())
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or(self::Error::FileNotFound(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}

/// Decodes the body of `GET /rest/v1/posyandu`.
pub fn decode_supabase(json: &str) -> Result<Vec<Facility>, self::Error> {
    let rows: Vec<SupabaseFacility> = serde_json::from_str(json)?;
    Ok(map_rows(rows))
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum FirebaseExport {
    List(Vec<FirebaseFacility>),
    Map(BTreeMap<String, FirebaseFacility>),
}

/// Decodes a Firebase collection export, either a list of documents or a map
/// from document id to document.
pub fn decode_firebase(json: &str) -> Result<Vec<Facility>, self::Error> {
    let documents = match serde_json::from_str(json)? {
        FirebaseExport::List(documents) => documents,
        FirebaseExport::Map(documents) => documents
            .into_iter()
            .map(|(id, mut document)| {
                if document.id.is_empty() {
                    document.id = id;
                }
                document
            })
            .collect(),
    };
    Ok(map_rows(documents))
}

fn map_rows<T>(rows: Vec<T>) -> Vec<Facility>
where
    Facility: TryFrom<T, Error = self::Error>,
{
    rows.into_iter()
        .enumerate()
        .filter_map(|(i, row)| match Facility::try_from(row) {
            Ok(facility) => Some(facility),
            Err(err) => {
                warn!("Skipping posyandu row {i}: {err}");
                None
            }
        })
        .collect()
}
