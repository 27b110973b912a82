use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::{
    repository::{Address, Contact, Facility, OperatingHours, Rating, Status},
    shared::{Coordinate, normalize},
    source::Error,
};

/// `posyandu` row as returned by the Supabase REST API.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SupabaseFacility {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub nama_posyandu: String,
    #[serde(deserialize_with = "null_as_default")]
    pub alamat_lengkap: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kelurahan: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kecamatan: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kota: String,
    #[serde(deserialize_with = "null_as_default")]
    pub provinsi: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kode_pos: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub telepon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keterangan: String,
    #[serde(deserialize_with = "null_as_default")]
    pub penanggung_jawab: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub jumlah_ulasan: u32,
    pub status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub jam_operasional: OperatingHours,
    #[serde(deserialize_with = "null_as_default")]
    pub fasilitas_tersedia: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub kegiatan_terbaru: String,
}

/// `posyandu` row of a CSV table export.
/// Nested columns hold their JSON text.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SupabaseFacilityRow {
    pub id: Option<i64>,
    pub nama_posyandu: Option<String>,
    pub alamat_lengkap: Option<String>,
    pub kelurahan: Option<String>,
    pub kecamatan: Option<String>,
    pub kota: Option<String>,
    pub provinsi: Option<String>,
    pub kode_pos: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub telepon: Option<String>,
    pub email: Option<String>,
    pub keterangan: Option<String>,
    pub penanggung_jawab: Option<String>,
    pub rating: Option<f64>,
    pub jumlah_ulasan: Option<u32>,
    pub status: Option<String>,
    pub jam_operasional: Option<String>,
    pub fasilitas_tersedia: Option<String>,
    pub kegiatan_terbaru: Option<String>,
}

/// `posyandu` document of the older Firebase store.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FirebaseFacility {
    pub id: String,
    pub nama_posyandu: String,
    pub alamat_lengkap: String,
    pub kelurahan: String,
    pub kecamatan: String,
    pub kota: String,
    pub provinsi: String,
    pub kode_pos: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub telepon: String,
    pub email: String,
    pub keterangan: String,
    pub penanggung_jawab: String,
    pub rating: f64,
    pub jumlah_ulasan: u32,
    pub status: Option<String>,
    /// Milliseconds since the unix epoch.
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub jam_operasional: OperatingHours,
    pub fasilitas_tersedia: Vec<String>,
    pub kegiatan_terbaru: String,
}

impl TryFrom<SupabaseFacility> for Facility {
    type Error = Error;

    fn try_from(value: SupabaseFacility) -> Result<Self, Self::Error> {
        let id = value.id.ok_or_else(|| Error::InvalidRow {
            table: "posyandu".into(),
            reason: format!("{} has no id", value.nama_posyandu),
        })?;
        let id: Arc<str> = id.to_string().into();
        let coordinate = coordinate(&id, value.latitude, value.longitude);
        Ok(Facility {
            index: 0,
            normalized_name: normalize(&value.nama_posyandu).into(),
            name: value.nama_posyandu.into(),
            id,
            coordinate,
            address: Address {
                street: value.alamat_lengkap.into(),
                sub_district: value.kelurahan.into(),
                district: value.kecamatan.into(),
                city: value.kota.into(),
                province: value.provinsi.into(),
                postal_code: value.kode_pos.into(),
            },
            contact: Contact {
                phone: value.telepon.into(),
                email: value.email.into(),
            },
            responsible_person: value.penanggung_jawab.into(),
            notes: value.keterangan.into(),
            recent_activity: value.kegiatan_terbaru.into(),
            amenities: value.fasilitas_tersedia.into_iter().map(Arc::from).collect(),
            status: status(value.status),
            hours: value.jam_operasional,
            rating: Rating {
                average: value.rating,
                reviews: value.jumlah_ulasan,
            },
            created_at: None,
            updated_at: None,
        })
    }
}

impl TryFrom<SupabaseFacilityRow> for SupabaseFacility {
    type Error = Error;

    fn try_from(row: SupabaseFacilityRow) -> Result<Self, Self::Error> {
        let jam_operasional = match row.jam_operasional.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => serde_json::from_str(text)?,
            _ => OperatingHours::default(),
        };
        let fasilitas_tersedia = match row.fasilitas_tersedia.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => parse_tags(text)?,
            _ => Vec::new(),
        };
        Ok(Self {
            id: row.id,
            nama_posyandu: row.nama_posyandu.unwrap_or_default(),
            alamat_lengkap: row.alamat_lengkap.unwrap_or_default(),
            kelurahan: row.kelurahan.unwrap_or_default(),
            kecamatan: row.kecamatan.unwrap_or_default(),
            kota: row.kota.unwrap_or_default(),
            provinsi: row.provinsi.unwrap_or_default(),
            kode_pos: row.kode_pos.unwrap_or_default(),
            latitude: row.latitude,
            longitude: row.longitude,
            telepon: row.telepon.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            keterangan: row.keterangan.unwrap_or_default(),
            penanggung_jawab: row.penanggung_jawab.unwrap_or_default(),
            rating: row.rating.unwrap_or_default(),
            jumlah_ulasan: row.jumlah_ulasan.unwrap_or_default(),
            status: row.status,
            jam_operasional,
            fasilitas_tersedia,
            kegiatan_terbaru: row.kegiatan_terbaru.unwrap_or_default(),
        })
    }
}

impl TryFrom<FirebaseFacility> for Facility {
    type Error = Error;

    fn try_from(value: FirebaseFacility) -> Result<Self, Self::Error> {
        if value.id.trim().is_empty() {
            return Err(Error::InvalidRow {
                table: "posyandu".into(),
                reason: format!("{} has no id", value.nama_posyandu),
            });
        }
        let id: Arc<str> = value.id.into();
        let coordinate = coordinate(&id, value.latitude, value.longitude);
        Ok(Facility {
            index: 0,
            normalized_name: normalize(&value.nama_posyandu).into(),
            name: value.nama_posyandu.into(),
            id,
            coordinate,
            address: Address {
                street: value.alamat_lengkap.into(),
                sub_district: value.kelurahan.into(),
                district: value.kecamatan.into(),
                city: value.kota.into(),
                province: value.provinsi.into(),
                postal_code: value.kode_pos.into(),
            },
            contact: Contact {
                phone: value.telepon.into(),
                email: value.email.into(),
            },
            responsible_person: value.penanggung_jawab.into(),
            notes: value.keterangan.into(),
            recent_activity: value.kegiatan_terbaru.into(),
            amenities: value.fasilitas_tersedia.into_iter().map(Arc::from).collect(),
            status: status(value.status),
            hours: value.jam_operasional,
            rating: Rating {
                average: value.rating,
                reviews: value.jumlah_ulasan,
            },
            created_at: value.created_at.and_then(DateTime::<Utc>::from_timestamp_millis),
            updated_at: value.updated_at.and_then(DateTime::<Utc>::from_timestamp_millis),
        })
    }
}

/// Postgres columns come back as `null` where the app expects an empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Both revisions default a missing status to active.
fn status(value: Option<String>) -> Status {
    value.as_deref().map(Status::parse).unwrap_or_default()
}

fn coordinate(id: &str, latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinate> {
    let coordinate = Coordinate::from_parts(latitude, longitude);
    if coordinate.is_none() && (latitude.is_some() || longitude.is_some()) {
        warn!("Facility {id} has an incomplete or invalid location ({latitude:?}, {longitude:?})");
    }
    coordinate
}

/// Tags are exported either as a JSON array or as a Postgres array literal.
fn parse_tags(text: &str) -> Result<Vec<String>, Error> {
    if text.starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }
    let inner = text
        .strip_prefix('{')
        .and_then(|text| text.strip_suffix('}'))
        .unwrap_or(text);
    Ok(inner
        .split(',')
        .map(|tag| tag.trim().trim_matches('"').trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect())
}

#[test]
fn supabase_row_maps_to_facility() {
    let json = r#"{
        "id": 7,
        "nama_posyandu": "Posyandu Melati",
        "latitude": -6.914744,
        "longitude": 107.60981,
        "status": "NONAKTIF",
        "rating": 4.5,
        "jumlah_ulasan": 10,
        "jam_operasional": { "senin": "08:00 - 12:00" },
        "fasilitas_tersedia": ["Timbangan", "Imunisasi"]
    }"#;
    let row: SupabaseFacility = serde_json::from_str(json).unwrap();
    let facility = Facility::try_from(row).unwrap();
    assert_eq!(&*facility.id, "7");
    assert_eq!(&*facility.normalized_name, "posyandu melati");
    assert_eq!(facility.status, Status::Inactive);
    assert_eq!(facility.hours.monday.as_str(), "08:00 - 12:00");
    assert!(facility.hours.tuesday.is_closed());
    assert_eq!(facility.amenities.len(), 2);
    assert_eq!(facility.rating.reviews, 10);
}

#[test]
fn supabase_nulls_read_as_empty() {
    let json = r#"{ "id": 3, "nama_posyandu": null, "jam_operasional": null, "fasilitas_tersedia": null }"#;
    let row: SupabaseFacility = serde_json::from_str(json).unwrap();
    let facility = Facility::try_from(row).unwrap();
    assert_eq!(&*facility.name, "");
    assert!(facility.hours.is_closed_all_week());
    assert!(facility.amenities.is_empty());
}

#[test]
fn half_a_coordinate_is_no_coordinate() {
    let row = SupabaseFacility {
        id: Some(1),
        latitude: Some(-6.9),
        ..Default::default()
    };
    assert!(Facility::try_from(row).unwrap().coordinate.is_none());
}

#[test]
fn missing_status_is_active() {
    let row = SupabaseFacility {
        id: Some(1),
        ..Default::default()
    };
    assert_eq!(Facility::try_from(row).unwrap().status, Status::Active);
}

#[test]
fn row_without_id_is_rejected() {
    let row = SupabaseFacility::default();
    assert!(matches!(
        Facility::try_from(row),
        Err(Error::InvalidRow { .. })
    ));
    assert!(Facility::try_from(FirebaseFacility::default()).is_err());
}

#[test]
fn firebase_document_maps_to_facility() {
    let json = r#"{
        "id": "abc",
        "namaPosyandu": "Posyandu Mawar",
        "kodePos": "65111",
        "status": "AKTIF",
        "createdAt": 1765000000000,
        "jamOperasional": { "rabu": "Tutup", "kamis": "09:00 - 11:00" }
    }"#;
    let document: FirebaseFacility = serde_json::from_str(json).unwrap();
    let facility = Facility::try_from(document).unwrap();
    assert_eq!(&*facility.address.postal_code, "65111");
    assert_eq!(facility.status, Status::Active);
    assert!(facility.hours.wednesday.is_closed());
    assert_eq!(facility.hours.thursday.as_str(), "09:00 - 11:00");
    assert_eq!(
        facility.created_at.map(|at| at.timestamp_millis()),
        Some(1765000000000)
    );
    assert!(facility.coordinate.is_none());
}

#[test]
fn tags_in_both_export_forms() {
    assert_eq!(parse_tags(r#"["A", "B C"]"#).unwrap(), ["A", "B C"]);
    assert_eq!(parse_tags(r#"{A,"B C"}"#).unwrap(), ["A", "B C"]);
    assert!(parse_tags("{}").unwrap().is_empty());
}
