use sikembang::{
    prelude::*,
    source::{self, Config, decode_firebase, decode_supabase},
};
use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};
use zip::{ZipWriter, write::SimpleFileOptions};

const POSYANDU_CSV: &str = r#"id,nama_posyandu,alamat_lengkap,kelurahan,kecamatan,kota,provinsi,kode_pos,latitude,longitude,telepon,email,keterangan,penanggung_jawab,rating,jumlah_ulasan,status,jam_operasional,fasilitas_tersedia,kegiatan_terbaru
1,Posyandu Melati,Jl. Melati No. 3,Dinoyo,Lowokwaru,Malang,Jawa Timur,65144,-7.9438,112.6160,0341-555,melati@example.com,,Bu Sri,4.5,12,AKTIF,"{""senin"":""08:00 - 12:00"",""selasa"":""Tutup""}","[""Timbangan"",""Imunisasi""]",Imunisasi campak
2,Posyandu Mawar,Jl. Mawar,,,Malang,Jawa Timur,,,,,,,,,,NONAKTIF,,"{Timbangan,""Ruang laktasi""}",
,Tanpa Id,,,,,,,,,,,,,,,,,,
3,Posyandu Kenanga,,,,Malang,,,-7.97,,,,,,,,,,,
"#;

const JOURNAL_CSV: &str = "id,tanggal,tanggalString,deskripsi,fotoURL,cretedAt
a1,2025-12-09T17:00:00Z,2025-12-10,Bisa duduk sendiri,https://example.com/a.jpg,2025-12-10T03:00:00Z
";

fn write_snapshot(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sikembang-{name}-{}.zip", std::process::id()));
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();
    zip.start_file("posyandu.csv", options).unwrap();
    zip.write_all(POSYANDU_CSV.as_bytes()).unwrap();
    zip.start_file("jurnal_sikembang.csv", options).unwrap();
    zip.write_all(JOURNAL_CSV.as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

#[test]
fn reads_facilities_from_zip() {
    let path = write_snapshot("facilities");
    let snapshot = Snapshot::default().from_zip(&path);
    let facilities = snapshot.facilities().unwrap();
    fs::remove_file(&path).ok();

    let ids: Vec<_> = facilities.iter().map(|f| f.id.to_string()).collect();
    assert_eq!(ids, ["1", "2", "3"]);

    let melati = &facilities[0];
    assert_eq!(melati.coordinate, Some(Coordinate::new(-7.9438, 112.6160)));
    assert_eq!(melati.status, Status::Active);
    assert_eq!(melati.hours.monday.as_str(), "08:00 - 12:00");
    assert!(melati.hours.tuesday.is_closed());
    assert!(melati.hours.sunday.is_closed());
    assert_eq!(melati.amenities.len(), 2);
    assert_eq!(melati.rating.formatted(), "4.5");
    assert_eq!(
        melati.address.full(),
        "Jl. Melati No. 3, Dinoyo, Lowokwaru, Malang, Jawa Timur 65144"
    );

    let mawar = &facilities[1];
    assert_eq!(mawar.status, Status::Inactive);
    assert_eq!(mawar.coordinate, None);
    assert_eq!(&*mawar.amenities[1], "Ruang laktasi");

    // Only half a location is no location.
    assert_eq!(facilities[2].coordinate, None);
    assert_eq!(facilities[2].status, Status::Active);
}

#[test]
fn loads_into_a_repository() {
    let path = write_snapshot("repository");
    let repository = Repository::new()
        .load(&Snapshot::default().from_zip(&path))
        .unwrap();
    fs::remove_file(&path).ok();
    assert_eq!(repository.len(), 3);
    let ranked = repository.nearest(Some(Coordinate::new(-7.9826, 112.6308)), 3);
    assert_eq!(&*ranked[0].0.id, "1");
    assert!(!ranked[2].1.is_available());
}

#[test]
fn reads_journal_from_zip() {
    let path = write_snapshot("journal");
    let mut entries = Vec::new();
    Snapshot::default()
        .from_zip(&path)
        .stream_journal(|entry| entries.push(entry))
        .unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id.as_deref(), Some("a1"));
    let journal = MemoryJournal::new().with_entries(entries);
    assert_eq!(journal.len(), 1);
}

#[test]
fn missing_table() {
    let path = write_snapshot("missing");
    let snapshot = Snapshot::new(Config {
        facilities_file_name: "posyandu_v2.csv".into(),
        ..Default::default()
    })
    .from_zip(&path);
    let result = snapshot.facilities();
    fs::remove_file(&path).ok();
    assert!(matches!(result, Err(source::Error::FileNotFound(_))));
}

#[test]
fn reads_unpacked_directory() {
    let dir = std::env::temp_dir().join(format!("sikembang-dir-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("posyandu.csv"), POSYANDU_CSV).unwrap();
    let facilities = Snapshot::default().from_directory(&dir).facilities().unwrap();
    fs::remove_dir_all(&dir).ok();
    assert_eq!(facilities.len(), 3);
}

#[test]
fn decodes_rest_response() {
    let body = r#"[
        {"id": 10, "nama_posyandu": "Posyandu Anggrek", "latitude": -6.2, "longitude": 106.8,
         "status": "AKTIF", "jam_operasional": {"senin": "08:00 - 11:00"}, "rating": null},
        {"id": null, "nama_posyandu": "Tanpa Id"}
    ]"#;
    let facilities = decode_supabase(body).unwrap();
    assert_eq!(facilities.len(), 1);
    assert_eq!(&*facilities[0].id, "10");
    assert_eq!(facilities[0].hours.monday.as_str(), "08:00 - 11:00");
}

#[test]
fn decodes_document_export() {
    let body = r#"{
        "abc": {"namaPosyandu": "Posyandu Dahlia", "latitude": -6.9, "longitude": 107.6,
                "status": "NONAKTIF", "createdAt": 1733800000000}
    }"#;
    let facilities = decode_firebase(body).unwrap();
    assert_eq!(facilities.len(), 1);
    assert_eq!(&*facilities[0].id, "abc");
    assert_eq!(facilities[0].status, Status::Inactive);
    assert!(facilities[0].created_at.is_some());
}
