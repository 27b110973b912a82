/// File names of the exported tables inside a snapshot.
pub struct Config {
    pub facilities_file_name: String,
    pub journal_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            facilities_file_name: "posyandu.csv".into(),
            journal_file_name: "jurnal_sikembang.csv".into(),
        }
    }
}
