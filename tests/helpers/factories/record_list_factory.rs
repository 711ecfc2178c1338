use crate::engine::merge::PendingRecord;
use std::path::{Path, PathBuf};

pub struct RecordListFactory {
    entries: Vec<(String, i32)>,
}

impl RecordListFactory {
    pub fn new() -> Self {
        Self {
            entries: vec![("d.jpg".into(), 1), ("e.jpg".into(), 0)],
        }
    }

    pub fn with_entries(mut self, entries: &[(&str, i32)]) -> Self {
        self.entries = entries.iter().map(|(p, l)| (p.to_string(), *l)).collect();
        self
    }

    /// Entries named `img_<n>.png` with labels cycling through 0..10.
    pub fn with_generated(mut self, count: usize) -> Self {
        self.entries = (0..count)
            .map(|i| (format!("img_{:05}.png", i), (i % 10) as i32))
            .collect();
        self
    }

    pub fn records(&self) -> Vec<PendingRecord> {
        self.entries
            .iter()
            .map(|(p, l)| PendingRecord::new(p.clone(), *l))
            .collect()
    }

    pub fn contents(&self) -> String {
        self.entries
            .iter()
            .map(|(p, l)| format!("{} {}\n", p, l))
            .collect()
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.contents()).expect("write record list");
        path
    }
}
