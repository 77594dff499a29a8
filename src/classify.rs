use std::path::Path;

use crate::models::files::{FileEntry, FileListing};

pub const MAX_AVAILABLE_FILE_SIZE: u64 = 10 * 1024 * 1024;

const AVAILABLE_EXTENSION: &str = "txt";

pub fn is_available(entry: &FileEntry) -> bool {
    entry.size_bytes < MAX_AVAILABLE_FILE_SIZE
        && Path::new(&entry.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(AVAILABLE_EXTENSION))
            .unwrap_or(false)
}

// stable sort: equal timestamps keep scan order
pub fn classify(mut entries: Vec<FileEntry>) -> FileListing {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let (available, unavailable): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(is_available);
    FileListing {
        available,
        unavailable,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    fn entry(name: &str, size_bytes: u64, created_at: DateTime<Utc>) -> FileEntry {
        FileEntry {
            id: name.into(),
            name: name.into(),
            size_bytes,
            created_at,
        }
    }

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn txt_under_limit_is_available() {
        let listing = classify(vec![
            entry("a.txt", 1024, at(0)),
            entry("b.pdf", 2048, at(1)),
        ]);
        assert_eq!(names(&listing.available), vec!["a.txt"]);
        assert_eq!(names(&listing.unavailable), vec!["b.pdf"]);
    }

    #[test]
    fn size_limit_is_exclusive() {
        assert!(is_available(&entry(
            "edge.txt",
            MAX_AVAILABLE_FILE_SIZE - 1,
            at(0)
        )));
        assert!(!is_available(&entry(
            "big.txt",
            MAX_AVAILABLE_FILE_SIZE,
            at(0)
        )));
        assert!(!is_available(&entry(
            "huge.txt",
            MAX_AVAILABLE_FILE_SIZE * 3 / 2,
            at(0)
        )));
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(is_available(&entry("NOTES.TXT", 10, at(0))));
        assert!(is_available(&entry("mixed.TxT", 10, at(0))));
        assert!(is_available(&entry("empty.txt", 0, at(0))));
        assert!(!is_available(&entry("notes.txt.gz", 10, at(0))));
        assert!(!is_available(&entry("txt", 10, at(0))));
        assert!(!is_available(&entry(".txt", 10, at(0))));
        assert!(!is_available(&entry("report.text", 10, at(0))));
    }

    #[test]
    fn both_sides_are_sorted_newest_first() {
        let listing = classify(vec![
            entry("old.txt", 1, at(0)),
            entry("old.bin", 1, at(1)),
            entry("new.txt", 1, at(20)),
            entry("mid.txt", 1, at(10)),
            entry("new.bin", 1, at(30)),
        ]);
        assert_eq!(
            names(&listing.available),
            vec!["new.txt", "mid.txt", "old.txt"]
        );
        assert_eq!(names(&listing.unavailable), vec!["new.bin", "old.bin"]);
    }

    #[test]
    fn equal_timestamps_keep_scan_order() {
        let listing = classify(vec![
            entry("first.txt", 1, at(5)),
            entry("second.txt", 1, at(5)),
            entry("third.txt", 1, at(5)),
        ]);
        assert_eq!(
            names(&listing.available),
            vec!["first.txt", "second.txt", "third.txt"]
        );
    }

    #[test]
    fn every_entry_lands_on_exactly_one_side() {
        let entries: Vec<FileEntry> = (0..40)
            .map(|i| {
                let name = if i % 3 == 0 {
                    format!("file_{i:03}.log")
                } else {
                    format!("file_{i:03}.txt")
                };
                let size = if i % 7 == 0 {
                    MAX_AVAILABLE_FILE_SIZE
                } else {
                    i as u64
                };
                entry(&name, size, at(i % 4))
            })
            .collect();

        let listing = classify(entries.clone());
        assert_eq!(
            listing.available.len() + listing.unavailable.len(),
            entries.len()
        );
        for item in &listing.available {
            assert!(is_available(item));
            assert!(!listing.unavailable.contains(item));
        }
        for item in &listing.unavailable {
            assert!(!is_available(item));
        }
        for side in [&listing.available, &listing.unavailable] {
            assert!(side.windows(2).all(|pair| pair[0].created_at >= pair[1].created_at));
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let entries = vec![
            entry("a.txt", 1, at(1)),
            entry("b.txt", 1, at(1)),
            entry("c.md", 1, at(2)),
        ];
        assert_eq!(classify(entries.clone()), classify(entries));
    }
}
