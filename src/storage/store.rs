//! A flat-file backed store of student records
//!
//! The [`Store`] reads and rewrites a plain text file, one comma-separated
//! line per record. Nothing is kept resident: every operation re-reads the
//! full set, works on it in memory, and (for mutations) writes the whole
//! file back. The design assumes a single user and a record set small enough
//! to hold comfortably in memory.

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    domain::{Changes, Draft, Record, ValidationError},
    storage::Stats,
};

/// A flat-file backed store of student records.
#[derive(Debug, Clone)]
pub struct Store {
    /// The path of the backing file.
    path: PathBuf,
}

impl Store {
    /// Opens a store backed by the file at the given path.
    ///
    /// The file is not touched until the first operation; a missing file
    /// reads back as an empty record set.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record from the backing file, in file order.
    ///
    /// A missing file is an empty record set, not an error. Loading is
    /// deliberately lenient: a line that does not decode into a record
    /// (wrong field count, or an unparseable age, grade, or marks field) is
    /// skipped with a debug log rather than reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn read_all(&self) -> io::Result<Vec<Record>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut records = Vec::new();
        for line in content.lines() {
            match line.trim().parse::<Record>() {
                Ok(record) => records.push(record),
                Err(e) => tracing::debug!("skipping malformed line {line:?}: {e}"),
            }
        }
        Ok(records)
    }

    /// Replaces the backing file with exactly one line per record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn write_all(&self, records: &[Record]) -> io::Result<()> {
        let file = fs::File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writeln!(writer, "{record}")?;
        }
        writer.flush()
    }

    /// Validates and stores a new record.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::Invalid`] if any field fails validation
    /// (including a duplicate id), or with [`StoreError::Io`] if the backing
    /// file cannot be read or written.
    pub fn add(&self, draft: &Draft) -> Result<Record, StoreError> {
        let mut records = self.read_all()?;
        let record = draft.validate(&records, true)?;

        records.push(record.clone());
        self.write_all(&records)?;

        tracing::info!("added record {}", record.id);
        Ok(record)
    }

    /// Replaces the mutable fields of the record with the given id.
    ///
    /// Fields left `None` in `changes` keep their stored values. The merged
    /// result is re-validated (with the uniqueness scan disabled, since the
    /// id is expected to be on file) before anything is written. The record
    /// keeps its id and its position in file order.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] if no record has the id, with
    /// [`StoreError::Invalid`] if a replacement value fails validation, or
    /// with [`StoreError::Io`] on a read/write failure. The backing file is
    /// left untouched in every failure case.
    pub fn update(&self, id: &str, changes: &Changes) -> Result<Record, StoreError> {
        let mut records = self.read_all()?;

        // Only the first match is touched; ids are expected to be unique on
        // disk.
        let Some(index) = records.iter().position(|record| record.id == id) else {
            return Err(StoreError::NotFound);
        };

        let current = &records[index];
        let draft = Draft {
            id: current.id.clone(),
            name: changes.name.clone().unwrap_or_else(|| current.name.clone()),
            age: changes
                .age
                .clone()
                .unwrap_or_else(|| current.age.to_string()),
            grade: changes
                .grade
                .clone()
                .unwrap_or_else(|| current.grade.to_string()),
            marks: changes
                .marks
                .clone()
                .unwrap_or_else(|| current.marks.to_string()),
        };

        let record = draft.validate(&records, false)?;
        records[index] = record.clone();
        self.write_all(&records)?;

        tracing::info!("updated record {id}");
        Ok(record)
    }

    /// Removes the record with the given id.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] if no record matched (leaving the
    /// backing file untouched), or with [`StoreError::Io`] on a read/write
    /// failure.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.read_all()?;

        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound);
        }

        self.write_all(&records)?;

        tracing::info!("deleted record {id}");
        Ok(())
    }

    /// Finds records by exact id or case-insensitive name substring.
    ///
    /// Matches keep file order; an empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read.
    pub fn search(&self, query: &str) -> io::Result<Vec<Record>> {
        let needle = query.trim().to_lowercase();
        let records = self.read_all()?;

        Ok(records
            .into_iter()
            .filter(|record| record.id == needle || record.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Aggregates the full record set.
    ///
    /// Returns `Ok(None)` when the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read.
    pub fn analyze(&self) -> io::Result<Option<Stats>> {
        Ok(Stats::from_records(&self.read_all()?))
    }
}

/// Errors returned by the store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A field value failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// No stored record has the requested id.
    #[error("ID not found")]
    NotFound,

    /// The backing file could not be read or written.
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::Grade;

    fn setup_store() -> (TempDir, Store) {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let store = Store::new(tmp.path().join("students.txt"));
        (tmp, store)
    }

    fn draft(id: &str, name: &str, age: &str, grade: &str, marks: &str) -> Draft {
        Draft {
            id: id.to_string(),
            name: name.to_string(),
            age: age.to_string(),
            grade: grade.to_string(),
            marks: marks.to_string(),
        }
    }

    fn raw_file(store: &Store) -> String {
        fs::read_to_string(store.path()).expect("backing file should exist")
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_tmp, store) = setup_store();
        assert_eq!(store.read_all().unwrap(), Vec::new());
    }

    #[test]
    fn write_read_round_trip_preserves_order() {
        let (_tmp, store) = setup_store();
        let records = vec![
            Record {
                id: "2".to_string(),
                name: "Bob".to_string(),
                age: 22,
                grade: Grade::A,
                marks: 90,
            },
            Record {
                id: "1".to_string(),
                name: "Alice".to_string(),
                age: 20,
                grade: Grade::B,
                marks: 85,
            },
        ];

        store.write_all(&records).unwrap();

        assert_eq!(store.read_all().unwrap(), records);
        assert_eq!(raw_file(&store), "2,Bob,22,A,90\n1,Alice,20,B,85\n");
    }

    #[test]
    fn read_all_skips_malformed_lines() {
        let (_tmp, store) = setup_store();
        fs::write(
            store.path(),
            "1,Alice,20,B,85\nnot a record\n2,Bob,22,A\n3,Cara,23,Z,70\n4,Dan,24,C,61\n",
        )
        .unwrap();

        let records = store.read_all().unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn add_persists_and_normalizes() {
        let (_tmp, store) = setup_store();

        let record = store.add(&draft("1", "Alice", "20", "b", "85")).unwrap();

        assert_eq!(record.grade, Grade::B);
        assert_eq!(store.read_all().unwrap(), vec![record]);
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let (_tmp, store) = setup_store();
        store.add(&draft("1", "Alice", "20", "B", "85")).unwrap();
        let before = raw_file(&store);

        let error = store
            .add(&draft("1", "Bob", "22", "A", "90"))
            .unwrap_err();

        assert!(matches!(
            error,
            StoreError::Invalid(ValidationError::DuplicateId)
        ));
        assert_eq!(raw_file(&store), before);
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let (_tmp, store) = setup_store();
        store.add(&draft("1", "Alice", "20", "B", "85")).unwrap();
        store.add(&draft("2", "Bob", "22", "A", "90")).unwrap();

        let changes = Changes {
            name: Some("Alicia".to_string()),
            marks: Some("95".to_string()),
            ..Changes::default()
        };
        let updated = store.update("1", &changes).unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.age, 20);
        assert_eq!(updated.marks, 95);

        // Position in file order is preserved.
        let records = store.read_all().unwrap();
        assert_eq!(records[0], updated);
        assert_eq!(records[1].name, "Bob");
    }

    #[test]
    fn update_never_changes_the_id() {
        let (_tmp, store) = setup_store();
        store.add(&draft("7", "Alice", "20", "B", "85")).unwrap();

        let changes = Changes {
            name: Some("Bob".to_string()),
            age: Some("30".to_string()),
            grade: Some("a".to_string()),
            marks: Some("90".to_string()),
        };
        let updated = store.update("7", &changes).unwrap();

        assert_eq!(updated.id, "7");
        assert_eq!(store.read_all().unwrap()[0].id, "7");
    }

    #[test]
    fn update_rejects_invalid_replacement() {
        let (_tmp, store) = setup_store();
        store.add(&draft("1", "Alice", "20", "B", "85")).unwrap();
        let before = raw_file(&store);

        let changes = Changes {
            marks: Some("120".to_string()),
            ..Changes::default()
        };
        let error = store.update("1", &changes).unwrap_err();

        assert!(matches!(
            error,
            StoreError::Invalid(ValidationError::InvalidMarks)
        ));
        assert_eq!(raw_file(&store), before);
    }

    #[test]
    fn update_missing_id_fails_and_leaves_file_unchanged() {
        let (_tmp, store) = setup_store();
        store.add(&draft("1", "Alice", "20", "B", "85")).unwrap();
        let before = raw_file(&store);

        let error = store.update("9", &Changes::default()).unwrap_err();

        assert!(matches!(error, StoreError::NotFound));
        assert_eq!(raw_file(&store), before);
    }

    #[test]
    fn delete_removes_the_record() {
        let (_tmp, store) = setup_store();
        store.add(&draft("1", "Alice", "20", "B", "85")).unwrap();
        store.add(&draft("2", "Bob", "22", "A", "90")).unwrap();

        store.delete("1").unwrap();

        let ids: Vec<String> = store
            .read_all()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn delete_missing_id_fails_and_leaves_file_unchanged() {
        let (_tmp, store) = setup_store();
        store.add(&draft("1", "Alice", "20", "B", "85")).unwrap();
        let before = raw_file(&store);

        let error = store.delete("9").unwrap_err();

        assert!(matches!(error, StoreError::NotFound));
        assert_eq!(raw_file(&store), before);
    }

    #[test]
    fn search_matches_id_exactly_and_name_by_substring() {
        let (_tmp, store) = setup_store();
        store.add(&draft("1", "Alice", "20", "B", "85")).unwrap();
        store.add(&draft("2", "Bob", "22", "A", "90")).unwrap();

        let by_name = store.search("ali").unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Alice");

        let by_id = store.search("2").unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].name, "Bob");

        assert!(store.search("z").unwrap().is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let (_tmp, store) = setup_store();
        store.add(&draft("1", "Alice", "20", "B", "85")).unwrap();

        assert_eq!(store.search("ALICE").unwrap().len(), 1);
    }

    #[test]
    fn analyze_empty_store_is_none() {
        let (_tmp, store) = setup_store();
        assert!(store.analyze().unwrap().is_none());
    }

    #[test]
    fn add_and_analyze_scenario() {
        let (_tmp, store) = setup_store();

        let alice = store.add(&draft("1", "Alice", "20", "b", "85")).unwrap();
        assert_eq!(alice.grade, Grade::B);
        assert_eq!(alice.marks, 85);

        let error = store
            .add(&draft("1", "Bob", "22", "A", "90"))
            .unwrap_err();
        assert!(matches!(
            error,
            StoreError::Invalid(ValidationError::DuplicateId)
        ));

        store.add(&draft("2", "Bob", "22", "A", "90")).unwrap();

        let stats = store.analyze().unwrap().expect("store is not empty");
        assert!((stats.average - 87.5).abs() < f64::EPSILON);
        assert_eq!(stats.highest, 90);
        assert_eq!(stats.lowest, 85);
        assert_eq!(stats.top.len(), 1);
        assert_eq!(stats.top[0].name, "Bob");
        assert_eq!(stats.below_average, 1);
        assert_eq!(stats.pass_count, 2);
        assert_eq!(stats.fail_count, 0);
    }
}
