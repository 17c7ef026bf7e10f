// src/index/reader.rs

//! Read-only access to the local package index
//!
//! The index is a flat file with one JSON package record per line and no
//! offset table, so lookup by name is a forward scan. [`IndexReader`] keeps
//! two things to make repeated lookups cheap: a cache of every record it
//! has parsed so far, and the byte offset just past the last matched line.
//! A miss resumes scanning from that offset instead of the start, which
//! amortizes well when names arrive in roughly index order (dependency
//! closures usually do). Every scan caches all records it passes over, so
//! the cache plus the unscanned tail always cover the whole file.

use crate::error::{Error, Result};
use crate::index::record::PackageRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::PathBuf;

/// Accessor over one index snapshot, constructed fresh per invocation
#[derive(Debug)]
pub struct IndexReader {
    path: PathBuf,
    cache: HashMap<String, PackageRecord>,
    /// Byte offset just past the last line that satisfied a lookup
    resume_offset: u64,
    /// Line count corresponding to `resume_offset`, for parse diagnostics
    resume_line: usize,
}

impl IndexReader {
    /// Open the index at `path`, failing if no snapshot exists there
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(Error::IndexUnavailable(path.display().to_string()));
        }
        Ok(Self {
            path,
            cache: HashMap::new(),
            resume_offset: 0,
            resume_line: 0,
        })
    }

    /// Look up one package by exact name
    ///
    /// Returns `Ok(None)` when no record with that name exists; the caller
    /// decides whether that is fatal (explicit request) or a tolerated gap
    /// (transitive dependency of a stale index).
    pub fn lookup(&mut self, name: &str) -> Result<Option<PackageRecord>> {
        if let Some(record) = self.cache.get(name) {
            return Ok(Some(record.clone()));
        }

        let file = self.open_file()?;
        let mut reader = BufReader::new(file);
        reader
            .seek(SeekFrom::Start(self.resume_offset))
            .map_err(|e| Error::Io(format!("failed to seek package index: {e}")))?;

        let mut pos = self.resume_offset;
        let mut line_no = self.resume_line;
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = reader
                .read_line(&mut buf)
                .map_err(|e| Error::Io(format!("failed to read package index: {e}")))?;
            if read == 0 {
                // Exhausted the tail; the offset stays put so the records
                // scanned here are served from the cache from now on.
                return Ok(None);
            }
            pos += read as u64;
            line_no += 1;

            let line = buf.trim();
            if line.is_empty() {
                continue;
            }
            let record = parse_record(line, line_no)?;
            if record.name == name {
                self.resume_offset = pos;
                self.resume_line = line_no;
                self.cache.insert(record.name.clone(), record.clone());
                return Ok(Some(record));
            }
            self.cache.insert(record.name.clone(), record);
        }
    }

    /// Single forward pass over every record in the index
    ///
    /// Reopens the file, so it is restartable and independent of the
    /// resume offset. Records are cached as a side effect.
    pub fn scan_all(&mut self) -> Result<IndexScan<'_>> {
        let file = self.open_file()?;
        Ok(IndexScan {
            reader: BufReader::new(file),
            cache: &mut self.cache,
            line_no: 0,
            buf: String::new(),
        })
    }

    fn open_file(&self) -> Result<File> {
        File::open(&self.path).map_err(|_| Error::IndexUnavailable(self.path.display().to_string()))
    }
}

fn parse_record(line: &str, line_no: usize) -> Result<PackageRecord> {
    serde_json::from_str(line).map_err(|e| Error::IndexParse {
        line: line_no,
        detail: e.to_string(),
    })
}

/// Lazy iterator over all index records, yielded in file order
pub struct IndexScan<'a> {
    reader: BufReader<File>,
    cache: &'a mut HashMap<String, PackageRecord>,
    line_no: usize,
    buf: String,
}

impl Iterator for IndexScan<'_> {
    type Item = Result<PackageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    return Some(Err(Error::Io(format!("failed to read package index: {e}"))));
                }
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            let result = parse_record(line, self.line_no);
            if let Ok(record) = &result {
                self.cache.insert(record.name.clone(), record.clone());
            }
            return Some(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn record_line(name: &str, version: &str, size: u64, deps: &[&str]) -> String {
        let deps_json: Vec<String> = deps
            .iter()
            .map(|d| format!(r#""{d}":{{"origin":"misc/{d}","version":"1.0"}}"#))
            .collect();
        format!(
            r#"{{"name":"{name}","version":"{version}","pkgsize":{size},"deps":{{{}}}}}"#,
            deps_json.join(",")
        )
    }

    fn write_index(dir: &TempDir, lines: &[String]) -> PathBuf {
        let path = dir.path().join("pkgdb.yaml");
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn test_open_missing_index() {
        let dir = TempDir::new().unwrap();
        let result = IndexReader::open(dir.path().join("pkgdb.yaml"));
        assert!(matches!(result, Err(Error::IndexUnavailable(_))));
    }

    #[test]
    fn test_lookup_found_and_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_index(
            &dir,
            &[
                record_line("alpha", "1.0", 100, &[]),
                record_line("beta", "2.0", 50, &[]),
            ],
        );
        let mut reader = IndexReader::open(path).unwrap();

        let beta = reader.lookup("beta").unwrap().unwrap();
        assert_eq!(beta.version, "2.0");
        assert_eq!(beta.pkgsize, 50);

        assert!(reader.lookup("gamma").unwrap().is_none());
    }

    #[test]
    fn test_scan_warms_cache() {
        let dir = TempDir::new().unwrap();
        let path = write_index(
            &dir,
            &[
                record_line("alpha", "1.0", 100, &[]),
                record_line("beta", "2.0", 50, &[]),
            ],
        );
        let mut reader = IndexReader::open(&path).unwrap();

        // Scanning to "beta" passes over "alpha" and caches it
        reader.lookup("beta").unwrap().unwrap();
        std::fs::remove_file(&path).unwrap();
        let alpha = reader.lookup("alpha").unwrap().unwrap();
        assert_eq!(alpha.pkgsize, 100);
    }

    #[test]
    fn test_miss_does_not_advance_offset() {
        let dir = TempDir::new().unwrap();
        let path = write_index(
            &dir,
            &[
                record_line("alpha", "1.0", 100, &[]),
                record_line("beta", "2.0", 50, &[]),
                record_line("gamma", "3.0", 25, &[]),
            ],
        );
        let mut reader = IndexReader::open(&path).unwrap();

        reader.lookup("alpha").unwrap().unwrap();
        // A failed lookup scans the tail without moving the offset...
        assert!(reader.lookup("zzz").unwrap().is_none());
        // ...but still caches everything it passed over
        std::fs::remove_file(&path).unwrap();
        assert_eq!(reader.lookup("beta").unwrap().unwrap().pkgsize, 50);
        assert_eq!(reader.lookup("gamma").unwrap().unwrap().pkgsize, 25);
    }

    #[test]
    fn test_malformed_line_is_reported_with_position() {
        let dir = TempDir::new().unwrap();
        let path = write_index(
            &dir,
            &[
                record_line("alpha", "1.0", 100, &[]),
                "{not json".to_string(),
            ],
        );
        let mut reader = IndexReader::open(path).unwrap();

        let err = reader.lookup("missing").unwrap_err();
        match err {
            Error::IndexParse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected IndexParse, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = write_index(
            &dir,
            &[
                record_line("alpha", "1.0", 100, &[]),
                String::new(),
                record_line("beta", "2.0", 50, &[]),
            ],
        );
        let mut reader = IndexReader::open(path).unwrap();
        assert!(reader.lookup("beta").unwrap().is_some());
    }

    #[test]
    fn test_scan_all_yields_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_index(
            &dir,
            &[
                record_line("zsh", "5.9", 10, &[]),
                record_line("bash", "5.2", 20, &[]),
            ],
        );
        let mut reader = IndexReader::open(&path).unwrap();

        let names: Vec<String> = reader
            .scan_all()
            .unwrap()
            .map(|r| r.unwrap().name)
            .collect();
        assert_eq!(names, ["zsh", "bash"]);

        // Scan side effect: every record is now cached
        std::fs::remove_file(&path).unwrap();
        assert!(reader.lookup("zsh").unwrap().is_some());
        assert!(reader.lookup("bash").unwrap().is_some());
    }
}
