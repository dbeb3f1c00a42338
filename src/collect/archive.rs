// src/collect/archive.rs

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::file::{ensure_directory, region_archive_path};

/// Streams case bodies into a JSON array as they arrive: `[`, bodies with a
/// comma only between them, `]`. Nothing is buffered beyond the writer.
pub struct ArchiveWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> ArchiveWriter<W> {
    pub fn begin(mut out: W) -> io::Result<Self> {
        out.write_all(b"[")?;
        Ok(Self { out, written: 0 })
    }

    /// Append one raw JSON body verbatim.
    pub fn push(&mut self, raw: &str) -> io::Result<()> {
        if self.written > 0 {
            self.out.write_all(b",")?;
        }
        self.out.write_all(raw.trim().as_bytes())?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize { self.written }

    /// Close the array and flush. Returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.write_all(b"]")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Create (or truncate) the staged archive for `region` under `dir`.
pub fn open_region_archive(dir: &Path, region: &str)
    -> Result<(PathBuf, ArchiveWriter<BufWriter<File>>)>
{
    ensure_directory(dir)?;
    let path = region_archive_path(dir, region);
    let file = File::create(&path)?;
    let writer = ArchiveWriter::begin(BufWriter::new(file))?;
    Ok((path, writer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn archive(bodies: &[&str]) -> String {
        let mut w = ArchiveWriter::begin(Vec::new()).unwrap();
        for b in bodies {
            w.push(b).unwrap();
        }
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn commas_only_between_records() {
        assert_eq!(archive(&[]), "[]");
        assert_eq!(archive(&[r#"{"id":1}"#]), r#"[{"id":1}]"#);
        assert_eq!(archive(&[r#"{"id":1}"#, "{\"id\":2}\n"]), r#"[{"id":1},{"id":2}]"#);
    }

    #[test]
    fn output_parses_back_as_array() {
        let text = archive(&[r#"{"a":[1,2]}"#, r#"{"b":"x, y"}"#, "{}"]);
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v.as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn region_archive_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let stage = dir.path().join("stage");

        let (path, mut w) = open_region_archive(&stage, "New York").unwrap();
        w.push(r#"{"id":1}"#).unwrap();
        w.push(r#"{"id":2}"#).unwrap();
        w.finish().unwrap();
        assert!(path.ends_with("New_York.json"));

        let (path, w) = open_region_archive(&stage, "New York").unwrap();
        w.finish().unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
