use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter};
use std::path::Path;
use log::{info, warn};
use crate::error::{MotError, Result};
use crate::services::dictionary::{DictionaryIndex, IndexBuilder};
use crate::utils::record_word;

/// Inclusive, 1-indexed slice of a seed file. `0` leaves a side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, line_no: usize) -> bool {
        (self.start == 0 || line_no >= self.start) && (self.end == 0 || line_no <= self.end)
    }

    fn past_end(&self, line_no: usize) -> bool {
        self.end != 0 && line_no > self.end
    }
}

/// Decode one raw seed line. Seeds are UTF-8; lines that are not are read
/// as Latin-1, which older unmunched French lists still use.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(line) => line.to_string(),
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}

/// Build an index from raw seed records read from `reader`.
/// Lines outside `range` are never decoded nor normalized. `origin` names
/// the source in errors; only I/O failures abort the build.
pub fn build_index_from_reader<R: BufRead>(
    reader: R,
    range: LineRange,
    origin: &Path,
) -> Result<DictionaryIndex> {
    let mut builder = IndexBuilder::new();

    for (i, raw) in reader.split(b'\n').enumerate() {
        let line_no = i + 1;
        if range.past_end(line_no) {
            break;
        }
        let raw = raw.map_err(|source| MotError::SourceUnreadable {
            path: origin.to_path_buf(),
            source,
        })?;
        if !range.contains(line_no) {
            continue;
        }

        let line = decode_line(&raw);
        match record_word(&line) {
            Some(word) => builder.add_line(word),
            None => builder.reject_line(),
        }
    }

    let index = builder.build();
    let stats = index.stats();
    if stats.rejected > 0 {
        warn!("Dropped {} malformed entries from {}", stats.rejected, origin.display());
    }
    info!(
        "Indexed {} words in {} buckets from {} ({} lines, {} duplicates)",
        index.word_count(),
        index.bucket_count(),
        origin.display(),
        stats.lines_read,
        stats.duplicates
    );
    Ok(index)
}

/// Build an index from a seed file on disk
pub fn build_index<P: AsRef<Path>>(path: P, range: LineRange) -> Result<DictionaryIndex> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MotError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    build_index_from_reader(io::BufReader::new(file), range, path)
}

/// Load a flat dictionary previously written by `save_flat`
pub fn load_flat<P: AsRef<Path>>(path: P) -> Result<DictionaryIndex> {
    build_index(path, LineRange::all())
}

/// Persist an index as a flat word list
pub fn save_flat<P: AsRef<Path>>(index: &DictionaryIndex, path: P) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(path)?;
    index.write_flat(BufWriter::new(file))?;
    info!("Saved {} words to {}", index.word_count(), path.display());
    Ok(())
}
