use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::models::DayTimings;

pub fn load_timings(path: &Path) -> io::Result<DayTimings> {
    let text = fs::read_to_string(path)?;
    let day: DayTimings =
        serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(day)
}

// Each write gets its own temp file next to `path`, then is renamed over it,
// so concurrent saves never share a temp path.
pub fn save_timings(path: &Path, day: &DayTimings) -> io::Result<()> {
    let text = serde_json::to_string_pretty(day)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(text.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
