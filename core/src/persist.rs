use crate::error::{IndexError, Result};
use crate::IndexDocument;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "index".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

/// Write the index as pretty JSON. The new file replaces the old one by rename,
/// so readers see either the previous index or the complete new one.
pub fn save_index(path: &Path, doc: &IndexDocument) -> Result<()> {
    let serialization = |source: io::Error| IndexError::Serialization { path: path.to_path_buf(), source };

    let json = serde_json::to_vec_pretty(doc).map_err(|e| serialization(e.into()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(serialization)?;
    }

    let tmp = temp_path(path);
    if let Err(err) = write_file(&tmp, &json).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(serialization(err));
    }
    Ok(())
}

pub fn load_index(path: &Path) -> Result<IndexDocument> {
    let buf = fs::read_to_string(path)
        .map_err(|e| IndexError::FileRead { path: path.to_path_buf(), reason: e.to_string() })?;
    serde_json::from_str(&buf).map_err(|source| IndexError::Parse { path: path.to_path_buf(), source })
}
