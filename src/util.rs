use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{BinError, Result};

/// Reduces a user-supplied name to its base file name, so `install ../foo`
/// and `install foo` target the same entry.
pub fn base_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Checks if a given path is an executable file on Unix.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Checks if a given path has a Windows executable extension (.exe, .bat, .cmd).
#[cfg(windows)]
pub fn is_executable(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        let ext = ext.to_ascii_lowercase();
        matches!(ext.as_str(), "exe" | "bat" | "cmd")
    } else {
        false
    }
}

/// Marks a file executable (owner/group/other).
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| BinError::local_io(path, e))
}

#[cfg(windows)]
pub fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Copies `src` to `dst` and sets the executable bit on the copy.
/// The source is left in place.
pub fn copy_executable(src: &Path, dst: &Path) -> Result<()> {
    std::fs::copy(src, dst).map_err(|e| BinError::local_io(dst, e))?;
    set_executable(dst)
}

/// SHA-256 hex digest of a file's contents, streamed in chunks.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path).map_err(|e| BinError::local_io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).map_err(|e| BinError::local_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Lists the plain files in a directory by name. Missing directory reads as empty.
pub fn list_dir_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir).map_err(|e| BinError::local_io(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BinError::local_io(dir, e))?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Terminal width for truncation, from `COLUMNS` with an 80-column fallback.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .unwrap_or(80)
}

/// Shortens a line to `width` characters, ending in `...` when cut.
pub fn truncate_line(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }
    let keep = width.saturating_sub(3);
    let cut: String = line.chars().take(keep).collect();
    format!("{cut}...")
}

/// Full path a binary would be installed at.
pub fn install_path(install_dir: &Path, name: &str) -> PathBuf {
    install_dir.join(base_name(name))
}
