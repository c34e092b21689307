/*!
 * Persistence of the last-used project directory
 *
 * The store is best effort: every I/O failure is logged and the caller
 * continues without persistence.
 */

use std::fs::{self, DirBuilder};
use std::io;
use std::path::{Path, PathBuf};

/// Directory name under the user's config dir
pub const CONFIG_DIR_NAME: &str = "codebase-exporter";
/// File holding the last directory, one newline-terminated line
pub const CONFIG_FILE_NAME: &str = "last_dir.txt";

/// Single-value store for the most recent project root
#[derive(Debug, Clone)]
pub struct RecentDirectoryStore {
    dir: PathBuf,
}

impl RecentDirectoryStore {
    /// Default per-user location, e.g. `~/.config/codebase-exporter`
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(CONFIG_DIR_NAME))
    }

    /// Open a store rooted at `dir`, creating it (mode 0700) if needed
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            create_private_dir(&dir)?;
            log::info!("Created config directory: {}", dir.display());
        }
        Ok(Self { dir })
    }

    /// Open the store at the default location; `None` if that fails
    pub fn open_default() -> Option<Self> {
        let Some(dir) = Self::default_dir() else {
            log::warn!("No config directory available, recent directory will not be saved");
            return None;
        };

        match Self::open(&dir) {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("Could not create config directory {}: {}", dir.display(), e);
                None
            }
        }
    }

    /// Path of the backing file
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// The stored directory, if it still exists as a directory.
    ///
    /// A stale entry is reported as `None` but left on disk.
    pub fn read(&self) -> Option<PathBuf> {
        let contents = match fs::read(self.file_path()) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Could not read {}: {}", self.file_path().display(), e);
                return None;
            }
        };

        let line = contents.split(|&b| b == b'\n').next().unwrap_or(&[]);
        if line.is_empty() {
            return None;
        }

        let path = path_from_bytes(line);
        if path.is_dir() {
            Some(path)
        } else {
            log::warn!(
                "Last directory '{}' from config not found or not a directory",
                path.display()
            );
            None
        }
    }

    /// Replace the stored directory; failures are logged
    pub fn write(&self, path: &Path) {
        let file = self.file_path();
        let mut line = path_to_bytes(path);
        line.push(b'\n');
        if let Err(e) = fs::write(&file, line) {
            log::warn!("Could not write {}: {}", file.display(), e);
        }
    }
}

// Paths are stored as raw bytes on unix so any directory name survives
#[cfg(unix)]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(bytes))
}

// Elsewhere only UTF-8 paths round-trip
#[cfg(not(unix))]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

fn create_private_dir(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}
