/*!
 * Project type profiles and marker-based detection
 */

use std::path::Path;

use once_cell::sync::Lazy;

use crate::utils::extension_of;

/// A named profile of recognized file extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectType {
    /// Display name
    pub name: String,
    /// Recognized extensions, lowercase, without the leading dot
    pub extensions: Vec<String>,
    /// Hallmark file whose presence at a root suggests this type
    pub marker: String,
}

impl ProjectType {
    /// Create a project type; extensions are normalized to lowercase
    pub fn new(name: &str, extensions: &[&str], marker: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            marker: marker.to_string(),
        }
    }

    /// Check whether an extension belongs to this profile (case-insensitive)
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Check whether a file name's extension belongs to this profile
    pub fn matches(&self, file_name: &str) -> bool {
        extension_of(file_name).map_or(false, |ext| self.has_extension(ext))
    }
}

/// Ordered, read-only table of project types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCatalog {
    types: Vec<ProjectType>,
}

impl ProjectCatalog {
    /// Create a catalog from an ordered list of types
    pub fn new(types: Vec<ProjectType>) -> Self {
        Self { types }
    }

    /// All project types in catalog order
    pub fn types(&self) -> &[ProjectType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ProjectType> {
        self.types.get(index)
    }

    /// Recognized extensions of the type at `index`
    pub fn extensions_for(&self, index: usize) -> Option<&[String]> {
        self.get(index).map(|t| t.extensions.as_slice())
    }

    /// Find a type by name, ignoring case
    pub fn position(&self, name: &str) -> Option<usize> {
        self.types
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Guess the project type of a directory from its hallmark files.
    ///
    /// Markers are checked in catalog order and the first one present wins,
    /// so a root holding both `build.gradle` and `package.json` is Android.
    /// Only existence is checked; file contents are never read.
    pub fn detect(&self, root: &Path) -> Option<usize> {
        let found = self
            .types
            .iter()
            .position(|t| root.join(&t.marker).exists());

        match found {
            Some(index) => log::debug!(
                "Detected project type {} for {}",
                self.types[index].name,
                root.display()
            ),
            None => log::debug!("No project type marker found in {}", root.display()),
        }

        found
    }
}

impl Default for ProjectCatalog {
    fn default() -> Self {
        BUILTIN_CATALOG.clone()
    }
}

/// Built-in catalog: Android, Web/Node.js, Python, C/C++, Go, Rust
pub static BUILTIN_CATALOG: Lazy<ProjectCatalog> = Lazy::new(|| {
    ProjectCatalog::new(vec![
        ProjectType::new(
            "Android",
            &["java", "kt", "kts", "xml", "gradle"],
            "build.gradle",
        ),
        ProjectType::new(
            "Web/Node.js",
            &["html", "css", "js", "jsx", "ts", "tsx", "json"],
            "package.json",
        ),
        ProjectType::new("Python", &["py", "pyw", "pyx", "pyd"], "requirements.txt"),
        ProjectType::new(
            "C/C++",
            &["c", "cpp", "h", "hpp", "cc"],
            "CMakeLists.txt",
        ),
        ProjectType::new("Go", &["go"], "go.mod"),
        ProjectType::new("Rust", &["rs"], "Cargo.toml"),
    ])
});
