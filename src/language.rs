//! Source language registry
//!
//! Maps language identifiers and file extensions onto the closed set of
//! languages a parser exists for.

use std::fmt;
use std::path::Path;

use crate::error::{Result, SkeletonError};

/// Languages with a skeleton parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
}

impl Language {
    /// Every supported language, in registry order.
    pub const ALL: &'static [Language] = &[Language::Python];

    /// Look up a language by its command-line identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use skeleton::language::Language;
    ///
    /// assert_eq!(Language::from_id("python").unwrap(), Language::Python);
    /// assert_eq!(Language::from_id("Python").unwrap(), Language::Python);
    /// assert!(Language::from_id("cobol").is_err());
    /// ```
    pub fn from_id(id: &str) -> Result<Self> {
        let needle = id.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.id() == needle)
            .ok_or_else(|| SkeletonError::UnsupportedLanguage(id.to_string()))
    }

    /// Detect language from a file extension. Matching is exact: stubs
    /// (`pyi`) and upper-case variants are not source files.
    ///
    /// # Examples
    ///
    /// ```
    /// use skeleton::language::Language;
    ///
    /// assert_eq!(Language::from_extension("py"), Some(Language::Python));
    /// assert_eq!(Language::from_extension("pyi"), None);
    /// assert_eq!(Language::from_extension("rs"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "py" => Some(Language::Python),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Whether `path` carries one of this language's source extensions.
    pub fn matches_path(&self, path: &Path) -> bool {
        Self::from_path(path) == Some(*self)
    }

    /// Command-line identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Language::Python => "python",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
