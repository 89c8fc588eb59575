//! Where rendered configurations go.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extension of written configuration files.
pub const CONFIG_EXTENSION: &str = "conf";

/// Destination of a rendered configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output.
    #[default]
    Stdout,
    /// `<dir>/<module>.conf`.
    Directory(PathBuf),
}

/// Error writing a configuration.
#[derive(Debug)]
pub enum OutputError {
    /// The output file could not be created.
    Create {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// Writing failed.
    Write {
        /// File path, `None` for standard output.
        path: Option<PathBuf>,
        /// Underlying error.
        source: io::Error,
    },
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { path, source } => {
                write!(f, "creating config file {} failed: {source}", path.display())
            }
            Self::Write {
                path: Some(path),
                source,
            } => write!(f, "writing {} failed: {source}", path.display()),
            Self::Write { path: None, source } => write!(f, "writing to stdout failed: {source}"),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Create { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

impl OutputTarget {
    /// File written for `module`, if this target writes files.
    #[must_use]
    pub fn path_for(&self, module: &str) -> Option<PathBuf> {
        match self {
            Self::Stdout => None,
            Self::Directory(dir) => Some(dir.join(format!("{module}.{CONFIG_EXTENSION}"))),
        }
    }

    /// Write the configuration rendered for `module`.
    ///
    /// Returns the path of the written file, `None` for standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write(&self, module: &str, text: &str) -> Result<Option<PathBuf>, OutputError> {
        match self.path_for(module) {
            None => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(|source| OutputError::Write { path: None, source })?;
                Ok(None)
            }
            Some(path) => {
                write_file(&path, text)?;
                Ok(Some(path))
            }
        }
    }
}

fn write_file(path: &Path, text: &str) -> Result<(), OutputError> {
    let mut file = fs::File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(text.as_bytes())
        .map_err(|source| OutputError::Write {
            path: Some(path.to_path_buf()),
            source,
        })
}
