//! Rewrite errors.

use gqls_core::DiagnosticBag;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid import pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{}: {} structural error(s) in shorthand", .path.display(), .diagnostics.error_count())]
    Structure {
        path: PathBuf,
        diagnostics: DiagnosticBag,
    },
}

impl RewriteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type RewriteResult<T> = Result<T, RewriteError>;
