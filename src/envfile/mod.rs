//! KEY=VALUE environment file handling
//!
//! Two operations over two file styles: merging values from an old file into a
//! new one without clobbering anything already set, and validating that a
//! required set of keys exists and is non-empty.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod document;
pub mod merge;
pub mod parse;
pub mod validate;

pub use document::EnvDocument;
pub use merge::{merge_files, MergeSummary};
pub use parse::{parse_assignment, parse_lookup, Assignment};
pub use validate::{check_file, FileReport, KeyReport, KeyStatus};

/// Which flavor of env file a line belongs to.
///
/// `Export` files (`env.sh`) carry an `export ` prefix on assignments that is
/// stripped for key/value extraction and re-attached on output. `Plain` files
/// (`.env`) treat an `export FOO=1` line as unrecognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStyle {
    Plain,
    Export,
}

/// Errors surfaced by the envfile operations.
///
/// Missing files are deliberately NOT errors here: a missing old file makes
/// merge a no-op, a missing new file is an empty document, and a missing
/// validate target is reported per key in the `FileReport`.
#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
