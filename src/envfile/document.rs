//! In-memory env file document
//!
//! An `EnvDocument` is the ordered list of right-trimmed lines of one file,
//! loaded fully into memory. Merge mutates it in place; everything else only
//! reads it. Saving rewrites the whole file in a single pass.

use std::fs;
use std::io;
use std::path::Path;

use super::EnvFileError;

#[derive(Debug, Default, Clone)]
pub struct EnvDocument {
    lines: Vec<String>,
}

impl EnvDocument {
    /// Read a document from disk. Returns `Ok(None)` when the file does not
    /// exist; real I/O failures propagate.
    pub fn read(path: &Path) -> Result<Option<Self>, EnvFileError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(EnvFileError::Read { path: path.to_path_buf(), source: err }),
        };

        let lines = content.lines().map(|line| line.trim_end().to_string()).collect();
        Ok(Some(Self { lines }))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last_line_is_blank(&self) -> bool {
        self.lines.last().is_some_and(|line| line.is_empty())
    }

    pub fn replace_line(&mut self, index: usize, line: String) {
        self.lines[index] = line;
    }

    pub fn push_line(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Write every line back, each terminated by a single newline,
    /// overwriting the file completely.
    pub fn save(&self, path: &Path) -> Result<(), EnvFileError> {
        let mut content = String::new();
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(path, content)
            .map_err(|err| EnvFileError::Write { path: path.to_path_buf(), source: err })
    }
}
