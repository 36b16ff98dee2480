//! Merge operation
//!
//! Propagates values from an old env file into a new one. Values already set
//! in the new file win, empty values are filled in place, and keys the new
//! file lacks are appended under a delimiting comment header. Untouched lines
//! keep their original text and order.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::document::EnvDocument;
use super::parse::parse_assignment;
use super::{EnvFileError, FileStyle};

/// Keys the merge touched, in encounter order. The rewritten file is the
/// authoritative outcome; this exists for logging and tests.
#[derive(Debug, Default)]
pub struct MergeSummary {
    /// Keys whose empty value in the new file was filled from the old file.
    pub updated: Vec<String>,
    /// Keys absent from the new file, appended under the added-variables header.
    pub appended: Vec<String>,
}

impl MergeSummary {
    pub fn changed(&self) -> bool {
        !self.updated.is_empty() || !self.appended.is_empty()
    }
}

/// Where a key lives in the new document.
///
/// `index` is `None` for keys staged for appending this run. `defined` is not
/// flipped when an empty value gets overwritten, so a later non-empty
/// duplicate in the old file rewrites the same line again (last occurrence in
/// the old file wins on that path).
struct KeySlot {
    index: Option<usize>,
    defined: bool,
}

/// Merge `old_path` into `new_path` in place.
///
/// A missing old file makes the whole operation a silent no-op. A missing new
/// file is treated as an empty document and created on write.
pub fn merge_files(
    old_path: &Path,
    new_path: &Path,
    style: FileStyle,
) -> Result<MergeSummary, EnvFileError> {
    let Some(old_doc) = EnvDocument::read(old_path)? else {
        debug!(old = %old_path.display(), "old file missing, nothing to merge");
        return Ok(MergeSummary::default());
    };

    let mut new_doc = EnvDocument::read(new_path)?.unwrap_or_default();

    // Last occurrence wins on duplicate keys; only the slot-indexed line is
    // ever rewritten.
    let mut slots: HashMap<String, KeySlot> = HashMap::new();
    for (index, line) in new_doc.lines().iter().enumerate() {
        if let Some(assignment) = parse_assignment(line, style) {
            let defined = assignment.is_set();
            slots.insert(assignment.key, KeySlot { index: Some(index), defined });
        }
    }

    let mut summary = MergeSummary::default();
    let mut staged: Vec<String> = Vec::new();

    for line in old_doc.lines() {
        let Some(assignment) = parse_assignment(line, style) else { continue };
        if !assignment.is_set() {
            continue;
        }

        match slots.get(&assignment.key) {
            Some(slot) if slot.defined => {}
            Some(slot) => {
                if let Some(index) = slot.index {
                    new_doc.replace_line(index, assignment.rendered.clone());
                    if !summary.updated.contains(&assignment.key) {
                        summary.updated.push(assignment.key.clone());
                    }
                }
            }
            None => {
                staged.push(line.clone());
                summary.appended.push(assignment.key.clone());
                slots.insert(assignment.key, KeySlot { index: None, defined: true });
            }
        }
    }

    if !staged.is_empty() {
        if !new_doc.is_empty() && !new_doc.last_line_is_blank() {
            new_doc.push_line(String::new());
        }
        new_doc.push_line(format!("# --- Variables Added from {} ---", old_path.display()));
        for line in staged {
            new_doc.push_line(line);
        }
    }

    new_doc.save(new_path)?;
    Ok(summary)
}
