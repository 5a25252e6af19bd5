//! Project store: one JSON document per persisted record.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use fieldbook_model::{ExistingRecords, FormType};

use crate::error::ImportError;
use crate::record::RecordDraft;

/// A project directory holding `Sessions/` and `People/` record documents.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    /// Open (creating if needed) a project directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ImportError> {
        let root = root.into();
        let store = Self { root };
        for form in [FormType::Session, FormType::Person] {
            let dir = store.form_dir(form);
            fs::create_dir_all(&dir).map_err(|source| ImportError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn form_dir(&self, form: FormType) -> PathBuf {
        match form {
            FormType::Session => self.root.join("Sessions"),
            FormType::Person => self.root.join("People"),
        }
    }

    /// Where a record with this identifier lives on disk.
    pub fn record_path(&self, form: FormType, id: &str) -> PathBuf {
        self.form_dir(form).join(format!("{}.json", sanitize(id)))
    }

    /// Case-insensitive existence check by record identifier.
    pub fn contains_record(&self, form: FormType, id: &str) -> bool {
        let wanted = format!("{}.json", sanitize(id)).to_lowercase();
        let Ok(entries) = fs::read_dir(self.form_dir(form)) else {
            return false;
        };
        entries
            .filter_map(Result::ok)
            .any(|entry| entry.file_name().to_string_lossy().to_lowercase() == wanted)
    }

    /// Persist a draft, replacing any record with the same identifier.
    pub fn save(&self, draft: &RecordDraft) -> Result<PathBuf, ImportError> {
        let path = self.record_path(draft.form, &draft.id);
        let json =
            serde_json::to_string_pretty(draft).map_err(|source| ImportError::Serialize {
                id: draft.id.clone(),
                source,
            })?;
        fs::write(&path, json).map_err(|source| ImportError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(id = %draft.id, path = %path.display(), "saved record");
        Ok(path)
    }
}

impl ExistingRecords for ProjectStore {
    fn contains(&self, form: FormType, id: &str) -> bool {
        self.contains_record(form, id)
    }
}

/// Make an identifier safe to use as a file name.
fn sanitize(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_path_characters() {
        assert_eq!(sanitize("take/one:two"), "take_one_two");
        assert_eq!(sanitize(" spaced "), "spaced");
        assert_eq!(sanitize("plain.mp3"), "plain.mp3");
    }
}
