//! Staged file attachments and their bounded add/remove operations

use thiserror::Error;
use uuid::Uuid;

/// A file staged for upload along with its local preview handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Local preview handle, generated when the file is staged
    pub preview: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            preview: Uuid::new_v4(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }
}

/// Recoverable attachment failures; block the offending add only
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("cannot stage {attempted} more file(s): {staged} of {limit} slots used")]
    CountExceeded {
        staged: usize,
        attempted: usize,
        limit: usize,
    },
}

/// Append `incoming` to `staged`, rejecting the whole batch if it would push
/// the list past `limit`. On rejection nothing is appended.
pub(crate) fn stage_files(
    staged: &mut Vec<StagedFile>,
    incoming: Vec<StagedFile>,
    limit: usize,
) -> Result<(), AttachmentError> {
    if staged.len() + incoming.len() > limit {
        return Err(AttachmentError::CountExceeded {
            staged: staged.len(),
            attempted: incoming.len(),
            limit,
        });
    }
    staged.extend(incoming);
    Ok(())
}

/// Remove the entry at `index`; silent no-op when out of range.
pub(crate) fn remove_file(staged: &mut Vec<StagedFile>, index: usize) -> bool {
    if index < staged.len() {
        staged.remove(index);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> StagedFile {
        StagedFile::new(name, "image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_stage_within_limit() {
        let mut staged = vec![];
        assert!(stage_files(&mut staged, vec![file("a.png"), file("b.png")], 2).is_ok());
        assert_eq!(staged.len(), 2);
    }

    #[test]
    fn test_stage_over_limit_appends_nothing() {
        let mut staged = vec![file("a.png"), file("b.png")];
        let err = stage_files(&mut staged, vec![file("c.png")], 2).unwrap_err();
        assert_eq!(
            err,
            AttachmentError::CountExceeded {
                staged: 2,
                attempted: 1,
                limit: 2,
            }
        );
        assert_eq!(staged.len(), 2);
    }

    #[test]
    fn test_whole_batch_rejected_when_partial_fit() {
        let mut staged = vec![file("a.png")];
        assert!(stage_files(&mut staged, vec![file("b.png"), file("c.png")], 2).is_err());
        assert_eq!(staged.len(), 1);
    }

    #[test]
    fn test_remove_in_range() {
        let mut staged = vec![file("a.png"), file("b.png")];
        assert!(remove_file(&mut staged, 0));
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].file_name, "b.png");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut staged = vec![file("a.png")];
        assert!(!remove_file(&mut staged, 5));
        assert_eq!(staged.len(), 1);
    }

    #[test]
    fn test_preview_handles_are_unique() {
        let a = file("a.png");
        let b = file("a.png");
        assert_ne!(a.preview, b.preview);
    }
}
