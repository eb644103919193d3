//! Upload validation for course content files.
//!
//! File storage itself is an external concern; the domain only validates the
//! declared file name and byte size against the per-kind extension and
//! ceiling before a content record is accepted.

/// Accepted extension for course videos.
pub const VIDEO_EXTENSION: &str = ".mp4";
/// Size ceiling for course videos.
pub const MAX_VIDEO_BYTES: i64 = 50 * 1024 * 1024;
/// Accepted extension for course documents.
pub const DOCUMENT_EXTENSION: &str = ".pdf";
/// Size ceiling for course documents.
pub const MAX_DOCUMENT_BYTES: i64 = 10 * 1024 * 1024;

/// The kind of content file being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// A course video (`.mp4`, up to 50 MiB).
    Video,
    /// A course document (`.pdf`, up to 10 MiB).
    Document,
}

impl UploadKind {
    /// The only accepted extension for this kind, lowercase with leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Video => VIDEO_EXTENSION,
            Self::Document => DOCUMENT_EXTENSION,
        }
    }

    /// Maximum accepted file size in bytes.
    pub fn max_bytes(self) -> i64 {
        match self {
            Self::Video => MAX_VIDEO_BYTES,
            Self::Document => MAX_DOCUMENT_BYTES,
        }
    }
}

/// Rejections produced by [`validate_upload`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    /// The file name does not end in the accepted extension.
    #[error("only {expected} files are allowed")]
    UnsupportedExtension {
        /// The extension this upload kind accepts.
        expected: &'static str,
    },
    /// The declared size exceeds the ceiling for the upload kind.
    #[error("file size must be at most {limit} bytes, got {size}")]
    TooLarge {
        /// Ceiling in bytes for the upload kind.
        limit: i64,
        /// Declared size in bytes.
        size: i64,
    },
}

/// Validate a declared upload against the kind's extension and size ceiling.
///
/// Extension matching is case-insensitive, so `VIDEO.MP4` passes.
///
/// # Examples
/// ```
/// use backend::domain::upload::{UploadKind, validate_upload};
///
/// assert!(validate_upload(UploadKind::Video, "intro.mp4", 10 * 1024 * 1024).is_ok());
/// assert!(validate_upload(UploadKind::Video, "intro.mov", 1024).is_err());
/// ```
pub fn validate_upload(
    kind: UploadKind,
    file_name: &str,
    file_size: i64,
) -> Result<(), UploadValidationError> {
    let lowered = file_name.to_lowercase();
    if !lowered.ends_with(kind.extension()) {
        return Err(UploadValidationError::UnsupportedExtension {
            expected: kind.extension(),
        });
    }
    if file_size > kind.max_bytes() {
        return Err(UploadValidationError::TooLarge {
            limit: kind.max_bytes(),
            size: file_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MIB: i64 = 1024 * 1024;

    #[rstest]
    #[case(UploadKind::Video, "lecture.mp4", 10 * MIB)]
    #[case(UploadKind::Video, "LECTURE.MP4", 50 * MIB)]
    #[case(UploadKind::Document, "notes.pdf", 10 * MIB)]
    fn accepts_matching_extension_within_ceiling(
        #[case] kind: UploadKind,
        #[case] file_name: &str,
        #[case] file_size: i64,
    ) {
        assert_eq!(validate_upload(kind, file_name, file_size), Ok(()));
    }

    #[rstest]
    #[case(UploadKind::Video, "lecture.mov", 1)]
    #[case(UploadKind::Video, "lecture.mov", 100 * MIB)]
    #[case(UploadKind::Document, "notes.docx", 1)]
    #[case(UploadKind::Document, "notes", 1)]
    fn rejects_wrong_extension_at_any_size(
        #[case] kind: UploadKind,
        #[case] file_name: &str,
        #[case] file_size: i64,
    ) {
        let err = validate_upload(kind, file_name, file_size).expect_err("extension rejected");
        assert!(matches!(err, UploadValidationError::UnsupportedExtension { .. }));
    }

    #[rstest]
    #[case(UploadKind::Video, "lecture.mp4", 60 * MIB)]
    #[case(UploadKind::Document, "notes.pdf", 11 * MIB)]
    fn rejects_oversized_files(
        #[case] kind: UploadKind,
        #[case] file_name: &str,
        #[case] file_size: i64,
    ) {
        let err = validate_upload(kind, file_name, file_size).expect_err("size rejected");
        assert!(matches!(err, UploadValidationError::TooLarge { .. }));
    }

    #[test]
    fn ceiling_is_inclusive() {
        assert_eq!(
            validate_upload(UploadKind::Video, "edge.mp4", MAX_VIDEO_BYTES),
            Ok(())
        );
    }
}
