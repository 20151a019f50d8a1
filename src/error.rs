//! Error types for paperfig operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in paperfig operations.
///
/// All validation errors are raised at construction time; only export can
/// fail for reasons outside the program (filesystem, encoder failures).
#[derive(Error, Debug)]
pub enum Error {
    /// A record's field set disagrees with its siblings, or an encoding
    /// references a field absent from the bound dataset.
    #[error("schema mismatch on field `{field}`: {detail}")]
    SchemaMismatch {
        /// The offending field name.
        field: String,
        /// What disagreed.
        detail: String,
    },

    /// An explicit category ordering is not a bijection with the distinct
    /// values present in the bound dataset.
    #[error(
        "ordering mismatch on field `{field}`: missing {missing:?}, extra {extra:?}"
    )]
    OrderingMismatch {
        /// The categorical field name.
        field: String,
        /// Categories present in the data but absent from the ordering.
        missing: Vec<String>,
        /// Ordering entries with no matching category in the data.
        extra: Vec<String>,
    },

    /// A mark kind was bound to an encoding missing a required channel.
    #[error("mark `{mark}` requires channel `{channel}`")]
    IncompatibleMark {
        /// The mark kind name.
        mark: String,
        /// The missing channel.
        channel: String,
    },

    /// Rendering or file-write failure during export, tagged with the
    /// figure name and target path. Fatal; no retry.
    #[error("export of figure `{figure}` to {} failed: {source}", path.display())]
    Export {
        /// Human-readable figure name.
        figure: String,
        /// The target file path.
        path: PathBuf,
        /// The underlying failure.
        source: Box<Error>,
    },

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// PDF document error.
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// Invalid dimensions for framebuffer or figure.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Scale domain error (e.g., degenerate domain).
    #[error("scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Rendering error.
    #[error("rendering error: {0}")]
    Rendering(String),
}
