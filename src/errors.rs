/*!
 * Error types for the subforge library.
 *
 * Every codec, model and dispatcher operation reports failures through
 * `SubtitleError`, defined with the thiserror crate.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while decoding, validating or dispatching subtitles
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Malformed duration or color text
    #[error("Invalid {context}: '{token}'")]
    Format {
        /// The offending substring
        token: String,
        /// What was being parsed (e.g. "milliseconds", "color in base 16")
        context: String,
    },

    /// The file extension has no registered adapter
    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    /// Opening or creating a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file being opened or created
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to an adapter stream failed
    #[error("Stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// Attempt to serialize a document without items
    #[error("No subtitles to write")]
    EmptyDocument,

    /// A style or region inheritance chain loops back on itself
    #[error("Style inheritance cycle detected at '{0}'")]
    StyleCycle(String),

    /// A reference to a style id missing from the document
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// A reference to a region id missing from the document
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// Adapter-level syntax error
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the source
        line: usize,
        /// What went wrong
        message: String,
    },
}

impl SubtitleError {
    /// Build a format error for a token and the context it was parsed in
    pub fn format(token: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Format {
            token: token.into(),
            context: context.into(),
        }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SubtitleError>;
