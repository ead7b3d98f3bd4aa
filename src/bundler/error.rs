//! Error types for bundle assembly.
//!
//! Every failure maps to exactly one [`ErrorCode`] used for the one-line
//! user-facing report. Errors carry the underlying detail (path, I/O error,
//! tool output) inside the variant instead of chaining causes.

use std::io;
use std::path::PathBuf;
use thiserror::Error as DeriveError;

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the bundle pipeline.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Command line arguments failed validation.
    #[error("{0}")]
    InvalidArguments(String),

    /// A directory in the bundle tree could not be created.
    #[error("creating {}: {source}", .path.display())]
    DirectoryCreation {
        /// Directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },

    /// `Info.plist` or the `PkgInfo` marker could not be generated.
    ///
    /// Always fatal: a bundle without its metadata file cannot launch.
    #[error("{}: {detail}", .path.display())]
    Metadata {
        /// File that could not be written
        path: PathBuf,
        /// Encoder or I/O failure description
        detail: String,
    },

    /// The launcher script could not be written or marked executable.
    #[error("{}: {source}", .path.display())]
    Script {
        /// Script path
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },

    /// Icon conversion failed. Non-fatal to the overall build.
    #[error("{0}")]
    IconConversion(String),

    /// Code signing or signature verification failed. Non-fatal to the
    /// overall build.
    #[error("{0}")]
    Signing(String),

    /// An input file (icon source, entitlements file) does not exist.
    #[error("{}", .0.display())]
    NotFound(PathBuf),

    /// An input or output path was not accessible.
    #[error("{}", .0.display())]
    PermissionDenied(PathBuf),
}

/// Closed taxonomy of user-facing failure codes.
///
/// Codes are never wrapped or chained; each [`Error`] maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No error.
    Success,
    /// Invalid command line arguments.
    InvalidArguments,
    /// Bundle directory tree could not be created.
    DirectoryCreationFailed,
    /// Info.plist or PkgInfo generation failed.
    MetadataGenerationFailed,
    /// Launcher script generation failed.
    ScriptGenerationFailed,
    /// Icon conversion failed (best-effort stage).
    IconConversionFailed,
    /// Code signing or verification failed (best-effort stage).
    CodeSigningFailed,
    /// A required input file was not found.
    FileNotFound,
    /// A path was not accessible.
    PermissionDenied,
}

impl ErrorCode {
    /// Fixed human-readable description used in the error report.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::InvalidArguments => "invalid arguments",
            ErrorCode::DirectoryCreationFailed => "directory creation failed",
            ErrorCode::MetadataGenerationFailed => "metadata generation failed",
            ErrorCode::ScriptGenerationFailed => "script generation failed",
            ErrorCode::IconConversionFailed => "icon conversion failed",
            ErrorCode::CodeSigningFailed => "code signing failed",
            ErrorCode::FileNotFound => "file not found",
            ErrorCode::PermissionDenied => "permission denied",
        }
    }
}

impl Error {
    /// The [`ErrorCode`] this error reports as.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidArguments(_) => ErrorCode::InvalidArguments,
            Error::DirectoryCreation { source, .. } => match source.kind() {
                io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
                _ => ErrorCode::DirectoryCreationFailed,
            },
            Error::Metadata { .. } => ErrorCode::MetadataGenerationFailed,
            Error::Script { .. } => ErrorCode::ScriptGenerationFailed,
            Error::IconConversion(_) => ErrorCode::IconConversionFailed,
            Error::Signing(_) => ErrorCode::CodeSigningFailed,
            Error::NotFound(_) => ErrorCode::FileNotFound,
            Error::PermissionDenied(_) => ErrorCode::PermissionDenied,
        }
    }

    /// One-line report in the `ERROR: <description> - <details>` form.
    pub fn report(&self) -> String {
        format!("ERROR: {} - {}", self.code().description(), self)
    }
}
