//! macOS application bundle generator.
//!
//! This library assembles a minimal `.app` bundle around an arbitrary
//! executable or shell command:
//! - directory scaffolding (`Contents/MacOS`, `Contents/Resources`, ...)
//! - launcher script and legacy `PkgInfo` marker
//! - binary `Info.plist` with a synthesized bundle identifier
//! - icon conversion to `.icns` via `sips`/`iconutil`/`qlmanage`
//! - code signing and verification via `codesign`
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;

// Re-export commonly used types
pub use bundler::error::{Error, ErrorCode, Result};
pub use bundler::settings::{BundleOptions, SignOptions};
