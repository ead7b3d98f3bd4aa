//! Bundle assembly pipeline.
//!
//! The pipeline for one invocation is sequenced by [`app::build_bundle`]:
//! scaffold the directory tree, write the launcher script, the `PkgInfo`
//! marker and `Info.plist`, then run the best-effort icon and signing
//! stages on top of the already-valid bundle.
//!
//! # Module Organization
//!
//! - [`settings`] - per-invocation options ([`BundleOptions`], [`SignOptions`])
//! - [`paths`] - bundle directory layout and idempotent scaffolding
//! - [`app`] - orchestration of one bundle build
//! - [`info_plist`] - `Info.plist` generation and identifier synthesis
//! - [`launcher`] - launcher script and `PkgInfo` marker
//! - [`icon`] - icon format detection and `.icns` conversion
//! - [`entitlements`] - entitlements plist generation
//! - [`sign`] - `codesign` integration
//! - [`process`] - bounded external tool invocation

#![allow(dead_code)] // Public API - items may be used by external consumers

pub mod app;
pub mod entitlements;
pub mod error;
pub mod icon;
pub mod info_plist;
pub mod launcher;
pub mod paths;
pub mod process;
pub mod settings;
pub mod sign;

pub use app::build_bundle;
pub use error::{Error, ErrorCode, Result};
pub use settings::{BundleOptions, SignOptions};
