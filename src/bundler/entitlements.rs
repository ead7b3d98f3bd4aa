//! Entitlements plist generation for hardened-runtime signing.
//!
//! Entitlements must be serialized in the text (XML) plist encoding;
//! `codesign` rejects the compact binary form used for `Info.plist`.

use std::path::Path;

use plist::{Dictionary, Value};

use crate::bundler::error::{Error, Result};

const ALLOW_JIT: &str = "com.apple.security.cs.allow-jit";
const ALLOW_UNSIGNED_MEMORY: &str = "com.apple.security.cs.allow-unsigned-executable-memory";
const ALLOW_DYLD_VARS: &str = "com.apple.security.cs.allow-dyld-environment-variables";
const DISABLE_LIBRARY_VALIDATION: &str = "com.apple.security.cs.disable-library-validation";
const PLACEHOLDER: &str = "com.apple.security.get-task-allow";

/// Builds the entitlements dictionary.
///
/// Under the hardened runtime each exception key is included only when its
/// flag is set; library validation is always disabled so the unsigned
/// launcher script stays loadable. An otherwise-empty document gets one
/// harmless placeholder grant, since some signing tools reject an empty
/// entitlements file.
pub fn build_entitlements(
    hardened_runtime: bool,
    allow_jit: bool,
    allow_unsigned_memory: bool,
    allow_dyld_vars: bool,
) -> Dictionary {
    let mut dict = Dictionary::new();

    if hardened_runtime {
        if allow_jit {
            dict.insert(ALLOW_JIT.into(), true.into());
        }
        if allow_unsigned_memory {
            dict.insert(ALLOW_UNSIGNED_MEMORY.into(), true.into());
        }
        if allow_dyld_vars {
            dict.insert(ALLOW_DYLD_VARS.into(), true.into());
        }
        dict.insert(DISABLE_LIBRARY_VALIDATION.into(), true.into());
    }

    if dict.is_empty() {
        dict.insert(PLACEHOLDER.into(), true.into());
    }

    dict
}

/// Writes the entitlements document in XML encoding to `path`.
pub async fn write_entitlements(
    path: &Path,
    hardened_runtime: bool,
    allow_jit: bool,
    allow_unsigned_memory: bool,
    allow_dyld_vars: bool,
) -> Result<()> {
    let dict = build_entitlements(
        hardened_runtime,
        allow_jit,
        allow_unsigned_memory,
        allow_dyld_vars,
    );
    log::debug!("writing entitlements at {}", path.display());

    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || Value::Dictionary(dict).to_file_xml(&target))
        .await
        .map_err(|e| Error::Signing(format!("entitlements task failed: {e}")))?
        .map_err(|e| Error::Signing(format!("writing entitlements: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hardened_runtime_yields_placeholder_only() {
        let dict = build_entitlements(false, false, false, false);
        assert_eq!(dict.len(), 1);
        assert_eq!(
            dict.get(PLACEHOLDER).and_then(Value::as_boolean),
            Some(true)
        );
    }

    #[test]
    fn exception_flags_are_ignored_without_hardened_runtime() {
        let dict = build_entitlements(false, true, true, true);
        assert_eq!(dict.len(), 1);
        assert!(dict.get(ALLOW_JIT).is_none());
    }

    #[test]
    fn hardened_with_jit_only() {
        let dict = build_entitlements(true, true, false, false);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get(ALLOW_JIT).and_then(Value::as_boolean), Some(true));
        assert_eq!(
            dict.get(DISABLE_LIBRARY_VALIDATION).and_then(Value::as_boolean),
            Some(true)
        );
        assert!(dict.get(ALLOW_UNSIGNED_MEMORY).is_none());
        assert!(dict.get(ALLOW_DYLD_VARS).is_none());
        assert!(dict.get(PLACEHOLDER).is_none());
    }

    #[test]
    fn hardened_without_exceptions_still_disables_library_validation() {
        let dict = build_entitlements(true, false, false, false);
        assert_eq!(dict.len(), 1);
        assert_eq!(
            dict.get(DISABLE_LIBRARY_VALIDATION).and_then(Value::as_boolean),
            Some(true)
        );
    }

    #[tokio::test]
    async fn written_document_is_text_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entitlements.plist");
        write_entitlements(&path, true, true, true, true).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("<?xml"));
        assert!(raw.contains(ALLOW_DYLD_VARS));

        let value = Value::from_file(&path).unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.len(), 4);
    }
}
