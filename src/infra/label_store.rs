// ============================================================
// Layer 5 — Label Map Store
// ============================================================
// Builds the LabelMaps value the whole run shares: the built-in
// table, with entries optionally replaced from a JSON file.
//
// Override file format (only the datasets listed are replaced):
//   {
//     "maps": {
//       "scitail": { "labels": ["neutral", "entails"] }
//     }
//   }
//
// Reference: serde_json documentation

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::{errors::PrepError, label_map::LabelMaps};

pub struct LabelStore;

impl LabelStore {
    /// The built-in maps, merged with `overrides` when given.
    pub fn load_or_default(overrides: Option<&Path>) -> Result<LabelMaps> {
        let mut maps = LabelMaps::default();

        if let Some(path) = overrides {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Cannot read label maps from '{}'", path.display()))?;
            let custom: LabelMaps = serde_json::from_str(&json)
                .with_context(|| format!("Invalid label map JSON in '{}'", path.display()))?;

            for name in custom.dataset_names() {
                match custom.get(name) {
                    Some(map) if !map.is_empty() => {
                        tracing::info!("Overriding label map '{}' ({} labels)", name, map.len());
                    }
                    _ => {
                        return Err(PrepError::Configuration(format!(
                            "label map '{name}' in '{}' has no labels",
                            path.display()
                        ))
                        .into());
                    }
                }
            }
            maps.merge(custom);
        }

        Ok(maps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_override() {
        let maps = LabelStore::load_or_default(None).unwrap();
        assert_eq!(maps, LabelMaps::default());
    }

    #[test]
    fn test_override_replaces_one_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"{"maps":{"rqe":{"labels":["true","false"]}}}"#).unwrap();

        let maps = LabelStore::load_or_default(Some(&path)).unwrap();
        assert_eq!(maps.get("rqe").unwrap().id_of("true"), Some(0));
        assert_eq!(maps.get("mnli").unwrap().id_of("entailment"), Some(2));
    }

    #[test]
    fn test_empty_override_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"{"maps":{"rqe":{"labels":[]}}}"#).unwrap();
        let err = LabelStore::load_or_default(Some(&path)).unwrap_err();
        assert!(matches!(err.downcast_ref::<PrepError>(), Some(PrepError::Configuration(_))));
    }

    #[test]
    fn test_bad_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.json");
        fs::write(&path, "not json").unwrap();
        assert!(LabelStore::load_or_default(Some(&path)).is_err());
    }
}
