//! Localized message bundle
//!
//! Messages are a flat `key = "text"` TOML table. Placeholders use `{name}`.
//! The English defaults are compiled in; a settings file may point to a bundle
//! whose keys override them.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::info;

const DEFAULT_MESSAGES: &str = include_str!("../resources/messages.toml");

fn placeholder_regex() -> Option<&'static Regex> {
    static PLACEHOLDER: OnceLock<Option<Regex>> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{(\w+)\}").ok())
        .as_ref()
}

#[derive(Clone, Debug)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Default for Messages {
    fn default() -> Self {
        // embedded bundle is checked by test_default_bundle_parses
        Self::from_toml_str(DEFAULT_MESSAGES).unwrap_or_else(|_| Self {
            entries: HashMap::new(),
        })
    }
}

impl Messages {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            toml::from_str(source).context("Invalid message bundle")?;
        Ok(Self { entries })
    }

    /// Defaults overlaid with the bundle at `path`
    pub fn load_with_overrides(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message bundle {}", path.display()))?;
        let overrides = Self::from_toml_str(&source)?;
        info!(
            "Loaded {} message overrides from {}",
            overrides.entries.len(),
            path.display()
        );

        let mut messages = Self::default();
        messages.entries.extend(overrides.entries);
        Ok(messages)
    }

    /// Message for `key`, or the key itself when the bundle has no entry
    pub fn get(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Message for `key` with `{name}` placeholders substituted in one pass;
    /// substituted values are never scanned again and unknown names are kept
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let text = self.get(key);
        let Some(placeholder) = placeholder_regex() else {
            return text;
        };
        placeholder
            .replace_all(&text, |caps: &Captures| {
                args.iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Whether the bundle has an entry for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bundle_parses() {
        let messages = Messages::from_toml_str(DEFAULT_MESSAGES).expect("default bundle");
        assert!(messages.contains("formHasErrors"));
        assert!(messages.contains("delete_error_message"));
        assert_eq!(messages.get("saveButton"), "Save");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        let messages = Messages::default();
        assert_eq!(messages.get("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_format_substitutes_placeholders() {
        let messages = Messages::default();
        assert_eq!(
            messages.format("StringValidator.maximum", &[("label", "Name"), ("max", "100")]),
            "'Name' must be at most 100 characters long."
        );
    }

    #[test]
    fn test_format_does_not_expand_placeholders_inside_values() {
        let messages = Messages::default();
        assert_eq!(
            messages.format("EmailAddressValidator", &[("value", "{label}@x"), ("label", "E-mail")]),
            "'{label}@x' is not a valid e-mail address."
        );
        assert_eq!(
            messages.format("Required", &[]),
            "'{label}' is required."
        );
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.fr.toml");
        std::fs::write(&path, "saveButton = \"Enregistrer\"\n").unwrap();

        let messages = Messages::load_with_overrides(&path).unwrap();
        assert_eq!(messages.get("saveButton"), "Enregistrer");
        assert_eq!(messages.get("cancelButton"), "Cancel");
    }
}
