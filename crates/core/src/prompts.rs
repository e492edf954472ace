//! Prompt template lookup.
//!
//! Templates are arbitrary JSON structures keyed by stage name, loaded once
//! at startup. A missing file or missing key degrades to an empty object so
//! generation endpoints keep working without the prompt pack installed.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

pub const KEY_INSTRUMENTAL: &str = "instrumental";
pub const KEY_MELODY: &str = "melody-from-lyrics";
pub const KEY_VOCAL: &str = "vocal_synthesis";
pub const KEY_MIX: &str = "mix_and_master";
pub const KEY_VIDEO: &str = "video_generation";

#[derive(Debug, Clone, Default)]
pub struct PromptLibrary {
    prompts: HashMap<String, Value>,
}

impl PromptLibrary {
    /// Load the library from a JSON file of `{ key: template }` pairs.
    ///
    /// An unreadable or malformed file yields an empty library rather than
    /// a startup failure.
    pub fn load(path: &Path) -> Self {
        let prompts = std::fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str::<HashMap<String, Value>>(&raw).ok());

        match prompts {
            Some(prompts) => {
                tracing::info!(path = %path.display(), count = prompts.len(), "Prompt library loaded");
                Self { prompts }
            }
            None => {
                tracing::warn!(path = %path.display(), "Prompt file missing or invalid, using empty library");
                Self::default()
            }
        }
    }

    /// Look up a template, returning an empty object when the key is absent.
    pub fn get(&self, key: &str) -> Value {
        self.prompts
            .get(key)
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_key_returns_empty_object() {
        let library = PromptLibrary::default();
        assert_eq!(library.get(KEY_INSTRUMENTAL), json!({}));
    }

    #[test]
    fn missing_file_yields_empty_library() {
        let library = PromptLibrary::load(Path::new("/nonexistent/prompts.json"));
        assert_eq!(library.get(KEY_MIX), json!({}));
    }

    #[test]
    fn known_key_returns_template() {
        let library = PromptLibrary {
            prompts: HashMap::from([(
                KEY_MELODY.to_string(),
                json!({"style": "romantic", "scale": "major"}),
            )]),
        };
        assert_eq!(library.get(KEY_MELODY)["style"], "romantic");
    }
}
