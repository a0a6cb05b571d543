//! Translation dictionaries
//!
//! Dictionaries live at `<dir>/<language>/translation.json`. Top-level string
//! entries form the root dictionary; top-level objects are nodes such as
//! `ingredient` or `tool`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};
use thiserror::Error;

/// Flat key to expression map
pub type Dictionary = HashMap<String, String>;

const FALLBACK_LANGUAGE: &str = "en";
const TRANSLATION_FILE: &str = "translation.json";

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Invalid locale: {0:?}")]
    InvalidLocale(String),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Translation file {} is not a JSON object", .0.display())]
    NotAnObject(PathBuf),
}

pub type I18nResult<T> = Result<T, I18nError>;

/// Primary language subtag of a locale, lowercased (`de-AT` -> `de`)
///
/// An empty locale means English.
pub fn language_of(locale: &str) -> I18nResult<String> {
    let language = locale.trim().split(['-', '_']).next().unwrap_or_default();
    if language.is_empty() {
        return Ok(FALLBACK_LANGUAGE.to_string());
    }
    if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(I18nError::InvalidLocale(locale.to_string()));
    }
    Ok(language.to_ascii_lowercase())
}

/// Translations of one language
#[derive(Debug, Clone, Default)]
pub struct Translations {
    language: String,
    root: Map<String, Value>,
}

impl Translations {
    /// Translations with no entries; every key falls through
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            root: Map::new(),
        }
    }

    /// Load the dictionary for `locale` from `dir`
    ///
    /// A missing file yields empty translations rather than an error.
    pub fn load(dir: &Path, locale: &str) -> I18nResult<Self> {
        let language = language_of(locale)?;
        let path = dir.join(&language).join(TRANSLATION_FILE);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No translations at {}, keys fall through", path.display());
                return Ok(Self::empty(language));
            }
            Err(source) => return Err(I18nError::Io { path, source }),
        };

        let value: Value = serde_json::from_str(&contents).map_err(|source| I18nError::Json {
            path: path.clone(),
            source,
        })?;
        let Value::Object(root) = value else {
            return Err(I18nError::NotAnObject(path));
        };

        tracing::debug!("Loaded {} translation entries for {}", root.len(), language);
        Ok(Self { language, root })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Top-level string entries
    pub fn dictionary(&self) -> Dictionary {
        strings_of(&self.root)
    }

    /// String entries of the node `name`; empty when the node is absent
    pub fn node(&self, name: &str) -> Dictionary {
        match self.root.get(name) {
            Some(Value::Object(node)) => strings_of(node),
            _ => Dictionary::new(),
        }
    }
}

fn strings_of(map: &Map<String, Value>) -> Dictionary {
    map.iter()
        .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
        .collect()
}

/// Lazily loaded translations for every requested language
#[derive(Debug)]
pub struct TranslationStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Arc<Translations>>>,
}

impl TranslationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Translations for `locale`, loading them on first use
    pub fn get(&self, locale: &str) -> I18nResult<Arc<Translations>> {
        let language = language_of(locale)?;

        if let Ok(cache) = self.cache.read() {
            if let Some(translations) = cache.get(&language) {
                return Ok(Arc::clone(translations));
            }
        }

        let translations = Arc::new(Translations::load(&self.dir, &language)?);
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(language, Arc::clone(&translations));
        }
        Ok(translations)
    }

    /// Languages loaded so far, sorted
    pub fn loaded_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .cache
            .read()
            .map(|cache| cache.keys().cloned().collect())
            .unwrap_or_default();
        languages.sort();
        languages
    }
}
