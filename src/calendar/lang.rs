use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A localization dictionary mapping English labels (`"Jan"`, `"Mo"`,
/// `"Today"`, …) to their translations
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Translations(HashMap<String, String>);

impl Translations {
    pub fn new() -> Translations {
        Translations::default()
    }

    /// Read a dictionary from a file containing a single JSON object of
    /// strings
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Translations, LoadTranslationsError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| LoadTranslationsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let map = serde_json::from_str(&src).map_err(|source| LoadTranslationsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded translations");
        Ok(Translations(map))
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Translations {
        Translations(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Look up `key` in `lang`, falling back to the key itself
pub fn translate<'a>(lang: Option<&'a Translations>, key: &'a str) -> &'a str {
    lang.and_then(|l| l.get(key)).unwrap_or(key)
}

#[derive(Debug, Error)]
pub enum LoadTranslationsError {
    #[error("failed to read translations from {path}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse translations in {path}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}
