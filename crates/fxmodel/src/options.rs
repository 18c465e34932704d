//! Load configuration.
use crate::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How integer positions in the grammar (frame and particle counts) treat numeric literals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberParsing {
    /// Float literals are accepted and truncated.
    #[default]
    Lenient,
    /// Only integer literals are accepted.
    Strict,
}

/// Options passed to every parsing entry point.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Directory that relative file names are resolved against.
    ///
    /// Applies to the effect file itself and to every simulation file it references.
    /// If `None`, names are used as given.
    pub root: Option<PathBuf>,
    /// Whether the format identifier and version at the top of simulation files are checked.
    ///
    /// When disabled, the two tokens are still consumed.
    pub validate_preamble: bool,
    pub numbers: NumberParsing,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            root: None,
            validate_preamble: true,
            numbers: NumberParsing::Lenient,
        }
    }
}

impl LoadOptions {
    pub fn with_root(root: impl Into<PathBuf>) -> LoadOptions {
        LoadOptions {
            root: Some(root.into()),
            ..Default::default()
        }
    }

    /// Reads options from a JSON object. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<LoadOptions, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_json() {
        let options = LoadOptions::from_json("{}").unwrap();
        assert!(options.validate_preamble);
        assert_eq!(options.numbers, NumberParsing::Lenient);
        assert!(options.root.is_none());
    }

    #[test]
    fn json_fields() {
        let options =
            LoadOptions::from_json(r#"{ "root": "base", "validate_preamble": false, "numbers": "strict" }"#).unwrap();
        assert!(!options.validate_preamble);
        assert_eq!(options.numbers, NumberParsing::Strict);
        assert_eq!(options.resolve("fx/a.fx"), Path::new("base").join("fx/a.fx"));
    }

    #[test]
    fn bad_json() {
        assert!(matches!(LoadOptions::from_json(r#"{ "numbers": "loose" }"#), Err(Error::Options(_))));
    }
}
