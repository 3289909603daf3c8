use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid file pattern {pattern:?} for language '{language}': {source}")]
    InvalidPattern {
        language: String,
        pattern: String,
        source: glob::PatternError,
    },
}

/// One way a language writes a comment that can hold a region marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentConfig {
    pub prefix: String,
    /// Closing token for block comments, e.g. `*/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl CommentConfig {
    fn line(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: None,
        }
    }

    fn block(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: Some(suffix.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Glob patterns matched against the file name, e.g. `*.rs`.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Tried in order; the first that matches a line wins.
    pub comments: Vec<CommentConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,
}

const C_FAMILY: &[(&str, &[&str])] = &[
    ("c", &["*.c", "*.h"]),
    ("cpp", &["*.cpp", "*.cc", "*.cxx", "*.hpp", "*.hh"]),
    ("dart", &["*.dart"]),
    ("fsharp", &["*.fs", "*.fsx"]),
    ("go", &["*.go"]),
    ("java", &["*.java"]),
    ("javascript", &["*.js", "*.mjs", "*.cjs", "*.jsx"]),
    ("kotlin", &["*.kt", "*.kts"]),
    ("rust", &["*.rs"]),
    ("scala", &["*.scala"]),
    ("swift", &["*.swift"]),
    ("typescript", &["*.ts", "*.mts", "*.cts", "*.tsx"]),
];

const HASH_FAMILY: &[(&str, &[&str])] = &[
    ("makefile", &["Makefile", "*.mk"]),
    ("perl", &["*.pl", "*.pm"]),
    ("powershell", &["*.ps1", "*.psm1"]),
    ("python", &["*.py", "*.pyi"]),
    ("r", &["*.r", "*.R"]),
    ("ruby", &["*.rb"]),
    ("shellscript", &["*.sh", "*.bash", "*.zsh"]),
    ("toml", &["*.toml"]),
    ("yaml", &["*.yml", "*.yaml"]),
];

const DASH_FAMILY: &[(&str, &[&str])] = &[
    ("haskell", &["*.hs"]),
    ("lua", &["*.lua"]),
    ("sql", &["*.sql"]),
];

const MARKUP_FAMILY: &[(&str, &[&str])] = &[
    ("html", &["*.html", "*.htm", "*.vue"]),
    ("markdown", &["*.md", "*.markdown"]),
    ("xml", &["*.xml", "*.svg", "*.xaml"]),
];

fn language(patterns: &[&str], comments: Vec<CommentConfig>) -> LanguageConfig {
    LanguageConfig {
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        comments,
    }
}

impl Default for Config {
    /// The built-in language table.
    fn default() -> Self {
        let mut languages = BTreeMap::new();
        let families = [
            (C_FAMILY, vec![CommentConfig::line("//")]),
            (HASH_FAMILY, vec![CommentConfig::line("#")]),
            (DASH_FAMILY, vec![CommentConfig::line("--")]),
            (MARKUP_FAMILY, vec![CommentConfig::block("<!--", "-->")]),
        ];
        for (family, comments) in families {
            for (name, patterns) in family {
                languages.insert(name.to_string(), language(patterns, comments.clone()));
            }
        }

        // C# also has native `#region` directives.
        languages.insert(
            "csharp".to_string(),
            language(
                &["*.cs"],
                vec![CommentConfig::line("//"), CommentConfig::line("#")],
            ),
        );
        languages.insert(
            "php".to_string(),
            language(
                &["*.php"],
                vec![CommentConfig::line("//"), CommentConfig::line("#")],
            ),
        );
        languages.insert(
            "css".to_string(),
            language(
                &["*.css", "*.scss", "*.less"],
                vec![CommentConfig::block("/*", "*/"), CommentConfig::line("//")],
            ),
        );
        languages.insert(
            "vb".to_string(),
            language(&["*.vb", "*.vbs"], vec![CommentConfig::line("'")]),
        );

        Self { languages }
    }
}

impl Config {
    /// Loads a config file and merges it over the built-in defaults.
    ///
    /// Languages in the file replace built-in languages with the same key.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let file: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let mut config = Config::default();
        config.languages.extend(file.languages);
        config.validate()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/region-marker");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn language(&self, name: &str) -> Option<&LanguageConfig> {
        self.languages.get(name)
    }

    /// Finds the first language (by key order) with a pattern matching the
    /// file name of `path`.
    pub fn language_for_path(
        &self,
        path: &Path,
    ) -> Result<Option<(&str, &LanguageConfig)>, ConfigError> {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return Ok(None);
        };

        for (name, language) in &self.languages {
            for pattern in compile_patterns(name, language)? {
                if pattern.matches(&file_name) {
                    return Ok(Some((name.as_str(), language)));
                }
            }
        }
        Ok(None)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, language) in &self.languages {
            compile_patterns(name, language)?;
        }
        Ok(())
    }
}

fn compile_patterns(name: &str, language: &LanguageConfig) -> Result<Vec<Pattern>, ConfigError> {
    language
        .patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| ConfigError::InvalidPattern {
                language: name.to_string(),
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}
