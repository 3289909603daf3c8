use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("comment prefix must not be empty")]
    EmptyPrefix,

    #[error("at least one comment syntax is required")]
    NoComments,

    #[error("invalid marker pattern for comment prefix {prefix:?}: {source}")]
    Pattern {
        prefix: String,
        source: regex::Error,
    },
}

/// How a host language writes a comment that can hold a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentSyntax {
    /// The comment opener, e.g. `//`, `#`, `--`, `<!--`.
    pub prefix: String,
    /// Closing token for block comments, e.g. `*/` or `-->`.
    pub suffix: Option<String>,
}

impl CommentSyntax {
    pub fn line(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: None,
        }
    }

    pub fn block(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: Some(suffix.into()),
        }
    }
}

/// A comment syntax together with its compiled line pattern.
#[derive(Debug, Clone)]
pub(crate) struct CommentPattern {
    pub(crate) suffix: Option<String>,
    pub(crate) regex: Regex,
}

impl CommentPattern {
    fn compile(syntax: &CommentSyntax) -> Result<Self, SyntaxError> {
        let prefix = syntax.prefix.trim();
        if prefix.is_empty() {
            return Err(SyntaxError::EmptyPrefix);
        }

        // The keyword must directly follow the prefix (plus optional `#` sigil)
        // and end on a word boundary so `regional` never reads as `region`.
        let pattern = format!(
            r"^(?P<indent>\s*){}\s*#?(?P<keyword>endregion|region)\b(?P<rest>.*)$",
            regex::escape(prefix)
        );
        let regex = Regex::new(&pattern).map_err(|source| SyntaxError::Pattern {
            prefix: prefix.to_string(),
            source,
        })?;

        let suffix = syntax
            .suffix
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self { suffix, regex })
    }
}

/// The comment-prefix descriptor handed to the tokenizer.
///
/// Holds one or more comment syntaxes; a line is tried against each in order
/// and the first that matches wins.
#[derive(Debug, Clone)]
pub struct MarkerSyntax {
    pub(crate) patterns: Vec<CommentPattern>,
}

impl MarkerSyntax {
    /// Descriptor for a single line-comment prefix.
    pub fn new(prefix: impl Into<String>) -> Result<Self, SyntaxError> {
        Self::from_comments([CommentSyntax::line(prefix)])
    }

    pub fn from_comments<I>(comments: I) -> Result<Self, SyntaxError>
    where
        I: IntoIterator<Item = CommentSyntax>,
    {
        let patterns = comments
            .into_iter()
            .map(|c| CommentPattern::compile(&c))
            .collect::<Result<Vec<_>, _>>()?;
        if patterns.is_empty() {
            return Err(SyntaxError::NoComments);
        }
        Ok(Self { patterns })
    }
}
