use crate::error::Result;
use regex::Regex;

/// Environment names to leave out of the matrix (`TOX_SKIP_ENV`).
///
/// tox applies the same filter, but only once a test session starts, which is
/// after the matrix has already been exported. The pattern must match the
/// whole name to skip it.
#[derive(Debug, Clone)]
pub struct SkipPattern {
    pattern: String,
    regex: Regex,
}

impl SkipPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn skips(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}
