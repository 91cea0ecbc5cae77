use crate::rules::slot::MatchMode;
use regex::Regex;
use smallvec::SmallVec;

/// A single compiled token of a slot pattern.
#[derive(Debug, Clone)]
pub enum CompiledMatcher {
    Literal(String),
    Regex(Regex),
}

impl CompiledMatcher {
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Literal(needle) => line.contains(needle.as_str()),
            Self::Regex(re) => re.is_match(line),
        }
    }
}

/// Most slots carry one or two tokens, so they stay inline.
pub type Matchers = SmallVec<[CompiledMatcher; 4]>;

/// Split pattern text on `;`, trimming and dropping empty tokens.
pub fn tokens(pattern: &str) -> impl Iterator<Item = &str> {
    pattern.split(';').map(str::trim).filter(|t| !t.is_empty())
}

/// Compile pattern text into matchers.
///
/// In regex mode a token that fails to compile is dropped; the remaining
/// tokens of the slot still apply.
pub fn compile(pattern: &str, mode: MatchMode) -> Matchers {
    match mode {
        MatchMode::Substring => tokens(pattern)
            .map(|t| CompiledMatcher::Literal(t.to_string()))
            .collect(),
        MatchMode::Regex => tokens(pattern)
            .filter_map(|t| match Regex::new(t) {
                Ok(re) => Some(CompiledMatcher::Regex(re)),
                Err(e) => {
                    tracing::debug!(token = t, error = %e, "dropping invalid regex token");
                    None
                }
            })
            .collect(),
    }
}

/// AND over all matchers. An empty list matches nothing.
pub fn match_all(line: &str, matchers: &[CompiledMatcher]) -> bool {
    !matchers.is_empty() && matchers.iter().all(|m| m.is_match(line))
}
