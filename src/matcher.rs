//! Matching of a single geographic token against a region rule list.
//!
//! Comparison is case-insensitive. Exclusion rules must equal the token;
//! inclusion rules only need to contain it, so a broad rule such as
//! `"France (metropolitan)"` covers the token `"France"`.

use tracing::debug;

/// How a rule list is compared against a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// The rule must equal the token.
    Exclusion,
    /// The rule must contain the token.
    Inclusion,
}

impl From<bool> for MatchMode {
    /// `true` selects exclusion matching.
    fn from(exclusion: bool) -> Self {
        if exclusion {
            MatchMode::Exclusion
        } else {
            MatchMode::Inclusion
        }
    }
}

fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Return the first rule in `rules` that matches `token` under `mode`.
pub fn find_match<'r>(rules: &'r [String], token: &str, mode: MatchMode) -> Option<&'r str> {
    if rules.is_empty() {
        return None;
    }

    let token = normalize(token);
    let hit = rules.iter().find(|rule| {
        let rule = normalize(rule);
        match mode {
            MatchMode::Exclusion => rule == token,
            MatchMode::Inclusion => rule.contains(token.as_str()),
        }
    })?;

    debug!(
        event = "Match",
        mode = ?mode,
        token = token.as_str(),
        rule = hit.as_str()
    );
    Some(hit.as_str())
}

/// `true` if any rule in `rules` matches `token` under `mode`.
pub fn matches(rules: &[String], token: &str, mode: MatchMode) -> bool {
    find_match(rules, token, mode).is_some()
}
