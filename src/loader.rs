use std::path::Path;

use tracing::info;

use crate::error::TerritoryError;
use crate::types::DistributorRequest;

/// Split a comma-separated region list into trimmed tokens.
///
/// Tokens that are empty after trimming are dropped, so an empty input
/// yields an empty list.
///
/// Example:
/// ```rust
/// use territory_core::split_regions;
/// assert_eq!(split_regions(" France , Ile-de-France,"), vec!["France", "Ile-de-France"]);
/// assert!(split_regions("").is_empty());
/// ```
pub fn split_regions(text: &str) -> Vec<String> {
    normalize_regions(text.split(','))
}

/// Trim every token and drop the ones left empty.
fn normalize_regions<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a JSON array of distributor requests.
///
/// Region tokens are trimmed and empty ones dropped, the same as for
/// [`split_regions`].
///
/// Example:
/// ```rust
/// use territory_core::requests_from_json;
/// let requests = requests_from_json(r#"[
///     { "name": "wholesale", "include": ["France"] },
///     { "name": "retail", "include": ["Paris"], "exclude": ["Ile-de-France"], "parent": "wholesale" }
/// ]"#).unwrap();
/// assert_eq!(requests.len(), 2);
/// assert_eq!(requests[1].parent.as_deref(), Some("wholesale"));
/// ```
pub fn requests_from_json(text: &str) -> Result<Vec<DistributorRequest>, TerritoryError> {
    let mut requests: Vec<DistributorRequest> = serde_json::from_str(text)?;
    for request in &mut requests {
        validate_name(&request.name)?;
        request.include = normalize_regions(request.include.iter().map(String::as_str));
        request.exclude = normalize_regions(request.exclude.iter().map(String::as_str));
    }
    Ok(requests)
}

pub fn requests_from_path(path: impl AsRef<Path>) -> Result<Vec<DistributorRequest>, TerritoryError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        TerritoryError::Input(format!("failed to read '{}': {e}", path.display()))
    })?;
    let requests = requests_from_json(&text)?;
    info!(
        event = "Rules",
        phase = "Loaded",
        path = %path.display(),
        distributors = requests.len()
    );
    Ok(requests)
}

/// Distributor names are a single non-empty token.
pub(crate) fn validate_name(name: &str) -> Result<(), TerritoryError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(TerritoryError::InvalidFormat(format!(
            "distributor name must be a single token, got '{name}'"
        )));
    }
    Ok(())
}
