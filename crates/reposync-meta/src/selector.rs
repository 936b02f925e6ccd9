//! Repository selection from a free-form token

use crate::{Error, RepositoryId, Result};

/// Resolve `token` against the enumerated repository `names`.
///
/// An all-digit token that falls within `1..=names.len()` picks the name at
/// that 1-based position. Anything else is taken as a literal name. The
/// result must be a member of `names`, otherwise the call fails with
/// [`Error::RepositoryNotFound`] carrying the original token.
///
/// This never touches the filesystem.
///
/// # Example
///
/// ```
/// use reposync_meta::select;
///
/// let names = ["alpha", "beta", "gamma"];
/// assert_eq!(select("2", &names).unwrap().as_str(), "beta");
/// assert_eq!(select("beta", &names).unwrap().as_str(), "beta");
/// assert!(select("4", &names).is_err());
/// ```
pub fn select<S: AsRef<str>>(token: &str, names: &[S]) -> Result<RepositoryId> {
    let trimmed = token.trim();

    let candidate = index_of(trimmed, names.len())
        .map(|index| names[index].as_ref())
        .unwrap_or(trimmed);

    if names.iter().any(|name| name.as_ref() == candidate) {
        tracing::debug!(token, repository = candidate, "Selected repository");
        Ok(RepositoryId::new(candidate))
    } else {
        Err(Error::RepositoryNotFound {
            token: token.to_string(),
        })
    }
}

/// Zero-based position for an in-range all-digit token.
fn index_of(token: &str, len: usize) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match token.parse::<usize>() {
        Ok(index) if (1..=len).contains(&index) => Some(index - 1),
        _ => None,
    }
}
