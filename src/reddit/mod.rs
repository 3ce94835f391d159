//! Data acquisition: a user's recent posts, comments and karma.

mod client;
mod types;

pub use client::RedditClient;
pub use types::{Comment, Post, RawActivity};

use async_trait::async_trait;

use crate::error::AcquisitionError;

/// Anything that can produce a [`RawActivity`] for a handle.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch(&self, handle: &str) -> Result<RawActivity, AcquisitionError>;
}

/// Fetch a handle's activity, degrading every failure to [`RawActivity::missing`].
pub async fn acquire(source: &dyn ActivitySource, handle: &str) -> RawActivity {
    match source.fetch(handle).await {
        Ok(activity) => activity,
        Err(e) => {
            tracing::error!(handle, error = %e, "Error fetching data");
            RawActivity::missing(handle)
        }
    }
}

/// Split a comma-separated handle list, dropping whitespace, `u/` prefixes and empties.
///
/// Handles end up in output file names, so anything outside Reddit's username
/// alphabet (ASCII letters, digits, `_`, `-`) is rejected with a warning.
pub fn normalize_handles(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|h| {
            let h = h.trim();
            let h = h.strip_prefix('/').unwrap_or(h);
            let h = h
                .strip_prefix("u/")
                .or_else(|| h.strip_prefix("U/"))
                .unwrap_or(h);
            h.trim()
        })
        .filter(|h| !h.is_empty())
        .filter(|h| {
            let valid = is_valid_handle(h);
            if !valid {
                tracing::warn!(handle = %h, "Skipping invalid Reddit username");
            }
            valid
        })
        .map(str::to_string)
        .collect()
}

fn is_valid_handle(handle: &str) -> bool {
    handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl ActivitySource for FailingSource {
        async fn fetch(&self, handle: &str) -> Result<RawActivity, AcquisitionError> {
            Err(AcquisitionError::UserNotFound {
                handle: handle.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn acquire_degrades_failures() {
        let raw = acquire(&FailingSource, "ghost").await;
        assert_eq!(raw, RawActivity::missing("ghost"));
    }

    #[test]
    fn normalize_strips_prefixes_and_blanks() {
        assert_eq!(
            normalize_handles(" u/kojied, /u/Hungry-Move-6603 ,, spez ,"),
            vec!["kojied", "Hungry-Move-6603", "spez"]
        );
        assert!(normalize_handles(" , ,").is_empty());
    }

    #[test]
    fn normalize_rejects_path_like_handles() {
        assert_eq!(
            normalize_handles("../x, a/b, c\\d, .., ok_name"),
            vec!["ok_name"]
        );
    }
}
