//! Activity records and the Reddit JSON wire types they are built from.

use serde::{Deserialize, Serialize};

/// A submission made by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Title followed by a space and the self-text.
    pub text: String,
    pub subreddit: String,
    pub url: String,
    pub upvotes: i64,
    pub comment_count: i64,
}

/// A comment made by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub subreddit: String,
    /// Absolute permalink.
    pub url: String,
}

/// Everything fetched for one handle. Immutable once acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawActivity {
    pub handle: String,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    /// Link karma plus comment karma.
    pub karma: i64,
    pub exists: bool,
}

impl RawActivity {
    /// Record for a handle that could not be fetched.
    pub fn missing(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            posts: Vec::new(),
            comments: Vec::new(),
            karma: 0,
            exists: false,
        }
    }

    /// Post texts followed by comment texts.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.posts
            .iter()
            .map(|p| p.text.as_str())
            .chain(self.comments.iter().map(|c| c.text.as_str()))
    }

    /// Subreddit names of every post and comment.
    pub fn subreddits(&self) -> impl Iterator<Item = &str> {
        self.posts
            .iter()
            .map(|p| p.subreddit.as_str())
            .chain(self.comments.iter().map(|c| c.subreddit.as_str()))
    }

    pub fn item_count(&self) -> usize {
        self.posts.len() + self.comments.len()
    }

    /// Citation URLs: the first `posts` post URLs, then the first `comments`
    /// comment URLs, deduplicated in first-seen order.
    pub fn source_urls(&self, posts: usize, comments: usize) -> Vec<String> {
        let mut urls: Vec<String> = Vec::with_capacity(posts + comments);
        let candidates = self
            .posts
            .iter()
            .take(posts)
            .map(|p| &p.url)
            .chain(self.comments.iter().take(comments).map(|c| &c.url));
        for url in candidates {
            if !urls.contains(url) {
                urls.push(url.clone());
            }
        }
        urls
    }
}

// ── Wire types ──

#[derive(Debug, Deserialize)]
pub(crate) struct Thing<T> {
    #[allow(dead_code)]
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountData {
    #[allow(dead_code)]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link_karma: i64,
    #[serde(default)]
    pub comment_karma: i64,
    #[serde(default)]
    pub is_suspended: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData<T> {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default = "Vec::new")]
    pub children: Vec<Thing<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentData {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub permalink: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_lifetime")]
    pub expires_in: u64,
}

fn default_token_lifetime() -> u64 {
    3600
}

pub(crate) const SITE_URL: &str = "https://www.reddit.com";

fn absolute_permalink(permalink: &str) -> String {
    if permalink.starts_with("http") {
        permalink.to_string()
    } else {
        format!("{SITE_URL}{permalink}")
    }
}

impl From<SubmissionData> for Post {
    fn from(s: SubmissionData) -> Self {
        let url = s
            .url
            .filter(|u| !u.is_empty())
            .or_else(|| s.permalink.as_deref().map(absolute_permalink))
            .unwrap_or_default();
        Self {
            text: format!("{} {}", s.title, s.selftext),
            subreddit: s.subreddit,
            url,
            upvotes: s.score,
            comment_count: s.num_comments,
        }
    }
}

impl From<CommentData> for Comment {
    fn from(c: CommentData) -> Self {
        Self {
            text: c.body,
            subreddit: c.subreddit,
            url: absolute_permalink(&c.permalink),
        }
    }
}
