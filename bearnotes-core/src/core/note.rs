//! The markdown note record and its title derivation rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to notes whose content yields no usable first line.
pub const DEFAULT_TITLE: &str = "Untitled Note";

/// Maximum number of characters taken from a plain (non-heading) first line.
pub const TITLE_MAX_CHARS: usize = 50;

/// A single markdown note.
///
/// Timestamps serialize as RFC 3339 strings so a persisted snapshot can be
/// read back into [`DateTime<Utc>`] before any invariant is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl Note {
    /// Creates an empty note with a fresh UUID and both timestamps set to now.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            file_path: None,
        }
    }

    /// Refreshes `updated_at`, never letting it fall behind `created_at`
    /// when the wall clock has stepped backwards.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Returns `true` if the note carries `tag` (case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match on title or content. An empty query
    /// matches every note.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.content.to_lowercase().contains(&query)
    }

    /// Applies `patch`, recomputing the title whenever content is supplied.
    ///
    /// Always refreshes `updated_at`.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.title = derive_title(&content);
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            let mut unique: Vec<String> = Vec::with_capacity(tags.len());
            for tag in tags {
                if !unique.contains(&tag) {
                    unique.push(tag);
                }
            }
            self.tags = unique;
        }
        if let Some(file_path) = patch.file_path {
            self.file_path = Some(file_path);
        }
        self.touch();
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Note> for Note {
    fn as_ref(&self) -> &Note {
        self
    }
}

/// A partial update to a [`Note`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl NotePatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Self::default() }
    }

    pub fn file_path(path: impl Into<String>) -> Self {
        Self { file_path: Some(path.into()), ..Self::default() }
    }
}

/// Derives a note title from the first line of its markdown source.
///
/// A heading line (`#`, `##`, ...) has its markers and surrounding whitespace
/// stripped. Any other line is trimmed and cut to [`TITLE_MAX_CHARS`]
/// characters. An empty result becomes [`DEFAULT_TITLE`].
pub fn derive_title(content: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or("");

    let title: String = if first_line.starts_with('#') {
        first_line.trim_start_matches('#').trim().to_string()
    } else {
        first_line.trim().chars().take(TITLE_MAX_CHARS).collect()
    };

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}
