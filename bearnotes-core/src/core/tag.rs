//! Tag registry entries and the derived note counts shown in the sidebar.

use serde::{Deserialize, Serialize};

use crate::core::note::Note;

/// Reserved tag whose count is the total note count and which disables
/// filtering when selected.
pub const ALL_TAG: &str = "all";

/// Colors handed out, in rotation, to tags that appear on notes before they
/// are registered.
const TAG_COLOR_ROTATION: [&str; 6] = [
    "#5AC8FA", "#AF52DE", "#FF2D55", "#5856D6", "#FFCC00", "#8E8E93",
];

/// A registry entry for one tag name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    pub color: String,
    /// Cached for display. Recompute with [`recompute_tag_counts`]; never trust it as source data.
    #[serde(default)]
    pub note_count: usize,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self { name: name.into(), color: color.into(), note_count: 0 }
    }

    pub fn is_all(&self) -> bool {
        self.name == ALL_TAG
    }
}

/// The registry a fresh installation starts with.
pub fn default_tags() -> Vec<Tag> {
    vec![
        Tag::new(ALL_TAG, "#007AFF"),
        Tag::new("work", "#34C759"),
        Tag::new("personal", "#FF9500"),
        Tag::new("ideas", "#FF3B30"),
    ]
}

/// Returns a new registry with every `note_count` derived from `notes`.
///
/// Tag names found on notes but absent from `registry` are appended in the
/// order they are first seen, so the registry always covers every tag in use.
pub fn recompute_tag_counts<N: AsRef<Note>>(notes: &[N], registry: &[Tag]) -> Vec<Tag> {
    let mut tags: Vec<Tag> = registry.to_vec();

    for note in notes {
        for name in &note.as_ref().tags {
            if !tags.iter().any(|t| &t.name == name) {
                let color = TAG_COLOR_ROTATION[tags.len() % TAG_COLOR_ROTATION.len()];
                tags.push(Tag::new(name.clone(), color));
            }
        }
    }

    for tag in &mut tags {
        tag.note_count = if tag.is_all() {
            notes.len()
        } else {
            notes.iter().filter(|n| n.as_ref().has_tag(&tag.name)).count()
        };
    }
    tags
}

/// Returns the notes visible under `selected`.
///
/// An empty selection, or one containing [`ALL_TAG`], shows every note.
/// Otherwise a note is kept if it carries any selected tag (OR, not AND).
pub fn filter_by_tags<'a, N: AsRef<Note>>(notes: &'a [N], selected: &[String]) -> Vec<&'a N> {
    if selected.is_empty() || selected.iter().any(|t| t == ALL_TAG) {
        return notes.iter().collect();
    }
    notes
        .iter()
        .filter(|n| selected.iter().any(|t| n.as_ref().has_tag(t)))
        .collect()
}

/// Notes visible under `selected` whose title or content contains `query`,
/// ignoring case. An empty query leaves the tag filter result unchanged.
pub fn search_notes<'a, N: AsRef<Note>>(
    notes: &'a [N],
    selected: &[String],
    query: &str,
) -> Vec<&'a N> {
    let mut visible = filter_by_tags(notes, selected);
    visible.retain(|n| n.as_ref().matches_query(query));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tags: &[&str]) -> Note {
        let mut note = Note::new();
        note.tags = tags.iter().map(|t| t.to_string()).collect();
        note
    }

    fn count_of(tags: &[Tag], name: &str) -> usize {
        tags.iter().find(|t| t.name == name).map(|t| t.note_count).unwrap()
    }

    #[test]
    fn test_counts_for_work_and_all() {
        let notes = vec![
            tagged(&["work"]),
            tagged(&["work", "ideas"]),
            tagged(&["work"]),
            tagged(&[]),
            tagged(&["personal"]),
        ];
        let tags = recompute_tag_counts(&notes, &default_tags());
        assert_eq!(count_of(&tags, "work"), 3);
        assert_eq!(count_of(&tags, ALL_TAG), 5);
        assert_eq!(count_of(&tags, "ideas"), 1);
        assert_eq!(count_of(&tags, "personal"), 1);
    }

    #[test]
    fn test_stale_counts_are_overwritten() {
        let mut registry = default_tags();
        registry[1].note_count = 42;
        let tags = recompute_tag_counts::<Note>(&[], &registry);
        assert!(tags.iter().all(|t| t.note_count == 0));
    }

    #[test]
    fn test_unregistered_tags_are_appended() {
        let notes = vec![tagged(&["rust", "work"]), tagged(&["rust"])];
        let tags = recompute_tag_counts(&notes, &default_tags());
        assert_eq!(tags.len(), default_tags().len() + 1);
        let rust = tags.last().unwrap();
        assert_eq!(rust.name, "rust");
        assert_eq!(rust.note_count, 2);
        assert!(!rust.color.is_empty());
    }

    #[test]
    fn test_tag_names_are_case_sensitive() {
        let notes = vec![tagged(&["Work"])];
        let tags = recompute_tag_counts(&notes, &default_tags());
        assert_eq!(count_of(&tags, "work"), 0);
        assert_eq!(count_of(&tags, "Work"), 1);
    }

    #[test]
    fn test_filter_is_union_of_selected_tags() {
        let notes = vec![
            tagged(&["work"]),
            tagged(&["ideas"]),
            tagged(&["personal"]),
            tagged(&["work", "ideas"]),
        ];
        let selected = vec!["work".to_string(), "ideas".to_string()];
        let visible = filter_by_tags(&notes, &selected);
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().all(|n| n.has_tag("work") || n.has_tag("ideas")));
    }

    #[test]
    fn test_empty_or_all_selection_shows_everything() {
        let notes = vec![tagged(&["work"]), tagged(&[])];
        assert_eq!(filter_by_tags(&notes, &[]).len(), 2);
        let all = vec!["ideas".to_string(), ALL_TAG.to_string()];
        assert_eq!(filter_by_tags(&notes, &all).len(), 2);
    }

    #[test]
    fn test_unknown_selected_tag_matches_nothing_extra() {
        let notes = vec![tagged(&["work"]), tagged(&[])];
        let selected = vec!["work".to_string(), "nonexistent".to_string()];
        assert_eq!(filter_by_tags(&notes, &selected).len(), 1);
    }

    #[test]
    fn test_search_combines_query_with_tag_filter() {
        let mut notes = vec![
            tagged(&["work"]),
            tagged(&["ideas"]),
            tagged(&["personal"]),
            tagged(&[]),
        ];
        notes[0].title = "Quarterly Report".to_string();
        notes[1].content = "report template ideas".to_string();
        notes[2].title = "Report card".to_string();
        notes[3].content = "REPORT draft".to_string();

        let selected = vec!["work".to_string(), "ideas".to_string()];
        let visible = search_notes(&notes, &selected, "report");
        assert_eq!(visible.len(), 2);
        assert!(std::ptr::eq(visible[0], &notes[0]));
        assert!(std::ptr::eq(visible[1], &notes[1]));

        assert_eq!(search_notes(&notes, &[], "Report").len(), 4);
        assert_eq!(search_notes(&notes, &selected, "").len(), 2);
        assert!(search_notes(&notes, &selected, "card").is_empty());
    }
}
