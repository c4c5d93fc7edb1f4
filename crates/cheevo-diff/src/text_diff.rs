//! Word-level diff of text fields such as Title and Description.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// A run of text tagged with how it changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum WordSegment {
    Same(String),
    Removed(String),
    Added(String),
}

/// The result of diffing two text fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WordDiff {
    pub segments: Vec<WordSegment>,
}

impl WordDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_unchanged(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, WordSegment::Same(_)))
    }
}

/// Diff `old` (the compared side) against `new` (the generated side).
///
/// Adjacent changes of the same kind are merged into one segment.
pub fn diff_text(old: &str, new: &str) -> WordDiff {
    let mut segments: Vec<WordSegment> = Vec::new();

    for change in TextDiff::from_words(old, new).iter_all_changes() {
        let value = change.value();
        match (change.tag(), segments.last_mut()) {
            (ChangeTag::Equal, Some(WordSegment::Same(text)))
            | (ChangeTag::Delete, Some(WordSegment::Removed(text)))
            | (ChangeTag::Insert, Some(WordSegment::Added(text))) => text.push_str(value),
            (ChangeTag::Equal, _) => segments.push(WordSegment::Same(value.to_string())),
            (ChangeTag::Delete, _) => segments.push(WordSegment::Removed(value.to_string())),
            (ChangeTag::Insert, _) => segments.push(WordSegment::Added(value.to_string())),
        }
    }

    WordDiff { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_is_unchanged() {
        let diff = diff_text("Win the game", "Win the game");
        assert!(diff.is_unchanged());
        assert_eq!(diff.segments, vec![WordSegment::Same("Win the game".into())]);
    }

    #[test]
    fn case_change_is_a_replacement() {
        let diff = diff_text("Win the Game", "Win the game");
        assert!(!diff.is_unchanged());
        assert!(diff.segments.contains(&WordSegment::Removed("Game".into())));
        assert!(diff.segments.contains(&WordSegment::Added("game".into())));
    }

    #[test]
    fn empty_old_is_all_added() {
        let diff = diff_text("", "New text");
        assert_eq!(diff.segments, vec![WordSegment::Added("New text".into())]);
    }
}
