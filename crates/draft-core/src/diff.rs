//! Text Diff
//!
//! Word-level diff between two revisions of a post.
//!
//! Both texts are split into alternating word and whitespace tokens, then
//! walked with one cursor each. On a mismatch the cursor whose token shows up
//! sooner on the other side jumps forward. This is a greedy nearest-match
//! walk, not an edit-distance diff: output can be longer than necessary and
//! depends on token order.
//!
//! Every original token ends up in exactly one `Unchanged` or `Removed`
//! segment, in order, and every edited token in exactly one `Unchanged` or
//! `Added` segment. Concatenating *all* segments gives an interleaving of the
//! two texts, not either of them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

/// A labeled span of diff output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
}

impl DiffSegment {
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: SegmentKind::Unchanged }
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: SegmentKind::Added }
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: SegmentKind::Removed }
    }
}

/// Split on whitespace runs, keeping the runs as tokens.
///
/// Tokens alternate word/whitespace and always start and end with a word
/// token, which may be empty: `""` gives `[""]`, `"a "` gives
/// `["a", " ", ""]`. Joining the tokens yields the input.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = false;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() != in_space {
            tokens.push(&text[start..idx]);
            start = idx;
            in_space = !in_space;
        }
    }
    tokens.push(&text[start..]);
    if in_space {
        tokens.push("");
    }
    tokens
}

/// Diff `original` against `edited`.
pub fn compute_diff(original: &str, edited: &str) -> Vec<DiffSegment> {
    if original == edited {
        return vec![DiffSegment::unchanged(original)];
    }

    let orig = tokenize(original);
    let edit = tokenize(edited);
    let mut segments = Vec::new();
    let mut oi = 0;
    let mut ei = 0;

    loop {
        if oi >= orig.len() {
            if ei < edit.len() {
                segments.push(DiffSegment::added(edit[ei..].concat()));
            }
            break;
        }
        if ei >= edit.len() {
            segments.push(DiffSegment::removed(orig[oi..].concat()));
            break;
        }

        if orig[oi] == edit[ei] {
            segments.push(DiffSegment::unchanged(orig[oi]));
            oi += 1;
            ei += 1;
            continue;
        }

        // Where does the other side's current token reappear?
        let orig_match = find_after(&orig, oi, edit[ei]);
        let edit_match = find_after(&edit, ei, orig[oi]);

        // Ties go to the removal
        match (orig_match, edit_match) {
            (Some(om), Some(em)) if em - ei < om - oi => {
                segments.push(DiffSegment::added(edit[ei..em].concat()));
                ei = em;
            }
            (Some(om), _) => {
                segments.push(DiffSegment::removed(orig[oi..om].concat()));
                oi = om;
            }
            (None, Some(em)) => {
                segments.push(DiffSegment::added(edit[ei..em].concat()));
                ei = em;
            }
            (None, None) => {
                segments.push(DiffSegment::removed(orig[oi]));
                segments.push(DiffSegment::added(edit[ei]));
                oi += 1;
                ei += 1;
            }
        }
    }

    segments
}

fn find_after(tokens: &[&str], from: usize, needle: &str) -> Option<usize> {
    tokens[from + 1..]
        .iter()
        .position(|t| *t == needle)
        .map(|offset| from + 1 + offset)
}
