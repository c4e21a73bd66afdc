//! Writing one user's reordered bookmarks back into the shared flat list.
//!
//! The flat list interleaves every user's bookmarks. A reorder keeps the
//! acting user's *slots* where they are and only changes which of that
//! user's bookmarks sits in each slot. Other users' records are never moved
//! or replaced.
//!
//! When the submitted order is stale (it names bookmarks that are gone or
//! belong to someone else, repeats an id, or misses some of the user's
//! current bookmarks) the merge still produces a list holding exactly the
//! user's current bookmarks, each once:
//!
//! - submitted entries that are not currently owned by the user, or repeat
//!   an earlier entry, are ignored;
//! - owned bookmarks missing from the submission fill the remaining slots
//!   in their previous relative order.
//!
//! Refilling replaces the plainer rule of leaving leftover slots as they
//! were, which would show a bookmark twice and drop another.

use std::collections::{HashMap, HashSet};

use crate::types::bookmark::Bookmark;

/// Result of [`merge_user_order`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The new flat list.
    pub bookmarks: Vec<Bookmark>,
    /// Submitted entries that were dropped.
    pub ignored: usize,
    /// User slots filled with bookmarks the submission left out.
    pub refilled: usize,
}

impl MergeOutcome {
    /// True when the submission was an exact permutation of the user's bookmarks.
    pub fn is_exact(&self) -> bool {
        self.ignored == 0 && self.refilled == 0
    }
}

/// Substitutes `new_order` into the slots `user_id` occupies in `all`.
///
/// Stored records are placed by id, so the merge only changes positions,
/// never bookmark contents.
pub fn merge_user_order(all: Vec<Bookmark>, user_id: &str, new_order: &[Bookmark]) -> MergeOutcome {
    let owned: HashMap<&str, &Bookmark> = all
        .iter()
        .filter(|b| b.user_id == user_id)
        .map(|b| (b.id.as_str(), b))
        .collect();

    let mut placed: HashSet<&str> = HashSet::with_capacity(owned.len());
    let mut sequence: Vec<Bookmark> = Vec::with_capacity(owned.len());
    let mut ignored = 0;

    for candidate in new_order {
        match owned.get(candidate.id.as_str()) {
            Some(stored) if placed.insert(stored.id.as_str()) => sequence.push((*stored).clone()),
            _ => ignored += 1,
        }
    }

    let mut refilled = 0;
    for stored in all.iter().filter(|b| b.user_id == user_id) {
        if placed.insert(stored.id.as_str()) {
            sequence.push(stored.clone());
            refilled += 1;
        }
    }

    let mut replacements = sequence.into_iter();
    let bookmarks = all
        .iter()
        .map(|record| {
            if record.user_id == user_id {
                replacements.next().unwrap_or_else(|| record.clone())
            } else {
                record.clone()
            }
        })
        .collect();

    MergeOutcome {
        bookmarks,
        ignored,
        refilled,
    }
}

/// Moves the item at `from` to index `to`, shifting the items in between.
///
/// This is the local drag step; out-of-range indices leave the list unchanged.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}
