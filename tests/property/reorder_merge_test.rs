//! Property tests for merging one user's order into the shared flat list.

use chrono::{TimeZone, Utc};
use link_saver::services::reorder_merge::merge_user_order;
use link_saver::types::bookmark::Bookmark;
use proptest::prelude::*;

const USERS: [&str; 3] = ["u1", "u2", "u3"];

fn bookmark(index: usize, user: &str) -> Bookmark {
    Bookmark {
        id: format!("b{}", index),
        user_id: user.to_string(),
        url: format!("https://site{}.example", index),
        title: format!("Site {}", index),
        favicon: String::new(),
        summary: String::new(),
        og_tags: Default::default(),
        created_at: Utc.timestamp_millis_opt(1_704_067_200_000 + index as i64).unwrap(),
    }
}

/// A flat list of interleaved owners plus a shuffled copy of u1's records.
fn list_and_permutation() -> impl Strategy<Value = (Vec<Bookmark>, Vec<Bookmark>)> {
    prop::collection::vec(0..USERS.len(), 0..24)
        .prop_map(|owners| {
            owners
                .into_iter()
                .enumerate()
                .map(|(i, owner)| bookmark(i, USERS[owner]))
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|all| {
            let mine: Vec<Bookmark> = all.iter().filter(|b| b.user_id == "u1").cloned().collect();
            (Just(all), Just(mine).prop_shuffle())
        })
}

proptest! {
    #[test]
    fn other_users_keep_their_positions((all, order) in list_and_permutation()) {
        let outcome = merge_user_order(all.clone(), "u1", &order);
        prop_assert_eq!(outcome.bookmarks.len(), all.len());
        for (before, after) in all.iter().zip(&outcome.bookmarks) {
            if before.user_id != "u1" {
                prop_assert_eq!(before, after);
            } else {
                prop_assert_eq!(&after.user_id, "u1");
            }
        }
    }

    #[test]
    fn user_subsequence_matches_submitted_order((all, order) in list_and_permutation()) {
        let outcome = merge_user_order(all, "u1", &order);
        prop_assert!(outcome.is_exact());
        let mine: Vec<&str> = outcome
            .bookmarks
            .iter()
            .filter(|b| b.user_id == "u1")
            .map(|b| b.id.as_str())
            .collect();
        let submitted: Vec<&str> = order.iter().map(|b| b.id.as_str()).collect();
        prop_assert_eq!(mine, submitted);
    }

    #[test]
    fn merging_twice_changes_nothing((all, order) in list_and_permutation()) {
        let once = merge_user_order(all, "u1", &order);
        let twice = merge_user_order(once.bookmarks.clone(), "u1", &order);
        prop_assert_eq!(once.bookmarks, twice.bookmarks);
    }

    /// Arbitrary, possibly stale submissions never lose, duplicate or leak records.
    #[test]
    fn stale_submissions_keep_the_same_records(
        (all, _) in list_and_permutation(),
        picks in prop::collection::vec(0usize..32, 0..16),
    ) {
        let submitted: Vec<Bookmark> = picks
            .iter()
            .filter_map(|&i| all.get(i % all.len().max(1)).cloned())
            .collect();
        let outcome = merge_user_order(all.clone(), "u1", &submitted);

        let mut before: Vec<&str> = all.iter().map(|b| b.id.as_str()).collect();
        let mut after: Vec<&str> = outcome.bookmarks.iter().map(|b| b.id.as_str()).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }
}
