use std::collections::HashSet;

use crate::models::Comparison;

/// Computes both one-sided differences between the two lists.
///
/// `not_following_back` is `following - followers` and `not_followed_by` is
/// `followers - following`. Equality is exact string equality.
pub fn compare(followers: &HashSet<String>, following: &HashSet<String>) -> Comparison {
    Comparison {
        not_following_back: sorted_difference(following, followers),
        not_followed_by: sorted_difference(followers, following),
    }
}

fn sorted_difference(left: &HashSet<String>, right: &HashSet<String>) -> Vec<String> {
    let mut out: Vec<String> = left.difference(right).cloned().collect();
    out.sort_unstable();
    out
}
