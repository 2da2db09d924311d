//! Pairwise matching of users.
//!
//! Two users match when their interest sets intersect and their genders
//! differ. Genders are compared as exact strings, so a user never matches
//! itself and no explicit exclusion is needed.

use crate::user::User;

/// Whether `candidate` is a match for `target`.
pub fn is_match(target: &User, candidate: &User) -> bool {
    target.gender != candidate.gender
        && target
            .interests
            .iter()
            .any(|tag| candidate.interests.contains(tag))
}

/// Ids of every user in `population` matching `target`, in population order.
pub fn matches<'a>(
    target: &User,
    population: impl IntoIterator<Item = &'a User>,
) -> Vec<i64> {
    population
        .into_iter()
        .filter(|candidate| is_match(target, candidate))
        .map(|candidate| candidate.id)
        .collect()
}
