//! Upvote toggling shared by questions, answers, and comments.
//!
//! A vote is membership of a user in an entity's upvote set. Toggling twice
//! removes the vote. The direction of the change is reported so callers can
//! attach one-directional effects (answer rewards fire on `Added` only).

use serde::{Deserialize, Serialize};

use super::UserId;

/// Direction of a vote toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteToggle {
    Added,
    Removed,
}

/// Result of toggling a vote: the direction and the new total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub toggle: VoteToggle,
    pub upvotes: u64,
}

/// Flip `user`'s membership in `upvotes`.
///
/// # Examples
/// ```
/// use askboard::domain::{toggle_membership, UserId, VoteToggle};
///
/// let user = UserId::random();
/// let mut upvotes = Vec::new();
/// assert_eq!(toggle_membership(&mut upvotes, &user).toggle, VoteToggle::Added);
/// assert_eq!(toggle_membership(&mut upvotes, &user).toggle, VoteToggle::Removed);
/// assert!(upvotes.is_empty());
/// ```
pub fn toggle_membership(upvotes: &mut Vec<UserId>, user: &UserId) -> VoteOutcome {
    let toggle = match upvotes.iter().position(|voter| voter == user) {
        Some(index) => {
            upvotes.remove(index);
            VoteToggle::Removed
        }
        None => {
            upvotes.push(user.clone());
            VoteToggle::Added
        }
    };
    VoteOutcome {
        toggle,
        upvotes: upvotes.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn toggles_are_per_user() {
        let alice = UserId::random();
        let bob = UserId::random();
        let mut upvotes = Vec::new();

        toggle_membership(&mut upvotes, &alice);
        let outcome = toggle_membership(&mut upvotes, &bob);
        assert_eq!(outcome, VoteOutcome { toggle: VoteToggle::Added, upvotes: 2 });

        let outcome = toggle_membership(&mut upvotes, &alice);
        assert_eq!(outcome, VoteOutcome { toggle: VoteToggle::Removed, upvotes: 1 });
        assert_eq!(upvotes, vec![bob]);
    }

    #[rstest]
    #[case(1, VoteToggle::Added)]
    #[case(2, VoteToggle::Removed)]
    #[case(3, VoteToggle::Added)]
    fn repeated_toggles_alternate(#[case] times: usize, #[case] last: VoteToggle) {
        let user = UserId::random();
        let mut upvotes = Vec::new();
        let outcome = (0..times)
            .map(|_| toggle_membership(&mut upvotes, &user))
            .last()
            .expect("at least one toggle");
        assert_eq!(outcome.toggle, last);
    }
}
