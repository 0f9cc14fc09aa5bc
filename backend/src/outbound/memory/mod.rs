//! In-process store implementing every repository port.
//!
//! All collections sit behind one mutex, so each port call is a single
//! critical section. That gives the same atomicity the Postgres adapters get
//! from single-statement updates: point increments, view counts, vote toggles,
//! and acceptance exclusivity never interleave.
//!
//! Used when no database URL is configured, and by the test suites.

mod answers;
mod comments;
mod notifications;
mod questions;
mod users;

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::domain::{Answer, Comment, Notification, Question, User};

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    comments: Vec<Comment>,
    notifications: Vec<Notification>,
}

/// Thread-safe in-memory store. Share it between services with `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clone the matching records, newest first. Records created at the same
/// instant keep reverse insertion order.
fn newest_first<'a, T, F>(
    records: impl DoubleEndedIterator<Item = &'a T>,
    created_at: F,
) -> Vec<T>
where
    T: Clone + 'a,
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut selected: Vec<T> = records.rev().cloned().collect();
    selected.sort_by(|left, right| created_at(right).cmp(&created_at(left)));
    selected
}
