//! Deterministic lock ordering for account pairs
//!
//! This module provides the pure ordering primitive the transfer engine
//! uses to decide which of two accounts to lock first. The order is a
//! total, deterministic, lexicographic comparison of account identifiers:
//! it is reproducible across runs and processes sharing the same
//! identifiers, and it never depends on which account is the source or
//! destination of a particular call, nor on memory addresses or insertion
//! time.
//!
//! Because every concurrent transfer touching the same pair of accounts
//! orders the pair identically, no cycle of waiting can form between
//! transfers; this is the deadlock-prevention invariant of the whole
//! engine.

use crate::core::store::AccountEntry;
use std::sync::Arc;

/// Order two account entries for lock acquisition
///
/// Returns the entries as `(first, second)` such that `first` must be
/// locked before `second`. The lower identifier (lexicographically) comes
/// first. Pure and side-effect-free.
///
/// Callers are expected to have rejected same-account pairs already; if
/// both identifiers are equal the input order is returned unchanged.
pub fn ordered_pair<'a>(
    a: &'a Arc<AccountEntry>,
    b: &'a Arc<AccountEntry>,
) -> (&'a Arc<AccountEntry>, &'a Arc<AccountEntry>) {
    if a.id() <= b.id() {
        (a, b)
    } else {
        (b, a)
    }
}
