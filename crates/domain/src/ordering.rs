// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queue ordering.

use crate::ticket::Ticket;
use std::cmp::Ordering;

/// Compares two tickets: higher priority first, then older first.
#[must_use]
pub fn priority_order(a: &Ticket, b: &Ticket) -> Ordering {
    b.priority
        .rank()
        .cmp(&a.priority.rank())
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Sorts tickets by priority rank descending, then creation time ascending.
///
/// The sort is stable: tickets with equal priority and creation time keep
/// their relative order.
pub fn sort_by_priority(tickets: &mut [Ticket]) {
    tickets.sort_by(priority_order);
}

/// Owned variant of [`sort_by_priority`].
#[must_use]
pub fn sorted_by_priority(mut tickets: Vec<Ticket>) -> Vec<Ticket> {
    sort_by_priority(&mut tickets);
    tickets
}
