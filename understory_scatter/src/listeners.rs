// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Handle of a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Returned by a listener to stay registered or to drop itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subscription {
    /// Keep receiving events.
    Keep,
    /// Stop receiving events once the current dispatch completes.
    Unsubscribe,
}

type Callback<E> = Box<dyn FnMut(&E) -> Subscription>;

/// Ordered list of event callbacks.
///
/// Every listener registered before [`Listeners::emit`] sees the event, in
/// registration order. Listeners that answer [`Subscription::Unsubscribe`] are
/// dropped after all of them were called.
pub struct Listeners<E> {
    entries: Vec<(ListenerId, Callback<E>)>,
    next_id: u64,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl<E> Listeners<E> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `callback` and returns its handle.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) -> Subscription + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Appends a callback that never unsubscribes itself.
    pub fn subscribe_forever(&mut self, mut callback: impl FnMut(&E) + 'static) -> ListenerId {
        self.subscribe(move |event| {
            callback(event);
            Subscription::Keep
        })
    }

    /// Removes the listener `id`. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody listens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Calls every listener with `event`.
    pub fn emit(&mut self, event: &E) {
        if self.entries.is_empty() {
            return;
        }
        let mut dropped: Vec<ListenerId> = Vec::new();
        for (id, callback) in &mut self.entries {
            if callback(event) == Subscription::Unsubscribe {
                dropped.push(*id);
            }
        }
        if !dropped.is_empty() {
            self.entries.retain(|(id, _)| !dropped.contains(id));
        }
    }
}
