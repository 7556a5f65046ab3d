/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::rc::{Rc, Weak};

/// Structural change of a sequence.
#[derive(Debug, PartialEq)]
pub enum CollectionChange<'a, T> {
    Insert { index: usize, value: &'a T },
    Remove { index: usize, value: &'a T },
    Replace { index: usize, old: &'a T, new: &'a T },
    /// The whole content changed (clear, page table rebuild)
    Reset,
}

/// Coarse signal for listeners that only care about aggregate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyChange {
    Count,
    Indexer,
}

#[derive(Debug, PartialEq)]
pub enum Notification<'a, T> {
    Collection(CollectionChange<'a, T>),
    Property(PropertyChange),
}

type Callback<T> = Box<dyn FnMut(&Notification<'_, T>)>;

/// Keeps a listener registered until it is dropped.
///
/// The notifying structure only holds a weak reference to the handle, so a
/// dropped handle is pruned on the next dispatch.
#[must_use = "the listener is unsubscribed as soon as the subscription is dropped"]
pub struct Subscription {
    _token: Rc<()>,
}

struct Listener<T> {
    token: Weak<()>,
    callback: Callback<T>,
}

impl<T> Listener<T> {
    #[inline]
    fn is_alive(&self) -> bool {
        self.token.strong_count() > 0
    }
}

/// Listeners of a single sequence, notified synchronously in subscription order.
pub(crate) struct NotificationHub<T> {
    listeners: Vec<Listener<T>>,
}

impl<T> NotificationHub<T> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub(crate) fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&Notification<'_, T>) + 'static,
    {
        let token = Rc::new(());
        self.listeners.push(Listener {
            token: Rc::downgrade(&token),
            callback: Box::new(callback),
        });

        Subscription { _token: token }
    }

    /// Number of listeners whose subscription is still alive
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.iter().filter(|l| l.is_alive()).count()
    }

    pub(crate) fn notify(&mut self, notification: Notification<'_, T>) {
        self.listeners.retain(Listener::is_alive);

        for listener in self.listeners.iter_mut() {
            (listener.callback)(&notification);
        }
    }

    #[inline]
    pub(crate) fn collection_changed(&mut self, change: CollectionChange<'_, T>) {
        self.notify(Notification::Collection(change));
    }

    #[inline]
    pub(crate) fn property_changed(&mut self, change: PropertyChange) {
        self.notify(Notification::Property(change));
    }

    /// Both `Count` and `Indexer` changed.
    pub(crate) fn size_changed(&mut self) {
        self.property_changed(PropertyChange::Count);
        self.property_changed(PropertyChange::Indexer);
    }
}
