//! A value with change notifications that replays the current value to new
//! subscribers.
//!
//! [`Observable`] keeps the latest value and one unbounded channel per
//! subscriber. Publishing is synchronous: by the time `set` returns, the new
//! value is queued on every live subscriber, in call order. Subscribers whose
//! [`Watch`] was dropped are pruned on the next publish. Dropping the
//! observable closes every channel, which ends each [`Watch`] stream.

use std::cell::RefCell;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::{FutureExt, Stream, StreamExt};

pub struct Observable<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<UnboundedSender<T>>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Replace the value and notify every subscriber.
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value.clone();
        self.publish(value);
    }

    /// Edit the value in place and notify every subscriber with the result.
    pub fn update<R>(&self, edit: impl FnOnce(&mut T) -> R) -> R {
        let (result, snapshot) = {
            let mut value = self.value.borrow_mut();
            let result = edit(&mut value);
            (result, value.clone())
        };
        self.publish(snapshot);
        result
    }

    /// Subscribe. The returned stream yields the current value first.
    pub fn subscribe(&self) -> Watch<T> {
        let (tx, rx) = unbounded();
        // A fresh channel cannot be closed yet.
        let _ = tx.unbounded_send(self.get());
        self.subscribers.borrow_mut().push(tx);
        Watch { rx }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    fn publish(&self, value: T) {
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.unbounded_send(value.clone()).is_ok());
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Stream of values published by an [`Observable`].
pub struct Watch<T> {
    rx: UnboundedReceiver<T>,
}

impl<T> Watch<T> {
    /// Take every value already queued, without waiting.
    pub fn drain(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Some(Some(value)) = self.rx.next().now_or_never() {
            values.push(value);
        }
        values
    }

    /// The most recent queued value, discarding older ones.
    pub fn latest(&mut self) -> Option<T> {
        self.drain().pop()
    }
}

impl<T> Stream for Watch<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}
