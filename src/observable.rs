use futures::stream::{self, Stream};
use tokio::sync::watch;

/// A value that subscribers can observe.
///
/// Each subscriber sees the current value and then every later publication in
/// order; a subscriber that falls behind only sees the newest value. Dropping a
/// receiver unsubscribes it.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<T> { self.tx.subscribe() }

    pub fn get(&self) -> T { self.tx.borrow().clone() }

    pub fn subscriber_count(&self) -> usize { self.tx.receiver_count() }

    /// Current value first, then each change. Ends when the observable is dropped.
    pub fn updates(&self) -> impl Stream<Item = T> + Send + 'static
    where
        T: Send + Sync + 'static,
    {
        stream::unfold((self.subscribe(), true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let value = rx.borrow_and_update().clone();
            Some((value, (rx, false)))
        })
    }

    /// Publish unconditionally; subscribers are notified even if the value is equal.
    pub(crate) fn publish(&self, value: T) { self.tx.send_replace(value); }
}

impl<T: Clone + PartialEq> Observable<T> {
    pub(crate) fn publish_if_changed(&self, value: T) {
        self.tx.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[test]
    fn publish_without_subscribers_is_kept() {
        let obs = Observable::new(0);
        obs.publish(3);
        assert_eq!(obs.get(), 3);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn every_subscriber_sees_changes() {
        let obs = Observable::new(false);
        let mut a = obs.subscribe();
        let mut b = obs.subscribe();
        obs.publish(true);
        assert!(a.has_changed().unwrap());
        assert!(b.has_changed().unwrap());
        assert!(*a.borrow_and_update());
        assert!(*b.borrow_and_update());
        drop(b);
        assert_eq!(obs.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn unchanged_values_are_not_republished() {
        let obs = Observable::new(false);
        let mut rx = obs.subscribe();
        obs.publish_if_changed(false);
        assert!(!rx.has_changed().unwrap());
        obs.publish_if_changed(true);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();
        obs.publish(true);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn updates_stream_starts_with_current_value() {
        let obs = Observable::new(vec![1]);
        let mut updates = Box::pin(obs.updates());
        assert_eq!(updates.next().await, Some(vec![1]));
        obs.publish(vec![1, 2]);
        assert_eq!(updates.next().await, Some(vec![1, 2]));
        drop(obs);
        assert_eq!(updates.next().await, None);
    }
}
