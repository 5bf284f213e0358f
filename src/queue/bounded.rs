use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::trace;

use super::error::QueueError;

/// Fixed-capacity FIFO shared by producers and consumers
///
/// One mutex guards the items together with the producer count and the
/// closed flag, so every capacity, emptiness and termination check happens in
/// the same critical section as the mutation it guards. Producers park on
/// `not_full`, consumers park on `not_empty`.
///
/// The queue closes when the last [`ProducerHandle`] is dropped. From then on
/// consumers drain whatever is left and [`dequeue`](Self::dequeue) returns
/// `None`.
pub struct BoundedQueue<T> {
    state: Mutex<QueueState<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

struct QueueState<T> {
    items: VecDeque<T>,
    producers: usize,
    closed: bool,
    enqueued: u64,
    dequeued: u64,
    high_water_mark: usize,
}

/// Point-in-time counters for a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub capacity: usize,
    pub enqueued: u64,
    pub dequeued: u64,
    /// Largest length ever observed right after an append
    pub high_water_mark: usize,
}

impl<T> BoundedQueue<T> {
    /// Create an empty queue holding at most `capacity` items
    pub fn with_capacity(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }

        Ok(Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                producers: 0,
                closed: false,
                enqueued: 0,
                dequeued: 0,
                high_water_mark: 0,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    /// Register a new producer
    ///
    /// All producers must be registered before consumers can rely on the
    /// queue closing: with no registered producer the queue is simply empty.
    pub fn producer(self: &Arc<Self>) -> Result<ProducerHandle<T>, QueueError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(QueueError::Closed);
        }
        state.producers += 1;

        Ok(ProducerHandle {
            queue: Arc::clone(self),
        })
    }

    /// Remove the oldest item, blocking while the queue is empty and open
    ///
    /// Returns `None` only once every producer is gone and nothing is left.
    pub fn dequeue(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                state.dequeued += 1;
                drop(state);
                self.not_full.notify_one();
                return Some(item);
            }

            if state.closed {
                return None;
            }

            self.not_empty.wait(&mut state);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// True once the last producer handle has been dropped
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.state.lock();
        QueueStats {
            capacity: self.capacity,
            enqueued: state.enqueued,
            dequeued: state.dequeued,
            high_water_mark: state.high_water_mark,
        }
    }

    fn push_locked(&self, state: &mut QueueState<T>, item: T) {
        state.items.push_back(item);
        assert!(
            state.items.len() <= self.capacity,
            "queue length {} exceeds capacity {}",
            state.items.len(),
            self.capacity
        );
        state.enqueued += 1;
        state.high_water_mark = state.high_water_mark.max(state.items.len());
    }
}

/// Producer side of a [`BoundedQueue`]
///
/// Each live handle keeps the queue open. Dropping the last one closes it and
/// wakes every parked consumer.
pub struct ProducerHandle<T> {
    queue: Arc<BoundedQueue<T>>,
}

impl<T> ProducerHandle<T> {
    /// Append an item, blocking while the queue is full
    pub fn enqueue(&self, item: T) {
        let queue = &self.queue;
        let mut state = queue.state.lock();
        while state.items.len() >= queue.capacity {
            queue.not_full.wait(&mut state);
        }
        queue.push_locked(&mut state, item);
        drop(state);
        queue.not_empty.notify_one();
    }
}

impl<T> Drop for ProducerHandle<T> {
    fn drop(&mut self) {
        let mut state = self.queue.state.lock();
        state.producers -= 1;
        if state.producers == 0 {
            state.closed = true;
            trace!(remaining = state.items.len(), "Last producer left, queue closed");
            drop(state);
            self.queue.not_empty.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            BoundedQueue::<u32>::with_capacity(0),
            Err(QueueError::ZeroCapacity)
        ));
    }

    #[test]
    fn preserves_fifo_order() {
        let queue = Arc::new(BoundedQueue::with_capacity(4).unwrap());
        let producer = queue.producer().unwrap();

        for i in 0..4 {
            producer.enqueue(i);
        }
        drop(producer);

        let drained: Vec<_> = std::iter::from_fn(|| queue.dequeue()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
    }

    #[test]
    fn high_water_mark_tracks_fullest_point() {
        let queue = Arc::new(BoundedQueue::with_capacity(2).unwrap());
        let producer = queue.producer().unwrap();

        producer.enqueue(1);
        producer.enqueue(2);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.dequeue(), Some(1));
        producer.enqueue(3);
        assert_eq!(queue.dequeue(), Some(2));

        let stats = queue.stats();
        assert_eq!(stats.high_water_mark, 2);
        assert_eq!(stats.enqueued, 3);
        assert_eq!(stats.dequeued, 2);
    }

    #[test]
    fn closes_when_last_producer_drops() {
        let queue = Arc::new(BoundedQueue::<u32>::with_capacity(1).unwrap());
        let first = queue.producer().unwrap();
        let second = queue.producer().unwrap();

        drop(first);
        assert!(!queue.is_closed());

        drop(second);
        assert!(queue.is_closed());
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn registering_after_close_fails() {
        let queue = Arc::new(BoundedQueue::<u32>::with_capacity(1).unwrap());
        drop(queue.producer().unwrap());

        assert!(matches!(queue.producer(), Err(QueueError::Closed)));
    }

    #[test]
    fn drains_remaining_items_after_close() {
        let queue = Arc::new(BoundedQueue::with_capacity(3).unwrap());
        let producer = queue.producer().unwrap();
        producer.enqueue("a");
        producer.enqueue("b");
        drop(producer);

        assert!(queue.is_closed());
        assert_eq!(queue.dequeue(), Some("a"));
        assert_eq!(queue.dequeue(), Some("b"));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn blocked_producer_resumes_after_dequeue() {
        let queue = Arc::new(BoundedQueue::with_capacity(1).unwrap());
        let producer = queue.producer().unwrap();
        producer.enqueue(1);

        let handle = thread::spawn(move || {
            // Blocks until the main thread makes room
            producer.enqueue(2);
        });

        assert_eq!(queue.dequeue(), Some(1));
        handle.join().unwrap();

        assert_eq!(queue.dequeue(), Some(2));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn close_releases_every_parked_consumer() {
        let queue = Arc::new(BoundedQueue::<u32>::with_capacity(2).unwrap());
        let producer = queue.producer().unwrap();

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.dequeue())
            })
            .collect();

        drop(producer);

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), None);
        }
    }

    #[test]
    fn many_producers_many_consumers_no_loss() {
        const PRODUCERS: u64 = 4;
        const PER_PRODUCER: u64 = 2_000;

        let queue = Arc::new(BoundedQueue::with_capacity(8).unwrap());
        let handles: Vec<_> = (0..PRODUCERS).map(|_| queue.producer().unwrap()).collect();

        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(item) = queue.dequeue() {
                        seen.push(item);
                    }
                    seen
                })
            })
            .collect();

        let producers: Vec<_> = handles
            .into_iter()
            .enumerate()
            .map(|(p, handle)| {
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        handle.enqueue(p as u64 * PER_PRODUCER + i);
                    }
                })
            })
            .collect();

        for producer in producers {
            producer.join().unwrap();
        }

        let mut seen = HashSet::new();
        for consumer in consumers {
            for item in consumer.join().unwrap() {
                assert!(seen.insert(item), "item {item} dequeued twice");
            }
        }

        assert_eq!(seen.len() as u64, PRODUCERS * PER_PRODUCER);

        let stats = queue.stats();
        assert_eq!(stats.enqueued, PRODUCERS * PER_PRODUCER);
        assert_eq!(stats.dequeued, PRODUCERS * PER_PRODUCER);
        assert!(stats.high_water_mark <= stats.capacity);
    }

    #[test]
    fn per_producer_order_is_preserved() {
        let queue = Arc::new(BoundedQueue::with_capacity(3).unwrap());
        let producer = queue.producer().unwrap();

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || std::iter::from_fn(|| queue.dequeue()).collect::<Vec<_>>())
        };

        for i in 0..500 {
            producer.enqueue(i);
        }
        drop(producer);

        let drained = consumer.join().unwrap();
        assert_eq!(drained, (0..500).collect::<Vec<_>>());
    }
}
