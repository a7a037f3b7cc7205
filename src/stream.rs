use std::collections::VecDeque;

/// A pull based lazy stream over a nullary producer.
///
/// The stream owns one item of lookahead so a caller can route on the next
/// item without consuming it. Once the producer reports done the stream
/// stays done. Single consumer; a stream makes no thread-safety promises.
pub struct LazyStream<T> {
    producer: Box<dyn FnMut() -> Option<T>>,
    peeked: Option<T>,
    done: bool,
}

impl<T: 'static> LazyStream<T> {
    /// Creates a stream that pulls items from `producer` until it yields
    /// `None`.
    pub fn new(producer: impl FnMut() -> Option<T> + 'static) -> Self {
        Self {
            producer: Box::new(producer),
            peeked: None,
            done: false,
        }
    }

    /// Convenience over an already materialised sequence.
    pub fn from_vec(items: Vec<T>) -> Self {
        let mut iter = items.into_iter();
        Self::new(move || iter.next())
    }

    /// Returns the next item and advances the stream.
    pub fn next(&mut self) -> Option<T> {
        match self.peeked.take() {
            Some(item) => Some(item),
            None => self.pull(),
        }
    }

    /// Returns the next item without advancing.
    pub fn peek(&mut self) -> Option<&T> {
        if self.peeked.is_none() {
            self.peeked = self.pull();
        }
        self.peeked.as_ref()
    }

    /// Advances the stream, discarding the item.
    pub fn junk(&mut self) {
        let _ = self.next();
    }

    fn pull(&mut self) -> Option<T> {
        if self.done {
            return None;
        }

        let item = (self.producer)();
        if item.is_none() {
            self.done = true;
        }

        item
    }
}

/// A [`LazyStream`] with push-back.
///
/// Items the caller has taken out to make a routing decision can be queued
/// again with [`buffer`](BufferStream::buffer); they re-emit in FIFO order
/// before the underlying stream resumes.
pub struct BufferStream<T> {
    stream: LazyStream<T>,
    queue: VecDeque<T>,
}

impl<T: 'static> BufferStream<T> {
    pub fn new(stream: LazyStream<T>) -> Self {
        Self {
            stream,
            queue: VecDeque::new(),
        }
    }

    /// Queues an item for re-emission ahead of the underlying stream.
    pub fn buffer(&mut self, item: T) {
        self.queue.push_back(item);
    }

    /// Returns the next item and advances, draining the queue first.
    pub fn next(&mut self) -> Option<T> {
        match self.queue.pop_front() {
            Some(item) => Some(item),
            None => self.stream.next(),
        }
    }

    /// Returns the next item without advancing.
    pub fn peek(&mut self) -> Option<&T> {
        if !self.queue.is_empty() {
            return self.queue.front();
        }

        self.stream.peek()
    }

    /// Advances the stream, discarding the item.
    pub fn junk(&mut self) {
        let _ = self.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let mut stream = LazyStream::from_vec(vec![1, 2, 3]);

        assert_eq!(stream.peek(), Some(&1));
        assert_eq!(stream.peek(), Some(&1));
        assert_eq!(stream.next(), Some(1));
        assert_eq!(stream.next(), Some(2));
        stream.junk();
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn stays_done_after_producer_finishes() {
        let mut remaining = 1;
        let mut stream = LazyStream::new(move || {
            if remaining > 0 {
                remaining -= 1;
                Some("item")
            } else {
                None
            }
        });

        assert_eq!(stream.next(), Some("item"));
        assert_eq!(stream.next(), None);
        assert_eq!(stream.peek(), None);
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn buffered_items_drain_in_fifo_order_first() {
        let mut stream = BufferStream::new(LazyStream::from_vec(vec![10, 20]));

        assert_eq!(stream.next(), Some(10));
        stream.buffer(10);
        stream.buffer(11);

        assert_eq!(stream.peek(), Some(&10));
        assert_eq!(stream.next(), Some(10));
        assert_eq!(stream.next(), Some(11));
        assert_eq!(stream.peek(), Some(&20));
        assert_eq!(stream.next(), Some(20));
        assert_eq!(stream.next(), None);
    }
}
