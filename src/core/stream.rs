use std::sync::Arc;

/// Lazy, possibly infinite sequence.
///
/// A `Suspension` defers the rest of the sequence until it is forced, so a
/// consumer that stops pulling never computes the remaining elements.
pub enum Stream<T> {
    Empty,
    Pair(T, Box<Stream<T>>),
    Suspension(Box<dyn FnOnce() -> Stream<T>>),
}

impl<T> Stream<T> {
    pub fn empty() -> Self {
        Stream::Empty
    }

    pub fn singleton(x: T) -> Self {
        Stream::cons(x, Stream::Empty)
    }

    pub fn cons(a: T, d: Self) -> Self {
        Stream::Pair(a, Box::new(d))
    }

    pub fn suspension(sup: impl 'static + FnOnce() -> Stream<T>) -> Self {
        Stream::Suspension(Box::new(sup))
    }
}

impl<T> std::iter::FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Stream::Empty, |rest, item| Stream::cons(item, rest))
    }
}

impl<T> std::iter::IntoIterator for Stream<T> {
    type Item = T;
    type IntoIter = StreamIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        StreamIter(self)
    }
}

impl<T: 'static> Stream<T> {
    /// All elements of `self`, then all elements of the stream produced by
    /// `rest`. `rest` runs only once `self` is exhausted.
    pub fn append(self, rest: impl 'static + FnOnce() -> Stream<T>) -> Self {
        match self {
            Stream::Empty => Stream::suspension(rest),
            Stream::Pair(a, d) => Stream::cons(a, d.append(rest)),
            Stream::Suspension(sup) => Stream::suspension(move || sup().append(rest)),
        }
    }

    /// `then` if `self` turns out to have no elements, otherwise nothing.
    ///
    /// Forces one suspension of `self` per forced suspension of the result,
    /// so a consumer counting steps also counts the steps spent on `self`.
    pub fn if_empty<U: 'static>(self, then: Stream<U>) -> Stream<U> {
        match self {
            Stream::Empty => then,
            Stream::Pair(..) => Stream::Empty,
            Stream::Suspension(sup) => Stream::suspension(move || sup().if_empty(then)),
        }
    }

    /// Replace every element by the stream `g` produces for it, keeping the
    /// streams in order: everything derived from the first element comes
    /// before anything derived from the second.
    pub fn append_map(self, g: Arc<dyn Fn(T) -> Self>) -> Self {
        match self {
            Stream::Empty => Stream::Empty,
            Stream::Pair(a, d) => {
                let g2 = g.clone();
                g(a).append(move || d.append_map(g2))
            }
            Stream::Suspension(sup) => Stream::suspension(move || sup().append_map(g)),
        }
    }
}

pub struct StreamIter<T>(Stream<T>);

impl<T> StreamIter<T> {
    /// Advance by at most one forced suspension.
    ///
    /// Returns `Step::Yield` with the next element, `Step::Pending` if a
    /// suspension was forced without producing one, or `Step::Done`.
    pub fn step(&mut self) -> Step<T> {
        match std::mem::replace(&mut self.0, Stream::Empty) {
            Stream::Empty => Step::Done,
            Stream::Pair(a, d) => {
                self.0 = *d;
                Step::Yield(a)
            }
            Stream::Suspension(sup) => {
                self.0 = sup();
                Step::Pending
            }
        }
    }
}

/// Outcome of [`StreamIter::step`].
#[derive(Debug, PartialEq)]
pub enum Step<T> {
    Yield(T),
    Pending,
    Done,
}

impl<T> Iterator for StreamIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step() {
                Step::Yield(a) => return Some(a),
                Step::Pending => continue,
                Step::Done => return None,
            }
        }
    }
}
