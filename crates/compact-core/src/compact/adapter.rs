use std::fmt;
use std::iter::{Fuse, FusedIterator};

/// Decides whether two neighbouring elements belong to the same run.
///
/// The first argument is always the element immediately preceding the second
/// one in the input, whether or not it was emitted.
pub trait SameRun<T> {
    fn same(&mut self, prev: &T, next: &T) -> bool;
}

impl<T, F: FnMut(&T, &T) -> bool> SameRun<T> for F {
    fn same(&mut self, prev: &T, next: &T) -> bool {
        self(prev, next)
    }
}

/// Plain `PartialEq` comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByEq;

impl<T: PartialEq> SameRun<T> for ByEq {
    fn same(&mut self, prev: &T, next: &T) -> bool {
        prev == next
    }
}

/// Compare the keys extracted by the wrapped function.
#[derive(Clone)]
pub struct ByKey<F>(pub F);

impl<F> fmt::Debug for ByKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByKey")
    }
}

impl<T, K: PartialEq, F: FnMut(&T) -> K> SameRun<T> for ByKey<F> {
    fn same(&mut self, prev: &T, next: &T) -> bool {
        (self.0)(prev) == (self.0)(next)
    }
}

/// Lazy iterator that drops adjacent duplicates.
///
/// Yielding an element reads the input up to the end of that element's run,
/// so the adapter holds at most one element of look-ahead and one element of
/// the current run. Elements are moved through, never cloned.
pub struct CompactBy<I: Iterator, F> {
    iter: Fuse<I>,
    /// First element of the next run, already pulled from `iter`.
    pending: Option<I::Item>,
    same: F,
}

/// Adapter returned by [`CompactExt::compact`].
pub type Compact<I> = CompactBy<I, ByEq>;

/// Adapter returned by [`CompactExt::compact_by_key`].
pub type CompactByKey<I, F> = CompactBy<I, ByKey<F>>;

impl<I: Iterator, F> CompactBy<I, F>
where
    F: SameRun<I::Item>,
{
    pub fn new(iter: I, same: F) -> Self {
        Self {
            iter: iter.fuse(),
            pending: None,
            same,
        }
    }

    /// Pull one maximal run: its first element and its length.
    fn next_run(&mut self) -> Option<(usize, I::Item)> {
        let head = match self.pending.take() {
            Some(item) => item,
            None => self.iter.next()?,
        };
        let mut len = 1;
        // Last element seen inside the run, once it is no longer `head`.
        let mut last: Option<I::Item> = None;
        for item in self.iter.by_ref() {
            let prev = last.as_ref().unwrap_or(&head);
            if self.same.same(prev, &item) {
                len += 1;
                last = Some(item);
            } else {
                self.pending = Some(item);
                break;
            }
        }
        Some((len, head))
    }

    fn run_size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let (lo, hi) = self.iter.size_hint();
        let lo = usize::from(pending > 0 || lo > 0);
        (lo, hi.and_then(|hi| hi.checked_add(pending)))
    }
}

impl<I: Iterator, F> Iterator for CompactBy<I, F>
where
    F: SameRun<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_run().map(|(_, head)| head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.run_size_hint()
    }
}

impl<I: Iterator, F> FusedIterator for CompactBy<I, F> where F: SameRun<I::Item> {}

impl<I, F> Clone for CompactBy<I, F>
where
    I: Iterator + Clone,
    I::Item: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            pending: self.pending.clone(),
            same: self.same.clone(),
        }
    }
}

impl<I, F> fmt::Debug for CompactBy<I, F>
where
    I: Iterator + fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactBy")
            .field("iter", &self.iter)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// Lazy iterator yielding `(run_length, first_element)` for every maximal run.
pub struct WithCount<I: Iterator, F>(CompactBy<I, F>);

impl<I, F> fmt::Debug for WithCount<I, F>
where
    I: Iterator + fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WithCount").field(&self.0).finish()
    }
}

impl<I: Iterator, F> Iterator for WithCount<I, F>
where
    F: SameRun<I::Item>,
{
    type Item = (usize, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_run()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.run_size_hint()
    }
}

impl<I: Iterator, F> FusedIterator for WithCount<I, F> where F: SameRun<I::Item> {}

/// Lazy iterator that drops adjacent duplicates, yielding each run's first
/// element as soon as it is read.
///
/// Keeps a clone of the previous input element instead of reading ahead.
pub struct CompactCloned<I: Iterator> {
    iter: Fuse<I>,
    last: Option<I::Item>,
}

impl<I> Clone for CompactCloned<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            last: self.last.clone(),
        }
    }
}

impl<I> fmt::Debug for CompactCloned<I>
where
    I: Iterator + fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactCloned")
            .field("iter", &self.iter)
            .field("last", &self.last)
            .finish()
    }
}

impl<I> Iterator for CompactCloned<I>
where
    I: Iterator,
    I::Item: PartialEq + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.iter.by_ref() {
            let emit = self.last.as_ref() != Some(&item);
            self.last = Some(item.clone());
            if emit {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        let lo = match self.last {
            None => usize::from(lo > 0),
            Some(_) => 0,
        };
        (lo, hi)
    }
}

impl<I> FusedIterator for CompactCloned<I>
where
    I: Iterator,
    I::Item: PartialEq + Clone,
{
}

/// Extension methods for compacting any iterator.
pub trait CompactExt: Iterator + Sized {
    /// Drop elements equal to the element right before them.
    ///
    /// Each element is yielded once its run has ended, which takes reading
    /// one element past the run. A never-ending run therefore never yields;
    /// use [`compact_cloned`](CompactExt::compact_cloned) when elements are
    /// `Clone` and output must keep pace with input.
    fn compact(self) -> Compact<Self>
    where
        Self::Item: PartialEq,
    {
        CompactBy::new(self, ByEq)
    }

    /// Like [`compact`](CompactExt::compact), but yields the first element of
    /// a run as soon as it is read.
    fn compact_cloned(self) -> CompactCloned<Self>
    where
        Self::Item: PartialEq + Clone,
    {
        CompactCloned {
            iter: self.fuse(),
            last: None,
        }
    }

    /// Drop elements for which `same(previous, current)` holds.
    fn compact_by<F>(self, same: F) -> CompactBy<Self, F>
    where
        F: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        CompactBy::new(self, same)
    }

    /// Drop elements whose key equals the key of the element right before them.
    fn compact_by_key<K, F>(self, key: F) -> CompactByKey<Self, F>
    where
        K: PartialEq,
        F: FnMut(&Self::Item) -> K,
    {
        CompactBy::new(self, ByKey(key))
    }

    /// Like [`compact`](CompactExt::compact), also reporting how long each run was.
    fn compact_with_count(self) -> WithCount<Self, ByEq>
    where
        Self::Item: PartialEq,
    {
        WithCount(CompactBy::new(self, ByEq))
    }
}

impl<I: Iterator> CompactExt for I {}
