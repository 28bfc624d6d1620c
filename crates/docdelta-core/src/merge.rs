//! Lazy two-way merge of ordered sequences.
//!
//! [`MergeIter`] walks two inputs that are each ascending under a shared
//! comparator and pairs up elements that compare equal. It is the single
//! merge used both for documents-by-id and for fields-by-key.
//!
//! Each side is pulled only when its pending element has been emitted, so
//! at most one element per side is held and dropping the iterator stops all
//! further consumption of either input.

use std::cmp::Ordering;
use std::iter::{Fuse, FusedIterator, Peekable};

/// One step of a merge: an element present on the left, the right, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merged<T> {
    Left(T),
    Right(T),
    Both(T, T),
}

impl<T> Merged<T> {
    pub fn left(&self) -> Option<&T> {
        match self {
            Merged::Left(l) | Merged::Both(l, _) => Some(l),
            Merged::Right(_) => None,
        }
    }

    pub fn right(&self) -> Option<&T> {
        match self {
            Merged::Right(r) | Merged::Both(_, r) => Some(r),
            Merged::Left(_) => None,
        }
    }

    /// Split into `(left, right)` options.
    pub fn into_parts(self) -> (Option<T>, Option<T>) {
        match self {
            Merged::Left(l) => (Some(l), None),
            Merged::Right(r) => (None, Some(r)),
            Merged::Both(l, r) => (Some(l), Some(r)),
        }
    }
}

/// Iterator adapter produced by [`merge_by`].
pub struct MergeIter<L, R, F>
where
    L: Iterator,
    R: Iterator<Item = L::Item>,
{
    left: Peekable<Fuse<L>>,
    right: Peekable<Fuse<R>>,
    compare: F,
}

/// Merge two ascending sequences under `compare`.
///
/// `compare(l, r)` must order the left element against the right one the
/// same way both inputs are sorted. Equal elements are emitted together as
/// [`Merged::Both`]; otherwise the smaller side is emitted alone and only
/// that side advances.
pub fn merge_by<L, R, F>(left: L, right: R, compare: F) -> MergeIter<L::IntoIter, R::IntoIter, F>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    F: FnMut(&L::Item, &L::Item) -> Ordering,
{
    MergeIter {
        left: left.into_iter().fuse().peekable(),
        right: right.into_iter().fuse().peekable(),
        compare,
    }
}

/// Merge two sequences that are ascending by `key_fn`.
///
/// Shorthand for [`merge_by`] comparing `key_fn(l)` with `key_fn(r)`.
pub fn merge_by_key<L, R, K, G>(
    left: L,
    right: R,
    mut key_fn: G,
) -> MergeIter<L::IntoIter, R::IntoIter, impl FnMut(&L::Item, &L::Item) -> Ordering>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    K: Ord,
    G: FnMut(&L::Item) -> K,
{
    merge_by(left, right, move |l, r| key_fn(l).cmp(&key_fn(r)))
}

impl<L, R, F> Iterator for MergeIter<L, R, F>
where
    L: Iterator,
    R: Iterator<Item = L::Item>,
    F: FnMut(&L::Item, &L::Item) -> Ordering,
{
    type Item = Merged<L::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let ordering = match (self.left.peek(), self.right.peek()) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(l), Some(r)) => (self.compare)(l, r),
        };

        match ordering {
            Ordering::Less => self.left.next().map(Merged::Left),
            Ordering::Greater => self.right.next().map(Merged::Right),
            Ordering::Equal => match (self.left.next(), self.right.next()) {
                (Some(l), Some(r)) => Some(Merged::Both(l, r)),
                // both sides were peeked as present
                _ => None,
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left_lo, left_hi) = self.left.size_hint();
        let (right_lo, right_hi) = self.right.size_hint();
        let upper = match (left_hi, right_hi) {
            (Some(l), Some(r)) => l.checked_add(r),
            _ => None,
        };
        (left_lo.max(right_lo), upper)
    }
}

impl<L, R, F> FusedIterator for MergeIter<L, R, F>
where
    L: Iterator,
    R: Iterator<Item = L::Item>,
    F: FnMut(&L::Item, &L::Item) -> Ordering,
{
}
