use crate::error::SourceError;
use std::marker::PhantomData;

/// Pull-based access to a sequence of `T`, independent of where the elements live.
///
/// Every backing store in this crate implements this contract:
/// - `has_more` never changes state and may be called any number of times
/// - `fetch` advances by exactly one element on success and not at all on failure
/// - `fetch_batch` returns however many elements it could read, possibly none
/// - `reset` restores the starting position for later fetches
pub trait Source<T> {
    /// Reports whether a subsequent `fetch` is expected to succeed.
    fn has_more(&self) -> bool;

    /// Returns the next element, or [`SourceError::Exhausted`] when none remain.
    fn fetch(&mut self) -> Result<T, SourceError>;

    /// Retrieves up to `count` further elements into an owned `Vec`.
    ///
    /// A shortfall is not an error; the length of the returned `Vec` is the
    /// number of elements actually consumed.
    fn fetch_batch(&mut self, count: usize) -> Result<Vec<T>, SourceError>;

    fn reset(&mut self) -> Result<(), SourceError>;
}

/// Convenience forms built purely on [`Source::fetch`].
pub trait SourceExt<T>: Source<T> {
    /// Call-style fetch: every call of the returned closure is one `fetch`.
    fn caller(&mut self) -> impl FnMut() -> Result<T, SourceError> {
        move || self.fetch()
    }

    /// Fetches into `out` and hands the source back for further extraction.
    ///
    /// ```
    /// use datasource::{ArraySource, SourceExt};
    ///
    /// let mut source = ArraySource::new(&[25, 36]).unwrap();
    /// let (mut a, mut b) = (0, 0);
    /// source.extract(&mut a).unwrap().extract(&mut b).unwrap();
    /// assert_eq!((a, b), (25, 36));
    /// ```
    fn extract(&mut self, out: &mut T) -> Result<&mut Self, SourceError> {
        *out = self.fetch()?;
        Ok(self)
    }

    /// Iterates over the remaining elements.
    ///
    /// Ends at [`SourceError::Exhausted`]; any other error is yielded once and
    /// then the iterator is finished.
    fn elements(&mut self) -> Elements<'_, Self, T> {
        Elements {
            source: self,
            finished: false,
            _element: PhantomData,
        }
    }
}

impl<T, S: Source<T> + ?Sized> SourceExt<T> for S {}

pub struct Elements<'s, S: ?Sized, T> {
    source: &'s mut S,
    finished: bool,
    _element: PhantomData<fn() -> T>,
}

impl<S: Source<T> + ?Sized, T> Iterator for Elements<'_, S, T> {
    type Item = Result<T, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.source.fetch() {
            Ok(element) => Some(Ok(element)),
            Err(SourceError::Exhausted) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
