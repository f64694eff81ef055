use super::Source;
use crate::error::SourceError;
use log::{debug, trace};

/// Round-robin merge over borrowed sources.
///
/// The merge owns none of its members: it holds `&'a mut` borrows, so every
/// member outlives the merge and cannot be touched elsewhere while the merge
/// is alive. Once the merge is dropped the members are usable again, at
/// whatever position the merge left them.
///
/// `reset` only rewinds the rotation index; members keep their positions.
///
/// A member error that interrupts a non-empty batch is held back: the batch
/// is returned and the next `fetch` or `fetch_batch` reports the error.
pub struct MergedSource<'a, T> {
    sources: Vec<&'a mut dyn Source<T>>,
    current: usize,
    deferred: Option<SourceError>,
}

impl<'a, T> MergedSource<'a, T> {
    pub fn new(sources: Vec<&'a mut dyn Source<T>>) -> Self {
        debug!("Merging {} sources", sources.len());
        MergedSource {
            sources,
            current: 0,
            deferred: None,
        }
    }

    /// Appends one more member after the existing ones.
    pub fn with_source(mut self, source: &'a mut dyn Source<T>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Index of the member the next `fetch` examines first.
    pub fn current_index(&self) -> usize {
        self.current
    }
}

impl<T> Default for MergedSource<'_, T> {
    fn default() -> Self {
        MergedSource {
            sources: Vec::new(),
            current: 0,
            deferred: None,
        }
    }
}

impl<T> Source<T> for MergedSource<'_, T> {
    fn has_more(&self) -> bool {
        self.deferred.is_some() || self.sources.iter().any(|source| source.has_more())
    }

    /// Examines each member at most once, starting at the current index.
    ///
    /// The first member with more data yields the element and the index moves
    /// past it. A member that answers `Exhausted` despite reporting more data
    /// (see the file source caveat) is passed over like an exhausted one.
    fn fetch(&mut self) -> Result<T, SourceError> {
        if let Some(error) = self.deferred.take() {
            return Err(error);
        }

        let count = self.sources.len();
        for _ in 0..count {
            let index = self.current;
            self.current = (index + 1) % count;

            let source = &mut self.sources[index];
            if !source.has_more() {
                continue;
            }
            match source.fetch() {
                Err(SourceError::Exhausted) => {
                    debug!("Merged source {index} ran out after reporting more data");
                }
                result => {
                    trace!("Merged fetch served by source {index}");
                    return result;
                }
            }
        }
        Err(SourceError::Exhausted)
    }

    /// Elements already pulled from members are never dropped: an error after
    /// the first element ends the batch and is reported by the next call.
    fn fetch_batch(&mut self, count: usize) -> Result<Vec<T>, SourceError> {
        let mut batch = Vec::new();
        while batch.len() < count {
            match self.fetch() {
                Ok(element) => batch.push(element),
                Err(SourceError::Exhausted) => break,
                Err(e) if batch.is_empty() => return Err(e),
                Err(e) => {
                    debug!("Deferring merged error after {} elements: {e}", batch.len());
                    self.deferred = Some(e);
                    break;
                }
            }
        }
        Ok(batch)
    }

    fn reset(&mut self) -> Result<(), SourceError> {
        self.current = 0;
        self.deferred = None;
        Ok(())
    }
}

impl<T> std::fmt::Debug for MergedSource<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MergedSource(sources={}, current={}, deferred={:?})",
            self.sources.len(),
            self.current,
            self.deferred
        )
    }
}
