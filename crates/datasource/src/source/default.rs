use super::Source;
use crate::error::SourceError;
use std::marker::PhantomData;

/// A source that never runs dry and always yields `T::default()`.
#[derive(Debug, Clone, Copy)]
pub struct DefaultSource<T> {
    _element: PhantomData<fn() -> T>,
}

impl<T> DefaultSource<T> {
    pub fn new() -> Self {
        DefaultSource {
            _element: PhantomData,
        }
    }
}

impl<T> Default for DefaultSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> Source<T> for DefaultSource<T> {
    fn has_more(&self) -> bool {
        true
    }

    fn fetch(&mut self) -> Result<T, SourceError> {
        Ok(T::default())
    }

    fn fetch_batch(&mut self, count: usize) -> Result<Vec<T>, SourceError> {
        let mut batch = Vec::new();
        batch
            .try_reserve_exact(count)
            .map_err(|e| SourceError::from_reserve_error(e, "default source batch", count))?;
        batch.extend(std::iter::repeat_with(T::default).take(count));
        Ok(batch)
    }

    fn reset(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}
