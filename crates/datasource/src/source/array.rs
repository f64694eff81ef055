use super::Source;
use crate::error::SourceError;
use log::debug;

pub const DEFAULT_GROWTH_FACTOR: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Multiplier applied to the capacity when an append finds the buffer full.
    pub growth_factor: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl ArrayConfig {
    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    fn validate(&self) -> Result<(), SourceError> {
        if self.growth_factor < 2 {
            return Err(SourceError::invalid_argument(format!(
                "growth factor must be at least 2, got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }
}

/// An in-memory source over an owned, growable buffer with a read cursor.
///
/// `capacity` is tracked separately from the `Vec` so that growth follows the
/// configured factor exactly: a full buffer of capacity `c` grows to
/// `c * growth_factor` on the next append (or to 1 when `c` is 0).
///
/// Invariants: `cursor <= data.len() <= capacity <= data.capacity()`.
#[derive(Debug)]
pub struct ArraySource<T> {
    data: Vec<T>,
    capacity: usize,
    cursor: usize,
    growth_factor: usize,
}

impl<T: Clone> ArraySource<T> {
    /// Copies `elements` into a buffer sized to exactly their length.
    pub fn new(elements: &[T]) -> Result<Self, SourceError> {
        Self::with_config(elements, ArrayConfig::default())
    }

    pub fn with_config(elements: &[T], config: ArrayConfig) -> Result<Self, SourceError> {
        config.validate()?;

        let mut data = Vec::new();
        data.try_reserve_exact(elements.len()).map_err(|e| {
            SourceError::from_reserve_error(e, "array source construction", elements.len())
        })?;
        data.extend_from_slice(elements);

        Ok(ArraySource {
            capacity: elements.len(),
            data,
            cursor: 0,
            growth_factor: config.growth_factor,
        })
    }

    /// Deep copy of the buffer, capacity and cursor.
    pub fn duplicate(&self) -> Result<Self, SourceError> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.capacity).map_err(|e| {
            SourceError::from_reserve_error(e, "array source duplicate", self.capacity)
        })?;
        data.extend_from_slice(&self.data);

        Ok(ArraySource {
            data,
            capacity: self.capacity,
            cursor: self.cursor,
            growth_factor: self.growth_factor,
        })
    }
}

impl<T> ArraySource<T> {
    pub fn append(&mut self, value: T) -> Result<(), SourceError> {
        if self.data.len() == self.capacity {
            self.grow()?;
        }
        self.data.push(value);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), SourceError> {
        let new_capacity = self
            .capacity
            .checked_mul(self.growth_factor)
            .ok_or_else(|| SourceError::AllocationFailure {
                context: "array source growth".to_string(),
                requested: usize::MAX,
                details: "capacity overflow".to_string(),
            })?
            .max(1);

        self.data
            .try_reserve_exact(new_capacity - self.data.len())
            .map_err(|e| SourceError::from_reserve_error(e, "array source growth", new_capacity))?;

        debug!(
            "Array source grew from {} to {} elements",
            self.capacity, new_capacity
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// Moves the cursor back by one; a no-op at the start.
    pub fn step_back(&mut self) -> &mut Self {
        self.cursor = self.cursor.saturating_sub(1);
        self
    }

    /// Steps back and returns the cursor position held before the move.
    pub fn step_back_keep(&mut self) -> usize {
        let previous = self.cursor;
        self.step_back();
        previous
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Clone> Source<T> for ArraySource<T> {
    fn has_more(&self) -> bool {
        self.cursor < self.data.len()
    }

    fn fetch(&mut self) -> Result<T, SourceError> {
        let element = self
            .data
            .get(self.cursor)
            .cloned()
            .ok_or(SourceError::Exhausted)?;
        self.cursor += 1;
        Ok(element)
    }

    fn fetch_batch(&mut self, count: usize) -> Result<Vec<T>, SourceError> {
        let take = count.min(self.remaining());
        let mut batch = Vec::new();
        batch
            .try_reserve_exact(take)
            .map_err(|e| SourceError::from_reserve_error(e, "array source batch", take))?;
        batch.extend_from_slice(&self.data[self.cursor..self.cursor + take]);
        self.cursor += take;
        Ok(batch)
    }

    fn reset(&mut self) -> Result<(), SourceError> {
        self.cursor = 0;
        Ok(())
    }
}
