use super::{
    ArrayConfig, ArraySource, DefaultSource, FileConfig, FileSource, MergedSource, Source,
};
use crate::error::SourceError;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Default,
    Array,
    File,
    Merged,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceKind::Default => "default",
            SourceKind::Array => "array",
            SourceKind::File => "file",
            SourceKind::Merged => "merged",
        };
        write!(f, "{name}")
    }
}

/// The closed set of backing stores behind one handle.
///
/// Consumers that hold a `DataSource` only use the [`Source`] operations; the
/// variant decides where the elements come from.
///
/// The [`Source`] impl covers every variant at once, so it needs
/// `T: Clone + Default + FromStr` even for a handle that only ever holds an
/// array. For element types without those impls, use [`ArraySource`] or
/// [`MergedSource`] directly; [`DataSource::as_array_mut`] still works.
#[derive(Debug)]
pub enum DataSource<'a, T> {
    Default(DefaultSource<T>),
    Array(ArraySource<T>),
    File(FileSource<T>),
    Merged(MergedSource<'a, T>),
}

impl<'a, T> DataSource<'a, T> {
    pub fn new_default() -> Self {
        DataSource::Default(DefaultSource::new())
    }

    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        FileSource::open(path).map(DataSource::File)
    }

    pub fn open_file_with_config<P: AsRef<Path>>(
        path: P,
        config: FileConfig,
    ) -> Result<Self, SourceError> {
        FileSource::open_with_config(path, config).map(DataSource::File)
    }

    pub fn merge(sources: Vec<&'a mut dyn Source<T>>) -> Self {
        DataSource::Merged(MergedSource::new(sources))
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            DataSource::Default(_) => SourceKind::Default,
            DataSource::Array(_) => SourceKind::Array,
            DataSource::File(_) => SourceKind::File,
            DataSource::Merged(_) => SourceKind::Merged,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySource<T>> {
        match self {
            DataSource::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArraySource<T>> {
        match self {
            DataSource::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl<T: Clone> DataSource<'_, T> {
    pub fn from_slice(elements: &[T]) -> Result<Self, SourceError> {
        ArraySource::new(elements).map(DataSource::Array)
    }

    pub fn from_slice_with_config(
        elements: &[T],
        config: ArrayConfig,
    ) -> Result<Self, SourceError> {
        ArraySource::with_config(elements, config).map(DataSource::Array)
    }
}

impl<T> Source<T> for DataSource<'_, T>
where
    T: Clone + Default + FromStr,
    T::Err: Display,
{
    fn has_more(&self) -> bool {
        match self {
            DataSource::Default(source) => source.has_more(),
            DataSource::Array(source) => source.has_more(),
            DataSource::File(source) => source.has_more(),
            DataSource::Merged(source) => source.has_more(),
        }
    }

    fn fetch(&mut self) -> Result<T, SourceError> {
        match self {
            DataSource::Default(source) => source.fetch(),
            DataSource::Array(source) => source.fetch(),
            DataSource::File(source) => source.fetch(),
            DataSource::Merged(source) => source.fetch(),
        }
    }

    fn fetch_batch(&mut self, count: usize) -> Result<Vec<T>, SourceError> {
        match self {
            DataSource::Default(source) => source.fetch_batch(count),
            DataSource::Array(source) => source.fetch_batch(count),
            DataSource::File(source) => source.fetch_batch(count),
            DataSource::Merged(source) => source.fetch_batch(count),
        }
    }

    fn reset(&mut self) -> Result<(), SourceError> {
        match self {
            DataSource::Default(source) => source.reset(),
            DataSource::Array(source) => source.reset(),
            DataSource::File(source) => source.reset(),
            DataSource::Merged(source) => source.reset(),
        }
    }
}

impl<T> From<DefaultSource<T>> for DataSource<'_, T> {
    fn from(source: DefaultSource<T>) -> Self {
        DataSource::Default(source)
    }
}

impl<T> From<ArraySource<T>> for DataSource<'_, T> {
    fn from(source: ArraySource<T>) -> Self {
        DataSource::Array(source)
    }
}

impl<T> From<FileSource<T>> for DataSource<'_, T> {
    fn from(source: FileSource<T>) -> Self {
        DataSource::File(source)
    }
}

impl<'a, T> From<MergedSource<'a, T>> for DataSource<'a, T> {
    fn from(source: MergedSource<'a, T>) -> Self {
        DataSource::Merged(source)
    }
}
