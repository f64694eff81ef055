//! Pull-based sources of elements with a common contract.
//!
//! A consumer holds a [`DataSource`] (or anything implementing [`Source`]) and
//! calls `fetch`, `has_more`, `fetch_batch` and `reset`; the variant decides
//! whether the elements come from memory, a token file, or a round-robin
//! merge of other sources.
//!
//! ```
//! use datasource::{ArraySource, MergedSource, Source};
//!
//! let mut a = ArraySource::new(&[1i32, 2]).unwrap();
//! let mut b = ArraySource::new(&[10i32, 20, 30]).unwrap();
//! let mut merged = MergedSource::default().with_source(&mut a).with_source(&mut b);
//!
//! assert_eq!(merged.fetch_batch(10).unwrap(), vec![1, 10, 2, 20, 30]);
//! ```

pub mod error;
pub mod source;
pub mod telemetry;

pub use error::SourceError;
pub use source::{
    ArrayConfig, ArraySource, DataSource, DefaultSource, Elements, ExhaustedBatch, FileConfig,
    FileSource, MergedSource, Source, SourceExt, SourceKind,
};

// Re-export logging macros for consistent usage across the crate
pub use log::{debug, error, info, trace, warn};
