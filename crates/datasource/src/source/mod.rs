pub mod array;
pub mod backend;
pub mod default;
pub mod file;
pub mod merged;
pub mod r#trait;

// Re-exports for ergonomics
pub use array::{ArrayConfig, ArraySource, DEFAULT_GROWTH_FACTOR};
pub use backend::{DataSource, SourceKind};
pub use default::DefaultSource;
pub use file::{ExhaustedBatch, FileConfig, FileSource};
pub use merged::MergedSource;
pub use r#trait::{Elements, Source, SourceExt};
