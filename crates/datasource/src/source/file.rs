use super::Source;
use crate::error::SourceError;
use log::{debug, warn};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What `fetch_batch` does when the source already reports no more data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustedBatch {
    /// Fail the whole call with [`SourceError::Exhausted`].
    #[default]
    Fail,
    /// Return an empty batch, like the in-memory sources do.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileConfig {
    pub exhausted_batch: ExhaustedBatch,
}

impl FileConfig {
    pub fn with_exhausted_batch(mut self, exhausted_batch: ExhaustedBatch) -> Self {
        self.exhausted_batch = exhausted_batch;
        self
    }
}

/// A source reading whitespace-delimited tokens from a text file.
///
/// Each token is parsed with `T::from_str`. The read position lives in the
/// file handle; there is no separate cursor.
///
/// # End-of-input caveat
///
/// `has_more` reports the end-of-input indicator as last observed by a read.
/// It is only accurate right after a read attempt: a file ending in
/// whitespace reports more data after its last token, and the following
/// `fetch` then fails with [`SourceError::Exhausted`]. Callers that need a
/// definite answer must attempt the fetch.
///
/// A token that fails to parse is not consumed. Every later `fetch` reports
/// the same [`SourceError::Parse`] until `reset`.
#[derive(Debug)]
pub struct FileSource<T> {
    reader: BufReader<File>,
    path: PathBuf,
    end_of_input: bool,
    stalled: Option<Vec<u8>>,
    config: FileConfig,
    _element: PhantomData<fn() -> T>,
}

impl<T> FileSource<T> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        Self::open_with_config(path, FileConfig::default())
    }

    #[tracing::instrument(level = "debug", skip(path, config), fields(path = %path.as_ref().display()))]
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: FileConfig,
    ) -> Result<Self, SourceError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(SourceError::invalid_argument("file path cannot be empty"));
        }

        let file = File::open(path).map_err(|e| {
            SourceError::from_io_error(e, &format!("Failed to open token file: {path:?}"))
        })?;
        debug!("Opened token file {path:?}");

        Ok(FileSource {
            reader: BufReader::new(file),
            path: path.to_path_buf(),
            end_of_input: false,
            stalled: None,
            config,
            _element: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> FileConfig {
        self.config
    }

    /// Reads the raw bytes of the next whitespace-delimited token, or `None`
    /// at end of input.
    fn read_token(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        let mut token = Vec::new();
        loop {
            let buf = self.reader.fill_buf().map_err(|e| {
                SourceError::from_io_error(e, &format!("Failed to read {:?}", self.path))
            })?;
            if buf.is_empty() {
                self.end_of_input = true;
                break;
            }

            let mut consumed = 0;
            let mut complete = false;
            for &byte in buf {
                if is_delimiter(byte) {
                    if !token.is_empty() {
                        complete = true;
                        break;
                    }
                } else {
                    token.push(byte);
                }
                consumed += 1;
            }
            self.reader.consume(consumed);

            if complete {
                break;
            }
        }

        Ok((!token.is_empty()).then_some(token))
    }

    fn parse_error(&self, raw: &[u8], details: impl Display) -> SourceError {
        SourceError::Parse {
            context: self.path.display().to_string(),
            token: String::from_utf8_lossy(raw).into_owned(),
            details: details.to_string(),
        }
    }
}

fn is_delimiter(byte: u8) -> bool {
    // ASCII whitespace plus vertical tab, which `is_ascii_whitespace` omits.
    byte.is_ascii_whitespace() || byte == 0x0b
}

impl<T> Source<T> for FileSource<T>
where
    T: FromStr,
    T::Err: Display,
{
    /// See the end-of-input caveat on [`FileSource`].
    fn has_more(&self) -> bool {
        !self.end_of_input || self.stalled.is_some()
    }

    fn fetch(&mut self) -> Result<T, SourceError> {
        if !self.has_more() {
            return Err(SourceError::Exhausted);
        }

        let raw = match self.stalled.take() {
            Some(raw) => raw,
            None => match self.read_token()? {
                Some(raw) => raw,
                None => return Err(SourceError::Exhausted),
            },
        };

        let parsed = match std::str::from_utf8(&raw) {
            Ok(token) => token.parse::<T>().map_err(|e| self.parse_error(&raw, e)),
            Err(e) => Err(self.parse_error(&raw, e)),
        };
        if let Err(error) = &parsed {
            warn!("{error}");
            // Keep the bytes so every later fetch reports the same token.
            self.stalled = Some(raw);
        }
        parsed
    }

    /// Fails up front when no data is left (unless configured with
    /// [`ExhaustedBatch::Empty`]); otherwise stops quietly at the first
    /// token that is missing or malformed. I/O errors are propagated.
    fn fetch_batch(&mut self, count: usize) -> Result<Vec<T>, SourceError> {
        if !self.has_more() {
            return match self.config.exhausted_batch {
                ExhaustedBatch::Fail => Err(SourceError::Exhausted),
                ExhaustedBatch::Empty => Ok(Vec::new()),
            };
        }

        let mut batch = Vec::new();
        while batch.len() < count {
            match self.fetch() {
                Ok(element) => batch.push(element),
                Err(SourceError::Exhausted | SourceError::Parse { .. }) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(batch)
    }

    #[tracing::instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn reset(&mut self) -> Result<(), SourceError> {
        self.reader.seek(SeekFrom::Start(0)).map_err(|e| {
            SourceError::from_io_error(e, &format!("Failed to rewind {:?}", self.path))
        })?;
        self.end_of_input = false;
        self.stalled = None;
        Ok(())
    }
}
