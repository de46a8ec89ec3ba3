//! Walking a file of back-to-back documents.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bson_decoder::{BsonDecoder, DecodeError};
use bson_types::Document;

/// One decoded document and where it sat in the file.
#[derive(Debug)]
pub struct Located {
    pub index: usize,
    pub offset: usize,
    pub size: usize,
    pub document: Document,
}

/// A decode failure pinned to its document.
#[derive(Debug, thiserror::Error)]
#[error("document {index} at offset {offset}: {source}")]
pub struct LocatedError {
    pub index: usize,
    pub offset: usize,
    pub source: DecodeError,
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Iterator over the documents in a buffer.
///
/// Stops after the first error.
pub struct Documents<'a> {
    decoder: BsonDecoder,
    rest: &'a [u8],
    offset: usize,
    index: usize,
    failed: bool,
}

impl<'a> Documents<'a> {
    pub fn new(bytes: &'a [u8], decoder: BsonDecoder) -> Self {
        Self {
            decoder,
            rest: bytes,
            offset: 0,
            index: 0,
            failed: false,
        }
    }
}

impl Iterator for Documents<'_> {
    type Item = Result<Located, LocatedError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        match self.decoder.read_document(self.rest) {
            Ok((document, next)) => {
                let size = self.rest.len() - next.len();
                let located = Located {
                    index: self.index,
                    offset: self.offset,
                    size,
                    document,
                };
                self.rest = next;
                self.offset += size;
                self.index += 1;
                Some(Ok(located))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(LocatedError {
                    index: self.index,
                    offset: self.offset,
                    source,
                }))
            }
        }
    }
}
