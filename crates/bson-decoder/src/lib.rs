#![warn(clippy::pedantic)]

pub mod array;
pub mod config;
pub mod decoder;
pub mod element;
pub mod error;
pub mod raw;
pub mod streaming;

pub use array::to_sequence;
pub use config::DecoderOptions;
pub use decoder::{BsonDecoder, decode_document, read_document, read_element};
pub use element::{ElementReader, RawElement};
pub use error::{DecodeError, ErrorKind};
pub use raw::{ID_KEY, RawDocument, read_raw_document};
pub use streaming::DocumentStream;

#[cfg(test)]
mod testutil;
