#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

pub use encoder::{BsonEncoder, EncoderOptions};
pub use error::EncodeError;
