#![warn(clippy::pedantic)]

pub mod binary;
pub mod boolean;
pub mod element_type;
pub mod error;
pub mod frame;
pub mod primitives;
pub mod text;

pub use binary::BinarySubtype;
pub use boolean::BooleanEncoding;
pub use error::WireError;
