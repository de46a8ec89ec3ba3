#![warn(clippy::pedantic)]

pub mod binary;
pub mod datetime;
pub mod display;
pub mod document;
pub mod element_type;
pub mod error;
pub mod object_id;
pub mod value;

pub use binary::Binary;
pub use bson_wire::BinarySubtype;
pub use datetime::{TimestampParts, UtcDateTime};
pub use document::Document;
pub use element_type::ElementType;
pub use error::TypeError;
pub use object_id::ObjectId;
pub use value::{Regex, Value};
