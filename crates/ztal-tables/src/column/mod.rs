//! Column definitions
//!
//! - `Column`: the capability set every column shares
//! - `RecordColumn`: reads a named field from associative rows
//! - `ObjectColumn`: reads typed rows through an accessor and orders them with a comparator

pub mod array;
pub mod base;
pub mod object;

pub use array::RecordColumn;
pub use base::{Column, SortDirection};
pub use object::ObjectColumn;
