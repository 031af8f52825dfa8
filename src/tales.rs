//! Template expression helpers.
//!
//! Casing, comparison, date and form helpers registered with Tera through
//! [`register`].

pub use ztal_tales::*;
