//! View layer.
//!
//! Template loading from configured directories, translation functions and
//! templated mail.

pub use ztal_view::*;
