#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod taxonomy;

pub use taxonomy::*;
