//! Form 16 field extraction
//!
//! Turns the flat text of a Form 16 certificate into an [`ExtractionResult`]:
//! - `lookup`: first-match pattern lookup and line-break cleaning
//! - `rules`: one named function per field
//! - `extract`: assembles the record in a fixed order

pub mod extract;
pub mod lookup;
pub mod record;
pub mod rules;

pub use extract::extract;
pub use record::ExtractionResult;
