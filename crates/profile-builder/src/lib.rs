//! Rule-based worker profile extraction.
//!
//! Turns a transcript into an open-ended field mapping by literal,
//! case-insensitive keyword matching. Every rule is checked on every call and
//! a rule that does not match leaves its key out of the output entirely.
//!
//! # Example
//!
//! ```rust
//! use profile_builder::{extract_profile_data, JOB_TITLE, START_YEAR};
//!
//! let data = extract_profile_data("I've been a driver for Uber since 2020");
//! assert_eq!(data[JOB_TITLE], "Driver");
//! assert_eq!(data[START_YEAR], 2020);
//! ```

mod extractor;

pub use extractor::{
    extract_profile_data, ProfileData, EMPLOYER, JOB_TITLE, NAME, PLACEHOLDER_NAME, RAW_TEXT,
    START_YEAR,
};
