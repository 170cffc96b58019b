//! Search engine result page parsers.

pub mod google;
