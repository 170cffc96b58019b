//! Lead scout: lead harvesting and best-effort company profiling from public
//! search result pages, with a small demo HTTP server.

// Interdiction stricte de pratiques dangereuses ou non idiomatiques
#![deny(unsafe_code)] // Le code unsafe est interdit
#![warn(missing_docs)] // Toute fonction, struct, enum ou module public doit être documenté
#![deny(unused_must_use)] // Oblige à gérer explicitement les Result et Option
#![deny(nonstandard_style)] // Empêche tout style de code non standard
#![forbid(unsafe_op_in_unsafe_fn)]

// Clippy pour stricte discipline
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)] // Interdit unwrap()
#![deny(clippy::expect_used)] // Interdit expect()
#![warn(clippy::todo)]
#![warn(clippy::unimplemented)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Demo company directory.
pub mod directory;
/// Lead harvesting and CSV snapshots.
pub mod leads;
/// Company profiling from search results, directories and websites.
pub mod profile;
/// Fetch layer, page cache and result page parsing.
pub mod scraping;
/// HTTP server and API routes.
pub mod server;
/// Entry helpers to start the lead scout server.
pub mod start_lead_scout;

#[cfg(test)]
mod test_support;
