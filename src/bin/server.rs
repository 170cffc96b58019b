//! Lead scout demo server.
//! Run with: cargo run --bin lead-scout-server

use std::process::ExitCode;

use lead_scout::start_lead_scout;

fn main() -> ExitCode {
    start_lead_scout::run()
}
