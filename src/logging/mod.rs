//! Logging infrastructure for structured console and file output.
//!
//! User-facing messages go through [`Logger`], whose methods emit [`tracing`]
//! events with dedicated targets for stage headers and dry-run reports.  A
//! custom subscriber renders those events in the console style of the tool
//! (`==>` stage headers, `[DRY RUN]` prefixes, dim debug lines) and appends
//! every event, timestamped and ANSI-stripped, to a persistent log file.

mod logger;
mod subscriber;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
