//! CLI command handlers.

mod record;
mod verify;

pub use record::run_record;
pub use verify::run_verify;

#[cfg(test)]
mod tests;
