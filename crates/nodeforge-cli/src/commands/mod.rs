//! Command handlers. Each one turns parsed arguments into calls on the
//! core service and prints the outcome; no generation logic lives here.

pub mod generate;
pub mod help;
pub mod version;
