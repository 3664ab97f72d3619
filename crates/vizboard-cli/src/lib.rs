//! Library components of the `vizboard` command-line client.

pub mod logging;
pub mod rules;
