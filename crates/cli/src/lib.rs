//! Building blocks of the `hal` command line tool.
//!
//! Each command in [`commands`] takes an already parsed [`HalResource`] and
//! writes its report to any [`Write`](std::io::Write), so the binary only has
//! to wire arguments, configuration and stdio together.
//!
//! [`HalResource`]: rustic_hal::HalResource

pub mod commands;
pub mod error;
pub mod input;
