//! CLI subcommands.

pub mod process;
pub mod regions;
