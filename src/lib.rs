pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod menu;
pub mod model;
pub mod signal;
pub mod store;
pub mod tools;

use anyhow::Result;
use console::{Term, style};

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style("Press Enter to continue...").dim());
    term.read_line()?;
    Ok(())
}
