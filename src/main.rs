//! # licenseid
//!
//! A tool that identifies which known open-source licenses are present in
//! a piece of text.

use anyhow::Result;
use licenseid::cli::{Cli, run_scan};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  let all_matched = run_scan(cli.into_scan_args())?;
  if !all_matched {
    std::process::exit(1);
  }
  Ok(())
}
