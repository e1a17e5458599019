use std::{fs::File, io::prelude::*};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::report::{self, ReportRow};

#[derive(Clone, Copy, Debug, Default, ValueEnum, Serialize, Deserialize)]
pub enum Format {
  /// JSON array, suitable for piping into other tools
  #[default]
  Json,
  /// Table for reading in a terminal
  Text,
}

/// Renders the report in the requested format
pub fn render(rows: &[ReportRow], format: &Format) -> Result<String> {
  match format {
    Format::Json => Ok(serde_json::to_string_pretty(rows)?),
    Format::Text => report::to_stdout_table(rows),
  }
}

pub fn output(rows: &[ReportRow], format: &Format, filename: &Option<String>) -> Result<()> {
  let output = render(rows, format)?;

  match filename {
    Some(filename) => {
      let mut file = File::create(filename).with_context(|| format!("Failed to create {filename}"))?;
      writeln!(file, "{output}")?;
    }
    None => {
      println!("{output}");
    }
  }

  Ok(())
}
