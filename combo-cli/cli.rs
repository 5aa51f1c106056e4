use std::path::PathBuf;

use clap::{
  ArgAction,
  Parser,
};

#[derive(Parser, Debug)]
#[command(
  name = "lazy-combo",
  about = "Replay an interaction script against a lazy search-select control",
  long_about = None,
  version
)]
pub struct Args {
  /// Load combo settings from a TOML file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  pub config_file: Option<PathBuf>,

  /// Allow selecting several options (overrides the config file)
  #[arg(long)]
  pub multi: bool,

  /// Text shown while nothing is selected (overrides the config file)
  #[arg(long, value_name = "TEXT")]
  pub placeholder: Option<String>,

  /// Read options from a file, one `value=label` per line
  #[arg(long = "options", value_name = "FILE")]
  pub options_file: Option<PathBuf>,

  /// Number of generated options when no options file is given
  #[arg(long, value_name = "N", default_value_t = 120)]
  pub items: usize,

  /// Simulated latency of every page fetch
  #[arg(long = "latency-ms", value_name = "MS", default_value_t = 0)]
  pub latency_ms: u64,

  /// Read the interaction script from a file instead of stdin
  #[arg(long, value_name = "FILE")]
  pub script: Option<PathBuf>,

  /// Print snapshots as JSON
  #[arg(long)]
  pub json: bool,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  pub verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE")]
  pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let args = Args::try_parse_from(["lazy-combo"]).unwrap();
    assert_eq!(args.items, 120);
    assert_eq!(args.latency_ms, 0);
    assert_eq!(args.verbosity, 0);
    assert!(!args.multi && !args.json);
  }

  #[test]
  fn repeated_verbosity_and_paths() {
    let args = Args::try_parse_from([
      "lazy-combo",
      "-vv",
      "--multi",
      "-c",
      "combo.toml",
      "--log",
      "combo.log",
      "--latency-ms",
      "40",
    ])
    .unwrap();
    assert_eq!(args.verbosity, 2);
    assert!(args.multi);
    assert_eq!(args.config_file, Some(PathBuf::from("combo.toml")));
    assert_eq!(args.log_file, Some(PathBuf::from("combo.log")));
    assert_eq!(args.latency_ms, 40);
  }
}
