use std::{
  fs,
  path::Path,
};

use anyhow::{
  Context,
  Result,
};
use lazy_combo::{
  ComboOption,
  StaticSource,
};

/// Options listed in `path`, one per line as `value=label`. A line without
/// `=` uses the same text for both; blank lines and `#` comments are skipped.
pub fn load(path: &Path) -> Result<StaticSource> {
  let contents = fs::read_to_string(path)
    .with_context(|| format!("failed to read options from {}", path.display()))?;
  Ok(parse(&contents))
}

pub fn parse(contents: &str) -> StaticSource {
  contents
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'))
    .map(|line| {
      match line.split_once('=') {
        Some((value, label)) => ComboOption::new(value.trim(), label.trim()),
        None => ComboOption::new(line, line),
      }
    })
    .collect()
}

/// `count` numbered options, `item-1` / `Item 1` onwards.
pub fn generate(count: usize) -> StaticSource {
  (1..=count)
    .map(|i| ComboOption::new(format!("item-{i}"), format!("Item {i}")))
    .collect()
}
