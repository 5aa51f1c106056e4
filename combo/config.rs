use std::{
  fmt,
  fs,
  path::Path,
  time::Duration,
};

use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  DEFAULT_PLACEHOLDER,
  error::ConfigLoadError,
  selection::SelectionMode,
};

/// How the control treats triggers and responses that overlap a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RacePolicy {
  /// Triggers seen while a fetch is outstanding are dropped and every
  /// response is applied as current, even if the search term moved on
  /// meanwhile.
  #[default]
  DropWhileBusy,
  /// Responses for an outdated query are discarded and the current query is
  /// fetched again as soon as the guard frees up.
  RefetchLatest,
}

/// Host facing settings of a combo. Page size and debounce interval are
/// fixed and intentionally absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ComboConfig {
  pub multi_select:     bool,
  pub disabled:         bool,
  pub placeholder:      String,
  pub race_policy:      RacePolicy,
  /// Upper bound for a single fetch. Without one a source that never
  /// answers keeps the guard taken until the control is dropped.
  pub fetch_timeout_ms: Option<u64>,
}

impl Default for ComboConfig {
  fn default() -> Self {
    Self {
      multi_select:     false,
      disabled:         false,
      placeholder:      DEFAULT_PLACEHOLDER.to_string(),
      race_policy:      RacePolicy::default(),
      fetch_timeout_ms: None,
    }
  }
}

impl ComboConfig {
  pub fn from_toml(contents: &str) -> Result<Self, ConfigLoadError> {
    Ok(toml::from_str(contents)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
    let contents = fs::read_to_string(path)?;
    Self::from_toml(&contents)
  }

  pub fn selection_mode(&self) -> SelectionMode {
    if self.multi_select {
      SelectionMode::Multi
    } else {
      SelectionMode::Single
    }
  }

  pub fn fetch_timeout(&self) -> Option<Duration> {
    self.fetch_timeout_ms.map(Duration::from_millis)
  }
}

pub type Hook = Box<dyn FnMut() + Send>;

/// Pass-through callbacks for trigger interaction. The control calls them
/// as-is and never changes what the host does in response.
#[derive(Default)]
pub struct Hooks {
  on_click: Option<Hook>,
  on_focus: Option<Hook>,
  on_blur:  Option<Hook>,
}

impl Hooks {
  pub fn on_click(mut self, hook: impl FnMut() + Send + 'static) -> Self {
    self.on_click = Some(Box::new(hook));
    self
  }

  pub fn on_focus(mut self, hook: impl FnMut() + Send + 'static) -> Self {
    self.on_focus = Some(Box::new(hook));
    self
  }

  pub fn on_blur(mut self, hook: impl FnMut() + Send + 'static) -> Self {
    self.on_blur = Some(Box::new(hook));
    self
  }

  pub(crate) fn click(&mut self) {
    if let Some(hook) = &mut self.on_click {
      hook();
    }
  }

  pub(crate) fn focus(&mut self) {
    if let Some(hook) = &mut self.on_focus {
      hook();
    }
  }

  pub(crate) fn blur(&mut self) {
    if let Some(hook) = &mut self.on_blur {
      hook();
    }
  }
}

impl fmt::Debug for Hooks {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Hooks")
      .field("on_click", &self.on_click.is_some())
      .field("on_focus", &self.on_focus.is_some())
      .field("on_blur", &self.on_blur.is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn empty_config_uses_defaults() {
    let config = ComboConfig::from_toml("").unwrap();
    assert_eq!(config, ComboConfig::default());
    assert_eq!(config.placeholder, "Select an option...");
    assert_eq!(config.selection_mode(), SelectionMode::Single);
    assert_eq!(config.fetch_timeout(), None);
  }

  #[test]
  fn kebab_case_fields_parse() {
    let config = ComboConfig::from_toml(
      r#"
        multi-select = true
        placeholder = "Pick countries"
        race-policy = "refetch-latest"
        fetch-timeout-ms = 1500
      "#,
    )
    .unwrap();
    assert_eq!(config.selection_mode(), SelectionMode::Multi);
    assert_eq!(config.placeholder, "Pick countries");
    assert_eq!(config.race_policy, RacePolicy::RefetchLatest);
    assert_eq!(config.fetch_timeout(), Some(Duration::from_millis(1500)));
  }

  #[test]
  fn unknown_fields_are_rejected() {
    let err = ComboConfig::from_toml("page-size = 10").unwrap_err();
    assert!(matches!(err, ConfigLoadError::BadConfig(_)));
  }

  #[test]
  fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "disabled = true").unwrap();
    let config = ComboConfig::load(file.path()).unwrap();
    assert!(config.disabled);

    let missing = ComboConfig::load(file.path().with_extension("missing"));
    assert!(matches!(missing, Err(ConfigLoadError::Error(_))));
  }
}
