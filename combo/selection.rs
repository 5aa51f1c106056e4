//! Single and multi selection.
//!
//! The host only ever sees `Option<Value>`: nothing selected is `None`, never
//! an empty list. The mode is fixed when the control is built, so the
//! selection is stored as a tagged variant rather than re-inspected on every
//! call.

use serde::{
  Deserialize,
  Serialize,
};

/// A non-empty selection as exchanged with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
  Single(String),
  /// Never empty; use [`Value::multi`] to build one from an arbitrary list.
  Multi(Vec<String>),
}

impl Value {
  pub fn single(value: impl Into<String>) -> Option<Self> {
    Some(Self::Single(value.into()))
  }

  /// Wraps `values`, mapping an empty list to `None`.
  pub fn multi<I, S>(values: I) -> Option<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
      None
    } else {
      Some(Self::Multi(values))
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
  #[default]
  Single,
  Multi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
  Single(Option<String>),
  Multi(Vec<String>),
}

impl Selection {
  /// Builds a selection in `mode`, coercing a value of the other shape: a
  /// single value becomes a one element list, a list keeps its first entry.
  pub fn new(mode: SelectionMode, value: Option<Value>) -> Self {
    match (mode, value) {
      (SelectionMode::Single, None) => Self::Single(None),
      (SelectionMode::Single, Some(Value::Single(value))) => Self::Single(Some(value)),
      (SelectionMode::Single, Some(Value::Multi(values))) => {
        Self::Single(values.into_iter().next())
      },
      (SelectionMode::Multi, None) => Self::Multi(Vec::new()),
      (SelectionMode::Multi, Some(Value::Single(value))) => Self::Multi(vec![value]),
      (SelectionMode::Multi, Some(Value::Multi(values))) => Self::Multi(values),
    }
  }

  pub fn mode(&self) -> SelectionMode {
    match self {
      Self::Single(_) => SelectionMode::Single,
      Self::Multi(_) => SelectionMode::Multi,
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      Self::Single(value) => value.is_none(),
      Self::Multi(values) => values.is_empty(),
    }
  }

  /// The selection as the host sees it.
  pub fn value(&self) -> Option<Value> {
    match self {
      Self::Single(value) => value.clone().map(Value::Single),
      Self::Multi(values) => Value::multi(values.iter().cloned()),
    }
  }

  /// Replaces the selection with a host supplied value.
  pub fn set(&mut self, value: Option<Value>) {
    *self = Self::new(self.mode(), value);
  }

  /// Single mode: `option_value` becomes the selection.
  /// Multi mode: `option_value` is removed if present, appended otherwise.
  ///
  /// Returns the value to emit.
  pub fn toggle(&mut self, option_value: &str) -> Option<Value> {
    match self {
      Self::Single(value) => {
        *value = Some(option_value.to_string());
      },
      Self::Multi(values) => {
        if let Some(index) = values.iter().position(|v| v == option_value) {
          values.remove(index);
        } else {
          values.push(option_value.to_string());
        }
      },
    }
    self.value()
  }

  /// Drops everything. Always emits `None`, whatever the mode.
  pub fn clear(&mut self) -> Option<Value> {
    match self {
      Self::Single(value) => *value = None,
      Self::Multi(values) => values.clear(),
    }
    None
  }

  pub fn is_selected(&self, option_value: &str) -> bool {
    match self {
      Self::Single(value) => value.as_deref() == Some(option_value),
      Self::Multi(values) => values.iter().any(|v| v == option_value),
    }
  }
}

#[cfg(test)]
mod tests {
  use quickcheck::quickcheck;

  use super::*;

  #[test]
  fn single_toggle_replaces() {
    let mut selection = Selection::new(SelectionMode::Single, Value::single("a"));
    assert_eq!(selection.toggle("b"), Value::single("b"));
    assert!(selection.is_selected("b"));
    assert!(!selection.is_selected("a"));
    // selecting the current value again keeps it
    assert_eq!(selection.toggle("b"), Value::single("b"));
  }

  #[test]
  fn multi_toggle_adds_then_removes() {
    let mut selection = Selection::new(SelectionMode::Multi, None);
    assert_eq!(selection.toggle("a"), Value::multi(["a"]));
    assert_eq!(selection.toggle("b"), Value::multi(["a", "b"]));
    assert_eq!(selection.toggle("a"), Value::multi(["b"]));
  }

  #[test]
  fn removing_last_multi_value_emits_none() {
    let mut selection = Selection::new(SelectionMode::Multi, Value::multi(["only"]));
    assert_eq!(selection.toggle("only"), None);
    assert!(selection.is_empty());
  }

  #[test]
  fn clear_emits_none_in_both_modes() {
    let mut single = Selection::new(SelectionMode::Single, Value::single("a"));
    let mut multi = Selection::new(SelectionMode::Multi, Value::multi(["a", "b"]));
    assert_eq!(single.clear(), None);
    assert_eq!(multi.clear(), None);
    assert!(single.is_empty() && multi.is_empty());
  }

  #[test]
  fn values_are_coerced_to_the_mode() {
    let multi = Selection::new(SelectionMode::Multi, Value::single("a"));
    assert_eq!(multi, Selection::Multi(vec!["a".into()]));

    let single = Selection::new(SelectionMode::Single, Value::multi(["x", "y"]));
    assert_eq!(single, Selection::Single(Some("x".into())));

    let empty = Selection::new(SelectionMode::Multi, Some(Value::Multi(Vec::new())));
    assert_eq!(empty.value(), None);
  }

  #[test]
  fn value_multi_never_builds_empty_lists() {
    assert_eq!(Value::multi(Vec::<String>::new()), None);
  }

  quickcheck! {
    fn multi_never_emits_empty_list(toggles: Vec<u8>) -> bool {
      let mut selection = Selection::new(SelectionMode::Multi, None);
      toggles.iter().all(|t| {
        // a small alphabet so values get toggled off as often as on
        let emitted = selection.toggle(&(t % 4).to_string());
        match emitted {
          None => selection.is_empty(),
          Some(Value::Multi(values)) => !values.is_empty(),
          Some(Value::Single(_)) => false,
        }
      })
    }

    fn multi_membership_matches_toggle_parity(toggles: Vec<u8>) -> bool {
      let mut selection = Selection::new(SelectionMode::Multi, None);
      for t in &toggles {
        selection.toggle(&(t % 4).to_string());
      }
      (0..4u8).all(|v| {
        let flips = toggles.iter().filter(|t| *t % 4 == v).count();
        selection.is_selected(&v.to_string()) == (flips % 2 == 1)
      })
    }
  }
}
