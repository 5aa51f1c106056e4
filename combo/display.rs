//! Summary text for the closed control.

use std::borrow::Cow;

use crate::{
  option::ComboOption,
  selection::Selection,
};

/// Computes what the closed control shows.
///
/// Selected values are looked up in whatever page window is currently
/// loaded. A value that is not there (scrolled past, never fetched, or from
/// an earlier query) shows as its raw id instead of disappearing.
pub fn resolve<'a>(
  selection: &'a Selection,
  options: &'a [ComboOption],
  placeholder: &'a str,
) -> Cow<'a, str> {
  match selection {
    Selection::Single(None) => Cow::Borrowed(placeholder),
    Selection::Single(Some(value)) => Cow::Borrowed(label_for(value, options)),
    Selection::Multi(values) => {
      match values.as_slice() {
        [] => Cow::Borrowed(placeholder),
        [value] => Cow::Borrowed(label_for(value, options)),
        values => Cow::Owned(format!("{} items selected", values.len())),
      }
    },
  }
}

fn label_for<'a>(value: &'a str, options: &'a [ComboOption]) -> &'a str {
  options
    .iter()
    .find(|option| option.value == value)
    .map_or(value, |option| option.label.as_str())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::selection::{
    SelectionMode,
    Value,
  };

  const PLACEHOLDER: &str = "Pick one";

  fn loaded() -> Vec<ComboOption> {
    vec![ComboOption::new("de", "Germany"), ComboOption::new("fr", "France")]
  }

  fn show(mode: SelectionMode, value: Option<Value>) -> String {
    resolve(&Selection::new(mode, value), &loaded(), PLACEHOLDER).into_owned()
  }

  #[test]
  fn nothing_selected_shows_placeholder() {
    assert_eq!(show(SelectionMode::Single, None), PLACEHOLDER);
    assert_eq!(show(SelectionMode::Multi, None), PLACEHOLDER);
    assert_eq!(show(SelectionMode::Multi, Some(Value::Multi(vec![]))), PLACEHOLDER);
  }

  #[test]
  fn known_values_show_their_label() {
    assert_eq!(show(SelectionMode::Single, Value::single("fr")), "France");
    assert_eq!(show(SelectionMode::Multi, Value::multi(["de"])), "Germany");
  }

  #[test]
  fn unknown_values_fall_back_to_the_raw_id() {
    assert_eq!(show(SelectionMode::Single, Value::single("X")), "X");
    assert_eq!(show(SelectionMode::Multi, Value::multi(["X"])), "X");
    let selection = Selection::Single(Some("X".into()));
    let empty = resolve(&selection, &[], PLACEHOLDER);
    assert_eq!(empty, "X");
  }

  #[test]
  fn several_values_are_counted() {
    assert_eq!(
      show(SelectionMode::Multi, Value::multi(["de", "fr", "zz"])),
      "3 items selected"
    );
    assert_eq!(show(SelectionMode::Multi, Value::multi(["de", "fr"])), "2 items selected");
  }
}
