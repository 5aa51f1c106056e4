use serde::{
  Deserialize,
  Serialize,
};

/// A selectable entry as produced by an [`OptionSource`](crate::OptionSource).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComboOption {
  pub label: String,
  pub value: String,
}

impl ComboOption {
  pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
    Self {
      label: label.into(),
      value: value.into(),
    }
  }
}

/// Arguments of a single page fetch. The control owns `offset` and `limit`,
/// interpreting `search_term` is up to the source; an empty term asks for
/// the unfiltered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
  pub search_term: String,
  pub offset:      usize,
  pub limit:       usize,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fetch_params_serialize_for_query_forwarding() {
    let params = FetchParams {
      search_term: "ab".into(),
      offset:      50,
      limit:       50,
    };
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "searchTerm": "ab", "offset": 50, "limit": 50 })
    );
  }
}
