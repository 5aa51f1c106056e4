//! The options collaborator: whatever the host plugs in to produce pages.

use std::future::Future;

use async_trait::async_trait;

use crate::{
  error::FetchError,
  option::{
    ComboOption,
    FetchParams,
  },
};

/// Supplies pages of options.
///
/// Implementations must accept an empty `search_term` (the unfiltered
/// list) and report "no results" as an empty page rather than an error.
/// They are trusted not to repeat options within or across pages.
#[async_trait]
pub trait OptionSource: Send + Sync {
  async fn fetch_options(&self, params: FetchParams) -> Result<Vec<ComboOption>, FetchError>;
}

/// Adapts a closure returning a future into an [`OptionSource`].
pub struct FnSource<F> {
  fetch: F,
}

pub fn source_fn<F, Fut>(fetch: F) -> FnSource<F>
where
  F: Fn(FetchParams) -> Fut + Send + Sync,
  Fut: Future<Output = Result<Vec<ComboOption>, FetchError>> + Send,
{
  FnSource { fetch }
}

#[async_trait]
impl<F, Fut> OptionSource for FnSource<F>
where
  F: Fn(FetchParams) -> Fut + Send + Sync,
  Fut: Future<Output = Result<Vec<ComboOption>, FetchError>> + Send,
{
  async fn fetch_options(&self, params: FetchParams) -> Result<Vec<ComboOption>, FetchError> {
    (self.fetch)(params).await
  }
}

/// An in-memory catalogue. Labels are matched case-insensitively by
/// substring, then the matches are sliced by `offset`/`limit`.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
  options: Vec<ComboOption>,
}

impl StaticSource {
  pub fn new(options: Vec<ComboOption>) -> Self {
    Self { options }
  }

  pub fn len(&self) -> usize {
    self.options.len()
  }

  pub fn is_empty(&self) -> bool {
    self.options.is_empty()
  }

  pub fn query(&self, params: &FetchParams) -> Vec<ComboOption> {
    let needle = params.search_term.to_lowercase();
    self
      .options
      .iter()
      .filter(|option| needle.is_empty() || option.label.to_lowercase().contains(&needle))
      .skip(params.offset)
      .take(params.limit)
      .cloned()
      .collect()
  }
}

impl FromIterator<ComboOption> for StaticSource {
  fn from_iter<I: IntoIterator<Item = ComboOption>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

#[async_trait]
impl OptionSource for StaticSource {
  async fn fetch_options(&self, params: FetchParams) -> Result<Vec<ComboOption>, FetchError> {
    Ok(self.query(&params))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fruit() -> StaticSource {
    ["Apple", "Apricot", "Banana", "Blueberry", "Cherry"]
      .into_iter()
      .map(|label| ComboOption::new(label.to_lowercase(), label))
      .collect()
  }

  fn params(term: &str, offset: usize, limit: usize) -> FetchParams {
    FetchParams {
      search_term: term.into(),
      offset,
      limit,
    }
  }

  #[tokio::test]
  async fn empty_term_pages_through_everything() {
    let source = fruit();
    let first = source.fetch_options(params("", 0, 3)).await.unwrap();
    let second = source.fetch_options(params("", 3, 3)).await.unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 2);
    assert_eq!(second[1].value, "cherry");
  }

  #[tokio::test]
  async fn term_filters_case_insensitively() {
    let page = fruit().fetch_options(params("AP", 0, 50)).await.unwrap();
    let values: Vec<_> = page.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["apple", "apricot"]);
  }

  #[tokio::test]
  async fn no_match_is_an_empty_page() {
    let page = fruit().fetch_options(params("kiwi", 0, 50)).await.unwrap();
    assert!(page.is_empty());
  }

  #[tokio::test]
  async fn closures_adapt_into_sources() {
    let source = source_fn(|params: FetchParams| async move {
      if params.offset > 0 {
        Err(FetchError::failed("no second page"))
      } else {
        Ok(vec![ComboOption::new("x", params.search_term)])
      }
    });
    let page = source.fetch_options(params("echo", 0, 50)).await.unwrap();
    assert_eq!(page[0].label, "echo");
    assert!(source.fetch_options(params("", 50, 50)).await.is_err());
  }
}
