//! Page fetching: offsets, merging, has-more tracking and the in-flight
//! guard.
//!
//! The paginator never performs I/O. [`Paginator::load_page`] hands out a
//! [`PageRequest`] (or refuses to, while another one is outstanding) and the
//! driver reports back through [`Paginator::complete`].

use crate::{
  PAGE_SIZE,
  SCROLL_THRESHOLD_PX,
  error::FetchError,
  option::{
    ComboOption,
    FetchParams,
  },
};

/// A fetch the control wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
  pub params: FetchParams,
  /// Replace the loaded options instead of appending to them.
  pub reset:  bool,
  /// Query generation the request was issued for.
  pub epoch:  u64,
}

/// Geometry of the scrollable options list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
  pub scroll_top:    f64,
  pub scroll_height: f64,
  pub client_height: f64,
}

impl ScrollMetrics {
  pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
    Self {
      scroll_top,
      scroll_height,
      client_height,
    }
  }

  /// Metrics of a list scrolled all the way down.
  pub fn at_bottom(scroll_height: f64, client_height: f64) -> Self {
    Self::new((scroll_height - client_height).max(0.0), scroll_height, client_height)
  }

  /// Whether the viewport is within [`SCROLL_THRESHOLD_PX`] of the end.
  pub fn near_bottom(&self) -> bool {
    self.scroll_top + self.client_height >= self.scroll_height - SCROLL_THRESHOLD_PX
  }
}

/// What [`Paginator::complete`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
  /// The page was merged; `received` options arrived.
  Applied { received: usize },
  /// The source failed; a first page cleared the list, a later page left it.
  Failed,
  /// The response belonged to an older query and was thrown away.
  Stale,
}

#[derive(Debug)]
pub struct Paginator {
  options:   Vec<ComboOption>,
  offset:    usize,
  has_more:  bool,
  in_flight: bool,
  epoch:     u64,
}

impl Default for Paginator {
  fn default() -> Self {
    Self {
      options:   Vec::new(),
      offset:    0,
      has_more:  true,
      in_flight: false,
      epoch:     0,
    }
  }
}

impl Paginator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn options(&self) -> &[ComboOption] {
    &self.options
  }

  /// Offset the next "load more" will start from.
  pub fn offset(&self) -> usize {
    self.offset
  }

  pub fn has_more(&self) -> bool {
    self.has_more
  }

  pub fn is_fetch_in_flight(&self) -> bool {
    self.in_flight
  }

  pub fn epoch(&self) -> u64 {
    self.epoch
  }

  /// Whether a scroll to the bottom should ask for another page.
  pub fn wants_more(&self) -> bool {
    !self.in_flight && self.has_more
  }

  /// Back to an empty list that expects more. The in-flight guard is left
  /// alone: a request already sent stays outstanding.
  pub fn reset(&mut self) {
    self.options.clear();
    self.offset = 0;
    self.has_more = true;
  }

  /// Starts a new query generation. Called before every first-page load.
  pub fn begin_query(&mut self) -> u64 {
    self.epoch = self.epoch.wrapping_add(1);
    self.epoch
  }

  /// Claims the in-flight guard and describes the fetch to run, or returns
  /// `None` when a fetch is already outstanding. Dropped requests are not
  /// queued.
  pub fn load_page(&mut self, reset: bool, search_term: &str) -> Option<PageRequest> {
    if self.in_flight {
      log::debug!("dropping page request (reset: {reset}): fetch already in flight");
      return None;
    }
    self.in_flight = true;

    let offset = if reset { 0 } else { self.offset };
    log::debug!("loading options page: term {search_term:?}, offset {offset}");
    Some(PageRequest {
      params: FetchParams {
        search_term: search_term.to_string(),
        offset,
        limit: PAGE_SIZE,
      },
      reset,
      epoch: self.epoch,
    })
  }

  /// Applies the response to `request` and releases the guard.
  pub fn complete(
    &mut self,
    request: &PageRequest,
    result: Result<Vec<ComboOption>, FetchError>,
  ) -> PageOutcome {
    self.in_flight = false;

    match result {
      Ok(page) => {
        let received = page.len();
        if request.reset {
          self.options = page;
          self.offset = PAGE_SIZE;
        } else {
          self.options.extend(page);
          self.offset += PAGE_SIZE;
        }
        self.has_more = received == PAGE_SIZE;
        PageOutcome::Applied { received }
      },
      Err(err) => {
        log::warn!(
          "failed to load options (term {:?}, offset {}): {err}",
          request.params.search_term,
          request.params.offset
        );
        if request.reset {
          self.options.clear();
        }
        PageOutcome::Failed
      },
    }
  }

  /// Releases the guard without touching the loaded options.
  pub fn discard(&mut self, request: &PageRequest) -> PageOutcome {
    log::debug!(
      "discarding stale options page for {:?} (epoch {} < {})",
      request.params.search_term,
      request.epoch,
      self.epoch
    );
    self.in_flight = false;
    PageOutcome::Stale
  }
}
