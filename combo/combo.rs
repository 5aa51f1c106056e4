//! The control's state machine.
//!
//! [`LazyCombo`] owns every piece of mutable state and is only ever driven
//! from one place at a time, so the in-flight guard is a plain `bool` that
//! is checked and claimed without anything in between. Operations that need
//! I/O return a [`PageRequest`]; whoever drives the combo runs it and feeds
//! the result back through [`LazyCombo::complete`].

use std::{
  borrow::Cow,
  fmt,
};

use serde::Serialize;
use tokio::time::Instant;

use crate::{
  config::{
    ComboConfig,
    Hooks,
    RacePolicy,
  },
  display,
  error::FetchError,
  lifecycle::{
    Lifecycle,
    Transition,
  },
  option::ComboOption,
  pagination::{
    PageRequest,
    Paginator,
    ScrollMetrics,
  },
  scheduler::QueryScheduler,
  selection::{
    Selection,
    SelectionMode,
    Value,
  },
};

pub type ChangeCallback = Box<dyn FnMut(Option<Value>) + Send>;

pub struct LazyCombo {
  config:    ComboConfig,
  lifecycle: Lifecycle,
  query:     QueryScheduler,
  pages:     Paginator,
  selection: Selection,
  hooks:     Hooks,
  on_change: Option<ChangeCallback>,
}

/// A loaded option together with whether it is currently selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotOption {
  #[serde(flatten)]
  pub option:      ComboOption,
  pub is_selected: bool,
}

/// Everything needed to render the control at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboSnapshot {
  pub is_open:             bool,
  pub disabled:            bool,
  pub raw_search_term:     String,
  pub settled_search_term: String,
  pub options:             Vec<SnapshotOption>,
  pub has_more:            bool,
  pub is_loading:          bool,
  pub display_text:        String,
  pub value:               Option<Value>,
}

impl LazyCombo {
  pub fn new(config: ComboConfig, value: Option<Value>) -> Self {
    let selection = Selection::new(config.selection_mode(), value);
    Self {
      config,
      lifecycle: Lifecycle::Closed,
      query: QueryScheduler::new(),
      pages: Paginator::new(),
      selection,
      hooks: Hooks::default(),
      on_change: None,
    }
  }

  /// Sets the callback receiving every selection change.
  pub fn on_change(mut self, callback: impl FnMut(Option<Value>) + Send + 'static) -> Self {
    self.on_change = Some(Box::new(callback));
    self
  }

  pub fn with_hooks(mut self, hooks: Hooks) -> Self {
    self.hooks = hooks;
    self
  }

  pub fn config(&self) -> &ComboConfig {
    &self.config
  }

  pub fn is_open(&self) -> bool {
    self.lifecycle.is_open()
  }

  pub fn raw_search_term(&self) -> &str {
    self.query.raw()
  }

  pub fn settled_search_term(&self) -> &str {
    self.query.settled()
  }

  pub fn options(&self) -> &[ComboOption] {
    self.pages.options()
  }

  pub fn offset(&self) -> usize {
    self.pages.offset()
  }

  pub fn has_more(&self) -> bool {
    self.pages.has_more()
  }

  pub fn is_fetch_in_flight(&self) -> bool {
    self.pages.is_fetch_in_flight()
  }

  pub fn selection(&self) -> &Selection {
    &self.selection
  }

  pub fn value(&self) -> Option<Value> {
    self.selection.value()
  }

  /// Opens the control. Coming from closed, the search and the loaded pages
  /// start over and the first page is requested right away, without waiting
  /// for the debounce.
  pub fn open(&mut self) -> Option<PageRequest> {
    if self.config.disabled {
      return None;
    }
    match self.lifecycle.open() {
      Transition::Opened => {
        self.query.reset();
        self.pages.reset();
        self.first_page()
      },
      Transition::Closed | Transition::Unchanged => None,
    }
  }

  /// Closes the control, keeping the loaded options so the current value
  /// can still be shown by its label.
  pub fn close(&mut self) {
    self.lifecycle.close();
  }

  /// A press on the trigger: forwards the click hook, then flips between
  /// open and closed.
  pub fn click(&mut self) -> Option<PageRequest> {
    self.hooks.click();
    if self.config.disabled {
      return None;
    }
    if self.is_open() {
      self.close();
      None
    } else {
      self.open()
    }
  }

  pub fn focus(&mut self) {
    self.hooks.focus();
  }

  pub fn blur(&mut self) {
    self.hooks.blur();
  }

  /// Records typed text and returns when it should settle.
  pub fn keystroke(&mut self, raw: impl Into<String>, now: Instant) -> Instant {
    self.query.keystroke(raw, now)
  }

  /// Drops a pending keystroke, e.g. on teardown.
  pub fn cancel_debounce(&mut self) {
    self.query.cancel();
  }

  /// The debounce window elapsed. A changed term reloads the first page if
  /// the control is open.
  pub fn settle(&mut self) -> Option<PageRequest> {
    if !self.query.settle() {
      return None;
    }
    log::debug!("search term settled on {:?}", self.query.settled());
    if !self.is_open() {
      return None;
    }
    self.first_page()
  }

  /// Settles the search term if its deadline has passed by `now`.
  pub fn poll(&mut self, now: Instant) -> Option<PageRequest> {
    match self.query.deadline() {
      Some(deadline) if deadline <= now => self.settle(),
      _ => None,
    }
  }

  /// The options list scrolled. Near the bottom, with more to come and no
  /// fetch outstanding, the next page is requested.
  pub fn scroll(&mut self, metrics: ScrollMetrics) -> Option<PageRequest> {
    if !self.is_open() || !metrics.near_bottom() || !self.pages.wants_more() {
      return None;
    }
    self.load_page(false)
  }

  /// Requests a page for the settled term, or nothing if a fetch is already
  /// outstanding.
  pub fn load_page(&mut self, reset_to_first_page: bool) -> Option<PageRequest> {
    self.pages.load_page(reset_to_first_page, self.query.settled())
  }

  /// Feeds back the outcome of `request`. Failures are logged and absorbed.
  ///
  /// With [`RacePolicy::RefetchLatest`] a response for an outdated query is
  /// thrown away and the current query requested instead, which is what the
  /// returned request is for.
  pub fn complete(
    &mut self,
    request: PageRequest,
    result: Result<Vec<ComboOption>, FetchError>,
  ) -> Option<PageRequest> {
    let stale = request.epoch != self.pages.epoch();
    if stale && self.config.race_policy == RacePolicy::RefetchLatest {
      self.pages.discard(&request);
      if self.is_open() {
        return self.load_page(true);
      }
      return None;
    }
    self.pages.complete(&request, result);
    None
  }

  /// Selects `option_value`. Single mode replaces the value and closes,
  /// multi mode adds or removes it and stays open.
  pub fn toggle(&mut self, option_value: &str) {
    if self.config.disabled {
      return;
    }
    let next = self.selection.toggle(option_value);
    self.emit(next);
    if self.selection.mode() == SelectionMode::Single {
      self.close();
    }
  }

  /// Empties the selection without opening or closing anything.
  pub fn clear(&mut self) {
    if self.config.disabled {
      return;
    }
    let next = self.selection.clear();
    self.emit(next);
  }

  /// Takes a value pushed by the host. Nothing is emitted.
  pub fn set_value(&mut self, value: Option<Value>) {
    self.selection.set(value);
  }

  pub fn is_selected(&self, option_value: &str) -> bool {
    self.selection.is_selected(option_value)
  }

  pub fn display_text(&self) -> Cow<'_, str> {
    display::resolve(&self.selection, self.pages.options(), &self.config.placeholder)
  }

  pub fn snapshot(&self) -> ComboSnapshot {
    ComboSnapshot {
      is_open:             self.is_open(),
      disabled:            self.config.disabled,
      raw_search_term:     self.query.raw().to_string(),
      settled_search_term: self.query.settled().to_string(),
      options:             self
        .pages
        .options()
        .iter()
        .map(|option| {
          SnapshotOption {
            option:      option.clone(),
            is_selected: self.is_selected(&option.value),
          }
        })
        .collect(),
      has_more:            self.pages.has_more(),
      is_loading:          self.pages.is_fetch_in_flight(),
      display_text:        self.display_text().into_owned(),
      value:               self.value(),
    }
  }

  fn first_page(&mut self) -> Option<PageRequest> {
    self.pages.begin_query();
    self.load_page(true)
  }

  fn emit(&mut self, value: Option<Value>) {
    if let Some(callback) = &mut self.on_change {
      callback(value);
    }
  }
}

impl fmt::Debug for LazyCombo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LazyCombo")
      .field("config", &self.config)
      .field("lifecycle", &self.lifecycle)
      .field("query", &self.query)
      .field("pages", &self.pages)
      .field("selection", &self.selection)
      .field("hooks", &self.hooks)
      .finish_non_exhaustive()
  }
}
