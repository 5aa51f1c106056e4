//! Runs a [`LazyCombo`] on tokio.
//!
//! The combo lives inside a single [`AsyncHook`] task. Host interaction
//! arrives as events, keystrokes arm the hook's debounce deadline, and each
//! [`PageRequest`] is executed by a spawned task that posts the response
//! back into the same event stream. All state changes therefore happen on
//! that one task, one event at a time.

use std::{
  sync::Arc,
  time::Duration,
};

use combo_event::{
  AsyncHook,
  send_blocking,
};
use tokio::{
  sync::{
    mpsc::{
      Sender,
      WeakSender,
    },
    oneshot,
  },
  task::JoinHandle,
  time::Instant,
};

use crate::{
  combo::{
    ComboSnapshot,
    LazyCombo,
  },
  error::FetchError,
  option::{
    ComboOption,
    FetchParams,
  },
  pagination::{
    PageRequest,
    ScrollMetrics,
  },
  selection::Value,
  source::OptionSource,
};


#[derive(Debug)]
pub(crate) enum ComboEvent {
  Open,
  Close,
  Click,
  Focus,
  Blur,
  Keystroke(String),
  Scroll(ScrollMetrics),
  Toggle(String),
  Clear,
  SetValue(Option<Value>),
  PageLoaded {
    request: PageRequest,
    result:  Result<Vec<ComboOption>, FetchError>,
  },
  Snapshot(oneshot::Sender<ComboSnapshot>),
}

struct ComboHook {
  combo:  LazyCombo,
  source: Arc<dyn OptionSource>,
  /// Weak so that outstanding fetches do not keep the control alive.
  events: WeakSender<ComboEvent>,
  fetch:  Option<JoinHandle<()>>,
}

impl ComboHook {
  fn dispatch(&mut self, request: Option<PageRequest>) {
    let Some(request) = request else {
      return;
    };
    let source = self.source.clone();
    let events = self.events.clone();
    let timeout = self.combo.config().fetch_timeout();

    self.fetch = Some(tokio::spawn(async move {
      let result = fetch_page(source.as_ref(), request.params.clone(), timeout).await;
      // the control was torn down while the request was out
      let Some(events) = events.upgrade() else {
        return;
      };
      let _ = events.send(ComboEvent::PageLoaded { request, result }).await;
    }));
  }

  /// Runs an operation that may open the control. Opening bypasses the
  /// debounce, so a deadline still pending from before is disarmed.
  fn opening(
    &mut self,
    timeout: Option<Instant>,
    op: impl FnOnce(&mut LazyCombo) -> Option<PageRequest>,
  ) -> Option<Instant> {
    let was_open = self.combo.is_open();
    let request = op(&mut self.combo);
    self.dispatch(request);
    if !was_open && self.combo.is_open() {
      None
    } else {
      timeout
    }
  }
}

impl AsyncHook for ComboHook {
  type Event = ComboEvent;

  fn handle_event(&mut self, event: Self::Event, timeout: Option<Instant>) -> Option<Instant> {
    match event {
      ComboEvent::Open => self.opening(timeout, LazyCombo::open),
      ComboEvent::Click => self.opening(timeout, LazyCombo::click),
      ComboEvent::Close => {
        self.combo.close();
        timeout
      },
      ComboEvent::Focus => {
        self.combo.focus();
        timeout
      },
      ComboEvent::Blur => {
        self.combo.blur();
        timeout
      },
      ComboEvent::Keystroke(raw) => Some(self.combo.keystroke(raw, Instant::now())),
      ComboEvent::Scroll(metrics) => {
        let request = self.combo.scroll(metrics);
        self.dispatch(request);
        timeout
      },
      ComboEvent::Toggle(value) => {
        self.combo.toggle(&value);
        timeout
      },
      ComboEvent::Clear => {
        self.combo.clear();
        timeout
      },
      ComboEvent::SetValue(value) => {
        self.combo.set_value(value);
        timeout
      },
      ComboEvent::PageLoaded { request, result } => {
        self.fetch = None;
        let follow_up = self.combo.complete(request, result);
        self.dispatch(follow_up);
        timeout
      },
      ComboEvent::Snapshot(reply) => {
        let _ = reply.send(self.combo.snapshot());
        timeout
      },
    }
  }

  fn finish_debounce(&mut self) {
    let request = self.combo.settle();
    self.dispatch(request);
  }

  fn shutdown(&mut self) {
    self.combo.cancel_debounce();
    if let Some(fetch) = self.fetch.take() {
      fetch.abort();
    }
    log::debug!("combo torn down");
  }
}

async fn fetch_page(
  source: &dyn OptionSource,
  params: FetchParams,
  timeout: Option<Duration>,
) -> Result<Vec<ComboOption>, FetchError> {
  match timeout {
    Some(limit) => {
      tokio::time::timeout(limit, source.fetch_options(params))
        .await
        .unwrap_or_else(|_| Err(FetchError::TimedOut(limit)))
    },
    None => source.fetch_options(params).await,
  }
}

/// Host side of a running combo.
///
/// Methods mirror the control's operations and never block for more than a
/// couple of milliseconds. Dropping the handle tears the control down: a
/// pending keystroke never settles and an outstanding fetch is aborted.
pub struct ComboHandle {
  events: Sender<ComboEvent>,
  task:   JoinHandle<()>,
}

impl ComboHandle {
  /// Starts `combo` on the current tokio runtime.
  pub fn spawn(combo: LazyCombo, source: Arc<dyn OptionSource>) -> Self {
    let (events, rx) = combo_event::channel();
    let hook = ComboHook {
      combo,
      source,
      events: events.downgrade(),
      fetch: None,
    };
    let task = tokio::spawn(combo_event::run(hook, rx));
    Self { events, task }
  }

  pub fn open(&self) {
    self.send(ComboEvent::Open);
  }

  pub fn close(&self) {
    self.send(ComboEvent::Close);
  }

  pub fn click(&self) {
    self.send(ComboEvent::Click);
  }

  pub fn focus(&self) {
    self.send(ComboEvent::Focus);
  }

  pub fn blur(&self) {
    self.send(ComboEvent::Blur);
  }

  /// The search input now reads `raw`.
  pub fn keystroke(&self, raw: impl Into<String>) {
    self.send(ComboEvent::Keystroke(raw.into()));
  }

  pub fn scroll(&self, metrics: ScrollMetrics) {
    self.send(ComboEvent::Scroll(metrics));
  }

  pub fn toggle(&self, value: impl Into<String>) {
    self.send(ComboEvent::Toggle(value.into()));
  }

  /// The clear affordance. Does not open the control.
  pub fn clear(&self) {
    self.send(ComboEvent::Clear);
  }

  pub fn set_value(&self, value: Option<Value>) {
    self.send(ComboEvent::SetValue(value));
  }

  /// Current render state, once every previously sent event was handled.
  /// `None` if the control is gone.
  pub async fn snapshot(&self) -> Option<ComboSnapshot> {
    let (tx, rx) = oneshot::channel();
    self.events.send(ComboEvent::Snapshot(tx)).await.ok()?;
    rx.await.ok()
  }

  /// Tears the control down and waits for it to finish.
  pub async fn shutdown(self) {
    let Self { events, task } = self;
    drop(events);
    if let Err(err) = task.await {
      log::error!("combo task failed: {err}");
    }
  }

  fn send(&self, event: ComboEvent) {
    send_blocking(&self.events, event);
  }
}
