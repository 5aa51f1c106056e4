//! Utilities for declaring an async (usually debounced) hook

use std::time::Duration;

use futures_executor::block_on;
use tokio::{
  sync::mpsc::{
    self,
    Receiver,
    Sender,
    error::TrySendError,
  },
  task::JoinHandle,
  time::Instant,
};

/// Maximum time to block when sending to a full channel.
/// A dropped event is preferable to a frozen host thread.
const SEND_TIMEOUT_MS: u64 = 2;

/// Capacity of the channel feeding a hook. Events are drained as soon as they
/// arrive, the headroom only matters during bursts of typing or scrolling.
pub const EVENT_CAPACITY: usize = 256;

/// A hook is a background task that owns some state and reacts to events
/// sent through a channel. Each event may arm, keep or disarm a debounce
/// deadline; once the deadline passes without being replaced the hook's
/// [`finish_debounce`](AsyncHook::finish_debounce) runs.
pub trait AsyncHook: Send + 'static + Sized {
  type Event: Send + 'static;

  /// Called immediately whenever an event is received. The return value is
  /// the new debounce deadline: `None` disarms it, returning `timeout`
  /// unchanged keeps the currently running one.
  fn handle_event(&mut self, event: Self::Event, timeout: Option<Instant>) -> Option<Instant>;

  /// Called whenever the debounce deadline is reached
  fn finish_debounce(&mut self);

  /// Called once after every sender has been dropped. Any pending deadline
  /// has already been discarded at this point.
  fn shutdown(&mut self) {}

  fn spawn(self) -> Sender<Self::Event> {
    let (tx, rx) = channel();
    // only spawn worker if we are inside runtime to avoid having to spawn a runtime
    // for unrelated unit tests
    if tokio::runtime::Handle::try_current().is_ok() {
      tokio::spawn(run(self, rx));
    }
    tx
  }

  /// Like [`spawn`](AsyncHook::spawn) but hands back the task so callers can
  /// wait for the hook to wind down. Must be called inside a tokio runtime.
  fn spawn_joinable(self) -> (Sender<Self::Event>, JoinHandle<()>) {
    let (tx, rx) = channel();
    let handle = tokio::spawn(run(self, rx));
    (tx, handle)
  }
}

/// Creates the bounded channel used to feed a hook.
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
  mpsc::channel(EVENT_CAPACITY)
}

/// Drives `hook` until every sender for `rx` is gone.
pub async fn run<Hook: AsyncHook>(mut hook: Hook, mut rx: Receiver<Hook::Event>) {
  let mut deadline = None;
  loop {
    let event = match deadline {
      Some(deadline_) => {
        match tokio::time::timeout_at(deadline_, rx.recv()).await {
          Ok(event) => event,
          Err(_) => {
            deadline = None;
            hook.finish_debounce();
            continue;
          },
        }
      },
      None => rx.recv().await,
    };
    let Some(event) = event else {
      break;
    };
    deadline = hook.handle_event(event, deadline);
  }
  hook.shutdown();
}

/// Send an event to a channel, blocking only briefly if the channel is full.
///
/// Meant for synchronous callers (input handlers, render callbacks):
/// - First attempts a non-blocking send (fast path)
/// - If the channel is full, blocks for at most `SEND_TIMEOUT_MS` milliseconds
/// - If still full after that, the event is dropped
pub fn send_blocking<T>(tx: &Sender<T>, data: T) {
  match tx.try_send(data) {
    Ok(()) => {},
    Err(TrySendError::Full(data)) => {
      if block_on(tx.send_timeout(data, Duration::from_millis(SEND_TIMEOUT_MS))).is_err() {
        log::warn!("Dropped event: hook channel stayed full");
      }
    },
    Err(TrySendError::Closed(_)) => {
      log::warn!("Attempted to send to closed channel");
    },
  }
}

/// Try to send an event without blocking at all.
/// Returns true if the event was sent, false if the channel was full or closed.
pub fn try_send<T>(tx: &Sender<T>, data: T) -> bool {
  tx.try_send(data).is_ok()
}
