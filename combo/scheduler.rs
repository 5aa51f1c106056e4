//! Query scheduling: raw keystrokes in, settled search terms out.

use tokio::time::Instant;

use crate::DEBOUNCE_INTERVAL;

/// Trailing-edge debounce over the search input.
///
/// The raw term follows every keystroke so the input can echo it; the
/// settled term only moves once [`DEBOUNCE_INTERVAL`] has passed without
/// another keystroke. Timing itself is owned by whoever drives the
/// scheduler, it only records the deadline it wants.
#[derive(Debug, Default)]
pub struct QueryScheduler {
  raw:      String,
  settled:  String,
  deadline: Option<Instant>,
}

impl QueryScheduler {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn raw(&self) -> &str {
    &self.raw
  }

  pub fn settled(&self) -> &str {
    &self.settled
  }

  pub fn deadline(&self) -> Option<Instant> {
    self.deadline
  }

  pub fn is_pending(&self) -> bool {
    self.deadline.is_some()
  }

  /// Records a keystroke and restarts the debounce window, returning the
  /// new deadline.
  pub fn keystroke(&mut self, raw: impl Into<String>, now: Instant) -> Instant {
    self.raw = raw.into();
    let deadline = now + DEBOUNCE_INTERVAL;
    self.deadline = Some(deadline);
    deadline
  }

  /// The debounce window elapsed: promote the raw term.
  ///
  /// Returns `true` only when the settled term actually changed, which is
  /// what warrants a fresh first page.
  pub fn settle(&mut self) -> bool {
    if self.deadline.take().is_none() {
      return false;
    }
    if self.settled == self.raw {
      return false;
    }
    self.settled.clone_from(&self.raw);
    true
  }

  /// Settles if the deadline has passed as of `now`. For hosts that poll
  /// instead of sleeping until the deadline.
  pub fn poll(&mut self, now: Instant) -> bool {
    match self.deadline {
      Some(deadline) if deadline <= now => self.settle(),
      _ => false,
    }
  }

  /// Empties both terms at once, skipping the debounce entirely.
  pub fn reset(&mut self) {
    self.raw.clear();
    self.settled.clear();
    self.deadline = None;
  }

  /// Forgets a pending keystroke without settling it.
  pub fn cancel(&mut self) {
    self.deadline = None;
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  #[test]
  fn keystrokes_echo_immediately_but_settle_later() {
    let now = Instant::now();
    let mut query = QueryScheduler::new();
    let deadline = query.keystroke("ab", now);
    assert_eq!(deadline, now + DEBOUNCE_INTERVAL);
    assert_eq!(query.raw(), "ab");
    assert_eq!(query.settled(), "");
    assert!(!query.poll(now + Duration::from_millis(299)));
    assert!(query.poll(now + DEBOUNCE_INTERVAL));
    assert_eq!(query.settled(), "ab");
  }

  #[test]
  fn later_keystroke_restarts_the_window() {
    let start = Instant::now();
    let mut query = QueryScheduler::new();
    query.keystroke("ab", start);
    let restarted = start + Duration::from_millis(100);
    query.keystroke("abc", restarted);
    assert!(!query.poll(start + DEBOUNCE_INTERVAL));
    assert_eq!(query.settled(), "");
    assert!(query.poll(restarted + DEBOUNCE_INTERVAL));
    assert_eq!(query.settled(), "abc");
  }

  #[test]
  fn settling_to_the_same_term_is_not_a_change() {
    let now = Instant::now();
    let mut query = QueryScheduler::new();
    query.keystroke("a", now);
    query.keystroke("", now);
    assert!(!query.settle());
    assert!(!query.is_pending());
  }

  #[test]
  fn cancelled_or_reset_windows_never_settle() {
    let now = Instant::now();
    let mut query = QueryScheduler::new();
    query.keystroke("abc", now);
    query.cancel();
    assert!(!query.settle());
    assert_eq!(query.settled(), "");

    query.keystroke("abc", now);
    query.reset();
    assert_eq!(query.raw(), "");
    assert!(!query.poll(now + DEBOUNCE_INTERVAL));
  }
}
