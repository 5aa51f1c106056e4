//! Open/closed state of the control.
//!
//! Loading is deliberately not a state here: the list can hold partial
//! results while more are being fetched, so that lives in the paginator's
//! flags instead.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
  #[default]
  Closed,
  Open,
}

/// Result of asking the lifecycle to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
  /// `Closed -> Open`; everything query related must be reset and the first
  /// page loaded.
  Opened,
  /// `Open -> Closed`; nothing is cleared.
  Closed,
  /// Already in the requested state.
  Unchanged,
}

impl Lifecycle {
  pub fn is_open(self) -> bool {
    self == Self::Open
  }

  pub fn open(&mut self) -> Transition {
    match self {
      Self::Open => Transition::Unchanged,
      Self::Closed => {
        *self = Self::Open;
        Transition::Opened
      },
    }
  }

  pub fn close(&mut self) -> Transition {
    match self {
      Self::Closed => Transition::Unchanged,
      Self::Open => {
        *self = Self::Closed;
        Transition::Closed
      },
    }
  }

  pub fn toggle(&mut self) -> Transition {
    match self {
      Self::Open => self.close(),
      Self::Closed => self.open(),
    }
  }
}
