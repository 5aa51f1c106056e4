//! Event plumbing for the combo runtime.
//!
//! A control that reacts to keystrokes, scrolling and finished requests is
//! modelled as an [`AsyncHook`]: a single task that owns all of its state and
//! receives events through a channel. Because only that task ever touches the
//! state, guards such as "one fetch at a time" can be plain fields.

mod debounce;

pub use debounce::{
  AsyncHook,
  EVENT_CAPACITY,
  channel,
  run,
  send_blocking,
  try_send,
};
