//! A lazy, incrementally paginated, debounced search-select control.
//!
//! The control is headless: [`LazyCombo`] is a synchronous state machine
//! that hands back [`PageRequest`]s instead of performing I/O, and
//! [`ComboHandle`] runs it on tokio against an [`OptionSource`], arming the
//! search debounce and executing fetches.
//!
//! ```ignore
//! let source = StaticSource::new(countries);
//! let combo = LazyCombo::new(ComboConfig::default(), None)
//!   .on_change(|value| log::info!("selected {value:?}"));
//! let handle = ComboHandle::spawn(combo, Arc::new(source));
//! handle.open();
//! handle.keystroke("ger");
//! ```

use std::time::Duration;

pub mod combo;
pub mod config;
pub mod display;
pub mod error;
pub mod hook;
pub mod lifecycle;
pub mod option;
pub mod pagination;
pub mod scheduler;
pub mod selection;
pub mod source;

pub use combo::{
  ComboSnapshot,
  LazyCombo,
  SnapshotOption,
};
pub use config::{
  ComboConfig,
  Hooks,
  RacePolicy,
};
pub use error::{
  ConfigLoadError,
  FetchError,
};
pub use hook::ComboHandle;
pub use option::{
  ComboOption,
  FetchParams,
};
pub use pagination::{
  PageRequest,
  ScrollMetrics,
};
pub use selection::{
  Selection,
  SelectionMode,
  Value,
};
pub use source::{
  OptionSource,
  StaticSource,
  source_fn,
};

/// Number of options requested per page. A page shorter than this marks the
/// end of the result set.
pub const PAGE_SIZE: usize = 50;

/// Quiet period after the last keystroke before the search term settles.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

/// Distance from the bottom of the options list, in pixels, at which the
/// next page is requested.
pub const SCROLL_THRESHOLD_PX: f64 = 10.0;

/// Placeholder shown when nothing is selected and none was configured.
pub const DEFAULT_PLACEHOLDER: &str = "Select an option...";
