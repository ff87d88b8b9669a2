//! Cold observables in rust
//!
//! A single-threaded reactive core: [`EventSource`] for sequences, [`SingleValue`]
//! for one-shot results, and [`Disposable`]/[`DisposableGroup`] for cancellation.
//!
//! ## Example
//! ```
//! use observable_primer::{Callbacks, DisposableGroup, EventSource};
//!
//! let disposables = DisposableGroup::new();
//! disposables.add(EventSource::from_iter(vec![1, 2, 3]).subscribe_by(
//!     Callbacks::new()
//!         .next(|v| println!("{v}"))
//!         .complete(|| println!("complete")),
//! ));
//! disposables.dispose();
//! ```

/// Public API.
mod clean_up;
mod disposable;
mod emitter;
mod error;
mod event_source;
mod group;
mod hooks;
mod observer;
mod single;

// Reexport of the public API.
#[doc(inline)]
pub use crate::clean_up::*;
#[doc(inline)]
pub use crate::disposable::*;
#[doc(inline)]
pub use crate::emitter::*;
#[doc(inline)]
pub use crate::error::*;
#[doc(inline)]
pub use crate::event_source::*;
#[doc(inline)]
pub use crate::group::*;
#[doc(inline)]
pub use crate::observer::{Callbacks, Observer};
#[doc(inline)]
pub use crate::single::*;
