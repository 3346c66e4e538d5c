//! Observed Elements
//!
//! This module holds the per-element side of the engine: the observable
//! state machine, the registry that keeps every observable in registration
//! order, and the traits through which the engine talks to the host.
//!
//! # Collaborators
//!
//! - [`Element`]: geometry, the processed marker, and the pending resource.
//! - [`VisualStateSetter`]: applies a [`VisualProfile`] to an element.
//! - [`ResourceLoader`]: starts a fetch and reports through a
//!   [`LoadCompletion`].
//!
//! The [`Host`] bundles the latter two with the shared viewport so an
//! observable can act on its own once triggered.

mod element;
mod host;
mod loader;
mod observable;
mod registry;

pub use element::{Element, ElementRef, StyleDeclaration, VisualProfile, VisualStateSetter};
pub use host::Host;
pub use loader::{LoadCompletion, LoadOutcome, ResourceLoader};
pub use observable::{LoadState, Observable, ObservableId};
pub use registry::{Registry, RegistryScan};
