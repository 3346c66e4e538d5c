//! Lateriser Core
//!
//! This crate provides the engine behind the Lateriser deferred-loading
//! plug-in. It tracks a set of elements, watches scroll and resize activity
//! on one viewport, and reveals each element (start its load, then fade it
//! in) the first time it intersects the visible window.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `debounce`: the event reducer that coalesces raw viewport events
//! - `viewport`: the settled scroll offset and height of the viewport
//! - `geometry`: vertical spans and the open-interval intersection test
//! - `observe`: observables, their registry, and the host-facing traits
//! - `controller`: the facade that wires selections into observables
//!
//! Rendering, geometry measurement and fetching stay with the host, behind
//! the [`Element`], [`ViewportSource`], [`VisualStateSetter`] and
//! [`ResourceLoader`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use lateriser_core::{Controller, ViewportEvent};
//!
//! let controller = Controller::new(viewport, setter, loader)?;
//! controller.attach(&images, serde_json::Value::Null);
//!
//! // Wire the host's scroll/touchmove/resize events in:
//! controller.dispatch(ViewportEvent::Scroll);
//! ```

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod observe;
pub mod viewport;

#[cfg(test)]
mod test_support;

pub use config::LateriserConfig;
pub use controller::{Controller, ViewportEvent};
pub use debounce::Debouncer;
pub use error::{Error, LoadError, Result};
pub use geometry::{ElementGeometry, Span};
pub use observe::{
    Element, ElementRef, LoadCompletion, LoadOutcome, LoadState, Observable, ObservableId,
    ResourceLoader, StyleDeclaration, VisualProfile, VisualStateSetter,
};
pub use viewport::{ScrollSources, ViewportSnapshot, ViewportSource, ViewportTracker};
