//! Observable Elements
//!
//! An [`Observable`] wraps one host element together with the vertical span
//! it occupied when it was registered and its place in the reveal
//! lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! Hidden --check() intersects--> Triggered --load completes--> Visible
//! ```
//!
//! Transitions only move forward and never skip `Triggered`. Once an
//! element has left `Hidden`, further checks do nothing, so repeated scroll
//! events never start a second load. A load that fails or never reports
//! back leaves the element `Triggered` for good.
//!
//! # Geometry
//!
//! The span is measured once, at registration, and never again. Layout
//! changes after registration are not picked up.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use super::element::{ElementRef, VisualProfile};
use super::host::Host;
use super::loader::LoadCompletion;
use super::registry::Registry;
use crate::geometry::Span;

/// Unique identifier for an observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservableId(u64);

impl ObservableId {
    /// Generate a new unique observable ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ObservableId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where an observable is in the reveal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// Waiting to come into view.
    Hidden,

    /// Came into view; the load has been started.
    Triggered,

    /// The load completed and the element is shown. Terminal.
    Visible,
}

/// A tracked element and its reveal state.
pub struct Observable {
    id: ObservableId,
    element: ElementRef,
    /// Caller-supplied attach options, kept but not interpreted.
    options: Value,
    span: Span,
    state: Mutex<LoadState>,
    host: Arc<Host>,
}

impl Observable {
    /// Measure `element`, hide it, and append it to `registry`.
    pub fn register(
        host: Arc<Host>,
        registry: &Registry,
        element: ElementRef,
        options: Value,
    ) -> Arc<Self> {
        let span = Span::from_geometry(element.geometry());
        let observable = Arc::new(Self {
            id: ObservableId::new(),
            element,
            options,
            span,
            state: Mutex::new(LoadState::Hidden),
            host,
        });

        observable
            .host
            .present(&*observable.element, VisualProfile::Hidden);
        registry.register(Arc::clone(&observable));

        debug!(
            id = observable.id.raw(),
            top = span.top,
            bottom = span.bottom,
            "element registered"
        );
        observable
    }

    /// Test the element against the window starting at `scroll_y`.
    ///
    /// Starts the load and returns `true` when a hidden element intersects
    /// the window. Anything else is a no-op returning `false`.
    pub fn check(self: &Arc<Self>, scroll_y: f64) -> bool {
        {
            let mut state = self.state.lock();
            if *state != LoadState::Hidden {
                return false;
            }

            let window_bottom = scroll_y + self.host.viewport.height();
            if !self.span.intersects(scroll_y, window_bottom) {
                return false;
            }

            *state = LoadState::Triggered;
        }

        debug!(id = self.id.raw(), scroll_y, "element triggered");
        self.begin_load();
        true
    }

    fn begin_load(self: &Arc<Self>) {
        let (done, outcome) = LoadCompletion::channel();
        let resource = self.element.pending_resource();

        let observable = Arc::clone(self);
        self.host.runtime.spawn(async move {
            match outcome.await {
                Ok(Ok(())) => {
                    observable.reveal();
                }
                Ok(Err(error)) => {
                    warn!(id = observable.id.raw(), %error, "resource load failed");
                }
                Err(_) => {
                    debug!(id = observable.id.raw(), "resource load abandoned");
                }
            }
        });

        self.host
            .loader
            .begin_load(&*self.element, resource.as_deref(), done);
    }

    /// Finish the lifecycle: `Triggered` becomes `Visible` and the element
    /// is shown.
    ///
    /// Returns `false`, changing nothing, from any other state.
    pub fn reveal(&self) -> bool {
        {
            let mut state = self.state.lock();
            match *state {
                LoadState::Triggered => *state = LoadState::Visible,
                LoadState::Hidden => {
                    warn!(id = self.id.raw(), "reveal requested before trigger, ignored");
                    return false;
                }
                LoadState::Visible => return false,
            }
        }

        self.host.present(&*self.element, VisualProfile::Shown);
        debug!(id = self.id.raw(), "element revealed");
        true
    }

    pub fn id(&self) -> ObservableId {
        self.id
    }

    pub fn state(&self) -> LoadState {
        *self.state.lock()
    }

    /// The span captured at registration.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn options(&self) -> &Value {
        &self.options
    }

    pub fn element(&self) -> &ElementRef {
        &self.element
    }
}

impl std::fmt::Debug for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("id", &self.id)
            .field("span", &self.span)
            .field("state", &self.state())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
