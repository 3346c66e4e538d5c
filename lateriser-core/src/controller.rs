//! Controller
//!
//! The controller is the entry point hosts talk to. It owns one
//! [`Context`]: the collaborators, the registry and, once the first attach
//! happens, the pair of debounced viewport listeners.
//!
//! # Event Flow
//!
//! ```text
//! dispatch(Scroll | TouchMove) -> scroll debouncer -> on_scroll
//!     -> refresh scroll offset -> scan registry -> Observable::check
//! dispatch(Resize)             -> resize debouncer -> on_resize
//!     -> refresh viewport height
//! ```
//!
//! Events dispatched before any attach find no listeners and are dropped.
//!
//! # Initial Check
//!
//! Every attach refreshes the viewport height synchronously and schedules
//! an artificial scroll event `initial_scroll_delay` later, so elements
//! already in view get revealed without the user scrolling. The artificial
//! event goes through the scroll debouncer like any other.

use std::sync::{Arc, OnceLock, Weak};

use parking_lot::Mutex;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::config::LateriserConfig;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::observe::{
    ElementRef, Host, Observable, ObservableId, Registry, ResourceLoader, VisualStateSetter,
};
use crate::viewport::{ViewportSnapshot, ViewportSource, ViewportTracker};

/// Raw viewport activity reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    Scroll,
    TouchMove,
    Resize,
}

/// The debounced scroll and resize handlers of one context.
struct Listeners {
    scroll: Debouncer<()>,
    resize: Debouncer<()>,
}

impl Listeners {
    fn install(context: &Arc<Context>) -> Self {
        let runtime = context.host.runtime.clone();
        let delay = context.config.debounce();

        let weak: Weak<Context> = Arc::downgrade(context);
        let scroll = Debouncer::new(runtime.clone(), delay, move |()| {
            if let Some(context) = weak.upgrade() {
                context.on_scroll();
            }
        });

        let weak: Weak<Context> = Arc::downgrade(context);
        let resize = Debouncer::new(runtime, delay, move |()| {
            if let Some(context) = weak.upgrade() {
                context.on_resize();
            }
        });

        debug!(?delay, "viewport listeners installed");
        Self { scroll, resize }
    }
}

/// State shared by everything a controller creates.
struct Context {
    config: LateriserConfig,
    host: Arc<Host>,
    registry: Registry,
    listeners: OnceLock<Listeners>,
    /// The artificial scroll scheduled by the latest attach.
    initial_scroll: Mutex<Option<JoinHandle<()>>>,
}

impl Context {
    /// Install the listeners on first use; later calls return the same pair.
    fn listeners(self: &Arc<Self>) -> &Listeners {
        self.listeners.get_or_init(|| Listeners::install(self))
    }

    fn on_scroll(&self) {
        let scroll_y = self.host.viewport.refresh_scroll();

        let mut scanned = 0usize;
        let mut triggered = 0usize;
        for observable in self.registry.scan() {
            scanned += 1;
            if observable.check(scroll_y) {
                triggered += 1;
            }
        }

        trace!(scroll_y, scanned, triggered, "scroll settled");
    }

    fn on_resize(&self) {
        self.host.viewport.refresh_height();
    }
}

/// Deferred-loading controller for one viewport.
///
/// Cheap to clone; clones share the same context.
///
/// # Example
///
/// ```rust,ignore
/// let controller = Controller::new(viewport, setter, loader)?;
/// controller.attach(&images, serde_json::Value::Null);
///
/// // From the host's event loop:
/// controller.dispatch(ViewportEvent::Scroll);
/// ```
#[derive(Clone)]
pub struct Controller {
    context: Arc<Context>,
}

impl Controller {
    /// Build a controller with the default configuration.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        viewport: Arc<dyn ViewportSource>,
        setter: Arc<dyn VisualStateSetter>,
        loader: Arc<dyn ResourceLoader>,
    ) -> Result<Self> {
        Self::with_config(LateriserConfig::default(), viewport, setter, loader)
    }

    /// Build a controller with an explicit configuration.
    pub fn with_config(
        config: LateriserConfig,
        viewport: Arc<dyn ViewportSource>,
        setter: Arc<dyn VisualStateSetter>,
        loader: Arc<dyn ResourceLoader>,
    ) -> Result<Self> {
        let runtime = Handle::try_current()?;
        let host = Host::new(
            ViewportTracker::new(viewport),
            setter,
            loader,
            runtime,
            config.fade(),
        );

        Ok(Self {
            context: Arc::new(Context {
                config,
                host: Arc::new(host),
                registry: Registry::new(),
                listeners: OnceLock::new(),
                initial_scroll: Mutex::new(None),
            }),
        })
    }

    /// Start observing every element of `selection` not seen before.
    ///
    /// Already processed elements are skipped, so overlapping selections
    /// register each element once, even when attached from several threads
    /// at the same time. `options` is stored with every new
    /// observable as is. Returns `selection` for chaining.
    pub fn attach<'s>(&self, selection: &'s [ElementRef], options: Value) -> &'s [ElementRef] {
        let listeners = self.context.listeners();

        let mut added = 0usize;
        for element in selection {
            if !element.try_mark() {
                continue;
            }
            Observable::register(
                Arc::clone(&self.context.host),
                &self.context.registry,
                Arc::clone(element),
                options.clone(),
            );
            added += 1;
        }
        debug!(added, skipped = selection.len() - added, "selection attached");

        self.context.on_resize();

        // A newer attach supersedes the artificial scroll of an older one.
        let scroll = listeners.scroll.clone();
        let delay = self.context.config.initial_scroll_delay();
        let task = self.context.host.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            scroll.call(());
        });
        if let Some(previous) = self.context.initial_scroll.lock().replace(task) {
            previous.abort();
        }

        selection
    }

    /// Feed a raw viewport event into the matching debouncer.
    pub fn dispatch(&self, event: ViewportEvent) {
        let Some(listeners) = self.context.listeners.get() else {
            trace!(?event, "no listeners installed, event dropped");
            return;
        };

        match event {
            ViewportEvent::Scroll | ViewportEvent::TouchMove => listeners.scroll.call(()),
            ViewportEvent::Resize => listeners.resize.call(()),
        }
    }

    /// Run the settled scroll handler now, bypassing the debouncer.
    pub fn on_scroll(&self) {
        self.context.on_scroll();
    }

    /// Run the settled resize handler now, bypassing the debouncer.
    pub fn on_resize(&self) {
        self.context.on_resize();
    }

    /// Cancel pending debounce timers and the artificial scroll of the
    /// latest attach. Listeners stay installed.
    pub fn teardown(&self) {
        if let Some(task) = self.context.initial_scroll.lock().take() {
            task.abort();
        }
        if let Some(listeners) = self.context.listeners.get() {
            listeners.scroll.cancel();
            listeners.resize.cancel();
            debug!("pending viewport timers cancelled");
        }
    }

    pub fn listeners_installed(&self) -> bool {
        self.context.listeners.get().is_some()
    }

    /// Whether either debouncer has a trailing firing armed.
    pub fn has_pending_events(&self) -> bool {
        self.context
            .listeners
            .get()
            .is_some_and(|l| l.scroll.is_pending() || l.resize.is_pending())
    }

    /// All observables, in registration order.
    pub fn observables(&self) -> Vec<Arc<Observable>> {
        self.context.registry.scan().collect()
    }

    pub fn observable(&self, id: ObservableId) -> Option<Arc<Observable>> {
        self.context.registry.get(id)
    }

    /// Number of registered observables.
    pub fn len(&self) -> usize {
        self.context.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.context.registry.is_empty()
    }

    /// Last settled viewport state.
    pub fn snapshot(&self) -> ViewportSnapshot {
        self.context.host.viewport.snapshot()
    }

    pub fn config(&self) -> &LateriserConfig {
        &self.context.config
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.context.config)
            .field("observables", &self.len())
            .field("listeners_installed", &self.listeners_installed())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
