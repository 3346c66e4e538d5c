//! Host Collaborators
//!
//! Bundles everything an observable needs from the outside world: the
//! shared viewport, the visual-state setter, the resource loader and the
//! runtime that awaits load completions. Observables hold an `Arc<Host>`;
//! the host never refers back to them.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use super::element::{Element, VisualProfile, VisualStateSetter};
use super::loader::ResourceLoader;
use crate::viewport::ViewportTracker;

pub struct Host {
    pub(crate) viewport: ViewportTracker,
    pub(crate) setter: Arc<dyn VisualStateSetter>,
    pub(crate) loader: Arc<dyn ResourceLoader>,
    pub(crate) runtime: Handle,
    pub(crate) fade: Duration,
}

impl Host {
    pub fn new(
        viewport: ViewportTracker,
        setter: Arc<dyn VisualStateSetter>,
        loader: Arc<dyn ResourceLoader>,
        runtime: Handle,
        fade: Duration,
    ) -> Self {
        Self {
            viewport,
            setter,
            loader,
            runtime,
            fade,
        }
    }

    pub fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    /// Apply `profile` to `element` through the setter.
    pub(crate) fn present(&self, element: &dyn Element, profile: VisualProfile) {
        let style = profile.declarations(self.fade);
        self.setter.apply(element, profile, &style);
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("viewport", &self.viewport)
            .field("fade", &self.fade)
            .finish()
    }
}
