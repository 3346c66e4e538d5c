//! In-memory collaborators shared by the unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::geometry::ElementGeometry;
use crate::observe::{
    Element, Host, LoadCompletion, ResourceLoader, StyleDeclaration, VisualProfile,
    VisualStateSetter,
};
use crate::viewport::{ScrollSources, ViewportSource, ViewportTracker};

pub struct FakeElement {
    geometry: ElementGeometry,
    resource: String,
    marked: AtomicBool,
}

impl FakeElement {
    pub fn new(resource: &str, top: f64, height: f64) -> Arc<Self> {
        Arc::new(Self {
            geometry: ElementGeometry::new(top, height),
            resource: resource.to_string(),
            marked: AtomicBool::new(false),
        })
    }
}

impl Element for FakeElement {
    fn geometry(&self) -> ElementGeometry {
        self.geometry
    }

    fn is_marked(&self) -> bool {
        self.marked.load(Ordering::SeqCst)
    }

    fn try_mark(&self) -> bool {
        !self.marked.swap(true, Ordering::SeqCst)
    }

    fn pending_resource(&self) -> Option<String> {
        Some(self.resource.clone())
    }
}

pub struct FakeViewport {
    pub scroll: Mutex<f64>,
    pub height: Mutex<f64>,
}

impl FakeViewport {
    pub fn new(scroll: f64, height: f64) -> Arc<Self> {
        Arc::new(Self {
            scroll: Mutex::new(scroll),
            height: Mutex::new(height),
        })
    }

    pub fn scroll_to(&self, y: f64) {
        *self.scroll.lock() = y;
    }
}

impl ViewportSource for FakeViewport {
    fn scroll_sources(&self) -> ScrollSources {
        ScrollSources::page(*self.scroll.lock())
    }

    fn inner_height(&self) -> f64 {
        *self.height.lock()
    }
}

#[derive(Default)]
pub struct RecordingSetter {
    pub applied: Mutex<Vec<(Option<String>, VisualProfile)>>,
}

impl RecordingSetter {
    pub fn profiles_for(&self, resource: &str) -> Vec<VisualProfile> {
        self.applied
            .lock()
            .iter()
            .filter(|(r, _)| r.as_deref() == Some(resource))
            .map(|(_, p)| *p)
            .collect()
    }
}

impl VisualStateSetter for RecordingSetter {
    fn apply(&self, element: &dyn Element, profile: VisualProfile, _style: &[StyleDeclaration]) {
        self.applied.lock().push((element.pending_resource(), profile));
    }
}

/// Loader that parks every completion until the test resolves it.
#[derive(Default)]
pub struct ManualLoader {
    pub started: Mutex<Vec<Option<String>>>,
    pending: Mutex<Vec<(Option<String>, LoadCompletion)>>,
}

impl ManualLoader {
    pub fn load_count(&self) -> usize {
        self.started.lock().len()
    }

    pub fn take(&self, resource: &str) -> Option<LoadCompletion> {
        let mut pending = self.pending.lock();
        let index = pending
            .iter()
            .position(|(r, _)| r.as_deref() == Some(resource))?;
        Some(pending.remove(index).1)
    }
}

impl ResourceLoader for ManualLoader {
    fn begin_load(&self, _element: &dyn Element, resource: Option<&str>, done: LoadCompletion) {
        let resource = resource.map(str::to_string);
        self.started.lock().push(resource.clone());
        self.pending.lock().push((resource, done));
    }
}

pub fn host(
    viewport: Arc<FakeViewport>,
    setter: Arc<RecordingSetter>,
    loader: Arc<ManualLoader>,
) -> Arc<Host> {
    Arc::new(Host::new(
        ViewportTracker::new(viewport),
        setter,
        loader,
        Handle::current(),
        Duration::from_millis(400),
    ))
}

/// Let spawned completion tasks run.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
