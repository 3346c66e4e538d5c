//! Viewport Tracking
//!
//! Holds the settled scroll offset and height of the one viewport a
//! controller watches. The tracker only reads from its [`ViewportSource`]
//! when one of the debounced handlers asks it to, so every observable check
//! sees the last *settled* values rather than an intermediate frame.

use parking_lot::RwLock;
use std::sync::Arc;

/// The places a host can report its vertical scroll position from.
///
/// Hosts differ in which of these they expose. The first one present wins,
/// in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSources {
    /// Page-level offset, the standard source.
    pub page_offset: Option<f64>,
    /// Scroll position of the document element.
    pub document_element: Option<f64>,
    /// Scroll position of the body's parent.
    pub body_parent: Option<f64>,
    /// Scroll position of the body itself.
    pub body: Option<f64>,
}

impl ScrollSources {
    /// Sources with only the standard page offset filled in.
    pub fn page(offset: f64) -> Self {
        Self {
            page_offset: Some(offset),
            ..Self::default()
        }
    }

    /// Resolve the scroll offset, falling back to 0 when no source exists.
    pub fn resolve(&self) -> f64 {
        self.page_offset
            .or(self.document_element)
            .or(self.body_parent)
            .or(self.body)
            .unwrap_or(0.0)
    }
}

/// Host-side view of the scrollable surface.
pub trait ViewportSource: Send + Sync {
    /// Current scroll position sources.
    fn scroll_sources(&self) -> ScrollSources;

    /// Current visible height.
    fn inner_height(&self) -> f64;
}

/// The last settled scroll offset and viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSnapshot {
    pub scroll_y: f64,
    pub height: f64,
}

impl ViewportSnapshot {
    /// Bottom edge of the visible window in document coordinates.
    pub fn window_bottom(&self) -> f64 {
        self.scroll_y + self.height
    }
}

/// Shared viewport state for one controller.
pub struct ViewportTracker {
    source: Arc<dyn ViewportSource>,
    snapshot: RwLock<ViewportSnapshot>,
}

impl ViewportTracker {
    pub fn new(source: Arc<dyn ViewportSource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(ViewportSnapshot::default()),
        }
    }

    /// Read the live scroll offset from the source, without storing it.
    pub fn scroll_offset(&self) -> f64 {
        self.source.scroll_sources().resolve()
    }

    /// Settled scroll step: store the live scroll offset and return it.
    pub fn refresh_scroll(&self) -> f64 {
        let scroll_y = self.scroll_offset();
        self.snapshot.write().scroll_y = scroll_y;
        scroll_y
    }

    /// Settled resize step: store the live viewport height and return it.
    pub fn refresh_height(&self) -> f64 {
        let height = self.source.inner_height();
        self.snapshot.write().height = height;
        tracing::trace!(height, "viewport height refreshed");
        height
    }

    /// Last settled viewport height.
    pub fn height(&self) -> f64 {
        self.snapshot.read().height
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        *self.snapshot.read()
    }
}

impl std::fmt::Debug for ViewportTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportTracker")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
