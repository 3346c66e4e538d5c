//! Elements and Their Presentation
//!
//! The engine never touches a concrete rendering tree. It sees elements
//! through the [`Element`] trait and changes how they look only by asking a
//! [`VisualStateSetter`] to apply one of two named profiles.

use std::sync::Arc;
use std::time::Duration;

use smallvec::{smallvec, SmallVec};

use crate::geometry::ElementGeometry;

/// A renderable element the host wants deferred.
pub trait Element: Send + Sync {
    /// Document-relative top and rendered height.
    ///
    /// Read once, when the element is registered.
    fn geometry(&self) -> ElementGeometry;

    /// Whether the element was already picked up by an attach.
    fn is_marked(&self) -> bool;

    /// Tag the element as processed.
    ///
    /// Returns `true` only for the call that set the marker, so it has to
    /// test and set in one atomic step.
    fn try_mark(&self) -> bool;

    /// Identifier of the resource to fetch once the element comes into view.
    fn pending_resource(&self) -> Option<String>;
}

/// Shared handle to a host element.
pub type ElementRef = Arc<dyn Element>;

/// The two presentations an observed element can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualProfile {
    /// Fully transparent, with a transition so the later change animates.
    Hidden,
    /// Fully opaque.
    Shown,
}

/// One style property assignment, e.g. `opacity: 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: &'static str,
    pub value: String,
}

impl StyleDeclaration {
    fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

impl VisualProfile {
    /// Style declarations realizing this profile.
    ///
    /// `fade` is the length of the opacity transition carried by the hidden
    /// profile.
    pub fn declarations(self, fade: Duration) -> SmallVec<[StyleDeclaration; 3]> {
        match self {
            Self::Hidden => smallvec![
                StyleDeclaration::new("opacity", "0"),
                StyleDeclaration::new("filter", "alpha(opacity=0)"),
                StyleDeclaration::new(
                    "transition",
                    format!("opacity {}s ease", fade.as_secs_f64())
                ),
            ],
            Self::Shown => smallvec![
                StyleDeclaration::new("opacity", "1"),
                StyleDeclaration::new("filter", "alpha(opacity=100)"),
            ],
        }
    }
}

/// Applies a visual profile to an element.
pub trait VisualStateSetter: Send + Sync {
    fn apply(&self, element: &dyn Element, profile: VisualProfile, style: &[StyleDeclaration]);
}
