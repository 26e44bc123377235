//! TargetRef - ref-like handle to an animatable element
//!
//! A `TargetRef` is the boundary between the engine and the surrounding
//! presentation layer. The host creates one per element it wants animated,
//! attaches it once the element has been laid out, and hands it to a
//! controller. From then on the controller mutates the element's visual
//! state (opacity, offset, scale, text content) through the handle without
//! further calls from the host.
//!
//! Handles are cheaply clonable and share state, so the host can keep one
//! clone for inspection while a controller drives another.
//!
//! # Example
//!
//! ```rust,ignore
//! let card = TargetRef::new().with_id("stat-card").with_class("stat");
//! card.attach(ElementBounds::new(0.0, 1200.0, 300.0, 180.0));
//!
//! // A controller fades it in later; the host can read the result:
//! let opacity = card.style().opacity;
//! ```

use std::sync::{Arc, Mutex};

use smallvec::SmallVec;

use crate::bounds::ElementBounds;

/// Mutable visual state written by controllers each animation frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualStyle {
    /// 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f32,
    /// Vertical offset from the element's resting position, in pixels
    pub translate_y: f32,
    /// Uniform scale, 1.0 = natural size
    pub scale: f32,
}

impl Default for VisualStyle {
    fn default() -> Self {
        // Default markup is fully visible: a target that is never animated
        // renders legible content, not a blank.
        Self {
            opacity: 1.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

/// Shared inner state for TargetRef
pub type SharedTargetInner = Arc<Mutex<TargetInner>>;

/// Inner state of a target element
#[derive(Debug, Default)]
pub struct TargetInner {
    /// Optional string id for registry lookup
    id: Option<String>,
    /// Class markers used by child selectors
    classes: SmallVec<[String; 2]>,
    /// Document-space bounds; `None` until the element is attached
    bounds: Option<ElementBounds>,
    /// Current visual state
    style: VisualStyle,
    /// Text content, overwritten by count-up controllers
    text: Option<String>,
    /// Direct children, in render order
    children: Vec<TargetRef>,
}

/// Ref-like handle to a mountable element
#[derive(Clone, Default)]
pub struct TargetRef {
    inner: SharedTargetInner,
}

impl std::fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetRef")
            .field("id", &self.id())
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl TargetRef {
    /// Create a new, detached target
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string id (builder style)
    pub fn with_id(self, id: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.id = Some(id.into());
        }
        self
    }

    /// Add a class marker (builder style)
    pub fn with_class(self, class: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.classes.push(class.into());
        }
        self
    }

    /// Set the initial text content (builder style)
    pub fn with_text(self, text: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.text = Some(text.into());
        }
        self
    }

    /// Get the string id, if set
    pub fn id(&self) -> Option<String> {
        self.inner.lock().ok()?.id.clone()
    }

    /// Check whether a class marker is present
    pub fn has_class(&self, class: &str) -> bool {
        self.inner
            .lock()
            .ok()
            .is_some_and(|inner| inner.classes.iter().any(|c| c == class))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach the element with its computed document-space bounds
    ///
    /// Until attached, the target reads as absent and controllers treat it
    /// as a missing reference.
    pub fn attach(&self, bounds: ElementBounds) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.bounds = Some(bounds);
        }
    }

    /// Detach the element (on unmount)
    pub fn detach(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.bounds = None;
        }
    }

    /// Check if the element is currently attached
    pub fn is_attached(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .is_some_and(|inner| inner.bounds.is_some())
    }

    /// Get the current bounds, if attached
    pub fn bounds(&self) -> Option<ElementBounds> {
        self.inner.lock().ok()?.bounds
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Append a direct child
    pub fn push_child(&self, child: TargetRef) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.children.push(child);
        }
    }

    /// Append a direct child (builder style)
    pub fn with_child(self, child: TargetRef) -> Self {
        self.push_child(child);
        self
    }

    /// Get all direct children, in render order
    pub fn children(&self) -> Vec<TargetRef> {
        self.inner
            .lock()
            .ok()
            .map(|inner| inner.children.clone())
            .unwrap_or_default()
    }

    /// Get the direct children carrying the given class marker
    ///
    /// This is the group-reveal selector: order is render order, so stagger
    /// indices follow document order.
    pub fn select_children(&self, class: &str) -> Vec<TargetRef> {
        self.children()
            .into_iter()
            .filter(|child| child.has_class(class))
            .collect()
    }

    // =========================================================================
    // Visual state
    // =========================================================================

    /// Get a copy of the current visual style
    pub fn style(&self) -> VisualStyle {
        self.inner
            .lock()
            .ok()
            .map(|inner| inner.style)
            .unwrap_or_default()
    }

    pub fn set_opacity(&self, opacity: f32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.style.opacity = opacity;
        }
    }

    pub fn set_translate_y(&self, translate_y: f32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.style.translate_y = translate_y;
        }
    }

    pub fn set_scale(&self, scale: f32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.style.scale = scale;
        }
    }

    /// Overwrite the whole visual style in one lock acquisition
    pub fn apply_style(&self, style: VisualStyle) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.style = style;
        }
    }

    /// Get the current text content
    pub fn text(&self) -> Option<String> {
        self.inner.lock().ok()?.text.clone()
    }

    /// Overwrite the text content
    pub fn set_text(&self, text: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.text = Some(text.into());
        }
    }
}
