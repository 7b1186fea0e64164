#![forbid(unsafe_code)]

//! Drag behavior configuration.
//!
//! [`DragConfig`] is plain data handed to the machine at construction.
//! Options that contradict each other are not rejected; [`DragConfig::resolve_modes`]
//! applies a fixed precedence and the machine runs with the result.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

use tangle_core::event::PointerEvent;
use tangle_core::id::ItemId;
use tangle_core::shape::ShapeStyle;

#[cfg(feature = "tracing")]
use tangle_core::logging::debug;
#[cfg(not(feature = "tracing"))]
use tangle_core::debug;

/// Gate predicate consulted on pointer-down. Returning `false` leaves the
/// press to other behaviors.
pub type ShouldBegin = fn(&PointerEvent, Option<&ItemId>) -> bool;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunable parameters of the drag behavior.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Preview movement on the transient overlay instead of writing real
    /// positions each frame.
    pub enable_transient: bool,

    /// Drag a single synthetic rectangle covering the selection instead of
    /// per-item visuals. Takes precedence over `enable_transient`.
    pub enable_delegate: bool,

    /// Style of the delegate rectangle.
    pub delegate_style: ShapeStyle,

    /// Minimum interval between live position writes while dragging.
    /// Leading and trailing edges both fire; zero disables throttling.
    pub throttle: Duration,

    /// Delay between pointer-up and the restore pass, collapsing rapid
    /// repeated releases into one settle.
    pub settle_debounce: Duration,

    /// Hide edges touching the dragged nodes (plus combo ancestors and
    /// neighbor nodes) for the duration of the gesture. Ignored when a
    /// transient or delegate preview is active.
    pub hide_related_edges: bool,

    /// State name that widens the drag to every item carrying it.
    pub selected_state: String,

    /// Completion event emitted with the moved item ids. `None` emits
    /// nothing.
    pub event_name: Option<String>,

    /// Re-parent the dragged node from the drop target on release.
    pub update_combo_structure: bool,

    /// Extra gate consulted before arming. `None` accepts every press on a
    /// node.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub should_begin: Option<ShouldBegin>,
}

impl Default for DragConfig {
    /// Live dragging: no preview layer, 16 ms write throttle, immediate
    /// settle, combo restructuring on, no completion event.
    fn default() -> Self {
        Self {
            enable_transient: false,
            enable_delegate: false,
            delegate_style: ShapeStyle::filled("#F3F9FF")
                .with_stroke("#1890FF")
                .with_opacity(0.5)
                .with_line_dash(vec![5.0, 5.0]),
            throttle: Duration::from_millis(16),
            settle_debounce: Duration::ZERO,
            hide_related_edges: false,
            selected_state: "selected".to_owned(),
            event_name: None,
            update_combo_structure: true,
            should_begin: None,
        }
    }
}

impl DragConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_transient(mut self, enable: bool) -> Self {
        self.enable_transient = enable;
        self
    }

    #[must_use]
    pub fn with_delegate(mut self, enable: bool) -> Self {
        self.enable_delegate = enable;
        self
    }

    #[must_use]
    pub fn with_delegate_style(mut self, style: ShapeStyle) -> Self {
        self.delegate_style = style;
        self
    }

    #[must_use]
    pub fn with_throttle(mut self, interval: Duration) -> Self {
        self.throttle = interval;
        self
    }

    #[must_use]
    pub fn with_settle_debounce(mut self, delay: Duration) -> Self {
        self.settle_debounce = delay;
        self
    }

    #[must_use]
    pub fn with_hide_related_edges(mut self, hide: bool) -> Self {
        self.hide_related_edges = hide;
        self
    }

    #[must_use]
    pub fn with_selected_state(mut self, state: impl Into<String>) -> Self {
        self.selected_state = state.into();
        self
    }

    #[must_use]
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_update_combo_structure(mut self, update: bool) -> Self {
        self.update_combo_structure = update;
        self
    }

    #[must_use]
    pub fn with_should_begin(mut self, gate: ShouldBegin) -> Self {
        self.should_begin = Some(gate);
        self
    }

    /// Resolve contradictory options into the effective mode set.
    ///
    /// Delegate wins over transient; either preview disables
    /// `hide_related_edges` (a preview already hides the real items it
    /// covers). Resolution is logged at debug, never an error.
    #[must_use]
    pub fn resolve_modes(&self) -> DragModes {
        let delegate = self.enable_delegate;
        let transient = self.enable_transient && !delegate;
        let hide_related = self.hide_related_edges && !delegate && !transient;

        if self.enable_transient && !transient {
            debug!("delegate mode active, transient preview disabled");
        }
        if self.hide_related_edges && !hide_related {
            debug!("preview mode active, hide_related_edges disabled");
        }

        DragModes {
            delegate,
            transient,
            hide_related,
        }
    }
}

/// Effective modes after precedence resolution. At most one of `delegate`
/// and `transient` is set; `hide_related` implies neither is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragModes {
    pub delegate: bool,
    pub transient: bool,
    pub hide_related: bool,
}

impl DragModes {
    /// Whether per-frame movement touches real item data.
    #[must_use]
    pub fn live(&self) -> bool {
        !self.delegate && !self.transient
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
