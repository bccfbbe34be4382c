//! Drag-to-reorder state machine.
//!
//! Reordering is committed live: every time the dragged block's pointer
//! crosses into another block, the move happens immediately and the drag
//! continues from the block's new position. Dropping (or cancelling) only
//! returns the controller to idle; nothing is committed at drop time and
//! nothing already committed is rolled back.
//!
//! ```text
//!           start(i)                hover(j), j != source
//!   Idle ─────────────▶ Dragging{i} ───────────────────────┐
//!    ▲                      │  ▲        reorder(source, j)  │
//!    │   end() / cancel()   │  └──── source := landed ◀─────┘
//!    └──────────────────────┘
//! ```

/// Something whose items can be moved by index.
///
/// Returns the index the item landed on, or `None` if nothing moved.
pub trait ReorderTarget {
    fn reorder_block(&mut self, from: usize, to: usize) -> Option<usize>;
}

/// Where the controller is in a drag gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    /// No block is being dragged.
    #[default]
    Idle,
    /// The block currently at `source` is being dragged.
    Dragging {
        source: usize,
        /// Reorders committed so far in this gesture.
        commits: usize,
    },
}

/// How a finished drag gesture went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragSummary {
    /// Number of reorders committed while hovering.
    pub commits: usize,
    /// Whether the gesture ended by cancel rather than drop.
    pub cancelled: bool,
}

/// Translates drag events into reorder calls.
#[derive(Debug, Default)]
pub struct DragReorderController {
    state: DragState,
}

impl DragReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Index of the block being dragged, if any.
    pub fn source(&self) -> Option<usize> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { source, .. } => Some(source),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.source().is_some()
    }

    /// Begin dragging the block at `index`.
    ///
    /// Starting while a drag is already in progress restarts the gesture.
    pub fn start(&mut self, index: usize) {
        if let DragState::Dragging { source, .. } = self.state {
            tracing::debug!(previous = source, index, "drag restarted");
        }
        self.state = DragState::Dragging {
            source: index,
            commits: 0,
        };
    }

    /// The dragged block's pointer entered the block at `index`.
    ///
    /// Commits `reorder(source, index)` right away and rebases the source
    /// onto wherever the block landed. Returns whether a reorder happened.
    pub fn hover<T: ReorderTarget + ?Sized>(&mut self, index: usize, target: &mut T) -> bool {
        let DragState::Dragging { source, commits } = self.state else {
            return false;
        };
        if index == source {
            return false;
        }

        match target.reorder_block(source, index) {
            Some(landed) => {
                self.state = DragState::Dragging {
                    source: landed,
                    commits: commits + 1,
                };
                true
            }
            None => false,
        }
    }

    /// The block was dropped.
    pub fn end(&mut self) -> DragSummary {
        self.finish(false)
    }

    /// The drag was cancelled. Committed reorders stay in effect.
    pub fn cancel(&mut self) -> DragSummary {
        self.finish(true)
    }

    fn finish(&mut self, cancelled: bool) -> DragSummary {
        let commits = match std::mem::take(&mut self.state) {
            DragState::Idle => 0,
            DragState::Dragging { commits, .. } => commits,
        };
        DragSummary { commits, cancelled }
    }
}
