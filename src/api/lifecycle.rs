use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Chart lifecycle states, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Constructed,
    DataBound,
    OptionsResolved,
    LayoutComputed,
    ScalesBuilt,
    Drawn,
    Rendered,
    Resizing,
    Disposed,
}

impl LifecycleState {
    /// Whether `next` may follow `self`.
    #[must_use]
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::{
            Constructed, DataBound, Disposed, Drawn, LayoutComputed, OptionsResolved, Rendered,
            Resizing, ScalesBuilt,
        };
        match (self, next) {
            (Disposed, _) => false,
            (_, Disposed) => true,
            (Constructed | DataBound | Rendered, DataBound) => true,
            (DataBound | Rendered, OptionsResolved) => true,
            (OptionsResolved | Resizing, LayoutComputed) => true,
            (LayoutComputed, ScalesBuilt) => true,
            (ScalesBuilt, Drawn) => true,
            (Drawn, Rendered) => true,
            (Drawn | Rendered, Resizing) => true,
            _ => false,
        }
    }
}

/// Tracks the current state and the state to fall back to when a pass fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    state: LifecycleState,
    settled: LifecycleState,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            state: LifecycleState::Constructed,
            settled: LifecycleState::Constructed,
        }
    }
}

impl Lifecycle {
    #[must_use]
    pub fn state(self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn is_disposed(self) -> bool {
        self.state == LifecycleState::Disposed
    }

    pub fn ensure_live(self) -> ChartResult<()> {
        if self.is_disposed() {
            Err(ChartError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Moves to `next`, rejecting transitions the pipeline never makes.
    pub fn advance(&mut self, next: LifecycleState) -> ChartResult<()> {
        self.ensure_live()?;
        if !self.state.can_transition_to(next) {
            return Err(ChartError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        trace!(from = ?self.state, to = ?next, "lifecycle transition");
        self.state = next;
        if matches!(
            next,
            LifecycleState::DataBound | LifecycleState::Rendered | LifecycleState::Disposed
        ) {
            self.settled = next;
        }
        Ok(())
    }

    /// Returns to the last settled state after a failed pass.
    pub fn abort(&mut self) {
        if !self.is_disposed() {
            trace!(from = ?self.state, to = ?self.settled, "lifecycle pass aborted");
            self.state = self.settled;
        }
    }
}
