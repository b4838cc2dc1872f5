//! Redirect state machine.

/// Lifecycle of a single redirect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectState {
    /// Page loaded, nothing attempted yet.
    #[default]
    Idle,
    /// App navigation issued; timer and focus/visibility observers armed.
    Racing,
    /// A store or fallback navigation has been issued. Terminal.
    Resolved,
}

impl RedirectState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - Idle -> Racing
    /// - Racing -> Resolved
    pub fn can_transition_to(&self, target: RedirectState) -> bool {
        use RedirectState::*;
        matches!((*self, target), (Idle, Racing) | (Racing, Resolved))
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns `Ok(())` if the transition is valid, or an error otherwise.
    pub fn transition_to(&mut self, target: RedirectState) -> crate::Result<()> {
        if self.can_transition_to(target) {
            *self = target;
            Ok(())
        } else {
            Err(crate::error::DeepLinkError::InvalidStateTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Check if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, RedirectState::Resolved)
    }

    /// Check if browser events still have an effect.
    pub fn accepts_events(&self) -> bool {
        matches!(self, RedirectState::Racing)
    }
}
