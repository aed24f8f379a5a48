//! Pending-intent tracking for optimistic edits.
//!
//! When the user toggles play/pause we flip the displayed value at once and
//! send the command.  The remote echoes the new value on some later poll.
//! Until it does, the poll result must not paint the old value back.
//!
//! # States
//! ```text
//!  Confirmed(T)                 display the remote value
//!  Pending  { intended, .. }    edit sent, no poll seen yet; display intended
//!  TimedOut { intended, .. }    one poll came back stale; display intended,
//!                                 the next poll is adopted whatever it says
//! ```
//!
//! Staleness is counted in polls, not wall time, so divergence is bounded by
//! one poll interval regardless of how the caller paces its timer.

/// Three-state wrapper for a value that may be waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentState<T: Clone + PartialEq> {
    /// The remote agrees with what is displayed.
    Confirmed(T),
    /// Edit applied locally; no poll has been seen since.
    Pending { intended: T, confirmed: T },
    /// One poll disagreed with the edit.  The next poll wins.
    TimedOut { intended: T, confirmed: T },
}

impl<T: Clone + PartialEq> IntentState<T> {
    pub fn new(value: T) -> Self {
        Self::Confirmed(value)
    }

    /// The value to display.
    pub fn intended(&self) -> &T {
        match self {
            Self::Confirmed(v) => v,
            Self::Pending { intended, .. } => intended,
            Self::TimedOut { intended, .. } => intended,
        }
    }

    /// The last value reported by the remote.
    pub fn confirmed(&self) -> &T {
        match self {
            Self::Confirmed(v) => v,
            Self::Pending { confirmed, .. } => confirmed,
            Self::TimedOut { confirmed, .. } => confirmed,
        }
    }

    /// True while an optimistic edit is outstanding.
    pub fn is_outstanding(&self) -> bool {
        !matches!(self, Self::Confirmed(_))
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// Register a local edit.  Transitions to `Pending` unless `intended`
    /// already equals the confirmed value.
    pub fn set_intent(&mut self, intended: T) {
        let confirmed = self.confirmed().clone();
        if intended == confirmed {
            *self = Self::Confirmed(intended);
        } else {
            *self = Self::Pending {
                intended,
                confirmed,
            };
        }
    }

    /// Fold in a freshly polled value.  Returns `true` if the displayed value
    /// changed.
    pub fn on_poll(&mut self, value: T) -> bool {
        let before = self.intended().clone();
        let next = match &*self {
            Self::Pending { intended, .. } if value != *intended => Self::TimedOut {
                intended: intended.clone(),
                confirmed: value,
            },
            // Confirmation, an unguarded poll, or the grace poll already spent.
            _ => Self::Confirmed(value),
        };
        *self = next;
        *self.intended() != before
    }
}

impl<T: Clone + PartialEq + Default> Default for IntentState<T> {
    fn default() -> Self {
        Self::Confirmed(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirming_poll_settles_pending() {
        let mut s = IntentState::new(false);
        s.set_intent(true);
        assert!(s.is_outstanding());
        assert!(!s.on_poll(true));
        assert_eq!(s, IntentState::Confirmed(true));
    }

    #[test]
    fn stale_poll_is_held_once_then_adopted() {
        let mut s = IntentState::new(false);
        s.set_intent(true);

        assert!(!s.on_poll(false));
        assert!(s.is_timed_out());
        assert!(*s.intended());

        assert!(s.on_poll(false));
        assert_eq!(s, IntentState::Confirmed(false));
    }

    #[test]
    fn late_confirmation_after_timeout_is_accepted() {
        let mut s = IntentState::new(false);
        s.set_intent(true);
        s.on_poll(false);
        assert!(!s.on_poll(true));
        assert_eq!(s, IntentState::Confirmed(true));
    }

    #[test]
    fn toggling_back_cancels_the_edit() {
        let mut s = IntentState::new(false);
        s.set_intent(true);
        s.set_intent(false);
        assert_eq!(s, IntentState::Confirmed(false));
    }

    #[test]
    fn unguarded_poll_is_adopted() {
        let mut s = IntentState::new(false);
        assert!(s.on_poll(true));
        assert!(!s.on_poll(true));
        assert!(*s.confirmed());
    }
}
