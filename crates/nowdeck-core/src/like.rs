//! Liked-flag tracking for the current identity.
//!
//! The flag is paced independently of the snapshot: it is only checked when
//! the identity changes, and a failed check is retried on every later pass.

use nowdeck_proto::snapshot::LikeStatus;

/// Like state for whatever identity the engine currently tracks.  The
/// identity itself lives on the engine; this type never outlives a change of
/// it (see [`LikeTracker::reset`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeTracker {
    status: LikeStatus,
    check_pending: bool,
}

impl LikeTracker {
    pub fn status(&self) -> LikeStatus {
        self.status
    }

    pub fn is_check_pending(&self) -> bool {
        self.check_pending
    }

    /// Identity changed.  Forget the old status; schedule a check unless
    /// there is nothing to check.
    pub fn reset(&mut self, has_identity: bool) {
        self.status = LikeStatus::Unknown;
        self.check_pending = has_identity;
    }

    /// A background check succeeded.  Returns `true` if the status changed.
    pub fn on_checked(&mut self, liked: bool) -> bool {
        self.check_pending = false;
        self.set(LikeStatus::from_liked(liked))
    }

    /// Optimistic edit from a user toggle.  Returns the prior status so the
    /// caller can restore it if the command is rejected.
    pub fn apply_toggle(&mut self, status: LikeStatus) -> LikeStatus {
        let prior = self.status;
        self.status = status;
        prior
    }

    /// The toggle command came back.  Success makes the edit authoritative
    /// and settles any outstanding check; failure restores `prior`.
    pub fn settle_toggle(&mut self, prior: LikeStatus, accepted: bool) -> bool {
        if accepted {
            self.check_pending = false;
            false
        } else {
            self.set(prior)
        }
    }

    fn set(&mut self, status: LikeStatus) -> bool {
        let changed = self.status != status;
        self.status = status;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_schedules_check_only_for_real_identity() {
        let mut like = LikeTracker::default();
        like.reset(true);
        assert!(like.is_check_pending());
        like.reset(false);
        assert!(!like.is_check_pending());
        assert_eq!(like.status(), LikeStatus::Unknown);
    }

    #[test]
    fn successful_check_clears_pending() {
        let mut like = LikeTracker::default();
        like.reset(true);
        assert!(like.on_checked(true));
        assert_eq!(like.status(), LikeStatus::Liked);
        assert!(!like.is_check_pending());
    }

    #[test]
    fn rejected_toggle_restores_prior() {
        let mut like = LikeTracker::default();
        like.reset(true);
        like.on_checked(false);

        let prior = like.apply_toggle(LikeStatus::Liked);
        assert_eq!(prior, LikeStatus::NotLiked);
        assert!(like.settle_toggle(prior, false));
        assert_eq!(like.status(), LikeStatus::NotLiked);
    }

    #[test]
    fn accepted_toggle_settles_outstanding_check() {
        let mut like = LikeTracker::default();
        like.reset(true);
        let prior = like.apply_toggle(LikeStatus::Liked);
        assert!(!like.settle_toggle(prior, true));
        assert!(!like.is_check_pending());
        assert_eq!(like.status(), LikeStatus::Liked);
    }
}
