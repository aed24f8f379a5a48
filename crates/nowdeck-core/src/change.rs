//! Change-sets and the render side of the contract.

use std::ops::{BitOr, BitOrAssign};

use nowdeck_proto::snapshot::{progress_fraction, LikeStatus, RepeatMode};

/// Display regions that must be redrawn after a reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Album artwork tile.
    pub art: bool,
    /// Title / artist / album text block.
    pub text: bool,
    /// Transport row: play/pause glyph, shuffle, repeat.
    pub controls: bool,
    /// Like indicator.
    pub like: bool,
    /// Progress bar.
    pub progress: bool,
}

impl ChangeSet {
    pub fn all() -> Self {
        Self {
            art: true,
            text: true,
            controls: true,
            like: true,
            progress: true,
        }
    }

    pub fn controls() -> Self {
        Self {
            controls: true,
            ..Self::default()
        }
    }

    pub fn like() -> Self {
        Self {
            like: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl BitOr for ChangeSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            art: self.art | rhs.art,
            text: self.text | rhs.text,
            controls: self.controls | rhs.controls,
            like: self.like | rhs.like,
            progress: self.progress | rhs.progress,
        }
    }
}

impl BitOrAssign for ChangeSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// The subset of canonical state last pushed to the surface.  Used for
/// diffing only; decisions are taken on the canonical state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub art_url: String,
    pub is_playing: bool,
    pub like: LikeStatus,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub progress_ms: u64,
    pub duration_ms: u64,
}

impl Projection {
    pub fn fraction(&self) -> f64 {
        progress_fraction(self.progress_ms, self.duration_ms)
    }
}

/// Something that can draw the deck.
///
/// `render` must only touch the regions flagged in `changes`, and drawing the
/// same change-set twice must leave the same picture.
pub trait RenderSurface {
    fn render(&mut self, changes: &ChangeSet, view: &Projection);

    /// Full-screen message shown outside normal operation (start-up, fatal).
    fn show_status(&mut self, message: &str);

    /// Redraw whatever is currently on screen, status included.  Used after
    /// the surface lost its contents; never changes what is shown.
    fn repaint(&mut self);
}

/// Push a change-set to the surface.  Empty change-sets are dropped.
pub fn dispatch<R: RenderSurface + ?Sized>(surface: &mut R, changes: ChangeSet, view: &Projection) {
    if changes.is_empty() {
        return;
    }
    surface.render(&changes, view);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting(usize);

    impl RenderSurface for Counting {
        fn render(&mut self, _: &ChangeSet, _: &Projection) {
            self.0 += 1;
        }

        fn show_status(&mut self, _: &str) {}

        fn repaint(&mut self) {}
    }

    #[test]
    fn empty_change_set_is_not_rendered() {
        let mut surface = Counting(0);
        dispatch(&mut surface, ChangeSet::default(), &Projection::default());
        assert_eq!(surface.0, 0);
        dispatch(&mut surface, ChangeSet::like(), &Projection::default());
        assert_eq!(surface.0, 1);
    }

    #[test]
    fn merge_is_field_wise_or() {
        let mut changes = ChangeSet::controls();
        changes |= ChangeSet::like();
        assert!(changes.controls && changes.like);
        assert!(!changes.art && !changes.text && !changes.progress);
    }

    #[test]
    fn zero_duration_projection_has_empty_bar() {
        let view = Projection {
            progress_ms: 12_000,
            ..Default::default()
        };
        assert_eq!(view.fraction(), 0.0);
    }
}
