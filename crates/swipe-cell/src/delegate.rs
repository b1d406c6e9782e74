use swipe_core::{ImageHandle, Size};

use crate::cell::SwipeCell;

/// Notifications a host list may care about. Every method defaults to a
/// no-op, so implement only what you need.
pub trait SwipeDelegate {
    fn did_start_swiping(&self, _cell: &SwipeCell) {}

    fn did_end_swiping(&self, _cell: &SwipeCell) {}

    /// Fired on every drag sample with the signed percentage in `[-1, 1]`.
    fn did_swipe(&self, _cell: &SwipeCell, _percentage: f32) {}
}

/// Renders the row's current content into an image the overlay can slide.
pub trait SnapshotSource {
    fn capture(&self, size: Size) -> ImageHandle;
}

impl<F> SnapshotSource for F
where
    F: Fn(Size) -> ImageHandle,
{
    fn capture(&self, size: Size) -> ImageHandle {
        self(size)
    }
}
