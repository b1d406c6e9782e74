use crate::{Color, Rect};

/// Opaque handle to an image owned by the host (icons, content snapshots).
/// Decoding and rasterizing happen on the host side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

impl ImageHandle {
    /// Placeholder used when nothing was captured.
    pub const BLANK: ImageHandle = ImageHandle(0);
}

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
    },
    Image {
        rect: Rect,
        image: ImageHandle,
        alpha: f32,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Images drawn in this scene, in paint order.
    pub fn images(&self) -> impl Iterator<Item = (ImageHandle, Rect, f32)> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Image { rect, image, alpha } => Some((*image, *rect, *alpha)),
            _ => None,
        })
    }
}
