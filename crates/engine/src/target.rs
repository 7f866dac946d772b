//! Drawing-surface seam between the loop and a concrete renderer.

use anyhow::Result;

use crate::core::GameSnapshot;

/// Surface dimensions in the target's own units (terminal cells, pixels, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u16,
    pub height: u16,
}

impl SurfaceSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn fits(&self, required: SurfaceSize) -> bool {
        self.width >= required.width && self.height >= required.height
    }
}

/// Something the loop can paint a frame onto.
pub trait RenderTarget {
    /// Current surface size, or `None` when no surface is attached.
    fn surface_size(&self) -> Option<SurfaceSize>;

    /// Smallest surface that can show the whole board.
    fn required_size(&self) -> SurfaceSize;

    /// Paint one consistent frame.
    fn present(&mut self, snap: &GameSnapshot) -> Result<()>;
}
