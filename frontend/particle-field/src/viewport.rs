/// Pixel size of the host container's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Simulation bounds. A collapsed container still counts as one pixel so the
    /// wrap-around range never becomes empty.
    #[inline(always)]
    pub fn extent(&self) -> (f32, f32) {
        (self.width.max(1) as f32, self.height.max(1) as f32)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (width, height) = self.extent();
        (0.0..width).contains(&x) && (0.0..height).contains(&y)
    }
}

/// The element the particle overlay is stacked into.
pub trait Container {
    /// Current content box, measured in device pixels.
    fn content_box(&self) -> Viewport;
}

impl Container for Viewport {
    fn content_box(&self) -> Viewport {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;

    #[test]
    fn zero_sized_viewport_has_unit_extent() {
        assert_eq!(Viewport::new(0, 0).extent(), (1.0, 1.0));
    }

    #[test]
    fn contains_is_half_open() {
        let viewport = Viewport::new(800, 600);
        assert!(viewport.contains(0.0, 0.0));
        assert!(viewport.contains(799.9, 599.9));
        assert!(!viewport.contains(800.0, 10.0));
        assert!(!viewport.contains(10.0, -0.1));
    }
}
