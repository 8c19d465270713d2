use crate::viewport::Viewport;

pub const CIRCLE_STRIDE: usize = 4;
pub const LINE_STRIDE: usize = 5;

/// Drawing target of the particle field.
pub trait RenderSurface {
    fn resize(&mut self, viewport: Viewport);
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, opacity: f32);
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), opacity: f32);
}

/// Surface that records a frame into flat buffers for the page to draw.
///
/// Circles are `[x, y, radius, opacity]`, lines are `[x1, y1, x2, y2, opacity]`.
#[derive(Debug, Default, Clone)]
pub struct RenderBuffers {
    viewport: Viewport,
    circles: Vec<f32>,
    lines: Vec<f32>,
}

impl RenderBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn circles(&self) -> &[f32] {
        &self.circles
    }

    pub fn lines(&self) -> &[f32] {
        &self.lines
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len() / CIRCLE_STRIDE
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / LINE_STRIDE
    }
}

impl RenderSurface for RenderBuffers {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn clear(&mut self) {
        self.circles.clear();
        self.lines.clear();
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, opacity: f32) {
        self.circles.extend_from_slice(&[x, y, radius, opacity]);
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), opacity: f32) {
        self.lines
            .extend_from_slice(&[from.0, from.1, to.0, to.1, opacity]);
    }
}
