//! The per-frame loop that keeps a [`ParticleField`] moving and drawn.
//!
//! The loop is a cancellable repeating task: every frame re-requests the next
//! one from the injected [`FrameScheduler`] until its [`CancelToken`] fires.

use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::scheduler::{CancelToken, FrameScheduler};
use crate::surface::RenderSurface;
use crate::viewport::{Container, Viewport};

struct AnimationState<F> {
    field: ParticleField,
    surface: F,
    frames: u64,
}

impl<F: RenderSurface> AnimationState<F> {
    fn frame(&mut self) {
        self.surface.clear();
        self.field.step();
        self.field.render(&mut self.surface);
        self.frames += 1;
    }
}

/// Owner of a running particle animation. Dropping it stops the loop.
pub struct AnimationHandle<F> {
    state: Rc<RefCell<AnimationState<F>>>,
    token: CancelToken,
}

/// Starts the particle animation inside `container`.
///
/// Without a container nothing is created and nothing is scheduled. Otherwise
/// the first frame is drawn right away and the loop keeps itself scheduled.
pub fn mount<C, R, F, S>(
    container: Option<&C>,
    config: FieldConfig,
    rng: &mut R,
    mut surface: F,
    scheduler: Rc<S>,
) -> Option<AnimationHandle<F>>
where
    C: Container + ?Sized,
    R: Rng + ?Sized,
    F: RenderSurface + 'static,
    S: FrameScheduler + ?Sized + 'static,
{
    let viewport = container?.content_box();
    surface.resize(viewport);
    let field = ParticleField::new(config, viewport, rng);
    debug!(
        particles = field.len(),
        width = viewport.width,
        height = viewport.height,
        "mounting particle field"
    );

    let state = Rc::new(RefCell::new(AnimationState {
        field,
        surface,
        frames: 0,
    }));
    let token = CancelToken::new();
    state.borrow_mut().frame();
    schedule_next(Rc::clone(&state), token.clone(), scheduler);
    Some(AnimationHandle { state, token })
}

fn schedule_next<F, S>(
    state: Rc<RefCell<AnimationState<F>>>,
    token: CancelToken,
    scheduler: Rc<S>,
) where
    F: RenderSurface + 'static,
    S: FrameScheduler + ?Sized + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move || {
        if token.is_cancelled() {
            return;
        }
        state.borrow_mut().frame();
        schedule_next(state, token, next);
    }));
}

impl<F: RenderSurface> AnimationHandle<F> {
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!(frames = self.frames(), "stopping particle field");
            self.token.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Resizes the render surface and the wrap bounds. Particle positions are kept.
    pub fn resize(&self, viewport: Viewport) {
        trace!(width = viewport.width, height = viewport.height, "resizing particle field");
        let mut state = self.state.borrow_mut();
        state.field.resize(viewport);
        state.surface.resize(viewport);
    }

    pub fn resize_to<C: Container + ?Sized>(&self, container: &C) {
        self.resize(container.content_box());
    }

    /// Frames drawn so far, including the one drawn on mount.
    pub fn frames(&self) -> u64 {
        self.state.borrow().frames
    }

    pub fn with_field<T>(&self, f: impl FnOnce(&ParticleField) -> T) -> T {
        f(&self.state.borrow().field)
    }

    pub fn with_surface<T>(&self, f: impl FnOnce(&F) -> T) -> T {
        f(&self.state.borrow().surface)
    }
}

impl<F> Drop for AnimationHandle<F> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
