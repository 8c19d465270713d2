//! Particle background for the portfolio hero section.
//!
//! A fixed set of particles drifts over a toroidal viewport; nearby pairs are
//! joined by lines that fade with distance. The crate root exposes the wasm
//! bindings the page glue drives once per animation frame.

use rand::SeedableRng;
use rand_hc::Hc128Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::thread_local;
use tracing::{debug, warn};
use wasm_bindgen::prelude::wasm_bindgen;

pub mod animation;
pub mod config;
pub mod field;
pub mod particle;
pub mod scheduler;
pub mod surface;
pub mod viewport;

pub use animation::{mount, AnimationHandle};
pub use config::{ConfigError, FieldConfig, MAX_PARTICLES};
pub use field::{link_opacity, Link, ParticleField};
pub use particle::Particle;
pub use scheduler::{CancelToken, FrameCallback, FrameQueue, FrameScheduler};
pub use surface::{RenderBuffers, RenderSurface};
pub use viewport::{Container, Viewport};

struct Host {
    queue: Rc<FrameQueue>,
    animation: AnimationHandle<RenderBuffers>,
}

thread_local! {
    static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
    static PENDING_CONFIG: Cell<FieldConfig> = Cell::new(FieldConfig::default());
}

fn with_host<F, R>(default: R, f: F) -> R
where
    F: FnOnce(&Host) -> R,
{
    HOST.with(|cell| {
        let borrow = cell.borrow();
        if let Some(host) = borrow.as_ref() {
            f(host)
        } else {
            default
        }
    })
}

/// Runs once when the page instantiates the module: tracing events and panics
/// go to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn field_start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );
}

/// Sets the config used by the next `field_mount`. Returns false and keeps the
/// previous config when `json` is rejected.
#[wasm_bindgen]
pub fn field_configure(json: &str) -> bool {
    match FieldConfig::from_json(json) {
        Ok(config) => {
            debug!(?config, "particle field configured");
            PENDING_CONFIG.with(|cell| cell.set(config));
            true
        }
        Err(err) => {
            warn!("Ignoring particle field config: {}", err);
            false
        }
    }
}

/// Called by the page once the hero container exists. Replaces any running field.
#[no_mangle]
pub extern "C" fn field_mount(width: u32, height: u32, seed: u32) {
    let config = PENDING_CONFIG.with(Cell::get);
    let container = Viewport::new(width, height);
    let queue = Rc::new(FrameQueue::new());
    let mut rng = Hc128Rng::seed_from_u64(u64::from(seed));
    let host = mount(
        Some(&container),
        config,
        &mut rng,
        RenderBuffers::new(),
        Rc::clone(&queue),
    )
    .map(|animation| Host { queue, animation });
    let previous = HOST.with(|cell| cell.replace(host));
    if let Some(previous) = previous {
        previous.animation.cancel();
        previous.queue.clear();
    }
}

#[no_mangle]
pub extern "C" fn field_resize(width: u32, height: u32) {
    with_host((), |host| host.animation.resize(Viewport::new(width, height)));
}

/// Runs one frame. Returns 1 while the loop is live, 0 otherwise.
#[no_mangle]
pub extern "C" fn field_frame() -> u32 {
    with_host(0, |host| {
        host.queue.run_frame();
        u32::from(host.animation.is_running())
    })
}

#[no_mangle]
pub extern "C" fn field_stop() {
    if let Some(host) = HOST.with(|cell| cell.borrow_mut().take()) {
        host.animation.cancel();
        host.queue.clear();
    }
}

#[no_mangle]
pub extern "C" fn field_circles_ptr() -> *const f32 {
    with_host(std::ptr::null(), |host| {
        host.animation.with_surface(|s| s.circles().as_ptr())
    })
}

#[no_mangle]
pub extern "C" fn field_circles_len() -> u32 {
    with_host(0, |host| host.animation.with_surface(|s| s.circles().len() as u32))
}

#[no_mangle]
pub extern "C" fn field_links_ptr() -> *const f32 {
    with_host(std::ptr::null(), |host| {
        host.animation.with_surface(|s| s.lines().as_ptr())
    })
}

#[no_mangle]
pub extern "C" fn field_links_len() -> u32 {
    with_host(0, |host| host.animation.with_surface(|s| s.lines().len() as u32))
}

#[no_mangle]
pub extern "C" fn field_particle_count() -> u32 {
    with_host(0, |host| host.animation.with_field(|f| f.len() as u32))
}

/// Particle colour as `0xRRGGBB`.
#[no_mangle]
pub extern "C" fn field_color() -> u32 {
    let pending = PENDING_CONFIG.with(Cell::get);
    with_host(pending.packed_color(), |host| {
        host.animation.with_field(|f| f.config().packed_color())
    })
}
