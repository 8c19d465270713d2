use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::RenderSurface;
use crate::viewport::Viewport;

/// Stroke opacity of a link between two particles `distance` apart, or `None`
/// when they are too far apart to be linked.
///
/// The opacity falls linearly from `max_opacity` at distance 0 to 0 at `threshold`.
#[inline(always)]
pub fn link_opacity(distance: f32, threshold: f32, max_opacity: f32) -> Option<f32> {
    if distance < threshold {
        Some(max_opacity * (1.0 - distance / threshold))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub distance: f32,
    pub opacity: f32,
}

/// A fixed set of particles drifting over a toroidal viewport.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, viewport: Viewport, rng: &mut R) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(rng, viewport))
            .collect();
        Self {
            config,
            viewport,
            particles,
        }
    }

    pub fn from_particles(config: FieldConfig, viewport: Viewport, particles: Vec<Particle>) -> Self {
        Self {
            config,
            viewport,
            particles,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn step(&mut self) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.advance(viewport);
        }
    }

    /// Only the bounds change; particles left outside fold back in on their next step.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Every linked pair, each reported once with `from < to`.
    ///
    /// This is an all-pairs scan, quadratic in the particle count.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let threshold = self.config.connection_distance;
        let max_opacity = self.config.max_link_opacity;
        self.particles.iter().enumerate().flat_map(move |(i, a)| {
            self.particles[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, b)| {
                    let distance = a.distance_to(b);
                    link_opacity(distance, threshold, max_opacity).map(|opacity| Link {
                        from: i,
                        to: i + 1 + offset,
                        distance,
                        opacity,
                    })
                })
        })
    }

    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            surface.fill_circle(particle.x, particle.y, particle.radius, particle.opacity);
        }
        for link in self.links() {
            let a = &self.particles[link.from];
            let b = &self.particles[link.to];
            surface.stroke_line((a.x, a.y), (b.x, b.y), link.opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RenderBuffers;
    use rand::SeedableRng;
    use rand_hc::Hc128Rng;

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            radius: 1.5,
            vx: 0.0,
            vy: 0.0,
            opacity: 0.4,
        }
    }

    #[test]
    fn opacity_peaks_at_zero_distance() {
        assert_eq!(link_opacity(0.0, 150.0, 0.1), Some(0.1));
    }

    #[test]
    fn no_link_at_or_beyond_threshold() {
        assert_eq!(link_opacity(150.0, 150.0, 0.1), None);
        assert_eq!(link_opacity(151.0, 150.0, 0.1), None);
        assert_eq!(link_opacity(f32::NAN, 150.0, 0.1), None);
    }

    #[test]
    fn opacity_strictly_decreases_with_distance() {
        let mut previous = link_opacity(0.0, 150.0, 0.1).unwrap();
        let mut distance = 0.5;
        while distance < 150.0 {
            let opacity = link_opacity(distance, 150.0, 0.1).unwrap();
            assert!(opacity < previous, "opacity rose at distance {distance}");
            previous = opacity;
            distance += 0.5;
        }
    }

    #[test]
    fn new_allocates_configured_count() {
        let mut rng = Hc128Rng::seed_from_u64(1);
        let field = ParticleField::new(FieldConfig::default(), Viewport::new(800, 600), &mut rng);
        assert_eq!(field.len(), 50);
    }

    #[test]
    fn links_only_close_pairs_once() {
        let field = ParticleField::from_particles(
            FieldConfig::default(),
            Viewport::new(800, 600),
            vec![still(0.0, 0.0), still(100.0, 0.0), still(400.0, 0.0)],
        );
        let links: Vec<_> = field.links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].from, links[0].to), (0, 1));
        assert_eq!(links[0].distance, 100.0);
        assert!((links[0].opacity - 0.1 * (1.0 - 100.0 / 150.0)).abs() < 1e-6);
    }

    #[test]
    fn custom_connection_distance_is_honoured() {
        let config = FieldConfig {
            connection_distance: 50.0,
            ..FieldConfig::default()
        };
        let field = ParticleField::from_particles(
            config,
            Viewport::new(800, 600),
            vec![still(0.0, 0.0), still(60.0, 0.0), still(0.0, 40.0)],
        );
        let pairs: Vec<_> = field.links().map(|l| (l.from, l.to)).collect();
        assert_eq!(pairs, vec![(0, 2)]);
    }

    #[test]
    fn resize_leaves_particles_untouched() {
        let mut field = ParticleField::from_particles(
            FieldConfig::default(),
            Viewport::new(800, 600),
            vec![still(700.0, 500.0)],
        );
        field.resize(Viewport::new(400, 300));
        assert_eq!(field.viewport(), Viewport::new(400, 300));
        assert_eq!(field.particles()[0], still(700.0, 500.0));

        field.step();
        let p = field.particles()[0];
        assert!(field.viewport().contains(p.x, p.y));
    }

    #[test]
    fn render_draws_circles_then_links() {
        let field = ParticleField::from_particles(
            FieldConfig::default(),
            Viewport::new(800, 600),
            vec![still(10.0, 10.0), still(20.0, 10.0)],
        );
        let mut buffers = RenderBuffers::new();
        field.render(&mut buffers);
        assert_eq!(buffers.circle_count(), 2);
        assert_eq!(buffers.line_count(), 1);
        assert_eq!(&buffers.lines()[..4], &[10.0, 10.0, 20.0, 10.0]);
    }
}
