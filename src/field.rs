// The particle set and the per-frame update/draw pass over it.

use crate::config::FieldConfig;
use crate::logging::Timer;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;

pub struct ParticleField {
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    pub fn new(particles: Vec<Particle>, config: FieldConfig) -> Self {
        ParticleField { particles, config }
    }

    // Seeds one particle per `pixels_per_particle` of viewport width, spread
    // over a `width` x `height` surface.
    pub fn seeded<R: Rng + ?Sized>(
        rng: &mut R,
        viewport_width: f64,
        width: f64,
        height: f64,
        config: FieldConfig,
    ) -> Self {
        let num_particles = config.particle_count(viewport_width);
        let mut particles = Vec::with_capacity(num_particles);
        for _ in 0..num_particles {
            particles.push(Particle::random(rng, width, height, &config));
        }
        ParticleField::new(particles, config)
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

    /// Advances every particle by one frame and redraws the whole field.
    ///
    /// Each particle is moved and drawn before its links to the particles
    /// after it, so those links see the later particles where they were at
    /// the end of the previous frame. Every unordered pair is considered
    /// exactly once.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let _timer = Timer::new("ParticleField::frame");
        let (width, height) = surface.size();
        let config = &self.config;
        surface.clear();

        for i in 0..self.particles.len() {
            let (head, rest) = self.particles.split_at_mut(i + 1);
            let particle = &mut head[i];
            particle.step(width, height);
            surface.fill_circle(particle.pos, particle.size, config.color, particle.opacity);

            for other in rest.iter() {
                let distance = particle.distance_to(other);
                if config.is_linked(distance) {
                    surface.stroke_line(
                        particle.pos,
                        other.pos,
                        config.color,
                        config.link_alpha_at(distance),
                        config.link_width,
                    );
                }
            }
        }
    }
}
