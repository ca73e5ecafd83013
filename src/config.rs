// Tunables for the particle field. The defaults are what the page ships with.

use crate::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Hard cap on the number of particles, regardless of viewport width.
    pub max_particles: usize,
    /// One particle is seeded per this many pixels of viewport width.
    pub pixels_per_particle: f64,
    /// Largest absolute velocity component, in surface units per frame.
    pub max_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Particles closer than this are joined by a line.
    pub link_distance: f64,
    /// Line alpha at zero distance; fades linearly to 0 at `link_distance`.
    pub link_alpha: f64,
    pub link_width: f64,
    pub color: Color,
}

impl FieldConfig {
    pub const DEFAULT_COLOR: Color = Color::from_u32(0x93c5fdff);

    // floor(width / pixels_per_particle), capped
    pub fn particle_count(&self, viewport_width: f64) -> usize {
        if !(viewport_width > 0.0) || self.pixels_per_particle <= 0.0 {
            return 0;
        }
        let count = (viewport_width / self.pixels_per_particle).floor() as usize;
        count.min(self.max_particles)
    }

    pub fn is_linked(&self, distance: f64) -> bool {
        distance < self.link_distance
    }

    // Alpha of the line joining two particles `distance` apart. Reaches 0
    // at `link_distance` and stays there.
    pub fn link_alpha_at(&self, distance: f64) -> f64 {
        (self.link_alpha * (1.0 - distance / self.link_distance)).max(0.0)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            max_particles: 100,
            pixels_per_particle: 10.0,
            max_speed: 0.25,
            min_size: 1.0,
            max_size: 3.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
            link_distance: 100.0,
            link_alpha: 0.1,
            link_width: 0.5,
            color: FieldConfig::DEFAULT_COLOR,
        }
    }
}
