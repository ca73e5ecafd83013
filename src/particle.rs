// Simple particle struct to keep track of individual position, velocity,
// size and opacity. Only the position changes after creation.

use crate::config::FieldConfig;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, size: f64, opacity: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
            opacity,
        }
    }

    // Uniformly placed within a `width` x `height` surface
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() * 2.0 - 1.0) * config.max_speed;
        let vel_y = (rng.gen::<f64>() * 2.0 - 1.0) * config.max_speed;
        let size = rng.gen::<f64>() * (config.max_size - config.min_size) + config.min_size;
        let opacity = rng.gen::<f64>() * (config.max_opacity - config.min_opacity) + config.min_opacity;
        Particle::new(pos_x, pos_y, vel_x, vel_y, size, opacity)
    }

    // Moves by one frame's worth of velocity, then puts anything that left
    // the surface back on the opposite edge. This is a snap to the edge,
    // not a modulo wrap: x = -0.1 becomes exactly `width`.
    pub fn step(&mut self, width: f64, height: f64) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
        self.pos[0] = wrap_axis(self.pos[0], width);
        self.pos[1] = wrap_axis(self.pos[1], height);
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}

fn wrap_axis(coord: f64, extent: f64) -> f64 {
    if coord < 0.0 {
        extent
    } else if coord > extent {
        0.0
    } else {
        coord
    }
}
