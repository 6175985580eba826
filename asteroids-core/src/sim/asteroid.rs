use crate::collision::intersects;
use crate::geometry::Vec2;
use crate::rng::SeededRng;
use crate::wrap::wrap_polygon;

use super::{AsteroidSize, Body, Disposable, GameConfig, Projectile};

/// Convex outlines at unit scale, scaled by the asteroid's numeric size.
pub const ASTEROID_TEMPLATES: [&[Vec2]; 4] = [
    &[
        Vec2::new(-4.0, -21.0),
        Vec2::new(22.0, -8.0),
        Vec2::new(16.0, 12.0),
        Vec2::new(-11.0, 26.0),
        Vec2::new(-24.0, -8.0),
    ],
    &[
        Vec2::new(0.0, -16.0),
        Vec2::new(12.0, -11.0),
        Vec2::new(16.0, 0.0),
        Vec2::new(11.0, 12.0),
        Vec2::new(-2.0, 16.0),
        Vec2::new(-13.0, 10.0),
        Vec2::new(-16.0, -2.0),
        Vec2::new(-10.0, -13.0),
    ],
    &[
        Vec2::new(-6.0, -15.0),
        Vec2::new(10.0, -14.0),
        Vec2::new(17.0, -2.0),
        Vec2::new(9.0, 14.0),
        Vec2::new(-9.0, 15.0),
        Vec2::new(-16.0, 1.0),
    ],
    &[
        Vec2::new(0.0, -17.0),
        Vec2::new(15.0, -6.0),
        Vec2::new(11.0, 14.0),
        Vec2::new(-11.0, 14.0),
        Vec2::new(-15.0, -6.0),
    ],
];

#[derive(Clone, Debug)]
pub struct Asteroid {
    pub(super) position: Vec2,
    pub(super) velocity: Vec2,
    pub(super) size: AsteroidSize,
    pub(super) template: usize,
    pub(super) marked_for_deletion: bool,
}

impl Asteroid {
    /// Random outline and a random velocity whose speed lies in
    /// `speed_range`. The speed is split between the axes and each
    /// component gets a random sign.
    pub fn spawn(
        position: Vec2,
        size: AsteroidSize,
        (min_speed, max_speed): (f64, f64),
        rng: &mut SeededRng,
    ) -> Self {
        let template = rng.next_int(ASTEROID_TEMPLATES.len() as u32) as usize;
        let speed = rng.next_range_f64(min_speed, max_speed);
        let mut vx = rng.next_f64() * speed;
        let mut vy = speed - vx.abs();
        if rng.chance() {
            vx = -vx;
        }
        if rng.chance() {
            vy = -vy;
        }

        Self::with_velocity(position, size, Vec2::new(vx, vy), template)
    }

    pub fn with_velocity(position: Vec2, size: AsteroidSize, velocity: Vec2, template: usize) -> Self {
        debug_assert!(template < ASTEROID_TEMPLATES.len());
        Self {
            position,
            velocity,
            size,
            template,
            marked_for_deletion: false,
        }
    }

    pub fn size(&self) -> AsteroidSize {
        self.size
    }

    pub fn template(&self) -> usize {
        self.template
    }

    /// Collides with the first live projectile it touches, then drifts and
    /// wraps. Returns true when this call destroyed the asteroid.
    pub(super) fn update(
        &mut self,
        dt: f64,
        config: &GameConfig,
        projectiles: &mut [Projectile],
    ) -> bool {
        let destroyed = !self.marked_for_deletion && self.absorb_hit(projectiles);

        self.position += self.velocity * dt;
        let vertices = self.world_vertices();
        wrap_polygon(
            &mut self.position,
            &vertices,
            config.arena_width,
            config.arena_height,
        );

        destroyed
    }

    fn absorb_hit(&mut self, projectiles: &mut [Projectile]) -> bool {
        let outline = self.world_vertices();
        let hit = projectiles
            .iter_mut()
            .filter(|projectile| !projectile.is_marked_for_deletion())
            .find(|projectile| intersects(&outline, &projectile.world_vertices()));

        match hit {
            Some(projectile) => {
                projectile.mark_for_deletion();
                self.mark_for_deletion();
                true
            }
            None => false,
        }
    }
}

impl Body for Asteroid {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn world_vertices(&self) -> Vec<Vec2> {
        let scale = self.size.scale();
        ASTEROID_TEMPLATES[self.template]
            .iter()
            .map(|offset| self.position + *offset * scale)
            .collect()
    }
}

impl Disposable for Asteroid {
    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }
}
