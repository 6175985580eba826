use crate::constants::{PROJECTILE_RADIUS, PROJECTILE_RANGE, PROJECTILE_SPEED};
use crate::geometry::Vec2;
use crate::wrap::wrap_point;

use super::{Body, Disposable, GameConfig};

/// A shot travelling in a straight line until it has covered its range.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub(super) position: Vec2,
    pub(super) heading: f64,
    pub(super) distance_travelled: f64,
    pub(super) marked_for_deletion: bool,
}

impl Projectile {
    pub fn new(position: Vec2, heading: f64) -> Self {
        Self {
            position,
            heading,
            distance_travelled: 0.0,
            marked_for_deletion: false,
        }
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Total path length, unaffected by edge wraps.
    pub fn distance_travelled(&self) -> f64 {
        self.distance_travelled
    }

    pub(super) fn update(&mut self, dt: f64, config: &GameConfig) {
        let step = Vec2::from_angle(self.heading) * (PROJECTILE_SPEED * dt);
        self.position += step;
        self.distance_travelled += step.length();

        if self.distance_travelled > PROJECTILE_RANGE {
            self.marked_for_deletion = true;
        }

        wrap_point(
            &mut self.position,
            PROJECTILE_RADIUS,
            config.arena_width,
            config.arena_height,
        );
    }
}

impl Body for Projectile {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.heading) * PROJECTILE_SPEED
    }

    /// Axis-aligned square circumscribing the round shot.
    fn world_vertices(&self) -> Vec<Vec2> {
        let Vec2 { x, y } = self.position;
        let r = PROJECTILE_RADIUS;
        vec![
            Vec2::new(x - r, y - r),
            Vec2::new(x + r, y - r),
            Vec2::new(x + r, y + r),
            Vec2::new(x - r, y + r),
        ]
    }
}

impl Disposable for Projectile {
    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_only_after_exceeding_range() {
        let config = GameConfig::default();
        let mut projectile = Projectile::new(Vec2::new(10.0, 250.0), 0.0);

        // 37 ticks cover 296 units, the 38th crosses 300.
        for tick in 1..=37 {
            projectile.update(1.0, &config);
            assert!(!projectile.is_marked_for_deletion(), "tick {tick}");
        }
        projectile.update(1.0, &config);
        assert!(projectile.is_marked_for_deletion());
        assert_eq!(projectile.distance_travelled(), 304.0);
    }

    #[test]
    fn wrapping_keeps_the_travelled_distance() {
        let config = GameConfig::default();
        let mut projectile = Projectile::new(Vec2::new(config.arena_width - 2.0, 100.0), 0.0);
        projectile.update(1.0, &config);

        assert_eq!(projectile.position().x, 0.0);
        assert_eq!(projectile.distance_travelled(), 8.0);
    }

    #[test]
    fn half_frame_moves_half_as_far() {
        let config = GameConfig::default();
        let mut projectile = Projectile::new(Vec2::new(100.0, 100.0), 0.0);
        projectile.update(0.5, &config);
        assert_eq!(projectile.position(), Vec2::new(104.0, 100.0));
    }
}
