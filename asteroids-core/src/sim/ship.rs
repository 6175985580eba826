use core::f64::consts::TAU;

use crate::collision::intersects;
use crate::constants::{
    SHIP_DRAG, SHIP_LENGTH, SHIP_MAX_SPEED, SHIP_ROTATION_SPEED, SHIP_THRUST, SHIP_WIDTH,
    STARTING_LIVES,
};
use crate::geometry::{to_world, Vec2};
use crate::wrap::wrap_polygon;

use super::{Asteroid, AsteroidSize, Body, Disposable, GameConfig, Invulnerability};

/// Triangle outline at heading 0, nose pointing along +x.
pub const SHIP_SHAPE: [Vec2; 3] = [
    Vec2::new(SHIP_LENGTH / 2.0, 0.0),
    Vec2::new(-SHIP_LENGTH / 2.0, -SHIP_WIDTH / 2.0),
    Vec2::new(-SHIP_LENGTH / 2.0, SHIP_WIDTH / 2.0),
];

#[derive(Clone, Debug)]
pub struct Ship {
    pub(super) position: Vec2,
    pub(super) velocity: Vec2,
    pub(super) heading: f64,
    pub(super) rotation_speed: f64,
    pub(super) propel_speed: f64,
    pub(super) is_propelling: bool,
    pub(super) lives: u32,
    pub(super) invulnerability: Invulnerability,
}

impl Ship {
    /// A stationary ship with a full set of lives and a fresh grace window.
    pub fn spawn(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            heading: 0.0,
            rotation_speed: 0.0,
            propel_speed: 0.0,
            is_propelling: false,
            lives: STARTING_LIVES,
            invulnerability: Invulnerability::started(),
        }
    }

    pub fn rotate_left(&mut self) {
        self.rotation_speed = -SHIP_ROTATION_SPEED;
    }

    pub fn rotate_right(&mut self) {
        self.rotation_speed = SHIP_ROTATION_SPEED;
    }

    pub fn stop_rotating(&mut self) {
        self.rotation_speed = 0.0;
    }

    pub fn start_thrust(&mut self) {
        self.is_propelling = true;
        self.propel_speed = SHIP_THRUST;
    }

    pub fn stop_thrust(&mut self) {
        self.is_propelling = false;
        self.propel_speed = 0.0;
    }

    /// Heading in radians, always in `[0, 2π)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    pub fn is_propelling(&self) -> bool {
        self.is_propelling
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_active()
    }

    pub fn is_visible(&self) -> bool {
        self.invulnerability.is_visible()
    }

    /// Muzzle point for new projectiles.
    pub fn nose(&self) -> Vec2 {
        self.position + Vec2::from_angle(self.heading) * (SHIP_LENGTH / 2.0)
    }

    /// Integrates one tick, then tests the asteroids unless invulnerable.
    /// The first asteroid found touching the hull is marked and its size
    /// returned; further overlaps wait for a later tick.
    pub(super) fn update(
        &mut self,
        dt: f64,
        config: &GameConfig,
        asteroids: &mut [Asteroid],
    ) -> Option<AsteroidSize> {
        self.integrate(dt, config);

        if self.is_invulnerable() {
            return None;
        }

        let hull = self.world_vertices();
        let asteroid = asteroids
            .iter_mut()
            .filter(|asteroid| !asteroid.is_marked_for_deletion())
            .find(|asteroid| intersects(&hull, &asteroid.world_vertices()))?;
        asteroid.mark_for_deletion();
        Some(asteroid.size())
    }

    pub(super) fn integrate(&mut self, dt: f64, config: &GameConfig) {
        self.heading = wrap_heading(self.heading + self.rotation_speed * dt);

        if self.is_propelling {
            let candidate =
                self.velocity + Vec2::from_angle(self.heading) * (self.propel_speed * dt);
            // At the cap the accelerating step is dropped rather than rescaled.
            if candidate.length() < SHIP_MAX_SPEED {
                self.velocity = candidate;
            }
        } else {
            self.apply_drag(dt);
        }

        self.position += self.velocity * dt;

        let hull = self.world_vertices();
        wrap_polygon(
            &mut self.position,
            &hull,
            config.arena_width,
            config.arena_height,
        );
    }

    /// Decelerates along the direction of travel; neither axis may cross zero.
    fn apply_drag(&mut self, dt: f64) {
        let speed = self.velocity.length();
        if speed == 0.0 {
            return;
        }

        let decel = SHIP_DRAG * dt;
        let direction = self.velocity * (1.0 / speed);
        self.velocity = Vec2::new(
            decay_toward_zero(self.velocity.x, decel * direction.x.abs()),
            decay_toward_zero(self.velocity.y, decel * direction.y.abs()),
        );
    }

    pub(super) fn respawn(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.invulnerability.start();
    }

    pub(super) fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }
}

impl Body for Ship {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn world_vertices(&self) -> Vec<Vec2> {
        to_world(self.position, self.heading, &SHIP_SHAPE)
    }
}

#[inline]
fn wrap_heading(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[inline]
fn decay_toward_zero(value: f64, amount: f64) -> f64 {
    if value > 0.0 {
        (value - amount).max(0.0)
    } else if value < 0.0 {
        (value + amount).min(0.0)
    } else {
        0.0
    }
}
