//! Wall-clock presentation state. These timers are advanced by the driver
//! with elapsed milliseconds, separately from simulation ticks.

use crate::constants::{
    LEVEL_BANNER_FADE_INTERVAL_MS, LEVEL_BANNER_FADE_STEP, SHIP_BLINK_INTERVAL_MS,
    SHIP_INVULNERABLE_MS,
};

/// Post-spawn grace window with a blinking sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Invulnerability {
    remaining_ms: f64,
    blink_ms: f64,
    visible: bool,
}

impl Invulnerability {
    pub fn started() -> Self {
        Self {
            remaining_ms: SHIP_INVULNERABLE_MS,
            blink_ms: 0.0,
            visible: true,
        }
    }

    pub fn inactive() -> Self {
        Self {
            remaining_ms: 0.0,
            blink_ms: 0.0,
            visible: true,
        }
    }

    pub fn start(&mut self) {
        *self = Self::started();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    pub fn advance(&mut self, elapsed_ms: f64) {
        debug_assert!(elapsed_ms >= 0.0);
        if !self.is_active() {
            return;
        }

        self.remaining_ms -= elapsed_ms;
        if self.remaining_ms <= 0.0 {
            *self = Self::inactive();
            return;
        }

        self.blink_ms += elapsed_ms;
        while self.blink_ms >= SHIP_BLINK_INTERVAL_MS {
            self.blink_ms -= SHIP_BLINK_INTERVAL_MS;
            self.visible = !self.visible;
        }
    }
}

/// "Level N" caption that fades out after each level starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelBanner {
    opacity: f64,
    carry_ms: f64,
}

impl LevelBanner {
    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            carry_ms: 0.0,
        }
    }

    pub fn show(&mut self) {
        self.opacity = 1.0;
        self.carry_ms = 0.0;
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn advance(&mut self, elapsed_ms: f64) {
        debug_assert!(elapsed_ms >= 0.0);
        if self.opacity <= 0.0 {
            return;
        }

        self.carry_ms += elapsed_ms;
        let steps = (self.carry_ms / LEVEL_BANNER_FADE_INTERVAL_MS).floor();
        self.carry_ms -= steps * LEVEL_BANNER_FADE_INTERVAL_MS;
        self.opacity = (self.opacity - steps * LEVEL_BANNER_FADE_STEP).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invulnerability_blinks_then_restores_visibility() {
        let mut timer = Invulnerability::started();
        assert!(timer.is_active());
        assert!(timer.is_visible());

        timer.advance(SHIP_BLINK_INTERVAL_MS);
        assert!(!timer.is_visible());
        timer.advance(SHIP_BLINK_INTERVAL_MS);
        assert!(timer.is_visible());
        timer.advance(SHIP_BLINK_INTERVAL_MS);
        assert!(!timer.is_visible());

        timer.advance(SHIP_INVULNERABLE_MS);
        assert!(!timer.is_active());
        assert!(timer.is_visible());
    }

    #[test]
    fn inactive_timer_ignores_time() {
        let mut timer = Invulnerability::inactive();
        timer.advance(10_000.0);
        assert!(!timer.is_active());
        assert!(timer.is_visible());
    }

    #[test]
    fn banner_fades_in_fixed_steps() {
        let mut banner = LevelBanner::hidden();
        banner.show();
        banner.advance(LEVEL_BANNER_FADE_INTERVAL_MS * 10.0 + 20.0);
        assert!((banner.opacity() - 0.9).abs() < 1e-9);

        banner.advance(30.0);
        assert!((banner.opacity() - 0.89).abs() < 1e-9);

        banner.advance(60_000.0);
        assert_eq!(banner.opacity(), 0.0);
    }
}
