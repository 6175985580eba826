use tracing::{debug, info, warn};

use crate::constants::{ASTEROID_SPLIT_COUNT, BEST_SCORE_KEY, INITIAL_ASTEROIDS, STARTING_LEVEL};
use crate::rng::SeededRng;
use crate::store::{MemoryScoreStore, ScoreStore};

use super::*;

/// Owns every body in a session and sequences each tick.
///
/// Bodies never hold a reference back to the game; each update call gets
/// the slices it needs to test against and reports outcomes by return
/// value. Removal is deferred: bodies are only flagged during a tick and
/// pruned after all collision passes have run.
pub struct Game<S = MemoryScoreStore, E = NoopEvents> {
    config: GameConfig,
    mode: GameMode,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    projectiles: Vec<Projectile>,
    level: u32,
    score: u32,
    best_score: u32,
    level_banner: LevelBanner,
    frame_count: u32,
    rng: SeededRng,
    store: S,
    events: E,
}

impl Game {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self::with_collaborators(config, seed, MemoryScoreStore::new(), NoopEvents)
    }
}

impl<S: ScoreStore, E: GameEvents> Game<S, E> {
    pub fn with_collaborators(config: GameConfig, seed: u32, store: S, events: E) -> Self {
        let mut game = Self {
            config,
            mode: GameMode::WelcomeMenu,
            ship: Ship::spawn(config.ship_spawn()),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            level: STARTING_LEVEL,
            score: 0,
            best_score: 0,
            level_banner: LevelBanner::hidden(),
            frame_count: 0,
            rng: SeededRng::new(seed),
            store,
            events,
        };
        game.initialize_defaults();
        game
    }

    fn initialize_defaults(&mut self) {
        let center = self.config.center();
        self.ship = Ship::spawn(self.config.ship_spawn());
        self.projectiles.clear();
        self.level = STARTING_LEVEL;
        self.asteroids = self.create_asteroids(INITIAL_ASTEROIDS, center, AsteroidSize::Large);
        self.score = 0;
        self.best_score = self.load_best_score();
        self.frame_count = 0;
        self.level_banner.show();
    }

    fn load_best_score(&self) -> u32 {
        match self.store.load_best_score(BEST_SCORE_KEY) {
            Ok(stored) => stored.unwrap_or(0),
            Err(err) => {
                warn!("best score unavailable, using 0: {err}");
                0
            }
        }
    }

    /// Begins a new session from the welcome menu or after a game over.
    pub fn start(&mut self) {
        if !matches!(self.mode, GameMode::WelcomeMenu | GameMode::GameOver) {
            return;
        }

        self.initialize_defaults();
        self.mode = GameMode::Running;
        info!(best_score = self.best_score, "session started");
        self.events.level_started(self.level);
    }

    pub fn toggle_pause(&mut self) {
        self.mode = match self.mode {
            GameMode::Running => GameMode::Paused,
            GameMode::Paused => GameMode::Running,
            other => other,
        };
    }

    /// Launches a projectile from the ship's nose along its heading.
    pub fn fire_projectile(&mut self) {
        if self.mode != GameMode::Running {
            return;
        }
        self.projectiles
            .push(Projectile::new(self.ship.nose(), self.ship.heading()));
    }

    /// Advances the simulation by `dt` reference frames.
    pub fn update(&mut self, dt: f64) {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid tick delta {dt}");
        if self.mode != GameMode::Running {
            return;
        }

        self.frame_count = self.frame_count.wrapping_add(1);

        self.update_asteroids(dt);
        self.update_ship(dt);

        for projectile in &mut self.projectiles {
            projectile.update(dt, &self.config);
        }
        prune_marked(&mut self.projectiles);

        let fragments = self.split_marked_asteroids();
        prune_marked(&mut self.asteroids);
        self.asteroids.extend(fragments);

        if self.mode == GameMode::Running && self.asteroids.is_empty() {
            self.load_next_level();
        }
    }

    /// Advances wall-clock presentation timers. Runs in any mode so blinking
    /// and fades settle while paused.
    pub fn advance_timers(&mut self, elapsed_ms: f64) {
        self.ship.invulnerability.advance(elapsed_ms);
        self.level_banner.advance(elapsed_ms);
    }

    fn update_asteroids(&mut self, dt: f64) {
        let mut destroyed = Vec::new();
        for asteroid in &mut self.asteroids {
            if asteroid.update(dt, &self.config, &mut self.projectiles) {
                destroyed.push(asteroid.size());
            }
        }

        for size in destroyed {
            self.award_asteroid(size);
        }
    }

    fn update_ship(&mut self, dt: f64) {
        if let Some(size) = self.ship.update(dt, &self.config, &mut self.asteroids) {
            self.award_asteroid(size);
            self.on_ship_collision();
        }
    }

    fn award_asteroid(&mut self, size: AsteroidSize) {
        let points = size.points();
        self.score = self.score.saturating_add(points);
        self.events.asteroid_destroyed(size, points);
    }

    fn on_ship_collision(&mut self) {
        let lives = self.ship.lose_life();
        debug!(lives, frame = self.frame_count, "ship hit");
        self.events.ship_hit(lives);

        self.resolve_game_over();

        self.ship.respawn(self.config.center());
    }

    fn resolve_game_over(&mut self) {
        if self.ship.lives() > 0 {
            return;
        }

        if self.score > self.best_score {
            self.best_score = self.score;
            if let Err(err) = self.store.save_best_score(BEST_SCORE_KEY, self.score) {
                warn!("failed to persist best score {}: {err}", self.score);
            }
        }

        self.mode = GameMode::GameOver;
        info!(
            score = self.score,
            best_score = self.best_score,
            level = self.level,
            "game over"
        );
        self.events.game_over(self.score, self.best_score);
    }

    fn split_marked_asteroids(&mut self) -> Vec<Asteroid> {
        let parents: Vec<(Vec2, AsteroidSize)> = self
            .asteroids
            .iter()
            .filter(|asteroid| asteroid.is_marked_for_deletion())
            .filter_map(|asteroid| Some((asteroid.position(), asteroid.size().smaller()?)))
            .collect();

        let mut fragments = Vec::with_capacity(parents.len() * ASTEROID_SPLIT_COUNT);
        for (position, size) in parents {
            fragments.extend(self.create_asteroids(ASTEROID_SPLIT_COUNT, position, size));
        }
        if !fragments.is_empty() {
            debug!(count = fragments.len(), "asteroids split");
        }
        fragments
    }

    fn create_asteroids(&mut self, quantity: usize, at: Vec2, size: AsteroidSize) -> Vec<Asteroid> {
        let speed_range = asteroid_speed_range(self.level);
        (0..quantity)
            .map(|_| Asteroid::spawn(at, size, speed_range, &mut self.rng))
            .collect()
    }

    fn load_next_level(&mut self) {
        self.level += 1;
        self.ship.invulnerability.start();

        let quantity = asteroid_wave_size(self.level);
        self.asteroids = self.create_asteroids(quantity, self.config.center(), AsteroidSize::Large);
        self.level_banner.show();

        debug!(level = self.level, asteroids = quantity, "level advanced");
        self.events.level_started(self.level);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.mode == GameMode::GameOver
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn lives(&self) -> u32 {
        self.ship.lives()
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub fn level_banner_opacity(&self) -> f64 {
        self.level_banner.opacity()
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Control surface for the input handler.
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            frame_count: self.frame_count,
            mode: self.mode,
            arena: self.config,
            level: self.level,
            score: self.score,
            best_score: self.best_score,
            lives: self.ship.lives(),
            level_banner_opacity: self.level_banner.opacity(),
            ship: ShipSnapshot {
                position: self.ship.position(),
                velocity: self.ship.velocity(),
                heading: self.ship.heading(),
                vertices: self.ship.world_vertices(),
                thrusting: self.ship.is_propelling(),
                invulnerable: self.ship.is_invulnerable(),
                visible: self.ship.is_visible(),
            },
            asteroids: self
                .asteroids
                .iter()
                .map(|asteroid| AsteroidSnapshot {
                    position: asteroid.position(),
                    velocity: asteroid.velocity(),
                    size: asteroid.size(),
                    vertices: asteroid.world_vertices(),
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|projectile| ProjectileSnapshot {
                    position: projectile.position(),
                    heading: projectile.heading(),
                    distance_travelled: projectile.distance_travelled(),
                    vertices: projectile.world_vertices(),
                })
                .collect(),
        }
    }

    pub fn checkpoint(&self) -> ReplayCheckpoint {
        let position = self.ship.position();
        let velocity = self.ship.velocity();
        ReplayCheckpoint {
            frame_count: self.frame_count,
            rng_state: self.rng.state(),
            score: self.score,
            lives: self.ship.lives(),
            level: self.level,
            asteroids: self.asteroids.len(),
            projectiles: self.projectiles.len(),
            ship_x: position.x,
            ship_y: position.y,
            ship_vx: velocity.x,
            ship_vy: velocity.y,
            ship_heading: self.ship.heading(),
            ship_invulnerable: self.ship.is_invulnerable(),
        }
    }

    pub fn result(&self) -> ReplayResult {
        ReplayResult {
            final_score: self.score,
            best_score: self.best_score,
            final_level: self.level,
            final_lives: self.ship.lives(),
            frame_count: self.frame_count,
            final_rng_state: self.rng.state(),
            game_over: self.is_game_over(),
        }
    }
}
