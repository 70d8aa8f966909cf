use glam::Vec2;
use tracing::debug;

use crate::components::{Sprite, SpriteKind};
use crate::config::Config;
use crate::geometry::Rect;
use crate::params::Params;
use crate::scene::{ItemId, Surface};

/// Result of a jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    /// Dead, or the round has not started
    Ignored,
    /// A new climb began; the next ascent sub-tick must be scheduled
    Started,
    /// Already climbing; the climb was extended from here
    Extended,
}

/// Result of a fall tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    /// Still alive; schedule the next fall tick
    Continue,
    /// Death observed on this tick. Reported once per bird.
    Died,
    /// Death was already reported; nothing to do
    Halted,
}

/// Size and horizontal placement of the bird, handed to whoever needs them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdProfile {
    pub width: u32,
    pub height: u32,
    /// Left edge of the bird's sprite; it never moves horizontally
    pub leading_edge: f32,
}

/// The player's bird: vertical physics and collision
#[derive(Debug)]
pub struct Bird {
    item: ItemId,
    velocity: f32,
    ascending: bool,
    ascent_count: u32,
    alive: bool,
    running: bool,
    death_reported: bool,

    profile: BirdProfile,
    config: Config,
}

impl Bird {
    /// Create the bird's sprite at the spawn point
    pub fn spawn(scene: &mut impl Surface, config: &Config) -> Self {
        let spawn = config.bird_spawn();
        let size = config.bird_size();
        let item = scene.create_item(spawn, Sprite::new(SpriteKind::Bird, size));

        Self {
            item,
            velocity: 0.0,
            ascending: false,
            ascent_count: 0,
            alive: true,
            running: false,
            death_reported: false,

            profile: BirdProfile {
                width: config.bird_width,
                height: config.bird_height,
                leading_edge: spawn.x - size.x / 2.0,
            },
            config: config.clone(),
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn profile(&self) -> BirdProfile {
        self.profile
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn ascent_count(&self) -> u32 {
        self.ascent_count
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Begin the round; jumps are ignored until then
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Player input: start a climb, or restart the budget of the current one
    pub fn jump(&mut self, scene: &mut impl Surface) -> Jump {
        self.check_collision(&*scene);
        if !self.alive || !self.running {
            self.ascending = false;
            return Jump::Ignored;
        }

        self.velocity = 0.0;
        if self.ascending {
            self.ascent_count = 0;
            return Jump::Extended;
        }

        self.ascending = true;
        self.ascent_count = 0;
        if self.ascend_tick(scene) {
            Jump::Started
        } else {
            Jump::Ignored
        }
    }

    /// One climb sub-tick. Returns whether another should be scheduled.
    pub fn ascend_tick(&mut self, scene: &mut impl Surface) -> bool {
        self.check_collision(&*scene);
        if !self.alive || !self.running {
            self.ascending = false;
            return false;
        }

        self.velocity = 0.0;
        if self.ascent_count < self.config.ascent_budget {
            scene.move_item(self.item, Vec2::new(0.0, -Params::ASCENT_STEP_PX));
            self.ascent_count += 1;
            true
        } else {
            self.ascending = false;
            self.ascent_count = 0;
            false
        }
    }

    /// One gravity tick
    pub fn fall_tick(&mut self, scene: &mut impl Surface) -> Fall {
        if self.death_reported {
            return Fall::Halted;
        }

        self.check_collision(&*scene);
        if !self.alive {
            self.running = false;
            self.ascending = false;
            self.death_reported = true;
            debug!("bird died at {:?}", scene.bounding_box(self.item));
            return Fall::Died;
        }

        if !self.ascending {
            self.velocity = (self.velocity + self.config.fall_acceleration)
                .min(self.config.terminal_velocity);
            scene.move_item(self.item, Vec2::new(0.0, self.velocity));
        }
        Fall::Continue
    }

    /// Test the hit box against the playfield edges and every other item.
    /// Returns true when the bird is dead.
    pub fn check_collision(&mut self, scene: &impl Surface) -> bool {
        if !self.alive {
            return true;
        }

        let Some(sprite_box) = scene.bounding_box(self.item) else {
            self.alive = false;
            return true;
        };
        let hit = self.config.bird_hitbox(sprite_box);

        if self.out_of_bounds(&hit) || self.hits_obstacle(scene, hit) {
            self.alive = false;
        }
        !self.alive
    }

    fn out_of_bounds(&self, hit: &Rect) -> bool {
        hit.min.y <= -Params::OUT_OF_BOUNDS_MARGIN
            || hit.max.y >= self.config.height as f32 + Params::OUT_OF_BOUNDS_MARGIN
    }

    fn hits_obstacle(&self, scene: &impl Surface, hit: Rect) -> bool {
        scene.overlapping(hit).into_iter().any(|id| {
            id != self.item
                && scene
                    .sprite(id)
                    .is_some_and(|sprite| !sprite.is_backdrop())
        })
    }
}
