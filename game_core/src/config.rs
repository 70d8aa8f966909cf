use std::ops::RangeInclusive;

use glam::Vec2;
use thiserror::Error;

use crate::geometry::Rect;
use crate::params::Params;

/// Rejected playfield geometry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("playfield {width}x{height} is smaller than the {min}x{min} minimum")]
    PlayfieldTooSmall { width: u32, height: u32, min: u32 },

    #[error("no room for a tube gap: gap top range {low}..={high} is empty")]
    EmptyGapRange { low: i32, high: i32 },
}

/// Game configuration, derived from the playfield size
#[derive(Debug, Clone)]
pub struct Config {
    pub width: u32,
    pub height: u32,

    pub bird_width: u32,
    pub bird_height: u32,
    pub terminal_velocity: f32,
    pub fall_acceleration: f32,
    pub ascent_budget: u32,
    pub ascent_step_ms: u64,
    pub fall_interval_ms: u64,

    pub tube_width: u32,
    pub tube_mouth_height: u32,
    pub tube_min_spacing: i32,
    pub tube_step: i32,
    pub tube_interval_ms: u64,

    pub scroll_step: f32,
    pub scroll_interval_ms: u64,
    pub background_animation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::derive(Params::DEFAULT_WIDTH, Params::DEFAULT_HEIGHT)
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the configuration for a `width` x `height` playfield
    pub fn for_playfield(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width < Params::MIN_PLAYFIELD || height < Params::MIN_PLAYFIELD {
            return Err(ConfigError::PlayfieldTooSmall {
                width,
                height,
                min: Params::MIN_PLAYFIELD,
            });
        }

        let config = Self::derive(width, height);
        let range = config.gap_top_range();
        if range.is_empty() {
            return Err(ConfigError::EmptyGapRange {
                low: *range.start(),
                high: *range.end(),
            });
        }
        Ok(config)
    }

    pub fn with_background_animation(mut self, enabled: bool) -> Self {
        self.background_animation = enabled;
        self
    }

    fn derive(width: u32, height: u32) -> Self {
        let tube_width = (width / 100) * Params::TUBE_WIDTH_PCT;
        Self {
            width,
            height,

            bird_width: (width / 100) * Params::BIRD_WIDTH_PCT,
            bird_height: (height / 100) * Params::BIRD_HEIGHT_PCT,
            terminal_velocity: round_half_up(Params::TERMINAL_VELOCITY_FRACTION * height as f32),
            fall_acceleration: Params::FALL_ACCELERATION,
            ascent_budget: round_half_up(Params::ASCENT_BUDGET_FRACTION * height as f32) as u32,
            ascent_step_ms: Params::ASCENT_STEP_MS,
            fall_interval_ms: interval_ms(Params::FALL_INTERVAL_BASE_MS, height),

            tube_width,
            tube_mouth_height: (height / 100) * Params::TUBE_MOUTH_HEIGHT_PCT,
            tube_min_spacing: (tube_width as f32 * Params::TUBE_SPACING_FACTOR) as i32,
            tube_step: Params::TUBE_STEP,
            tube_interval_ms: interval_ms(Params::SCROLL_INTERVAL_BASE_MS, width),

            scroll_step: Params::SCROLL_STEP,
            scroll_interval_ms: interval_ms(Params::SCROLL_INTERVAL_BASE_MS, width),
            background_animation: true,
        }
    }

    /// Centre of the bird sprite when a round starts
    pub fn bird_spawn(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    pub fn bird_size(&self) -> Vec2 {
        Vec2::new(self.bird_width as f32, self.bird_height as f32)
    }

    /// Shrink the bird's sprite box to the part that can actually collide
    pub fn bird_hitbox(&self, sprite_box: Rect) -> Rect {
        let w = self.bird_width as f32;
        let h = self.bird_height as f32;
        sprite_box.inset(
            (Params::HITBOX_LEFT * w).trunc(),
            (Params::HITBOX_TOP * h).trunc(),
            (Params::HITBOX_RIGHT * w).trunc(),
            (Params::HITBOX_BOTTOM * w).trunc(),
        )
    }

    /// Valid y offsets for the top tube's mouth
    pub fn gap_top_range(&self) -> RangeInclusive<i32> {
        self.gap_top_range_for(self.bird_height)
    }

    /// Valid y offsets for the top tube's mouth around a bird `bird_height` tall
    pub fn gap_top_range_for(&self, bird_height: u32) -> RangeInclusive<i32> {
        let low = (self.tube_mouth_height / 2) as i32;
        let high = self.height as i32 - 2 * bird_height as i32 - self.tube_mouth_height as i32;
        low..=high
    }

    /// Smallest vertical opening a generated pair may have
    pub fn min_gap(&self) -> i32 {
        2 * self.bird_height as i32 + self.tube_mouth_height as i32
    }
}

fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Tick interval scaled to the playfield: `base // (extent / 100)`, at least 1 ms
fn interval_ms(base: f64, extent: u32) -> u64 {
    let ms = (base / (extent as f64 / 100.0)).floor() as u64;
    ms.max(1)
}
