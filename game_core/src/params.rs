/// Game tuning parameters for Flappy
///
/// Sizes are percentages of the playfield and fractions of its height, tuned
/// by hand against a 1366x768 reference screen.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Bird sprite, percent of the playfield
    pub const BIRD_WIDTH_PCT: u32 = 6;
    pub const BIRD_HEIGHT_PCT: u32 = 11;

    // Bird physics
    pub const TERMINAL_VELOCITY_FRACTION: f32 = 0.003_906_25; // of height, px per fall tick
    pub const ASCENT_BUDGET_FRACTION: f32 = 0.091_145_833_3; // of height, 1 px sub-ticks
    pub const FALL_ACCELERATION: f32 = 0.05; // px per fall tick, per tick
    pub const ASCENT_STEP_MS: u64 = 3;
    pub const ASCENT_STEP_PX: f32 = 1.0;
    pub const FALL_INTERVAL_BASE_MS: f64 = 38.4; // divided by height / 100

    // Bird hit box, insets as fractions of the sprite
    pub const HITBOX_LEFT: f32 = 25.0 / 78.0; // of width
    pub const HITBOX_TOP: f32 = 25.0 / 77.0; // of height
    pub const HITBOX_RIGHT: f32 = 20.0 / 78.0; // of width
    pub const HITBOX_BOTTOM: f32 = 10.0 / 77.0; // of width, not height
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 20.0;

    // Tubes, percent of the playfield
    pub const TUBE_WIDTH_PCT: u32 = 10;
    pub const TUBE_MOUTH_HEIGHT_PCT: u32 = 5;
    pub const TUBE_SPACING_FACTOR: f32 = 4.5; // of tube width
    pub const TUBE_STEP: i32 = 10;

    // Background scroll
    pub const SCROLL_STEP: f32 = 10.0;
    pub const SCROLL_INTERVAL_BASE_MS: f64 = 720.0; // divided by width / 100

    // Playfield
    pub const DEFAULT_WIDTH: u32 = 1200;
    pub const DEFAULT_HEIGHT: u32 = 800;
    pub const MIN_PLAYFIELD: u32 = 100; // below this percent-based sizes hit zero
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_fractions() {
        // 768 px reference height: 3 px terminal velocity, 70 px climb
        assert_eq!(Params::TERMINAL_VELOCITY_FRACTION * 768.0, 3.0);
        assert_eq!((Params::ASCENT_BUDGET_FRACTION * 768.0).round(), 70.0);
        assert_eq!(Params::FALL_ACCELERATION, 0.05);
        assert_eq!(Params::ASCENT_STEP_MS, 3);
    }

    #[test]
    fn test_hitbox_margins_are_asymmetric() {
        assert!(Params::HITBOX_LEFT > Params::HITBOX_RIGHT);
        assert!(Params::HITBOX_TOP > Params::HITBOX_BOTTOM);
        assert_eq!((Params::HITBOX_LEFT * 78.0).round(), 25.0);
        assert_eq!((Params::HITBOX_TOP * 77.0).round(), 25.0);
        assert_eq!((Params::HITBOX_RIGHT * 78.0).round(), 20.0);
        assert_eq!((Params::HITBOX_BOTTOM * 77.0).round(), 10.0);
        assert_eq!(Params::OUT_OF_BOUNDS_MARGIN, 20.0);
    }

    #[test]
    fn test_tube_constants() {
        assert_eq!(Params::TUBE_WIDTH_PCT, 10);
        assert_eq!(Params::TUBE_MOUTH_HEIGHT_PCT, 5);
        assert_eq!(Params::TUBE_SPACING_FACTOR, 4.5);
        assert_eq!(Params::TUBE_STEP, 10);
    }

    #[test]
    fn test_scroll_constants() {
        assert_eq!(Params::SCROLL_STEP, 10.0);
        assert_eq!(Params::SCROLL_INTERVAL_BASE_MS, 720.0);
        assert_eq!(Params::FALL_INTERVAL_BASE_MS, 38.4);
    }
}
