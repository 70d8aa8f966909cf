use game_core::*;

/// Hops whenever the bird's hit box sinks close to the lower edge of the next gap
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Distance above the gap's lower edge that triggers a jump
    pub margin: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { margin: 12.0 }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_jump<S: Surface>(&self, game: &Game<S>) -> bool {
        let Some(bird) = game.bird() else {
            return false;
        };
        if !bird.is_alive() || bird.is_ascending() {
            return false;
        }
        let Some(sprite_box) = game.scene().bounding_box(bird.item()) else {
            return false;
        };
        let hit = game.config().bird_hitbox(sprite_box);

        hit.max.y >= self.floor(game, hit.min.x) - self.margin
    }

    /// Lower edge of the opening the bird has to get through next
    fn floor<S: Surface>(&self, game: &Game<S>, bird_left: f32) -> f32 {
        let scene = game.scene();
        game.tubes()
            .and_then(|tubes| {
                tubes.pairs().find_map(|pair| {
                    let mouth = scene.bounding_box(pair.bottom.mouth)?;
                    (mouth.max.x >= bird_left).then_some(mouth.min.y)
                })
            })
            .unwrap_or(game.config().height as f32 * 0.75)
    }
}
