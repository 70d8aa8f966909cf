use std::collections::{HashSet, VecDeque};

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::components::{Sprite, SpriteKind};
use crate::config::Config;
use crate::resources::GameRng;
use crate::scene::{ItemId, Surface};
use crate::systems::bird::BirdProfile;

/// Identity of a tube pair; increases with creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub u64);

/// One tube: the capped mouth piece and the body stretching to the edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tube {
    pub mouth: ItemId,
    pub body: ItemId,
}

/// Top and bottom tube created together at one x position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TubePair {
    pub id: PairId,
    pub gap_top: i32,
    pub top: Tube,
    pub bottom: Tube,
}

impl TubePair {
    pub fn items(&self) -> [ItemId; 4] {
        [self.top.mouth, self.top.body, self.bottom.mouth, self.bottom.body]
    }
}

/// Vertical placement of a pair's four pieces (item centres and body heights)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairLayout {
    pub top_mouth_y: i32,
    pub top_body_y: i32,
    pub top_body_height: i32,
    pub bottom_mouth_y: i32,
    pub bottom_body_y: i32,
    pub bottom_body_height: i32,
}

impl PairLayout {
    /// Lay out a pair whose top mouth sits at `gap_top`
    pub fn for_gap_top(gap_top: i32, height: u32, mouth_height: u32, bird_height: u32) -> Self {
        let height = height as i32;
        let mouth = mouth_height as i32;
        let bird = bird_height as i32;

        let bottom_mouth_y = gap_top + 2 * bird + mouth - 1;
        let bottom_body_height = height - bottom_mouth_y;

        Self {
            top_mouth_y: gap_top,
            top_body_y: gap_top / 2 + 1 - mouth / 2,
            top_body_height: gap_top,
            bottom_mouth_y,
            bottom_body_y: height - bottom_body_height / 2 + mouth / 2,
            bottom_body_height,
        }
    }

    /// Rows from the top mouth's anchor row through the bottom mouth's, inclusive
    pub fn gap_span(&self) -> i32 {
        self.bottom_mouth_y - self.top_mouth_y + 1
    }
}

/// Outcome of one mover tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TubeTick {
    /// Pairs credited to the player on this tick (0 or 1)
    pub scored: u32,
    /// Whether the mover wants another tick
    pub running: bool,
}

/// Generates, scrolls and recycles tube pairs, and reports crossings
#[derive(Debug)]
pub struct Tubes {
    config: Config,
    bird: BirdProfile,
    pairs: VecDeque<TubePair>,
    scored: HashSet<PairId>,
    distance: i32,
    next_id: u64,
    stopped: bool,
}

impl Tubes {
    pub fn new(config: &Config, bird: BirdProfile) -> Self {
        Self {
            config: config.clone(),
            bird,
            pairs: VecDeque::new(),
            scored: HashSet::new(),
            distance: 0,
            next_id: 0,
            stopped: false,
        }
    }

    pub fn pairs(&self) -> impl Iterator<Item = &TubePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn is_scored(&self, id: PairId) -> bool {
        self.scored.contains(&id)
    }

    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// X where new pairs appear, just past the right edge
    pub fn spawn_x(&self) -> f32 {
        (self.config.width + self.config.tube_width) as f32
    }

    pub fn gap_top_range(&self) -> std::ops::RangeInclusive<i32> {
        self.config.gap_top_range_for(self.bird.height)
    }

    /// Create a pair with a random gap position
    pub fn create_pair(&mut self, scene: &mut impl Surface, rng: &mut GameRng) -> PairId {
        let gap_top = rng.0.gen_range(self.gap_top_range());
        self.create_pair_at(scene, gap_top)
    }

    /// Create a pair whose top mouth sits at `gap_top`
    pub fn create_pair_at(&mut self, scene: &mut impl Surface, gap_top: i32) -> PairId {
        let layout = PairLayout::for_gap_top(
            gap_top,
            self.config.height,
            self.config.tube_mouth_height,
            self.bird.height,
        );
        let x = self.spawn_x();
        let width = self.config.tube_width as f32;
        let mouth_size = Vec2::new(width, self.config.tube_mouth_height as f32);

        let mut piece = |y: i32, kind: SpriteKind, size: Vec2| {
            scene.create_item(Vec2::new(x, y as f32), Sprite::new(kind, size))
        };

        let top = Tube {
            mouth: piece(layout.top_mouth_y, SpriteKind::TubeMouth, mouth_size),
            body: piece(
                layout.top_body_y,
                SpriteKind::TubeBody,
                Vec2::new(width, layout.top_body_height as f32),
            ),
        };
        let bottom = Tube {
            mouth: piece(layout.bottom_mouth_y, SpriteKind::TubeMouth, mouth_size),
            body: piece(
                layout.bottom_body_y,
                SpriteKind::TubeBody,
                Vec2::new(width, layout.bottom_body_height as f32),
            ),
        };

        let id = PairId(self.next_id);
        self.next_id += 1;
        self.pairs.push_back(TubePair {
            id,
            gap_top,
            top,
            bottom,
        });
        self.distance = 0;

        debug!("spawned tube pair {} with gap top {}", id.0, gap_top);
        id
    }

    /// One mover tick: recycle, spawn, score, scroll
    pub fn tick(&mut self, scene: &mut impl Surface, rng: &mut GameRng) -> TubeTick {
        if self.stopped {
            return TubeTick::default();
        }

        self.evict_offscreen(scene);

        if self.distance >= self.config.tube_min_spacing {
            self.create_pair(scene, rng);
        } else {
            self.distance += self.config.tube_step;
        }

        let scored = self.check_crossing(&*scene);
        self.translate(scene);

        TubeTick {
            scored,
            running: true,
        }
    }

    /// Delete every live pair and forget which ones were scored
    pub fn clear(&mut self, scene: &mut impl Surface) {
        for pair in self.pairs.drain(..) {
            for item in pair.items() {
                scene.delete(item);
            }
        }
        self.scored.clear();
        self.distance = 0;
    }

    fn trailing_edge(scene: &impl Surface, pair: &TubePair) -> Option<f32> {
        scene.bounding_box(pair.top.mouth).map(|rect| rect.max.x)
    }

    /// Drop the oldest pair once it has left the screen
    fn evict_offscreen(&mut self, scene: &mut impl Surface) {
        let Some(front) = self.pairs.front() else {
            return;
        };
        let gone = Self::trailing_edge(&*scene, front).map_or(true, |x2| x2 <= 0.0);
        if !gone {
            return;
        }

        if let Some(pair) = self.pairs.pop_front() {
            for item in pair.items() {
                scene.delete(item);
            }
            self.scored.remove(&pair.id);
            debug!("evicted tube pair {}", pair.id.0);
        }
    }

    /// Credit the nearest unscored pair if its trailing edge just passed the bird
    fn check_crossing(&mut self, scene: &impl Surface) -> u32 {
        let threshold = self.bird.leading_edge;
        let step = self.config.tube_step as f32;

        let candidate = self
            .pairs
            .iter()
            .filter(|pair| !self.scored.contains(&pair.id))
            .find_map(|pair| {
                Self::trailing_edge(scene, pair)
                    .filter(|x2| *x2 > threshold - step)
                    .map(|x2| (pair.id, x2))
            });

        match candidate {
            Some((id, x2)) if x2 <= threshold => {
                self.scored.insert(id);
                debug!("tube pair {} crossed", id.0);
                1
            }
            _ => 0,
        }
    }

    fn translate(&self, scene: &mut impl Surface) {
        let delta = Vec2::new(-(self.config.tube_step as f32), 0.0);
        for pair in &self.pairs {
            for item in pair.items() {
                scene.move_item(item, delta);
            }
        }
    }
}
