use std::collections::VecDeque;

use glam::Vec2;

use crate::components::{Sprite, SpriteKind};
use crate::config::Config;
use crate::scene::{ItemId, Surface};

/// Endless background: two tiles sliding left in a ring over a fixed backdrop
#[derive(Debug)]
pub struct Scroll {
    width: f32,
    height: f32,
    step: f32,
    backdrop: Option<ItemId>,
    tiles: VecDeque<ItemId>,
    stopped: bool,
}

impl Scroll {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.width as f32,
            height: config.height as f32,
            step: config.scroll_step,
            backdrop: None,
            tiles: VecDeque::new(),
            stopped: false,
        }
    }

    pub fn backdrop(&self) -> Option<ItemId> {
        self.backdrop
    }

    pub fn tiles(&self) -> impl Iterator<Item = &ItemId> {
        self.tiles.iter()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Recreate the backdrop and both tiles in their starting places
    pub fn reset(&mut self, scene: &mut impl Surface) {
        for id in self.backdrop.take().into_iter().chain(self.tiles.drain(..)) {
            scene.delete(id);
        }

        let mid_y = (self.height / 2.0).floor();
        let half_w = (self.width / 2.0).floor();
        self.backdrop = Some(self.create_tile(scene, half_w, mid_y));
        let first = self.create_tile(scene, half_w, mid_y);
        let second = self.create_tile(scene, self.width + half_w, mid_y);
        self.tiles.extend([first, second]);
        self.stopped = false;
    }

    /// One scroll tick. Returns whether another should be scheduled.
    pub fn tick(&mut self, scene: &mut impl Surface) -> bool {
        if self.stopped {
            return false;
        }

        let delta = Vec2::new(-self.step, 0.0);
        for &tile in &self.tiles {
            scene.move_item(tile, delta);
        }

        let off_screen = self
            .tiles
            .front()
            .map(|&tile| scene.bounding_box(tile).map_or(true, |rect| rect.max.x <= 0.0))
            .unwrap_or(false);
        if off_screen {
            if let Some(tile) = self.tiles.pop_front() {
                scene.delete(tile);
            }
            let anchor = self
                .tiles
                .front()
                .and_then(|&tile| scene.bounding_box(tile))
                .map_or(self.width, |rect| rect.max.x);
            let half_w = (self.width / 2.0).floor();
            let mid_y = (self.height / 2.0).floor();
            let tile = self.create_tile(scene, anchor + half_w, mid_y);
            self.tiles.push_back(tile);
        }

        for &tile in &self.tiles {
            scene.lower(tile);
        }
        if let Some(backdrop) = self.backdrop {
            scene.lower(backdrop);
        }
        true
    }

    fn create_tile(&self, scene: &mut impl Surface, x: f32, y: f32) -> ItemId {
        let sprite = Sprite::new(SpriteKind::Backdrop, Vec2::new(self.width, self.height));
        scene.create_item(Vec2::new(x, y), sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    fn setup() -> (Scene, Scroll) {
        let mut scene = Scene::new();
        let config = Config::for_playfield(1200, 800).unwrap();
        let mut scroll = Scroll::new(&config);
        scroll.reset(&mut scene);
        (scene, scroll)
    }

    fn tile_rects(scene: &Scene, scroll: &Scroll) -> Vec<(f32, f32)> {
        scroll
            .tiles()
            .map(|&id| {
                let rect = scene.bounding_box(id).unwrap();
                (rect.min.x, rect.max.x)
            })
            .collect()
    }

    #[test]
    fn test_reset_places_tiles_edge_to_edge() {
        let (scene, scroll) = setup();
        assert_eq!(scene.count_kind(SpriteKind::Backdrop), 3);
        assert_eq!(tile_rects(&scene, &scroll), vec![(0.0, 1200.0), (1200.0, 2400.0)]);
    }

    #[test]
    fn test_tick_moves_tiles_not_backdrop() {
        let (mut scene, mut scroll) = setup();
        assert!(scroll.tick(&mut scene));
        assert_eq!(tile_rects(&scene, &scroll), vec![(-10.0, 1190.0), (1190.0, 2390.0)]);
        let fixed = scene.bounding_box(scroll.backdrop().unwrap()).unwrap();
        assert_eq!(fixed.min.x, 0.0);
    }

    #[test]
    fn test_tick_keeps_background_at_back() {
        let (mut scene, mut scroll) = setup();
        let mouth = scene.create_item(
            Vec2::new(600.0, 400.0),
            Sprite::new(SpriteKind::TubeMouth, Vec2::new(120.0, 40.0)),
        );
        scroll.tick(&mut scene);

        let order: Vec<ItemId> = scene.draw_list().iter().map(|item| item.id).collect();
        assert_eq!(order[0], scroll.backdrop().unwrap());
        assert_eq!(*order.last().unwrap(), mouth);
    }

    #[test]
    fn test_ring_recycles_seamlessly() {
        let (mut scene, mut scroll) = setup();
        let original_first = *scroll.tiles().next().unwrap();
        for _ in 0..120 {
            scroll.tick(&mut scene);
        }
        assert!(!scene.contains(original_first));
        assert_eq!(scene.count_kind(SpriteKind::Backdrop), 3);
        assert_eq!(tile_rects(&scene, &scroll), vec![(0.0, 1200.0), (1200.0, 2400.0)]);

        for _ in 0..1000 {
            scroll.tick(&mut scene);
            let rects = tile_rects(&scene, &scroll);
            assert_eq!(rects.len(), 2);
            assert_eq!(rects[0].1, rects[1].0);
            assert!(rects[0].0 <= 0.0);
        }
    }

    #[test]
    fn test_stop_and_reset() {
        let (mut scene, mut scroll) = setup();
        scroll.stop();
        assert!(!scroll.tick(&mut scene));
        assert_eq!(tile_rects(&scene, &scroll), vec![(0.0, 1200.0), (1200.0, 2400.0)]);

        scroll.reset(&mut scene);
        assert!(!scroll.is_stopped());
        assert_eq!(scene.count_kind(SpriteKind::Backdrop), 3);
        assert!(scroll.tick(&mut scene));
    }

    #[test]
    fn test_reset_after_scene_wipe() {
        let (mut scene, mut scroll) = setup();
        scene.reset();
        scroll.reset(&mut scene);
        assert_eq!(scene.len(), 3);
    }
}
