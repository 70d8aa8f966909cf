//! Scene surface
//!
//! The positioned-item store every component draws into. `Surface` is the
//! contract the simulation consumes; `Scene` implements it on a hecs world.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Depth, Position, Sprite, SpriteKind};
use crate::geometry::Rect;

/// Handle to a scene item. Deleted handles stay invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Entity);

/// Operations the game loop needs from whatever displays it
///
/// Operations on an id that no longer exists are ignored.
pub trait Surface {
    fn create_item(&mut self, pos: Vec2, sprite: Sprite) -> ItemId;
    fn move_item(&mut self, id: ItemId, delta: Vec2);
    fn bounding_box(&self, id: ItemId) -> Option<Rect>;
    fn sprite(&self, id: ItemId) -> Option<Sprite>;
    fn delete(&mut self, id: ItemId);
    /// Items whose box intersects `rect`, bottom of the stack first
    fn overlapping(&self, rect: Rect) -> Vec<ItemId>;
    /// Send an item to the back of the stack
    fn lower(&mut self, id: ItemId);
    /// Delete every item
    fn reset(&mut self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of the scene in stacking order
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub id: ItemId,
    pub rect: Rect,
    pub sprite: Sprite,
}

/// In-process scene backed by an ECS world
#[derive(Default)]
pub struct Scene {
    world: World,
    top: i64,
    bottom: i64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.world.contains(id.0)
    }

    pub fn count_kind(&self, kind: SpriteKind) -> usize {
        self.world
            .query::<&Sprite>()
            .iter()
            .filter(|(_e, sprite)| sprite.kind == kind)
            .count()
    }

    /// Every item, bottom of the stack first
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut items: Vec<(Depth, DrawItem)> = self
            .world
            .query::<(&Position, &Sprite, &Depth)>()
            .iter()
            .map(|(entity, (pos, sprite, depth))| {
                (
                    *depth,
                    DrawItem {
                        id: ItemId(entity),
                        rect: Rect::from_center_size(pos.0, sprite.size),
                        sprite: *sprite,
                    },
                )
            })
            .collect();
        items.sort_by_key(|(depth, item)| (*depth, item.id));
        items.into_iter().map(|(_, item)| item).collect()
    }
}

impl Surface for Scene {
    fn create_item(&mut self, pos: Vec2, sprite: Sprite) -> ItemId {
        self.top += 1;
        ItemId(self.world.spawn((Position(pos), sprite, Depth(self.top))))
    }

    fn move_item(&mut self, id: ItemId, delta: Vec2) {
        if let Ok(pos) = self.world.query_one_mut::<&mut Position>(id.0) {
            pos.0 += delta;
        }
    }

    fn bounding_box(&self, id: ItemId) -> Option<Rect> {
        let center = self.world.get::<&Position>(id.0).ok()?.0;
        let size = self.world.get::<&Sprite>(id.0).ok()?.size;
        Some(Rect::from_center_size(center, size))
    }

    fn sprite(&self, id: ItemId) -> Option<Sprite> {
        self.world.get::<&Sprite>(id.0).ok().map(|sprite| *sprite)
    }

    fn delete(&mut self, id: ItemId) {
        let _ = self.world.despawn(id.0);
    }

    fn overlapping(&self, rect: Rect) -> Vec<ItemId> {
        self.draw_list()
            .into_iter()
            .filter(|item| item.rect.intersects(&rect))
            .map(|item| item.id)
            .collect()
    }

    fn lower(&mut self, id: ItemId) {
        if let Ok(depth) = self.world.query_one_mut::<&mut Depth>(id.0) {
            self.bottom -= 1;
            depth.0 = self.bottom;
        }
    }

    fn reset(&mut self) {
        // Despawn individually so generations keep counting and stale ids stay invalid
        let entities: Vec<Entity> = self
            .world
            .query::<()>()
            .iter()
            .map(|(entity, ())| entity)
            .collect();
        for entity in entities {
            let _ = self.world.despawn(entity);
        }
        self.top = 0;
        self.bottom = 0;
    }

    fn len(&self) -> usize {
        self.world.len() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouth() -> Sprite {
        Sprite::new(SpriteKind::TubeMouth, Vec2::new(120.0, 40.0))
    }

    #[test]
    fn test_create_and_bounding_box() {
        let mut scene = Scene::new();
        let id = scene.create_item(Vec2::new(100.0, 50.0), mouth());
        let rect = scene.bounding_box(id).unwrap();
        assert_eq!(rect.min, Vec2::new(40.0, 30.0));
        assert_eq!(rect.max, Vec2::new(160.0, 70.0));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_move_item() {
        let mut scene = Scene::new();
        let id = scene.create_item(Vec2::new(100.0, 50.0), mouth());
        scene.move_item(id, Vec2::new(-10.0, 2.5));
        let rect = scene.bounding_box(id).unwrap();
        assert_eq!(rect.center(), Vec2::new(90.0, 52.5));
    }

    #[test]
    fn test_deleted_item_is_gone_and_ops_are_ignored() {
        let mut scene = Scene::new();
        let id = scene.create_item(Vec2::ZERO, mouth());
        scene.delete(id);
        assert!(!scene.contains(id));
        assert!(scene.bounding_box(id).is_none());
        assert!(scene.sprite(id).is_none());

        // Benign misses
        scene.delete(id);
        scene.move_item(id, Vec2::new(1.0, 1.0));
        scene.lower(id);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_deleted_id_not_confused_with_new_item() {
        let mut scene = Scene::new();
        let old = scene.create_item(Vec2::ZERO, mouth());
        scene.delete(old);
        let new = scene.create_item(Vec2::new(5.0, 5.0), mouth());
        assert_ne!(old, new);
        assert!(scene.bounding_box(old).is_none());
    }

    #[test]
    fn test_overlapping_in_stacking_order() {
        let mut scene = Scene::new();
        let a = scene.create_item(Vec2::new(0.0, 0.0), mouth());
        let b = scene.create_item(Vec2::new(50.0, 0.0), mouth());
        let far = scene.create_item(Vec2::new(1000.0, 0.0), mouth());

        let area = Rect::new(Vec2::new(-5.0, -5.0), Vec2::new(5.0, 5.0));
        assert_eq!(scene.overlapping(area), vec![a, b]);

        scene.lower(b);
        assert_eq!(scene.overlapping(area), vec![b, a]);
        assert!(!scene.overlapping(area).contains(&far));
    }

    #[test]
    fn test_lower_sends_to_back() {
        let mut scene = Scene::new();
        let a = scene.create_item(Vec2::ZERO, mouth());
        let b = scene.create_item(Vec2::ZERO, mouth());
        let c = scene.create_item(Vec2::ZERO, mouth());
        scene.lower(c);
        scene.lower(b);
        let order: Vec<ItemId> = scene.draw_list().iter().map(|item| item.id).collect();
        assert_eq!(order, vec![b, c, a]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut scene = Scene::new();
        scene.create_item(Vec2::ZERO, mouth());
        scene.create_item(
            Vec2::ZERO,
            Sprite::new(SpriteKind::Backdrop, Vec2::new(10.0, 10.0)),
        );
        assert_eq!(scene.count_kind(SpriteKind::Backdrop), 1);
        scene.reset();
        assert!(scene.is_empty());
        assert_eq!(scene.count_kind(SpriteKind::TubeMouth), 0);
    }

    #[test]
    fn test_stale_id_after_reset_is_invalid() {
        let mut scene = Scene::new();
        let old = scene.create_item(Vec2::new(50.0, 50.0), mouth());
        scene.reset();
        let new = scene.create_item(Vec2::new(50.0, 50.0), mouth());

        assert_ne!(old, new);
        assert!(!scene.contains(old));
        assert!(scene.bounding_box(old).is_none());
        assert!(scene.sprite(old).is_none());

        scene.move_item(old, Vec2::new(100.0, 0.0));
        scene.delete(old);
        assert_eq!(scene.bounding_box(new).unwrap().center(), Vec2::new(50.0, 50.0));
        assert_eq!(scene.len(), 1);
    }
}
