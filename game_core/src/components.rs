use glam::Vec2;

/// What a scene item depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Backdrop, // Scrolling or fixed background tile
    Bird,
    TubeMouth,
    TubeBody,
}

/// Visual of a scene item: its kind and on-screen size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub size: Vec2,
}

impl Sprite {
    pub fn new(kind: SpriteKind, size: Vec2) -> Self {
        Self { kind, size }
    }

    pub fn is_backdrop(&self) -> bool {
        self.kind == SpriteKind::Backdrop
    }
}

/// Centre of a scene item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Stacking order; higher draws on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Depth(pub i64);
