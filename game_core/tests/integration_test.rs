use game_core::*;
use glam::Vec2;

/// Scene wrapper that counts how often the game touches it
#[derive(Default)]
struct CountingSurface {
    inner: Scene,
    moves: usize,
    lowers: usize,
}

impl Surface for CountingSurface {
    fn create_item(&mut self, pos: Vec2, sprite: Sprite) -> ItemId {
        self.inner.create_item(pos, sprite)
    }

    fn move_item(&mut self, id: ItemId, delta: Vec2) {
        self.moves += 1;
        self.inner.move_item(id, delta);
    }

    fn bounding_box(&self, id: ItemId) -> Option<Rect> {
        self.inner.bounding_box(id)
    }

    fn sprite(&self, id: ItemId) -> Option<Sprite> {
        self.inner.sprite(id)
    }

    fn delete(&mut self, id: ItemId) {
        self.inner.delete(id);
    }

    fn overlapping(&self, rect: Rect) -> Vec<ItemId> {
        self.inner.overlapping(rect)
    }

    fn lower(&mut self, id: ItemId) {
        self.lowers += 1;
        self.inner.lower(id);
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

fn hovering_config() -> Config {
    let mut config = Config::for_playfield(1200, 800).unwrap();
    config.fall_acceleration = 0.0;
    config
}

#[test]
fn test_round_lifecycle() {
    let mut game = headless_game(1200, 800, 99).unwrap().with_best(5);
    assert!(game.start());

    let mut summary = None;
    let mut t = 0;
    while summary.is_none() && t < 5000 {
        t += 16;
        summary = game.advance_to(t).round_over;
    }

    let summary = summary.expect("unattended bird must die");
    assert_eq!(summary.score, 0);
    assert_eq!(summary.best, 5);
    assert!(!game.is_active());

    // Death is terminal: jumps do nothing and nothing moves
    assert_eq!(game.jump(), Jump::Ignored);
    let before: Vec<Rect> = game.scene().draw_list().iter().map(|item| item.rect).collect();
    game.advance_to(t + 5000);
    let after: Vec<Rect> = game.scene().draw_list().iter().map(|item| item.rect).collect();
    assert_eq!(before, after);

    // A restart leaves nothing from the previous round behind
    assert!(game.start());
    assert_eq!(game.scene().count_kind(SpriteKind::TubeMouth), 0);
    assert_eq!(game.scene().count_kind(SpriteKind::TubeBody), 0);
    assert_eq!(game.scene().count_kind(SpriteKind::Bird), 1);
    assert_eq!(game.score(), ScoreBoard::with_best(5));
}

#[test]
fn test_background_stays_at_back() {
    let mut game = Game::headless(hovering_config(), 3);
    game.start();
    // First pair appears on the 55th tube tick
    game.advance_to(55 * 60);
    assert_eq!(game.tubes().unwrap().len(), 1);

    let kinds: Vec<SpriteKind> = game
        .scene()
        .draw_list()
        .iter()
        .map(|item| item.sprite.kind)
        .collect();
    assert_eq!(
        kinds[..4],
        [
            SpriteKind::Backdrop,
            SpriteKind::Backdrop,
            SpriteKind::Backdrop,
            SpriteKind::Bird,
        ]
    );
    assert!(kinds[4..]
        .iter()
        .all(|kind| matches!(kind, SpriteKind::TubeMouth | SpriteKind::TubeBody)));
}

#[test]
fn test_only_the_passed_pair_scores() {
    let config = Config::for_playfield(1200, 800).unwrap();
    let mut scene = Scene::new();
    let bird = Bird::spawn(&mut scene, &config);
    let mut tubes = Tubes::new(&config, bird.profile());
    let mut rng = GameRng::new(1);

    let first = tubes.create_pair_at(&mut scene, 300);
    let mut scored = 0;
    for _ in 0..100 {
        scored += tubes.tick(&mut scene, &mut rng).scored;
    }

    let ids: Vec<PairId> = tubes.pairs().map(|pair| pair.id).collect();
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0], first);
    assert!(tubes.is_scored(first));
    assert!(!tubes.is_scored(ids[1]));
    assert_eq!(scored, 1);
}

#[test]
fn test_game_drives_any_surface() {
    let config = Config::for_playfield(1200, 800).unwrap();
    let mut game = Game::new(config, CountingSurface::default(), 11);
    game.start();
    game.advance_to(300);

    // Six scroll ticks (0ms through 300ms) lower three backdrop items each
    assert_eq!(game.scene().lowers, 18);
    assert!(game.scene().moves > 0);
    assert!(game.is_active());
}

#[test]
fn test_jumping_keeps_the_bird_up() {
    let mut game = Game::headless(Config::for_playfield(1200, 800).unwrap(), 5);
    game.start();

    // Hop whenever the bird sinks below its spawn height, until tubes arrive
    let spawn_y = game.config().bird_spawn().y;
    let mut jumps = 0;
    for t in (0..3000).step_by(4) {
        game.advance_to(t);
        let bird = game.bird().unwrap();
        let y = game.scene().bounding_box(bird.item()).unwrap().center().y;
        if y > spawn_y && game.jump() == Jump::Started {
            jumps += 1;
        }
    }

    assert!(game.is_active());
    assert!(game.bird().unwrap().is_alive());
    assert!(jumps > 1);
}
