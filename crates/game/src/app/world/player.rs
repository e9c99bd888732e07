#[derive(Debug, Clone, Copy)]
pub struct Player {
    position: Vec2,
    sprite: SpriteId,
}

impl Player {
    fn new(sprite: SpriteId) -> Self {
        Self {
            position: Vec2::ZERO,
            sprite,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    pub fn bounds(&self) -> Rect {
        Self::bounds_at(self.position)
    }

    fn bounds_at(position: Vec2) -> Rect {
        Rect::new(position.x, position.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Applies movement input one axis at a time so a blocked axis still
    /// lets the other slide along the wall.
    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot, grid: &TileGrid) {
        let delta = movement_delta(input, dt_seconds, PLAYER_MOVE_SPEED);

        if delta.x != 0.0 {
            let candidate = self.position.offset(delta.x, 0.0);
            if !grid.touches_collidable_tile(&Self::bounds_at(candidate)) {
                self.position = candidate;
            }
        }
        if delta.y != 0.0 {
            let candidate = self.position.offset(0.0, delta.y);
            if !grid.touches_collidable_tile(&Self::bounds_at(candidate)) {
                self.position = candidate;
            }
        }
    }

    fn render(&self, surface: &mut Surface<'_>) {
        surface.draw_sprite(self.sprite, self.position);
    }
}

fn movement_delta(input: &InputSnapshot, dt_seconds: f32, speed: f32) -> Vec2 {
    let mut x = 0.0f32;
    let mut y = 0.0f32;

    if input.is_down(InputAction::MoveRight) {
        x += 1.0;
    }
    if input.is_down(InputAction::MoveLeft) {
        x -= 1.0;
    }
    if input.is_down(InputAction::MoveUp) {
        y += 1.0;
    }
    if input.is_down(InputAction::MoveDown) {
        y -= 1.0;
    }

    let len_sq = x * x + y * y;
    if len_sq > 0.0 {
        let inv_len = len_sq.sqrt().recip();
        x *= inv_len;
        y *= inv_len;
    }

    Vec2 {
        x: x * speed * dt_seconds,
        y: y * speed * dt_seconds,
    }
}
