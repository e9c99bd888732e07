#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Default)]
struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Closed set of dynamic actors besides the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Short-lived bullet that dematerializes the first tile it touches.
    DematBullet { direction: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    id: EntityId,
    position: Vec2,
    sprite: SpriteId,
    age_seconds: f32,
    destroyed: bool,
    kind: EntityKind,
}

impl Entity {
    fn demat_bullet(id: EntityId, position: Vec2, direction: Vec2, sprite: SpriteId) -> Self {
        Self {
            id,
            position,
            sprite,
            age_seconds: 0.0,
            destroyed: false,
            kind: EntityKind::DematBullet {
                direction: direction.normalized_or_zero(),
            },
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn age_seconds(&self) -> f32 {
        self.age_seconds
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Marks the entity for removal; the world sweeps it out after the
    /// current update pass. A destroyed entity never updates or renders
    /// again.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Collision footprint, if the variant participates in rectangle
    /// collision. The bullet point-samples the grid instead and opts out.
    pub fn bounds(&self) -> Option<Rect> {
        match self.kind {
            EntityKind::DematBullet { .. } => None,
        }
    }

    fn update(&mut self, dt_seconds: f32, grid: &mut TileGrid) {
        if self.destroyed {
            return;
        }
        self.age_seconds += dt_seconds;
        match self.kind {
            EntityKind::DematBullet { direction } => {
                self.update_demat_bullet(dt_seconds, direction, grid);
            }
        }
    }

    fn update_demat_bullet(&mut self, dt_seconds: f32, direction: Vec2, grid: &mut TileGrid) {
        let step = direction.scaled(BULLET_SPEED * dt_seconds);
        self.position = self.position.offset(step.x, step.y);

        // Any occupied cell stops the bullet; the break itself is still a
        // no-op for unbreakable tiles.
        if let Some(handle) = grid.tile_handle_at(self.position.x, self.position.y) {
            grid.break_tile(handle);
            self.destroy();
        }

        if self.age_seconds > BULLET_MAX_AGE_SECONDS {
            self.destroy();
        }
    }

    fn render(&self, surface: &mut Surface<'_>) {
        if self.destroyed {
            return;
        }
        surface.draw_sprite(self.sprite, self.position);
    }
}
