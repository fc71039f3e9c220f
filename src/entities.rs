/// All simulation entity types.
///
/// An entity is one record: a grid cell, a liveness flag and a tagged body.
/// Behaviour lives in `behavior`; this module only holds data and the small
/// accessors that read it.

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to an entity in the world's slot map. A handle to a
    /// removed entity never resolves to a later occupant of its slot.
    pub struct EntityId;
}

// ── Field geometry ───────────────────────────────────────────────────────────

/// Number of columns in the space field.
pub const FIELD_WIDTH: i32 = 30;
/// Number of rows in the space field. Row 0 is the bottom.
pub const FIELD_HEIGHT: i32 = 40;
/// Row aliens and stars enter on.
pub const TOP_ROW: i32 = FIELD_HEIGHT - 1;
/// Right-most column.
pub const RIGHT_COLUMN: i32 = FIELD_WIDTH - 1;

/// A grid cell. `y` grows upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_field(self) -> bool {
        (0..FIELD_WIDTH).contains(&self.x) && (0..FIELD_HEIGHT).contains(&self.y)
    }

    /// True in the left-most or right-most column.
    pub fn on_side_wall(self) -> bool {
        self.x == 0 || self.x == RIGHT_COLUMN
    }

    /// Columns between this cell and the nearer side wall.
    pub fn border_distance(self) -> i32 {
        self.x.min(RIGHT_COLUMN - self.x)
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Which side fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Alien,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weapon {
    Bullet,
    Torpedo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projectile {
    pub side: Side,
    pub weapon: Weapon,
    pub power: i32,
}

impl Projectile {
    /// Rows travelled per tick: player shots climb, alien shots fall.
    pub fn step(&self) -> i32 {
        match self.side {
            Side::Player => 1,
            Side::Alien => -1,
        }
    }
}

// ── Pickups ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    /// One extra life.
    FreeShip,
    /// Restores the player ship to full health.
    Energy,
    /// Adds torpedoes to the player's stock.
    Torpedoes,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Ticks before the pickup disappears.
    pub ticks_left: i32,
    /// Lifetime at spawn, used for fading.
    pub total_ticks: i32,
    /// Ticks until the next one-row drift.
    pub move_countdown: i32,
}

impl Pickup {
    pub fn new(kind: PickupKind, lifetime: i32, move_period: i32) -> Self {
        Self {
            kind,
            ticks_left: lifetime,
            total_ticks: lifetime,
            move_countdown: move_period,
        }
    }

    /// Fading brightness in `[0.2, 1.0]`.
    pub fn brightness(&self) -> f32 {
        if self.total_ticks <= 0 {
            return 0.2;
        }
        let share = self.ticks_left.max(0) as f32 / self.total_ticks as f32;
        (share + 0.2).min(1.0)
    }
}

// ── Ships ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlienKind {
    Nachling,
    WealthyNachling,
    Smallbot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn dx(self) -> i32 {
        match self {
            Heading::Left => -1,
            Heading::Right => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatrolState {
    /// Drift down and line up with the player.
    Approach,
    /// Sway sideways under fire-at-will.
    Strafe,
    /// Climb back to the top row.
    Retreat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Patrol {
    pub state: PatrolState,
    /// Half-width of the strafing sway, chosen on entering `Strafe`.
    pub distance: i32,
    /// Steps left before the sway reverses.
    pub remaining: i32,
    pub heading: Heading,
}

impl Default for Patrol {
    fn default() -> Self {
        Self {
            state: PatrolState::Approach,
            distance: 0,
            remaining: 0,
            heading: Heading::Left,
        }
    }
}

/// Kind-specific ship state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Brain {
    /// Driven by the input hook.
    Pilot,
    Nachling(Patrol),
    WealthyNachling { patrol: Patrol, resting_ticks: u32 },
    Smallbot { hit_by_player: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ship {
    /// May go negative before the death check runs.
    pub health: i32,
    pub torpedoes: u32,
    /// Set on the tick a bullet was fired.
    pub bullet_cooldown: bool,
    /// Set on the tick a torpedo was fired.
    pub torpedo_cooldown: bool,
    /// Aliens act every other tick; set after a tick they acted on.
    pub resting: bool,
    pub brain: Brain,
}

impl Ship {
    pub fn player(health: i32) -> Self {
        Self::with_brain(health, Brain::Pilot)
    }

    pub fn alien(kind: AlienKind, health: i32) -> Self {
        let brain = match kind {
            AlienKind::Nachling => Brain::Nachling(Patrol::default()),
            AlienKind::WealthyNachling => Brain::WealthyNachling {
                patrol: Patrol::default(),
                resting_ticks: 0,
            },
            AlienKind::Smallbot => Brain::Smallbot {
                hit_by_player: false,
            },
        };
        Self::with_brain(health, brain)
    }

    fn with_brain(health: i32, brain: Brain) -> Self {
        Self {
            health,
            torpedoes: 0,
            bullet_cooldown: false,
            torpedo_cooldown: false,
            resting: false,
            brain,
        }
    }

    pub fn alien_kind(&self) -> Option<AlienKind> {
        match self.brain {
            Brain::Pilot => None,
            Brain::Nachling(_) => Some(AlienKind::Nachling),
            Brain::WealthyNachling { .. } => Some(AlienKind::WealthyNachling),
            Brain::Smallbot { .. } => Some(AlienKind::Smallbot),
        }
    }

    pub fn patrol_mut(&mut self) -> Option<&mut Patrol> {
        match &mut self.brain {
            Brain::Nachling(patrol) | Brain::WealthyNachling { patrol, .. } => Some(patrol),
            _ => None,
        }
    }

    /// Flips the rest flag. Returns `true` when the ship may act this tick.
    pub fn take_turn(&mut self) -> bool {
        self.resting = !self.resting;
        self.resting
    }
}

// ── Entity record ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Body {
    Star,
    Ship(Ship),
    Projectile(Projectile),
    Pickup(Pickup),
}

/// Kind tag handed to the render hook and used to pick a behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Star,
    PlayerShip,
    Nachling,
    WealthyNachling,
    Smallbot,
    Bullet,
    Torpedo,
    FreeShipGoodie,
    EnergyGoodie,
    TorpedoGoodie,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub cell: Cell,
    pub body: Body,
    alive: bool,
}

impl Entity {
    pub fn new(cell: Cell, body: Body) -> Self {
        Self {
            cell,
            body,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Marks the entity for removal at the end of the tick.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn kind(&self) -> EntityKind {
        match &self.body {
            Body::Star => EntityKind::Star,
            Body::Ship(ship) => match ship.alien_kind() {
                None => EntityKind::PlayerShip,
                Some(AlienKind::Nachling) => EntityKind::Nachling,
                Some(AlienKind::WealthyNachling) => EntityKind::WealthyNachling,
                Some(AlienKind::Smallbot) => EntityKind::Smallbot,
            },
            Body::Projectile(projectile) => match projectile.weapon {
                Weapon::Bullet => EntityKind::Bullet,
                Weapon::Torpedo => EntityKind::Torpedo,
            },
            Body::Pickup(pickup) => match pickup.kind {
                PickupKind::FreeShip => EntityKind::FreeShipGoodie,
                PickupKind::Energy => EntityKind::EnergyGoodie,
                PickupKind::Torpedoes => EntityKind::TorpedoGoodie,
            },
        }
    }

    pub fn ship(&self) -> Option<&Ship> {
        match &self.body {
            Body::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.body {
            Body::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn alien_kind(&self) -> Option<AlienKind> {
        self.ship().and_then(Ship::alien_kind)
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        match &self.body {
            Body::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }

    pub fn pickup(&self) -> Option<&Pickup> {
        match &self.body {
            Body::Pickup(pickup) => Some(pickup),
            _ => None,
        }
    }

    pub fn pickup_mut(&mut self) -> Option<&mut Pickup> {
        match &mut self.body {
            Body::Pickup(pickup) => Some(pickup),
            _ => None,
        }
    }

    /// Render brightness: pickups fade, everything else is fully lit.
    pub fn brightness(&self) -> f32 {
        self.pickup().map_or(1.0, Pickup::brightness)
    }
}
