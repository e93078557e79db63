//! Simulation constants and tuning parameters.

// --- World layout ---

/// Edge length of one map tile in world pixels.
pub const TILE_PIXELS: i32 = 64;

/// Half-extent of a hostile unit's bounding box in world pixels.
pub const HOSTILE_HALF_EXTENT: i32 = TILE_PIXELS / 2;

// --- Entity storage ---

/// Preallocated arena capacity for hostiles and projectiles.
/// A busy late wave stays well under this; growth beyond it is allowed
/// but should never happen per frame.
pub const ARENA_PREALLOC: usize = 2000;

// --- Broad-phase index ---

/// Hash table size of the spatial grid.
/// Rule of thumb: roughly twice the maximum number of element-cell
/// memberships expected in one tick.
pub const INDEX_TABLE_SIZE: usize = 100_000;

/// Maximum element-cell memberships the grid can hold per rebuild.
/// Exceeding this is a fatal configuration error.
pub const INDEX_MAX_ELEMENTS: usize = 50_000;

/// Grid cell edge length in world pixels. One tile per cell.
pub const INDEX_CELL_SIZE: i32 = TILE_PIXELS;

// --- Match state ---

/// Base hit points at match start.
pub const STARTING_BASE_HEALTH: i32 = 100;

/// Currency available at match start.
pub const STARTING_CURRENCY: i64 = 250;

/// Hit points the base loses per hostile that reaches the path end.
pub const LEAK_DAMAGE: i32 = 1;

// --- Waves ---

/// Wave budget at match start.
pub const STARTING_WAVE_BUDGET: i64 = 100;

/// Seconds between consecutive hostile releases from the spawn queue.
pub const SPAWN_INTERVAL_SECS: f64 = 0.5;

// --- Defenders ---

/// Each speed upgrade multiplies the fire cadence by this factor.
pub const CADENCE_UPGRADE_FACTOR: f64 = 0.9;

/// Cap on speed upgrades per defender.
pub const MAX_SPEED_UPGRADES: u32 = 5;

/// Cap on damage upgrades per defender.
pub const MAX_DAMAGE_UPGRADES: u32 = 5;

/// Cap on combined upgrades per defender.
pub const MAX_TOTAL_UPGRADES: u32 = 7;

/// Currency cost of one upgrade, either kind.
pub const UPGRADE_COST: i64 = 50;

/// Number of bolts in a Scatter defender's radial volley.
pub const SCATTER_VOLLEY: u32 = 8;

/// Most hostiles a Frost or Mint defender can affect per activation.
pub const MAX_AFFECTED_HOSTILES: usize = 8;

/// Base speed multiplier applied by a Frost defender.
pub const FROST_BASE_SLOW: f32 = 0.5;

/// Additional slow per Frost upgrade (either kind).
pub const FROST_SLOW_PER_UPGRADE: f32 = 0.05;

/// Duration of the Frost slow effect in seconds.
pub const FROST_SLOW_SECS: f64 = 2.0;

/// Base currency minted per hostile in range of a Mint defender.
pub const MINT_BASE_YIELD: i64 = 1;

// --- Projectiles ---

/// Travel speed of a bolt in pixels per second.
pub const BOLT_SPEED: f32 = 800.0;

/// Collision radius of a bolt in pixels.
pub const BOLT_HIT_RADIUS: f32 = 12.0;

/// Bolt lifetime when fired by a Cannon.
pub const CANNON_BOLT_LIFETIME: f32 = 1.0;

/// Bolt lifetime when fired by a Gatling.
pub const GATLING_BOLT_LIFETIME: f32 = 0.3;

/// Bolt lifetime in a Scatter volley; short, so the ring stays local.
pub const SCATTER_BOLT_LIFETIME: f32 = 0.13;

/// Travel speed of a shell in pixels per second.
pub const SHELL_SPEED: f32 = 550.0;

/// Collision radius of a shell before detonation.
pub const SHELL_HIT_RADIUS: f32 = 12.0;

/// Shell lifetime before it despawns unhit.
pub const SHELL_LIFETIME: f32 = 0.45;

/// Radius of a shell's detonation in pixels.
pub const SHELL_EXPLOSION_RADIUS: f32 = 50.0;

/// Seconds an area-detonation shell lingers after exploding before removal.
pub const SHELL_LINGER_SECS: f32 = 0.3;
