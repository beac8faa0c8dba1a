//! Well-known context keys shared by the built-in subsystems.

use super::ContextKey;

/// The entity that owns the acting object (e.g. who placed a block).
pub const OWNER: ContextKey = ContextKey::from_static("causestack:owner");

/// The entity that last notified the acting object.
pub const NOTIFIER: ContextKey = ContextKey::from_static("causestack:notifier");

/// A player being simulated by a non-player action.
pub const PLAYER_SIMULATED: ContextKey = ContextKey::from_static("causestack:player_simulated");

/// How a spawned entity came into existence.
pub const SPAWN_TYPE: ContextKey = ContextKey::from_static("causestack:spawn_type");

/// The block that was hit by the acting object.
pub const BLOCK_HIT: ContextKey = ContextKey::from_static("causestack:block_hit");

/// The item used to perform the action.
pub const USED_ITEM: ContextKey = ContextKey::from_static("causestack:used_item");

/// The source that launched a projectile.
pub const PROJECTILE_SOURCE: ContextKey = ContextKey::from_static("causestack:projectile_source");

/// The plugin performing the action on someone's behalf.
pub const PLUGIN: ContextKey = ContextKey::from_static("causestack:plugin");
