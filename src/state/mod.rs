// Snapshot store and player state model

mod snapshot;
mod store;

pub use snapshot::{
    Armor, AttributeModifier, Enchantment, ItemStack, NearbyEntity, PlayerSnapshot, Position,
    PotionEffect, SnapshotError, Vitals, WorldState,
};
pub use store::{AgentSummary, StateStore};
