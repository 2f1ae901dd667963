use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;


/// PlayerSnapshot is the last-known-complete description of one agent's
/// world-observable state.
///
/// Snapshots are published wholesale: every publish replaces the previous
/// snapshot for the same name entirely, fields are never merged across
/// publishes. Optional sub-structures the reporting plugin does not track
/// stay absent (None), which is distinct from reported-but-empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Agent identity; the store key
    /// Must be non-empty
    pub name: String,

    /// World position, always present and complete
    pub coords: Position,

    /// Main inventory stacks; empty when the agent carries nothing
    #[serde(default)]
    pub inventory: Vec<ItemStack>,

    /// Worn armor; absent when the plugin does not report armor at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<Armor>,

    /// Offhand stack; absent when the hand is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offhand: Option<ItemStack>,

    /// Ender chest contents
    #[serde(default)]
    pub ender_chest: Vec<ItemStack>,

    /// Vitals and mode flags; absent when not reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vitals>,

    /// Conditions of the world the agent is in; absent when not reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world: Option<WorldState>,

    /// Entities within the plugin's scan radius
    #[serde(default)]
    pub nearby_entities: Vec<NearbyEntity>,

    /// What the agent is currently doing (e.g., "mining"); "idle" when omitted
    #[serde(default = "default_current_action")]
    pub current_action: String,

    /// Stack in the main hand; absent when the hand is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub held_item: Option<ItemStack>,
}

fn default_current_action() -> String {
    "idle".to_string()
}

impl PlayerSnapshot {
    /// Validates a snapshot after deserialization.
    ///
    /// Structural requirements (coords present and complete, field types)
    /// are enforced by serde; this checks the one thing the type system
    /// cannot: the store key must be usable.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.name.is_empty() {
            return Err(SnapshotError::MissingName);
        }
        Ok(())
    }
}

/// Validation errors for PlayerSnapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    MissingName,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::MissingName => {
                write!(f, "name is required and must be non-empty")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// World position of a player or entity.
///
/// The four fields are only meaningful together; a snapshot missing any of
/// them fails deserialization rather than defaulting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Dimension name, e.g. "world", "world_nether"
    pub world: String,
}

/// The four fixed armor slots.
///
/// Each slot is independently optional; an empty slot is reported as absent,
/// not as a zero-value item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helmet: Option<ItemStack>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chestplate: Option<ItemStack>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub leggings: Option<ItemStack>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boots: Option<ItemStack>,
}

/// One inventory stack as the plugin reports it.
///
/// Defaulted fields collapse absence into the documented default; for those
/// fields "not reported" and "reported as the default" are indistinguishable
/// by design. Numeric values are stored verbatim, never range-checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStack {
    /// Material id, e.g. "diamond_sword"
    pub material: String,

    /// Stack size
    pub amount: i32,

    /// Custom display name; "" when the item has none
    #[serde(default)]
    pub display_name: String,

    /// Durability used so far; 0 for undamaged or non-damageable items
    #[serde(default)]
    pub damage: i32,

    /// Maximum durability; 0 for non-damageable items
    #[serde(default)]
    pub max_durability: i32,

    /// Remaining durability percentage as reported by the plugin.
    /// A display hint only; see durability_left() for the derived value
    #[serde(default = "default_durability_percentage")]
    pub durability_percentage: f64,

    #[serde(default)]
    pub enchantments: Vec<Enchantment>,

    /// Free-text lore lines
    #[serde(default)]
    pub lore: Vec<String>,

    /// Resource-pack model tag; absent when the item uses the default model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_model_data: Option<i32>,

    #[serde(default)]
    pub attribute_modifiers: Vec<AttributeModifier>,

    /// Engine item flags, e.g. "HIDE_ENCHANTS"
    #[serde(default)]
    pub item_flags: Vec<String>,

    /// Open-ended engine metadata, stored verbatim: strings, numbers, bools,
    /// or arbitrarily nested structures
    #[serde(default)]
    pub nbt_tags: HashMap<String, Value>,
}

fn default_durability_percentage() -> f64 {
    100.0
}

impl ItemStack {
    /// Fraction of durability remaining, derived from damage and
    /// max_durability. None for non-damageable items.
    ///
    /// The reported durability_percentage is not consulted; it is a hint
    /// from the plugin, not a source of truth.
    pub fn durability_left(&self) -> Option<f64> {
        if self.max_durability <= 0 {
            return None;
        }
        Some(f64::from(self.max_durability - self.damage) / f64::from(self.max_durability))
    }
}

/// A single enchantment on an item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enchantment {
    /// Enchantment id (open vocabulary; plugins add their own)
    #[serde(rename = "type")]
    pub kind: String,

    pub level: i32,
}

/// An attribute modifier attached to an item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    /// Attribute id, e.g. "minecraft:generic.attack_damage"
    pub attribute: String,

    pub name: String,

    pub amount: f64,

    /// Operation kind (open vocabulary, e.g. "ADD_NUMBER")
    pub operation: String,

    /// Equip slot the modifier is scoped to; absent when it applies anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

/// Health, hunger, experience, mode flags and active effects.
///
/// Everything here is required except absorption: a plugin that reports
/// vitals at all reports them completely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub health: f64,
    pub max_health: f64,

    /// Absorption hearts on top of health
    #[serde(default)]
    pub absorption: f64,

    pub food_level: i32,
    pub saturation: f64,
    pub exhaustion: f64,
    pub level: i32,
    pub exp: f64,
    pub total_exp: i32,

    /// Open vocabulary; the relay does not restrict game modes
    pub game_mode: String,

    pub is_op: bool,
    pub is_flying: bool,
    pub allow_flight: bool,
    pub is_sneaking: bool,
    pub is_sprinting: bool,
    pub is_swimming: bool,
    pub is_gliding: bool,
    pub is_blocking: bool,

    pub effects: Vec<PotionEffect>,
}

/// An active potion effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotionEffect {
    /// Effect id (open vocabulary)
    #[serde(rename = "type")]
    pub kind: String,

    pub amplifier: i32,

    /// Remaining duration in ticks
    pub duration: i32,

    pub duration_seconds: f64,
    pub is_ambient: bool,
    pub has_particles: bool,
    pub has_icon: bool,

    /// What applied the effect; "unknown" when the plugin cannot tell
    #[serde(default = "default_effect_source")]
    pub source: String,
}

fn default_effect_source() -> String {
    "unknown".to_string()
}

/// Conditions of the world an agent is in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldState {
    pub name: String,
    pub weather: String,
    pub is_raining: bool,
    pub is_thundering: bool,
    pub temperature: f64,
    pub humidity: f64,

    /// World age in ticks
    pub time: i64,

    /// Coarse phase label, e.g. "day", "night"
    pub time_of_day: String,
}

/// An entity within an agent's scan radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearbyEntity {
    pub name: String,

    /// Entity type id (open vocabulary)
    #[serde(rename = "type")]
    pub kind: String,

    /// Distance from the reporting agent in blocks
    pub distance: f64,

    pub location: Position,
}
