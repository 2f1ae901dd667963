// Convenience endpoints: canned command builders for the controller
//
// Everything here is a thin producer of dispatch queue submissions; no state
// of its own. Argument vectors mirror the plugin's slash command grammar.
// Only inventory edits are addressed to the claiming agent; every other
// canned command rides untargeted with the player as an argument, because
// that is how the plugin's verbs take their subject.

use crate::api::{AppError, AppState};
use crate::command::Command;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Inventory edit request
#[derive(Deserialize)]
struct InventoryChange {
    player: String,
    /// "add" or "remove"
    action: String,
    item: String,
}

/// Acknowledgement echoing the queued command
#[derive(Serialize)]
struct QueuedResponse {
    status: &'static str,
    command: Command,
}

/// Acknowledgement for a canned action
#[derive(Serialize, Default)]
struct ActionResponse {
    status: &'static str,
    player: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    flame: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    damage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items_given: Option<usize>,
}

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/coords/inventory", post(change_inventory))
        .route("/api/sabotage/:player", post(sabotage))
        .route("/api/unsabotage/:player", post(unsabotage))
        .route("/api/regear/:player", post(regear))
        .route("/api/flame/set/:player/:flame_type", post(set_flame))
        .route("/api/flame/upgrade/:player", post(upgrade_flame))
        .route("/api/flame/downgrade/:player", post(downgrade_flame))
        .route("/api/flame/give/:player/:item_type", post(give_flame_item))
        .route(
            "/api/flame/setabilitydamage/:player/:flame_type/:damage",
            post(set_ability_damage),
        )
        .route(
            "/api/flame/setabilityduration/:player/:flame_type/:duration",
            post(set_ability_duration),
        )
}

/// POST /api/coords/inventory - Request an item add or remove on an agent
async fn change_inventory(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<QueuedResponse>, AppError> {
    // Check body size before deserializing
    if body.len() > state.config.limits.max_command_bytes {
        return Err(AppError::PayloadTooLarge);
    }

    // Deserialize from checked bytes
    let change: InventoryChange = serde_json::from_slice(&body)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let InventoryChange {
        player,
        action,
        item,
    } = change;

    if action != "add" && action != "remove" {
        return Err(AppError::ValidationError(format!(
            "invalid action '{}', expected 'add' or 'remove'",
            action
        )));
    }

    let cmd = Command::targeted(&player, "inventory_edit", vec![action, item]);
    state.queue.enqueue(cmd.clone())?;

    info!(player = %player, "Inventory edit queued");

    Ok(Json(QueuedResponse {
        status: "queued",
        command: cmd,
    }))
}

/// POST /api/sabotage/:player - Drop an agent's attack damage to a fraction
async fn sabotage(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    state.queue.enqueue(attack_damage_command(&player, "0.5"))?;

    info!(player = %player, "Sabotage queued");

    Ok(Json(ActionResponse {
        status: "sabotaged",
        player,
        ..Default::default()
    }))
}

/// POST /api/unsabotage/:player - Restore normal attack damage
async fn unsabotage(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    state.queue.enqueue(attack_damage_command(&player, "1.0"))?;

    info!(player = %player, "Sabotage lifted");

    Ok(Json(ActionResponse {
        status: "unsabotaged",
        player,
        ..Default::default()
    }))
}

/// Attribute command setting the plugin's attack damage base value.
fn attack_damage_command(player: &str, value: &str) -> Command {
    Command::new(
        "attribute",
        vec![
            player.to_string(),
            "minecraft:generic.attack_damage".to_string(),
            "base".to_string(),
            "set".to_string(),
            value.to_string(),
        ],
    )
}

/// Full replacement kit in give order: enchanted diamond armor, ranged and
/// melee weapons, tools, and consumables. Item specs carry their enchantment
/// NBT inline, exactly as the plugin's give verb expects them.
const REGEAR_KIT: &[(&str, &str)] = &[
    (
        "diamond_helmet{Enchantments:[{id:\"minecraft:protection\",lvl:3},{id:\"minecraft:unbreaking\",lvl:3},{id:\"minecraft:respiration\",lvl:3},{id:\"minecraft:aqua_affinity\",lvl:1}]}",
        "1",
    ),
    (
        "diamond_chestplate{Enchantments:[{id:\"minecraft:protection\",lvl:3},{id:\"minecraft:unbreaking\",lvl:3}]}",
        "1",
    ),
    (
        "diamond_leggings{Enchantments:[{id:\"minecraft:protection\",lvl:3},{id:\"minecraft:unbreaking\",lvl:3}]}",
        "1",
    ),
    (
        "diamond_boots{Enchantments:[{id:\"minecraft:protection\",lvl:3},{id:\"minecraft:unbreaking\",lvl:3},{id:\"minecraft:feather_falling\",lvl:4},{id:\"minecraft:depth_strider\",lvl:3}]}",
        "1",
    ),
    (
        "bow{Enchantments:[{id:\"minecraft:power\",lvl:5},{id:\"minecraft:punch\",lvl:2},{id:\"minecraft:flame\",lvl:1},{id:\"minecraft:infinity\",lvl:1},{id:\"minecraft:unbreaking\",lvl:3}]}",
        "1",
    ),
    (
        "crossbow{Enchantments:[{id:\"minecraft:quick_charge\",lvl:3},{id:\"minecraft:multishot\",lvl:1},{id:\"minecraft:piercing\",lvl:4},{id:\"minecraft:unbreaking\",lvl:3}]}",
        "1",
    ),
    (
        "diamond_pickaxe{Enchantments:[{id:\"minecraft:efficiency\",lvl:5},{id:\"minecraft:unbreaking\",lvl:3},{id:\"minecraft:fortune\",lvl:3}]}",
        "1",
    ),
    (
        "diamond_axe{Enchantments:[{id:\"minecraft:efficiency\",lvl:5},{id:\"minecraft:unbreaking\",lvl:3},{id:\"minecraft:fortune\",lvl:3}]}",
        "1",
    ),
    (
        "diamond_shovel{Enchantments:[{id:\"minecraft:efficiency\",lvl:5},{id:\"minecraft:unbreaking\",lvl:3},{id:\"minecraft:fortune\",lvl:3}]}",
        "1",
    ),
    (
        "diamond_hoe{Enchantments:[{id:\"minecraft:efficiency\",lvl:5},{id:\"minecraft:unbreaking\",lvl:3},{id:\"minecraft:fortune\",lvl:3}]}",
        "1",
    ),
    (
        "trident{Enchantments:[{id:\"minecraft:riptide\",lvl:3},{id:\"minecraft:mending\",lvl:1},{id:\"minecraft:unbreaking\",lvl:3}]}",
        "1",
    ),
    ("enchanted_golden_apple", "4"),
    ("wind_charge", "64"),
    ("wind_charge", "64"),
    ("arrow", "64"),
];

/// POST /api/regear/:player - Queue the full replacement kit, all or nothing
///
/// The kit is submitted as one batch, so either every give lands in order
/// with nothing interleaved, or (queue at capacity) none of them do. A
/// partially geared player is worse than an ungeared one.
async fn regear(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    let kit: Vec<Command> = REGEAR_KIT
        .iter()
        .map(|(item, amount)| {
            Command::new(
                "give",
                vec![player.clone(), item.to_string(), amount.to_string()],
            )
        })
        .collect();
    let items_given = kit.len();

    state.queue.enqueue_many(kit)?;

    info!(player = %player, items = items_given, "Regear kit queued");

    Ok(Json(ActionResponse {
        status: "regeared",
        player,
        items_given: Some(items_given),
        ..Default::default()
    }))
}

/// POST /api/flame/set/:player/:flame_type - Assign a flame type
///
/// The flame type is uppercased for the plugin but echoed back as received.
async fn set_flame(
    State(state): State<Arc<AppState>>,
    Path((player, flame_type)): Path<(String, String)>,
) -> Result<Json<ActionResponse>, AppError> {
    let args = vec![
        "set".to_string(),
        player.clone(),
        flame_type.to_uppercase(),
    ];
    state.queue.enqueue(Command::new("flame", args))?;

    info!(player = %player, flame = %flame_type, "Flame set queued");

    Ok(Json(ActionResponse {
        status: "flame_set",
        player,
        flame: Some(flame_type),
        ..Default::default()
    }))
}

/// POST /api/flame/upgrade/:player - Raise the agent's flame tier
async fn upgrade_flame(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    let args = vec!["upgrade".to_string(), player.clone()];
    state.queue.enqueue(Command::new("flame", args))?;

    info!(player = %player, "Flame upgrade queued");

    Ok(Json(ActionResponse {
        status: "flame_upgraded",
        player,
        ..Default::default()
    }))
}

/// POST /api/flame/downgrade/:player - Lower the agent's flame tier
///
/// The plugin's verb for this is "unupgrade", not "downgrade".
async fn downgrade_flame(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    let args = vec!["unupgrade".to_string(), player.clone()];
    state.queue.enqueue(Command::new("flame", args))?;

    info!(player = %player, "Flame downgrade queued");

    Ok(Json(ActionResponse {
        status: "flame_downgraded",
        player,
        ..Default::default()
    }))
}

/// POST /api/flame/give/:player/:item_type - Grant a flame item
///
/// The item type is lowercased for the plugin but echoed back as received.
async fn give_flame_item(
    State(state): State<Arc<AppState>>,
    Path((player, item_type)): Path<(String, String)>,
) -> Result<Json<ActionResponse>, AppError> {
    let args = vec![
        "give".to_string(),
        player.clone(),
        item_type.to_lowercase(),
    ];
    state.queue.enqueue(Command::new("flame", args))?;

    info!(player = %player, item = %item_type, "Flame item queued");

    Ok(Json(ActionResponse {
        status: "item_given",
        player,
        item: Some(item_type),
        ..Default::default()
    }))
}

/// POST /api/flame/setabilitydamage/:player/:flame_type/:damage
///
/// Damage arrives as a path integer and is stringified into the argument
/// vector like every other argument.
async fn set_ability_damage(
    State(state): State<Arc<AppState>>,
    Path((player, flame_type, damage)): Path<(String, String, i64)>,
) -> Result<Json<ActionResponse>, AppError> {
    let args = vec![
        player.clone(),
        flame_type.to_uppercase(),
        damage.to_string(),
    ];
    state.queue.enqueue(Command::new("setabilitydamage", args))?;

    info!(player = %player, flame = %flame_type, damage = damage, "Ability damage queued");

    Ok(Json(ActionResponse {
        status: "ability_damage_set",
        player,
        flame: Some(flame_type),
        damage: Some(damage),
        ..Default::default()
    }))
}

/// POST /api/flame/setabilityduration/:player/:flame_type/:duration
async fn set_ability_duration(
    State(state): State<Arc<AppState>>,
    Path((player, flame_type, duration)): Path<(String, String, i64)>,
) -> Result<Json<ActionResponse>, AppError> {
    let args = vec![
        player.clone(),
        flame_type.to_uppercase(),
        duration.to_string(),
    ];
    state.queue.enqueue(Command::new("setabilityduration", args))?;

    info!(player = %player, flame = %flame_type, duration = duration, "Ability duration queued");

    Ok(Json(ActionResponse {
        status: "ability_duration_set",
        player,
        flame: Some(flame_type),
        duration: Some(duration),
        ..Default::default()
    }))
}
