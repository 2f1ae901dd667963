use super::*;

#[test]
fn test_valid_command_passes_validation() {
    let cmd = Command {
        target: Some("Alice".to_string()),
        name: "give".to_string(),
        args: vec!["diamond_sword".to_string(), "1".to_string()],
    };

    assert!(cmd.validate().is_ok());
}

#[test]
fn test_untargeted_command_passes_validation() {
    let cmd = Command::new("attribute", vec!["Alice".to_string()]);

    assert!(cmd.validate().is_ok());
    assert_eq!(cmd.target, None);
}

#[test]
fn test_empty_args_is_valid() {
    let cmd = Command::new("ping", vec![]);

    assert!(cmd.validate().is_ok());
}

#[test]
fn test_empty_name_fails() {
    let cmd = Command::new("", vec!["x".to_string()]);

    let result = cmd.validate();
    assert!(result.is_err());
    assert_eq!(result.unwrap_err(), ValidationError::MissingName);
}

#[test]
fn test_empty_target_fails() {
    let cmd = Command::targeted("", "give", vec![]);

    let result = cmd.validate();
    assert!(result.is_err());
    assert_eq!(result.unwrap_err(), ValidationError::EmptyTarget);
}

#[test]
fn test_constructors() {
    let broadcast = Command::new("regear", vec!["Alice".to_string()]);
    assert_eq!(broadcast.target, None);
    assert_eq!(broadcast.name, "regear");

    let targeted = Command::targeted("Bob", "inventory_edit", vec!["add".to_string()]);
    assert_eq!(targeted.target.as_deref(), Some("Bob"));
    assert_eq!(targeted.name, "inventory_edit");
}

#[test]
fn test_wire_names() {
    let json_str = r#"{"player":"Alice","command":"give","args":["diamond_sword","1"]}"#;
    let cmd: Command = serde_json::from_str(json_str).unwrap();

    assert_eq!(cmd.target.as_deref(), Some("Alice"));
    assert_eq!(cmd.name, "give");
    assert_eq!(cmd.args, vec!["diamond_sword", "1"]);

    let serialized = serde_json::to_string(&cmd).unwrap();
    assert!(serialized.contains("\"player\""));
    assert!(serialized.contains("\"command\""));
    assert!(!serialized.contains("\"target\""));
    assert!(!serialized.contains("\"name\""));
}

#[test]
fn test_missing_player_deserializes_to_none() {
    let cmd: Command = serde_json::from_str(r#"{"command":"say","args":["hello"]}"#).unwrap();

    assert_eq!(cmd.target, None);
}

#[test]
fn test_null_player_deserializes_to_none() {
    let cmd: Command =
        serde_json::from_str(r#"{"player":null,"command":"say","args":[]}"#).unwrap();

    assert_eq!(cmd.target, None);
}

#[test]
fn test_absent_target_not_serialized() {
    let cmd = Command::new("say", vec!["hello".to_string()]);

    let serialized = serde_json::to_string(&cmd).unwrap();
    assert!(!serialized.contains("\"player\""));
}

#[test]
fn test_missing_command_field_rejected() {
    let result: Result<Command, _> = serde_json::from_str(r#"{"player":"Alice","args":[]}"#);

    assert!(result.is_err());
}

#[test]
fn test_missing_args_rejected() {
    let result: Result<Command, _> =
        serde_json::from_str(r#"{"player":"Alice","command":"give"}"#);

    assert!(result.is_err());
}

#[test]
fn test_non_string_args_rejected() {
    let result: Result<Command, _> =
        serde_json::from_str(r#"{"command":"give","args":["sword",1]}"#);

    assert!(result.is_err());
}
