// tests/export_tests.rs
use credential_vault::core::name::CredentialName;
use credential_vault::core::request::{
    GenerateRequest, GenerationParameters, SetRequest, StringGenerationParameters,
};
use credential_vault::core::value::CredentialValue;
use credential_vault::enums::CredentialType;
use credential_vault::export::export_to_json;
use serde_json::{json, Value};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

mod common;
use common::test_vault;

fn name(raw: &str) -> CredentialName {
    CredentialName::new(raw).unwrap()
}

#[test]
#[serial]
fn test_export_contains_decrypted_values_and_metadata() {
    let mut tv = test_vault();
    tv.store
        .set(SetRequest::new(
            name("/export/password"),
            CredentialValue::Password("plain-for-export".into()),
        ))
        .unwrap();
    tv.store
        .set(SetRequest::new(
            name("/export/config"),
            CredentialValue::Json(json!({"host": "db.internal"})),
        ))
        .unwrap();

    let export_dir = tempdir().unwrap();
    let export_path = export_dir.path().join("vault-export.json");

    let total = export_to_json(&tv.store, export_path.to_str().unwrap()).unwrap();
    assert_eq!(total, 2);

    let json_str = fs::read_to_string(&export_path).unwrap();
    let export: Value = serde_json::from_str(&json_str).unwrap();

    assert_eq!(export["export_format"], "credential-vault-v1");
    assert_eq!(export["total_credentials"], 2);
    assert!(export["exported_at"].as_str().unwrap().contains('Z'));
    assert!(export["warning"].as_str().unwrap().contains("PLAINTEXT"));

    let credentials = export["credentials"].as_array().unwrap();
    let find = |credential_name: &str| {
        credentials
            .iter()
            .find(|c| c["name"] == credential_name)
            .unwrap_or_else(|| panic!("credential not found: {credential_name}"))
    };

    let password = find("/export/password");
    assert_eq!(password["type"], "password");
    assert_eq!(password["value"], "plain-for-export");

    let config = find("/export/config");
    assert_eq!(config["type"], "json");
    assert_eq!(config["value"]["host"], "db.internal");
}

#[test]
#[serial]
fn test_export_uses_latest_version_of_each_credential() {
    let mut tv = test_vault();
    for password in ["old", "current"] {
        tv.store
            .set(SetRequest::new(
                name("/export/rotating"),
                CredentialValue::Password(password.into()),
            ))
            .unwrap();
    }

    let export_dir = tempdir().unwrap();
    let export_path = export_dir.path().join("latest-only.json");
    let total = export_to_json(&tv.store, export_path.to_str().unwrap()).unwrap();
    assert_eq!(total, 1);

    let export: Value = serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(export["credentials"][0]["value"], "current");
}

#[test]
#[serial]
fn test_export_covers_generated_credentials() {
    let mut tv = test_vault();
    tv.store
        .generate(
            GenerateRequest::new(name("/export/user"), CredentialType::User).with_parameters(
                GenerationParameters::User(StringGenerationParameters {
                    username: Some("svc-export".into()),
                    ..Default::default()
                }),
            ),
        )
        .unwrap();

    let export_dir = tempdir().unwrap();
    let export_path = export_dir.path().join("generated.json");
    export_to_json(&tv.store, export_path.to_str().unwrap()).unwrap();

    let export: Value = serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    let user = &export["credentials"][0];
    assert_eq!(user["type"], "user");
    assert_eq!(user["value"]["username"], "svc-export");
    assert_eq!(user["value"]["password"].as_str().unwrap().len(), 30);
    assert!(user["value"]["password_hash"]
        .as_str()
        .unwrap()
        .starts_with("$argon2"));
    assert!(user["value"].get("salt").is_none());
}

#[test]
#[serial]
fn test_export_of_empty_vault() {
    let tv = test_vault();

    let export_dir = tempdir().unwrap();
    let export_path = export_dir.path().join("empty.json");
    let total = export_to_json(&tv.store, export_path.to_str().unwrap()).unwrap();
    assert_eq!(total, 0);

    let export: Value = serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(export["total_credentials"], 0);
    assert_eq!(export["credentials"].as_array().unwrap().len(), 0);
}
