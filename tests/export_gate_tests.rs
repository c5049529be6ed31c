// tests/export_gate_tests.rs
//! Lives in its own integration crate on purpose: the config snapshot
//! is loaded once per process, and this test needs the restrictive
//! config to win that first load.

use credential_vault::core::name::CredentialName;
use credential_vault::core::request::SetRequest;
use credential_vault::core::value::CredentialValue;
use credential_vault::error::VaultError;
use credential_vault::export::export_to_json;
use serial_test::serial;

mod common;
use common::test_vault;

const LOCKED_DOWN_CONFIG: &str = r#"
[keys]
vault_key = "unused"
index_key = "unused"

[paths]
vault_db = "unused/vault.db"
index_db = "unused/index.db"

[features]
use_dev_keys = false
skip_kdf_slowdown = true
allow_insecure_export = false

[[encryption.keys]]
uuid = "11111111-1111-4111-8111-111111111111"
key_hex = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff"
active = true
"#;

#[test]
#[serial]
fn test_export_refuses_when_disabled_by_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("locked-down.toml");
    std::fs::write(&config_path, LOCKED_DOWN_CONFIG).unwrap();
    std::env::set_var("CVAULT_CONFIG", config_path.to_str().unwrap());

    let mut tv = test_vault();
    tv.store
        .set(SetRequest::new(
            CredentialName::new("/gated/secret").unwrap(),
            CredentialValue::Password("pw".into()),
        ))
        .unwrap();

    let export_path = dir.path().join("never-written.json");
    let result = export_to_json(&tv.store, export_path.to_str().unwrap());

    assert!(matches!(result, Err(VaultError::Config(_))));
    assert!(!export_path.exists());
}
