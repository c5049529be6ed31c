// tests/rotation_tests.rs
use credential_vault::config::{Encryption, EncryptionKeyEntry};
use credential_vault::core::encryptor::{DefaultEncryptor, Encryptor};
use credential_vault::core::name::CredentialName;
use credential_vault::core::request::SetRequest;
use credential_vault::core::store::CredentialStore;
use credential_vault::core::value::CredentialValue;
use credential_vault::core::vault_db_ops;
use credential_vault::error::VaultError;
use credential_vault::rotation::{rotate_encrypted_values, DecryptableDataDetector};
use serial_test::serial;

mod common;
use common::{
    keyset_from, single_key_encryption, test_vault_with, two_key_encryption, TestDbPair,
    TestVault, SECOND_KEY_HEX, SECOND_KEY_UUID, TEST_KEY_UUID,
};

fn second_key_only() -> Encryption {
    Encryption {
        keys: vec![EncryptionKeyEntry {
            uuid: SECOND_KEY_UUID.into(),
            key_hex: SECOND_KEY_HEX.into(),
            active: true,
        }],
    }
}

#[test]
#[serial]
fn test_single_key_vault_needs_no_rotation() {
    let mut pair = TestDbPair::new();
    let encryptor = DefaultEncryptor::new(keyset_from(&single_key_encryption()));

    for text in ["a", "b", "c"] {
        let value = encryptor.encrypt(Some(text)).unwrap();
        vault_db_ops::insert_encrypted_value(&pair.vault, &value).unwrap();
    }

    let report = rotate_encrypted_values(&mut pair.vault, &encryptor).unwrap();
    assert_eq!(report.candidates, 0);
    assert_eq!(report.rotated, 0);
    assert_eq!(report.batches, 0);
}

#[test]
#[serial]
fn test_rotation_rekeys_stale_rows_in_place() {
    let mut pair = TestDbPair::new();
    let old = DefaultEncryptor::new(keyset_from(&two_key_encryption(false)));

    let mut uuids = Vec::new();
    let mut old_ciphertexts = Vec::new();
    for text in ["first", "second", "third"] {
        let value = old.encrypt(Some(text)).unwrap();
        uuids.push(value.uuid.clone());
        old_ciphertexts.push(value.ciphertext.clone());
        vault_db_ops::insert_encrypted_value(&pair.vault, &value).unwrap();
    }

    let new = DefaultEncryptor::new(keyset_from(&two_key_encryption(true)));
    let report = rotate_encrypted_values(&mut pair.vault, &new).unwrap();

    assert_eq!(report.candidates, 3);
    assert_eq!(report.rotated, 3);
    assert_eq!(report.batches, 1);

    for (i, (uuid, text)) in uuids.iter().zip(["first", "second", "third"]).enumerate() {
        let row = vault_db_ops::find_encrypted_value(&pair.vault, uuid)
            .unwrap()
            .expect("row survives rotation under the same uuid");
        assert_eq!(row.key_uuid, SECOND_KEY_UUID);
        assert_ne!(row.ciphertext, old_ciphertexts[i]);
        assert_eq!(new.decrypt(Some(&row)).unwrap().as_deref(), Some(text));
    }
}

#[test]
#[serial]
fn test_rotation_only_touches_stale_rows() {
    let mut pair = TestDbPair::new();
    let old = DefaultEncryptor::new(keyset_from(&two_key_encryption(false)));
    let new = DefaultEncryptor::new(keyset_from(&two_key_encryption(true)));

    let stale = old.encrypt(Some("stale")).unwrap();
    vault_db_ops::insert_encrypted_value(&pair.vault, &stale).unwrap();
    let fresh = new.encrypt(Some("fresh")).unwrap();
    vault_db_ops::insert_encrypted_value(&pair.vault, &fresh).unwrap();

    let report = rotate_encrypted_values(&mut pair.vault, &new).unwrap();
    assert_eq!(report.candidates, 1);
    assert_eq!(report.rotated, 1);

    let untouched = vault_db_ops::find_encrypted_value(&pair.vault, &fresh.uuid)
        .unwrap()
        .unwrap();
    assert_eq!(untouched.ciphertext, fresh.ciphertext);
    assert_eq!(untouched.nonce, fresh.nonce);
}

#[test]
#[serial]
fn test_rotation_walks_multiple_batches() {
    let mut pair = TestDbPair::new();
    let old = DefaultEncryptor::new(keyset_from(&two_key_encryption(false)));

    for i in 0..120 {
        let value = old.encrypt(Some(&format!("value-{i}"))).unwrap();
        vault_db_ops::insert_encrypted_value(&pair.vault, &value).unwrap();
    }

    let new = DefaultEncryptor::new(keyset_from(&two_key_encryption(true)));
    let report = rotate_encrypted_values(&mut pair.vault, &new).unwrap();

    assert_eq!(report.candidates, 120);
    assert_eq!(report.rotated, 120);
    assert_eq!(report.batches, 3);
    assert_eq!(
        vault_db_ops::count_encrypted_by_keys(&pair.vault, &[TEST_KEY_UUID.to_string()]).unwrap(),
        0
    );
}

#[test]
#[serial]
fn test_rotation_preserves_absent_values() {
    let mut pair = TestDbPair::new();
    let old = DefaultEncryptor::new(keyset_from(&two_key_encryption(false)));

    let absent = old.encrypt(None).unwrap();
    vault_db_ops::insert_encrypted_value(&pair.vault, &absent).unwrap();

    let new = DefaultEncryptor::new(keyset_from(&two_key_encryption(true)));
    rotate_encrypted_values(&mut pair.vault, &new).unwrap();

    let row = vault_db_ops::find_encrypted_value(&pair.vault, &absent.uuid)
        .unwrap()
        .unwrap();
    assert_eq!(row.key_uuid, SECOND_KEY_UUID);
    assert_eq!(new.decrypt(Some(&row)).unwrap(), None);
}

#[test]
#[serial]
fn test_detector_accepts_empty_vault() {
    let pair = TestDbPair::new();
    let keys = keyset_from(&single_key_encryption());

    DecryptableDataDetector::check(&pair.index, &pair.vault, &keys).unwrap();
}

#[test]
#[serial]
fn test_detector_rejects_vault_with_no_known_keys() {
    let mut tv = test_vault_with(keyset_from(&single_key_encryption()));
    for raw in ["/detect/a", "/detect/b"] {
        tv.store
            .set(SetRequest::new(
                CredentialName::new(raw).unwrap(),
                CredentialValue::Password("pw".into()),
            ))
            .unwrap();
    }

    let TestVault { store, dir: _dir } = tv;
    drop(store);
    let (vault, index) = TestDbPair::reopen();

    // The configured set no longer contains the key that wrote the data
    let wrong_keys = keyset_from(&second_key_only());
    let result = DecryptableDataDetector::check(&index, &vault, &wrong_keys);
    assert!(matches!(result, Err(VaultError::NoDecryptableKeys(2))));

    // Keeping the old key in the set (inactive) satisfies the check
    let both_keys = keyset_from(&two_key_encryption(true));
    DecryptableDataDetector::check(&index, &vault, &both_keys).unwrap();
}

#[test]
#[serial]
fn test_store_reads_cleanly_after_full_rotation() {
    let mut tv = test_vault_with(keyset_from(&two_key_encryption(false)));
    tv.store
        .set(SetRequest::new(
            CredentialName::new("/rotated/password").unwrap(),
            CredentialValue::Password("carry-me".into()),
        ))
        .unwrap();

    let TestVault { store, dir: _dir } = tv;
    drop(store);
    let (mut vault, index) = TestDbPair::reopen();

    let new = DefaultEncryptor::new(keyset_from(&two_key_encryption(true)));
    let report = rotate_encrypted_values(&mut vault, &new).unwrap();
    assert_eq!(report.rotated, report.candidates);

    // The first key can now be dropped from the config entirely
    let store = CredentialStore::new(
        vault,
        index,
        Box::new(DefaultEncryptor::new(keyset_from(&second_key_only()))),
    );
    let version = store
        .latest_version(&CredentialName::new("/rotated/password").unwrap())
        .unwrap()
        .expect("credential survives rotation");
    assert!(matches!(version.value, CredentialValue::Password(ref p) if p == "carry-me"));
}
