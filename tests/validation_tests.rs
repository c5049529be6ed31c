// tests/validation_tests.rs
use credential_vault::core::name::CredentialName;
use credential_vault::core::request::{
    CertificateGenerationParameters, GenerateRequest, GenerationParameters, SetRequest,
    StringGenerationParameters,
};
use credential_vault::core::value::{CredentialValue, SshValue, UserValue};
use credential_vault::enums::CredentialType;
use credential_vault::error::VaultError;
use serde_json::json;

#[test]
fn test_name_gets_leading_slash() {
    let name = CredentialName::new("prod/db/password").unwrap();
    assert_eq!(name.as_str(), "/prod/db/password");

    let already = CredentialName::new("/prod/db/password").unwrap();
    assert_eq!(already.as_str(), "/prod/db/password");
}

#[test]
fn test_name_rejects_empty_and_slash_only() {
    assert!(matches!(
        CredentialName::new(""),
        Err(VaultError::InvalidName(_))
    ));
    assert!(matches!(
        CredentialName::new("/"),
        Err(VaultError::InvalidName(_))
    ));
    assert!(matches!(
        CredentialName::new("///"),
        Err(VaultError::InvalidName(_))
    ));
}

#[test]
fn test_name_rejects_forbidden_characters() {
    for bad in ["/has space", "/back\\slash", "/aster*isk"] {
        assert!(
            matches!(CredentialName::new(bad), Err(VaultError::InvalidName(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_name_rejects_double_and_trailing_slash() {
    assert!(matches!(
        CredentialName::new("/a//b"),
        Err(VaultError::InvalidName(_))
    ));
    assert!(matches!(
        CredentialName::new("/a/b/"),
        Err(VaultError::InvalidName(_))
    ));
}

#[test]
fn test_name_length_limit() {
    let ok = format!("/{}", "a".repeat(1023));
    assert!(CredentialName::new(&ok).is_ok());

    let too_long = format!("/{}", "a".repeat(1024));
    assert!(matches!(
        CredentialName::new(&too_long),
        Err(VaultError::InvalidName(_))
    ));
}

#[test]
fn test_name_deserialization_validates() {
    let ok: Result<CredentialName, _> = serde_json::from_value(json!("/fine/name"));
    assert!(ok.is_ok());

    let bad: Result<CredentialName, _> = serde_json::from_value(json!("/not ok"));
    assert!(bad.is_err());
}

#[test]
fn test_set_request_rejects_empty_values() {
    let name = CredentialName::new("/test").unwrap();

    let empty_value = SetRequest::new(name.clone(), CredentialValue::Value(String::new()));
    assert!(empty_value.validate().is_err());

    let empty_password = SetRequest::new(name.clone(), CredentialValue::Password(String::new()));
    assert!(empty_password.validate().is_err());

    let empty_user = SetRequest::new(
        name.clone(),
        CredentialValue::User(UserValue {
            username: Some("admin".into()),
            password: String::new(),
            salt: None,
        }),
    );
    assert!(empty_user.validate().is_err());

    let empty_ssh = SetRequest::new(
        name,
        CredentialValue::Ssh(SshValue {
            public_key: String::new(),
            private_key: String::new(),
        }),
    );
    assert!(empty_ssh.validate().is_err());
}

#[test]
fn test_set_request_rejects_non_object_json() {
    let name = CredentialName::new("/test/json").unwrap();

    for bad in [json!([1, 2, 3]), json!("string"), json!(42), json!({})] {
        let request = SetRequest::new(name.clone(), CredentialValue::Json(bad));
        assert!(request.validate().is_err());
    }

    let good = SetRequest::new(name, CredentialValue::Json(json!({"k": "v"})));
    assert!(good.validate().is_ok());
}

#[test]
fn test_set_request_wire_shape() {
    let request: SetRequest = serde_json::from_value(json!({
        "name": "/prod/api/password",
        "type": "password",
        "value": "hunter2"
    }))
    .unwrap();

    assert_eq!(request.credential_type(), CredentialType::Password);
    assert_eq!(request.name.as_str(), "/prod/api/password");
    assert!(matches!(request.value, CredentialValue::Password(ref p) if p == "hunter2"));
}

#[test]
fn test_string_parameters_default_length_and_fallback() {
    let defaults = StringGenerationParameters::default();
    assert_eq!(defaults.effective_length(), 30);

    let too_short = StringGenerationParameters {
        length: 2,
        ..Default::default()
    };
    assert_eq!(too_short.effective_length(), 30);

    let too_long = StringGenerationParameters {
        length: 5000,
        ..Default::default()
    };
    assert_eq!(too_long.effective_length(), 30);

    let in_range = StringGenerationParameters {
        length: 64,
        ..Default::default()
    };
    assert_eq!(in_range.effective_length(), 64);
}

#[test]
fn test_string_parameters_reject_excluding_every_class() {
    let all_off = StringGenerationParameters {
        exclude_lower: true,
        exclude_upper: true,
        exclude_number: true,
        include_special: false,
        ..Default::default()
    };
    assert!(matches!(
        all_off.validate(),
        Err(VaultError::Validation(_))
    ));

    // Special characters alone keep the set non-empty
    let only_special = StringGenerationParameters {
        exclude_lower: true,
        exclude_upper: true,
        exclude_number: true,
        include_special: true,
        ..Default::default()
    };
    assert!(only_special.validate().is_ok());
}

#[test]
fn test_generate_request_rejects_non_generatable_types() {
    let name = CredentialName::new("/x").unwrap();

    for credential_type in [CredentialType::Value, CredentialType::Json] {
        let request = GenerateRequest::new(name.clone(), credential_type);
        assert!(matches!(
            request.validate(),
            Err(VaultError::CannotGenerate(_))
        ));
    }
}

#[test]
fn test_generate_request_rejects_mismatched_parameters() {
    let name = CredentialName::new("/x").unwrap();
    let request = GenerateRequest::new(name, CredentialType::Password).with_parameters(
        GenerationParameters::Ssh(Default::default()),
    );

    assert!(matches!(
        request.validate(),
        Err(VaultError::Validation(_))
    ));
}

#[test]
fn test_certificate_generation_requires_parameters() {
    let name = CredentialName::new("/cert").unwrap();
    let request = GenerateRequest::new(name, CredentialType::Certificate);

    assert!(matches!(
        request.validate(),
        Err(VaultError::Validation(_))
    ));
}

#[test]
fn test_certificate_parameters_validation() {
    let base = CertificateGenerationParameters {
        common_name: "example.com".into(),
        self_signed: true,
        ..Default::default()
    };
    assert!(base.validate().is_ok());

    let no_subject = CertificateGenerationParameters {
        common_name: String::new(),
        self_signed: true,
        ..Default::default()
    };
    assert!(no_subject.validate().is_err());

    let zero_duration = CertificateGenerationParameters {
        duration: 0,
        ..base.clone()
    };
    assert!(zero_duration.validate().is_err());

    let too_long = CertificateGenerationParameters {
        duration: 3651,
        ..base.clone()
    };
    assert!(too_long.validate().is_err());

    let conflicted = CertificateGenerationParameters {
        common_name: "example.com".into(),
        self_signed: true,
        ca_name: Some("/some/ca".into()),
        ..Default::default()
    };
    assert!(conflicted.validate().is_err());

    let unsigned = CertificateGenerationParameters {
        common_name: "example.com".into(),
        ..Default::default()
    };
    assert!(unsigned.validate().is_err());

    let ca_signed = CertificateGenerationParameters {
        common_name: "example.com".into(),
        ca_name: Some("/some/ca".into()),
        ..Default::default()
    };
    assert!(ca_signed.validate().is_ok());

    // A root CA needs no explicit signer
    let root_ca = CertificateGenerationParameters {
        common_name: "Root CA".into(),
        is_ca: true,
        ..Default::default()
    };
    assert!(root_ca.validate().is_ok());
}

#[test]
fn test_generate_request_wire_shape() {
    let request: GenerateRequest = serde_json::from_value(json!({
        "name": "deploy/password",
        "type": "password",
        "parameters": {"type": "password", "length": 40, "include_special": true},
        "mode": "no-overwrite"
    }))
    .unwrap();

    assert_eq!(request.name.as_str(), "/deploy/password");
    assert_eq!(request.credential_type, CredentialType::Password);
    assert_eq!(
        request.mode,
        credential_vault::enums::WriteMode::NoOverwrite
    );
    match request.parameters {
        Some(GenerationParameters::Password(p)) => {
            assert_eq!(p.length, 40);
            assert!(p.include_special);
        }
        other => panic!("unexpected parameters: {other:?}"),
    }
}
