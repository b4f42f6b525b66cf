// Tests for the tenant configuration gateway
//
// Covers parsing of the organisation info wire shape (JSON-array-string
// fields, optional logo) and the configuration-required fallback.

use openword_client::tenant::{parse_info_response, Language, TenantClient, TenantInfo};

#[tokio::test]
async fn test_missing_key_yields_fallback_without_fetching() {
    // The server URL is unroutable on purpose: without a key no request
    // may be issued, so this must still succeed.
    let client = TenantClient::new("http://192.0.2.1:9");

    let tenant = client.fetch_info(None).await.unwrap();

    assert_eq!(tenant.welcome.greeting, "Configuration Required");
    assert_eq!(
        tenant.welcome.messages,
        vec![
            "Please add your organization key to the URL.".to_string(),
            "Example: ?organisation=YOUR_ORGANISATION_KEY".to_string(),
        ]
    );
    assert_eq!(tenant.welcome.waiting, "Waiting for configuration...");
    assert!(tenant.welcome.additional_message.is_empty());
    assert!(tenant.languages.is_empty());
    assert!(tenant.default_service_id.is_empty());
}

#[test]
fn test_fallback_payload_is_exact() {
    let tenant = TenantInfo::configuration_required();

    assert_eq!(tenant.welcome.greeting, "Configuration Required");
    assert_eq!(tenant.welcome.messages.len(), 2);
    assert_eq!(tenant.welcome.waiting, "Waiting for configuration...");
    assert!(tenant.logo.is_none());
}

#[test]
fn test_info_response_parsing() {
    let body = r#"{
        "responseObject": {
            "name": "Example Organisation",
            "defaultServiceId": "1234",
            "translationLanguages": "[{\"value\":\"es-ES\",\"label\":\"Spanish\"},{\"value\":\"fr-FR\",\"label\":\"French\"}]",
            "message": "[\"Welcome to our service.\",\"Pick a language below.\"]",
            "greeting": "Good morning!",
            "additionalWelcome": "We are glad you are here.",
            "waiting": "The service has not started yet.",
            "base64Logo": "aGVsbG8="
        }
    }"#;

    let tenant = parse_info_response(body).unwrap();

    assert_eq!(tenant.name, "Example Organisation");
    assert_eq!(tenant.default_service_id, "1234");
    assert_eq!(
        tenant.languages,
        vec![
            Language {
                value: "es-ES".to_string(),
                label: "Spanish".to_string(),
            },
            Language {
                value: "fr-FR".to_string(),
                label: "French".to_string(),
            },
        ]
    );
    assert_eq!(tenant.welcome.greeting, "Good morning!");
    assert_eq!(
        tenant.welcome.messages,
        vec![
            "Welcome to our service.".to_string(),
            "Pick a language below.".to_string(),
        ]
    );
    assert_eq!(tenant.welcome.additional_message, "We are glad you are here.");
    assert_eq!(tenant.welcome.waiting, "The service has not started yet.");
    assert_eq!(tenant.logo.as_deref(), Some(b"hello".as_slice()));
}

#[test]
fn test_info_response_optional_fields() {
    let body = r#"{
        "responseObject": {
            "defaultServiceId": "1234",
            "message": "[]",
            "greeting": "Hello",
            "waiting": "Waiting..."
        }
    }"#;

    let tenant = parse_info_response(body).unwrap();

    assert!(tenant.name.is_empty());
    assert!(tenant.languages.is_empty());
    assert!(tenant.welcome.messages.is_empty());
    assert!(tenant.welcome.additional_message.is_empty());
    assert!(tenant.logo.is_none());
}

#[test]
fn test_invalid_language_payload_is_an_error() {
    let body = r#"{
        "responseObject": {
            "defaultServiceId": "1234",
            "translationLanguages": "not json",
            "message": "[]",
            "greeting": "Hello",
            "waiting": "Waiting..."
        }
    }"#;

    assert!(parse_info_response(body).is_err());
}

#[test]
fn test_language_code_from_locale() {
    let language = Language {
        value: "es-ES".to_string(),
        label: "Spanish".to_string(),
    };
    assert_eq!(language.code(), "es");
}
