use github_api::types::ErrorBody;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_not_found_body() {
    let json = load_fixture("not_found.json");
    let body: ErrorBody = serde_json::from_str(&json).unwrap();
    assert_eq!(body.message.as_deref(), Some("Not Found"));
    assert_eq!(
        body.documentation_url.as_deref(),
        Some("https://docs.github.com/rest/repos/repos#get-a-repository")
    );
    assert!(body.errors.is_empty());
}

#[test]
fn deserialize_validation_failed_body() {
    let json = load_fixture("validation_failed.json");
    let body: ErrorBody = serde_json::from_str(&json).unwrap();
    assert_eq!(body.message.as_deref(), Some("Validation Failed"));
    assert_eq!(body.errors.len(), 1);

    let detail = &body.errors[0];
    assert_eq!(detail.resource.as_deref(), Some("Issue"));
    assert_eq!(detail.field.as_deref(), Some("title"));
    assert_eq!(detail.code.as_deref(), Some("missing_field"));
    assert_eq!(detail.message, None);
}

#[test]
fn message_from_fixture_bytes() {
    let json = load_fixture("validation_failed.json");
    assert_eq!(
        ErrorBody::message_from(json.as_bytes()).as_deref(),
        Some("Validation Failed")
    );
}
