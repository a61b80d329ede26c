mod common;

use common::*;
use udsplus_validator::*;

#[tokio::test]
async fn resolves_a_manifest_fetched_by_url() {
    let manifest = uds_manifest(&[("Patient", "http://x/patient.ndjson")]);
    let gateway = StaticGateway::new().with_response(
        "http://submitter.example/manifest",
        200,
        &manifest,
    );

    let parsed = resolve(
        &ManifestSource::Url("http://submitter.example/manifest".to_string()),
        &gateway,
    )
    .await
    .unwrap();

    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(parsed.entries[0].profile_name.as_deref(), Some("Patient"));
    assert_eq!(parsed.resource["resourceType"], "Parameters");
}

#[tokio::test]
async fn url_resolution_propagates_fetch_failures() {
    let gateway = StaticGateway::new().with_response("http://submitter.example/manifest", 403, "");

    let error = resolve(
        &ManifestSource::Url("http://submitter.example/manifest".to_string()),
        &gateway,
    )
    .await
    .unwrap_err();

    assert!(matches!(error, UdsPlusError::FetchFailed { status: 403, .. }));
    assert!(error.is_fatal_for_manifest());
}

#[tokio::test]
async fn url_resolution_rejects_invalid_uris_before_fetching() {
    // An empty gateway would report "no route"; InvalidUri must win.
    let error = resolve(
        &ManifestSource::Url("not-a-url".to_string()),
        &StaticGateway::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(error, UdsPlusError::InvalidUri { .. }));
}

#[tokio::test]
async fn inline_resolution_is_idempotent() {
    let manifest = uds_manifest(&[
        ("Patient", "http://x/patient.ndjson"),
        ("Encounter", "http://x/encounter.ndjson"),
    ]);
    let source = ManifestSource::Inline(manifest);
    let gateway = StaticGateway::new();

    let first = resolve(&source, &gateway).await.unwrap();
    let second = resolve(&source, &gateway).await.unwrap();

    assert_eq!(first.entries, second.entries);
    assert_eq!(first.resource, second.resource);
}

#[tokio::test]
async fn unrelated_parameters_are_dropped_silently() {
    let manifest = serde_json::json!({
        "resourceType": "Parameters",
        "parameter": [
            {"name": "exportType", "valueCode": "full"},
            {"name": "udsData", "part": [
                {"name": "type", "valueCode": "Income"},
                {"name": "url", "valueUrl": "http://x/income.ndjson"}
            ]},
            {"name": "transactionTime", "valueInstant": "2024-06-01T00:00:00Z"}
        ]
    })
    .to_string();

    let parsed = resolve(&ManifestSource::Inline(manifest), &StaticGateway::new())
        .await
        .unwrap();

    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(parsed.entries[0].profile_name.as_deref(), Some("Income"));
}

#[tokio::test]
async fn non_object_manifest_is_not_a_resource() {
    let error = resolve(
        &ManifestSource::Inline("[1,2,3]".to_string()),
        &StaticGateway::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(error, UdsPlusError::NotAResource { .. }));
}
