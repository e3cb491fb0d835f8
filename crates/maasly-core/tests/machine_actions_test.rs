#![allow(clippy::unwrap_used)]
// End-to-end machine actions against a wiremock region controller.

use serde_json::Value;
use url::Url;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use maasly_api::{MaasClient, TransportConfig, is_bad_request_error};
use maasly_core::{
    ActionInvoker, Machine, PowerState, ReleaseArgs, StartArgs, TWO_DOT_OH, read_machines,
};

const MACHINES: &str = include_str!("fixtures/machines.json");
const MACHINE: &str = include_str!("fixtures/machine.json");
const MACHINE_PATH: &str = "/MAAS/api/2.0/machines/4y3ha3/";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ActionInvoker<MaasClient>, Machine) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/MAAS/", server.uri())).unwrap();
    let client = MaasClient::new(base_url, &TransportConfig::default()).unwrap();

    let machines = read_machines(&TWO_DOT_OH, &serde_json::from_str(MACHINES).unwrap()).unwrap();
    let machine = machines.into_iter().next().unwrap();
    (server, ActionInvoker::new(client, TWO_DOT_OH), machine)
}

fn machine_with(fields: &[(&str, Value)]) -> String {
    let mut value: Value = serde_json::from_str(MACHINE).unwrap();
    for (key, v) in fields {
        value[*key] = v.clone();
    }
    value.to_string()
}

async fn mount_deploy(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(MACHINE_PATH))
        .and(query_param("op", "deploy"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

// ── Success ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_updates_machine() {
    let (server, invoker, machine) = setup().await;
    let response = machine_with(&[
        ("status_name", "Deploying".into()),
        ("status_message", "for testing".into()),
    ]);

    Mock::given(method("POST"))
        .and(path(MACHINE_PATH))
        .and(query_param("op", "deploy"))
        .and(body_string(
            "user_data=dXNlcmRhdGE%3D&distro_series=trusty&hwe_kernel=kernel&comment=a+comment",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(response))
        .expect(1)
        .mount(&server)
        .await;

    let args = StartArgs {
        user_data: Some(b"userdata".to_vec()),
        distro_series: "trusty".into(),
        kernel: "kernel".into(),
        comment: "a comment".into(),
    };
    invoker.start(&machine, &args).await.unwrap();

    assert_eq!(machine.status_name(), "Deploying");
    assert_eq!(machine.status_message().as_deref(), Some("for testing"));
}

#[tokio::test]
async fn test_release_then_refresh() {
    let (server, invoker, machine) = setup().await;

    Mock::given(method("POST"))
        .and(path(MACHINE_PATH))
        .and(query_param("op", "release"))
        .and(body_string("comment=done"))
        .respond_with(ResponseTemplate::new(200).set_body_string(machine_with(&[
            ("status_name", "Releasing".into()),
            ("owner", Value::Null),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(MACHINE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(machine_with(&[
            ("status_name", "Ready".into()),
            ("power_state", "off".into()),
            ("owner", Value::Null),
        ])))
        .mount(&server)
        .await;

    let args = ReleaseArgs {
        comment: "done".into(),
    };
    invoker.release(&machine, &args).await.unwrap();
    assert_eq!(machine.status_name(), "Releasing");
    assert_eq!(machine.owner(), None);

    invoker.refresh(&machine).await.unwrap();
    assert_eq!(machine.status_name(), "Ready");
    assert_eq!(machine.power_state(), PowerState::Off);
}

// ── Classified failures ─────────────────────────────────────────────

#[tokio::test]
async fn test_start_machine_not_found() {
    let (server, invoker, machine) = setup().await;
    mount_deploy(&server, 404, "can't find machine").await;

    let err = invoker
        .start(&machine, &StartArgs::default())
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert!(is_bad_request_error(&err));
    assert_eq!(err.to_string(), "can't find machine");
    assert_eq!(machine.status_name(), "Deployed");
}

#[tokio::test]
async fn test_start_machine_conflict() {
    let (server, invoker, machine) = setup().await;
    mount_deploy(&server, 409, "machine not allocated").await;

    let err = invoker
        .start(&machine, &StartArgs::default())
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(err.to_string(), "machine not allocated");
}

#[tokio::test]
async fn test_start_machine_forbidden() {
    let (server, invoker, machine) = setup().await;
    mount_deploy(&server, 403, "machine not yours").await;

    let err = invoker
        .start(&machine, &StartArgs::default())
        .await
        .unwrap_err();

    assert!(err.is_permission());
    assert_eq!(err.to_string(), "machine not yours");
}

#[tokio::test]
async fn test_start_machine_service_unavailable() {
    let (server, invoker, machine) = setup().await;
    mount_deploy(&server, 503, "no ip addresses available").await;

    let err = invoker
        .start(&machine, &StartArgs::default())
        .await
        .unwrap_err();

    assert!(err.is_cannot_complete());
    assert_eq!(err.to_string(), "no ip addresses available");
}

#[tokio::test]
async fn test_start_machine_unknown() {
    let (server, invoker, machine) = setup().await;
    mount_deploy(&server, 405, "wat?").await;

    let err = invoker
        .start(&machine, &StartArgs::default())
        .await
        .unwrap_err();

    assert!(err.is_unexpected());
    assert_eq!(
        err.to_string(),
        "unexpected: ServerError: 405 Method Not Allowed (wat?)"
    );
    assert_eq!(machine.status_name(), "Deployed");
}

#[tokio::test]
async fn test_success_with_bad_payload_is_deserialization_error() {
    let (server, invoker, machine) = setup().await;
    mount_deploy(&server, 200, r#"{"system_id": "4y3ha3"}"#).await;

    let err = invoker
        .start(&machine, &StartArgs::default())
        .await
        .unwrap_err();

    assert!(err.is_deserialization());
    assert!(
        err.to_string()
            .starts_with("machine 2.0 schema check failed: "),
        "got: {err}"
    );
}
