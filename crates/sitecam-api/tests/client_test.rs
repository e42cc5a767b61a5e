#![allow(clippy::unwrap_used)]
// Integration tests for `MonitorClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitecam_api::{CompanyRef, Error, MonitorClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, MonitorClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = MonitorClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Status tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_global_status_mixed_shapes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Alpha": [
                { "nome": "Portaria", "status": "ON", "ip": "10.0.0.1" },
                { "nome": "Garagem", "status": "OFF" }
            ],
            "Beta": {
                "cameras": [{ "name": "Hall", "status": "NO_CONFIG" }],
                "metadata": { "empresa_id": 4, "empresa_nome": "Acme" }
            }
        })))
        .mount(&server)
        .await;

    let status = client.global_status().await.unwrap();
    assert_eq!(status.len(), 2);

    let (alpha, alpha_meta) = status["Alpha"].clone().into_parts();
    assert_eq!(alpha.len(), 2);
    assert_eq!(alpha[1].status, "OFF");
    assert!(alpha_meta.is_none());

    let (beta, beta_meta) = status["Beta"].clone().into_parts();
    assert_eq!(beta[0].nome.as_deref(), Some("Hall"));
    assert_eq!(beta_meta.unwrap().empresa_id, Some(CompanyRef::Number(4)));
}

#[tokio::test]
async fn test_site_status_encodes_name() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status/Residencial%20Sol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "nome": "Entrada", "status": "ON" }
        ])))
        .mount(&server)
        .await;

    let cameras = client.site_status("Residencial Sol").await.unwrap();
    assert_eq!(cameras.len(), 1);
    assert_eq!(cameras[0].nome.as_deref(), Some("Entrada"));
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client.global_status().await.unwrap_err();
    assert!(err.is_transient());
    match err {
        Error::Status {
            status,
            body_preview,
            ..
        } => {
            assert_eq!(status, 502);
            assert_eq!(body_preview, "upstream down");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_site_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status/Nowhere"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "not found" })))
        .mount(&server)
        .await;

    let err = client.site_status("Nowhere").await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
}

#[tokio::test]
async fn test_malformed_body_maps_to_deserialization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client.global_status().await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("maintenance")),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Report tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_sla_report_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/reports/sla"))
        .and(query_param("empresa_id", "3"))
        .and(query_param("days", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "empresa_id": 3,
            "empresa_nome": "Acme",
            "periodo_dias": 30,
            "unidades": [{
                "cliente_nome": "Alpha",
                "codigo_moni": "A01",
                "total_cameras": 8,
                "eventos_offline": 2,
                "eventos_online": 2,
                "uptime_percent": 97.5
            }]
        })))
        .mount(&server)
        .await;

    let report = client.sla_report("3", 30).await.unwrap();
    assert_eq!(report.periodo_dias, 30);
    assert_eq!(report.unidades.len(), 1);
    assert!((report.unidades[0].uptime_percent - 97.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_failure_report_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/reports/failures"))
        .and(query_param("empresa_id", "3"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "empresa_id": 3,
            "periodo_dias": 7,
            "ranking": [
                { "camera_nome": "Garagem", "cliente_nome": "Alpha", "total_falhas": 9 },
                { "camera_nome": "Hall", "cliente_nome": "Beta",
                  "dispositivo_ip": "10.0.0.9", "total_falhas": 4 }
            ]
        })))
        .mount(&server)
        .await;

    let report = client.failure_report("3", 7).await.unwrap();
    let names: Vec<_> = report.ranking.iter().map(|e| e.camera_nome.as_str()).collect();
    assert_eq!(names, vec!["Garagem", "Hall"]);
    assert_eq!(report.ranking[1].dispositivo_ip.as_deref(), Some("10.0.0.9"));
}

// ── Company tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_companies() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/empresas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nome": "Acme", "total_clientes": 12, "total_cameras": 140 },
            { "id": 2, "nome": "Globex" }
        ])))
        .mount(&server)
        .await;

    let companies = client.list_companies().await.unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0].total_cameras, Some(140));
    assert_eq!(companies[1].total_clientes, None);
}
