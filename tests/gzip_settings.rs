//! End-to-end tests of the gzip settings pages against a mock backend.

mod common;

use common::{hidden_json, MockBackend, TestConsole, ADMIN_ID};
use serde_json::{json, Value};

const GZIP_PATH: &str = "/servers/server/settings/gzip";

#[tokio::test]
async fn test_invalid_level_is_rejected_before_any_backend_write() {
    let backend = MockBackend::start().await;
    let console = TestConsole::start(&backend).await;

    let body = console
        .post_json(
            GZIP_PATH,
            &[
                ("webId", "100"),
                ("gzipId", "0"),
                ("level", "10"),
                ("gzipRefJSON", r#"{"isOn":true}"#),
            ],
        )
        .await;

    assert_eq!(body["code"], 400);
    assert_eq!(body["message"], "please choose a valid compression level");
    assert_eq!(body["errorFields"], json!(["level"]));
    assert!(backend.business_calls().is_empty(), "got {:?}", backend.names());

    // The operation log is written even though the action failed.
    let logs = backend.oplog_entries().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].body["action"], GZIP_PATH);
    assert_eq!(logs[0].admin_id.as_deref(), Some(ADMIN_ID.to_string().as_str()));
}

#[tokio::test]
async fn test_update_existing_gzip_config() {
    let backend = MockBackend::start().await;
    let console = TestConsole::start(&backend).await;

    let body = console
        .post_json(
            GZIP_PATH,
            &[
                ("webId", "100"),
                ("gzipId", "12"),
                ("level", "5"),
                ("minLength", r#"{"count":1,"unit":"kb"}"#),
                ("maxLength", ""),
                ("condsJSON", ""),
                ("gzipRefJSON", r#"{"isPrior":true,"isOn":true,"gzipId":0}"#),
            ],
        )
        .await;
    assert_eq!(body["code"], 200);

    assert_eq!(
        backend.names(),
        vec!["HTTPGzipService.updateHTTPGzip", "HTTPWebService.updateHTTPWebGzip"]
    );

    let update = &backend.calls_to("HTTPGzipService", "updateHTTPGzip")[0];
    assert_eq!(update.body["gzipId"], 12);
    assert_eq!(update.body["level"], 5);
    assert_eq!(update.body["minLength"], json!({"count": 1, "unit": "kb"}));
    assert_eq!(update.body["maxLength"]["count"], -1);
    assert_eq!(update.body["condsJSON"], Value::Null);

    let web = &backend.calls_to("HTTPWebService", "updateHTTPWebGzip")[0];
    assert_eq!(web.body["webId"], 100);
    assert_eq!(web.body["gzipJSON"]["gzipId"], 12);
    assert_eq!(web.body["gzipJSON"]["isPrior"], true);
    assert_eq!(web.body["gzipJSON"]["isOn"], true);
}

#[tokio::test]
async fn test_create_gzip_config_points_ref_at_new_id() {
    let backend = MockBackend::start().await;
    let console = TestConsole::start(&backend).await;

    let body = console
        .post_json(
            GZIP_PATH,
            &[
                ("webId", "100"),
                ("level", "3"),
                ("condsJSON", r#"{"groups":[]}"#),
                ("gzipRefJSON", r#"{"isOn":true}"#),
            ],
        )
        .await;
    assert_eq!(body["code"], 200);

    assert_eq!(
        backend.names(),
        vec!["HTTPGzipService.createHTTPGzip", "HTTPWebService.updateHTTPWebGzip"]
    );
    let create = &backend.calls_to("HTTPGzipService", "createHTTPGzip")[0];
    assert_eq!(create.body["level"], 3);
    assert_eq!(create.body["condsJSON"], json!({"groups": []}));

    let web = &backend.calls_to("HTTPWebService", "updateHTTPWebGzip")[0];
    assert_eq!(web.body["gzipJSON"]["gzipId"], 77);
}

#[tokio::test]
async fn test_malformed_ref_stops_before_writes() {
    let backend = MockBackend::start().await;
    let console = TestConsole::start(&backend).await;

    let res = console
        .post_xhr(
            GZIP_PATH,
            &[("webId", "100"), ("level", "5"), ("gzipRefJSON", "{not json")],
        )
        .await;

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 500);
    assert!(backend.business_calls().is_empty(), "got {:?}", backend.names());
}

#[tokio::test]
async fn test_malformed_optional_fields_stop_before_writes() {
    let cases = [
        ("minLength", "{\"count\":"),
        ("maxLength", "[1, 2"),
        ("condsJSON", "{groups}"),
    ];
    for (field, raw) in cases {
        let backend = MockBackend::start().await;
        let console = TestConsole::start(&backend).await;

        let res = console
            .post_xhr(
                GZIP_PATH,
                &[
                    ("webId", "100"),
                    ("gzipId", "12"),
                    ("level", "5"),
                    ("gzipRefJSON", r#"{"isOn":true}"#),
                    (field, raw),
                ],
            )
            .await;

        assert_eq!(res.status(), 500, "field {}", field);
        assert!(
            backend.business_calls().is_empty(),
            "field {} got {:?}",
            field,
            backend.names()
        );
        assert_eq!(backend.oplog_entries().await.len(), 1, "field {}", field);
    }
}

#[tokio::test]
async fn test_unparsable_level_counts_as_zero() {
    let backend = MockBackend::start().await;
    let console = TestConsole::start(&backend).await;

    let body = console
        .post_json(
            GZIP_PATH,
            &[
                ("webId", "100"),
                ("gzipId", "none"),
                ("level", "abc"),
                ("gzipRefJSON", r#"{"isOn":true}"#),
            ],
        )
        .await;
    assert_eq!(body["code"], 200);

    let create = &backend.calls_to("HTTPGzipService", "createHTTPGzip")[0];
    assert_eq!(create.body["level"], 0);

    let logs = backend.oplog_entries().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].body["action"], GZIP_PATH);
}

#[tokio::test]
async fn test_backend_failure_renders_error_page() {
    let backend = MockBackend::start_with(|service, _, _| {
        (service == "HTTPGzipService").then(|| (500, json!({"message": "database is down"})))
    })
    .await;
    let console = TestConsole::start(&backend).await;

    let res = console
        .post(
            GZIP_PATH,
            &[("webId", "100"), ("level", "5"), ("gzipRefJSON", "{}")],
        )
        .await;
    assert_eq!(res.status(), 500);
    let html = res.text().await.unwrap();
    assert!(html.contains("Server error"));
    assert!(!html.contains("database is down"));

    // The web config is left untouched.
    assert!(backend.calls_to("HTTPWebService", "updateHTTPWebGzip").is_empty());
    assert_eq!(backend.oplog_entries().await.len(), 1);
}

#[tokio::test]
async fn test_get_without_gzip_ref_shows_defaults() {
    let backend = MockBackend::start().await;
    let console = TestConsole::start(&backend).await;

    let res = console.get(&format!("{}?serverId=1", GZIP_PATH)).await;
    assert_eq!(res.status(), 200);
    let html = res.text().await.unwrap();
    assert_eq!(
        hidden_json(&html, "gzipRefJSON"),
        json!({"isPrior": false, "isOn": false, "gzipId": 0})
    );
    assert!(html.contains(r#"name="webId" value="100""#));
    assert!(html.contains(r#"name="gzipId" value="0""#));
    assert!(html.contains(r#"<option value="0" selected>"#));
    assert!(!html.contains(r#"<option value="1" selected>"#));

    assert_eq!(
        backend.names(),
        vec!["ServerService.findEnabledServer", "ServerService.findAndInitServerWebConfig"]
    );
    // GET pages write no operation log.
    assert!(backend.calls_to("LogService", "createLog").is_empty());
}

#[tokio::test]
async fn test_get_loads_referenced_gzip_config() {
    let backend = MockBackend::start_with(|service, method, _| match (service, method) {
        ("ServerService", "findAndInitServerWebConfig") => Some((
            200,
            json!({"webJSON": {"id": 100, "gzipRef": {"isOn": true, "gzipId": 12}}}),
        )),
        ("HTTPGzipService", "findEnabledHTTPGzipConfig") => Some((
            200,
            json!({"gzipJSON": {"id": 12, "isOn": true, "level": 7}}),
        )),
        _ => None,
    })
    .await;
    let console = TestConsole::start(&backend).await;

    let res = console.get(&format!("{}?serverId=1", GZIP_PATH)).await;
    assert_eq!(res.status(), 200);

    let find = &backend.calls_to("HTTPGzipService", "findEnabledHTTPGzipConfig")[0];
    assert_eq!(find.body["gzipId"], 12);
}

#[tokio::test]
async fn test_location_scope_reads_location_web_config() {
    let backend = MockBackend::start().await;
    let console = TestConsole::start(&backend).await;

    let res = console
        .get("/servers/server/settings/locations/gzip?serverId=1&locationId=9")
        .await;
    assert_eq!(res.status(), 200);

    let find = &backend.calls_to("HTTPLocationService", "findAndInitHTTPLocationWebConfig")[0];
    assert_eq!(find.body["locationId"], 9);
    assert!(backend
        .calls_to("ServerService", "findAndInitServerWebConfig")
        .is_empty());
}

#[tokio::test]
async fn test_location_scope_requires_location_id() {
    let backend = MockBackend::start().await;
    let console = TestConsole::start(&backend).await;

    let res = console
        .get("/servers/server/settings/locations/gzip?serverId=1")
        .await;
    assert_eq!(res.status(), 404);
}
