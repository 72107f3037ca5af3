use chrono::{TimeZone, Utc};
use hivewatch_engine::prelude::*;
use hivewatch_engine::types::ExpectedSetMode;
use serde_json::json;
use uuid::Uuid;

const PROD: &str = "00000000-0000-4000-8000-000000000001";
const SWARM: &str = "00000000-0000-4000-8000-000000000002";
const APP_SERVER: &str = "00000000-0000-4000-8000-000000000010";
const SWARM_SERVER: &str = "00000000-0000-4000-8000-000000000020";

fn tomcat_target(role: &str, webapps: serde_json::Value) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "serverId": APP_SERVER,
        "serverName": "app-01",
        "role": role,
        "baseUrl": "http://app-01",
        "port": 8080,
        "state": {
            "scannedAt": "2024-05-01T10:00:00Z",
            "outcomeKind": "SUCCESS",
            "tomcatVersion": "10.1.18",
            "javaVersion": "17.0.10",
            "os": "Linux",
            "webapps": webapps
        }
    })
}

fn input(payments_webapps: serde_json::Value) -> DashboardInput {
    let document = json!({
        "environments": [
            {
                "id": PROD,
                "name": "prod",
                "servers": [{"id": APP_SERVER, "environmentId": PROD, "name": "app-01"}],
                "tomcatTargets": [tomcat_target("PAYMENTS", payments_webapps)]
            },
            {
                "id": SWARM,
                "name": "swarm",
                "actuatorTargets": [{
                    "id": Uuid::new_v4(),
                    "serverId": SWARM_SERVER,
                    "serverName": "swarm-01",
                    "role": "PAYMENTS",
                    "profile": "payments",
                    "baseUrl": "http://swarm-01",
                    "port": 9000,
                    "state": {
                        "scannedAt": "2024-05-01T10:05:00Z",
                        "outcomeKind": "SUCCESS",
                        "healthStatus": "DOWN",
                        "appName": "payments-api",
                        "buildVersion": "4.2.0"
                    }
                }]
            }
        ]
    });
    serde_json::from_value(document).unwrap()
}

fn prod_tomcat_row(dashboard: &Dashboard) -> &hivewatch_engine::results::Row {
    let prod = dashboard
        .environments
        .iter()
        .find(|e| e.name == "prod")
        .unwrap();
    &prod.sections[0].rows[0]
}

#[test]
fn test_built_in_webapp_ignored_for_version() {
    let processor = SnapshotProcessor::new(EngineConfig::default());
    let input = input(json!([
        {"path": "/pay", "name": "pay", "version": "1.2"},
        {"path": "/manager", "name": "manager", "version": null}
    ]));

    let dashboard = processor.dashboard(&input, Utc::now());
    let row = prod_tomcat_row(&dashboard);

    // columns: SERVICES, AUTH, PAYMENTS, TOMCAT, JAVA, OS
    assert_eq!(row.cells[2].status, CellStatus::Ok);
    assert_eq!(row.cells[2].text.as_deref(), Some("1.2"));
    assert_eq!(row.cells[0].title.as_deref(), Some("Missing target: SERVICES"));
    assert_eq!(row.cells[3].text.as_deref(), Some("10.1.18"));
    assert_eq!(row.status, RowStatus::Block);
}

#[test]
fn test_conflicting_webapp_versions() {
    let processor = SnapshotProcessor::new(EngineConfig::default());
    let input = input(json!([
        {"path": "/pay", "name": "pay", "version": "1.2"},
        {"path": "/pay-admin", "name": "pay-admin", "version": "1.3"}
    ]));

    let dashboard = processor.dashboard(&input, Utc::now());
    let cell = &prod_tomcat_row(&dashboard).cells[2];

    assert_eq!(cell.status, CellStatus::Error);
    assert_eq!(cell.title.as_deref(), Some("Multiple webapp versions: 1.2, 1.3"));
}

#[test]
fn test_docker_down_blocks_environment() {
    let processor = SnapshotProcessor::new(EngineConfig::default());
    let input = input(json!([]));
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let dashboard = processor.dashboard(&input, now);
    let names: Vec<&str> = dashboard.environments.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["prod", "swarm"]);

    let swarm = &dashboard.environments[1];
    let docker = &swarm.sections[1];
    assert_eq!(docker.title, "Docker Swarm");
    assert_eq!(docker.rows[0].label, "swarm-01");
    assert_eq!(docker.rows[0].cells[0].title.as_deref(), Some("payments is DOWN"));
    assert_eq!(swarm.summary.verdict, DecisionVerdict::Block);
    assert_eq!(swarm.summary.block_issues, 1);
    assert_eq!(swarm.summary.docker.status, RowStatus::Block);
    assert_eq!(swarm.summary.tomcats.status, RowStatus::Unknown);

    let status = processor
        .status(&input, Uuid::parse_str(SWARM).unwrap(), now)
        .unwrap();
    assert_eq!(status.verdict, DecisionVerdict::Block);
    assert_eq!(
        status.issues[0].message,
        "payments-api · health=DOWN"
    );
    assert_eq!(status.evaluated_at, now);
}

#[test]
fn test_issue_counts_add_up() {
    let processor = SnapshotProcessor::new(EngineConfig::default());
    let dashboard = processor.dashboard(&input(json!([])), Utc::now());

    for env in &dashboard.environments {
        let summary = &env.summary;
        let status = processor
            .status(&input(json!([])), env.id, Utc::now())
            .unwrap();
        assert_eq!(
            summary.block_issues + summary.warn_issues + summary.unknown_issues,
            status.issues.len()
        );
        assert_eq!(status.issues.is_empty(), status.verdict == DecisionVerdict::Ok);
    }
}

#[test]
fn test_unconfigured_spec_rejected() {
    let processor = SnapshotProcessor::new(EngineConfig::default());
    let document: SpecDocument = serde_json::from_value(json!({
        "dockerSpecs": [{
            "serverId": SWARM_SERVER,
            "mode": "UNCONFIGURED",
            "templateId": null,
            "items": ["payments"]
        }]
    }))
    .unwrap();
    assert_eq!(document.docker_specs[0].mode, ExpectedSetMode::Unconfigured);

    let report = processor.validate_specs(&document).unwrap();
    assert!(!report.is_valid());
    assert!(report.rejected[0]
        .reason
        .contains("mode must be EXPLICIT or TEMPLATE"));
}

#[test]
fn test_wire_shape() {
    let processor = SnapshotProcessor::new(EngineConfig::default());
    let status = processor
        .status(&input(json!([])), Uuid::parse_str(PROD).unwrap(), Utc::now())
        .unwrap();
    let value = serde_json::to_value(&status).unwrap();

    assert_eq!(value["environmentName"], "prod");
    assert_eq!(value["verdict"], "OK");
    assert!(value["issues"].as_array().unwrap().is_empty());
    assert!(value.get("evaluatedAt").is_some());
}
