mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn create_then_fetch_round_trips() -> Result<()> {
    let server = common::spawn_server().await?;

    let created = server
        .create(json!({
            "co2_value": 400.5,
            "unit": "ppm",
            "source": "sensor1",
            "description": "Test measurement"
        }))
        .await?;
    assert_eq!(created["co2_value"], 400.5);
    assert_eq!(created["unit"], "ppm");
    assert_eq!(created["source"], "sensor1");
    let id = created["id"].as_i64().expect("id should be an integer");

    let res = server.authed(Method::GET, &format!("/measurements/{id}")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = res.json::<Value>().await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn created_rows_have_unique_ids_and_ordered_timestamps() -> Result<()> {
    let server = common::spawn_server().await?;

    let mut previous: Option<Value> = None;
    for value in [410.0, 420.0, 430.0, 440.0] {
        let row = server.create(json!({ "co2_value": value })).await?;
        if let Some(prev) = &previous {
            assert!(row["id"].as_i64() > prev["id"].as_i64());
            let (prev_ts, ts) = (prev["created_at"].as_str().unwrap_or(""), row["created_at"].as_str().unwrap_or(""));
            let prev_ts = chrono::DateTime::parse_from_rfc3339(prev_ts)?;
            let ts = chrono::DateTime::parse_from_rfc3339(ts)?;
            assert!(ts >= prev_ts, "created_at went backwards: {prev_ts} then {ts}");
        }
        previous = Some(row);
    }
    Ok(())
}

#[tokio::test]
async fn non_positive_co2_is_rejected_and_not_stored() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .authed(Method::POST, "/measurements/")
        .json(&json!({ "co2_value": -1, "unit": "ppm" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert!(body["field_errors"]["co2_value"].is_string(), "missing field error: {body}");

    let listed = server.authed(Method::GET, "/measurements/").send().await?.json::<Value>().await?;
    assert_eq!(listed, json!([]));
    Ok(())
}

#[tokio::test]
async fn update_changes_only_supplied_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let created = server.create(json!({ "co2_value": 500.0, "unit": "ppm", "source": "sensor3" })).await?;
    let id = created["id"].as_i64().unwrap_or_default();

    let res = server
        .authed(Method::PUT, &format!("/measurements/{id}"))
        .json(&json!({ "co2_value": 550.0, "description": "Updated" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let updated = res.json::<Value>().await?;
    assert_eq!(updated["co2_value"], 550.0);
    assert_eq!(updated["description"], "Updated");
    assert_eq!(updated["unit"], "ppm");
    assert_eq!(updated["source"], "sensor3");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let res = server
        .authed(Method::PUT, "/measurements/12345")
        .json(&json!({ "description": "nobody home" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_is_final() -> Result<()> {
    let server = common::spawn_server().await?;
    let created = server.create(json!({ "co2_value": 600.0, "unit": "ppm", "source": "sensor4" })).await?;
    let path = format!("/measurements/{}", created["id"]);

    let res = server.authed(Method::DELETE, &path).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = server.authed(Method::GET, &path).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.authed(Method::DELETE, &path).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
