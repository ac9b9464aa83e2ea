mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

async fn list(server: &common::TestServer, query: &str) -> Result<Vec<Value>> {
    let res = server.authed(Method::GET, &format!("/measurements/{query}")).send().await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "unexpected status: {}", res.status());
    Ok(res.json::<Vec<Value>>().await?)
}

#[tokio::test]
async fn filters_combine_source_and_unit() -> Result<()> {
    let server = common::spawn_server().await?;
    server.create(json!({ "co2_value": 400.0, "source": "sensorA", "unit": "ppm" })).await?;
    server.create(json!({ "co2_value": 410.0, "source": "sensorB", "unit": "ppb" })).await?;
    server.create(json!({ "co2_value": 420.0, "source": "sensorA", "unit": "ppb" })).await?;

    let rows = list(&server, "?source=sensorA&unit=ppm").await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["source"], "sensorA");
    assert_eq!(rows[0]["unit"], "ppm");

    let rows = list(&server, "?source=sensorA").await?;
    assert_eq!(rows.len(), 2);

    let rows = list(&server, "?source=nobody").await?;
    assert!(rows.is_empty());
    Ok(())
}

#[tokio::test]
async fn order_by_co2_value_desc() -> Result<()> {
    let server = common::spawn_server().await?;
    server.create(json!({ "co2_value": 400.0 })).await?;
    server.create(json!({ "co2_value": 800.0 })).await?;
    server.create(json!({ "co2_value": 600.0 })).await?;

    let values: Vec<f64> = list(&server, "?order_by=co2_value&order=desc")
        .await?
        .iter()
        .filter_map(|row| row["co2_value"].as_f64())
        .collect();
    assert_eq!(values, vec![800.0, 600.0, 400.0]);

    let values: Vec<f64> = list(&server, "?order_by=co2_value")
        .await?
        .iter()
        .filter_map(|row| row["co2_value"].as_f64())
        .collect();
    assert_eq!(values, vec![400.0, 600.0, 800.0]);
    Ok(())
}

#[tokio::test]
async fn order_by_created_at_desc_reverses_insertion() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut ids = Vec::new();
    for value in [410.0, 420.0, 430.0] {
        ids.push(server.create(json!({ "co2_value": value })).await?["id"].clone());
        // distinct timestamps, so id never has to break a tie
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let newest_first: Vec<Value> = list(&server, "?order_by=created_at&order=desc")
        .await?
        .into_iter()
        .map(|row| row["id"].clone())
        .collect();
    ids.reverse();
    assert_eq!(newest_first, ids);

    let res = server.authed(Method::GET, "/measurements/?order_by=created_at&order=DESC").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["field_errors"]["order"].is_string(), "missing field error: {body}");
    Ok(())
}

#[tokio::test]
async fn large_limit_is_not_capped_by_default() -> Result<()> {
    let server = common::spawn_server().await?;
    server.create(json!({ "co2_value": 400.0 })).await?;

    let rows = list(&server, "?limit=50000").await?;
    assert_eq!(rows.len(), 1);
    Ok(())
}

#[tokio::test]
async fn skip_and_limit_page_in_insertion_order() -> Result<()> {
    let server = common::spawn_server().await?;
    let mut ids = Vec::new();
    for value in [401.0, 402.0, 403.0, 404.0, 405.0] {
        ids.push(server.create(json!({ "co2_value": value })).await?["id"].clone());
    }

    let page: Vec<Value> = list(&server, "?skip=1&limit=2").await?.into_iter().map(|row| row["id"].clone()).collect();
    assert_eq!(page, ids[1..3].to_vec());
    Ok(())
}

#[tokio::test]
async fn unknown_order_column_is_a_bad_request() -> Result<()> {
    let server = common::spawn_server().await?;
    server.create(json!({ "co2_value": 400.0 })).await?;

    let res = server.authed(Method::GET, "/measurements/?order_by=unknown_field").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["field_errors"]["order_by"].is_string(), "missing field error: {body}");

    let res = server.authed(Method::GET, "/measurements/?order_by=co2_value&order=random").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
