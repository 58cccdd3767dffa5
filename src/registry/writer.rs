use crate::app_config::AppConfig;
use crate::domain::TwinRecord;
use crate::registry::domain::TwinGet;
use crate::registry::map_twin::{from_external_twin, to_external_twin};
use reqwest::{Client, header};
use std::error::Error;
use tracing::{info, instrument};

/// Writes a record's tags and desired properties back to the registry and
/// returns the registry's resulting twin, re-mapped. The etag guards against
/// concurrent writers; a record without one writes unconditionally.
#[instrument(skip(client, config, record))]
pub async fn push_twin(client: &Client, config: &AppConfig, record: &TwinRecord) -> Result<TwinRecord, Box<dyn Error>> {
    info!("Updating twin for device '{}'...", record.device_id);

    let update = to_external_twin(record)?;
    let etag = record.etag.as_deref().unwrap_or("*");

    let response = client
        .patch(format!("{}/twins/{}", config.registry().url(), record.device_id))
        .query(&[("api-version", config.registry().api_version())])
        .header(header::IF_MATCH, etag)
        .json(&update)
        .send()
        .await?
        .error_for_status()?;

    let twin = response.json::<TwinGet>().await?;
    let updated = from_external_twin(Some(twin))?;
    info!("Updating twin for device '{}'... OK", record.device_id);

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use test_log::test;

    #[test(tokio::test)]
    async fn push_twin_sends_only_tags_and_desired_properties() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("PATCH", "/twins/chiller-01")
            .match_query(Matcher::UrlEncoded("api-version".into(), "2021-04-12".into()))
            .match_header("if-match", "AAAAAAAAAAE=")
            .match_body(Matcher::Json(json!({
                "deviceId": "chiller-01",
                "etag": "AAAAAAAAAAE=",
                "tags": { "building": "43" },
                "properties": { "desired": { "telemetryInterval": 30 } }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/twin_response.json"))
            .create_async()
            .await;

        let config = AppConfigBuilder::new().registry_url(server.url()).build();
        let client = Client::new();

        let record = TwinRecord {
            etag: Some("AAAAAAAAAAE=".to_string()),
            device_id: "chiller-01".to_string(),
            module_id: Some("thermostat".to_string()),
            is_simulated: false,
            tags: HashMap::from([("building".to_string(), json!("43"))]),
            desired_properties: HashMap::from([("telemetryInterval".to_string(), json!(30))]),
            reported_properties: HashMap::from([("firmware".to_string(), json!({ "version": "2.1.0" }))]),
        };

        let updated = push_twin(&client, &config, &record).await?;

        mock.assert();
        assert_eq!(updated.device_id, "chiller-01");
        assert_eq!(updated.etag, Some("AAAAAAAAAAE=".to_string()));

        Ok(())
    }

    #[test(tokio::test)]
    async fn push_twin_without_an_etag_writes_unconditionally() -> Result<(), Box<dyn Error>> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("PATCH", "/twins/chiller-01")
            .match_query(Matcher::Any)
            .match_header("if-match", "*")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/twin_response.json"))
            .create_async()
            .await;

        let config = AppConfigBuilder::new().registry_url(server.url()).build();
        let client = Client::new();

        let record = TwinRecord {
            device_id: "chiller-01".to_string(),
            ..TwinRecord::default()
        };

        push_twin(&client, &config, &record).await?;

        mock.assert();

        Ok(())
    }
}
