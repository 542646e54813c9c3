use serde_json::{json, Map};

use super::{created_id, creation_failed, items, page, select_ids, update_outcome, BatchAction, BatchOutcome};
use crate::client::{ApiError, YandexClient};
use crate::protocol::direct::{CreateTextAdParams, GetAdsParams, ManageAdsParams, UpdateTextAdParams};
use crate::protocol::{ResponseFormat, ToolResult};
use crate::render;

const AD_FIELDS: &[&str] = &["Id", "AdGroupId", "CampaignId", "Type", "State", "Status", "StatusClarification"];
const TEXT_AD_FIELDS: &[&str] = &["Title", "Title2", "Text", "Href", "Mobile", "DisplayDomain"];

const MODERATION_HINT: &str = "Submit for moderation using direct_moderate_ads.";

pub async fn get(params: GetAdsParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let mut criteria = Map::new();
    if let Some(ids) = params.campaign_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("CampaignIds".into(), json!(ids));
    }
    if let Some(ids) = params.adgroup_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("AdGroupIds".into(), json!(ids));
    }
    if let Some(ids) = params.ad_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("Ids".into(), json!(ids));
    }
    if let Some(states) = params.states.filter(|s| !s.is_empty()) {
        criteria.insert("States".into(), json!(states));
    }
    if let Some(statuses) = params.statuses.filter(|s| !s.is_empty()) {
        criteria.insert("Statuses".into(), json!(statuses));
    }

    let request = json!({
        "SelectionCriteria": criteria,
        "FieldNames": AD_FIELDS,
        "TextAdFieldNames": TEXT_AD_FIELDS,
        "Page": page(params.limit, params.offset)
    });

    let result = client.direct("ads", "get", request).await?;
    let ads = items(&result, "Ads");

    Ok(match params.response_format {
        ResponseFormat::Json => ToolResult::json(&json!({ "ads": ads, "total": ads.len() })),
        ResponseFormat::Markdown => ToolResult::text(render::direct::ads(ads)),
    })
}

pub async fn create_text_ad(params: CreateTextAdParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let mut text_ad = json!({
        "Title": params.title,
        "Text": params.text,
        "Href": params.href,
        "Mobile": if params.mobile { "YES" } else { "NO" }
    });
    if let Some(title2) = params.title2.filter(|t| !t.is_empty()) {
        text_ad["Title2"] = json!(title2);
    }

    let request = json!({ "Ads": [{ "AdGroupId": params.adgroup_id, "TextAd": text_ad }] });
    let result = client.direct("ads", "add", request).await?;

    Ok(match created_id(items(&result, "AddResults")) {
        Ok(id) => ToolResult::text(format!(
            "Ad created successfully. ID: {id}\n\nNote: {MODERATION_HINT}"
        )),
        Err(errors) => creation_failed("ad", &errors),
    })
}

pub async fn update(params: UpdateTextAdParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let mut text_ad = Map::new();
    let fields = [
        ("Title", &params.title),
        ("Title2", &params.title2),
        ("Text", &params.text),
        ("Href", &params.href),
    ];
    for (key, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            text_ad.insert(key.into(), json!(value));
        }
    }

    if text_ad.is_empty() {
        return Ok(ToolResult::text("No fields specified for update."));
    }

    let request = json!({ "Ads": [{ "Id": params.ad_id, "TextAd": text_ad }] });
    let result = client.direct("ads", "update", request).await?;

    Ok(update_outcome(
        items(&result, "UpdateResults"),
        format!("Ad {} updated successfully. Note: {MODERATION_HINT}", params.ad_id),
    ))
}

/// Moderate, suspend, resume, archive, unarchive or delete ads.
pub async fn change_state(
    params: ManageAdsParams,
    action: BatchAction,
    client: &YandexClient,
) -> Result<ToolResult, ApiError> {
    let result = client
        .direct("ads", action.method(), select_ids(&params.ad_ids))
        .await?;

    let outcome = BatchOutcome::collect(items(&result, action.results_key()), "Id");
    Ok(outcome.report(action.summary(outcome.ids.len(), "ad")))
}
