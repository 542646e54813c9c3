use serde_json::{json, Map, Value};

use super::{created_id, creation_failed, items, page, update_outcome};
use crate::client::{ApiError, YandexClient};
use crate::protocol::direct::{CreateAdGroupParams, GetAdGroupsParams, UpdateAdGroupParams};
use crate::protocol::{ResponseFormat, ToolResult};
use crate::render;

const AD_GROUP_FIELDS: &[&str] = &["Id", "Name", "CampaignId", "RegionIds", "Type", "Status", "ServingStatus"];

pub async fn get(params: GetAdGroupsParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let mut criteria = Map::new();
    if let Some(ids) = params.campaign_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("CampaignIds".into(), json!(ids));
    }
    if let Some(ids) = params.adgroup_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("Ids".into(), json!(ids));
    }

    let request = json!({
        "SelectionCriteria": criteria,
        "FieldNames": AD_GROUP_FIELDS,
        "Page": page(params.limit, params.offset)
    });

    let result = client.direct("adgroups", "get", request).await?;
    let groups = items(&result, "AdGroups");

    Ok(match params.response_format {
        ResponseFormat::Json => ToolResult::json(&json!({ "ad_groups": groups, "total": groups.len() })),
        ResponseFormat::Markdown => ToolResult::text(render::direct::ad_groups(groups)),
    })
}

pub async fn create(params: CreateAdGroupParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let mut group = json!({
        "Name": params.name,
        "CampaignId": params.campaign_id,
        "RegionIds": params.region_ids
    });
    if let Some(negative) = params.negative_keywords.filter(|k| !k.is_empty()) {
        group["NegativeKeywords"] = json!({ "Items": negative });
    }

    let result = client
        .direct("adgroups", "add", json!({ "AdGroups": [group] }))
        .await?;

    Ok(match created_id(items(&result, "AddResults")) {
        Ok(id) => ToolResult::text(format!("Ad group created successfully. ID: {id}")),
        Err(errors) => creation_failed("ad group", &errors),
    })
}

pub async fn update(params: UpdateAdGroupParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let result = client
        .direct("adgroups", "update", json!({ "AdGroups": [ad_group_update(&params)] }))
        .await?;

    Ok(update_outcome(
        items(&result, "UpdateResults"),
        format!("Ad group {} updated successfully.", params.adgroup_id),
    ))
}

fn ad_group_update(params: &UpdateAdGroupParams) -> Value {
    let mut group = Map::new();
    group.insert("Id".into(), json!(params.adgroup_id));

    if let Some(name) = params.name.as_deref().filter(|n| !n.is_empty()) {
        group.insert("Name".into(), json!(name));
    }
    if let Some(regions) = params.region_ids.as_ref().filter(|r| !r.is_empty()) {
        group.insert("RegionIds".into(), json!(regions));
    }
    if let Some(negative) = &params.negative_keywords {
        group.insert("NegativeKeywords".into(), json!({ "Items": negative }));
    }
    if let Some(tracking) = params.tracking_params.as_deref().filter(|t| !t.is_empty()) {
        group.insert("TrackingParams".into(), json!(tracking));
    }

    Value::Object(group)
}
