use serde_json::{json, Map, Value};

use super::{items, page, select_ids, update_outcome, BatchAction, BatchOutcome};
use crate::client::{ApiError, YandexClient};
use crate::protocol::direct::{DailyBudgetMode, GetCampaignsParams, ManageCampaignsParams, UpdateCampaignParams};
use crate::protocol::{ResponseFormat, ToolResult};
use crate::render::{self, units_to_micros};

const CAMPAIGN_FIELDS: &[&str] = &[
    "Id",
    "Name",
    "Type",
    "State",
    "Status",
    "StatusPayment",
    "StartDate",
    "EndDate",
    "DailyBudget",
    "Statistics",
];

pub async fn get(params: GetCampaignsParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let mut criteria = Map::new();
    if let Some(ids) = params.campaign_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("Ids".into(), json!(ids));
    }
    if let Some(states) = params.states.filter(|s| !s.is_empty()) {
        criteria.insert("States".into(), json!(states));
    }
    if let Some(statuses) = params.statuses.filter(|s| !s.is_empty()) {
        criteria.insert("Statuses".into(), json!(statuses));
    }
    if let Some(types) = params.types.filter(|t| !t.is_empty()) {
        criteria.insert("Types".into(), json!(types));
    }

    let request = json!({
        "SelectionCriteria": criteria,
        "FieldNames": CAMPAIGN_FIELDS,
        "TextCampaignFieldNames": ["BiddingStrategy", "Settings"],
        "Page": page(params.limit, params.offset)
    });

    let result = client.direct("campaigns", "get", request).await?;
    let campaigns = items(&result, "Campaigns");

    Ok(match params.response_format {
        ResponseFormat::Json => {
            ToolResult::json(&json!({ "campaigns": campaigns, "total": campaigns.len() }))
        }
        ResponseFormat::Markdown => ToolResult::text(render::direct::campaigns(campaigns)),
    })
}

/// Suspend, resume, archive, unarchive or delete campaigns.
pub async fn change_state(
    params: ManageCampaignsParams,
    action: BatchAction,
    client: &YandexClient,
) -> Result<ToolResult, ApiError> {
    let result = client
        .direct("campaigns", action.method(), select_ids(&params.campaign_ids))
        .await?;

    let outcome = BatchOutcome::collect(items(&result, action.results_key()), "Id");
    Ok(outcome.report(action.summary(outcome.ids.len(), "campaign")))
}

pub async fn update(params: UpdateCampaignParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let result = client
        .direct("campaigns", "update", json!({ "Campaigns": [campaign_update(&params)] }))
        .await?;

    Ok(update_outcome(
        items(&result, "UpdateResults"),
        format!("Campaign {} updated successfully.", params.campaign_id),
    ))
}

/// The `Campaigns[0]` object of `campaigns.update`: only the fields given.
fn campaign_update(params: &UpdateCampaignParams) -> Value {
    let mut campaign = Map::new();
    campaign.insert("Id".into(), json!(params.campaign_id));

    if let Some(name) = params.name.as_deref().filter(|n| !n.is_empty()) {
        campaign.insert("Name".into(), json!(name));
    }
    if let Some(amount) = params.daily_budget_amount {
        let mode = params.daily_budget_mode.unwrap_or(DailyBudgetMode::Distributed);
        campaign.insert(
            "DailyBudget".into(),
            json!({ "Amount": units_to_micros(amount), "Mode": mode.as_str() }),
        );
    }
    if let Some(start) = params.start_date.as_deref().filter(|d| !d.is_empty()) {
        campaign.insert("StartDate".into(), json!(start));
    }
    if let Some(end) = params.end_date.as_deref().filter(|d| !d.is_empty()) {
        campaign.insert("EndDate".into(), json!(end));
    }
    if let Some(negative) = &params.negative_keywords {
        campaign.insert("NegativeKeywords".into(), json!({ "Items": negative }));
    }

    Value::Object(campaign)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: Value) -> UpdateCampaignParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn update_sends_only_given_fields() {
        let update = campaign_update(&params(json!({ "campaign_id": 7, "name": "Renamed" })));
        assert_eq!(update, json!({ "Id": 7, "Name": "Renamed" }));
    }

    #[test]
    fn budget_defaults_to_distributed_mode() {
        let update = campaign_update(&params(json!({ "campaign_id": 7, "daily_budget_amount": 300.5 })));
        assert_eq!(update["DailyBudget"], json!({ "Amount": 300_500_000, "Mode": "DISTRIBUTED" }));
    }

    #[test]
    fn empty_negative_keywords_clear_the_list() {
        let update = campaign_update(&params(json!({ "campaign_id": 7, "negative_keywords": [] })));
        assert_eq!(update["NegativeKeywords"], json!({ "Items": [] }));
    }
}
