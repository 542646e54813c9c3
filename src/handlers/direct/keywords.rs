use serde_json::{json, Map, Value};

use super::{items, page, select_ids, BatchAction, BatchOutcome};
use crate::client::{ApiError, YandexClient};
use crate::protocol::direct::{
    AddKeywordsParams, GetKeywordsParams, KeywordBid, ManageKeywordsParams, SetKeywordBidsParams,
};
use crate::protocol::{ResponseFormat, ToolResult};
use crate::render::{self, units_to_micros};

const KEYWORD_FIELDS: &[&str] = &["Id", "Keyword", "AdGroupId", "CampaignId", "Bid", "State", "Status"];

pub async fn get(params: GetKeywordsParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let mut criteria = Map::new();
    if let Some(ids) = params.campaign_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("CampaignIds".into(), json!(ids));
    }
    if let Some(ids) = params.adgroup_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("AdGroupIds".into(), json!(ids));
    }
    if let Some(ids) = params.keyword_ids.filter(|ids| !ids.is_empty()) {
        criteria.insert("Ids".into(), json!(ids));
    }

    let request = json!({
        "SelectionCriteria": criteria,
        "FieldNames": KEYWORD_FIELDS,
        "Page": page(params.limit, params.offset)
    });

    let result = client.direct("keywords", "get", request).await?;
    let keywords = items(&result, "Keywords");

    Ok(match params.response_format {
        ResponseFormat::Json => ToolResult::json(&json!({ "keywords": keywords, "total": keywords.len() })),
        ResponseFormat::Markdown => ToolResult::text(render::direct::keywords(keywords)),
    })
}

pub async fn add(params: AddKeywordsParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let bid = params.bid.map(units_to_micros);
    let keywords: Vec<Value> = params
        .keywords
        .iter()
        .map(|keyword| {
            let mut entry = json!({ "Keyword": keyword, "AdGroupId": params.adgroup_id });
            if let Some(bid) = bid {
                entry["Bid"] = json!(bid);
            }
            entry
        })
        .collect();

    let result = client
        .direct("keywords", "add", json!({ "Keywords": keywords }))
        .await?;

    let outcome = BatchOutcome::collect(items(&result, "AddResults"), "Id");
    let mut summary = format!("Successfully added {} keyword(s).", outcome.ids.len());
    if !outcome.ids.is_empty() {
        summary.push_str(&format!("\nIDs: {}", outcome.ids.join(", ")));
    }
    Ok(outcome.report_unlabelled(summary))
}

pub async fn set_bids(params: SetKeywordBidsParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let bids: Vec<Value> = params.keyword_bids.iter().map(bid_item).collect();

    let result = client
        .direct("keywordbids", "set", json!({ "KeywordBids": bids }))
        .await?;

    let outcome = BatchOutcome::collect(items(&result, "SetResults"), "KeywordId");
    Ok(outcome.report(format!(
        "Successfully updated bids for {} keyword(s).",
        outcome.ids.len()
    )))
}

pub async fn delete(params: ManageKeywordsParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let action = BatchAction::Delete;
    let result = client
        .direct("keywords", action.method(), select_ids(&params.keyword_ids))
        .await?;

    let outcome = BatchOutcome::collect(items(&result, action.results_key()), "Id");
    Ok(outcome.report(action.summary(outcome.ids.len(), "keyword")))
}

fn bid_item(bid: &KeywordBid) -> Value {
    let mut item = json!({ "KeywordId": bid.keyword_id });
    if let Some(search) = bid.search_bid {
        item["SearchBid"] = json!(units_to_micros(search));
    }
    if let Some(network) = bid.network_bid {
        item["NetworkBid"] = json!(units_to_micros(network));
    }
    item
}
