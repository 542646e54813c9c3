use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::client::{ApiError, ReportOutcome, YandexClient};
use crate::protocol::direct::DirectReportParams;
use crate::protocol::{ResponseFormat, ToolResult};
use crate::render::direct::StatisticsTable;

pub async fn get(params: DirectReportParams, client: &YandexClient) -> Result<ToolResult, ApiError> {
    let definition = report_definition(&params);

    match client.direct_report(definition).await? {
        ReportOutcome::Pending { retry_in } => {
            info!(retry_in, "Direct report queued for offline generation");
            Ok(ToolResult::text(pending_message(retry_in)))
        }
        ReportOutcome::Ready(tsv) => {
            let Some(table) = StatisticsTable::parse(&tsv) else {
                return Ok(ToolResult::text("No data found for the specified period."));
            };
            Ok(match params.response_format {
                ResponseFormat::Json => ToolResult::json(&table.to_json()),
                ResponseFormat::Markdown => ToolResult::text(table.to_markdown(
                    &params.date_from,
                    &params.date_to,
                    &params.report_type,
                )),
            })
        }
    }
}

/// Body of the `reports` request (wrapped in `{"params": ...}` by the client).
pub fn report_definition(params: &DirectReportParams) -> Value {
    let mut criteria = json!({
        "DateFrom": params.date_from,
        "DateTo": params.date_to
    });
    if let Some(ids) = params.campaign_ids.as_ref().filter(|ids| !ids.is_empty()) {
        let values: Vec<String> = ids.iter().map(i64::to_string).collect();
        criteria["Filter"] = json!([{ "Field": "CampaignId", "Operator": "IN", "Values": values }]);
    }

    let mut definition = json!({
        "SelectionCriteria": criteria,
        "FieldNames": params.field_names,
        "ReportType": params.report_type,
        "DateRangeType": "CUSTOM_DATE",
        "Format": "TSV",
        "IncludeVAT": if params.include_vat { "YES" } else { "NO" },
        "IncludeDiscount": "NO"
    });
    definition["ReportName"] = json!(report_name(params, &definition));
    definition
}

/// Hex characters of the definition digest kept in a report name.
const REPORT_DIGEST_LEN: usize = 16;

/// Report names are unique per definition: Direct refuses a known name with
/// other settings, and an identical request must reuse the name to collect
/// a report queued offline, also after a restart.
fn report_name(params: &DirectReportParams, definition: &Value) -> String {
    let digest = hex::encode(Sha256::digest(definition.to_string().as_bytes()));
    format!(
        "Report_{}_{}_{}",
        params.date_from,
        params.date_to,
        &digest[..REPORT_DIGEST_LEN]
    )
}

fn pending_message(retry_in: Option<u64>) -> String {
    match retry_in {
        Some(secs) => format!("Report is being generated. Please try again in {secs} seconds."),
        None => "Report is being generated. Please try again in a few seconds.".to_string(),
    }
}
