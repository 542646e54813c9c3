//! Arguments of the Yandex Direct tools.

use serde::Deserialize;
use serde_json::{json, Value};

use super::fields;
use super::{ResponseFormat, ToolParams};

/// Page size bound of the Direct `get` methods.
pub const MAX_PAGE_LIMIT: u64 = 10_000;

fn default_limit() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

string_enum! {
    /// Campaign state filter.
    CampaignState {
        On => "ON",
        Off => "OFF",
        Suspended => "SUSPENDED",
        Ended => "ENDED",
        Converted => "CONVERTED",
        Archived => "ARCHIVED",
    }
}

string_enum! {
    /// Campaign status filter.
    CampaignStatus {
        Accepted => "ACCEPTED",
        Draft => "DRAFT",
        Moderation => "MODERATION",
        Rejected => "REJECTED",
    }
}

string_enum! {
    /// Campaign type filter.
    CampaignType {
        TextCampaign => "TEXT_CAMPAIGN",
        DynamicTextCampaign => "DYNAMIC_TEXT_CAMPAIGN",
        MobileAppCampaign => "MOBILE_APP_CAMPAIGN",
        CpmBannerCampaign => "CPM_BANNER_CAMPAIGN",
        SmartCampaign => "SMART_CAMPAIGN",
        UnifiedCampaign => "UNIFIED_CAMPAIGN",
    }
}

string_enum! {
    /// Ad state filter.
    AdState {
        On => "ON",
        Off => "OFF",
        OffByMonitoring => "OFF_BY_MONITORING",
        Suspended => "SUSPENDED",
        Archived => "ARCHIVED",
    }
}

string_enum! {
    /// Ad status filter.
    AdStatus {
        Accepted => "ACCEPTED",
        Draft => "DRAFT",
        Moderation => "MODERATION",
        Preaccepted => "PREACCEPTED",
        Rejected => "REJECTED",
    }
}

string_enum! {
    /// Daily budget spending mode.
    DailyBudgetMode {
        Standard => "STANDARD",
        Distributed => "DISTRIBUTED",
    }
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

/// Parameters for `direct_get_campaigns`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetCampaignsParams {
    pub campaign_ids: Option<Vec<i64>>,
    pub states: Option<Vec<CampaignState>>,
    pub statuses: Option<Vec<CampaignStatus>>,
    pub types: Option<Vec<CampaignType>>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for GetCampaignsParams {
    fn input_schema() -> Value {
        fields::object(
            &[],
            json!({
                "campaign_ids": fields::id_list("Filter by specific campaign IDs"),
                "states": fields::enum_list(
                    CampaignState::VALUES,
                    "Filter by campaign states: ON, OFF, SUSPENDED, ENDED, CONVERTED, ARCHIVED"
                ),
                "statuses": fields::enum_list(
                    CampaignStatus::VALUES,
                    "Filter by campaign statuses: ACCEPTED, DRAFT, MODERATION, REJECTED"
                ),
                "types": fields::enum_list(CampaignType::VALUES, "Filter by campaign types"),
                "limit": fields::limit(MAX_PAGE_LIMIT, "Maximum number of campaigns to return"),
                "offset": fields::offset(),
                "response_format": fields::response_format()
            }),
        )
    }
}

/// Parameters for the campaign state changes (suspend, resume, archive,
/// unarchive, delete).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManageCampaignsParams {
    pub campaign_ids: Vec<i64>,
}

impl ToolParams for ManageCampaignsParams {
    fn input_schema() -> Value {
        fields::object(
            &["campaign_ids"],
            json!({
                "campaign_ids": fields::bounded_id_list(
                    "Campaign IDs to manage (max 10 per request)",
                    10
                )
            }),
        )
    }
}

/// Parameters for `direct_update_campaign`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCampaignParams {
    pub campaign_id: i64,
    pub name: Option<String>,
    pub daily_budget_amount: Option<f64>,
    pub daily_budget_mode: Option<DailyBudgetMode>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub negative_keywords: Option<Vec<String>>,
}

impl ToolParams for UpdateCampaignParams {
    fn input_schema() -> Value {
        fields::object(
            &["campaign_id"],
            json!({
                "campaign_id": fields::integer("Campaign ID to update"),
                "name": fields::bounded_string("New campaign name", None, 255),
                "daily_budget_amount": fields::money(
                    "Daily budget in currency units (will be converted to micros)"
                ),
                "daily_budget_mode": fields::string_enum(
                    DailyBudgetMode::VALUES,
                    None,
                    "Daily budget mode: STANDARD or DISTRIBUTED (default DISTRIBUTED)"
                ),
                "start_date": fields::date("Campaign start date (YYYY-MM-DD)"),
                "end_date": fields::date("Campaign end date (YYYY-MM-DD)"),
                "negative_keywords": fields::string_list("Campaign-level negative keywords")
            }),
        )
    }
}

// ---------------------------------------------------------------------------
// Ad groups
// ---------------------------------------------------------------------------

/// Parameters for `direct_get_adgroups`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetAdGroupsParams {
    pub campaign_ids: Option<Vec<i64>>,
    pub adgroup_ids: Option<Vec<i64>>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for GetAdGroupsParams {
    fn input_schema() -> Value {
        fields::object(
            &[],
            json!({
                "campaign_ids": fields::id_list("Filter by campaign IDs"),
                "adgroup_ids": fields::id_list("Filter by specific ad group IDs"),
                "limit": fields::limit(MAX_PAGE_LIMIT, "Maximum number of ad groups to return"),
                "offset": fields::offset(),
                "response_format": fields::response_format()
            }),
        )
    }
}

/// Parameters for `direct_create_adgroup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAdGroupParams {
    pub campaign_id: i64,
    pub name: String,
    pub region_ids: Vec<i64>,
    pub negative_keywords: Option<Vec<String>>,
}

impl ToolParams for CreateAdGroupParams {
    fn input_schema() -> Value {
        fields::object(
            &["campaign_id", "name", "region_ids"],
            json!({
                "campaign_id": fields::integer("Campaign ID to create ad group in"),
                "name": fields::bounded_string("Ad group name", Some(1), 255),
                "region_ids": {
                    "type": "array",
                    "items": { "type": "integer" },
                    "minItems": 1,
                    "description": "List of region IDs for targeting (e.g., 225 for Russia, 213 for Moscow)"
                },
                "negative_keywords": fields::string_list("Group-level negative keywords")
            }),
        )
    }
}

/// Parameters for `direct_update_adgroup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAdGroupParams {
    pub adgroup_id: i64,
    pub name: Option<String>,
    pub region_ids: Option<Vec<i64>>,
    pub negative_keywords: Option<Vec<String>>,
    pub tracking_params: Option<String>,
}

impl ToolParams for UpdateAdGroupParams {
    fn input_schema() -> Value {
        fields::object(
            &["adgroup_id"],
            json!({
                "adgroup_id": fields::integer("Ad group ID to update"),
                "name": fields::bounded_string("New ad group name", None, 255),
                "region_ids": {
                    "type": "array",
                    "items": { "type": "integer" },
                    "minItems": 1,
                    "description": "New list of region IDs for targeting"
                },
                "negative_keywords": fields::string_list("Group-level negative keywords"),
                "tracking_params": fields::string("Tracking parameters for all ads in group")
            }),
        )
    }
}

// ---------------------------------------------------------------------------
// Ads
// ---------------------------------------------------------------------------

/// Parameters for `direct_get_ads`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetAdsParams {
    pub campaign_ids: Option<Vec<i64>>,
    pub adgroup_ids: Option<Vec<i64>>,
    pub ad_ids: Option<Vec<i64>>,
    pub states: Option<Vec<AdState>>,
    pub statuses: Option<Vec<AdStatus>>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for GetAdsParams {
    fn input_schema() -> Value {
        fields::object(
            &[],
            json!({
                "campaign_ids": fields::id_list("Filter by campaign IDs"),
                "adgroup_ids": fields::id_list("Filter by ad group IDs"),
                "ad_ids": fields::id_list("Filter by specific ad IDs"),
                "states": fields::enum_list(AdState::VALUES, "Filter by ad states"),
                "statuses": fields::enum_list(AdStatus::VALUES, "Filter by ad statuses"),
                "limit": fields::limit(MAX_PAGE_LIMIT, "Maximum number of ads to return"),
                "offset": fields::offset(),
                "response_format": fields::response_format()
            }),
        )
    }
}

/// Parameters for `direct_create_text_ad`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTextAdParams {
    pub adgroup_id: i64,
    pub title: String,
    pub title2: Option<String>,
    pub text: String,
    pub href: String,
    #[serde(default)]
    pub mobile: bool,
}

impl ToolParams for CreateTextAdParams {
    fn input_schema() -> Value {
        fields::object(
            &["adgroup_id", "title", "text", "href"],
            json!({
                "adgroup_id": fields::integer("Ad group ID to create ad in"),
                "title": fields::bounded_string("Ad title (max 56 characters)", Some(1), 56),
                "title2": fields::bounded_string("Second title (max 30 characters)", None, 30),
                "text": fields::bounded_string("Ad text (max 81 characters)", Some(1), 81),
                "href": fields::string("Landing page URL"),
                "mobile": fields::boolean("Whether this is a mobile ad", Some(false))
            }),
        )
    }
}

/// Parameters for `direct_update_ad`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTextAdParams {
    pub ad_id: i64,
    pub title: Option<String>,
    pub title2: Option<String>,
    pub text: Option<String>,
    pub href: Option<String>,
}

impl ToolParams for UpdateTextAdParams {
    fn input_schema() -> Value {
        fields::object(
            &["ad_id"],
            json!({
                "ad_id": fields::integer("Ad ID to update"),
                "title": fields::bounded_string("New ad title (max 56 characters)", None, 56),
                "title2": fields::bounded_string("New second title (max 30 characters)", None, 30),
                "text": fields::bounded_string("New ad text (max 81 characters)", None, 81),
                "href": fields::string("New landing page URL")
            }),
        )
    }
}

/// Parameters for the ad state changes (moderate, suspend, resume, archive,
/// unarchive, delete).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManageAdsParams {
    pub ad_ids: Vec<i64>,
}

impl ToolParams for ManageAdsParams {
    fn input_schema() -> Value {
        fields::object(
            &["ad_ids"],
            json!({ "ad_ids": fields::bounded_id_list("Ad IDs to manage", 1000) }),
        )
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Parameters for `direct_get_keywords`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetKeywordsParams {
    pub campaign_ids: Option<Vec<i64>>,
    pub adgroup_ids: Option<Vec<i64>>,
    pub keyword_ids: Option<Vec<i64>>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for GetKeywordsParams {
    fn input_schema() -> Value {
        fields::object(
            &[],
            json!({
                "campaign_ids": fields::id_list("Filter by campaign IDs"),
                "adgroup_ids": fields::id_list("Filter by ad group IDs"),
                "keyword_ids": fields::id_list("Filter by specific keyword IDs"),
                "limit": fields::limit(MAX_PAGE_LIMIT, "Maximum number of keywords to return"),
                "offset": fields::offset(),
                "response_format": fields::response_format()
            }),
        )
    }
}

/// Parameters for `direct_add_keywords`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddKeywordsParams {
    pub adgroup_id: i64,
    pub keywords: Vec<String>,
    pub bid: Option<f64>,
}

impl ToolParams for AddKeywordsParams {
    fn input_schema() -> Value {
        fields::object(
            &["adgroup_id", "keywords"],
            json!({
                "adgroup_id": fields::integer("Ad group ID to add keywords to"),
                "keywords": {
                    "type": "array",
                    "items": { "type": "string", "minLength": 1 },
                    "minItems": 1,
                    "maxItems": 200,
                    "description": "List of keywords to add"
                },
                "bid": fields::money("Bid for all keywords in currency units")
            }),
        )
    }
}

/// One entry of `direct_set_keyword_bids`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordBid {
    pub keyword_id: i64,
    pub search_bid: Option<f64>,
    pub network_bid: Option<f64>,
}

/// Parameters for `direct_set_keyword_bids`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetKeywordBidsParams {
    pub keyword_bids: Vec<KeywordBid>,
}

impl ToolParams for SetKeywordBidsParams {
    fn input_schema() -> Value {
        fields::object(
            &["keyword_bids"],
            json!({
                "keyword_bids": {
                    "type": "array",
                    "minItems": 1,
                    "maxItems": 10000,
                    "items": fields::object(
                        &["keyword_id"],
                        json!({
                            "keyword_id": fields::integer("Keyword ID"),
                            "search_bid": fields::optional_money("Search bid in currency units"),
                            "network_bid": fields::optional_money("Network bid in currency units")
                        })
                    ),
                    "description": "List of keyword bid settings: [{'keyword_id': 123, 'search_bid': 1.5, 'network_bid': 0.5}]"
                }
            }),
        )
    }
}

/// Parameters for `direct_delete_keywords`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManageKeywordsParams {
    pub keyword_ids: Vec<i64>,
}

impl ToolParams for ManageKeywordsParams {
    fn input_schema() -> Value {
        fields::object(
            &["keyword_ids"],
            json!({ "keyword_ids": fields::bounded_id_list("Keyword IDs to manage", 10000) }),
        )
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

fn default_report_type() -> String {
    "CAMPAIGN_PERFORMANCE_REPORT".to_string()
}

fn default_report_fields() -> Vec<String> {
    ["CampaignName", "Impressions", "Clicks", "Cost"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Parameters for `direct_get_statistics`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectReportParams {
    #[serde(default = "default_report_type")]
    pub report_type: String,
    pub date_from: String,
    pub date_to: String,
    #[serde(default = "default_report_fields")]
    pub field_names: Vec<String>,
    pub campaign_ids: Option<Vec<i64>>,
    #[serde(default = "default_true")]
    pub include_vat: bool,
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl ToolParams for DirectReportParams {
    fn input_schema() -> Value {
        fields::object(
            &["date_from", "date_to"],
            json!({
                "report_type": {
                    "type": "string",
                    "default": "CAMPAIGN_PERFORMANCE_REPORT",
                    "description": "Report type: ACCOUNT_PERFORMANCE_REPORT, CAMPAIGN_PERFORMANCE_REPORT, AD_PERFORMANCE_REPORT, ADGROUP_PERFORMANCE_REPORT, CRITERIA_PERFORMANCE_REPORT, etc."
                },
                "date_from": fields::date("Report start date (YYYY-MM-DD)"),
                "date_to": fields::date("Report end date (YYYY-MM-DD)"),
                "field_names": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "default": ["CampaignName", "Impressions", "Clicks", "Cost"],
                    "description": "Fields to include in report"
                },
                "campaign_ids": fields::id_list("Filter by campaign IDs"),
                "include_vat": fields::boolean("Include VAT in cost values", Some(true)),
                "response_format": fields::response_format()
            }),
        )
    }
}
