//! The catalogue of tools advertised by `tools/list`.

use serde_json::{json, Value};

use crate::protocol::direct::{
    AddKeywordsParams, CreateAdGroupParams, CreateTextAdParams, DirectReportParams,
    GetAdGroupsParams, GetAdsParams, GetCampaignsParams, GetKeywordsParams, ManageAdsParams,
    ManageCampaignsParams, ManageKeywordsParams, SetKeywordBidsParams, UpdateAdGroupParams,
    UpdateCampaignParams, UpdateTextAdParams,
};
use crate::protocol::metrika::{
    CounterParams, CreateCounterParams, CreateGoalParams, DeleteCounterParams, DeleteGoalParams,
    GetCountersParams, MetrikaByTimeParams, MetrikaReportParams,
};
use crate::protocol::ToolParams;

/// MCP behaviour hints of a tool. `openWorldHint` is always false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolAnnotations {
    pub read_only: bool,
    pub destructive: bool,
    pub idempotent: bool,
}

const READ_ONLY: ToolAnnotations = ToolAnnotations {
    read_only: true,
    destructive: false,
    idempotent: true,
};

const REPEATABLE_CHANGE: ToolAnnotations = ToolAnnotations {
    read_only: false,
    destructive: false,
    idempotent: true,
};

const CREATE: ToolAnnotations = ToolAnnotations {
    read_only: false,
    destructive: false,
    idempotent: false,
};

const DELETE: ToolAnnotations = ToolAnnotations {
    read_only: false,
    destructive: true,
    idempotent: false,
};

const DELETE_BY_ID: ToolAnnotations = ToolAnnotations {
    read_only: false,
    destructive: true,
    idempotent: true,
};

#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub annotations: ToolAnnotations,
    pub input_schema: fn() -> Value,
}

impl ToolDescriptor {
    /// Entry of the `tools/list` result.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": (self.input_schema)(),
            "annotations": {
                "title": self.title,
                "readOnlyHint": self.annotations.read_only,
                "destructiveHint": self.annotations.destructive,
                "idempotentHint": self.annotations.idempotent,
                "openWorldHint": false
            }
        })
    }
}

pub static TOOLS: &[ToolDescriptor] = &[
    // Direct: campaigns
    ToolDescriptor {
        name: "direct_get_campaigns",
        title: "Get Yandex Direct Campaigns",
        description: "Get list of advertising campaigns from Yandex Direct with their settings, \
                      daily budget and statistics. Supports filtering by IDs, states, statuses and types.",
        annotations: READ_ONLY,
        input_schema: GetCampaignsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_suspend_campaigns",
        title: "Suspend Yandex Direct Campaigns",
        description: "Suspend (pause) advertising campaigns. Suspended campaigns stop showing ads \
                      but keep their settings and can be resumed with direct_resume_campaigns.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageCampaignsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_resume_campaigns",
        title: "Resume Yandex Direct Campaigns",
        description: "Resume suspended advertising campaigns so they start showing ads again.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageCampaignsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_archive_campaigns",
        title: "Archive Yandex Direct Campaigns",
        description: "Archive advertising campaigns. Archived campaigns are hidden from the main \
                      list but can be restored with direct_unarchive_campaigns.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageCampaignsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_unarchive_campaigns",
        title: "Unarchive Yandex Direct Campaigns",
        description: "Restore archived campaigns to the main campaign list.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageCampaignsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_delete_campaigns",
        title: "Delete Yandex Direct Campaigns",
        description: "Delete advertising campaigns permanently. WARNING: this cannot be undone; \
                      consider archiving instead.",
        annotations: DELETE,
        input_schema: ManageCampaignsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_update_campaign",
        title: "Update Yandex Direct Campaign",
        description: "Update campaign name, daily budget, dates or negative keywords. \
                      Only the given fields are changed.",
        annotations: REPEATABLE_CHANGE,
        input_schema: UpdateCampaignParams::input_schema,
    },
    // Direct: ad groups
    ToolDescriptor {
        name: "direct_get_adgroups",
        title: "Get Yandex Direct Ad Groups",
        description: "Get ad groups with their settings and region targeting.",
        annotations: READ_ONLY,
        input_schema: GetAdGroupsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_create_adgroup",
        title: "Create Yandex Direct Ad Group",
        description: "Create an ad group in a campaign with a name and targeting regions.",
        annotations: CREATE,
        input_schema: CreateAdGroupParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_update_adgroup",
        title: "Update Yandex Direct Ad Group",
        description: "Update ad group name, regions, negative keywords or tracking parameters. \
                      Only the given fields are changed.",
        annotations: REPEATABLE_CHANGE,
        input_schema: UpdateAdGroupParams::input_schema,
    },
    // Direct: ads
    ToolDescriptor {
        name: "direct_get_ads",
        title: "Get Yandex Direct Ads",
        description: "Get ads with their text content and moderation status.",
        annotations: READ_ONLY,
        input_schema: GetAdsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_create_text_ad",
        title: "Create Yandex Direct Text Ad",
        description: "Create a text ad in an ad group. The ad stays in DRAFT until submitted \
                      with direct_moderate_ads.",
        annotations: CREATE,
        input_schema: CreateTextAdParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_update_ad",
        title: "Update Yandex Direct Ad",
        description: "Update ad title, text or landing page URL. Only the given fields are \
                      changed; the ad has to be moderated again afterwards.",
        annotations: REPEATABLE_CHANGE,
        input_schema: UpdateTextAdParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_moderate_ads",
        title: "Submit Ads for Moderation",
        description: "Send DRAFT ads to Yandex moderators for review.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageAdsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_suspend_ads",
        title: "Suspend Yandex Direct Ads",
        description: "Suspend (pause) ads.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageAdsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_resume_ads",
        title: "Resume Yandex Direct Ads",
        description: "Resume suspended ads.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageAdsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_archive_ads",
        title: "Archive Yandex Direct Ads",
        description: "Archive ads. Archived ads are hidden from the main list but can be restored.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageAdsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_unarchive_ads",
        title: "Unarchive Yandex Direct Ads",
        description: "Restore archived ads to the main ad list.",
        annotations: REPEATABLE_CHANGE,
        input_schema: ManageAdsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_delete_ads",
        title: "Delete Yandex Direct Ads",
        description: "Delete ads permanently. WARNING: this cannot be undone; consider archiving instead.",
        annotations: DELETE,
        input_schema: ManageAdsParams::input_schema,
    },
    // Direct: keywords
    ToolDescriptor {
        name: "direct_get_keywords",
        title: "Get Yandex Direct Keywords",
        description: "Get keywords with their bids and status.",
        annotations: READ_ONLY,
        input_schema: GetKeywordsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_add_keywords",
        title: "Add Keywords to Yandex Direct",
        description: "Add keywords to an ad group, optionally with one bid for all of them.",
        annotations: CREATE,
        input_schema: AddKeywordsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_set_keyword_bids",
        title: "Set Keyword Bids",
        description: "Set search and/or network bids for keywords.",
        annotations: REPEATABLE_CHANGE,
        input_schema: SetKeywordBidsParams::input_schema,
    },
    ToolDescriptor {
        name: "direct_delete_keywords",
        title: "Delete Yandex Direct Keywords",
        description: "Delete keywords permanently. WARNING: this cannot be undone.",
        annotations: DELETE,
        input_schema: ManageKeywordsParams::input_schema,
    },
    // Direct: reports
    ToolDescriptor {
        name: "direct_get_statistics",
        title: "Get Yandex Direct Statistics",
        description: "Get performance statistics for a date range. Report types include \
                      ACCOUNT_PERFORMANCE_REPORT, CAMPAIGN_PERFORMANCE_REPORT (default), \
                      AD_PERFORMANCE_REPORT, ADGROUP_PERFORMANCE_REPORT and CRITERIA_PERFORMANCE_REPORT. \
                      Common fields: CampaignName, CampaignId, Impressions, Clicks, Cost, Ctr, AvgCpc, \
                      ConversionRate, Date.",
        annotations: READ_ONLY,
        input_schema: DirectReportParams::input_schema,
    },
    // Metrika: management
    ToolDescriptor {
        name: "metrika_get_counters",
        title: "Get Yandex Metrika Counters",
        description: "Get all Metrika counters accessible to the user.",
        annotations: READ_ONLY,
        input_schema: GetCountersParams::input_schema,
    },
    ToolDescriptor {
        name: "metrika_get_counter",
        title: "Get Yandex Metrika Counter Details",
        description: "Get full counter settings including code status, webvisor and goals.",
        annotations: READ_ONLY,
        input_schema: CounterParams::input_schema,
    },
    ToolDescriptor {
        name: "metrika_create_counter",
        title: "Create Yandex Metrika Counter",
        description: "Create a counter for a website and return its ID with the tracking code.",
        annotations: CREATE,
        input_schema: CreateCounterParams::input_schema,
    },
    ToolDescriptor {
        name: "metrika_delete_counter",
        title: "Delete Yandex Metrika Counter",
        description: "Delete a counter. WARNING: this cannot be undone and all collected data is lost.",
        annotations: DELETE_BY_ID,
        input_schema: DeleteCounterParams::input_schema,
    },
    ToolDescriptor {
        name: "metrika_get_goals",
        title: "Get Yandex Metrika Goals",
        description: "Get the conversion goals configured for a counter.",
        annotations: READ_ONLY,
        input_schema: CounterParams::input_schema,
    },
    ToolDescriptor {
        name: "metrika_create_goal",
        title: "Create Yandex Metrika Goal",
        description: "Create a conversion goal (page visit, action, phone click, etc.) on a counter.",
        annotations: CREATE,
        input_schema: CreateGoalParams::input_schema,
    },
    ToolDescriptor {
        name: "metrika_delete_goal",
        title: "Delete Yandex Metrika Goal",
        description: "Delete a goal from a counter. WARNING: this cannot be undone.",
        annotations: DELETE_BY_ID,
        input_schema: DeleteGoalParams::input_schema,
    },
    // Metrika: statistics
    ToolDescriptor {
        name: "metrika_get_report",
        title: "Get Yandex Metrika Statistics Report",
        description: "Get traffic statistics with custom metrics and dimensions. Common metrics: \
                      ym:s:visits, ym:s:users, ym:s:pageviews, ym:s:bounceRate, \
                      ym:s:avgVisitDurationSeconds. Common dimensions: ym:s:date, ym:s:trafficSource, \
                      ym:s:searchEngine, ym:s:regionCountry, ym:s:deviceCategory.",
        annotations: READ_ONLY,
        input_schema: MetrikaReportParams::input_schema,
    },
    ToolDescriptor {
        name: "metrika_get_report_by_time",
        title: "Get Yandex Metrika Time-Based Report",
        description: "Get statistics grouped by time periods (day, week, month, quarter, year, \
                      hour, minute) for trends and charts.",
        annotations: READ_ONLY,
        input_schema: MetrikaByTimeParams::input_schema,
    },
];

pub fn find(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// Result of `tools/list`.
pub fn tools_list() -> Value {
    json!({ "tools": TOOLS.iter().map(ToolDescriptor::to_json).collect::<Vec<_>>() })
}
