//! Markdown views of Yandex Direct objects and reports.

use serde_json::{json, Map, Value};

use super::{display, field, micros_to_units};

/// Rows shown in a markdown statistics table.
pub const STATISTICS_PREVIEW_ROWS: usize = 100;

pub fn campaigns(campaigns: &[Value]) -> String {
    if campaigns.is_empty() {
        return "No campaigns found.".to_string();
    }

    let mut lines = vec!["# Campaigns\n".to_string()];
    for campaign in campaigns {
        lines.push(format!(
            "## {} (ID: {})",
            field(campaign, "Name", "Unnamed"),
            field(campaign, "Id", "N/A")
        ));
        lines.push(format!("- **Type**: {}", field(campaign, "Type", "N/A")));
        lines.push(format!("- **State**: {}", field(campaign, "State", "N/A")));
        lines.push(format!("- **Status**: {}", field(campaign, "Status", "N/A")));

        if let Some(budget) = campaign.get("DailyBudget").filter(|b| is_present(b)) {
            let amount = budget.get("Amount").and_then(Value::as_f64).unwrap_or(0.0);
            lines.push(format!(
                "- **Daily Budget**: {:.2} ({})",
                micros_to_units(amount),
                field(budget, "Mode", "N/A")
            ));
        }

        if let Some(stats) = campaign.get("Statistics").filter(|s| is_present(s)) {
            lines.push(format!("- **Clicks**: {}", field(stats, "Clicks", "0")));
            lines.push(format!("- **Impressions**: {}", field(stats, "Impressions", "0")));
        }

        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn ad_groups(groups: &[Value]) -> String {
    if groups.is_empty() {
        return "No ad groups found.".to_string();
    }

    let mut lines = vec!["# Ad Groups\n".to_string()];
    for group in groups {
        lines.push(format!(
            "## {} (ID: {})",
            field(group, "Name", "Unnamed"),
            field(group, "Id", "N/A")
        ));
        lines.push(format!("- **Campaign ID**: {}", field(group, "CampaignId", "N/A")));
        lines.push(format!("- **Type**: {}", field(group, "Type", "N/A")));
        lines.push(format!("- **Status**: {}", field(group, "Status", "N/A")));

        let regions = group
            .get("RegionIds")
            .and_then(Value::as_array)
            .filter(|r| !r.is_empty());
        if let Some(regions) = regions {
            let joined = regions
                .iter()
                .map(|r| display(Some(r), "?"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("- **Regions**: {joined}"));
        }

        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn ads(ads: &[Value]) -> String {
    if ads.is_empty() {
        return "No ads found.".to_string();
    }

    let mut lines = vec!["# Ads\n".to_string()];
    for ad in ads {
        lines.push(format!("## Ad ID: {}", field(ad, "Id", "N/A")));
        lines.push(format!("- **AdGroup ID**: {}", field(ad, "AdGroupId", "N/A")));
        lines.push(format!("- **Campaign ID**: {}", field(ad, "CampaignId", "N/A")));
        lines.push(format!("- **State**: {}", field(ad, "State", "N/A")));
        lines.push(format!("- **Status**: {}", field(ad, "Status", "N/A")));

        if let Some(text_ad) = ad.get("TextAd").filter(|t| is_present(t)) {
            lines.push(format!("- **Title**: {}", field(text_ad, "Title", "N/A")));
            lines.push(format!("- **Title2**: {}", field(text_ad, "Title2", "N/A")));
            lines.push(format!("- **Text**: {}", field(text_ad, "Text", "N/A")));
            lines.push(format!("- **Href**: {}", field(text_ad, "Href", "N/A")));
        }

        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn keywords(keywords: &[Value]) -> String {
    if keywords.is_empty() {
        return "No keywords found.".to_string();
    }

    let mut lines = vec!["# Keywords\n".to_string()];
    for keyword in keywords {
        lines.push(format!(
            "## {} (ID: {})",
            field(keyword, "Keyword", "N/A"),
            field(keyword, "Id", "N/A")
        ));
        lines.push(format!("- **AdGroup ID**: {}", field(keyword, "AdGroupId", "N/A")));
        lines.push(format!("- **State**: {}", field(keyword, "State", "N/A")));
        lines.push(format!("- **Status**: {}", field(keyword, "Status", "N/A")));

        let bid = keyword.get("Bid").and_then(Value::as_f64).unwrap_or(0.0);
        if bid != 0.0 {
            lines.push(format!("- **Bid**: {:.2}", micros_to_units(bid)));
        }

        lines.push(String::new());
    }
    lines.join("\n")
}

/// A Direct TSV report: one header line, then data lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatisticsTable {
    /// Parse the report body. `None` when it has no data line.
    pub fn parse(tsv: &str) -> Option<Self> {
        let mut lines = tsv.trim().lines();
        let header: Vec<String> = lines.next()?.split('\t').map(str::to_string).collect();

        let rows: Vec<Vec<String>> = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect();

        if rows.is_empty() {
            return None;
        }
        Some(Self { header, rows })
    }

    /// `{"data": [{column: value}], "total": n}`.
    pub fn to_json(&self) -> Value {
        let data: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .header
                    .iter()
                    .zip(row)
                    .map(|(column, value)| (column.clone(), Value::String(value.clone())))
                    .collect();
                Value::Object(record)
            })
            .collect();
        json!({ "total": data.len(), "data": data })
    }

    pub fn to_markdown(&self, date_from: &str, date_to: &str, report_type: &str) -> String {
        let mut lines = vec![
            "# Direct Statistics Report\n".to_string(),
            format!("**Period**: {date_from} — {date_to}"),
            format!("**Report type**: {report_type}\n"),
            format!("| {} |", self.header.join(" | ")),
            format!("| {} |", vec!["---"; self.header.len()].join(" | ")),
        ];

        for row in self.rows.iter().take(STATISTICS_PREVIEW_ROWS) {
            lines.push(format!("| {} |", row.join(" | ")));
        }

        if self.rows.len() > STATISTICS_PREVIEW_ROWS {
            lines.push(format!(
                "\n*...and {} more rows*",
                self.rows.len() - STATISTICS_PREVIEW_ROWS
            ));
        }
        lines.join("\n")
    }
}

/// Present and not empty, the way Direct omits optional sub-objects.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(o) => !o.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_budget_is_shown_in_units() {
        let out = campaigns(&[json!({
            "Id": 7,
            "Name": "Spring sale",
            "Type": "TEXT_CAMPAIGN",
            "State": "ON",
            "Status": "ACCEPTED",
            "DailyBudget": { "Amount": 1_500_000_000u64, "Mode": "STANDARD" },
            "Statistics": { "Clicks": 12, "Impressions": 340 }
        })]);

        assert!(out.starts_with("# Campaigns\n"));
        assert!(out.contains("## Spring sale (ID: 7)"));
        assert!(out.contains("- **Daily Budget**: 1500.00 (STANDARD)"));
        assert!(out.contains("- **Clicks**: 12"));
        assert!(out.contains("- **Impressions**: 340"));
    }

    #[test]
    fn empty_lists_have_friendly_text() {
        assert_eq!(campaigns(&[]), "No campaigns found.");
        assert_eq!(ad_groups(&[]), "No ad groups found.");
        assert_eq!(ads(&[]), "No ads found.");
        assert_eq!(keywords(&[]), "No keywords found.");
    }

    #[test]
    fn keyword_bid_hidden_when_zero() {
        let out = keywords(&[
            json!({ "Id": 1, "Keyword": "buy shoes", "AdGroupId": 5, "Bid": 2_500_000 }),
            json!({ "Id": 2, "Keyword": "shoes", "AdGroupId": 5, "Bid": 0 }),
        ]);
        assert!(out.contains("## buy shoes (ID: 1)\n- **AdGroup ID**: 5"));
        assert!(out.contains("- **Bid**: 2.50"));
        assert_eq!(out.matches("**Bid**").count(), 1);
    }

    #[test]
    fn ad_group_regions_are_joined() {
        let out = ad_groups(&[json!({ "Id": 3, "Name": "Moscow", "CampaignId": 7, "RegionIds": [213, 1] })]);
        assert!(out.contains("- **Regions**: 213, 1"));
    }

    #[test]
    fn tsv_without_rows_is_no_data() {
        assert!(StatisticsTable::parse("").is_none());
        assert!(StatisticsTable::parse("CampaignName\tClicks\n").is_none());
    }

    #[test]
    fn tsv_renders_table_and_json() {
        let table = StatisticsTable::parse("CampaignName\tClicks\nSpring\t10\nAutumn\t4\n").unwrap();
        assert_eq!(table.rows.len(), 2);

        let md = table.to_markdown("2024-01-01", "2024-01-31", "CAMPAIGN_PERFORMANCE_REPORT");
        assert!(md.contains("| CampaignName | Clicks |\n| --- | --- |\n| Spring | 10 |"));
        assert!(md.contains("**Report type**: CAMPAIGN_PERFORMANCE_REPORT"));

        let data = table.to_json();
        assert_eq!(data["total"], 2);
        assert_eq!(data["data"][1]["CampaignName"], "Autumn");
        assert_eq!(data["data"][1]["Clicks"], "4");
    }

    #[test]
    fn long_reports_are_truncated() {
        let mut tsv = String::from("Date\tClicks\n");
        for day in 0..105 {
            tsv.push_str(&format!("d{day}\t{day}\n"));
        }
        let md = StatisticsTable::parse(&tsv).unwrap().to_markdown("a", "b", "R");
        assert!(md.contains("| d99 | 99 |"));
        assert!(!md.contains("| d100 |"));
        assert!(md.ends_with("*...and 5 more rows*"));
    }
}
