//! Markdown views of Yandex Metrika counters, goals and reports.

use serde_json::Value;

use super::{dimensions_label, display, field, format_metric, truthy};

/// Rows shown in a markdown `stat/v1/data` report.
pub const REPORT_PREVIEW_ROWS: usize = 50;

/// Goals listed in the counter detail view.
const COUNTER_GOALS_SHOWN: usize = 10;

fn site(counter: &Value) -> String {
    display(counter.get("site2").and_then(|s| s.get("site")), "N/A")
}

fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|v| display(Some(v), "N/A")).collect())
        .unwrap_or_default()
}

pub fn counters(counters: &[Value]) -> String {
    if counters.is_empty() {
        return "No counters found.".to_string();
    }

    let mut lines = vec!["# Metrika Counters\n".to_string()];
    for counter in counters {
        lines.push(format!(
            "## {} (ID: {})",
            field(counter, "name", "Unnamed"),
            field(counter, "id", "N/A")
        ));
        lines.push(format!("- **Site**: {}", site(counter)));
        lines.push(format!("- **Status**: {}", field(counter, "status", "N/A")));
        lines.push(format!("- **Code Status**: {}", field(counter, "code_status", "N/A")));
        lines.push(format!("- **Owner**: {}", field(counter, "owner_login", "N/A")));
        if truthy(counter.get("favorite")) {
            lines.push("- **Favorite**: ⭐".to_string());
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn counter_detail(counter: &Value) -> String {
    let mut lines = vec![
        format!(
            "# Counter: {} (ID: {})",
            field(counter, "name", "Unnamed"),
            field(counter, "id", "N/A")
        ),
        "\n## Basic Info".to_string(),
        format!("- **Site**: {}", site(counter)),
        format!("- **Status**: {}", field(counter, "status", "N/A")),
        format!("- **Code Status**: {}", field(counter, "code_status", "N/A")),
        format!("- **Owner**: {}", field(counter, "owner_login", "N/A")),
        format!("- **Created**: {}", field(counter, "create_time", "N/A")),
    ];

    if let Some(webvisor) = counter.get("webvisor").filter(|w| truthy(Some(w))) {
        lines.push("\n## Webvisor".to_string());
        lines.push(format!("- **Version**: {}", field(webvisor, "wv_version", "N/A")));
        lines.push(format!("- **Enabled**: {}", truthy(webvisor.get("arch_enabled"))));
    }

    let goals = counter
        .get("goals")
        .and_then(Value::as_array)
        .filter(|g| !g.is_empty());
    if let Some(goals) = goals {
        lines.push(format!("\n## Goals ({})", goals.len()));
        for goal in goals.iter().take(COUNTER_GOALS_SHOWN) {
            lines.push(format!(
                "- {} (ID: {})",
                field(goal, "name", "Unnamed"),
                field(goal, "id", "N/A")
            ));
        }
    }

    lines.join("\n")
}

pub fn goals(counter_id: i64, goals: &[Value]) -> String {
    if goals.is_empty() {
        return "No goals configured for this counter.".to_string();
    }

    let mut lines = vec![format!("# Goals for Counter {counter_id}\n")];
    for goal in goals {
        lines.push(format!(
            "## {} (ID: {})",
            field(goal, "name", "Unnamed"),
            field(goal, "id", "N/A")
        ));
        lines.push(format!("- **Type**: {}", field(goal, "type", "N/A")));

        let conditions = goal
            .get("conditions")
            .and_then(Value::as_array)
            .filter(|c| !c.is_empty());
        if let Some(conditions) = conditions {
            lines.push("- **Conditions**:".to_string());
            for condition in conditions {
                let target = condition
                    .get("url")
                    .filter(|u| !u.is_null())
                    .or_else(|| condition.get("value"));
                lines.push(format!(
                    "  - {}: {}",
                    field(condition, "type", "N/A"),
                    display(target, "N/A")
                ));
            }
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Confirmation for a new counter, with the JavaScript tag to install.
pub fn counter_created(counter: &Value) -> String {
    let id = field(counter, "id", "N/A");
    let name = field(counter, "name", "N/A");
    let site = display(counter.get("site2").and_then(|s| s.get("site")), "N/A");

    format!(
        r#"Counter created successfully!

**ID**: {id}
**Name**: {name}
**Site**: {site}

Add this tracking code to your website:

```html
<!-- Yandex.Metrika counter -->
<script type="text/javascript">
   (function(m,e,t,r,i,k,a){{m[i]=m[i]||function(){{(m[i].a=m[i].a||[]).push(arguments)}};
   m[i].l=1*new Date();
   for (var j = 0; j < document.scripts.length; j++) {{if (document.scripts[j].src === r) {{ return; }}}}
   k=e.createElement(t),a=e.getElementsByTagName(t)[0],k.async=1,k.src=r,a.parentNode.insertBefore(k,a)}})
   (window, document, "script", "https://mc.yandex.ru/metrika/tag.js", "ym");

   ym({id}, "init", {{
        clickmap:true,
        trackLinks:true,
        accurateTrackBounce:true
   }});
</script>
```"#
    )
}

pub fn goal_created(goal: &Value) -> String {
    format!(
        "Goal created successfully!\n\n**ID**: {}\n**Name**: {}\n**Type**: {}",
        field(goal, "id", "N/A"),
        field(goal, "name", "N/A"),
        field(goal, "type", "N/A")
    )
}

/// `stat/v1/data` answer: query echo, totals, then up to 50 rows.
pub fn report(data: &Value) -> String {
    let query = data.get("query").cloned().unwrap_or(Value::Null);
    let metrics = strings(query.get("metrics"));
    let dimensions = strings(query.get("dimensions"));

    let mut lines = vec![
        "# Metrika Report\n".to_string(),
        "## Query Parameters".to_string(),
        format!(
            "- **Period**: {} — {}",
            field(&query, "date1", "N/A"),
            field(&query, "date2", "N/A")
        ),
    ];
    if !dimensions.is_empty() {
        lines.push(format!("- **Dimensions**: {}", dimensions.join(", ")));
    }
    if !metrics.is_empty() {
        lines.push(format!("- **Metrics**: {}", metrics.join(", ")));
    }
    lines.push(String::new());

    let totals = data
        .get("totals")
        .and_then(Value::as_array)
        .filter(|t| !t.is_empty());
    if let Some(totals) = totals {
        lines.push("## Totals".to_string());
        for (i, total) in totals.iter().enumerate() {
            let name = metrics
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Metric {}", i + 1));
            lines.push(format!("- **{name}**: {}", format_metric(total)));
        }
        lines.push(String::new());
    }

    let rows = data
        .get("data")
        .and_then(Value::as_array)
        .filter(|r| !r.is_empty());
    if let Some(rows) = rows {
        lines.push(format!("## Data ({} rows)", rows.len()));
        for row in rows.iter().take(REPORT_PREVIEW_ROWS) {
            let values = row
                .get("metrics")
                .and_then(Value::as_array)
                .map(|m| m.iter().map(format_metric).collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            lines.push(format!("- **{}**: {values}", dimensions_label(row)));
        }
        if rows.len() > REPORT_PREVIEW_ROWS {
            lines.push(format!("\n*...and {} more rows*", rows.len() - REPORT_PREVIEW_ROWS));
        }
    }

    lines.join("\n")
}

/// `stat/v1/data/bytime` answer: one section per dimension row, one line
/// per time interval.
pub fn report_by_time(data: &Value, group: &str) -> String {
    let query = data.get("query").cloned().unwrap_or(Value::Null);
    let mut lines = vec![
        "# Time-Based Report\n".to_string(),
        format!(
            "**Period**: {} — {}",
            field(&query, "date1", "N/A"),
            field(&query, "date2", "N/A")
        ),
        format!("**Grouping**: {group}\n"),
    ];

    let intervals: Vec<String> = data
        .get("time_intervals")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(interval_label).collect())
        .unwrap_or_default();

    let rows = data.get("data").and_then(Value::as_array);
    for row in rows.into_iter().flatten() {
        lines.push(format!("## {}", dimensions_label(row)));

        // One series per requested metric, each indexed by interval.
        let series: Vec<&Vec<Value>> = row
            .get("metrics")
            .and_then(Value::as_array)
            .map(|m| m.iter().filter_map(Value::as_array).collect())
            .unwrap_or_default();

        if !series.is_empty() {
            for (i, interval) in intervals.iter().enumerate() {
                let values = series
                    .iter()
                    .map(|s| s.get(i).map(format_metric).unwrap_or_else(|| "0.00".to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!("- {interval}: {values}"));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn interval_label(interval: &Value) -> String {
    match interval.as_array() {
        Some(bounds) => bounds
            .iter()
            .map(|b| display(Some(b), "N/A"))
            .collect::<Vec<_>>()
            .join(" — "),
        None => display(Some(interval), "N/A"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn counters_list_marks_favorites() {
        let out = counters(&[
            json!({
                "id": 101,
                "name": "Shop",
                "site2": { "site": "shop.example" },
                "status": "Active",
                "code_status": "CS_OK",
                "owner_login": "owner",
                "favorite": 1
            }),
            json!({ "id": 102, "name": "Blog", "favorite": 0 }),
        ]);

        assert!(out.contains("## Shop (ID: 101)\n- **Site**: shop.example"));
        assert!(out.contains("## Blog (ID: 102)\n- **Site**: N/A"));
        assert_eq!(out.matches("⭐").count(), 1);
    }

    #[test]
    fn counter_detail_limits_goals() {
        let goals: Vec<Value> = (1..=12).map(|i| json!({ "id": i, "name": format!("g{i}") })).collect();
        let out = counter_detail(&json!({
            "id": 5,
            "name": "Shop",
            "webvisor": { "wv_version": 2, "arch_enabled": 1 },
            "goals": goals
        }));

        assert!(out.starts_with("# Counter: Shop (ID: 5)\n\n## Basic Info"));
        assert!(out.contains("- **Version**: 2\n- **Enabled**: true"));
        assert!(out.contains("## Goals (12)"));
        assert!(out.contains("- g10 (ID: 10)"));
        assert!(!out.contains("- g11 (ID: 11)"));
    }

    #[test]
    fn goals_show_conditions() {
        let out = goals(
            5,
            &[json!({
                "id": 9,
                "name": "Thank you",
                "type": "url",
                "conditions": [{ "type": "exact", "url": "/thanks" }, { "type": "regexp", "value": "^/ok" }]
            })],
        );
        assert!(out.starts_with("# Goals for Counter 5\n"));
        assert!(out.contains("  - exact: /thanks"));
        assert!(out.contains("  - regexp: ^/ok"));
        assert_eq!(goals(5, &[]), "No goals configured for this counter.");
    }

    #[test]
    fn snippet_carries_counter_id() {
        let out = counter_created(&json!({ "id": 4242, "name": "Shop", "site2": { "site": "shop.example" } }));
        assert!(out.contains("**ID**: 4242"));
        assert!(out.contains("ym(4242, \"init\", {"));
        assert!(out.contains("https://mc.yandex.ru/metrika/tag.js"));
    }

    #[test]
    fn report_shows_totals_and_rows() {
        let out = report(&json!({
            "query": {
                "date1": "2024-01-01",
                "date2": "2024-01-07",
                "metrics": ["ym:s:visits", "ym:s:bounceRate"],
                "dimensions": ["ym:s:trafficSource"]
            },
            "totals": [1234.0, 41.5],
            "data": [
                { "dimensions": [{ "name": "Search engine traffic", "id": "organic" }], "metrics": [1000.0, 40.0] }
            ]
        }));

        assert!(out.contains("- **Period**: 2024-01-01 — 2024-01-07"));
        assert!(out.contains("- **Dimensions**: ym:s:trafficSource"));
        assert!(out.contains("- **ym:s:visits**: 1,234.00"));
        assert!(out.contains("- **ym:s:bounceRate**: 41.50"));
        assert!(out.contains("## Data (1 rows)\n- **Search engine traffic**: 1,000.00, 40.00"));
    }

    #[test]
    fn by_time_report_lists_intervals() {
        let out = report_by_time(
            &json!({
                "query": { "date1": "2024-01-01", "date2": "2024-01-02" },
                "time_intervals": [["2024-01-01", "2024-01-01"], ["2024-01-02", "2024-01-02"]],
                "data": [{ "dimensions": [], "metrics": [[10.0, 20.0]] }]
            }),
            "day",
        );

        assert!(out.contains("**Grouping**: day\n"));
        assert!(out.contains("## Total"));
        assert!(out.contains("- 2024-01-01 — 2024-01-01: 10.00"));
        assert!(out.contains("- 2024-01-02 — 2024-01-02: 20.00"));
    }
}
