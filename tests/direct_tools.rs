//! Yandex Direct tools against a mock Direct API.

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{call, client_for, client_with, direct_path, test_config, TOKEN};

#[tokio::test]
async fn get_campaigns_sends_expected_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("campaigns")))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("Accept-Language", "ru"))
        .and(body_json(json!({
            "method": "get",
            "params": {
                "SelectionCriteria": { "Ids": [7], "States": ["ON", "SUSPENDED"] },
                "FieldNames": [
                    "Id", "Name", "Type", "State", "Status", "StatusPayment",
                    "StartDate", "EndDate", "DailyBudget", "Statistics"
                ],
                "TextCampaignFieldNames": ["BiddingStrategy", "Settings"],
                "Page": { "Limit": 20, "Offset": 40 }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "Campaigns": [{
                    "Id": 7,
                    "Name": "Spring sale",
                    "Type": "TEXT_CAMPAIGN",
                    "State": "ON",
                    "Status": "ACCEPTED",
                    "DailyBudget": { "Amount": 500_000_000, "Mode": "STANDARD" }
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_get_campaigns",
        json!({ "campaign_ids": [7], "states": ["ON", "SUSPENDED"], "limit": 20, "offset": 40 }),
    )
    .await;

    assert!(!result.is_error, "{}", result.first_text());
    let text = result.first_text();
    assert!(text.starts_with("# Campaigns"));
    assert!(text.contains("## Spring sale (ID: 7)"));
    assert!(text.contains("- **Daily Budget**: 500.00 (STANDARD)"));
}

#[tokio::test]
async fn get_campaigns_json_format_wraps_list_with_total() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("campaigns")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "Campaigns": [{ "Id": 1, "Name": "Весна" }, { "Id": 2, "Name": "Лето" }] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(&client, "direct_get_campaigns", json!({ "response_format": "json" })).await;

    let value: serde_json::Value = serde_json::from_str(result.first_text()).unwrap();
    assert_eq!(value["total"], 2);
    assert_eq!(value["campaigns"][0]["Name"], "Весна");
    assert!(result.first_text().contains("Лето"), "non-ASCII text must not be escaped");
}

#[tokio::test]
async fn client_login_header_is_sent_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("adgroups")))
        .and(header("Client-Login", "agency-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "AdGroups": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.client_login = Some("agency-client".to_string());
    let client = client_with(config);

    let result = call(&client, "direct_get_adgroups", json!({ "campaign_ids": [7] })).await;
    assert_eq!(result.first_text(), "No ad groups found.");
}

#[tokio::test]
async fn client_login_header_is_omitted_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("keywords")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "Keywords": [] } })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    call(&client, "direct_get_keywords", json!({})).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("Client-Login").is_none());
}

#[tokio::test]
async fn service_token_wins_over_unified_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("ads")))
        .and(header("Authorization", "Bearer direct-only"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": { "Ads": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.direct_token = Some("direct-only".to_string());
    let client = client_with(config);

    let result = call(&client, "direct_get_ads", json!({})).await;
    assert_eq!(result.first_text(), "No ads found.");
}

#[tokio::test]
async fn missing_token_fails_without_calling_the_api() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.unified_token = None;
    config.metrika_token = Some("metrika-only".to_string());
    let client = client_with(config);

    let result = call(&client, "direct_get_campaigns", json!({})).await;
    assert!(result.is_error);
    assert_eq!(
        result.first_text(),
        "Configuration Error: Yandex Direct API token not configured. \
         Set YANDEX_DIRECT_TOKEN or YANDEX_TOKEN environment variable."
    );
}

#[tokio::test]
async fn error_body_with_http_200_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("campaigns")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {
                "request_id": "8f3c",
                "error_code": 53,
                "error_string": "Authorization error",
                "error_detail": "Invalid OAuth token"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(&client, "direct_get_campaigns", json!({})).await;

    assert!(result.is_error);
    assert_eq!(result.first_text(), "API Error (53): Authorization error. Invalid OAuth token");
}

#[tokio::test]
async fn http_error_without_explanation_uses_status_hint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("ads")))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(&client, "direct_get_ads", json!({})).await;

    assert!(result.is_error);
    assert_eq!(result.first_text(), "API Error: Service unavailable. Try again later.");
}

#[tokio::test]
async fn slow_api_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("campaigns")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": { "Campaigns": [] } }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.request_timeout = Duration::from_secs(1);
    let client = client_with(config);

    let result = call(&client, "direct_get_campaigns", json!({})).await;
    assert!(result.is_error);
    assert_eq!(
        result.first_text(),
        "Request timed out. The operation may still complete on the server."
    );
}

#[tokio::test]
async fn suspend_campaigns_reports_partial_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("campaigns")))
        .and(body_json(json!({
            "method": "suspend",
            "params": { "SelectionCriteria": { "Ids": [1, 2] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "SuspendResults": [
                    { "Id": 1 },
                    { "Id": 2, "Errors": [{ "Code": 8300, "Message": "Campaign is archived" }] }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(&client, "direct_suspend_campaigns", json!({ "campaign_ids": [1, 2] })).await;

    assert!(!result.is_error);
    assert_eq!(
        result.first_text(),
        "Successfully suspended 1 campaign(s).\n\nErrors:\n- ID 2: Campaign is archived"
    );
}

#[tokio::test]
async fn delete_ads_where_every_item_failed_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("ads")))
        .and(body_partial_json(json!({ "method": "delete" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "DeleteResults": [{ "Errors": [{ "Code": 8800, "Message": "Object not found" }] }]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(&client, "direct_delete_ads", json!({ "ad_ids": [404] })).await;

    assert!(result.is_error);
    assert!(result.first_text().starts_with("Successfully deleted 0 ad(s)."));
    assert!(result.first_text().contains("- ID ?: Object not found"));
}

#[tokio::test]
async fn moderate_ads_uses_moderation_wording() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("ads")))
        .and(body_partial_json(json!({ "method": "moderate" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "ModerateResults": [{ "Id": 10 }, { "Id": 11 }] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(&client, "direct_moderate_ads", json!({ "ad_ids": [10, 11] })).await;
    assert_eq!(result.first_text(), "Successfully submitted 2 ad(s) for moderation.");
}

#[tokio::test]
async fn update_campaign_converts_budget_to_micros() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("campaigns")))
        .and(body_json(json!({
            "method": "update",
            "params": {
                "Campaigns": [{
                    "Id": 7,
                    "DailyBudget": { "Amount": 2_300_000, "Mode": "STANDARD" },
                    "EndDate": "2024-12-31"
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "UpdateResults": [{ "Id": 7 }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_update_campaign",
        json!({
            "campaign_id": 7,
            "daily_budget_amount": 2.3,
            "daily_budget_mode": "STANDARD",
            "end_date": "2024-12-31"
        }),
    )
    .await;

    assert_eq!(result.first_text(), "Campaign 7 updated successfully.");
}

#[tokio::test]
async fn update_ad_reports_warnings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("ads")))
        .and(body_json(json!({
            "method": "update",
            "params": { "Ads": [{ "Id": 5, "TextAd": { "Text": "Now cheaper" } }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "UpdateResults": [{ "Id": 5, "Warnings": [{ "Message": "Text was shortened" }] }] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(&client, "direct_update_ad", json!({ "ad_id": 5, "text": " Now cheaper " })).await;

    assert!(!result.is_error);
    assert_eq!(
        result.first_text(),
        "Update completed with issues:\n- Warning: Text was shortened"
    );
}

#[tokio::test]
async fn create_adgroup_returns_new_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("adgroups")))
        .and(body_json(json!({
            "method": "add",
            "params": {
                "AdGroups": [{
                    "Name": "Moscow",
                    "CampaignId": 7,
                    "RegionIds": [213],
                    "NegativeKeywords": { "Items": ["free"] }
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "AddResults": [{ "Id": 9001 }] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_create_adgroup",
        json!({ "campaign_id": 7, "name": "Moscow", "region_ids": [213], "negative_keywords": ["free"] }),
    )
    .await;

    assert_eq!(result.first_text(), "Ad group created successfully. ID: 9001");
}

#[tokio::test]
async fn create_text_ad_failure_lists_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("ads")))
        .and(body_json(json!({
            "method": "add",
            "params": {
                "Ads": [{
                    "AdGroupId": 9001,
                    "TextAd": {
                        "Title": "Shoes",
                        "Text": "Fresh shoes every day",
                        "Href": "https://shop.example",
                        "Mobile": "NO"
                    }
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "AddResults": [{ "Errors": [{ "Code": 5004, "Message": "Invalid link" }] }] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_create_text_ad",
        json!({
            "adgroup_id": 9001,
            "title": "Shoes",
            "text": "Fresh shoes every day",
            "href": "https://shop.example"
        }),
    )
    .await;

    assert!(result.is_error);
    assert_eq!(result.first_text(), "Failed to create ad:\n- Invalid link");
}

#[tokio::test]
async fn add_keywords_sends_bid_in_micros() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("keywords")))
        .and(body_json(json!({
            "method": "add",
            "params": {
                "Keywords": [
                    { "Keyword": "buy shoes", "AdGroupId": 9001, "Bid": 12_500_000 },
                    { "Keyword": "shoes sale", "AdGroupId": 9001, "Bid": 12_500_000 }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "AddResults": [
                    { "Id": 31 },
                    { "Errors": [{ "Code": 6000, "Message": "Duplicate keyword" }] }
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_add_keywords",
        json!({ "adgroup_id": 9001, "keywords": ["buy shoes", "shoes sale"], "bid": 12.5 }),
    )
    .await;

    assert!(!result.is_error);
    assert_eq!(
        result.first_text(),
        "Successfully added 1 keyword(s).\nIDs: 31\n\nErrors:\n- Duplicate keyword"
    );
}

#[tokio::test]
async fn set_keyword_bids_uses_keywordbids_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("keywordbids")))
        .and(body_json(json!({
            "method": "set",
            "params": {
                "KeywordBids": [
                    { "KeywordId": 31, "SearchBid": 1_500_000, "NetworkBid": 500_000 },
                    { "KeywordId": 32, "SearchBid": 2_000_000 }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "SetResults": [{ "KeywordId": 31 }, { "KeywordId": 32 }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_set_keyword_bids",
        json!({
            "keyword_bids": [
                { "keyword_id": 31, "search_bid": 1.5, "network_bid": 0.5 },
                { "keyword_id": 32, "search_bid": 2.0 }
            ]
        }),
    )
    .await;

    assert_eq!(result.first_text(), "Successfully updated bids for 2 keyword(s).");
}

#[tokio::test]
async fn set_keyword_bids_treats_null_bids_as_absent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("keywordbids")))
        .and(body_json(json!({
            "method": "set",
            "params": { "KeywordBids": [{ "KeywordId": 31, "NetworkBid": 750_000 }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "SetResults": [{ "KeywordId": 31 }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_set_keyword_bids",
        json!({ "keyword_bids": [{ "keyword_id": 31, "search_bid": null, "network_bid": 0.75 }] }),
    )
    .await;

    assert!(!result.is_error, "{}", result.first_text());
    assert_eq!(result.first_text(), "Successfully updated bids for 1 keyword(s).");
}

#[tokio::test]
async fn statistics_report_is_rendered_as_table() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("reports")))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("processingMode", "auto"))
        .and(header("returnMoneyInMicros", "false"))
        .and(header("skipReportHeader", "true"))
        .and(header("skipColumnHeader", "false"))
        .and(header("skipReportSummary", "true"))
        .and(body_partial_json(json!({
            "params": {
                "SelectionCriteria": {
                    "DateFrom": "2024-01-01",
                    "DateTo": "2024-01-31",
                    "Filter": [{ "Field": "CampaignId", "Operator": "IN", "Values": ["7"] }]
                },
                "ReportType": "CAMPAIGN_PERFORMANCE_REPORT",
                "DateRangeType": "CUSTOM_DATE",
                "Format": "TSV",
                "IncludeVAT": "YES",
                "IncludeDiscount": "NO"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("CampaignName\tImpressions\tClicks\tCost\nSpring sale\t1200\t34\t512.40\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_get_statistics",
        json!({ "date_from": "2024-01-01", "date_to": "2024-01-31", "campaign_ids": [7] }),
    )
    .await;

    assert!(!result.is_error, "{}", result.first_text());
    let text = result.first_text();
    assert!(text.starts_with("# Direct Statistics Report"));
    assert!(text.contains("| CampaignName | Impressions | Clicks | Cost |"));
    assert!(text.contains("| Spring sale | 1200 | 34 | 512.40 |"));
}

#[tokio::test]
async fn statistics_json_maps_columns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("reports")))
        .respond_with(ResponseTemplate::new(200).set_body_string("Date\tClicks\n2024-01-01\t5\n2024-01-02\t8\n"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_get_statistics",
        json!({
            "date_from": "2024-01-01",
            "date_to": "2024-01-02",
            "field_names": ["Date", "Clicks"],
            "response_format": "json"
        }),
    )
    .await;

    let value: serde_json::Value = serde_json::from_str(result.first_text()).unwrap();
    assert_eq!(value["total"], 2);
    assert_eq!(value["data"][1], json!({ "Date": "2024-01-02", "Clicks": "8" }));
}

#[tokio::test]
async fn statistics_queued_report_asks_to_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("reports")))
        .respond_with(ResponseTemplate::new(201).insert_header("retryIn", "15"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_get_statistics",
        json!({ "date_from": "2024-01-01", "date_to": "2024-01-31" }),
    )
    .await;

    assert!(!result.is_error);
    assert_eq!(
        result.first_text(),
        "Report is being generated. Please try again in 15 seconds."
    );
}

#[tokio::test]
async fn statistics_without_rows_is_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("reports")))
        .respond_with(ResponseTemplate::new(200).set_body_string("CampaignName\tClicks\n"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_get_statistics",
        json!({ "date_from": "2024-01-01", "date_to": "2024-01-31" }),
    )
    .await;

    assert_eq!(result.first_text(), "No data found for the specified period.");
}

#[tokio::test]
async fn statistics_error_body_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(direct_path("reports")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "error_code": 4000,
                "error_string": "Invalid request parameters",
                "error_detail": "Field Foo is not supported"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = call(
        &client,
        "direct_get_statistics",
        json!({ "date_from": "2024-01-01", "date_to": "2024-01-31", "field_names": ["Foo"] }),
    )
    .await;

    assert!(result.is_error);
    assert_eq!(
        result.first_text(),
        "API Error (400): Invalid request parameters. Field Foo is not supported"
    );
}
