// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Assistant mode: POST {"question"} -> {answer, articles, confidence}

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use std::sync::Arc;

use super::common::*;
use wiki_answer_proxy::api::APOLOGY_ANSWER;
use wiki_answer_proxy::api::search::NO_RESULTS_ANSWER;
use wiki_answer_proxy::search::{Article, SearchError};
use wiki_answer_proxy::summary::GenerationError;

fn expense_pages() -> serde_json::Value {
    results(vec![
        page(
            "Travel Expenses",
            "HR",
            "<p>Book travel through the portal.</p>",
            "/spaces/HR/pages/2",
        ),
        page(
            "Expense Policy",
            PREFERRED_SPACE,
            "<h1>Expenses</h1><p>Submit receipts within&nbsp;30 days.</p>",
            "/spaces/OPS/pages/1",
        ),
    ])
}

fn expense_articles() -> Vec<Article> {
    vec![
        Article {
            title: "Expense Policy".to_string(),
            space_name: PREFERRED_SPACE.to_string(),
            html_body: "<h1>Expenses</h1><p>Submit receipts within&nbsp;30 days.</p>".to_string(),
            web_path: "/spaces/OPS/pages/1".to_string(),
        },
        Article {
            title: "Travel Expenses".to_string(),
            space_name: "HR".to_string(),
            html_body: "<p>Book travel through the portal.</p>".to_string(),
            web_path: "/spaces/HR/pages/2".to_string(),
        },
    ]
}

#[tokio::test]
async fn test_expense_policy_ranks_preferred_space_first() {
    let mut wiki = mock_wiki();
    wiki.expect_search()
        .times(1)
        .withf(|creds, cql, limit| {
            creds.domain == DOMAIN
                && cql.to_string() == r#"text ~ "expense policy""#
                && *limit == 10
        })
        .returning(|_, _, _| Ok(expense_pages()));

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let (status, headers, body) = send(app, post_json(r#"{"question": "expense policy"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=300");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["confidence"], "high");

    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["title"], "Expense Policy");
    assert_eq!(articles[0]["space"], PREFERRED_SPACE);
    assert_eq!(
        articles[0]["url"],
        "https://acme.atlassian.net/wiki/spaces/OPS/pages/1"
    );
    assert_eq!(articles[0]["excerpt"], "Expenses Submit receipts within 30 days.");
    assert_eq!(articles[1]["title"], "Travel Expenses");
    assert_eq!(articles[1]["space"], "HR");

    let answer = body["answer"].as_str().unwrap();
    assert!(answer.starts_with("I found 2 articles related to \"expense policy\"."));
    assert!(answer.contains("1 of these are from the Platform Operations knowledge base."));
    assert!(answer.find("**Expense Policy**").unwrap() < answer.find("**Travel Expenses**").unwrap());
}

#[tokio::test]
async fn test_result_cap_limits_articles() {
    let mut wiki = mock_wiki();
    wiki.expect_search().times(1).returning(|_, _, _| {
        Ok(results(
            (0..8)
                .map(|i| page(&format!("Page {}", i), "Misc", "<p>x</p>", &format!("/p/{}", i)))
                .collect(),
        ))
    });

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let (status, _, body) = send(app, post_json(r#"{"question": "anything"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 5);
    assert_eq!(articles[0]["title"], "Page 0");
    assert_eq!(articles[4]["title"], "Page 4");
}

#[tokio::test]
async fn test_missing_space_is_unknown() {
    let mut wiki = mock_wiki();
    wiki.expect_search().returning(|_, _, _| {
        Ok(serde_json::json!({
            "results": [{ "title": "Orphan", "_links": { "webui": "/x" } }]
        }))
    });

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let (_, _, body) = send(app, post_json(r#"{"question": "orphan"}"#)).await;

    assert_eq!(body["articles"][0]["space"], "Unknown");
    assert_eq!(body["articles"][0]["excerpt"], "");
}

#[tokio::test]
async fn test_zero_results_never_calls_generator() {
    let mut wiki = mock_wiki();
    wiki.expect_search()
        .times(1)
        .returning(|_, _, _| Ok(results(vec![])));
    let mut generator = mock_generator();
    generator.expect_generate().never();

    let app = app(configured("assistant"), wiki, generative(generator));
    let (status, headers, body) = send(app, post_json(r#"{"question": "unicorns"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], NO_RESULTS_ANSWER);
    assert_eq!(body["articles"], serde_json::json!([]));
    assert_eq!(body["confidence"], "low");
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_generated_answer_is_returned() {
    let mut wiki = mock_wiki();
    wiki.expect_search().returning(|_, _, _| Ok(expense_pages()));
    let mut generator = mock_generator();
    generator
        .expect_generate()
        .times(1)
        .withf(|prompt, max_tokens| {
            prompt.contains("User Question: \"expense policy\"") && *max_tokens == 1024
        })
        .returning(|_, _| Ok("Submit receipts within 30 days.".to_string()));

    let app = app(configured("assistant"), wiki, generative(generator));
    let (status, _, body) = send(app, post_json(r#"{"question": "expense policy"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Submit receipts within 30 days.");
    assert_eq!(body["articles"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_generator_failure_returns_template_answer() {
    let mut wiki = mock_wiki();
    wiki.expect_search().returning(|_, _, _| Ok(expense_pages()));
    let mut generator = mock_generator();
    generator
        .expect_generate()
        .times(1)
        .returning(|_, _| Err(GenerationError::ApiError { status: 503 }));

    let app = app(configured("assistant"), wiki, generative(generator));
    let (status, _, body) = send(app, post_json(r#"{"question": "expense policy"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["answer"],
        template().render("expense policy", &expense_articles())
    );
    assert_eq!(body["confidence"], "high");
}

#[tokio::test]
async fn test_missing_credentials_skips_search() {
    let mut wiki = mock_wiki();
    wiki.expect_search().never();

    let config = config_from(&[("CONFLUENCE_EMAIL", "bot@acme.example")]);
    let app = app(config, wiki, Arc::new(template()));
    let (status, headers, body) = send(app, post_json(r#"{"question": "expense policy"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body["error"], "Service not configured");
    assert!(body["message"].as_str().unwrap().contains("CONFLUENCE_API_KEY"));
    assert!(!body.to_string().contains("bot@acme.example"));
}

#[tokio::test]
async fn test_input_is_checked_before_credentials() {
    let mut wiki = mock_wiki();
    wiki.expect_search().never();

    let app = app(config_from(&[]), wiki, Arc::new(template()));
    let (status, _, body) = send(app, post_json(r#"{"question": ""}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Question is required");
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let mut wiki = mock_wiki();
    wiki.expect_search().never();

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let (status, _, body) = send(app, post_json(r#"{"question": "   "}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Question is required");
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let mut wiki = mock_wiki();
    wiki.expect_search().never();

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let (status, _, body) = send(app, post_json("{question: nope")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let mut wiki = mock_wiki();
    wiki.expect_search().never();

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let (status, headers, body) = send(app, get("/?query=expense")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_upstream_error_returns_apology() {
    let mut wiki = mock_wiki();
    wiki.expect_search()
        .times(1)
        .returning(|_, _, _| Err(SearchError::ApiError { status: 401 }));

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let (status, _, body) = send(app, post_json(r#"{"question": "expense policy"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["message"], "Confluence API error: 401");
    assert_eq!(body["answer"], APOLOGY_ANSWER);
}

#[tokio::test]
async fn test_scoped_search_broadens_once_on_empty() {
    let mut config = configured("assistant");
    config.search.scope_to_preferred_space = true;

    let mut wiki = mock_wiki();
    let mut seq = mockall::Sequence::new();
    wiki.expect_search()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, cql, _| cql.is_scoped())
        .returning(|_, _, _| Ok(results(vec![])));
    wiki.expect_search()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, cql, _| !cql.is_scoped())
        .returning(|_, _, _| Ok(expense_pages()));

    let app = app(config, wiki, Arc::new(template()));
    let (status, _, body) = send(app, post_json(r#"{"question": "expense policy"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articles"][0]["title"], "Expense Policy");
}

#[tokio::test]
async fn test_scoped_search_broadens_once_on_error() {
    let mut config = configured("assistant");
    config.search.scope_to_preferred_space = true;

    let mut wiki = mock_wiki();
    let mut seq = mockall::Sequence::new();
    wiki.expect_search()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Err(SearchError::ApiError { status: 400 }));
    wiki.expect_search()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Err(SearchError::ApiError { status: 502 }));

    let app = app(config, wiki, Arc::new(template()));
    let (status, _, body) = send(app, post_json(r#"{"question": "expense policy"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Confluence API error: 502");
}

#[tokio::test]
async fn test_any_path_is_served() {
    let mut wiki = mock_wiki();
    wiki.expect_search().returning(|_, _, _| Ok(results(vec![])));

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let request = Request::builder()
        .method("POST")
        .uri("/some/deep/path?ignored=1")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"question": "x"}"#))
        .unwrap();
    let (status, _, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], "low");
}

#[tokio::test]
async fn test_oversized_body_returns_json_error() {
    let mut wiki = mock_wiki();
    wiki.expect_search().never();

    let question = "a".repeat(3 * 1024 * 1024);
    let body = serde_json::json!({ "question": question }).to_string();

    let app = app(configured("assistant"), wiki, Arc::new(template()));
    let (status, headers, body) = send(app, post_json(&body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["error"], "Request body too large");
    assert!(body["message"].is_string());
}
