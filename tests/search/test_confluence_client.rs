// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ConfluenceClient against a local stub server

use axum::http::StatusCode;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use super::stub_wiki::StubWiki;
use wiki_answer_proxy::config::Secret;
use wiki_answer_proxy::search::{ConfluenceClient, Credentials, CqlQuery, SearchError, WikiApi};

fn credentials() -> Credentials {
    Credentials {
        email: "user@example.com".to_string(),
        api_token: Secret::new("token"),
        domain: "acme.atlassian.net".to_string(),
    }
}

#[tokio::test]
async fn test_search_sends_auth_and_cql() {
    let body = json!({ "results": [{ "title": "Runbook" }], "size": 1 });
    let stub = StubWiki::start(StatusCode::OK, body.clone()).await;
    let client = ConfluenceClient::new(Some(stub.base_url.clone())).unwrap();

    let cql = CqlQuery::text("on-call").in_space("Platform Operations");
    let value = assert_ok!(client.search(&credentials(), &cql, 10).await);
    assert_eq!(value, body);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Basic dXNlckBleGFtcGxlLmNvbTp0b2tlbg==")
    );
    assert_eq!(
        requests[0].params["cql"],
        r#"space = "Platform Operations" AND text ~ "on-call""#
    );
    assert_eq!(requests[0].params["limit"], "10");
    assert_eq!(requests[0].params["expand"], "body.view,space");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let stub = StubWiki::start(StatusCode::UNAUTHORIZED, json!({ "message": "nope" })).await;
    let client = ConfluenceClient::new(Some(stub.base_url.clone())).unwrap();

    let err = assert_err!(client.search(&credentials(), &CqlQuery::text("x"), 5).await);
    assert!(matches!(err, SearchError::ApiError { status: 401 }));
    assert_eq!(err.to_string(), "Confluence API error: 401");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let client = ConfluenceClient::new(Some("http://127.0.0.1:1".to_string())).unwrap();

    let err = assert_err!(client.search(&credentials(), &CqlQuery::text("x"), 5).await);
    assert!(matches!(err, SearchError::Transport { .. }));
    assert!(!err.to_string().contains("token"));
}
