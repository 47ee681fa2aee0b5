//! Mock-based tool tests using wiremock.
//!
//! These run the tools through the real E-utilities client against a mocked
//! NCBI endpoint.

mod common;

use std::sync::Arc;

use citing_authors::client::EutilsClient;
use citing_authors::config::Config;
use citing_authors::error::ToolError;
use citing_authors::models::GroupingMode;
use citing_authors::pipeline::CitationPipeline;
use citing_authors::server::stdio::serve_lines;
use citing_authors::tools::{
    CitedByAuthorTool, CitingAuthorsTool, McpTool, PubmedSearchTool, ToolContext,
    register_all_tools,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{elink_xml, esearch_xml, esummary_xml};

/// Create a test context with a mock server.
fn setup_test_context(mock_server: &MockServer) -> ToolContext {
    let config = Config::for_testing(&mock_server.uri());
    let client = EutilsClient::new(&config).unwrap();
    ToolContext::new(Arc::new(CitationPipeline::new(Arc::new(client), GroupingMode::Strict)))
}

fn xml(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/xml")
}

/// Mount the reference scenario: "crispr" -> 100 (cited by 1, 2), 200 (cited by 3).
async fn mount_reference(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", "crispr"))
        .respond_with(xml(esearch_xml(&["100", "200"])))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/elink.fcgi"))
        .respond_with(xml(elink_xml(&[("100", &["1", "2"]), ("200", &["3"])])))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/esummary.fcgi"))
        .and(body_string_contains("id=1%2C2%2C3"))
        .respond_with(xml(esummary_xml(&[
            ("1", Some(&["A", "B"])),
            ("2", Some(&["B"])),
            ("3", Some(&["C"])),
        ])))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/esummary.fcgi"))
        .and(body_string_contains("id=100%2C200"))
        .respond_with(xml(esummary_xml(&[("100", Some(&["B"])), ("200", None)])))
        .mount(mock_server)
        .await;
}

// =============================================================================
// citing_authors
// =============================================================================

#[tokio::test]
async fn test_citing_authors_markdown() {
    let mock_server = MockServer::start().await;
    mount_reference(&mock_server).await;
    let ctx = setup_test_context(&mock_server);

    let result = CitingAuthorsTool.execute(&ctx, json!({"query": "crispr"})).await.unwrap();

    assert!(result.contains("| 1 | B | 2 |"));
    assert!(result.contains("| 2 | A | 1 |"));
    assert!(result.contains("| 3 | C | 1 |"));
}

#[tokio::test]
async fn test_citing_authors_csv_exclude_source() {
    let mock_server = MockServer::start().await;
    mount_reference(&mock_server).await;
    let ctx = setup_test_context(&mock_server);

    let result = CitingAuthorsTool
        .execute(
            &ctx,
            json!({"query": "crispr", "exclusion": "exclude_source", "responseFormat": "csv"}),
        )
        .await
        .unwrap();

    assert_eq!(result, "A,1\nC,1\n");
}

#[tokio::test]
async fn test_citing_authors_legacy_flag() {
    let mock_server = MockServer::start().await;
    mount_reference(&mock_server).await;
    let ctx = setup_test_context(&mock_server);

    let result = CitingAuthorsTool
        .execute(
            &ctx,
            json!({"pmids": ["100", "200"], "dropSourceAuthors": true, "responseFormat": "json"}),
        )
        .await
        .unwrap();

    let value: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(value["policy"], "exclude_source");
    assert_eq!(value["authors"], json!([{"author": "A", "count": 1}, {"author": "C", "count": 1}]));
}

#[tokio::test]
async fn test_citing_authors_requires_a_source() {
    let mock_server = MockServer::start().await;
    let ctx = setup_test_context(&mock_server);

    let err = CitingAuthorsTool.execute(&ctx, json!({})).await.unwrap_err();
    assert!(err.to_user_message().starts_with("Invalid input for 'query'"));
}

#[tokio::test]
async fn test_citing_authors_service_down() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    let ctx = setup_test_context(&mock_server);

    let err = CitingAuthorsTool.execute(&ctx, json!({"query": "crispr"})).await.unwrap_err();
    assert!(matches!(err, ToolError::Pipeline(ref e) if e.is_external()), "{err:?}");
}

// =============================================================================
// cited_by_author / pubmed_search
// =============================================================================

#[tokio::test]
async fn test_cited_by_author() {
    let mock_server = MockServer::start().await;
    mount_reference(&mock_server).await;
    let ctx = setup_test_context(&mock_server);

    let result = CitedByAuthorTool
        .execute(&ctx, json!({"author": "C", "query": "crispr", "responseFormat": "json"}))
        .await
        .unwrap();

    let value: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(value["pmids"], json!(["200"]));
}

#[tokio::test]
async fn test_cited_by_author_lists_each_source_once() {
    let mock_server = MockServer::start().await;
    mount_reference(&mock_server).await;
    let ctx = setup_test_context(&mock_server);

    // B wrote both papers citing 100
    let result = CitedByAuthorTool
        .execute(&ctx, json!({"author": "B", "query": "crispr", "responseFormat": "json"}))
        .await
        .unwrap();

    let value: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(value["pmids"], json!(["100"]));
    assert!(CitedByAuthorTool.description().contains("Each source appears once"));
}

#[tokio::test]
async fn test_cited_by_author_blank_name() {
    let mock_server = MockServer::start().await;
    let ctx = setup_test_context(&mock_server);

    let err = CitedByAuthorTool
        .execute(&ctx, json!({"author": "  ", "pmids": ["1"]}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Validation { .. }));
}

#[tokio::test]
async fn test_pubmed_search_markdown() {
    let mock_server = MockServer::start().await;
    mount_reference(&mock_server).await;
    let ctx = setup_test_context(&mock_server);

    let result = PubmedSearchTool.execute(&ctx, json!({"query": "crispr"})).await.unwrap();

    assert!(result.contains("(2 results)"));
    assert!(result.contains("https://pubmed.ncbi.nlm.nih.gov/100/"));
}

// =============================================================================
// stdio protocol
// =============================================================================

async fn stdio_exchange(ctx: &ToolContext, input: &str) -> Vec<Value> {
    let tools = register_all_tools();
    let mut out = Vec::new();
    serve_lines(input.as_bytes(), &mut out, &tools, ctx).await.unwrap();

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_stdio_session() {
    let mock_server = MockServer::start().await;
    mount_reference(&mock_server).await;
    let ctx = setup_test_context(&mock_server);

    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
               "params": {"name": "citing_authors", "arguments": {"query": "crispr", "responseFormat": "csv"}}}),
    ]
    .iter()
    .map(Value::to_string)
    .collect::<Vec<_>>()
    .join("\n");

    let responses = stdio_exchange(&ctx, &input).await;

    // The notification gets no answer
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "citing-authors");
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 3);
    assert_eq!(responses[2]["id"], 3);
    assert_eq!(responses[2]["result"]["content"][0]["text"], "B,2\nA,1\nC,1\n");
}

#[tokio::test]
async fn test_stdio_errors() {
    let mock_server = MockServer::start().await;
    let ctx = setup_test_context(&mock_server);

    let input = [
        "not json".to_string(),
        json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}).to_string(),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "nope"}})
            .to_string(),
    ]
    .join("\n");

    let responses = stdio_exchange(&ctx, &input).await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert_eq!(responses[2]["error"]["code"], -32602);
}
