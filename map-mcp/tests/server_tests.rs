//! Tool server protocol tests against an in-memory API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use map_client::{ClientError, ClientResult, HotelList, HotelQuery, MapSearch, QuoteRequest, ResortApi};
use map_core::{Coordinates, Hotel, ViewportRect};
use map_mcp::{McpServer, RpcRequest, RpcResponse, VIEW_STATE_URI, WIDGET_URI};
use serde_json::{json, Value};

#[derive(Default)]
struct MockApi {
    fail: bool,
    calls: AtomicUsize,
}

impl MockApi {
    fn hotels() -> Vec<Hotel> {
        vec![
            Hotel::new("cm-punta-cana", Coordinates::new(-68.3725, 18.5601))
                .with_detail("name", "Punta Cana")
                .with_detail("country", "Dominican Republic")
                .with_detail("region", "Caribbean")
                .with_detail("themes", json!(["beach", "family"]))
                .with_detail("rating", 4.5)
                .with_detail("bookingUrl", "https://example.com/punta-cana"),
            Hotel::new("cm-kani", Coordinates::new(73.5065, 4.2979))
                .with_detail("name", "Kani")
                .with_detail("country", "Maldives")
                .with_detail("region", "Indian Ocean")
                .with_detail("themes", json!(["beach"]))
                .with_detail("rating", 4.8)
                .with_detail("bookingUrl", "https://example.com/kani"),
        ]
    }

    fn enter(&self) -> ClientResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ClientError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ResortApi for MockApi {
    async fn health(&self) -> ClientResult<Value> {
        self.enter()?;
        Ok(json!({ "status": "ok" }))
    }

    async fn list_hotels(&self, query: &HotelQuery) -> ClientResult<HotelList> {
        self.enter()?;
        let limit = query.limit.unwrap_or(100) as usize;
        let hotels: Vec<Hotel> = Self::hotels().into_iter().take(limit).collect();
        Ok(HotelList {
            count: hotels.len(),
            hotels,
        })
    }

    async fn get_hotel(&self, hotel_id: &str) -> ClientResult<Value> {
        self.enter()?;
        Self::hotels()
            .into_iter()
            .find(|h| h.id.as_str() == hotel_id)
            .map(|h| serde_json::to_value(h).unwrap())
            .ok_or_else(|| ClientError::Status {
                status: 404,
                body: "{\"detail\":\"Hotel not found\"}".to_string(),
            })
    }

    async fn map_search(&self, _query: &HotelQuery) -> ClientResult<MapSearch> {
        self.enter()?;
        let hotels = Self::hotels();
        Ok(MapSearch {
            count: hotels.len(),
            bounds: Some(ViewportRect::new(-68.3725, 73.5065, 4.2979, 18.5601)),
            hotels,
        })
    }

    async fn quote(&self, request: &QuoteRequest) -> ClientResult<Value> {
        self.enter()?;
        Ok(json!({
            "hotel_id": request.hotel_id,
            "nights": 5,
            "total": 1234.5,
            "currency": "EUR"
        }))
    }
}

fn server() -> (McpServer, Arc<MockApi>) {
    let api = Arc::new(MockApi::default());
    let server = McpServer::new(api.clone()).unwrap();
    (server, api)
}

async fn call(server: &McpServer, name: &str, arguments: Value) -> Value {
    let response = server
        .handle_request(RpcRequest::new(1, "tools/call", json!({ "name": name, "arguments": arguments })))
        .await;
    assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
    response.result.unwrap()
}

#[tokio::test]
async fn test_initialize() {
    let (server, _) = server();
    let response = server.handle_request(RpcRequest::new(1, "initialize", json!({}))).await;

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "resort-map");
    assert!(result["capabilities"]["tools"].is_object());
    assert_eq!(response.id, json!(1));
}

#[tokio::test]
async fn test_tools_list() {
    let (server, _) = server();
    let result = server
        .handle_request(RpcRequest::new(2, "tools/list", Value::Null))
        .await
        .result
        .unwrap();

    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 12);

    let map_search = tools.iter().find(|t| t["name"] == "map_search").unwrap();
    assert_eq!(map_search["_meta"]["ui"]["resourceUri"], WIDGET_URI);
    assert_eq!(map_search["inputSchema"]["properties"]["limit"]["maximum"], 200);

    let ping = tools.iter().find(|t| t["name"] == "ping").unwrap();
    assert!(ping.get("_meta").is_none());
}

#[tokio::test]
async fn test_ping_tool_defaults_message() {
    let (server, _) = server();
    let result = call(&server, "ping", json!({})).await;
    assert_eq!(result["content"][0]["text"], "ok: pong");
    assert_eq!(result["structuredContent"]["echo"], "pong");
}

#[tokio::test]
async fn test_schema_rejection_never_reaches_api() {
    let (server, api) = server();

    let result = call(
        &server,
        "get_quote",
        json!({
            "hotel_id": "cm-kani",
            "check_in": "2025-03-01",
            "check_out": "2025-03-06",
            "adults": 0
        }),
    )
    .await;
    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"].as_str().unwrap().starts_with("Invalid arguments for get_quote"));

    let result = call(&server, "list_hotels", json!({ "limit": 500 })).await;
    assert_eq!(result["isError"], true);

    let result = call(&server, "get_hotel", json!({})).await;
    assert_eq!(result["isError"], true);

    let result = call(&server, "get_quote", json!({
        "hotel_id": "cm-kani",
        "check_in": "2025-02-30",
        "check_out": "2025-03-06",
        "adults": 2
    }))
    .await;
    assert_eq!(result["isError"], true);

    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_quote_forwards_defaults() {
    let (server, api) = server();
    let result = call(
        &server,
        "get_quote",
        json!({
            "hotel_id": "cm-kani",
            "check_in": "2025-03-01",
            "check_out": "2025-03-06",
            "adults": 2
        }),
    )
    .await;

    assert!(result.get("isError").is_none());
    assert_eq!(result["structuredContent"]["hotel_id"], "cm-kani");
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_tool_is_protocol_error() {
    let (server, _) = server();
    let response = server
        .handle_request(RpcRequest::new(3, "tools/call", json!({ "name": "teleport", "arguments": {} })))
        .await;

    let error = response.error.unwrap();
    assert_eq!(error.code, -32602);
    assert_eq!(error.message, "Unknown tool: teleport");
}

#[tokio::test]
async fn test_api_failure_is_tool_error() {
    let api = Arc::new(MockApi {
        fail: true,
        ..MockApi::default()
    });
    let server = McpServer::new(api).unwrap();

    let result = call(&server, "list_hotels", json!({ "query": "beach" })).await;
    assert_eq!(result["isError"], true);
    assert_eq!(result["content"][0]["text"], "API 500: boom");
}

#[tokio::test]
async fn test_search_and_fetch_connector_tools() {
    let (server, _) = server();

    let result = call(&server, "search", json!({ "query": "beach", "limit": 1 })).await;
    let results = result["structuredContent"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], "cm-punta-cana");
    assert_eq!(results[0]["title"], "Punta Cana (Dominican Republic)");
    assert_eq!(
        results[0]["snippet"],
        "Region: Caribbean. Themes: beach, family. Rating: 4.5"
    );
    assert_eq!(results[0]["url"], "https://example.com/punta-cana");
    assert_eq!(results[0]["metadata"]["type"], "hotel");

    let result = call(&server, "fetch", json!({ "id": "cm-kani" })).await;
    let text = result["content"][0]["text"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed["ok"], true);
    assert_eq!(parsed["name"], "Kani");
    assert_eq!(result["structuredContent"]["id"], "cm-kani");

    let result = call(&server, "fetch", json!({ "id": "nope" })).await;
    assert_eq!(result["isError"], true);
}

#[tokio::test]
async fn test_map_search_loads_view_and_fits_viewport() {
    let (server, _) = server();

    let result = call(&server, "map_search", json!({ "query": "beach" })).await;
    assert_eq!(result["structuredContent"]["count"], 2);
    assert_eq!(result["structuredContent"]["bounds"]["minX"], -68.3725);

    let state = call(&server, "map_view_state", json!({})).await;
    let snapshot = &state["structuredContent"];
    assert_eq!(snapshot["visibleCount"], 2);
    assert_eq!(snapshot["viewport"]["maxX"], 73.5065);
    assert_eq!(snapshot["list"]["count"], 2);
    assert_eq!(snapshot["list"]["loading"], false);
    assert_eq!(state["content"][0]["text"], "2 of 2 hotels visible");
}

#[tokio::test]
async fn test_demo_load_reports_preset() {
    let (server, _) = server();
    let result = call(&server, "ui_demo_load", json!({})).await;
    assert_eq!(result["structuredContent"]["preset"], "beach");

    let result = call(&server, "ui_demo_load", json!({ "preset": "volcano" })).await;
    assert_eq!(result["isError"], true);
}

#[tokio::test]
async fn test_viewport_filters_visible_hotels() {
    let (server, _) = server();
    call(&server, "map_search", json!({})).await;

    // Caribbean only
    let state = call(
        &server,
        "map_set_viewport",
        json!({ "minX": -90.0, "maxX": -60.0, "minY": 10.0, "maxY": 25.0 }),
    )
    .await;
    assert_eq!(state["structuredContent"]["visibleCount"], 1);
    assert_eq!(state["structuredContent"]["visibleIds"], json!(["cm-punta-cana"]));

    let state = call(&server, "map_set_viewport", json!({ "clear": true })).await;
    assert_eq!(state["structuredContent"]["visibleCount"], 2);
    assert!(state["structuredContent"]["viewport"].is_null());

    let state = call(&server, "map_set_viewport", json!({ "minX": 1.0 })).await;
    assert_eq!(state["isError"], true);
}

#[tokio::test]
async fn test_select_close_and_fly_target() {
    let (server, _) = server();
    call(&server, "map_search", json!({})).await;

    let state = call(&server, "map_select_hotel", json!({ "hotel_id": "cm-kani", "source": "marker" })).await;
    let snapshot = &state["structuredContent"];
    assert_eq!(snapshot["selectedHotelId"], "cm-kani");
    assert_eq!(snapshot["isDetailView"], true);
    assert_eq!(snapshot["flyTo"]["lat"], 4.2979);
    assert_eq!(snapshot["flyTo"]["lng"], 73.5065);
    assert_eq!(snapshot["flyTo"]["zoom"], 14.0);
    assert_eq!(snapshot["flyTo"]["durationMs"], 2000);

    let state = call(&server, "map_close_detail", json!({})).await;
    let snapshot = &state["structuredContent"];
    assert_eq!(snapshot["isDetailView"], false);
    assert_eq!(snapshot["selectedHotelId"], "cm-kani");

    let result = call(&server, "map_select_hotel", json!({ "hotel_id": "cm-atlantis" })).await;
    assert_eq!(result["isError"], true);
    assert!(result["content"][0]["text"].as_str().unwrap().contains("cm-atlantis"));
}

#[tokio::test]
async fn test_view_state_resource() {
    let (server, _) = server();
    call(&server, "map_search", json!({})).await;

    let result = server
        .handle_request(RpcRequest::new(4, "resources/read", json!({ "uri": VIEW_STATE_URI })))
        .await
        .result
        .unwrap();

    let content = &result["contents"][0];
    assert_eq!(content["mimeType"], "application/json");
    let snapshot: Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();
    assert_eq!(snapshot["visibleCount"], 2);
}

#[tokio::test]
async fn test_widget_resource_only_when_configured() {
    let (server, _) = server();
    let list = server
        .handle_request(RpcRequest::new(5, "resources/list", Value::Null))
        .await
        .result
        .unwrap();
    assert_eq!(list["resources"].as_array().unwrap().len(), 1);

    let response = server
        .handle_request(RpcRequest::new(6, "resources/read", json!({ "uri": WIDGET_URI })))
        .await;
    assert_eq!(response.error.unwrap().code, -32002);

    let server = server.with_widget_html("<html><body>map</body></html>");
    let result = server
        .handle_request(RpcRequest::new(7, "resources/read", json!({ "uri": WIDGET_URI })))
        .await
        .result
        .unwrap();
    assert_eq!(result["contents"][0]["mimeType"], "text/html+skybridge");
    assert_eq!(result["contents"][0]["text"], "<html><body>map</body></html>");
}

#[tokio::test]
async fn test_protocol_errors_and_notifications() {
    let (server, _) = server();

    let response = server.handle_line("{not json").await.unwrap();
    assert_eq!(response.error.unwrap().code, -32700);

    let response = server
        .handle_line(r#"{"jsonrpc":"2.0","id":9,"method":"prompts/get"}"#)
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32601);

    let response = server
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_invalid_request_and_null_id() {
    let (server, _) = server();

    let response = server.handle_line(r#"{"jsonrpc":"2.0","id":4}"#).await.unwrap();
    assert_eq!(response.id, json!(4));
    assert_eq!(response.error.unwrap().code, -32600);

    let response = server.handle_line("[1, 2]").await.unwrap();
    assert!(response.id.is_null());
    assert_eq!(response.error.unwrap().code, -32600);

    // A null id is still a request and gets an answer
    let response = server
        .handle_line(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
        .await
        .unwrap();
    assert!(response.id.is_null());
    assert_eq!(response.result.unwrap(), json!({}));
}

#[tokio::test]
async fn test_serve_line_protocol() {
    let (server, _) = server();
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
        "\n",
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"map_view_state"}}"#,
        "\n",
    );

    let mut output: Vec<u8> = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[0]["result"], json!({}));
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[1]["result"]["structuredContent"]["visibleCount"], 0);
}

#[test]
fn test_response_omits_empty_fields_but_not_id() {
    let response = RpcResponse {
        jsonrpc: "2.0".to_string(),
        id: Value::Null,
        result: Some(json!({})),
        error: None,
    };
    let json = serde_json::to_value(&response).unwrap();
    assert!(json["id"].is_null());
    assert!(json.get("error").is_none());
}
