use serde_json::{json, Value};

mod common;

use common::ServerProcess;

fn call_tool(server: &mut ServerProcess, name: &str, arguments: Value) -> Value {
    server.request("tools/call", json!({"name": name, "arguments": arguments}))
}

fn result_text(resp: &Value) -> &str {
    resp["result"]["content"][0]["text"]
        .as_str()
        .expect("single text content block")
}

#[test]
fn tools_list_advertises_the_builtins() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = server.request_no_params("tools/list");
    let tools = resp["result"]["tools"].as_array().unwrap();

    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["echo", "get_time", "system_info"]);
    for tool in tools {
        assert!(!tool["description"].as_str().unwrap().is_empty());
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
    assert_eq!(tools[0]["inputSchema"]["required"][0], "message");
}

#[test]
fn tools_list_is_stable_across_calls() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let first = server.request_no_params("tools/list");
    let second = server.request_no_params("tools/list");
    assert_eq!(first["result"], second["result"]);
}

#[test]
fn echo_round_trips_the_message() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = call_tool(
        &mut server,
        "echo",
        json!({"message": "Hello from the integration suite!"}),
    );
    assert!(resp.get("error").is_none());
    assert_eq!(resp["result"]["isError"], false);
    assert_eq!(resp["result"]["content"][0]["type"], "text");
    assert_eq!(
        result_text(&resp),
        "Echo: Hello from the integration suite!"
    );
}

#[test]
fn echo_accepts_an_empty_string() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = call_tool(&mut server, "echo", json!({"message": ""}));
    assert_eq!(resp["result"]["isError"], false);
    assert_eq!(result_text(&resp), "Echo: ");
}

#[test]
fn echo_without_a_message_is_a_tool_error() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = call_tool(&mut server, "echo", json!({}));
    // Tool faults ride inside a successful envelope.
    assert!(resp.get("error").is_none());
    assert_eq!(resp["result"]["isError"], true);
    assert!(result_text(&resp).contains("message"));

    // The fault leaves the session and the tool usable.
    let resp = call_tool(&mut server, "echo", json!({"message": "still here"}));
    assert_eq!(result_text(&resp), "Echo: still here");
}

#[test]
fn echo_with_a_non_string_message_is_a_tool_error() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = call_tool(&mut server, "echo", json!({"message": 7}));
    assert!(resp.get("error").is_none());
    assert_eq!(resp["result"]["isError"], true);
}

#[test]
fn get_time_reports_a_wall_clock_timestamp() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = call_tool(&mut server, "get_time", json!({}));
    assert_eq!(resp["result"]["isError"], false);
    let text = result_text(&resp);
    let stamp = text
        .strip_prefix("Current time: ")
        .expect("prefixed timestamp");
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
}

#[test]
fn system_info_reports_identity_and_platform() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = call_tool(&mut server, "system_info", json!({}));
    let info: Value = serde_json::from_str(result_text(&resp)).unwrap();
    assert_eq!(info["server_name"], "mcpserve");
    assert!(info["server_version"].is_string());
    assert!(!info["os"].as_str().unwrap().is_empty());
    assert!(!info["arch"].as_str().unwrap().is_empty());
    assert_eq!(info["tools_available"], 3);
}

#[test]
fn unknown_tool_suggests_a_close_name() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = call_tool(&mut server, "ehco", json!({}));
    assert_eq!(resp["error"]["code"], -32001);
    assert_eq!(resp["error"]["data"]["tool"], "ehco");
    assert_eq!(resp["error"]["data"]["suggestion"], "echo");
    assert!(resp["error"]["message"]
        .as_str()
        .unwrap()
        .contains("did you mean 'echo'"));

    // Protocol error, not a crash: the next call still lands.
    let resp = call_tool(&mut server, "echo", json!({"message": "ok"}));
    assert_eq!(result_text(&resp), "Echo: ok");
}

#[test]
fn unknown_tool_without_a_near_miss_has_no_suggestion() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = call_tool(&mut server, "frobnicate", json!({}));
    assert_eq!(resp["error"]["code"], -32001);
    assert_eq!(resp["error"]["data"]["tool"], "frobnicate");
    assert!(resp["error"]["data"].get("suggestion").is_none());
}

#[test]
fn call_without_a_name_is_invalid_params() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = server.request("tools/call", json!({"arguments": {}}));
    assert_eq!(resp["error"]["code"], -32602);
}

#[test]
fn call_with_array_arguments_is_invalid_params() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = server.request("tools/call", json!({"name": "echo", "arguments": [1, 2]}));
    assert_eq!(resp["error"]["code"], -32602);
}

#[test]
fn call_without_arguments_defaults_to_empty() {
    let mut server = ServerProcess::spawn();
    server.initialize();
    let resp = server.request("tools/call", json!({"name": "get_time"}));
    assert_eq!(resp["result"]["isError"], false);
}

#[test]
fn server_name_flag_changes_the_advertised_identity() {
    let mut server = ServerProcess::spawn_with_args(&["--server-name", "renamed"]);
    let resp = server.initialize();
    assert_eq!(resp["result"]["serverInfo"]["name"], "renamed");

    let resp = call_tool(&mut server, "system_info", json!({}));
    let info: Value = serde_json::from_str(result_text(&resp)).unwrap();
    assert_eq!(info["server_name"], "renamed");
}
