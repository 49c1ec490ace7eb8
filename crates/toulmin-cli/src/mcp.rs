//! MCP Server - Model Context Protocol implementation
//!
//! Exposes the engine's phase operations as MCP tools over a JSON-RPC
//! 2.0 stdin/stdout loop. Every tool call is stateless: the chain is
//! rebuilt from the fragments supplied in that call, so the transport
//! needs no per-session storage.
//!
//! Engine failures come back as structured tool results. A tripped
//! circuit breaker is a designed outcome and is returned without the
//! `isError` flag; malformed input sets it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use toulmin_core::{council, CouncilRequest, EngineConfig, EngineError, Sequencer};

use crate::prompts;

/// Tool names registered by the server, used by `verify` as well
pub const TOOL_NAMES: &[&str] = &[
    "initiate_toulmin_sequence",
    "inject_logic_bridge",
    "stress_test_argument",
    "render_verdict",
    "format_analysis_report",
    "consult_field_experts",
];

#[derive(Debug, Serialize, Deserialize)]
struct McpRequest {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Value,
    #[serde(default)]
    id: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct McpResponse {
    jsonrpc: String,
    result: Option<Value>,
    error: Option<Value>,
    id: Value,
}

/// Run the MCP server over stdin/stdout until EOF
pub async fn run_server(config: EngineConfig) -> anyhow::Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    loop {
        let mut line = String::new();
        if stdin.read_line(&mut line).await? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let request: McpRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(err) => {
                warn!(%err, "ignoring malformed request line");
                continue;
            }
        };

        let response = handle_request(&config, request);
        let response_json = serde_json::to_string(&response)? + "\n";
        stdout.write_all(response_json.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

fn handle_request(config: &EngineConfig, req: McpRequest) -> McpResponse {
    debug!(method = req.method, "mcp request");
    let result = match req.method.as_str() {
        "initialize" => Some(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": "toulmin",
                "version": env!("CARGO_PKG_VERSION")
            }
        })),
        "tools/list" => Some(json!({ "tools": tool_definitions() })),
        "tools/call" => Some(handle_tool_call(config, &req.params)),
        _ => None,
    };

    McpResponse {
        jsonrpc: "2.0".to_string(),
        result,
        error: None,
        id: req.id,
    }
}

fn string_schema(required: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> = required
        .iter()
        .map(|name| ((*name).to_string(), json!({ "type": "string" })))
        .collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn tool_definitions() -> Value {
    json!([
        {
            "name": "initiate_toulmin_sequence",
            "description": "PHASE 1: begin a Toulmin analysis; returns the data+claim directive",
            "inputSchema": string_schema(&["query"])
        },
        {
            "name": "inject_logic_bridge",
            "description": "PHASE 2: validate phase-1 output; returns the warrant+backing directive",
            "inputSchema": string_schema(&["query", "data_json", "claim_json"])
        },
        {
            "name": "stress_test_argument",
            "description": "PHASE 3: validate the bridge and run the circuit breaker; returns the rebuttal+qualifier directive",
            "inputSchema": string_schema(&["query", "data_json", "claim_json", "warrant_json", "backing_json"])
        },
        {
            "name": "render_verdict",
            "description": "PHASE 4: validate the six-part chain; returns the verdict directive",
            "inputSchema": string_schema(&["query", "data_json", "claim_json", "warrant_json", "backing_json", "rebuttal_json", "qualifier_json"])
        },
        {
            "name": "format_analysis_report",
            "description": "PHASE 5: validate the complete chain and render the markdown report",
            "inputSchema": string_schema(&["query", "data_json", "claim_json", "warrant_json", "backing_json", "rebuttal_json", "qualifier_json", "verdict_json"])
        },
        {
            "name": "consult_field_experts",
            "description": "HELPER: per-perspective supporting and opposing arguments for a query",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": { "type": "string" },
                    "perspectives": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["query", "perspectives"]
            }
        }
    ])
}

fn arg<'a>(args: &'a Value, name: &str) -> &'a str {
    args.get(name).and_then(Value::as_str).unwrap_or("")
}

fn text_result(text: String) -> Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}

fn engine_error_result(err: &EngineError) -> Value {
    json!({
        // Terminal outcomes are verdicts on the argument, not call errors.
        "isError": !err.is_terminal_outcome(),
        "content": [{ "type": "text", "text": err.to_payload().to_string() }]
    })
}

fn handle_tool_call(config: &EngineConfig, params: &Value) -> Value {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return json!({
            "isError": true,
            "content": [{ "type": "text", "text": "missing tool name" }]
        });
    };
    let empty = json!({});
    let args = params.get("arguments").unwrap_or(&empty);

    match dispatch_tool(config, name, args) {
        Ok(result) => result,
        Err(err) => engine_error_result(&err),
    }
}

fn dispatch_tool(config: &EngineConfig, name: &str, args: &Value) -> Result<Value, EngineError> {
    let sequencer = Sequencer::new(config.clone());
    let query = arg(args, "query");

    match name {
        "initiate_toulmin_sequence" => {
            let (_, directive) = sequencer.ground(query)?;
            Ok(text_result(prompts::render_directive(query, &directive, &[])))
        }

        "inject_logic_bridge" => {
            let (mut chain, _) = sequencer.ground(query)?;
            let data_json = arg(args, "data_json");
            let claim_json = arg(args, "claim_json");
            let directive = sequencer.bridge(&mut chain, data_json, claim_json)?;
            Ok(text_result(prompts::render_directive(
                query,
                &directive,
                &[("data", data_json), ("claim", claim_json)],
            )))
        }

        "stress_test_argument" => {
            let (mut chain, _) = sequencer.ground(query)?;
            let data_json = arg(args, "data_json");
            let claim_json = arg(args, "claim_json");
            let warrant_json = arg(args, "warrant_json");
            let backing_json = arg(args, "backing_json");
            let directive =
                sequencer.stress(&mut chain, data_json, claim_json, warrant_json, backing_json)?;
            Ok(text_result(prompts::render_directive(
                query,
                &directive,
                &[
                    ("data", data_json),
                    ("claim", claim_json),
                    ("warrant", warrant_json),
                    ("backing", backing_json),
                ],
            )))
        }

        "render_verdict" => {
            let (mut chain, _) = sequencer.ground(query)?;
            let data_json = arg(args, "data_json");
            let claim_json = arg(args, "claim_json");
            let warrant_json = arg(args, "warrant_json");
            let backing_json = arg(args, "backing_json");
            let rebuttal_json = arg(args, "rebuttal_json");
            let qualifier_json = arg(args, "qualifier_json");
            let directive = sequencer.judge(
                &mut chain,
                data_json,
                claim_json,
                warrant_json,
                backing_json,
                rebuttal_json,
                qualifier_json,
            )?;
            Ok(text_result(prompts::render_directive(
                query,
                &directive,
                &[
                    ("data", data_json),
                    ("claim", claim_json),
                    ("warrant", warrant_json),
                    ("backing", backing_json),
                    ("rebuttal", rebuttal_json),
                    ("qualifier", qualifier_json),
                ],
            )))
        }

        "format_analysis_report" => {
            let (mut chain, _) = sequencer.ground(query)?;
            sequencer.complete(
                &mut chain,
                arg(args, "data_json"),
                arg(args, "claim_json"),
                arg(args, "warrant_json"),
                arg(args, "backing_json"),
                arg(args, "rebuttal_json"),
                arg(args, "qualifier_json"),
                arg(args, "verdict_json"),
            )?;
            let report = sequencer.report(&mut chain)?;
            Ok(text_result(report))
        }

        "consult_field_experts" => {
            let perspectives = args
                .get("perspectives")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            let request = CouncilRequest {
                query: query.to_string(),
                perspectives,
            };
            let directive = council::convene(config, &request)?;
            Ok(text_result(prompts::render_council(&directive)))
        }

        _ => Ok(json!({
            "isError": true,
            "content": [{ "type": "text", "text": format!("unknown tool: {name}") }]
        })),
    }
}
