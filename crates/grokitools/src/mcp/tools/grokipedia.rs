use crate::grokipedia::GrokipediaConfig;
use crate::prelude::eprintln;
use grokitools_core::request::{QueryRequest, DEFAULT_MAX_RESULTS};
use serde::Deserialize;

use super::{CallToolResult, Content, JsonRpcError};

pub async fn handle_grokipedia_query(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GrokipediaQueryArgs {
        query: String,
        action: Option<String>,
        slug: Option<String>,
        max_results: Option<i64>,
    }

    let args: GrokipediaQueryArgs =
        serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| {
            JsonRpcError {
                code: -32602,
                message: format!("Invalid arguments: {e}"),
                data: None,
            }
        })?;

    if global.verbose {
        eprintln!(
            "Calling grokipedia_query: query={:?}, action={:?}, slug={:?}, max_results={:?}",
            args.query, args.action, args.slug, args.max_results
        );
    }

    // Negative counts enrich nothing
    let max_results = args
        .max_results
        .map(|n| n.max(0) as usize)
        .unwrap_or(DEFAULT_MAX_RESULTS);

    let mut request = QueryRequest::new(args.query)
        .with_slug(args.slug)
        .with_max_results(max_results);
    if let Some(action) = args.action {
        request = request.with_action(action);
    }

    let config = GrokipediaConfig::from_global(global);
    let json_string = crate::grokipedia::query_data(&request, &config).await;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}
