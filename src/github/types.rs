// GitHub GraphQL response types.
// Defines the pinned-items envelope and the raw repository node shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PinpageError, Result};

/// A pinned repository exactly as the GraphQL API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRepository {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub languages: LanguageConnection,
}

/// `languages(first: N, orderBy: SIZE DESC) { nodes { name } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConnection {
    pub nodes: Vec<LanguageNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageNode {
    pub name: String,
}

/// Request body for a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
}

/// Error entry in a GraphQL `errors` array.
#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Extract `data.user.pinnedItems.nodes` from a GraphQL response body.
pub fn parse_pinned_nodes(body: &str) -> Result<Vec<RawRepository>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| PinpageError::MalformedResponse(e.to_string()))?;

    if let Some(errors) = value.get("errors").filter(|e| !e.is_null()) {
        let errors: Vec<GraphQlError> = serde_json::from_value(errors.clone())
            .map_err(|e| PinpageError::MalformedResponse(format!("errors: {}", e)))?;
        if !errors.is_empty() {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(PinpageError::GraphQl(messages.join("; ")));
        }
    }

    let nodes = value
        .pointer("/data/user/pinnedItems/nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PinpageError::Shape("response has no data.user.pinnedItems.nodes array".to_string())
        })?;

    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            RawRepository::deserialize(node)
                .map_err(|e| PinpageError::Shape(format!("pinned item {}: {}", index, e)))
        })
        .collect()
}
