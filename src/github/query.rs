// GraphQL query document for pinned repositories.

/// Build the pinned-repositories query for `login`.
///
/// Languages are ordered by size, largest first, so the first entry is the
/// dominant language.
pub fn pinned_repositories_query(login: &str, pinned_limit: u32, language_limit: u32) -> String {
    format!(
        r#"query {{
    user(login: {login}) {{
        pinnedItems(first: {pinned_limit}, types: REPOSITORY) {{
            nodes {{
                ... on Repository {{
                    name
                    url
                    description
                    languages(first: {language_limit}, orderBy: {{ field: SIZE, direction: DESC }}) {{
                        nodes {{
                            name
                        }}
                    }}
                }}
            }}
        }}
    }}
}}"#,
        login = string_literal(login),
    )
}

/// Quote a value as a GraphQL string literal.
fn string_literal(value: &str) -> String {
    // JSON string escaping is a subset of GraphQL's.
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_carries_login_and_limits() {
        let query = pinned_repositories_query("lycuid", 4, 10);
        assert!(query.contains(r#"user(login: "lycuid")"#));
        assert!(query.contains("pinnedItems(first: 4, types: REPOSITORY)"));
        assert!(query.contains("languages(first: 10, orderBy: { field: SIZE, direction: DESC })"));
        assert!(query.contains("... on Repository"));
    }

    #[test]
    fn test_login_is_escaped() {
        let query = pinned_repositories_query(r#"evil") { x"#, 1, 1);
        assert!(query.contains(r#"user(login: "evil\") { x")"#));
    }
}
