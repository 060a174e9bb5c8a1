// Template file renderer.
// Expands `{{ var }}` placeholders and `{% for repo in repositories %}` loops over the records.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::{PinpageError, Result};
use crate::record::RepositoryRecord;

use super::fragment::repository_fragments;
use super::{Renderer, escape_html};

// Tags may span lines; any `{{ ... }}` that is not a plain dotted name is malformed.
const TAG_PATTERN: &str =
    r"(?s)\{\{\s*([A-Za-z_][\w.]*)\s*\}\}|\{%\s*(.*?)\s*%\}|(\{\{.*?\}\})";

/// Name of the sequence templates iterate over.
const REPOSITORIES: &str = "repositories";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Var(String),
    For { binding: String, body: Vec<Node> },
}

/// Renders a parsed template against the repository list and named bindings.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    nodes: Vec<Node>,
    bindings: BTreeMap<String, String>,
}

impl TemplateRenderer {
    /// Parse `source`; syntax errors are reported here, not at render time.
    pub fn new(source: &str) -> Result<Self> {
        Ok(Self {
            nodes: parse(source)?,
            bindings: BTreeMap::new(),
        })
    }

    /// Bind a plain text variable, available as `{{ name }}`.
    pub fn with_binding(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.bindings.insert(name.into(), value.into());
        self
    }

    fn eval<'a>(
        &self,
        nodes: &'a [Node],
        scope: &[(&'a str, &'a RepositoryRecord)],
        repos: &'a [RepositoryRecord],
        out: &mut String,
    ) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Var(name) => out.push_str(&self.lookup(name, scope, repos)?),
                Node::For { binding, body } => {
                    let mut inner = scope.to_vec();
                    for repo in repos {
                        inner.push((binding.as_str(), repo));
                        self.eval(body, &inner, repos, out)?;
                        inner.pop();
                    }
                }
            }
        }
        Ok(())
    }

    fn lookup(
        &self,
        name: &str,
        scope: &[(&str, &RepositoryRecord)],
        repos: &[RepositoryRecord],
    ) -> Result<String> {
        // Innermost loop variable wins.
        let bound = scope.iter().rev().find_map(|(binding, repo)| {
            name.strip_prefix(binding)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|field| (field, *repo))
        });

        if let Some((field, repo)) = bound {
            let value = match field {
                "name" => repo.name.clone(),
                "url" => repo.url.clone(),
                "description" => repo.description.clone(),
                "languages" => repo.languages_joined(),
                _ => {
                    return Err(PinpageError::Template(format!(
                        "unknown repository field {:?}",
                        field
                    )));
                }
            };
            return Ok(escape_html(&value));
        }

        if name == REPOSITORIES {
            return Ok(repository_fragments(repos));
        }

        self.bindings
            .get(name)
            .map(|v| escape_html(v))
            .ok_or_else(|| PinpageError::Template(format!("unknown variable {:?}", name)))
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, repos: &[RepositoryRecord]) -> Result<String> {
        let mut out = String::new();
        self.eval(&self.nodes, &[], repos, &mut out)?;
        Ok(out)
    }
}

fn parse(source: &str) -> Result<Vec<Node>> {
    let tag = Regex::new(TAG_PATTERN).map_err(|e| PinpageError::Template(e.to_string()))?;

    // Open loops, innermost last; the root has no binding.
    let mut stack: Vec<(Option<String>, Vec<Node>)> = vec![(None, Vec::new())];
    let mut last = 0;

    for caps in tag.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut stack, &source[last..whole.start()]);
        last = whole.end();

        if let Some(var) = caps.get(1) {
            push_node(&mut stack, Node::Var(var.as_str().to_string()));
            continue;
        }

        if let Some(bad) = caps.get(3) {
            return Err(PinpageError::Template(format!(
                "malformed placeholder {:?}",
                bad.as_str()
            )));
        }

        let statement = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let words: Vec<&str> = statement.split_whitespace().collect();
        match words.as_slice() {
            ["for", binding, "in", REPOSITORIES] => {
                stack.push((Some(binding.to_string()), Vec::new()));
            }
            ["for", ..] => {
                return Err(PinpageError::Template(format!(
                    "unsupported loop {:?}, expected `for <name> in repositories`",
                    statement
                )));
            }
            ["endfor"] => {
                if stack.len() < 2 {
                    return Err(PinpageError::Template("endfor without for".to_string()));
                }
                let Some((Some(binding), body)) = stack.pop() else {
                    return Err(PinpageError::Template("endfor without for".to_string()));
                };
                push_node(&mut stack, Node::For { binding, body });
            }
            _ => {
                return Err(PinpageError::Template(format!(
                    "unknown tag {{% {} %}}",
                    statement
                )));
            }
        }
    }
    push_text(&mut stack, &source[last..]);

    match stack.pop() {
        Some((None, nodes)) if stack.is_empty() => Ok(nodes),
        _ => Err(PinpageError::Template(
            "unclosed for loop, missing endfor".to_string(),
        )),
    }
}

fn push_node(stack: &mut [(Option<String>, Vec<Node>)], node: Node) {
    if let Some((_, nodes)) = stack.last_mut() {
        nodes.push(node);
    }
}

fn push_text(stack: &mut [(Option<String>, Vec<Node>)], text: &str) {
    if !text.is_empty() {
        push_node(stack, Node::Text(text.to_string()));
    }
}
