//! Mermaid diagram handling: block extraction and label sanitizing.
//!
//! Renderers choke on parentheses and colons inside node labels, and on
//! diagrams without a layout directive. [`sanitize`] fixes both and leaves
//! everything else (edges, IDs, subgraphs) untouched.

use regex_lite::{Captures, Regex};
use std::sync::LazyLock;

use crate::extract::strip_fences;

/// `["label"]` or `("label")`.
static LABEL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"\["([^"]*)"\]|\("([^"]*)"\)"#).ok());

/// A fenced mermaid block; group 1 is the body.
static MERMAID_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```mermaid\n(.*?)\n```").ok());

const LAYOUTS: [&str; 4] = ["graph TD", "graph LR", "flowchart TD", "flowchart LR"];

/// Mermaid source that has been through [`sanitize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram(String);

impl Diagram {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn clean_label(label: &str) -> String {
    label.replace('(', " - ").replace(')', "").replace(':', " -")
}

/// Normalize labels to `["..."]` without parentheses or colons, and make
/// sure a layout directive is present.
pub fn sanitize(code: &str) -> Diagram {
    let mut code = match LABEL.as_ref() {
        Some(re) => re
            .replace_all(code, |caps: &Captures<'_>| {
                let label = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                format!("[\"{}\"]", clean_label(label))
            })
            .into_owned(),
        None => code.to_string(),
    };

    if !LAYOUTS.iter().any(|layout| code.contains(layout)) {
        code.insert_str(0, "graph TD\n");
    }

    Diagram(code)
}

/// A fenced mermaid block found in free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidBlock<'a> {
    /// The whole block including fences
    pub fenced: &'a str,
    /// The diagram source between the fences
    pub body: &'a str,
}

/// Find the first ```` ```mermaid ```` block in `text`.
pub fn find_mermaid_block(text: &str) -> Option<MermaidBlock<'_>> {
    let caps = MERMAID_BLOCK.as_ref()?.captures(text)?;
    Some(MermaidBlock {
        fenced: caps.get(0)?.as_str(),
        body: caps.get(1)?.as_str(),
    })
}

/// Extract diagram source from a reply that should be only a diagram.
///
/// Prefers a fenced mermaid block; otherwise strips all fences.
pub fn extract_diagram_source(reply: &str) -> String {
    match find_mermaid_block(reply) {
        Some(block) => block.body.trim().to_string(),
        None => strip_fences(reply),
    }
}
