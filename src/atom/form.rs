use serde::{Deserialize, Serialize};

use super::tree::{AtomKind, AtomTree, Node, Siblings};

/// Owned, nested rendering of a parsed form
///
/// Handy for tooling and JSON output where arena indices mean nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Form {
    /// Malformed token
    Error(String),
    /// Integer literal
    Int(i64),
    /// Floating-point literal
    Float(f64),
    /// String literal
    String(String),
    /// Symbol
    Symbol(String),
    /// Quote marker
    Quote,
    /// Nested list
    List(Vec<Form>),
}

impl Drop for Form {
    fn drop(&mut self) {
        // Flatten nested lists so dropping a deep form never recurses
        let mut pending = match self {
            Form::List(items) => std::mem::take(items),
            _ => return,
        };
        while let Some(mut form) = pending.pop() {
            if let Form::List(items) = &mut form {
                pending.append(items);
            }
        }
    }
}

impl From<Node<'_>> for Form {
    fn from(node: Node<'_>) -> Self {
        match node.kind() {
            AtomKind::Branch => Form::List(collect_forms(node.children())),
            kind => leaf_form(kind),
        }
    }
}

fn leaf_form(kind: &AtomKind) -> Form {
    match kind {
        AtomKind::Error(message) => Form::Error(message.clone()),
        AtomKind::Int(n) => Form::Int(*n),
        AtomKind::Float(x) => Form::Float(*x),
        AtomKind::String(s) => Form::String(s.clone()),
        AtomKind::Symbol(name) => Form::Symbol(name.clone()),
        AtomKind::Quote => Form::Quote,
        // Sequences never yield their sentinel; branches are expanded by the caller
        AtomKind::Nil | AtomKind::Branch => Form::List(Vec::new()),
    }
}

/// Builds the forms of one sequence with an explicit stack of open lists
fn collect_forms(forms: Siblings<'_>) -> Vec<Form> {
    let mut stack = vec![(forms, Vec::new())];

    while let Some((forms, built)) = stack.last_mut() {
        match forms.next() {
            Some(node) if node.is_branch() => stack.push((node.children(), Vec::new())),
            Some(node) => built.push(leaf_form(node.kind())),
            None => {
                let finished = match stack.pop() {
                    Some((_, items)) => items,
                    None => break,
                };
                match stack.last_mut() {
                    Some((_, parent)) => parent.push(Form::List(finished)),
                    None => return finished,
                }
            }
        }
    }

    Vec::new()
}

impl AtomTree {
    /// Top-level forms as owned values
    pub fn to_forms(&self) -> Vec<Form> {
        collect_forms(self.top_level())
    }

    /// Top-level forms as a JSON array
    ///
    /// Same shape as serializing [`AtomTree::to_forms`], but lists are opened
    /// and closed while walking the arena so nesting depth costs no stack.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut out = String::from("[");
        let mut stack = vec![(self.top_level(), true)];

        while let Some((forms, first)) = stack.last_mut() {
            let Some(node) = forms.next() else {
                stack.pop();
                out.push_str(if stack.is_empty() { "]" } else { "]}" });
                continue;
            };
            if !*first {
                out.push(',');
            }
            *first = false;
            if node.is_branch() {
                out.push_str(r#"{"kind":"list","value":["#);
                stack.push((node.children(), true));
            } else {
                out.push_str(&serde_json::to_string(&leaf_form(node.kind()))?);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParserConfig, SExprParser};

    #[test]
    fn test_form_json_shape() {
        let forms = vec![
            Form::Quote,
            Form::List(vec![Form::Symbol("+".to_string()), Form::Int(1)]),
        ];
        let json = serde_json::to_string(&forms).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"quote"},{"kind":"list","value":[{"kind":"symbol","value":"+"},{"kind":"int","value":1}]}]"#
        );
    }

    #[test]
    fn test_empty_tree_has_no_forms() {
        assert!(AtomTree::new().to_forms().is_empty());
        assert_eq!(AtomTree::new().to_json().unwrap(), "[]");
    }

    #[test]
    fn test_json_matches_serialized_forms() {
        let tree = parse(r#"(f 'x) () (g "s" 1.5 (h 12a))"#);
        let expected = serde_json::to_string(&tree.to_forms()).unwrap();
        assert_eq!(tree.to_json().unwrap(), expected);
    }

    #[test]
    fn test_deep_tree_converts_without_recursion() {
        let depth = 100_000;
        let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        let config = ParserConfig::default().with_max_depth(depth);
        let tree = SExprParser::with_config(&source, config).parse();

        let forms = tree.to_forms();
        let mut levels = 0;
        let mut current = &forms[0];
        while let Form::List(items) = current {
            levels += 1;
            current = &items[0];
        }
        assert_eq!(levels, depth);
        assert_eq!(current, &Form::Symbol("x".to_string()));

        let json = tree.to_json().unwrap();
        assert!(json.starts_with(r#"[{"kind":"list","value":[{"kind":"list""#));
        assert!(json.contains(r#"{"kind":"symbol","value":"x"}"#));
        assert!(json.ends_with("]}]"));
    }
}
