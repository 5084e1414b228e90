use std::fmt;

use super::tree::{AtomKind, AtomTree, Node, Siblings};

impl fmt::Display for AtomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top_level().next().is_none() {
            return write!(f, "nil");
        }
        write_sequence(f, self.top_level())
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            AtomKind::Branch => {
                write!(f, "(")?;
                write_sequence(f, self.children())?;
                write!(f, ")")
            }
            kind => write_leaf(f, kind),
        }
    }
}

/// Writes a sequence, descending into branches with an explicit stack
fn write_sequence(f: &mut fmt::Formatter<'_>, forms: Siblings<'_>) -> fmt::Result {
    // Each frame holds a list still being written and whether the next
    // form is glued to the one before it
    let mut stack = vec![(forms, true)];

    while let Some((forms, glued)) = stack.last_mut() {
        let Some(node) = forms.next() else {
            stack.pop();
            if !stack.is_empty() {
                write!(f, ")")?;
            }
            continue;
        };
        if !*glued {
            write!(f, " ")?;
        }
        // A quote marker sticks to whatever it qualifies
        *glued = matches!(node.kind(), AtomKind::Quote);
        if node.is_branch() {
            write!(f, "(")?;
            stack.push((node.children(), true));
        } else {
            write_leaf(f, node.kind())?;
        }
    }

    Ok(())
}

fn write_leaf(f: &mut fmt::Formatter<'_>, kind: &AtomKind) -> fmt::Result {
    match kind {
        AtomKind::Nil | AtomKind::Branch => Ok(()),
        AtomKind::Error(message) => write!(f, "#<error: {}>", message),
        AtomKind::Int(n) => write!(f, "{}", n),
        AtomKind::Float(x) => write!(f, "{}", format_float(*x)),
        AtomKind::String(s) => write!(f, "\"{}\"", escape_string(s)),
        AtomKind::Symbol(name) => write!(f, "{}", name),
        AtomKind::Quote => write!(f, "'"),
    }
}

/// Formats a float so that it reads back as a float (`1.0`, `2.5e300`)
pub fn format_float(x: f64) -> String {
    let text = format!("{:?}", x);
    if !x.is_finite() || text.contains('.') {
        return text;
    }
    match text.find(|c: char| c == 'e' || c == 'E') {
        Some(at) => format!("{}.0{}", &text[..at], &text[at..]),
        None => format!("{}.0", text),
    }
}

/// Backslash-escapes `"` and `\` for re-reading
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
