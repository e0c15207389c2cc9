//! Fact text assembly
//!
//! Facts are plain Prolog lines (`predicate(arg1, arg2).`) consumed by logic
//! programming tools downstream. The byte format is load-bearing: string
//! arguments are single-quoted ASCII with internal quotes and backslashes
//! escaped, numbers and atoms are unquoted, and unknown date parts are the
//! empty atom `''`.

use std::fmt;

/// Escape a string argument so the resulting fact stays loadable.
///
/// Non-ASCII characters are replaced with `?`; backslashes, single quotes,
/// and line-control characters are backslash-escaped.
pub fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// One argument of a fact line
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Unquoted atom (entity keys, month names, `true`/`false`)
    Atom(String),
    /// Single-quoted, escaped string
    Str(String),
    /// Unquoted integer
    Int(i64),
    /// Unquoted float, two decimals (ratings)
    Float(f64),
    /// The `''` placeholder for an unknown value
    Unknown,
}

impl Term {
    /// Atom term from anything stringy
    pub fn atom(value: impl Into<String>) -> Self {
        Term::Atom(value.into())
    }

    /// Quoted string term from anything stringy
    pub fn text(value: impl Into<String>) -> Self {
        Term::Str(value.into())
    }

    /// The key atom for an entity, e.g. `t100296`
    pub fn key(prefix: &str, id: crate::RecordId) -> Self {
        Term::Atom(format!("{}{}", prefix, id))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(a) => write!(f, "{}", a),
            Term::Str(s) => write!(f, "'{}'", esc(s)),
            Term::Int(n) => write!(f, "{}", n),
            Term::Float(x) => write!(f, "{:.2}", x),
            Term::Unknown => write!(f, "''"),
        }
    }
}

/// Assemble one fact line, newline included
pub fn fact_line(predicate: &str, terms: &[Term]) -> String {
    let mut line = String::new();
    line.push_str(predicate);
    line.push('(');
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        line.push_str(&term.to_string());
    }
    line.push_str(").\n");
    line
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: escaped text is always pure ASCII
        #[test]
        fn test_esc_is_ascii(s in ".*") {
            prop_assert!(esc(&s).is_ascii());
        }

        /// Property: a quoted string term never contains an unescaped quote
        #[test]
        fn test_quoted_term_is_balanced(s in ".*") {
            let rendered = Term::text(s).to_string();
            prop_assert!(rendered.starts_with('\''));
            prop_assert!(rendered.ends_with('\''));
            // interior quotes must all be preceded by a backslash
            let interior = &rendered[1..rendered.len() - 1];
            let mut prev = ' ';
            for ch in interior.chars() {
                if ch == '\'' {
                    prop_assert_eq!(prev, '\\');
                }
                prev = ch;
            }
        }

        /// Property: every fact line is terminated exactly once
        #[test]
        fn test_fact_line_terminator(n: i64) {
            let line = fact_line("votes", &[Term::Int(n)]);
            prop_assert!(line.ends_with(").\n"));
            prop_assert_eq!(line.matches('\n').count(), 1);
        }
    }
}
