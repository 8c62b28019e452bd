//! The argument list every command assembler writes to.

use crate::properties::Property;
use std::fmt;

/// Text shown in place of a sensitive argument when a list is rendered for humans.
pub const REDACTED: &str = "****";

/// A single process argument.
///
/// Sensitive arguments are passed to the process unchanged but never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    text: String,
    sensitive: bool,
}

impl Arg {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }
}

/// Ordered, append-only list of process arguments.
///
/// The first element is always the executable. There is no way to remove or
/// reorder elements once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentList {
    args: Vec<Arg>,
}

impl ArgumentList {
    /// Start a new list for the given executable.
    pub fn new(executable: impl Into<String>) -> Self {
        let mut list = Self { args: Vec::new() };
        list.add(executable);
        list
    }

    /// Append a non-sensitive argument.
    pub fn add(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_masked(text, false)
    }

    /// Append an argument, marking it sensitive when requested.
    pub fn add_masked(&mut self, text: impl Into<String>, sensitive: bool) -> &mut Self {
        self.args.push(Arg {
            text: text.into(),
            sensitive,
        });
        self
    }

    /// Append a flag followed by its value as two separate arguments.
    pub fn add_pair(&mut self, flag: &str, value: impl Into<String>) -> &mut Self {
        self.add(flag).add(value)
    }

    /// Append a flag whose value is a resolved secret; only the value is masked.
    pub fn add_secret_pair(&mut self, flag: &str, secret: impl Into<String>) -> &mut Self {
        self.add(flag).add_masked(secret, true)
    }

    /// Append `<prefix><value>` as one argument, e.g. `-c:` + `Release`.
    pub fn add_prefixed(&mut self, prefix: &str, value: &str) -> &mut Self {
        self.add(format!("{prefix}{value}"))
    }

    /// Append every item as its own argument.
    pub fn add_all<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.add(item);
        }
        self
    }

    /// Append one `<prefix>:<key>=<value>` argument per property, in order.
    pub fn add_properties(&mut self, prefix: &str, properties: &[Property]) -> &mut Self {
        for property in properties {
            self.add(property.to_arg(prefix));
        }
        self
    }

    /// The executable (first argument).
    pub fn executable(&self) -> &str {
        &self.args[0].text
    }

    /// Everything after the executable.
    pub fn args(&self) -> &[Arg] {
        &self.args[1..]
    }

    /// All arguments including the executable, as literal text.
    pub fn tokens(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.text.as_str()).collect()
    }

    /// Per-argument sensitivity flags, parallel to [`ArgumentList::tokens`].
    pub fn masks(&self) -> Vec<bool> {
        self.args.iter().map(|a| a.sensitive).collect()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.args.iter()
    }
}

/// Human-readable rendering with sensitive arguments redacted.
impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if arg.sensitive {
                f.write_str(REDACTED)?;
            } else if arg.text.is_empty() || arg.text.contains(char::is_whitespace) {
                write!(f, "'{}'", arg.text)?;
            } else {
                f.write_str(&arg.text)?;
            }
        }
        Ok(())
    }
}
