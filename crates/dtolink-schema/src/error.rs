use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-keyed accumulation of validation messages. Validation never stops
/// at the first problem; every node reports into its own branch and the
/// caller receives the whole tree at once.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Add a message at this level.
    pub fn add(&mut self, message: impl ToString) {
        self.messages.push(message.to_string());
    }

    /// Add a message under a child route.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl ToString) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Merge another tree under a child route. Empty trees are dropped.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        self.children.entry(route.into()).or_default().merge(other);
    }

    /// Merge another tree into this level.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.merge_for(route, child);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs, routes joined with `.`.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((prefix.to_string(), message.clone()));
        }

        for (route, child) in &self.children {
            let path = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix}.{route}")
            };
            child.flatten_into(&path, out);
        }
    }

    /// Convert into a `Result`, `Ok` when nothing was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (route, message)) in self.flatten().iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            if route.is_empty() {
                write!(f, "{message}")?;
            } else {
                write!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Record a formatted message in an `ErrorTree`.
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        let errs = ErrorTree::new();

        assert!(errs.is_empty());
        assert_eq!(errs.len(), 0);
        assert!(errs.result().is_ok());
    }

    #[test]
    fn routes_are_flattened_in_order() {
        let mut errs = ErrorTree::new();
        errs.add("top");
        errs.add_for("Order", "missing key");

        let mut child = ErrorTree::new();
        child.add_for("amount", "bad type");
        errs.merge_for("Order", child);

        assert_eq!(errs.len(), 3);
        assert_eq!(
            errs.flatten(),
            vec![
                (String::new(), "top".to_string()),
                ("Order".to_string(), "missing key".to_string()),
                ("Order.amount".to_string(), "bad type".to_string()),
            ]
        );
        assert_eq!(
            errs.to_string(),
            "top\nOrder: missing key\nOrder.amount: bad type"
        );
    }

    #[test]
    fn merging_empty_child_adds_nothing() {
        let mut errs = ErrorTree::new();
        errs.merge_for("Order", ErrorTree::new());

        assert!(errs.is_empty());
        assert!(errs.flatten().is_empty());
    }

    #[test]
    fn err_macro_formats() {
        let mut errs = ErrorTree::new();
        err!(errs, "value {} too large", 7);

        assert_eq!(errs.result().unwrap_err().to_string(), "value 7 too large");
    }
}
