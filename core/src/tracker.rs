//! # Provenance Tracking
//!
//! A value paired with the path it was read from inside the source document.
//!
//! Every accessor threads a `Tracker` explicitly so diagnostics can point at the
//! exact node that failed (e.g. `.paths./pets.get.parameters[1].schema.$ref`).

use std::fmt;

/// A value together with the document path trail that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracker<T> {
    value: T,
    history: Vec<String>,
}

impl<T> Tracker<T> {
    /// Wraps a value read at the document root.
    pub fn new(value: T) -> Self {
        Self {
            value,
            history: Vec::new(),
        }
    }

    /// Wraps a value with an explicit history.
    pub fn with_history(value: T, history: Vec<String>) -> Self {
        Self { value, history }
    }

    /// Borrows the tracked value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Consumes the tracker, returning the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The accumulated path segments.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Renders the path trail (`.a.b[0]`); the root renders as `.`.
    pub fn show_history(&self) -> String {
        if self.history.is_empty() {
            ".".to_string()
        } else {
            self.history.concat()
        }
    }

    /// Borrowing view sharing the same trail.
    pub fn as_ref(&self) -> Tracker<&T> {
        Tracker {
            value: &self.value,
            history: self.history.clone(),
        }
    }

    /// Transforms the value, keeping the trail.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Tracker<U> {
        Tracker {
            value: f(self.value),
            history: self.history,
        }
    }

    /// Steps into a named child, if `f` yields one.
    pub fn down_field<'a, U>(
        &'a self,
        field: &str,
        f: impl FnOnce(&'a T) -> Option<U>,
    ) -> Option<Tracker<U>> {
        f(&self.value).map(|value| Tracker {
            value,
            history: self.child_history(format!(".{}", field)),
        })
    }

    /// Steps into a named child unconditionally.
    pub fn field<U>(&self, field: &str, value: U) -> Tracker<U> {
        Tracker {
            value,
            history: self.child_history(format!(".{}", field)),
        }
    }

    /// Steps into an indexed child.
    pub fn index<U>(&self, idx: usize, value: U) -> Tracker<U> {
        Tracker {
            value,
            history: self.child_history(format!("[{}]", idx)),
        }
    }

    fn child_history(&self, segment: String) -> Vec<String> {
        let mut history = self.history.clone();
        history.push(segment);
        history
    }
}

impl<T> Tracker<Option<T>> {
    /// Lifts an optional value out of the tracker.
    pub fn transpose(self) -> Option<Tracker<T>> {
        let history = self.history;
        self.value.map(|value| Tracker { value, history })
    }
}

impl<T: fmt::Display> fmt::Display for Tracker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.value, self.show_history())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_accumulates() {
        let root = Tracker::new(vec![10, 20]).field("parameters", 0u8);
        let nested = root.index(1, "schema").field("type", "string");
        assert_eq!(nested.show_history(), ".parameters[1].type");
        assert_eq!(*nested.get(), "string");
    }

    #[test]
    fn test_down_field_missing() {
        let t = Tracker::new(Some(3));
        assert!(t.down_field("x", |v| v.as_ref()).is_some());
        let empty: Tracker<Option<i32>> = Tracker::new(None);
        assert!(empty.down_field("x", |v| v.as_ref()).is_none());
    }

    #[test]
    fn test_root_history() {
        assert_eq!(Tracker::new(1).show_history(), ".");
    }

    #[test]
    fn test_transpose() {
        let t = Tracker::new(1).field("a", Some(2));
        let lifted = t.transpose().unwrap();
        assert_eq!(lifted.show_history(), ".a");
        assert_eq!(*lifted.get(), 2);
    }
}
