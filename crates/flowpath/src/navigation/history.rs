//! Navigation history.

/// LIFO stack of activity names visited with "next".
///
/// The history is only consulted by "previous" navigation when the
/// current activity has more than one incoming connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationHistory {
    stack: Vec<String>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, activity: impl Into<String>) {
        self.stack.push(activity.into());
    }

    /// Removes and returns the most recent entry.
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    /// The most recent entry.
    pub fn peek(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Entries from oldest to most recent.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut history = NavigationHistory::new();
        history.push("A");
        history.push("B");

        assert_eq!(history.peek(), Some("B"));
        assert_eq!(history.iter().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(history.pop().as_deref(), Some("B"));
        assert_eq!(history.pop().as_deref(), Some("A"));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }
}
