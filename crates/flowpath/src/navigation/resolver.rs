//! Next/previous activity resolution.
//!
//! Connections are stored without direction. The endpoint tagged
//! [`exit::ENTER`] is the destination side, the other endpoint's tag names
//! the exit the source leaves through.

use log::{debug, warn};

use flowpath_core::layout::{DiagramConnection, DiagramLayout, exit};

use super::{NavigationHistory, TransformMode};
use crate::FlowpathError;

/// Resolve the activity that follows `current`.
///
/// The first connection leaving `current` through an exit accepted by
/// `mode` is followed to its `Enter` side. `exit_name` selects the exit in
/// the business-rule and segmentation-tree modes and is ignored otherwise.
///
/// `current` is pushed onto `history` whether or not a next activity is
/// found.
///
/// # Errors
///
/// Returns [`FlowpathError::UnsupportedMode`] for [`TransformMode::Other`];
/// `history` is left untouched in that case.
pub fn resolve_next(
    layout: &DiagramLayout,
    history: &mut NavigationHistory,
    current: &str,
    mode: TransformMode,
    exit_name: Option<&str>,
) -> Result<Option<String>, FlowpathError> {
    let rule = mode
        .exit_rule(exit_name)
        .ok_or(FlowpathError::UnsupportedMode(mode))?;
    if exit_name.is_none() && mode.needs_exit_name() {
        warn!(activity = current, mode:%; "No exit name given, no connection can match");
    }

    let next = layout.uid_of(current).and_then(|uid| {
        let connection = layout
            .connections()
            .iter()
            .find(|conn| conn.has_endpoint(uid, |tag| rule.matches(tag)))?;
        debug!(activity = current, connection:? = connection.uid(); "Outgoing connection matched");

        let target = connection.endpoint_with_exit(exit::ENTER)?.element_ref()?;
        layout.reference_of(target)
    });

    if next.is_none() {
        debug!(activity = current, mode:%, exit_name:?; "No next activity");
    }

    history.push(current);
    Ok(next.map(str::to_string))
}

/// Resolve the activity that precedes `current`.
///
/// With a single connection entering `current` the activity on its other
/// side is returned. With several, the graph is ambiguous and the most
/// recent `history` entry is returned instead.
///
/// One `history` entry is consumed in every case, including when `current`
/// is not in the layout.
pub fn resolve_previous(
    layout: &DiagramLayout,
    history: &mut NavigationHistory,
    current: &str,
) -> Option<String> {
    let Some(uid) = layout.uid_of(current) else {
        history.pop();
        debug!(activity = current; "Activity not in layout");
        return None;
    };

    let incoming: Vec<&DiagramConnection> = layout.incoming(uid).collect();
    if incoming.len() > 1 {
        let previous = history.pop();
        debug!(
            activity = current,
            incoming = incoming.len(),
            previous:?;
            "Ambiguous predecessor, using history"
        );
        return previous;
    }

    history.pop();
    let previous = incoming
        .first()
        .and_then(|conn| conn.other_endpoint(uid))
        .and_then(|point| point.element_ref())
        .and_then(|source| layout.reference_of(source));

    debug!(activity = current, previous:?; "Predecessor from graph");
    previous.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use flowpath_core::layout::{DiagramElement, EndPoint};

    use super::*;

    fn element(uid: &str, name: &str) -> DiagramElement {
        DiagramElement::new(uid, Some(name))
    }

    fn connection(from: &str, exit_tag: &str, to: &str) -> DiagramConnection {
        DiagramConnection::new(
            None,
            [EndPoint::new(from, exit_tag), EndPoint::new(to, exit::ENTER)],
        )
    }

    /// A -> B, C -> B, B -> D.
    fn diamond() -> DiagramLayout {
        let mut layout = DiagramLayout::new(None);
        for (uid, name) in [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")] {
            layout.add_element(element(uid, name));
        }
        layout.add_connection(connection("a", exit::COMPLETED, "b"));
        layout.add_connection(connection("c", exit::COMPLETED, "b"));
        layout.add_connection(connection("b", exit::COMPLETED, "d"));
        layout
    }

    #[test]
    fn test_next_follows_completed() {
        let layout = diamond();
        let mut history = NavigationHistory::new();

        let next = resolve_next(&layout, &mut history, "A", TransformMode::Xslt, None)
            .expect("supported mode");
        assert_eq!(next.as_deref(), Some("B"));
        assert_eq!(history.peek(), Some("A"));
    }

    #[test]
    fn test_next_pushes_even_when_nothing_found() {
        let layout = diamond();
        let mut history = NavigationHistory::new();

        let next = resolve_next(&layout, &mut history, "D", TransformMode::SetValue, None)
            .expect("supported mode");
        assert_eq!(next, None);

        let next = resolve_next(&layout, &mut history, "Missing", TransformMode::Xslt, None)
            .expect("supported mode");
        assert_eq!(next, None);
        assert_eq!(history.iter().collect::<Vec<_>>(), ["D", "Missing"]);
    }

    #[test]
    fn test_next_other_mode_is_rejected() {
        let layout = diamond();
        let mut history = NavigationHistory::new();

        let result = resolve_next(&layout, &mut history, "A", TransformMode::Other, None);
        assert!(matches!(
            result,
            Err(FlowpathError::UnsupportedMode(TransformMode::Other))
        ));
        assert!(history.is_empty());
    }

    #[test]
    fn test_previous_ambiguous_uses_history() {
        let layout = diamond();
        let mut history = NavigationHistory::new();

        let next = resolve_next(&layout, &mut history, "A", TransformMode::Xslt, None)
            .expect("supported mode");
        assert_eq!(next.as_deref(), Some("B"));

        assert_eq!(resolve_previous(&layout, &mut history, "B").as_deref(), Some("A"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_previous_ambiguous_prefers_most_recent() {
        let layout = diamond();
        let mut history = NavigationHistory::new();
        history.push("A");
        history.push("C");

        assert_eq!(resolve_previous(&layout, &mut history, "B").as_deref(), Some("C"));
        assert_eq!(history.peek(), Some("A"));
    }

    #[test]
    fn test_previous_ambiguous_with_empty_history() {
        let layout = diamond();
        let mut history = NavigationHistory::new();
        assert_eq!(resolve_previous(&layout, &mut history, "B"), None);
    }

    #[test]
    fn test_previous_single_predecessor() {
        let layout = diamond();
        let mut history = NavigationHistory::new();
        history.push("Unrelated");
        history.push("B");

        assert_eq!(resolve_previous(&layout, &mut history, "D").as_deref(), Some("B"));
        assert_eq!(history.iter().collect::<Vec<_>>(), ["Unrelated"]);
    }

    #[test]
    fn test_previous_without_predecessor() {
        let layout = diamond();
        let mut history = NavigationHistory::new();
        history.push("X");

        assert_eq!(resolve_previous(&layout, &mut history, "A"), None);
        assert!(history.is_empty());

        history.push("X");
        assert_eq!(resolve_previous(&layout, &mut history, "Missing"), None);
        assert!(history.is_empty());
    }

    #[test]
    fn test_previous_unknown_activity_still_consumes_history() {
        let layout = DiagramLayout::new(None);
        let mut history = NavigationHistory::new();
        history.push("X");
        history.push("Y");

        assert_eq!(resolve_previous(&layout, &mut history, "Missing"), None);
        assert_eq!(history.iter().collect::<Vec<_>>(), ["X"]);
    }

    #[test]
    fn test_exit_name_case_sensitivity() {
        let mut layout = DiagramLayout::new(None);
        layout.add_element(element("r", "Rule"));
        layout.add_element(element("n", "Next"));
        layout.add_connection(connection("r", "Completed", "n"));
        let mut history = NavigationHistory::new();

        let next = resolve_next(
            &layout,
            &mut history,
            "Rule",
            TransformMode::BusinessRule,
            Some("completed"),
        )
        .expect("supported mode");
        assert_eq!(next.as_deref(), Some("Next"));

        // Only the tag is lower-cased for business rules.
        let next = resolve_next(
            &layout,
            &mut history,
            "Rule",
            TransformMode::BusinessRule,
            Some("Completed"),
        )
        .expect("supported mode");
        assert_eq!(next, None);

        let next = resolve_next(
            &layout,
            &mut history,
            "Rule",
            TransformMode::SegmentationTree,
            Some("completed"),
        )
        .expect("supported mode");
        assert_eq!(next, None);

        let next = resolve_next(
            &layout,
            &mut history,
            "Rule",
            TransformMode::SegmentationTree,
            Some("Completed"),
        )
        .expect("supported mode");
        assert_eq!(next.as_deref(), Some("Next"));
    }

    #[test]
    fn test_named_exits_pick_branch() {
        let mut layout = DiagramLayout::new(None);
        layout.add_element(element("t", "Tree"));
        layout.add_element(element("y", "Young"));
        layout.add_element(element("o", "Old"));
        layout.add_connection(connection("t", "Under30", "y"));
        layout.add_connection(connection("t", "Over30", "o"));
        let mut history = NavigationHistory::new();

        let next = resolve_next(
            &layout,
            &mut history,
            "Tree",
            TransformMode::SegmentationTree,
            Some("Over30"),
        )
        .expect("supported mode");
        assert_eq!(next.as_deref(), Some("Old"));

        let next = resolve_next(&layout, &mut history, "Tree", TransformMode::BusinessRule, None)
            .expect("supported mode");
        assert_eq!(next, None);
    }

    #[test]
    fn test_malformed_connections_are_not_candidates() {
        let mut layout = DiagramLayout::new(None);
        layout.add_element(element("a", "A"));
        layout.add_element(element("b", "B"));
        let three = vec![
            EndPoint::new("a", exit::COMPLETED),
            EndPoint::new("b", exit::ENTER),
            EndPoint::new("b", exit::ENTER),
        ];
        if let Some(conn) = DiagramConnection::from_endpoints(None, three) {
            layout.add_connection(conn);
        }
        let mut history = NavigationHistory::new();

        let next = resolve_next(&layout, &mut history, "A", TransformMode::Xslt, None)
            .expect("supported mode");
        assert_eq!(next, None);
        assert_eq!(resolve_previous(&layout, &mut history, "B"), None);
    }
}
