//! Diagram graph model for process layout documents.
//!
//! A [`DiagramLayout`] is a read-only view of a project's layout document:
//! the activities ([`DiagramElement`]s, keyed by UID) and the directed
//! [`DiagramConnection`]s between their exit points.
//!
//! Connections are stored without a direction. The direction comes from the
//! exit tags on the two [`EndPoint`]s: the endpoint tagged [`exit::ENTER`]
//! is the destination, the other one names the exit the flow leaves by.
//!
//! # Example
//!
//! ```
//! use flowpath_core::layout::{DiagramConnection, DiagramElement, DiagramLayout, EndPoint, exit};
//!
//! let mut layout = DiagramLayout::new(None);
//! layout.add_element(DiagramElement::new("u1", Some("Load")));
//! layout.add_element(DiagramElement::new("u2", Some("Store")));
//! layout.add_connection(DiagramConnection::new(
//!     None,
//!     [EndPoint::new("u1", exit::COMPLETED), EndPoint::new("u2", exit::ENTER)],
//! ));
//!
//! assert_eq!(layout.uid_of("Store"), Some("u2"));
//! assert_eq!(layout.reference_of("u1"), Some("Load"));
//! ```

use indexmap::IndexMap;
use log::warn;

/// Well-known exit point tags.
pub mod exit {
    /// Tag on the endpoint a connection enters its destination through.
    pub const ENTER: &str = "Enter";
    /// Generic successful-exit tag.
    pub const COMPLETED: &str = "Completed";
    /// Tag on the endpoint attached to the start element.
    pub const START: &str = "Start";
}

/// Position and size of a shape on the diagram canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// A sticky note attached to an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub text: Option<String>,
}

/// One activity block on the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramElement {
    uid: String,
    reference: Option<String>,
    bounds: Bounds,
    comment: Option<Comment>,
    out_connection_refs: Vec<String>,
    in_connection_refs: Vec<String>,
}

impl DiagramElement {
    /// Creates an element with the given UID and reference name.
    pub fn new(uid: impl Into<String>, reference: Option<&str>) -> Self {
        Self {
            uid: uid.into(),
            reference: reference.map(str::to_owned),
            bounds: Bounds::default(),
            comment: None,
            out_connection_refs: Vec::new(),
            in_connection_refs: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn with_connection_refs(mut self, outgoing: Vec<String>, incoming: Vec<String>) -> Self {
        self.out_connection_refs = outgoing;
        self.in_connection_refs = incoming;
        self
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// The activity folder name this element stands for.
    pub fn reference_name(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn comment(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }

    pub fn out_connection_refs(&self) -> &[String] {
        &self.out_connection_refs
    }

    pub fn in_connection_refs(&self) -> &[String] {
        &self.in_connection_refs
    }
}

/// One side of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndPoint {
    element_ref: Option<String>,
    exit_point_ref: Option<String>,
}

impl EndPoint {
    pub fn new(element_ref: impl Into<String>, exit_point_ref: impl Into<String>) -> Self {
        Self {
            element_ref: Some(element_ref.into()),
            exit_point_ref: Some(exit_point_ref.into()),
        }
    }

    /// Creates an endpoint from possibly missing attributes.
    pub fn from_parts(element_ref: Option<String>, exit_point_ref: Option<String>) -> Self {
        Self {
            element_ref,
            exit_point_ref,
        }
    }

    /// UID of the element this endpoint is attached to.
    pub fn element_ref(&self) -> Option<&str> {
        self.element_ref.as_deref()
    }

    /// The exit tag of this endpoint.
    pub fn exit_point_ref(&self) -> Option<&str> {
        self.exit_point_ref.as_deref()
    }

    /// Returns `true` if this endpoint is attached to `uid`.
    pub fn is_on(&self, uid: &str) -> bool {
        self.element_ref() == Some(uid)
    }

    /// Returns `true` if this endpoint carries exactly the tag `exit`.
    pub fn has_exit(&self, exit: &str) -> bool {
        self.exit_point_ref() == Some(exit)
    }
}

/// An intermediate waypoint of a connection line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitPoint {
    pub x: i32,
    pub y: i32,
}

/// A connection between two element exit points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramConnection {
    uid: Option<String>,
    endpoints: [EndPoint; 2],
    split_points: Vec<SplitPoint>,
}

impl DiagramConnection {
    pub fn new(uid: Option<String>, endpoints: [EndPoint; 2]) -> Self {
        Self {
            uid,
            endpoints,
            split_points: Vec::new(),
        }
    }

    /// Builds a connection from a list of endpoints.
    ///
    /// Returns `None` unless there are exactly two endpoints.
    pub fn from_endpoints(uid: Option<String>, endpoints: Vec<EndPoint>) -> Option<Self> {
        let endpoints: [EndPoint; 2] = endpoints.try_into().ok()?;
        Some(Self::new(uid, endpoints))
    }

    pub fn with_split_points(mut self, split_points: Vec<SplitPoint>) -> Self {
        self.split_points = split_points;
        self
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn endpoints(&self) -> &[EndPoint; 2] {
        &self.endpoints
    }

    pub fn split_points(&self) -> &[SplitPoint] {
        &self.split_points
    }

    /// Returns `true` if any endpoint is attached to `uid` and satisfies `exit_matches`.
    pub fn has_endpoint(&self, uid: &str, exit_matches: impl Fn(Option<&str>) -> bool) -> bool {
        self.endpoints
            .iter()
            .any(|point| point.is_on(uid) && exit_matches(point.exit_point_ref()))
    }

    /// Returns `true` if this connection enters the element `uid`.
    pub fn enters(&self, uid: &str) -> bool {
        self.has_endpoint(uid, |tag| tag == Some(exit::ENTER))
    }

    /// The first endpoint carrying the tag `exit`.
    pub fn endpoint_with_exit(&self, exit: &str) -> Option<&EndPoint> {
        self.endpoints.iter().find(|point| point.has_exit(exit))
    }

    /// The first endpoint not attached to `uid`.
    pub fn other_endpoint(&self, uid: &str) -> Option<&EndPoint> {
        self.endpoints.iter().find(|point| !point.is_on(uid))
    }
}

/// The start marker of a process diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartElement {
    pub uid: Option<String>,
    pub bounds: Bounds,
    pub out_connection_refs: Vec<String>,
    pub in_connection_refs: Vec<String>,
}

/// A parsed layout document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramLayout {
    uid: Option<String>,
    elements: IndexMap<String, DiagramElement>,
    connections: Vec<DiagramConnection>,
    start_element: Option<StartElement>,
    exits: Vec<String>,
}

impl DiagramLayout {
    pub fn new(uid: Option<String>) -> Self {
        Self {
            uid,
            ..Self::default()
        }
    }

    /// Adds an element, keyed by its UID.
    ///
    /// A second element with an already known UID is ignored and `false`
    /// is returned.
    pub fn add_element(&mut self, element: DiagramElement) -> bool {
        if self.elements.contains_key(element.uid()) {
            warn!(uid = element.uid(); "Duplicate element UID ignored");
            return false;
        }
        self.elements.insert(element.uid.clone(), element);
        true
    }

    pub fn add_connection(&mut self, connection: DiagramConnection) {
        self.connections.push(connection);
    }

    pub fn set_start_element(&mut self, start: StartElement) {
        self.start_element = Some(start);
    }

    pub fn add_exit(&mut self, exit: impl Into<String>) {
        self.exits.push(exit.into());
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Returns the element with the given UID.
    pub fn element(&self, uid: &str) -> Option<&DiagramElement> {
        self.elements.get(uid)
    }

    /// Iterates over elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &DiagramElement> {
        self.elements.values()
    }

    pub fn elements_count(&self) -> usize {
        self.elements.len()
    }

    /// Connections in document order.
    pub fn connections(&self) -> &[DiagramConnection] {
        &self.connections
    }

    pub fn start_element(&self) -> Option<&StartElement> {
        self.start_element.as_ref()
    }

    /// Names of the process exits.
    pub fn exits(&self) -> &[String] {
        &self.exits
    }

    /// UID of the first element whose reference name is `reference`.
    pub fn uid_of(&self, reference: &str) -> Option<&str> {
        self.elements()
            .find(|element| element.reference_name() == Some(reference))
            .map(DiagramElement::uid)
    }

    /// Reference name of the element with UID `uid`.
    pub fn reference_of(&self, uid: &str) -> Option<&str> {
        self.element(uid).and_then(DiagramElement::reference_name)
    }

    /// Connections entering the element `uid`.
    pub fn incoming(&self, uid: &str) -> impl Iterator<Item = &DiagramConnection> {
        self.connections.iter().filter(move |conn| conn.enters(uid))
    }

    /// Reference name of the process entry activity.
    ///
    /// This is the element on the far side of the first connection that
    /// has an endpoint tagged [`exit::START`].
    pub fn first_activity(&self) -> Option<&str> {
        let connection = self
            .connections
            .iter()
            .find(|conn| conn.endpoint_with_exit(exit::START).is_some())?;
        let target = connection
            .endpoints()
            .iter()
            .find(|point| !point.has_exit(exit::START))?
            .element_ref()?;
        self.reference_of(target)
    }
}
