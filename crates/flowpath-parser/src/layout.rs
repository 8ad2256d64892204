//! Layout document parsing.
//!
//! Parsing runs in two passes over the decoded text:
//!
//! 1. **Check** - a streaming pass with [`quick_xml::Reader`] that verifies
//!    the document is well-formed and that its root is `DiagramLayout`.
//!    Failures carry byte spans for reporting.
//! 2. **Map** - serde deserialization into [`layout_types`] followed by
//!    conversion into the [`flowpath_core::layout`] model. Malformed
//!    connections and elements without a UID are skipped here.

use log::{debug, trace, warn};
use quick_xml::{Reader, events::Event};

use flowpath_core::layout::{
    Bounds, Comment, DiagramConnection, DiagramElement, DiagramLayout, EndPoint, SplitPoint,
    StartElement,
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    layout_types as types,
    span::Span,
};

/// Local name of the layout document root element.
pub const ROOT_ELEMENT: &str = "DiagramLayout";

/// Parse decoded layout text into a [`DiagramLayout`].
pub(crate) fn parse(source: &str) -> Result<DiagramLayout, ParseError> {
    check_markup(source)?;

    let document: types::DiagramLayout = quick_xml::de::from_str(source).map_err(|err| {
        Diagnostic::error(format!("layout document does not match the expected structure: {err}"))
            .with_code(ErrorCode::E101)
    })?;

    let layout = build_layout(document);
    debug!(
        elements = layout.elements_count(),
        connections = layout.connections().len();
        "Layout parsed"
    );
    trace!(layout:?; "Parsed layout");

    Ok(layout)
}

/// Verify well-formedness and the root element name.
fn check_markup(source: &str) -> Result<(), Diagnostic> {
    let mut reader = Reader::from_str(source);
    let mut open: Vec<(String, Span)> = Vec::new();
    let mut seen_root = false;

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|err| {
            let at = reader.error_position() as usize;
            Diagnostic::error(err.to_string())
                .with_code(ErrorCode::E001)
                .with_label(Span::at(at), "markup error here")
        })?;
        let span = Span::new(start..reader.buffer_position() as usize);

        match &event {
            Event::Start(tag) | Event::Empty(tag) if !seen_root => {
                seen_root = true;
                let name = String::from_utf8_lossy(tag.local_name().as_ref()).into_owned();
                if name != ROOT_ELEMENT {
                    return Err(Diagnostic::error(format!(
                        "expected `{ROOT_ELEMENT}` root element, found `{name}`"
                    ))
                    .with_code(ErrorCode::E100)
                    .with_label(span, "unexpected root element")
                    .with_help("navigation needs the project's layout document"));
                }
                if matches!(event, Event::Start(_)) {
                    open.push((name, span));
                }
            }
            Event::Start(tag) => {
                let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
                open.push((name, span));
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(Diagnostic::error("document has no root element")
            .with_code(ErrorCode::E100)
            .with_label(Span::at(source.len()), "document ends here"));
    }

    if let Some((name, opened)) = open.last() {
        return Err(Diagnostic::error("unexpected end of document")
            .with_code(ErrorCode::E002)
            .with_label(Span::at(source.len()), "document ends here")
            .with_secondary_label(*opened, format!("`{name}` opened here"))
            .with_help("close every element before the end of the document"));
    }

    Ok(())
}

fn build_layout(document: types::DiagramLayout) -> DiagramLayout {
    let mut layout = DiagramLayout::new(document.uid);

    for raw in document.elements.map(|e| e.items).unwrap_or_default() {
        let Some(uid) = raw.uid else {
            warn!(reference:? = raw.reference; "Element without UID skipped");
            continue;
        };

        let mut element = DiagramElement::new(uid, raw.reference.as_deref())
            .with_bounds(Bounds {
                x: raw.x,
                y: raw.y,
                width: raw.width,
                height: raw.height,
            })
            .with_connection_refs(strings(raw.out_connection_refs), strings(raw.in_connection_refs));
        if let Some(comment) = raw.comment {
            element = element.with_comment(Comment {
                x: comment.x,
                y: comment.y,
                width: comment.width,
                height: comment.height,
                text: comment.text,
            });
        }

        layout.add_element(element);
    }

    for raw in document.connections.map(|c| c.items).unwrap_or_default() {
        let endpoints: Vec<EndPoint> = raw
            .end_points
            .map(|points| points.items)
            .unwrap_or_default()
            .into_iter()
            .map(|point| EndPoint::from_parts(point.element_ref, point.exit_point_ref))
            .collect();
        let count = endpoints.len();

        let Some(connection) = DiagramConnection::from_endpoints(raw.uid.clone(), endpoints) else {
            warn!(uid:? = raw.uid, endpoints = count; "Connection without exactly two endpoints skipped");
            continue;
        };

        let split_points = raw
            .splits
            .map(|splits| splits.items)
            .unwrap_or_default()
            .into_iter()
            .map(|split| SplitPoint {
                x: split.x,
                y: split.y,
            })
            .collect();

        layout.add_connection(connection.with_split_points(split_points));
    }

    if let Some(start) = document.start_element {
        layout.set_start_element(StartElement {
            uid: start.uid,
            bounds: Bounds {
                x: start.x,
                y: start.y,
                width: start.width,
                height: start.height,
            },
            out_connection_refs: strings(start.out_connection_refs),
            in_connection_refs: strings(start.in_connection_refs),
        });
    }

    for exit in strings(document.exits) {
        layout.add_exit(exit);
    }

    layout
}

fn strings(list: Option<types::Strings>) -> Vec<String> {
    list.map(|list| list.values).unwrap_or_default()
}
