//! XPath derivation from a cursor position.
//!
//! [`build_xpath`] reconstructs the absolute, indexed XPath of the element
//! (or attribute) under a cursor in raw XML text. It does not build a
//! document tree: a single forward scan recognises tag tokens with one
//! regex per token kind and keeps a stack of open elements.
//!
//! The scanner is lenient. It never rejects input, a closing tag pops
//! whatever element is on top of the stack, and a closing tag with an
//! empty stack is ignored.
//!
//! Offsets are byte offsets into the text.
//!
//! # Example
//!
//! ```
//! use flowpath_parser::xpath::build_xpath;
//!
//! let xml = r#"<Root><Item/><Item id="42"/></Root>"#;
//! let offset = xml.find("42").unwrap();
//!
//! let meta = build_xpath(xml, offset);
//! assert_eq!(meta.xpath(), "/Root[1]/Item[2]/@id");
//! assert_eq!(meta.segments().len(), 2);
//! ```

use std::{collections::HashMap, fmt, ops::Range, sync::LazyLock};

use indexmap::IndexMap;
use log::trace;
use regex::Regex;

static SELF_CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<([A-Za-z_][\w:.\-]*)([^>]*?)/>").expect("self-closing tag pattern is valid")
});

static OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<([A-Za-z_][\w:.\-]*)([^>]*?)>").expect("opening tag pattern is valid")
});

static CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^</([A-Za-z_][\w:.\-]*)\s*>").expect("closing tag pattern is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute pattern is valid")
});

/// Metadata for one step of a derived path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegMeta {
    name: String,
    predicate: String,
    attributes: IndexMap<String, String>,
}

impl SegMeta {
    /// Element name of this step.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sibling index predicate, rendered as `[n]`.
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Attributes found on the element's tag, in document order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Predicate alternatives for this step.
    ///
    /// By index first (when there is an index), then no predicate, then
    /// one choice per attribute.
    pub fn choices(&self) -> Vec<PredicateChoice> {
        let mut choices = Vec::with_capacity(self.attributes.len() + 2);
        if !self.predicate.is_empty() {
            choices.push(PredicateChoice::Index);
        }
        choices.push(PredicateChoice::NoPredicate);
        choices.extend(
            self.attributes
                .iter()
                .map(|(name, value)| PredicateChoice::Attribute {
                    name: name.clone(),
                    value: value.clone(),
                }),
        );
        choices
    }

    fn render(&self, choice: &PredicateChoice) -> String {
        match choice {
            PredicateChoice::Index => format!("/{}{}", self.name, self.predicate),
            PredicateChoice::NoPredicate => format!("/{}", self.name),
            PredicateChoice::Attribute { name, value } => {
                format!("/{}[@{name}='{value}']", self.name)
            }
        }
    }
}

/// How one step of a path is narrowed when the path is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateChoice {
    /// Keep the sibling index, e.g. `Item[2]`.
    Index,
    /// No predicate, e.g. `Item`.
    NoPredicate,
    /// Match an attribute value, e.g. `Item[@id='42']`.
    Attribute { name: String, value: String },
}

impl fmt::Display for PredicateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateChoice::Index => write!(f, "by index"),
            PredicateChoice::NoPredicate => write!(f, "no predicate"),
            PredicateChoice::Attribute { name, value } => write!(f, "@{name}='{value}'"),
        }
    }
}

/// A derived path and the metadata of each of its steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPathMeta {
    xpath: String,
    segments: Vec<SegMeta>,
}

impl XPathMeta {
    /// The derived absolute path.
    pub fn xpath(&self) -> &str {
        &self.xpath
    }

    /// One entry per element step of the path, root first.
    pub fn segments(&self) -> &[SegMeta] {
        &self.segments
    }

    /// Renders the element steps again with the given predicate per step.
    ///
    /// Steps without a choice keep their index predicate. An attribute
    /// suffix of the derived path is not part of the result.
    pub fn rebuild(&self, choices: &[PredicateChoice]) -> String {
        let rebuilt: String = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, seg)| seg.render(choices.get(i).unwrap_or(&PredicateChoice::Index)))
            .collect();

        if rebuilt.is_empty() { "/".to_string() } else { rebuilt }
    }
}

/// One open element on the scan stack.
#[derive(Debug)]
struct Frame {
    name: String,
    index: usize,
    attributes: IndexMap<String, String>,
    child_counts: HashMap<String, usize>,
}

impl Frame {
    fn segment(&self) -> SegMeta {
        SegMeta {
            name: self.name.clone(),
            predicate: format!("[{}]", self.index),
            attributes: self.attributes.clone(),
        }
    }
}

/// Tag-stream scanner state.
#[derive(Default)]
struct Scanner {
    stack: Vec<Frame>,
    root_counts: HashMap<String, usize>,
}

impl Scanner {
    fn open_frame(&mut self, name: &str, tag: &str) -> Frame {
        let counts = match self.stack.last_mut() {
            Some(parent) => &mut parent.child_counts,
            None => &mut self.root_counts,
        };
        let index = counts.entry(name.to_string()).or_insert(0);
        *index += 1;

        Frame {
            name: name.to_string(),
            index: *index,
            attributes: attributes_of(tag),
            child_counts: HashMap::new(),
        }
    }

    fn segments(&self) -> Vec<SegMeta> {
        self.stack.iter().map(Frame::segment).collect()
    }
}

/// Where the cursor was found during the scan.
struct Hit {
    segments: Vec<SegMeta>,
    /// Span of the start tag under the cursor, used for attribute lookup.
    tag: Option<Range<usize>>,
}

/// Derive the XPath of the node at byte `offset` in `xml`.
///
/// The cursor may sit in a start tag, an empty-element tag, a closing tag
/// or the text between tags. Inside a start tag, a cursor on an attribute's
/// name or value yields the attribute's path (`.../@name`).
///
/// When the cursor is not found (e.g. it lies past the last tag) the path
/// of the elements still open at the end of the scan is returned. With no
/// open elements the path is `/`.
pub fn build_xpath(xml: &str, offset: usize) -> XPathMeta {
    let mut scanner = Scanner::default();
    let hit = scan(xml, offset, &mut scanner);

    let (segments, suffix) = match hit {
        Some(hit) => {
            let suffix = hit
                .tag
                .and_then(|tag| attribute_at(xml, tag, offset))
                .map(|name| format!("/@{name}"))
                .unwrap_or_default();
            (hit.segments, suffix)
        }
        None => (scanner.segments(), String::new()),
    };

    let mut xpath: String = segments
        .iter()
        .map(|seg| format!("/{}{}", seg.name, seg.predicate))
        .collect();
    if xpath.is_empty() {
        xpath.push('/');
    }
    xpath.push_str(&suffix);

    trace!(offset, xpath; "XPath derived");
    XPathMeta { xpath, segments }
}

fn scan(xml: &str, offset: usize, scanner: &mut Scanner) -> Option<Hit> {
    let mut i = 0;

    while i < xml.len() {
        let lt = i + xml[i..].find('<')?;

        // Text between tags belongs to the innermost open element.
        if (i..lt).contains(&offset) {
            return Some(Hit {
                segments: scanner.segments(),
                tag: None,
            });
        }

        let rest = &xml[lt..];

        if let Some(caps) = SELF_CLOSING_TAG.captures(rest) {
            let tag = &caps[0];
            let end = lt + tag.len();
            let frame = scanner.open_frame(&caps[1], tag);
            if (lt..end).contains(&offset) {
                let mut segments = scanner.segments();
                segments.push(frame.segment());
                return Some(Hit {
                    segments,
                    tag: Some(lt..end),
                });
            }
            i = end;
            continue;
        }

        if let Some(caps) = OPENING_TAG.captures(rest) {
            let tag = &caps[0];
            let end = lt + tag.len();
            let frame = scanner.open_frame(&caps[1], tag);
            scanner.stack.push(frame);
            if (lt..end).contains(&offset) {
                return Some(Hit {
                    segments: scanner.segments(),
                    tag: Some(lt..end),
                });
            }
            i = end;
            continue;
        }

        if let Some(close) = CLOSING_TAG.find(rest) {
            let end = lt + close.end();
            if (lt..end).contains(&offset) && !scanner.stack.is_empty() {
                return Some(Hit {
                    segments: scanner.segments(),
                    tag: None,
                });
            }
            scanner.stack.pop();
            i = end;
            continue;
        }

        // Not a tag we track (declaration, comment, stray `<`).
        i = lt + 1;
    }

    None
}

fn attributes_of(tag: &str) -> IndexMap<String, String> {
    ATTRIBUTE
        .captures_iter(tag)
        .map(|caps| {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

/// Name of the attribute whose `name="value"` text covers `offset`.
fn attribute_at(xml: &str, tag: Range<usize>, offset: usize) -> Option<String> {
    let start = tag.start;
    ATTRIBUTE
        .captures_iter(&xml[tag])
        .find(|caps| {
            caps.get(0)
                .is_some_and(|m| (start + m.start()..start + m.end()).contains(&offset))
        })
        .map(|caps| caps[1].to_string())
}
