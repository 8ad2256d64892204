//! Exit-point matching rules.
//!
//! Which outgoing connection "next" follows depends on the kind of the
//! current activity. Most kinds leave through their `Completed` exit.
//! Business rules and segmentation trees have named outcomes and the
//! caller picks one by name.

use std::fmt;

use flowpath_core::{activity::ActivityKind, layout::exit};

/// Transformation mode of the current activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformMode {
    Xslt,
    SetValue,
    /// The exit tag is lower-cased and compared with the exit name as given.
    BusinessRule,
    /// Exit names compare exactly.
    SegmentationTree,
    /// Kinds without a navigation rule.
    Other,
}

impl TransformMode {
    /// The mode used to navigate away from an activity of `kind`.
    pub fn for_activity(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::BizRule | ActivityKind::BusinessRule => Self::BusinessRule,
            ActivityKind::DataMapping | ActivityKind::DataSource => Self::Xslt,
            ActivityKind::SegmentationTree => Self::SegmentationTree,
            ActivityKind::SetValue => Self::SetValue,
            _ => Self::Other,
        }
    }

    /// Returns `true` if this mode picks the exit by a caller-supplied name.
    pub fn needs_exit_name(&self) -> bool {
        matches!(self, Self::BusinessRule | Self::SegmentationTree)
    }

    /// Builds the exit tag predicate for this mode.
    ///
    /// Returns `None` for [`TransformMode::Other`]. A missing `exit_name`
    /// in a named-exit mode yields a rule that matches nothing.
    pub(crate) fn exit_rule<'a>(&self, exit_name: Option<&'a str>) -> Option<ExitRule<'a>> {
        match self {
            Self::Xslt | Self::SetValue => Some(ExitRule::Exact(exit::COMPLETED)),
            Self::BusinessRule => Some(exit_name.map_or(ExitRule::Nothing, ExitRule::Lowercased)),
            Self::SegmentationTree => Some(exit_name.map_or(ExitRule::Nothing, ExitRule::Exact)),
            Self::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xslt => "XSLT",
            Self::SetValue => "SET_VALUE",
            Self::BusinessRule => "BUSINESS_RULE",
            Self::SegmentationTree => "SEGMENTATION_TREE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an endpoint's exit tag is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitRule<'a> {
    Exact(&'a str),
    /// Matches when the lower-cased tag equals the expected name.
    Lowercased(&'a str),
    Nothing,
}

impl ExitRule<'_> {
    pub(crate) fn matches(&self, tag: Option<&str>) -> bool {
        let Some(tag) = tag else {
            return false;
        };
        match self {
            ExitRule::Exact(expected) => tag == *expected,
            ExitRule::Lowercased(expected) => tag.to_lowercase() == *expected,
            ExitRule::Nothing => false,
        }
    }
}
