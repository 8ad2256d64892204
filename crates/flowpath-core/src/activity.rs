//! Activity kinds.
//!
//! An activity's definition file starts with a root element whose tag name
//! identifies what kind of step the activity is. [`ActivityKind::classify`]
//! reads that tag from the first line of the file.

use std::fmt;

use crate::encoding;

/// The kind of a business-process activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    BizRule,
    DataSource,
    Dispatch,
    Form,
    DataMapping,
    ProcedureCall,
    SegmentationTree,
    SetValue,
    Wait,
    ProcedureReturn,
    EndProcess,
    SendEmail,
    SetPhase,
    BusinessRule,
    Unknown,
}

/// Root tag prefixes in match order. The first prefix that matches wins.
const ROOT_TAGS: &[(&str, ActivityKind)] = &[
    ("<BizRuleActivityDefinition", ActivityKind::BizRule),
    ("<DataSourceActivityDefinition", ActivityKind::DataSource),
    ("<DispatchActivityDefinition", ActivityKind::Dispatch),
    ("<FormActivityDefinition", ActivityKind::Form),
    ("<MappingActivityDefinition", ActivityKind::DataMapping),
    ("<ProcedureCallActivityDefinition", ActivityKind::ProcedureCall),
    ("<SegmentationTreeActivityDefinition", ActivityKind::SegmentationTree),
    ("<SetValueActivityDefinition", ActivityKind::SetValue),
    ("<WaitActivityDefinition", ActivityKind::Wait),
    ("<ProcedureReturnActivityDefinition", ActivityKind::ProcedureReturn),
    ("<EndProcessActivityDefinition", ActivityKind::EndProcess),
    ("<SendEMailActivityDefinition", ActivityKind::SendEmail),
    ("<PhaseActivityDefinition", ActivityKind::SetPhase),
    ("<BusinessRule", ActivityKind::BusinessRule),
];

impl ActivityKind {
    /// Classifies an activity definition file from its raw bytes.
    ///
    /// The bytes are decoded with [`encoding::read_text`] and only the first
    /// line is inspected. Returns [`ActivityKind::Unknown`] when no known
    /// root tag starts that line.
    ///
    /// # Example
    ///
    /// ```
    /// use flowpath_core::activity::ActivityKind;
    ///
    /// let kind = ActivityKind::classify(b"<SetValueActivityDefinition Name=\"x\">\n</SetValueActivityDefinition>");
    /// assert_eq!(kind, ActivityKind::SetValue);
    /// ```
    pub fn classify(bytes: &[u8]) -> Self {
        let text = encoding::read_text(bytes);
        let header = text.lines().next().unwrap_or_default().replace('\u{FEFF}', "");
        Self::from_header(&header)
    }

    fn from_header(header: &str) -> Self {
        ROOT_TAGS
            .iter()
            .find(|(tag, _)| header.starts_with(tag))
            .map(|(_, kind)| *kind)
            .unwrap_or(ActivityKind::Unknown)
    }

    /// Returns the root tag prefix that identifies this kind, if any.
    pub fn root_tag(&self) -> Option<&'static str> {
        ROOT_TAGS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(tag, _)| *tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::BizRule => "BIZ_RULE",
            ActivityKind::DataSource => "DATA_SOURCE",
            ActivityKind::Dispatch => "DISPATCH",
            ActivityKind::Form => "FORM",
            ActivityKind::DataMapping => "DATA_MAPPING",
            ActivityKind::ProcedureCall => "PROCEDURE_CALL",
            ActivityKind::SegmentationTree => "SEGMENTATION_TREE",
            ActivityKind::SetValue => "SET_VALUE",
            ActivityKind::Wait => "WAIT",
            ActivityKind::ProcedureReturn => "PROCEDURE_RETURN",
            ActivityKind::EndProcess => "END_PROCESS",
            ActivityKind::SendEmail => "SEND_EMAIL",
            ActivityKind::SetPhase => "SET_PHASE",
            ActivityKind::BusinessRule => "BUSINESS_RULE",
            ActivityKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
