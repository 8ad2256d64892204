//! Serde mirror of the layout document.
//!
//! These types follow the XML shape one to one and are only used as the
//! deserialization target; [`crate::layout`] turns them into the
//! [`flowpath_core::layout`] model.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DiagramLayout {
    #[serde(rename = "@UID")]
    pub uid: Option<String>,
    #[serde(rename = "Elements")]
    pub elements: Option<Elements>,
    #[serde(rename = "Connections")]
    pub connections: Option<Connections>,
    #[serde(rename = "StartElement")]
    pub start_element: Option<StartElement>,
    #[serde(rename = "Exits")]
    pub exits: Option<Strings>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Elements {
    #[serde(rename = "DiagramElement", default)]
    pub items: Vec<DiagramElement>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DiagramElement {
    #[serde(rename = "@UID")]
    pub uid: Option<String>,
    #[serde(rename = "X")]
    pub x: Option<i32>,
    #[serde(rename = "Y")]
    pub y: Option<i32>,
    #[serde(rename = "Width")]
    pub width: Option<i32>,
    #[serde(rename = "Height")]
    pub height: Option<i32>,
    #[serde(rename = "Reference")]
    pub reference: Option<String>,
    #[serde(rename = "Comment")]
    pub comment: Option<Comment>,
    #[serde(rename = "OutConnectionRefs")]
    pub out_connection_refs: Option<Strings>,
    #[serde(rename = "InConnectionRefs")]
    pub in_connection_refs: Option<Strings>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Comment {
    #[serde(rename = "X", default)]
    pub x: i32,
    #[serde(rename = "Y", default)]
    pub y: i32,
    #[serde(rename = "Width", default)]
    pub width: i32,
    #[serde(rename = "Height", default)]
    pub height: i32,
    #[serde(rename = "Text")]
    pub text: Option<String>,
}

/// A list of `<string>` children, used for connection refs and exits.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Strings {
    #[serde(rename = "string", default)]
    pub values: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Connections {
    #[serde(rename = "DiagramConnection", default)]
    pub items: Vec<DiagramConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DiagramConnection {
    #[serde(rename = "@UID")]
    pub uid: Option<String>,
    #[serde(rename = "Splits")]
    pub splits: Option<Splits>,
    #[serde(rename = "EndPoints")]
    pub end_points: Option<EndPoints>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Splits {
    #[serde(rename = "DiagramSplit", default)]
    pub items: Vec<DiagramSplit>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DiagramSplit {
    #[serde(rename = "X", default)]
    pub x: i32,
    #[serde(rename = "Y", default)]
    pub y: i32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EndPoints {
    #[serde(rename = "DiagramEndPoint", default)]
    pub items: Vec<DiagramEndPoint>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DiagramEndPoint {
    #[serde(rename = "@ElementRef")]
    pub element_ref: Option<String>,
    #[serde(rename = "@ExitPointRef")]
    pub exit_point_ref: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StartElement {
    #[serde(rename = "@UID")]
    pub uid: Option<String>,
    #[serde(rename = "X")]
    pub x: Option<i32>,
    #[serde(rename = "Y")]
    pub y: Option<i32>,
    #[serde(rename = "Width")]
    pub width: Option<i32>,
    #[serde(rename = "Height")]
    pub height: Option<i32>,
    #[serde(rename = "OutConnectionRefs")]
    pub out_connection_refs: Option<Strings>,
    #[serde(rename = "InConnectionRefs")]
    pub in_connection_refs: Option<Strings>,
}
