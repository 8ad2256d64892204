//! Integration tests for the Navigator API
//!
//! Each test builds a small project folder on disk:
//!
//! ```text
//! Start -> Intake -> Review -Approve-> Pay    -> Close
//!                          \-Reject--> Notify -/
//! ```

use std::{fs, path::PathBuf};

use tempfile::TempDir;

use flowpath::{
    FlowpathError, Navigator, SessionId,
    activity::ActivityKind,
    config::AppConfig,
    encoding,
    navigation::TransformMode,
};

const LAYOUT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<DiagramLayout UID="claims">
  <Elements>
    <DiagramElement UID="a"><X>10</X><Y>10</Y><Reference>Intake</Reference></DiagramElement>
    <DiagramElement UID="b"><Reference>Review</Reference></DiagramElement>
    <DiagramElement UID="c"><Reference>Pay</Reference></DiagramElement>
    <DiagramElement UID="d"><Reference>Notify</Reference></DiagramElement>
    <DiagramElement UID="e"><Reference>Close</Reference></DiagramElement>
  </Elements>
  <Connections>
    <DiagramConnection UID="c0">
      <EndPoints>
        <DiagramEndPoint ElementRef="start" ExitPointRef="Start"/>
        <DiagramEndPoint ElementRef="a" ExitPointRef="Enter"/>
      </EndPoints>
    </DiagramConnection>
    <DiagramConnection UID="c1">
      <EndPoints>
        <DiagramEndPoint ElementRef="a" ExitPointRef="Completed"/>
        <DiagramEndPoint ElementRef="b" ExitPointRef="Enter"/>
      </EndPoints>
    </DiagramConnection>
    <DiagramConnection UID="c2">
      <EndPoints>
        <DiagramEndPoint ElementRef="b" ExitPointRef="Approve"/>
        <DiagramEndPoint ElementRef="c" ExitPointRef="Enter"/>
      </EndPoints>
    </DiagramConnection>
    <DiagramConnection UID="c3">
      <EndPoints>
        <DiagramEndPoint ElementRef="b" ExitPointRef="Reject"/>
        <DiagramEndPoint ElementRef="d" ExitPointRef="Enter"/>
      </EndPoints>
    </DiagramConnection>
    <DiagramConnection UID="c4">
      <EndPoints>
        <DiagramEndPoint ElementRef="c" ExitPointRef="Completed"/>
        <DiagramEndPoint ElementRef="e" ExitPointRef="Enter"/>
      </EndPoints>
    </DiagramConnection>
    <DiagramConnection UID="c5">
      <EndPoints>
        <DiagramEndPoint ElementRef="d" ExitPointRef="Completed"/>
        <DiagramEndPoint ElementRef="e" ExitPointRef="Enter"/>
      </EndPoints>
    </DiagramConnection>
    <DiagramConnection UID="broken">
      <EndPoints>
        <DiagramEndPoint ElementRef="a" ExitPointRef="Completed"/>
      </EndPoints>
    </DiagramConnection>
  </Connections>
  <StartElement UID="start"/>
  <Exits><string>Done</string></Exits>
</DiagramLayout>
"#;

const ACTIVITIES: &[(&str, &str)] = &[
    ("Intake", "<MappingActivityDefinition Name=\"Intake\">"),
    ("Review", "<BizRuleActivityDefinition Name=\"Review\">"),
    ("Pay", "<SetValueActivityDefinition Name=\"Pay\">"),
    ("Notify", "<DataSourceActivityDefinition Name=\"Notify\">"),
    ("Close", "<EndProcessActivityDefinition Name=\"Close\">"),
];

struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("Layout.xml"), LAYOUT).expect("Failed to write layout");

        for (name, header) in ACTIVITIES {
            let folder = dir.path().join(name);
            fs::create_dir(&folder).expect("Failed to create activity folder");
            fs::write(folder.join("Properties.xml"), format!("{header}\n</Definition>"))
                .expect("Failed to write definition");
        }

        Self { dir }
    }

    fn file(&self, activity: &str) -> PathBuf {
        self.dir.path().join(activity).join("Properties.xml")
    }
}

#[test]
fn test_first_activity() {
    let project = Project::new();
    let navigator = Navigator::default();

    let first = navigator.first_activity(project.dir.path()).expect("Failed to load layout");
    assert_eq!(first.as_deref(), Some("Intake"));
}

#[test]
fn test_walk_forward_and_back() {
    let project = Project::new();
    let mut navigator = Navigator::new(AppConfig::default());
    let session = SessionId::new("tab-1");

    let next = navigator
        .next(&session, &project.file("Intake"), TransformMode::Xslt, None)
        .expect("Failed to navigate");
    assert_eq!(next.as_deref(), Some("Review"));

    let next = navigator
        .next(&session, &project.file("Review"), TransformMode::BusinessRule, Some("approve"))
        .expect("Failed to navigate");
    assert_eq!(next.as_deref(), Some("Pay"));

    let next = navigator
        .next(&session, &project.file("Pay"), TransformMode::SetValue, None)
        .expect("Failed to navigate");
    assert_eq!(next.as_deref(), Some("Close"));

    // Close has two predecessors, the history decides.
    let previous = navigator
        .previous(&session, &project.file("Close"))
        .expect("Failed to navigate");
    assert_eq!(previous.as_deref(), Some("Pay"));

    // Pay has one predecessor, the graph decides.
    let previous = navigator
        .previous(&session, &project.file("Pay"))
        .expect("Failed to navigate");
    assert_eq!(previous.as_deref(), Some("Review"));

    let history = navigator.history(&session).expect("session exists");
    assert_eq!(history.iter().collect::<Vec<_>>(), ["Intake"]);
}

#[test]
fn test_sessions_are_independent() {
    let project = Project::new();
    let mut navigator = Navigator::default();
    let first = SessionId::new("first");
    let second = SessionId::new("second");

    navigator
        .next(&first, &project.file("Notify"), TransformMode::Xslt, None)
        .expect("Failed to navigate");
    navigator
        .next(&second, &project.file("Pay"), TransformMode::SetValue, None)
        .expect("Failed to navigate");

    let from_first = navigator.previous(&first, &project.file("Close")).expect("navigates");
    let from_second = navigator.previous(&second, &project.file("Close")).expect("navigates");
    assert_eq!(from_first.as_deref(), Some("Notify"));
    assert_eq!(from_second.as_deref(), Some("Pay"));

    assert!(navigator.close_session(&first).is_some());
    assert!(navigator.history(&first).is_none());
    assert!(navigator.history(&second).is_some());
}

#[test]
fn test_other_mode_is_rejected_before_loading() {
    let mut navigator = Navigator::default();
    let session = SessionId::new("s");

    let result = navigator.next(
        &session,
        std::path::Path::new("/does/not/exist/Properties.xml"),
        TransformMode::Other,
        None,
    );
    assert!(matches!(
        result,
        Err(FlowpathError::UnsupportedMode(TransformMode::Other))
    ));
    assert!(navigator.history(&session).is_none());
}

#[test]
fn test_unknown_activity_resolves_nothing() {
    let project = Project::new();
    let mut navigator = Navigator::default();
    let session = SessionId::new("s");

    let folder = project.dir.path().join("Orphan");
    fs::create_dir(&folder).expect("Failed to create folder");
    let file = folder.join("Properties.xml");

    let next = navigator
        .next(&session, &file, TransformMode::Xslt, None)
        .expect("Failed to navigate");
    assert_eq!(next, None);
    assert_eq!(
        navigator.history(&session).and_then(|h| h.peek()),
        Some("Orphan")
    );
}

#[test]
fn test_malformed_layout_is_parse_error() {
    let project = Project::new();
    fs::write(project.dir.path().join("Layout.xml"), "<DiagramLayout><Elements>")
        .expect("Failed to write layout");
    let mut navigator = Navigator::default();

    let result = navigator.previous(&SessionId::new("s"), &project.file("Pay"));
    match result {
        Err(FlowpathError::Parse { err, src }) => {
            assert!(!err.diagnostics().is_empty());
            assert_eq!(src, "<DiagramLayout><Elements>");
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_layout_is_io_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let navigator = Navigator::default();

    assert!(matches!(
        navigator.first_activity(dir.path()),
        Err(FlowpathError::Io(_))
    ));
}

#[test]
fn test_utf16_layout_with_custom_file_name() {
    let project = Project::new();
    let bytes = encoding::encode_with_bom(LAYOUT, encoding::UTF_16LE);
    fs::write(project.dir.path().join("Diagram.xml"), bytes).expect("Failed to write layout");

    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        file_name = "Diagram.xml"
        "#,
    )
    .expect("valid config");
    let navigator = Navigator::new(config);

    let first = navigator.first_activity(project.dir.path()).expect("Failed to load layout");
    assert_eq!(first.as_deref(), Some("Intake"));
}

#[test]
fn test_classify_and_definition_file() {
    let project = Project::new();
    let navigator = Navigator::default();

    let kind = navigator.classify(&project.file("Review")).expect("Failed to read");
    assert_eq!(kind, ActivityKind::BizRule);
    assert_eq!(TransformMode::for_activity(kind), TransformMode::BusinessRule);

    let sibling = navigator
        .definition_file(&project.file("Review"), "Pay")
        .expect("valid path");
    assert_eq!(sibling, project.file("Pay"));
}
