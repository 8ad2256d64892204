//! Flowpath - Activity-flow navigation for business-process projects
//!
//! A process project is a folder holding a layout document (the process
//! diagram) and one folder per activity. This library loads the layout,
//! resolves the next or previous activity of a process, classifies
//! activity definition files and derives XPaths inside XML documents.

pub mod config;
pub mod navigation;

mod error;

pub use flowpath_core::{activity, encoding, layout};
pub use flowpath_parser::xpath;

pub use error::FlowpathError;

use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use activity::ActivityKind;
use config::AppConfig;
use layout::DiagramLayout;
use navigation::{ActivityLocation, NavigationHistory, TransformMode};

/// Identifies one navigation session, e.g. one open document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entry point for navigating the activities of process projects.
///
/// The navigator keeps one [`NavigationHistory`] per [`SessionId`]. A
/// history is created on first use of its session and lives until
/// [`Navigator::close_session`]. The layout document is read again on
/// every navigation so edits made in between are picked up.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use flowpath::{Navigator, SessionId, config::AppConfig, navigation::TransformMode};
///
/// let mut navigator = Navigator::new(AppConfig::default());
/// let session = SessionId::new("tab-1");
///
/// let file = Path::new("Claims/Validate/Properties.xml");
/// let next = navigator
///     .next(&session, file, TransformMode::Xslt, None)
///     .expect("Failed to navigate");
///
/// if let Some(next) = next {
///     let next_file = navigator.definition_file(file, &next).expect("valid path");
///     let previous = navigator
///         .previous(&session, &next_file)
///         .expect("Failed to navigate");
///     println!("{next} <- {previous:?}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct Navigator {
    config: AppConfig,
    sessions: HashMap<SessionId, NavigationHistory>,
}

impl Navigator {
    /// Create a new navigator with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolve the activity after the one owning `activity_file`.
    ///
    /// The current activity is recorded in the session's history.
    ///
    /// # Arguments
    ///
    /// * `session` - Session whose history records the step
    /// * `activity_file` - A file inside the current activity's folder
    /// * `mode` - Exit matching rule of the current activity
    /// * `exit_name` - Exit to leave through, for the named-exit modes
    ///
    /// # Errors
    ///
    /// Returns `FlowpathError::UnsupportedMode` for `TransformMode::Other`
    /// before touching the file system, and I/O or parse errors for the
    /// layout document.
    pub fn next(
        &mut self,
        session: &SessionId,
        activity_file: &Path,
        mode: TransformMode,
        exit_name: Option<&str>,
    ) -> Result<Option<String>, FlowpathError> {
        if mode == TransformMode::Other {
            return Err(FlowpathError::UnsupportedMode(mode));
        }

        let location = ActivityLocation::from_file(activity_file)?;
        let layout = self.load_layout(&location.layout_path(self.config.layout.file_name()))?;

        info!(session:%, activity = location.name(), mode:%; "Resolving next activity");
        let history = self.sessions.entry(session.clone()).or_default();
        let next = navigation::resolve_next(&layout, history, location.name(), mode, exit_name)?;

        info!(next:?; "Next activity resolved");
        Ok(next)
    }

    /// Resolve the activity before the one owning `activity_file`.
    ///
    /// # Errors
    ///
    /// Returns I/O or parse errors for the layout document.
    pub fn previous(
        &mut self,
        session: &SessionId,
        activity_file: &Path,
    ) -> Result<Option<String>, FlowpathError> {
        let location = ActivityLocation::from_file(activity_file)?;
        let layout = self.load_layout(&location.layout_path(self.config.layout.file_name()))?;

        info!(session:%, activity = location.name(); "Resolving previous activity");
        let history = self.sessions.entry(session.clone()).or_default();
        let previous = navigation::resolve_previous(&layout, history, location.name());

        info!(previous:?; "Previous activity resolved");
        Ok(previous)
    }

    /// The entry activity of the project in `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns I/O or parse errors for the layout document.
    pub fn first_activity(&self, project_dir: &Path) -> Result<Option<String>, FlowpathError> {
        let layout = self.load_layout(&project_dir.join(self.config.layout.file_name()))?;
        Ok(layout.first_activity().map(str::to_string))
    }

    /// Read and parse a layout document.
    ///
    /// # Errors
    ///
    /// Returns `FlowpathError::Io` if the file cannot be read and
    /// `FlowpathError::Parse`, carrying the decoded text, if it is not a
    /// valid layout document.
    pub fn load_layout(&self, path: &Path) -> Result<DiagramLayout, FlowpathError> {
        debug!(path:?; "Loading layout");
        let decoded = encoding::decode(&fs::read(path)?);

        let layout = flowpath_parser::parse_layout_str(decoded.text())
            .map_err(|err| FlowpathError::new_parse_error(err, decoded.text()))?;

        info!(path:?, elements = layout.elements_count(); "Layout loaded");
        trace!(layout:?; "Layout");
        Ok(layout)
    }

    /// Classify an activity definition file.
    ///
    /// # Errors
    ///
    /// Returns `FlowpathError::Io` if the file cannot be read.
    pub fn classify(&self, definition_file: &Path) -> Result<ActivityKind, FlowpathError> {
        let kind = ActivityKind::classify(&fs::read(definition_file)?);
        debug!(path:? = definition_file, kind:%; "Activity classified");
        Ok(kind)
    }

    /// Path of the definition file of `activity`, a sibling of the activity
    /// owning `activity_file`.
    ///
    /// # Errors
    ///
    /// Returns `FlowpathError::InvalidActivityPath` if `activity_file` is not
    /// inside an activity folder.
    pub fn definition_file(
        &self,
        activity_file: &Path,
        activity: &str,
    ) -> Result<PathBuf, FlowpathError> {
        let location = ActivityLocation::from_file(activity_file)?;
        Ok(location.sibling_file(activity, self.config.activity.definition_file()))
    }

    /// The navigation history of `session`, if it has been used.
    pub fn history(&self, session: &SessionId) -> Option<&NavigationHistory> {
        self.sessions.get(session)
    }

    /// Discard a session and return its history.
    pub fn close_session(&mut self, session: &SessionId) -> Option<NavigationHistory> {
        self.sessions.remove(session)
    }
}
