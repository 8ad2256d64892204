//! Activity locations on disk.
//!
//! A project folder holds the layout document and one folder per
//! activity. The activity folder's name is the element's reference name
//! in the layout:
//!
//! ```text
//! Project/
//!   Layout.xml
//!   Validate/
//!     Properties.xml
//!   Enrich/
//!     Properties.xml
//! ```

use std::path::{Path, PathBuf};

use crate::FlowpathError;

/// Where an activity file sits inside its project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLocation {
    name: String,
    project_dir: PathBuf,
}

impl ActivityLocation {
    /// Locate the activity owning `file`, a file inside an activity folder.
    ///
    /// # Errors
    ///
    /// Returns [`FlowpathError::InvalidActivityPath`] when `file` has no
    /// parent folder with a UTF-8 name, or that folder has no parent.
    pub fn from_file(file: &Path) -> Result<Self, FlowpathError> {
        let invalid = || FlowpathError::InvalidActivityPath(file.to_path_buf());

        let activity_dir = file.parent().ok_or_else(invalid)?;
        let name = activity_dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(invalid)?;
        let project_dir = activity_dir.parent().ok_or_else(invalid)?;

        Ok(Self {
            name: name.to_string(),
            project_dir: project_dir.to_path_buf(),
        })
    }

    /// Name of the activity folder, used as the reference name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Path of the project's layout document.
    pub fn layout_path(&self, layout_file_name: &str) -> PathBuf {
        self.project_dir.join(layout_file_name)
    }

    /// Path of the definition file of a sibling activity.
    pub fn sibling_file(&self, activity: &str, definition_file: &str) -> PathBuf {
        self.project_dir.join(activity).join(definition_file)
    }
}
