use serde::Deserialize;

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout document section
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Activity folder section
    #[serde(default)]
    pub activity: ActivityConfig,
}

/// Layout document section
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// File name of the project-level layout document
    #[serde(default = "default_layout_file_name")]
    file_name: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            file_name: default_layout_file_name(),
        }
    }
}

impl LayoutConfig {
    /// Get the layout document file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Activity folder section
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityConfig {
    /// File name of the definition file inside each activity folder
    #[serde(default = "default_definition_file")]
    definition_file: String,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            definition_file: default_definition_file(),
        }
    }
}

impl ActivityConfig {
    /// Get the activity definition file name
    pub fn definition_file(&self) -> &str {
        &self.definition_file
    }
}

fn default_layout_file_name() -> String {
    "Layout.xml".to_string()
}

fn default_definition_file() -> String {
    "Properties.xml".to_string()
}
