//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Print events as JSON lines instead of formatted text
    pub json: bool,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_output_section_deserialize() {
        let toml_str = r#"
[output]
json = true
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.output.json);
        assert!(config.output.color);
    }
}
