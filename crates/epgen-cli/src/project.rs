//! Project configuration loading and command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use epgen_generator::{CommandConfig, CommandGenerator};
use epgen_spec::{DocFormat, ProjectConfig};
use tracing::debug;

/// Values given on the command line that replace configuration file values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub hostname: Option<String>,
    pub base_path: Option<String>,
    /// Replaces the configured service classes when non-empty.
    pub service_classes: Vec<String>,
    pub format: Option<DocFormat>,
    /// Replaces the configured discovery documents when non-empty.
    pub discovery_docs: Vec<PathBuf>,
    /// Generator program, replacing `generator.command`.
    pub tool: Option<String>,
}

impl Overrides {
    /// Applies the overrides to `config`.
    pub fn apply(&self, config: &mut ProjectConfig) {
        if let Some(ref hostname) = self.hostname {
            config.hostname = Some(hostname.clone());
        }
        if let Some(ref base_path) = self.base_path {
            config.base_path = Some(base_path.clone());
        }
        if !self.service_classes.is_empty() {
            config.service_classes = self.service_classes.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if !self.discovery_docs.is_empty() {
            config.discovery_docs = self.discovery_docs.clone();
        }
        if let Some(ref tool) = self.tool {
            config.generator.command = vec![tool.clone()];
        }
    }
}

/// Loads the project configuration.
///
/// Uses `config_file` when given, otherwise `epgen.json` in `project_dir`
/// if present, otherwise defaults.
pub fn load(project_dir: &Path, config_file: Option<&Path>) -> Result<ProjectConfig> {
    let config = match config_file {
        Some(path) => ProjectConfig::load_file(path, project_dir),
        None => ProjectConfig::load(project_dir),
    };
    let config = config
        .with_context(|| format!("Failed to load configuration for {}", project_dir.display()))?;
    debug!(project = %project_dir.display(), "Loaded configuration");
    Ok(config)
}

/// Builds the subprocess generator described by the configuration.
pub fn generator(config: &ProjectConfig) -> CommandGenerator {
    CommandGenerator::with_config(
        CommandConfig::from_settings(&config.generator).working_dir(config.project_dir()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides_replace_values() {
        let mut config = ProjectConfig::new("/project");
        config.service_classes = vec!["com.example.Old".to_string()];
        config.hostname = Some("old.example.com".to_string());

        let overrides = Overrides {
            hostname: Some("my.hostname.com".to_string()),
            service_classes: vec!["com.example.New".to_string()],
            format: Some(DocFormat::Rpc),
            tool: Some("/opt/endpoints/bin/endpoints-framework-tools".to_string()),
            ..Default::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.hostname.as_deref(), Some("my.hostname.com"));
        assert_eq!(config.service_classes, vec!["com.example.New"]);
        assert_eq!(config.format, DocFormat::Rpc);
        assert_eq!(
            config.generator.command,
            vec!["/opt/endpoints/bin/endpoints-framework-tools"]
        );
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = ProjectConfig::new("/project");
        config.base_path = Some("/api".to_string());
        config.discovery_docs = vec![PathBuf::from("a.discovery")];
        let before = config.clone();

        Overrides::default().apply(&mut config);

        assert_eq!(config, before);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.json");
        std::fs::write(&file, r#"{ "hostname": "from.file.com" }"#).unwrap();

        let config = load(dir.path(), Some(&file)).unwrap();
        assert_eq!(config.hostname.as_deref(), Some("from.file.com"));
        assert_eq!(config.project_dir(), dir.path());
    }

    #[test]
    fn test_load_error_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let err = load(dir.path(), Some(&missing)).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to load configuration"));
        assert!(message.contains("missing.json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_goal_runs_from_relative_project_dir() {
        use epgen_generator::goals::client_libs;

        let scratch = tempfile::Builder::new()
            .prefix("epgen-relative-")
            .tempdir_in(".")
            .unwrap();
        let relative = scratch.path().strip_prefix(".").unwrap_or(scratch.path());
        assert!(relative.is_relative());

        let mut config = ProjectConfig::new(relative);
        config.service_classes = vec!["com.example.TestApi".to_string()];
        config.generator.command = vec![
            "sh".to_string(),
            "-c".to_string(),
            r#"touch "$3/testApi-v1-java.zip""#.to_string(),
            "endpoints-tool".to_string(),
        ];

        let report = client_libs::run(&config, &generator(&config)).unwrap();

        let expected = std::env::current_dir()
            .unwrap()
            .join(relative)
            .join("target/client-libs");
        assert_eq!(report.output_dir, expected);
        assert_eq!(report.artifacts, vec![expected.join("testApi-v1-java.zip")]);
    }
}
