//! Project configuration.
//!
//! A project is configured by an optional `epgen.json` file at its root.
//! Every field has a default that mirrors the conventional Maven layout, and
//! relative paths resolve against the project directory.
//!
//! ```json
//! {
//!   "service_classes": ["com.example.testApi.TestApi"],
//!   "hostname": "my.hostname.com",
//!   "classpath": ["lib/endpoints-framework.jar"],
//!   "discovery_docs": ["target/discovery-docs/testApi-v1-rest.discovery"],
//!   "generator": { "command": ["java", "-jar", "tools/endpoints-framework-tools.jar"] }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::DocFormat;
use crate::error::StageError;

/// Name of the configuration file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "epgen.json";

/// Errors raised while loading or validating project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON or has unknown fields.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A classpath element contains the platform path separator.
    #[error("Invalid classpath element: {0}")]
    Classpath(#[source] std::env::JoinPathsError),

    /// Source generation needs at least one discovery document.
    #[error("No discovery documents configured for source generation")]
    MissingDiscoveryDocs,
}

impl StageError for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "CONFIG_001",
            ConfigError::Parse { .. } => "CONFIG_002",
            ConfigError::Classpath(_) => "CONFIG_003",
            ConfigError::MissingDiscoveryDocs => "CONFIG_004",
        }
    }

    fn stage(&self) -> &'static str {
        "config"
    }
}

/// How to launch the external generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSettings {
    /// Program followed by fixed leading arguments, e.g. `["java", "-jar", "tools.jar"]`.
    /// Empty means the executable is located from the environment.
    pub command: Vec<String>,
    /// Optional limit on a single invocation. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

/// Configuration for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(skip)]
    project_dir: PathBuf,

    /// Build output directory (`target`).
    pub build_dir: PathBuf,
    /// Compiled classes, appended to the classpath (`target/classes`).
    pub classes_dir: Option<PathBuf>,
    /// Runtime classpath elements.
    pub classpath: Vec<PathBuf>,
    /// Web application directory (`src/main/webapp`).
    pub webapp_dir: PathBuf,
    /// Fully-qualified service class names.
    pub service_classes: Vec<String>,
    /// Default hostname of the API host.
    pub hostname: Option<String>,
    /// Default base path of the API host.
    pub base_path: Option<String>,
    /// Discovery document format.
    pub format: DocFormat,
    /// Output directory for discovery documents.
    pub discovery_doc_dir: Option<PathBuf>,
    /// Output directory for the OpenAPI document.
    pub openapi_doc_dir: Option<PathBuf>,
    /// Output directory for client library archives.
    pub client_lib_dir: Option<PathBuf>,
    /// Output directory for extracted client sources.
    pub generated_src_dir: Option<PathBuf>,
    /// Discovery documents consumed by source generation.
    pub discovery_docs: Vec<PathBuf>,
    /// Generator launch settings.
    pub generator: GeneratorSettings,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            build_dir: PathBuf::from("target"),
            classes_dir: None,
            classpath: Vec::new(),
            webapp_dir: PathBuf::from("src/main/webapp"),
            service_classes: Vec::new(),
            hostname: None,
            base_path: None,
            format: DocFormat::default(),
            discovery_doc_dir: None,
            openapi_doc_dir: None,
            client_lib_dir: None,
            generated_src_dir: None,
            discovery_docs: Vec::new(),
            generator: GeneratorSettings::default(),
        }
    }
}

impl ProjectConfig {
    /// Creates a default configuration rooted at `project_dir`.
    ///
    /// A relative `project_dir` is made absolute against the current
    /// directory, so every resolved path stays valid for a generator running
    /// in another working directory.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: absolute(project_dir.into()),
            ..Default::default()
        }
    }

    /// Loads `epgen.json` from `project_dir`, or defaults if the file is absent.
    pub fn load(project_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let project_dir = project_dir.into();
        let path = project_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::new(project_dir));
        }
        Self::load_file(&path, project_dir)
    }

    /// Loads configuration from an explicit file, rooted at `project_dir`.
    pub fn load_file(path: &Path, project_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.project_dir = absolute(project_dir.into());
        Ok(config)
    }

    /// Parses configuration from JSON. The project directory is left at `.`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Resolves a path against the project directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.project_dir.join(path)
    }

    /// Returns the resolved build directory.
    pub fn build_dir(&self) -> PathBuf {
        self.resolve(&self.build_dir)
    }

    /// Returns the resolved compiled classes directory.
    pub fn classes_dir(&self) -> PathBuf {
        self.resolve_or_build(&self.classes_dir, "classes")
    }

    /// Returns the resolved webapp directory.
    pub fn webapp_dir(&self) -> PathBuf {
        self.resolve(&self.webapp_dir)
    }

    /// Returns the resolved discovery document directory.
    pub fn discovery_doc_dir(&self) -> PathBuf {
        self.resolve_or_build(&self.discovery_doc_dir, "discovery-docs")
    }

    /// Returns the resolved OpenAPI document directory.
    pub fn openapi_doc_dir(&self) -> PathBuf {
        self.resolve_or_build(&self.openapi_doc_dir, "openapi-docs")
    }

    /// Returns the resolved client library directory.
    pub fn client_lib_dir(&self) -> PathBuf {
        self.resolve_or_build(&self.client_lib_dir, "client-libs")
    }

    /// Returns the resolved generated source directory.
    pub fn generated_src_dir(&self) -> PathBuf {
        self.resolve_or_build(&self.generated_src_dir, "generated-sources/endpoints")
    }

    /// Returns the resolved discovery documents, in configured order.
    pub fn discovery_docs(&self) -> Vec<PathBuf> {
        self.discovery_docs
            .iter()
            .map(|doc| self.resolve(doc))
            .collect()
    }

    /// Joins the runtime classpath and the classes directory with the
    /// platform path separator.
    pub fn classpath_string(&self) -> Result<String, ConfigError> {
        let elements = self
            .classpath
            .iter()
            .map(|element| self.resolve(element))
            .chain(std::iter::once(self.classes_dir()));
        let joined = std::env::join_paths(elements).map_err(ConfigError::Classpath)?;
        Ok(joined.to_string_lossy().into_owned())
    }

    /// Checks that source generation has something to work on.
    pub fn validate_for_gen_src(&self) -> Result<(), ConfigError> {
        if self.discovery_docs.is_empty() {
            return Err(ConfigError::MissingDiscoveryDocs);
        }
        Ok(())
    }

    fn resolve_or_build(&self, configured: &Option<PathBuf>, default: &str) -> PathBuf {
        match configured {
            Some(path) => self.resolve(path),
            None => self.build_dir().join(default),
        }
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}
