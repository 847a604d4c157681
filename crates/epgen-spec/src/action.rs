//! Generator actions and their option values.

use serde::{Deserialize, Serialize};

/// Actions understood by the Endpoints generator tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Produce discovery documents from service classes.
    GetDiscoveryDoc,
    /// Produce an OpenAPI document from service classes.
    GetOpenApiDoc,
    /// Produce packaged client libraries from service classes.
    GetClientLib,
    /// Produce a client library archive from a discovery document.
    GenClientLib,
}

impl ActionKind {
    /// Returns the action keyword passed as the first generator argument.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::GetDiscoveryDoc => "get-discovery-doc",
            ActionKind::GetOpenApiDoc => "get-openapi-doc",
            ActionKind::GetClientLib => "get-client-lib",
            ActionKind::GenClientLib => "gen-client-lib",
        }
    }

    /// Returns all actions.
    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::GetDiscoveryDoc,
            ActionKind::GetOpenApiDoc,
            ActionKind::GetClientLib,
            ActionKind::GenClientLib,
        ]
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("unknown generator action: {}", s))
    }
}

/// Discovery document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    /// REST discovery documents.
    #[default]
    Rest,
    /// JSON-RPC discovery documents.
    Rpc,
}

impl DocFormat {
    /// Returns the value passed with `-f`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocFormat::Rest => "rest",
            DocFormat::Rpc => "rpc",
        }
    }
}

impl std::fmt::Display for DocFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rest" => Ok(DocFormat::Rest),
            "rpc" => Ok(DocFormat::Rpc),
            _ => Err(format!("unknown document format: {}", s)),
        }
    }
}

/// Language and build system of a generated client library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTarget {
    /// Client language (`-l`).
    pub language: String,
    /// Client build system (`-bs`).
    pub build_system: String,
}

impl ClientTarget {
    /// Creates a client target.
    pub fn new(language: impl Into<String>, build_system: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            build_system: build_system.into(),
        }
    }

    /// The Java/Maven target, the only layout the source extractor understands.
    pub fn java_maven() -> Self {
        Self::new("java", "maven")
    }
}

impl Default for ClientTarget {
    fn default() -> Self {
        Self::java_maven()
    }
}
