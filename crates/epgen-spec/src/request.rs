//! Typed generation requests.
//!
//! A [`GenerationRequest`] is built once per generator invocation and then
//! rendered into the generator's argument list with [`GenerationRequest::to_args`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, ClientTarget, DocFormat};

/// A single generator invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    action: ActionKind,
    output: PathBuf,
    format: Option<DocFormat>,
    classpath: Option<String>,
    client: Option<ClientTarget>,
    webapp_dir: Option<PathBuf>,
    hostname: Option<String>,
    base_path: Option<String>,
    targets: Vec<String>,
}

impl GenerationRequest {
    /// Creates a builder for the given action and output location.
    pub fn builder(action: ActionKind, output: impl Into<PathBuf>) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(action, output)
    }

    /// Request for generating a client library archive from a description document.
    pub fn gen_client_lib(
        output: impl Into<PathBuf>,
        client: ClientTarget,
        document: &Path,
    ) -> Self {
        Self::builder(ActionKind::GenClientLib, output)
            .client(client)
            .target(document.to_string_lossy())
            .build()
    }

    /// Returns the action.
    pub fn action(&self) -> ActionKind {
        self.action
    }

    /// Returns the output location passed with `-o`.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the document format, if any.
    pub fn format(&self) -> Option<DocFormat> {
        self.format
    }

    /// Returns the joined classpath, if any.
    pub fn classpath(&self) -> Option<&str> {
        self.classpath.as_deref()
    }

    /// Returns the client target, if any.
    pub fn client(&self) -> Option<&ClientTarget> {
        self.client.as_ref()
    }

    /// Returns the webapp directory, if any.
    pub fn webapp_dir(&self) -> Option<&Path> {
        self.webapp_dir.as_deref()
    }

    /// Returns the hostname override, if any.
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Returns the base path override, if any.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Returns the trailing target identifiers.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Renders the generator argument list.
    ///
    /// The action keyword comes first, then the flags in a fixed order:
    /// `-o`, `-f`, `-cp`, `-l`/`-bs`, `-w`, `-h`, `-p`, followed by the
    /// targets. Unset options are left out so generator defaults apply.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            self.action.as_str().to_string(),
            "-o".to_string(),
            self.output.to_string_lossy().into_owned(),
        ];

        if let Some(format) = self.format {
            args.push("-f".to_string());
            args.push(format.as_str().to_string());
        }

        if let Some(ref classpath) = self.classpath {
            args.push("-cp".to_string());
            args.push(classpath.clone());
        }

        if let Some(ref client) = self.client {
            args.push("-l".to_string());
            args.push(client.language.clone());
            args.push("-bs".to_string());
            args.push(client.build_system.clone());
        }

        if let Some(ref webapp_dir) = self.webapp_dir {
            args.push("-w".to_string());
            args.push(webapp_dir.to_string_lossy().into_owned());
        }

        if let Some(ref hostname) = self.hostname {
            args.push("-h".to_string());
            args.push(hostname.clone());
        }

        if let Some(ref base_path) = self.base_path {
            args.push("-p".to_string());
            args.push(base_path.clone());
        }

        args.extend(self.targets.iter().cloned());
        args
    }
}

/// Builder for [`GenerationRequest`].
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    request: GenerationRequest,
}

impl GenerationRequestBuilder {
    /// Creates a new builder.
    pub fn new(action: ActionKind, output: impl Into<PathBuf>) -> Self {
        Self {
            request: GenerationRequest {
                action,
                output: output.into(),
                format: None,
                classpath: None,
                client: None,
                webapp_dir: None,
                hostname: None,
                base_path: None,
                targets: Vec::new(),
            },
        }
    }

    /// Sets the document format.
    pub fn format(mut self, format: DocFormat) -> Self {
        self.request.format = Some(format);
        self
    }

    /// Sets the joined classpath.
    pub fn classpath(mut self, classpath: impl Into<String>) -> Self {
        self.request.classpath = Some(classpath.into());
        self
    }

    /// Sets the client language and build system.
    pub fn client(mut self, client: ClientTarget) -> Self {
        self.request.client = Some(client);
        self
    }

    /// Sets the webapp directory.
    pub fn webapp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.request.webapp_dir = Some(dir.into());
        self
    }

    /// Sets the hostname override. Empty values are ignored.
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.request.hostname = non_empty(hostname.into());
        self
    }

    /// Sets the hostname override from an optional value.
    pub fn maybe_hostname(self, hostname: Option<&str>) -> Self {
        match hostname {
            Some(hostname) => self.hostname(hostname),
            None => self,
        }
    }

    /// Sets the base path override. Empty values are ignored.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.request.base_path = non_empty(base_path.into());
        self
    }

    /// Sets the base path override from an optional value.
    pub fn maybe_base_path(self, base_path: Option<&str>) -> Self {
        match base_path {
            Some(base_path) => self.base_path(base_path),
            None => self,
        }
    }

    /// Adds a target identifier.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.request.targets.push(target.into());
        self
    }

    /// Adds several target identifiers.
    pub fn targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request
            .targets
            .extend(targets.into_iter().map(Into::into));
        self
    }

    /// Builds the request.
    pub fn build(self) -> GenerationRequest {
        self.request
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
