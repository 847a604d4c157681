//! Endpoints generator invocation.
//!
//! [`Generator`] is the seam between the pipeline and the external tool. The
//! production implementation, [`CommandGenerator`], runs the tool as a
//! synchronous subprocess; tests substitute in-process generators.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use epgen_spec::{GenerationRequest, GeneratorSettings};
use tracing::{debug, info};

use crate::error::{GeneratorError, GeneratorResult};

/// Environment variable naming the generator executable.
pub const TOOL_PATH_ENV: &str = "EPGEN_TOOL_PATH";

/// Executable searched for in `PATH` when nothing else is configured.
pub const DEFAULT_TOOL_NAME: &str = "endpoints-framework-tools";

/// Captured output of a successful generator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Something that can run generator actions.
pub trait Generator {
    /// Runs the generator with a rendered argument list.
    fn execute(&self, args: &[String]) -> GeneratorResult<GeneratorOutput>;

    /// Renders `request` and runs it.
    fn invoke(&self, request: &GenerationRequest) -> GeneratorResult<GeneratorOutput> {
        let args = request.to_args();
        info!(params = ?args, "Endpoints Tool params");
        self.execute(&args)
    }
}

impl<G: Generator + ?Sized> Generator for &G {
    fn execute(&self, args: &[String]) -> GeneratorResult<GeneratorOutput> {
        (**self).execute(args)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn execute(&self, args: &[String]) -> GeneratorResult<GeneratorOutput> {
        (**self).execute(args)
    }
}

/// Where the generator executable was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramSource {
    /// `generator.command` in the project configuration.
    Configured,
    /// The `EPGEN_TOOL_PATH` environment variable.
    Environment,
    /// The system `PATH`.
    SearchPath,
}

impl ProgramSource {
    /// Returns a short description for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramSource::Configured => "configured",
            ProgramSource::Environment => TOOL_PATH_ENV,
            ProgramSource::SearchPath => "PATH",
        }
    }
}

/// Configuration for [`CommandGenerator`].
#[derive(Debug, Clone, Default)]
pub struct CommandConfig {
    /// Program to run. Located from the environment when unset.
    pub program: Option<String>,
    /// Arguments placed before the rendered request, e.g. `-jar tools.jar`.
    pub leading_args: Vec<String>,
    /// Limit on a single invocation. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Working directory for the subprocess.
    pub working_dir: Option<PathBuf>,
}

impl CommandConfig {
    /// Builds a config from project generator settings.
    ///
    /// The first element of `command` is the program, the rest are leading
    /// arguments.
    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        let mut command = settings.command.iter().cloned();
        Self {
            program: command.next(),
            leading_args: command.collect(),
            timeout: settings.timeout_secs.map(Duration::from_secs),
            working_dir: None,
        }
    }

    /// Sets the program.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Adds a leading argument.
    pub fn leading_arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Runs the Endpoints generator as a subprocess.
#[derive(Debug, Clone, Default)]
pub struct CommandGenerator {
    config: CommandConfig,
}

impl CommandGenerator {
    /// Creates a generator that locates the tool from the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with the given configuration.
    pub fn with_config(config: CommandConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Locates the generator executable.
    ///
    /// Checked in order: the configured program, `EPGEN_TOOL_PATH`, then
    /// `endpoints-framework-tools` in `PATH`. A configured program that
    /// cannot be found is an error rather than a fallthrough.
    pub fn find_program(&self) -> GeneratorResult<(PathBuf, ProgramSource)> {
        if let Some(ref program) = self.config.program {
            return which::which(program)
                .map(|path| (path, ProgramSource::Configured))
                .map_err(|_| GeneratorError::NotFound {
                    program: program.clone(),
                });
        }

        if let Ok(path) = std::env::var(TOOL_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok((path, ProgramSource::Environment));
            }
            return Err(GeneratorError::NotFound {
                program: path.display().to_string(),
            });
        }

        which::which(DEFAULT_TOOL_NAME)
            .map(|path| (path, ProgramSource::SearchPath))
            .map_err(|_| GeneratorError::NotFound {
                program: DEFAULT_TOOL_NAME.to_string(),
            })
    }
}

impl Generator for CommandGenerator {
    fn execute(&self, args: &[String]) -> GeneratorResult<GeneratorOutput> {
        let (program, _) = self.find_program()?;

        let mut cmd = Command::new(&program);
        cmd.args(&self.config.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref dir) = self.config.working_dir {
            cmd.current_dir(dir);
        }

        let child = cmd.spawn().map_err(|source| GeneratorError::Spawn {
            program: program.clone(),
            source,
        })?;

        let (status, output) = wait_with_timeout(child, self.config.timeout)?;
        debug!(
            program = %program.display(),
            stdout = %output.stdout,
            stderr = %output.stderr,
            "Generator finished"
        );

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(GeneratorError::failed(exit_code, output.stderr));
        }

        Ok(output)
    }
}

// Both pipes are drained on their own threads while the child runs. On
// timeout the drain threads are detached rather than joined: grandchildren
// of a wrapper script may hold the pipes open after the child is killed, and
// those threads exit once the last writer closes.
fn wait_with_timeout(
    mut child: Child,
    timeout: Option<Duration>,
) -> GeneratorResult<(ExitStatus, GeneratorOutput)> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if let Some(timeout) = timeout {
                    if start.elapsed() > timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(GeneratorError::Timeout { timeout });
                    }
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(GeneratorError::Spawn {
                    program: PathBuf::new(),
                    source: e,
                })
            }
        }
    };

    let output = GeneratorOutput {
        stdout: collect(stdout),
        stderr: collect(stderr),
    };
    Ok((status, output))
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
