//! epgen CLI - Command-line interface for Endpoints code generation
//!
//! This binary runs the generator goals for a project: discovery documents,
//! OpenAPI documents, client library archives, and client sources.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use epgen_cli::commands::generate::ServiceGoal;
use epgen_cli::commands::{doctor, gen_src, generate};
use epgen_cli::logging::init_logging;
use epgen_cli::project::{self, Overrides};
use epgen_spec::DocFormat;

/// epgen - Endpoints Framework code generation
#[derive(Parser)]
#[command(name = "epgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory (default: current directory)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Configuration file (default: <project>/epgen.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate discovery documents from service classes
    DiscoveryDocs {
        /// Discovery document format
        #[arg(short, long)]
        format: Option<DocFormat>,

        /// Output directory (default: <build>/discovery-docs)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Generate an OpenAPI document from service classes
    OpenapiDocs {
        /// Output directory (default: <build>/openapi-docs)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Generate client library archives from service classes
    ClientLibs {
        /// Output directory (default: <build>/client-libs)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Generate client sources from discovery documents
    GenerateSrc {
        /// Discovery document (repeatable, replaces configured documents)
        #[arg(short, long = "discovery-doc")]
        discovery_doc: Vec<PathBuf>,

        /// Source root (default: <build>/generated-sources/endpoints)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Generator program
        #[arg(long)]
        tool: Option<String>,
    },

    /// Check generator availability and show the resolved project layout
    Doctor {
        /// Generator program
        #[arg(long)]
        tool: Option<String>,
    },
}

/// Options shared by the service-class goals.
#[derive(Args, Debug, Default)]
struct ServiceArgs {
    /// Hostname written into generated documents
    #[arg(long)]
    hostname: Option<String>,

    /// Base path written into generated documents
    #[arg(long)]
    base_path: Option<String>,

    /// Service class (repeatable, replaces configured classes)
    #[arg(short, long = "service-class")]
    service_class: Vec<String>,

    /// Generator program
    #[arg(long)]
    tool: Option<String>,
}

impl ServiceArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            hostname: self.hostname,
            base_path: self.base_path,
            service_classes: self.service_class,
            tool: self.tool,
            ..Default::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match project::load(&cli.project, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::DiscoveryDocs {
            format,
            output_dir,
            service,
        } => {
            let overrides = Overrides {
                format,
                ..service.into_overrides()
            };
            overrides.apply(&mut config);
            if output_dir.is_some() {
                config.discovery_doc_dir = output_dir;
            }
            generate::run(ServiceGoal::DiscoveryDocs, &config)
        }
        Commands::OpenapiDocs {
            output_dir,
            service,
        } => {
            service.into_overrides().apply(&mut config);
            if output_dir.is_some() {
                config.openapi_doc_dir = output_dir;
            }
            generate::run(ServiceGoal::OpenApiDocs, &config)
        }
        Commands::ClientLibs {
            output_dir,
            service,
        } => {
            service.into_overrides().apply(&mut config);
            if output_dir.is_some() {
                config.client_lib_dir = output_dir;
            }
            generate::run(ServiceGoal::ClientLibs, &config)
        }
        Commands::GenerateSrc {
            discovery_doc,
            output_dir,
            tool,
        } => {
            let overrides = Overrides {
                discovery_docs: discovery_doc,
                tool,
                ..Default::default()
            };
            overrides.apply(&mut config);
            if output_dir.is_some() {
                config.generated_src_dir = output_dir;
            }
            gen_src::run(&config)
        }
        Commands::Doctor { tool } => {
            Overrides {
                tool,
                ..Default::default()
            }
            .apply(&mut config);
            doctor::run(&config)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
