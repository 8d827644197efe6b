//! kg2aas CLI: map RDF graphs to AAS documents and back.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use oxigraph::io::RdfFormat;

use kg2aas::classify;
use kg2aas::graph::{TripleGraph, rdf};
use kg2aas::model::Environment;
use kg2aas::pipeline::{Pipeline, PipelineConfig, ValidationConfig, to_json};
use kg2aas::query::{OxigraphExecutor, QueryExecutor, QueryTemplate};
use kg2aas::serializer::Serializer;

#[derive(Parser)]
#[command(name = "kg2aas", version, about = "RDF knowledge graph to AAS mapping")]
struct Cli {
    /// Pipeline configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a graph to an AAS environment through a mapping query.
    Map {
        /// Source graph (Turtle or N-Triples, by extension).
        #[arg(long)]
        input: PathBuf,

        /// SPARQL CONSTRUCT query producing AAS triples.
        #[arg(long)]
        query: PathBuf,

        /// Deployment namespace substituted for the placeholder.
        #[arg(long)]
        namespace: Option<String>,

        /// Namespace token the query is written against.
        #[arg(long)]
        placeholder: Option<String>,

        /// Maximum element nesting depth.
        #[arg(long)]
        max_depth: Option<usize>,

        /// Map root subjects on a single thread.
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        validation: ValidationArgs,

        /// Output file (stdout if omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Serialize an AAS JSON environment to RDF.
    ToRdf {
        /// AAS JSON environment.
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value = "turtle")]
        format: OutputFormat,

        /// Existing graph whose subjects must not be reused.
        #[arg(long)]
        avoid: Option<PathBuf>,

        /// Reuse identifiers from the avoided graph.
        #[arg(long, requires = "avoid")]
        overwrite: bool,

        /// Output file (stdout if omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the root subjects of a graph by role.
    Classify {
        /// Graph to classify.
        #[arg(long)]
        input: PathBuf,

        /// Run this mapping query first and classify its result.
        #[arg(long)]
        query: Option<PathBuf>,

        /// Deployment namespace for the query placeholder.
        #[arg(long, requires = "query")]
        namespace: Option<String>,
    },

    /// Validate an AAS JSON document against a schema.
    Validate {
        /// AAS JSON document.
        #[arg(long)]
        input: PathBuf,

        #[command(flatten)]
        validation: ValidationArgs,
    },
}

#[derive(clap::Args)]
struct ValidationArgs {
    /// JSON schema URL or file path.
    #[arg(long)]
    schema: Option<String>,

    /// External validator command line.
    #[arg(long, conflicts_with = "validator_endpoint")]
    validator_command: Option<String>,

    /// HTTP validator endpoint.
    #[arg(long)]
    validator_endpoint: Option<String>,
}

impl ValidationArgs {
    fn is_empty(&self) -> bool {
        self.schema.is_none()
            && self.validator_command.is_none()
            && self.validator_endpoint.is_none()
    }

    /// Overlay the flags on the configured validation table.
    fn apply(self, config: Option<ValidationConfig>) -> Option<ValidationConfig> {
        if self.is_empty() {
            return config;
        }
        let mut validation = config.unwrap_or_default();
        if self.schema.is_some() {
            validation.schema = self.schema;
        }
        if self.validator_command.is_some() {
            validation.command = self.validator_command;
            validation.endpoint = None;
        }
        if self.validator_endpoint.is_some() {
            validation.endpoint = self.validator_endpoint;
            validation.command = None;
        }
        Some(validation)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Turtle,
    Ntriples,
}

impl From<OutputFormat> for RdfFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Turtle => RdfFormat::Turtle,
            OutputFormat::Ntriples => RdfFormat::NTriples,
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Map {
            input,
            query,
            namespace,
            placeholder,
            max_depth,
            sequential,
            validation,
            output,
        } => {
            if namespace.is_some() {
                config.namespace = namespace;
            }
            if let Some(placeholder) = placeholder {
                config.placeholder = placeholder;
            }
            if let Some(max_depth) = max_depth {
                config.max_depth = max_depth;
            }
            if sequential {
                config.parallel = false;
            }
            config.validation = validation.apply(config.validation.take());
            config.check()?;

            let validator = match &config.validation {
                Some(v) => v.validator()?,
                None => None,
            };
            let source = rdf::read_file(&input)?;
            let template = QueryTemplate::load(&query)?;
            let pipeline = Pipeline::new(config);
            let env = pipeline.run(
                &source,
                &template,
                &OxigraphExecutor::new(),
                validator.as_deref(),
            )?;

            write_output(output.as_deref(), &to_json(&env).into_diagnostic()?)?;
            eprintln!(
                "Mapped {} shell(s), {} submodel(s), {} concept description(s)",
                env.asset_administration_shells.len(),
                env.submodels.len(),
                env.concept_descriptions.len()
            );
        }

        Commands::ToRdf {
            input,
            format,
            avoid,
            overwrite,
            output,
        } => {
            let env = read_environment(&input)?;
            let existing = avoid.as_deref().map(rdf::read_file).transpose()?;
            let mut serializer = Serializer::new().overwrite(overwrite);
            if let Some(existing) = &existing {
                serializer = serializer.avoid(existing);
            }
            let graph = serializer.environment_to_graph(&env)?;
            write_output(output.as_deref(), &rdf::serialize(&graph, format.into())?)?;
            eprintln!("Wrote {} triples for {} document(s)", graph.len(), env.len());
        }

        Commands::Classify {
            input,
            query,
            namespace,
        } => {
            let source = rdf::read_file(&input)?;
            let graph: TripleGraph = match query {
                Some(query) => {
                    if namespace.is_some() {
                        config.namespace = namespace;
                    }
                    let template = QueryTemplate::load(&query)?;
                    let pipeline = Pipeline::new(config);
                    let bound = template.bind(&pipeline.bindings())?;
                    OxigraphExecutor::new().execute(&bound, &source)?
                }
                None => source,
            };
            let classification = classify::classify(&graph)?;
            if classification.is_empty() {
                println!("No root subjects found.");
            }
            for (role, subject) in classification.iter() {
                println!("{role:?}\t{subject}");
            }
        }

        Commands::Validate { input, validation } => {
            let validation = validation.apply(config.validation.take()).unwrap_or_default();
            let Some(schema) = validation.schema_source() else {
                miette::bail!("no schema given; pass --schema or set validation.schema");
            };
            let Some(validator) = validation.validator()? else {
                miette::bail!(
                    "no validator given; pass --validator-command or --validator-endpoint"
                );
            };

            let content = std::fs::read_to_string(&input).into_diagnostic()?;
            let document: serde_json::Value = serde_json::from_str(&content).into_diagnostic()?;
            let schema = schema.fetch(validation.timeout())?;
            let result = validator.validate(&document, &schema)?;
            if result.valid && result.violations.is_empty() {
                println!("{}: valid", input.display());
            } else {
                for violation in &result.violations {
                    println!("{violation}");
                }
            }
            result.into_result()?;
        }
    }

    Ok(())
}

fn read_environment(path: &Path) -> Result<Environment> {
    let content = std::fs::read_to_string(path).into_diagnostic()?;
    serde_json::from_str(&content).into_diagnostic()
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content).into_diagnostic(),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
