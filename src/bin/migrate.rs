//! Schema Migrate CLI
//!
//! Compiles annotated GraphQL schemas into knex migrations and prints
//! normalized SDL.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use schema_migrate::{
    print_schema, print_schema_with_directives, Compiler, CompilerConfig, TypeGraph,
    DIRECTIVE_DEFINITIONS,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-migrate")]
#[command(about = "Generate knex migrations from annotated GraphQL schemas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a schema into a migration module
    Compile {
        /// Schema file (SDL)
        schema: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file layered over the default locations
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Drop tables in reverse creation order
        #[arg(long)]
        reverse_drops: bool,

        /// Fail when a @link target field is missing on the referenced type
        #[arg(long)]
        strict_links: bool,
    },

    /// Print the planned tables and links as JSON
    Plan {
        /// Schema file (SDL)
        schema: PathBuf,

        /// Config file layered over the default locations
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the schema back as normalized SDL
    Print {
        /// Schema file (SDL)
        schema: PathBuf,

        /// Prepend the @db/@nodb/@link declarations
        #[arg(long)]
        with_directives: bool,
    },

    /// Print the directive declarations the compiler understands
    Directives,

    /// Config file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config
    Init {
        #[arg(default_value = "schema-migrate.toml")]
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Compile {
            schema,
            output,
            config,
            reverse_drops,
            strict_links,
        } => {
            let mut config = CompilerConfig::load_from(config.as_deref())?;
            config.emit.reverse_drops |= reverse_drops;
            config.links.strict |= strict_links;

            let graph = read_schema(&schema)?;
            let migration = Compiler::new(config).compile(&graph)?;

            match output {
                Some(path) => {
                    fs::write(&path, &migration.code)?;
                    info!(
                        path = %path.display(),
                        tables = migration.tables,
                        links = migration.links,
                        "wrote migration"
                    );
                }
                None => print!("{}", migration.code),
            }
            Ok(())
        }

        Commands::Plan { schema, config } => {
            let config = CompilerConfig::load_from(config.as_deref())?;
            let graph = read_schema(&schema)?;
            let plan = Compiler::new(config).plan(&graph)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
            Ok(())
        }

        Commands::Print {
            schema,
            with_directives,
        } => {
            let graph = read_schema(&schema)?;
            if with_directives {
                print!("{}", print_schema_with_directives(&graph));
            } else {
                print!("{}", print_schema(&graph));
            }
            Ok(())
        }

        Commands::Directives => {
            print!("{}", DIRECTIVE_DEFINITIONS);
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { path } => {
                if path.exists() {
                    anyhow::bail!("{} already exists", path.display());
                }
                CompilerConfig::default().save(&path)?;
                println!("Wrote {}", path.display());
                Ok(())
            }
        },
    }
}

fn read_schema(path: &Path) -> anyhow::Result<TypeGraph> {
    let sdl = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(TypeGraph::parse(&sdl)?)
}
