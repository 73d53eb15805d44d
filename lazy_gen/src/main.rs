use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cmds;

#[derive(Parser)]
#[command(name = "lazy-gen")]
#[command(about = "Generate zero-copy lazy accessors from a type schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate Rust accessors from a schema */
    Codegen {
        /* Schema document (.yaml, .yml or .json) */
        #[arg(short = 's', long = "schema", value_name = "FILE")]
        schema: PathBuf,

        /* Output file; stdout when omitted */
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,

        /* Path the generated code imports the runtime from */
        #[arg(long = "runtime-crate", value_name = "PATH", default_value = "lazy_runtime")]
        runtime_crate: String,

        /* Skip the object registry and visitor impls */
        #[arg(long = "no-registry")]
        no_registry: bool,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /* Resolve every type and print its field table */
    Analyze {
        /* Schema document (.yaml, .yml or .json) */
        #[arg(short = 's', long = "schema", value_name = "FILE")]
        schema: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Codegen { verbose: true, .. });
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::from_default_env() };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Codegen {
            schema,
            output,
            runtime_crate,
            no_registry,
            verbose,
        } => {
            cmds::codegen::run(schema, output, runtime_crate, !no_registry, verbose)?;
        }

        Commands::Analyze { schema } => {
            cmds::analyze::run(schema)?;
        }
    }

    Ok(())
}
