use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vsixpack::format_error_with_help;

mod cli;

#[derive(Parser)]
#[command(name = "vsixpack")]
#[command(about = "Package VS Code extensions into .vsix archives")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package the extension in the current project
    Package {
        /// Output path of the .vsix (defaults to <name>-<version>.vsix)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Do not bundle production dependencies
        #[arg(long)]
        no_dependencies: bool,
        /// Package manager to list dependencies with (npm, yarn, pnpm, none)
        #[arg(long)]
        package_manager: Option<String>,
        /// Only bundle these top-level dependencies (repeatable)
        #[arg(long = "packaged-dependency")]
        packaged_dependency: Vec<String>,
        /// Use this file as the README
        #[arg(long)]
        readme_path: Option<String>,
        /// Ignore file to read instead of .vscodeignore
        #[arg(long)]
        ignore_file: Option<String>,
        /// Skip the vscode:prepublish script
        #[arg(long)]
        no_prepublish: bool,
    },
    /// List the files that would be packaged
    Ls {
        /// Do not list production dependencies
        #[arg(long)]
        no_dependencies: bool,
        /// Package manager to list dependencies with (npm, yarn, pnpm, none)
        #[arg(long)]
        package_manager: Option<String>,
        /// Ignore file to read instead of .vscodeignore
        #[arg(long)]
        ignore_file: Option<String>,
    },
    /// Show the contents of a .vsix
    Show {
        /// Path to the archive
        vsix: PathBuf,
    },
    /// Inspect global settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Change one setting and save the config file
    Set {
        /// Setting name, as shown by `config show`
        key: String,
        /// New value (`null` clears optional settings)
        value: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Package {
            out,
            no_dependencies,
            package_manager,
            packaged_dependency,
            readme_path,
            ignore_file,
            no_prepublish,
        } => {
            cli::package::run(cli::package::PackageArgs {
                out,
                no_dependencies,
                package_manager,
                packaged_dependency,
                readme_path,
                ignore_file,
                no_prepublish,
            })
            .await
        }
        Commands::Ls {
            no_dependencies,
            package_manager,
            ignore_file,
        } => cli::ls::run(no_dependencies, package_manager, ignore_file).await,
        Commands::Show { vsix } => cli::show::run(&vsix),
        Commands::Config(ConfigCommands::Show) => cli::config::show(),
        Commands::Config(ConfigCommands::Path) => cli::config::path(),
        Commands::Config(ConfigCommands::Set { key, value }) => cli::config::set(&key, &value),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
