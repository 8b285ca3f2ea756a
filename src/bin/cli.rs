//! Form 16 CLI - offline extraction from PDFs or pre-extracted text
//!
//! Usage: form16-cli [OPTIONS] <COMMAND>
//!
//! Prints the same `{"data": ...}` / `{"error": ...}` envelope as the server.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use form16_lib::{form16, pdf_extractor, settings, Form16Error};
use std::io::Read as _;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "form16-cli")]
#[command(version, about = "Form 16 tax certificate extraction", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a Form 16 PDF
    Extract {
        /// Path to the PDF
        pdf: PathBuf,
    },
    /// Extract fields from already-extracted text ("-" reads stdin)
    ParseText {
        input: PathBuf,
    },
    /// Print the raw text pulled from a PDF
    DumpText {
        pdf: PathBuf,
    },
    /// Server settings file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved settings and where they were read from
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a settings file with default values
    Init {
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    form16_lib::init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli) {
        print_json(&serde_json::json!({ "error": e.to_string() }), cli.pretty);
        std::process::exit(1);
    }
}

fn run_cli(cli: &Cli) -> Result<(), Form16Error> {
    match &cli.command {
        Commands::Extract { pdf } => {
            let text = pdf_extractor::extract_text_from_file(pdf)?;
            print_record(&text, cli.pretty)
        }
        Commands::ParseText { input } => {
            let text = read_input(input)?;
            print_record(&text, cli.pretty)
        }
        Commands::DumpText { pdf } => {
            let text = pdf_extractor::extract_text_from_file(pdf)?;
            println!("{}", text);
            Ok(())
        }
        Commands::Config { cmd } => run_config(cmd, cli.pretty),
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "form16-cli", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn run_config(cmd: &ConfigCommands, pretty: bool) -> Result<(), Form16Error> {
    match cmd {
        ConfigCommands::Show { config } => {
            let path = settings::config_path(config.as_deref());
            let resolved = settings::Settings::resolve(Some(path.as_path()))?;
            print_json(
                &serde_json::json!({ "path": path.display().to_string(), "settings": resolved }),
                pretty,
            );
            Ok(())
        }
        ConfigCommands::Init { config, force } => {
            let path = settings::config_path(config.as_deref());
            if path.exists() && !force {
                return Err(Form16Error::Settings(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            settings::Settings::default().save(&path)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn read_input(input: &Path) -> Result<String, Form16Error> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn print_record(text: &str, pretty: bool) -> Result<(), Form16Error> {
    let data = form16::extract(text)?;
    tracing::info!(fields = data.populated_fields(), "form 16 extracted");
    print_json(&serde_json::json!({ "data": data }), pretty);
    Ok(())
}

fn print_json(value: &serde_json::Value, pretty: bool) {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", out.unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string()));
}
