//! protoc-gen-swagger parameter inspector
//!
//! Command-line interface for checking how the plugin interprets a request
//! parameter string or a serialized CodeGeneratorRequest.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use protoc_gen_swagger_params::{FlagRegistry, ParsedParams, PluginRequest};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "swagger-params")]
#[command(version, about = "Inspect protoc-gen-swagger request parameters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a request parameter string and display the resulting options
    #[command(after_help = "EXAMPLES:\n  \
        # Bare flags are set to true\n  \
        swagger-params parse allow_merge,merge_file_name=api\n\n  \
        # Map a proto file to an import path\n  \
        swagger-params parse 'Mgoogle/api/annotations.proto=example.com/google/api'\n\n  \
        # Print JSON\n  \
        swagger-params parse --json allow_delete_body")]
    Parse {
        /// Comma-separated request parameter
        #[arg(default_value = "")]
        param: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a serialized CodeGeneratorRequest and parse its parameter
    #[command(after_help = "EXAMPLES:\n  \
        # Read the request from a file\n  \
        swagger-params request --input request.pb\n\n  \
        # Read the request from stdin\n  \
        swagger-params request < request.pb")]
    Request {
        /// Path to the serialized request (stdin if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the flags the plugin understands
    Flags,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Parse { param, json } => parse_command(&param, json)?,
        Commands::Request { input, json } => request_command(input.as_deref(), json)?,
        Commands::Flags => flags_command(),
    }

    Ok(())
}

fn parse_command(param: &str, json: bool) -> Result<()> {
    if !json {
        println!("{} Parsing request parameter: {}", "→".cyan(), param.yellow());
    }

    let parsed = protoc_gen_swagger_params::parse_options(param)
        .context("Failed to parse request parameter")?;

    if json {
        print_json(&parsed)
    } else {
        println!("\n{}", "✓ Parse successful!".green().bold());
        print_parsed(&parsed);
        Ok(())
    }
}

fn request_command(input: Option<&Path>, json: bool) -> Result<()> {
    let request = match input {
        Some(path) => {
            if !json {
                println!("{} Reading request: {}", "→".cyan(), path.display());
            }
            PluginRequest::from_file(path).context("Failed to load CodeGeneratorRequest")?
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            PluginRequest::from_bytes(&bytes).context("Failed to decode CodeGeneratorRequest")?
        }
    };

    let parsed = request
        .parse()
        .context("Failed to parse request parameter")?;

    if json {
        let value = serde_json::json!({
            "parameter": request.parameter(),
            "files_to_generate": request.files_to_generate(),
            "options": parsed.options,
            "package_map": parsed.package_map,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("\n{}", "✓ Request decoded!".green().bold());
    println!("  Parameter: {}", request.parameter().yellow());
    println!("\n{}", "Files to generate:".bold());
    if request.files_to_generate().is_empty() {
        println!("  {} none", "⚠".yellow());
    }
    for file in request.files_to_generate() {
        println!("  • {}", file.cyan());
    }
    print_parsed(&parsed);

    Ok(())
}

fn flags_command() {
    let flags = FlagRegistry::swagger();

    println!("{}", "Flags:".bold());
    for flag in flags.iter() {
        println!(
            "  {} ({}, default {:?})",
            flag.name().cyan(),
            flag.kind(),
            flag.default_value().to_string()
        );
        println!("    {}", flag.usage());
    }
    println!(
        "\n  {}<proto file>=<import path> maps a proto file to an import path",
        protoc_gen_swagger_params::PACKAGE_MAP_PREFIX.to_string().cyan()
    );
}

fn print_parsed(parsed: &ParsedParams) {
    let options = &parsed.options;

    println!("\n{}", "Options:".bold());
    println!("  allow_delete_body: {}", options.allow_delete_body);
    println!("  allow_merge: {}", options.allow_merge);
    println!(
        "  allow_repeated_fields_in_body: {}",
        options.allow_repeated_fields_in_body
    );
    println!("  file: {}", options.file.yellow());
    println!("  import_prefix: {}", options.import_prefix.yellow());
    println!("  merge_file_name: {}", options.merge_file_name.yellow());

    println!("\n{}", "Package map:".bold());
    if parsed.package_map.is_empty() {
        println!("  (empty)");
    }
    for (path, import) in &parsed.package_map {
        println!("  • {} → {}", path.cyan(), import);
    }
}

fn print_json(parsed: &ParsedParams) -> Result<()> {
    let rendered = serde_json::to_string_pretty(parsed).context("Failed to render JSON")?;
    println!("{}", rendered);
    Ok(())
}
