//! Grive Headless Runner
//!
//! Drives the buffer engine without a window: loads an optional file,
//! replays a script of edit commands, and prints the resulting snapshot.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use grive::app::Config;
use grive::core::{Command, Document, Snapshot};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut file: Option<PathBuf> = None;
    let mut script_file: Option<PathBuf> = None;
    let mut config_file: Option<PathBuf> = None;
    let mut output_format = OutputFormat::Text;
    let mut write_back = false;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--script" => {
                i += 1;
                if i < args.len() {
                    script_file = Some(PathBuf::from(&args[i]));
                }
            },
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(PathBuf::from(&args[i]));
                }
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-w" | "--write" => {
                write_back = true;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as the document file if no flag
                if file.is_none() && !args[i].starts_with('-') {
                    file = Some(PathBuf::from(&args[i]));
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match &config_file {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error reading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => Config::load_or_default(),
    };

    // Load the document
    let mut doc = Document::with_config(&config);
    if let Some(path) = &file {
        if path.exists() {
            if let Err(e) = doc.load_from_file(path) {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        } else {
            tracing::info!("{} does not exist, starting empty", path.display());
        }
    }

    // Read the script
    let script = match &script_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Error reading script '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            let mut script = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut script) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            script
        },
    };

    let commands = match Command::parse_script(&script) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    // Replay
    for command in &commands {
        tracing::debug!("apply {}", command);
        doc.apply(command);
    }

    if write_back {
        let Some(path) = &file else {
            eprintln!("Error: --write needs a FILE");
            return ExitCode::FAILURE;
        };
        if let Err(e) = doc.save_to_file(path) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        tracing::info!("Saved {} rows to {}", doc.line_count(), path.display());
    }

    // Output result
    let snapshot = Snapshot::from_document(&doc);
    match output_format {
        OutputFormat::Text => {
            print!("{}", snapshot.to_text());
        },
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    ExitCode::SUCCESS
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("Grive Headless Runner");
    println!();
    println!("Usage: grive-headless [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -s, --script <PATH>  Read edit commands from file (default: stdin)");
    println!("  -c, --config <PATH>  Use this config file");
    println!("  -w, --write          Save the result back to FILE");
    println!("  -j, --json           Output snapshot as JSON");
    println!("  -t, --text           Output snapshot as text (default)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Commands, one per line:");
    println!("  insert <text>, newline, backspace, delete, tab,");
    println!("  left, right, up, down, remove-line");
    println!();
    println!("Examples:");
    println!("  printf 'insert hi\\nnewline\\n' | grive-headless");
    println!("  grive-headless -s edits.txt -w notes.txt");
}
