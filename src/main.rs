//! # Sello CLI
//!
//! Command-line interface for the placeholder layout engine.
//!
//! ## Usage
//!
//! ```bash
//! # Run the placeholder editing server with on-disk templates
//! sello serve --listen 0.0.0.0:8080 --data-dir ./templates
//!
//! # Resolve a render plan offline from a template JSON file
//! sello plan --template diploma.json \
//!     --student-name "Jane Doe" --course-name "Rust 101" \
//!     --date 2026-08-27 --certificate-no CERT-0042
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sello::{
    error::SelloError,
    measure::{ApproxMeasure, TextMeasure, TtfMeasure},
    placeholder::PlaceholderSet,
    plan::{certificate_fields, resolve_plan},
    server::{serve, ServerConfig},
    template::Template,
};

/// Sello - certificate placeholder layout utility
#[derive(Parser, Debug)]
#[command(name = "sello")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the placeholder editing HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Directory for template JSON files (omit for in-memory storage)
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// TTF font used for text measurement
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,
    },

    /// Resolve draw commands for one certificate from a template JSON file
    Plan {
        /// Template JSON file (as stored by the server's data dir)
        #[arg(long, value_name = "FILE")]
        template: PathBuf,

        #[arg(long)]
        student_name: String,

        #[arg(long)]
        course_name: String,

        #[arg(long)]
        date: String,

        #[arg(long)]
        certificate_no: String,

        /// TTF font used for text measurement (omit for estimate)
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SelloError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            data_dir,
            font,
        } => {
            serve(ServerConfig {
                listen_addr: listen,
                data_dir,
                font_path: font,
            })
            .await
        }

        Commands::Plan {
            template,
            student_name,
            course_name,
            date,
            certificate_no,
            font,
        } => {
            let data = std::fs::read(&template)?;
            let template: Template = serde_json::from_slice(&data).map_err(|e| {
                SelloError::Template(format!("Failed to parse template file: {e}"))
            })?;

            let measure: Box<dyn TextMeasure> = match font {
                Some(path) => Box::new(TtfMeasure::from_file(path)?),
                None => Box::new(ApproxMeasure),
            };

            let placeholders = PlaceholderSet::from_records(&template.placeholders);
            let fields = certificate_fields(student_name, course_name, date, certificate_no);
            let commands = resolve_plan(&placeholders, &fields, measure.as_ref());

            println!(
                "{}",
                serde_json::to_string_pretty(&commands)
                    .map_err(|e| SelloError::Template(format!("Serialize failed: {e}")))?
            );
            Ok(())
        }
    }
}
