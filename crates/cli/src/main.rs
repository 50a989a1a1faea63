// dossierdiff CLI - compare two revisions of a qualification file

mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use dossierdiff_recon::CompareConfig;

use exit_codes::{EXIT_CONFIG, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "ddiff")]
#[command(about = "Compare two revisions of a qualification file")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare an old and a new document record and export the report
    #[command(after_help = "\
Examples:
  ddiff compare old.document.json new.document.json
  ddiff compare old.document.json new.document.json --config compare.toml
  ddiff compare old.document.json new.document.json -o out -p beveiliger
  ddiff compare old.document.json new.document.json --json")]
    Compare {
        /// Path to the old revision's document record (JSON)
        old: PathBuf,

        /// Path to the new revision's document record (JSON)
        new: PathBuf,

        /// Path to a compare.toml; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the exported report files
        #[arg(long, short = 'o', default_value = "output")]
        output_dir: PathBuf,

        /// File name prefix for the exported report files
        #[arg(long, short = 'p', default_value = "qualification")]
        prefix: String,

        /// Print the full result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the full result as JSON to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a compare config without running
    #[command(after_help = "\
Examples:
  ddiff validate compare.toml")]
    Validate {
        /// Path to the compare.toml config file
        config: PathBuf,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    fn parse(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_PARSE,
            message: msg.into(),
            hint: None,
        }
    }

    fn config(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_CONFIG,
            message: msg.into(),
            hint: Some("run `ddiff validate <config>` to check the file".into()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            old,
            new,
            config,
            output_dir,
            prefix,
            json,
            output,
        } => cmd_compare(old, new, config, output_dir, prefix, json, output),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<CompareConfig, CliError> {
    let Some(path) = path else {
        return Ok(CompareConfig::default());
    };
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;
    CompareConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))
}

fn cmd_compare(
    old: PathBuf,
    new: PathBuf,
    config_path: Option<PathBuf>,
    output_dir: PathBuf,
    prefix: String,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_ref())?;

    let old_doc = dossierdiff_io::document::read_document(&old)
        .map_err(|e| CliError::parse(format!("{}: {e}", old.display())))?;
    let new_doc = dossierdiff_io::document::read_document(&new)
        .map_err(|e| CliError::parse(format!("{}: {e}", new.display())))?;

    let result = dossierdiff_recon::run(&config, &old_doc, &new_doc);

    std::fs::create_dir_all(&output_dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", output_dir.display())))?;

    let csv_path = output_dir.join(format!("{prefix}_comparison.csv"));
    dossierdiff_io::csv::export_csv(&result.rows, &csv_path).map_err(CliError::io)?;
    eprintln!("wrote {}", csv_path.display());

    let xlsx_path = output_dir.join(format!("{prefix}_comparison.xlsx"));
    dossierdiff_io::xlsx::export_xlsx(&result.rows, &xlsx_path).map_err(CliError::io)?;
    eprintln!("wrote {}", xlsx_path.display());

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "compared: {} rows — {} unchanged, {} renamed, {} re-coded, {} removed, {} added",
        s.total_rows, s.unchanged, s.renamed, s.recoded, s.removed, s.added,
    );

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", config_path.display())))?;
    let config =
        CompareConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))?;
    println!("ok: {}", config.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.name, "Qualification file comparison");
    }

    #[test]
    fn invalid_config_maps_to_config_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.toml");
        std::fs::write(&path, "[thresholds]\nfuzzy_match = 2.0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert_eq!(err.code, EXIT_CONFIG);
        assert!(err.message.contains("fuzzy_match"));
    }

    #[test]
    fn unreadable_config_maps_to_io_exit_code() {
        let err = load_config(Some(&PathBuf::from("/nonexistent/compare.toml"))).unwrap_err();
        assert_eq!(err.code, EXIT_IO);
    }
}
