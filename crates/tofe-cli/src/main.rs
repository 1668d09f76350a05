use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use tofe_core::{BoardReport, Header, build_report, decode_header};

mod crc;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TOFE_BUILD_COMMIT"),
    " ",
    env!("TOFE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "tofe")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for TOFE board EEPROM metadata (atoms).",
    long_about = None,
    after_help = "Examples:\n  tofe eeprom decode dump.bin -o report.json\n  tofe eeprom decode dump.bin --stdout --pretty\n  tofe eeprom print dump.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on EEPROM dump files.
    Eeprom {
        #[command(subcommand)]
        command: EepromCommands,
    },
}

#[derive(Subcommand, Debug)]
enum EepromCommands {
    /// Decode a dump into a versioned JSON report.
    Decode {
        /// Path to an EEPROM dump (raw bytes, TOFE header first)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code on checksum mismatch or atom errors
        #[arg(long)]
        strict: bool,
    },
    /// Print one rendered line per atom.
    Print {
        /// Path to an EEPROM dump (raw bytes, TOFE header first)
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eeprom { command } => match command {
            EepromCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
            } => cmd_eeprom_decode(input, report, stdout, pretty, compact, quiet, strict),
            EepromCommands::Print { input } => cmd_eeprom_print(input),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_eeprom_decode(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
) -> Result<(), CliError> {
    let bytes = read_dump(&input)?;
    let (rep, crc_valid) = decode_dump(&bytes)?;
    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
    } else {
        let report = report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        if let Some(parent) = report.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(&report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", report.display());
        }
    }

    if strict {
        if !crc_valid {
            return Err(CliError::new(
                "checksum mismatch",
                Some("the dump may be corrupt or written by a different tool".to_string()),
            ));
        }
        let atom_errors = rep.atoms.iter().filter(|entry| entry.error.is_some()).count();
        if atom_errors > 0 || rep.truncated.is_some() {
            return Err(CliError::new(
                format!("decode problems: {} atom error(s)", atom_errors),
                Some("inspect the report's error fields".to_string()),
            ));
        }
    }
    Ok(())
}

fn cmd_eeprom_print(input: PathBuf) -> Result<(), CliError> {
    let bytes = read_dump(&input)?;
    let (rep, crc_valid) = decode_dump(&bytes)?;

    for entry in &rep.atoms {
        match (&entry.text, &entry.error) {
            (Some(text), _) => println!("{}: {}", entry.label, text),
            (None, Some(err)) => println!("{}: error: {}", entry.label, err),
            (None, None) => println!("{}:", entry.label),
        }
    }
    if let Some(truncated) = &rep.truncated {
        eprintln!("warning: traversal stopped early: {}", truncated);
    }
    if !crc_valid {
        eprintln!("warning: checksum mismatch");
    }
    Ok(())
}

fn read_dump(input: &PathBuf) -> Result<Vec<u8>, CliError> {
    let meta = fs::metadata(input).map_err(|err| {
        CliError::new(
            format!("cannot read input: {}: {}", input.display(), err),
            Some("pass a raw EEPROM dump file".to_string()),
        )
    })?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a raw EEPROM dump file".to_string()),
        ));
    }
    Ok(fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))?)
}

fn decode_dump(bytes: &[u8]) -> Result<(BoardReport, bool), CliError> {
    let header = decode_header(bytes).map_err(|err| {
        CliError::new(
            format!("not a TOFE image: {}", err),
            Some("the dump must start with the TOFE header".to_string()),
        )
    })?;
    let crc_valid = validate_crc(&header);
    Ok((build_report(&header, Some(crc_valid)), crc_valid))
}

fn validate_crc(header: &Header<'_>) -> bool {
    let (before, after) = header.crc_input();
    crc::crc8(before, after) == header.crc8
}

fn serialize_report(
    rep: &BoardReport,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let json = if pretty {
        serde_json::to_string_pretty(rep)
    } else {
        serde_json::to_string(rep)
    };
    let mut json = json
        .map_err(|err| CliError::new(format!("failed to serialize report: {}", err), None))?;
    json.push('\n');
    Ok(json)
}
