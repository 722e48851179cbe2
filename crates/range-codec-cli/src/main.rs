//! rangecodec CLI - convert between CSV and encoded range data

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use range_codec::{decode_with, encode_with, verify_with, CodecOptions, Grid, LengthUnit, Sheet};
use range_codec_protocol::{
    handle_request, parse_request, response_line, Command, ProtocolError, Response, SheetHost,
};
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rangecodec")]
#[command(
    author,
    version,
    about = "Encode, decode and serve length-prefixed spreadsheet range data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a CSV grid (no header row) as range data
    Encode {
        /// Input CSV file (default: stdin)
        input: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Unit used for value lengths
        #[arg(short, long, value_enum, default_value_t = Unit::Chars)]
        unit: Unit,
    },

    /// Decode range data into CSV
    Decode {
        /// Input file holding encoded range data (default: stdin)
        input: Option<PathBuf>,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Unit used for value lengths
        #[arg(short, long, value_enum, default_value_t = Unit::Chars)]
        unit: Unit,
    },

    /// Check that range data decodes and re-encodes to the same text
    Verify {
        /// Input file holding encoded range data (default: stdin)
        input: Option<PathBuf>,

        /// Unit used for value lengths
        #[arg(short, long, value_enum, default_value_t = Unit::Chars)]
        unit: Unit,
    },

    /// Answer JSON range requests on stdin against a CSV-backed sheet
    Serve {
        /// CSV file loaded as the sheet "Sheet1"
        sheet: PathBuf,

        /// Write the sheet back to the CSV file on shutdown
        #[arg(long)]
        save: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Unit {
    Chars,
    Utf16,
    Bytes,
}

impl From<Unit> for LengthUnit {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Chars => LengthUnit::Chars,
            Unit::Utf16 => LengthUnit::Utf16,
            Unit::Bytes => LengthUnit::Bytes,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            delimiter,
            unit,
        } => encode_csv(input.as_deref(), delimiter, unit),
        Commands::Decode {
            input,
            output,
            delimiter,
            unit,
        } => decode_to_csv(input.as_deref(), output.as_deref(), delimiter, unit),
        Commands::Verify { input, unit } => verify_input(input.as_deref(), unit),
        Commands::Serve { sheet, save } => serve(&sheet, save),
    }
}

fn options(unit: Unit) -> CodecOptions {
    CodecOptions::with_length_unit(unit.into())
}

fn encode_csv(input: Option<&Path>, delimiter: char, unit: Unit) -> Result<()> {
    let rows = read_csv(input, delimiter)?;
    let grid = Grid::new(rows).context("CSV rows must all have the same number of fields")?;

    let text = encode_with(&grid, &options(unit));
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("Failed to write to stdout")?;
    Ok(())
}

fn decode_to_csv(
    input: Option<&Path>,
    output: Option<&Path>,
    delimiter: char,
    unit: Unit,
) -> Result<()> {
    let text = read_encoded(input)?;
    let grid = decode_with(&text, &options(unit)).context("Failed to decode range data")?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            write_csv(file, grid.rows(), delimiter)?;
            eprintln!(
                "Wrote {}x{} grid to '{}'",
                grid.row_count(),
                grid.col_count(),
                path.display()
            );
        }
        None => write_csv(io::stdout().lock(), grid.rows(), delimiter)?,
    }
    Ok(())
}

fn verify_input(input: Option<&Path>, unit: Unit) -> Result<()> {
    let text = read_encoded(input)?;
    let grid = verify_with(&text, &options(unit)).context("Range data failed verification")?;
    println!("ok: {} x {}", grid.row_count(), grid.col_count());
    Ok(())
}

fn serve(path: &Path, save: bool) -> Result<()> {
    let rows = read_csv(Some(path), ',')?;
    let sheet = Sheet::from_rows("Sheet1", rows)
        .with_context(|| format!("'{}' does not fit in a sheet", path.display()))?;
    let mut host = SheetHost::new(vec![sheet]);

    // stdout carries protocol lines only; diagnostics go to stderr
    eprintln!("[rangecodec] Serving '{}'", path.display());

    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read request from stdin")?;

        let response = match parse_request(&line) {
            Ok(request) => {
                let response = handle_request(&mut host, &request);
                if matches!(request.command, Command::Shutdown) {
                    send(&mut out, &response)?;
                    break;
                }
                response
            }
            Err(ProtocolError::Empty) => continue,
            Err(e) => {
                eprintln!("[rangecodec] {e}");
                // The id is unknown when the request itself did not parse
                Response::error(0, e.to_string())
            }
        };
        send(&mut out, &response)?;
    }

    if save {
        let sheet = &host.sheets()[0];
        let rows = sheet.to_rows().context("Sheet is too large to save")?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        write_csv(file, rows.iter().map(Vec::as_slice), ',')?;
        eprintln!("[rangecodec] Saved {} rows to '{}'", rows.len(), path.display());
    }

    Ok(())
}

fn send(out: &mut impl Write, response: &Response) -> Result<()> {
    let line = response_line(response)?;
    writeln!(out, "{line}").context("Failed to write response")?;
    out.flush().context("Failed to flush response")?;
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Encoded data is one line; drop the single newline `encode` writes after
/// it. A `\r` before it belongs to the last value.
fn read_encoded(input: Option<&Path>) -> Result<String> {
    let mut text = read_input(input)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got {delimiter:?}");
    }
    Ok(delimiter as u8)
}

fn read_csv(input: Option<&Path>, delimiter: char) -> Result<Vec<Vec<String>>> {
    let text = read_input(input)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to parse CSV")?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn write_csv<'a, W: Write>(
    writer: W,
    rows: impl Iterator<Item = &'a [String]>,
    delimiter: char,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in rows {
        csv_writer
            .write_record(row)
            .context("Failed to write CSV record")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
