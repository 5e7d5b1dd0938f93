use anyhow::{Context, Result};
use clap::Parser;
use sheetconv::{
    convert, export, load,
    mapping::{parse_assignment, ColumnMapping},
    prompt,
    schema::{Program, OUTPUT_FILE_NAME, TARGET_FIELDS},
};
use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::PathBuf,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Convert an Excel/CSV file into the fixed lead-export CSV layout
#[derive(Parser, Debug)]
#[command(name = "sheetconv", version)]
struct Args {
    /// File to convert; .xlsx/.xlsm/.xlsb/.xls/.ods are read as workbooks, anything else as CSV
    input: PathBuf,

    /// Map a target field to a source column (repeatable)
    #[arg(long = "map", value_name = "TARGET=SOURCE", value_parser = parse_assignment)]
    maps: Vec<(String, String)>,

    /// JSON object of target field -> source column for this conversion
    #[arg(long, value_name = "FILE")]
    mapping: Option<PathBuf>,

    /// Choose the source column for every target field on stdin
    #[arg(short, long)]
    interactive: bool,

    /// Value written to every row of "Program Name"
    #[arg(long, value_enum, default_value_t = Program::Idfc)]
    program: Program,

    /// Where to write the converted CSV
    #[arg(short, long, default_value = OUTPUT_FILE_NAME)]
    output: PathBuf,

    /// Rows shown in the source and converted previews
    #[arg(long, default_value_t = 5)]
    preview: usize,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    // ─── 2) load the upload ──────────────────────────────────────────
    let bytes = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let table = match load(&bytes, &file_name) {
        Ok(table) => table,
        Err(err) => {
            error!(file = %err.file_name, "{}", err.message);
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    println!(
        "File loaded successfully! Shape: ({}, {})",
        table.num_rows(),
        table.num_columns()
    );
    println!("\nOriginal Data Preview");
    print!("{}", export::render_preview(&table, args.preview));

    // ─── 3) collect the mapping ──────────────────────────────────────
    let mut mapping = ColumnMapping::new();
    if let Some(path) = &args.mapping {
        let file =
            File::open(path).with_context(|| format!("opening mapping {}", path.display()))?;
        mapping.merge(
            ColumnMapping::from_json_reader(BufReader::new(file))
                .with_context(|| format!("loading mapping {}", path.display()))?,
        );
    }
    mapping.merge(args.maps.iter().cloned().collect());

    let mut program = args.program;
    if args.interactive {
        let source_columns: Vec<String> = table.column_names().map(str::to_string).collect();
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        mapping.merge(prompt::prompt_mapping(
            &source_columns,
            &TARGET_FIELDS,
            &mut stdin,
            &mut stdout,
        )?);
        program = prompt::prompt_program(program, &mut stdin, &mut stdout)?;
    }
    info!(mapped = mapping.len(), %program, "mapping collected");

    // ─── 4) convert & write ──────────────────────────────────────────
    let converted = convert(&table, &mapping, program);
    println!("\nConverted Data Preview");
    print!("{}", export::render_preview(&converted, args.preview));

    export::write_csv_file(&converted, &args.output)?;
    println!("File converted successfully! Saved to {}", args.output.display());
    Ok(())
}
