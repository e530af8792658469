use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geotag_survey::formats::exif::tags;
use geotag_survey::geo::extract::extract_from;
use geotag_survey::{find_exif_payload, ingest_directory, ExifReader, FeatureCollection};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a FeatureCollection from every image under a survey directory
    Extract {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Stop after this many images
        #[arg(short, long)]
        limit: Option<usize>,

        /// Write the collection here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the EXIF directories and geolocation of one image
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract { dir, limit, output } => run_extract(dir, limit, output),
        Command::Inspect { file } => run_inspect(file),
    }
}

fn run_extract(dir: PathBuf, limit: Option<usize>, output: Option<PathBuf>) -> Result<()> {
    let start_time = std::time::Instant::now();

    let report = ingest_directory(&dir, limit)
        .with_context(|| format!("cannot scan {}", dir.display()))?;

    for failure in &report.failures {
        error!("{}: {}", failure.filename, failure.error);
    }

    let collection = FeatureCollection::new(&report.records);
    let json = serde_json::to_string_pretty(&collection)?;

    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("cannot write {}", path.display()))?;
            info!("Written {} feature(s) to {:?}", collection.len(), path);
        }
        None => println!("{}", json),
    }

    info!("Total processing time: {:?}", start_time.elapsed());
    Ok(())
}

fn run_inspect(file: PathBuf) -> Result<()> {
    let bytes = fs::read(&file).with_context(|| format!("cannot read {}", file.display()))?;

    let Some(payload) = find_exif_payload(&bytes)? else {
        println!("{}: no EXIF segment", file.display());
        return Ok(());
    };

    let mut reader = ExifReader::new(payload)?;
    let exif = reader.read()?;

    println!("{}", file.display());
    println!("{}", exif);

    for tag in [tags::MAKE, tags::MODEL, tags::DATE_TIME] {
        if let Some(entry) = exif.primary.get_entry(tag) {
            match reader.read_tag_ascii(entry) {
                Ok(value) => println!("  {}: {}", tags::tag_name(tag), value),
                Err(e) => println!("  {}: <{}>", tags::tag_name(tag), e),
            }
        }
    }

    if let Some(entry) = exif.primary.get_entry(tags::ORIENTATION) {
        match reader.read_tag_u32s(entry) {
            Ok(values) => println!("  {}: {:?}", tags::tag_name(tags::ORIENTATION), values),
            Err(e) => println!("  {}: <{}>", tags::tag_name(tags::ORIENTATION), e),
        }
    }

    let geolocation = extract_from(&mut reader, &exif);
    match geolocation.yaw.degrees() {
        Some(heading) => println!("  Heading: {:.2} deg", heading),
        None => println!("  Heading: unknown"),
    }
    println!("{}", serde_json::to_string_pretty(&geolocation)?);

    Ok(())
}
