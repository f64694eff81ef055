use clap::Parser;
use datasource::{DataSource, MergedSource, Source, SourceError, SourceExt, info, telemetry};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "datasource",
    version,
    about = "Print in-memory values and token files merged round-robin"
)]
struct Cli {
    /// Token files of whitespace-separated integers
    files: Vec<PathBuf>,

    /// In-memory values, comma separated; merged ahead of the files
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    values: Vec<i64>,

    /// Fetch in batches of this size and print one batch per line
    #[arg(long, value_name = "COUNT")]
    batch: Option<usize>,

    /// Rewind every source and print the merged output a second time
    #[arg(long)]
    rewind: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();
    let cli = Cli::parse();

    let mut members: Vec<DataSource<'static, i64>> = Vec::new();
    if !cli.values.is_empty() {
        members.push(DataSource::from_slice(&cli.values)?);
    }
    for path in &cli.files {
        members.push(DataSource::open_file(path)?);
    }
    info!("Merging {} sources", members.len());

    let passes = if cli.rewind { 2 } else { 1 };
    for pass in 0..passes {
        if pass > 0 {
            for member in members.iter_mut() {
                member.reset()?;
            }
            println!("--");
        }

        let mut merged = MergedSource::new(
            members
                .iter_mut()
                .map(|member| member as &mut dyn Source<i64>)
                .collect(),
        );
        let printed = print_all(&mut merged, cli.batch)?;
        info!("Pass {pass} printed {printed} elements");
    }

    Ok(())
}

fn print_all(source: &mut dyn Source<i64>, batch: Option<usize>) -> Result<usize, SourceError> {
    let mut printed = 0;

    if let Some(size) = batch.filter(|size| *size > 0) {
        loop {
            let chunk = source.fetch_batch(size)?;
            if chunk.is_empty() {
                break;
            }
            let line: Vec<String> = chunk.iter().map(i64::to_string).collect();
            println!("{}", line.join(" "));
            printed += chunk.len();
        }
    } else {
        for element in source.elements() {
            println!("{}", element?);
            printed += 1;
        }
    }

    Ok(printed)
}
