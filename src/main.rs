//! fc-permute command line interface.
//!
//! `assemble` builds the combined two-condition dataset once; `permute` is
//! the per-task entry point an array-job scheduler launches many times, one
//! independent permutation sample per task id.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use fc_permute::{assemble, combine, io, output, run_task, NamedAtlas};

#[derive(Parser)]
#[command(name = "fc-permute")]
#[command(version)]
#[command(about = "Label-permutation Wasserstein testing for functional-connectivity arrays")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble two condition artifacts into one combined labeled dataset.
    Assemble {
        /// First condition's nested matrix mapping (JSON).
        #[arg(long)]
        condition_a: PathBuf,
        /// Condition tag for the first artifact (e.g. fm20).
        #[arg(long)]
        tag_a: String,
        /// Second condition's nested matrix mapping (JSON).
        #[arg(long)]
        condition_b: PathBuf,
        /// Condition tag for the second artifact (e.g. fm24).
        #[arg(long)]
        tag_b: String,
        /// Ordered region-name list for the parcellation (JSON array).
        #[arg(long)]
        atlas: PathBuf,
        /// Where to write the combined dataset.
        #[arg(long)]
        output: PathBuf,
    },
    /// Run one permutation sample and persist it.
    Permute {
        /// Array-job task identifier; also seeds the shuffle.
        #[arg(long)]
        task_id: u64,
        /// Path to the combined dataset.
        #[arg(long)]
        input_file: PathBuf,
        /// Directory for output artifacts (created if absent).
        #[arg(long)]
        output_dir: PathBuf,
    },
}

fn run(cli: Cli) -> fc_permute::Result<()> {
    match cli.command {
        Commands::Assemble {
            condition_a,
            tag_a,
            condition_b,
            tag_b,
            atlas,
            output: output_path,
        } => {
            let atlas = NamedAtlas::new(io::read_atlas_names(&atlas)?);
            let data_a = io::read_condition_data(&condition_a)?;
            let data_b = io::read_condition_data(&condition_b)?;
            let combined = combine(
                &assemble(&data_a, &tag_a, &atlas)?,
                &assemble(&data_b, &tag_b, &atlas)?,
            )?;
            io::write_dataset(&output_path, &combined)?;
            print!("{}", output::format_dataset_summary(&combined));
            println!("{}", output_path.display());
        }
        Commands::Permute {
            task_id,
            input_file,
            output_dir,
        } => {
            let combined = io::read_dataset(&input_file)?;
            let result = run_task(&combined, task_id)?;
            let path = io::write_permutation(&output_dir, task_id, &result)?;
            print!("{}", output::format_permutation_summary(&result));
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fc-permute: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
