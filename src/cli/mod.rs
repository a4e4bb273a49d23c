// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands each command to its
// use case in Layer 2. After a build, every loader is walked
// once so the user sees batch counts and tensor shapes.

pub mod commands;

use anyhow::Result;
use burn::{backend::NdArray, data::dataloader::DataLoader, prelude::Backend};
use clap::Parser;
use commands::{BuildArgs, Commands, ShuffleArgs, TestArgs};

/// Batches are materialised on the CPU.
type PrepBackend = NdArray;

#[derive(Parser, Debug)]
#[command(
    name = "rc-dataset",
    version = "0.1.0",
    about = "Prepare character-level reading-comprehension datasets for span-extraction models."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Build(args)     => run_build(args),
            Commands::BuildTest(args) => run_build_test(args),
            Commands::Shuffle(args)   => run_shuffle(args),
        }
    }
}

fn run_build(args: BuildArgs) -> Result<()> {
    use crate::application::build_use_case::BuildUseCase;

    tracing::info!("Preparing train/valid data from: {}", args.train_file);

    let device = <PrepBackend as Backend>::Device::default();
    let data   = BuildUseCase::new(args.into()).execute::<PrepBackend>(&device)?;

    let (train_batches, train_shape) =
        walk_loader(data.train_loader.as_ref(), |b| b.article.dims());
    let (valid_batches, valid_shape) =
        walk_loader(data.valid_loader.as_ref(), |b| b.article.dims());

    println!(
        "train: {} examples in {} batches (first article batch {:?})",
        data.report.train_size, train_batches, train_shape,
    );
    println!(
        "valid: {} examples in {} batches (first article batch {:?})",
        data.report.valid_size, valid_batches, valid_shape,
    );
    Ok(())
}

fn run_build_test(args: TestArgs) -> Result<()> {
    use crate::application::test_use_case::TestUseCase;

    tracing::info!("Preparing test data from: {}", args.test_file);

    let device = <PrepBackend as Backend>::Device::default();
    let data   = TestUseCase::new(args.into()).execute::<PrepBackend>(&device)?;

    if data.is_empty() {
        tracing::warn!("Test corpus produced no questions");
    } else if let Some(id) = &data.question_ids[0] {
        tracing::debug!("First test question id: {}", id);
    }

    let (batches, shape) = walk_loader(data.test_loader.as_ref(), |b| b.article.dims());
    println!(
        "test: {} examples in {} batches (first article batch {:?})",
        data.len(), batches, shape,
    );
    Ok(())
}

fn run_shuffle(args: ShuffleArgs) -> Result<()> {
    use crate::application::shuffle_use_case::ShuffleUseCase;

    let output  = args.output.clone();
    let written = ShuffleUseCase::new(args.into()).execute()?;
    println!("Wrote {} shuffle indices to {}", written, output);
    Ok(())
}

/// Iterate a loader once; returns the batch count and the shape
/// reported by `shape` for the first batch.
fn walk_loader<O>(
    loader: &dyn DataLoader<O>,
    shape:  impl Fn(&O) -> [usize; 2],
) -> (usize, Option<[usize; 2]>) {
    let mut count = 0usize;
    let mut first = None;

    for batch in loader.iter() {
        if first.is_none() {
            first = Some(shape(&batch));
        }
        count += 1;
    }

    tracing::debug!("Walked {} batches", count);
    (count, first)
}
