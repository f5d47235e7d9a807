// Negative set generation: orchestration
//
// 1. Load the whole positive table and its cluster set once.
// 2. Stream the same file again as family blocks (must be sorted by family).
// 3. Per block (or per ncRNA sequence for the "unknown" family):
//    seed -> candidate pool -> draw -> append positives then negatives.
//
// Strictly sequential; the first InsufficientCandidatePool aborts the run.

use anyhow::{Context, Error};
use std::path::PathBuf;
use std::time::Instant;

use crate::error::NegSetError;
use crate::pool::CandidatePool;
use crate::sampler::draw_negatives;
use crate::seed::block_seed;
use crate::segment::{FamilyBlock, FamilyBlocks};
use crate::sink::{BatchKind, RecordSink, TsvSink};
use crate::table::{PositiveTable, TsvReader};

/*=================================================================
=                               ARGS                              =
=================================================================*/

#[derive(Debug, Clone)]
pub struct MakeNegArgs {
    /// Input TSV, MUST be sorted by noncodingRNA_fam
    pub ifile: PathBuf,
    pub ofile: PathBuf,
    pub quiet: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub blocks: usize,
    pub positives: usize,
    pub negatives: usize,
}

/*=================================================================
=                            EXECUTION                            =
=================================================================*/

pub fn execute_make_neg_sets(args: &MakeNegArgs) -> Result<RunSummary, Error> {
    let start_main = Instant::now();

    let table = PositiveTable::open(&args.ifile)
        .with_context(|| format!("Failed to load positive table {:?}", args.ifile))?;
    println!(
        "Loaded {} positive rows spanning {} gene clusters",
        table.len(),
        table.clusters().len()
    );

    let rows = TsvReader::open(&args.ifile)
        .with_context(|| format!("Failed to open {:?} for block streaming", args.ifile))?;
    let blocks = FamilyBlocks::new(rows, table.schema());

    let mut sink = TsvSink::create(&args.ofile)
        .with_context(|| format!("Failed to create output file {:?}", args.ofile))?;

    let summary = generate_negatives(&table, blocks, &mut sink, args.quiet)?;

    let total_time = start_main.elapsed();
    println!("\n=== Negative Set Generation Results ===");
    println!("Blocks processed: {}", summary.blocks);
    println!("Positive rows written: {}", summary.positives);
    println!("Negative rows written: {}", summary.negatives);
    println!("Total time: {:.2}s", total_time.as_secs_f64());

    Ok(summary)
}

/// Run the sampling loop over `blocks`, writing into `sink`.
pub fn generate_negatives<I, S>(
    table: &PositiveTable,
    blocks: I,
    sink: &mut S,
    quiet: bool,
) -> Result<RunSummary, NegSetError>
where
    I: IntoIterator<Item = Result<FamilyBlock, NegSetError>>,
    S: RecordSink,
{
    let schema = table.schema();
    sink.write_header(schema)?;

    let mut summary = RunSummary::default();
    for block in blocks {
        let block = block?;

        if block.is_unknown() {
            // Each distinct unknown-family ncRNA is its own unit
            for sub_block in block.split_by_sequence(schema) {
                process_block(table, &sub_block, sink, &mut summary)?;
                if !quiet {
                    println!("Processed ncRNA sequence block: {}", sub_block.first_rna(schema));
                }
            }
        } else {
            process_block(table, &block, sink, &mut summary)?;
            if !quiet {
                println!("Processed ncRNA family block: {}", block.family());
            }
        }
    }

    sink.finish()?;
    Ok(summary)
}

fn process_block<S: RecordSink>(
    table: &PositiveTable,
    block: &FamilyBlock,
    sink: &mut S,
    summary: &mut RunSummary,
) -> Result<(), NegSetError> {
    let schema = table.schema();
    let seed = block_seed(block.seed_identifier(schema));

    let pool = CandidatePool::build(table, block, seed);
    let negatives = draw_negatives(schema, block, &pool, seed)?;

    sink.append_batch(BatchKind::Positive, block.records())?;
    sink.append_batch(BatchKind::Negative, &negatives)?;

    summary.blocks += 1;
    summary.positives += block.len();
    summary.negatives += negatives.len();
    Ok(())
}
