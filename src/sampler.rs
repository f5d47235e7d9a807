// Negative sampling
// Draws block.len() gene rows without replacement from the candidate pool and
// pairs them by index with the block's positives. The draw reseeds from the same
// block seed used for the pool shuffle, so one hash drives the whole block.

use rand::seq::index;

use crate::error::NegSetError;
use crate::pool::CandidatePool;
use crate::seed::block_rng;
use crate::segment::FamilyBlock;
use crate::table::{Record, Schema};

pub const NEGATIVE_LABEL: &str = "0";

/// Sample one negative per positive in `block`.
///
/// Fails with [`NegSetError::InsufficientCandidatePool`] when the pool holds
/// fewer rows than the block; negatives are never drawn with replacement.
pub fn draw_negatives(
    schema: &Schema,
    block: &FamilyBlock,
    pool: &CandidatePool<'_>,
    seed: u64,
) -> Result<Vec<Record>, NegSetError> {
    let required = block.len();
    if required > pool.len() {
        return Err(NegSetError::InsufficientCandidatePool {
            family: block.family().to_string(),
            rna: block.first_rna(schema).to_string(),
            required,
            available: pool.len(),
        });
    }

    let mut rng = block_rng(seed);
    let picks = index::sample(&mut rng, pool.len(), required);

    let negatives = picks
        .into_iter()
        .zip(block.records())
        .map(|(pick, positive)| pair_negative(schema, positive, pool.rows()[pick]))
        .collect();
    Ok(negatives)
}

/// Build a negative: ncRNA columns from `positive`, label 0, everything else
/// from `gene_row`. Column order follows the schema.
pub fn pair_negative(schema: &Schema, positive: &Record, gene_row: &Record) -> Record {
    let fields = (0..schema.len())
        .map(|idx| {
            if idx == schema.label {
                NEGATIVE_LABEL.to_string()
            } else if schema.is_rna_side(idx) {
                positive.field(idx).to_string()
            } else {
                gene_row.field(idx).to_string()
            }
        })
        .collect();
    Record::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fixtures::{row, table};
    use crate::table::PositiveTable;
    use std::collections::HashSet;

    fn block_from(table: &PositiveTable, family: &str) -> FamilyBlock {
        let records = table
            .records()
            .iter()
            .filter(|r| table.schema().family_of(r) == family)
            .cloned()
            .collect();
        FamilyBlock::new(family, records)
    }

    #[test]
    fn test_pair_negative_takes_rna_side_from_positive() {
        let t = table(&[
            row("AAAA", "miR-1", "famA", "g1", "1"),
            row("CCCC", "miR-2", "famB", "g2", "2").replace("chr1\t100\t150\t+", "chr7\t900\t950\t-"),
        ]);
        let negative = pair_negative(t.schema(), &t.records()[0], &t.records()[1]);
        assert_eq!(
            negative.to_line(),
            "AAAA\tmiR-1\tfamA\tg2\t3UTR\tCLASH\tchr7\t900\t950\t-\t2\t0"
        );
    }

    #[test]
    fn test_draw_pairs_by_index() {
        let t = table(&[
            row("AAAA", "miR-1", "famA", "g1", "1"),
            row("AAAC", "miR-1b", "famA", "g2", "2"),
            row("AAAG", "miR-1c", "famA", "g3", "3"),
            row("CCCC", "miR-2", "famB", "g4", "4"),
            row("CCCC", "miR-2", "famB", "g5", "5"),
            row("CCCC", "miR-2", "famB", "g6", "6"),
            row("CCCC", "miR-2", "famB", "g7", "7"),
        ]);
        let schema = t.schema();
        let block = block_from(&t, "famA");
        let pool = CandidatePool::build(&t, &block, 5);
        let negatives = draw_negatives(schema, &block, &pool, 5).unwrap();

        assert_eq!(negatives.len(), block.len());
        for (negative, positive) in negatives.iter().zip(block.records()) {
            assert_eq!(schema.rna_of(negative), schema.rna_of(positive));
            assert_eq!(schema.name_of(negative), schema.name_of(positive));
            assert_eq!(negative.field(schema.label), "0");
        }
        let clusters: HashSet<&str> = negatives.iter().map(|r| schema.cluster_of(r)).collect();
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| ["4", "5", "6", "7"].contains(c)));

        let replay = draw_negatives(schema, &block, &pool, 5).unwrap();
        assert_eq!(negatives, replay);
    }

    #[test]
    fn test_insufficient_pool() {
        let t = table(&[
            row("AAAA", "miR-1", "famA", "g1", "1"),
            row("AAAC", "miR-1b", "famA", "g2", "2"),
            row("CCCC", "miR-2", "famB", "g3", "3"),
        ]);
        let block = block_from(&t, "famA");
        let pool = CandidatePool::build(&t, &block, 11);
        match draw_negatives(t.schema(), &block, &pool, 11) {
            Err(NegSetError::InsufficientCandidatePool {
                family,
                rna,
                required,
                available,
            }) => {
                assert_eq!(family, "famA");
                assert_eq!(rna, "AAAA");
                assert_eq!((required, available), (2, 1));
            }
            other => panic!("expected InsufficientCandidatePool, got {:?}", other),
        }
    }
}
