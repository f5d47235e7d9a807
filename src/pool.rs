// Candidate pool construction
// For one block: keep the table rows whose cluster does not occur in the block,
// shuffle them with the block seed, then keep the first row seen per cluster.
// The result holds one uniformly chosen gene per eligible cluster.

use std::collections::HashSet;

use rand::seq::SliceRandom;

use crate::seed::block_rng;
use crate::segment::FamilyBlock;
use crate::table::{PositiveTable, Record};

#[derive(Debug)]
pub struct CandidatePool<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> CandidatePool<'a> {
    pub fn build(table: &'a PositiveTable, block: &FamilyBlock, seed: u64) -> Self {
        let schema = table.schema();

        let block_clusters: HashSet<&str> = block
            .records()
            .iter()
            .map(|r| schema.cluster_of(r))
            .collect();

        let allowed_clusters: HashSet<&str> = table
            .clusters()
            .iter()
            .map(String::as_str)
            .filter(|c| !block_clusters.contains(c))
            .collect();

        let mut rows: Vec<&'a Record> = table
            .records()
            .iter()
            .filter(|r| allowed_clusters.contains(schema.cluster_of(r)))
            .collect();

        let mut rng = block_rng(seed);
        rows.shuffle(&mut rng);

        let mut seen: HashSet<&'a str> = HashSet::new();
        rows.retain(|r| {
            let record: &'a Record = *r;
            seen.insert(schema.cluster_of(record))
        });

        CandidatePool { rows }
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
