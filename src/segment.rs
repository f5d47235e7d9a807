// Family block segmentation
// Partitions a family-sorted row stream into contiguous runs sharing one
// noncodingRNA_fam value. Sortedness is a checked contract: a family that
// reappears after its run has closed aborts with UnsortedInput. Input is never
// re-sorted here.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::NegSetError;
use crate::table::{Record, Schema};

/// Family value for ncRNAs without a family; such blocks are handled per sequence.
pub const UNKNOWN_FAMILY: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyBlock {
    family: String,
    records: Vec<Record>,
}

impl FamilyBlock {
    pub fn new(family: impl Into<String>, records: Vec<Record>) -> Self {
        FamilyBlock {
            family: family.into(),
            records,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_unknown(&self) -> bool {
        self.family == UNKNOWN_FAMILY
    }

    /// Name of the first ncRNA in the block; the block's seed is derived from it.
    pub fn seed_identifier<'a>(&'a self, schema: &Schema) -> &'a str {
        self.records.first().map(|r| schema.name_of(r)).unwrap_or_default()
    }

    /// Sequence of the first ncRNA in the block, used in diagnostics.
    pub fn first_rna<'a>(&'a self, schema: &Schema) -> &'a str {
        self.records.first().map(|r| schema.rna_of(r)).unwrap_or_default()
    }

    /// Split into one sub-block per distinct ncRNA sequence, in order of first
    /// appearance. Rows keep their relative order inside each sub-block.
    pub fn split_by_sequence(self, schema: &Schema) -> Vec<FamilyBlock> {
        let family = self.family;
        let mut groups: IndexMap<String, Vec<Record>> = IndexMap::new();
        for record in self.records {
            groups
                .entry(schema.rna_of(&record).to_string())
                .or_default()
                .push(record);
        }
        groups
            .into_values()
            .map(|records| FamilyBlock::new(family.clone(), records))
            .collect()
    }
}

/// Lazy, single-pass iterator over family blocks.
///
/// Wraps any `(line, Record)` row stream, e.g. a [`crate::table::TsvReader`].
pub struct FamilyBlocks<I> {
    rows: I,
    family_idx: usize,
    pending: Option<(usize, Record)>,
    closed: HashSet<String>,
    done: bool,
}

impl<I> FamilyBlocks<I>
where
    I: Iterator<Item = Result<(usize, Record), NegSetError>>,
{
    pub fn new(rows: I, schema: &Schema) -> Self {
        FamilyBlocks {
            rows,
            family_idx: schema.rna_fam,
            pending: None,
            closed: HashSet::new(),
            done: false,
        }
    }

    fn fail(&mut self, err: NegSetError) -> Option<Result<FamilyBlock, NegSetError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<I> Iterator for FamilyBlocks<I>
where
    I: Iterator<Item = Result<(usize, Record), NegSetError>>,
{
    type Item = Result<FamilyBlock, NegSetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (line, first) = match self.pending.take() {
            Some(row) => row,
            None => match self.rows.next() {
                Some(Ok(row)) => row,
                Some(Err(e)) => return self.fail(e),
                None => {
                    self.done = true;
                    return None;
                }
            },
        };

        let family = first.field(self.family_idx).to_string();
        if self.closed.contains(&family) {
            return self.fail(NegSetError::UnsortedInput { family, line });
        }

        let mut records = vec![first];
        loop {
            match self.rows.next() {
                Some(Ok((line, record))) => {
                    if record.field(self.family_idx) == family {
                        records.push(record);
                    } else {
                        self.pending = Some((line, record));
                        break;
                    }
                }
                Some(Err(e)) => return self.fail(e),
                None => break,
            }
        }

        self.closed.insert(family.clone());
        Some(Ok(FamilyBlock::new(family, records)))
    }
}
