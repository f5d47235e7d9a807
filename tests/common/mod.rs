#![allow(dead_code)]

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use negsets::{execute_make_neg_sets, MakeNegArgs, RunSummary};

pub const HEADER: &str = "noncodingRNA\tnoncodingRNA_name\tnoncodingRNA_fam\tgene\tfeature\ttest\tchr\tstart\tend\tstrand\tgene_cluster_ID\tlabel";

// Column positions in HEADER
pub const RNA: usize = 0;
pub const RNA_NAME: usize = 1;
pub const RNA_FAM: usize = 2;
pub const GENE: usize = 3;
pub const CLUSTER: usize = 10;
pub const LABEL: usize = 11;

pub struct TestEnvironment {
    _temp_dir: TempDir, // kept for Drop cleanup
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let input_path = temp_dir.path().join("positives.tsv");
        let output_path = temp_dir.path().join("pos_neg.tsv");
        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            input_path,
            output_path,
        })
    }

    pub fn with_rows(rows: &[String]) -> Result<Self> {
        let env = Self::new()?;
        env.write_input(HEADER, rows)?;
        Ok(env)
    }

    pub fn write_input(&self, header: &str, rows: &[String]) -> Result<()> {
        let mut text = String::from(header);
        text.push('\n');
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        fs::write(&self.input_path, text)?;
        Ok(())
    }

    pub fn args(&self) -> MakeNegArgs {
        MakeNegArgs {
            ifile: self.input_path.clone(),
            ofile: self.output_path.clone(),
            quiet: true,
        }
    }

    pub fn run(&self) -> Result<RunSummary> {
        execute_make_neg_sets(&self.args())
    }

    pub fn read_output(&self) -> Result<(String, Vec<Vec<String>>)> {
        let text = fs::read_to_string(&self.output_path)?;
        let mut lines = text.lines();
        let header = lines.next().unwrap_or_default().to_string();
        let rows = lines
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect();
        Ok((header, rows))
    }
}

/// A positive row in HEADER order.
pub fn positive(seq: &str, name: &str, fam: &str, gene: &str, cluster: &str) -> String {
    format!("{seq}\t{name}\t{fam}\t{gene}\tthree_prime_utr\tCLASH\tchr2\t1000\t1022\t-\t{cluster}\t1")
}

/// One output block: its positives followed by its negatives.
pub struct OutputBlock {
    pub positives: Vec<Vec<String>>,
    pub negatives: Vec<Vec<String>>,
}

/// Regroup output rows by label runs (1s then 0s per block).
pub fn output_blocks(rows: &[Vec<String>], label: usize) -> Vec<OutputBlock> {
    let mut blocks: Vec<OutputBlock> = Vec::new();
    for row in rows {
        let is_positive = row[label] == "1";
        let start_new = match blocks.last() {
            None => true,
            Some(last) => is_positive && !last.negatives.is_empty(),
        };
        if start_new {
            blocks.push(OutputBlock {
                positives: Vec::new(),
                negatives: Vec::new(),
            });
        }
        let current = blocks.last_mut().expect("block pushed above");
        if is_positive {
            current.positives.push(row.clone());
        } else {
            current.negatives.push(row.clone());
        }
    }
    blocks
}

pub fn clusters_of(rows: &[Vec<String>], cluster: usize) -> HashSet<String> {
    rows.iter().map(|r| r[cluster].clone()).collect()
}
