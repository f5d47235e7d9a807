// Tabular input layer
// Reads the tab-delimited positive table: header -> Schema, rows -> Record.
// The whole positive table is kept resident for the duration of a run since it
// is both the source of family blocks and the universal candidate pool, so peak
// memory is O(full table), not O(block).

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use indexmap::IndexSet;

use crate::error::NegSetError;

pub const DELIMITER: &str = "\t";

pub const COL_RNA: &str = "noncodingRNA";
pub const COL_RNA_NAME: &str = "noncodingRNA_name";
pub const COL_RNA_FAM: &str = "noncodingRNA_fam";
pub const COL_GENE: &str = "gene";
pub const COL_FEATURE: &str = "feature";
pub const COL_TEST: &str = "test";
pub const COL_CHR: &str = "chr";
pub const COL_START: &str = "start";
pub const COL_END: &str = "end";
pub const COL_STRAND: &str = "strand";
pub const COL_CLUSTER: &str = "gene_cluster_ID";
pub const COL_LABEL: &str = "label";

pub const REQUIRED_COLUMNS: [&str; 12] = [
    COL_RNA,
    COL_RNA_NAME,
    COL_RNA_FAM,
    COL_GENE,
    COL_FEATURE,
    COL_TEST,
    COL_CHR,
    COL_START,
    COL_END,
    COL_STRAND,
    COL_CLUSTER,
    COL_LABEL,
];

/*=================================================================
=                             SCHEMA                              =
=================================================================*/

/// Column layout declared by the header line.
///
/// Required columns are located by name, so their order in the file is free.
/// Any extra column is carried along and treated as gene-side data. Column
/// names are kept verbatim so the output header matches the input byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    pub rna: usize,
    pub rna_name: usize,
    pub rna_fam: usize,
    pub cluster: usize,
    pub label: usize,
}

impl Schema {
    pub fn from_header(line: &str) -> Result<Self, NegSetError> {
        let columns: Vec<String> = line.split(DELIMITER).map(str::to_string).collect();

        let find = |name: &str| -> Result<usize, NegSetError> {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| NegSetError::MissingColumn(name.to_string()))
        };
        for name in REQUIRED_COLUMNS {
            find(name)?;
        }

        Ok(Schema {
            rna: find(COL_RNA)?,
            rna_name: find(COL_RNA_NAME)?,
            rna_fam: find(COL_RNA_FAM)?,
            cluster: find(COL_CLUSTER)?,
            label: find(COL_LABEL)?,
            columns,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn header_line(&self) -> String {
        self.columns.join(DELIMITER)
    }

    /// True for the columns a negative inherits from its paired positive.
    pub fn is_rna_side(&self, idx: usize) -> bool {
        idx == self.rna || idx == self.rna_name || idx == self.rna_fam
    }

    pub fn rna_of<'r>(&self, record: &'r Record) -> &'r str {
        record.field(self.rna)
    }

    pub fn name_of<'r>(&self, record: &'r Record) -> &'r str {
        record.field(self.rna_name)
    }

    pub fn family_of<'r>(&self, record: &'r Record) -> &'r str {
        record.field(self.rna_fam)
    }

    pub fn cluster_of<'r>(&self, record: &'r Record) -> &'r str {
        record.field(self.cluster)
    }
}

/*=================================================================
=                             RECORDS                             =
=================================================================*/

/// One (ncRNA, gene) pair. Field values are kept verbatim as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Record { fields }
    }

    pub fn field(&self, idx: usize) -> &str {
        &self.fields[idx]
    }

    pub fn to_line(&self) -> String {
        self.fields.join(DELIMITER)
    }
}

/// Streams `(line_number, Record)` pairs from a header-declared TSV source.
/// Line numbers are 1-based and count the header.
pub struct TsvReader<R> {
    lines: Lines<R>,
    schema: Schema,
    line_no: usize,
}

impl<R: BufRead> TsvReader<R> {
    pub fn new(reader: R) -> Result<Self, NegSetError> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(NegSetError::EmptyInput),
        };
        let schema = Schema::from_header(&header)?;
        Ok(TsvReader {
            lines,
            schema,
            line_no: 1,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl TsvReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, NegSetError> {
        TsvReader::new(BufReader::new(File::open(path)?))
    }
}

impl<R: BufRead> Iterator for TsvReader<R> {
    type Item = Result<(usize, Record), NegSetError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<String> = line.split(DELIMITER).map(str::to_string).collect();
            if fields.len() != self.schema.len() {
                return Some(Err(NegSetError::MalformedRow {
                    line: self.line_no,
                    expected: self.schema.len(),
                    found: fields.len(),
                }));
            }
            return Some(Ok((self.line_no, Record::new(fields))));
        }
    }
}

/*=================================================================
=                          POSITIVE TABLE                         =
=================================================================*/

/// Immutable snapshot of every positive row plus the global cluster set.
#[derive(Debug)]
pub struct PositiveTable {
    schema: Schema,
    records: Vec<Record>,
    clusters: IndexSet<String>,
}

impl PositiveTable {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, NegSetError> {
        let rows = TsvReader::new(reader)?;
        let schema = rows.schema().clone();

        let mut records = Vec::new();
        for row in rows {
            let (_, record) = row?;
            records.push(record);
        }

        // Distinct cluster ids, in order of first appearance
        let clusters = records
            .iter()
            .map(|r| schema.cluster_of(r).to_string())
            .collect();

        Ok(PositiveTable {
            schema,
            records,
            clusters,
        })
    }

    pub fn open(path: &Path) -> Result<Self, NegSetError> {
        PositiveTable::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn clusters(&self) -> &IndexSet<String> {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
