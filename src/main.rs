// External crates
use anyhow::{Error, Result};
use clap::Parser;

// Standard library
use std::path::PathBuf;

// Internal crate imports
use negsets::{execute_make_neg_sets, MakeNegArgs};


/*=================================================================
=                                  ARGS                           =
=================================================================*/

#[derive(Parser, Debug)]
#[clap(author, version, about = "Generate cluster-disjoint negative examples at a 1:1 ratio per ncRNA family", long_about = None)]
struct ArgParser {
    #[arg(required = true, long, help = "Input TSV, MUST BE SORTED by 'noncodingRNA_fam'")]
    ifile: PathBuf,

    #[arg(required = true, long, help = "Output TSV for positive and negative examples")]
    ofile: PathBuf,

    #[arg(long, help = "Only print the final summary, not one line per block")]
    quiet: bool,
}


/*=================================================================
=                                 MAIN                            =
=================================================================*/

fn main() -> Result<(), Error> {
    let args = ArgParser::parse();

    let run_args = MakeNegArgs {
        ifile: args.ifile,
        ofile: args.ofile,
        quiet: args.quiet,
    };
    execute_make_neg_sets(&run_args)?;
    Ok(())
}
