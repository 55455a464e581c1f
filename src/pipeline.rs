//! Sequential MUSCLE → FastTree pipeline over fixed file names.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::Instant,
};
use colored::Colorize;
use const_format::str_repeat;
use crate::{
    Error,
    err::add_path,
    ext,
};

/// Input FASTA with the nucleotide sequences to align. Never written.
pub const INPUT_FASTA: &str = "rna_sequences.fasta";
/// Aligned FASTA, created/overwritten by MUSCLE.
pub const ALIGNED_FASTA: &str = "aligned.fasta";
/// Newick tree, receives FastTree stdout.
pub const NEWICK_FILE: &str = "tree.newick";

struct Args {
    muscle: PathBuf,
    fasttree: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            muscle: PathBuf::from("muscle"),
            fasttree: PathBuf::from("FastTree"),
        }
    }
}

fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME").underline(), format!("v{}", env!("CARGO_PKG_VERSION")).green());
}

fn print_help() {
    const KEY: usize = 13;
    const EMPTY: &'static str = str_repeat!(" ", KEY + 5);

    println!("{}", "Align nucleotide sequences with MUSCLE and build a FastTree phylogeny.".yellow());
    println!("\n{} {}", "Usage:".bold(), env!("CARGO_PKG_NAME"));

    println!("\n{}", "Fixed files (current directory):".bold());
    println!("    {:KEY$}  Input FASTA, must exist before the run.", INPUT_FASTA.cyan());
    println!("    {:KEY$}  Aligned FASTA, written by {}.", ALIGNED_FASTA.cyan(), "muscle".green());
    println!("    {:KEY$}  Newick tree, written by {},\n\
        {EMPTY}  then echoed to stdout.", NEWICK_FILE.cyan(), "FastTree".green());

    println!("\n{}", "Other parameters:".bold());
    println!("    {:KEY$}  Show this help message.", "-h, --help".green());
    println!("    {:KEY$}  Show version.", "-V, --version".green());
}

fn parse_args(argv: &[String]) -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;
    let args = Args::default();
    let mut parser = lexopt::Parser::from_args(argv);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('V') | Long("version") => {
                print_version();
                std::process::exit(0);
            }
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            _ => Err(arg.unexpected())?,
        }
    }
    Ok(args)
}

fn process_args(mut args: Args) -> crate::Result<Args> {
    args.muscle = ext::sys::find_exe(&args.muscle)?;
    args.fasttree = ext::sys::find_exe(&args.fasttree)?;
    Ok(args)
}

/// Precondition check: the input FASTA must already exist.
/// Nothing is spawned if it does not.
pub fn check_input(input: &Path) -> crate::Result<()> {
    if input.exists() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("Input FASTA file {} not found", ext::fmt::path(input))))
    }
}

/// Aligns `input` with MUSCLE, writing `aligned`.
/// Both output streams are captured; stderr is surfaced on failure.
pub fn run_muscle(muscle: &Path, input: &Path, aligned: &Path) -> crate::Result<()> {
    let mut command = Command::new(muscle);
    command.arg("-in").arg(input)
        .arg("-out").arg(aligned);
    log::info!("Running MUSCLE for multiple sequence alignment");
    log::debug!("    {}", ext::fmt::command(&command));

    let start = Instant::now();
    let output = command.output().map_err(add_path!(muscle))?;
    log::debug!("    Finished in {}", ext::fmt::Duration(start.elapsed()));
    if !output.status.success() {
        return Err(Error::Subprocess("MUSCLE", output));
    }
    log::info!("Alignment complete: {}", ext::fmt::path(aligned));
    Ok(())
}

/// Runs FastTree in nucleotide mode on the aligned FASTA, piping its stdout into `newick`.
/// The file handle is owned by the child and closed on every exit path.
/// Returns the written tree bytes.
pub fn run_fasttree(fasttree: &Path, aligned: &Path, newick: &Path) -> crate::Result<Vec<u8>> {
    let out_file = File::create(newick).map_err(add_path!(newick))?;
    let mut command = Command::new(fasttree);
    command.arg("-nt").arg(aligned)
        .stdout(Stdio::from(out_file))
        .stderr(Stdio::piped());
    log::info!("Building phylogenetic tree with FastTree");
    log::debug!("    {}", ext::fmt::command(&command));

    let start = Instant::now();
    let output = command.output().map_err(add_path!(fasttree))?;
    log::debug!("    Finished in {}", ext::fmt::Duration(start.elapsed()));
    if !output.status.success() {
        return Err(Error::Subprocess("FastTree", output));
    }
    log::info!("Newick tree written: {}", ext::fmt::path(newick));
    fs::read(newick).map_err(add_path!(newick))
}

/// Runs the whole pipeline: precondition check, alignment, tree building.
/// Echoes the final Newick text to stdout, byte for byte.
pub fn run(argv: &[String]) -> crate::Result<()> {
    let args = parse_args(argv.get(1..).unwrap_or_default())?;
    let input = Path::new(INPUT_FASTA);
    let aligned = Path::new(ALIGNED_FASTA);
    let newick = Path::new(NEWICK_FILE);

    // Precondition comes first: a missing input is reported even if the tools are missing too.
    check_input(input)?;
    let args = process_args(args)?;
    run_muscle(&args.muscle, input, aligned)?;
    let tree = run_fasttree(&args.fasttree, aligned, newick)?;
    io::stdout().write_all(&tree).map_err(add_path!(!))?;
    log::info!("Success!");
    Ok(())
}
