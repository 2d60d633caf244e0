use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    process::ExitCode,
};

use bfcc::{
    backend::driver::{DEFAULT_COMPILER, DEFAULT_OUTPUT},
    load, translate_with, Build, DanglingLoops, Error, TranslateOptions,
    DEFAULT_TAPE_SIZE,
};
use clap::Parser;
use log::LevelFilter;

/// Compile Brainfuck by way of C.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Brainfuck source file
    input: PathBuf,

    /// Name of the executable (or of the C file with --emit-c)
    output: Option<PathBuf>,

    /// Number of cells on the tape
    #[arg(short, long, default_value_t = DEFAULT_TAPE_SIZE)]
    tape_size: NonZeroUsize,

    /// C compiler to invoke
    #[arg(long, env = "CC", default_value = DEFAULT_COMPILER)]
    cc: String,

    /// Write the generated C instead of compiling it
    #[arg(short = 'c', long)]
    emit_c: bool,

    /// Close loops still open at end of input so the C compiles
    #[arg(long)]
    close_dangling_loops: bool,

    /// More logging, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "program".to_owned())
}

/// Where `-c` writes: OUTPUT, or `<input-stem>.c` in the working directory.
fn emit_c_path(args: &Args) -> PathBuf {
    let default = || PathBuf::from(format!("{}.c", stem(&args.input)));
    args.output.clone().unwrap_or_else(default)
}

fn executable_path(args: &Args) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let source = load(&args.input)?;

    let options = TranslateOptions {
        tape_size: args.tape_size,
        dangling_loops: if args.close_dangling_loops {
            DanglingLoops::Close
        } else {
            DanglingLoops::Preserve
        },
    };
    let c = translate_with(&source, &options);

    let path = if args.emit_c {
        emit_c_path(args)
    } else {
        executable_path(args)
    };
    if is_same_file(&path, &args.input) {
        return Err(Error::OverwriteInput { path });
    }

    if args.emit_c {
        fs::write(&path, &c).map_err(|source| Error::EmitC {
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {}", path.display());
        return Ok(());
    }

    Build::new(args.cc.clone(), path).run(&c, &stem(&args.input))?;

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bfcc: {e}");
            ExitCode::FAILURE
        }
    }
}
