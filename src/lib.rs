//! Translates Brainfuck into C and hands the result to a C compiler.

use std::{io, path::PathBuf};

use thiserror::Error;

pub mod backend;
pub mod frontend;
pub mod test_helpers;

pub use backend::c::{
    translate, translate_with, DanglingLoops, TranslateOptions,
    DEFAULT_TAPE_SIZE,
};
pub use backend::driver::{Build, BuildError};
pub use frontend::source::{load, LoadError};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("could not write {}: {source}", path.display())]
    EmitC {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("refusing to overwrite the input file {}", path.display())]
    OverwriteInput { path: PathBuf },
}
