use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use tempdir::TempDir;
use thiserror::Error;

pub const DEFAULT_COMPILER: &str = "gcc";
pub const DEFAULT_OUTPUT: &str = "a.exe";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("could not create a temporary directory: {0}")]
    TempDir(#[source] io::Error),
    #[error("could not write {}: {source}", path.display())]
    WriteSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not run `{compiler}`: {source}")]
    Spawn {
        compiler: String,
        #[source]
        source: io::Error,
    },
    #[error("`{compiler}` failed ({status}):\n{stderr}")]
    CompileFailed {
        compiler: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Hands generated C to the host compiler.
#[derive(Clone, Debug)]
pub struct Build {
    pub compiler: String,
    pub output: PathBuf,
    /// Where the intermediate directory goes. `None` means the system
    /// temporary directory.
    pub temp_root: Option<PathBuf>,
}

impl Default for Build {
    fn default() -> Self {
        Build {
            compiler: DEFAULT_COMPILER.to_owned(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            temp_root: None,
        }
    }
}

impl Build {
    pub fn new(
        compiler: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Build {
            compiler: compiler.into(),
            output: output.into(),
            temp_root: None,
        }
    }

    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Writes `c_source` to `<stem>.c` in a fresh temporary directory and
    /// compiles it to `self.output`. The directory is removed on every
    /// return path, including failures.
    pub fn run(&self, c_source: &str, stem: &str) -> Result<(), BuildError> {
        let dir = match &self.temp_root {
            Some(root) => TempDir::new_in(root, "bfcc"),
            None => TempDir::new("bfcc"),
        }
        .map_err(BuildError::TempDir)?;
        let c_path = dir.path().join(format!("{stem}.c"));

        write_source(&c_path, c_source)?;
        log::debug!(
            "wrote {} bytes of C to {}",
            c_source.len(),
            c_path.display()
        );

        self.compile(&c_path)
    }

    fn compile(&self, c_path: &Path) -> Result<(), BuildError> {
        let mut cmd = Command::new(&self.compiler);
        cmd.arg(c_path).arg("-o").arg(&self.output);
        log::info!("running {cmd:?}");

        let output = cmd.output().map_err(|source| BuildError::Spawn {
            compiler: self.compiler.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(BuildError::CompileFailed {
                compiler: self.compiler.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        log::info!("wrote executable {}", self.output.display());

        Ok(())
    }
}

fn write_source(path: &Path, c_source: &str) -> Result<(), BuildError> {
    let write = || -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(c_source.as_bytes())?;
        file.flush()
    };

    write().map_err(|source| BuildError::WriteSource {
        path: path.to_path_buf(),
        source,
    })
}
