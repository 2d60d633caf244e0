use std::{
    env,
    io::Write,
    process::{Command, Output, Stdio},
};

use tempdir::TempDir;

use crate::{
    backend::driver::DEFAULT_COMPILER, translate_with, Build, TranslateOptions,
};

/// `$CC`, or `gcc` when unset.
pub fn c_compiler() -> String {
    env::var("CC").unwrap_or_else(|_| DEFAULT_COMPILER.to_owned())
}

pub fn have_c_compiler() -> bool {
    Command::new(c_compiler())
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

/// Translates and compiles `source`, then runs the executable with `stdin`
/// piped in.
pub fn compile_and_run(
    source: &str,
    options: &TranslateOptions,
    stdin: &[u8],
) -> Output {
    let dir = TempDir::new("bfcc_run").unwrap();
    let exe_path = dir.path().join("prog");

    let c = translate_with(source, options);
    Build::new(c_compiler(), exe_path.clone())
        .with_temp_root(dir.path())
        .run(&c, "prog")
        .unwrap();

    let mut child = Command::new(exe_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // dropping the handle closes stdin so `getchar` sees EOF
    child.stdin.take().unwrap().write_all(stdin).unwrap();

    child.wait_with_output().unwrap()
}
