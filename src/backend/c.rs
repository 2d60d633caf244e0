use std::num::NonZeroUsize;

use crate::frontend::parser::{Instruction, Program, IR};

pub const DEFAULT_TAPE_SIZE: NonZeroUsize = match NonZeroUsize::new(3_000) {
    Some(size) => size,
    None => panic!("tape size must be non-zero"),
};

/// What to do with `[` that are still open when the source runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DanglingLoops {
    /// Leave them open. The generated C then has unbalanced braces and
    /// will not compile, which matches the reference output byte for byte.
    #[default]
    Preserve,
    /// Close every open loop right before the end of `main`.
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslateOptions {
    pub tape_size: NonZeroUsize,
    pub dangling_loops: DanglingLoops,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            dangling_loops: DanglingLoops::default(),
        }
    }
}

// cells are C `int`, the data pointer is `pos`

fn emit_prologue(code: &mut String, tape_size: NonZeroUsize) {
    code.push_str("#include <stdio.h>\n");
    code.push_str(&format!(
        "int main(){{int tape[{tape_size}]={{0}};int pos = 0;"
    ));
}

fn emit_shift_left(code: &mut String, amount: usize) {
    code.push_str(&format!("pos -= {amount};"));
}

fn emit_shift_right(code: &mut String, amount: usize) {
    code.push_str(&format!("pos += {amount};"));
}

fn emit_add(code: &mut String, amount: usize) {
    code.push_str(&format!("tape[pos] += {amount};"));
}

fn emit_sub(code: &mut String, amount: usize) {
    code.push_str(&format!("tape[pos] -= {amount};"));
}

fn emit_write(code: &mut String) {
    code.push_str("printf(\"%c\", tape[pos]);");
}

fn emit_read(code: &mut String) {
    code.push_str("tape[pos] = getchar();");
}

fn emit_loop_start(code: &mut String) {
    code.push_str("while(tape[pos] != 0){");
}

fn emit_loop_end(code: &mut String) {
    code.push('}');
}

fn emit_epilogue(code: &mut String) {
    code.push_str("\n}");
}

/// Output buffer plus the number of loops opened but not yet closed.
struct Emitter {
    code: String,
    loop_depth: usize,
}

impl Emitter {
    fn new(tape_size: NonZeroUsize) -> Self {
        let mut code = String::new();
        emit_prologue(&mut code, tape_size);

        Emitter {
            code,
            loop_depth: 0,
        }
    }

    fn emit(mut self, instr: Instruction) -> Self {
        use Instruction as I;

        match instr {
            I::ShiftLeft(v) => emit_shift_left(&mut self.code, v),
            I::ShiftRight(v) => emit_shift_right(&mut self.code, v),
            I::Add(v) => emit_add(&mut self.code, v),
            I::Sub(v) => emit_sub(&mut self.code, v),
            I::Write => emit_write(&mut self.code),
            I::Read => emit_read(&mut self.code),
            I::LoopStart => {
                emit_loop_start(&mut self.code);
                self.loop_depth += 1;
            }
            // a stray `]` closes nothing and is dropped
            I::LoopEnd => {
                if self.loop_depth > 0 {
                    emit_loop_end(&mut self.code);
                    self.loop_depth -= 1;
                }
            }
        }

        self
    }

    fn finish(mut self, dangling_loops: DanglingLoops) -> String {
        if self.loop_depth > 0 {
            log::warn!(
                "{} loop(s) left open at end of program",
                self.loop_depth
            );

            if dangling_loops == DanglingLoops::Close {
                for _ in 0..self.loop_depth {
                    emit_loop_end(&mut self.code);
                }
            }
        }

        emit_epilogue(&mut self.code);
        self.code
    }
}

/// Translates Brainfuck source to a standalone C program with a tape of
/// `tape_size` cells. Loops left open at the end are not closed.
pub fn translate(source: impl AsRef<[u8]>, tape_size: NonZeroUsize) -> String {
    translate_with(
        source,
        &TranslateOptions {
            tape_size,
            ..TranslateOptions::default()
        },
    )
}

/// Like [`translate`], with control over dangling loops.
///
/// This never fails. Anything that is not one of the eight commands is
/// ignored, and unmatched `]` are dropped.
pub fn translate_with(
    source: impl AsRef<[u8]>,
    options: &TranslateOptions,
) -> String {
    let program = Program::from(source.as_ref());

    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "translating {} bytes: {:?}",
            program.len(),
            IR::parse(&program).stats()
        );
    }

    program
        .instructions()
        .fold(Emitter::new(options.tape_size), Emitter::emit)
        .finish(options.dangling_loops)
}
