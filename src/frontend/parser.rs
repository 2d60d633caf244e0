use derive_more::TryFrom;
use itertools::Itertools;

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFrom)]
#[try_from(repr)]
#[repr(u8)]
enum Command {
    Movr = b'>',
    Movl = b'<',
    Incr = b'+',
    Decr = b'-',
    Writ = b'.',
    Read = b',',
    JmpF = b'[',
    JmpB = b']',
}

/// Raw program text. Every byte is kept, including comments, since a
/// comment between two identical operators still splits their run.
#[derive(Clone, Copy, Debug)]
pub struct Program<'src> {
    source: &'src [u8],
}

impl<'src> From<&'src [u8]> for Program<'src> {
    fn from(source: &'src [u8]) -> Self {
        Program { source }
    }
}

impl<'src> From<&'src str> for Program<'src> {
    fn from(value: &'src str) -> Self {
        value.as_bytes().into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    ShiftLeft(usize),
    ShiftRight(usize),
    Add(usize),
    Sub(usize),
    Read,
    Write,
    LoopStart,
    LoopEnd,
}

impl<'src> Program<'src> {
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Run-collapsed instructions in source order.
    ///
    /// Only strictly adjacent `>`, `<`, `+` and `-` merge. I/O and brackets
    /// are yielded once per occurrence. Brackets are not matched here.
    pub fn instructions(&self) -> impl Iterator<Item = Instruction> + 'src {
        use Command as C;
        use Instruction as I;

        let source = self.source;
        source
            .iter()
            .map(|&byte| C::try_from(byte).ok())
            .dedup_by_with_count(|l, r| {
                matches!(
                    (l, r),
                    (Some(C::Movr), Some(C::Movr))
                        | (Some(C::Movl), Some(C::Movl))
                        | (Some(C::Incr), Some(C::Incr))
                        | (Some(C::Decr), Some(C::Decr))
                )
            })
            .filter_map(|(count, code)| {
                Some(match code? {
                    C::Movr => I::ShiftRight(count),
                    C::Movl => I::ShiftLeft(count),
                    C::Incr => I::Add(count),
                    C::Decr => I::Sub(count),
                    C::Writ => I::Write,
                    C::Read => I::Read,
                    C::JmpF => I::LoopStart,
                    C::JmpB => I::LoopEnd,
                })
            })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub shifts: usize,
    pub arithmetic: usize,
    pub io: usize,
    pub loop_starts: usize,
    pub loop_ends: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IR(pub Vec<Instruction>);

impl IR {
    pub fn parse(program: &Program) -> Self {
        IR(program.instructions().collect())
    }

    pub fn stats(&self) -> Stats {
        use Instruction as I;

        self.0.iter().fold(Stats::default(), |mut stats, instr| {
            match instr {
                I::ShiftLeft(_) | I::ShiftRight(_) => stats.shifts += 1,
                I::Add(_) | I::Sub(_) => stats.arithmetic += 1,
                I::Read | I::Write => stats.io += 1,
                I::LoopStart => stats.loop_starts += 1,
                I::LoopEnd => stats.loop_ends += 1,
            }
            stats
        })
    }
}
