/// Number of mixer state variables.
pub const VARS: usize = 12;
/// Number of ops per mixer program.
pub const OPS: usize = 5;
/// Index of the fixed rotation op; it always rotates variable 0.
pub const ROT_POS: usize = 2;

/// A mixer op kind. `op[0]` (the data-injection op) is never `Rot`;
/// exactly one other op (at `ROT_POS`) is `Rot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpKind {
    Add = 0,
    Sub = 1,
    Xor = 2,
    Rot = 3,
}

impl OpKind {
    /// Inverse used by backward lowering: `Add`/`Sub` swap, `Xor` is
    /// its own inverse. Not meaningful for `Rot` (the caller handles
    /// rotation direction separately, via the shift amount).
    pub const fn flip_add_sub(self) -> OpKind {
        match self {
            OpKind::Add => OpKind::Sub,
            OpKind::Sub => OpKind::Add,
            OpKind::Xor => OpKind::Xor,
            OpKind::Rot => OpKind::Rot,
        }
    }
}

/// A candidate (or preloaded) mixer program: five ops operating on
/// twelve state variables, plus a 24-entry shift table whose second
/// half duplicates the first. The duplication lets the lowering slide
/// a contiguous 12-entry window into the table at any `start` offset
/// in `0..VARS` without wrapping arithmetic.
#[derive(Debug, Clone)]
pub struct MixerProgram {
    pub op: [OpKind; OPS],
    pub v1: [u8; OPS],
    pub v2: [u8; OPS],
    pub shift: [u8; 2 * VARS],
}

impl MixerProgram {
    /// Shift amount to use when lowering with window start `start` at
    /// iteration variable `var`.
    pub fn shift_at(&self, start: usize, var: usize) -> u8 {
        self.shift[start + var]
    }

    /// Emit the `op v1 v2` / shift-table structural signature shared by
    /// the C emitter and the tester's diagnostic line.
    pub fn write_signature(&self, w: &mut impl std::fmt::Write) -> std::fmt::Result {
        for i in 0..OPS {
            write!(w, "{:1} {:2} {:2} ", self.op[i] as u8, self.v1[i], self.v2[i])?;
        }
        for i in 0..VARS {
            write!(w, "{:2} ", self.shift[i])?;
        }
        Ok(())
    }
}
