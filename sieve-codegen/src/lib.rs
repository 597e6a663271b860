//! Emits standalone, unrolled C benchmark code for accepted mixer
//! programs — an offline timing harness, not part of the sieve itself.
//! Format matches the original tool's `Pre`/`ReportCode`/`Post`
//! (see SPEC_FULL.md §8).

use std::io::{self, Write};

use sieve_mixer::{MixerProgram, OpKind, OPS, VARS};

/// `#include`/`#define` preamble, emitted once before any mixer.
pub fn emit_preamble(w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "#include <stdio.h>")?;
    writeln!(w, "#include <stdint.h>")?;
    writeln!(w)?;
    writeln!(w, "#define VAR {VARS}")?;
    writeln!(w, "#define ITERS (100000000)")?;
    writeln!(w, "#define CUT 4000")?;
    writeln!(w, "#define Rot64(x,k) (((x)<<(k)) | ((x)>>(64-(k))))")?;
    writeln!(w)?;
    Ok(())
}

fn op_char(op: OpKind) -> char {
    match op {
        OpKind::Add => '+',
        OpKind::Sub => '-',
        OpKind::Xor => '^',
        OpKind::Rot => '?',
    }
}

fn write_op_line(w: &mut impl Write, op: OpKind, x: usize, y: usize, shift: u8) -> io::Result<()> {
    match op {
        OpKind::Add => write!(w, "    s{x} += s{y};"),
        OpKind::Sub => write!(w, "    s{x} -= s{y};"),
        OpKind::Xor => write!(w, "    s{x} ^= s{y};"),
        OpKind::Rot => {
            if shift == 0 || shift == 64 {
                write!(w, "    s{x} = Bswap64(s{x});")
            } else {
                write!(w, "    s{x} = Rot64(s{x}, {shift});")
            }
        }
    }
}

/// The structural signature line (`op v1 v2` triples, then the 12
/// shift values) — shared between the emitted C and the internal
/// tester's `// minVal` diagnostic. Delegates to
/// `MixerProgram::write_signature` so the two call sites can never
/// drift apart.
pub fn write_signature(w: &mut impl Write, program: &MixerProgram) -> io::Result<()> {
    let mut sig = String::new();
    program.write_signature(&mut sig).expect("formatting into a String cannot fail");
    write!(w, "{sig}")
}

/// Emit `function{index}`/`wrapper{index}` for one accepted mixer.
pub fn emit_mixer(w: &mut impl Write, program: &MixerProgram, index: usize) -> io::Result<()> {
    writeln!(w, "void function{index}(uint64_t *data, uint64_t *state)")?;
    writeln!(w, "{{")?;
    for var in 0..VARS {
        writeln!(w, "    uint64_t s{var} = state[{var}];")?;
    }
    for var in 0..VARS {
        write!(w, "    s{var} {}= data[{var}];", op_char(program.op[0]))?;
        for op_idx in 1..OPS {
            let x = (program.v1[op_idx] as usize + var) % VARS;
            let y = (program.v2[op_idx] as usize + var) % VARS;
            write_op_line(w, program.op[op_idx], x, y, program.shift[var])?;
        }
        writeln!(w)?;
    }
    for var in 0..VARS {
        writeln!(w, "    state[{var}] = s{var};")?;
    }
    writeln!(w, "}}")?;
    writeln!(w)?;

    writeln!(w, "void wrapper{index}(uint64_t *data, uint64_t *state)")?;
    writeln!(w, "{{")?;
    writeln!(w, "  uint64_t a = GetTickCount();")?;
    writeln!(w, "  for (int i=0; i<ITERS; ++i) {{")?;
    writeln!(w, "    function{index}(data, state);")?;
    writeln!(w, "  }}")?;
    writeln!(w, "  uint64_t z = GetTickCount();")?;
    writeln!(w, "  if (z-a < CUT) {{")?;
    write!(w, "    printf(\"")?;
    write_signature(w, program)?;
    writeln!(w, "  %lld\\n\", z-a);")?;
    writeln!(w, "  }}")?;
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}

/// Emit the `main` driver calling every accepted mixer's wrapper.
pub fn emit_postamble(w: &mut impl Write, count: usize) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "int main(int argc, char **argv)")?;
    writeln!(w, "{{")?;
    writeln!(w, "  uint64_t state[VAR], data[VAR];")?;
    writeln!(w, "  for (int i=0; i<VAR; ++i) state[i] = data[i] = i+argc;")?;
    for i in 0..count {
        writeln!(w, "  wrapper{i}(data, state);")?;
    }
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}
