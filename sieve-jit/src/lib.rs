//! A minimal x86-64 JIT: a single-page W^X code buffer, an encoder for
//! a fixed instruction set (register arithmetic, rotate, bswap,
//! disp8-only load/store, push/pop/ret), and a static 15-register
//! virtual ISA mapped onto the host ABI's callee-saved registers.
//!
//! No register allocator, no branches, no relocations — every caller
//! compiles one straight-line function per call.

pub mod code_buffer;
pub mod emitter;
pub mod prologue;
pub mod reg;

pub use code_buffer::CodeBuffer;
pub use reg::{Reg, VReg, ARG_DATA, ARG_STATE};
