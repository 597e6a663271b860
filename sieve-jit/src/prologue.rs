use crate::code_buffer::CodeBuffer;
use crate::emitter::{emit_pop, emit_push, emit_ret};
use crate::reg::CALLEE_SAVED;

/// Push every callee-saved register, in ABI-defined order. Since the
/// mixer ISA has no register allocator and no stack spills, this is
/// the entire prologue — no frame pointer setup, no stack allocation.
pub fn emit_prologue(buf: &mut CodeBuffer) {
    for &r in CALLEE_SAVED {
        emit_push(buf, r);
    }
}

/// Pop every callee-saved register in exact reverse order, then `ret`.
pub fn emit_epilogue(buf: &mut CodeBuffer) {
    for &r in CALLEE_SAVED.iter().rev() {
        emit_pop(buf, r);
    }
    emit_ret(buf);
}
