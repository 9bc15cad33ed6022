//! High-level instruction emitter.
//!
//! [`CodeEmitter`] is the API the statement and expression generators call.
//! It wraps a [`CodeChunk`] with typed helpers for the handful of shapes the
//! generators need and encodes absolute jump targets the way the TM machine
//! wants them: pc-relative, evaluated against the already-incremented
//! program counter, so a jump at `addr` to `target` carries
//! `d = target - (addr + 1)` with `pc` as its base.

use tinylang_core::tm::{Instruction, MemOp, Reg, RegOp};
use tinylang_core::{CompileError, TraceFlags};

use super::chunk::{CodeChunk, Slot};

/// Emits TM instructions into a [`CodeChunk`].
pub struct CodeEmitter {
    /// The chunk being built.
    chunk: CodeChunk,
    /// What commentary to leave in the listing.
    trace: TraceFlags,
}

impl CodeEmitter {
    /// Create a new emitter.
    pub fn new(trace: TraceFlags) -> Self {
        Self {
            chunk: CodeChunk::new(),
            trace,
        }
    }

    /// Emit a register-only instruction.
    pub fn emit_ro(&mut self, op: RegOp, r: Reg, s: Reg, t: Reg, comment: &str) {
        self.chunk.emit(Instruction::reg(op, r, s, t), comment);
    }

    /// Emit a register-memory instruction.
    pub fn emit_rm(&mut self, op: MemOp, r: Reg, d: i32, s: Reg, comment: &str) {
        self.chunk.emit(Instruction::mem(op, r, d, s), comment);
    }

    /// Load an immediate value into a register.
    pub fn load_const(&mut self, r: Reg, value: i32, comment: &str) {
        self.emit_rm(MemOp::Ldc, r, value, Reg::Ac, comment);
    }

    /// Load a register from data memory at `offset(base)`.
    pub fn load(&mut self, r: Reg, offset: i32, base: Reg, comment: &str) {
        self.emit_rm(MemOp::Ld, r, offset, base, comment);
    }

    /// Store a register to data memory at `offset(base)`.
    pub fn store(&mut self, r: Reg, offset: i32, base: Reg, comment: &str) {
        self.emit_rm(MemOp::St, r, offset, base, comment);
    }

    /// Emit a conditional jump to an absolute address.
    pub fn jump_abs(&mut self, op: MemOp, r: Reg, target: usize, comment: &str) {
        let instr = Self::encode_jump(op, r, self.chunk.current_address(), target);
        self.chunk.emit(instr, comment);
    }

    /// Emit an unconditional jump to an absolute address.
    pub fn goto(&mut self, target: usize, comment: &str) {
        let addr = self.chunk.current_address();
        let instr = Self::encode_goto(addr, target);
        self.chunk.emit(instr, comment);
    }

    /// Reserve the next address for a jump whose target is not yet known.
    pub fn reserve_slot(&mut self) -> Slot {
        self.chunk.reserve_slot()
    }

    /// Patch a reserved slot with a conditional jump to `target`.
    pub fn patch_jump(&mut self, slot: Slot, op: MemOp, r: Reg, target: usize, comment: &str) {
        let instr = Self::encode_jump(op, r, slot.address(), target);
        self.chunk.patch(slot, instr, comment);
    }

    /// Patch a reserved slot with an unconditional jump to `target`.
    pub fn patch_goto(&mut self, slot: Slot, target: usize, comment: &str) {
        let instr = Self::encode_goto(slot.address(), target);
        self.chunk.patch(slot, instr, comment);
    }

    /// The next address to be written.
    #[inline]
    pub fn current_address(&self) -> usize {
        self.chunk.current_address()
    }

    /// Emit a standalone comment line into the listing.
    pub fn comment_line(&mut self, text: &str) {
        self.chunk.comment_line(text);
    }

    /// Emit a comment line only when `CODE` tracing is on.
    pub fn trace_comment(&mut self, text: &str) {
        if self.trace.contains(TraceFlags::CODE) {
            self.chunk.comment_line(text);
        }
    }

    /// Seal and return the chunk; fails on an unpatched reservation.
    pub fn finish(self) -> Result<CodeChunk, CompileError> {
        self.chunk.finish()
    }

    fn encode_jump(op: MemOp, r: Reg, addr: usize, target: usize) -> Instruction {
        Instruction::mem(op, r, target as i32 - (addr as i32 + 1), Reg::Pc)
    }

    fn encode_goto(addr: usize, target: usize) -> Instruction {
        Instruction::mem(MemOp::Lda, Reg::Pc, target as i32 - (addr as i32 + 1), Reg::Pc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_abs_encodes_pc_relative() {
        let mut emitter = CodeEmitter::new(TraceFlags::empty());
        emitter.load_const(Reg::Ac, 0, "");
        emitter.jump_abs(MemOp::Jeq, Reg::Ac, 5, "forward");

        let chunk = emitter.finish().unwrap();
        // Jump sits at address 1; d = 5 - (1 + 1) = 3.
        assert_eq!(
            chunk.get(1),
            Some(&Instruction::mem(MemOp::Jeq, Reg::Ac, 3, Reg::Pc))
        );
        assert_eq!(chunk.get(1).unwrap().branch_target(1), Some(5));
    }

    #[test]
    fn goto_can_target_backwards() {
        let mut emitter = CodeEmitter::new(TraceFlags::empty());
        emitter.load_const(Reg::Ac, 0, "");
        emitter.load_const(Reg::Ac, 1, "");
        emitter.goto(0, "back");

        let chunk = emitter.finish().unwrap();
        assert_eq!(chunk.get(2).unwrap().branch_target(2), Some(0));
    }

    #[test]
    fn patched_jump_resolves_to_its_target() {
        let mut emitter = CodeEmitter::new(TraceFlags::empty());
        let slot = emitter.reserve_slot();
        emitter.load_const(Reg::Ac, 1, "");
        emitter.load_const(Reg::Ac, 2, "");
        let target = emitter.current_address();
        emitter.patch_jump(slot, MemOp::Jeq, Reg::Ac, target, "exit");

        let chunk = emitter.finish().unwrap();
        assert_eq!(chunk.get(0).unwrap().branch_target(0), Some(3));
    }

    #[test]
    fn trace_comments_respect_the_flag() {
        let mut silent = CodeEmitter::new(TraceFlags::empty());
        silent.trace_comment("-> if");
        assert!(silent.finish().unwrap().comment_lines().is_empty());

        let mut traced = CodeEmitter::new(TraceFlags::CODE);
        traced.trace_comment("-> if");
        assert_eq!(traced.finish().unwrap().comment_lines().len(), 1);
    }
}
