//! Binary operator code generation.
//!
//! Instruction layout for `lhs op rhs`:
//!
//! ```text
//! [lhs]                 ; ac = left value
//! ST  ac,tmp(mp)        ; spill left, temporary stack moves down
//! [rhs]                 ; ac = right value
//! LD  ac1,tmp(mp)       ; reload left into the second register
//! op  ac,ac1,ac         ; arithmetic: ac = left op right
//! ```
//!
//! Relational operators extend the tail: the machine has no flags register,
//! so a comparison subtracts and then materializes 0 or 1 with a fixed
//! four-instruction sequence of pc-relative jumps.

use tinylang_core::CompileError;
use tinylang_core::tm::{MemOp, Reg, RegOp};
use tinylang_parser::ast::{BinaryExpr, BinaryOp};

use super::ExprCompiler;

impl<'a, 'ctx> ExprCompiler<'a, 'ctx> {
    /// Generate a binary operation, result in `ac`.
    pub(super) fn compile_binary(&mut self, binary: &BinaryExpr<'_>) -> Result<(), CompileError> {
        self.compile(&binary.lhs)?;
        let spill = self.ctx.push_tmp();
        self.emitter
            .store(Reg::Ac, spill, Reg::Mp, "spill left operand");

        self.compile(&binary.rhs)?;
        let reload = self.ctx.pop_tmp();
        self.emitter
            .load(Reg::Ac1, reload, Reg::Mp, "reload left operand");

        match binary.op {
            BinaryOp::Add => self.emitter.emit_ro(RegOp::Add, Reg::Ac, Reg::Ac1, Reg::Ac, "op +"),
            BinaryOp::Sub => self.emitter.emit_ro(RegOp::Sub, Reg::Ac, Reg::Ac1, Reg::Ac, "op -"),
            BinaryOp::Mul => self.emitter.emit_ro(RegOp::Mul, Reg::Ac, Reg::Ac1, Reg::Ac, "op *"),
            BinaryOp::Div => self.emitter.emit_ro(RegOp::Div, Reg::Ac, Reg::Ac1, Reg::Ac, "op /"),
            BinaryOp::Lt => self.compare(MemOp::Jlt, "op <"),
            BinaryOp::Eq => self.compare(MemOp::Jeq, "op ="),
        }
        Ok(())
    }

    /// Materialize a 0/1 comparison result in `ac`.
    ///
    /// `branch` is the jump taken when the comparison holds, applied to
    /// `left - right`: `JLT` for `<`, `JEQ` for `=`.
    fn compare(&mut self, branch: MemOp, comment: &str) {
        self.emitter
            .emit_ro(RegOp::Sub, Reg::Ac, Reg::Ac1, Reg::Ac, comment);
        self.emitter
            .emit_rm(branch, Reg::Ac, 2, Reg::Pc, "branch when true");
        self.emitter.load_const(Reg::Ac, 0, "false case");
        self.emitter
            .emit_rm(MemOp::Lda, Reg::Pc, 1, Reg::Pc, "skip true case");
        self.emitter.load_const(Reg::Ac, 1, "true case");
    }
}
