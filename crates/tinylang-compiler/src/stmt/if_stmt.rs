//! If statement compilation.
//!
//! Instruction layout:
//!
//! ```text
//! [condition]           ; ac = 0 (false) or nonzero (true)
//! JEQ ac -> else        ; reserved, patched forward
//! [then body]
//! LDA pc -> end         ; reserved, patched forward
//! else:
//! [else body]           ; possibly empty
//! end:
//! ```
//!
//! Two reservations, two patches, both forward, for every `if` — an absent
//! else part just makes the second jump target the next address.

use tinylang_core::tm::{MemOp, Reg};
use tinylang_parser::ast::IfStmt;

use super::{Result, StmtCompiler};

impl<'a, 'ctx> StmtCompiler<'a, 'ctx> {
    /// Compile an if statement.
    ///
    /// The else jump fires when the condition value is zero; a true
    /// condition falls through into the then body.
    pub(super) fn compile_if(&mut self, if_stmt: &IfStmt<'_>) -> Result<()> {
        self.emitter.trace_comment("-> if");

        self.expr_compiler().compile(&if_stmt.condition)?;
        let else_jump = self.emitter.reserve_slot();

        self.compile_seq(if_stmt.then_body)?;
        let end_jump = self.emitter.reserve_slot();

        let else_target = self.emitter.current_address();
        self.emitter.patch_jump(
            else_jump,
            MemOp::Jeq,
            Reg::Ac,
            else_target,
            "if: jump to else when false",
        );

        self.compile_seq(if_stmt.else_body)?;
        let end_target = self.emitter.current_address();
        self.emitter
            .patch_goto(end_jump, end_target, "if: jump past else");

        self.emitter.trace_comment("<- if");
        Ok(())
    }
}
