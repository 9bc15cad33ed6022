//! Repeat loop compilation.
//!
//! Instruction layout:
//!
//! ```text
//! loop_start:
//! [body]
//! [condition]           ; ac = 0 (false) or nonzero (true)
//! JEQ ac -> loop_start  ; backward, loops while the condition is false
//! ```
//!
//! The classic do-until shape: the one jump target is known before it is
//! needed, so nothing is reserved and nothing is patched.

use tinylang_core::tm::{MemOp, Reg};
use tinylang_parser::ast::RepeatStmt;

use super::{Result, StmtCompiler};

impl<'a, 'ctx> StmtCompiler<'a, 'ctx> {
    /// Compile a repeat loop.
    ///
    /// The body runs at least once; the until condition is evaluated after
    /// each pass and the loop continues while it is false (zero).
    pub(super) fn compile_repeat(&mut self, repeat: &RepeatStmt<'_>) -> Result<()> {
        self.emitter.trace_comment("-> repeat");

        let loop_start = self.emitter.current_address();
        self.compile_seq(repeat.body)?;
        self.expr_compiler().compile(&repeat.until)?;
        self.emitter.jump_abs(
            MemOp::Jeq,
            Reg::Ac,
            loop_start,
            "repeat: loop while condition false",
        );

        self.emitter.trace_comment("<- repeat");
        Ok(())
    }
}
