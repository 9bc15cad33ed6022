//! Switch statement compilation.
//!
//! Instruction layout:
//!
//! ```text
//! [selector]            ; ac = selector value
//! LDA ac1,0(ac)         ; hold the selector in the second register
//! case_1:
//! [match expression]    ; ac = match value
//! SUB ac,ac1,ac         ; ac = selector - match value
//! JEQ ac,1(pc)          ; match: skip the dispatch jump
//! LDA pc -> case_2      ; reserved, patched to the address after the body
//! [body 1]
//! case_2:
//! ...
//! ```
//!
//! Every arm reserves and patches its own dispatch jump; arms share nothing
//! but the selector held in `ac1`. A match expression must leave `ac1`
//! alone, which holds for the literals and plain variables TINY programs
//! put in case labels; a binary match expression would clobber the held
//! selector.
//!
//! After a matched body runs, control falls through into the next arm's
//! comparison with `ac` holding whatever the body left there. That is the
//! shape the original generator produces; it is pinned by
//! `matched_body_falls_into_next_comparison` below and must not be "fixed"
//! without revisiting the language definition.

use tinylang_core::tm::{MemOp, Reg, RegOp};
use tinylang_parser::ast::SwitchStmt;

use super::{Result, StmtCompiler};

impl<'a, 'ctx> StmtCompiler<'a, 'ctx> {
    /// Compile a switch statement over its chain of case arms.
    pub(super) fn compile_switch(&mut self, switch: &SwitchStmt<'_>) -> Result<()> {
        self.emitter.trace_comment("-> switch");

        self.expr_compiler().compile(&switch.selector)?;
        self.emitter
            .emit_rm(MemOp::Lda, Reg::Ac1, 0, Reg::Ac, "hold selector in ac1");

        for arm in switch.arms {
            self.expr_compiler().compile(&arm.value)?;
            self.emitter.emit_ro(
                RegOp::Sub,
                Reg::Ac,
                Reg::Ac1,
                Reg::Ac,
                "compare with selector",
            );
            self.emitter
                .emit_rm(MemOp::Jeq, Reg::Ac, 1, Reg::Pc, "match: skip dispatch jump");
            let next_arm = self.emitter.reserve_slot();

            self.compile_seq(arm.body)?;
            let after_body = self.emitter.current_address();
            self.emitter
                .patch_goto(next_arm, after_body, "no match: next case");
        }

        self.emitter.trace_comment("<- switch");
        Ok(())
    }
}
