//! While loop compilation.
//!
//! Instruction layout:
//!
//! ```text
//! loop_start:
//! [condition]           ; ac = 0 (false) or nonzero (true)
//! JEQ ac -> exit        ; reserved, patched forward
//! [body]
//! LDA pc -> loop_start  ; backward, target known up front
//! exit:
//! ```
//!
//! One forward reservation (the exit), one backward jump whose target was
//! recorded before any condition code was emitted.

use tinylang_core::tm::{MemOp, Reg};
use tinylang_parser::ast::WhileStmt;

use super::{Result, StmtCompiler};

impl<'a, 'ctx> StmtCompiler<'a, 'ctx> {
    /// Compile a while loop.
    pub(super) fn compile_while(&mut self, while_stmt: &WhileStmt<'_>) -> Result<()> {
        self.emitter.trace_comment("-> while");

        let loop_start = self.emitter.current_address();
        self.expr_compiler().compile(&while_stmt.condition)?;
        let exit_jump = self.emitter.reserve_slot();

        self.compile_seq(while_stmt.body)?;
        self.emitter.goto(loop_start, "while: back to condition");

        let exit = self.emitter.current_address();
        self.emitter.patch_jump(
            exit_jump,
            MemOp::Jeq,
            Reg::Ac,
            exit,
            "while: exit when false",
        );

        self.emitter.trace_comment("<- while");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::code::{CodeChunk, CodeEmitter};
    use crate::context::CodegenContext;
    use crate::stmt::StmtCompiler;
    use crate::symtab::SymbolTable;
    use bumpalo::Bump;
    use tinylang_core::TraceFlags;
    use tinylang_core::tm::{Instruction, MemOp, Reg};
    use tinylang_parser::Parser;

    fn r#gen(source: &str) -> CodeChunk {
        let arena = Bump::new();
        let program = Parser::parse(source, &arena).unwrap();
        let symbols = SymbolTable::build(&program);
        let mut ctx = CodegenContext::new(&symbols);
        let mut emitter = CodeEmitter::new(TraceFlags::empty());
        StmtCompiler::new(&mut ctx, &mut emitter)
            .compile_seq(program.stmts())
            .unwrap();
        emitter.finish().unwrap()
    }

    #[test]
    fn back_edge_targets_loop_start() {
        let chunk = r#gen("while x write x endwhile");
        // 0: LD x (condition), 1: exit jump, 2: LD x, 3: OUT,
        // 4: back edge, 5: exit.
        assert_eq!(chunk.len(), 5);
        let back_edge = chunk.get(4).unwrap();
        assert!(matches!(
            back_edge,
            Instruction::Mem { op: MemOp::Lda, r: Reg::Pc, .. }
        ));
        assert_eq!(back_edge.branch_target(4), Some(0));
    }

    #[test]
    fn exit_targets_the_address_after_the_back_edge() {
        let chunk = r#gen("while x write x endwhile");
        assert_eq!(chunk.reservations(), 1);
        let exit_jump = chunk.get(1).unwrap();
        assert!(matches!(
            exit_jump,
            Instruction::Mem { op: MemOp::Jeq, r: Reg::Ac, .. }
        ));
        assert_eq!(exit_jump.branch_target(1), Some(5));
        assert_eq!(chunk.len(), 5);
    }

    #[test]
    fn loop_start_precedes_condition_code() {
        // A statement before the loop shifts loop_start with it.
        let chunk = r#gen("write 9; while x write x endwhile");
        // 0-1: write 9, 2: LD x, 3: exit jump, 4-5: body, 6: back edge.
        assert_eq!(chunk.get(6).unwrap().branch_target(6), Some(2));
    }

    #[test]
    fn nested_loops_keep_their_own_back_edges() {
        let chunk = r#gen("while x while y write 1 endwhile endwhile");
        // Outer condition at 0, inner condition at 2.
        // 0: LD x, 1: outer exit, 2: LD y, 3: inner exit, 4-5: write 1,
        // 6: inner back edge -> 2, 7: outer back edge -> 0, 8: exit.
        assert_eq!(chunk.get(6).unwrap().branch_target(6), Some(2));
        assert_eq!(chunk.get(7).unwrap().branch_target(7), Some(0));
        assert_eq!(chunk.get(3).unwrap().branch_target(3), Some(7));
        assert_eq!(chunk.get(1).unwrap().branch_target(1), Some(8));
        assert_eq!(chunk.reservations(), 2);
    }
}
