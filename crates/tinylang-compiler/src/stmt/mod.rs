//! Statement code generation.
//!
//! [`StmtCompiler`] walks statement sequences and emits TM instructions
//! with the control-flow wiring done in a single pass: backward jump
//! targets are recorded before they are needed, forward targets reserve a
//! slot and patch it once known. Each control-flow construct lives in its
//! own file; the simple statements (assign, read, write) are here.

mod if_stmt;
mod repeat_stmt;
mod switch_stmt;
mod while_stmt;

use tinylang_core::CompileError;
use tinylang_core::tm::{Reg, RegOp};
use tinylang_parser::ast::{AssignStmt, ReadStmt, Stmt, WriteStmt};

use crate::code::CodeEmitter;
use crate::context::CodegenContext;
use crate::expr::ExprCompiler;

type Result<T> = std::result::Result<T, CompileError>;

/// Compiles statements to TM instructions.
pub struct StmtCompiler<'a, 'ctx> {
    /// Generation state (temporary stack, symbol table).
    ctx: &'a mut CodegenContext<'ctx>,
    /// Instruction emitter.
    emitter: &'a mut CodeEmitter,
}

impl<'a, 'ctx> StmtCompiler<'a, 'ctx> {
    /// Create a new statement compiler.
    pub fn new(ctx: &'a mut CodegenContext<'ctx>, emitter: &'a mut CodeEmitter) -> Self {
        Self { ctx, emitter }
    }

    /// Generate a statement sequence in order.
    ///
    /// This is the traversal driver: emission order equals list order, and
    /// an empty sequence generates nothing.
    pub fn compile_seq(&mut self, stmts: &[Stmt<'_>]) -> Result<()> {
        for stmt in stmts {
            self.compile(stmt)?;
        }
        Ok(())
    }

    /// Generate a single statement.
    pub fn compile(&mut self, stmt: &Stmt<'_>) -> Result<()> {
        match stmt {
            Stmt::Assign(assign) => self.compile_assign(assign),
            Stmt::Read(read) => self.compile_read(read),
            Stmt::Write(write) => self.compile_write(write),
            Stmt::If(if_stmt) => self.compile_if(if_stmt),
            Stmt::While(while_stmt) => self.compile_while(while_stmt),
            Stmt::Repeat(repeat) => self.compile_repeat(repeat),
            Stmt::Switch(switch) => self.compile_switch(switch),
        }
    }

    /// Generate an assignment: evaluate, then store to the target's slot.
    fn compile_assign(&mut self, assign: &AssignStmt<'_>) -> Result<()> {
        self.expr_compiler().compile(&assign.value)?;
        let location = self.ctx.resolve(assign.target.name, assign.target.span)?;
        self.emitter.store(
            Reg::Ac,
            location,
            Reg::Gp,
            &format!("store {}", assign.target.name),
        );
        Ok(())
    }

    /// Generate a read: one input value into the target's slot.
    fn compile_read(&mut self, read: &ReadStmt<'_>) -> Result<()> {
        self.emitter
            .emit_ro(RegOp::In, Reg::Ac, Reg::Ac, Reg::Ac, "read input");
        let location = self.ctx.resolve(read.target.name, read.target.span)?;
        self.emitter.store(
            Reg::Ac,
            location,
            Reg::Gp,
            &format!("store {}", read.target.name),
        );
        Ok(())
    }

    /// Generate a write: evaluate, then output the accumulator.
    fn compile_write(&mut self, write: &WriteStmt<'_>) -> Result<()> {
        self.expr_compiler().compile(&write.value)?;
        self.emitter
            .emit_ro(RegOp::Out, Reg::Ac, Reg::Ac, Reg::Ac, "write output");
        Ok(())
    }

    /// Create an expression compiler sharing this compiler's state.
    fn expr_compiler(&mut self) -> ExprCompiler<'_, 'ctx> {
        ExprCompiler::new(self.ctx, self.emitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeChunk;
    use crate::symtab::SymbolTable;
    use bumpalo::Bump;
    use tinylang_core::TraceFlags;
    use tinylang_core::tm::{Instruction, MemOp};
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
    fn assign_evaluates_then_stores() {
        let chunk = r#gen("x := 5");
        assert_eq!(
            chunk.instructions(),
            &[
                Instruction::mem(MemOp::Ldc, Reg::Ac, 5, Reg::Ac),
                Instruction::mem(MemOp::St, Reg::Ac, 0, Reg::Gp),
            ]
        );
    }

    #[test]
    fn read_inputs_then_stores() {
        let chunk = r#gen("read x");
        assert_eq!(
            chunk.instructions(),
            &[
                Instruction::reg(RegOp::In, Reg::Ac, Reg::Ac, Reg::Ac),
                Instruction::mem(MemOp::St, Reg::Ac, 0, Reg::Gp),
            ]
        );
    }

    #[test]
    fn write_evaluates_then_outputs() {
        let chunk = r#gen("write 3");
        assert_eq!(
            chunk.instructions(),
            &[
                Instruction::mem(MemOp::Ldc, Reg::Ac, 3, Reg::Ac),
                Instruction::reg(RegOp::Out, Reg::Ac, Reg::Ac, Reg::Ac),
            ]
        );
    }

    #[test]
    fn sequence_emits_in_list_order() {
        let chunk = r#gen("write 1; write 2; write 3");
        let constants: Vec<i32> = chunk
            .instructions()
            .iter()
            .filter_map(|instr| match *instr {
                Instruction::Mem { op: MemOp::Ldc, d, .. } => Some(d),
                _ => None,
            })
            .collect();
        assert_eq!(constants, vec![1, 2, 3]);
    }

    #[test]
    fn assign_then_write_lowering() {
        let chunk = r#gen("x := 1 + 2; write x");
        assert_eq!(
            chunk.instructions(),
            &[
                Instruction::mem(MemOp::Ldc, Reg::Ac, 1, Reg::Ac),
                Instruction::mem(MemOp::St, Reg::Ac, 0, Reg::Mp),
                Instruction::mem(MemOp::Ldc, Reg::Ac, 2, Reg::Ac),
                Instruction::mem(MemOp::Ld, Reg::Ac1, 0, Reg::Mp),
                Instruction::reg(RegOp::Add, Reg::Ac, Reg::Ac1, Reg::Ac),
                Instruction::mem(MemOp::St, Reg::Ac, 0, Reg::Gp),
                Instruction::mem(MemOp::Ld, Reg::Ac, 0, Reg::Gp),
                Instruction::reg(RegOp::Out, Reg::Ac, Reg::Ac, Reg::Ac),
            ]
        );
    }

    #[test]
    fn generation_is_idempotent() {
        let first = r#gen("x := 1; while x < 9 x := x * 2 endwhile; write x");
        let second = r#gen("x := 1; while x < 9 x := x * 2 endwhile; write x");
        assert_eq!(first.instructions(), second.instructions());
    }
}
