//! Expression code generation.
//!
//! The contract: after [`ExprCompiler::compile`] returns, the accumulator
//! `ac` holds the expression's value. `ac1` may be clobbered; no other
//! register is touched. Nested sub-expressions survive the single
//! accumulator by spilling to the temporary pseudo-stack below `mp`.

mod binary;

use tinylang_core::CompileError;
use tinylang_core::tm::Reg;
use tinylang_parser::ast::Expr;

use crate::code::CodeEmitter;
use crate::context::CodegenContext;

type Result<T> = std::result::Result<T, CompileError>;

/// Compiles expressions into TM instructions leaving their value in `ac`.
pub struct ExprCompiler<'a, 'ctx> {
    /// Generation state (temporary stack, symbol table).
    pub(crate) ctx: &'a mut CodegenContext<'ctx>,
    /// Instruction emitter.
    pub(crate) emitter: &'a mut CodeEmitter,
}

impl<'a, 'ctx> ExprCompiler<'a, 'ctx> {
    /// Create a new expression compiler.
    pub fn new(ctx: &'a mut CodegenContext<'ctx>, emitter: &'a mut CodeEmitter) -> Self {
        Self { ctx, emitter }
    }

    /// Generate code leaving the expression's value in `ac`.
    pub fn compile(&mut self, expr: &Expr<'_>) -> Result<()> {
        match expr {
            Expr::Literal(literal) => {
                self.emitter
                    .load_const(Reg::Ac, literal.value, "load constant");
                Ok(())
            }
            Expr::Ident(ident) => {
                let location = self.ctx.resolve(ident.name, ident.span)?;
                self.emitter
                    .load(Reg::Ac, location, Reg::Gp, &format!("load {}", ident.name));
                Ok(())
            }
            Expr::Binary(binary) => self.compile_binary(binary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symtab::SymbolTable;
    use bumpalo::Bump;
    use tinylang_core::TraceFlags;
    use tinylang_core::tm::{Instruction, MemOp};
    use tinylang_parser::Parser;
    use tinylang_parser::ast::Stmt;

    /// Compile the right-hand side of `x := <expr>` from source.
    fn compile_rhs(source: &str) -> (crate::code::CodeChunk, i32) {
        let arena = Bump::new();
        let program = Parser::parse(source, &arena).unwrap();
        let symbols = SymbolTable::build(&program);
        let mut ctx = CodegenContext::new(&symbols);
        let mut emitter = CodeEmitter::new(TraceFlags::empty());

        let Stmt::Assign(assign) = program.stmts()[0] else {
            panic!("expected assignment");
        };
        ExprCompiler::new(&mut ctx, &mut emitter)
            .compile(&assign.value)
            .unwrap();
        let offset = ctx.tmp_offset();
        (emitter.finish().unwrap(), offset)
    }

    #[test]
    fn literal_is_one_load_immediate() {
        let (chunk, _) = compile_rhs("x := 42");
        assert_eq!(
            chunk.instructions(),
            &[Instruction::mem(MemOp::Ldc, Reg::Ac, 42, Reg::Ac)]
        );
    }

    #[test]
    fn identifier_loads_from_its_offset() {
        let (chunk, _) = compile_rhs("x := y");
        // y is the second name seen (after the target x), so offset 1.
        assert_eq!(
            chunk.instructions(),
            &[Instruction::mem(MemOp::Ld, Reg::Ac, 1, Reg::Gp)]
        );
    }

    #[test]
    fn unresolved_identifier_is_reported() {
        let arena = Bump::new();
        let program = Parser::parse("x := y", &arena).unwrap();
        let symbols = SymbolTable::new(); // deliberately not built
        let mut ctx = CodegenContext::new(&symbols);
        let mut emitter = CodeEmitter::new(TraceFlags::empty());

        let Stmt::Assign(assign) = program.stmts()[0] else {
            panic!("expected assignment");
        };
        let err = ExprCompiler::new(&mut ctx, &mut emitter)
            .compile(&assign.value)
            .unwrap_err();
        assert!(matches!(err, CompileError::UnresolvedIdentifier { .. }));
    }

    #[test]
    fn temporary_counter_is_balanced_for_nested_arithmetic() {
        let (_, offset) = compile_rhs("x := 1 + 2 * 3 - 4 / 2");
        assert_eq!(offset, 0);
    }

    #[test]
    fn addition_spills_reloads_and_adds() {
        let (chunk, _) = compile_rhs("x := 1 + 2");
        use tinylang_core::tm::RegOp;
        assert_eq!(
            chunk.instructions(),
            &[
                Instruction::mem(MemOp::Ldc, Reg::Ac, 1, Reg::Ac),
                Instruction::mem(MemOp::St, Reg::Ac, 0, Reg::Mp),
                Instruction::mem(MemOp::Ldc, Reg::Ac, 2, Reg::Ac),
                Instruction::mem(MemOp::Ld, Reg::Ac1, 0, Reg::Mp),
                Instruction::reg(RegOp::Add, Reg::Ac, Reg::Ac1, Reg::Ac),
            ]
        );
    }

    #[test]
    fn nested_spills_use_distinct_slots() {
        // Left-nested: the inner spill is released before the outer one
        // happens, so both reuse slot 0.
        let (chunk, _) = compile_rhs("x := 1 * 2 + 3");
        let spills: Vec<i32> = chunk
            .instructions()
            .iter()
            .filter_map(|instr| match *instr {
                Instruction::Mem {
                    op: MemOp::St,
                    d,
                    s: Reg::Mp,
                    ..
                } => Some(d),
                _ => None,
            })
            .collect();
        assert_eq!(spills, vec![0, 0]);

        let (chunk, _) = compile_rhs("x := 1 + 2 * 3"); // rhs nested under add
        let spills: Vec<i32> = chunk
            .instructions()
            .iter()
            .filter_map(|instr| match *instr {
                Instruction::Mem {
                    op: MemOp::St,
                    d,
                    s: Reg::Mp,
                    ..
                } => Some(d),
                _ => None,
            })
            .collect();
        // Outer spill at 0 stays live while the inner multiply spills at -1.
        assert_eq!(spills, vec![0, -1]);
    }

    #[test]
    fn relational_idiom_is_four_instructions_after_subtract() {
        let (chunk, offset) = compile_rhs("x := 1 < 2");
        assert_eq!(offset, 0);
        use tinylang_core::tm::RegOp;
        let tail = &chunk.instructions()[chunk.len() - 4..];
        assert_eq!(
            tail,
            &[
                Instruction::mem(MemOp::Jlt, Reg::Ac, 2, Reg::Pc),
                Instruction::mem(MemOp::Ldc, Reg::Ac, 0, Reg::Ac),
                Instruction::mem(MemOp::Lda, Reg::Pc, 1, Reg::Pc),
                Instruction::mem(MemOp::Ldc, Reg::Ac, 1, Reg::Ac),
            ]
        );
        // And the subtract that feeds it.
        assert_eq!(
            chunk.get(chunk.len() - 5),
            Some(&Instruction::reg(RegOp::Sub, Reg::Ac, Reg::Ac1, Reg::Ac))
        );
    }

    #[test]
    fn equality_branches_on_jeq() {
        let (chunk, _) = compile_rhs("x := y = 3");
        assert!(
            chunk
                .instructions()
                .iter()
                .any(|instr| matches!(instr, Instruction::Mem { op: MemOp::Jeq, .. }))
        );
    }
}
