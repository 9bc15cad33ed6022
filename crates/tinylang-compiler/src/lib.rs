//! TINY code generator.
//!
//! A single-pass, tree-walking code generator lowering a parsed TINY
//! program to TM machine code. Forward control-flow targets (if/while/
//! switch) are resolved during the one traversal by reserving instruction
//! slots and patching them once the target address is known; backward
//! targets (repeat, loop back-edges) are recorded before use and need no
//! patching. Expression evaluation survives the single accumulator by
//! spilling to a temporary pseudo-stack below `mp`.
//!
//! ## Modules
//!
//! - [`code`]: instruction chunk, backpatch protocol, high-level emitter
//! - [`context`]: per-compilation mutable state (temporary-slot counter)
//! - [`expr`]: expression compiler (value in `ac`)
//! - [`stmt`]: statement compiler and traversal driver
//! - [`symtab`]: variable name to storage-offset table
//! - [`listing`]: human-readable assembly output
//!
//! ## Example
//!
//! ```
//! use bumpalo::Bump;
//! use tinylang_parser::Parser;
//! use tinylang_compiler::{CompileOptions, SymbolTable, generate};
//!
//! let arena = Bump::new();
//! let program = Parser::parse("read x; write x * 2", &arena).unwrap();
//! let symbols = SymbolTable::build(&program);
//! let chunk = generate(&program, &symbols, &CompileOptions::default()).unwrap();
//! assert!(!chunk.is_empty());
//! ```

pub mod code;
pub mod context;
pub mod expr;
pub mod listing;
pub mod stmt;
pub mod symtab;

pub use code::{CodeChunk, CodeEmitter, Slot};
pub use context::CodegenContext;
pub use expr::ExprCompiler;
pub use stmt::StmtCompiler;
pub use symtab::SymbolTable;

// Re-export the error type from core for convenience
pub use tinylang_core::CompileError;

use tinylang_core::TraceFlags;
use tinylang_core::tm::{MemOp, Reg, RegOp};
use tinylang_parser::Program;

/// Options controlling code generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// What commentary to leave in the listing.
    pub trace: TraceFlags,
}

/// Generate TM code for a whole program.
///
/// Wraps the statement sequence in the standard prologue (initialize `mp`
/// from cell 0, then clear the cell) and epilogue (`HALT`), and seals the
/// chunk, verifying every reserved slot was patched. All mutable generation
/// state is created here, so calling this twice over the same tree yields
/// identical instruction streams.
pub fn generate(
    program: &Program<'_>,
    symbols: &SymbolTable,
    options: &CompileOptions,
) -> Result<CodeChunk, CompileError> {
    let mut emitter = CodeEmitter::new(options.trace);

    emitter.comment_line("TINY compilation to TM code");
    emitter.comment_line("standard prelude");
    emitter.emit_rm(
        MemOp::Ld,
        Reg::Mp,
        0,
        Reg::Ac,
        "init memory pointer from cell 0",
    );
    emitter.emit_rm(MemOp::St, Reg::Ac, 0, Reg::Ac, "clear cell 0");

    let mut ctx = CodegenContext::new(symbols);
    StmtCompiler::new(&mut ctx, &mut emitter).compile_seq(program.stmts())?;

    emitter.comment_line("end of execution");
    emitter.emit_ro(RegOp::Halt, Reg::Ac, Reg::Ac, Reg::Ac, "stop");

    emitter.finish()
}
