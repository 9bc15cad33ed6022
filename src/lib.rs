//! TINY compiler for the TM virtual machine.
//!
//! A small imperative language lowered in one tree-walking pass to code for
//! an accumulator machine, plus an interpreter for that machine. The
//! pipeline is parse → build symbol table → generate, and this crate ties
//! it together behind [`compile`] and [`run`]:
//!
//! ```
//! let result = tinylang::run("read n; write n * n", &[7]).unwrap();
//! assert_eq!(result, vec![49]);
//! ```
//!
//! The member crates are re-exported for callers who want a single phase:
//! [`parser`] for the lexer/AST, [`compiler`] for code generation and the
//! listing, [`vm`] for the machine.

pub use tinylang_compiler as compiler;
pub use tinylang_core as core;
pub use tinylang_parser as parser;
pub use tinylang_vm as vm;

pub use tinylang_compiler::{CodeChunk, CompileOptions, SymbolTable, generate, listing};
pub use tinylang_core::{TinyError, TraceFlags};
pub use tinylang_parser::Parser;
pub use tinylang_vm::Machine;

use bumpalo::Bump;

/// The result of compiling one TINY program.
pub struct Compilation {
    /// The generated instruction stream.
    pub chunk: CodeChunk,
    /// Variable name to storage-offset table.
    pub symbols: SymbolTable,
    /// Human-readable assembly listing.
    pub listing: String,
}

/// Compile a TINY source program to TM code.
pub fn compile(source: &str, options: &CompileOptions) -> Result<Compilation, TinyError> {
    let arena = Bump::new();
    let program = Parser::parse(source, &arena)?;
    let symbols = SymbolTable::build(&program);
    let chunk = generate(&program, &symbols, options)?;

    let listing = if options.trace.contains(TraceFlags::SOURCE) {
        listing::write_listing_with_source(&chunk, source)
    } else {
        listing::write_listing(&chunk)
    };

    Ok(Compilation {
        chunk,
        symbols,
        listing,
    })
}

/// Compile and execute a TINY program with scripted input.
///
/// Returns everything the program wrote, in order.
pub fn run(source: &str, input: &[i32]) -> Result<Vec<i32>, TinyError> {
    let compilation = compile(source, &CompileOptions::default())?;
    let mut machine =
        Machine::load(compilation.chunk.instructions().to_vec()).with_input(input.iter().copied());
    let output = machine.run()?;
    Ok(output.to_vec())
}
