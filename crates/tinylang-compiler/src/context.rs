//! Code-generation context.
//!
//! Everything mutable that generation needs lives here and is created fresh
//! per [`generate`](crate::generate) call, so repeated compilations start
//! from the same state by construction instead of by remembering to reset
//! globals.

use tinylang_core::{CompileError, Span};

use crate::symtab::SymbolTable;

/// Mutable state threaded through the statement and expression compilers.
pub struct CodegenContext<'a> {
    /// Storage offsets for every variable in the program.
    symbols: &'a SymbolTable,
    /// Next free temporary slot, as a (non-positive) offset from `mp`.
    ///
    /// The temporary pseudo-stack grows downward from the top of data
    /// memory. Every spill/reload pair is balanced, so this returns to its
    /// entry value after each fully generated expression.
    tmp_offset: i32,
}

impl<'a> CodegenContext<'a> {
    /// Create a fresh context over a symbol table.
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            tmp_offset: 0,
        }
    }

    /// Resolve a variable to its storage offset.
    ///
    /// Failure means the tree was not run through [`SymbolTable::build`];
    /// generation assumes upstream validation and only reports, it does not
    /// recover.
    pub fn resolve(&self, name: &str, span: Span) -> Result<i32, CompileError> {
        self.symbols
            .resolve(name)
            .ok_or_else(|| CompileError::UnresolvedIdentifier {
                name: name.to_string(),
                span,
            })
    }

    /// Claim the next temporary slot for a spill.
    ///
    /// Returns the offset to store at, then moves the stack down one slot.
    pub fn push_tmp(&mut self) -> i32 {
        let offset = self.tmp_offset;
        self.tmp_offset -= 1;
        offset
    }

    /// Release the most recent temporary slot for a reload.
    ///
    /// Moves the stack back up one slot and returns the offset to load from.
    pub fn pop_tmp(&mut self) -> i32 {
        self.tmp_offset += 1;
        self.tmp_offset
    }

    /// The current temporary-stack depth marker.
    pub fn tmp_offset(&self) -> i32 {
        self.tmp_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_are_symmetric() {
        let symbols = SymbolTable::new();
        let mut ctx = CodegenContext::new(&symbols);

        let first = ctx.push_tmp();
        let second = ctx.push_tmp();
        assert_eq!((first, second), (0, -1));
        assert_eq!(ctx.tmp_offset(), -2);

        // Reloads come back in reverse order, at the addresses stored to.
        assert_eq!(ctx.pop_tmp(), -1);
        assert_eq!(ctx.pop_tmp(), 0);
        assert_eq!(ctx.tmp_offset(), 0);
    }

    #[test]
    fn resolve_reports_unknown_names() {
        let mut symbols = SymbolTable::new();
        symbols.declare("x");
        let ctx = CodegenContext::new(&symbols);

        assert_eq!(ctx.resolve("x", Span::default()), Ok(0));
        assert!(matches!(
            ctx.resolve("ghost", Span::default()),
            Err(CompileError::UnresolvedIdentifier { name, .. }) if name == "ghost"
        ));
    }
}
