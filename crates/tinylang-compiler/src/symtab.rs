//! Symbol table: identifier to data-segment offset.
//!
//! TINY has one flat scope of integer variables. Each name gets a fixed
//! offset from the global pointer, assigned in order of first occurrence by
//! a preorder walk of the tree, so a program's storage layout is a function
//! of its text alone.

use rustc_hash::FxHashMap;
use tinylang_parser::Program;
use tinylang_parser::ast::{Expr, Stmt};

/// Maps variable names to storage offsets from `gp`.
#[derive(Debug, Default)]
pub struct SymbolTable {
    locations: FxHashMap<String, i32>,
    next_location: i32,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for a program.
    ///
    /// Walks the tree in preorder; assignment and read targets are declared
    /// before the expressions under them, matching the storage layout of the
    /// classic TINY analyzer.
    pub fn build(program: &Program<'_>) -> Self {
        let mut table = Self::new();
        table.collect_seq(program.stmts());
        table
    }

    /// Declare `name`, returning its offset. Re-declaring is a no-op.
    pub fn declare(&mut self, name: &str) -> i32 {
        if let Some(&location) = self.locations.get(name) {
            return location;
        }
        let location = self.next_location;
        self.locations.insert(name.to_string(), location);
        self.next_location += 1;
        location
    }

    /// Look up the offset of `name`.
    pub fn resolve(&self, name: &str) -> Option<i32> {
        self.locations.get(name).copied()
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no variables are declared.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    fn collect_seq(&mut self, stmts: &[Stmt<'_>]) {
        for stmt in stmts {
            self.collect_stmt(stmt);
        }
    }

    fn collect_stmt(&mut self, stmt: &Stmt<'_>) {
        match stmt {
            Stmt::Assign(assign) => {
                self.declare(assign.target.name);
                self.collect_expr(&assign.value);
            }
            Stmt::Read(read) => {
                self.declare(read.target.name);
            }
            Stmt::Write(write) => self.collect_expr(&write.value),
            Stmt::If(if_stmt) => {
                self.collect_expr(&if_stmt.condition);
                self.collect_seq(if_stmt.then_body);
                self.collect_seq(if_stmt.else_body);
            }
            Stmt::While(while_stmt) => {
                self.collect_expr(&while_stmt.condition);
                self.collect_seq(while_stmt.body);
            }
            Stmt::Repeat(repeat) => {
                self.collect_seq(repeat.body);
                self.collect_expr(&repeat.until);
            }
            Stmt::Switch(switch) => {
                self.collect_expr(&switch.selector);
                for arm in switch.arms {
                    self.collect_expr(&arm.value);
                    self.collect_seq(arm.body);
                }
            }
        }
    }

    fn collect_expr(&mut self, expr: &Expr<'_>) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Ident(ident) => {
                self.declare(ident.name);
            }
            Expr::Binary(binary) => {
                self.collect_expr(&binary.lhs);
                self.collect_expr(&binary.rhs);
            }
        }
    }
}
