//! Statement AST nodes.
//!
//! Statement sequences are ordinary slices allocated in the arena; the
//! order of a slice is the order of emission and execution.

use crate::ast::Ident;
use crate::ast::expr::Expr;
use tinylang_core::Span;

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// Assignment: `x := exp`
    Assign(AssignStmt<'ast>),
    /// Input: `read x`
    Read(ReadStmt<'ast>),
    /// Output: `write exp`
    Write(WriteStmt<'ast>),
    /// Conditional: `if exp then ... else ... endif`
    If(&'ast IfStmt<'ast>),
    /// Pre-test loop: `while exp ... endwhile`
    While(&'ast WhileStmt<'ast>),
    /// Post-test loop: `repeat ... until exp`
    Repeat(&'ast RepeatStmt<'ast>),
    /// Multi-way branch: `switch exp case ... endswitch`
    Switch(&'ast SwitchStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    /// Get the span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Self::Assign(s) => s.span,
            Self::Read(s) => s.span,
            Self::Write(s) => s.span,
            Self::If(s) => s.span,
            Self::While(s) => s.span,
            Self::Repeat(s) => s.span,
            Self::Switch(s) => s.span,
        }
    }
}

/// An assignment statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignStmt<'ast> {
    /// Target variable.
    pub target: Ident<'ast>,
    /// Right-hand side.
    pub value: Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A read statement: one integer from input into a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadStmt<'ast> {
    /// Target variable.
    pub target: Ident<'ast>,
    /// Source location
    pub span: Span,
}

/// A write statement: one expression value to output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteStmt<'ast> {
    /// The value to write.
    pub value: Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// An if statement.
///
/// `else_body` is the empty slice when the else part is absent; the code
/// generator emits the same two-jump shape either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    /// Condition (0 = false, anything else = true).
    pub condition: Expr<'ast>,
    /// Statements run when the condition holds.
    pub then_body: &'ast [Stmt<'ast>],
    /// Statements run otherwise (possibly empty).
    pub else_body: &'ast [Stmt<'ast>],
    /// Source location
    pub span: Span,
}

/// A while loop: condition tested before each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    /// Loop condition.
    pub condition: Expr<'ast>,
    /// Loop body.
    pub body: &'ast [Stmt<'ast>],
    /// Source location
    pub span: Span,
}

/// A repeat loop: body runs at least once, repeats until the condition
/// becomes true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatStmt<'ast> {
    /// Loop body.
    pub body: &'ast [Stmt<'ast>],
    /// Exit condition, tested after each iteration.
    pub until: Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A switch statement: a selector expression and a chain of case arms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchStmt<'ast> {
    /// The value each arm is compared against.
    pub selector: Expr<'ast>,
    /// Case arms, tried in order.
    pub arms: &'ast [CaseArm<'ast>],
    /// Source location
    pub span: Span,
}

/// One arm of a switch statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseArm<'ast> {
    /// The match expression.
    pub value: Expr<'ast>,
    /// Statements run when the arm matches.
    pub body: &'ast [Stmt<'ast>],
    /// Source location
    pub span: Span,
}
