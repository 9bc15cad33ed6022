//! TM machine interpreter.
//!
//! Executes the instruction streams produced by the code generator:
//! scripted input, captured output, and typed traps instead of an
//! interactive console. Used by the end-to-end tests and available to
//! embedders who want to run compiled programs directly.
//!
//! # Example
//!
//! ```
//! use tinylang_core::tm::{Instruction, MemOp, Reg, RegOp};
//! use tinylang_vm::Machine;
//!
//! // write 2 + 3
//! let program = vec![
//!     Instruction::mem(MemOp::Ldc, Reg::Ac, 2, Reg::Ac),
//!     Instruction::mem(MemOp::Lda, Reg::Ac, 3, Reg::Ac),
//!     Instruction::reg(RegOp::Out, Reg::Ac, Reg::Ac, Reg::Ac),
//!     Instruction::halt(),
//! ];
//! let mut machine = Machine::load(program);
//! assert_eq!(machine.run().unwrap(), &[5]);
//! ```

mod machine;

pub use machine::{DATA_SIZE, Machine, StepOutcome};

// Re-export the trap type from core for convenience
pub use tinylang_core::RuntimeError;
