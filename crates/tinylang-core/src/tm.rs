//! The TM target-machine instruction model.
//!
//! TM is a minimal register machine: eight integer registers, separate
//! instruction and data memories, and two instruction formats. Register-only
//! (`RO`) instructions name three registers; register-memory (`RM`)
//! instructions name a register and a displaced base, `d(s)`, whose effective
//! operand is `d + reg[s]`.
//!
//! The compiler fixes register roles rather than allocating: `ac` holds every
//! expression result, `ac1` is the one scratch register, `gp` is the base for
//! variable storage, `mp` the base for the temporary stack, and `pc` doubles
//! as the jump target base for control flow.

use std::fmt;

/// TM registers, by role.
///
/// The machine has eight registers; only the ones the compiler uses are
/// named. Registers are addressed by their numeric index in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Reg {
    /// Accumulator: holds every expression's computed value.
    Ac = 0,
    /// Second register: reloaded left operands, switch control values.
    Ac1 = 1,
    /// Global pointer: base for variable storage offsets.
    Gp = 5,
    /// Memory pointer: base for the temporary pseudo-stack (grows downward).
    Mp = 6,
    /// Program counter.
    Pc = 7,
}

impl Reg {
    /// Number of registers in the machine.
    pub const COUNT: usize = 8;

    /// The register's index into the machine's register file.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Register-only opcodes (`RO` format: `op r,s,t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegOp {
    /// Stop execution. Operands ignored.
    Halt,
    /// Read one integer from input into `r`.
    In,
    /// Write `reg[r]` to output.
    Out,
    /// `reg[r] = reg[s] + reg[t]`
    Add,
    /// `reg[r] = reg[s] - reg[t]`
    Sub,
    /// `reg[r] = reg[s] * reg[t]`
    Mul,
    /// `reg[r] = reg[s] / reg[t]`; traps on zero divisor.
    Div,
}

impl RegOp {
    /// The opcode's listing mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            RegOp::Halt => "HALT",
            RegOp::In => "IN",
            RegOp::Out => "OUT",
            RegOp::Add => "ADD",
            RegOp::Sub => "SUB",
            RegOp::Mul => "MUL",
            RegOp::Div => "DIV",
        }
    }
}

/// Register-memory opcodes (`RM` format: `op r,d(s)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemOp {
    /// `reg[r] = dmem[d + reg[s]]`
    Ld,
    /// `dmem[d + reg[s]] = reg[r]`
    St,
    /// `reg[r] = d + reg[s]` (address arithmetic; with `r = pc` this is an
    /// unconditional jump)
    Lda,
    /// `reg[r] = d`
    Ldc,
    /// Jump to `d + reg[s]` if `reg[r] < 0`.
    Jlt,
    /// Jump to `d + reg[s]` if `reg[r] <= 0`.
    Jle,
    /// Jump to `d + reg[s]` if `reg[r] > 0`.
    Jgt,
    /// Jump to `d + reg[s]` if `reg[r] >= 0`.
    Jge,
    /// Jump to `d + reg[s]` if `reg[r] == 0`.
    Jeq,
    /// Jump to `d + reg[s]` if `reg[r] != 0`.
    Jne,
}

impl MemOp {
    /// The opcode's listing mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            MemOp::Ld => "LD",
            MemOp::St => "ST",
            MemOp::Lda => "LDA",
            MemOp::Ldc => "LDC",
            MemOp::Jlt => "JLT",
            MemOp::Jle => "JLE",
            MemOp::Jgt => "JGT",
            MemOp::Jge => "JGE",
            MemOp::Jeq => "JEQ",
            MemOp::Jne => "JNE",
        }
    }

    /// Whether this is one of the conditional jump opcodes.
    pub const fn is_conditional_jump(self) -> bool {
        matches!(
            self,
            MemOp::Jlt | MemOp::Jle | MemOp::Jgt | MemOp::Jge | MemOp::Jeq | MemOp::Jne
        )
    }
}

/// A single TM instruction.
///
/// Fixed width: every instruction occupies exactly one address, so patching
/// a reserved slot can never shift its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Register-only format.
    Reg { op: RegOp, r: Reg, s: Reg, t: Reg },
    /// Register-memory format.
    Mem { op: MemOp, r: Reg, d: i32, s: Reg },
}

impl Instruction {
    /// Build a register-only instruction.
    #[inline]
    pub const fn reg(op: RegOp, r: Reg, s: Reg, t: Reg) -> Self {
        Instruction::Reg { op, r, s, t }
    }

    /// Build a register-memory instruction.
    #[inline]
    pub const fn mem(op: MemOp, r: Reg, d: i32, s: Reg) -> Self {
        Instruction::Mem { op, r, d, s }
    }

    /// A halt instruction.
    #[inline]
    pub const fn halt() -> Self {
        Instruction::reg(RegOp::Halt, Reg::Ac, Reg::Ac, Reg::Ac)
    }

    /// The absolute target of a pc-based jump located at `addr`.
    ///
    /// TM evaluates `d(s)` against the already-incremented program counter,
    /// so the target of a jump at `addr` is `addr + 1 + d`. Returns `None`
    /// for instructions that do not transfer control via `pc`.
    pub fn branch_target(&self, addr: usize) -> Option<i32> {
        match *self {
            Instruction::Mem { op, d, s: Reg::Pc, .. } if op.is_conditional_jump() => {
                Some(addr as i32 + 1 + d)
            }
            Instruction::Mem {
                op: MemOp::Lda,
                r: Reg::Pc,
                d,
                s: Reg::Pc,
            } => Some(addr as i32 + 1 + d),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Reg { op, r, s, t } => {
                write!(f, "{:>5}  {},{},{}", op.name(), r, s, t)
            }
            Instruction::Mem { op, r, d, s } => {
                write!(f, "{:>5}  {},{}({})", op.name(), r, d, s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_indices_match_tm_roles() {
        assert_eq!(Reg::Ac.index(), 0);
        assert_eq!(Reg::Ac1.index(), 1);
        assert_eq!(Reg::Gp.index(), 5);
        assert_eq!(Reg::Mp.index(), 6);
        assert_eq!(Reg::Pc.index(), 7);
    }

    #[test]
    fn display_ro_format() {
        let instr = Instruction::reg(RegOp::Add, Reg::Ac, Reg::Ac1, Reg::Ac);
        assert_eq!(instr.to_string(), "  ADD  0,1,0");
    }

    #[test]
    fn display_rm_format() {
        let instr = Instruction::mem(MemOp::Ld, Reg::Ac, -3, Reg::Mp);
        assert_eq!(instr.to_string(), "   LD  0,-3(6)");
    }

    #[test]
    fn branch_target_of_forward_jump() {
        // JEQ 0,2(7) at address 10 skips two instructions: target 13.
        let jump = Instruction::mem(MemOp::Jeq, Reg::Ac, 2, Reg::Pc);
        assert_eq!(jump.branch_target(10), Some(13));
    }

    #[test]
    fn branch_target_of_backward_lda() {
        // LDA 7,-6(7) at address 9 jumps back to address 4.
        let jump = Instruction::mem(MemOp::Lda, Reg::Pc, -6, Reg::Pc);
        assert_eq!(jump.branch_target(9), Some(4));
    }

    #[test]
    fn non_jumps_have_no_branch_target() {
        assert_eq!(Instruction::halt().branch_target(0), None);
        // LDA into a data register is address arithmetic, not a jump.
        let lda = Instruction::mem(MemOp::Lda, Reg::Ac1, 0, Reg::Ac);
        assert_eq!(lda.branch_target(5), None);
        // A jump relative to a non-pc base is not statically resolvable.
        let jeq = Instruction::mem(MemOp::Jeq, Reg::Ac, 3, Reg::Gp);
        assert_eq!(jeq.branch_target(5), None);
    }
}
