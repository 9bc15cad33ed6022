//! The TM machine: registers, memories, and the dispatch loop.

use std::collections::VecDeque;

use tinylang_core::RuntimeError;
use tinylang_core::tm::{Instruction, MemOp, Reg, RegOp};

/// Size of data memory in words.
///
/// Cell 0 is preset to the top data address; the standard prologue loads it
/// into `mp` to base the temporary stack at the top of memory.
pub const DATA_SIZE: usize = 1024;

/// Default fuel for [`Machine::run`].
const DEFAULT_FUEL: u64 = 1_000_000;

/// Result of a single machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The machine executed one instruction and can continue.
    Running,
    /// The machine executed `HALT`.
    Halted,
}

/// A TM machine instance loaded with one program.
pub struct Machine {
    /// Instruction memory.
    imem: Vec<Instruction>,
    /// Data memory.
    dmem: Vec<i32>,
    /// Register file; `reg[7]` is the program counter.
    regs: [i32; Reg::COUNT],
    /// Scripted input consumed by `IN`.
    input: VecDeque<i32>,
    /// Output produced by `OUT`.
    output: Vec<i32>,
    /// Instructions executed so far.
    steps: u64,
    /// Step budget for [`run`](Self::run).
    fuel: u64,
}

impl Machine {
    /// Load a program into a fresh machine.
    pub fn load(imem: Vec<Instruction>) -> Self {
        let mut dmem = vec![0; DATA_SIZE];
        dmem[0] = (DATA_SIZE - 1) as i32;
        Self {
            imem,
            dmem,
            regs: [0; Reg::COUNT],
            input: VecDeque::new(),
            output: Vec::new(),
            steps: 0,
            fuel: DEFAULT_FUEL,
        }
    }

    /// Supply scripted input for `IN` instructions.
    pub fn with_input(mut self, input: impl IntoIterator<Item = i32>) -> Self {
        self.input = input.into_iter().collect();
        self
    }

    /// Replace the step budget used by [`run`](Self::run).
    pub fn set_fuel(&mut self, fuel: u64) {
        self.fuel = fuel;
    }

    /// Current value of a register.
    pub fn reg(&self, r: Reg) -> i32 {
        self.regs[r.index()]
    }

    /// Data memory word at `address`.
    pub fn dmem(&self, address: usize) -> Option<i32> {
        self.dmem.get(address).copied()
    }

    /// Output produced so far.
    pub fn output(&self) -> &[i32] {
        &self.output
    }

    /// Instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run until `HALT` or a trap; returns the program's output.
    pub fn run(&mut self) -> Result<&[i32], RuntimeError> {
        loop {
            if self.steps >= self.fuel {
                return Err(RuntimeError::OutOfFuel { steps: self.steps });
            }
            if self.step()? == StepOutcome::Halted {
                return Ok(&self.output);
            }
        }
    }

    /// Fetch, increment the program counter, and execute one instruction.
    pub fn step(&mut self) -> Result<StepOutcome, RuntimeError> {
        let pc = self.regs[Reg::Pc.index()];
        let at = usize::try_from(pc)
            .ok()
            .filter(|&at| at < self.imem.len())
            .ok_or(RuntimeError::ImemOutOfRange { address: pc })?;
        let instr = self.imem[at];

        // The pc is incremented before execution; pc-relative jumps are
        // encoded against this incremented value.
        self.regs[Reg::Pc.index()] = pc + 1;
        self.steps += 1;

        match instr {
            Instruction::Reg { op, r, s, t } => self.exec_reg(op, r, s, t, at),
            Instruction::Mem { op, r, d, s } => {
                self.exec_mem(op, r, d, s, at)?;
                Ok(StepOutcome::Running)
            }
        }
    }

    fn exec_reg(
        &mut self,
        op: RegOp,
        r: Reg,
        s: Reg,
        t: Reg,
        at: usize,
    ) -> Result<StepOutcome, RuntimeError> {
        let (s, t) = (self.regs[s.index()], self.regs[t.index()]);
        match op {
            RegOp::Halt => return Ok(StepOutcome::Halted),
            RegOp::In => {
                let value = self
                    .input
                    .pop_front()
                    .ok_or(RuntimeError::InputExhausted { at })?;
                self.regs[r.index()] = value;
            }
            RegOp::Out => self.output.push(self.regs[r.index()]),
            RegOp::Add => self.regs[r.index()] = s.wrapping_add(t),
            RegOp::Sub => self.regs[r.index()] = s.wrapping_sub(t),
            RegOp::Mul => self.regs[r.index()] = s.wrapping_mul(t),
            RegOp::Div => {
                if t == 0 {
                    return Err(RuntimeError::DivisionByZero { at });
                }
                self.regs[r.index()] = s.wrapping_div(t);
            }
        }
        Ok(StepOutcome::Running)
    }

    fn exec_mem(&mut self, op: MemOp, r: Reg, d: i32, s: Reg, at: usize) -> Result<(), RuntimeError> {
        let address = d.wrapping_add(self.regs[s.index()]);
        match op {
            MemOp::Ldc => self.regs[r.index()] = d,
            MemOp::Lda => self.regs[r.index()] = address,
            MemOp::Ld => self.regs[r.index()] = self.dmem[self.data_index(address, at)?],
            MemOp::St => {
                let index = self.data_index(address, at)?;
                self.dmem[index] = self.regs[r.index()];
            }
            MemOp::Jlt | MemOp::Jle | MemOp::Jgt | MemOp::Jge | MemOp::Jeq | MemOp::Jne => {
                let value = self.regs[r.index()];
                let taken = match op {
                    MemOp::Jlt => value < 0,
                    MemOp::Jle => value <= 0,
                    MemOp::Jgt => value > 0,
                    MemOp::Jge => value >= 0,
                    MemOp::Jeq => value == 0,
                    _ => value != 0,
                };
                if taken {
                    self.regs[Reg::Pc.index()] = address;
                }
            }
        }
        Ok(())
    }

    fn data_index(&self, address: i32, at: usize) -> Result<usize, RuntimeError> {
        usize::try_from(address)
            .ok()
            .filter(|&index| index < self.dmem.len())
            .ok_or(RuntimeError::DmemOutOfRange { address, at })
    }
}
