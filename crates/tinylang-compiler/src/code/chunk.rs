//! Instruction chunk with slot reservation and backpatching.
//!
//! A [`CodeChunk`] is an append-only buffer of fixed-width TM instructions.
//! Forward jumps whose targets are not yet known reserve a slot; patching is
//! a direct indexed overwrite of exactly that slot, so later addresses never
//! move. This replaces the emit-file cursor rewinding of classic one-pass
//! generators with something a test can inspect.

use tinylang_core::CompileError;
use tinylang_core::tm::Instruction;

/// A reserved instruction slot awaiting its patch.
///
/// Deliberately neither `Copy` nor `Clone`: [`CodeChunk::patch`] consumes
/// the slot, so each reservation can be patched at most once. Whether every
/// slot was patched at all is checked by [`CodeChunk::finish`].
#[derive(Debug)]
pub struct Slot {
    address: usize,
}

impl Slot {
    /// The address this slot occupies in the instruction stream.
    #[inline]
    pub fn address(&self) -> usize {
        self.address
    }
}

/// An append-only TM instruction buffer.
///
/// Instructions live at consecutive addresses starting from 0. Every
/// instruction carries a listing comment; standalone comment lines (trace
/// banners, headers) are kept in a side table keyed by the address they
/// precede.
#[derive(Debug, Default)]
pub struct CodeChunk {
    /// The instruction stream.
    code: Vec<Instruction>,
    /// Listing comment per instruction (parallel to `code`).
    comments: Vec<String>,
    /// Standalone comment lines, each attached to the address it precedes.
    comment_lines: Vec<(usize, String)>,
    /// Addresses reserved but not yet patched.
    pending: Vec<usize>,
    /// Total reservations made over the chunk's lifetime.
    reservations: usize,
}

impl CodeChunk {
    /// Create a new empty chunk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one instruction at the next address.
    pub fn emit(&mut self, instr: Instruction, comment: impl Into<String>) {
        self.code.push(instr);
        self.comments.push(comment.into());
    }

    /// Reserve the next address for a later patch.
    ///
    /// The slot holds a placeholder until patched; [`finish`](Self::finish)
    /// fails if any reservation is still pending.
    pub fn reserve_slot(&mut self) -> Slot {
        let address = self.code.len();
        self.code.push(Instruction::halt());
        self.comments.push(String::from("<pending backpatch>"));
        self.pending.push(address);
        self.reservations += 1;
        Slot { address }
    }

    /// Total number of slots ever reserved on this chunk.
    pub fn reservations(&self) -> usize {
        self.reservations
    }

    /// Overwrite a reserved slot with its final instruction.
    ///
    /// Consumes the slot; exactly one instruction is replaced, nothing is
    /// inserted or shifted.
    pub fn patch(&mut self, slot: Slot, instr: Instruction, comment: impl Into<String>) {
        let index = self
            .pending
            .iter()
            .position(|&address| address == slot.address);
        // A Slot can only come from reserve_slot on some chunk; failing to
        // find it here means it came from a different chunk.
        let index = match index {
            Some(index) => index,
            None => panic!("slot {} was not reserved on this chunk", slot.address),
        };
        self.pending.swap_remove(index);
        self.code[slot.address] = instr;
        self.comments[slot.address] = comment.into();
    }

    /// The next address to be written.
    #[inline]
    pub fn current_address(&self) -> usize {
        self.code.len()
    }

    /// Attach a standalone comment line before the next instruction.
    pub fn comment_line(&mut self, text: impl Into<String>) {
        self.comment_lines.push((self.code.len(), text.into()));
    }

    /// Seal the chunk, verifying the backpatch discipline.
    ///
    /// Fails if any reserved slot was never patched; the stream must contain
    /// no leftover placeholders.
    pub fn finish(self) -> Result<CodeChunk, CompileError> {
        if let Some(&address) = self.pending.first() {
            return Err(CompileError::UnpatchedSlot { address });
        }
        Ok(self)
    }

    /// The finished instruction stream.
    pub fn instructions(&self) -> &[Instruction] {
        &self.code
    }

    /// The instruction at `address`, if in range.
    pub fn get(&self, address: usize) -> Option<&Instruction> {
        self.code.get(address)
    }

    /// The listing comment of the instruction at `address`.
    pub fn comment_at(&self, address: usize) -> Option<&str> {
        self.comments.get(address).map(String::as_str)
    }

    /// Standalone comment lines with the addresses they precede.
    pub fn comment_lines(&self) -> &[(usize, String)] {
        &self.comment_lines
    }

    /// Number of instructions in the chunk.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Whether the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}
