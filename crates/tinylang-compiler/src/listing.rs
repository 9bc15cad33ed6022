//! Human-readable TM assembly listing.
//!
//! One instruction per line, addressed from 0, with the instruction's
//! comment after a tab. Standalone comment lines (headers, trace banners)
//! are prefixed with `*` and interleaved before the address they annotate.
//!
//! ```text
//! * TINY compilation to TM code
//! * standard prelude
//!   0:     LD  6,0(0)	init memory pointer from cell 0
//!   1:     ST  0,0(0)	clear cell 0
//!   ...
//! ```

use crate::code::CodeChunk;

/// Render the listing for a finished chunk.
pub fn write_listing(chunk: &CodeChunk) -> String {
    render(chunk, None)
}

/// Render the listing with the source program echoed as a header.
pub fn write_listing_with_source(chunk: &CodeChunk, source: &str) -> String {
    render(chunk, Some(source))
}

fn render(chunk: &CodeChunk, source: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(source) = source {
        for (number, line) in source.lines().enumerate() {
            out.push_str(&format!("* {:4}: {}\n", number + 1, line));
        }
    }

    let mut comment_lines = chunk.comment_lines().iter().peekable();
    for (addr, instr) in chunk.instructions().iter().enumerate() {
        while let Some((at, text)) = comment_lines.peek() {
            if *at > addr {
                break;
            }
            out.push_str(&format!("* {}\n", text));
            comment_lines.next();
        }

        match chunk.comment_at(addr) {
            Some(comment) if !comment.is_empty() => {
                out.push_str(&format!("{:3}:  {}\t{}\n", addr, instr, comment));
            }
            _ => out.push_str(&format!("{:3}:  {}\n", addr, instr)),
        }
    }

    // Comment lines attached past the last instruction.
    for (_, text) in comment_lines {
        out.push_str(&format!("* {}\n", text));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinylang_core::tm::{Instruction, MemOp, Reg};

    #[test]
    fn interleaves_comment_lines_by_address() {
        let mut chunk = CodeChunk::new();
        chunk.comment_line("header");
        chunk.emit(Instruction::mem(MemOp::Ldc, Reg::Ac, 3, Reg::Ac), "three");
        chunk.comment_line("between");
        chunk.emit(Instruction::halt(), "stop");

        let listing = write_listing(&chunk);
        assert_eq!(
            listing,
            "* header\n  0:    LDC  0,3(0)\tthree\n* between\n  1:   HALT  0,0,0\tstop\n"
        );
    }

    #[test]
    fn instructions_without_comment_have_no_trailing_tab() {
        let mut chunk = CodeChunk::new();
        chunk.emit(Instruction::halt(), "");
        assert_eq!(write_listing(&chunk), "  0:   HALT  0,0,0\n");
    }

    #[test]
    fn source_echo_prefixes_numbered_lines() {
        let mut chunk = CodeChunk::new();
        chunk.emit(Instruction::halt(), "");
        let listing = write_listing_with_source(&chunk, "read x\nwrite x");
        assert!(listing.starts_with("*    1: read x\n*    2: write x\n"));
    }
}
