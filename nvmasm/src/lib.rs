use std::path::{Path, PathBuf};

use anyhow::{ensure, Result};
use nvmdbg::Ndb;
use pass_one::pass_one;
use pass_two::pass_two;

pub use diagnostic::{AsmWarning, Diagnostic};
pub use labels::{Label, SymbolTable};
pub use line::{normalize_line, parse_program, Directive, Instruction, Line, SourceLine};
pub use literal::parse_number;

mod diagnostic;
mod labels;
mod line;
mod literal;
pub mod pass_one;
pub mod pass_two;

/// Extension given to assembled programs when no output name is passed.
pub const OUTPUT_EXTENSION: &str = "bin";

#[derive(Debug, Clone)]
pub struct Assembly {
    pub bytes: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: SymbolTable,
    pub debug: Ndb,
}

impl Assembly {
    /// Completion line, printed whatever the warning count or log level.
    pub fn summary(&self, output: &Path) -> String {
        format!(
            "Compilation successful! Wrote {} bytes to {}",
            self.bytes.len(),
            output.display()
        )
    }
}

/// Assemble a program from text.
///
/// # Errors
///
/// Only if the two passes disagree on where the program ends, which means
/// the assembler itself is broken. Problems in the source are returned as
/// [`Assembly::diagnostics`].
pub fn assemble_program(program_text: &str) -> Result<Assembly> {
    assemble_with_debug(program_text, "")
}

pub fn assemble_with_debug(program_text: &str, name: &str) -> Result<Assembly> {
    let lines = parse_program(program_text);
    let first = pass_one(&lines);
    let second = pass_two(name, &lines, &first);

    ensure!(
        first.final_address == second.final_address,
        "pass one ended at {:#06X} but pass two at {:#06X}",
        first.final_address,
        second.final_address
    );
    ensure!(
        second.bytes.len() == second.final_address as usize,
        "emitted {} bytes, expected {}",
        second.bytes.len(),
        second.final_address
    );

    Ok(Assembly {
        bytes: second.bytes,
        diagnostics: second.diagnostics,
        symbols: first.symbols,
        debug: second.debug,
    })
}

/// `prog.asm` becomes `prog.bin`, `prog` becomes `prog.bin`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}
