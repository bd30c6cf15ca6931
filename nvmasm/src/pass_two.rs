use libnvm::{OperandKind, HEADER_LEN, MAGIC};
use log::trace;
use nvmdbg::Ndb;

use crate::{
    diagnostic::{AsmWarning, Diagnostic},
    labels::SymbolTable,
    line::{Directive, Instruction, Line, SourceLine},
    literal::{looks_numeric, low_byte, parse_number, parse_syscall},
    pass_one::FirstPass,
};

#[derive(Debug, Clone)]
pub struct SecondPass {
    pub bytes: Vec<u8>,
    pub final_address: u32,
    pub diagnostics: Vec<Diagnostic>,
    pub debug: Ndb,
}

struct PassTwo<'a> {
    symbols: &'a SymbolTable,
    bytes: Vec<u8>,
    address: u32,
    diagnostics: Vec<Diagnostic>,
    debug: Ndb,
}

impl<'a> PassTwo<'a> {
    fn new(name: &str, first: &'a FirstPass) -> Self {
        let mut debug = Ndb::new(name);
        for label in first.symbols.resolved() {
            debug.add_label(&label.name, label.address);
        }

        Self {
            symbols: &first.symbols,
            bytes: MAGIC.to_vec(),
            address: HEADER_LEN,
            diagnostics: Vec::new(),
            debug,
        }
    }

    fn assemble_lines(mut self, lines: &[SourceLine]) -> SecondPass {
        for source in lines {
            // Labels were bound in pass one
            if let Line::Instruction(ref instruction) = source.line {
                self.assemble_line(source, instruction);
            }
        }

        SecondPass {
            bytes: self.bytes,
            final_address: self.address,
            diagnostics: self.diagnostics,
            debug: self.debug,
        }
    }

    fn assemble_line(&mut self, source: &SourceLine, instruction: &Instruction) {
        let op = match instruction.directive() {
            Ok(Directive::Signature) => return,
            Ok(Directive::Op(op)) => op,
            Err(warning) => {
                self.warn(source, warning);
                return;
            }
        };

        let start = self.bytes.len();
        self.bytes.push(op.opcode());

        // directive() guarantees an operand is present when one is needed
        let operand = instruction.operand().unwrap_or_default();
        match op.operand() {
            OperandKind::None => {}
            OperandKind::Imm8 => self.bytes.push(parse_syscall(operand)),
            OperandKind::Index8 => self.bytes.push(low_byte(parse_number(operand))),
            OperandKind::Imm32 => self.push_word(parse_number(operand)),
            OperandKind::Addr32 => {
                let target = match self.symbols.resolve(operand) {
                    Some(address) => address,
                    None => {
                        let address = parse_number(operand);
                        if !looks_numeric(operand) {
                            self.warn(
                                source,
                                AsmWarning::UnresolvedLabel {
                                    label: operand.to_owned(),
                                    address,
                                },
                            );
                        }
                        address
                    }
                };
                self.push_word(target);
            }
        }

        let size = (self.bytes.len() - start) as u32;
        trace!(
            "{:#06X}: {:02X?} {}",
            self.address,
            &self.bytes[start..],
            source.text
        );
        self.debug
            .add_line(self.address, size, source.text.clone(), source.line_no);
        self.address += size;
    }

    fn warn(&mut self, source: &SourceLine, warning: AsmWarning) {
        self.diagnostics.push(Diagnostic {
            line_no: source.line_no,
            warning,
        });
    }

    fn push_word(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }
}

/// Emit the header and every instruction, resolving label operands
/// against the table built by pass one.
pub fn pass_two(name: &str, lines: &[SourceLine], first: &FirstPass) -> SecondPass {
    PassTwo::new(name, first).assemble_lines(lines)
}
