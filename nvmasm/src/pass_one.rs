use libnvm::HEADER_LEN;
use log::{debug, trace};

use crate::{
    labels::SymbolTable,
    line::{Line, SourceLine},
};

#[derive(Debug, Clone)]
pub struct FirstPass {
    pub symbols: SymbolTable,
    /// Address just past the last instruction
    pub final_address: u32,
}

/// Size every line and bind each label to the address of the instruction
/// that follows it. Lines that won't assemble take up no space here and
/// are reported in pass two.
pub fn pass_one(lines: &[SourceLine]) -> FirstPass {
    let mut symbols = SymbolTable::new();
    let mut address = HEADER_LEN;

    for source in lines {
        match &source.line {
            Line::Label(name) => {
                if symbols.define(name, address, source.line_no) {
                    debug!("label {} = {:#06X}", name, address);
                } else {
                    debug!(
                        "label {} redefined on line {}, keeping first definition",
                        name, source.line_no
                    );
                }
            }
            Line::Instruction(instruction) => {
                let size = instruction.size() as u32;
                trace!(
                    "pass one, line {}: {:#06X} +{}",
                    source.line_no,
                    address,
                    size
                );
                address += size;
            }
        }
    }

    FirstPass {
        symbols,
        final_address: address,
    }
}
