use std::fmt::Display;

use thiserror::Error;

/// Problems in the source that never stop assembly. Most drop the line
/// from the output; an unresolved label still assembles, as a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmWarning {
    #[error("Unknown instruction '{0}'")]
    UnknownInstruction(String),
    #[error("'{mnemonic}' needs {expected} operand(s), found {found}")]
    MissingOperand {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("Unknown label '{label}', assembled as address {address:#X}")]
    UnresolvedLabel { label: String, address: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line_no: usize,
    pub warning: AsmWarning,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_no, self.warning)
    }
}
