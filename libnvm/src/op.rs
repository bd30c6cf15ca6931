use std::{fmt::Display, str::FromStr};

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// How the bytes following an opcode are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    None,
    /// One byte, truncated from the operand value (`syscall`).
    Imm8,
    /// One byte slot index (`load`, `store`).
    Index8,
    /// Four bytes big-endian (`push`).
    Imm32,
    /// Four bytes big-endian, label or literal (`jmp`, `jz`, `jnz`, `call`).
    Addr32,
}

impl OperandKind {
    pub fn width(&self) -> usize {
        match self {
            OperandKind::None => 0,
            OperandKind::Imm8 | OperandKind::Index8 => 1,
            OperandKind::Imm32 | OperandKind::Addr32 => 4,
        }
    }

    /// Number of operand tokens the source line needs.
    pub fn arity(&self) -> usize {
        match self {
            OperandKind::None => 0,
            _ => 1,
        }
    }
}

#[allow(non_camel_case_types)]
#[derive(
    FromPrimitive,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Op {
    #[strum(to_string = "HLT", serialize = "HALT")]
    HLT = 0x00,
    NOP = 0x01,
    PUSH = 0x02,
    POP = 0x04,
    DUP = 0x05,
    SWAP = 0x06,

    ADD = 0x10,
    SUB = 0x11,
    MUL = 0x12,
    DIV = 0x13,
    MOD = 0x14,

    CMP = 0x20,
    EQ = 0x21,
    NEQ = 0x22,
    GT = 0x23,
    LT = 0x24,

    JMP = 0x30,
    JZ = 0x31,
    JNZ = 0x32,
    CALL = 0x33,
    RET = 0x34,

    LOAD = 0x40,
    STORE = 0x41,
    LOAD_ABS = 0x44,
    STORE_ABS = 0x45,

    SYSCALL = 0x50,
    BREAK = 0x51,
}

impl Op {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Op> {
        Op::from_str(mnemonic).ok()
    }

    pub fn from_u8(opcode: u8) -> Option<Op> {
        FromPrimitive::from_u8(opcode)
    }

    pub fn opcode(&self) -> u8 {
        *self as u8
    }

    pub fn operand(&self) -> OperandKind {
        match self {
            Op::PUSH => OperandKind::Imm32,
            Op::JMP | Op::JZ | Op::JNZ | Op::CALL => OperandKind::Addr32,
            Op::LOAD | Op::STORE => OperandKind::Index8,
            Op::SYSCALL => OperandKind::Imm8,
            _ => OperandKind::None,
        }
    }

    /// Encoded size in bytes, opcode included.
    pub fn size(&self) -> usize {
        1 + self.operand().width()
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn mnemonics_ignore_case() {
        assert_eq!(Op::from_mnemonic("push"), Some(Op::PUSH));
        assert_eq!(Op::from_mnemonic("PuSh"), Some(Op::PUSH));
        assert_eq!(Op::from_mnemonic("load_abs"), Some(Op::LOAD_ABS));
        assert_eq!(Op::from_mnemonic("frobnicate"), None);
    }

    #[test]
    fn halt_alias() {
        assert_eq!(Op::from_mnemonic("hlt"), Some(Op::HLT));
        assert_eq!(Op::from_mnemonic("halt"), Some(Op::HLT));
        assert_eq!(Op::HLT.to_string(), "hlt");
    }

    #[test]
    fn sizes() {
        assert_eq!(Op::NOP.size(), 1);
        assert_eq!(Op::PUSH.size(), 5);
        assert_eq!(Op::CALL.size(), 5);
        assert_eq!(Op::STORE.size(), 2);
        assert_eq!(Op::SYSCALL.size(), 2);
        assert_eq!(Op::STORE_ABS.size(), 1);
    }

    #[test]
    fn opcodes_round_trip_through_bytes() {
        for op in Op::iter() {
            assert_eq!(Op::from_u8(op.opcode()), Some(op));
            assert_eq!(Op::from_mnemonic(&op.to_string()), Some(op));
        }
        assert_eq!(Op::from_u8(0x03), None);
        assert_eq!(Op::from_u8(0x42), None);
    }
}
