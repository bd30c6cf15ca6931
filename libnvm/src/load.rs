use thiserror::Error;

use crate::op::Op;

/// Every program starts with these four bytes: `NVM0`.
pub const MAGIC: [u8; 4] = [0x4E, 0x56, 0x4D, 0x30];
pub const HEADER_LEN: u32 = MAGIC.len() as u32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Missing NVM0 signature")]
    BadMagic,
    #[error("Unknown opcode {opcode:#04X} at {offset:#06X}")]
    UnknownOpcode { opcode: u8, offset: usize },
    #[error("{op} at {offset:#06X} needs {size} bytes, only {remaining} left")]
    Truncated {
        op: Op,
        offset: usize,
        size: usize,
        remaining: usize,
    },
}

/// Walk a program image from the header onwards and return the offset of
/// every instruction record, in order.
///
/// # Errors
///
/// If the image doesn't start with [`MAGIC`] or a record can't be decoded
pub fn instruction_offsets(program: &[u8]) -> Result<Vec<usize>, DecodeError> {
    if !program.starts_with(&MAGIC) {
        return Err(DecodeError::BadMagic);
    }

    let mut offsets = Vec::new();
    let mut offset = MAGIC.len();

    while offset < program.len() {
        let opcode = program[offset];
        let op = Op::from_u8(opcode).ok_or(DecodeError::UnknownOpcode { opcode, offset })?;
        let remaining = program.len() - offset;
        if op.size() > remaining {
            return Err(DecodeError::Truncated {
                op,
                offset,
                size: op.size(),
                remaining,
            });
        }
        offsets.push(offset);
        offset += op.size();
    }

    Ok(offsets)
}
