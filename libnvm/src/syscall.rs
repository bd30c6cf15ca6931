use std::str::FromStr;

use num_derive::FromPrimitive;
use strum_macros::{Display, EnumIter, EnumString};

/// System call numbers understood by `syscall <id>`. Names are matched
/// exactly, unlike instruction mnemonics.
#[derive(FromPrimitive, EnumString, EnumIter, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Syscall {
    Exit = 0x00,
    Exec = 0x01,
    Read = 0x02,
    Write = 0x03,
    Create = 0x04,
    Delete = 0x05,
    CapRequest = 0x06,
    CapSpawn = 0x07,
    DrvCall = 0x08,
    MsgSend = 0x09,
    // Spelled this way in existing sources.
    MsgRecieve = 0x0A,
    Sleep = 0x0B,
    Inb = 0x0C,
    Outb = 0x0D,
}

impl Syscall {
    pub fn from_name(name: &str) -> Option<Syscall> {
        Syscall::from_str(name).ok()
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }
}
