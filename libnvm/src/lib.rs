pub use load::{instruction_offsets, DecodeError, HEADER_LEN, MAGIC};
pub use op::{Op, OperandKind};
pub use syscall::Syscall;

pub mod load;
pub mod op;
pub mod syscall;
