//! Trace record definition.
//!
//! A record describes one dynamic instruction as the pipeline model sees it:
//! its operation class, which architectural registers it reads and writes,
//! whether it touches the condition codes, and for conditional branches the
//! direction it actually resolved to.
//!
//! On disk a record is 28 bytes, little-endian, laid out with natural C
//! alignment:
//!
//! | offset | size | field         |
//! |--------|------|---------------|
//! | 0      | 4    | `inst_addr`   |
//! | 4      | 1    | `op_type`     |
//! | 5      | 1    | `dest`        |
//! | 6      | 1    | `dest_needed` |
//! | 7      | 1    | `src1_reg`    |
//! | 8      | 1    | `src2_reg`    |
//! | 9      | 1    | `src1_needed` |
//! | 10     | 1    | `src2_needed` |
//! | 11     | 1    | `cc_read`     |
//! | 12     | 1    | `cc_write`    |
//! | 16     | 4    | `mem_addr`    |
//! | 20     | 1    | `mem_write`   |
//! | 21     | 1    | `mem_read`    |
//! | 22     | 1    | `br_dir`      |
//! | 24     | 4    | `br_target`   |

use std::fmt;

use crate::common::error::TraceError;

/// Size in bytes of one encoded trace record.
pub const RECORD_SIZE: usize = 28;

/// Operation class of a trace record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OpType {
    /// Integer arithmetic or logic.
    #[default]
    Alu,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Conditional branch.
    CondBranch,
    /// Anything else (jumps, system, no-ops).
    Other,
}

impl OpType {
    /// Decodes the on-disk op-type byte.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Alu),
            1 => Some(Self::Load),
            2 => Some(Self::Store),
            3 => Some(Self::CondBranch),
            4 => Some(Self::Other),
            _ => None,
        }
    }

    /// Returns the on-disk op-type byte.
    pub const fn code(self) -> u8 {
        match self {
            Self::Alu => 0,
            Self::Load => 1,
            Self::Store => 2,
            Self::CondBranch => 3,
            Self::Other => 4,
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Alu => "ALU",
            Self::Load => "LD",
            Self::Store => "ST",
            Self::CondBranch => "CBR",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// One normalized instruction from the trace.
///
/// Records are immutable once issued by a feed; the pipeline only copies them
/// from stage to stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceRecord {
    /// Instruction address (used to index the branch predictor).
    pub inst_addr: u32,
    /// Operation class.
    pub op_type: OpType,
    /// Destination register identifier.
    pub dest: u8,
    /// Whether `dest` is actually written.
    pub dest_needed: bool,
    /// First source register identifier.
    pub src1_reg: u8,
    /// Second source register identifier.
    pub src2_reg: u8,
    /// Whether `src1_reg` is actually read.
    pub src1_needed: bool,
    /// Whether `src2_reg` is actually read.
    pub src2_needed: bool,
    /// Whether the instruction reads the condition codes.
    pub cc_read: bool,
    /// Whether the instruction writes the condition codes.
    pub cc_write: bool,
    /// Effective address of a memory operation.
    pub mem_addr: u32,
    /// Whether the instruction writes memory.
    pub mem_write: bool,
    /// Whether the instruction reads memory.
    pub mem_read: bool,
    /// Resolved direction of a conditional branch (`true` = taken).
    pub br_dir: bool,
    /// Branch target address.
    pub br_target: u32,
}

impl TraceRecord {
    /// An all-zero ALU record that reads and writes nothing.
    pub const EMPTY: Self = Self {
        inst_addr: 0,
        op_type: OpType::Alu,
        dest: 0,
        dest_needed: false,
        src1_reg: 0,
        src2_reg: 0,
        src1_needed: false,
        src2_needed: false,
        cc_read: false,
        cc_write: false,
        mem_addr: 0,
        mem_write: false,
        mem_read: false,
        br_dir: false,
        br_target: 0,
    };

    /// Returns `true` for conditional branches.
    pub fn is_cond_branch(&self) -> bool {
        self.op_type == OpType::CondBranch
    }

    /// Returns `true` for loads.
    pub fn is_load(&self) -> bool {
        self.op_type == OpType::Load
    }

    /// Decodes one record.
    ///
    /// `offset` is only used to locate the record in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::UnknownOpType`] if the op-type byte is not one of
    /// the five known classes.
    pub fn decode(bytes: &[u8; RECORD_SIZE], offset: u64) -> Result<Self, TraceError> {
        let word = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        let flag = |at: usize| bytes[at] != 0;

        let op_type = OpType::from_code(bytes[4]).ok_or(TraceError::UnknownOpType {
            offset,
            code: bytes[4],
        })?;

        Ok(Self {
            inst_addr: word(0),
            op_type,
            dest: bytes[5],
            dest_needed: flag(6),
            src1_reg: bytes[7],
            src2_reg: bytes[8],
            src1_needed: flag(9),
            src2_needed: flag(10),
            cc_read: flag(11),
            cc_write: flag(12),
            mem_addr: word(16),
            mem_write: flag(20),
            mem_read: flag(21),
            br_dir: flag(22),
            br_target: word(24),
        })
    }

    /// Encodes the record in the on-disk layout. Padding bytes are zero.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        out[0..4].copy_from_slice(&self.inst_addr.to_le_bytes());
        out[4] = self.op_type.code();
        out[5] = self.dest;
        out[6] = u8::from(self.dest_needed);
        out[7] = self.src1_reg;
        out[8] = self.src2_reg;
        out[9] = u8::from(self.src1_needed);
        out[10] = u8::from(self.src2_needed);
        out[11] = u8::from(self.cc_read);
        out[12] = u8::from(self.cc_write);
        out[16..20].copy_from_slice(&self.mem_addr.to_le_bytes());
        out[20] = u8::from(self.mem_write);
        out[21] = u8::from(self.mem_read);
        out[22] = u8::from(self.br_dir);
        out[24..28].copy_from_slice(&self.br_target.to_le_bytes());
        out
    }
}
