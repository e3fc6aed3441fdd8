//! Stage latch array.
//!
//! This module defines the slots carried between the four pipeline stages:
//! Fetch → Decode → Execute → Memory, with retirement (writeback) reading the
//! Memory stage.
//!
//! 1. **Slots:** One [`StageSlot`] per lane per stage, holding a copy of the record.
//! 2. **Superscalar Support:** Every stage has exactly `width` lanes, fixed at construction.
//! 3. **Stage Shifting:** Lane-for-lane copies from one stage into the next.

use std::fmt;

use crate::trace::record::TraceRecord;

/// Monotonically increasing operation identifier assigned at fetch.
///
/// The first fetched operation receives id 1.
pub type OpId = u64;

/// One of the four latched pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Instruction fetch (IF).
    Fetch,
    /// Instruction decode (ID); hazard checks happen here.
    Decode,
    /// Execute (EX).
    Execute,
    /// Memory access (MA); operations here retire in the next writeback step.
    Memory,
}

impl Stage {
    /// Number of latched stages.
    pub const COUNT: usize = 4;

    /// All stages, front of the pipe first.
    pub const ALL: [Self; Self::COUNT] = [Self::Fetch, Self::Decode, Self::Execute, Self::Memory];

    /// Position of the stage in [`Stage::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Two-letter mnemonic used in state dumps.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Execute => "EX",
            Self::Memory => "MA",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One lane of one stage.
///
/// An invalid slot is a bubble; its other fields are stale and meaningless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageSlot {
    /// Whether the slot holds a live operation.
    pub valid: bool,
    /// Program-order identifier of the operation.
    pub op_id: OpId,
    /// The operation's trace record.
    pub record: TraceRecord,
    /// Backpressure flag, only meaningful in the Fetch stage: the operation
    /// could not enter Decode and must be retried next cycle.
    pub stall: bool,
    /// The operation is a conditional branch whose fetch-time prediction was wrong.
    pub mispredicted: bool,
}

impl StageSlot {
    /// An empty slot.
    pub const BUBBLE: Self = Self {
        valid: false,
        op_id: 0,
        record: TraceRecord::EMPTY,
        stall: false,
        mispredicted: false,
    };

    /// A freshly fetched, valid slot.
    pub const fn new(op_id: OpId, record: TraceRecord) -> Self {
        Self {
            valid: true,
            op_id,
            record,
            stall: false,
            mispredicted: false,
        }
    }

    /// Returns `true` if this slot holds a valid operation strictly older than `op_id`.
    pub const fn is_older_than(&self, op_id: OpId) -> bool {
        self.valid && self.op_id < op_id
    }
}

/// The `stage × width` array of in-flight operation slots.
#[derive(Debug, Clone)]
pub struct LatchArray {
    width: usize,
    stages: [Box<[StageSlot]>; Stage::COUNT],
}

impl LatchArray {
    /// Creates an array of `width` bubbles per stage.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero; callers validate the configuration first.
    pub fn new(width: usize) -> Self {
        assert!(width > 0, "latch array needs at least one lane");
        Self {
            width,
            stages: std::array::from_fn(|_| vec![StageSlot::BUBBLE; width].into_boxed_slice()),
        }
    }

    /// Number of lanes per stage.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// All lanes of `stage`.
    pub fn stage(&self, stage: Stage) -> &[StageSlot] {
        &self.stages[stage.index()]
    }

    /// The slot at (`stage`, `lane`).
    pub fn slot(&self, stage: Stage, lane: usize) -> &StageSlot {
        &self.stages[stage.index()][lane]
    }

    /// The slot at (`stage`, `lane`), mutably.
    pub fn slot_mut(&mut self, stage: Stage, lane: usize) -> &mut StageSlot {
        &mut self.stages[stage.index()][lane]
    }

    /// Copies every lane of `from` into the same lane of `to`.
    ///
    /// `to` must be a later stage than `from`; the engine shifts back to front
    /// so the source is always read before it is overwritten.
    pub fn advance(&mut self, from: Stage, to: Stage) {
        debug_assert!(from < to, "stages advance front to back");
        let (head, tail) = self.stages.split_at_mut(to.index());
        tail[0].copy_from_slice(&head[from.index()]);
    }

    /// Re-establishes program order in `stage`: valid slots first, ascending by
    /// op id, bubbles last.
    pub fn sort_stage(&mut self, stage: Stage) {
        self.stages[stage.index()].sort_by_key(|slot| (!slot.valid, slot.op_id));
    }

    /// Iterates over every valid slot as `(stage, lane, slot)`.
    pub fn resident(&self) -> impl Iterator<Item = (Stage, usize, &StageSlot)> + '_ {
        Stage::ALL.into_iter().flat_map(move |stage| {
            self.stage(stage)
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.valid)
                .map(move |(lane, slot)| (stage, lane, slot))
        })
    }

    /// Returns `true` if no stage holds a valid operation.
    pub fn is_empty(&self) -> bool {
        self.resident().next().is_none()
    }

    /// Returns `true` if valid op ids in `stage` are non-decreasing across lanes.
    pub fn is_ordered(&self, stage: Stage) -> bool {
        let mut last = None;
        self.stage(stage).iter().filter(|s| s.valid).all(|s| {
            let ok = last.is_none_or(|prev| prev <= s.op_id);
            last = Some(s.op_id);
            ok
        })
    }

    /// Returns `true` if no op id occupies two positions at once.
    pub fn has_unique_residency(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.resident().all(|(_, _, slot)| seen.insert(slot.op_id))
    }
}

impl fmt::Display for LatchArray {
    /// Renders one row per lane and one column per stage, showing op ids.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in Stage::ALL {
            write!(f, " {:>6} ", stage.label())?;
        }
        writeln!(f)?;
        for lane in 0..self.width {
            for stage in Stage::ALL {
                let slot = self.slot(stage, lane);
                if slot.valid {
                    let mark = if slot.stall { '*' } else { ' ' };
                    write!(f, " {:>6}{}", slot.op_id, mark)?;
                } else {
                    write!(f, " ------ ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
