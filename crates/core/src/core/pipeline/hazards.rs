//! Hazard Detection and Forwarding.
//!
//! This module decides whether an operation sitting in Decode may advance to
//! Execute this cycle. It provides:
//! 1. **Data Hazards:** Read-after-write dependences on older register producers.
//! 2. **Control Hazards:** Conditional branches waiting on the nearest older
//!    condition-code writer.
//! 3. **Forwarding:** Bypass paths that cancel hazards against producers far
//!    enough down the pipe.
//! 4. **Ordering:** In-order issue; nothing passes an older operation stuck in Fetch.
//!
//! Every check is a full scan over all four stages and all lanes. Nothing is
//! cached between cycles.

use crate::core::pipeline::latches::{LatchArray, OpId, Stage, StageSlot};
use crate::trace::record::TraceRecord;

/// Enabled bypass paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Forwarding {
    /// Memory-stage forwarding: results from Execute (non-loads) and Memory reach Decode.
    pub mem: bool,
    /// Execute-stage forwarding: results from a Decode-resident non-load reach Decode.
    pub exe: bool,
}

impl Forwarding {
    /// Creates a forwarding configuration.
    pub const fn new(mem: bool, exe: bool) -> Self {
        Self { mem, exe }
    }

    /// Returns `true` if a hazard against `producer`, resident in `stage`, is
    /// resolved by a bypass.
    ///
    /// Loads only have their value after the memory access, so they cannot
    /// forward out of Decode or Execute.
    pub fn cancels(self, stage: Stage, producer: &TraceRecord) -> bool {
        match stage {
            Stage::Fetch => false,
            Stage::Decode => self.exe && !producer.is_load(),
            Stage::Execute => self.mem && !producer.is_load(),
            Stage::Memory => self.mem,
        }
    }
}

/// Dominant reason a Decode operation was held back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StallCause {
    /// Unresolved register dependence.
    Data,
    /// Conditional branch waiting for condition codes.
    Control,
    /// An older operation is stuck in Fetch.
    Ordering,
}

/// Outcome of a hazard check for one Decode operation.
///
/// Each field is an independent finding; any one of them stalls the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HazardReport {
    /// At least one uncancelled register dependence.
    pub data: bool,
    /// The nearest older condition-code writer is not yet bypassable.
    pub control: bool,
    /// An older operation in Fetch is stalled.
    pub ordering: bool,
}

impl HazardReport {
    /// Returns `true` if the operation must bubble.
    pub const fn stalled(&self) -> bool {
        self.data || self.control || self.ordering
    }

    /// The most specific reason for the stall, if any.
    pub const fn cause(&self) -> Option<StallCause> {
        if self.data {
            Some(StallCause::Data)
        } else if self.control {
            Some(StallCause::Control)
        } else if self.ordering {
            Some(StallCause::Ordering)
        } else {
            None
        }
    }
}

/// Returns `true` if `consumer` reads a register that `producer` writes.
///
/// Only sources marked needed and destinations marked needed participate.
pub fn reads_result_of(consumer: &TraceRecord, producer: &TraceRecord) -> bool {
    if !producer.dest_needed {
        return false;
    }
    (consumer.src1_needed && consumer.src1_reg == producer.dest)
        || (consumer.src2_needed && consumer.src2_reg == producer.dest)
}

/// Returns `true` if `consumer` is a conditional branch and `producer` sets the
/// condition codes.
pub fn waits_on_flags_of(consumer: &TraceRecord, producer: &TraceRecord) -> bool {
    consumer.is_cond_branch() && producer.cc_write
}

/// Returns `true` if any valid Fetch-stage operation older than `op_id` is stalled.
pub fn older_stalled(op_id: OpId, latches: &LatchArray) -> bool {
    latches
        .stage(Stage::Fetch)
        .iter()
        .any(|slot| slot.stall && slot.is_older_than(op_id))
}

/// Checks whether `candidate`, an operation in Decode, must stall this cycle.
///
/// Scans every lane of every stage. Register hazards are found pairwise and
/// ORed together after forwarding overrides. For a conditional branch, the
/// scan also records the youngest older condition-code writer; the control
/// hazard is decided against that writer alone (in whichever stages it is
/// currently resident), so a branch never waits on a stale flag producer.
///
/// # Arguments
///
/// * `candidate` - The Decode-stage slot under test.
/// * `latches` - Current pipeline contents, including decisions already made
///   for older lanes this cycle.
/// * `forwarding` - Enabled bypass paths.
pub fn check_stall(candidate: &StageSlot, latches: &LatchArray, forwarding: Forwarding) -> HazardReport {
    let consumer = &candidate.record;
    let mut report = HazardReport::default();
    let mut flag_producer: Option<OpId> = None;

    for lane in 0..latches.width() {
        for stage in Stage::ALL {
            let producer = latches.slot(stage, lane);
            if !producer.is_older_than(candidate.op_id) {
                continue;
            }

            if reads_result_of(consumer, &producer.record)
                && !forwarding.cancels(stage, &producer.record)
            {
                report.data = true;
            }

            if waits_on_flags_of(consumer, &producer.record) {
                flag_producer = flag_producer.max(Some(producer.op_id));
            }
        }
    }

    if let Some(writer) = flag_producer {
        report.control = latches
            .resident()
            .filter(|(_, _, slot)| slot.op_id == writer)
            .any(|(stage, _, slot)| !forwarding.cancels(stage, &slot.record));
    }

    report.ordering = older_stalled(candidate.op_id, latches);
    report
}
