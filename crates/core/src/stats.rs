//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived CPI/IPC.
//! 2. **Branch prediction:** Branches seen, mispredictions, and misprediction rate.
//! 3. **Stalls:** Decode stall cycles by cause and fetch lanes lost to mispredictions.

use std::time::Instant;

use serde::Serialize;

use crate::core::pipeline::hazards::StallCause;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Number of operations retired from the Memory stage.
    pub instructions_retired: u64,

    /// Whether a branch predictor was configured for this run.
    pub predictor_configured: bool,
    /// Conditional branches presented to the predictor.
    pub branch_predictions: u64,
    /// Conditional branches whose prediction was wrong.
    pub branch_mispredictions: u64,

    /// Decode lane-cycles lost to register dependences.
    pub stalls_data: u64,
    /// Decode lane-cycles lost to branches waiting on condition codes.
    pub stalls_control: u64,
    /// Decode lane-cycles lost to an older operation stuck in Fetch.
    pub stalls_ordering: u64,
    /// Fetch lane-cycles bubbled while a mispredicted branch was unresolved.
    pub fetch_bubbles: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"stalls"`, `"branch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "branch"];

impl Default for SimStats {
    fn default() -> Self {
        Self::new(false)
    }
}

impl SimStats {
    /// Creates zeroed counters and starts the host wall clock.
    pub fn new(predictor_configured: bool) -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            predictor_configured,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_data: 0,
            stalls_control: 0,
            stalls_ordering: 0,
            fetch_bubbles: 0,
        }
    }

    /// Counts one Decode stall cycle under `cause`.
    pub const fn record_stall(&mut self, cause: StallCause) {
        match cause {
            StallCause::Data => self.stalls_data += 1,
            StallCause::Control => self.stalls_control += 1,
            StallCause::Ordering => self.stalls_ordering += 1,
        }
    }

    /// Total Decode stall lane-cycles of any cause.
    pub const fn decode_stalls(&self) -> u64 {
        self.stalls_data + self.stalls_control + self.stalls_ordering
    }

    /// Cycles per retired instruction (0 if nothing retired).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Retired instructions per cycle (0 if no cycles ran).
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Percentage of predicted branches that were mispredicted.
    pub fn mispredict_rate(&self) -> f64 {
        if self.branch_predictions == 0 {
            0.0
        } else {
            100.0 * self.branch_mispredictions as f64 / self.branch_predictions as f64
        }
    }

    /// Serializes the counters as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates any `serde_json` serialization error.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`). The branch
    /// section is skipped when no predictor was configured.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;

        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        if want("summary") {
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("stalls") {
            println!("STALL BREAKDOWN");
            let line = |name: &str, value: u64| {
                println!(
                    "  {name:<22} {value} ({:.2}%)",
                    (value as f64 / cyc) * 100.0
                );
            };
            line("stalls.data", self.stalls_data);
            line("stalls.control", self.stalls_control);
            line("stalls.ordering", self.stalls_ordering);
            line("fetch.bubbles", self.fetch_bubbles);
            println!("----------------------------------------------------------");
        }
        if want("branch") && self.predictor_configured {
            println!("BRANCH PREDICTION");
            println!("  bp.branches            {}", self.branch_predictions);
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.mispredict_rate     {:.2}%", self.mispredict_rate());
            println!("----------------------------------------------------------");
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
