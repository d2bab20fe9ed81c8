//! Tower of Hanoi

use crate::config::Limits;
use crate::runners::errors::{InvalidInput, RunnerError};
use crate::runners::{Category, Runner};
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MIN_DISKS: usize = 1;
pub const MAX_DISKS: usize = 8;

pub const ROD_NAMES: [&str; 3] = ["A", "B", "C"];

step_kinds! {
    pub enum HanoiKind {
        Init => "init",
        RecursiveCall => "recursive-call",
        BaseCase => "base-case",
        MoveLargest => "move-largest",
        Move => "move",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HanoiInput {
    pub num_disks: usize,
}

/// Which of the two recursive sub-calls is being announced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    First,
    Second,
}

/// One pending `hanoi(n, from, via, to)` activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HanoiFrame {
    pub n: usize,
    pub from: usize,
    pub via: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HanoiState {
    /// Disks per rod, bottom first
    pub rods: Vec<Vec<usize>>,
    pub moving_disk: Option<usize>,
    pub from_rod: Option<usize>,
    pub to_rod: Option<usize>,
    pub recursion_depth: usize,
    pub is_base_case: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_type: Option<CallType>,
    /// Disk count of the announced sub-call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    pub call_stack: Vec<HanoiFrame>,
}

struct HanoiTracer {
    trace: Trace,
    rods: Vec<Vec<usize>>,
    call_stack: Vec<HanoiFrame>,
}

impl HanoiTracer {
    fn snapshot(&self, depth: usize) -> HanoiState {
        HanoiState {
            rods: self.rods.clone(),
            recursion_depth: depth,
            call_stack: self.call_stack.clone(),
            ..HanoiState::default()
        }
    }

    fn top(&self, rod: usize) -> Option<usize> {
        self.rods[rod].last().copied()
    }

    /// Relocate the top disk and record the `move` step
    fn move_disk(
        &mut self,
        from: usize,
        to: usize,
        depth: usize,
        base: bool,
    ) -> Result<(), RunnerError> {
        let disk = self.rods[from].pop();
        if let Some(disk) = disk {
            self.rods[to].push(disk);
        }
        let mut state = self.snapshot(depth);
        state.moving_disk = disk;
        state.from_rod = Some(from);
        state.to_rod = Some(to);
        state.is_base_case = base;
        let description = format!(
            "Moved disk {} from {} to {}",
            disk.unwrap_or(0),
            ROD_NAMES[from],
            ROD_NAMES[to]
        );
        self.trace.push(HanoiKind::Move, state, if base { 4 } else { 7 }, description)
    }

    fn announce_call(
        &mut self,
        n: usize,
        from: usize,
        to: usize,
        depth: usize,
        call_type: CallType,
    ) -> Result<(), RunnerError> {
        let mut state = self.snapshot(depth);
        state.from_rod = Some(from);
        state.to_rod = Some(to);
        state.call_type = Some(call_type);
        state.n = Some(n);
        let code_line = match call_type {
            CallType::First => 6,
            CallType::Second => 8,
        };
        let description = format!(
            "Recursive: move {} disk{} from {} to {}",
            n,
            if n == 1 { "" } else { "s" },
            ROD_NAMES[from],
            ROD_NAMES[to]
        );
        self.trace.push(HanoiKind::RecursiveCall, state, code_line, description)
    }

    fn solve(&mut self, frame: HanoiFrame, depth: usize) -> Result<(), RunnerError> {
        self.call_stack.push(frame);
        let HanoiFrame { n, from, via, to } = frame;

        if n == 1 {
            let mut state = self.snapshot(depth);
            state.moving_disk = self.top(from);
            state.from_rod = Some(from);
            state.to_rod = Some(to);
            state.is_base_case = true;
            let description = format!(
                "Base case: move disk 1 from {} to {}",
                ROD_NAMES[from], ROD_NAMES[to]
            );
            self.trace.push(HanoiKind::BaseCase, state, 3, description)?;
            self.move_disk(from, to, depth, true)?;
        } else {
            self.announce_call(n - 1, from, via, depth, CallType::First)?;
            self.solve(HanoiFrame { n: n - 1, from, via: to, to: via }, depth + 1)?;

            let mut state = self.snapshot(depth);
            state.moving_disk = self.top(from);
            state.from_rod = Some(from);
            state.to_rod = Some(to);
            let description =
                format!("Move disk {} from {} to {}", n, ROD_NAMES[from], ROD_NAMES[to]);
            self.trace.push(HanoiKind::MoveLargest, state, 7, description)?;
            self.move_disk(from, to, depth, false)?;

            self.announce_call(n - 1, via, to, depth, CallType::Second)?;
            self.solve(HanoiFrame { n: n - 1, from: via, via: from, to }, depth + 1)?;
        }

        self.call_stack.pop();
        Ok(())
    }
}

pub struct Hanoi;

impl Runner for Hanoi {
    type Input = HanoiInput;

    const ID: &'static str = "hanoi";
    const NAME: &'static str = "Tower of Hanoi";
    const CATEGORY: Category = Category::Backtracking;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure hanoi(n, from, via, to)",
        "  if n == 1",
        "    base case:",
        "    move disk 1 from -> to",
        "    return",
        "  hanoi(n - 1, from, to, via)",
        "  move disk n from -> to",
        "  hanoi(n - 1, via, from, to)",
        "done",
    ];

    fn initial_input(&self) -> HanoiInput {
        HanoiInput { num_disks: 4 }
    }

    fn validate_input(&self, input: &HanoiInput) -> Result<(), InvalidInput> {
        if !(MIN_DISKS..=MAX_DISKS).contains(&input.num_disks) {
            return Err(InvalidInput::new(format!(
                "Number of disks must be between {} and {}",
                MIN_DISKS, MAX_DISKS
            )));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &HanoiInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let n = input.num_disks;
        let mut tracer = HanoiTracer {
            trace: Trace::new(limits.max_steps),
            rods: vec![(1..=n).rev().collect(), Vec::new(), Vec::new()],
            call_stack: Vec::new(),
        };

        let state = tracer.snapshot(0);
        tracer.trace.push(
            HanoiKind::Init,
            state,
            1,
            format!("Initialize Tower of Hanoi with {} disks on rod A", n),
        )?;

        if n > 0 {
            tracer.solve(HanoiFrame { n, from: 0, via: 1, to: 2 }, 0)?;
        }

        let state = tracer.snapshot(0);
        tracer.trace.push(
            HanoiKind::Complete,
            state,
            9,
            format!("Tower of Hanoi completed! All {} disks moved to rod C", n),
        )?;
        Ok(tracer.trace)
    }
}
