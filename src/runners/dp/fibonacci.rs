//! Fibonacci by memoized recursion

use crate::config::Limits;
use crate::runners::errors::{InvalidInput, RunnerError};
use crate::runners::{Category, Runner};
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MAX_N: usize = 30;

step_kinds! {
    pub enum FibonacciKind {
        Init => "init",
        Call => "call",
        BaseCase => "base-case",
        MemoHit => "memo-hit",
        Compute => "compute",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibonacciInput {
    pub n: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciState {
    pub n: usize,
    pub memo: Vec<Option<u64>>,
    /// Arguments of the active calls, outermost first
    pub call_stack: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    pub from_memo: bool,
    pub depth: usize,
}

struct FibonacciTracer {
    trace: Trace,
    n: usize,
    memo: Vec<Option<u64>>,
    call_stack: Vec<usize>,
}

impl FibonacciTracer {
    fn snapshot(&self, current: Option<usize>, value: Option<u64>, depth: usize) -> FibonacciState {
        FibonacciState {
            n: self.n,
            memo: self.memo.clone(),
            call_stack: self.call_stack.clone(),
            current,
            value,
            from_memo: false,
            depth,
        }
    }

    fn fib(&mut self, k: usize, depth: usize) -> Result<u64, RunnerError> {
        self.call_stack.push(k);
        let state = self.snapshot(Some(k), None, depth);
        self.trace.push(FibonacciKind::Call, state, 1, format!("Call fib({})", k))?;

        let value = if k <= 1 {
            let value = k as u64;
            self.memo[k] = Some(value);
            let state = self.snapshot(Some(k), Some(value), depth);
            self.trace.push(
                FibonacciKind::BaseCase,
                state,
                2,
                format!("Base case: fib({}) = {}", k, value),
            )?;
            value
        } else if let Some(value) = self.memo[k] {
            let mut state = self.snapshot(Some(k), Some(value), depth);
            state.from_memo = true;
            self.trace.push(
                FibonacciKind::MemoHit,
                state,
                3,
                format!("fib({}) = {} is already memoized", k, value),
            )?;
            value
        } else {
            let value = self.fib(k - 1, depth + 1)? + self.fib(k - 2, depth + 1)?;
            self.memo[k] = Some(value);
            let state = self.snapshot(Some(k), Some(value), depth);
            self.trace.push(
                FibonacciKind::Compute,
                state,
                5,
                format!("fib({}) = fib({}) + fib({}) = {}", k, k - 1, k - 2, value),
            )?;
            value
        };

        self.call_stack.pop();
        Ok(value)
    }
}

pub struct Fibonacci;

impl Runner for Fibonacci {
    type Input = FibonacciInput;

    const ID: &'static str = "fibonacci";
    const NAME: &'static str = "Fibonacci (memoized)";
    const CATEGORY: Category = Category::DynamicProgramming;
    const PSEUDOCODE: &'static [&'static str] = &[
        "procedure fib(k)",
        "  if k <= 1: return k",
        "  if memo[k] is set: return memo[k]",
        "  memo[k] = fib(k - 1) + fib(k - 2)",
        "  return memo[k]",
    ];

    fn initial_input(&self) -> FibonacciInput {
        FibonacciInput { n: 10 }
    }

    fn validate_input(&self, input: &FibonacciInput) -> Result<(), InvalidInput> {
        if input.n > MAX_N {
            return Err(InvalidInput::new(format!("n must be between 0 and {}", MAX_N)));
        }
        Ok(())
    }

    fn generate_steps_with(
        &self,
        input: &FibonacciInput,
        limits: &Limits,
    ) -> Result<Trace, RunnerError> {
        let n = input.n;
        let mut tracer = FibonacciTracer {
            trace: Trace::new(limits.max_steps),
            n,
            memo: vec![None; n + 1],
            call_stack: Vec::new(),
        };

        let state = tracer.snapshot(None, None, 0);
        tracer.trace.push(FibonacciKind::Init, state, 1, format!("Compute fib({})", n))?;

        let value = tracer.fib(n, 0)?;

        let state = tracer.snapshot(Some(n), Some(value), 0);
        tracer.trace.push(
            FibonacciKind::Complete,
            state,
            5,
            format!("fib({}) = {}", n, value),
        )?;
        Ok(tracer.trace)
    }
}
