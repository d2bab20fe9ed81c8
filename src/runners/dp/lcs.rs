//! Longest common subsequence

use crate::config::Limits;
use crate::runners::errors::{InvalidInput, RunnerError};
use crate::runners::{Category, Runner};
use crate::step::{step_kinds, Trace};
use serde::{Deserialize, Serialize};

pub const MAX_LEN: usize = 12;

step_kinds! {
    pub enum LcsKind {
        Init => "init",
        Match => "match",
        Mismatch => "mismatch",
        Traceback => "traceback",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsInput {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LcsState {
    pub a: String,
    pub b: String,
    pub table: Vec<Vec<Option<usize>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<(usize, usize)>,
    /// Cells the current value was read from
    pub dependencies: Vec<(usize, usize)>,
    /// Cells visited by the traceback
    pub path: Vec<(usize, usize)>,
    /// Subsequence recovered so far, in order
    pub subsequence: String,
}

pub struct LongestCommonSubsequence;

impl Runner for LongestCommonSubsequence {
    type Input = LcsInput;

    const ID: &'static str = "lcs";
    const NAME: &'static str = "Longest Common Subsequence";
    const CATEGORY: Category = Category::DynamicProgramming;
    const PSEUDOCODE: &'static [&'static str] = &[
        "L[i][0] = L[0][j] = 0",
        "for i = 1 to m",
        "  for j = 1 to n",
        "    if a[i] == b[j]",
        "      L[i][j] = L[i-1][j-1] + 1",
        "    else",
        "      L[i][j] = max(L[i-1][j], L[i][j-1])",
        "walk back from L[m][n] collecting matches",
        "return the collected characters",
    ];

    fn initial_input(&self) -> LcsInput {
        LcsInput {
            a: "ABCBDAB".to_string(),
            b: "BDCABA".to_string(),
        }
    }

    fn validate_input(&self, input: &LcsInput) -> Result<(), InvalidInput> {
        if input.a.chars().count() > MAX_LEN || input.b.chars().count() > MAX_LEN {
            return Err(InvalidInput::new(format!(
                "Strings can have at most {} characters",
                MAX_LEN
            )));
        }
        Ok(())
    }

    fn generate_steps_with(&self, input: &LcsInput, limits: &Limits) -> Result<Trace, RunnerError> {
        let mut trace = Trace::new(limits.max_steps);
        let a: Vec<char> = input.a.chars().collect();
        let b: Vec<char> = input.b.chars().collect();
        let (m, n) = (a.len(), b.len());

        let mut table = vec![vec![None; n + 1]; m + 1];
        for (i, row) in table.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                if i == 0 || j == 0 {
                    *cell = Some(0);
                }
            }
        }
        let mut state = LcsState {
            a: input.a.clone(),
            b: input.b.clone(),
            table,
            ..LcsState::default()
        };
        trace.push(
            LcsKind::Init,
            state.clone(),
            1,
            format!("Compare \"{}\" and \"{}\"", input.a, input.b),
        )?;

        let mut dp = vec![vec![0usize; n + 1]; m + 1];
        for i in 1..=m {
            for j in 1..=n {
                state.cell = Some((i, j));
                if a[i - 1] == b[j - 1] {
                    dp[i][j] = dp[i - 1][j - 1] + 1;
                    state.table[i][j] = Some(dp[i][j]);
                    state.dependencies = vec![(i - 1, j - 1)];
                    trace.push(
                        LcsKind::Match,
                        state.clone(),
                        5,
                        format!(
                            "'{}' matches: L[{}][{}] = L[{}][{}] + 1 = {}",
                            a[i - 1],
                            i,
                            j,
                            i - 1,
                            j - 1,
                            dp[i][j]
                        ),
                    )?;
                } else {
                    dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
                    state.table[i][j] = Some(dp[i][j]);
                    state.dependencies = vec![(i - 1, j), (i, j - 1)];
                    trace.push(
                        LcsKind::Mismatch,
                        state.clone(),
                        7,
                        format!(
                            "'{}' != '{}': L[{}][{}] = max({}, {}) = {}",
                            a[i - 1],
                            b[j - 1],
                            i,
                            j,
                            dp[i - 1][j],
                            dp[i][j - 1],
                            dp[i][j]
                        ),
                    )?;
                }
            }
        }

        state.dependencies.clear();
        let (mut i, mut j) = (m, n);
        let mut collected = Vec::new();
        while i > 0 && j > 0 {
            state.cell = Some((i, j));
            state.path.push((i, j));
            let description = if a[i - 1] == b[j - 1] {
                collected.push(a[i - 1]);
                let description = format!("'{}' is part of the subsequence", a[i - 1]);
                i -= 1;
                j -= 1;
                description
            } else if dp[i - 1][j] >= dp[i][j - 1] {
                i -= 1;
                format!("Move up to L[{}][{}]", i, j)
            } else {
                j -= 1;
                format!("Move left to L[{}][{}]", i, j)
            };
            state.subsequence = collected.iter().rev().collect();
            trace.push(LcsKind::Traceback, state.clone(), 8, description)?;
        }

        state.cell = None;
        let description = format!(
            "LCS is \"{}\" (length {})",
            state.subsequence,
            dp[m][n]
        );
        trace.push(LcsKind::Complete, state, 9, description)?;
        Ok(trace)
    }
}
