//! UAI results reader.
//!
//! ```text
//! MPE                      task header, must match the requested task
//! 1                        solution marker: exactly one assignment
//! <N> <v0> <v1> ...        assignment line
//! 1                        solvers that refine iteratively repeat
//! <N> <v0> <v1> ...        marker + assignment; the last one wins
//! ```
//!
//! For `MAR` the assignment line holds, per variable, its cardinality
//! followed by that many marginal probabilities.

use std::io::BufRead;

use blockmrf_config::UaiTask;
use blockmrf_core::{BlockId, BlockModel, ConstraintBlockerStore, TermStore};
use tracing::{debug, info};

use crate::error::{FormatError, ReasonerError, Result};

/// Solution decoded from a results file.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// Category code per UAI variable (block).
    Mpe(Vec<usize>),

    /// Marginal distribution per UAI variable (block).
    Mar(Vec<Vec<f64>>),
}

/// Reads solver results for `task` and writes them onto the store's model.
///
/// # Errors
///
/// Returns [`ReasonerError::Precondition`] if `store` has no block structure,
/// and [`ReasonerError::Format`] for any deviation from the results format.
pub fn read_results<R: BufRead>(
    reader: R,
    task: UaiTask,
    store: &mut dyn TermStore,
) -> Result<Solution> {
    let blocker = store
        .as_constraint_blocker_mut()
        .ok_or_else(ReasonerError::not_blocker)?;
    read_blocker_results(reader, task, blocker)
}

/// Reads solver results for `task` into a constraint-blocker store.
pub fn read_blocker_results<R: BufRead>(
    reader: R,
    task: UaiTask,
    store: &mut ConstraintBlockerStore,
) -> Result<Solution> {
    let solution = parse_results(reader, task)?;
    apply_solution(store.model(), &solution)?;
    Ok(solution)
}

/// Parses a results stream without touching any model.
pub fn parse_results<R: BufRead>(reader: R, task: UaiTask) -> Result<Solution> {
    let mut lines = NumberedLines::new(reader);

    let (_, header) = lines.next_line()?.ok_or(FormatError::EmptyResults)?;
    if header.trim() != task.as_str() {
        return Err(FormatError::TaskMismatch {
            expected: task.as_str().to_string(),
            actual: header.trim().to_string(),
        }
        .into());
    }

    let mut last = None;
    let mut solutions = 0usize;
    while let Some((line, marker)) = lines.next_non_blank()? {
        if marker.trim() != "1" {
            return Err(FormatError::MultipleAssignments {
                line,
                marker: marker.trim().to_string(),
            }
            .into());
        }
        let assignment = lines
            .next_non_blank()?
            .ok_or(FormatError::MissingAssignment { line: line + 1 })?;
        last = Some(assignment);
        solutions += 1;
    }

    let (line, assignment) = last.ok_or(FormatError::MissingAssignment {
        line: lines.line_number() + 1,
    })?;
    debug!(event = "results_read", task = %task, solutions);

    let solution = match task {
        UaiTask::Mpe => Solution::Mpe(parse_mpe(line, &assignment)?),
        UaiTask::Mar => Solution::Mar(parse_mar(line, &assignment)?),
    };
    Ok(solution)
}

/// Writes a decoded solution onto `model`.
///
/// The whole solution is validated before any value changes.
pub fn apply_solution(model: &BlockModel, solution: &Solution) -> Result<()> {
    match solution {
        Solution::Mpe(categories) => apply_mpe(model, categories)?,
        Solution::Mar(marginals) => apply_mar(model, marginals)?,
    }
    info!(
        event = "decode_end",
        blocks = model.block_count(),
        variables = model.variable_count(),
    );
    Ok(())
}

fn apply_mpe(model: &BlockModel, categories: &[usize]) -> Result<()> {
    let blocks = model.blocks();
    if categories.len() > blocks.len() {
        return Err(FormatError::IndexOutOfRange {
            index: blocks.len(),
            len: blocks.len(),
        }
        .into());
    }
    if categories.len() < blocks.len() {
        return Err(FormatError::AssignmentLength {
            expected: blocks.len(),
            actual: categories.len(),
        }
        .into());
    }
    for (variable, (block, &category)) in blocks.iter().zip(categories).enumerate() {
        if category >= block.cardinality() {
            return Err(FormatError::CategoryOutOfRange {
                variable,
                category,
                cardinality: block.cardinality(),
            }
            .into());
        }
    }

    for (index, &category) in categories.iter().enumerate() {
        model.set_category(BlockId(index), category)?;
    }
    Ok(())
}

fn apply_mar(model: &BlockModel, marginals: &[Vec<f64>]) -> Result<()> {
    let blocks = model.blocks();
    if marginals.len() != blocks.len() {
        return Err(FormatError::AssignmentLength {
            expected: blocks.len(),
            actual: marginals.len(),
        }
        .into());
    }
    for (variable, (block, probs)) in blocks.iter().zip(marginals).enumerate() {
        if probs.len() != block.cardinality() {
            return Err(FormatError::CardinalityMismatch {
                variable,
                expected: block.cardinality(),
                actual: probs.len(),
            }
            .into());
        }
    }

    for (block, probs) in blocks.iter().zip(marginals) {
        for id in block.variables() {
            if let Some(category) = block.category_of(id) {
                model.set_value(id, probs[category].clamp(0.0, 1.0))?;
            }
        }
    }
    Ok(())
}

fn parse_mpe(line: usize, assignment: &str) -> Result<Vec<usize>> {
    let mut tokens = assignment.split_whitespace();
    // Leading count; only its well-formedness is checked.
    if let Some(count) = tokens.next() {
        parse_int(line, count)?;
    }
    tokens.map(|t| parse_int(line, t)).collect()
}

fn parse_mar(line: usize, assignment: &str) -> Result<Vec<Vec<f64>>> {
    let mut tokens = assignment.split_whitespace();
    let count = match tokens.next() {
        Some(t) => parse_int(line, t)?,
        None => return Err(FormatError::MissingAssignment { line }.into()),
    };

    let mut marginals = Vec::new();
    for variable in 0..count {
        let cardinality = match tokens.next() {
            Some(t) => parse_int(line, t)?,
            None => {
                return Err(FormatError::MalformedMarginals {
                    line,
                    reason: format!("missing cardinality for variable {variable}"),
                }
                .into())
            }
        };
        let mut probs = Vec::new();
        for _ in 0..cardinality {
            let token = tokens.next().ok_or_else(|| FormatError::MalformedMarginals {
                line,
                reason: format!("variable {variable} has fewer than {cardinality} marginals"),
            })?;
            probs.push(parse_real(line, token)?);
        }
        marginals.push(probs);
    }

    if let Some(extra) = tokens.next() {
        return Err(FormatError::MalformedMarginals {
            line,
            reason: format!("unexpected trailing token {extra:?}"),
        }
        .into());
    }
    Ok(marginals)
}

fn parse_int(line: usize, token: &str) -> Result<usize> {
    token.parse().map_err(|_| {
        FormatError::InvalidInteger {
            line,
            token: token.to_string(),
        }
        .into()
    })
}

fn parse_real(line: usize, token: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormatError::InvalidReal {
            line,
            token: token.to_string(),
        }
        .into()),
    }
}

/// Line reader that tracks 1-based line numbers.
struct NumberedLines<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    fn line_number(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        let mut buf = String::new();
        let read = self
            .reader
            .read_line(&mut buf)
            .map_err(ReasonerError::io("reading results"))?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some((self.line, buf)))
    }

    fn next_non_blank(&mut self) -> Result<Option<(usize, String)>> {
        while let Some((line, text)) = self.next_line()? {
            if !text.trim().is_empty() {
                return Ok(Some((line, text)));
            }
        }
        Ok(None)
    }
}
