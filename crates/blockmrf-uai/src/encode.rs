//! UAI `MARKOV` model writer.
//!
//! Layout:
//!
//! ```text
//! MARKOV
//! <block count>
//! <c1> <c2> ... <cN>
//! <rule count>
//! <k> <b1> ... <bk>          one line per rule, ascending block indices
//!
//! <entries>                  per rule: blank line, entry count,
//!  <p1> <p2> ...             then each potential preceded by a space
//! ```

use std::io::Write;

use blockmrf_core::{BlockModel, ConstraintBlockerStore, TermStore};
use tracing::info;

use crate::error::{ReasonerError, Result};
use crate::table::{build_table, rule_scope};

/// Format tag written on the first line.
pub const MARKOV: &str = "MARKOV";

/// Writes the store as a UAI Markov network.
///
/// # Errors
///
/// Returns [`ReasonerError::Precondition`] if `store` has no block structure.
pub fn write_model<W: Write>(writer: &mut W, store: &mut dyn TermStore) -> Result<()> {
    let blocker = store
        .as_constraint_blocker_mut()
        .ok_or_else(ReasonerError::not_blocker)?;
    write_blocker_model(writer, blocker)
}

/// Writes a constraint-blocker store as a UAI Markov network.
///
/// Enumeration writes every joint assignment onto the model; the truth
/// values held before the call are restored afterwards.
pub fn write_blocker_model<W: Write>(
    writer: &mut W,
    store: &mut ConstraintBlockerStore,
) -> Result<()> {
    let model = store.model();
    let saved = model.snapshot();
    let result = write_tables(writer, store);
    model.restore(&saved)?;
    result
}

/// Encodes the store into a `String`.
pub fn encode_to_string(store: &mut ConstraintBlockerStore) -> Result<String> {
    let mut buf = Vec::new();
    write_blocker_model(&mut buf, store)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_tables<W: Write>(writer: &mut W, store: &ConstraintBlockerStore) -> Result<()> {
    let model = store.model();
    let rules = store.rules();
    let io = ReasonerError::io;

    info!(
        event = "encode_start",
        blocks = model.block_count(),
        functions = rules.len(),
    );

    writeln!(writer, "{MARKOV}").map_err(io("writing model header"))?;
    writeln!(writer, "{}", model.block_count()).map_err(io("writing model header"))?;
    writeln!(writer, "{}", cardinality_line(model)).map_err(io("writing cardinalities"))?;

    writeln!(writer, "{}", rules.len()).map_err(io("writing function count"))?;
    for rule in rules.iter() {
        let scope = rule_scope(model, rule)?;
        write!(writer, "{}", scope.len()).map_err(io("writing function scope"))?;
        for block in &scope {
            write!(writer, " {}", block.index()).map_err(io("writing function scope"))?;
        }
        writeln!(writer).map_err(io("writing function scope"))?;
    }

    let mut total_entries = 0usize;
    for (index, rule) in rules.iter().enumerate() {
        let table = build_table(model, rule, index)?;
        total_entries = total_entries.saturating_add(table.entries());

        writeln!(writer).map_err(io("writing potential table"))?;
        writeln!(writer, "{}", table.entries()).map_err(io("writing potential table"))?;
        for p in table.potentials() {
            write!(writer, " {p:?}").map_err(io("writing potential table"))?;
        }
        writeln!(writer).map_err(io("writing potential table"))?;
    }

    info!(
        event = "encode_end",
        blocks = model.block_count(),
        functions = rules.len(),
        entries = total_entries,
    );
    Ok(())
}

fn cardinality_line(model: &BlockModel) -> String {
    model
        .blocks()
        .iter()
        .map(|b| b.cardinality().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
