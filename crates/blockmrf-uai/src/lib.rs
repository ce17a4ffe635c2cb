//! UAI bridge for blockmrf.
//!
//! Serializes a block model and its ground rules into the UAI `MARKOV`
//! format, runs an external solver on it, and reads the solver's answer
//! back onto the model:
//! - [`table`]: potential tables over joint block assignments
//! - [`encode`]: the model writer
//! - [`decode`]: the results reader
//! - [`executable`]: process invocation and evidence-file handling
//! - [`UaiReasoner`]: all of the above behind one call
//!
//! Logging levels:
//! - **INFO**: encode/decode and solver lifecycle
//! - **DEBUG**: solver stdout/stderr, number of solutions read
//! - **TRACE**: per-rule table sizes

pub mod decode;
pub mod encode;
pub mod error;
pub mod executable;
pub mod reasoner;
pub mod table;

#[cfg(test)]
mod decode_tests;
#[cfg(test)]
mod executable_tests;

pub use blockmrf_config::UaiTask;
pub use decode::{parse_results, read_results, Solution};
pub use encode::{encode_to_string, write_model};
pub use error::{FormatError, ReasonerError};
pub use executable::{EvidenceFile, ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use reasoner::UaiReasoner;
pub use table::{build_table, PotentialTable};
