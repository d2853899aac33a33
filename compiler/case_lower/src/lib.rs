//! Desugaring of `case`/`when` match statements.
//!
//! Replaces every `Match` statement of a tree with ordinary statements:
//! one hidden binding for the discriminant, hoisted declarations for every
//! synthetic binding, and a chain of conditionals whose tests destructure
//! the value as they check it.
//!
//! # Pipeline Position
//!
//! ```text
//! Parse → **Lower match statements** → print / evaluate
//! ```
//!
//! # Components
//!
//! - `scope`: fresh names, per-clause renaming, substitution into guards
//!   and bodies
//! - `patterns`: one pattern → one short-circuiting test-and-bind expression
//! - `chain`: clause list → `if`/`else if` chain or labeled blocks
//! - `lower`: whole-statement and whole-tree entry points
//! - `validate`: pattern checks without code generation
//!
//! # Debugging
//!
//! - `RUST_LOG=case_lower=debug`: one line per lowered statement
//! - `RUST_LOG=case_lower=trace`: every pattern node and fresh name

mod chain;
mod emit;
mod errors;
mod lower;
mod options;
mod patterns;
mod scope;
mod validate;

#[cfg(test)]
mod test_helpers;

pub use errors::{LowerError, LowerErrorKind, LowerResult};
pub use lower::{lower_match, lower_module, LowerStats, MatchSummary};
pub use options::{AbsencePolicy, ChainShape, LowerOptions};
pub use scope::{apply_substitutions, ClauseScope, NameGen, SubstTarget, Substitution};
pub use validate::validate;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
