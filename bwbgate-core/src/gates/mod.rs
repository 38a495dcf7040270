//! Rule gates: the three evaluation stages the orchestrator sequences.
//!
//! - Hard blocks: absolute disqualifiers, always all evaluated and recorded.
//! - Signal conditions: necessary trend alignment, consulted only after the
//!   hard blocks clear.
//! - Structure checks: defined-risk and asymmetry constraints on a supplied
//!   candidate.
//!
//! Within a stage there is no short-circuiting; stages themselves are
//! short-circuited by `engine::Engine`.

pub mod hard_blocks;
pub mod holiday;
pub mod signals;
pub mod structure;

pub use hard_blocks::evaluate_hard_blocks;
pub use holiday::{week_gate, WeekGate};
pub use signals::evaluate_signals;
pub use structure::validate_structure;
