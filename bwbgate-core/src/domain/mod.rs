//! Domain types for the decision engine.

pub mod calendar;
pub mod chain;
pub mod context;
pub mod structure;

pub use calendar::HolidayCalendar;
pub use chain::{OptionQuote, OptionType};
pub use context::{EntryWindow, EvaluationContext, PricePoint, Timeframe};
pub use structure::{BwbStructure, LegAction, StructureKind, StructureLeg};

/// Symbol type alias
pub type Symbol = String;
