//! Rule implementations for the decision table.
//!
//! Listed in the priority order used by `DecisionTable::standard()`.

pub mod neutral_band;
pub mod strong_lexical;
pub mod strong_negative;
pub mod strong_positive;

pub use neutral_band::NeutralBandRule;
pub use strong_lexical::StrongLexicalRule;
pub use strong_negative::StrongNegativeRule;
pub use strong_positive::StrongPositiveRule;
