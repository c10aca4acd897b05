//! Grade harvesting — the core classroom workflow

pub mod harvester;
pub mod score;

pub use harvester::GradeHarvester;
pub use score::{parse_score_text, Score, ScoreParseError};
