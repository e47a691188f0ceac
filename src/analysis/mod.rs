//! LLM-delegated analysis.
//!
//! Two operations leave this module: per-reaction sentiment analysis and the
//! final four-score investor profile. Everything else (prompt wording, score
//! extraction) is an implementation detail of those two.

mod profiler;
mod prompts;
mod reaction;
mod scores;

pub use profiler::{InvestorProfile, ProfileError, Profiler};
pub use reaction::{ReactionAnalysis, ReactionAnalyzer};
pub use scores::{MissingScore, SCORE_LABELS, ScoreSet, extract_scores};
