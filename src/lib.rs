//! Conversational ESG / risk investor profiling.
//!
//! A scripted chat collects a user's investment attitudes, delegates
//! sentiment analysis and scoring to an OpenAI-compatible language model,
//! renders the resulting profile as a bar chart, and appends the raw answers
//! plus a traditional multiple-choice questionnaire to a spreadsheet row.
//!
//! The interesting part is [`flow`]: a small finite-state controller driving
//! the phases (fixed questions → news reactions with a needs-more-detail
//! retry loop → profile generation → optional questionnaire → persistence)
//! re-entrantly, one user turn at a time.

pub mod analysis;
pub mod channel;
pub mod chart;
pub mod config;
pub mod error;
pub mod flow;
pub mod llm;
pub mod store;
