//! Conversational flow controller.
//!
//! The finite-state machine behind the profiling chat: fixed questions, news
//! reactions with a needs-more-detail retry loop, LLM profile generation, the
//! optional structured questionnaire, and the final spreadsheet append. The
//! session is re-entrant: every user turn goes through `handle_turn` and
//! produces the bot events for that turn.

mod questionnaire;
mod script;

pub use questionnaire::{Question, SelectionError, parse_selection, questions};
pub use script::{FlowScript, Variant};

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::analysis::{InvestorProfile, ProfileError, Profiler, ReactionAnalyzer};
use crate::chart;
use crate::error::FlowError;
use crate::llm::LlmProvider;
use crate::store::{ResponseStore, SubmissionRow};

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Bot,
    User,
}

/// One line of the conversation.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// One bot-side event produced by a turn, in emission order.
#[derive(Debug, Clone)]
pub enum BotEvent {
    /// A chat message.
    Say(String),
    /// The rendered profile bar chart.
    Chart(String),
    /// A multiple-choice prompt; the channel renders the numbered options.
    AskChoice(&'static Question),
    /// The session is over; no further input is expected.
    Finished,
}

/// External collaborators the flow delegates to.
pub struct FlowDeps {
    pub analyzer: ReactionAnalyzer,
    pub profiler: Profiler,
    pub store: Arc<dyn ResponseStore>,
}

impl FlowDeps {
    pub fn new(llm: Arc<dyn LlmProvider>, store: Arc<dyn ResponseStore>) -> Self {
        Self {
            analyzer: ReactionAnalyzer::new(llm.clone()),
            profiler: Profiler::new(llm),
            store,
        }
    }
}

/// Linear phases of the flow.
///
/// `ProfilePending` persists only across failed profile attempts; a
/// successful generation moves on within the same turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FixedQuestions { index: usize },
    NewsReactions { index: usize },
    ProfilePending,
    Questionnaire { index: usize },
    Done,
}

/// Per-session conversation state.
pub struct FlowSession {
    id: Uuid,
    variant: Variant,
    script: &'static FlowScript,
    phase: Phase,
    transcript: Vec<TranscriptEntry>,
    answers: Vec<String>,
    reactions: Vec<String>,
    analyses: Vec<String>,
    profile: Option<InvestorProfile>,
    questionnaire: Vec<String>,
    submitted: bool,
}

impl FlowSession {
    /// Start a session for a variant.
    pub fn new(variant: Variant) -> Self {
        let script = variant.script();
        let id = Uuid::new_v4();
        info!(session = %id, variant = %variant, "flow session started");
        let phase = if script.news_first {
            Phase::NewsReactions { index: 0 }
        } else {
            Phase::FixedQuestions { index: 0 }
        };
        Self {
            id,
            variant,
            script,
            phase,
            transcript: Vec::new(),
            answers: Vec::new(),
            reactions: Vec::new(),
            analyses: Vec::new(),
            profile: None,
            questionnaire: Vec::new(),
            submitted: false,
        }
    }

    /// The opening render: intro banner plus the first prompt.
    ///
    /// Call once, before the first `handle_turn`.
    pub fn opening(&mut self) -> Vec<BotEvent> {
        let mut out = Vec::new();
        for line in self.script.intro {
            self.say(*line, &mut out);
        }
        match self.phase {
            Phase::FixedQuestions { index } => self.ask_question(index, &mut out),
            Phase::NewsReactions { index } => self.ask_news(index, &mut out),
            _ => {}
        }
        out
    }

    /// Process one user turn and produce the bot's events.
    ///
    /// Only transport-level LLM failures return an error; the session state
    /// is positioned so that repeating the turn retries the failed call.
    pub async fn handle_turn(
        &mut self,
        input: &str,
        deps: &FlowDeps,
    ) -> Result<Vec<BotEvent>, FlowError> {
        let input = input.trim();
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::User,
            text: input.to_string(),
        });

        let mut out = Vec::new();
        match self.phase {
            Phase::FixedQuestions { index } => {
                self.answers.push(input.to_string());
                let next = index + 1;
                if next < self.script.questions.len() {
                    self.phase = Phase::FixedQuestions { index: next };
                    self.ask_question(next, &mut out);
                } else {
                    self.after_fixed_questions(deps, &mut out).await?;
                }
            }
            Phase::NewsReactions { index } => {
                // Rejected attempts stay recorded; they end up in the
                // spreadsheet row alongside the accepted reaction.
                self.reactions.push(input.to_string());
                if word_count(input) < self.script.min_reaction_words {
                    self.say(self.script.reprompt, &mut out);
                } else {
                    let analysis = deps.analyzer.analyze(input).await?;
                    self.analyses.push(analysis.text);
                    let next = index + 1;
                    if next < self.script.news.len() {
                        self.phase = Phase::NewsReactions { index: next };
                        self.ask_news(next, &mut out);
                    } else {
                        self.after_news(deps, &mut out).await?;
                    }
                }
            }
            Phase::ProfilePending => {
                self.produce_profile(deps, &mut out).await?;
            }
            Phase::Questionnaire { index } => {
                let question = &questions()[index];
                match parse_selection(question, input) {
                    Ok(cell) => {
                        self.questionnaire.push(cell);
                        let next = index + 1;
                        if next < questions().len() {
                            self.phase = Phase::Questionnaire { index: next };
                            self.ask_choice(next, &mut out);
                        } else {
                            self.submit(deps, &mut out).await;
                            self.finish(&mut out);
                        }
                    }
                    Err(err) => {
                        self.say(err.to_string(), &mut out);
                        self.ask_choice(index, &mut out);
                    }
                }
            }
            Phase::Done => {
                self.say(self.script.completed, &mut out);
                out.push(BotEvent::Finished);
            }
        }
        Ok(out)
    }

    // ---- Accessors (used by channels and tests) ----

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn reactions(&self) -> &[String] {
        &self.reactions
    }

    pub fn analyses(&self) -> &[String] {
        &self.analyses
    }

    pub fn profile(&self) -> Option<&InvestorProfile> {
        self.profile.as_ref()
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    // ---- Phase transitions ----

    async fn after_fixed_questions(
        &mut self,
        deps: &FlowDeps,
        out: &mut Vec<BotEvent>,
    ) -> Result<(), FlowError> {
        if self.script.news_first {
            // News already ran; the fixed questions were the second block.
            self.produce_profile(deps, out).await
        } else {
            self.phase = Phase::NewsReactions { index: 0 };
            self.ask_news(0, out);
            Ok(())
        }
    }

    async fn after_news(
        &mut self,
        deps: &FlowDeps,
        out: &mut Vec<BotEvent>,
    ) -> Result<(), FlowError> {
        if self.script.news_first {
            self.phase = Phase::FixedQuestions { index: 0 };
            self.ask_question(0, out);
            Ok(())
        } else {
            self.produce_profile(deps, out).await
        }
    }

    /// Generate the profile and move on, or report and stay in
    /// `ProfilePending` so the next turn retries.
    async fn produce_profile(
        &mut self,
        deps: &FlowDeps,
        out: &mut Vec<BotEvent>,
    ) -> Result<(), FlowError> {
        self.phase = Phase::ProfilePending;
        match deps.profiler.generate(&self.reactions).await {
            Ok(profile) => {
                debug!(session = %self.id, scores = ?profile.scores, "profile extracted");
                self.say(
                    format!("Perfil del inversor: {}", profile.narrative),
                    out,
                );
                out.push(BotEvent::Chart(chart::render(&profile.scores)));
                self.profile = Some(profile);
                if self.script.questionnaire {
                    self.phase = Phase::Questionnaire { index: 0 };
                    self.say("Cuestionario Final de Perfilado", out);
                    self.ask_choice(0, out);
                } else {
                    self.submit(deps, out).await;
                    self.finish(out);
                }
                Ok(())
            }
            Err(ProfileError::Llm(err)) => Err(err.into()),
            Err(ProfileError::Extract(missing)) => {
                warn!(session = %self.id, %missing, "profile reply missing scores");
                self.say(
                    "No se pudieron extraer las puntuaciones del perfil. \
                     Escribe cualquier cosa para volver a intentarlo.",
                    out,
                );
                Ok(())
            }
        }
    }

    /// Append the completed session to the spreadsheet, best-effort.
    async fn submit(&mut self, deps: &FlowDeps, out: &mut Vec<BotEvent>) {
        // The profile is always generated before submission.
        let Some(profile) = &self.profile else {
            debug!(session = %self.id, "submit without profile, skipping");
            return;
        };
        let row = SubmissionRow {
            answers: self.answers.clone(),
            reactions: self.reactions.clone(),
            scores: profile.scores,
            questionnaire: self.questionnaire.clone(),
        };
        match deps.store.append(&row).await {
            Ok(()) => {
                info!(session = %self.id, "responses persisted");
                self.submitted = true;
                self.say("Respuestas enviadas y guardadas exitosamente", out);
            }
            Err(err) => {
                error!(session = %self.id, error = %err, "failed to persist responses");
                self.say(format!("❌ Error al guardar datos: {err}"), out);
            }
        }
    }

    fn finish(&mut self, out: &mut Vec<BotEvent>) {
        self.phase = Phase::Done;
        self.say(self.script.completed, out);
        out.push(BotEvent::Finished);
    }

    // ---- Event helpers ----

    fn say(&mut self, text: impl Into<String>, out: &mut Vec<BotEvent>) {
        let text = text.into();
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::Bot,
            text: text.clone(),
        });
        out.push(BotEvent::Say(text));
    }

    fn ask_question(&mut self, index: usize, out: &mut Vec<BotEvent>) {
        self.say(self.script.questions[index], out);
    }

    fn ask_news(&mut self, index: usize, out: &mut Vec<BotEvent>) {
        let prompt = format!("{} {}", self.script.news_prompt, self.script.news[index]);
        self.say(prompt, out);
    }

    fn ask_choice(&mut self, index: usize, out: &mut Vec<BotEvent>) {
        let question = &questions()[index];
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::Bot,
            text: question.text.to_string(),
        });
        out.push(BotEvent::AskChoice(question));
    }
}

fn word_count(input: &str) -> usize {
    input.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(word_count("  no   estoy  seguro "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn opening_starts_with_the_intro_banner() {
        let mut session = FlowSession::new(Variant::Full);
        let events = session.opening();
        // intro lines + first fixed question
        assert_eq!(events.len(), 3);
        assert!(matches!(session.phase(), Phase::FixedQuestions { index: 0 }));
    }

    #[test]
    fn news_first_variant_opens_with_a_headline() {
        let mut session = FlowSession::new(Variant::NewsFirst);
        let events = session.opening();
        assert!(matches!(session.phase(), Phase::NewsReactions { index: 0 }));
        let Some(BotEvent::Say(last)) = events.last() else {
            panic!("expected a Say event");
        };
        assert!(last.starts_with("¿Cómo reaccionas ante esta noticia?"));
    }
}
