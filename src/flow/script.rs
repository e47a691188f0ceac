//! Scripted content and flow variants.
//!
//! Three near-duplicate flows ship in production, differing only in wording,
//! phase ordering, and whether the structured questionnaire runs. They are
//! expressed here as presets of one parameterized script.

use std::fmt;

/// The five fixed investor questions, shared by every variant.
const INVESTOR_QUESTIONS: [&str; 5] = [
    "¿Cuál es tu objetivo principal al invertir?",
    "¿Cuál es tu horizonte temporal de inversión?",
    "¿Tienes experiencia previa invirtiendo en activos de mayor riesgo como \
     acciones, criptomonedas o fondos alternativos?",
    "¿Estás dispuesto a sacrificar parte de la rentabilidad potencial a cambio \
     de un impacto social o ambiental positivo?",
    "¿Qué opinas sobre el cambio climático?",
];

/// The five news headlines the user reacts to, shared by every variant.
const NEWS: [&str; 5] = [
    "Repsol, entre las 50 empresas que más responsabilidad histórica tienen \
     en el calentamiento global",
    "Amancio Ortega crea un fondo de 100 millones de euros para los afectados \
     de la dana",
    "Freshly Cosmetics despide a 52 empleados en Reus, el 18% de la plantilla",
    "Wall Street y los mercados globales caen ante la incertidumbre por la \
     guerra comercial y el temor a una recesión",
    "El mercado de criptomonedas se desploma: Bitcoin cae a 80.000 dólares, \
     las altcoins se hunden en medio de una frenética liquidación",
];

const REPROMPT: &str = "Podrías ampliar un poco más tu opinión?";

const COMPLETED: &str = "¡Gracias por completar tu perfil de inversor!";

/// Reactions shorter than this many words get the reprompt.
const MIN_REACTION_WORDS: usize = 5;

/// Everything a flow variant needs to run: the scripted content plus the
/// two structural switches (phase order, questionnaire).
#[derive(Debug)]
pub struct FlowScript {
    pub name: &'static str,
    pub intro: &'static [&'static str],
    pub questions: &'static [&'static str],
    pub news: &'static [&'static str],
    pub news_prompt: &'static str,
    pub reprompt: &'static str,
    pub completed: &'static str,
    pub min_reaction_words: usize,
    /// News reactions run before the fixed questions.
    pub news_first: bool,
    /// The structured questionnaire runs after the profile.
    pub questionnaire: bool,
}

static FULL: FlowScript = FlowScript {
    name: "full",
    intro: &[
        "Chatbot de Análisis de Inversor ESG",
        "Primero interactuarás con un chatbot para evaluar tu perfil ESG. \
         Al final, completarás un test tradicional de perfilado.",
    ],
    questions: &INVESTOR_QUESTIONS,
    news: &NEWS,
    news_prompt: "¿Qué opinas sobre esta noticia?",
    reprompt: REPROMPT,
    completed: COMPLETED,
    min_reaction_words: MIN_REACTION_WORDS,
    news_first: false,
    questionnaire: true,
};

static NEWS_FIRST: FlowScript = FlowScript {
    name: "news-first",
    intro: &[
        "Chatbot de Análisis de Inversor ESG",
        "Primero reaccionarás a una serie de noticias recientes y después \
         responderás unas preguntas sobre tu perfil inversor. Al final, \
         completarás un test tradicional de perfilado.",
    ],
    questions: &INVESTOR_QUESTIONS,
    news: &NEWS,
    news_prompt: "¿Cómo reaccionas ante esta noticia?",
    reprompt: REPROMPT,
    completed: COMPLETED,
    min_reaction_words: MIN_REACTION_WORDS,
    news_first: true,
    questionnaire: true,
};

static CHAT_ONLY: FlowScript = FlowScript {
    name: "chat-only",
    intro: &[
        "Chatbot de Análisis de Inversor ESG",
        "Interactuarás con un chatbot para evaluar tu perfil ESG y tu \
         aversión al riesgo.",
    ],
    questions: &INVESTOR_QUESTIONS,
    news: &NEWS,
    news_prompt: "¿Qué opinas sobre esta noticia?",
    reprompt: REPROMPT,
    completed: COMPLETED,
    min_reaction_words: MIN_REACTION_WORDS,
    news_first: false,
    questionnaire: false,
};

/// The three production flow variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Fixed questions, news reactions, profile, questionnaire, persist.
    Full,
    /// News reactions before the fixed questions; different prompt wording.
    NewsFirst,
    /// No structured questionnaire; the row carries chat data and scores only.
    ChatOnly,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Full, Variant::NewsFirst, Variant::ChatOnly];

    /// The script preset for this variant.
    pub fn script(self) -> &'static FlowScript {
        match self {
            Variant::Full => &FULL,
            Variant::NewsFirst => &NEWS_FIRST,
            Variant::ChatOnly => &CHAT_ONLY,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.script().name)
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Variant::Full),
            "news-first" | "news_first" | "newsfirst" => Ok(Variant::NewsFirst),
            "chat-only" | "chat_only" | "chatonly" => Ok(Variant::ChatOnly),
            _ => Err(format!(
                "invalid variant '{}', expected 'full', 'news-first' or 'chat-only'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_share_the_scripted_content() {
        for variant in Variant::ALL {
            let script = variant.script();
            assert_eq!(script.questions.len(), 5);
            assert_eq!(script.news.len(), 5);
            assert_eq!(script.min_reaction_words, 5);
        }
    }

    #[test]
    fn only_chat_only_skips_the_questionnaire() {
        assert!(Variant::Full.script().questionnaire);
        assert!(Variant::NewsFirst.script().questionnaire);
        assert!(!Variant::ChatOnly.script().questionnaire);
    }

    #[test]
    fn variant_round_trips_through_display_and_from_str() {
        for variant in Variant::ALL {
            let parsed: Variant = variant.to_string().parse().unwrap();
            assert_eq!(parsed, variant);
        }
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!("classic".parse::<Variant>().is_err());
    }
}
