//! Prompt templates sent to the model.
//!
//! User-facing text is Spanish, matching the deployed product. The profile
//! template instructs the model to embed the four scores in a fixed format;
//! `scores::extract_scores` depends on those labels.

/// Prompt for analyzing a single news reaction.
pub(crate) fn reaction_prompt(reaccion: &str) -> String {
    format!(
        "Reacción del inversor: {reaccion}\n\
         Analiza el sentimiento y la preocupación expresada.\n\
         Clasifica la preocupación principal en una de estas categorías:\n\
         - Ambiental\n\
         - Social\n\
         - Gobernanza\n\
         - Riesgo\n\
         \n\
         Si la respuesta es demasiado breve o poco clara, solicita más detalles \
         de manera específica.\n\
         \n\
         Luego, genera una pregunta de seguimiento enfocada en la categoría \
         detectada para profundizar en la opinión del inversor.\n"
    )
}

/// Prompt for generating the final investor profile from the joined reactions.
pub(crate) fn profile_prompt(analisis: &str) -> String {
    format!(
        "Análisis de respuestas: {analisis}\n\
         Genera un perfil detallado del inversor basado en sus respuestas, \
         enfocándote en los pilares ESG (Ambiental, Social y Gobernanza) y su \
         aversión al riesgo.\n\
         Asigna una puntuación de 0 a 100 para cada pilar ESG y para el riesgo, \
         donde 0 indica ninguna preocupación y 100 máxima preocupación o aversión.\n\
         Devuelve las 4 puntuaciones en formato: Ambiental: [puntuación], \
         Social: [puntuación], Gobernanza: [puntuación], Riesgo: [puntuación]\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_prompt_embeds_the_reaction() {
        let prompt = reaction_prompt("me preocupa el clima");
        assert!(prompt.starts_with("Reacción del inversor: me preocupa el clima"));
        assert!(prompt.contains("- Gobernanza"));
    }

    #[test]
    fn profile_prompt_requests_the_score_format() {
        let prompt = profile_prompt("reacción 1\nreacción 2");
        assert!(prompt.contains("Ambiental: [puntuación]"));
        assert!(prompt.contains("Riesgo: [puntuación]"));
    }
}
