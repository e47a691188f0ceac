//! The traditional multiple-choice profiling questionnaire.
//!
//! Twelve questions, answered one per turn in the chat rendering. The web
//! form the original product used posted them in one shot; the content and
//! the spreadsheet cells are identical.

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [&'static str],
    /// Accepts several selections, comma-separated.
    pub multi: bool,
}

static QUESTIONS: [Question; 12] = [
    Question {
        id: "2.1",
        text: "2.1. ¿Cuál es tu objetivo principal al invertir?",
        options: &[
            "Preservar el capital (bajo riesgo)",
            "Obtener rentabilidad moderada",
            "Maximizar la rentabilidad (alto riesgo)",
        ],
        multi: false,
    },
    Question {
        id: "2.2",
        text: "2.2. ¿Cuál es tu horizonte temporal de inversión?",
        options: &["Menos de 1 año", "Entre 1 y 5 años", "Más de 5 años"],
        multi: false,
    },
    Question {
        id: "3.1",
        text: "3.1. ¿Qué productos financieros conoces o has utilizado?",
        options: &[
            "Cuentas de ahorro",
            "Fondos de inversión",
            "Acciones",
            "Bonos",
            "Derivados (futuros, opciones, CFD)",
            "Criptomonedas",
        ],
        multi: true,
    },
    Question {
        id: "3.2",
        text: "3.2. ¿Qué significa que una inversión tenga alta volatilidad?",
        options: &[
            "Que tiene una rentabilidad garantizada",
            "Que su valor puede subir o bajar de forma significativa",
            "Que no se puede vender fácilmente",
        ],
        multi: false,
    },
    Question {
        id: "3.3",
        text: "3.3. ¿Qué ocurre si mantienes una inversión en renta variable \
               durante un largo periodo?",
        options: &[
            "Siempre pierdes dinero",
            "Se reduce el riesgo en comparación con el corto plazo",
            "No afecta en nada al riesgo",
        ],
        multi: false,
    },
    Question {
        id: "4.1",
        text: "4.1. ¿Con qué frecuencia realizas inversiones?",
        options: &[
            "Nunca",
            "Ocasionalmente (1 vez al año)",
            "Regularmente (varias veces al año)",
        ],
        multi: false,
    },
    Question {
        id: "4.2",
        text: "4.2. ¿Cuántos años llevas invirtiendo en productos financieros \
               complejos?",
        options: &["Ninguno", "Menos de 2 años", "Más de 2 años"],
        multi: false,
    },
    Question {
        id: "5.1",
        text: "5.1. ¿Qué harías si tu inversión pierde un 20% en un mes?",
        options: &[
            "Vendería todo inmediatamente",
            "Esperaría a ver si se recupera",
            "Invertiría más, aprovechando la caída",
        ],
        multi: false,
    },
    Question {
        id: "5.2",
        text: "5.2. ¿Cuál de las siguientes combinaciones preferirías?",
        options: &[
            "Rentabilidad esperada 2%, riesgo muy bajo",
            "Rentabilidad esperada 5%, riesgo moderado",
            "Rentabilidad esperada 10%, riesgo alto",
        ],
        multi: false,
    },
    Question {
        id: "6.1",
        text: "6.1. ¿Te interesa que tus inversiones consideren criterios de \
               sostenibilidad?",
        options: &["Sí", "No", "No lo sé"],
        multi: false,
    },
    Question {
        id: "6.2",
        text: "6.2. ¿Preferirías un fondo que invierte en empresas contra el \
               cambio climático aunque la rentabilidad sea menor?",
        options: &["Sí", "No"],
        multi: false,
    },
    Question {
        id: "6.3",
        text: "6.3. ¿Qué importancia das a no financiar sectores controvertidos?",
        options: &["Alta", "Media", "Baja"],
        multi: false,
    },
];

/// The questionnaire, in presentation and spreadsheet column order.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

/// Why a selection could not be parsed. The `Display` text is the in-chat
/// reprompt shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Elige al menos una opción.")]
    Empty,

    #[error("No entendí la selección. Responde con el número de una opción (1-{max}).")]
    NotANumber { max: usize },

    #[error("Responde con el número de una opción (1-{max}).")]
    OutOfRange { max: usize },
}

/// Parse a 1-based selection for `question`.
///
/// Multi-select questions accept comma-separated numbers; the stored cell is
/// the chosen option texts joined with ", ", duplicates removed.
pub fn parse_selection(question: &Question, input: &str) -> Result<String, SelectionError> {
    let max = question.options.len();
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::Empty);
    }

    let picks: Vec<&str> = if question.multi {
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        vec![trimmed]
    };
    if picks.is_empty() {
        return Err(SelectionError::Empty);
    }

    let mut selected: Vec<&'static str> = Vec::new();
    for pick in picks {
        let n: usize = pick
            .parse()
            .map_err(|_| SelectionError::NotANumber { max })?;
        if n == 0 || n > max {
            return Err(SelectionError::OutOfRange { max });
        }
        let option = question.options[n - 1];
        if !selected.contains(&option) {
            selected.push(option);
        }
    }

    Ok(selected.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single() -> &'static Question {
        &questions()[0]
    }

    fn multi() -> &'static Question {
        &questions()[2]
    }

    #[test]
    fn questionnaire_has_twelve_questions_one_multi() {
        assert_eq!(questions().len(), 12);
        let multis: Vec<_> = questions().iter().filter(|q| q.multi).collect();
        assert_eq!(multis.len(), 1);
        assert_eq!(multis[0].id, "3.1");
    }

    #[test]
    fn parses_a_single_selection() {
        let cell = parse_selection(single(), "2").unwrap();
        assert_eq!(cell, "Obtener rentabilidad moderada");
    }

    #[test]
    fn parses_a_multi_selection_in_pick_order() {
        let cell = parse_selection(multi(), "3, 1,6").unwrap();
        assert_eq!(cell, "Acciones, Cuentas de ahorro, Criptomonedas");
    }

    #[test]
    fn multi_selection_drops_duplicates() {
        let cell = parse_selection(multi(), "2,2,2").unwrap();
        assert_eq!(cell, "Fondos de inversión");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(parse_selection(single(), "   "), Err(SelectionError::Empty));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(
            parse_selection(single(), "la primera"),
            Err(SelectionError::NotANumber { max: 3 })
        );
    }

    #[test]
    fn rejects_out_of_range_selection() {
        assert_eq!(
            parse_selection(single(), "0"),
            Err(SelectionError::OutOfRange { max: 3 })
        );
        assert_eq!(
            parse_selection(single(), "4"),
            Err(SelectionError::OutOfRange { max: 3 })
        );
    }

    #[test]
    fn commas_only_apply_to_multi_questions() {
        assert_eq!(
            parse_selection(single(), "1,2"),
            Err(SelectionError::NotANumber { max: 3 })
        );
    }
}
