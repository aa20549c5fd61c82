//! Pure scoring of completed assessments.

use std::collections::{BTreeMap, HashMap};

use super::{PsychometricQuestionSet, TraitDimension};
use crate::domain::foundation::DomainError;

const STRENGTH_CUTOFF: f64 = 7.0;
const WEAKNESS_CUTOFF: f64 = 4.0;

/// Scored assessment, before it is bound to a user as an evaluation record.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitScores {
    /// Mean option score per dimension, 0-10.
    pub dimension_scores: BTreeMap<TraitDimension, f64>,
    /// Display names of dimensions at or above the strength cutoff,
    /// strongest first.
    pub strengths: Vec<String>,
    /// Display names of dimensions below the weakness cutoff, weakest first.
    pub weaknesses: Vec<String>,
    /// Weighted entrepreneurial fit, 0-100.
    pub fit_score: f64,
}

/// Scores a complete response set against its question set.
///
/// Responses map question id to the selected option id and must cover every
/// question exactly; anything else is an input validation error.
pub fn score_responses(
    set: &PsychometricQuestionSet,
    responses: &HashMap<String, String>,
) -> Result<TraitScores, DomainError> {
    if responses.len() != set.len() {
        return Err(DomainError::validation(
            "responses",
            format!(
                "expected {} responses, got {}",
                set.len(),
                responses.len()
            ),
        ));
    }

    let mut sums: BTreeMap<TraitDimension, (f64, u32)> = BTreeMap::new();
    for question in &set.questions {
        let option_id = responses.get(&question.id).ok_or_else(|| {
            DomainError::validation(
                "responses",
                format!("question '{}' is unanswered", question.id),
            )
        })?;
        let option = question.option(option_id).ok_or_else(|| {
            DomainError::validation(
                "responses",
                format!(
                    "question '{}' has no option '{}'",
                    question.id, option_id
                ),
            )
        })?;
        let entry = sums.entry(question.dimension).or_insert((0.0, 0));
        entry.0 += option.score;
        entry.1 += 1;
    }

    // Unknown extra keys would otherwise hide behind a matching count.
    for key in responses.keys() {
        if set.question(key).is_none() {
            return Err(DomainError::validation(
                "responses",
                format!("unknown question id '{}'", key),
            ));
        }
    }

    let mut dimension_scores = BTreeMap::new();
    for dimension in TraitDimension::ALL {
        let score = sums
            .get(&dimension)
            .map(|(sum, n)| sum / f64::from(*n))
            .unwrap_or(0.0);
        dimension_scores.insert(dimension, score);
    }

    let mut ranked: Vec<(TraitDimension, f64)> =
        dimension_scores.iter().map(|(d, s)| (*d, *s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let strengths = ranked
        .iter()
        .filter(|(_, s)| *s >= STRENGTH_CUTOFF)
        .map(|(d, _)| d.display_name().to_string())
        .collect();
    let weaknesses = ranked
        .iter()
        .rev()
        .filter(|(_, s)| *s < WEAKNESS_CUTOFF)
        .map(|(d, _)| d.display_name().to_string())
        .collect();

    let fit_score = dimension_scores
        .iter()
        .map(|(d, s)| s * d.fit_weight())
        .sum::<f64>()
        * 10.0;

    Ok(TraitScores {
        dimension_scores,
        strengths,
        weaknesses,
        fit_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AssessmentId;
    use crate::domain::psychometric::{plan_dimensions, AnswerOption, Question};

    fn set_with_uniform_options(count: usize) -> PsychometricQuestionSet {
        let questions = plan_dimensions(count)
            .unwrap()
            .into_iter()
            .enumerate()
            .map(|(i, dimension)| Question {
                id: format!("q{}", i + 1),
                dimension,
                text: format!("Question {}", i + 1),
                options: vec![
                    AnswerOption { id: "A".into(), text: "Low".into(), score: 2.0 },
                    AnswerOption { id: "B".into(), text: "Mid".into(), score: 5.0 },
                    AnswerOption { id: "C".into(), text: "High".into(), score: 8.0 },
                ],
            })
            .collect();
        PsychometricQuestionSet::new(AssessmentId::new(), questions).unwrap()
    }

    fn all_answers(set: &PsychometricQuestionSet, option: &str) -> HashMap<String, String> {
        set.questions
            .iter()
            .map(|q| (q.id.clone(), option.to_string()))
            .collect()
    }

    #[test]
    fn uniform_high_answers_make_every_dimension_a_strength() {
        let set = set_with_uniform_options(10);
        let scores = score_responses(&set, &all_answers(&set, "C")).unwrap();

        for (_, score) in &scores.dimension_scores {
            assert!((score - 8.0).abs() < 1e-9);
        }
        assert_eq!(scores.strengths.len(), TraitDimension::ALL.len());
        assert!(scores.weaknesses.is_empty());
        assert!((scores.fit_score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_low_answers_make_every_dimension_a_weakness() {
        let set = set_with_uniform_options(10);
        let scores = score_responses(&set, &all_answers(&set, "A")).unwrap();

        assert!(scores.strengths.is_empty());
        assert_eq!(scores.weaknesses.len(), TraitDimension::ALL.len());
        assert!((scores.fit_score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn response_count_mismatch_rejected() {
        let set = set_with_uniform_options(12);
        let mut responses = all_answers(&set, "B");
        responses.remove("q1");
        let err = score_responses(&set, &responses).unwrap_err();
        assert!(err.message().contains("expected 12 responses"));
    }

    #[test]
    fn unknown_question_id_rejected() {
        let set = set_with_uniform_options(10);
        let mut responses = all_answers(&set, "B");
        responses.remove("q1");
        responses.insert("q999".to_string(), "B".to_string());
        assert!(score_responses(&set, &responses).is_err());
    }

    #[test]
    fn unknown_option_id_rejected() {
        let set = set_with_uniform_options(10);
        let mut responses = all_answers(&set, "B");
        responses.insert("q1".to_string(), "Z".to_string());
        assert!(score_responses(&set, &responses).is_err());
    }

    #[test]
    fn scoring_is_deterministic() {
        let set = set_with_uniform_options(15);
        let responses = all_answers(&set, "B");
        let a = score_responses(&set, &responses).unwrap();
        let b = score_responses(&set, &responses).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn strengths_ranked_strongest_first() {
        let set = set_with_uniform_options(10);
        let mut responses = all_answers(&set, "C");
        // Leadership is q1 for a 10-question plan; drop it to mid-range.
        responses.insert("q1".to_string(), "B".to_string());
        let scores = score_responses(&set, &responses).unwrap();

        assert!(!scores
            .strengths
            .contains(&TraitDimension::Leadership.display_name().to_string()));
        assert_eq!(scores.strengths.len(), TraitDimension::ALL.len() - 1);
    }
}
