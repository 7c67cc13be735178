//! Career quiz matching.
//!
//! Every selected answer votes for one or more careers. Careers are ranked by
//! vote count and reported relative to the winner.

use std::collections::BTreeMap;

use crate::model::{CareerMatch, QuizBank, QuizResult};

/// Maximum number of careers reported.
pub const MAX_MATCHES: usize = 5;

/// Rank careers for a set of quiz answers (question index → option index).
///
/// Questions are visited in ascending index order, so the result depends only
/// on the contents of `answers`. Careers with equal counts keep the order in
/// which they were first seen.
pub fn score_careers(bank: &QuizBank, answers: &BTreeMap<usize, usize>) -> QuizResult {
    let mut counts: Vec<(&str, u32)> = Vec::new();

    for (&question_idx, &option_idx) in answers {
        let Some(question) = bank.questions.get(question_idx) else {
            tracing::debug!("answer for unknown question {question_idx} ignored");
            continue;
        };
        let Some(option) = question.options.get(option_idx) else {
            tracing::debug!(
                question = %question.id,
                "option {option_idx} out of range, answer ignored"
            );
            continue;
        };

        for career in &option.careers {
            match counts.iter_mut().find(|(id, _)| *id == career.as_str()) {
                Some((_, count)) => *count += 1,
                None => counts.push((career.as_str(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(MAX_MATCHES);

    let Some(&(_, top_count)) = counts.first() else {
        return QuizResult::default();
    };

    let matches = counts
        .into_iter()
        .map(|(id, count)| CareerMatch {
            career_id: id.to_string(),
            name: bank.career_name(id).to_string(),
            score: count,
            // every listed career got at least one vote, so never report 0%
            percentage: ((f64::from(count) / f64::from(top_count) * 100.0).round() as u8).max(1),
        })
        .collect();

    QuizResult { matches }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CareerProfile, Outlook, QuizOption, QuizQuestion};

    fn option(careers: &[&str]) -> QuizOption {
        QuizOption {
            text: careers.join("/"),
            careers: careers.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn question(id: &str, options: Vec<QuizOption>) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            category: "interests".into(),
            text: format!("Question {id}"),
            options,
        }
    }

    fn career(id: &str, name: &str) -> CareerProfile {
        CareerProfile {
            id: id.into(),
            name: name.into(),
            entrance_exam: String::new(),
            salary_range: String::new(),
            degree: String::new(),
            duration: String::new(),
            institutions: vec![],
            outlook: Outlook::Good,
        }
    }

    fn bank() -> QuizBank {
        QuizBank {
            questions: vec![
                question(
                    "q1",
                    vec![
                        option(&["medicine", "psychology"]),
                        option(&["software", "data-science"]),
                    ],
                ),
                question(
                    "q2",
                    vec![
                        option(&["engineering"]),
                        option(&["business"]),
                        option(&["medicine"]),
                    ],
                ),
                question(
                    "q3",
                    vec![
                        option(&["software", "engineering", "data-science", "business", "law", "arts"]),
                        option(&[]),
                    ],
                ),
            ],
            careers: vec![
                career("medicine", "Doctor (MBBS)"),
                career("psychology", "Psychologist"),
            ],
        }
    }

    fn answers(pairs: &[(usize, usize)]) -> BTreeMap<usize, usize> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn medicine_ranks_above_psychology() {
        let result = score_careers(&bank(), &answers(&[(0, 0), (1, 2)]));
        let ranked: Vec<(&str, u8)> = result
            .matches
            .iter()
            .map(|m| (m.career_id.as_str(), m.percentage))
            .collect();
        assert_eq!(ranked, vec![("medicine", 100), ("psychology", 50)]);
        assert_eq!(result.matches[0].name, "Doctor (MBBS)");
        assert_eq!(result.matches[0].score, 2);
    }

    #[test]
    fn no_answers_gives_empty_result() {
        let result = score_careers(&bank(), &BTreeMap::new());
        assert!(result.is_empty());
        assert!(result.top().is_none());
    }

    #[test]
    fn result_capped_at_five() {
        let result = score_careers(&bank(), &answers(&[(0, 1), (2, 0)]));
        assert_eq!(result.matches.len(), MAX_MATCHES);
        assert_eq!(result.top().unwrap().percentage, 100);
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let result = score_careers(&bank(), &answers(&[(0, 1), (2, 0)]));
        let ids: Vec<&str> = result.matches.iter().map(|m| m.career_id.as_str()).collect();
        // software and data-science have two votes each, then first-seen order
        assert_eq!(
            ids,
            vec!["software", "data-science", "engineering", "business", "law"]
        );
        assert_eq!(result.matches[2].percentage, 50);
    }

    #[test]
    fn unknown_career_falls_back_to_id() {
        let result = score_careers(&bank(), &answers(&[(1, 0)]));
        assert_eq!(result.matches[0].name, "engineering");
    }

    #[test]
    fn percentages_non_increasing() {
        let result = score_careers(&bank(), &answers(&[(0, 0), (1, 2), (2, 0)]));
        assert_eq!(result.top().unwrap().percentage, 100);
        for pair in result.matches.windows(2) {
            assert!(pair[0].percentage >= pair[1].percentage);
            assert!(pair[1].percentage > 0);
        }
    }

    #[test]
    fn out_of_range_answers_are_ignored() {
        let result = score_careers(&bank(), &answers(&[(0, 9), (42, 0), (1, 1)]));
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].career_id, "business");
    }

    #[test]
    fn option_without_careers_contributes_nothing() {
        let result = score_careers(&bank(), &answers(&[(2, 1)]));
        assert!(result.is_empty());
    }

    #[test]
    fn lopsided_votes_never_report_zero() {
        let mut questions: Vec<QuizQuestion> = (0..201)
            .map(|i| question(&format!("q{i}"), vec![option(&["a"])]))
            .collect();
        questions.push(question("last", vec![option(&["b"])]));
        let bank = QuizBank {
            questions,
            careers: vec![],
        };
        let all: BTreeMap<usize, usize> = (0..202).map(|i| (i, 0)).collect();

        let result = score_careers(&bank, &all);
        let ranked: Vec<(&str, u32, u8)> = result
            .matches
            .iter()
            .map(|m| (m.career_id.as_str(), m.score, m.percentage))
            .collect();
        assert_eq!(ranked, vec![("a", 201, 100), ("b", 1, 1)]);
    }
}
