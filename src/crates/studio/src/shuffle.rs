//! Quiz option shuffling.
//!
//! Options are shuffled per question so repeated takes of the same quiz
//! don't reward position memory. The correct answer travels with its
//! text: we shuffle (option, original index) pairs and relocate the
//! correct index to wherever the original one landed.

use rand::Rng;

use crate::materials::{QuizData, QuizQuestion};

/// Shuffle every question's options using the thread-local RNG.
pub fn shuffle_quiz_options(quiz: QuizData) -> QuizData {
    shuffle_quiz_options_with(quiz, &mut rand::thread_rng())
}

/// Shuffle every question's options with the given RNG.
///
/// Questions whose correct index is out of range are passed through
/// untouched rather than scrambled into an unanswerable state.
pub fn shuffle_quiz_options_with<R: Rng>(quiz: QuizData, rng: &mut R) -> QuizData {
    let QuizData { title, questions } = quiz;
    let questions = questions
        .into_iter()
        .map(|question| shuffle_question(question, rng))
        .collect();

    QuizData { title, questions }
}

fn shuffle_question<R: Rng>(mut question: QuizQuestion, rng: &mut R) -> QuizQuestion {
    if question.correct_answer_index >= question.options.len() {
        return question;
    }

    // Fisher-Yates over (option, original index) pairs.
    let mut pairs: Vec<(String, usize)> = question
        .options
        .drain(..)
        .enumerate()
        .map(|(index, option)| (option, index))
        .collect();
    for i in (1..pairs.len()).rev() {
        let j = rng.gen_range(0..=i);
        pairs.swap(i, j);
    }

    // The original index is in range, so its pair is always present.
    let new_correct = pairs
        .iter()
        .position(|(_, original)| *original == question.correct_answer_index)
        .unwrap_or(question.correct_answer_index);

    question.options = pairs.into_iter().map(|(option, _)| option).collect();
    question.correct_answer_index = new_correct;
    question
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(options: Vec<&str>, correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: "Q".to_string(),
            options: options.into_iter().map(str::to_string).collect(),
            correct_answer_index: correct,
            explanation: String::new(),
        }
    }

    fn quiz(questions: Vec<QuizQuestion>) -> QuizData {
        QuizData {
            title: "Quiz".to_string(),
            questions,
        }
    }

    #[test]
    fn test_correct_text_preserved() {
        let original = quiz(vec![question(vec!["a", "b", "c", "d"], 2)]);
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = shuffle_quiz_options_with(original, &mut rng);
        let q = &shuffled.questions[0];
        assert_eq!(q.options[q.correct_answer_index], "c");
    }

    #[test]
    fn test_single_option_unchanged() {
        let original = quiz(vec![question(vec!["only"], 0)]);
        let mut rng = StdRng::seed_from_u64(1);
        let shuffled = shuffle_quiz_options_with(original, &mut rng);
        let q = &shuffled.questions[0];
        assert_eq!(q.options, vec!["only"]);
        assert_eq!(q.correct_answer_index, 0);
    }

    #[test]
    fn test_duplicate_options_keep_correct_text() {
        let original = quiz(vec![question(vec!["same", "same", "other"], 2)]);
        let mut rng = StdRng::seed_from_u64(3);
        let shuffled = shuffle_quiz_options_with(original, &mut rng);
        let q = &shuffled.questions[0];
        assert_eq!(q.options[q.correct_answer_index], "other");
    }

    #[test]
    fn test_out_of_range_index_passes_through() {
        let original = quiz(vec![question(vec!["a", "b"], 9)]);
        let mut rng = StdRng::seed_from_u64(5);
        let shuffled = shuffle_quiz_options_with(original, &mut rng);
        let q = &shuffled.questions[0];
        assert_eq!(q.options, vec!["a", "b"]);
        assert_eq!(q.correct_answer_index, 9);
    }

    proptest! {
        #[test]
        fn prop_option_multiset_preserved(
            options in proptest::collection::vec("[a-z]{1,8}", 1..12),
            correct_seed in any::<usize>(),
            rng_seed in any::<u64>(),
        ) {
            let correct = correct_seed % options.len();
            let original = quiz(vec![question(options.iter().map(String::as_str).collect(), correct)]);
            let mut rng = StdRng::seed_from_u64(rng_seed);
            let shuffled = shuffle_quiz_options_with(original.clone(), &mut rng);

            let mut before = original.questions[0].options.clone();
            let mut after = shuffled.questions[0].options.clone();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_correct_text_follows_index(
            options in proptest::collection::vec("[a-z]{1,8}", 1..12),
            correct_seed in any::<usize>(),
            rng_seed in any::<u64>(),
        ) {
            let correct = correct_seed % options.len();
            let expected = options[correct].clone();
            let original = quiz(vec![question(options.iter().map(String::as_str).collect(), correct)]);
            let mut rng = StdRng::seed_from_u64(rng_seed);
            let shuffled = shuffle_quiz_options_with(original, &mut rng);

            let q = &shuffled.questions[0];
            prop_assert!(q.correct_answer_index < q.options.len());
            prop_assert_eq!(&q.options[q.correct_answer_index], &expected);
        }
    }
}
