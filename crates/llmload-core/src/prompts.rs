use rand::seq::SliceRandom;

/// Fixed prompt set; every request picks one at random.
pub const QUESTIONS: [&str; 5] = [
    "Why do we have kidneys?",
    "Why do we have a pituitary gland?",
    "Why do we have eyebrows?",
    "Why is the ocean salty?",
    "Why do we dream?",
];

pub fn random_prompt() -> &'static str {
    QUESTIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUESTIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_prompt_comes_from_the_fixed_set() {
        for _ in 0..32 {
            assert!(QUESTIONS.contains(&random_prompt()));
        }
    }
}
