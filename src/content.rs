//! Question banks
//!
//! Content is supplied by the surrounding application; the default banks
//! below are what the games ship with. A bank always holds at least one
//! question, and every choice question has exactly one correct option.

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Per-question validation used by [`QuestionBank::new`]
pub trait Validate {
    fn validate(&self, index: usize) -> Result<(), ContentError>;
}

/// Free-answer question; wrong options are generated around the answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericQuestion {
    pub prompt: String,
    pub answer: String,
}

impl NumericQuestion {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

impl Validate for NumericQuestion {
    fn validate(&self, index: usize) -> Result<(), ContentError> {
        if self.prompt.trim().is_empty() {
            return Err(ContentError::EmptyPrompt { index });
        }
        if self.answer.trim().is_empty() {
            return Err(ContentError::EmptyAnswer { index });
        }
        Ok(())
    }
}

/// Multiple-choice question; `answer` indexes into `options`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl ChoiceQuestion {
    pub fn new(prompt: &str, options: &[&str], answer: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
        }
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.answer
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.answer).map(String::as_str)
    }
}

impl Validate for ChoiceQuestion {
    fn validate(&self, index: usize) -> Result<(), ContentError> {
        if self.prompt.trim().is_empty() {
            return Err(ContentError::EmptyPrompt { index });
        }
        if self.options.len() < 2 {
            return Err(ContentError::TooFewOptions {
                index,
                got: self.options.len(),
            });
        }
        if self.answer >= self.options.len() {
            return Err(ContentError::AnswerOutOfRange {
                index,
                answer: self.answer,
                options: self.options.len(),
            });
        }
        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].contains(option) {
                return Err(ContentError::DuplicateOption {
                    index,
                    option: option.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Non-empty, validated list of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank<Q> {
    questions: Vec<Q>,
}

impl<Q: Validate> QuestionBank<Q> {
    pub fn new(questions: Vec<Q>) -> Result<Self, ContentError> {
        if questions.is_empty() {
            return Err(ContentError::EmptyBank);
        }
        for (i, q) in questions.iter().enumerate() {
            q.validate(i)?;
        }
        Ok(Self { questions })
    }

    /// Parse a JSON array of questions
    pub fn from_json(json: &str) -> Result<Self, ContentError>
    where
        Q: DeserializeOwned,
    {
        let questions: Vec<Q> = serde_json::from_str(json)?;
        let bank = Self::new(questions)?;
        log::info!("Loaded question bank with {} questions", bank.len());
        Ok(bank)
    }
}

impl<Q> QuestionBank<Q> {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for the `len` convention
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Q> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Q] {
        &self.questions
    }

    /// Question for a 1-based level, wrapping past the end of the bank
    pub fn cycled(&self, level: u32) -> &Q {
        let index = (level.saturating_sub(1) as usize) % self.questions.len();
        &self.questions[index]
    }

    /// Index of a uniformly random question
    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.questions.len())
    }
}

/// Arithmetic questions for the bubble shooter
pub fn math_bank() -> QuestionBank<NumericQuestion> {
    let questions = [
        ("12 + 7 = ?", "19"),
        ("Find 1/3 of 45", "15"),
        ("Area of rectangle (8 x 6)", "48"),
        ("Solve x+5=12 (x=?)", "7"),
        ("Multiply 14 × 6", "84"),
        ("Divide 144 ÷ 12", "12"),
        ("Find 25% of 200", "50"),
        ("Perimeter of square side 9", "36"),
        ("Simplify: 3/4 of 64", "48"),
        ("Solve: 5x = 35 (x=?)", "7"),
    ];
    QuestionBank {
        questions: questions
            .into_iter()
            .map(|(q, a)| NumericQuestion::new(q, a))
            .collect(),
    }
}

/// Date questions for the history shooter
pub fn history_bank() -> QuestionBank<ChoiceQuestion> {
    QuestionBank {
        questions: vec![
            ChoiceQuestion::new("When did India get Independence?", &["1857", "1947", "1950"], 1),
            ChoiceQuestion::new("When was the First World War started?", &["1914", "1939", "1857"], 0),
            ChoiceQuestion::new("When was the French Revolution?", &["1789", "1917", "1492"], 0),
            ChoiceQuestion::new("When did the American Revolution start?", &["1775", "1800", "1600"], 0),
        ],
    }
}

/// Science questions asked when the survival countdown runs out
pub fn science_bank() -> QuestionBank<ChoiceQuestion> {
    QuestionBank {
        questions: vec![
            ChoiceQuestion::new("What part of the plant makes food?", &["Roots", "Stem", "Leaves", "Flower"], 2),
            ChoiceQuestion::new("Which gas do we breathe in to survive?", &["Carbon Dioxide", "Oxygen", "Nitrogen", "Helium"], 1),
            ChoiceQuestion::new("What is the closest planet to the Sun?", &["Mercury", "Venus", "Earth", "Mars"], 0),
            ChoiceQuestion::new("Which force pulls things towards Earth?", &["Friction", "Magnetism", "Gravity", "Electricity"], 2),
            ChoiceQuestion::new("Water changes to ice at what temperature (°C)?", &["0", "50", "100", "25"], 0),
            ChoiceQuestion::new("Which organ pumps blood throughout our body?", &["Lungs", "Heart", "Kidney", "Liver"], 1),
            ChoiceQuestion::new("Earth completes one rotation in how many hours?", &["12", "24", "36", "48"], 1),
            ChoiceQuestion::new("Which planet is known as the Red Planet?", &["Venus", "Mars", "Jupiter", "Saturn"], 1),
            ChoiceQuestion::new("Which part of the human body helps us breathe?", &["Heart", "Brain", "Lungs", "Kidneys"], 2),
            ChoiceQuestion::new("The Sun is a type of?", &["Planet", "Star", "Comet", "Asteroid"], 1),
            ChoiceQuestion::new("Which sense organ helps us to smell?", &["Eyes", "Nose", "Ears", "Tongue"], 1),
            ChoiceQuestion::new("What do bees collect from flowers to make honey?", &["Pollen", "Nectar", "Seeds", "Leaves"], 1),
            ChoiceQuestion::new("Which gas is used by plants during photosynthesis?", &["Carbon Dioxide", "Oxygen", "Nitrogen", "Hydrogen"], 0),
            ChoiceQuestion::new("Which star is at the center of our solar system?", &["Polaris", "Alpha Centauri", "The Sun", "Sirius"], 2),
            ChoiceQuestion::new("How many legs does an insect usually have?", &["4", "6", "8", "10"], 1),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_banks_are_valid() {
        let math = math_bank();
        assert_eq!(math.len(), 10);
        QuestionBank::new(math.questions().to_vec()).unwrap();

        let history = history_bank();
        assert_eq!(history.len(), 4);
        QuestionBank::new(history.questions().to_vec()).unwrap();

        let science = science_bank();
        assert_eq!(science.len(), 15);
        QuestionBank::new(science.questions().to_vec()).unwrap();
    }

    #[test]
    fn test_correct_options() {
        let history = history_bank();
        assert_eq!(history.cycled(1).correct_option(), Some("1947"));
        assert_eq!(history.cycled(2).correct_option(), Some("1914"));
    }

    #[test]
    fn test_cycled_wraps() {
        let science = science_bank();
        assert_eq!(science.cycled(16), science.cycled(1));
        assert_eq!(science.cycled(17).prompt, "Which gas do we breathe in to survive?");
    }

    #[test]
    fn test_empty_bank_rejected() {
        let err = QuestionBank::<NumericQuestion>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ContentError::EmptyBank));
    }

    #[test]
    fn test_choice_validation() {
        let one = ChoiceQuestion::new("Q", &["A"], 0);
        assert!(matches!(
            QuestionBank::new(vec![one]).unwrap_err(),
            ContentError::TooFewOptions { index: 0, got: 1 }
        ));

        let out_of_range = ChoiceQuestion::new("Q", &["A", "B"], 2);
        assert!(matches!(
            QuestionBank::new(vec![out_of_range]).unwrap_err(),
            ContentError::AnswerOutOfRange { answer: 2, .. }
        ));

        let dup = ChoiceQuestion::new("Q", &["A", "B", "A"], 1);
        assert!(matches!(
            QuestionBank::new(vec![dup]).unwrap_err(),
            ContentError::DuplicateOption { .. }
        ));
    }

    #[test]
    fn test_from_json() {
        let bank = QuestionBank::<NumericQuestion>::from_json(
            r#"[{"prompt": "2 + 2 = ?", "answer": "4"}]"#,
        )
        .unwrap();
        assert_eq!(bank.cycled(3).answer, "4");

        let blank = QuestionBank::<NumericQuestion>::from_json(r#"[{"prompt": " ", "answer": "4"}]"#);
        assert!(matches!(blank.unwrap_err(), ContentError::EmptyPrompt { index: 0 }));

        let garbage = QuestionBank::<ChoiceQuestion>::from_json("{not json");
        assert!(matches!(garbage.unwrap_err(), ContentError::Parse(_)));
    }

    #[test]
    fn test_random_index_in_range() {
        let bank = math_bank();
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..100 {
            assert!(bank.random_index(&mut rng) < bank.len());
        }
    }
}
