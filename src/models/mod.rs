use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Question types the generation relay understands, in canonical order.
/// The allocator's rebalancing policy walks this order, so the derived
/// `Ord` is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FillInBlanks,
    FreeResponse,
    SelectAllThatApply,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::FillInBlanks,
        QuestionType::FreeResponse,
        QuestionType::SelectAllThatApply,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
            QuestionType::FillInBlanks => "fill-in-blanks",
            QuestionType::FreeResponse => "free-response",
            QuestionType::SelectAllThatApply => "select-all-that-apply",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple-choice" => Ok(QuestionType::MultipleChoice),
            "true-false" => Ok(QuestionType::TrueFalse),
            "fill-in-blanks" => Ok(QuestionType::FillInBlanks),
            "free-response" => Ok(QuestionType::FreeResponse),
            "select-all-that-apply" => Ok(QuestionType::SelectAllThatApply),
            other => Err(format!("Unknown question type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTypeCount {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub count: u32,
}

/// A selectable course. Built-ins are seeded at startup; user-added entries
/// are appended and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOption {
    pub id: String,
    pub name: String,
}

pub mod draft;
pub mod material;
pub mod quiz;
