use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub type QuestionId = i32;
pub type CategoryId = i32;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

/// Mapping from category id to the category's display label (its `type`)
pub type CategoryMap = BTreeMap<CategoryId, String>;

#[derive(Serialize, Deserialize, Debug)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct QuestionsPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    /// Labels of the categories referenced by the questions on this page
    #[serde(rename = "currentCategory")]
    pub current_category: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct QuestionDeletedResponse {
    pub success: bool,
    pub deleted: QuestionId,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct QuestionCreatedResponse {
    pub success: bool,
    pub created: QuestionId,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct QuestionSearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(rename = "currentCategory")]
    pub current_category: String,
}

/// Body of `POST /questions`
///
/// The endpoint is dual-purpose: If `searchTerm` is given (and not empty), the body is a search
/// request and all other fields are ignored. Otherwise, the remaining fields describe a new
/// question.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct QuestionsPostBody {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_int_or_numeric_string")]
    pub category: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_int_or_numeric_string")]
    pub difficulty: Option<i32>,
    #[serde(default, rename = "searchTerm", skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct QuizCategory {
    /// Category id. `0` selects questions of all categories.
    #[serde(deserialize_with = "deserialize_int_or_numeric_string")]
    pub id: CategoryId,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category_type: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct QuizRequest {
    pub quiz_category: QuizCategory,
    #[serde(default)]
    pub previous_questions: Vec<QuestionId>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct QuizResponse {
    pub success: bool,
    /// The next question to ask, or `None` if all questions of the category have been served
    pub question: Option<Question>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

/// The web frontend sends numeric form selections either as JSON numbers or as strings. Accept
/// both.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i32),
    String(String),
}

impl IntOrString {
    fn into_int<E: Error>(self) -> Result<i32, E> {
        match self {
            IntOrString::Int(v) => Ok(v),
            IntOrString::String(s) => s
                .trim()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Str(&s), &"an integer")),
        }
    }
}

fn deserialize_int_or_numeric_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    IntOrString::deserialize(deserializer)?.into_int()
}

fn deserialize_optional_int_or_numeric_string<'de, D>(
    deserializer: D,
) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IntOrString>::deserialize(deserializer)?
        .map(IntOrString::into_int)
        .transpose()
}
