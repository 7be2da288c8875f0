use crate::data_store::models::{NewQuestion, Question};
use crate::data_store::{QuestionFilter, QuestionFilterBuilder, QuestionId, StoreError};
use crate::web::api::APIError;
use crate::web::util::{paginate, PageQuery};
use crate::web::TriviaAppState;
use actix_web::{web, Either, Responder};
use fyyur_trivia_api_types::{
    QuestionCreatedResponse, QuestionDeletedResponse, QuestionSearchResponse, QuestionsPageResponse,
    QuestionsPostBody,
};
use std::collections::BTreeSet;

pub async fn list_questions(
    query: web::Query<PageQuery>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let page = query.into_inner().page;
    let (questions, categories) = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_questions(QuestionFilter::default())?,
            store.get_categories()?,
        ))
    })
    .await??;

    let page_questions = paginate(&questions, page);
    if page_questions.is_empty() {
        return Err(APIError::NotExisting);
    }
    let categories: fyyur_trivia_api_types::CategoryMap = categories
        .into_iter()
        .map(|c| (c.id, c.category_type))
        .collect();
    let current_category: BTreeSet<&String> = page_questions
        .iter()
        .filter_map(|q| categories.get(&q.category))
        .collect();

    Ok(web::Json(QuestionsPageResponse {
        success: true,
        current_category: current_category.into_iter().cloned().collect(),
        questions: page_questions.iter().cloned().map(|q| q.into()).collect(),
        total_questions: questions.len(),
        categories,
    }))
}

pub async fn delete_question(
    path: web::Path<QuestionId>,
    query: web::Query<PageQuery>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let question_id = path.into_inner();
    let page = query.into_inner().page;
    let remaining_questions = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        store.delete_question(question_id).map_err(|e| match e {
            StoreError::NotExisting => APIError::NotExisting,
            StoreError::ConnectionError(_) | StoreError::TransactionConflict => e.into(),
            e => APIError::Unprocessable(e.to_string()),
        })
    })
    .await??;

    Ok(web::Json(QuestionDeletedResponse {
        success: true,
        deleted: question_id,
        questions: paginate(&remaining_questions, page)
            .iter()
            .cloned()
            .map(|q| q.into())
            .collect(),
        total_questions: remaining_questions.len(),
    }))
}

/// Handler for `POST /questions`
///
/// If the body contains a non-empty `searchTerm`, this is a search request. Otherwise, a new
/// question is created from the body.
pub async fn search_or_create_question(
    body: web::Json<QuestionsPostBody>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let body = body.into_inner();
    match body.search_term {
        Some(search_term) if !search_term.is_empty() => Ok(Either::Left(
            search_questions(search_term, state).await?,
        )),
        _ => Ok(Either::Right(create_question(body, state).await?)),
    }
}

async fn search_questions(
    search_term: String,
    state: web::Data<TriviaAppState>,
) -> Result<web::Json<QuestionSearchResponse>, APIError> {
    let questions = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_questions(
            QuestionFilterBuilder::new()
                .containing(&search_term)
                .build(),
        )?)
    })
    .await??;

    if questions.is_empty() {
        return Err(APIError::NotExisting);
    }
    Ok(web::Json(QuestionSearchResponse {
        success: true,
        total_questions: questions.len(),
        questions: questions.into_iter().map(Question::into).collect(),
    }))
}

async fn create_question(
    body: QuestionsPostBody,
    state: web::Data<TriviaAppState>,
) -> Result<web::Json<QuestionCreatedResponse>, APIError> {
    let new_question = validate_new_question(body).map_err(APIError::Unprocessable)?;
    let question_id = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.create_question(new_question)?)
    })
    .await??;

    Ok(web::Json(QuestionCreatedResponse {
        success: true,
        created: question_id,
    }))
}

/// Check the fields of a question creation request and convert them into a [NewQuestion].
///
/// The existence of the category is checked by the database.
fn validate_new_question(body: QuestionsPostBody) -> Result<NewQuestion, String> {
    fn non_empty(value: Option<String>, field: &str) -> Result<String, String> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            Some(_) => Err(format!("Field '{}' must not be empty", field)),
            None => Err(format!("Field '{}' is missing", field)),
        }
    }
    let question = non_empty(body.question, "question")?;
    let answer = non_empty(body.answer, "answer")?;
    let category = body
        .category
        .ok_or_else(|| "Field 'category' is missing".to_owned())?;
    let difficulty = body
        .difficulty
        .ok_or_else(|| "Field 'difficulty' is missing".to_owned())?;
    if !(1..=5).contains(&difficulty) {
        return Err("Field 'difficulty' must be between 1 and 5".to_owned());
    }
    Ok(NewQuestion {
        question,
        answer,
        category,
        difficulty,
    })
}
