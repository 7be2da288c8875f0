use crate::data_store::{CategoryId, QuestionFilterBuilder};
use crate::web::api::APIError;
use crate::web::TriviaAppState;
use actix_web::{web, Responder};
use fyyur_trivia_api_types::{CategoriesResponse, CategoryQuestionsResponse};

pub async fn list_categories(
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let categories = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_categories()?)
    })
    .await??;

    if categories.is_empty() {
        return Err(APIError::NotExisting);
    }
    Ok(web::Json(CategoriesResponse {
        success: true,
        categories: categories
            .into_iter()
            .map(|c| (c.id, c.category_type))
            .collect(),
    }))
}

pub async fn list_category_questions(
    path: web::Path<CategoryId>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let category_id = path.into_inner();
    let (category, questions) = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        let category = store.get_category(category_id)?;
        let questions = store.get_questions(
            QuestionFilterBuilder::new()
                .in_category(category_id)
                .build(),
        )?;
        Ok((category, questions))
    })
    .await??;

    if questions.is_empty() {
        return Err(APIError::NotExisting);
    }
    Ok(web::Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions: questions.into_iter().map(|q| q.into()).collect(),
        current_category: category.category_type,
    }))
}
