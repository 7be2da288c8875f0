use crate::data_store::models::Question;
use crate::data_store::{QuestionFilterBuilder, QuestionId};
use crate::web::api::APIError;
use crate::web::TriviaAppState;
use actix_web::{web, Responder};
use fyyur_trivia_api_types::{QuizRequest, QuizResponse};
use rand::seq::SliceRandom;
use rand::Rng;

/// Category id selecting questions of all categories
const ALL_CATEGORIES: i32 = 0;

pub async fn play_quiz(
    body: web::Json<QuizRequest>,
    state: web::Data<TriviaAppState>,
) -> Result<impl Responder, APIError> {
    let request = body.into_inner();
    let category_id = request.quiz_category.id;
    let pool = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        let mut filter = QuestionFilterBuilder::new();
        if category_id != ALL_CATEGORIES {
            store.get_category(category_id)?;
            filter = filter.in_category(category_id);
        }
        Ok(store.get_questions(filter.build())?)
    })
    .await??;

    if pool.is_empty() {
        return Err(APIError::NotExisting);
    }
    let question = choose_quiz_question(
        &pool,
        &request.previous_questions,
        &mut rand::thread_rng(),
    );

    Ok(web::Json(QuizResponse {
        success: true,
        question: question.cloned().map(|q| q.into()),
    }))
}

/// Draw a random question from `pool` which has not been served before.
///
/// All questions of the pool that are not in `previous_questions` are equally likely. Returns
/// `None` when every question of the pool has been served already.
fn choose_quiz_question<'a, R: Rng + ?Sized>(
    pool: &'a [Question],
    previous_questions: &[QuestionId],
    rng: &mut R,
) -> Option<&'a Question> {
    let eligible: Vec<&Question> = pool
        .iter()
        .filter(|q| !previous_questions.contains(&q.id))
        .collect();
    eligible.choose(rng).copied()
}
