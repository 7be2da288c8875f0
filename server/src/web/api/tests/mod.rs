
use super::*;
use crate::data_store::store_mock::StoreMock;
use crate::web::TriviaAppState;
use actix_web::{http, test, App};
use serde_json::{json, Value};
use std::sync::Arc;

fn make_state(questions: &[(&str, i32)]) -> (Arc<StoreMock>, TriviaAppState) {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(&store, questions);
    let state = TriviaAppState {
        store: store.clone(),
    };
    (store, state)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .configure(configure_app)
                .app_data(web::Data::new($state))
                .wrap(cors_headers()),
        )
        .await
    };
}

#[actix_web::test]
async fn test_list_questions_paginated() {
    let (_store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/questions").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: fyyur_trivia_api_types::QuestionsPageResponse = test::read_body_json(res).await;
    assert!(body.success);
    assert_eq!(body.questions.len(), 10);
    assert_eq!(body.total_questions, 12);
    assert_eq!(body.categories.len(), 6);
    assert_eq!(body.current_category, vec!["Art", "History", "Science"]);
    assert_eq!(
        body.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
        (1..=10).collect::<Vec<_>>()
    );

    let req = test::TestRequest::get()
        .uri("/questions?page=2")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: fyyur_trivia_api_types::QuestionsPageResponse = test::read_body_json(res).await;
    assert_eq!(
        body.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
        vec![11, 12]
    );
    assert_eq!(body.total_questions, 12);
    assert_eq!(body.current_category, vec!["Art", "Science"]);
}

#[actix_web::test]
async fn test_list_questions_out_of_range() {
    let (_store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    for uri in ["/questions?page=3", "/questions?page=0"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!(404));
        assert_eq!(body["message"], json!("resource not found"));
    }

    let req = test::TestRequest::get()
        .uri("/questions?page=abc")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!(400));
}

#[actix_web::test]
async fn test_list_categories() {
    let (_store, state) = make_state(&[]);
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/categories").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("Access-Control-Allow-Origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["categories"]["1"], json!("Science"));
    assert_eq!(body["categories"]["6"], json!("Sports"));
}

#[actix_web::test]
async fn test_list_categories_empty() {
    let state = TriviaAppState {
        store: Arc::new(StoreMock::default()),
    };
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/categories").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_category_questions() {
    let (_store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/categories/2/questions")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: fyyur_trivia_api_types::CategoryQuestionsResponse = test::read_body_json(res).await;
    assert_eq!(body.current_category, "Art");
    assert_eq!(body.total_questions, 4);
    assert!(body.questions.iter().all(|q| q.category == 2));

    // Existing category without questions and non-existing category
    for uri in ["/categories/3/questions", "/categories/99/questions"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn test_delete_question() {
    let (store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    let req = test::TestRequest::delete().uri("/questions/1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: fyyur_trivia_api_types::QuestionDeletedResponse = test::read_body_json(res).await;
    assert!(body.success);
    assert_eq!(body.deleted, 1);
    assert_eq!(body.total_questions, 11);
    assert_eq!(body.questions.len(), 10);
    assert!(body.questions.iter().all(|q| q.id != 1));
    assert!(store.data.lock().unwrap().questions.iter().all(|q| q.id != 1));

    let req = test::TestRequest::delete().uri("/questions/1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_question_store_failure() {
    let (store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    store.data.lock().unwrap().next_error = Some(crate::data_store::StoreError::InvalidInputData(
        "rejected".to_owned(),
    ));
    let req = test::TestRequest::delete().uri("/questions/2").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!(422));
    assert_eq!(store.data.lock().unwrap().questions.len(), 12);
}

#[actix_web::test]
async fn test_delete_question_transaction_conflict() {
    let (store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    store.data.lock().unwrap().next_error =
        Some(crate::data_store::StoreError::TransactionConflict);
    let req = test::TestRequest::delete().uri("/questions/3?page=2").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SERVICE_UNAVAILABLE);
    assert!(store.data.lock().unwrap().questions.iter().any(|q| q.id == 3));

    // Retrying succeeds and lists the remaining questions of the requested page
    let req = test::TestRequest::delete().uri("/questions/3?page=2").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: fyyur_trivia_api_types::QuestionDeletedResponse = test::read_body_json(res).await;
    assert_eq!(body.deleted, 3);
    assert_eq!(body.total_questions, 11);
    assert_eq!(
        body.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
        vec![12]
    );
}

#[actix_web::test]
async fn test_search_questions() {
    let (_store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/questions")
        .set_json(json!({"searchTerm": "WHO"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: fyyur_trivia_api_types::QuestionSearchResponse = test::read_body_json(res).await;
    assert!(body.total_questions > 0);
    assert_eq!(body.total_questions, body.questions.len());
    assert!(body
        .questions
        .iter()
        .all(|q| q.question.to_lowercase().contains("who")));

    let req = test::TestRequest::post()
        .uri("/questions")
        .set_json(json!({"searchTerm": "no such question"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_question() {
    let (store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/questions")
        .set_json(json!({
            "question": "What is the capital of Mongolia?",
            "answer": "Ulaanbaatar",
            "category": "3",
            "difficulty": 3,
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: fyyur_trivia_api_types::QuestionCreatedResponse = test::read_body_json(res).await;
    assert!(body.success);
    assert_eq!(body.created, 13);
    {
        let data = store.data.lock().unwrap();
        let created = data.questions.iter().find(|q| q.id == 13).unwrap();
        assert_eq!(created.answer, "Ulaanbaatar");
        assert_eq!(created.category, 3);
    }

    for invalid_body in [
        json!({"question": "Q?", "answer": "A", "category": 3, "difficulty": 9}),
        json!({"question": "Q?", "answer": "A", "category": 99, "difficulty": 1}),
        json!({"question": "", "answer": "A", "category": 3, "difficulty": 1}),
        json!({"answer": "A", "category": 3, "difficulty": 1}),
        json!({"searchTerm": ""}),
    ] {
        let req = test::TestRequest::post()
            .uri("/questions")
            .set_json(invalid_body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    }
    assert_eq!(store.data.lock().unwrap().questions.len(), 13);
}

#[actix_web::test]
async fn test_play_quiz() {
    let (_store, state) = make_state(&[
        ("Q1", 1),
        ("Q2", 1),
        ("Q3", 2),
        ("Q4", 2),
        ("Q5", 4),
    ]);
    let app = init_app!(state);

    for _ in 0..10 {
        let req = test::TestRequest::post()
            .uri("/quizzes")
            .set_json(json!({"quiz_category": {"id": 0}, "previous_questions": [1, 2, 3]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::OK);
        let body: fyyur_trivia_api_types::QuizResponse = test::read_body_json(res).await;
        let id = body.question.unwrap().id;
        assert!(id == 4 || id == 5);
    }

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({"quiz_category": {"id": 2, "type": "Art"}, "previous_questions": [3]}))
        .to_request();
    let res = test::call_service(&app, req).await;
    let body: fyyur_trivia_api_types::QuizResponse = test::read_body_json(res).await;
    assert_eq!(body.question.map(|q| q.id), Some(4));

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .set_json(json!({"quiz_category": {"id": 2}, "previous_questions": [3, 4]}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"success": true, "question": null}));

    for category in [3, 99] {
        let req = test::TestRequest::post()
            .uri("/quizzes")
            .set_json(json!({"quiz_category": {"id": category}, "previous_questions": []}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn test_error_responses() {
    let (store, state) = make_state(&sample_data::twelve_questions());
    let app = init_app!(state);

    let req = test::TestRequest::patch().uri("/categories").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({"success": false, "error": 405, "message": "method not allowed"})
    );

    let req = test::TestRequest::get().uri("/quizzes").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::METHOD_NOT_ALLOWED);

    let req = test::TestRequest::get().uri("/does/not/exist").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!(404));

    let req = test::TestRequest::post()
        .uri("/quizzes")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);

    let req = test::TestRequest::default()
        .method(http::Method::OPTIONS)
        .uri("/questions")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NO_CONTENT);
    assert!(res.headers().contains_key("Access-Control-Allow-Methods"));

    store.data.lock().unwrap().next_error = Some(crate::data_store::StoreError::ConnectionError(
        "connection refused".to_owned(),
    ));
    let req = test::TestRequest::get().uri("/categories").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(500));
}
