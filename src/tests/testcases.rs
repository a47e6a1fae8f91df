//! Router-level flow tests. These need a reachable MongoDB (MONGO_URI, or
//! localhost:27017), so they are ignored by default:
//! `cargo test -- --ignored` with a server running.

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use mongodb::bson::{doc, DateTime as BsonDateTime};

use super::test_utils::{
    add_choice, create_question, login, send_request, setup_test_app, RequestBody,
};
use crate::{
    models::question::Question,
    repositories::{question_repository::QuestionRepository, vote_repository::VoteRepository},
};

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn index_lists_only_published_questions_most_recent_first() {
    let (app, db) = setup_test_app().await;
    create_question(&db, "Past question 1.", -30, None).await;
    create_question(&db, "Past question 2.", -5, None).await;
    create_question(&db, "Future question.", 30, None).await;

    let response = send_request(&app, Method::GET, "/api/polls", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let list = response.body["data"]["latestQuestionList"].as_array().unwrap();
    let texts: Vec<&str> = list
        .iter()
        .map(|entry| entry["questionText"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["Past question 2.", "Past question 1."]);
    assert_eq!(response.body["data"]["noPollsAvailable"], false);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn index_reports_no_polls_when_none_are_published() {
    let (app, db) = setup_test_app().await;
    create_question(&db, "Future question.", 30, None).await;

    let response = send_request(&app, Method::GET, "/api/polls", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["noPollsAvailable"], true);
    assert!(response.body["data"]["latestQuestionList"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn index_page_size_caps_the_listing() {
    let (_app, db) = setup_test_app().await;
    for day in 1..=3 {
        create_question(&db, &format!("Question {day}."), -day, None).await;
    }

    let questions = QuestionRepository::new(db.clone())
        .latest_published(Utc::now(), Some(2))
        .await
        .unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].question_text, "Question 1.");
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn detail_redirects_for_future_question() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Future question.", 5, None).await;

    let response = send_request(
        &app,
        Method::GET,
        &format!("/api/polls/{}", question.question_id),
        None,
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/api/polls"));
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn detail_renders_past_question_with_choices() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Past question.", -5, None).await;
    add_choice(&db, &question.question_id, "Yes").await;
    add_choice(&db, &question.question_id, "No").await;

    let response = send_request(
        &app,
        Method::GET,
        &format!("/api/polls/{}", question.question_id),
        None,
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["questionText"], "Past question.");
    assert_eq!(response.body["data"]["choices"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn detail_redirects_when_voting_has_concluded() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Concluded question.", -10, Some(-1)).await;

    let response = send_request(
        &app,
        Method::GET,
        &format!("/api/polls/{}", question.question_id),
        None,
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/api/polls"));
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn redirect_flash_surfaces_on_the_index() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Future question.", 5, None).await;

    let redirect = send_request(
        &app,
        Method::GET,
        &format!("/api/polls/{}", question.question_id),
        None,
        None,
    )
    .await;
    let cookie = redirect.set_cookie.expect("flash should set a session cookie");

    let index = send_request(&app, Method::GET, "/api/polls", Some(&cookie), None).await;
    let messages = index.body["data"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["level"], "error");

    // Drained on read: a second fetch has no messages left.
    let again = send_request(&app, Method::GET, "/api/polls", Some(&cookie), None).await;
    assert!(again.body["data"]["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn vote_requires_login() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Open question.", -1, None).await;
    let choice = add_choice(&db, &question.question_id, "Yes").await;

    let response = send_request(
        &app,
        Method::POST,
        &format!("/api/polls/{}/vote", question.question_id),
        None,
        Some(RequestBody::Form(format!("choice={}", choice.choice_id))),
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/auth/login"));
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn revoting_updates_the_single_stored_vote() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Open question.", -1, None).await;
    let first = add_choice(&db, &question.question_id, "Yes").await;
    let second = add_choice(&db, &question.question_id, "No").await;
    let cookie = login(&app, "alice").await;

    let vote_uri = format!("/api/polls/{}/vote", question.question_id);
    let response = send_request(
        &app,
        Method::POST,
        &vote_uri,
        Some(&cookie),
        Some(RequestBody::Form(format!("choice={}", first.choice_id))),
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(format!("/api/polls/{}/results", question.question_id).as_str())
    );

    let response = send_request(
        &app,
        Method::POST,
        &vote_uri,
        Some(&cookie),
        Some(RequestBody::Form(format!("choice={}", second.choice_id))),
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    // Exactly one vote survives, holding the second choice.
    let votes = db
        .collection::<crate::models::vote::Vote>("votes")
        .count_documents(doc! { "question_id": &question.question_id })
        .await
        .unwrap();
    assert_eq!(votes, 1);

    let vote_repository = VoteRepository::new(db.clone());
    assert_eq!(vote_repository.count_for_choice(&first.choice_id).await.unwrap(), 0);
    assert_eq!(vote_repository.count_for_choice(&second.choice_id).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn voting_on_a_closed_question_preserves_the_prior_vote() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Closing question.", -1, None).await;
    let first = add_choice(&db, &question.question_id, "Yes").await;
    let second = add_choice(&db, &question.question_id, "No").await;
    let cookie = login(&app, "bob").await;

    let vote_uri = format!("/api/polls/{}/vote", question.question_id);
    send_request(
        &app,
        Method::POST,
        &vote_uri,
        Some(&cookie),
        Some(RequestBody::Form(format!("choice={}", first.choice_id))),
    )
    .await;

    // Close the window, then try to flip the vote.
    let closed_at = Utc::now() - Duration::days(1);
    db.collection::<Question>("questions")
        .update_one(
            doc! { "_id": &question.question_id },
            doc! { "$set": { "closes_at": BsonDateTime::from_millis(closed_at.timestamp_millis()) } },
        )
        .await
        .unwrap();

    let response = send_request(
        &app,
        Method::POST,
        &vote_uri,
        Some(&cookie),
        Some(RequestBody::Form(format!("choice={}", second.choice_id))),
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/api/polls"));

    let vote = VoteRepository::new(db.clone())
        .find_vote(
            // The stored vote still points at the first choice.
            &current_user_id(&app, &cookie).await,
            &question.question_id,
        )
        .await
        .unwrap()
        .expect("the prior vote should still exist");
    assert_eq!(vote.choice_id, first.choice_id);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn voting_with_a_foreign_choice_redirects_to_detail() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Open question.", -1, None).await;
    add_choice(&db, &question.question_id, "Yes").await;
    let other_question = create_question(&db, "Other question.", -1, None).await;
    let foreign = add_choice(&db, &other_question.question_id, "Elsewhere").await;
    let cookie = login(&app, "carol").await;

    let response = send_request(
        &app,
        Method::POST,
        &format!("/api/polls/{}/vote", question.question_id),
        Some(&cookie),
        Some(RequestBody::Form(format!("choice={}", foreign.choice_id))),
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(format!("/api/polls/{}", question.question_id).as_str())
    );
    let votes = db
        .collection::<crate::models::vote::Vote>("votes")
        .count_documents(doc! {})
        .await
        .unwrap();
    assert_eq!(votes, 0);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn voting_without_a_choice_redirects_to_detail() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Open question.", -1, None).await;
    add_choice(&db, &question.question_id, "Yes").await;
    let cookie = login(&app, "dave").await;

    let response = send_request(
        &app,
        Method::POST,
        &format!("/api/polls/{}/vote", question.question_id),
        Some(&cookie),
        Some(RequestBody::Form(String::new())),
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(format!("/api/polls/{}", question.question_id).as_str())
    );
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn results_render_for_past_and_future_questions() {
    let (app, db) = setup_test_app().await;
    let past = create_question(&db, "Past question.", -5, None).await;
    let future = create_question(&db, "Future question.", 5, None).await;

    let response = send_request(
        &app,
        Method::GET,
        &format!("/api/polls/{}/results", past.question_id),
        None,
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["votingClosed"], false);

    let response = send_request(
        &app,
        Method::GET,
        &format!("/api/polls/{}/results", future.question_id),
        None,
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["votingClosed"], true);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn deleting_a_question_cascades_to_choices_and_votes() {
    let (app, db) = setup_test_app().await;
    let question = create_question(&db, "Doomed question.", -1, None).await;
    let choice = add_choice(&db, &question.question_id, "Yes").await;
    let cookie = login(&app, "erin").await;
    send_request(
        &app,
        Method::POST,
        &format!("/api/polls/{}/vote", question.question_id),
        Some(&cookie),
        Some(RequestBody::Form(format!("choice={}", choice.choice_id))),
    )
    .await;

    let question_repository = QuestionRepository::new(db.clone());
    question_repository
        .delete_question(&question.question_id)
        .await
        .unwrap();

    assert!(question_repository
        .get_question(&question.question_id)
        .await
        .unwrap()
        .is_none());
    assert!(question_repository
        .choices_for_question(&question.question_id)
        .await
        .unwrap()
        .is_empty());
    let votes = db
        .collection::<crate::models::vote::Vote>("votes")
        .count_documents(doc! { "question_id": &question.question_id })
        .await
        .unwrap();
    assert_eq!(votes, 0);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn me_reflects_the_session() {
    let (app, _db) = setup_test_app().await;

    let anonymous = send_request(&app, Method::GET, "/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let cookie = login(&app, "frank").await;
    let me = send_request(&app, Method::GET, "/auth/me", Some(&cookie), None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["username"], "frank");
}

async fn current_user_id(app: &axum::Router, cookie: &str) -> String {
    let me = send_request(app, Method::GET, "/auth/me", Some(cookie), None).await;
    me.body["data"]["userId"].as_str().unwrap().to_string()
}
