use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{sse::Event, IntoResponse, Redirect, Response, Sse},
    Extension, Form, Json,
};
use chrono::Utc;
use mongodb::Database;
use tokio_stream::{Stream, StreamExt};
use tower_sessions::Session;

use crate::{
    config::startup::AppState,
    dtos::{
        requests::{ResultQueryParams, VoteForm},
        responses::{
            ApiResponse, ChoiceDTO, ChoiceResultDTO, IndexDTO, QuestionDetailDTO,
            QuestionSummaryDTO, ResultsDTO,
        },
    },
    error::{AppError, PollError},
    models::question::Question,
    repositories::{question_repository::QuestionRepository, vote_repository::VoteRepository},
    services::vote_service::VoteService,
    utils::flash::{self, FlashLevel},
};

//*GET:: api/polls
pub async fn index(
    Extension(db): Extension<Arc<Database>>,
    Extension(app_state): Extension<AppState>,
    session: Session,
) -> Result<Json<ApiResponse<IndexDTO>>, AppError> {
    let question_repository = QuestionRepository::new(db);
    let now = Utc::now();

    let questions = question_repository
        .latest_published(now, app_state.settings.index_page_size)
        .await?;
    let latest_question_list: Vec<QuestionSummaryDTO> = questions
        .into_iter()
        .map(|question| QuestionSummaryDTO {
            pub_date: question.pub_date.to_rfc3339(),
            published_recently: question.was_published_recently(now),
            question_id: question.question_id,
            question_text: question.question_text,
        })
        .collect();

    Ok(Json(ApiResponse {
        status: StatusCode::OK.as_u16() as i32,
        message: String::from("Latest questions fetched successfully"),
        data: Some(IndexDTO {
            no_polls_available: latest_question_list.is_empty(),
            latest_question_list,
            messages: flash::take_messages(&session).await?,
        }),
        timestamp: Utc::now(),
        error: None,
    }))
}

//*GET:: api/polls/question_id
pub async fn question_detail(
    Extension(db): Extension<Arc<Database>>,
    Path(question_id): Path<String>,
    session: Session,
) -> Result<Response, AppError> {
    let question_repository = QuestionRepository::new(db.clone());
    let now = Utc::now();

    // An unpublished question is treated as not found, so the id leaks
    // nothing before its publish time.
    let question = match question_repository.get_question(&question_id).await? {
        Some(question) if question.is_published(now) => question,
        _ => {
            flash::push_message(
                &session,
                FlashLevel::Error,
                format!("Poll with ID {question_id} is not found."),
            )
            .await?;
            return Ok(Redirect::to("/api/polls").into_response());
        }
    };

    if !question.can_vote(now) {
        flash::push_message(
            &session,
            FlashLevel::Error,
            format!(
                "The poll '{}' has concluded and voting is closed.",
                question.question_text
            ),
        )
        .await?;
        return Ok(Redirect::to("/api/polls").into_response());
    }

    let choices = question_repository
        .choices_for_question(&question.question_id)
        .await?
        .into_iter()
        .map(|choice| ChoiceDTO {
            choice_id: choice.choice_id,
            choice_text: choice.choice_text,
        })
        .collect();

    let current_choice_id = match session.get::<String>("user_id").await? {
        Some(user_id) => VoteRepository::new(db)
            .find_vote(&user_id, &question.question_id)
            .await?
            .map(|vote| vote.choice_id),
        None => None,
    };

    Ok(Json(ApiResponse {
        status: StatusCode::OK.as_u16() as i32,
        message: String::from("Question retrieved successfully"),
        data: Some(QuestionDetailDTO {
            question_id: question.question_id,
            question_text: question.question_text,
            pub_date: question.pub_date.to_rfc3339(),
            closes_at: question.closes_at.map(|closes_at| closes_at.to_rfc3339()),
            choices,
            current_choice_id,
            messages: flash::take_messages(&session).await?,
        }),
        timestamp: Utc::now(),
        error: None,
    })
    .into_response())
}

//*GET:: api/polls/question_id/results
pub async fn question_results(
    Extension(db): Extension<Arc<Database>>,
    Path(question_id): Path<String>,
    Query(filters): Query<ResultQueryParams>,
    session: Session,
) -> Result<Response, AppError> {
    let question_repository = QuestionRepository::new(db.clone());

    let Some(question) = question_repository.get_question(&question_id).await? else {
        flash::push_message(
            &session,
            FlashLevel::Error,
            format!("Poll with ID {question_id} is not found."),
        )
        .await?;
        return Ok(Redirect::to("/api/polls").into_response());
    };

    //* Live results -> stream the tallies of the given question
    if let Some(true) = filters.live {
        return Ok(start_results_sse(db, question).await.into_response());
    }

    // Results render for any existing question, published or not; the
    // closed flag tells the template whether to offer the voting link.
    let voting_closed = !question.can_vote(Utc::now());
    let results = tally_results(db, &question).await?;

    Ok(Json(ApiResponse {
        status: StatusCode::OK.as_u16() as i32,
        message: String::from("Poll results retrieved successfully"),
        data: Some(ResultsDTO {
            question_id: question.question_id,
            question_text: question.question_text,
            voting_closed,
            results,
            messages: flash::take_messages(&session).await?,
        }),
        timestamp: Utc::now(),
        error: None,
    })
    .into_response())
}

//?POST:: api/polls/question_id/vote
pub async fn submit_vote(
    Extension(db): Extension<Arc<Database>>,
    Path(question_id): Path<String>,
    session: Session,
    Form(form): Form<VoteForm>,
) -> Result<Response, AppError> {
    let user_id = session
        .get::<String>("user_id")
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let Some(choice_id) = form.choice else {
        flash::push_message(&session, FlashLevel::Error, "You didn't select a choice.").await?;
        return Ok(Redirect::to(&format!("/api/polls/{question_id}")).into_response());
    };

    let vote_service = VoteService::new(db);
    match vote_service
        .cast_vote(&question_id, &choice_id, &user_id, Utc::now())
        .await
    {
        Ok(choice) => {
            flash::push_message(
                &session,
                FlashLevel::Success,
                format!("Your vote for {} has been saved.", choice.choice_text),
            )
            .await?;
            Ok(Redirect::to(&format!("/api/polls/{question_id}/results")).into_response())
        }
        Err(AppError::Poll(PollError::QuestionNotFound)) => {
            flash::push_message(
                &session,
                FlashLevel::Error,
                format!("Poll with ID {question_id} is not found."),
            )
            .await?;
            Ok(Redirect::to("/api/polls").into_response())
        }
        Err(AppError::Poll(PollError::VotingClosed)) => {
            flash::push_message(
                &session,
                FlashLevel::Error,
                "That poll is not available to vote.",
            )
            .await?;
            Ok(Redirect::to("/api/polls").into_response())
        }
        Err(AppError::Poll(PollError::InvalidChoice)) => {
            flash::push_message(
                &session,
                FlashLevel::Error,
                "That choice does not belong to this poll.",
            )
            .await?;
            Ok(Redirect::to(&format!("/api/polls/{question_id}")).into_response())
        }
        Err(other) => Err(other),
    }
}

async fn tally_results(
    db: Arc<Database>,
    question: &Question,
) -> Result<Vec<ChoiceResultDTO>, AppError> {
    let question_repository = QuestionRepository::new(db.clone());
    let vote_repository = VoteRepository::new(db);

    let mut results = Vec::new();
    for choice in question_repository
        .choices_for_question(&question.question_id)
        .await?
    {
        let votes = vote_repository.count_for_choice(&choice.choice_id).await?;
        results.push(ChoiceResultDTO {
            choice_id: choice.choice_id,
            choice_text: choice.choice_text,
            votes: votes as i64,
        });
    }
    Ok(results)
}

async fn start_results_sse(
    db: Arc<Database>,
    question: Question,
) -> Sse<impl Stream<Item = Result<Event, AppError>>> {
    // Re-tally once a second; the counts are always derived, so the stream
    // needs no bookkeeping of its own.
    let stream =
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(1)))
            .then(move |_| {
                let db = db.clone();
                let question = question.clone();

                async move {
                    match tally_results(db, &question).await {
                        Ok(results) => {
                            let payload = serde_json::to_string(&results).unwrap_or_default();
                            Ok(Event::default().data(payload).event("results-update"))
                        }
                        Err(_) => Ok(Event::default()
                            .data("Error fetching poll results")
                            .event("error")),
                    }
                }
            });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive-text"),
    )
}
