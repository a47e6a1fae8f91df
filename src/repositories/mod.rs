pub mod question_repository;
pub mod user_repository;
pub mod vote_repository;
