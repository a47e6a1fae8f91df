pub mod vote_service;
