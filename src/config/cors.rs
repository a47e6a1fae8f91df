use axum::http::{
    header::{ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE},
    HeaderValue, Method,
};
use std::env;
use tower_http::cors::CorsLayer;

pub fn init_cors() -> CorsLayer {
    let frontend_origin = env::var("FRONTEND_ORIGIN")
        .unwrap_or_else(|_| String::from("http://localhost:8000"))
        .parse::<HeaderValue>()
        .expect("FRONTEND_ORIGIN is not a valid origin");

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT, COOKIE, SET_COOKIE])
        // The session cookie has to travel with every request.
        .allow_credentials(true)
        .allow_origin([frontend_origin])
        .expose_headers([SET_COOKIE])
}
