/**
 * API Routes
 *
 * Route tables for `/api/users`, `/api/posts` and `/api/profiles`.
 *
 * Protected routes are grouped in their own router and wrapped with the
 * auth middleware through `route_layer`, so unknown paths still fall
 * through to the 404 fallback instead of being rejected with 401.
 */

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::handlers::{get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::posts::handlers as posts;
use crate::backend::profiles::handlers as profiles;
use crate::backend::server::state::AppState;

/// `/api/users`
///
/// - `POST /api/users/register` - public
/// - `POST /api/users/login` - public
/// - `GET /api/users/me` - token required
pub fn user_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login));

    let protected = Router::new()
        .route("/api/users/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}

/// `/api/posts`, all routes require a token
pub fn post_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/posts", post(posts::create_post).get(posts::list_posts))
        .route("/api/posts/{post_id}", get(posts::get_post).delete(posts::delete_post))
        .route("/api/posts/like/{post_id}", put(posts::like_post))
        .route("/api/posts/unlike/{post_id}", put(posts::unlike_post))
        .route("/api/posts/comment/{post_id}", post(posts::add_comment))
        .route(
            "/api/posts/comment/{post_id}/{comment_id}",
            delete(posts::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// `/api/profiles`
///
/// Listing and lookups by user or profile id are public. The account route
/// shares its path between a public GET and a protected DELETE.
pub fn profile_routes(state: &AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let public = Router::new()
        .route("/api/profiles/all", get(profiles::list_profiles))
        .route("/api/profiles/{profile_id}", get(profiles::get_profile))
        .route(
            "/api/profiles/users/{user_id}",
            get(profiles::get_profile_by_user)
                .merge(delete(profiles::delete_account).route_layer(auth.clone())),
        );

    let protected = Router::new()
        .route("/api/profiles/me", get(profiles::get_my_profile))
        .route(
            "/api/profiles",
            post(profiles::create_profile).put(profiles::update_profile),
        )
        .route("/api/profiles/experience", put(profiles::add_experience))
        .route("/api/profiles/experience/{exp_id}", delete(profiles::delete_experience))
        .route("/api/profiles/education", put(profiles::add_education))
        .route("/api/profiles/education/{edu_id}", delete(profiles::delete_education))
        .route_layer(auth);

    public.merge(protected)
}

/// Every API route
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .merge(user_routes(state))
        .merge(post_routes(state))
        .merge(profile_routes(state))
}
