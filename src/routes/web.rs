use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde_json::{Value, json};

use crate::notice::{self, Notice};
use crate::{AppState, PostForm, PostInput};

const TITLE_REQUIRED: &str = "Title is required!";
const SAVE_FAILED: &str = "The post could not be saved. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Error rendering page: {0}")]
    RenderError(#[from] handlebars::RenderError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        match self {
            WebError::RenderError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error rendering page".to_string(),
            )
                .into_response(),
        }
    }
}

fn render(
    app_state: &AppState,
    template: &str,
    status: StatusCode,
    data: &Value,
) -> Result<Response, WebError> {
    let body = app_state.templates.render(template, data)?;
    Ok((status, Html(body)).into_response())
}

fn notice_message(notice: Option<Notice>) -> Option<&'static str> {
    notice.map(Notice::message)
}

/// Form values echoed back on re-render, keeping the post id when editing.
fn form_context(post_id: Option<i64>, form: &PostForm) -> Value {
    json!({
        "id": post_id,
        "title": form.title,
        "content": form.content,
    })
}

#[axum::debug_handler]
pub async fn list(
    app_state: State<Arc<AppState>>,
    cookie_jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let (cookie_jar, notice) = notice::take(cookie_jar);

    let posts = app_state.posts.list().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not list posts");
        Vec::new()
    });

    let page = render(
        &app_state,
        "index",
        StatusCode::OK,
        &json!({"posts": posts, "notice": notice_message(notice)}),
    )?;
    Ok((cookie_jar, page))
}

#[axum::debug_handler]
pub async fn view(
    app_state: State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    cookie_jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let (cookie_jar, notice) = notice::take(cookie_jar);

    let post = app_state.posts.get(post_id).await.unwrap_or_else(|e| {
        tracing::warn!(post_id, error = %e, "could not fetch post");
        None
    });

    let page = render(
        &app_state,
        "post",
        StatusCode::OK,
        &json!({"post": post, "notice": notice_message(notice)}),
    )?;
    Ok((cookie_jar, page))
}

#[axum::debug_handler]
pub async fn create_form(
    app_state: State<Arc<AppState>>,
    cookie_jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let (cookie_jar, notice) = notice::take(cookie_jar);

    let page = render(
        &app_state,
        "create",
        StatusCode::OK,
        &json!({
            "post": form_context(None, &PostForm::default()),
            "notice": notice_message(notice),
        }),
    )?;
    Ok((cookie_jar, page))
}

#[axum::debug_handler]
pub async fn create(
    app_state: State<Arc<AppState>>,
    cookie_jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Result<Response, WebError> {
    if !form.has_title() {
        return render(
            &app_state,
            "create",
            StatusCode::UNPROCESSABLE_ENTITY,
            &json!({"post": form_context(None, &form), "error": TITLE_REQUIRED}),
        );
    }

    let input = PostInput::from(form.clone());
    match app_state.posts.create(&input).await {
        Ok(()) => Ok((
            notice::queue(cookie_jar, Notice::PostCreated),
            Redirect::to("/"),
        )
            .into_response()),
        Err(e) => {
            tracing::warn!(error = %e, "could not create post");
            render(
                &app_state,
                "create",
                StatusCode::BAD_GATEWAY,
                &json!({
                    "post": form_context(None, &form),
                    "error": SAVE_FAILED,
                }),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn edit_form(
    app_state: State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    cookie_jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let (cookie_jar, notice) = notice::take(cookie_jar);

    let post = app_state.posts.get(post_id).await.unwrap_or_else(|e| {
        tracing::warn!(post_id, error = %e, "could not fetch post for editing");
        None
    });

    let page = render(
        &app_state,
        "edit",
        StatusCode::OK,
        &json!({"post": post, "notice": notice_message(notice)}),
    )?;
    Ok((cookie_jar, page))
}

#[axum::debug_handler]
pub async fn edit(
    app_state: State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    cookie_jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Result<Response, WebError> {
    if !form.has_title() {
        return render(
            &app_state,
            "edit",
            StatusCode::UNPROCESSABLE_ENTITY,
            &json!({"post": form_context(Some(post_id), &form), "error": TITLE_REQUIRED}),
        );
    }

    let input = PostInput::from(form.clone());
    match app_state.posts.update(post_id, &input).await {
        Ok(()) => Ok((
            notice::queue(cookie_jar, Notice::PostUpdated),
            Redirect::to("/"),
        )
            .into_response()),
        Err(e) => {
            tracing::warn!(post_id, error = %e, "could not update post");
            render(
                &app_state,
                "edit",
                StatusCode::BAD_GATEWAY,
                &json!({
                    "post": form_context(Some(post_id), &form),
                    "error": SAVE_FAILED,
                }),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn delete(
    app_state: State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    cookie_jar: CookieJar,
) -> impl IntoResponse {
    // The notice is queued whatever the backend answers.
    if let Err(e) = app_state.posts.delete(post_id).await {
        tracing::warn!(post_id, error = %e, "delete was not confirmed by the backend");
    }

    (
        notice::queue(cookie_jar, Notice::PostDeleted),
        Redirect::to("/"),
    )
}
