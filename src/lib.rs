use handlebars::Handlebars;

pub mod backend;
pub mod config;
pub mod models;
pub mod notice;
pub mod routes;
pub mod telemetry;
pub mod templates;

#[cfg(test)]
mod mock_backend;

pub use backend::{BackendError, PostsClient};
pub use config::{Config, ConfigError};
pub use models::{Post, PostForm, PostInput};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to load templates: {0}")]
    Templates(#[from] handlebars::TemplateError),

    #[error("failed to build backend client: {0}")]
    Backend(#[from] BackendError),
}

pub struct AppState {
    pub posts: PostsClient,
    pub templates: Handlebars<'static>,
    pub static_dir: String,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, SetupError> {
        let posts = PostsClient::new(
            &config.backend_url,
            &config.backend_key,
            config.backend_timeout,
        )?;

        let templates =
            templates::load_templates(&config.templates_dir, config.template_dev_mode)?;

        Ok(Self {
            posts,
            templates,
            static_dir: config.static_dir.clone(),
        })
    }
}
