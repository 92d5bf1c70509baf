//! HTML templating with auto-escaping always on.
//!
//! Wraps a `minijinja` environment loaded from the configured views
//! directory. Escaping is forced for every template regardless of file
//! extension — rendering unescaped user data is not an option this module
//! offers. The variable delimiters are `{( ... )}`, which the site's
//! templates have always used so they can coexist with client-side
//! mustache-style bindings.

use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{AppError, CitydevsError};
use crate::languages;

#[derive(Clone)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new(config: &AppConfig) -> Result<Self, CitydevsError> {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(&config.views_dir));
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        let syntax = SyntaxConfig::builder()
            .variable_delimiters("{(", ")}")
            .build()?;
        env.set_syntax(syntax);

        // Globals every view can rely on without a query.
        env.add_global("cdn", Value::from(config.cdn.clone().unwrap_or_default()));
        env.add_global(
            "programming_languages",
            Value::from_serialize(languages::ALL),
        );

        Ok(Self { env })
    }

    pub fn render(
        &self,
        name: &str,
        ctx: impl Serialize,
    ) -> Result<axum::response::Html<String>, AppError> {
        let template = self.env.get_template(name)?;
        Ok(axum::response::Html(template.render(ctx)?))
    }
}
