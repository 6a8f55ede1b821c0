use handlebars::{DirectorySourceOptions, Handlebars, TemplateError, handlebars_helper};
use time::macros::format_description;

use crate::models::parse_timestamp;

/// `YYYY-MM-DD HH:MM`, or the input unchanged when it isn't a timestamp.
pub fn display_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .and_then(|ts| {
            ts.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
                .ok()
        })
        .unwrap_or_else(|| raw.to_string())
}

handlebars_helper!(date: |ts: str| display_timestamp(ts));

pub fn load_templates(dir: &str, dev_mode: bool) -> Result<Handlebars<'static>, TemplateError> {
    let mut templates = Handlebars::new();
    templates.set_dev_mode(dev_mode);
    templates.register_helper("date", Box::new(date));
    templates.register_templates_directory(dir, DirectorySourceOptions::default())?;
    Ok(templates)
}
