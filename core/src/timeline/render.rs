use std::{fmt::Write, sync::Arc};

use handlebars::Handlebars;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::model::{Attachment, Comment, TimelineEntry};

const ACTIVITY_TEMPLATE: &str = "activity";
const LIST_TEMPLATE: &str = "list";

/// Fields handed to the per-activity template.
/// `content` and the two `*_html` fields are markup and must be inserted unescaped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord<'a> {
    pub author: &'a str,
    pub content: &'a str,
    pub attachments_html: String,
    pub comments_html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListRecord<'a> {
    pub list: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("error rendering template '{name}'")]
    Template {
        name: &'static str,
        #[source]
        source: handlebars::RenderError,
    },
}

/// The two template slots the renderer fills. Implementations are pure functions of the
/// record.
pub trait Templates: Send + Sync {
    fn activity(&self, record: &ActivityRecord<'_>) -> Result<String, RenderError>;
    fn list(&self, record: &ListRecord<'_>) -> Result<String, RenderError>;
}

pub struct HandlebarsTemplates {
    registry: Handlebars<'static>,
}

impl HandlebarsTemplates {
    /// The templates bundled with the crate
    pub fn bundled() -> Result<Self, handlebars::TemplateError> {
        Self::from_strings(
            include_str!("templates/activity.hbs"),
            include_str!("templates/list.hbs"),
        )
    }

    pub fn from_strings(activity: &str, list: &str) -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        // fail if a variable is missing
        registry.set_strict_mode(true);
        registry.register_template_string(ACTIVITY_TEMPLATE, activity)?;
        registry.register_template_string(LIST_TEMPLATE, list)?;
        Ok(HandlebarsTemplates { registry })
    }

    fn render<T: Serialize>(&self, name: &'static str, data: &T) -> Result<String, RenderError> {
        self.registry
            .render(name, data)
            .map_err(|source| RenderError::Template { name, source })
    }
}

impl Templates for HandlebarsTemplates {
    fn activity(&self, record: &ActivityRecord<'_>) -> Result<String, RenderError> {
        self.render(ACTIVITY_TEMPLATE, record)
    }

    fn list(&self, record: &ListRecord<'_>) -> Result<String, RenderError> {
        self.render(LIST_TEMPLATE, record)
    }
}

/// Orders entries most recent first.
/// Entries with equal timestamps keep their relative order (`sort_by` is stable).
pub fn sort_timeline(entries: &mut [TimelineEntry]) {
    entries.sort_by(|a, b| b.activity.updated_at.cmp(&a.activity.updated_at));
}

#[derive(Clone)]
pub struct TimelineRenderer {
    templates: Arc<dyn Templates>,
}

impl TimelineRenderer {
    pub fn new(templates: Arc<dyn Templates>) -> Self {
        TimelineRenderer { templates }
    }

    pub fn render(&self, mut entries: Vec<TimelineEntry>) -> Result<String, RenderError> {
        sort_timeline(&mut entries);
        let mut list = String::new();
        for entry in &entries {
            list.push_str(&self.render_entry(entry)?);
        }
        self.templates.list(&ListRecord { list: &list })
    }

    fn render_entry(&self, entry: &TimelineEntry) -> Result<String, RenderError> {
        let activity = &entry.activity;
        let record = ActivityRecord {
            author: &activity.author.display_name,
            content: &activity.content,
            attachments_html: render_attachments(&activity.attachments),
            comments_html: render_comments(&entry.comments),
        };
        self.templates.activity(&record)
    }
}

/// Comment content is upstream markup and is kept as is, the author name is text.
pub fn render_comments(comments: &[Comment]) -> String {
    let mut html = String::new();
    for comment in comments {
        let _ = write!(
            html,
            r#"<li class="comment"><span class="comment-author">{}</span> {}</li>"#,
            encode_text(&comment.author_display_name),
            comment.content
        );
    }
    html
}

pub fn render_attachments(attachments: &[Attachment]) -> String {
    let mut html = String::new();
    for attachment in attachments {
        let href = encode_double_quoted_attribute(&attachment.url);
        let _ = match &attachment.image_url {
            Some(image_url) => write!(
                html,
                r#"<a class="attachment" href="{}"><img src="{}" alt="{}"></a>"#,
                href,
                encode_double_quoted_attribute(image_url),
                encode_double_quoted_attribute(&attachment.display_name)
            ),
            None => write!(
                html,
                r#"<a class="attachment" href="{}">{}</a>"#,
                href,
                encode_text(&attachment.display_name)
            ),
        };
    }
    html
}
