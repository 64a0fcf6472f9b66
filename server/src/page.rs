use handlebars::Handlebars;
use plusfeed_core::timeline::RenderError;
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page";

#[derive(Debug, Serialize)]
struct PageRecord<'a> {
    title: &'a str,
    timeline: &'a str,
}

/// The HTML document around a rendered timeline
pub struct PageTemplates {
    registry: Handlebars<'static>,
}

impl PageTemplates {
    pub fn bundled() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(PAGE_TEMPLATE, include_str!("templates/page.hbs"))?;
        Ok(PageTemplates { registry })
    }

    /// `timeline` is markup and is inserted as is
    pub fn timeline_page(&self, timeline: &str) -> Result<String, RenderError> {
        let record = PageRecord {
            title: "Timeline",
            timeline,
        };
        self.registry
            .render(PAGE_TEMPLATE, &record)
            .map_err(|source| RenderError::Template {
                name: PAGE_TEMPLATE,
                source,
            })
    }
}
