use std::sync::Arc;

use claims::{assert_err, assert_ok};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{
    model::TimelineEntry,
    timeline::{
        render_attachments, render_comments, sort_timeline, ActivityRecord, HandlebarsTemplates,
        ListRecord, RenderError, Templates, TimelineRenderer,
    },
};

use super::*;

/// Templates that make the record fields visible in the output
struct BracketTemplates;

impl Templates for BracketTemplates {
    fn activity(&self, record: &ActivityRecord<'_>) -> Result<String, RenderError> {
        Ok(format!(
            "[{}|{}|{}|{}]",
            record.author, record.content, record.attachments_html, record.comments_html
        ))
    }

    fn list(&self, record: &ListRecord<'_>) -> Result<String, RenderError> {
        Ok(format!("<list>{}</list>", record.list))
    }
}

/// The activity template references a field the record never has
struct FailingTemplates(HandlebarsTemplates);

impl FailingTemplates {
    fn new() -> Self {
        FailingTemplates(assert_ok!(HandlebarsTemplates::from_strings(
            "{{missing}}",
            "{{{list}}}"
        )))
    }
}

impl Templates for FailingTemplates {
    fn activity(&self, record: &ActivityRecord<'_>) -> Result<String, RenderError> {
        self.0.activity(record)
    }

    fn list(&self, record: &ListRecord<'_>) -> Result<String, RenderError> {
        self.0.list(record)
    }
}

fn bracket_renderer() -> TimelineRenderer {
    TimelineRenderer::new(Arc::new(BracketTemplates))
}

fn handlebars_renderer() -> TimelineRenderer {
    TimelineRenderer::new(Arc::new(assert_ok!(HandlebarsTemplates::bundled())))
}

#[test]
fn most_recent_activity_first() {
    let a = person("A");
    let entries = vec![
        TimelineEntry::new(activity("1", &a, 1, 0), Vec::new()),
        TimelineEntry::new(activity("2", &a, 2, 0), Vec::new()),
    ];
    let html = assert_ok!(bracket_renderer().render(entries));
    assert_eq!(
        html,
        "<list>[Person A|content of 2||][Person A|content of 1||]</list>"
    );
}

#[test]
fn equal_timestamps_keep_input_order() {
    let a = person("a");
    let mut entries = vec![
        TimelineEntry::new(activity("x", &a, 5, 0), Vec::new()),
        TimelineEntry::new(activity("old", &a, 1, 0), Vec::new()),
        TimelineEntry::new(activity("y", &a, 5, 0), Vec::new()),
        TimelineEntry::new(activity("new", &a, 9, 0), Vec::new()),
        TimelineEntry::new(activity("z", &a, 5, 0), Vec::new()),
    ];
    sort_timeline(&mut entries);
    assert_eq!(entry_ids(&entries), vec!["new", "x", "y", "z", "old"]);
}

#[test]
fn empty_timeline_renders_empty_list() {
    assert_eq!(assert_ok!(bracket_renderer().render(Vec::new())), "<list></list>");
    assert_eq!(
        assert_ok!(handlebars_renderer().render(Vec::new())),
        "<ul class=\"timeline\"></ul>\n"
    );
}

#[test]
fn comments_rendered_in_order() {
    let html = render_comments(&[comment("Grace", "first"), comment("Alan", "<i>second</i>")]);
    assert_eq!(
        html,
        concat!(
            r#"<li class="comment"><span class="comment-author">Grace</span> first</li>"#,
            r#"<li class="comment"><span class="comment-author">Alan</span> <i>second</i></li>"#
        )
    );
    assert_eq!(render_comments(&[]), "");
}

#[test]
fn image_and_text_attachments() {
    let html = render_attachments(&[
        link("Photo", "https://e.com/p", Some("https://e.com/p.jpg")),
        link("Tom & Jerry", "https://e.com/a?x=1&y=\"2\"", None),
    ]);
    assert_eq!(
        html,
        concat!(
            r#"<a class="attachment" href="https://e.com/p"><img src="https://e.com/p.jpg" alt="Photo"></a>"#,
            r#"<a class="attachment" href="https://e.com/a?x=1&amp;y=&quot;2&quot;">Tom &amp; Jerry</a>"#
        )
    );
}

#[test]
fn handlebars_page_with_comments_and_attachments() {
    let a = person("A");
    let mut act = activity("1", &a, 2, 2);
    act.content = "Look <b>here</b>".to_owned();
    act.attachments = vec![link("Site", "https://e.com", None)];
    let entries = vec![TimelineEntry::new(
        act,
        vec![comment("first", "c1"), comment("second", "c2")],
    )];
    let html = assert_ok!(handlebars_renderer().render(entries));
    let expected = concat!(
        "<ul class=\"timeline\"><li class=\"activity\">\n",
        "  <div class=\"author\">Person A</div>\n",
        "  <div class=\"content\">Look <b>here</b></div>\n",
        "  <div class=\"attachments\"><a class=\"attachment\" href=\"https://e.com\">Site</a></div>\n",
        "  <ul class=\"comments\">",
        "<li class=\"comment\"><span class=\"comment-author\">first</span> c1</li>",
        "<li class=\"comment\"><span class=\"comment-author\">second</span> c2</li>",
        "</ul>\n",
        "</li>\n",
        "</ul>\n",
    );
    assert_eq!(html, expected);
}

#[test]
fn handlebars_escapes_author() {
    let mut a = person("a");
    a.display_name = "<script>".to_owned();
    let html = assert_ok!(handlebars_renderer().render(vec![TimelineEntry::new(
        activity("1", &a, 0, 0),
        Vec::new()
    )]));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn strict_templates_reject_unknown_fields() {
    let templates = assert_ok!(HandlebarsTemplates::from_strings(
        "{{author}} {{nickname}}",
        "{{{list}}}"
    ));
    let renderer = TimelineRenderer::new(Arc::new(templates));
    let a = person("a");
    let err = assert_err!(renderer.render(vec![TimelineEntry::new(
        activity("1", &a, 0, 0),
        Vec::new()
    )]));
    assert!(matches!(err, RenderError::Template { name: "activity", .. }));
}

#[test]
fn template_failure_propagates() {
    let renderer = TimelineRenderer::new(Arc::new(FailingTemplates::new()));
    let a = person("a");
    let err = assert_err!(renderer.render(vec![TimelineEntry::new(
        activity("1", &a, 0, 0),
        Vec::new()
    )]));
    assert!(matches!(err, RenderError::Template { name: "activity", .. }));
    // nothing to render, the activity template is never invoked
    assert_ok!(renderer.render(Vec::new()));
}

proptest! {
    #[test]
    fn prop_sort_is_descending_and_stable(times in prop::collection::vec(0..4i64, 0..20)) {
        let a = person("a");
        let mut entries: Vec<TimelineEntry> = times
            .iter()
            .enumerate()
            .map(|(idx, t)| TimelineEntry::new(activity(&idx.to_string(), &a, *t, 0), Vec::new()))
            .collect();
        sort_timeline(&mut entries);
        prop_assert_eq!(entries.len(), times.len());
        for pair in entries.windows(2) {
            let (first, second) = (&pair[0].activity, &pair[1].activity);
            prop_assert!(first.updated_at >= second.updated_at);
            if first.updated_at == second.updated_at {
                let first_idx: usize = first.id.as_str().parse().unwrap();
                let second_idx: usize = second.id.as_str().parse().unwrap();
                prop_assert!(first_idx < second_idx);
            }
        }
    }
}
