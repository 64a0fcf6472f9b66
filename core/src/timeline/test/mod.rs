use chrono::{DateTime, TimeZone, Utc};

use crate::model::{Activity, ActivityId, Attachment, Comment, Person, PersonId, TimelineEntry};

pub mod render;

pub fn person(id: &str) -> Person {
    Person {
        id: PersonId::from(id),
        display_name: format!("Person {}", id),
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_400_000_000 + secs, 0).unwrap()
}

pub fn activity(id: &str, author: &Person, updated_secs: i64, expected_comments: u32) -> Activity {
    Activity {
        id: ActivityId::from(id),
        updated_at: at(updated_secs),
        author: author.clone(),
        content: format!("content of {}", id),
        attachments: Vec::new(),
        expected_comment_count: expected_comments,
    }
}

pub fn comment(author: &str, content: &str) -> Comment {
    Comment {
        author_display_name: author.to_owned(),
        content: content.to_owned(),
    }
}

pub fn link(name: &str, url: &str, image_url: Option<&str>) -> Attachment {
    Attachment {
        display_name: name.to_owned(),
        url: url.to_owned(),
        image_url: image_url.map(str::to_owned),
    }
}

pub fn entry_ids(entries: &[TimelineEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.activity.id.as_str()).collect()
}
