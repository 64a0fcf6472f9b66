//! Response shapes of the plus/v1 listings. Only the fields the timeline uses are read.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{Activity, Attachment, Comment, Person};

#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePerson {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCounter {
    #[serde(default)]
    pub total_items: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireImage {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAttachment {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub url: String,
    pub image: Option<WireImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireActivityObject {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<WireAttachment>,
    #[serde(default)]
    pub replies: WireCounter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireActivity {
    pub id: String,
    pub updated: DateTime<Utc>,
    pub actor: WirePerson,
    #[serde(default)]
    pub object: WireActivityObject,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCommentActor {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireCommentObject {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireComment {
    pub actor: WireCommentActor,
    #[serde(default)]
    pub object: WireCommentObject,
}

impl From<WirePerson> for Person {
    fn from(value: WirePerson) -> Self {
        Person {
            id: value.id.into(),
            display_name: value.display_name,
        }
    }
}

impl From<WireAttachment> for Attachment {
    fn from(value: WireAttachment) -> Self {
        Attachment {
            display_name: value.display_name,
            url: value.url,
            image_url: value.image.and_then(|image| image.url),
        }
    }
}

impl From<WireActivity> for Activity {
    fn from(value: WireActivity) -> Self {
        Activity {
            id: value.id.into(),
            updated_at: value.updated,
            author: value.actor.into(),
            content: value.object.content,
            attachments: value
                .object
                .attachments
                .into_iter()
                .map(Attachment::from)
                .collect(),
            expected_comment_count: value.object.replies.total_items,
        }
    }
}

impl From<WireComment> for Comment {
    fn from(value: WireComment) -> Self {
        Comment {
            author_display_name: value.actor.display_name,
            content: value.object.content,
        }
    }
}
