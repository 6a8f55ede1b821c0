use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A row of the `posts` table as PostgREST returns it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<OffsetDateTime>,
}

/// The only fields ever written to the backend.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl PostForm {
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

impl From<PostForm> for PostInput {
    fn from(form: PostForm) -> Self {
        Self {
            title: form.title,
            content: form.content,
        }
    }
}

/// `timestamptz` columns come back as RFC 3339, plain `timestamp` columns
/// without an offset. The latter are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    use time::format_description::well_known::Rfc3339;

    OffsetDateTime::parse(raw, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(&format!("{raw}Z"), &Rfc3339))
        .ok()
}

mod timestamp {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => {
                let formatted = ts.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|s| {
            let parsed = super::parse_timestamp(s);
            if parsed.is_none() {
                tracing::debug!(value = s, "ignoring unparseable created_at");
            }
            parsed
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_from_timestamptz_row() {
        let post: Post = serde_json::from_value(json!({
            "id": 3,
            "title": "Hello",
            "content": "World",
            "created_at": "2024-05-01T10:20:30.123456+00:00"
        }))
        .unwrap();

        assert_eq!(post.id, 3);
        assert_eq!(post.content.as_deref(), Some("World"));
        let created = post.created_at.unwrap();
        assert_eq!(created.year(), 2024);
        assert_eq!(created.hour(), 10);
    }

    #[test]
    fn test_post_from_naive_timestamp_and_null_content() {
        let post: Post = serde_json::from_value(json!({
            "id": 4,
            "title": "Plain",
            "content": null,
            "created_at": "2024-05-01T10:20:30.5"
        }))
        .unwrap();

        assert!(post.content.is_none());
        assert_eq!(post.created_at.unwrap().offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn test_bad_timestamp_does_not_reject_row() {
        let post: Post = serde_json::from_value(json!({
            "id": 5,
            "title": "Odd",
            "created_at": "yesterday"
        }))
        .unwrap();

        assert!(post.created_at.is_none());
    }

    #[test]
    fn test_post_serializes_rfc3339_for_templates() {
        let post = Post {
            id: 1,
            title: "t".into(),
            content: None,
            created_at: parse_timestamp("2024-05-01T10:20:30Z"),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["created_at"], "2024-05-01T10:20:30Z");
    }

    #[test]
    fn test_input_body_has_only_title_and_content() {
        let input = PostInput::from(PostForm {
            title: "Hello".into(),
            content: "World".into(),
        });
        assert_eq!(
            serde_json::to_string(&input).unwrap(),
            r#"{"title":"Hello","content":"World"}"#
        );
    }

    #[test]
    fn test_blank_title_is_missing() {
        let form = PostForm {
            title: "   ".into(),
            content: "body".into(),
        };
        assert!(!form.has_title());
        assert!(PostForm::default().content.is_empty());
    }
}
