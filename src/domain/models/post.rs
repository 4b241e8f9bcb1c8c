use serde_json::Value;

use crate::domain::errors::DomainError;

const UNDEFINED: &str = "undefined";

/// Post metadata extracted from a Page `feed` change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetails {
    pub post_id: String,
    pub created_time: String,
    pub message: String,
    pub author: String,
}

impl PostDetails {
    /// Reads `entry[0].changes[0].value` out of a raw webhook event.
    pub fn from_event(event: &Value) -> Result<Self, DomainError> {
        let value = event
            .get("entry")
            .and_then(|entry| entry.get(0))
            .ok_or_else(|| missing("entry[0]"))?
            .get("changes")
            .and_then(|changes| changes.get(0))
            .ok_or_else(|| missing("entry[0].changes[0]"))?
            .get("value")
            .ok_or_else(|| missing("entry[0].changes[0].value"))?;

        let from = value
            .get("from")
            .filter(|from| !from.is_null())
            .ok_or_else(|| missing("entry[0].changes[0].value.from"))?;

        Ok(Self {
            post_id: text_field(value, "post_id"),
            created_time: text_field(value, "created_time"),
            message: text_field(value, "message"),
            author: text_field(from, "name"),
        })
    }

    pub fn render(&self) -> String {
        format!(
            "New post from {} at {}:\n\n{}\n\nYou can view the post here: https://www.facebook.com/{}",
            self.author, self.created_time, self.message, self.post_id
        )
    }
}

/// Any JSON value is accepted: strings verbatim, other values as JSON text,
/// absent or null fields as `undefined`.
fn text_field(value: &Value, name: &str) -> String {
    match value.get(name) {
        None | Some(Value::Null) => UNDEFINED.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn missing(path: &str) -> DomainError {
    DomainError::InvalidPayload(format!("missing `{path}`"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event() -> Value {
        json!({
            "entry": [{
                "changes": [{
                    "value": {
                        "post_id": "123",
                        "created_time": "2024-01-01T00:00:00",
                        "message": "Hello",
                        "from": { "name": "Page" }
                    }
                }]
            }]
        })
    }

    #[test]
    fn extracts_post_metadata() {
        let details = PostDetails::from_event(&event()).unwrap();
        assert_eq!(details.post_id, "123");
        assert_eq!(details.created_time, "2024-01-01T00:00:00");
        assert_eq!(details.message, "Hello");
        assert_eq!(details.author, "Page");
    }

    #[test]
    fn renders_notification_text() {
        let text = PostDetails::from_event(&event()).unwrap().render();
        assert_eq!(
            text,
            "New post from Page at 2024-01-01T00:00:00:\n\nHello\n\nYou can view the post here: https://www.facebook.com/123"
        );
    }

    #[test]
    fn rejects_missing_entry() {
        let err = PostDetails::from_event(&json!({ "object": "page" })).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidPayload("missing `entry[0]`".to_string())
        );
    }

    #[test]
    fn rejects_empty_changes() {
        let err = PostDetails::from_event(&json!({ "entry": [{ "changes": [] }] })).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPayload(_)));
    }

    #[test]
    fn rejects_missing_author() {
        let mut payload = event();
        payload["entry"][0]["changes"][0]["value"]
            .as_object_mut()
            .unwrap()
            .remove("from");
        assert!(PostDetails::from_event(&payload).is_err());

        payload["entry"][0]["changes"][0]["value"]["from"] = Value::Null;
        assert!(PostDetails::from_event(&payload).is_err());
    }

    #[test]
    fn renders_numeric_created_time() {
        let mut payload = event();
        payload["entry"][0]["changes"][0]["value"]["created_time"] = json!(1704067200);

        let text = PostDetails::from_event(&payload).unwrap().render();

        assert!(text.starts_with("New post from Page at 1704067200:\n\n"));
    }

    #[test]
    fn post_without_message_still_renders() {
        let mut payload = event();
        payload["entry"][0]["changes"][0]["value"]
            .as_object_mut()
            .unwrap()
            .remove("message");

        let details = PostDetails::from_event(&payload).unwrap();

        assert_eq!(details.message, "undefined");
        assert_eq!(
            details.render(),
            "New post from Page at 2024-01-01T00:00:00:\n\nundefined\n\nYou can view the post here: https://www.facebook.com/123"
        );
    }

    #[test]
    fn author_object_without_name_renders_undefined() {
        let mut payload = event();
        payload["entry"][0]["changes"][0]["value"]["from"] = json!({ "id": "42" });

        let details = PostDetails::from_event(&payload).unwrap();

        assert_eq!(details.author, "undefined");
    }
}
