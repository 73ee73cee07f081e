use serde_json::Value;

/// Fields that carry generated text, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyField {
    SummaryText,
    GeneratedText,
}

impl ReplyField {
    pub const PRIORITY: [ReplyField; 2] = [ReplyField::SummaryText, ReplyField::GeneratedText];

    pub fn key(&self) -> &'static str {
        match self {
            ReplyField::SummaryText => "summary_text",
            ReplyField::GeneratedText => "generated_text",
        }
    }

    /// Text of the first known field present on `value` with a string value.
    fn find_in(value: &Value) -> Option<String> {
        let object = value.as_object()?;
        ReplyField::PRIORITY.iter().find_map(|field| {
            object
                .get(field.key())
                .and_then(Value::as_str)
                .map(str::to_string)
        })
    }
}

/// A decoded provider reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    /// `[{"summary_text": "..."}]` as returned by Hugging Face task models.
    Sequence { text: String },
    /// `{"generated_text": "..."}`
    Mapping { text: String },
    /// `{"choices": [{"message": {"content": "..."}}]}` from chat completion APIs.
    ChatCompletion { text: String },
    /// A mapping carrying an `error` field; holds that field's value.
    Error { payload: Value },
    Unrecognized(Value),
}

impl ProviderReply {
    pub fn classify(value: Value) -> Self {
        if let Some(payload) = value.as_object().and_then(|o| o.get("error")) {
            return ProviderReply::Error {
                payload: payload.clone(),
            };
        }

        if let Some(text) = value
            .as_array()
            .and_then(|items| items.first())
            .and_then(ReplyField::find_in)
        {
            return ProviderReply::Sequence { text };
        }

        if let Some(text) = ReplyField::find_in(&value) {
            return ProviderReply::Mapping { text };
        }

        let chat_content = value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str);
        if let Some(text) = chat_content {
            return ProviderReply::ChatCompletion {
                text: text.to_string(),
            };
        }

        ProviderReply::Unrecognized(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sequence_prefers_summary_text() {
        let reply = ProviderReply::classify(json!([
            {"generated_text": "second", "summary_text": "first"}
        ]));
        assert_eq!(
            reply,
            ProviderReply::Sequence {
                text: "first".to_string()
            }
        );
    }

    #[test]
    fn test_only_first_sequence_element_is_inspected() {
        let reply = ProviderReply::classify(json!([{"score": 0.3}, {"generated_text": "late"}]));
        assert!(matches!(reply, ProviderReply::Unrecognized(_)));
    }

    #[test]
    fn test_mapping_and_chat_shapes() {
        assert_eq!(
            ProviderReply::classify(json!({"generated_text": "Y"})),
            ProviderReply::Mapping {
                text: "Y".to_string()
            }
        );
        assert_eq!(
            ProviderReply::classify(json!({
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Z"}}]
            })),
            ProviderReply::ChatCompletion { text: "Z".to_string() }
        );
    }

    #[test]
    fn test_error_field_wins_over_known_fields() {
        let reply = ProviderReply::classify(json!({"error": "busy", "generated_text": "x"}));
        assert_eq!(reply, ProviderReply::Error { payload: json!("busy") });
    }

    #[test]
    fn test_non_string_field_is_unrecognized() {
        assert!(matches!(
            ProviderReply::classify(json!({"generated_text": 42})),
            ProviderReply::Unrecognized(_)
        ));
        assert!(matches!(
            ProviderReply::classify(json!([])),
            ProviderReply::Unrecognized(_)
        ));
    }
}
