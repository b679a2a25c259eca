//! Outbound generation request.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::compose::fields::{BaseFields, GenerationMode};
use crate::compose::store::DynamicFieldStore;
use crate::models::ids::RemoteId;

/// Payload of `POST /create/` on the news service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(flatten)]
    pub fields: BaseFields,
    pub creation_type: GenerationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<RemoteId>,
    #[serde(default)]
    pub additional_variables: IndexMap<String, String>,
}

/// Assembles a generation request. Pure: the same inputs always give the same
/// payload.
///
/// Nothing is validated here. Blank additional values are passed through, and
/// `TemplateOnly` without a `template_id` is accepted even though the service
/// will most likely reject it; required base fields are the caller's job.
pub fn build_request(
    fields: &BaseFields,
    additional: &DynamicFieldStore,
    mode: GenerationMode,
    template_id: Option<&RemoteId>,
) -> GenerationRequest {
    GenerationRequest {
        fields: fields.clone(),
        creation_type: mode,
        template_id: template_id.cloned(),
        additional_variables: additional.values().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_fields() -> BaseFields {
        BaseFields {
            news_type: "زيارة".into(),
            place: "A".into(),
            source: "B".into(),
            event: "C".into(),
            date: "D".into(),
            participants: String::new(),
            event_details: String::new(),
        }
    }

    #[test]
    fn test_payload_shape_is_exact() {
        let mut store = DynamicFieldStore::default();
        store.reset(["extra1"]);
        store.set("extra1", "v1");

        let request = build_request(
            &sample_fields(),
            &store,
            GenerationMode::Hybrid,
            Some(&RemoteId::from("7")),
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "news_type": "زيارة",
                "place": "A",
                "source": "B",
                "event": "C",
                "date": "D",
                "participants": "",
                "event_details": "",
                "creation_type": "hybrid",
                "template_id": "7",
                "additional_variables": {"extra1": "v1"}
            })
        );
    }

    #[test]
    fn test_template_id_omitted_when_absent() {
        let request = build_request(
            &sample_fields(),
            &DynamicFieldStore::default(),
            GenerationMode::ModelOnly,
            None,
        );
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("template_id").is_none());
        assert_eq!(value["creation_type"], "openai_only");
        assert_eq!(value["additional_variables"], json!({}));
    }

    #[test]
    fn test_template_only_without_id_is_not_rejected() {
        let request = build_request(
            &sample_fields(),
            &DynamicFieldStore::default(),
            GenerationMode::TemplateOnly,
            None,
        );
        assert_eq!(request.creation_type, GenerationMode::TemplateOnly);
        assert!(request.template_id.is_none());
    }

    #[test]
    fn test_blank_additional_values_pass_through() {
        let mut store = DynamicFieldStore::default();
        store.reset(["speaker", "venue"]);
        store.set("venue", "Hall 2");
        let request = build_request(&sample_fields(), &store, GenerationMode::Hybrid, None);
        assert_eq!(request.additional_variables.get("speaker").map(String::as_str), Some(""));
        assert_eq!(request.additional_variables.get("venue").map(String::as_str), Some("Hall 2"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut store = DynamicFieldStore::default();
        store.reset(["b", "a"]);
        let id = RemoteId::from("1");
        let first = build_request(&sample_fields(), &store, GenerationMode::Hybrid, Some(&id));
        let second = build_request(&sample_fields(), &store, GenerationMode::Hybrid, Some(&id));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
