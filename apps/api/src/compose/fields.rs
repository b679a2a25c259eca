use serde::{Deserialize, Serialize};

/// One of the fixed form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseField {
    NewsType,
    Place,
    Source,
    Event,
    Date,
    Participants,
    EventDetails,
}

impl BaseField {
    pub const ALL: [BaseField; 7] = [
        BaseField::NewsType,
        BaseField::Place,
        BaseField::Source,
        BaseField::Event,
        BaseField::Date,
        BaseField::Participants,
        BaseField::EventDetails,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BaseField::NewsType => "news_type",
            BaseField::Place => "place",
            BaseField::Source => "source",
            BaseField::Event => "event",
            BaseField::Date => "date",
            BaseField::Participants => "participants",
            BaseField::EventDetails => "event_details",
        }
    }

    /// Participants and event details may be left blank; the rest must be
    /// filled before submission.
    pub fn is_required(&self) -> bool {
        !matches!(self, BaseField::Participants | BaseField::EventDetails)
    }
}

/// Current values of the base inputs, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFields {
    pub news_type: String,
    pub place: String,
    pub source: String,
    pub event: String,
    pub date: String,
    pub participants: String,
    pub event_details: String,
}

impl BaseFields {
    pub fn get(&self, field: BaseField) -> &str {
        match field {
            BaseField::NewsType => &self.news_type,
            BaseField::Place => &self.place,
            BaseField::Source => &self.source,
            BaseField::Event => &self.event,
            BaseField::Date => &self.date,
            BaseField::Participants => &self.participants,
            BaseField::EventDetails => &self.event_details,
        }
    }

    pub fn set(&mut self, field: BaseField, value: String) {
        let slot = match field {
            BaseField::NewsType => &mut self.news_type,
            BaseField::Place => &mut self.place,
            BaseField::Source => &mut self.source,
            BaseField::Event => &mut self.event,
            BaseField::Date => &mut self.date,
            BaseField::Participants => &mut self.participants,
            BaseField::EventDetails => &mut self.event_details,
        };
        *slot = value;
    }

    /// Required fields that are still blank, in form order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        BaseField::ALL
            .iter()
            .filter(|f| f.is_required() && self.get(**f).trim().is_empty())
            .map(|f| f.name())
            .collect()
    }
}

/// Server-side generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GenerationMode {
    #[default]
    #[serde(rename = "template_only")]
    TemplateOnly,
    #[serde(rename = "openai_only")]
    ModelOnly,
    #[serde(rename = "hybrid")]
    Hybrid,
}
