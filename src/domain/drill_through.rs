// Drill-through configuration domain model and builder
use super::dashboard::DashboardRecord;
use super::error::TagError;
use super::tag::{classify_tags, decode_parameter_tag, TagMarkers, CUSTOM_EVENT_PREFIX};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Value shape of a drill-through parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    HierarchyArray,
    Hierarchy,
    NumericArray,
    Numeric,
    Datetime,
    /// Type label outside the supported set, passed through as written.
    Other(String),
}

impl ParameterType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "hierarchy_array" => ParameterType::HierarchyArray,
            "hierarchy" => ParameterType::Hierarchy,
            "numeric_array" => ParameterType::NumericArray,
            "numeric" => ParameterType::Numeric,
            "datetime" => ParameterType::Datetime,
            other => ParameterType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::HierarchyArray => "hierarchy_array",
            ParameterType::Hierarchy => "hierarchy",
            ParameterType::NumericArray => "numeric_array",
            ParameterType::Numeric => "numeric",
            ParameterType::Datetime => "datetime",
            ParameterType::Other(raw) => raw,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ParameterType::Other(_))
    }
}

impl Serialize for ParameterType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomEventSpec {
    pub required_parameters: Vec<Parameter>,
}

/// Custom events declared on one dashboard, keyed by event name in declaration order.
pub type CustomEvents = IndexMap<String, CustomEventSpec>;

/// Routing configuration for a dashboard reachable only through a custom event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillThroughConfig {
    pub id: String,
    pub name: String,
    /// Primary event, see [`select_primary_event`]. Empty when no ce- tag is present.
    #[serde(rename = "eventName")]
    pub event_name: String,
    #[serde(rename = "customEvents")]
    pub custom_events: CustomEvents,
    /// Parameter names across all events in tag order, not deduplicated.
    pub parameters: Vec<String>,
}

/// A dashboard should declare exactly one event. When several are declared the
/// last one in tag order is the primary event.
pub fn select_primary_event<'a>(declared: &[&'a str]) -> Option<&'a str> {
    declared.last().copied()
}

/// Builds the drill-through configuration of a dashboard carrying the drill-through marker.
pub struct DrillThroughConfigBuilder<'a> {
    markers: &'a TagMarkers,
}

impl<'a> DrillThroughConfigBuilder<'a> {
    pub fn new(markers: &'a TagMarkers) -> Self {
        Self { markers }
    }

    pub fn build(&self, dashboard: &DashboardRecord) -> Result<DrillThroughConfig, TagError> {
        let classified = classify_tags(&dashboard.tags, self.markers);

        // All events are declared before any parameter is resolved, whatever the tag order.
        let declared: Vec<&str> = classified
            .custom_events
            .iter()
            .filter_map(|tag| tag.strip_prefix(CUSTOM_EVENT_PREFIX))
            .collect();

        let mut custom_events = CustomEvents::new();
        for event in &declared {
            if event.is_empty() || event.contains('-') {
                tracing::warn!(
                    dashboard = %dashboard.id,
                    "Event name '{}' cannot be referenced by parameter tags",
                    event
                );
            }
            custom_events.insert(event.to_string(), CustomEventSpec::default());
        }

        let event_name = select_primary_event(&declared).unwrap_or_default().to_string();
        if custom_events.len() > 1 {
            tracing::warn!(
                dashboard = %dashboard.id,
                "Dashboard declares {} custom events, using '{}' as primary event",
                custom_events.len(),
                event_name
            );
        }

        let mut parameters = Vec::with_capacity(classified.parameters.len());
        for tag in &classified.parameters {
            let (decoded, spec) = decode_parameter_tag(tag, &mut custom_events)?;
            let parameter_type = ParameterType::parse(decoded.parameter_type);
            if !parameter_type.is_supported() {
                tracing::warn!(
                    dashboard = %dashboard.id,
                    "Tag {} uses unsupported parameter type '{}'",
                    tag,
                    decoded.parameter_type
                );
            }

            spec.required_parameters.push(Parameter {
                name: decoded.parameter_name.to_string(),
                parameter_type,
            });
            parameters.push(decoded.parameter_name.to_string());
        }

        for tag in &classified.unrecognized {
            tracing::warn!(
                dashboard = %dashboard.id,
                "Tag {} is not recognized and will be ignored",
                tag
            );
        }

        Ok(DrillThroughConfig {
            id: dashboard.id.clone(),
            name: dashboard.name.clone(),
            event_name,
            custom_events,
            parameters,
        })
    }
}
