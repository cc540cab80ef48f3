// Tag grammar - classification and parameter tag decoding
//
//   auth0-mt                          scope marker
//   auth0-mt-dt                       drill-through marker
//   ce-<event>                        custom event triggering the drill-through
//   p-<event>-<type>-<name>           required parameter of <event>; <name> may contain '-'
use super::dashboard::RawTag;
use super::drill_through::{CustomEventSpec, CustomEvents};
use super::error::TagError;
use serde::Deserialize;

pub const CUSTOM_EVENT_PREFIX: &str = "ce-";
pub const PARAMETER_PREFIX: &str = "p-";
const DELIMITER: char = '-';

/// The two fixed-string tags that toggle classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagMarkers {
    #[serde(default = "default_scope_marker")]
    pub scope_marker: String,
    #[serde(default = "default_drill_through_marker")]
    pub drill_through_marker: String,
}

fn default_scope_marker() -> String {
    "auth0-mt".to_string()
}

fn default_drill_through_marker() -> String {
    "auth0-mt-dt".to_string()
}

impl Default for TagMarkers {
    fn default() -> Self {
        Self {
            scope_marker: default_scope_marker(),
            drill_through_marker: default_drill_through_marker(),
        }
    }
}

impl TagMarkers {
    fn is_marker(&self, tag: &str) -> bool {
        tag == self.scope_marker || tag == self.drill_through_marker
    }
}

/// A dashboard's non-marker tags split by prefix, each bucket in input order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClassifiedTags<'a> {
    pub custom_events: Vec<&'a str>,
    pub parameters: Vec<&'a str>,
    pub unrecognized: Vec<&'a str>,
}

/// Partition tags into custom-event, parameter and unrecognized buckets.
/// Marker tags are dropped; every other tag lands in exactly one bucket.
pub fn classify_tags<'a>(tags: &'a [RawTag], markers: &TagMarkers) -> ClassifiedTags<'a> {
    let mut classified = ClassifiedTags::default();

    for raw in tags {
        let tag = raw.tag.as_str();
        if markers.is_marker(tag) {
            continue;
        }

        if tag.starts_with(CUSTOM_EVENT_PREFIX) {
            classified.custom_events.push(tag);
        } else if tag.starts_with(PARAMETER_PREFIX) {
            classified.parameters.push(tag);
        } else {
            classified.unrecognized.push(tag);
        }
    }

    classified
}

/// Fields of a `p-<event>-<type>-<name>` tag, borrowed from the tag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterTag<'a> {
    pub event_name: &'a str,
    pub parameter_type: &'a str,
    pub parameter_name: &'a str,
}

impl<'a> ParameterTag<'a> {
    /// Scan for the first two delimiters only. The remainder is the parameter name verbatim.
    pub fn parse(tag: &'a str) -> Result<Self, TagError> {
        let malformed = |reason| TagError::MalformedParameterTag {
            tag: tag.to_string(),
            reason,
        };

        let body = tag
            .strip_prefix(PARAMETER_PREFIX)
            .ok_or_else(|| malformed("missing 'p-' prefix"))?;

        let (event_name, rest) = body
            .split_once(DELIMITER)
            .ok_or_else(|| malformed("expected p-<event>-<type>-<name>"))?;
        let (parameter_type, parameter_name) = rest
            .split_once(DELIMITER)
            .ok_or_else(|| malformed("expected p-<event>-<type>-<name>"))?;

        if event_name.is_empty() {
            return Err(malformed("empty event name"));
        }
        if parameter_type.is_empty() {
            return Err(malformed("empty parameter type"));
        }
        if parameter_name.is_empty() {
            return Err(malformed("empty parameter name"));
        }

        Ok(Self {
            event_name,
            parameter_type,
            parameter_name,
        })
    }
}

/// Decode a parameter tag and resolve the event it belongs to in `events`.
pub fn decode_parameter_tag<'a, 'e>(
    tag: &'a str,
    events: &'e mut CustomEvents,
) -> Result<(ParameterTag<'a>, &'e mut CustomEventSpec), TagError> {
    let parameter = ParameterTag::parse(tag)?;

    let spec = events
        .get_mut(parameter.event_name)
        .ok_or_else(|| TagError::UnknownEventReference {
            tag: tag.to_string(),
            event: parameter.event_name.to_string(),
        })?;

    Ok((parameter, spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tags: &[&str]) -> Vec<RawTag> {
        tags.iter().map(|t| RawTag::new(*t)).collect()
    }

    #[test]
    fn test_classify_partitions_every_non_marker_tag() {
        let tags = raw(&[
            "auth0-mt",
            "p-purchase-numeric-amount",
            "foo-bar",
            "auth0-mt-dt",
            "ce-purchase",
            "p-purchase-datetime-at",
            "cex",
        ]);
        let classified = classify_tags(&tags, &TagMarkers::default());

        assert_eq!(classified.custom_events, vec!["ce-purchase"]);
        assert_eq!(
            classified.parameters,
            vec!["p-purchase-numeric-amount", "p-purchase-datetime-at"]
        );
        assert_eq!(classified.unrecognized, vec!["foo-bar", "cex"]);

        let total = classified.custom_events.len()
            + classified.parameters.len()
            + classified.unrecognized.len();
        assert_eq!(total, tags.len() - 2);
    }

    #[test]
    fn test_classify_honours_custom_markers() {
        let markers = TagMarkers {
            scope_marker: "nav".to_string(),
            drill_through_marker: "nav-dt".to_string(),
        };
        let tags = raw(&["nav", "nav-dt", "auth0-mt"]);
        let classified = classify_tags(&tags, &markers);

        assert!(classified.custom_events.is_empty());
        assert_eq!(classified.unrecognized, vec!["auth0-mt"]);
    }

    #[test]
    fn test_parse_parameter_tag() {
        let parsed = ParameterTag::parse("p-purchase-numeric-amount").unwrap();
        assert_eq!(parsed.event_name, "purchase");
        assert_eq!(parsed.parameter_type, "numeric");
        assert_eq!(parsed.parameter_name, "amount");
    }

    #[test]
    fn test_parse_keeps_dashes_in_parameter_name() {
        let parsed = ParameterTag::parse("p-purchase-numeric_array-amount-usd-net").unwrap();
        assert_eq!(parsed.parameter_type, "numeric_array");
        assert_eq!(parsed.parameter_name, "amount-usd-net");
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        for tag in [
            "p-purchase",
            "p-purchase-numeric",
            "p--numeric-amount",
            "p-purchase--amount",
            "p-purchase-numeric-",
            "ce-purchase",
        ] {
            let err = ParameterTag::parse(tag).unwrap_err();
            assert!(
                matches!(err, TagError::MalformedParameterTag { .. }),
                "{} should be malformed, got {:?}",
                tag,
                err
            );
        }
    }

    #[test]
    fn test_decode_requires_declared_event() {
        let mut events = CustomEvents::new();
        events.insert("purchase".to_string(), CustomEventSpec::default());

        let (decoded, spec) =
            decode_parameter_tag("p-purchase-numeric-amount", &mut events).unwrap();
        assert_eq!(decoded.event_name, "purchase");
        assert!(spec.required_parameters.is_empty());

        let err = decode_parameter_tag("p-checkout-numeric-amount", &mut events).unwrap_err();
        assert_eq!(
            err,
            TagError::UnknownEventReference {
                tag: "p-checkout-numeric-amount".to_string(),
                event: "checkout".to_string(),
            }
        );
    }
}
