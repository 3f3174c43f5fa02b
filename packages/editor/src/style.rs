//! # Node Styles
//!
//! Styles are keyed by breakpoint, then by interaction state, then by CSS
//! property. Documents written before breakpoints existed stored a single flat
//! property map; those still load and land in desktop/default.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// CSS property → value
pub type StyleProps = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    #[default]
    Default,
    Hover,
}

/// Default and hover properties for one breakpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateStyles {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default: StyleProps,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hover: StyleProps,
}

impl StateStyles {
    pub fn is_empty(&self) -> bool {
        self.default.is_empty() && self.hover.is_empty()
    }

    fn get(&self, state: InteractionState) -> &StyleProps {
        match state {
            InteractionState::Default => &self.default,
            InteractionState::Hover => &self.hover,
        }
    }

    fn get_mut(&mut self, state: InteractionState) -> &mut StyleProps {
        match state {
            InteractionState::Default => &mut self.default,
            InteractionState::Hover => &mut self.hover,
        }
    }
}

/// Per-breakpoint, per-state style maps for a node
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Styles {
    #[serde(skip_serializing_if = "StateStyles::is_empty")]
    pub desktop: StateStyles,

    #[serde(skip_serializing_if = "StateStyles::is_empty")]
    pub tablet: StateStyles,

    #[serde(skip_serializing_if = "StateStyles::is_empty")]
    pub mobile: StateStyles,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Desktop/default styles from `(property, value)` pairs
    pub fn base<I, K, V>(props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut styles = Self::default();
        styles.desktop.default = props
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        styles
    }

    pub fn get(&self, breakpoint: Breakpoint, state: InteractionState) -> &StyleProps {
        self.breakpoint(breakpoint).get(state)
    }

    pub fn get_mut(&mut self, breakpoint: Breakpoint, state: InteractionState) -> &mut StyleProps {
        match breakpoint {
            Breakpoint::Desktop => self.desktop.get_mut(state),
            Breakpoint::Tablet => self.tablet.get_mut(state),
            Breakpoint::Mobile => self.mobile.get_mut(state),
        }
    }

    /// Shallow merge: incoming keys override, the rest are kept.
    /// Returns whether any value changed.
    pub fn merge(&mut self, breakpoint: Breakpoint, state: InteractionState, partial: StyleProps) -> bool {
        let props = self.get_mut(breakpoint, state);
        let mut changed = false;
        for (key, value) in partial {
            if props.get(&key) != Some(&value) {
                props.insert(key, value);
                changed = true;
            }
        }
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.desktop.is_empty() && self.tablet.is_empty() && self.mobile.is_empty()
    }

    fn breakpoint(&self, breakpoint: Breakpoint) -> &StateStyles {
        match breakpoint {
            Breakpoint::Desktop => &self.desktop,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Mobile => &self.mobile,
        }
    }
}

impl<'de> Deserialize<'de> for Styles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = match Value::deserialize(deserializer)? {
            Value::Object(map) => map,
            Value::Null => return Ok(Styles::default()),
            other => {
                return Err(de::Error::custom(format!(
                    "styles must be an object, got {}",
                    other
                )))
            }
        };

        let nested = !map.is_empty()
            && map.iter().all(|(key, value)| {
                value.is_object() && Breakpoint::ALL.iter().any(|bp| bp.as_str() == key)
            });

        if nested {
            let mut styles = Styles::default();
            for breakpoint in Breakpoint::ALL {
                if let Some(value) = map.get(breakpoint.as_str()) {
                    let state_styles = parse_state_styles(value);
                    match breakpoint {
                        Breakpoint::Desktop => styles.desktop = state_styles,
                        Breakpoint::Tablet => styles.tablet = state_styles,
                        Breakpoint::Mobile => styles.mobile = state_styles,
                    }
                }
            }
            Ok(styles)
        } else {
            // Legacy flat shape
            let mut styles = Styles::default();
            styles.desktop.default = flatten_props(&map);
            Ok(styles)
        }
    }
}

fn parse_state_styles(value: &Value) -> StateStyles {
    let mut out = StateStyles::default();
    if let Some(obj) = value.as_object() {
        if let Some(Value::Object(props)) = obj.get("default") {
            out.default = flatten_props(props);
        }
        if let Some(Value::Object(props)) = obj.get("hover") {
            out.hover = flatten_props(props);
        }
    }
    out
}

fn flatten_props(map: &serde_json::Map<String, Value>) -> StyleProps {
    map.iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.clone(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_is_shallow() {
        let mut styles = Styles::base([("color", "red"), ("padding", "4px")]);
        let mut partial = StyleProps::new();
        partial.insert("color".to_string(), "blue".to_string());
        partial.insert("margin".to_string(), "0".to_string());

        styles.merge(Breakpoint::Desktop, InteractionState::Default, partial);

        let props = styles.get(Breakpoint::Desktop, InteractionState::Default);
        assert_eq!(props["color"], "blue");
        assert_eq!(props["padding"], "4px");
        assert_eq!(props["margin"], "0");
        assert!(styles.get(Breakpoint::Mobile, InteractionState::Hover).is_empty());
    }

    #[test]
    fn test_nested_shape() {
        let styles: Styles = serde_json::from_value(json!({
            "desktop": { "default": { "color": "red" }, "hover": { "color": "blue" } },
            "mobile": { "default": { "width": "100%" } }
        }))
        .unwrap();

        assert_eq!(styles.desktop.default["color"], "red");
        assert_eq!(styles.desktop.hover["color"], "blue");
        assert_eq!(styles.mobile.default["width"], "100%");
        assert!(styles.tablet.is_empty());
    }

    #[test]
    fn test_legacy_flat_shape() {
        let styles: Styles = serde_json::from_value(json!({
            "color": "#4b5563",
            "lineHeight": 1.6
        }))
        .unwrap();

        assert_eq!(styles.desktop.default["color"], "#4b5563");
        assert_eq!(styles.desktop.default["lineHeight"], "1.6");
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let styles = Styles::base([("color", "red")]);
        let json = serde_json::to_value(&styles).unwrap();
        assert_eq!(json, json!({ "desktop": { "default": { "color": "red" } } }));
    }
}
