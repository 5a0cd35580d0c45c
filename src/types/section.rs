use std::collections::BTreeMap;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use serde_json::{Map, Value};

/// Page every site is expected to have; unknown page paths fall back to it.
pub const HOME_PAGE: &str = "home";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeroSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeaturesSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FooterSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub links: Vec<FooterLink>,
}

/// One typed block of page content.
///
/// Encoded as a JSON object whose `type` field selects the variant. Objects
/// with any other `type` are kept as [`Section::Custom`] with every other
/// field preserved, so section kinds this crate does not know about survive
/// a read/write cycle through the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Hero(HeroSection),
    Features(FeaturesSection),
    Footer(FooterSection),
    Custom {
        kind: String,
        fields: Map<String, Value>,
    },
}

impl Section {
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Section::Hero(_) => "hero",
            Section::Features(_) => "features",
            Section::Footer(_) => "footer",
            Section::Custom { kind, .. } => kind,
        }
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            Section::Hero(hero) => serde_json::to_value(hero),
            Section::Features(features) => serde_json::to_value(features),
            Section::Footer(footer) => serde_json::to_value(footer),
            Section::Custom { fields, .. } => Ok(Value::Object(fields.clone())),
        };

        let mut map = match body.map_err(ser::Error::custom)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        map.insert("type".to_string(), Value::String(self.kind().to_string()));
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        let kind = match fields.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(_) => return Err(de::Error::custom("section `type` must be a string")),
            None => return Err(de::Error::missing_field("type")),
        };

        match kind.as_str() {
            "hero" => return from_fields(fields).map(Section::Hero),
            "features" => return from_fields(fields).map(Section::Features),
            "footer" => return from_fields(fields).map(Section::Footer),
            _ => {}
        }

        Ok(Section::Custom { kind, fields })
    }
}

fn from_fields<T: DeserializeOwned, E: de::Error>(fields: Map<String, Value>) -> Result<T, E> {
    serde_json::from_value(Value::Object(fields)).map_err(E::custom)
}

/// Mapping from page path (`"home"`, `"about"`, ...) to its sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageDocument(BTreeMap<String, Vec<Section>>);

impl PageDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, path: impl Into<String>, sections: Vec<Section>) -> Self {
        self.0.insert(path.into(), sections);
        self
    }

    #[must_use]
    pub fn page(&self, path: &str) -> Option<&[Section]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
