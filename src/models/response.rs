use serde_json::{Map, Value};
use xmltree::{Element, XMLNode};

use crate::constants::{annotations, envelope};

/// Decoded XML response tree.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    /// Parses a response body into a tree
    pub fn parse(body: &str) -> Result<Self, xmltree::ParseError> {
        Element::parse(body.as_bytes()).map(|root| XmlDocument { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Text content of the first direct child called `name`
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.root
            .get_child(name)
            .map(|child| child.get_text().map(|t| t.into_owned()).unwrap_or_default())
    }

    /// Appends a text child at the end of the root element
    pub fn append_child(&mut self, name: &str, text: impl Into<String>) {
        let mut child = Element::new(name);
        child.children.push(XMLNode::Text(text.into()));
        self.root.children.push(XMLNode::Element(child));
    }

    /// Copy of the document with every direct child called `name` removed
    pub fn without_children(&self, name: &str) -> XmlDocument {
        let mut root = self.root.clone();
        root.children
            .retain(|node| !matches!(node, XMLNode::Element(e) if e.name == name));
        XmlDocument { root }
    }

    /// Serializes the tree back to XML text
    pub fn to_xml_string(&self) -> Result<String, xmltree::Error> {
        let mut buffer = Vec::new();
        self.root.write(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn is_empty(&self) -> bool {
        self.root.children.iter().all(|node| match node {
            XMLNode::Text(text) => text.trim().is_empty(),
            XMLNode::Element(_) | XMLNode::CData(_) => false,
            _ => true,
        })
    }
}

/// A decoded vendor response, shaped by the configured output format.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Structured tree for `XML`
    Xml(XmlDocument),
    /// String-keyed mapping for `ARRAY`
    Mapping(Map<String, Value>),
    /// Dynamic JSON object for `OBJECT`
    Object(Value),
    /// Body text for `JSON`, `LINE`, `CONSOLE` and `VAR`
    Raw(String),
}

impl ApiResponse {
    /// Top-level field rendered as text. Raw responses have no fields.
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            ApiResponse::Xml(doc) => doc.child_text(name),
            ApiResponse::Mapping(map) => map.get(name).map(scalar_text),
            ApiResponse::Object(value) => value.get(name).map(scalar_text),
            ApiResponse::Raw(_) => None,
        }
    }

    /// The vendor's `ERROR` envelope field
    pub fn error_field(&self) -> Option<String> {
        self.field(envelope::ERROR_FIELD)
    }

    /// Remaining quota reported in `APIRequestsRemaining`, if present and numeric
    pub fn requests_remaining(&self) -> Option<u32> {
        self.field(envelope::REQUESTS_REMAINING_FIELD)
            .and_then(|text| text.trim().parse().ok())
    }

    pub fn content_hash(&self) -> Option<String> {
        self.field(annotations::CONTENT_HASH_FIELD)
    }

    pub fn source_url(&self) -> Option<String> {
        self.field(annotations::SOURCE_URL_FIELD)
    }

    /// Present-and-non-empty check used to decide cache hits
    pub fn is_empty(&self) -> bool {
        match self {
            ApiResponse::Xml(doc) => doc.is_empty(),
            ApiResponse::Mapping(map) => map.is_empty(),
            ApiResponse::Object(Value::Object(map)) => map.is_empty(),
            ApiResponse::Object(value) => value.is_null(),
            ApiResponse::Raw(body) => body.trim().is_empty(),
        }
    }

    /// Adds a string field at the top level. Raw bodies are left untouched.
    pub(crate) fn annotate(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self {
            ApiResponse::Xml(doc) => doc.append_child(name, value),
            ApiResponse::Mapping(map) => {
                map.insert(name.to_string(), Value::String(value));
            }
            ApiResponse::Object(Value::Object(map)) => {
                map.insert(name.to_string(), Value::String(value));
            }
            ApiResponse::Object(_) | ApiResponse::Raw(_) => {}
        }
    }

    /// Human-readable rendering: pretty JSON, XML text or the raw body
    pub fn to_display_string(&self) -> String {
        match self {
            ApiResponse::Xml(doc) => doc
                .to_xml_string()
                .unwrap_or_else(|e| format!("<unserializable XML: {e}>")),
            ApiResponse::Mapping(map) => {
                serde_json::to_string_pretty(map).unwrap_or_else(|_| format!("{map:?}"))
            }
            ApiResponse::Object(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ApiResponse::Raw(body) => body.clone(),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
