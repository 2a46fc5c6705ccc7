//! The element model shared with the external diagram engine.
//!
//! The engine's own element model is open-ended; this core only reads and
//! writes the handful of fields involved in icon/label substitution, so the
//! model here is a closed tagged variant with an opaque passthrough arm for
//! everything else.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Rectangle,
    Diamond,
    Ellipse,
}

impl Default for NodeShape {
    fn default() -> Self {
        NodeShape::Rectangle
    }
}

macro_rules! kind_marker {
    ($name:ident, $tag:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            #[serde(rename = $tag)]
            Tag,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::Tag
            }
        }
    };
}

kind_marker!(TextKind, "text");
kind_marker!(NodeKind, "node");
kind_marker!(ImageKind, "image");

/// A text element. When produced by the external conversion step from
/// placeholder-annotated source, `container_id` identifies the node the text
/// decorates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPrimitive {
    #[serde(rename = "type", default)]
    pub kind: TextKind,
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePrimitive {
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub shape: NodeShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// An embedded image element referencing a binary asset by `file_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePrimitive {
    #[serde(rename = "type", default)]
    pub kind: ImageKind,
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub file_id: String,
}

/// One drawable element in the diagram engine's element model.
///
/// Unknown element kinds deserialize into `Other` and are passed through the
/// pipeline unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiagramPrimitive {
    Text(TextPrimitive),
    Node(NodePrimitive),
    Image(ImagePrimitive),
    Other(serde_json::Value),
}

impl DiagramPrimitive {
    pub fn id(&self) -> Option<&str> {
        match self {
            DiagramPrimitive::Text(t) => Some(&t.id),
            DiagramPrimitive::Node(n) => Some(&n.id),
            DiagramPrimitive::Image(i) => Some(&i.id),
            DiagramPrimitive::Other(v) => v.get("id").and_then(|id| id.as_str()),
        }
    }

    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            DiagramPrimitive::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&NodePrimitive> {
        match self {
            DiagramPrimitive::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, DiagramPrimitive::Image(_))
    }
}

/// A binary asset (an icon) embedded into the diagram as a data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryAsset {
    pub id: String,
    pub mime_type: String,
    pub data_url: String,
    /// Millisecond timestamp of when the asset was loaded.
    pub created: u64,
}

/// Output of the external diagram-conversion step.
#[derive(Debug, Clone, Default)]
pub struct ParsedPrimitives {
    pub primitives: Vec<DiagramPrimitive>,
    pub assets: Vec<BinaryAsset>,
}
