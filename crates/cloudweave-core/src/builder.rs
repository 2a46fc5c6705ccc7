//! Replaces placeholder-marked text primitives with provider-specific
//! icon + label compound elements.

use crate::catalog::{
    CloudProvider, DEFAULT_SHAPE_STYLE, DIAMOND_SHAPE_STYLE, ELLIPSE_SHAPE_STYLE, IconCatalogEntry,
    LABEL_FONT_SIZE, LABEL_OFFSET_X, LABEL_OFFSET_Y, ShapeStyle, provider_catalog,
};
use crate::primitive::{
    BinaryAsset, DiagramPrimitive, ImagePrimitive, NodeShape, TextPrimitive,
};
use crate::Result;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Resolves an opaque asset locator to raw bytes.
///
/// The fetch capability is external (HTTP, bundled resources, a test double);
/// the pipeline only requires that each icon either loads or fails in
/// isolation.
pub trait AssetFetcher {
    fn fetch(&self, locator: &str) -> impl Future<Output = Result<Vec<u8>>>;
}

/// Fallback icon substituted when an asset fails to load: a neutral "Icon"
/// box, pre-encoded so substitution itself cannot fail.
pub const PLACEHOLDER_ICON_DATA_URL: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCA2NCA2NCI+PHJlY3QgeD0iMTAiIHk9IjEwIiB3aWR0aD0iNDQiIGhlaWdodD0iNDQiIGZpbGw9IiNmMmYyZjIiIHN0cm9rZT0iI2JiYiIgc3Ryb2tlLXdpZHRoPSIyIi8+PHRleHQgeD0iMzIiIHk9IjMyIiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMTIiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGFsaWdubWVudC1iYXNlbGluZT0ibWlkZGxlIj5JY29uPC90ZXh0Pjwvc3ZnPg==";

#[derive(Debug, Clone, Default)]
pub struct CompoundOutput {
    pub primitives: Vec<DiagramPrimitive>,
    pub assets: Vec<BinaryAsset>,
}

fn shape_style(shape: NodeShape) -> ShapeStyle {
    match shape {
        NodeShape::Rectangle => DEFAULT_SHAPE_STYLE,
        NodeShape::Diamond => DIAMOND_SHAPE_STYLE,
        NodeShape::Ellipse => ELLIPSE_SHAPE_STYLE,
    }
}

/// Whether a text primitive carries a placeholder marker. The resolver emits
/// 18 `X`s per reserved line; matching on a shorter run tolerates markers the
/// conversion step re-wrapped or truncated.
fn is_placeholder_text(text: &str) -> bool {
    text.contains("XXXX")
}

/// Finds the catalog entry whose canonical key is embedded in a placeholder
/// text, scanning by candidate key over the case-normalized,
/// whitespace-stripped text. First catalog match wins.
fn match_catalog_entry(
    provider: CloudProvider,
    text: &str,
) -> Option<&'static IconCatalogEntry> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    provider_catalog(provider)
        .iter()
        .find(|entry| normalized.contains(entry.key))
}

async fn load_icon_data_url<F: AssetFetcher>(fetcher: &F, locator: &str) -> String {
    match fetcher.fetch(locator).await {
        Ok(bytes) => format!("data:image/svg+xml;base64,{}", BASE64.encode(bytes)),
        Err(err) => {
            tracing::warn!(locator, error = %err, "icon asset failed to load, using placeholder");
            PLACEHOLDER_ICON_DATA_URL.to_string()
        }
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

struct MatchedPlaceholder {
    container_id: String,
    entry: &'static IconCatalogEntry,
    label_x: f64,
    label_y: f64,
}

/// Replaces each matched placeholder text primitive with an icon primitive
/// (positioned relative to its parent node per the node's shape style) and a
/// separate label primitive carrying the catalog label.
///
/// Output ordering: unaffected originals first (matched placeholders
/// removed), then icons, then labels, so icons render below their labels.
/// Never fails: an unloadable icon falls back to [`PLACEHOLDER_ICON_DATA_URL`]
/// and unknown keys leave the node untouched.
pub async fn build_compound_elements<F: AssetFetcher>(
    primitives: Vec<DiagramPrimitive>,
    provider: CloudProvider,
    fetcher: &F,
) -> CompoundOutput {
    let mut matches: Vec<MatchedPlaceholder> = Vec::new();
    let mut assets: Vec<BinaryAsset> = Vec::new();
    let mut delete_ids: Vec<String> = Vec::new();

    for primitive in &primitives {
        let Some(text) = primitive.as_text() else {
            continue;
        };
        if !is_placeholder_text(&text.text) {
            continue;
        }

        let Some(entry) = match_catalog_entry(provider, &text.text) else {
            tracing::debug!(
                provider = %provider,
                text = %text.text,
                "placeholder did not match any catalog key, leaving node as-is"
            );
            continue;
        };

        if !assets.iter().any(|a| a.id == entry.key) {
            let data_url = load_icon_data_url(fetcher, entry.asset_ref).await;
            assets.push(BinaryAsset {
                id: entry.key.to_string(),
                mime_type: "image/svg+xml".to_string(),
                data_url,
                created: now_millis(),
            });
        }

        matches.push(MatchedPlaceholder {
            container_id: text.container_id.clone().unwrap_or_default(),
            entry,
            label_x: text.x + LABEL_OFFSET_X,
            label_y: text.y + LABEL_OFFSET_Y,
        });
        delete_ids.push(text.id.clone());
    }

    let mut icons: Vec<DiagramPrimitive> = Vec::new();
    let mut labels: Vec<DiagramPrimitive> = Vec::new();

    for matched in &matches {
        let container = primitives
            .iter()
            .filter_map(|p| p.as_node())
            .find(|n| n.id == matched.container_id);
        let (x, y, shape) = match container {
            Some(node) => (node.x, node.y, node.shape),
            None => (0.0, 0.0, NodeShape::default()),
        };
        let style = shape_style(shape);

        icons.push(DiagramPrimitive::Image(ImagePrimitive {
            kind: Default::default(),
            id: uuid::Uuid::new_v4().to_string(),
            x: x + style.offset_x,
            y: y + style.offset_y,
            width: style.width,
            height: style.height,
            file_id: matched.entry.key.to_string(),
        }));
        labels.push(DiagramPrimitive::Text(TextPrimitive {
            kind: Default::default(),
            id: uuid::Uuid::new_v4().to_string(),
            x: matched.label_x,
            y: matched.label_y,
            text: matched.entry.label.to_string(),
            container_id: None,
            font_size: Some(LABEL_FONT_SIZE),
        }));
    }

    let mut out: Vec<DiagramPrimitive> = primitives
        .into_iter()
        .filter(|p| p.id().is_none_or(|id| !delete_ids.iter().any(|d| d == id)))
        .collect();
    out.extend(icons);
    out.extend(labels);

    CompoundOutput {
        primitives: out,
        assets,
    }
}
