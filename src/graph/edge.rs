//! Relationship edge view model.

use crate::config::EdgeStyleConfig;
use crate::infer::{RelationType, Relationship};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Edge path type understood by the renderer
pub const EDGE_TYPE: &str = "smoothstep";
pub const SOURCE_HANDLE: &str = "right";
pub const TARGET_HANDLE: &str = "left";

/// Arrowhead shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Open arrow, used for one-to-one and many-to-many
    Arrow,
    /// Filled arrow, used for directed references
    ArrowClosed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Marker {
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub width: u32,
    pub height: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelBgStyle {
    pub fill: String,
    pub fill_opacity: f64,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub fill: String,
    pub font_weight: u32,
    pub font_size: u32,
}

/// Relationship details carried alongside the visual edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub source_column: String,
    pub target_column: String,
    pub relation_type: RelationType,
}

/// One relationship in the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub animated: bool,
    pub style: StrokeStyle,
    pub label: String,
    pub label_bg_padding: [u32; 2],
    pub label_bg_border_radius: u32,
    pub label_bg_style: LabelBgStyle,
    pub label_style: LabelStyle,
    pub marker_end: Marker,
    pub data: EdgeData,
}

/// Arrowhead for a relation type: open for symmetric, closed otherwise
pub fn marker_for(relation: RelationType, style: &EdgeStyleConfig) -> Marker {
    let kind = if relation.is_symmetric() {
        MarkerKind::Arrow
    } else {
        MarkerKind::ArrowClosed
    };
    Marker {
        kind,
        width: style.marker_size,
        height: style.marker_size,
        color: style.stroke.clone(),
    }
}

/// Convert relationships to edges, numbered `edge-0`, `edge-1`, ... in order
pub fn build_edges(relationships: &[Relationship], style: &EdgeStyleConfig) -> Vec<DiagramEdge> {
    relationships
        .iter()
        .enumerate()
        .map(|(i, rel)| DiagramEdge {
            id: format!("edge-{}", i),
            source: rel.source_table.clone(),
            target: rel.target_table.clone(),
            source_handle: SOURCE_HANDLE.to_string(),
            target_handle: TARGET_HANDLE.to_string(),
            edge_type: EDGE_TYPE.to_string(),
            animated: false,
            style: StrokeStyle {
                stroke: style.stroke.clone(),
                stroke_width: style.stroke_width,
            },
            label: rel.source_column.clone(),
            label_bg_padding: [8, 4],
            label_bg_border_radius: 4,
            label_bg_style: LabelBgStyle {
                fill: style.label_fill.clone(),
                fill_opacity: style.label_fill_opacity,
                stroke: style.stroke.clone(),
                stroke_width: 1.0,
            },
            label_style: LabelStyle {
                fill: style.label_color.clone(),
                font_weight: style.label_font_weight,
                font_size: style.label_font_size,
            },
            marker_end: marker_for(rel.relation_type, style),
            data: EdgeData {
                source_column: rel.source_column.clone(),
                target_column: rel.target_column.clone(),
                relation_type: rel.relation_type,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::MatchRule;

    fn rel(source: &str, column: &str, target: &str, relation_type: RelationType) -> Relationship {
        Relationship {
            source_table: source.to_string(),
            source_column: column.to_string(),
            target_table: target.to_string(),
            target_column: "id".to_string(),
            relation_type,
            rule: MatchRule::Suffix,
        }
    }

    #[test]
    fn test_markers_by_relation_type() {
        let style = EdgeStyleConfig::default();
        assert_eq!(
            marker_for(RelationType::ManyToOne, &style).kind,
            MarkerKind::ArrowClosed
        );
        assert_eq!(
            marker_for(RelationType::OneToMany, &style).kind,
            MarkerKind::ArrowClosed
        );
        assert_eq!(
            marker_for(RelationType::OneToOne, &style).kind,
            MarkerKind::Arrow
        );
        assert_eq!(
            marker_for(RelationType::ManyToMany, &style).kind,
            MarkerKind::Arrow
        );
    }

    #[test]
    fn test_build_edges() {
        let rels = vec![
            rel("orders", "customer_id", "customers", RelationType::ManyToOne),
            rel("order_items", "order_id", "orders", RelationType::ManyToMany),
        ];
        let edges = build_edges(&rels, &EdgeStyleConfig::default());

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].id, "edge-0");
        assert_eq!(edges[1].id, "edge-1");
        assert_eq!(edges[0].label, "customer_id");
        assert_eq!(edges[0].source, "orders");
        assert_eq!(edges[0].target, "customers");
        assert_eq!(edges[1].marker_end.kind, MarkerKind::Arrow);
        assert_eq!(edges[1].marker_end.color, "#6366f1");
    }

    #[test]
    fn test_serialized_shape() {
        let rels = vec![rel("orders", "customer_id", "customers", RelationType::ManyToOne)];
        let edges = build_edges(&rels, &EdgeStyleConfig::default());
        let json = serde_json::to_value(&edges[0]).unwrap();

        assert_eq!(json["type"], "smoothstep");
        assert_eq!(json["sourceHandle"], "right");
        assert_eq!(json["markerEnd"]["type"], "arrowclosed");
        assert_eq!(json["style"]["strokeWidth"], 2.0);
        assert_eq!(json["data"]["relationType"], "many-to-one");
    }
}
