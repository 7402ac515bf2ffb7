//! Table node view model.

use crate::context::ModelingContext;
use crate::graph::layout::Position;
use crate::infer::Relationship;
use crate::schema::TableData;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node type registered with the renderer for table boxes
pub const TABLE_NODE_TYPE: &str = "tableBox";

/// Side of a node where edges attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Left,
    Right,
    Top,
    Bottom,
}

/// Column row inside a table box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
    pub required: bool,
    pub key: bool,
    pub foreign_key: bool,
}

/// Summary counter shown under the columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeSection {
    pub title: String,
    pub count: usize,
}

/// Declared reference shown in the node's relation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeRelation {
    #[serde(rename = "type")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub title: String,
    pub columns: Vec<NodeColumn>,
    pub sections: Vec<NodeSection>,
    pub relations: Vec<NodeRelation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub connection_details: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_position: Option<Position>,
}

/// One table in the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub data: NodeData,
    pub position: Position,
    pub source_position: HandlePosition,
    pub target_position: HandlePosition,
}

impl DiagramNode {
    /// Build an unplaced node for a table
    pub fn from_table(table: &TableData, context: Option<&ModelingContext>) -> Self {
        let columns = table
            .columns
            .iter()
            .map(|col| NodeColumn {
                name: col.name.clone(),
                col_type: col.col_type.clone(),
                required: col.is_identity(),
                key: col.is_identity(),
                foreign_key: col.is_foreign_key,
            })
            .collect();

        let relations = table
            .columns
            .iter()
            .filter_map(|col| {
                col.explicit_reference().map(|r| NodeRelation {
                    description: format!("References {} via {}", r.table, col.name),
                })
            })
            .collect();

        Self {
            id: table.name.clone(),
            node_type: TABLE_NODE_TYPE.to_string(),
            data: NodeData {
                title: table.name.clone(),
                columns,
                sections: vec![NodeSection {
                    title: "Total Columns".to_string(),
                    count: table.columns.len(),
                }],
                relations,
                project_name: context.map(|c| c.project_name.clone()),
                connection_details: context
                    .map(|c| c.connection_details.clone())
                    .unwrap_or(Value::Null),
                grid_position: None,
            },
            position: Position::default(),
            source_position: HandlePosition::Right,
            target_position: HandlePosition::Left,
        }
    }

    /// Flag columns that are the source of an inferred relationship
    pub fn mark_foreign_keys(&mut self, relationships: &[Relationship]) {
        for rel in relationships.iter().filter(|r| r.source_table == self.id) {
            if let Some(col) = self
                .data
                .columns
                .iter_mut()
                .find(|c| c.name == rel.source_column)
            {
                col.foreign_key = true;
            }
        }
    }

    pub fn column_count(&self) -> usize {
        self.data.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    #[test]
    fn test_from_table() {
        let table = TableData::new(
            "orders",
            vec![
                Column::new("id", "int"),
                Column::new("buyer", "int").references("customers", "id"),
                Column::new("note", "text"),
            ],
        );
        let ctx = ModelingContext::new("shop", vec!["orders".into()]);
        let node = DiagramNode::from_table(&table, Some(&ctx));

        assert_eq!(node.id, "orders");
        assert_eq!(node.node_type, "tableBox");
        assert!(node.data.columns[0].key && node.data.columns[0].required);
        assert!(node.data.columns[1].foreign_key);
        assert!(!node.data.columns[2].key);
        assert_eq!(node.data.sections[0].count, 3);
        assert_eq!(
            node.data.relations[0].description,
            "References customers via buyer"
        );
        assert_eq!(node.data.project_name.as_deref(), Some("shop"));
        assert_eq!(node.source_position, HandlePosition::Right);
        assert_eq!(node.target_position, HandlePosition::Left);
    }

    #[test]
    fn test_serialized_shape() {
        let table = TableData::new("users", vec![Column::new("id", "int")]);
        let node = DiagramNode::from_table(&table, None);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "tableBox");
        assert_eq!(json["sourcePosition"], "right");
        assert_eq!(json["data"]["columns"][0]["foreignKey"], false);
        assert!(json["data"].get("projectName").is_none());
        assert!(json["data"].get("connectionDetails").is_none());
    }
}
