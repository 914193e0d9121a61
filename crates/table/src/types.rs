use serde::{Deserialize, Serialize};

/// Persisted attribute set for one vector record
///
/// `vector` components travel as decimal strings, the table's numeric wire
/// form. Every attribute except `id` defaults when absent so items written
/// by older schema versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableItem {
    /// Primary key
    pub id: String,

    /// Text payload
    #[serde(default)]
    pub content: String,

    /// Decimal-encoded vector components
    #[serde(default)]
    pub vector: Vec<String>,

    /// Grouping key (secondary index)
    #[serde(default)]
    pub source: String,

    /// Page number within the source
    #[serde(default)]
    pub page: u32,

    /// Opaque metadata blob (JSON object string)
    #[serde(default)]
    pub metadata: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_default() {
        let item: TableItem = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(item.id, "abc");
        assert_eq!(item.content, "");
        assert!(item.vector.is_empty());
        assert_eq!(item.source, "");
        assert_eq!(item.page, 0);
        assert_eq!(item.metadata, "");
    }

    #[test]
    fn test_full_round_trip() {
        let item = TableItem {
            id: "id-1".to_string(),
            content: "hello".to_string(),
            vector: vec!["0.5".to_string(), "-1".to_string()],
            source: "doc.pdf".to_string(),
            page: 3,
            metadata: r#"{"source":"doc.pdf"}"#.to_string(),
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: TableItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
