use serde::{Deserialize, Serialize};

/// Identifier returned by the WIQL query, in service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WorkItemRef {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct WiqlResponse {
    #[serde(rename = "workItems", default)]
    pub work_items: Vec<WorkItemRef>,
}

#[derive(Debug, Deserialize)]
pub struct WorkItemsResponse {
    pub value: Vec<WorkItemDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemDetail {
    pub id: u64,
    pub fields: DetailFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailFields {
    #[serde(rename = "System.Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Usually an integer 1-4, but the service types it as a plain number.
    #[serde(
        rename = "Microsoft.VSTS.Common.Priority",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<serde_json::Number>,
    #[serde(rename = "System.State", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl WorkItemDetail {
    pub fn title(&self) -> Option<&str> {
        self.fields.title.as_deref()
    }

    pub fn priority(&self) -> Option<&serde_json::Number> {
        self.fields.priority.as_ref()
    }

    pub fn state(&self) -> Option<&str> {
        self.fields.state.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiql_response_preserves_order() {
        let resp: WiqlResponse =
            serde_json::from_str(r#"{"queryType":"flat","workItems":[{"id":5,"url":"x"},{"id":3},{"id":9}]}"#)
                .unwrap();
        let ids: Vec<u64> = resp.work_items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn wiql_response_without_work_items_is_empty() {
        let resp: WiqlResponse = serde_json::from_str(r#"{"queryType":"flat"}"#).unwrap();
        assert!(resp.work_items.is_empty());
    }

    #[test]
    fn detail_with_all_fields() {
        let item: WorkItemDetail = serde_json::from_str(
            r#"{"id":101,"rev":3,"fields":{"System.Id":101,"System.Title":"Fix login bug","Microsoft.VSTS.Common.Priority":1,"System.State":"Active"}}"#,
        )
        .unwrap();
        assert_eq!(item.id, 101);
        assert_eq!(item.title(), Some("Fix login bug"));
        assert_eq!(item.priority().map(|p| p.to_string()), Some("1".to_string()));
        assert_eq!(item.state(), Some("Active"));
    }

    #[test]
    fn detail_with_missing_fields() {
        let item: WorkItemDetail =
            serde_json::from_str(r#"{"id":202,"fields":{"System.Title":"Update docs"}}"#).unwrap();
        assert_eq!(item.priority(), None);
        assert_eq!(item.state(), None);
    }

    #[test]
    fn detail_without_fields_mapping_fails_to_decode() {
        let result: Result<WorkItemsResponse, _> = serde_json::from_str(r#"{"value":[{"id":7}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn detail_with_empty_fields_mapping_decodes() {
        let resp: WorkItemsResponse =
            serde_json::from_str(r#"{"value":[{"id":7,"fields":{}}]}"#).unwrap();
        assert_eq!(resp.value[0].state(), None);
        assert_eq!(resp.value[0].title(), None);
    }

    #[test]
    fn work_items_response_requires_value_key() {
        let result: Result<WorkItemsResponse, _> = serde_json::from_str(r#"{"count":0}"#);
        assert!(result.is_err());
    }
}
