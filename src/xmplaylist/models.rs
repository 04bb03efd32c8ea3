//! xmplaylist.com API response models

use serde::{Deserialize, Serialize};

/// Response of `GET /api/station`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationList {
    #[serde(default)]
    pub results: Vec<Station>,
}

/// A station as listed by the metadata service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Canonical short channel identifier
    pub deeplink: String,
    pub name: Option<String>,
    pub number: Option<u32>,
}

impl StationList {
    /// Channel ids in ascending order
    pub fn sorted_deeplinks(&self) -> Vec<String> {
        let mut channels: Vec<String> = self.results.iter().map(|s| s.deeplink.clone()).collect();
        channels.sort();
        channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_list_ignores_unknown_fields() {
        let list: StationList = serde_json::from_str(
            r#"{"results":[
                {"id":"a","deeplink":"siriusxmhits1","name":"SiriusXM Hits 1","number":2,"genre":"pop"},
                {"deeplink":"bpm"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(list.results.len(), 2);
        assert_eq!(list.results[0].number, Some(2));
        assert_eq!(list.sorted_deeplinks(), vec!["bpm", "siriusxmhits1"]);
    }
}
