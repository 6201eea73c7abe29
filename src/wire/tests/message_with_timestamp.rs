// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[cfg(test)]
mod test {
    use google_cloud_wire::{Coercion, DomainValue, RecordSchema, Timestamp, to_domain, to_wire};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use test_case::test_case;
    type Result = anyhow::Result<()>;

    #[serde_with::skip_serializing_none]
    #[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct MessageWithTimestamp {
        pub create_time: Option<Timestamp>,
        pub update_times: Option<Vec<Timestamp>>,
        pub expirations: Option<HashMap<String, Timestamp>>,
        #[serde(flatten)]
        _unknown_fields: serde_json::Map<String, Value>,
    }

    fn schema() -> RecordSchema {
        RecordSchema::new()
            .timestamp("createTime")
            .sequence("updateTimes", Coercion::Timestamp)
            .map("expirations", Coercion::Timestamp)
    }

    #[test]
    fn test_singular() -> Result {
        let input = json!({"createTime": "2024-01-15T10:30:00.000Z"});
        let got = serde_json::from_value::<MessageWithTimestamp>(input.clone())?;
        let want = Timestamp::try_from("2024-01-15T10:30:00Z")?;
        assert_eq!(got.create_time, Some(want));
        assert_eq!(serde_json::to_value(&got)?, input);
        Ok(())
    }

    #[test]
    fn test_absent() -> Result {
        let got = serde_json::to_value(MessageWithTimestamp::default())?;
        assert_eq!(got, json!({}));
        let got = to_wire(&DomainValue::record([("name", "abc")]), &schema())?;
        assert_eq!(got, json!({"name": "abc"}));
        Ok(())
    }

    // Input precision other than milliseconds is normalized.
    #[test_case("2024-01-15T10:30:00Z", "2024-01-15T10:30:00.000Z"; "seconds")]
    #[test_case("2024-01-15T10:30:00.123456789Z", "2024-01-15T10:30:00.123Z"; "nanos")]
    #[test_case("2024-01-15T11:30:00+01:00", "2024-01-15T10:30:00.000Z"; "offset")]
    fn test_normalized(input: &str, want: &str) -> Result {
        let typed = serde_json::from_value::<MessageWithTimestamp>(json!({"createTime": input}))?;
        assert_eq!(serde_json::to_value(&typed)?, json!({"createTime": want}));

        let domain = to_domain(&json!({"createTime": input}), &schema())?;
        assert_eq!(to_wire(&domain, &schema())?, json!({"createTime": want}));
        Ok(())
    }

    #[test]
    fn test_matches_schema_transform() -> Result {
        let wire = json!({
            "createTime": "2024-01-15T10:30:00.000Z",
            "updateTimes": ["2024-01-16T00:00:00.000Z", "1969-07-20T20:17:40.000Z"],
            "expirations": {"primary": "9999-12-31T23:59:59.999Z"},
            "unknown": "2024-01-15T10:30:00Z",
        });
        let typed = serde_json::from_value::<MessageWithTimestamp>(wire.clone())?;
        let domain = to_domain(&wire, &schema())?;
        assert_eq!(
            domain
                .get("updateTimes")
                .and_then(DomainValue::as_sequence)
                .map(|s| s.iter().filter_map(DomainValue::as_timestamp).copied().collect::<Vec<_>>()),
            typed.update_times.clone()
        );
        assert_eq!(serde_json::to_value(&typed)?, wire);
        assert_eq!(to_wire(&domain, &schema())?, wire);
        Ok(())
    }

    #[test_case(json!({"createTime": "yesterday"}); "singular")]
    #[test_case(json!({"updateTimes": ["2024-01-15T10:30:00"]}); "repeated")]
    #[test_case(json!({"expirations": {"a": "0000-01-01T00:00:00Z"}}); "map")]
    fn test_error(input: Value) {
        let got = serde_json::from_value::<MessageWithTimestamp>(input.clone()).unwrap_err();
        assert!(got.is_data(), "{got:?}");
        let got = to_domain(&input, &schema()).unwrap_err();
        assert!(got.is_invalid_timestamp(), "{got:?}");
    }
}
