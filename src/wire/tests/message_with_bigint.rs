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
    use google_cloud_wire::{Coercion, RecordSchema, to_domain, to_wire};
    use num_bigint::BigInt;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use test_case::test_case;

    type Result = anyhow::Result<()>;

    #[serde_with::serde_as]
    #[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct MessageWithBigInt {
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde_as(as = "Option<google_cloud_wire::internal::BigInt>")]
        pub optional: Option<BigInt>,

        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde_as(as = "Option<Vec<google_cloud_wire::internal::BigInt>>")]
        pub repeated: Option<Vec<BigInt>>,

        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde_as(as = "Option<HashMap<_, google_cloud_wire::internal::BigInt>>")]
        pub map: Option<HashMap<String, BigInt>>,

        #[serde(flatten)]
        _unknown_fields: serde_json::Map<String, Value>,
    }

    fn schema() -> RecordSchema {
        RecordSchema::new()
            .integer("optional")
            .sequence("repeated", Coercion::Integer)
            .map("map", Coercion::Integer)
    }

    fn big(text: &str) -> BigInt {
        text.parse().unwrap()
    }

    // Larger than any JSON number can represent exactly.
    const HUGE: &str = "123456789012345678901234567890";

    #[test_case("123", "123")]
    #[test_case(456, "456")]
    #[test_case("-789", "-789")]
    #[test_case(0, "0"; "zero")]
    #[test_case("0", "0"; "string zero")]
    #[test_case(HUGE, HUGE; "huge")]
    fn test_optional<T>(input: T, want: &str) -> Result
    where
        T: serde::ser::Serialize,
    {
        let value = json!({"optional": input});
        let got = serde_json::from_value::<MessageWithBigInt>(value)?;
        assert_eq!(
            got,
            MessageWithBigInt {
                optional: Some(big(want)),
                ..Default::default()
            }
        );
        let trip = serde_json::to_value(&got)?;
        assert_eq!(trip, json!({"optional": want}));
        Ok(())
    }

    #[test]
    fn test_optional_none() -> Result {
        let got = serde_json::from_value::<MessageWithBigInt>(json!({}))?;
        assert_eq!(got, MessageWithBigInt::default());
        let trip = serde_json::to_value(&got)?;
        assert_eq!(trip, json!({}));
        Ok(())
    }

    #[test]
    fn test_repeated() -> Result {
        let value = json!({"repeated": ["1", 2, HUGE, "-3"]});
        let got = serde_json::from_value::<MessageWithBigInt>(value)?;
        let want = vec![big("1"), big("2"), big(HUGE), big("-3")];
        assert_eq!(got.repeated, Some(want));
        let trip = serde_json::to_value(&got)?;
        assert_eq!(trip, json!({"repeated": ["1", "2", HUGE, "-3"]}));
        Ok(())
    }

    #[test]
    fn test_empty_repeated_and_map() -> Result {
        let value = json!({"repeated": [], "map": {}});
        let got = serde_json::from_value::<MessageWithBigInt>(value.clone())?;
        assert_eq!(got.repeated, Some(Vec::new()));
        assert_eq!(got.map, Some(HashMap::new()));
        let trip = serde_json::to_value(&got)?;
        assert_eq!(trip, value);
        Ok(())
    }

    #[test]
    fn test_map() -> Result {
        let value = json!({"map": {"a": "1", "b": HUGE}});
        let got = serde_json::from_value::<MessageWithBigInt>(value.clone())?;
        let want = HashMap::from([("a".to_string(), big("1")), ("b".to_string(), big(HUGE))]);
        assert_eq!(got.map, Some(want));
        let trip = serde_json::to_value(&got)?;
        assert_eq!(trip, value);
        Ok(())
    }

    #[test_case(json!({"optional": "not-a-number"}); "optional")]
    #[test_case(json!({"repeated": ["1", "x"]}); "repeated")]
    #[test_case(json!({"map": {"a": 1.5}}); "map")]
    fn test_error(input: Value) {
        let got = serde_json::from_value::<MessageWithBigInt>(input.clone()).unwrap_err();
        assert!(got.is_data(), "{got:?}");
        let got = to_domain(&input, &schema()).unwrap_err();
        assert!(got.is_invalid_integer(), "{got:?}");
    }

    #[test_case(json!({"unknown": "test-value"}))]
    #[test_case(json!({"unknown": "test-value", "moreUnknown": {"a": 1, "b": 2}}))]
    fn test_unknown(input: Value) -> Result {
        let deser = serde_json::from_value::<MessageWithBigInt>(input.clone())?;
        let got = serde_json::to_value(deser)?;
        assert_eq!(got, input);
        Ok(())
    }

    // The statically typed record and the schema-driven transform must agree
    // on the wire format.
    #[test_case(json!({}))]
    #[test_case(json!({"optional": HUGE}); "optional")]
    #[test_case(json!({"repeated": ["-1", "0", HUGE]}); "repeated")]
    #[test_case(json!({"map": {"k": "42"}, "other": [1, "2"]}); "map and unknown")]
    fn matches_schema_transform(input: Value) -> Result {
        let typed = serde_json::to_value(serde_json::from_value::<MessageWithBigInt>(
            input.clone(),
        )?)?;
        let dynamic = to_wire(&to_domain(&input, &schema())?, &schema())?;
        assert_eq!(typed, dynamic);
        assert_eq!(typed, input);
        Ok(())
    }
}
