//! Lenient conversions for untyped JSON fields.

use serde_json::Value;

/// Numeric reading of a field, or `None` when it has no finite numeric meaning.
///
/// Numbers are taken as-is and strings are trimmed and parsed. Booleans,
/// null, arrays and objects never count as numbers.
pub fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            text.parse::<f64>().ok()?
        }
        _ => return None,
    };

    number.is_finite().then_some(number)
}

pub const fn is_scalar_text_or_number(value: &Value) -> bool {
    matches!(value, Value::Number(_) | Value::String(_))
}

/// First of `keys` that is present on `object` and not null.
pub fn first_present<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// First of `keys` holding a usable label: a non-empty string, or a non-zero
/// number rendered as text.
pub fn first_truthy_text(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(truthy_text)
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => {
            Some(number.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings_coerce() {
        assert_eq!(to_number(&json!(12)), Some(12.0));
        assert_eq!(to_number(&json!(0.25)), Some(0.25));
        assert_eq!(to_number(&json!(" 42 ")), Some(42.0));
        assert_eq!(to_number(&json!("1e3")), Some(1000.0));
    }

    #[test]
    fn non_numeric_values_do_not_coerce() {
        assert_eq!(to_number(&json!("")), None);
        assert_eq!(to_number(&json!("twelve")), None);
        assert_eq!(to_number(&json!("inf")), None);
        assert_eq!(to_number(&json!("NaN")), None);
        assert_eq!(to_number(&json!(true)), None);
        assert_eq!(to_number(&json!(null)), None);
        assert_eq!(to_number(&json!([1])), None);
    }

    #[test]
    fn first_present_skips_null_but_not_zero() {
        let item = json!({ "score": null, "level": 0, "value": 7 });
        assert_eq!(first_present(&item, &["score", "level", "value"]), Some(&json!(0)));
        assert_eq!(first_present(&item, &["missing"]), None);
        assert_eq!(first_present(&json!("scalar"), &["score"]), None);
    }

    #[test]
    fn first_truthy_text_skips_empty_labels() {
        let item = json!({ "title": "", "name": 0, "roomName": "Blue", "slug": "blue" });
        assert_eq!(
            first_truthy_text(&item, &["title", "name", "roomName", "slug"]),
            Some("Blue".to_string())
        );

        let numeric = json!({ "name": 101 });
        assert_eq!(first_truthy_text(&numeric, &["name"]), Some("101".to_string()));
        assert_eq!(first_truthy_text(&json!({}), &["name"]), None);
    }
}
