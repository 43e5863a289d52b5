use serde::Serialize;

use super::Value;
use crate::errors::SerializationError;

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i as i128)
                } else if let Some(u) = n.as_u64() {
                    Value::Int(u as i128)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (Value::Str(k), v.into())).collect())
            }
        }
    }
}

impl Value {
    /// Convert any serializable type into a renderable value
    ///
    /// Structs become maps of their fields, sequences become lists.
    ///
    /// # Example
    /// ```rust
    /// use serde::Serialize;
    /// use objrepr::{Level, Value};
    ///
    /// #[derive(Serialize)]
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// let value = Value::from_serialize(&Point { x: 1, y: 2 }).unwrap();
    /// assert_eq!(value.render(Level::Short), r#"{"x": 1, "y": 2}"#);
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value, SerializationError> {
        let json = serde_json::to_value(value)?;
        Ok(json.into())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::Level;

    #[test]
    fn it_converts_json_values() {
        let value = Value::from(json!({
            "name": "report",
            "pages": 3,
            "ratio": 0.5,
            "draft": false,
            "tags": ["a", "b"],
            "owner": null
        }));

        assert_eq!(
            value.render(Level::Expanded),
            dedent::dedent!(
                r#"
                dict(
                  #0 draft: false,
                  #1 name: "report",
                  #2 owner: null,
                  #3 pages: 3,
                  #4 ratio: 0.5,
                  #5 tags: a,b
                )
                "#
            )
        );
    }

    #[test]
    fn it_converts_serializable_types() {
        #[derive(Serialize)]
        struct Attachment<'a> {
            file_name: &'a str,
            size: u64,
        }

        let value = Value::from_serialize(&vec![Attachment {
            file_name: "report.xlsx",
            size: 1024,
        }])
        .unwrap();

        assert_eq!(
            value.to_string(),
            r#"[{"file_name": "report.xlsx", "size": 1024}]"#
        );
    }
}
