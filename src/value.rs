//! Значения, которыми оперируют построитель и бэкенды.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Упорядоченный набор свойств узла или ребра.
pub type Properties<V> = IndexMap<String, V>;

/// Внешние параметры, передаваемые при построении графа.
pub type Parameters = IndexMap<String, Scalar>;

/// Скалярное значение.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Булево значение (только из параметров)
    Bool(bool),
    /// Целое число
    Int(i64),
    /// Число с плавающей точкой
    Float(f64),
    /// Строка
    String(String),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

/// Загрузить параметры из JSON-объекта вида `{"name": value, ...}`.
pub fn parameters_from_json(json: &str) -> GraphResult<Parameters> {
    serde_json::from_str(json).map_err(|e| GraphError::SerializationError(e.to_string()))
}

/// Собрать набор свойств из пар ключ-значение.
///
/// ```
/// use graphdsl::value::{properties, Scalar};
///
/// let props = properties([("color", "red")]);
/// assert_eq!(props["color"], Scalar::from("red"));
/// ```
pub fn properties<K, V, I>(pairs: I) -> Properties<Scalar>
where
    K: Into<String>,
    V: Into<Scalar>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_from_json() {
        let params = parameters_from_json(r#"{"c": "red", "l": 42, "w": 0.5, "on": true}"#).unwrap();
        assert_eq!(params["c"], Scalar::String("red".to_string()));
        assert_eq!(params["l"], Scalar::Int(42));
        assert_eq!(params["w"], Scalar::Float(0.5));
        assert_eq!(params["on"], Scalar::Bool(true));
    }

    #[test]
    fn test_parameters_from_json_rejects_nested() {
        assert!(parameters_from_json(r#"{"c": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::from("a").to_string(), "\"a\"");
        assert_eq!(Scalar::from(3).to_string(), "3");
    }
}
