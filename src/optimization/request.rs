use crate::basis::Parametrization;
use crate::error::{BasisError, Result};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_parametrization() -> Parametrization {
    Parametrization::Legendre
}

/// Description of a basis set in terms of optimizable parameters. This is the
/// configuration that is handed to the energy evaluator; fields the driver does not
/// know about are kept in `extra` and passed through unchanged.
///
/// ```
/// use basisopt::basis::Parametrization;
/// use basisopt::optimization::OptimizationRequestBuilder;
///
/// let request = OptimizationRequestBuilder::default()
///     .parametrization(Parametrization::EvenTempered)
///     .nfpshell(vec![4, 2])
///     .params(vec![vec![0.5, 2.0], vec![1.0, 3.0]])
///     .element("Be")
///     .build()
///     .unwrap();
/// assert_eq!(request.x0(), vec![0.5, 2.0, 1.0, 3.0]);
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct OptimizationRequest {
    /// Formula used to generate the exponents of every shell.
    #[serde(rename = "typ", alias = "parametrization", default = "default_parametrization")]
    #[builder(default = "Parametrization::Legendre")]
    pub parametrization: Parametrization,
    /// Number of functions per shell, indexed by angular momentum.
    #[serde(default)]
    #[builder(default)]
    pub nfpshell: Vec<usize>,
    /// Parameters of every shell with a non-zero function count.
    #[serde(default)]
    #[builder(default)]
    pub params: Vec<Vec<f64>>,
    #[serde(default)]
    #[builder(default)]
    pub element: String,
    #[serde(default)]
    #[builder(default)]
    pub name: String,
    #[serde(flatten)]
    #[builder(default)]
    pub extra: Map<String, Value>,
}

impl OptimizationRequest {
    /// All parameters in one consecutive vector.
    pub fn x0(&self) -> Vec<f64> {
        self.params.iter().flatten().copied().collect()
    }

    /// Parse a request from JSON. Function counts that are not integers are reported
    /// as type errors, unknown parametrizations as value errors.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| BasisError::parse(err.line(), err.to_string()))?;

        if let Some(counts) = value.get("nfpshell") {
            let counts: &Vec<Value> = counts.as_array().ok_or_else(|| {
                BasisError::Type(format!("\"nfpshell\" should be a list, got: {}", counts))
            })?;
            for nf in counts.iter() {
                if nf.as_u64().is_none() {
                    return Err(BasisError::Type(format!(
                        "\"nf\" variable should be of \"int\" type, got: {}",
                        nf
                    )));
                }
            }
        }
        match value.get("typ").or_else(|| value.get("parametrization")) {
            Some(Value::String(name)) => {
                name.parse::<Parametrization>()?;
            }
            Some(other) => {
                return Err(BasisError::Type(format!(
                    "\"typ\" should be a string, got: {}",
                    other
                )))
            }
            None => {}
        }
        serde_json::from_value(value).map_err(|err| BasisError::Value(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let request: OptimizationRequest = OptimizationRequestBuilder::default().build().unwrap();
        assert_eq!(request.parametrization, Parametrization::Legendre);
        assert!(request.nfpshell.is_empty());
        assert!(request.x0().is_empty());
    }

    #[test]
    fn json_passthrough() {
        let text: &str = r#"{
            "typ": "well",
            "nfpshell": [4],
            "params": [[0.5, 2.0, 3.0, 4.0]],
            "element": "He",
            "method": "hf",
            "ftol": 0.5
        }"#;
        let request: OptimizationRequest = OptimizationRequest::from_json(text).unwrap();
        assert_eq!(request.parametrization, Parametrization::WellTempered);
        assert_eq!(request.element, "He");
        assert_eq!(request.extra["method"], Value::from("hf"));
        assert_eq!(request.extra.len(), 2);

        let back: Value = serde_json::to_value(&request).unwrap();
        assert_eq!(back["typ"], Value::from("welltemp"));
        assert_eq!(back["ftol"], Value::from(0.5));
    }

    #[test]
    fn json_type_errors() {
        let err = OptimizationRequest::from_json(r#"{"typ": "even", "nfpshell": [2.5]}"#).unwrap_err();
        assert!(matches!(err, BasisError::Type(_)));
        let err = OptimizationRequest::from_json(r#"{"typ": "even", "nfpshell": ["2"]}"#).unwrap_err();
        assert!(matches!(err, BasisError::Type(_)));
        let err = OptimizationRequest::from_json(r#"{"typ": "tempered"}"#).unwrap_err();
        assert!(matches!(err, BasisError::Value(_)));
        let err = OptimizationRequest::from_json("{").unwrap_err();
        assert!(matches!(err, BasisError::Parse { .. }));
    }
}
