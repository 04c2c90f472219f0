use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::num::IntErrorKind;

/// Raw lifestyle body. A field is `None` only when the key is absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleRequest {
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub bmi: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub family_history: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub genetic_mutation: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub menarche_age: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub menopause_age: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub children: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub hormone_therapy: Option<Value>,
}

/// Keeps an explicit `null` distinct from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl LifestyleRequest {
    pub fn from_value(body: Value) -> Result<Self, AssessmentError> {
        if !body.is_object() {
            return Err(AssessmentError::NotAnObject {
                kind: kind_of(&body),
            });
        }
        serde_json::from_value(body).map_err(|err| AssessmentError::Malformed(err.to_string()))
    }

    /// Coerces each field to its declared type, applying defaults for absent keys.
    pub fn into_profile(self) -> Result<LifestyleProfile, AssessmentError> {
        let age = coerce_int("age", self.age.unwrap_or(Value::from(0)))?;
        let bmi = coerce_float("bmi", self.bmi.unwrap_or(Value::from(0)))?;
        let family_history = coerce_answer("familyHistory", self.family_history)?;
        let genetic_mutation = coerce_answer("geneticMutation", self.genetic_mutation)?;
        let menarche_age = coerce_int("menarcheAge", self.menarche_age.unwrap_or(Value::from(0)))?;
        let menopause = MenopauseStatus::from_value(
            self.menopause_age
                .unwrap_or_else(|| Value::String("0".to_string())),
        )?;
        let children = stringify(&self.children.unwrap_or_else(|| Value::String("0".to_string())));
        let hormone_therapy = coerce_answer("hormoneTherapy", self.hormone_therapy)?;

        Ok(LifestyleProfile {
            age,
            bmi,
            family_history,
            genetic_mutation,
            menarche_age,
            menopause,
            children,
            hormone_therapy,
        })
    }
}

/// Typed lifestyle inputs ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct LifestyleProfile {
    pub age: i64,
    pub bmi: f64,
    /// Lowercased answer; only `"yes"` contributes.
    pub family_history: String,
    pub genetic_mutation: String,
    pub menarche_age: i64,
    pub menopause: MenopauseStatus,
    /// Stringified count; compared textually against `"0"`.
    pub children: String,
    pub hormone_therapy: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenopauseStatus {
    Ongoing,
    Age(i64),
    /// Text that is neither `"ongoing"` nor an integer. Contributes nothing.
    Unrecognized(String),
}

impl MenopauseStatus {
    fn from_value(value: Value) -> Result<Self, AssessmentError> {
        match value {
            Value::String(raw) if raw == "ongoing" => Ok(Self::Ongoing),
            Value::String(raw) => Ok(match parse_int(&raw) {
                Some(age) => Self::Age(age),
                None => Self::Unrecognized(raw),
            }),
            Value::Number(ref number) => match int_from_number(number) {
                Some(age) => Ok(Self::Age(age)),
                None => Ok(Self::Unrecognized(number.to_string())),
            },
            Value::Bool(flag) => Ok(Self::Age(i64::from(flag))),
            other => Err(AssessmentError::WrongType {
                field: "menopauseAge",
                expected: "an integer or \"ongoing\"",
                kind: kind_of(&other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("expected a JSON object, found {kind}")]
    NotAnObject { kind: &'static str },
    #[error("{0}")]
    Malformed(String),
    #[error("invalid integer for {field}: {value}")]
    InvalidInteger { field: &'static str, value: String },
    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be {expected}, found {kind}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        kind: &'static str,
    },
}

fn coerce_int(field: &'static str, value: Value) -> Result<i64, AssessmentError> {
    let parsed = match &value {
        Value::Number(number) => int_from_number(number),
        Value::String(raw) => parse_int(raw),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            return Err(AssessmentError::WrongType {
                field,
                expected: "an integer",
                kind: kind_of(&value),
            })
        }
    };

    parsed.ok_or_else(|| AssessmentError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn coerce_float(field: &'static str, value: Value) -> Result<f64, AssessmentError> {
    let parsed = match &value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            return Err(AssessmentError::WrongType {
                field,
                expected: "a number",
                kind: kind_of(&value),
            })
        }
    };

    parsed.ok_or_else(|| AssessmentError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn coerce_answer(field: &'static str, value: Option<Value>) -> Result<String, AssessmentError> {
    match value {
        None => Ok("no".to_string()),
        Some(Value::String(raw)) => Ok(raw.to_lowercase()),
        Some(other) => Err(AssessmentError::WrongType {
            field,
            expected: "a yes/no string",
            kind: kind_of(&other),
        }),
    }
}

/// Whole numbers truncate toward zero. Magnitudes beyond `i64` saturate, which keeps every
/// age comparison intact. Non-finite values do not convert.
fn int_from_number(number: &serde_json::Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    let value = number.as_f64()?.trunc();
    // `as` saturates at the i64 bounds.
    value.is_finite().then(|| value as i64)
}

/// Integer text with optional surrounding whitespace and sign. Decimals are rejected;
/// digit strings beyond `i64` saturate.
fn parse_int(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(raw) => raw.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) if number.is_f64() => match number.as_f64() {
            Some(float) if float.fract() == 0.0 && float.abs() < 1e16 => format!("{float:.1}"),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
