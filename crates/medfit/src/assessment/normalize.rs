use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::domain::{BreathingPattern, FootStrike, Gender, MobilityGrade};

/// Form field value: either already numeric or the raw text typed into the form.
/// Any other JSON type (booleans, arrays, objects) is kept as `Unreadable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Unreadable,
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(number) => number
                .as_f64()
                .map_or(FieldValue::Unreadable, FieldValue::Number),
            Value::String(raw) => FieldValue::Text(raw),
            _ => FieldValue::Unreadable,
        })
    }
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value).filter(|value| value.is_finite()),
            FieldValue::Text(raw) => parse_number(raw),
            FieldValue::Unreadable => None,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Number(value) => Some(value.to_string()),
            FieldValue::Text(raw) => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            FieldValue::Unreadable => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Flat set of readings exactly as submitted. Every field may be absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMeasurementSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_left: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_right: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plank_minutes: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plank_seconds: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushup_count: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallsit_minutes: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallsit_seconds: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sit_reach: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breathing: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foot_strike_left: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foot_strike_right: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder_left: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder_right: Option<FieldValue>,
}

/// Typed readings plus the composite metrics derived from them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Measurements {
    pub gender: Option<Gender>,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
    pub heart_rate: Option<f64>,
    pub body_fat: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub waist_hip_ratio: Option<f64>,
    pub balance_left: Option<f64>,
    pub balance_right: Option<f64>,
    pub plank_seconds: Option<f64>,
    pub pushups: Option<f64>,
    pub wallsit_seconds: Option<f64>,
    pub sit_reach: Option<f64>,
    pub breathing: Option<BreathingPattern>,
    pub foot_strike_left: Option<FootStrike>,
    pub foot_strike_right: Option<FootStrike>,
    pub shoulder_left: Option<MobilityGrade>,
    pub shoulder_right: Option<MobilityGrade>,
}

impl Measurements {
    pub fn blood_pressure_display(&self) -> Option<String> {
        match (self.systolic, self.diastolic) {
            (Some(systolic), Some(diastolic)) => Some(format!("{systolic}/{diastolic}")),
            _ => None,
        }
    }

    /// Raw form of the typed readings; normalizing it yields `self` again.
    pub fn to_raw(&self) -> RawMeasurementSet {
        let number = |value: Option<f64>| value.map(FieldValue::Number);
        let text = |value: Option<&str>| value.map(FieldValue::from);

        RawMeasurementSet {
            gender: text(self.gender.map(Gender::as_str)),
            systolic: number(self.systolic),
            diastolic: number(self.diastolic),
            heart_rate: number(self.heart_rate),
            body_fat: number(self.body_fat),
            waist: number(self.waist),
            hip: number(self.hip),
            height: number(self.height),
            weight: number(self.weight),
            balance_left: number(self.balance_left),
            balance_right: number(self.balance_right),
            plank_minutes: None,
            plank_seconds: number(self.plank_seconds),
            pushup_count: number(self.pushups),
            wallsit_minutes: None,
            wallsit_seconds: number(self.wallsit_seconds),
            sit_reach: number(self.sit_reach),
            breathing: text(self.breathing.as_ref().map(BreathingPattern::as_str)),
            foot_strike_left: text(self.foot_strike_left.map(FootStrike::as_str)),
            foot_strike_right: text(self.foot_strike_right.map(FootStrike::as_str)),
            shoulder_left: text(self.shoulder_left.map(MobilityGrade::as_str)),
            shoulder_right: text(self.shoulder_right.map(MobilityGrade::as_str)),
        }
    }
}

pub fn normalize(raw: &RawMeasurementSet) -> Measurements {
    let number = |field: &Option<FieldValue>| field.as_ref().and_then(FieldValue::as_number);
    let text = |field: &Option<FieldValue>| field.as_ref().and_then(FieldValue::as_text);

    let height = number(&raw.height);
    let weight = number(&raw.weight);
    let waist = number(&raw.waist);
    let hip = number(&raw.hip);

    Measurements {
        gender: text(&raw.gender).as_deref().and_then(Gender::parse),
        systolic: number(&raw.systolic),
        diastolic: number(&raw.diastolic),
        heart_rate: number(&raw.heart_rate),
        body_fat: number(&raw.body_fat),
        waist,
        hip,
        height,
        weight,
        bmi: body_mass_index(height, weight),
        waist_hip_ratio: waist_hip_ratio(waist, hip),
        balance_left: number(&raw.balance_left),
        balance_right: number(&raw.balance_right),
        plank_seconds: combined_seconds(number(&raw.plank_minutes), number(&raw.plank_seconds)),
        pushups: number(&raw.pushup_count),
        wallsit_seconds: combined_seconds(
            number(&raw.wallsit_minutes),
            number(&raw.wallsit_seconds),
        ),
        sit_reach: number(&raw.sit_reach),
        breathing: text(&raw.breathing).as_deref().and_then(BreathingPattern::parse),
        foot_strike_left: text(&raw.foot_strike_left).as_deref().and_then(FootStrike::parse),
        foot_strike_right: text(&raw.foot_strike_right).as_deref().and_then(FootStrike::parse),
        shoulder_left: text(&raw.shoulder_left).as_deref().and_then(MobilityGrade::parse),
        shoulder_right: text(&raw.shoulder_right).as_deref().and_then(MobilityGrade::parse),
    }
}

/// `weight_kg / (height_cm / 100)^2`, one decimal.
pub fn body_mass_index(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let (height_cm, weight_kg) = (height_cm?, weight_kg?);
    if height_cm <= 0.0 {
        return None;
    }
    let meters = height_cm / 100.0;
    Some(round_to(weight_kg / (meters * meters), 1))
}

/// `waist / hip`, two decimals.
pub fn waist_hip_ratio(waist_cm: Option<f64>, hip_cm: Option<f64>) -> Option<f64> {
    let (waist_cm, hip_cm) = (waist_cm?, hip_cm?);
    if hip_cm <= 0.0 {
        return None;
    }
    Some(round_to(waist_cm / hip_cm, 2))
}

/// A component that was entered counts even when it is zero; only two absent parts yield `None`.
pub fn combined_seconds(minutes: Option<f64>, seconds: Option<f64>) -> Option<f64> {
    if minutes.is_none() && seconds.is_none() {
        return None;
    }
    Some(minutes.unwrap_or(0.0) * 60.0 + seconds.unwrap_or(0.0))
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // A comma is a decimal separator only with one or two digits after it;
    // "1,000" stays unparseable instead of becoming 1.0.
    let candidate = match trimmed.split_once(',') {
        Some((whole, fraction))
            if !trimmed.contains('.')
                && (1..=2).contains(&fraction.len())
                && fraction.bytes().all(|byte| byte.is_ascii_digit()) =>
        {
            format!("{whole}.{fraction}")
        }
        _ => trimmed.to_string(),
    };

    candidate
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
