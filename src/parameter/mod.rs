//! Recipe parameters
//!
//! A parameter is a named, typed value with a default, optionally
//! constrained to a range (int/double) or to a list of alternatives
//! (int/double/string). Each parameter also carries the metadata a host
//! needs to expose it: a context, a help text, a user tag, and one alias
//! plus an enabled flag for each way a value can be supplied
//! (command line, environment, configuration file).

pub mod list;

pub use list::ParameterList;

use crate::error::CoreError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Value type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Bool,
    Int,
    Double,
    String,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Int => "int",
            ParamType::Double => "double",
            ParamType::String => "string",
        }
    }
}

/// Constraint class of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamClass {
    Value,
    Range,
    Enum,
}

impl ParamClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamClass::Value => "value",
            ParamClass::Range => "range",
            ParamClass::Enum => "enum",
        }
    }
}

/// Source a parameter value may come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterMode {
    Cli,
    Env,
    Cfg,
}

impl ParameterMode {
    pub const ALL: [ParameterMode; 3] = [ParameterMode::Cli, ParameterMode::Env, ParameterMode::Cfg];

    fn index(self) -> usize {
        match self {
            ParameterMode::Cli => 0,
            ParameterMode::Env => 1,
            ParameterMode::Cfg => 2,
        }
    }
}

impl FromStr for ParameterMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cli" => Ok(ParameterMode::Cli),
            "env" => Ok(ParameterMode::Env),
            "cfg" => Ok(ParameterMode::Cfg),
            other => Err(CoreError::IllegalInput(format!(
                "Unsupported parameter mode: {}",
                other
            ))),
        }
    }
}

/// A parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
}

impl Value {
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Bool(_) => ParamType::Bool,
            Value::Int(_) => ParamType::Int,
            Value::Double(_) => ParamType::Double,
            Value::String(_) => ParamType::String,
        }
    }

    /// Parse `text` as a value of type `ty`.
    pub fn parse(ty: ParamType, text: &str) -> Result<Value, CoreError> {
        let mismatch = || {
            CoreError::TypeMismatch(format!("Cannot read '{}' as {}", text, ty.as_str()))
        };
        match ty {
            ParamType::Bool => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "f" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err(mismatch()),
            },
            ParamType::Int => text.trim().parse().map(Value::Int).map_err(|_| mismatch()),
            ParamType::Double => text.trim().parse().map(Value::Double).map_err(|_| mismatch()),
            ParamType::String => Ok(Value::String(text.to_string())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", if *v { "true" } else { "false" }),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// Admissible values of a range or enum parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Constraint {
    None,
    RangeInt { min: i64, max: i64 },
    RangeDouble { min: f64, max: f64 },
    EnumInt(Vec<i64>),
    EnumDouble(Vec<f64>),
    EnumString(Vec<String>),
}

impl Constraint {
    fn class(&self) -> ParamClass {
        match self {
            Constraint::None => ParamClass::Value,
            Constraint::RangeInt { .. } | Constraint::RangeDouble { .. } => ParamClass::Range,
            Constraint::EnumInt(_) | Constraint::EnumDouble(_) | Constraint::EnumString(_) => {
                ParamClass::Enum
            }
        }
    }

    fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Constraint::None, _) => true,
            (Constraint::RangeInt { min, max }, Value::Int(v)) => min <= v && v <= max,
            (Constraint::RangeDouble { min, max }, Value::Double(v)) => min <= v && v <= max,
            (Constraint::EnumInt(alts), Value::Int(v)) => alts.contains(v),
            (Constraint::EnumDouble(alts), Value::Double(v)) => alts.contains(v),
            (Constraint::EnumString(alts), Value::String(v)) => alts.contains(v),
            _ => false,
        }
    }
}

/// A recipe parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    name: String,
    description: String,
    context: Option<String>,
    tag: Option<String>,
    value: Value,
    default: Value,
    constraint: Constraint,
    aliases: [Option<String>; 3],
    enabled: [bool; 3],
    id: i32,
    default_flag: bool,
}

impl Parameter {
    fn build(
        name: &str,
        description: &str,
        context: Option<&str>,
        default: Value,
        constraint: Constraint,
    ) -> Self {
        Parameter {
            name: name.to_string(),
            description: description.to_string(),
            context: context.map(str::to_string),
            tag: None,
            value: default.clone(),
            default,
            constraint,
            aliases: [None, None, None],
            enabled: [true; 3],
            id: 0,
            default_flag: false,
        }
    }

    pub fn value_bool(name: &str, description: &str, context: Option<&str>, default: bool) -> Self {
        Self::build(name, description, context, Value::Bool(default), Constraint::None)
    }

    pub fn value_int(name: &str, description: &str, context: Option<&str>, default: i64) -> Self {
        Self::build(name, description, context, Value::Int(default), Constraint::None)
    }

    pub fn value_double(name: &str, description: &str, context: Option<&str>, default: f64) -> Self {
        Self::build(name, description, context, Value::Double(default), Constraint::None)
    }

    pub fn value_string(name: &str, description: &str, context: Option<&str>, default: &str) -> Self {
        Self::build(name, description, context, Value::from(default), Constraint::None)
    }

    pub fn range_int(
        name: &str,
        description: &str,
        context: Option<&str>,
        default: i64,
        min: i64,
        max: i64,
    ) -> Self {
        Self::build(
            name,
            description,
            context,
            Value::Int(default),
            Constraint::RangeInt { min, max },
        )
    }

    pub fn range_double(
        name: &str,
        description: &str,
        context: Option<&str>,
        default: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Self::build(
            name,
            description,
            context,
            Value::Double(default),
            Constraint::RangeDouble { min, max },
        )
    }

    /// Enum parameter over integers. The default is not required to be
    /// one of the alternatives.
    pub fn enum_int(
        name: &str,
        description: &str,
        context: Option<&str>,
        default: i64,
        alternatives: Vec<i64>,
    ) -> Result<Self, CoreError> {
        check_alternatives(name, alternatives.len())?;
        Ok(Self::build(
            name,
            description,
            context,
            Value::Int(default),
            Constraint::EnumInt(alternatives),
        ))
    }

    pub fn enum_double(
        name: &str,
        description: &str,
        context: Option<&str>,
        default: f64,
        alternatives: Vec<f64>,
    ) -> Result<Self, CoreError> {
        check_alternatives(name, alternatives.len())?;
        Ok(Self::build(
            name,
            description,
            context,
            Value::Double(default),
            Constraint::EnumDouble(alternatives),
        ))
    }

    pub fn enum_string(
        name: &str,
        description: &str,
        context: Option<&str>,
        default: &str,
        alternatives: Vec<String>,
    ) -> Result<Self, CoreError> {
        check_alternatives(name, alternatives.len())?;
        Ok(Self::build(
            name,
            description,
            context,
            Value::from(default),
            Constraint::EnumString(alternatives),
        ))
    }

    /// Plain parameter of type `ty`; `default` must be of that type.
    pub fn new_value(
        name: &str,
        ty: ParamType,
        description: &str,
        context: Option<&str>,
        default: Value,
    ) -> Result<Self, CoreError> {
        expect_type(name, ty, &default)?;
        Ok(Self::build(name, description, context, default, Constraint::None))
    }

    /// Range parameter of type `ty` (int or double only).
    pub fn new_range(
        name: &str,
        ty: ParamType,
        description: &str,
        context: Option<&str>,
        default: Value,
        min: Value,
        max: Value,
    ) -> Result<Self, CoreError> {
        if !matches!(ty, ParamType::Int | ParamType::Double) {
            return Err(invalid_type(name, ParamClass::Range, ty));
        }
        for value in [&default, &min, &max] {
            expect_type(name, ty, value)?;
        }
        let constraint = match (min, max) {
            (Value::Int(min), Value::Int(max)) => Constraint::RangeInt { min, max },
            (Value::Double(min), Value::Double(max)) => Constraint::RangeDouble { min, max },
            _ => return Err(invalid_type(name, ParamClass::Range, ty)),
        };
        Ok(Self::build(name, description, context, default, constraint))
    }

    /// Enum parameter of type `ty` (anything but bool) with at least one
    /// alternative.
    pub fn new_enum(
        name: &str,
        ty: ParamType,
        description: &str,
        context: Option<&str>,
        default: Value,
        alternatives: Vec<Value>,
    ) -> Result<Self, CoreError> {
        if ty == ParamType::Bool {
            return Err(invalid_type(name, ParamClass::Enum, ty));
        }
        check_alternatives(name, alternatives.len())?;
        expect_type(name, ty, &default)?;
        for alternative in &alternatives {
            expect_type(name, ty, alternative)?;
        }

        let mut ints = Vec::new();
        let mut doubles = Vec::new();
        let mut strings = Vec::new();
        for alternative in alternatives {
            match alternative {
                Value::Int(v) => ints.push(v),
                Value::Double(v) => doubles.push(v),
                Value::String(v) => strings.push(v),
                Value::Bool(_) => return Err(invalid_type(name, ParamClass::Enum, ty)),
            }
        }
        let constraint = match ty {
            ParamType::Int => Constraint::EnumInt(ints),
            ParamType::Double => Constraint::EnumDouble(doubles),
            _ => Constraint::EnumString(strings),
        };
        Ok(Self::build(name, description, context, default, constraint))
    }

    /// Deep copy.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: Option<&str>) {
        self.tag = tag.map(str::to_string);
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    /// Whether a caller explicitly supplied the current value.
    pub fn default_flag(&self) -> bool {
        self.default_flag
    }

    pub fn set_default_flag(&mut self, flag: bool) {
        self.default_flag = flag;
    }

    pub fn param_type(&self) -> ParamType {
        self.default.param_type()
    }

    pub fn class(&self) -> ParamClass {
        self.constraint.class()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn alias(&self, mode: ParameterMode) -> Option<&str> {
        self.aliases[mode.index()].as_deref()
    }

    pub fn set_alias(&mut self, mode: ParameterMode, alias: Option<&str>) {
        self.aliases[mode.index()] = alias.map(str::to_string);
    }

    pub fn is_enabled(&self, mode: ParameterMode) -> bool {
        self.enabled[mode.index()]
    }

    pub fn enable(&mut self, mode: ParameterMode) {
        self.enabled[mode.index()] = true;
    }

    pub fn disable(&mut self, mode: ParameterMode) {
        self.enabled[mode.index()] = false;
    }

    fn mismatch(&self, wanted: ParamType) -> CoreError {
        CoreError::TypeMismatch(format!(
            "Parameter '{}' is of type {}, not {}",
            self.name,
            self.param_type().as_str(),
            wanted.as_str()
        ))
    }

    pub fn get_bool(&self) -> Result<bool, CoreError> {
        match self.value {
            Value::Bool(v) => Ok(v),
            _ => Err(self.mismatch(ParamType::Bool)),
        }
    }

    pub fn get_int(&self) -> Result<i64, CoreError> {
        match self.value {
            Value::Int(v) => Ok(v),
            _ => Err(self.mismatch(ParamType::Int)),
        }
    }

    pub fn get_double(&self) -> Result<f64, CoreError> {
        match self.value {
            Value::Double(v) => Ok(v),
            _ => Err(self.mismatch(ParamType::Double)),
        }
    }

    pub fn get_string(&self) -> Result<&str, CoreError> {
        match &self.value {
            Value::String(v) => Ok(v),
            _ => Err(self.mismatch(ParamType::String)),
        }
    }

    pub fn get_default_bool(&self) -> Result<bool, CoreError> {
        match self.default {
            Value::Bool(v) => Ok(v),
            _ => Err(self.mismatch(ParamType::Bool)),
        }
    }

    pub fn get_default_int(&self) -> Result<i64, CoreError> {
        match self.default {
            Value::Int(v) => Ok(v),
            _ => Err(self.mismatch(ParamType::Int)),
        }
    }

    pub fn get_default_double(&self) -> Result<f64, CoreError> {
        match self.default {
            Value::Double(v) => Ok(v),
            _ => Err(self.mismatch(ParamType::Double)),
        }
    }

    pub fn get_default_string(&self) -> Result<&str, CoreError> {
        match &self.default {
            Value::String(v) => Ok(v),
            _ => Err(self.mismatch(ParamType::String)),
        }
    }

    /// Replace the current value. Range and enum constraints are not
    /// checked here; see [`Parameter::satisfies_constraint`].
    pub fn set_value(&mut self, value: Value) -> Result<(), CoreError> {
        if value.param_type() != self.param_type() {
            return Err(self.mismatch(value.param_type()));
        }
        self.value = value;
        Ok(())
    }

    pub fn set_default_value(&mut self, value: Value) -> Result<(), CoreError> {
        if value.param_type() != self.param_type() {
            return Err(self.mismatch(value.param_type()));
        }
        self.default = value;
        Ok(())
    }

    pub fn set_bool(&mut self, value: bool) -> Result<(), CoreError> {
        self.set_value(Value::Bool(value))
    }

    pub fn set_int(&mut self, value: i64) -> Result<(), CoreError> {
        self.set_value(Value::Int(value))
    }

    pub fn set_double(&mut self, value: f64) -> Result<(), CoreError> {
        self.set_value(Value::Double(value))
    }

    pub fn set_string(&mut self, value: &str) -> Result<(), CoreError> {
        self.set_value(Value::from(value))
    }

    pub fn set_default_bool(&mut self, value: bool) -> Result<(), CoreError> {
        self.set_default_value(Value::Bool(value))
    }

    pub fn set_default_int(&mut self, value: i64) -> Result<(), CoreError> {
        self.set_default_value(Value::Int(value))
    }

    pub fn set_default_double(&mut self, value: f64) -> Result<(), CoreError> {
        self.set_default_value(Value::Double(value))
    }

    pub fn set_default_string(&mut self, value: &str) -> Result<(), CoreError> {
        self.set_default_value(Value::from(value))
    }

    /// Parse `text` into the parameter's type and make it the value.
    pub fn set_from_str(&mut self, text: &str) -> Result<(), CoreError> {
        let value = Value::parse(self.param_type(), text)?;
        self.set_value(value)
    }

    /// Whether the current value lies within the range or among the
    /// alternatives. Always true for plain parameters.
    pub fn satisfies_constraint(&self) -> bool {
        self.constraint.admits(&self.value)
    }

    fn class_mismatch(&self, wanted: ParamClass) -> CoreError {
        CoreError::TypeMismatch(format!(
            "Parameter '{}' is of class {}, not {}",
            self.name,
            self.class().as_str(),
            wanted.as_str()
        ))
    }

    pub fn get_range_min_int(&self) -> Result<i64, CoreError> {
        match self.constraint {
            Constraint::RangeInt { min, .. } => Ok(min),
            Constraint::RangeDouble { .. } => Err(self.mismatch(ParamType::Int)),
            _ => Err(self.class_mismatch(ParamClass::Range)),
        }
    }

    pub fn get_range_max_int(&self) -> Result<i64, CoreError> {
        match self.constraint {
            Constraint::RangeInt { max, .. } => Ok(max),
            Constraint::RangeDouble { .. } => Err(self.mismatch(ParamType::Int)),
            _ => Err(self.class_mismatch(ParamClass::Range)),
        }
    }

    pub fn get_range_min_double(&self) -> Result<f64, CoreError> {
        match self.constraint {
            Constraint::RangeDouble { min, .. } => Ok(min),
            Constraint::RangeInt { .. } => Err(self.mismatch(ParamType::Double)),
            _ => Err(self.class_mismatch(ParamClass::Range)),
        }
    }

    pub fn get_range_max_double(&self) -> Result<f64, CoreError> {
        match self.constraint {
            Constraint::RangeDouble { max, .. } => Ok(max),
            Constraint::RangeInt { .. } => Err(self.mismatch(ParamType::Double)),
            _ => Err(self.class_mismatch(ParamClass::Range)),
        }
    }

    /// Number of alternatives of an enum parameter.
    pub fn get_enum_size(&self) -> Result<usize, CoreError> {
        match &self.constraint {
            Constraint::EnumInt(alts) => Ok(alts.len()),
            Constraint::EnumDouble(alts) => Ok(alts.len()),
            Constraint::EnumString(alts) => Ok(alts.len()),
            _ => Err(self.class_mismatch(ParamClass::Enum)),
        }
    }

    fn enum_slot<'a, T>(&self, alts: &'a [T], position: usize) -> Result<&'a T, CoreError> {
        alts.get(position).ok_or_else(|| {
            CoreError::AccessOutOfRange(format!(
                "Alternative {} of parameter '{}' requested, only {} defined",
                position,
                self.name,
                alts.len()
            ))
        })
    }

    pub fn get_enum_int(&self, position: usize) -> Result<i64, CoreError> {
        match &self.constraint {
            Constraint::EnumInt(alts) => self.enum_slot(alts, position).copied(),
            Constraint::EnumDouble(_) | Constraint::EnumString(_) => {
                Err(self.mismatch(ParamType::Int))
            }
            _ => Err(self.class_mismatch(ParamClass::Enum)),
        }
    }

    pub fn get_enum_double(&self, position: usize) -> Result<f64, CoreError> {
        match &self.constraint {
            Constraint::EnumDouble(alts) => self.enum_slot(alts, position).copied(),
            Constraint::EnumInt(_) | Constraint::EnumString(_) => {
                Err(self.mismatch(ParamType::Double))
            }
            _ => Err(self.class_mismatch(ParamClass::Enum)),
        }
    }

    pub fn get_enum_string(&self, position: usize) -> Result<&str, CoreError> {
        match &self.constraint {
            Constraint::EnumString(alts) => self.enum_slot(alts, position).map(String::as_str),
            Constraint::EnumInt(_) | Constraint::EnumDouble(_) => {
                Err(self.mismatch(ParamType::String))
            }
            _ => Err(self.class_mismatch(ParamClass::Enum)),
        }
    }

    /// Human-readable rendering of the admissible values, if constrained.
    pub fn constraint_summary(&self) -> Option<String> {
        match &self.constraint {
            Constraint::None => None,
            Constraint::RangeInt { min, max } => Some(format!("[{}, {}]", min, max)),
            Constraint::RangeDouble { min, max } => Some(format!("[{}, {}]", min, max)),
            Constraint::EnumInt(alts) => Some(join_alternatives(alts)),
            Constraint::EnumDouble(alts) => Some(join_alternatives(alts)),
            Constraint::EnumString(alts) => Some(join_alternatives(alts)),
        }
    }
}

fn join_alternatives<T: fmt::Display>(alts: &[T]) -> String {
    let parts: Vec<String> = alts.iter().map(|a| a.to_string()).collect();
    format!("{{{}}}", parts.join(", "))
}

fn invalid_type(name: &str, class: ParamClass, ty: ParamType) -> CoreError {
    CoreError::InvalidType(format!(
        "{} parameter '{}' cannot be of type {}",
        class.as_str(),
        name,
        ty.as_str()
    ))
}

fn check_alternatives(name: &str, count: usize) -> Result<(), CoreError> {
    if count < 1 {
        return Err(CoreError::IllegalInput(format!(
            "Enum parameter '{}' needs at least one alternative",
            name
        )));
    }
    Ok(())
}

fn expect_type(name: &str, ty: ParamType, value: &Value) -> Result<(), CoreError> {
    if value.param_type() != ty {
        return Err(CoreError::TypeMismatch(format!(
            "Parameter '{}' declared {} but given a {} value",
            name,
            ty.as_str(),
            value.param_type().as_str()
        )));
    }
    Ok(())
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}) = {} [default {}]",
            self.name,
            self.class().as_str(),
            self.param_type().as_str(),
            self.value,
            self.default
        )?;
        if let Some(summary) = self.constraint_summary() {
            write!(f, " in {}", summary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_string_value_round_trip() {
        let literal = String::from("X");
        let mut p = Parameter::value_string("demo.label", "A label", Some("demo"), &literal);
        assert_eq!(p.get_default_string().unwrap(), "X");
        assert_ne!(p.get_default_string().unwrap().as_ptr(), literal.as_ptr());

        p.set_string("Y").unwrap();
        assert_eq!(p.get_string().unwrap(), "Y");
        assert_eq!(p.get_default_string().unwrap(), "X");
    }

    #[test]
    fn test_wrong_getter_is_type_mismatch() {
        let mut p = Parameter::value_int("demo.n", "Count", None, 3);
        assert_eq!(p.get_double().unwrap_err().kind(), ErrorKind::TypeMismatch);
        assert_eq!(p.set_bool(true).unwrap_err().kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            p.get_default_string().unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(p.get_int().unwrap(), 3);
    }

    #[test]
    fn test_range_rejects_bool_and_string() {
        let err = Parameter::new_range(
            "demo.flag",
            ParamType::Bool,
            "Flag",
            None,
            Value::Bool(true),
            Value::Bool(false),
            Value::Bool(true),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);

        let err = Parameter::new_range(
            "demo.mode",
            ParamType::String,
            "Mode",
            None,
            Value::from("a"),
            Value::from("a"),
            Value::from("z"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn test_range_accessors() {
        let p = Parameter::range_double("demo.sigma", "Clip", None, 3.0, 0.5, 10.0);
        assert_eq!(p.class(), ParamClass::Range);
        assert_eq!(p.get_range_min_double().unwrap(), 0.5);
        assert_eq!(p.get_range_max_double().unwrap(), 10.0);
        assert_eq!(p.get_range_min_int().unwrap_err().kind(), ErrorKind::TypeMismatch);
        assert_eq!(p.get_enum_size().unwrap_err().kind(), ErrorKind::TypeMismatch);

        let plain = Parameter::value_int("demo.n", "Count", None, 1);
        assert_eq!(plain.get_range_max_int().unwrap_err().kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_enum_needs_alternatives() {
        let err = Parameter::new_enum(
            "demo.method",
            ParamType::String,
            "Method",
            None,
            Value::from("median"),
            vec![],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalInput);

        let err = Parameter::enum_int("demo.n", "Count", None, 1, vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalInput);
    }

    #[test]
    fn test_enum_rejects_bool() {
        let err = Parameter::new_enum(
            "demo.flag",
            ParamType::Bool,
            "Flag",
            None,
            Value::Bool(true),
            vec![Value::Bool(true)],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn test_enum_default_outside_alternatives_is_accepted() {
        let p = Parameter::enum_string(
            "demo.method",
            "Combination method",
            Some("demo"),
            "mean",
            vec!["median".to_string(), "minmax".to_string()],
        )
        .unwrap();
        assert_eq!(p.get_string().unwrap(), "mean");
        assert!(!p.satisfies_constraint());
        assert_eq!(p.get_enum_size().unwrap(), 2);
        assert_eq!(p.get_enum_string(1).unwrap(), "minmax");
        assert_eq!(p.get_enum_string(2).unwrap_err().kind(), ErrorKind::AccessOutOfRange);
        assert_eq!(p.get_enum_int(0).unwrap_err().kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_setters_do_not_enforce_constraints() {
        let mut p = Parameter::range_int("demo.n", "Count", None, 5, 1, 10);
        p.set_int(42).unwrap();
        assert_eq!(p.get_int().unwrap(), 42);
        assert!(!p.satisfies_constraint());
        p.set_int(10).unwrap();
        assert!(p.satisfies_constraint());
    }

    #[test]
    fn test_dynamic_constructors_check_value_types() {
        let err = Parameter::new_value("demo.n", ParamType::Int, "Count", None, Value::Double(1.0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let p = Parameter::new_enum(
            "demo.k",
            ParamType::Double,
            "Kappa",
            None,
            Value::Double(2.5),
            vec![Value::Double(2.5), Value::Double(3.0)],
        )
        .unwrap();
        assert_eq!(p.get_enum_double(1).unwrap(), 3.0);

        let p = Parameter::new_range(
            "demo.iter",
            ParamType::Int,
            "Iterations",
            None,
            Value::Int(3),
            Value::Int(1),
            Value::Int(9),
        )
        .unwrap();
        assert_eq!(p.get_range_max_int().unwrap(), 9);
    }

    #[test]
    fn test_aliases_and_modes_are_independent() {
        let mut p = Parameter::value_bool("demo.recipe.verbose", "Chatty", None, false);
        p.set_alias(ParameterMode::Cli, Some("verbose"));
        p.set_alias(ParameterMode::Env, Some("DEMO_VERBOSE"));
        p.disable(ParameterMode::Env);

        assert_eq!(p.alias(ParameterMode::Cli), Some("verbose"));
        assert_eq!(p.alias(ParameterMode::Env), Some("DEMO_VERBOSE"));
        assert_eq!(p.alias(ParameterMode::Cfg), None);
        assert!(p.is_enabled(ParameterMode::Cli));
        assert!(!p.is_enabled(ParameterMode::Env));
        assert!(p.is_enabled(ParameterMode::Cfg));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("CLI".parse::<ParameterMode>().unwrap(), ParameterMode::Cli);
        assert_eq!(
            "gui".parse::<ParameterMode>().unwrap_err().kind(),
            ErrorKind::IllegalInput
        );
    }

    #[test]
    fn test_duplicate_is_deep() {
        let mut original = Parameter::enum_int("demo.n", "Count", Some("demo"), 1, vec![1, 2, 4])
            .unwrap();
        original.set_alias(ParameterMode::Cli, Some("n"));
        let mut copy = original.duplicate();
        copy.set_int(4).unwrap();
        copy.set_alias(ParameterMode::Cli, Some("count"));

        assert_eq!(original.get_int().unwrap(), 1);
        assert_eq!(original.alias(ParameterMode::Cli), Some("n"));
        assert_eq!(copy.get_enum_int(2).unwrap(), 4);
    }

    #[test]
    fn test_set_from_str() {
        let mut flag = Parameter::value_bool("demo.flag", "Flag", None, false);
        flag.set_from_str("TRUE").unwrap();
        assert!(flag.get_bool().unwrap());

        let mut n = Parameter::value_int("demo.n", "Count", None, 0);
        n.set_from_str(" 12 ").unwrap();
        assert_eq!(n.get_int().unwrap(), 12);
        assert_eq!(n.set_from_str("twelve").unwrap_err().kind(), ErrorKind::TypeMismatch);
        assert_eq!(n.get_int().unwrap(), 12);
    }

    #[test]
    fn test_display_includes_constraint() {
        let p = Parameter::range_int("demo.n", "Count", None, 5, 1, 10);
        assert_eq!(p.to_string(), "demo.n (range int) = 5 [default 5] in [1, 10]");
    }
}
