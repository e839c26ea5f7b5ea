//! Ordered parameter lists

use crate::error::CoreError;
use crate::parameter::{ParamType, Parameter, ParameterMode};
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// Ordered collection of parameters with unique names
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterList {
    parameters: Vec<Parameter>,
}

impl ParameterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter; its name must not already be in the list.
    pub fn append(&mut self, parameter: Parameter) -> Result<(), CoreError> {
        if self.find(parameter.name()).is_some() {
            return Err(CoreError::IllegalInput(format!(
                "Parameter '{}' already in list",
                parameter.name()
            )));
        }
        self.parameters.push(parameter);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Parameter> {
        self.parameters.iter_mut()
    }

    pub fn find(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.name() == name)
    }

    /// First parameter of value type `ty`.
    pub fn find_type(&self, ty: ParamType) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.param_type() == ty)
    }

    /// First parameter whose context equals `context`; `None` matches only
    /// parameters without a context.
    pub fn find_context(&self, context: Option<&str>) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.context() == context)
    }

    /// First parameter whose tag equals `tag`; `None` matches only
    /// untagged parameters.
    pub fn find_tag(&self, tag: Option<&str>) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.tag() == tag)
    }

    /// Parameter answering to `alias` in `mode`, if that mode is enabled.
    pub fn find_alias(&self, mode: ParameterMode, alias: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.is_enabled(mode) && p.alias(mode) == Some(alias))
    }

    pub fn find_alias_mut(&mut self, mode: ParameterMode, alias: &str) -> Option<&mut Parameter> {
        self.parameters
            .iter_mut()
            .find(|p| p.is_enabled(mode) && p.alias(mode) == Some(alias))
    }

    pub fn dump<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for ParameterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parameter list with {} parameter(s)", self.len())?;
        for parameter in &self.parameters {
            writeln!(f, "  {}", parameter)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}
