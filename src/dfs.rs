//! Product header bookkeeping
//!
//! Assembles the data-flow keywords that identify a product: its
//! category, the recipe and pipeline that made it, the raw and
//! calibration frames that went in and the parameters used.

use crate::error::CoreError;
use crate::frame::{Frame, FrameGroup, FrameLevel, Frameset};
use crate::parameter::{ParameterList, ParameterMode, Value};
use crate::plugin::Version;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Header keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Ordered keywords with unique names
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyList {
    properties: Vec<Property>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing the value and comment of an existing entry
    /// in place or appending a new one.
    pub fn update(&mut self, name: &str, value: impl Into<Value>, comment: Option<&str>) {
        let value = value.into();
        let comment = comment.map(str::to_string);
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.comment = comment;
            }
            None => self.properties.push(Property {
                name: name.to_string(),
                value,
                comment,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Value of `name` as text, for string keywords.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name).map(|p| &p.value) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for property in &self.properties {
            match &property.comment {
                Some(comment) => writeln!(f, "{} = {} / {}", property.name, property.value, comment)?,
                None => writeln!(f, "{} = {}", property.name, property.value)?,
            }
        }
        Ok(())
    }
}

fn product_type(level: FrameLevel) -> Result<&'static str, CoreError> {
    match level {
        FrameLevel::Temporary => Ok("TEMPORARY"),
        FrameLevel::Intermediate => Ok("PREPROCESSED"),
        FrameLevel::Final => Ok("REDUCED"),
        FrameLevel::None => Err(CoreError::IllegalInput(
            "Product frame has no processing level".into(),
        )),
    }
}

fn base_name(frame: &Frame) -> String {
    frame
        .filename()
        .map(|f| {
            Path::new(f)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| f.to_string())
        })
        .unwrap_or_default()
}

/// Build the product header keywords for `product`.
///
/// `frames` supplies the RAW and CALIB inputs; `parameters` are listed by
/// their command-line alias where one is set. Nothing is returned unless
/// every keyword could be assembled.
pub fn setup_product_header(
    product: &Frame,
    frames: &Frameset,
    parameters: &ParameterList,
    recipe: &str,
    pipeline_id: &str,
    dictionary_id: &str,
) -> Result<PropertyList, CoreError> {
    let category = product
        .tag()
        .ok_or_else(|| CoreError::IllegalInput("Product frame has no tag".into()))?;
    if product.group() != FrameGroup::Product {
        return Err(CoreError::IllegalInput(format!(
            "Frame '{}' is in group {}, not PRODUCT",
            base_name(product),
            product.group().as_str()
        )));
    }
    if recipe.is_empty() {
        return Err(CoreError::NullInput("recipe name".into()));
    }
    if pipeline_id.is_empty() {
        return Err(CoreError::NullInput("pipeline id".into()));
    }
    if dictionary_id.is_empty() {
        return Err(CoreError::NullInput("dictionary id".into()));
    }
    let pro_type = product_type(product.level())?;

    let mut header = PropertyList::new();
    header.update(
        "DATE",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        Some("Date the file was written"),
    );
    header.update("ESO PRO DID", dictionary_id, Some("Data dictionary for PRO"));
    header.update("ESO PRO CATG", category, Some("Category of pipeline product frame"));
    header.update("ESO PRO TYPE", pro_type, Some("Product type"));
    header.update("ESO PRO REC1 ID", recipe, Some("Pipeline recipe (unique) identifier"));
    header.update(
        "ESO PRO REC1 DRS ID",
        format!("framekit-{}", Version::current()),
        Some("Data Reduction System identifier"),
    );
    header.update("ESO PRO REC1 PIPE ID", pipeline_id, Some("Pipeline (unique) identifier"));

    let mut nraw = 0;
    let mut ncal = 0;
    for frame in frames.iter() {
        let (prefix, count) = match frame.group() {
            FrameGroup::Raw => ("RAW", &mut nraw),
            FrameGroup::Calib => ("CAL", &mut ncal),
            _ => continue,
        };
        *count += 1;
        let key = format!("ESO PRO REC1 {}{}", prefix, count);
        let (name_comment, catg_comment) = if prefix == "RAW" {
            ("File name of raw frame", "Category of raw frame")
        } else {
            ("File name of calibration frame", "Category of calibration frame")
        };
        header.update(&format!("{} NAME", key), base_name(frame), Some(name_comment));
        header.update(
            &format!("{} CATG", key),
            frame.tag().unwrap_or_default(),
            Some(catg_comment),
        );
    }
    header.update(
        "ESO PRO DATANCOM",
        nraw as i64,
        Some("Number of combined frames"),
    );

    for (index, parameter) in parameters.iter().enumerate() {
        let key = format!("ESO PRO REC1 PARAM{}", index + 1);
        let name = parameter
            .alias(ParameterMode::Cli)
            .unwrap_or(parameter.name());
        header.update(&format!("{} NAME", key), name, Some(parameter.description()));
        header.update(
            &format!("{} VALUE", key),
            parameter.value().to_string(),
            Some(if parameter.default_flag() {
                "Value set by the user"
            } else {
                "Default"
            }),
        );
    }

    debug!(
        product = %base_name(product),
        category,
        raw = nraw,
        calib = ncal,
        keywords = header.len(),
        "Assembled product header"
    );
    Ok(header)
}
