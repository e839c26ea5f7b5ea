//! Recipes written outside the crate, registered through a plugin entry point

use super::test_utils::{host_config, no_env};
use framekit::error::{CoreError, ErrorKind};
use framekit::frame::{Frame, FrameGroup, FrameLevel, Frameset};
use framekit::host::Host;
use framekit::parameter::{Parameter, ParameterList, ParameterMode};
use framekit::plugin::{PluginList, PluginState, PluginType, Version};
use framekit::recipe::config::RecipeConfig;
use framekit::recipe::{Recipe, RecipeContext, RecipeDefinition, RecipeInfo, RecipeV2};
use tempfile::TempDir;

/// Stacks SCIENCE frames; needs exactly one MASTER_BIAS.
struct Stack;

impl RecipeDefinition for Stack {
    fn info(&self) -> RecipeInfo {
        RecipeInfo {
            name: "stack".into(),
            version: Version::new(2, 0, 1),
            synopsis: "Stack science frames".into(),
            description: "Averages SCIENCE frames after bias subtraction".into(),
            author: "Pipeline Team".into(),
            email: "pipeline@example.org".into(),
            copyright: "MIT".into(),
        }
    }

    fn fill_parameterlist(&self, parameters: &mut ParameterList) -> Result<(), CoreError> {
        let mut method = Parameter::enum_string(
            "stack.method",
            "Combination method",
            Some("stack"),
            "median",
            vec!["mean".into(), "median".into()],
        )?;
        method.set_alias(ParameterMode::Cli, Some("method"));
        parameters.append(method)
    }

    fn run(
        &self,
        frames: &mut Frameset,
        parameters: &ParameterList,
        context: &mut RecipeContext,
    ) -> Result<(), CoreError> {
        let method = parameters
            .find("stack.method")
            .ok_or_else(|| CoreError::DataNotFound("stack.method".into()))?
            .get_string()?
            .to_string();
        if frames.count_tags("SCIENCE") < 2 {
            context.record("stack", CoreError::DataNotFound("one frame is not a stack".into()));
            return Ok(());
        }
        frames.insert(
            Frame::tagged(
                context.output_dir().join(format!("stack_{}.fits", method)).to_string_lossy(),
                "STACKED",
            )
            .with_group(FrameGroup::Product)
            .with_level(FrameLevel::Intermediate),
        )?;
        Ok(())
    }

    fn recipe_config(&self) -> Option<RecipeConfig> {
        let mut config = RecipeConfig::new();
        config.set_tag("SCIENCE", Some(1), None).ok()?;
        config.set_input("SCIENCE", "MASTER_BIAS", Some(1), Some(1)).ok()?;
        config.set_output("SCIENCE", "STACKED").ok()?;
        Some(config)
    }
}

fn register(list: &mut PluginList) -> Result<(), CoreError> {
    list.append(RecipeV2::plugin(Box::new(Stack))?)
}

fn science(n: usize, master_bias: usize) -> Frameset {
    let mut set = Frameset::new();
    for i in 0..n {
        set.insert(Frame::tagged(format!("sci_{}.fits", i), "SCIENCE").with_group(FrameGroup::Raw))
            .unwrap();
    }
    for i in 0..master_bias {
        set.insert(
            Frame::tagged(format!("mb_{}.fits", i), "MASTER_BIAS").with_group(FrameGroup::Calib),
        )
        .unwrap();
    }
    set
}

#[test]
fn test_plugin_list_from_entry_point() {
    let list = PluginList::from_info_fn(register).unwrap();
    assert_eq!(list.names(), vec!["stack"]);

    let plugin = list.find("stack").unwrap();
    assert_eq!(plugin.plugin_type(), PluginType::RECIPE_V2);
    assert!(plugin.plugin_type().contains(PluginType::RECIPE));
    assert_eq!(plugin.state(), PluginState::Uninitialized);
    assert_eq!(Version::from_code(plugin.info().version), Version::new(2, 0, 1));
    assert!(plugin.recipe_v2().unwrap().config().is_none());
}

#[test]
fn test_v2_lifecycle_exposes_config_while_initialized() {
    let mut list = PluginList::from_info_fn(register).unwrap();
    let plugin = list.find_mut("stack").unwrap();

    assert_eq!(plugin.execute().unwrap_err().kind(), ErrorKind::IllegalInput);
    plugin.initialize().unwrap();
    assert_eq!(plugin.initialize().unwrap_err().kind(), ErrorKind::IllegalInput);

    let config = plugin.recipe_v2().unwrap().config().unwrap();
    assert_eq!(config.tags(), vec!["SCIENCE"]);
    assert_eq!(config.inputs("SCIENCE").unwrap(), vec!["MASTER_BIAS"]);
    assert_eq!(config.outputs("SCIENCE").unwrap(), vec!["STACKED"]);
    assert_eq!(config.max_count("SCIENCE", "MASTER_BIAS").unwrap(), Some(1));

    plugin.deinitialize().unwrap();
    plugin.deinitialize().unwrap();
    assert_eq!(plugin.state(), PluginState::Deinitialized);
    assert!(plugin.recipe_v2().unwrap().config().is_none());
    assert!(plugin.recipe().unwrap().parameters().is_none());
}

#[test]
fn test_host_runs_external_v2_recipe() {
    let temp_dir = TempDir::new().unwrap();
    let host = Host::with_plugins(host_config(&temp_dir), register).with_env_lookup(no_env);

    let recipes = host.recipes().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].name, "stack");

    let report = host
        .run(
            "stack",
            science(3, 1),
            &[("method".to_string(), "mean".to_string())],
        )
        .unwrap();
    assert_eq!(report.products.len(), 1);
    let header = &report.products[0].header;
    assert_eq!(header.get_string("ESO PRO TYPE"), Some("PREPROCESSED"));
    assert_eq!(header.get_string("ESO PRO REC1 PARAM1 NAME"), Some("method"));
    assert_eq!(header.get_string("ESO PRO REC1 PARAM1 VALUE"), Some("mean"));
    assert_eq!(header.get_string("ESO PRO REC1 CAL1 NAME"), Some("mb_0.fits"));
}

#[test]
fn test_host_rejects_frames_violating_config() {
    let temp_dir = TempDir::new().unwrap();
    let host = Host::with_plugins(host_config(&temp_dir), register).with_env_lookup(no_env);

    let err = host.run("stack", science(2, 2), &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalInput);
    assert!(err.to_string().contains("MASTER_BIAS: found 2"));
}

#[test]
fn test_recorded_errors_reach_the_report() {
    let temp_dir = TempDir::new().unwrap();
    let host = Host::with_plugins(host_config(&temp_dir), register).with_env_lookup(no_env);

    let report = host.run("stack", science(1, 1), &[]).unwrap();
    assert!(report.products.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, ErrorKind::DataNotFound);
    assert_eq!(report.errors[0].location, "stack");
}

#[test]
fn test_plain_recipe_has_no_v2_view() {
    let plugin = Recipe::plugin(Box::new(Stack)).unwrap();
    assert_eq!(plugin.plugin_type(), PluginType::RECIPE);
    assert!(plugin.recipe().is_some());
    assert!(plugin.recipe_v2().is_none());
}
