//! TOML run profiles and model selection.
//!
//! A run profile captures everything the command line can toggle, so a
//! configured run is reproducible from one file:
//!
//! ```toml
//! quota = 100
//! root = "work"
//! random = true
//!
//! [[sub_kind]]
//! kind = "work"
//! name = "Series"
//!
//! [[attribute]]
//! kind = "work"
//! predicate = "rating"
//! constraints = [0, 1]
//!
//! [[link]]
//! source = "work"
//! target = "person"
//! name = "cast"
//! ```
//!
//! Command-line flags override the profile's generation settings; sub-kind,
//! attribute and link toggles accumulate.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use filmfact_domain::EntityKind;
use filmfact_engine::GenerationConfig;
use filmfact_model::Model;
use serde::Deserialize;

/// Declarative run configuration loaded from TOML
#[derive(Debug, Default, Deserialize)]
pub struct RunProfile {
    /// Number of root records to accept
    pub quota: Option<usize>,
    /// Root entity kind name
    pub root: Option<String>,
    /// Random candidate order
    pub random: Option<bool>,
    /// Refill round cap override
    pub max_refill_rounds: Option<usize>,
    /// Sub-kind toggles
    #[serde(default, rename = "sub_kind")]
    pub sub_kinds: Vec<SubKindToggle>,
    /// Attribute toggles
    #[serde(default, rename = "attribute")]
    pub attributes: Vec<AttributeToggle>,
    /// Link kind toggles
    #[serde(default, rename = "link")]
    pub links: Vec<LinkToggle>,
}

/// Enables or disables one sub-kind of a catalog
#[derive(Debug, Deserialize)]
pub struct SubKindToggle {
    /// Owning entity kind name
    pub kind: String,
    /// Sub-kind display name (e.g. "Series")
    pub name: String,
    /// Defaults to enabling
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

/// Enables or disables one attribute, optionally with constraint slots
#[derive(Debug, Deserialize)]
pub struct AttributeToggle {
    /// Owning entity kind name
    pub kind: String,
    /// Attribute predicate name (e.g. "rating")
    pub predicate: String,
    /// Defaults to enabling
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    /// Indices of constraint slots to enable (declaration order)
    #[serde(default)]
    pub constraints: Vec<usize>,
}

/// Enables one link kind between two catalogs
#[derive(Debug, Deserialize)]
pub struct LinkToggle {
    /// Source entity kind name
    pub source: String,
    /// Target entity kind name
    pub target: String,
    /// Link kind name (e.g. "cast", "remake of")
    pub name: String,
}

fn enabled_default() -> bool {
    true
}

fn parse_kind(name: &str) -> Result<EntityKind> {
    EntityKind::parse(name).with_context(|| format!("unknown entity kind '{}'", name))
}

impl RunProfile {
    /// Load a profile from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read profile {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid profile {}", path.display()))
    }

    /// Overlay the profile's generation settings onto a config
    pub fn apply_config(&self, config: &mut GenerationConfig) -> Result<()> {
        if let Some(quota) = self.quota {
            config.quota = quota;
        }
        if let Some(root) = &self.root {
            config.root = parse_kind(root)?;
        }
        if let Some(random) = self.random {
            config.random = random;
        }
        if let Some(rounds) = self.max_refill_rounds {
            config.max_refill_rounds = rounds;
        }
        Ok(())
    }

    /// Apply the profile's sub-kind, attribute and link toggles to a model
    ///
    /// Fails on names the model does not know rather than silently ignoring
    /// a misspelled toggle.
    pub fn apply_model(&self, model: &mut Model) -> Result<()> {
        for toggle in &self.sub_kinds {
            let kind = parse_kind(&toggle.kind)?;
            if !model.catalog_mut(kind).set_sub_kind(&toggle.name, toggle.enabled) {
                bail!("{} has no sub-kind '{}'", kind, toggle.name);
            }
        }
        for toggle in &self.attributes {
            let kind = parse_kind(&toggle.kind)?;
            let attribute = model
                .catalog_mut(kind)
                .attribute_mut(&toggle.predicate)
                .with_context(|| {
                    format!("{} has no attribute '{}'", kind, toggle.predicate)
                })?;
            attribute.enabled = toggle.enabled;
            for &index in &toggle.constraints {
                let slot = attribute.constraints.get_mut(index).with_context(|| {
                    format!("attribute '{}' has no constraint slot {}", toggle.predicate, index)
                })?;
                slot.enabled = true;
            }
        }
        for toggle in &self.links {
            apply_link(model, &toggle.source, &toggle.target, &toggle.name)?;
        }
        Ok(())
    }
}

/// Enable one link kind, failing on unknown names
pub fn apply_link(model: &mut Model, source: &str, target: &str, name: &str) -> Result<()> {
    let source = parse_kind(source)?;
    let target = parse_kind(target)?;
    if !model.enable_link(source, target, name) {
        bail!("no '{}' link from {} to {}", name, source, target);
    }
    Ok(())
}

/// Parse a `KIND:NAME` sub-kind flag and apply it
pub fn apply_sub_kind_flag(model: &mut Model, flag: &str) -> Result<()> {
    let Some((kind, name)) = flag.split_once(':') else {
        bail!("sub-kind flag '{}' is not KIND:NAME", flag);
    };
    let kind = parse_kind(kind)?;
    if !model.catalog_mut(kind).set_sub_kind(name, true) {
        bail!("{} has no sub-kind '{}'", kind, name);
    }
    Ok(())
}

/// Parse a `SOURCE:TARGET:NAME` link flag and apply it
pub fn apply_link_flag(model: &mut Model, flag: &str) -> Result<()> {
    let parts: Vec<&str> = flag.splitn(3, ':').collect();
    let [source, target, name] = parts[..] else {
        bail!("link flag '{}' is not SOURCE:TARGET:NAME", flag);
    };
    apply_link(model, source, target, name)
}
