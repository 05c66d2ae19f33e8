//! `safespot.toml`: search defaults and the shape of the generated world.
//!
//! Every field is optional. A missing file is the same as an empty one.
//!
//! ```toml
//! [search]
//! height = 3
//! width = 9
//! max_drop = 2
//! kernel = "DEFAULT"
//!
//! [world]
//! min_y = -64
//! max_y = 319
//! chunk_radius = 4
//! surface_y = 64
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use safespot_engine::teleport::{
    DEFAULT_HEIGHT, DEFAULT_MAX_DROP_DISTANCE, DEFAULT_WIDTH, Kernel, SearchParams,
};
use safespot_engine::world::position::BlockPos;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchConfig,
    pub world: WorldConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub height: i32,
    pub width: i32,
    pub max_drop: i32,
    pub kernel: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            max_drop: DEFAULT_MAX_DROP_DISTANCE,
            kernel: Kernel::Default.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn kernel(&self) -> Result<Kernel> {
        match Kernel::from_name(&self.kernel) {
            Some(kernel) => Ok(kernel),
            None => bail!(
                "unknown kernel {:?} (expected one of {})",
                self.kernel,
                Kernel::ALL.map(|k| k.to_string()).join(", ")
            ),
        }
    }

    pub fn params(&self, origin: BlockPos) -> SearchParams {
        SearchParams::new(origin)
            .height(self.height)
            .width(self.width)
            .max_drop(self.max_drop)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Lowest y that may hold blocks.
    pub min_y: i64,
    /// Highest y that may hold blocks.
    pub max_y: i64,
    /// Generated chunks span `-chunk_radius..chunk_radius` on both axes.
    pub chunk_radius: i32,
    /// Y of the grass layer; entities stand at `surface_y + 1`.
    pub surface_y: i64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            min_y: -64,
            max_y: 319,
            chunk_radius: 4,
            surface_y: 64,
        }
    }
}

impl Config {
    /// Read and validate a config file. `None` yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::parse(&text).with_context(|| format!("in config {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.search.kernel()?;
        if self.search.height < 0 || self.search.width < 0 {
            bail!(
                "search radii must be non-negative (height {}, width {})",
                self.search.height,
                self.search.width
            );
        }
        if self.world.min_y > self.world.max_y {
            bail!(
                "world.min_y ({}) is above world.max_y ({})",
                self.world.min_y,
                self.world.max_y
            );
        }
        if !(self.world.min_y..self.world.max_y).contains(&self.world.surface_y) {
            bail!(
                "world.surface_y ({}) must lie in {}..{}",
                self.world.surface_y,
                self.world.min_y,
                self.world.max_y
            );
        }
        if self.world.chunk_radius <= 0 {
            bail!("world.chunk_radius must be positive");
        }
        Ok(())
    }
}
