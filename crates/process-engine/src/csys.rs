//! Coordinate system registry and placement resolution.

use std::collections::HashMap;

use chip_types::csys::{CsysDef, WORLD_CSYS};
use solid_kernel::placement::{BasePlane, Placement};

use crate::error::EngineError;

/// Named frames of one request. The world frame is always present; when the
/// request does not define `WCS`, an identity frame is synthesized. A later
/// definition of the same name shadows an earlier one.
#[derive(Debug, Clone)]
pub struct CsysRegistry {
    frames: HashMap<String, CsysDef>,
}

impl CsysRegistry {
    pub fn build(list: &[CsysDef]) -> Self {
        let mut frames = HashMap::with_capacity(list.len() + 1);
        frames.insert(WORLD_CSYS.to_string(), CsysDef::world());
        for def in list {
            frames.insert(def.name.clone(), def.clone());
        }
        CsysRegistry { frames }
    }

    pub fn resolve(&self, name: &str) -> Result<&CsysDef, EngineError> {
        self.frames.get(name).ok_or_else(|| EngineError::UnknownCsys {
            name: name.to_string(),
        })
    }

    /// World placement of a frame on the given base plane.
    pub fn placement(&self, name: &str, plane: BasePlane) -> Result<Placement, EngineError> {
        let def = self.resolve(name)?;
        Ok(Placement::from_origin_rpy_deg(def.origin, def.rpy_deg).on_base_plane(plane))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
