//! Initial workpiece descriptions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStock {
    pub w: f64,
    #[serde(alias = "l")]
    pub d: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CylinderStock {
    #[serde(alias = "d")]
    pub dia: f64,
    pub h: f64,
}

/// Stock shape, centered on the world origin. `mesh` is accepted but built
/// as a block placeholder from the same `w/d/h` parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "lowercase")]
pub enum Stock {
    Block(BlockStock),
    Cylinder(CylinderStock),
    Mesh(BlockStock),
}

impl Stock {
    pub fn kind(&self) -> &'static str {
        match self {
            Stock::Block(_) => "block",
            Stock::Cylinder(_) => "cylinder",
            Stock::Mesh(_) => "mesh",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_accepts_length_alias() {
        let stock: Stock =
            serde_json::from_str(r#"{ "type": "block", "params": { "w": 80, "l": 60, "h": 50 } }"#)
                .unwrap();
        match stock {
            Stock::Block(b) => {
                assert_eq!(b.d, 60.0);
                assert_eq!(b.h, 50.0);
            }
            other => panic!("unexpected stock: {other:?}"),
        }
    }

    #[test]
    fn cylinder_accepts_diameter_alias() {
        let stock: Stock =
            serde_json::from_str(r#"{ "type": "cylinder", "params": { "d": 50, "h": 80 } }"#)
                .unwrap();
        match stock {
            Stock::Cylinder(c) => assert_eq!(c.dia, 50.0),
            other => panic!("unexpected stock: {other:?}"),
        }
    }
}
