//! Initial workpiece construction.

use chip_types::stock::Stock;
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;

use crate::error::EngineError;

fn positive(value: f64, what: &str) -> Result<f64, EngineError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::Stock {
            reason: format!("{what} must be finite and positive, got {value}"),
        });
    }
    Ok(value)
}

/// Build the stock solid, centered on the world origin.
pub fn build_stock(kernel: &mut dyn Kernel, stock: &Stock) -> Result<SolidHandle, EngineError> {
    let solid = match stock {
        Stock::Block(b) | Stock::Mesh(b) => {
            if matches!(stock, Stock::Mesh(_)) {
                tracing::warn!("mesh stock is not imported; building a block placeholder");
            }
            let w = positive(b.w, "block width")?;
            let d = positive(b.d, "block depth")?;
            let h = positive(b.h, "block height")?;
            kernel.make_box(w, d, h).map_err(|e| EngineError::Stock {
                reason: e.to_string(),
            })?
        }
        Stock::Cylinder(c) => {
            let dia = positive(c.dia, "cylinder diameter")?;
            let h = positive(c.h, "cylinder height")?;
            kernel
                .make_cylinder(dia, h)
                .map_err(|e| EngineError::Stock {
                    reason: e.to_string(),
                })?
        }
    };
    tracing::info!(kind = stock.kind(), "stock built");
    Ok(solid)
}
