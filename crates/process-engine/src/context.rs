//! Process context: current solid plus the append-only step history.

use chip_types::feature::Feature;
use chip_types::request::FeatureRequest;
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;
use volume_ops::types::GeometryDelta;

use crate::csys::CsysRegistry;
use crate::error::EngineError;
use crate::feature::apply_feature;
use crate::stock::build_stock;

/// One applied feature: the feature as requested plus the geometry it
/// produced. Records are append-only; handles of earlier records stay valid.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub name: String,
    pub feature: Feature,
    pub delta: GeometryDelta,
}

impl StepRecord {
    /// File-name stem for per-step exports: the sanitized step name, or
    /// `stepNN` when the name yields nothing usable.
    pub fn file_stem(&self, index: usize) -> String {
        let cleaned: String = self
            .name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        if cleaned.trim_matches('_').is_empty() {
            format!("step{:02}", index + 1)
        } else {
            cleaned
        }
    }
}

/// Workpiece state threaded through the feature pipeline.
#[derive(Debug)]
pub struct ProcessContext {
    pub solid: SolidHandle,
    pub csys: CsysRegistry,
    pub steps: Vec<StepRecord>,
}

impl ProcessContext {
    /// Build stock and frame registry from a request. Stock failure is
    /// terminal: there is no context without a workpiece.
    pub fn from_request(
        kernel: &mut dyn Kernel,
        request: &FeatureRequest,
    ) -> Result<Self, EngineError> {
        let solid = build_stock(kernel, &request.stock)?;
        let csys = CsysRegistry::build(&request.csys_list);
        Ok(ProcessContext {
            solid,
            csys,
            steps: Vec::new(),
        })
    }

    /// Apply one feature: validate, construct, apply, record.
    pub fn apply(
        &mut self,
        kernel: &mut dyn Kernel,
        feature: &Feature,
    ) -> Result<GeometryDelta, EngineError> {
        let delta = apply_feature(kernel, self.solid, feature, &self.csys)?;
        tracing::debug!(
            feature = %feature.id,
            kind = feature.kind(),
            identity = delta.is_identity(),
            "feature applied"
        );
        self.solid = delta.solid;
        self.steps.push(StepRecord {
            name: feature.display_name().to_string(),
            feature: feature.clone(),
            delta: delta.clone(),
        });
        Ok(delta)
    }

    /// Apply features in order, halting on the first failure. Steps applied
    /// before the failure remain recorded.
    pub fn apply_all(
        &mut self,
        kernel: &mut dyn Kernel,
        features: &[Feature],
    ) -> Result<(), EngineError> {
        for feature in features {
            if let Err(err) = self.apply(kernel, feature) {
                tracing::warn!(feature = %feature.id, error = %err, "pipeline halted");
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Result of running a full feature request: the context with every step
/// that applied, plus the error that halted the pipeline, if any.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub context: ProcessContext,
    pub error: Option<EngineError>,
}

/// Run a feature request end to end. Stock construction failure is the only
/// terminal error; a feature failure returns the partial history alongside
/// the error.
pub fn run_request(
    kernel: &mut dyn Kernel,
    request: &FeatureRequest,
) -> Result<PipelineOutcome, EngineError> {
    let mut context = ProcessContext::from_request(kernel, request)?;
    let error = context.apply_all(kernel, &request.features).err();
    tracing::info!(
        steps = context.steps.len(),
        halted = error.is_some(),
        "feature pipeline finished"
    );
    Ok(PipelineOutcome { context, error })
}
