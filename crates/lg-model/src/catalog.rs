//! Closed set of models the gateway knows how to launch.
//!
//! Every per-model constant lives in a [`ModelProfile`] record; adding a model means
//! adding a variant and its profile, nothing else branches on the identifier.
use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Known model identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    /// Cardiac ejection-fraction analysis on short-axis cine MR.
    EfAnalysis,
    /// Coronary calcium scoring on CT.
    CalciumScore,
}

impl ModelId {
    /// All known models, in advertisement order.
    pub const ALL: [ModelId; 2] = [ModelId::EfAnalysis, ModelId::CalciumScore];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ModelId::EfAnalysis => "ef_analysis",
            ModelId::CalciumScore => "calcium_score",
        }
    }

    pub const fn profile(&self) -> &'static ModelProfile {
        match self {
            ModelId::EfAnalysis => &EF_ANALYSIS,
            ModelId::CalciumScore => &CALCIUM_SCORE,
        }
    }
}

impl FromStr for ModelId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ModelError::UnknownModel(s.to_string()))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static attributes of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProfile {
    /// Model family advertised to the viewer (`segmentation`, `deepedit`, ...).
    pub model_type: &'static str,
    /// Interactive tools receive clicks/scribbles as form parameters.
    pub interactive: bool,
    pub description: &'static str,
    /// Label name → label index.
    pub labels: &'static [(&'static str, u32)],
    pub dimension: u8,
    /// Modality of the experiment the worker should open.
    pub experiment_type: &'static str,
    /// Series description the worker uses to pick the scan.
    pub scan_description: &'static str,
    /// Resource folder holding the images.
    pub resource_kind: &'static str,
    /// File category inside the resource.
    pub item_category: &'static str,
}

impl ModelProfile {
    /// Label set as an owned, ordered map.
    pub fn label_map(&self) -> BTreeMap<String, u32> {
        self.labels
            .iter()
            .map(|(name, idx)| (name.to_string(), *idx))
            .collect()
    }
}

const EF_ANALYSIS: ModelProfile = ModelProfile {
    model_type: "segmentation",
    interactive: false,
    description: "Ejection Fraction Analysis",
    labels: &[("left_ventricle", 1), ("right_ventricle", 2)],
    dimension: 3,
    experiment_type: "MR",
    scan_description: "rEIXO_CURTO",
    resource_kind: "DICOM",
    item_category: "data",
};

const CALCIUM_SCORE: ModelProfile = ModelProfile {
    model_type: "segmentation",
    interactive: false,
    description: "Coronary Calcium Score",
    labels: &[("calcification", 1)],
    dimension: 3,
    experiment_type: "CT",
    scan_description: "ESCORE_CALCIO",
    resource_kind: "DICOM",
    item_category: "data",
};

/// Union of label names across all models, first-seen order, no duplicates.
pub fn all_labels() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for model in ModelId::ALL {
        for (name, _) in model.profile().labels {
            if !out.contains(name) {
                out.push(*name);
            }
        }
    }
    out
}
