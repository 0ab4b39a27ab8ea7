//! Placeholder inference result served when the inference backend is unreachable.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::{ModelId, ModelProfile};

/// Marker telling the viewer the result is synthetic.
pub const FALLBACK_WARNING: &str = "AI backend unavailable - test result";

/// Stand-in response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackResult {
    pub status: String,
    pub model: String,
    pub label_names: BTreeMap<String, u32>,
    pub warning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive_params: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FallbackResult {
    /// Result for a catalog model.
    pub fn synthesize(model: ModelId, params: &BTreeMap<String, String>) -> Self {
        Self::from_profile(model.as_str(), model.profile(), params)
    }

    /// Result for an arbitrary profile.
    ///
    /// Interactive tools echo back the parameters they were given, when there are any.
    pub fn from_profile(
        name: &str,
        profile: &ModelProfile,
        params: &BTreeMap<String, String>,
    ) -> Self {
        let echo = profile.interactive && !params.is_empty();

        Self {
            status: "success".to_string(),
            model: name.to_string(),
            label_names: profile.label_map(),
            warning: FALLBACK_WARNING.to_string(),
            interactive_params: echo.then(|| params.clone()),
            message: echo.then(|| {
                format!("interactive tool '{name}' processed with received parameters")
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEEPGROW: ModelProfile = ModelProfile {
        model_type: "deepgrow",
        interactive: true,
        description: "region growing from clicks",
        labels: &[("foreground", 1), ("background", 0)],
        dimension: 3,
        experiment_type: "CT",
        scan_description: "",
        resource_kind: "DICOM",
        item_category: "data",
    };

    #[test]
    fn segmentation_result_carries_labels_and_warning() {
        let r = FallbackResult::synthesize(ModelId::EfAnalysis, &BTreeMap::new());
        assert_eq!(r.status, "success");
        assert_eq!(r.model, "ef_analysis");
        assert_eq!(r.label_names.get("left_ventricle"), Some(&1));
        assert_eq!(r.warning, FALLBACK_WARNING);
        assert!(r.interactive_params.is_none());

        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("message").is_none());
    }

    #[test]
    fn segmentation_ignores_params() {
        let mut params = BTreeMap::new();
        params.insert("foreground".to_string(), "[[1,2,3]]".to_string());
        let r = FallbackResult::synthesize(ModelId::CalciumScore, &params);
        assert!(r.interactive_params.is_none());
        assert!(r.message.is_none());
    }

    #[test]
    fn interactive_echoes_params() {
        let mut params = BTreeMap::new();
        params.insert("foreground".to_string(), "[[1,2,3]]".to_string());

        let r = FallbackResult::from_profile("deepgrow", &DEEPGROW, &params);
        assert_eq!(r.interactive_params.as_ref(), Some(&params));
        assert!(r.message.unwrap().contains("deepgrow"));
        assert_eq!(r.label_names.get("background"), Some(&0));
    }

    #[test]
    fn interactive_without_params_has_no_echo() {
        let r = FallbackResult::from_profile("deepgrow", &DEEPGROW, &BTreeMap::new());
        assert!(r.interactive_params.is_none());
    }
}
