//! Job descriptor: the flat payload handed to a remote inference worker.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AddressingTuple, ModelId, ModelResult};

/// Descriptor keys, as read by the worker images.
pub mod keys {
    pub const REMOTE_HOST: &str = "xnathost";
    pub const PRINCIPAL: &str = "user";
    pub const PROJECT: &str = "project";
    pub const SUBJECT: &str = "subject";
    pub const EXPERIMENT: &str = "experiment";
    pub const SCAN: &str = "scan";
    pub const MODEL: &str = "model";
    pub const EXPERIMENT_TYPE: &str = "experiment_type";
    pub const SCAN_DESCRIPTION: &str = "scan_description";
    pub const RESOURCE_KIND: &str = "resource_name";
    pub const ITEM_CATEGORY: &str = "files";
}

/// Identity the worker uses to reach the image archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteHost {
    /// Archive base URL.
    pub url: String,
    /// Account the worker authenticates as.
    pub principal: String,
}

impl Default for RemoteHost {
    fn default() -> Self {
        Self {
            url: "https://go.imside.ai".to_string(),
            principal: "admin".to_string(),
        }
    }
}

/// Flat `name → string` payload for one inference job.
///
/// Backed by a [`BTreeMap`], so the serialized form has sorted keys and two
/// descriptors built from the same inputs encode byte-identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDescriptor(BTreeMap<String, String>);

impl JobDescriptor {
    /// Combine the addressing tuple, the model's static profile and the host identity.
    pub fn build(addr: &AddressingTuple, model: ModelId, host: &RemoteHost) -> Self {
        let profile = model.profile();
        let fields = [
            (keys::REMOTE_HOST, host.url.as_str()),
            (keys::PRINCIPAL, host.principal.as_str()),
            (keys::PROJECT, addr.collection.as_str()),
            (keys::SUBJECT, addr.entity.as_str()),
            (keys::EXPERIMENT, addr.sub_entity.as_str()),
            (keys::SCAN, addr.item.as_str()),
            (keys::MODEL, model.as_str()),
            (keys::EXPERIMENT_TYPE, profile.experiment_type),
            (keys::SCAN_DESCRIPTION, profile.scan_description),
            (keys::RESOURCE_KIND, profile.resource_kind),
            (keys::ITEM_CATEGORY, profile.item_category),
        ];

        Self(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Compact JSON (`{"k":"v",...}`, no whitespace).
    pub fn to_compact_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> RemoteHost {
        RemoteHost::default()
    }

    #[test]
    fn builds_expected_fields() {
        let addr = AddressingTuple::parse("ProjA/Subj1/Exp1/Scan9");
        let d = JobDescriptor::build(&addr, ModelId::EfAnalysis, &host());

        assert_eq!(d.get(keys::PROJECT), Some("ProjA"));
        assert_eq!(d.get(keys::SUBJECT), Some("Subj1"));
        assert_eq!(d.get(keys::EXPERIMENT), Some("Exp1"));
        assert_eq!(d.get(keys::SCAN), Some("Scan9"));
        assert_eq!(d.get(keys::MODEL), Some("ef_analysis"));
        assert_eq!(d.get(keys::EXPERIMENT_TYPE), Some("MR"));
        assert_eq!(d.get(keys::REMOTE_HOST), Some("https://go.imside.ai"));
        assert_eq!(d.get(keys::PRINCIPAL), Some("admin"));
        assert_eq!(d.len(), 11);
    }

    #[test]
    fn encoding_is_deterministic() {
        let addr = AddressingTuple::parse("ProjA/Subj1/Exp1/Scan9");
        let a = JobDescriptor::build(&addr, ModelId::CalciumScore, &host())
            .to_compact_json()
            .unwrap();
        let b = JobDescriptor::build(&addr, ModelId::CalciumScore, &host())
            .to_compact_json()
            .unwrap();

        assert_eq!(a, b);
        assert!(!a.contains(' '));
        assert!(a.starts_with(r#"{"experiment":"Exp1","experiment_type":"CT""#));
    }

    #[test]
    fn every_value_is_a_string() {
        let d = JobDescriptor::build(&AddressingTuple::parse(""), ModelId::EfAnalysis, &host());
        let v: serde_json::Value = serde_json::from_str(&d.to_compact_json().unwrap()).unwrap();
        let obj = v.as_object().unwrap();
        assert!(obj.values().all(|v| v.is_string()));
        assert_eq!(obj["scan"], "");
    }
}
