//! Merge-for-update
//!
//! Rendered objects never carry fields the API server assigns. When an
//! object already exists, those fields are copied from the live copy into
//! the desired one before the update is sent, so a no-op reconcile sends an
//! object equal to what is already stored.

use serde_json::Value;
use tracing::debug;

use crate::error::ApplyError;
use crate::object::ManifestObject;

/// Metadata fields owned by the API server
const RUNTIME_METADATA: [&str; 5] = [
    "creationTimestamp",
    "selfLink",
    "generation",
    "uid",
    "resourceVersion",
];

const DEPLOYMENT_REVISION_ANNOTATION: &str = "deployment.kubernetes.io/revision";

/// Checks that an object can go through the apply path
pub fn is_object_supported(obj: &ManifestObject) -> Result<(), ApplyError> {
    if obj.api_version().is_empty() {
        return Err(ApplyError::MissingField("apiVersion"));
    }
    if obj.kind().is_empty() {
        return Err(ApplyError::MissingField("kind"));
    }
    if obj.name().is_empty() {
        return Err(ApplyError::MissingField("metadata.name"));
    }

    // Token secrets are generated by the cluster; pinning them would fight the controller
    if obj.api_version() == "v1" && obj.kind() == "ServiceAccount" {
        let has_secrets = obj
            .nested(&["secrets"])
            .and_then(Value::as_array)
            .is_some_and(|secrets| !secrets.is_empty());
        if has_secrets {
            return Err(ApplyError::Unsupported {
                id: obj.id(),
                reason: "cannot create ServiceAccount with secrets".to_string(),
            });
        }
    }

    Ok(())
}

/// Merges the live object `current` into the desired object `updated`.
///
/// Kind-specific fields are handled first; metadata is merged last so it
/// sees the final state of `updated`.
pub fn merge_object_for_update(
    current: &ManifestObject,
    updated: &mut ManifestObject,
) -> Result<(), ApplyError> {
    if current.id() != updated.id() {
        return Err(ApplyError::Unsupported {
            id: updated.id(),
            reason: format!("cannot merge with {}", current.id()),
        });
    }

    let kind = updated.kind().to_string();
    match kind.as_str() {
        "Deployment" => merge_deployment(current, updated),
        "Service" => merge_service(current, updated),
        "ServiceAccount" => merge_service_account(current, updated),
        _ => {}
    }
    merge_metadata(current, updated);

    debug!("Merged {} for update", updated.id());
    Ok(())
}

fn merge_deployment(current: &ManifestObject, updated: &mut ManifestObject) {
    let path = ["metadata", "annotations", DEPLOYMENT_REVISION_ANNOTATION];
    if let Some(revision) = current.nested(&path) {
        updated.set_nested(&path, revision.clone());
    }
}

fn merge_service(current: &ManifestObject, updated: &mut ManifestObject) {
    let path = ["spec", "clusterIP"];
    if let Some(cluster_ip) = current.nested(&path) {
        updated.set_nested(&path, cluster_ip.clone());
    }
}

fn merge_service_account(current: &ManifestObject, updated: &mut ManifestObject) {
    if let Some(secrets) = current.nested(&["secrets"]) {
        updated.set_nested(&["secrets"], secrets.clone());
    }
}

fn merge_metadata(current: &ManifestObject, updated: &mut ManifestObject) {
    for field in RUNTIME_METADATA {
        let path = ["metadata", field];
        match current.nested(&path) {
            Some(value) => updated.set_nested(&path, value.clone()),
            None => {
                updated.remove_nested(&path);
            }
        }
    }
    merge_string_map(current, updated, &["metadata", "labels"]);
    merge_string_map(current, updated, &["metadata", "annotations"]);
}

/// Union of both maps; keys present in `updated` win
fn merge_string_map(current: &ManifestObject, updated: &mut ManifestObject, path: &[&str]) {
    let Some(live) = current.nested(path).and_then(Value::as_object) else {
        return;
    };
    if live.is_empty() {
        return;
    }
    let mut merged = live.clone();
    if let Some(desired) = updated.nested(path).and_then(Value::as_object) {
        merged.extend(desired.clone());
    }
    updated.set_nested(path, Value::Object(merged));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> ManifestObject {
        ManifestObject::from_value(value).unwrap()
    }

    fn config_map() -> ManifestObject {
        object(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {
                "name": "sdn-config",
                "namespace": "openshift-sdn",
                "labels": {"app": "sdn"}
            },
            "data": {"sdn-config.yaml": "kind: NodeConfig"}
        }))
    }

    #[test]
    fn test_merge_with_itself_is_identity() {
        let cur = config_map();
        let mut upd = config_map();
        merge_object_for_update(&cur, &mut upd).unwrap();
        assert_eq!(upd, cur);
    }

    #[test]
    fn test_merge_keeps_runtime_metadata() {
        let mut cur = config_map();
        cur.set_nested(&["metadata", "uid"], json!("abc-123"));
        cur.set_nested(&["metadata", "resourceVersion"], json!("42"));
        cur.set_nested(&["metadata", "generation"], json!(3));

        let mut upd = config_map();
        upd.set_nested(&["metadata", "selfLink"], json!("/stale"));
        merge_object_for_update(&cur, &mut upd).unwrap();

        assert_eq!(upd.nested_str(&["metadata", "uid"]), Some("abc-123"));
        assert_eq!(upd.nested_str(&["metadata", "resourceVersion"]), Some("42"));
        assert_eq!(upd.nested(&["metadata", "generation"]), Some(&json!(3)));
        assert_eq!(upd.nested(&["metadata", "selfLink"]), None);
    }

    #[test]
    fn test_merge_labels_desired_wins() {
        let mut cur = config_map();
        cur.set_nested(&["metadata", "labels", "app"], json!("old"));
        cur.set_nested(&["metadata", "labels", "added-by-admin"], json!("yes"));
        let mut upd = config_map();

        merge_object_for_update(&cur, &mut upd).unwrap();
        let labels = upd.nested_string_map(&["metadata", "labels"]).unwrap();
        assert_eq!(labels["app"], "sdn");
        assert_eq!(labels["added-by-admin"], "yes");
    }

    #[test]
    fn test_merge_deployment_keeps_revision() {
        let deployment = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "x", "namespace": "y", "annotations": {"a": "b"}}
        });
        let mut cur = object(deployment.clone());
        cur.set_nested(
            &["metadata", "annotations", DEPLOYMENT_REVISION_ANNOTATION],
            json!("7"),
        );
        let mut upd = object(deployment);
        upd.set_nested(
            &["metadata", "annotations", DEPLOYMENT_REVISION_ANNOTATION],
            json!("1"),
        );

        merge_object_for_update(&cur, &mut upd).unwrap();
        assert_eq!(
            upd.nested_str(&["metadata", "annotations", DEPLOYMENT_REVISION_ANNOTATION]),
            Some("7")
        );
        assert_eq!(upd.nested_str(&["metadata", "annotations", "a"]), Some("b"));
    }

    #[test]
    fn test_merge_service_keeps_cluster_ip() {
        let service = json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": "sdn", "namespace": "openshift-sdn"},
            "spec": {"ports": [{"port": 9101}]}
        });
        let mut cur = object(service.clone());
        cur.set_nested(&["spec", "clusterIP"], json!("172.30.0.10"));
        let mut upd = object(service);

        merge_object_for_update(&cur, &mut upd).unwrap();
        assert_eq!(upd.nested_str(&["spec", "clusterIP"]), Some("172.30.0.10"));
        assert_eq!(upd.nested(&["spec", "ports"]), Some(&json!([{"port": 9101}])));
    }

    #[test]
    fn test_merge_service_account_keeps_secrets() {
        let sa = json!({
            "apiVersion": "v1",
            "kind": "ServiceAccount",
            "metadata": {"name": "sdn", "namespace": "openshift-sdn"}
        });
        let mut cur = object(sa.clone());
        cur.set_nested(&["secrets"], json!([{"name": "sdn-token-abcde"}]));
        let mut upd = object(sa);

        merge_object_for_update(&cur, &mut upd).unwrap();
        assert_eq!(upd.nested(&["secrets"]), cur.nested(&["secrets"]));
    }

    #[test]
    fn test_merge_rejects_different_objects() {
        let cur = config_map();
        let mut upd = config_map();
        upd.set_nested(&["metadata", "name"], json!("other"));
        assert!(merge_object_for_update(&cur, &mut upd).is_err());
    }

    #[test]
    fn test_supported_objects() {
        assert!(is_object_supported(&config_map()).is_ok());

        let no_kind = object(json!({"apiVersion": "v1", "metadata": {"name": "x"}}));
        assert_eq!(
            is_object_supported(&no_kind).unwrap_err().to_string(),
            "object is missing kind"
        );

        let sa_with_secrets = object(json!({
            "apiVersion": "v1",
            "kind": "ServiceAccount",
            "metadata": {"name": "sdn", "namespace": "openshift-sdn"},
            "secrets": [{"name": "t"}]
        }));
        let err = is_object_supported(&sa_with_secrets).unwrap_err();
        assert!(err.to_string().contains("cannot create ServiceAccount with secrets"));
    }
}
