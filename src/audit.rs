use serde_json::Value;

pub fn log_audit(action: &str, resource: Option<&str>, metadata: Option<Value>) {
    tracing::info!(
        target: "audit",
        action,
        resource = resource.unwrap_or("-"),
        metadata = %metadata.unwrap_or(serde_json::Value::Null),
        "admin action"
    );
}
