use metrics_exporter_prometheus::PrometheusHandle;
use risk_scoring::config::AppConfig;
use risk_scoring::error::AppError;
use risk_scoring::{LogisticModel, ModelMetadata};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) model: Arc<ModelMetadata>,
}

/// Loads the classifier, preferring an explicit path over the configured one.
pub(crate) fn load_model(
    config: &AppConfig,
    override_path: Option<PathBuf>,
) -> Result<LogisticModel, AppError> {
    let path = override_path.unwrap_or_else(|| config.model.path.clone());
    let model = LogisticModel::from_path(&path)?;
    let metadata = model.metadata();
    info!(
        path = %path.display(),
        model_type = %metadata.model_type,
        features = metadata.feature_names.len(),
        "model artifact loaded"
    );
    Ok(model)
}

/// Reads a JSON document from a file, or from stdin when the path is `-`.
pub(crate) fn read_json_input(path: &Path) -> Result<Value, AppError> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("risk-scoring-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[test]
    fn reads_json_documents_from_disk() {
        let path = scratch_file("input.json", r#"{"age": 52}"#);
        let value = read_json_input(&path).expect("valid json");
        assert_eq!(value["age"], 52);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn invalid_json_is_an_input_error() {
        let path = scratch_file("broken.json", "{ age: ");
        let err = read_json_input(&path).expect_err("not json");
        assert!(matches!(err, AppError::Input(_)));
        std::fs::remove_file(path).ok();
    }
}
