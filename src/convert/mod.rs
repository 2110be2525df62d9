// src/convert/mod.rs
//
// Boundary glue around the serializer: default feature selection, the
// combined features+target conversion, and writing the one-shot output
// artifacts. Everything here is fallible I/O or policy; the literal text
// itself comes from `crate::lua`.

use crate::{dataset::Dataset, lua};
use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use tracing::{debug, info};

/// The literals produced by one conversion request. `target` is present only
/// when a target column was chosen.
#[derive(Debug)]
pub struct Conversion {
    pub features: String,
    pub target: Option<String>,
}

/// Run one full conversion: features table always, target array when
/// `target_col` is given.
///
/// When `feature_cols` is None the selection defaults to every dataset
/// column except the target. Fails atomically on any bad column name; no
/// partial output is returned.
pub fn convert(
    dataset: &Dataset,
    feature_cols: Option<&[String]>,
    target_col: Option<&str>,
) -> Result<Conversion> {
    let default_cols: Vec<String>;
    let selected: &[String] = match feature_cols {
        Some(cols) => cols,
        None => {
            default_cols = dataset
                .columns()
                .iter()
                .filter(|c| Some(c.as_str()) != target_col)
                .cloned()
                .collect();
            &default_cols
        }
    };
    debug!(features = ?selected, target = ?target_col, "serializing");

    let features = lua::serialize_table(dataset, selected).context("serializing features table")?;
    let target = match target_col {
        Some(col) => Some(lua::serialize_array(dataset, col).context("serializing target array")?),
        None => None,
    };

    Ok(Conversion { features, target })
}

/// Write `<basename>_X.lua` and, when present, `<basename>_y.lua`.
/// Returns the paths written. The literals in `conversion` are untouched by
/// any I/O failure here.
pub fn write_artifacts(conversion: &Conversion, basename: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(2);

    let x_path = PathBuf::from(format!("{}_X.lua", basename));
    fs::write(&x_path, &conversion.features)
        .with_context(|| format!("writing features table to {:?}", x_path))?;
    info!("features table written to {}", x_path.display());
    written.push(x_path);

    if let Some(target) = &conversion.target {
        let y_path = PathBuf::from(format!("{}_y.lua", basename));
        fs::write(&y_path, target)
            .with_context(|| format!("writing target array to {:?}", y_path))?;
        info!("target array written to {}", y_path.display());
        written.push(y_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use std::fs;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,csv2lua=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn sample() -> Dataset {
        Dataset::new(
            vec!["a".into(), "b".into(), "label".into()],
            vec![
                vec![Value::Int(1), Value::Float(0.5), Value::Text("yes".into())],
                vec![Value::Missing, Value::Float(1.5), Value::Text("no".into())],
            ],
        )
        .unwrap()
    }

    #[test]
    fn default_selection_excludes_the_target() -> Result<()> {
        let ds = sample();
        let out = convert(&ds, None, Some("label"))?;
        assert_eq!(
            out.features,
            "local data = {\n  {1, 0.5},\n  {nil, 1.5},\n}\n"
        );
        assert_eq!(
            out.target.as_deref(),
            Some("local data = {\"yes\", \"no\"}\n")
        );
        Ok(())
    }

    #[test]
    fn default_selection_without_target_takes_all_columns() -> Result<()> {
        let ds = sample();
        let out = convert(&ds, None, None)?;
        assert!(out.features.contains("{1, 0.5, \"yes\"},"));
        assert!(out.target.is_none());
        Ok(())
    }

    #[test]
    fn target_may_overlap_the_features_selection() -> Result<()> {
        let ds = sample();
        let cols = vec!["a".to_string(), "label".to_string()];
        let out = convert(&ds, Some(&cols), Some("label"))?;
        assert!(out.features.contains("\"yes\""));
        assert!(out.target.is_some());
        Ok(())
    }

    #[test]
    fn bad_feature_column_fails_whole_request() {
        let ds = sample();
        let cols = vec!["nope".to_string()];
        assert!(convert(&ds, Some(&cols), Some("label")).is_err());
    }

    #[test]
    fn bad_target_column_fails_whole_request() {
        let ds = sample();
        assert!(convert(&ds, None, Some("nope")).is_err());
    }

    #[test]
    fn artifacts_land_next_to_the_basename() -> Result<()> {
        init_test_logging();
        let ds = sample();
        let out = convert(&ds, None, Some("label"))?;

        let dir = tempfile::tempdir()?;
        let base = dir.path().join("fixture");
        let written = write_artifacts(&out, base.to_str().unwrap())?;

        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(&written[0])?, out.features);
        assert_eq!(
            fs::read_to_string(&written[1])?,
            out.target.clone().unwrap()
        );
        assert!(written[0].to_string_lossy().ends_with("fixture_X.lua"));
        assert!(written[1].to_string_lossy().ends_with("fixture_y.lua"));
        Ok(())
    }

    #[test]
    fn no_target_writes_only_the_features_file() -> Result<()> {
        let ds = sample();
        let out = convert(&ds, None, None)?;

        let dir = tempfile::tempdir()?;
        let base = dir.path().join("fixture");
        let written = write_artifacts(&out, base.to_str().unwrap())?;

        assert_eq!(written.len(), 1);
        assert!(!base.with_file_name("fixture_y.lua").exists());
        Ok(())
    }
}
