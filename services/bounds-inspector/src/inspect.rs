//! Turning axis files into a dataset schema.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axis_writer::{AxisWriter, DatasetSchema, WriterConfig};
use tracing::info;

use crate::input::AxisFile;

/// Writer built from a YAML config file, or from `AXIS_*` variables when no
/// file is given.
pub fn load_writer(config: Option<&Path>) -> Result<AxisWriter> {
    let config = match config {
        Some(path) => WriterConfig::from_file(path)
            .with_context(|| format!("Failed to load writer config {}", path.display()))?,
        None => WriterConfig::from_env(),
    };
    let writer = AxisWriter::validated(config).context("Invalid writer configuration")?;
    info!(
        auto_bounds = %writer.config().auto_bounds,
        classic_format = writer.config().classic_format,
        "Loaded writer configuration"
    );
    Ok(writer)
}

/// Describe every axis file. In strict mode an axis that cannot produce
/// bounds is an error; otherwise it is kept without bounds.
pub fn inspect(writer: &AxisWriter, axes: &[PathBuf], strict: bool) -> Result<DatasetSchema> {
    let mut records = Vec::with_capacity(axes.len());
    for path in axes {
        let file = AxisFile::load(path)?;
        let metadata = file.metadata();
        let values = file.values().with_context(|| format!("In {}", path.display()))?;

        let record = if strict {
            writer
                .try_describe_values(&metadata, &values)
                .with_context(|| format!("In {}", path.display()))?
        } else {
            writer.describe_values(&metadata, &values)
        };

        info!(
            axis = %record.name,
            identity = %record.identity,
            len = record.values.len(),
            bounds = record.has_bounds(),
            "Described axis"
        );
        records.push(record);
    }

    writer.schema(records).context("Failed to assemble dataset schema")
}

/// Write the schema to `output`, or as JSON to `stdout` when no path is given.
pub fn emit(
    schema: &DatasetSchema,
    output: Option<&Path>,
    pretty: bool,
    stdout: &mut impl Write,
) -> Result<()> {
    match output {
        Some(path) => {
            schema
                .write_json(path)
                .with_context(|| format!("Failed to write schema to {}", path.display()))?;
            info!(path = %path.display(), "Wrote schema");
        }
        None => {
            if pretty {
                serde_json::to_writer_pretty(&mut *stdout, schema)?;
            } else {
                serde_json::to_writer(&mut *stdout, schema)?;
            }
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axis_bounds::InvalidAxisError;
    use axis_writer::WriterError;
    use test_utils::ScratchDir;

    const LAT: &str = "name: lat\nunits: degrees_north\nvalues: [-45, 0, 45]\n";
    const BROKEN_LON: &str = "name: lon\nunits: degrees_east\nvalues: [0, 10, 10, 20]\n";

    fn writer(scratch: &ScratchDir, yaml: &str) -> AxisWriter {
        let path = scratch.write("writer.yaml", yaml);
        load_writer(Some(&path)).unwrap()
    }

    #[test]
    fn test_default_mode_keeps_invalid_axis_without_bounds() {
        let scratch = ScratchDir::new();
        let writer = writer(&scratch, "auto_bounds: grid\n");
        let axes = vec![scratch.write("lat.yaml", LAT), scratch.write("lon.yaml", BROKEN_LON)];

        let schema = inspect(&writer, &axes, false).unwrap();
        assert!(schema.axis("lat").unwrap().has_bounds());
        let lon = schema.axis("lon").unwrap();
        assert!(!lon.has_bounds());
        assert_eq!(lon.values, vec![0.0, 10.0, 10.0, 20.0]);
    }

    #[test]
    fn test_strict_mode_fails_on_invalid_axis() {
        let scratch = ScratchDir::new();
        let writer = writer(&scratch, "auto_bounds: grid\n");
        let axes = vec![scratch.write("lat.yaml", LAT), scratch.write("lon.yaml", BROKEN_LON)];

        let err = inspect(&writer, &axes, true).unwrap_err();
        assert!(err.to_string().contains("lon.yaml"));
        let writer_error = err.downcast_ref::<WriterError>().unwrap();
        assert_eq!(
            writer_error.axis_error(),
            Some(&InvalidAxisError::NonMonotonic { index: 2 })
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let scratch = ScratchDir::new();
        let path = scratch.write("writer.yaml", "deflate_level: 12\n");
        let err = load_writer(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to load writer config"));

        let path = scratch.write("broken.yaml", "auto_bounds: [on\n");
        assert!(load_writer(Some(&path)).is_err());
        assert!(load_writer(Some(&scratch.file("missing.yaml"))).is_err());
    }

    #[test]
    fn test_output_file_is_readable_schema() {
        let scratch = ScratchDir::new();
        let writer = writer(&scratch, "auto_bounds: on\n");
        let axes = vec![scratch.write(
            "y.yaml",
            "name: y\nunits: m\narange: { start: 5837500, stop: -5350000, step: -24944 }\n",
        )];
        let schema = inspect(&writer, &axes, true).unwrap();

        let path = scratch.file("schema.json");
        let mut stdout = Vec::new();
        emit(&schema, Some(&path), false, &mut stdout).unwrap();
        assert!(stdout.is_empty());

        let restored = DatasetSchema::read_json(&path).unwrap();
        assert_eq!(restored, schema);
        let bounds = restored.axis("y").unwrap().bounds.as_ref().unwrap();
        assert_eq!(bounds.shape, (449, 2));
        assert_eq!(bounds.cell(0), Some([5849972.0, 5825028.0]));
    }

    #[test]
    fn test_stdout_output() {
        let scratch = ScratchDir::new();
        let writer = writer(&scratch, "{}\n");
        let schema = inspect(&writer, &[scratch.write("lat.yaml", LAT)], false).unwrap();

        let mut stdout = Vec::new();
        emit(&schema, None, false, &mut stdout).unwrap();
        let text = String::from_utf8(stdout).unwrap();
        assert!(text.ends_with('\n'));
        let restored: DatasetSchema = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(restored, schema);
    }

    #[test]
    fn test_duplicate_axes_fail() {
        let scratch = ScratchDir::new();
        let writer = writer(&scratch, "{}\n");
        let lat = scratch.write("lat.yaml", LAT);
        let err = inspect(&writer, &[lat.clone(), lat], false).unwrap_err();
        assert!(err.to_string().contains("Failed to assemble dataset schema"));
    }

    #[test]
    fn test_unreadable_axis_file_fails() {
        let scratch = ScratchDir::new();
        let writer = writer(&scratch, "{}\n");
        let err = inspect(&writer, &[scratch.file("nope.yaml")], false).unwrap_err();
        assert!(err.to_string().contains("Failed to read axis file"));
    }
}
