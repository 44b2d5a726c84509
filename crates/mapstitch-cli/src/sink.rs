//! Filesystem-backed scene sink.
//!
//! Stands in for a live scene host: the scene record and its attached
//! walls and lights are written out as one JSON document. The padding
//! offsets reported back are the ones a host showing the scene would
//! apply, so projected features line up when the file is imported.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use mapstitch::{
    LightPoint, SceneDimensions, SceneError, SceneRecord, SceneSink, WallSegment,
};

/// Writes the created scene as a JSON document on disk.
pub struct FileSceneSink {
    path: PathBuf,
    record: Option<SceneRecord>,
}

impl FileSceneSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path, record: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Serialize)]
struct SceneFile<'a> {
    #[serde(flatten)]
    record: &'a SceneRecord,
    walls: &'a [WallSegment],
    lights: &'a [LightPoint],
}

impl SceneSink for FileSceneSink {
    fn create_scene(&mut self, record: &SceneRecord) -> Result<SceneDimensions, SceneError> {
        let dimensions = SceneDimensions::from_padding(
            record.width(),
            record.height(),
            record.grid(),
            record.padding(),
        );
        self.record = Some(record.clone());
        Ok(dimensions)
    }

    fn attach(
        &mut self,
        walls: &[WallSegment],
        lights: &[LightPoint],
    ) -> Result<(), SceneError> {
        let Some(record) = self.record.as_ref() else {
            return Err(SceneError::new("attach called before create_scene"));
        };
        let scene = SceneFile {
            record,
            walls,
            lights,
        };
        let json = serde_json::to_string_pretty(&scene)
            .map_err(|err| SceneError::new(err.to_string()))?;
        fs::write(&self.path, json)?;
        info!(path = self.path.display().to_string(); "Scene file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use mapstitch::WallSense;
    use mapstitch::geometry::Point;

    use super::*;

    #[test]
    fn scene_file_contains_record_and_features() {
        let dir = tempdir().expect("Temp dir");
        let path = dir.path().join("keep.scene.json");
        let mut sink = FileSceneSink::new(path.clone());

        let record = SceneRecord::new("Keep", "keep.webp", 3200, 2100, 100.0, 0.25);
        let dimensions = sink.create_scene(&record).expect("Scene creation");
        assert_eq!(dimensions.offset_x(), 800.0);
        assert_eq!(dimensions.offset_y(), 600.0);

        let walls = vec![
            WallSegment::new(
                Point::new(800.0, 600.0),
                Point::new(900.0, 600.0),
                0,
                WallSense::Normal,
            )
            .expect("Finite wall"),
        ];
        let lights = vec![
            LightPoint::new(Point::new(1000.0, 1000.0), 8.0, 4.0, "#aabbcc", 0.05)
                .expect("Finite light"),
        ];
        sink.attach(&walls, &lights).expect("Attach");

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("Scene file exists"))
                .expect("Scene file is JSON");
        assert_eq!(written["name"], "Keep");
        assert_eq!(written["img"], "keep.webp");
        assert_eq!(written["grid"], 100.0);
        assert_eq!(written["shiftX"], 0.0);
        assert_eq!(written["walls"][0]["points"][2], 900.0);
        assert_eq!(written["lights"][0]["tintColor"], "#aabbcc");
    }

    #[test]
    fn attach_without_scene_is_rejected() {
        let dir = tempdir().expect("Temp dir");
        let mut sink = FileSceneSink::new(dir.path().join("orphan.scene.json"));
        let result = sink.attach(&[], &[]);
        assert!(result.is_err());
    }
}
