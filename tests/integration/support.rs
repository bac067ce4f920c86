use std::path::Path;

use syllabus::config::SyllabusConfig;
use syllabus::tooling::cli::CliContext;
use tempfile::TempDir;

pub const DOCUMENT: &str = r#"[
  {
    "id": 1,
    "name": "Physics",
    "topics": [
      {
        "id": 2,
        "name": "Mechanics",
        "subtopics": [
          { "id": 3, "name": "Kinematics" },
          { "id": 4, "name": "Dynamics" }
        ]
      },
      {
        "id": 5,
        "name": "Waves",
        "items": [
          {
            "id": 6,
            "name": "Sound",
            "children": [{ "id": 7, "name": "Doppler effect" }]
          }
        ]
      }
    ],
    "resources": [{ "label": "Lecture notes", "url": "https://example.org/physics" }]
  },
  {
    "id": 8,
    "name": "Chemistry",
    "topics": [{ "id": 1, "name": "Stoichiometry" }]
  }
]"#;

/// Config whose document and stores live under `dir`.
pub fn test_config(dir: &Path) -> SyllabusConfig {
    let document = dir.join("subjects.json");
    std::fs::write(&document, DOCUMENT).unwrap();
    let mut config = SyllabusConfig::default();
    config.document.path = Some(document);
    config.storage.data_dir = Some(dir.join("data"));
    config
}

pub fn context(temp: &TempDir) -> CliContext {
    CliContext::new(test_config(temp.path())).unwrap()
}
