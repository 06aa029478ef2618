//! The role keyword lexicon.
//!
//! Keyword lists are dataset-specific tuning, not algorithm: the defaults
//! cover the reference itinerary's Thai headers plus common English
//! equivalents, and any list can be replaced wholesale from a JSON file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use trip_model::SemanticRole;

/// Keyword sets per role, matched in role precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleLexicon {
    pub date: Vec<String>,
    pub place: Vec<String>,
    pub details: Vec<String>,
    pub transport: Vec<String>,
    pub zone: Vec<String>,
    pub recommend: Vec<String>,
}

impl Default for RoleLexicon {
    fn default() -> Self {
        Self {
            date: keywords(&["วันที่", "วัน", "date", "day"]),
            place: keywords(&["สถานที่", "ที่เที่ยว", "place", "location", "ชื่อ", "name"]),
            details: keywords(&[
                "รายละเอียด",
                "กิจกรรม",
                "หมายเหตุ",
                "detail",
                "activity",
                "note",
            ]),
            transport: keywords(&["การเดินทาง", "เดินทาง", "รถ", "transport", "travel"]),
            zone: keywords(&["โซน", "ย่าน", "zone", "area", "district"]),
            recommend: keywords(&["แนะนำ", "ไฮไลท์", "recommend", "highlight", "must"]),
        }
    }
}

impl RoleLexicon {
    /// Load a lexicon from a JSON file. Roles absent from the file keep
    /// their default keyword lists.
    pub fn from_json_file(path: &Path) -> Result<Self, LexiconError> {
        let text = fs::read_to_string(path).map_err(|source| LexiconError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let lexicon: Self =
            serde_json::from_str(&text).map_err(|source| LexiconError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(lexicon)
    }

    /// Keyword list for one role.
    #[must_use]
    pub fn keywords_for(&self, role: SemanticRole) -> &[String] {
        match role {
            SemanticRole::Date => &self.date,
            SemanticRole::Place => &self.place,
            SemanticRole::Details => &self.details,
            SemanticRole::Transport => &self.transport,
            SemanticRole::Zone => &self.zone,
            SemanticRole::Recommend => &self.recommend,
        }
    }
}

/// Errors from loading a lexicon file.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("read lexicon {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("parse lexicon {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn keywords(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|keyword| (*keyword).to_string()).collect()
}
