//! Extension program project record and its JSON projections.

use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use validator::Validate;

use crate::errors::AppError;

/// URL prefix under which uploaded program documents are served.
pub const DOCUMENT_PREFIX: &str = "/static/pdfs/";

/// Lowest and highest Sustainable Development Goal numbers.
pub const SDG_MIN: u8 = 1;
pub const SDG_MAX: u8 = 17;

/// Status labels that count toward the dashboard completion buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Completed,
    InProgress,
}

impl ProjectStatus {
    /// Map a stored status label to a bucket. Labels outside the fixed set map to `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Completed" => Some(Self::Completed),
            "In Progress" => Some(Self::InProgress),
            _ => None,
        }
    }
}

/// Full project row. Serializes as the detail payload: unset fields become `""`.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Project {
    pub projectid: i32,
    #[serde(serialize_with = "empty_if_none")]
    pub title: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub projectlocation: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub leader: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub assistant: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub members: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub projectdate: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub duration: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub projectstatus: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub link: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub x: Option<f64>,
    #[serde(serialize_with = "empty_if_none")]
    pub y: Option<f64>,
    #[serde(serialize_with = "empty_if_none")]
    pub sdg: Option<String>,
    #[serde(serialize_with = "empty_if_none")]
    pub collegecampus: Option<String>,
}

fn empty_if_none<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

impl Project {
    /// Rewrite the SDG field as trimmed, comma-joined tokens with empties dropped.
    pub fn with_normalized_sdg(mut self) -> Self {
        self.sdg = self.sdg.as_deref().map(normalize_sdg);
        self
    }
}

/// Trim each comma-separated SDG token and drop empty ones.
pub fn normalize_sdg(field: &str) -> String {
    field
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse one SDG token. Returns `None` for non-numeric or out-of-range tokens.
pub fn parse_sdg_token(token: &str) -> Option<u8> {
    token
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (SDG_MIN..=SDG_MAX).contains(n))
}

/// List view row (`main-campus`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectSummary {
    pub projectid: i32,
    pub title: Option<String>,
    pub leader: Option<String>,
}

/// Map marker payload: every value stringified, coordinates renamed to `lng`/`lat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapProject {
    pub projectid: String,
    pub title: String,
    pub projectlocation: String,
    pub leader: String,
    pub assistant: String,
    pub members: String,
    pub projectdate: String,
    pub duration: String,
    pub projectstatus: String,
    pub link: String,
    pub sdg: String,
    pub collegecampus: String,
    pub lng: String,
    pub lat: String,
}

impl MapProject {
    /// Build the map projection. Projects without both coordinates are not mappable.
    pub fn from_project(project: Project) -> Option<Self> {
        let (x, y) = (project.x?, project.y?);
        let text = |v: Option<String>| v.unwrap_or_default();
        let link = match project.link {
            Some(link) if !link.is_empty() => format!("{DOCUMENT_PREFIX}{link}"),
            _ => String::new(),
        };

        Some(Self {
            projectid: project.projectid.to_string(),
            title: text(project.title),
            projectlocation: text(project.projectlocation),
            leader: text(project.leader),
            assistant: text(project.assistant),
            members: text(project.members),
            projectdate: text(project.projectdate),
            duration: text(project.duration),
            projectstatus: text(project.projectstatus),
            link,
            sdg: text(project.sdg),
            collegecampus: text(project.collegecampus),
            lng: format!("{x:?}"),
            lat: format!("{y:?}"),
        })
    }
}

/// Add/edit program form. SDGs arrive as repeated `sdg[]` fields.
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct ProgramForm {
    pub title: Option<String>,
    pub projectlocation: Option<String>,
    pub leader: Option<String>,
    pub assistant: Option<String>,
    pub members: Option<String>,
    pub projectdate: Option<String>,
    pub duration: Option<String>,
    pub projectstatus: Option<String>,
    pub link: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    #[serde(rename = "sdg[]", default)]
    #[validate(length(min = 1, message = "No SDG values provided."))]
    pub sdg: Vec<String>,
    pub collegecampus: Option<String>,
}

/// Typed project fields for insert and partial update. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectInput {
    pub title: Option<String>,
    pub projectlocation: Option<String>,
    pub leader: Option<String>,
    pub assistant: Option<String>,
    pub members: Option<String>,
    pub projectdate: Option<String>,
    pub duration: Option<String>,
    pub projectstatus: Option<String>,
    pub link: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub sdg: Option<String>,
    pub collegecampus: Option<String>,
}

impl TryFrom<ProgramForm> for ProjectInput {
    type Error = AppError;

    fn try_from(form: ProgramForm) -> Result<Self, Self::Error> {
        let sdg = if form.sdg.is_empty() {
            None
        } else {
            Some(form.sdg.join(","))
        };

        Ok(Self {
            x: parse_coordinate("x", form.x.as_deref())?,
            y: parse_coordinate("y", form.y.as_deref())?,
            title: form.title,
            projectlocation: form.projectlocation,
            leader: form.leader,
            assistant: form.assistant,
            members: form.members,
            projectdate: form.projectdate,
            duration: form.duration,
            projectstatus: form.projectstatus,
            link: form.link,
            sdg,
            collegecampus: form.collegecampus,
        })
    }
}

/// Blank coordinates are treated as not supplied.
fn parse_coordinate(name: &str, raw: Option<&str>) -> Result<Option<f64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid coordinate {name}: '{v}'"))),
    }
}
