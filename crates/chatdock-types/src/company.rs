//! Company branding types.
//!
//! A session owns at most one company. It is created or updated through a
//! single multipart upsert and referenced by id when a bot is created.

use serde::{Deserialize, Deserializer, Serialize};

/// Default primary brand color offered by the setup form.
pub const DEFAULT_PRIMARY_COLOR: &str = "#4F46E5";
/// Default secondary brand color offered by the setup form.
pub const DEFAULT_SECONDARY_COLOR: &str = "#10B981";

/// A company as returned by `GET /company` and `POST /company`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(default, alias = "logo_url", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// The company reference embedded in bot payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
}

/// Form fields of `POST /company`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompanyUpsert {
    pub name: String,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub logo: Option<LogoUpload>,
}

/// An image file attached to the company upsert.
#[derive(Clone, PartialEq, Eq)]
pub struct LogoUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl LogoUpload {
    /// Wrap raw bytes, inferring the MIME type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }
}

// Logos can be large; keep them out of debug output.
impl std::fmt::Debug for LogoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Accept ids serialized either as JSON strings or numbers.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
