//! OCSF schema input model, loading, and downloading.
//!
//! The mapper consumes the export produced by `https://schema.ocsf.io/export/schema`.
//! That export has class inheritance and profile merging already applied, so
//! every class carries its complete attribute set.
//!
//! The model is read-only for the rest of the crate: nothing downstream of
//! [`load_schema`] mutates it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// A fully materialized OCSF schema export.
#[derive(Debug, Default, Deserialize)]
pub struct Schema {
    /// OCSF version string (e.g., `"1.7.0"`).
    #[serde(default)]
    pub version: String,

    /// Event classes keyed by name (e.g., `"authentication"`).
    #[serde(default)]
    pub classes: BTreeMap<String, EventClass>,

    /// Shared object definitions keyed by name (e.g., `"network_endpoint"`).
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectDef>,
}

/// An OCSF event class.
#[derive(Debug, Default, Deserialize)]
pub struct EventClass {
    /// Snake_case class name (e.g., `"authentication"`).
    pub name: String,

    /// Numeric class identifier (e.g., `3002`).
    #[serde(default)]
    pub uid: u32,

    /// Human-readable class name.
    #[serde(default)]
    pub caption: String,

    /// Category name (e.g., `"iam"`, `"findings"`).
    #[serde(default)]
    pub category: String,

    /// Attributes keyed by name.
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
}

/// A shared OCSF object type.
#[derive(Debug, Default, Deserialize)]
pub struct ObjectDef {
    /// Object name, possibly extension-prefixed (e.g., `"win/win_service"`).
    pub name: String,

    #[serde(default)]
    pub caption: String,

    /// Attributes keyed by name.
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
}

/// A single attribute of an event class or object.
#[derive(Debug, Default, Deserialize)]
pub struct Attribute {
    /// OCSF type tag (e.g., `"string_t"`, `"integer_t"`, `"object_t"`).
    #[serde(rename = "type", default)]
    pub type_name: String,

    #[serde(default)]
    pub caption: String,

    #[serde(default)]
    pub description: String,

    /// Requirement level: `"required"`, `"recommended"`, or `"optional"`.
    #[serde(default)]
    pub requirement: Option<String>,

    #[serde(default)]
    pub is_array: bool,

    /// Not produced by the OCSF export itself; extensions may set it.
    #[serde(default)]
    pub is_map: bool,

    /// For `object_t` attributes, the referenced object type name.
    #[serde(default)]
    pub object_type: Option<String>,

    /// Profile that contributed this attribute (e.g., `"cloud"`).
    #[serde(default)]
    pub profile: Option<String>,

    /// Enumeration entries keyed by their code. Integer keys (`"0"`, `"99"`)
    /// on numeric attributes; string keys (`"GET"`) on `string_t` attributes.
    #[serde(rename = "enum", default)]
    pub enum_values: BTreeMap<String, EnumEntry>,

    #[serde(rename = "@deprecated", default)]
    pub deprecated: Option<Deprecation>,
}

impl Attribute {
    pub fn is_required(&self) -> bool {
        self.requirement.as_deref() == Some("required")
    }
}

/// One entry of an attribute's enumeration.
#[derive(Debug, Default, Deserialize)]
pub struct EnumEntry {
    /// Display label (e.g., `"Logon"`).
    pub caption: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Deprecation metadata for an attribute.
#[derive(Debug, Default, Deserialize)]
pub struct Deprecation {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub since: String,
}

impl Schema {
    /// Look up an object definition, tolerating extension prefixes.
    ///
    /// Tries the name as given, then with the `ext/` prefix stripped, then
    /// scans for an object whose own prefix-stripped name matches.
    pub fn object(&self, name: &str) -> Option<&ObjectDef> {
        self.objects.get(name).or_else(|| {
            let bare = strip_extension_prefix(name);
            self.objects.get(bare).or_else(|| {
                self.objects
                    .values()
                    .find(|o| strip_extension_prefix(&o.name) == bare)
            })
        })
    }
}

/// `"win/win_service"` → `"win_service"`; names without a prefix pass through.
pub fn strip_extension_prefix(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Load a cached OCSF schema export from disk.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let schema: Schema = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        version = %schema.version,
        classes = schema.classes.len(),
        objects = schema.objects.len(),
        "loaded schema"
    );
    Ok(schema)
}

/// Download the OCSF schema export and save it to disk.
///
/// Fetches `{base_url}?version={version}` and checks the body parses as a
/// [`Schema`] before writing it.
#[cfg(feature = "download")]
pub async fn download_schema(version: &str, output_path: &Path, base_url: &str) -> Result<()> {
    let url = format!("{base_url}?version={version}");
    tracing::info!(%url, "downloading OCSF schema v{version}");

    let response = reqwest::get(&url)
        .await
        .map_err(|e| Error::Download(format!("GET {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "GET {url} returned {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Download(format!("reading response body: {e}")))?;

    let schema: Schema = serde_json::from_str(&body)
        .map_err(|e| Error::Schema(format!("downloaded schema is not valid OCSF JSON: {e}")))?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(output_path, &body).map_err(|e| Error::Write {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        version = %schema.version,
        classes = schema.classes.len(),
        objects = schema.objects.len(),
        path = %output_path.display(),
        "saved schema"
    );
    Ok(())
}
