//! Wire types for the GraphQL responses.
//!
//! Every field is optional because WPGraphQL returns `null` for empty ACF
//! fields and for relations without a target. [`crate::ingest`] turns these
//! into the total types of `guia-core`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Reads a field as `T`, treating any value of another shape as absent.
///
/// ACF reports an unset field as `false` (and old posts carry numbers or
/// objects where a string is expected); one such field must not fail the
/// whole page.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
}

// ---------------------------------------------------------------------------
// GetComercios
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ComerciosData {
    pub comercios: Option<ComercioConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComercioConnection {
    pub page_info: Option<PageInfoNode>,
    pub edges: Option<Vec<Option<ComercioEdge>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoNode {
    pub has_next_page: Option<bool>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ComercioEdge {
    pub node: Option<ComercioNode>,
}

/// A `Comercio` post. `slug` is absent in the lookup-by-slug query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComercioNode {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub campos_comercio: Option<CamposComercio>,
}

/// The `camposComercio` ACF field group.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CamposComercio {
    #[serde(default, deserialize_with = "lenient")]
    pub categoria: Option<RawCategory>,
    #[serde(default, deserialize_with = "lenient")]
    pub direccion: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sitio_web: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub descripcionextendida: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub imagen_extra: Option<ImageConnection>,
    #[serde(default, deserialize_with = "lenient")]
    pub imagen_extra1: Option<ImageConnection>,
    #[serde(default, deserialize_with = "lenient")]
    pub imagen_extra2: Option<ImageConnection>,
    #[serde(default, deserialize_with = "lenient")]
    pub imagen_extra3: Option<ImageConnection>,
    #[serde(default, deserialize_with = "lenient")]
    pub imagen_extra4: Option<ImageConnection>,
    #[serde(default, deserialize_with = "lenient")]
    pub lunes: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub martes: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub miercoles: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub jueves: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub viernes: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sabado: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub domingo: Option<String>,
}

/// `categoria` is a select field that is sometimes configured as multi-select.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    One(String),
    Many(Vec<Option<String>>),
}

#[derive(Debug, Deserialize)]
pub struct ImageConnection {
    pub node: Option<MediaItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub source_url: Option<String>,
}

impl ImageConnection {
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.node.as_ref()?.source_url.as_deref()
    }
}

// ---------------------------------------------------------------------------
// GetComercio
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComercioData {
    pub comercio_by: Option<ComercioNode>,
}
