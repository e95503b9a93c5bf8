//! Conversion of wire types into `guia-core` domain types.
//!
//! Missing strings become empty strings and missing images become `None`,
//! so views never have to deal with a partially-null record.

use guia_core::{Category, Listing, ListingDetail, Page, PageInfo, WeeklySchedule};

use crate::types::{CamposComercio, ComercioConnection, ComercioNode, ImageConnection, RawCategory};

/// Converts one `comercios` connection into a [`Page`].
///
/// Null edges are dropped. A node without a slug cannot be linked to its
/// detail page, so it is dropped too (with a warning).
#[must_use]
pub fn ingest_page(connection: ComercioConnection) -> Page {
    let page_info = connection
        .page_info
        .map(|info| PageInfo {
            has_next_page: info.has_next_page.unwrap_or(false),
            end_cursor: info.end_cursor,
        })
        .unwrap_or_default();

    let listings = connection
        .edges
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(|edge| edge.node)
        .filter_map(ingest_listing)
        .collect();

    Page {
        listings,
        page_info,
    }
}

fn ingest_listing(node: ComercioNode) -> Option<Listing> {
    let slug = node.slug.filter(|s| !s.is_empty());
    let Some(slug) = slug else {
        tracing::warn!(title = ?node.title, "skipping comercio without slug");
        return None;
    };

    let fields = node.campos_comercio.unwrap_or_default();
    Some(Listing {
        slug,
        title: node.title.unwrap_or_default(),
        category: fields.categoria.map(ingest_category),
        address: fields.direccion.unwrap_or_default(),
        phone: fields.telefono.unwrap_or_default(),
        website: fields.sitio_web.unwrap_or_default(),
        extended_description: fields.descripcionextendida.unwrap_or_default(),
        images: [
            image_url(fields.imagen_extra.as_ref()),
            image_url(fields.imagen_extra1.as_ref()),
            image_url(fields.imagen_extra2.as_ref()),
            image_url(fields.imagen_extra3.as_ref()),
            image_url(fields.imagen_extra4.as_ref()),
        ],
    })
}

/// Converts a `comercioBy` node into a [`ListingDetail`].
#[must_use]
pub fn ingest_detail(node: ComercioNode) -> ListingDetail {
    let CamposComercio {
        categoria,
        direccion,
        telefono,
        sitio_web,
        descripcionextendida,
        imagen_extra,
        imagen_extra1,
        imagen_extra2,
        imagen_extra3,
        imagen_extra4: _,
        lunes,
        martes,
        miercoles,
        jueves,
        viernes,
        sabado,
        domingo,
    } = node.campos_comercio.unwrap_or_default();

    ListingDetail {
        title: node.title.unwrap_or_default(),
        category: categoria.map(ingest_category),
        address: direccion.unwrap_or_default(),
        phone: telefono.unwrap_or_default(),
        website: sitio_web.unwrap_or_default(),
        extended_description: descripcionextendida.unwrap_or_default(),
        images: [
            image_url(imagen_extra.as_ref()),
            image_url(imagen_extra1.as_ref()),
            image_url(imagen_extra2.as_ref()),
            image_url(imagen_extra3.as_ref()),
        ],
        schedule: WeeklySchedule {
            monday: lunes,
            tuesday: martes,
            wednesday: miercoles,
            thursday: jueves,
            friday: viernes,
            saturday: sabado,
            sunday: domingo,
        },
    }
}

fn ingest_category(raw: RawCategory) -> Category {
    match raw {
        RawCategory::One(label) => Category::Scalar(label),
        RawCategory::Many(labels) => {
            Category::List(labels.into_iter().map(Option::unwrap_or_default).collect())
        }
    }
}

fn image_url(image: Option<&ImageConnection>) -> Option<String> {
    image
        .and_then(ImageConnection::source_url)
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
}
