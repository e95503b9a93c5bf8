//! The two operations the directory issues against the backend.
//!
//! Field names follow the WordPress ACF group `camposComercio`; changing
//! them breaks compatibility with the deployed schema.

pub const GET_COMERCIOS_OPERATION: &str = "GetComercios";

pub const GET_COMERCIOS: &str = r"query GetComercios($first: Int!, $after: String) {
  comercios(first: $first, after: $after) {
    pageInfo {
      hasNextPage
      endCursor
    }
    edges {
      node {
        title
        slug
        camposComercio {
          categoria
          direccion
          telefono
          sitioWeb
          descripcionextendida
          imagenExtra { node { sourceUrl } }
          imagenExtra1 { node { sourceUrl } }
          imagenExtra2 { node { sourceUrl } }
          imagenExtra3 { node { sourceUrl } }
          imagenExtra4 { node { sourceUrl } }
        }
      }
    }
  }
}";

pub const GET_COMERCIO_OPERATION: &str = "GetComercio";

pub const GET_COMERCIO: &str = r"query GetComercio($slug: String!) {
  comercioBy(slug: $slug) {
    title
    camposComercio {
      descripcionextendida
      imagenExtra { node { sourceUrl } }
      imagenExtra1 { node { sourceUrl } }
      imagenExtra2 { node { sourceUrl } }
      imagenExtra3 { node { sourceUrl } }
      direccion
      telefono
      sitioWeb
      categoria
      lunes
      martes
      miercoles
      jueves
      viernes
      sabado
      domingo
    }
  }
}";

/// Cheapest valid query; used by the health check.
pub const PING: &str = "query Ping { __typename }";
