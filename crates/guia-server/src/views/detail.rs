use askama::Template;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guia_core::{Category, ListingDetail, Weekday};

use super::{ErrorTemplate, HtmlPage, Layout};

pub const NOT_FOUND_MESSAGE: &str = "No se encontró este comercio.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub day: &'static str,
    pub hours: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone)]
pub struct DetailPage {
    pub title: String,
    pub hero: Option<String>,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub schedule: Vec<ScheduleRow>,
    /// Backend HTML, rendered unescaped.
    pub description_html: String,
    pub gallery: Vec<GalleryImage>,
}

impl DetailPage {
    pub fn from_detail(detail: &ListingDetail) -> Self {
        let images = detail.image_urls();
        let gallery = images
            .iter()
            .skip(1)
            .enumerate()
            .map(|(i, url)| GalleryImage {
                url: (*url).to_owned(),
                alt: format!("{} imagen {}", detail.title, i + 2),
            })
            .collect();

        let schedule = Weekday::ALL
            .into_iter()
            .map(|day| ScheduleRow {
                day: day.label(),
                hours: detail.schedule.get(day).unwrap_or("Cerrado").to_owned(),
            })
            .collect();

        Self {
            title: detail.title.clone(),
            hero: images.first().map(|url| (*url).to_owned()),
            category: detail
                .category
                .as_ref()
                .map(Category::display)
                .unwrap_or_default(),
            address: detail.address.clone(),
            phone: detail.phone.clone(),
            website: detail.website.clone(),
            schedule,
            description_html: detail.extended_description.clone(),
            gallery,
        }
    }
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub layout: Layout,
    pub back_href: String,
    pub detail: DetailPage,
}

pub fn found(detail: &ListingDetail, back_href: String) -> Response {
    let page = DetailPage::from_detail(detail);
    HtmlPage(
        StatusCode::OK,
        DetailTemplate {
            layout: Layout::new(page.title.clone()),
            back_href,
            detail: page,
        },
    )
    .into_response()
}

pub fn not_found(back_href: String) -> Response {
    HtmlPage(
        StatusCode::NOT_FOUND,
        ErrorTemplate {
            layout: Layout::new("Comercio no encontrado"),
            message: NOT_FOUND_MESSAGE.to_owned(),
            back_href: Some(back_href),
        },
    )
    .into_response()
}

pub fn upstream_error(message: &str, back_href: String) -> Response {
    HtmlPage(
        StatusCode::BAD_GATEWAY,
        ErrorTemplate {
            layout: Layout::new("Error"),
            message: format!("Error al cargar el comercio: {message}"),
            back_href: Some(back_href),
        },
    )
    .into_response()
}
