use askama::Template;
use axum::{http::StatusCode, response::IntoResponse, response::Response};
use guia_core::{
    category_label, extract_categories, filter_listings, Category, FilterState, Listing,
    ListingPhase, PaginationSnapshot,
};

use super::{ErrorTemplate, HtmlPage, Layout};
use crate::form::encode_component;

const TITLE: &str = "Guía de Comercios";

/// One checkbox of the category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Raw label, submitted as `cat`.
    pub value: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub href: String,
    pub title: String,
    pub address: String,
    pub phone: String,
    pub category: String,
    pub website: String,
    pub image: Option<String>,
}

impl Card {
    fn from_listing(listing: &Listing) -> Self {
        Self {
            href: format!("/comercio/{}", encode_component(&listing.slug)),
            title: listing.title.clone(),
            address: listing.address.clone(),
            phone: listing.phone.clone(),
            category: listing
                .category
                .as_ref()
                .map(Category::display)
                .unwrap_or_default(),
            website: listing.website.clone(),
            image: listing.thumbnail().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListingPage {
    pub search_term: String,
    pub categories: Vec<CategoryOption>,
    pub cards: Vec<Card>,
    pub show_load_more: bool,
    pub load_more_pending: bool,
    pub load_more_error: Option<String>,
    pub show_no_results: bool,
    /// Selected labels echoed as hidden fields of the "load more" form.
    pub selected: Vec<String>,
}

/// What `/` shows for one session and filter.
#[derive(Debug, Clone)]
pub enum ListingView {
    Loading,
    Error(String),
    Ready(ListingPage),
}

impl ListingView {
    pub fn build(snapshot: &PaginationSnapshot, filter: &FilterState) -> Self {
        match &snapshot.phase {
            ListingPhase::Loading => Self::Loading,
            ListingPhase::Failed(message) => Self::Error(message.clone()),
            ListingPhase::Ready => {
                let categories = extract_categories(&snapshot.listings)
                    .into_iter()
                    .map(|value| CategoryOption {
                        label: category_label(&value).to_owned(),
                        checked: filter.is_selected(&value),
                        value,
                    })
                    .collect();

                let cards: Vec<Card> = filter_listings(filter, &snapshot.listings)
                    .into_iter()
                    .map(Card::from_listing)
                    .collect();

                Self::Ready(ListingPage {
                    search_term: filter.search_term.clone(),
                    categories,
                    show_no_results: cards.is_empty(),
                    cards,
                    show_load_more: snapshot.can_load_more(),
                    load_more_pending: snapshot.fetching_more,
                    load_more_error: snapshot.load_more_error.clone(),
                    selected: filter.selected_categories.clone(),
                })
            }
        }
    }

    /// Renders the view; `current_href` is where the loading page refreshes to.
    pub fn respond(self, current_href: String) -> Response {
        match self {
            Self::Loading => HtmlPage(
                StatusCode::OK,
                LoadingTemplate {
                    layout: Layout::new(TITLE),
                    refresh_href: current_href,
                },
            )
            .into_response(),
            Self::Error(message) => HtmlPage(
                StatusCode::BAD_GATEWAY,
                ErrorTemplate {
                    layout: Layout::new(TITLE),
                    message: format!("Error: {message}"),
                    back_href: None,
                },
            )
            .into_response(),
            Self::Ready(page) => HtmlPage(
                StatusCode::OK,
                ListingTemplate {
                    layout: Layout::new(TITLE),
                    page,
                },
            )
            .into_response(),
        }
    }
}

#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    pub layout: Layout,
    pub page: ListingPage,
}

#[derive(Template)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub layout: Layout,
    pub refresh_href: String,
}
