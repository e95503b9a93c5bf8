//! Listing ("comercio") records as the rest of the workspace sees them.
//!
//! The backend schema is loose: almost every field may be null and
//! `categoria` is sometimes a string and sometimes an array. Ingestion in
//! `guia-graphql` collapses nulls to empty strings; the category keeps its
//! raw shape in [`Category`] and is folded on demand.

/// Category field of a listing, exactly as the backend returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Scalar(String),
    List(Vec<String>),
}

impl Category {
    /// The label used for filtering and filter options: the scalar value, or
    /// the head of a list. Empty labels count as absent.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        let label = match self {
            Category::Scalar(label) => label.as_str(),
            Category::List(labels) => labels.first()?.as_str(),
        };
        (!label.is_empty()).then_some(label)
    }

    /// The unfolded value for display; list entries are joined with `", "`.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Category::Scalar(label) => label.clone(),
            Category::List(labels) => labels.join(", "),
        }
    }
}

/// One business entry as delivered by a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    pub slug: String,
    pub title: String,
    pub category: Option<Category>,
    pub address: String,
    pub phone: String,
    pub website: String,
    /// HTML fragment authored in the CMS.
    pub extended_description: String,
    /// `imagenExtra`, `imagenExtra1` .. `imagenExtra4`, in that order.
    pub images: [Option<String>; 5],
}

impl Listing {
    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.category.as_ref().and_then(Category::primary)
    }

    /// Card thumbnail: the first image slot only.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images[0].as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Spanish label shown in the opening-hours table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Miércoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }
}

/// Free-text opening hours, one optional entry per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeeklySchedule {
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
}

impl WeeklySchedule {
    /// Schedule text for `day`; empty strings count as absent.
    #[must_use]
    pub fn get(&self, day: Weekday) -> Option<&str> {
        let value = match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        };
        value.as_deref().filter(|s| !s.is_empty())
    }
}

/// Full record returned by a lookup by slug.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingDetail {
    pub title: String,
    pub category: Option<Category>,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub extended_description: String,
    /// `imagenExtra` .. `imagenExtra3`; the detail query asks for four.
    pub images: [Option<String>; 4],
    pub schedule: WeeklySchedule,
}

impl ListingDetail {
    /// Non-empty image URLs in slot order. The first one is the hero image,
    /// the rest form the gallery.
    #[must_use]
    pub fn image_urls(&self) -> Vec<&str> {
        self.images
            .iter()
            .filter_map(|url| url.as_deref())
            .filter(|url| !url.is_empty())
            .collect()
    }
}

/// Pagination state of the listing connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub has_next_page: bool,
    /// Opaque backend token, passed back verbatim as `after`.
    pub end_cursor: Option<String>,
}

/// One batch of listings plus the pagination state that came with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub listings: Vec<Listing>,
    pub page_info: PageInfo,
}
