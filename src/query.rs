// Query Controller: owns the browsing state and re-runs Filter -> Sort -> Paginate on every intent

use crate::catalog::Catalog;
use crate::config::{ConfigError, EngineConfig};
use crate::filter::{filter, FilterCriteria, PriceBand, RatingBand};
use crate::hotel::HotelRecord;
use crate::paginate::{self, paginate, PageState};
use crate::sort::{sort, SortKey};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Unknown price band: {0}")]
    UnknownPriceBand(String),

    #[error("Unknown rating band: {0}")]
    UnknownRatingBand(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Invalid page number: {0}")]
    InvalidPageNumber(String),

    #[error("Unknown query field: {0}")]
    UnknownField(String),
}

// User intents forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum QueryIntent {
    SearchText(String),
    PriceBand(PriceBand),
    RatingBand(RatingBand),
    Sort(SortKey),
    Page(usize),
}

/// Complete browsing state. There is no other hidden state in the controller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueryState {
    pub criteria: FilterCriteria,
    pub sort_key: SortKey,
    pub page: PageState,
}

impl QueryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort_key: SortKey::default(),
            page: PageState::first(page_size),
        }
    }

    /// The transition table.
    ///
    /// Any change to the criteria or sort key lands on page 1. A page request is taken
    /// only when it lies in `1..=total_pages`; otherwise the state comes back unchanged.
    pub fn transition(&self, intent: QueryIntent, total_pages: usize) -> QueryState {
        let first_page = PageState::first(self.page.page_size);

        match intent {
            QueryIntent::SearchText(search_text) => QueryState {
                criteria: self.criteria.with_search_text(search_text),
                page: first_page,
                ..self.clone()
            },
            QueryIntent::PriceBand(price_band) => QueryState {
                criteria: self.criteria.with_price_band(price_band),
                page: first_page,
                ..self.clone()
            },
            QueryIntent::RatingBand(rating_band) => QueryState {
                criteria: self.criteria.with_rating_band(rating_band),
                page: first_page,
                ..self.clone()
            },
            QueryIntent::Sort(sort_key) => QueryState {
                sort_key,
                page: first_page,
                ..self.clone()
            },
            QueryIntent::Page(n) if (1..=total_pages).contains(&n) => QueryState {
                page: self.page.with_page(n),
                ..self.clone()
            },
            QueryIntent::Page(_) => self.clone(),
        }
    }
}

/// Everything the presentation layer needs to render a listing page and its
/// pagination control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryView<'a> {
    pub records: Vec<&'a HotelRecord>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub page_size: usize,
    // Catalog entries rejected at load time
    pub quarantined: usize,
}

impl QueryView<'_> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages
    }

    pub fn showing_range(&self) -> Option<(usize, usize)> {
        let page = PageState::first(self.page_size).with_page(self.current_page);
        paginate::showing_range(page, self.records.len())
    }
}

pub struct QueryController {
    catalog: Arc<Catalog>,
    state: QueryState,
}

impl QueryController {
    pub fn new(catalog: Arc<Catalog>, config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog,
            state: QueryState::new(config.page_size),
        })
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // Apply one intent and return the freshly computed view
    pub fn dispatch(&mut self, intent: QueryIntent) -> QueryView<'_> {
        let total_pages = paginate::total_pages(
            filter(self.catalog.hotels(), &self.state.criteria).len(),
            self.state.page.page_size,
        );

        let next = self.state.transition(intent.clone(), total_pages);
        if next == self.state {
            if let QueryIntent::Page(n) = intent {
                tracing::debug!(
                    "Ignoring page request {} (current page {}, total pages {})",
                    n,
                    self.state.page.current_page,
                    total_pages
                );
            }
        } else {
            tracing::debug!("Applied intent {:?}", intent);
        }
        self.state = next;

        self.view()
    }

    pub fn set_search_text(&mut self, search_text: impl Into<String>) -> QueryView<'_> {
        self.dispatch(QueryIntent::SearchText(search_text.into()))
    }

    pub fn set_price_band(&mut self, price_band: PriceBand) -> QueryView<'_> {
        self.dispatch(QueryIntent::PriceBand(price_band))
    }

    pub fn set_rating_band(&mut self, rating_band: RatingBand) -> QueryView<'_> {
        self.dispatch(QueryIntent::RatingBand(rating_band))
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) -> QueryView<'_> {
        self.dispatch(QueryIntent::Sort(sort_key))
    }

    pub fn set_page(&mut self, page: usize) -> QueryView<'_> {
        self.dispatch(QueryIntent::Page(page))
    }

    pub fn next_page(&mut self) -> QueryView<'_> {
        let page = self.state.page.current_page + 1;
        self.set_page(page)
    }

    pub fn previous_page(&mut self) -> QueryView<'_> {
        let page = self.state.page.current_page.saturating_sub(1);
        self.set_page(page)
    }

    // Back to the session defaults
    pub fn reset(&mut self) -> QueryView<'_> {
        self.state = QueryState::new(self.state.page.page_size);
        self.view()
    }

    /// Parse a `(field, value)` pair as sent by a form control and apply it.
    ///
    /// Fields are `search`, `price`, `rating`, `sort` and `page`; values use the same
    /// tokens the bands and sort keys display as.
    pub fn apply_str(&mut self, field: &str, value: &str) -> Result<QueryView<'_>, QueryError> {
        let intent = match field {
            "search" => QueryIntent::SearchText(value.to_string()),
            "price" => QueryIntent::PriceBand(
                value
                    .parse()
                    .map_err(|_| QueryError::UnknownPriceBand(value.to_string()))?,
            ),
            "rating" => QueryIntent::RatingBand(
                value
                    .parse()
                    .map_err(|_| QueryError::UnknownRatingBand(value.to_string()))?,
            ),
            "sort" => QueryIntent::Sort(
                value
                    .parse()
                    .map_err(|_| QueryError::UnknownSortKey(value.to_string()))?,
            ),
            "page" => QueryIntent::Page(
                value
                    .trim()
                    .parse()
                    .map_err(|_| QueryError::InvalidPageNumber(value.to_string()))?,
            ),
            other => return Err(QueryError::UnknownField(other.to_string())),
        };
        Ok(self.dispatch(intent))
    }

    /// Runs the whole pipeline for the current state.
    pub fn view(&self) -> QueryView<'_> {
        let filtered = filter(self.catalog.hotels(), &self.state.criteria);
        let sorted = sort(&filtered, self.state.sort_key);
        let page = paginate(&sorted, self.state.page);

        QueryView {
            records: page.window.to_vec(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_matches: sorted.len(),
            page_size: self.state.page.page_size,
            quarantined: self.catalog.quarantined().len(),
        }
    }
}
