//! Tabbed customer-detail viewer.
//!
//! One [`CustomerDetailsViewer`] lives for one modal session. It fetches the
//! customer aggregate once and projects the four tab panels from it; switching
//! tabs never goes back to the backend. A failed fetch is only repeated when
//! staff explicitly retry.

use serde::Serialize;
use thiserror::Error;

use crate::backend::CustomerReader;
use crate::domain::customer::CustomerDetails;
use crate::domain::types::CustomerId;
use crate::dto::customer::{DetailTab, DetailView};

pub const NO_DATA: &str = "No data available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewerError {
    /// No customer was selected by the caller.
    #[error("No customer ID found")]
    MissingIdentifier,
    /// The backend read failed; recoverable through [`CustomerDetailsViewer::retry`].
    #[error("Failed to fetch customer details")]
    FetchFailure,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerState {
    Idle,
    Loading,
    Ready(CustomerDetails),
    Error(ViewerError),
}

/// What the modal body shows for the current state and tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewerContent {
    Loading,
    Error { message: String },
    Empty { placeholder: &'static str },
    View { view: DetailView },
}

pub struct CustomerDetailsViewer<'a, R: ?Sized> {
    repo: &'a R,
    customer_id: Option<CustomerId>,
    state: ViewerState,
    active_tab: DetailTab,
    image_fallback: String,
}

impl<'a, R> CustomerDetailsViewer<'a, R>
where
    R: CustomerReader + ?Sized,
{
    pub fn new(repo: &'a R, image_fallback: impl Into<String>) -> Self {
        Self {
            repo,
            customer_id: None,
            state: ViewerState::Idle,
            active_tab: DetailTab::default(),
            image_fallback: image_fallback.into(),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn active_tab(&self) -> DetailTab {
        self.active_tab
    }

    pub fn details(&self) -> Option<&CustomerDetails> {
        match &self.state {
            ViewerState::Ready(details) => Some(details),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ViewerError> {
        match self.state {
            ViewerState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Opens the viewer for `customer_id`.
    ///
    /// Fetches only when no aggregate is held yet; reopening a ready viewer
    /// keeps the aggregate it already has.
    pub async fn open(&mut self, customer_id: Option<CustomerId>) -> &ViewerState {
        if matches!(self.state, ViewerState::Ready(_)) {
            return &self.state;
        }
        self.customer_id = customer_id;
        self.fetch().await;
        &self.state
    }

    /// Re-runs the fetch after a failure. Does nothing in any other state.
    pub async fn retry(&mut self) -> &ViewerState {
        if matches!(self.state, ViewerState::Error(_)) {
            self.fetch().await;
        }
        &self.state
    }

    /// Switches the visible panel. Never touches the backend.
    pub fn select_tab(&mut self, tab: DetailTab) {
        self.active_tab = tab;
    }

    /// Runs one backend read. `Loading` only lasts for the await below; the
    /// browser shows its own spinner while the modal request is in flight.
    async fn fetch(&mut self) {
        let Some(customer_id) = self.customer_id else {
            log::warn!("Customer details requested without a customer id");
            self.state = ViewerState::Error(ViewerError::MissingIdentifier);
            return;
        };

        self.state = ViewerState::Loading;

        self.state = match self.repo.get_customer_details(customer_id).await {
            Ok(details) => ViewerState::Ready(details),
            Err(err) => {
                log::error!("Failed to fetch customer details for {customer_id}: {err}");
                ViewerState::Error(ViewerError::FetchFailure)
            }
        };
    }

    /// Derives the panel for the active tab from the current state.
    pub fn render(&self) -> ViewerContent {
        match &self.state {
            ViewerState::Idle => ViewerContent::Empty {
                placeholder: NO_DATA,
            },
            ViewerState::Loading => ViewerContent::Loading,
            ViewerState::Error(err) => ViewerContent::Error {
                message: err.to_string(),
            },
            ViewerState::Ready(details) => ViewerContent::View {
                view: DetailView::derive(self.active_tab, details, &self.image_fallback),
            },
        }
    }

    /// Derives all four panels so the browser can switch between them locally.
    pub fn render_all(&self) -> Vec<DetailView> {
        match &self.state {
            ViewerState::Ready(details) => DetailTab::ALL
                .into_iter()
                .map(|tab| DetailView::derive(tab, details, &self.image_fallback))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabLink {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Data required to render the customer modal body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerModalData {
    /// Raw identifier echoed back for the retry button.
    pub customer_id: Option<i64>,
    pub tabs: Vec<TabLink>,
    pub active_tab: DetailTab,
    /// Content of the active tab, or the loading/error/empty notice.
    pub content: ViewerContent,
    /// Every panel, empty unless the aggregate was loaded.
    pub panels: Vec<DetailView>,
}

/// Runs one viewer session for the modal request.
///
/// Errors are part of the returned data and rendered in place.
pub async fn load_customer_modal<R>(
    repo: &R,
    customer_id: Option<i64>,
    tab: Option<DetailTab>,
    image_fallback: &str,
) -> CustomerModalData
where
    R: CustomerReader + ?Sized,
{
    let mut viewer = CustomerDetailsViewer::new(repo, image_fallback);
    if let Some(tab) = tab {
        viewer.select_tab(tab);
    }

    let id = customer_id.and_then(|id| CustomerId::new(id).ok());
    viewer.open(id).await;

    let active_tab = viewer.active_tab();
    let tabs = DetailTab::ALL
        .into_iter()
        .map(|tab| TabLink {
            slug: tab.slug(),
            label: tab.label(),
            active: tab == active_tab,
        })
        .collect();

    CustomerModalData {
        customer_id,
        tabs,
        active_tab,
        content: viewer.render(),
        panels: viewer.render_all(),
    }
}
