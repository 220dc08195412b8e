//! Catalog controller - drives a [`CatalogView`] from one task
//!
//! Commands arrive over an mpsc channel, product requests run concurrently
//! in a `FuturesUnordered`, and every state change is published on a
//! `watch` channel. All mutation of the view happens inside [`run`].
//!
//! [`run`]: CatalogController::run

use std::sync::Arc;

use futures::FutureExt;
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use shared::{FilterEdit, PageAction, ProductPage};
use tokio::sync::{mpsc, watch};

use crate::ClientResult;
use crate::config::ClientConfig;
use crate::http::CatalogApi;
use crate::navigation::Navigator;
use crate::notify::Notifier;
use crate::view::{CatalogView, FetchTicket, ViewState};

type InFlight = FuturesUnordered<BoxFuture<'static, (FetchTicket, ClientResult<ProductPage>)>>;

/// Input to a running controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    /// The router moved to a new location
    LocationChanged,
    /// A filter control changed
    Edit(FilterEdit),
    /// A page control was used
    Page(PageAction),
    /// "Clear all filters"
    ClearAll,
    /// Re-request the current page (e.g. after a product was edited elsewhere)
    Refresh,
    /// Reload the category and brand lookup lists
    ReloadLookups,
}

pub struct CatalogController<N: Navigator> {
    view: CatalogView,
    api: Arc<dyn CatalogApi>,
    navigator: N,
    notifier: Arc<dyn Notifier>,
    state_tx: watch::Sender<ViewState>,
    lookup_limit: u32,
}

impl<N: Navigator> CatalogController<N> {
    pub fn new(
        config: &ClientConfig,
        api: Arc<dyn CatalogApi>,
        navigator: N,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, watch::Receiver<ViewState>) {
        let view = CatalogView::new(config.page_size);
        let (state_tx, state_rx) = watch::channel(view.view_state());
        let controller = Self {
            view,
            api,
            navigator,
            notifier,
            state_tx,
            lookup_limit: config.lookup_limit,
        };
        (controller, state_rx)
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Process commands until the sender side is dropped.
    ///
    /// Returns the navigator so the caller can inspect the final route.
    pub async fn run(mut self, mut commands: mpsc::Receiver<CatalogCommand>) -> N {
        let mut in_flight: InFlight = FuturesUnordered::new();

        self.view.sync_location(&mut self.navigator, &*self.notifier);
        self.dispatch(None, &mut in_flight);
        self.publish();
        self.reload_lookups().await;

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    let forced = self.handle(command).await;
                    self.dispatch(forced, &mut in_flight);
                    self.publish();
                }
                Some((ticket, result)) = in_flight.next(), if !in_flight.is_empty() => {
                    let outcome = self.view.complete(ticket, result, &*self.notifier);
                    tracing::trace!(?outcome, "product fetch completed");
                    self.publish();
                }
            }
        }

        tracing::debug!(pending = in_flight.len(), "catalog controller stopped");
        self.navigator
    }

    /// Apply one command; returns a ticket when a request must be issued
    /// regardless of whether the filters changed
    async fn handle(&mut self, command: CatalogCommand) -> Option<FetchTicket> {
        match command {
            CatalogCommand::LocationChanged => {
                self.view.sync_location(&mut self.navigator, &*self.notifier);
            }
            CatalogCommand::Edit(edit) => self.view.edit(edit),
            CatalogCommand::Page(action) => {
                if !self.view.change_page(action) {
                    tracing::debug!(?action, "page control disabled");
                }
            }
            CatalogCommand::ClearAll => self.view.clear_all(&mut self.navigator),
            CatalogCommand::Refresh => return Some(self.view.refresh()),
            CatalogCommand::ReloadLookups => self.reload_lookups().await,
        }
        None
    }

    fn dispatch(&mut self, forced: Option<FetchTicket>, in_flight: &mut InFlight) {
        let Some(ticket) = forced.or_else(|| self.view.begin_fetch()) else {
            return;
        };

        let api = Arc::clone(&self.api);
        in_flight.push(
            async move {
                let result = api.list_products(&ticket.query).await;
                (ticket, result)
            }
            .boxed(),
        );
    }

    async fn reload_lookups(&mut self) {
        let (categories, brands) = tokio::join!(
            self.api.list_categories(self.lookup_limit),
            self.api.list_brands(self.lookup_limit)
        );
        self.view.set_categories(categories);
        self.view.set_brands(brands);
        self.publish();
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.view.view_state());
    }
}
