use std::num::NonZeroUsize;

use market_types::ports::market_api::{AdvertisementApi, OrderApi};

use crate::application::advertisement_service::AdvertisementService;
use crate::application::order_service::OrderService;
use crate::application::views::{
    AdvertisementEvent, AdvertisementView, AdvertisementsEvent, AdvertisementsView, OrdersEvent,
    OrdersView,
};
use crate::errors::AppError;
use crate::inbound::router::Route;
use crate::inbound::terminal::command::Command;
use crate::inbound::terminal::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Screen to show after the command.
    Continue(String),
    Quit,
}

/// One user's navigation state. Entering a route starts its screen from
/// scratch and loads its data; every other command is a view event.
pub struct Session<A>
where
    A: AdvertisementApi + OrderApi + Clone,
{
    advertisement_service: AdvertisementService<A>,
    order_service: OrderService<A>,
    page_size: NonZeroUsize,
    route: Route,
    advertisements: AdvertisementsView,
    advertisement: Option<AdvertisementView>,
    orders: OrdersView,
}

impl<A> Session<A>
where
    A: AdvertisementApi + OrderApi + Clone,
{
    pub fn new(api: A, page_size: NonZeroUsize) -> Self {
        Self {
            advertisement_service: AdvertisementService::new(api.clone()),
            order_service: OrderService::new(api),
            page_size,
            route: Route::Advertisements,
            advertisements: AdvertisementsView::new(page_size),
            advertisement: None,
            orders: OrdersView::new(page_size),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn advertisements(&self) -> &AdvertisementsView {
        &self.advertisements
    }

    pub fn advertisement(&self) -> Option<&AdvertisementView> {
        self.advertisement.as_ref()
    }

    pub fn orders(&self) -> &OrdersView {
        &self.orders
    }

    pub async fn open(&mut self, path: &str) {
        self.route = Route::resolve(path);
        tracing::info!(route = %self.route, "route opened");
        match self.route.clone() {
            Route::Advertisements => {
                self.advertisements = AdvertisementsView::new(self.page_size);
            }
            Route::Advertisement(id) => {
                self.advertisement = Some(AdvertisementView::new(id));
            }
            Route::Orders => {
                self.orders = OrdersView::new(self.page_size);
            }
            Route::NotFound(_) => return,
        }
        self.reload().await;
    }

    async fn reload(&mut self) {
        match &self.route {
            Route::Advertisements => {
                self.on_advertisements(AdvertisementsEvent::FetchStarted);
                let event = self.advertisement_service.fetch_all().await;
                self.on_advertisements(event);
            }
            Route::Advertisement(id) => {
                let id = id.clone();
                self.on_advertisement(AdvertisementEvent::FetchStarted);
                let event = self.advertisement_service.fetch_one(&id).await;
                self.on_advertisement(event);
            }
            Route::Orders => {
                self.on_orders(OrdersEvent::FetchStarted);
                let event = self.order_service.fetch_orders().await;
                self.on_orders(event);
            }
            Route::NotFound(_) => {}
        }
    }

    fn on_advertisements(&mut self, event: AdvertisementsEvent) {
        let view = std::mem::take(&mut self.advertisements);
        self.advertisements = view.apply(event);
    }

    fn on_orders(&mut self, event: OrdersEvent) {
        let view = std::mem::take(&mut self.orders);
        self.orders = view.apply(event);
    }

    fn on_advertisement(&mut self, event: AdvertisementEvent) {
        if let Some(view) = self.advertisement.take() {
            self.advertisement = Some(view.apply(event));
        }
    }

    /// Parses and runs one input line. Bad or misplaced commands are reported
    /// above the unchanged screen.
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        if line.trim().is_empty() {
            return Outcome::Continue(self.render());
        }
        let result = match Command::parse_line(line) {
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(input = line.trim(), error = %e, "command rejected");
                Outcome::Continue(format!("! {e}\n{}", self.render()))
            }
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<Outcome, AppError> {
        tracing::debug!(command = command.name(), route = %self.route, "executing command");
        match command {
            Command::Open { path } => self.open(&path).await,
            Command::Reload => self.reload().await,
            Command::Help => return Ok(Outcome::Continue(render::help())),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Search { term } => {
                self.require_advertisements("search")?;
                self.on_advertisements(AdvertisementsEvent::SearchChanged(term));
            }
            Command::PerPage { size } => match self.route {
                Route::Advertisements => {
                    self.on_advertisements(AdvertisementsEvent::PageSizeChanged(size))
                }
                Route::Orders => self.on_orders(OrdersEvent::PageSizeChanged(size)),
                _ => return Err(self.unavailable("per-page")),
            },
            Command::Page { number } => match self.route {
                Route::Advertisements => {
                    self.on_advertisements(AdvertisementsEvent::PageRequested(number))
                }
                Route::Orders => self.on_orders(OrdersEvent::PageRequested(number)),
                _ => return Err(self.unavailable("page")),
            },
            Command::Filter { status } => {
                self.require_orders("filter")?;
                self.on_orders(OrdersEvent::StatusFilterChanged(status));
            }
            Command::Sort { key } => {
                self.require_orders("sort")?;
                self.on_orders(OrdersEvent::SortChanged(key));
            }
            Command::Items { order_id } => {
                self.require_orders("items")?;
                self.on_orders(OrdersEvent::ItemsShown(order_id));
            }
            Command::Close | Command::Cancel => self.close_dialog()?,
            Command::New => {
                self.require_advertisements("new")?;
                self.on_advertisements(AdvertisementsEvent::CreateOpened);
            }
            Command::Edit => match self.route {
                Route::Advertisement(_) => self.on_advertisement(AdvertisementEvent::EditOpened),
                _ => return Err(self.unavailable("edit")),
            },
            Command::Set { field, value } => {
                if self.advertisements.create_form().is_some()
                    && self.route == Route::Advertisements
                {
                    self.on_advertisements(AdvertisementsEvent::CreateFieldEdited(field, value));
                } else if self.open_edit_form() {
                    self.on_advertisement(AdvertisementEvent::EditFieldEdited(field, value));
                } else {
                    return Err(AppError::NoOpenForm);
                }
            }
            Command::Submit => self.submit().await?,
        }
        Ok(Outcome::Continue(self.render()))
    }

    async fn submit(&mut self) -> Result<(), AppError> {
        if self.route == Route::Advertisements {
            if let Some(form) = self.advertisements.create_form() {
                let payload = form.to_new_advertisement();
                for event in self.advertisement_service.create(payload).await {
                    self.on_advertisements(event);
                }
                return Ok(());
            }
        }
        if self.open_edit_form() {
            let edit = self
                .advertisement
                .as_ref()
                .and_then(|view| Some((view.id().to_string(), view.edit_form()?.to_patch())));
            if let Some((id, patch)) = edit {
                self.on_advertisement(AdvertisementEvent::FetchStarted);
                let event = self.advertisement_service.save(&id, patch).await;
                self.on_advertisement(event);
                return Ok(());
            }
        }
        Err(AppError::NoOpenForm)
    }

    fn close_dialog(&mut self) -> Result<(), AppError> {
        match self.route {
            Route::Advertisements if self.advertisements.create_form().is_some() => {
                self.on_advertisements(AdvertisementsEvent::CreateClosed);
            }
            Route::Orders if self.orders.items_dialog().is_some() => {
                self.on_orders(OrdersEvent::ItemsClosed);
            }
            Route::Advertisement(_) if self.open_edit_form() => {
                self.on_advertisement(AdvertisementEvent::EditClosed);
            }
            _ => return Err(AppError::NoOpenForm),
        }
        Ok(())
    }

    fn open_edit_form(&self) -> bool {
        matches!(self.route, Route::Advertisement(_))
            && self
                .advertisement
                .as_ref()
                .is_some_and(|view| view.edit_form().is_some())
    }

    fn require_advertisements(&self, command: &'static str) -> Result<(), AppError> {
        match self.route {
            Route::Advertisements => Ok(()),
            _ => Err(self.unavailable(command)),
        }
    }

    fn require_orders(&self, command: &'static str) -> Result<(), AppError> {
        match self.route {
            Route::Orders => Ok(()),
            _ => Err(self.unavailable(command)),
        }
    }

    fn unavailable(&self, command: &'static str) -> AppError {
        AppError::Unavailable {
            command,
            route: self.route.path(),
        }
    }

    pub fn render(&self) -> String {
        let body = match &self.route {
            Route::Advertisements => render::advertisements(&self.advertisements),
            Route::Advertisement(_) => self
                .advertisement
                .as_ref()
                .map(render::advertisement)
                .unwrap_or_else(|| render::LOADING.to_string()),
            Route::Orders => render::orders(&self.orders),
            Route::NotFound(path) => render::not_found(path),
        };
        format!("{}\n\n{}", render::nav_bar(&self.route), body)
    }
}
