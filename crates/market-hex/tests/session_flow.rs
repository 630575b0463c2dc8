use std::num::NonZeroUsize;

use market_hex::application::pipeline::OrderSortKey;
use market_hex::application::views::{DetailState, ListStatus};
use market_hex::domain::order::OrderStatus;
use market_hex::errors::AppError;
use market_hex::inbound::router::Route;
use market_hex::inbound::terminal::{Command, Outcome, Session};
use market_repo::{fixtures, InMemoryMarket};

fn page_size() -> NonZeroUsize {
    NonZeroUsize::new(10).unwrap()
}

async fn screen(session: &mut Session<InMemoryMarket>, line: &str) -> String {
    match session.handle_line(line).await {
        Outcome::Continue(screen) => screen,
        Outcome::Quit => panic!("session ended on {line:?}"),
    }
}

fn names_on_page(session: &Session<InMemoryMarket>) -> Vec<String> {
    session
        .advertisements()
        .page()
        .items
        .iter()
        .map(|ad| ad.name.clone())
        .collect()
}

#[tokio::test]
async fn browsing_twenty_five_advertisements() {
    let mut session = Session::new(fixtures::market_with_advertisements(25), page_size());
    session.open("/").await;
    assert_eq!(session.route(), &Route::Advertisements);
    assert_eq!(names_on_page(&session).first().map(String::as_str), Some("Item 1"));
    assert_eq!(names_on_page(&session).len(), 10);

    let out = screen(&mut session, "page 3").await;
    assert!(out.contains("Pages: 1 2 [3]"));
    assert_eq!(names_on_page(&session), ["Item 21", "Item 22", "Item 23", "Item 24", "Item 25"]);

    // Out of range: ignored.
    screen(&mut session, "page 4").await;
    assert_eq!(session.advertisements().paging().page(), 3);

    screen(&mut session, "search item 2").await;
    assert_eq!(session.advertisements().paging().page(), 1);
    assert_eq!(session.advertisements().page().total_items, 7);

    screen(&mut session, "search nothing-like-this").await;
    let out = screen(&mut session, "reload").await;
    assert!(out.contains("Nothing to show here."));
}

#[tokio::test]
async fn sort_keeps_page_while_filter_resets_it() {
    let market = InMemoryMarket::new();
    for i in 0..30 {
        let status = if i % 2 == 0 { OrderStatus::Paid } else { OrderStatus::Created };
        market.seed_order(fixtures::order(&i.to_string(), status, f64::from(30 - i), i64::from(i)));
    }
    let mut session = Session::new(market, page_size());
    session.open("/orders").await;

    screen(&mut session, "page 3").await;
    screen(&mut session, "sort total").await;
    assert_eq!(session.orders().sort_key(), OrderSortKey::Total);
    assert_eq!(session.orders().paging().page(), 3);

    screen(&mut session, "filter paid").await;
    assert_eq!(session.orders().paging().page(), 1);
    let page = session.orders().page();
    assert_eq!(page.total_items, 15);
    assert!(page.items.iter().all(|o| o.status == OrderStatus::Paid));
    assert!(page.items.windows(2).all(|w| w[0].total <= w[1].total));
}

#[tokio::test]
async fn order_items_dialog() {
    let market = fixtures::market_with_advertisements(1);
    market.seed_order(fixtures::order("A-1", OrderStatus::Received, 120.0, 1));
    let mut session = Session::new(market, page_size());
    session.open("/orders").await;

    let out = screen(&mut session, "items A-1").await;
    assert!(out.contains("Items of order A-1"));
    assert!(out.contains("Item 1 x1  120 ₽   open /advertisements/1"));
    assert!(out.contains("The order can be completed"));
    screen(&mut session, "close").await;
    assert!(session.orders().items_dialog().is_none());
    assert!(matches!(
        session.execute(Command::Close).await,
        Err(AppError::NoOpenForm)
    ));

    // Each item leads to its advertisement.
    screen(&mut session, "items A-1").await;
    let out = screen(&mut session, "open /advertisements/1").await;
    assert_eq!(session.route(), &Route::Advertisement("1".into()));
    assert!(out.contains("Item 1"));
    assert!(out.contains("100 ₽"));
}

#[tokio::test]
async fn search_matches_the_term_as_typed() {
    let market = InMemoryMarket::new();
    market.seed_advertisement(fixtures::advertisement(1, "Oak  desk"));
    market.seed_advertisement(fixtures::advertisement(2, "Oak desk"));
    let mut session = Session::new(market, page_size());
    session.open("/advertisements").await;

    screen(&mut session, "search oak  desk").await;
    assert_eq!(session.advertisements().search(), "oak  desk");
    assert_eq!(names_on_page(&session), ["Oak  desk 1"]);

    screen(&mut session, "search \"oak\"").await;
    assert_eq!(session.advertisements().search(), "oak");
    assert_eq!(names_on_page(&session), ["Oak  desk 1", "Oak desk 2"]);

    screen(&mut session, "search").await;
    assert_eq!(session.advertisements().search(), "");
    assert_eq!(session.advertisements().page().total_items, 2);
}

#[tokio::test]
async fn missing_advertisement_shows_specific_message() {
    let mut session = Session::new(fixtures::market_with_advertisements(1), page_size());
    let out = screen(&mut session, "open /advertisements/404").await;
    assert!(out.contains("Advertisement not found"));
    assert_eq!(
        session.advertisement().map(|view| view.state().clone()),
        Some(DetailState::Failed("Advertisement not found".into()))
    );
}

#[tokio::test]
async fn failed_reload_keeps_shown_collection() {
    let market = fixtures::market_with_advertisements(3);
    let mut session = Session::new(market.clone(), page_size());
    session.open("/advertisements").await;

    market.set_available(false);
    let out = screen(&mut session, "reload").await;
    assert!(out.contains("Could not load advertisements. Please try again later."));
    assert_eq!(session.advertisements().collection().len(), 3);
    assert!(matches!(
        session.advertisements().status(),
        ListStatus::Ready { notice: Some(_) }
    ));

    // Re-entering the route on a dead API starts over with a full-page error.
    session.open("/advertisements").await;
    assert!(matches!(session.advertisements().status(), ListStatus::Failed(_)));
    market.set_available(true);
    session.open("/advertisements").await;
    assert_eq!(session.advertisements().collection().len(), 3);
}

#[tokio::test]
async fn create_and_edit_advertisement() {
    let market = fixtures::market_with_advertisements(2);
    let mut session = Session::new(market.clone(), page_size());
    session.open("/advertisements").await;

    screen(&mut session, "new").await;
    screen(&mut session, "set name Old  lamp").await;
    screen(&mut session, "set price cheap").await;
    screen(&mut session, "submit").await;
    assert!(session.advertisements().create_form().is_none());
    let created = &session.advertisements().collection()[2];
    assert_eq!(created.name, "Old  lamp");
    assert_eq!(created.price, 0.0);
    let id = created.id.clone();

    session.open(&format!("/advertisements/{id}")).await;
    screen(&mut session, "edit").await;
    screen(&mut session, "set price 350").await;
    let out = screen(&mut session, "submit").await;
    assert!(out.contains("350 ₽"));
    let detail = session.advertisement().and_then(|view| view.advertisement());
    assert_eq!(detail.map(|ad| ad.price), Some(350.0));
    assert_eq!(market.advertisement_count(), 3);
}

#[tokio::test]
async fn misplaced_and_unknown_commands() {
    let mut session = Session::new(InMemoryMarket::new(), page_size());
    session.open("/orders").await;
    assert_eq!(
        session.execute(Command::New).await,
        Err(AppError::Unavailable {
            command: "new",
            route: "/orders".into()
        })
    );
    let out = screen(&mut session, "fly away").await;
    assert!(out.starts_with("! "));

    let out = screen(&mut session, "open /nowhere").await;
    assert!(out.contains("404"));
    assert_eq!(session.handle_line("quit").await, Outcome::Quit);
}
