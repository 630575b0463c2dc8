use chrono::{DateTime, Utc};
use market_types::domain::advertisement::Advertisement;
use market_types::domain::order::Order;

use crate::application::pipeline::Page;
use crate::application::views::{
    AdField, AdvertisementForm, AdvertisementView, AdvertisementsView, DetailState, ListStatus,
    OrdersView,
};
use crate::inbound::router::Route;

pub const EMPTY_PAGE: &str = "Nothing to show here.";
pub const LOADING: &str = "Loading...";

pub fn nav_bar(route: &Route) -> String {
    let mark = |active: bool, label: &str| {
        if active {
            format!("[{label}]")
        } else {
            format!(" {label} ")
        }
    };
    format!(
        "Marketplace | {} {} | {}",
        mark(
            matches!(route, Route::Advertisements | Route::Advertisement(_)),
            "Advertisements"
        ),
        mark(matches!(route, Route::Orders), "Orders"),
        route.path()
    )
}

/// `dd.mm.yyyy` in UTC.
pub fn date(at: &DateTime<Utc>) -> String {
    at.format("%d.%m.%Y").to_string()
}

pub fn money(amount: f64) -> String {
    format!("{amount} ₽")
}

fn pagination<T>(page: &Page<'_, T>) -> String {
    if page.total_pages <= 1 {
        return String::new();
    }
    let numbers: Vec<String> = (1..=page.total_pages)
        .map(|n| {
            if n == page.number {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    format!("Pages: {}", numbers.join(" "))
}

fn advertisement_card(ad: &Advertisement) -> String {
    let image = if ad.image_url.is_some() { " [img]" } else { "" };
    format!(
        "#{id} {name}{image}\n    {price}   likes {likes}   views {views}",
        id = ad.id,
        name = ad.name,
        price = money(ad.price),
        likes = ad.likes,
        views = ad.views,
    )
}

fn form(title: &str, form: &AdvertisementForm) -> Vec<String> {
    let mut lines = vec![format!("== {title} ==")];
    for field in AdField::ALL {
        lines.push(format!(
            "  {:<12} ({:<11}) {}",
            field.label(),
            field.key(),
            form.value(field)
        ));
    }
    if let Some(error) = &form.error {
        lines.push(format!("  ! {error}"));
    }
    lines.push("  `set <field> <value>`, `submit` or `cancel`".into());
    lines
}

pub fn advertisements(view: &AdvertisementsView) -> String {
    let mut lines = vec!["Advertisements".to_string()];
    match view.status() {
        ListStatus::Loading => lines.push(LOADING.into()),
        ListStatus::Failed(message) => lines.push(message.to_string()),
        ListStatus::Ready { notice } => {
            if let Some(notice) = notice {
                lines.push(format!("! {notice}"));
            }
            let page = view.page();
            lines.push(format!(
                "Search: \"{}\"   per page: {}   found: {}",
                view.search(),
                view.paging().page_size(),
                page.total_items
            ));
            if page.is_empty() {
                lines.push(EMPTY_PAGE.into());
            } else {
                lines.extend(page.items.iter().map(|ad| advertisement_card(ad)));
                let bar = pagination(&page);
                if !bar.is_empty() {
                    lines.push(bar);
                }
            }
        }
    }
    if let Some(create) = view.create_form() {
        lines.extend(form("New advertisement", create));
    }
    lines.join("\n")
}

fn order_card(order: &Order) -> String {
    let mut lines = vec![
        format!("Order {}", order.id),
        format!("    Created:   {}", date(&order.created_at)),
    ];
    if let Some(finished_at) = &order.finished_at {
        lines.push(format!("    Finished:  {}", date(finished_at)));
    }
    lines.push(format!("    Status:    {}", order.status.label()));
    lines.push(format!("    Total:     {}", money(order.total)));
    lines.push(format!("    Items:     {}", order.item_count()));
    lines.push(format!("    Delivery:  {}", order.delivery_way));
    if order.can_be_completed() {
        lines.push("    The order can be completed".into());
    }
    if order.is_finished() {
        lines.push("    The order is completed".into());
    }
    lines.join("\n")
}

fn items_dialog(order: &Order) -> Vec<String> {
    let mut lines = vec![format!("== Items of order {} ==", order.id)];
    if order.items.is_empty() {
        lines.push("  no items".into());
    }
    for item in &order.items {
        lines.push(format!(
            "  {} x{}  {}   open {}",
            item.name,
            item.count,
            money(item.price),
            Route::Advertisement(item.id.clone()).path()
        ));
    }
    lines.push("  `close` to return".into());
    lines
}

pub fn orders(view: &OrdersView) -> String {
    let mut lines = vec!["Orders".to_string()];
    match view.status() {
        ListStatus::Loading => lines.push(LOADING.into()),
        ListStatus::Failed(message) => lines.push(message.to_string()),
        ListStatus::Ready { notice } => {
            if let Some(notice) = notice {
                lines.push(format!("! {notice}"));
            }
            let page = view.page();
            lines.push(format!(
                "Status: {}   sort: {}   per page: {}   found: {}",
                view.status_filter(),
                view.sort_key(),
                view.paging().page_size(),
                page.total_items
            ));
            if page.is_empty() {
                lines.push(EMPTY_PAGE.into());
            } else {
                lines.extend(page.items.iter().map(|order| order_card(order)));
                let bar = pagination(&page);
                if !bar.is_empty() {
                    lines.push(bar);
                }
            }
        }
    }
    if let Some(order) = view.items_dialog() {
        lines.extend(items_dialog(order));
    }
    lines.join("\n")
}

pub fn advertisement(view: &AdvertisementView) -> String {
    let ad = match view.state() {
        DetailState::Loading => return LOADING.into(),
        DetailState::Failed(message) => return message.clone(),
        DetailState::Loaded(ad) => ad,
    };
    let mut lines = vec![
        ad.name.clone(),
        format!(
            "Image: {}",
            ad.image_url.as_deref().unwrap_or("(no image)")
        ),
        money(ad.price),
        format!("likes {}   views {}", ad.likes, ad.views),
        format!("Published {}", date(&ad.created_at)),
        String::new(),
        ad.description.clone(),
    ];
    match view.edit_form() {
        Some(edit) => lines.extend(form("Edit advertisement", edit)),
        None => lines.push("`edit` to change this advertisement".into()),
    }
    lines.join("\n")
}

pub fn not_found(path: &str) -> String {
    format!("404\nOops! Page not found: {path}")
}

pub fn help() -> String {
    [
        "open <path>          /advertisements, /advertisements/<id>, /orders",
        "reload               fetch the current screen again",
        "search [term]        filter advertisements by name (text taken as typed)",
        "per-page <n>         cards per page",
        "page <n>             go to a page",
        "filter <status|all>  filter orders by status",
        "sort <created|total> sort orders",
        "items <order id>     show the items of an order",
        "close                close the items dialog",
        "new                  new advertisement dialog",
        "edit                 edit the shown advertisement",
        "set <field> <value>  name, description, price or image",
        "submit | cancel      send or discard the dialog",
        "quit",
    ]
    .join("\n")
}
