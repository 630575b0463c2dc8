//! Ready-made entities for tests and local demos.

use chrono::{DateTime, Duration, TimeZone, Utc};
use market_types::domain::advertisement::Advertisement;
use market_types::domain::order::{Order, OrderItem, OrderStatus};

use crate::memory::InMemoryMarket;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Advertisement number `n`, named `"{name} {n}"`, created `n` hours after a fixed epoch.
pub fn advertisement(n: u32, name: &str) -> Advertisement {
    Advertisement {
        id: n.to_string(),
        name: format!("{name} {n}"),
        description: format!("Description of {name} {n}"),
        price: f64::from(n) * 100.0,
        views: u64::from(n) * 10,
        likes: u64::from(n),
        image_url: None,
        created_at: epoch() + Duration::hours(i64::from(n)),
    }
}

pub fn order(id: &str, status: OrderStatus, total: f64, created_hours: i64) -> Order {
    Order {
        id: id.to_string(),
        status,
        created_at: epoch() + Duration::hours(created_hours),
        finished_at: None,
        items: vec![OrderItem {
            id: "1".into(),
            name: "Item 1".into(),
            price: total,
            count: 1,
        }],
        delivery_way: "pickup".into(),
        total,
    }
}

/// A market holding `count` advertisements named `"Item 1"`..`"Item {count}"`.
pub fn market_with_advertisements(count: u32) -> InMemoryMarket {
    let market = InMemoryMarket::new();
    for n in 1..=count {
        market.seed_advertisement(advertisement(n, "Item"));
    }
    market
}

/// Sample data behind `--demo`: a couple of pages of advertisements and one
/// order in every known status.
pub fn demo_market() -> InMemoryMarket {
    let market = InMemoryMarket::new();
    let names = ["Desk", "Office chair", "Lamp", "Bookshelf", "Desk organizer"];
    for n in 1..=23 {
        let name = names[(n as usize - 1) % names.len()];
        market.seed_advertisement(advertisement(n, name));
    }
    for (i, status) in OrderStatus::ALL.into_iter().enumerate() {
        let i = i as i64;
        let mut seeded = order(&(100 + i).to_string(), status, 250.0 * (7 - i) as f64, i * 5);
        if matches!(status, OrderStatus::Archived | OrderStatus::Refund) {
            seeded.finished_at = Some(seeded.created_at + Duration::days(3));
        }
        market.seed_order(seeded);
    }
    market
}
