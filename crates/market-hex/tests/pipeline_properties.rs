use std::num::NonZeroUsize;

use chrono::{Duration, TimeZone, Utc};
use market_hex::application::pipeline::{
    retain, sort_orders, total_pages, window, NameSearch, OrderSortKey, StatusFilter,
};
use market_hex::domain::advertisement::Advertisement;
use market_hex::domain::order::{Order, OrderStatus};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn ad(i: usize, name: String) -> Advertisement {
    Advertisement {
        id: i.to_string(),
        name,
        description: String::new(),
        price: 0.0,
        views: 0,
        likes: 0,
        image_url: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn order(i: usize, status: i64, total: u8, hour: u8) -> Order {
    Order {
        id: i.to_string(),
        status: OrderStatus::from(status),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::hours(i64::from(hour)),
        finished_at: None,
        items: vec![],
        delivery_way: "courier".into(),
        total: f64::from(total),
    }
}

fn ads() -> impl Strategy<Value = Vec<Advertisement>> {
    prop::collection::vec("[A-Za-zÄö ]{0,8}", 0..30)
        .prop_map(|names| names.into_iter().enumerate().map(|(i, n)| ad(i, n)).collect())
}

// Few distinct keys so ties are common.
fn orders() -> impl Strategy<Value = Vec<Order>> {
    prop::collection::vec((0_i64..9, 0_u8..4, 0_u8..4), 0..30).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (status, total, hour))| order(i, status, total, hour))
            .collect()
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn search_keeps_exactly_the_containing_names(collection in ads(), term in "[A-Za-zÄö]{0,3}") {
        let found = retain(&collection, &NameSearch::new(&term));
        let expected: Vec<&Advertisement> = collection
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&term.to_lowercase()))
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn search_is_idempotent(collection in ads(), term in "[a-z]{0,2}") {
        let search = NameSearch::new(&term);
        let once = retain(&collection, &search);
        let twice = retain(once.iter().copied(), &search);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn no_status_filter_is_identity(collection in orders()) {
        let all = retain(&collection, &StatusFilter::ANY);
        prop_assert_eq!(all, collection.iter().collect::<Vec<_>>());
    }

    #[test]
    fn status_filter_keeps_relative_order(collection in orders(), code in 0_i64..9) {
        let status = OrderStatus::from(code);
        let found = retain(&collection, &StatusFilter::only(status));
        prop_assert!(found.iter().all(|o| o.status == status));
        let positions: Vec<usize> = found
            .iter()
            .map(|o| o.id.parse::<usize>().unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sorting_is_stable(collection in orders()) {
        for key in [OrderSortKey::CreatedAt, OrderSortKey::Total] {
            let sorted = sort_orders(collection.iter().collect(), key);
            prop_assert_eq!(sorted.len(), collection.len());
            for pair in sorted.windows(2) {
                let ordering = key.compare(pair[0], pair[1]);
                prop_assert!(ordering.is_le());
                if ordering.is_eq() {
                    let a = pair[0].id.parse::<usize>().unwrap();
                    let b = pair[1].id.parse::<usize>().unwrap();
                    prop_assert!(a < b);
                }
            }
        }
        let by_total = sort_orders(collection.iter().collect(), OrderSortKey::Total);
        let then_by_date = sort_orders(by_total.clone(), OrderSortKey::CreatedAt);
        for pair in then_by_date.windows(2) {
            if pair[0].created_at == pair[1].created_at {
                prop_assert!(pair[0].total <= pair[1].total);
            }
        }
    }

    #[test]
    fn pages_cover_the_collection_once(len in 0_usize..60, size in 1_usize..12) {
        let size = NonZeroUsize::new(size).unwrap();
        let items: Vec<usize> = (0..len).collect();
        let pages = total_pages(len, size);
        prop_assert_eq!(pages, len.div_ceil(size.get()));

        let joined: Vec<usize> = (1..=pages)
            .flat_map(|page| window(&items, size, page).iter().copied())
            .collect();
        prop_assert_eq!(joined, items.clone());
        prop_assert!(window(&items, size, pages + 1).is_empty());
    }
}
