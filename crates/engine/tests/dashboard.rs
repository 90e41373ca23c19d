//! End-to-end checks of the scope -> filter -> aggregate pipeline through
//! the public engine API.

use chrono::NaiveDate;

use engine::{
    Engine, EngineError, OnlinePaymentType, OrderDraft, OrderFilter, PaymentMode, Role,
    TransactionDraft, User, compute_stats, filter_orders, scope,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    engine: Engine,
    admin: User,
    alice: User,
    bob: User,
    alice_card: String,
    bob_card: String,
}

/// Two regular users with one card each, a handful of orders and one
/// recorded payment against Alice's card.
fn fixture() -> Fixture {
    let mut engine = Engine::builder().build().unwrap();
    engine
        .bootstrap_admin("Root", "root@example.com", "secret")
        .unwrap();
    let admin = engine.authenticate("root@example.com", "secret").unwrap();

    let alice_id = engine
        .new_user(&admin, "Alice", "alice@example.com", "pw", Role::User)
        .unwrap();
    engine
        .new_user(&admin, "Bob", "bob@example.com", "pw", Role::User)
        .unwrap();
    let alice = engine.authenticate("alice@example.com", "pw").unwrap();
    let bob = engine.authenticate("bob@example.com", "pw").unwrap();

    let alice_card = engine
        .new_card(&alice, "Alice Visa", "4111111111111111", None)
        .unwrap();
    let bob_card = engine
        .new_card(&bob, "Bob Master", "5500000000000004", None)
        .unwrap();

    let order = |user: &User, card: &str, day: u32, price: i64, cashback: i64, selling: Option<i64>| OrderDraft {
        model: "Pixel 9".to_string(),
        variant: "128GB".to_string(),
        order_date: date(2024, 5, day),
        ordered_price: price,
        cashback,
        user_id: user.id.clone(),
        card_id: card.to_string(),
        delivery_date: None,
        selling_price: selling,
        dealer: Some("Acme".to_string()),
    };

    engine
        .new_order(&alice, order(&alice, &alice_card, 1, 1000, 100, Some(1200)))
        .unwrap();
    engine
        .new_order(&alice, order(&alice, &alice_card, 10, 800, 0, None))
        .unwrap();
    engine
        .new_order(&bob, order(&bob, &bob_card, 20, 600, 50, Some(900)))
        .unwrap();

    engine
        .new_transaction(
            &admin,
            TransactionDraft {
                date: date(2024, 5, 15),
                amount: 400,
                dealer: "Acme".to_string(),
                description: None,
                user_id: alice_id.clone(),
                card_id: Some(alice_card.clone()),
                payment_mode: PaymentMode::Online,
                online_payment_type: Some(OnlinePaymentType::Upi),
            },
        )
        .unwrap();

    Fixture {
        engine,
        admin,
        alice,
        bob,
        alice_card,
        bob_card,
    }
}

#[test]
fn admin_stats_cover_all_users() {
    let fx = fixture();
    let stats = fx.engine.stats(Some(&fx.admin), &OrderFilter::default()).unwrap();

    assert_eq!(stats.total_phones, 3);
    assert_eq!(stats.total_invested, 2400);
    assert_eq!(stats.total_invested_after_cashback, 2250);
    assert_eq!(stats.total_received, 400);
    assert_eq!(stats.total_pending, 2000);
    // profit: (1200 - 900) + (900 - 550) = 650 over two sold orders
    assert_eq!(stats.total_profit, 650);
    assert_eq!(stats.avg_profit, 325);
}

#[test]
fn scoping_runs_before_aggregation() {
    let fx = fixture();
    let stats = fx.engine.stats(Some(&fx.alice), &OrderFilter::default()).unwrap();

    // Only Alice's two orders and her payment are visible.
    assert_eq!(stats.total_phones, 2);
    assert_eq!(stats.total_invested, 1800);
    assert_eq!(stats.total_received, 400);
    assert_eq!(stats.total_profit, 300);
    assert_eq!(stats.avg_profit, 300);
}

#[test]
fn scope_never_leaks_foreign_rows() {
    let fx = fixture();
    let snapshot = fx.engine.snapshot();
    let scoped = scope(Some(&fx.bob), &snapshot).unwrap();

    assert!(scoped.orders.iter().all(|o| o.user_id == fx.bob.id));
    assert!(scoped.cards.iter().all(|c| c.user_id == fx.bob.id));
    assert!(scoped.transactions.iter().all(|t| t.user_id == fx.bob.id));
    assert_eq!(scoped.users.len(), 1);
    assert_eq!(scoped.users[0].id, fx.bob.id);
}

#[test]
fn unauthenticated_reads_are_rejected() {
    let fx = fixture();
    assert_eq!(
        fx.engine.stats(None, &OrderFilter::default()).unwrap_err(),
        EngineError::Unauthenticated
    );
    assert_eq!(fx.engine.scoped(None).unwrap_err(), EngineError::Unauthenticated);
}

#[test]
fn date_filter_includes_both_boundaries() {
    let fx = fixture();
    let filter = OrderFilter {
        date_range: Some((date(2024, 5, 1), date(2024, 5, 10))),
        ..Default::default()
    };
    let orders = fx.engine.orders_view(Some(&fx.admin), &filter).unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o.user_id == fx.alice.id));

    // Filtering the already-filtered set again changes nothing.
    assert_eq!(filter_orders(&orders, &filter), orders);
}

#[test]
fn inconsistent_card_filter_resets_instead_of_emptying() {
    let fx = fixture();
    // Card of Alice selected, user filter switched to Bob.
    let filter = OrderFilter {
        user_id: Some(fx.bob.id.clone()),
        card_id: Some(fx.alice_card.clone()),
        ..Default::default()
    };
    let orders = fx.engine.orders_view(Some(&fx.admin), &filter).unwrap();
    // Bob's order is still visible: the stale card filter was dropped.
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].user_id, fx.bob.id);
}

#[test]
fn card_bills_ignore_dashboard_filters() {
    let fx = fixture();
    let bills = fx.engine.card_bills(Some(&fx.admin)).unwrap();

    let bill_of = |card_id: &str| {
        bills
            .iter()
            .find(|(card, _)| card.id == card_id)
            .map(|(_, bill)| *bill)
            .unwrap()
    };
    // Alice: 1000 + 800 charged, 400 paid back.
    assert_eq!(bill_of(&fx.alice_card), 1400);
    assert_eq!(bill_of(&fx.bob_card), 600);

    // A non-admin only sees their own card's bill.
    let bills = fx.engine.card_bills(Some(&fx.bob)).unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].1, 600);
}

#[test]
fn cashback_uses_its_own_user_filter() {
    let fx = fixture();
    assert_eq!(fx.engine.cashback(Some(&fx.admin), None).unwrap(), 150);
    assert_eq!(
        fx.engine
            .cashback(Some(&fx.admin), Some(fx.bob.id.as_str()))
            .unwrap(),
        50
    );
    // Scoping caps a regular user at their own rows regardless of filter.
    assert_eq!(fx.engine.cashback(Some(&fx.alice), None).unwrap(), 100);
}

#[test]
fn empty_store_stats_are_all_zero() {
    let mut engine = Engine::builder().build().unwrap();
    engine
        .bootstrap_admin("Root", "root@example.com", "secret")
        .unwrap();
    let admin = engine.authenticate("root@example.com", "secret").unwrap();

    let stats = engine.stats(Some(&admin), &OrderFilter::default()).unwrap();
    assert_eq!(stats, compute_stats(&[], &[]));
    assert_eq!(stats.avg_profit, 0);
    assert_eq!(stats.total_pending, 0);
}

#[test]
fn snapshot_survives_restart() {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_snapshots");
    std::fs::create_dir_all(&root).unwrap();
    let path = root.join(format!("dashboard_{}.json", uuid::Uuid::new_v4()));

    {
        let mut engine = Engine::builder().snapshot_path(&path).build().unwrap();
        engine
            .bootstrap_admin("Root", "root@example.com", "secret")
            .unwrap();
        let admin = engine.authenticate("root@example.com", "secret").unwrap();
        engine
            .new_card(&admin, "Regalia", "4111111111111111", None)
            .unwrap();
    }

    let engine = Engine::builder().snapshot_path(&path).build().unwrap();
    let admin = engine.authenticate("root@example.com", "secret").unwrap();
    let scoped = engine.scoped(Some(&admin)).unwrap();
    assert_eq!(scoped.cards.len(), 1);

    std::fs::remove_file(&path).ok();
}
