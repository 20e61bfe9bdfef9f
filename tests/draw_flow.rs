//! End-to-end draw flow over the in-memory store: quotas, history and stats.

use fortune_engine::config::DailyLimits;
use fortune_engine::database::MemoryStore;
use fortune_engine::spread;
use fortune_engine::{DrawOutcome, DrawRequest, FortuneConfig, FortuneService, SpreadType};
use std::collections::HashSet;
use std::sync::Arc;

fn request(spread: SpreadType, question: Option<&str>) -> DrawRequest {
    DrawRequest {
        spread,
        question: question.map(str::to_string),
    }
}

fn service_with(config: FortuneConfig) -> (FortuneService<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    (FortuneService::new(store.clone(), config), store)
}

#[tokio::test]
async fn limit_one_allows_first_draw_then_quota_exceeded() {
    let config = FortuneConfig {
        daily_limits: DailyLimits { single: 1, triple: 1, celtic: 1 },
        ..FortuneConfig::default()
    };
    let (service, _store) = service_with(config);

    match service.draw_card(7, request(SpreadType::Single, None)).await.unwrap() {
        DrawOutcome::Drawn(result) => {
            assert_eq!(result.cards.len(), 1);
            assert_eq!(result.remaining_draws, Some(0));
        }
        DrawOutcome::QuotaExceeded { .. } => panic!("first draw of the day must succeed"),
    }

    match service.draw_card(7, request(SpreadType::Single, None)).await.unwrap() {
        DrawOutcome::QuotaExceeded { remaining, reason } => {
            assert_eq!(remaining, 0);
            assert!(!reason.is_empty());
        }
        DrawOutcome::Drawn(_) => panic!("second draw must hit the quota"),
    }
}

#[tokio::test]
async fn celtic_draw_returns_ten_distinct_cards_in_layout_order() {
    let (service, _store) = service_with(FortuneConfig::default());
    let outcome = service
        .draw_card(7, request(SpreadType::Celtic, Some("what should I focus on?")))
        .await
        .unwrap();
    let DrawOutcome::Drawn(result) = outcome else {
        panic!("fresh user must be allowed a celtic draw");
    };

    assert_eq!(result.cards.len(), 10);
    let ids: HashSet<_> = result.cards.iter().map(|c| c.card_id).collect();
    assert_eq!(ids.len(), 10, "card ids must be pairwise distinct");

    let expected: Vec<&str> = spread::layout(SpreadType::Celtic).iter().map(|p| p.key).collect();
    let got: Vec<&str> = result.cards.iter().map(|c| c.position.as_str()).collect();
    assert_eq!(got, expected);
    assert_eq!(result.interpretation.readings.len(), 10);
}

#[tokio::test]
async fn recorded_draw_round_trips_through_history() {
    let (service, _store) = service_with(FortuneConfig::default());
    let DrawOutcome::Drawn(result) = service
        .draw_card(9, request(SpreadType::Triple, Some("career outlook?")))
        .await
        .unwrap()
    else {
        panic!("draw must succeed");
    };

    let history = service.get_history(9, 20).await.unwrap();
    assert_eq!(history.len(), 1);
    let record = &history[0];
    assert_eq!(record.spread, SpreadType::Triple);
    assert_eq!(record.question.as_deref(), Some("career outlook?"));
    for (drawn, stored) in result.cards.iter().zip(&record.cards) {
        assert_eq!(drawn.card_id, stored.card_id);
        assert_eq!(drawn.is_reversed, stored.is_reversed);
        assert_eq!(drawn.position, stored.position);
    }
}

#[tokio::test]
async fn bypass_user_never_sees_quota_exceeded() {
    let config = FortuneConfig {
        bypass_user_ids: vec![42],
        daily_limits: DailyLimits { single: 1, triple: 1, celtic: 1 },
        ..FortuneConfig::default()
    };
    let (service, _store) = service_with(config);

    for _ in 0..10 {
        match service.draw_card(42, request(SpreadType::Single, None)).await.unwrap() {
            DrawOutcome::Drawn(result) => assert_eq!(result.remaining_draws, None),
            DrawOutcome::QuotaExceeded { .. } => panic!("bypass user must never be limited"),
        }
    }
}

#[tokio::test]
async fn history_cap_evicts_oldest_records() {
    let config = FortuneConfig {
        bypass_user_ids: vec![42],
        history_cap: 5,
        ..FortuneConfig::default()
    };
    let (service, _store) = service_with(config);

    for _ in 0..8 {
        let outcome = service.draw_card(42, request(SpreadType::Single, None)).await.unwrap();
        assert!(matches!(outcome, DrawOutcome::Drawn(_)));
    }

    let history = service.get_history(42, 100).await.unwrap();
    assert_eq!(history.len(), 5);
    // Newest first.
    for pair in history.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
    let stats = service.get_stats(42).await.unwrap();
    assert_eq!(stats.total_draws, 5);
    assert_eq!(stats.per_type_counts.single, 5);
}

#[tokio::test]
async fn fresh_user_gets_default_stats_and_empty_history() {
    let (service, store) = service_with(FortuneConfig::default());
    assert!(service.get_history(1234, 20).await.unwrap().is_empty());
    let stats = service.get_stats(1234).await.unwrap();
    assert_eq!(stats.total_draws, 0);
    assert_eq!(stats.favorite_card, None);
    // Reads never create a profile document.
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn lucky_hours_drive_the_special_time_flag() {
    let always = FortuneConfig { lucky_hours: (0..24).collect(), ..FortuneConfig::default() };
    let (service, _store) = service_with(always);
    let DrawOutcome::Drawn(result) =
        service.draw_card(7, request(SpreadType::Single, None)).await.unwrap()
    else {
        panic!("draw must succeed");
    };
    assert!(result.is_special_time);

    let never = FortuneConfig { lucky_hours: Vec::new(), ..FortuneConfig::default() };
    let (service, _store) = service_with(never);
    let DrawOutcome::Drawn(result) =
        service.draw_card(7, request(SpreadType::Single, None)).await.unwrap()
    else {
        panic!("draw must succeed");
    };
    assert!(!result.is_special_time);
}

#[tokio::test]
async fn concurrent_draws_for_one_user_cannot_both_pass_a_limit_of_one() {
    let config = FortuneConfig {
        daily_limits: DailyLimits { single: 1, triple: 1, celtic: 1 },
        ..FortuneConfig::default()
    };
    let (service, _store) = service_with(config);
    let service = Arc::new(service);

    let a = tokio::spawn({
        let service = service.clone();
        async move { service.draw_card(7, request(SpreadType::Single, None)).await.unwrap() }
    });
    let b = tokio::spawn({
        let service = service.clone();
        async move { service.draw_card(7, request(SpreadType::Single, None)).await.unwrap() }
    });

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    let drawn = outcomes.iter().filter(|o| matches!(o, DrawOutcome::Drawn(_))).count();
    let denied = outcomes
        .iter()
        .filter(|o| matches!(o, DrawOutcome::QuotaExceeded { .. }))
        .count();
    assert_eq!((drawn, denied), (1, 1));
}

#[tokio::test]
async fn shuffle_is_a_cosmetic_ack() {
    let (service, store) = service_with(FortuneConfig::default());
    service.shuffle_deck(7).await;
    assert!(store.is_empty().await);
}
