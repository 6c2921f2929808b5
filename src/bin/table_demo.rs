// src/bin/table_demo.rs
//
// Один стол, три места: пассивный бот, сценарий и "удалённый" сервис решений,
// который иногда подвисает. Играем несколько раздач и печатаем стеки.
//
//     RUST_LOG=debug cargo run --bin table_demo

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use holdem_table_engine::domain::player::PlayerAtTable;
use holdem_table_engine::domain::table::{Table, TableConfig};
use holdem_table_engine::domain::Chips;
use holdem_table_engine::engine::{
    ActionSourceError, ChannelSink, ControllerConfig, DecisionClient, DecisionContext, HandController,
    PassiveBot, PlayerActionKind, RemoteDecisionSource, ScriptedSource,
};
use holdem_table_engine::infra::{RngSeed, SeededTableRng};
use holdem_table_engine::time_ctrl::{TimeProfile, TimeRules};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const HANDS: usize = 12;

/// Локальная подделка сервиса решений: каждый седьмой запрос подвисает.
struct FlakyAdvisor {
    calls: AtomicU64,
}

#[async_trait]
impl DecisionClient for FlakyAdvisor {
    async fn request(&self, ctx: &DecisionContext) -> Result<String, ActionSourceError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if n % 7 == 0 {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }

        let pocket_pair = matches!(ctx.hole_cards.as_slice(), [a, b] if a.rank == b.rank);
        let reply = if pocket_pair {
            format!(r#"{{"action": "raise", "amount": {}}}"#, ctx.min_raise_total.0)
        } else if ctx.owes_chips() {
            r#"{"action": "call", "amount": 0}"#.to_string()
        } else {
            r#"{"action": "check"}"#.to_string()
        };
        Ok(reply)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut table = Table::new(1, "DEMO TABLE", TableConfig::new(6, 10, 20));
    table.sit(0, PlayerAtTable::new(1, "Passive", Chips(1_000)));
    table.sit(2, PlayerAtTable::new(2, "Script", Chips(1_000)));
    table.sit(4, PlayerAtTable::new(3, "Advisor", Chips(1_000)));

    let config = ControllerConfig {
        time_rules: TimeRules::from_profile(TimeProfile::Bots),
        ..ControllerConfig::default()
    };
    let rng = SeededTableRng::new(RngSeed::from_u64(42), table.id);
    let (sink, mut snapshots) = ChannelSink::channel();

    let mut controller = HandController::new(table, rng, config).with_sink(sink);
    controller.set_source(0, PassiveBot::new("passive"))?;
    controller.set_source(
        2,
        ScriptedSource::new(
            "script",
            [
                PlayerActionKind::Raise(Chips(60)),
                PlayerActionKind::Call,
                PlayerActionKind::Check,
                PlayerActionKind::AllIn,
            ]
            .into_iter()
            .cycle()
            .take(200),
        ),
    )?;
    controller.set_source(
        4,
        RemoteDecisionSource::new(
            "advisor",
            FlakyAdvisor {
                calls: AtomicU64::new(0),
            },
        ),
    )?;

    let cancel = CancellationToken::new();
    let summaries = controller.play_hands(HANDS, &cancel).await?;

    let mut snapshot_count = 0;
    while snapshots.try_recv().is_ok() {
        snapshot_count += 1;
    }

    println!();
    println!("================ ИТОГ =================");
    for summary in &summaries {
        println!(
            "раздача #{:<3} улица: {:<8} банк: {:>6} победители: {:?}",
            summary.hand_id,
            summary.street_reached.as_str(),
            summary.total_pot.0,
            summary.winners()
        );
    }
    println!();
    for (seat, player) in controller.table().seats.iter().enumerate() {
        if let Some(p) = player {
            println!("место {seat}: {:<8} стек {:>6} ({:?})", p.name, p.stack.0, p.status);
        }
    }
    println!("снимков стола: {snapshot_count}");
    println!("фишек за столом: {}", controller.table().total_chips().0);

    Ok(())
}
