use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tokio::time;
use tracing::debug;

use revealkit_core::engine::TweenEngine;
use revealkit_core::hold_scroll::{FrameClock, HoldScrollController, PressKind, ScrollOffsets, ScrollTarget};
use revealkit_core::visibility::{Effect, EffectKind, Phase, VisibilityAnimator};
use revealkit_core::{AppConfig, StrategyKind};

#[derive(Debug, Serialize)]
struct ScrollReport {
    direction: &'static str,
    strategy: StrategyKind,
    step: f64,
    hold_ms: u64,
    ticks: u64,
    offset: f64,
}

/// Hold a trigger for `hold_ms` against an unbounded target
pub async fn scroll(
    config: &AppConfig,
    hold_ms: u64,
    strategy: Option<StrategyKind>,
    step: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut scroll_config = config.scroll.clone();
    if let Some(strategy) = strategy {
        scroll_config.strategy = strategy;
    }
    if let Some(step) = step {
        scroll_config.step = step;
    }

    let clock = FrameClock::new();
    let target = Arc::new(ScrollOffsets::new());
    let mut controller = HoldScrollController::from_config(&scroll_config, &clock)?;
    controller.bind_target(&target);

    // Stand-in display refresh for the frame strategy
    let pulses = (scroll_config.strategy == StrategyKind::Frame).then(|| {
        let clock = clock.clone();
        let period = config.ui.animation_tick_duration();
        tokio::spawn(async move {
            let mut frames = time::interval(period);
            loop {
                frames.tick().await;
                clock.pulse();
            }
        })
    });

    controller.on_press_start(PressKind::primary());
    time::sleep(Duration::from_millis(hold_ms)).await;
    controller.on_press_end();

    if let Some(pulses) = pulses {
        pulses.abort();
    }

    let direction = controller.direction();
    let report = ScrollReport {
        direction: direction.label(),
        strategy: controller.strategy_kind(),
        step: controller.step(),
        hold_ms,
        ticks: controller.ticks(),
        offset: target.scroll_offset(direction.axis()),
    };
    debug!(?report, "Scroll simulation finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "held {} for {}ms ({:?}, step {}): {} ticks, offset {:.1}",
            report.direction, report.hold_ms, report.strategy, report.step, report.ticks, report.offset
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct Sample {
    t_ms: u64,
    phase: &'static str,
    values: BTreeMap<&'static str, f64>,
}

#[derive(Debug, Serialize)]
struct RevealTrace {
    effect: &'static str,
    samples: Vec<Sample>,
}

/// Show then hide each effect on a simulated clock, sampling every `sample_ms`
pub fn reveal(config: &AppConfig, sample_ms: u64, json: bool) -> Result<()> {
    let step = Duration::from_millis(sample_ms.max(1));
    let durations = config.visibility.durations()?;
    // Enough samples to finish either transition, with slack
    let longest = durations.enter.max(durations.exit);
    let limit = longest.as_millis() as u64 / step.as_millis() as u64 + 4;

    let mut traces = Vec::new();
    for kind in [EffectKind::Fade, EffectKind::FadeSlide, EffectKind::ScaleX] {
        let start = Instant::now();
        let mut engine = TweenEngine::starting_at(start);
        let effect = Effect::from_config(kind, &config.visibility)?;
        let mut animator =
            VisibilityAnimator::new(effect, durations, false).with_easing(config.visibility.easing);
        let target = engine.register_target(animator.effect().hidden());
        animator.bind_target(target, &mut engine);

        let mut samples = Vec::new();
        let mut now = start;
        let mut record = |engine: &TweenEngine, animator: &VisibilityAnimator, now: Instant| {
            let values: BTreeMap<_, _> = engine
                .values(target)
                .map(|v| v.iter().map(|(p, value)| (p.name(), value)).collect())
                .unwrap_or_default();
            samples.push(Sample {
                t_ms: now.duration_since(start).as_millis() as u64,
                phase: phase_label(animator.phase()),
                values,
            });
        };

        for visible in [true, false] {
            animator.observe(visible, &mut engine);
            record(&engine, &animator, now);

            let settled = if visible { Phase::Visible } else { Phase::Unmounted };
            for _ in 0..limit {
                now += step;
                let completed = engine.update(now);
                animator.on_tweens_complete(&completed);
                record(&engine, &animator, now);
                if animator.phase() == settled {
                    break;
                }
            }
        }

        traces.push(RevealTrace {
            effect: animator.effect().name(),
            samples,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&traces)?);
        return Ok(());
    }

    for trace in &traces {
        println!("{}", trace.effect);
        for sample in &trace.samples {
            let values: Vec<String> = sample
                .values
                .iter()
                .map(|(name, value)| format!("{}={:.2}", name, value))
                .collect();
            println!("  {:>6}ms  {:<9} {}", sample.t_ms, sample.phase, values.join(" "));
        }
    }
    Ok(())
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Unmounted => "unmounted",
        Phase::Entering { .. } => "entering",
        Phase::Visible => "visible",
        Phase::Exiting { .. } => "exiting",
    }
}
