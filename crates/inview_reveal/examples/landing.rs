//! Landing Page Simulation
//!
//! Drives the reveal engine the way a sectioned landing page would: a hero
//! heading, a staggered grid of impact stat cards with grouped counters,
//! and an about blurb, scrolled through a simulated 900px viewport.
//!
//! Run with: cargo run -p inview_reveal --example landing

use inview_core::{ElementBounds, TargetRef};
use inview_reveal::{
    CountUpConfig, CountUpController, RevealConfig, RevealController, ScrollRevealEngine, Section,
};

const VIEWPORT_HEIGHT: f32 = 900.0;
const FRAME_MS: f32 = 16.0;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let engine = ScrollRevealEngine::new(VIEWPORT_HEIGHT);
    engine.install_global();

    // ------------------------------------------------------------------
    // Hero: a single heading that rises in near the top of the page
    // ------------------------------------------------------------------
    let hero_heading = TargetRef::new().with_id("hero-heading");
    hero_heading.attach(ElementBounds::new(0.0, 200.0, 800.0, 140.0));

    let mut hero = Section::new("hero").with_reveal(RevealController::single(
        hero_heading.clone(),
        RevealConfig::fade_up(),
    ));
    hero.add_target("heading", hero_heading.clone());

    // ------------------------------------------------------------------
    // Impact: a stat-card grid with grouped count-up displays
    // ------------------------------------------------------------------
    let stats_grid = TargetRef::new().with_id("impact-grid");
    stats_grid.attach(ElementBounds::new(0.0, 2200.0, 1200.0, 320.0));

    let stat_values: [(&str, u64); 4] = [
        ("children-mentored", 2000),
        ("active-volunteers", 45),
        ("partner-schools", 12),
        ("success-rate", 85),
    ];

    let mut impact = Section::new("impact");
    let mut counters = Vec::new();
    for (i, (id, value)) in stat_values.iter().enumerate() {
        let card = TargetRef::new()
            .with_id(format!("card-{id}"))
            .with_class("stat-card");
        stats_grid.push_child(card.clone());

        let counter = TargetRef::new()
            .with_id(format!("counter-{id}"))
            .with_class("stat-counter")
            .with_text("0");
        counter.attach(ElementBounds::new(
            300.0 * i as f32,
            2260.0,
            120.0,
            48.0,
        ));
        impact.add_target(*id, counter.clone());
        counters.push(counter.clone());

        impact.add_count_up(CountUpController::new(
            counter,
            CountUpConfig::new(*value).grouped(),
        ));
    }
    impact.add_reveal(RevealController::group(
        stats_grid.clone(),
        "stat-card",
        RevealConfig::fade_up_stats(),
    ));

    // ------------------------------------------------------------------
    // About: a blurb further down, revealed as a staggered group
    // ------------------------------------------------------------------
    let about_body = TargetRef::new().with_id("about-body");
    about_body.attach(ElementBounds::new(0.0, 3400.0, 800.0, 400.0));
    for i in 0..3 {
        about_body.push_child(
            TargetRef::new()
                .with_id(format!("about-paragraph-{i}"))
                .with_class("paragraph"),
        );
    }
    let mut about = Section::new("about").with_reveal(RevealController::group(
        about_body,
        "paragraph",
        RevealConfig::fade_up_group(),
    ));

    engine.mount_section(&mut hero);
    engine.mount_section(&mut impact);
    engine.mount_section(&mut about);

    // ------------------------------------------------------------------
    // Simulate a reader scrolling the page, ~120px per frame
    // ------------------------------------------------------------------
    let mut scroll_y = 0.0;
    while scroll_y < 3200.0 {
        scroll_y += 120.0;
        engine.set_scroll_y(scroll_y);
        engine.frame(FRAME_MS);
    }

    // Let remaining animations run out.
    while engine.frame(FRAME_MS) {}

    tracing::info!(
        heading_opacity = hero_heading.style().opacity,
        "hero settled"
    );
    for ((id, _), counter) in stat_values.iter().zip(&counters) {
        tracing::info!(stat = *id, display = ?counter.text(), "counter settled");
    }
    for card in stats_grid.select_children("stat-card") {
        tracing::info!(card = ?card.id(), opacity = card.style().opacity, "card settled");
    }
}
