use planbar::cli::Args;
use planbar::estimate::Estimate;
use planbar::widgets::planner::{
    render_planner, render_toolbar, PlannerConfig, PlannerEvent, PlannerState,
};

use clap::Parser;
use eframe::egui;
use log::info;

/// Demo application: a planner over generated sample estimates.
struct PlanbarApp {
    weeks: i32,
    estimates: Vec<Estimate>,
    config: PlannerConfig,
    state: PlannerState,
}

impl PlanbarApp {
    fn new(cc: &eframe::CreationContext<'_>, weeks: i32, estimates: Vec<Estimate>) -> Self {
        // Restore persisted view state (zoom/pan/collapse) if available
        let state = cc
            .storage
            .and_then(|storage| storage.get_string("planner_state"))
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            weeks,
            estimates,
            config: PlannerConfig::default(),
            state,
        }
    }
}

impl eframe::App for PlanbarApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(&self.state) {
            storage.set_string("planner_state", json);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events: Vec<PlannerEvent> = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            render_toolbar(ui, &mut self.state, |ev| events.push(ev));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                render_planner(
                    ui,
                    self.weeks,
                    &self.estimates,
                    &self.config,
                    &mut self.state,
                    |ev| events.push(ev),
                );
            });
        });

        for event in events {
            match event {
                PlannerEvent::PlanChanged { estimate_uuid, phases } => {
                    info!("plan changed: {estimate_uuid} -> {phases:?}");
                    if let Some(est) =
                        self.estimates.iter_mut().find(|e| e.uuid == estimate_uuid)
                    {
                        est.apply(phases);
                    }
                }
                PlannerEvent::RowToggled { estimate_uuid, expanded } => {
                    info!("row toggled: {estimate_uuid} expanded={expanded}");
                }
                PlannerEvent::RowSelected { estimate_uuid } => {
                    info!("row selected: {estimate_uuid}");
                }
                PlannerEvent::ZoomChanged(zoom) => info!("zoom: {zoom}"),
                PlannerEvent::PanChanged(pan) => info!("pan: {pan}"),
            }
        }
    }
}

/// Generate deterministic sample rows that fit the axis.
fn sample_estimates(rows: usize, weeks: i32) -> Vec<Estimate> {
    let phase_keys = ["design", "procure", "build", "commission"];
    (0..rows)
        .map(|row| {
            let mut est = Estimate::new(format!("Estimate {}", row + 1));
            let base = 1 + (row as i32 * 3) % weeks.max(1);
            for (i, key) in phase_keys.iter().enumerate() {
                let start = (base + i as i32 * 2).min(weeks);
                let end = (start + 3).min(weeks);
                est.phases.insert((*key).to_string(), (start..=end).collect());
            }
            est
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    )
    .filter_module("egui", log::LevelFilter::Info)
    .init();

    let estimates = sample_estimates(args.rows, args.weeks);

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&estimates)?);
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("planbar v{}", env!("CARGO_PKG_VERSION")))
            .with_resizable(true),
        ..Default::default()
    };

    info!("Starting planbar demo: {} weeks, {} rows", args.weeks, args.rows);

    let weeks = args.weeks;
    eframe::run_native(
        "planbar",
        native_options,
        Box::new(move |cc| Ok(Box::new(PlanbarApp::new(cc, weeks, estimates)))),
    )?;

    Ok(())
}
