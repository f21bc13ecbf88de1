/**
 * egui Native Desktop App - Main Entry Point
 *
 * Loads configuration, sets up logging and the tokio runtime the sync
 * controller runs on, then hands control to eframe.
 */
use eframe::egui;
use gristfetch::egui_app::{theme, views, AppState, Config};
use gristfetch::shared::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::load();

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        config
            .as_ref()
            .map(|c| c.app().log_filter.clone())
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&filter))
        .init();

    // Loading ran before the subscriber existed
    if let Ok(config) = &config {
        tracing::info!("{}", config.describe_source());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Grist Fetch",
        options,
        Box::new(|cc| {
            theme::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(GristFetchApp {
                state: AppState::new(runtime, config),
            }))
        }),
    )?;
    Ok(())
}

struct GristFetchApp {
    state: AppState,
}

impl eframe::App for GristFetchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_background();

        views::render_top_bar(ctx, &mut self.state);
        views::render_error_banner(ctx, &mut self.state);
        views::render_records_panel(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint();
    }
}
