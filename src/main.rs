//! linkqr — turns URLs into QR codes and keeps a recent history.
//!
//! Entry point: opens the generator window. When built without the `gui`
//! feature, encodes the URLs given on the command line instead.

#[cfg(feature = "gui")]
fn main() {
    linkqr::logging::init();
    if let Err(e) = linkqr::ui::webview_app::run() {
        tracing::error!(error = %e, "linkqr failed to start");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
#[tokio::main(flavor = "current_thread")]
async fn main() {
    use linkqr::app::App;
    use linkqr::managers::session_manager::SessionManagerTrait;
    use linkqr::services::settings_engine::SettingsEngine;

    linkqr::logging::init();

    let mut app = match App::from_settings(SettingsEngine::new(None)) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "linkqr failed to start");
            std::process::exit(1);
        }
    };
    app.startup();

    let inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        println!("Recent QR codes:");
        for entry in app.session_manager.history() {
            println!("  {}  {}", entry.id, entry.url);
        }
    }

    for input in inputs {
        let encoder = app.encoder.clone();
        match app.session_manager.generate(&input, encoder).await {
            Ok(entry) => match app.download_manager.export(Some(&entry)) {
                Ok(Some(path)) => println!("{} -> {}", entry.url, path.display()),
                Ok(None) => {}
                Err(e) => eprintln!("{}: {}", entry.url, e),
            },
            Err(e) => eprintln!("{}: {}", input, e),
        }
    }

    app.shutdown();
}
