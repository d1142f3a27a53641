use crepo::presentation::cli::CliApp;

fn main() -> anyhow::Result<()> {
    // Run the CLI application
    let app = CliApp::new();
    app.run()
}
