use trolley_app::context::AppContext;

pub(crate) async fn run(app: &AppContext) -> Result<(), String> {
    app.migrate()
        .await
        .map_err(|error| format!("failed to migrate: {error}"))?;

    println!("migrations applied");

    Ok(())
}
